pub mod linear_linear;
pub mod linear_planar;
pub mod linear_point;
pub mod planar_planar;
pub mod point_planar;
pub mod relation;
