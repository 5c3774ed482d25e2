/// Classifies `self` against `to`.
pub trait Relation<T> {
    type Relate;

    fn relate(&self, to: &T) -> Self::Relate;
}
