pub trait Reversable {
    fn flip(self) -> Self;
}
