/// A unary test over deque values, used by [`Deque::find`](crate::Deque::find).
///
/// Implemented for every `Fn(&T) -> bool`, so closures work directly; named
/// predicate types implement it by hand.
pub trait Predicate<T: ?Sized> {
    fn apply(&self, value: &T) -> bool;

    /// The negation of this predicate.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn apply(&self, value: &T) -> bool {
        self(value)
    }
}

/// Predicate returned by [`Predicate::not`].
#[derive(Debug, Clone, Copy)]
pub struct Not<P>(P);

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Not<P> {
    fn apply(&self, value: &T) -> bool {
        !self.0.apply(value)
    }
}
