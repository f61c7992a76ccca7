/// Errors that can occur when operating on the deque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeError {
    /// A removal reached the sentinel: the chain holds no element to take.
    Empty,

    /// The handle does not name a live node of this deque.
    InvalidHandle,

    NotAdjacent,
}
impl core::fmt::Display for DequeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DequeError::Empty => f.write_str("cannot remove from an empty deque"),
            DequeError::InvalidHandle => f.write_str("invalid handle"),
            DequeError::NotAdjacent => f.write_str("neighbours are not adjacent in the chain"),
        }
    }
}
impl std::error::Error for DequeError {}
