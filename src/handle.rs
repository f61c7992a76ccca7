use crate::node::SENTINEL;

/// A stable reference to one node of a deque, the sentinel included.
///
/// A handle carries the tag of the deque that issued it next to the node id.
/// Any other deque treats it as unknown. Within its deque it stays valid
/// until the node is removed; ids are never reused after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) owner: usize,
    pub(crate) id: usize,
}

impl Handle {
    /// Node id inside the issuing deque, for debugging or external maps.
    pub fn as_raw(&self) -> usize {
        self.id
    }

    /// Does this handle name a sentinel (the "not found" answer of `find`)?
    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL
    }
}
