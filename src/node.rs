/// Id of the sentinel in every deque's arena.
pub(crate) const SENTINEL: usize = 0;

/// What a node carries: nothing for the sentinel, one value for an element.
#[derive(Debug, Clone)]
pub(crate) enum Link<T> {
    Sentinel,
    Element(T),
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) prev: usize,
    pub(crate) next: usize,
    pub(crate) link: Link<T>,
}

impl<T> Node<T> {
    /// An empty chain: the sentinel points at itself both ways.
    pub(crate) fn sentinel() -> Self {
        Node {
            prev: SENTINEL,
            next: SENTINEL,
            link: Link::Sentinel,
        }
    }

    pub(crate) fn element(value: T, prev: usize, next: usize) -> Self {
        Node {
            prev,
            next,
            link: Link::Element(value),
        }
    }

    pub(crate) fn is_sentinel(&self) -> bool {
        matches!(self.link, Link::Sentinel)
    }

    pub(crate) fn value(&self) -> Option<&T> {
        match &self.link {
            Link::Element(v) => Some(v),
            Link::Sentinel => None,
        }
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        match &mut self.link {
            Link::Element(v) => Some(v),
            Link::Sentinel => None,
        }
    }

    pub(crate) fn into_value(self) -> Option<T> {
        match self.link {
            Link::Element(v) => Some(v),
            Link::Sentinel => None,
        }
    }

    /// How much this node adds to the chain's size.
    pub(crate) fn size_contribution(&self) -> usize {
        match self.link {
            Link::Element(_) => 1,
            Link::Sentinel => 0,
        }
    }
}
