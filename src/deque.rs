use crate::{
    errors::DequeError,
    handle::Handle,
    node::{Node, SENTINEL},
    predicate::Predicate,
};
use core::fmt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_TAG: AtomicUsize = AtomicUsize::new(0);

fn fresh_tag() -> usize {
    NEXT_TAG.fetch_add(1, Ordering::Relaxed)
}

/// A doubly-linked deque whose chain is closed into a circle by a sentinel.
///
/// Nodes live in an arena keyed by id; `next`/`prev` are ids, so unlinking a
/// node is two id rewrites and never leaves a dangling reference. Every deque
/// has its own tag, stamped into the handles it issues.
pub struct Deque<T> {
    tag: usize,
    nodes: HashMap<usize, Node<T>>,
    next_id: usize,
    len: usize,
}

/// Iterator over `(Handle, &T)` from head to tail.
pub struct IterHandles<'a, T> {
    deque: &'a Deque<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

/// Iterator over values from head to tail.
pub struct Iter<'a, T> {
    inner: IterHandles<'a, T>,
}

/// Owning iterator, drains the deque from the head.
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deque<T> {
    /// Create an empty deque: a lone sentinel linked to itself.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(SENTINEL, Node::sentinel());

        Self {
            tag: fresh_tag(),
            nodes,
            next_id: SENTINEL + 1,
            len: 0,
        }
    }

    /// Count the elements by walking the chain from the head until the
    /// sentinel comes around again. O(n); see [`Deque::len`] for the cached
    /// count.
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut id = self.nodes[&SENTINEL].next;
        loop {
            let node = &self.nodes[&id];
            size += node.size_contribution();
            if node.is_sentinel() {
                return size;
            }
            id = node.next;
        }
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of this deque's sentinel.
    pub fn sentinel(&self) -> Handle {
        self.handle(SENTINEL)
    }

    /// Is `h` the sentinel of this deque?
    pub fn is_sentinel(&self, h: Handle) -> bool {
        self.resolve(h) == Some(SENTINEL)
    }

    /// Insert a value right after the sentinel (new first element).
    pub fn add_at_head(&mut self, value: T) -> Handle {
        let first = self.nodes[&SENTINEL].next;
        self.splice(SENTINEL, first, value)
    }

    /// Insert a value right before the sentinel (new last element).
    pub fn add_at_tail(&mut self, value: T) -> Handle {
        let last = self.nodes[&SENTINEL].prev;
        self.splice(last, SENTINEL, value)
    }

    /// Remove and return the first element.
    ///
    /// On an empty deque the head link points back at the sentinel, which
    /// refuses to be removed: `Err(DequeError::Empty)`, chain untouched.
    pub fn remove_from_head(&mut self) -> Result<T, DequeError> {
        let first = self.nodes[&SENTINEL].next;
        self.unsplice(first)
    }

    /// Remove and return the last element. Fails like
    /// [`Deque::remove_from_head`] when empty.
    pub fn remove_from_tail(&mut self) -> Result<T, DequeError> {
        let last = self.nodes[&SENTINEL].prev;
        self.unsplice(last)
    }

    /// Handle of the first element (head to tail) satisfying `pred`.
    ///
    /// When nothing matches the walk ends on the sentinel and its handle is
    /// returned; check it with [`Handle::is_sentinel`].
    pub fn find<P: Predicate<T>>(&self, pred: P) -> Handle {
        let mut id = self.nodes[&SENTINEL].next;
        loop {
            let node = &self.nodes[&id];
            match node.value() {
                Some(value) if !pred.apply(value) => id = node.next,
                _ => return self.handle(id),
            }
        }
    }

    /// Remove the first element whose value equals the value behind `target`.
    ///
    /// Matching is by value, not by node identity: if several elements hold
    /// equal values the one nearest the head goes, which need not be the node
    /// `target` names. Use [`Deque::remove`] to unlink a specific node.
    ///
    /// Silently does nothing (returns `None`) when `target` is the sentinel
    /// or not a live node of this deque, handles issued by another deque
    /// included.
    pub fn remove_node(&mut self, target: Handle) -> Option<T>
    where
        T: PartialEq,
    {
        let found = {
            let wanted = self.get(target)?;
            self.find(|value: &T| value == wanted)
        };
        // Nothing matched: `found` is the sentinel, which refuses removal.
        self.unsplice(found.id).ok()
    }

    /// Remove the first element equal to `value`; `None` if there is none.
    pub fn remove_value(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let found = self.find(|v: &T| v == value);
        self.unsplice(found.id).ok()
    }

    /// Unlink the node `h` names and return its value.
    ///
    /// Errors with `Empty` for the sentinel and `InvalidHandle` for handles
    /// that do not name a live node of this deque.
    pub fn remove(&mut self, h: Handle) -> Result<T, DequeError> {
        let id = self.require_existing(h)?;
        self.unsplice(id)
    }

    /// Create a node between two adjacent members of the chain.
    ///
    /// Both neighbours must be live nodes of this deque (the sentinel counts)
    /// and `prev` must link straight to `next`. Nothing is rewired on error.
    pub fn insert_between(
        &mut self,
        prev: Handle,
        next: Handle,
        value: T,
    ) -> Result<Handle, DequeError> {
        let left_id = self.require_existing(prev)?;
        let right_id = self.require_existing(next)?;
        if self.nodes[&left_id].next != right_id {
            return Err(DequeError::NotAdjacent);
        }
        Ok(self.splice(left_id, right_id, value))
    }

    /// Insert a value **before** `anchor`. Before the sentinel means at the tail.
    pub fn insert_before(&mut self, anchor: Handle, value: T) -> Result<Handle, DequeError> {
        let right_id = self.require_existing(anchor)?;
        let left_id = self.nodes[&right_id].prev;
        Ok(self.splice(left_id, right_id, value))
    }

    /// Insert a value **after** `anchor`. After the sentinel means at the head.
    pub fn insert_after(&mut self, anchor: Handle, value: T) -> Result<Handle, DequeError> {
        let left_id = self.require_existing(anchor)?;
        let right_id = self.nodes[&left_id].next;
        Ok(self.splice(left_id, right_id, value))
    }

    /// Get a reference by handle (`None` for the sentinel or a dead handle).
    pub fn get(&self, h: Handle) -> Option<&T> {
        self.nodes.get(&self.resolve(h)?).and_then(Node::value)
    }

    /// Get a mutable reference by handle.
    pub fn get_mut(&mut self, h: Handle) -> Option<&mut T> {
        let id = self.resolve(h)?;
        self.nodes.get_mut(&id).and_then(Node::value_mut)
    }

    pub fn front(&self) -> Option<&T> {
        self.nodes[&self.nodes[&SENTINEL].next].value()
    }

    pub fn back(&self) -> Option<&T> {
        self.nodes[&self.nodes[&SENTINEL].prev].value()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let first = self.nodes[&SENTINEL].next;
        self.nodes.get_mut(&first).and_then(Node::value_mut)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.nodes[&SENTINEL].prev;
        self.nodes.get_mut(&last).and_then(Node::value_mut)
    }

    /// The node after `h`. Wraps through the sentinel, as the chain does.
    pub fn next(&self, h: Handle) -> Option<Handle> {
        let node = self.nodes.get(&self.resolve(h)?)?;
        Some(self.handle(node.next))
    }

    /// The node before `h`.
    pub fn prev(&self, h: Handle) -> Option<Handle> {
        let node = self.nodes.get(&self.resolve(h)?)?;
        Some(self.handle(node.prev))
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        !self.find(|v: &T| v == value).is_sentinel()
    }

    /// Drop every element. Handles issued before stay invalid afterwards.
    pub fn clear(&mut self) {
        self.nodes.retain(|_, n| n.is_sentinel());
        let sentinel = self.nodes.get_mut(&SENTINEL).expect("sentinel exists");
        sentinel.next = SENTINEL;
        sentinel.prev = SENTINEL;
        self.len = 0;
    }

    /// Iterate values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.iter_handles(),
        }
    }

    /// Iterate `(Handle, &T)` from head to tail.
    pub fn iter_handles(&self) -> IterHandles<'_, T> {
        let sentinel = &self.nodes[&SENTINEL];
        IterHandles {
            deque: self,
            front: sentinel.next,
            back: sentinel.prev,
            remaining: self.len,
        }
    }

    fn handle(&self, id: usize) -> Handle {
        Handle {
            owner: self.tag,
            id,
        }
    }

    /// Node id behind `h`, if this deque issued it.
    fn resolve(&self, h: Handle) -> Option<usize> {
        (h.owner == self.tag).then_some(h.id)
    }

    fn require_existing(&self, h: Handle) -> Result<usize, DequeError> {
        match self.resolve(h) {
            Some(id) if self.nodes.contains_key(&id) => Ok(id),
            _ => Err(DequeError::InvalidHandle),
        }
    }

    fn splice(&mut self, left_id: usize, right_id: usize, value: T) -> Handle {
        let id = self.next_id;
        self.next_id += 1;

        {
            let left = self.nodes.get_mut(&left_id).expect("left neighbour exists");
            debug_assert_eq!(left.next, right_id);
            left.next = id;
        }
        {
            let right = self.nodes.get_mut(&right_id).expect("right neighbour exists");
            right.prev = id;
        }

        self.nodes.insert(id, Node::element(value, left_id, right_id));
        self.len += 1;
        self.handle(id)
    }

    fn unsplice(&mut self, id: usize) -> Result<T, DequeError> {
        match self.nodes.get(&id) {
            None => return Err(DequeError::InvalidHandle),
            Some(n) if n.is_sentinel() => return Err(DequeError::Empty),
            Some(_) => {}
        }
        let node = self.nodes.remove(&id).expect("exists");

        self.nodes.get_mut(&node.prev).expect("prev is linked").next = node.next;
        self.nodes.get_mut(&node.next).expect("next is linked").prev = node.prev;

        self.len -= 1;
        Ok(node.into_value().expect("element node has value"))
    }
}

/// The copy gets its own tag: handles of the original do not resolve in it.
impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        Self {
            tag: fresh_tag(),
            nodes: self.nodes.clone(),
            next_id: self.next_id,
            len: self.len,
        }
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Deque::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_at_tail(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<'a, T> Iterator for IterHandles<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front;
        let deque = self.deque;
        let node = &deque.nodes[&id];
        self.front = node.next;
        self.remaining -= 1;
        node.value().map(|v| (deque.handle(id), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterHandles<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back;
        let deque = self.deque;
        let node = &deque.nodes[&id];
        self.back = node.prev;
        self.remaining -= 1;
        node.value().map(|v| (deque.handle(id), v))
    }
}

impl<T> ExactSizeIterator for IterHandles<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.remove_from_head().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len, Some(self.deque.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.remove_from_tail().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}


// Too slow under miri.
#[cfg(all(not(miri), test))]
mod proptests {
    use super::tests::assert_chain_consistent;
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[derive(Clone, Debug)]
    enum Op {
        AddAtHead(u8),
        AddAtTail(u8),
        RemoveFromHead,
        RemoveFromTail,
        // Index into the current elements; out of range picks the sentinel.
        RemoveNode(usize),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        // Small values so duplicates are common.
        prop_oneof![
            2 => (0u8..6).prop_map(Op::AddAtHead),
            2 => (0u8..6).prop_map(Op::AddAtTail),
            1 => Just(Op::RemoveFromHead),
            1 => Just(Op::RemoveFromTail),
            1 => (0usize..10).prop_map(Op::RemoveNode),
            1 => (0usize..10).prop_map(Op::Remove),
        ]
    }

    fn handle_at(d: &Deque<u8>, i: usize) -> Handle {
        d.iter_handles().nth(i).map_or(d.sentinel(), |(h, _)| h)
    }

    proptest! {
        #[test]
        fn behaves_like_vecdeque(ops in prop::collection::vec(op(), 0..80)) {
            let mut deque = Deque::new();
            let mut model = VecDeque::new();

            for op in ops {
                match op {
                    Op::AddAtHead(v) => {
                        deque.add_at_head(v);
                        model.push_front(v);
                    }
                    Op::AddAtTail(v) => {
                        deque.add_at_tail(v);
                        model.push_back(v);
                    }
                    Op::RemoveFromHead => {
                        prop_assert_eq!(deque.remove_from_head().ok(), model.pop_front());
                    }
                    Op::RemoveFromTail => {
                        prop_assert_eq!(deque.remove_from_tail().ok(), model.pop_back());
                    }
                    Op::RemoveNode(i) => {
                        let target = handle_at(&deque, i);
                        let expected = model.get(i).copied().and_then(|v| {
                            let pos = model.iter().position(|m| *m == v)?;
                            model.remove(pos)
                        });
                        prop_assert_eq!(deque.remove_node(target), expected);
                    }
                    Op::Remove(i) => {
                        let target = handle_at(&deque, i);
                        let expected = model.remove(i).ok_or(DequeError::Empty);
                        prop_assert_eq!(deque.remove(target), expected);
                    }
                }

                prop_assert_eq!(deque.len(), model.len());
                prop_assert!(deque.iter().eq(model.iter()));
                prop_assert_eq!(&deque, &deque.clone());
                assert_chain_consistent(&deque);
            }
        }

        #[test]
        fn head_reversed_matches_tail(values in prop::collection::vec(any::<i16>(), 0..40)) {
            let mut by_head = Deque::new();
            for v in values.iter().rev() {
                by_head.add_at_head(*v);
            }
            let by_tail: Deque<i16> = values.iter().copied().collect();

            prop_assert_eq!(&by_head, &by_tail);
            prop_assert_eq!(by_head.size(), values.len());
        }

        #[test]
        fn find_returns_first_match(values in prop::collection::vec(0u8..20, 0..40), needle in 0u8..20) {
            let deque: Deque<u8> = values.iter().copied().collect();
            let found = deque.find(|v: &u8| *v == needle);

            match values.iter().position(|v| *v == needle) {
                Some(i) => prop_assert_eq!(found, handle_at(&deque, i)),
                None => prop_assert!(found.is_sentinel()),
            }
        }
    }
}
