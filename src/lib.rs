//! A doubly-linked deque closed into a circle by a sentinel node.
//!
//! The sentinel holds no value and marks both ends of the chain: the element
//! after it is the head, the one before it is the tail, and an empty deque is
//! a sentinel linked to itself. Nodes live in an arena owned by the [`Deque`]
//! and are named by copyable [`Handle`]s.
//!
//! ```
//! use sentinel_deque::{Deque, DequeError};
//!
//! let mut deque = Deque::new();
//! deque.add_at_head("def");
//! deque.add_at_head("abc");
//! deque.add_at_tail("ghi");
//! assert_eq!(deque.size(), 3);
//!
//! // Searching yields the sentinel when nothing matches.
//! let hit = deque.find(|s: &&str| s.starts_with('d'));
//! assert_eq!(deque.get(hit), Some(&"def"));
//! assert!(deque.find(|s: &&str| s.is_empty()).is_sentinel());
//!
//! assert_eq!(deque.remove_from_head(), Ok("abc"));
//! assert_eq!(deque.remove_from_tail(), Ok("ghi"));
//! assert_eq!(deque.remove_from_tail(), Ok("def"));
//! assert_eq!(deque.remove_from_head(), Err(DequeError::Empty));
//! ```
mod deque;
mod errors;
mod handle;
mod node;
mod predicate;

pub use deque::{Deque, IntoIter, Iter, IterHandles};
pub use errors::DequeError;
pub use handle::Handle;
pub use predicate::{Not, Predicate};
