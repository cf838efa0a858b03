//! An ordered set backed by a red-black tree, with optional per-node
//! augmentation ("arguments") kept consistent through every rotation.
//!
//! ```
//! use rbtree::{RbTree, SubtreeSize};
//!
//! let mut tree = RbTree::with_argument(SubtreeSize);
//! tree.extend([30, 10, 20]);
//!
//! let middle = tree.nth(1).unwrap();
//! assert_eq!(tree.get(middle), Some(&20));
//! assert_eq!(tree.rank(middle), Some(1));
//!
//! tree.delete_value(&10);
//! assert!(tree.iter().eq([20, 30].iter()));
//! ```

#![forbid(unsafe_code)]

pub mod argument;
pub mod compare;
mod error;
pub mod rbtree;

pub use argument::{Argument, SubtreeMax, SubtreeSize};
pub use compare::{Compare, Descending, Natural};
pub use error::{Error, InvalidTree};
pub use rbtree::{Color, Iter, Node, NodeRef, Postorder, Preorder, RbTree};
