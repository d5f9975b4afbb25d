//! A collection of unique intervals ([`IntervalTree`]) that works with
//! inclusive/exclusive bounds. It is backed by an AA-tree (Andersson, 1993:
//! "Balanced search trees made simple"), where every node is augmented with
//! the greatest end-point of its subtree, as in the interval trees of
//! Cormen et al. (2009, Section 14.3: Interval trees, pp. 348–354).
//!
//! The augmentation lets overlap queries skip whole subtrees. Three kinds of
//! overlap are supported (see [`OverlapMode`]): any shared limit, covering
//! the query, or lying within it. On top of that, the tree provides set
//! operations over whole intervals ([`IntervalTree::union`],
//! [`IntervalTree::except`]) and the coalescing of overlapping or touching
//! intervals into maximal spans ([`IntervalTree::merge`]).
//!
//! Any type can be used as a limit, given a [`LimitOrder`] over it. Types
//! implementing [`Ord`] get one for free through [`NaturalOrder`].

mod algebra;
mod interval;
/// An interval set implemented with an augmented AA-tree.
pub mod interval_tree;
mod iter;
mod node;
mod order;
mod overlap;
#[cfg(feature = "serde")]
mod serde_impls;

pub use interval::{Interval, IntervalError};
pub use interval_tree::{BulkHints, IntervalTree};
pub use iter::{IntoIter, Iter};
pub use order::{compare_intervals, LimitOrder, NaturalOrder, OrderFn};
pub use overlap::{covers, matches, overlaps, touches, OverlapMode};
