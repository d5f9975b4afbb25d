use std::cmp::Ordering::*;
use std::fmt;

use log::{debug, trace};

use crate::interval::{Interval, IntervalError};
use crate::iter::{IntoIter, Iter};
use crate::node::{self, Link};
use crate::order::{compare_intervals, LimitOrder, NaturalOrder};
use crate::overlap::OverlapMode;

/// Promises a caller can make about the input of
/// [`IntervalTree::from_intervals`], letting it skip the sort and the
/// duplicate sweep.
///
/// The promises are not checked. A false `sorted` or `unique` yields a tree
/// whose ordering is meaningless, but never a panic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BulkHints {
    /// The input is already ascending under the interval ordering.
    pub sorted: bool,
    /// The input holds no two equal intervals.
    pub unique: bool,
}

impl BulkHints {
    /// Both promises hold.
    pub const SORTED_UNIQUE: BulkHints = BulkHints {
        sorted: true,
        unique: true,
    };
}

/// A set of unique intervals stored in an AA-tree, where each node also
/// records the greatest end found below it.
///
/// Intervals are kept in ascending order: by start, then by end, with an
/// inclusive start sorting before an exclusive one and an exclusive end
/// sorting before an inclusive one. The order over limits is given by `C`,
/// which defaults to the natural order of `L`.
///
/// Every query building a new collection ([`Self::intersect`],
/// [`Self::union`], [`Self::except`], [`Self::merge`]) returns an
/// independent tree sharing no node with its source.
///
/// ```
/// use aa_interval_tree::{Interval, IntervalTree, OverlapMode};
///
/// let mut tree = IntervalTree::new();
/// tree.add(Interval::closed(1, 5)?);
/// tree.add(Interval::closed(3, 8)?);
/// tree.add(Interval::closed(10, 12)?);
///
/// let hits = tree.intersect(&Interval::point(4), OverlapMode::Any);
/// assert_eq!(hits.into_vec(), vec![Interval::closed(1, 5)?, Interval::closed(3, 8)?]);
///
/// let merged = tree.merge();
/// assert_eq!(merged.into_vec(), vec![Interval::closed(1, 8)?, Interval::closed(10, 12)?]);
///
/// assert!(tree.remove_limit(&11));
/// assert!(!tree.contains(&Interval::closed(10, 12)?));
/// # Ok::<(), aa_interval_tree::IntervalError>(())
/// ```
#[derive(Clone)]
pub struct IntervalTree<L, C = NaturalOrder> {
    pub(crate) root: Link<L>,
    pub(crate) len: usize,
    pub(crate) order: C,
}

impl<L> IntervalTree<L, NaturalOrder> {
    /// Creates an empty tree ordered by `L: Ord`.
    pub fn new() -> IntervalTree<L, NaturalOrder> {
        IntervalTree::with_order(NaturalOrder)
    }
}

impl<L, C: Default> Default for IntervalTree<L, C> {
    fn default() -> Self {
        IntervalTree::with_order(C::default())
    }
}

impl<L, C> IntervalTree<L, C> {
    /// Creates an empty tree ordered by `order`.
    pub fn with_order(order: C) -> IntervalTree<L, C> {
        IntervalTree {
            root: None,
            len: 0,
            order,
        }
    }

    /// Number of intervals stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The limit order this tree was built with.
    pub fn order(&self) -> &C {
        &self.order
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Iterates over the stored intervals in ascending order.
    pub fn iter(&self) -> Iter<'_, L> {
        Iter::new(&self.root, self.len)
    }

    /// Consumes the tree into an ascending vector.
    pub fn into_vec(self) -> Vec<Interval<L>> {
        self.into_iter().collect()
    }

    /// The smallest interval, if any.
    pub fn first(&self) -> Option<&Interval<L>> {
        let mut node = self.root.as_ref()?;
        while let Some(left) = &node.left {
            node = left;
        }
        Some(&node.key)
    }

    /// The greatest interval, if any.
    pub fn last(&self) -> Option<&Interval<L>> {
        let mut node = self.root.as_ref()?;
        while let Some(right) = &node.right {
            node = right;
        }
        Some(&node.key)
    }
}

impl<L, C> IntervalTree<L, C>
where
    L: Clone,
    C: LimitOrder<L>,
{
    /// Builds a tree out of candidate intervals.
    ///
    /// Unless `hints` say otherwise, the candidates are sorted and duplicates
    /// dropped first. The tree itself is then grown by appending on its
    /// right edge, which costs no interval comparison.
    ///
    /// ```
    /// use aa_interval_tree::{BulkHints, Interval, IntervalTree, NaturalOrder};
    ///
    /// let candidates = vec![
    ///     Interval::closed(7, 9)?,
    ///     Interval::closed(1, 2)?,
    ///     Interval::closed(7, 9)?,
    /// ];
    /// let tree = IntervalTree::from_intervals(candidates, NaturalOrder, BulkHints::default());
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.first(), Some(&Interval::closed(1, 2)?));
    /// # Ok::<(), aa_interval_tree::IntervalError>(())
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if a candidate is decreasing, or an open point, under `order`.
    pub fn from_intervals<I>(intervals: I, order: C, hints: BulkHints) -> IntervalTree<L, C>
    where
        I: IntoIterator<Item = Interval<L>>,
    {
        let mut intervals: Vec<Interval<L>> = intervals.into_iter().collect();
        for interval in &intervals {
            if let Err(err) = interval.check_by(&order) {
                panic!("cannot bulk load interval: {}", err);
            }
        }
        let candidates = intervals.len();
        if !hints.sorted {
            intervals.sort_by(|a, b| compare_intervals(&order, a, b));
        }
        if !hints.unique {
            intervals.dedup_by(|a, b| compare_intervals(&order, &*a, &*b) == Equal);
        }
        debug!(
            "bulk loading {} intervals out of {} candidates ({:?})",
            intervals.len(),
            candidates,
            hints
        );

        IntervalTree::from_sorted_unique(intervals, order)
    }

    /// Builds a tree from intervals known to be ascending and unique.
    pub(crate) fn from_sorted_unique<I>(intervals: I, order: C) -> IntervalTree<L, C>
    where
        I: IntoIterator<Item = Interval<L>>,
    {
        let mut tree = IntervalTree::with_order(order);
        for interval in intervals {
            tree.root = Some(node::push_back(tree.root.take(), interval, &tree.order));
            tree.len += 1;
        }
        tree
    }

    /// Adds `interval`. Returns `false`, leaving the tree unchanged, if an
    /// equal interval is already stored.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is decreasing, or an open point, under the
    /// tree's order. [`Self::try_add`] reports that case instead.
    pub fn add(&mut self, interval: Interval<L>) -> bool {
        match self.try_add(interval) {
            Ok(inserted) => inserted,
            Err(err) => panic!("cannot add interval: {}", err),
        }
    }

    /// Adds `interval` after checking it against the tree's order.
    ///
    /// ```
    /// use aa_interval_tree::{Interval, IntervalError, IntervalTree, OrderFn};
    ///
    /// let mut tree = IntervalTree::with_order(OrderFn(|a: &i32, b: &i32| b.cmp(a)));
    /// assert_eq!(tree.try_add(Interval::closed(1, 5)?), Err(IntervalError::Decreasing));
    /// assert!(tree.is_empty());
    /// # Ok::<(), IntervalError>(())
    /// ```
    pub fn try_add(&mut self, interval: Interval<L>) -> Result<bool, IntervalError> {
        interval.check_by(&self.order)?;
        let mut inserted = false;
        self.root = Some(node::insert(
            self.root.take(),
            interval,
            &self.order,
            &mut inserted,
        ));
        if inserted {
            self.len += 1;
        } else {
            trace!("rejected duplicate interval");
        }
        Ok(inserted)
    }

    /// Removes the interval equal to `interval`. Returns `false` if there
    /// was none.
    pub fn remove(&mut self, interval: &Interval<L>) -> bool {
        let mut removed = false;
        self.root = node::remove(self.root.take(), interval, &self.order, &mut removed);
        if removed {
            self.len -= 1;
        } else {
            trace!("no interval to remove");
        }
        removed
    }

    /// Removes every interval containing `limit`. Returns whether at least
    /// one was removed.
    pub fn remove_limit(&mut self, limit: &L) -> bool {
        let query = Interval::point(limit.clone());
        let doomed: Vec<Interval<L>> = self
            .overlapping(&query, OverlapMode::Any)
            .into_iter()
            .cloned()
            .collect();
        debug!("removing {} intervals holding a limit", doomed.len());

        let mut removed = false;
        for interval in &doomed {
            removed |= self.remove(interval);
        }
        removed
    }

    pub fn contains(&self, interval: &Interval<L>) -> bool {
        self.find(interval).is_some()
    }

    /// Returns the stored interval equal to `interval`.
    pub fn find(&self, interval: &Interval<L>) -> Option<&Interval<L>> {
        node::find(&self.root, interval, &self.order)
    }

    /// Borrows, in ascending order, every stored interval relating to
    /// `query` under `mode`.
    pub fn overlapping(&self, query: &Interval<L>, mode: OverlapMode) -> Vec<&Interval<L>> {
        let mut found = Vec::new();
        node::search(&self.root, query, mode, &self.order, &mut found);
        found
    }

    /// Returns a new tree holding every stored interval relating to `query`
    /// under `mode`.
    pub fn intersect(&self, query: &Interval<L>, mode: OverlapMode) -> IntervalTree<L, C>
    where
        C: Clone,
    {
        let found = self.overlapping(query, mode);
        trace!("intersect matched {} intervals", found.len());
        IntervalTree::from_sorted_unique(found.into_iter().cloned(), self.order.clone())
    }

    /// Returns a new tree holding every stored interval containing `limit`.
    pub fn intersect_limit(&self, limit: &L) -> IntervalTree<L, C>
    where
        C: Clone,
    {
        self.intersect(&Interval::point(limit.clone()), OverlapMode::Any)
    }
}

impl<L, C> fmt::Debug for IntervalTree<L, C>
where
    L: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<L, C> fmt::Display for IntervalTree<L, C>
where
    L: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.root {
            Some(ref root) => write!(f, "{}", root),
            None => write!(f, "Empty tree"),
        }
    }
}

impl<L: PartialEq, C> PartialEq for IntervalTree<L, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<L: Eq, C> Eq for IntervalTree<L, C> {}

impl<L, C> FromIterator<Interval<L>> for IntervalTree<L, C>
where
    L: Clone,
    C: LimitOrder<L> + Default,
{
    fn from_iter<I: IntoIterator<Item = Interval<L>>>(iter: I) -> Self {
        IntervalTree::from_intervals(iter, C::default(), BulkHints::default())
    }
}

impl<L, C> Extend<Interval<L>> for IntervalTree<L, C>
where
    L: Clone,
    C: LimitOrder<L>,
{
    fn extend<I: IntoIterator<Item = Interval<L>>>(&mut self, iter: I) {
        for interval in iter {
            self.add(interval);
        }
    }
}

impl<L, C> IntoIterator for IntervalTree<L, C> {
    type Item = Interval<L>;
    type IntoIter = IntoIter<L>;

    fn into_iter(self) -> IntoIter<L> {
        IntoIter::new(self.root, self.len)
    }
}

impl<'a, L, C> IntoIterator for &'a IntervalTree<L, C> {
    type Item = &'a Interval<L>;
    type IntoIter = Iter<'a, L>;

    fn into_iter(self) -> Iter<'a, L> {
        self.iter()
    }
}
