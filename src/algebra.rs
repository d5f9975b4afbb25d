use std::cmp::Ordering::*;
use std::mem;
use std::ops::{BitOr, Sub};

use log::debug;

use crate::interval::Interval;
use crate::interval_tree::IntervalTree;
use crate::order::{compare_intervals, LimitOrder};
use crate::overlap::{overlaps, span, touches};

// Set operations treat intervals as opaque elements: `except` never trims a
// partially covered interval, and only `merge` looks at the limits inside.
// Both operands are expected to be ordered the same way.
impl<L, C> IntervalTree<L, C>
where
    L: Clone,
    C: LimitOrder<L> + Clone,
{
    /// Returns a new tree holding every interval found in either tree.
    ///
    /// ```
    /// use aa_interval_tree::{Interval, IntervalTree};
    ///
    /// let a: IntervalTree<u8> = vec![Interval::closed(1, 2)?, Interval::closed(5, 6)?].into_iter().collect();
    /// let b: IntervalTree<u8> = vec![Interval::closed(5, 6)?, Interval::closed(8, 9)?].into_iter().collect();
    /// assert_eq!(a.union(&b).len(), 3);
    /// assert_eq!((&a | &b).len(), 3);
    /// # Ok::<(), aa_interval_tree::IntervalError>(())
    /// ```
    pub fn union(&self, other: &IntervalTree<L, C>) -> IntervalTree<L, C> {
        let mut merged = Vec::with_capacity(self.len() + other.len());
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        loop {
            let next = match (left.peek(), right.peek()) {
                (Some(a), Some(b)) => match compare_intervals(&self.order, *a, *b) {
                    Less => left.next(),
                    Greater => right.next(),
                    Equal => {
                        right.next();
                        left.next()
                    }
                },
                (Some(_), None) => left.next(),
                (None, Some(_)) => right.next(),
                (None, None) => break,
            };
            merged.extend(next.cloned());
        }
        debug!(
            "union of {} and {} intervals holds {}",
            self.len(),
            other.len(),
            merged.len()
        );

        IntervalTree::from_sorted_unique(merged, self.order.clone())
    }

    /// Returns a new tree holding the intervals of `self` which are not
    /// stored in `other`.
    ///
    /// ```
    /// use aa_interval_tree::{Interval, IntervalTree};
    ///
    /// let a: IntervalTree<u8> = vec![Interval::closed(1, 4)?, Interval::closed(5, 6)?].into_iter().collect();
    /// let b: IntervalTree<u8> = vec![Interval::closed(1, 3)?, Interval::closed(5, 6)?].into_iter().collect();
    /// assert_eq!(a.except(&b).into_vec(), vec![Interval::closed(1, 4)?]);
    /// # Ok::<(), aa_interval_tree::IntervalError>(())
    /// ```
    pub fn except(&self, other: &IntervalTree<L, C>) -> IntervalTree<L, C> {
        let kept = self.iter().filter(|interval| !other.contains(interval)).cloned();
        IntervalTree::from_sorted_unique(kept, self.order.clone())
    }

    /// Returns a new tree where every run of overlapping or touching
    /// intervals is replaced by the single interval spanning it.
    ///
    /// ```
    /// use aa_interval_tree::{Interval, IntervalTree};
    ///
    /// let tree: IntervalTree<u8> = vec![
    ///     Interval::closed_open(1, 3)?,
    ///     Interval::closed(3, 4)?,
    ///     Interval::open(4, 6)?,
    ///     Interval::closed(9, 9)?,
    /// ].into_iter().collect();
    /// assert_eq!(
    ///     tree.merge().into_vec(),
    ///     vec![Interval::closed_open(1, 6)?, Interval::closed(9, 9)?],
    /// );
    /// # Ok::<(), aa_interval_tree::IntervalError>(())
    /// ```
    pub fn merge(&self) -> IntervalTree<L, C> {
        let mut merged = Vec::new();
        let mut intervals = self.iter();
        if let Some(first) = intervals.next() {
            let mut current: Interval<L> = first.clone();
            for interval in intervals {
                if overlaps(&self.order, &current, interval) || touches(&self.order, &current, interval) {
                    current = span(&self.order, &current, interval);
                } else {
                    merged.push(mem::replace(&mut current, interval.clone()));
                }
            }
            merged.push(current);
        }
        debug!("merged {} intervals into {}", self.len(), merged.len());

        IntervalTree::from_sorted_unique(merged, self.order.clone())
    }
}

impl<'a, L, C> BitOr<&'a IntervalTree<L, C>> for &'a IntervalTree<L, C>
where
    L: Clone,
    C: LimitOrder<L> + Clone,
{
    type Output = IntervalTree<L, C>;

    fn bitor(self, rhs: &'a IntervalTree<L, C>) -> IntervalTree<L, C> {
        self.union(rhs)
    }
}

impl<'a, L, C> Sub<&'a IntervalTree<L, C>> for &'a IntervalTree<L, C>
where
    L: Clone,
    C: LimitOrder<L> + Clone,
{
    type Output = IntervalTree<L, C>;

    fn sub(self, rhs: &'a IntervalTree<L, C>) -> IntervalTree<L, C> {
        self.except(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node;

    fn iv(s: i32, e: i32) -> Interval<i32> {
        Interval::closed(s, e).unwrap()
    }

    fn tree(intervals: &[Interval<i32>]) -> IntervalTree<i32> {
        intervals.iter().cloned().collect()
    }

    #[test]
    fn union_keeps_shared_intervals_once() {
        let a = tree(&[iv(1, 2), iv(4, 6), iv(9, 9)]);
        let b = tree(&[iv(0, 1), iv(4, 6), iv(10, 11)]);
        let both = a.union(&b);
        assert_eq!(node::check(&both.root, &both.order), 5);
        assert_eq!(
            both.into_vec(),
            vec![iv(0, 1), iv(1, 2), iv(4, 6), iv(9, 9), iv(10, 11)]
        );
    }

    #[test]
    fn except_is_exact_not_trimming() {
        let a = tree(&[iv(1, 10), iv(20, 30)]);
        let b = tree(&[iv(5, 6), iv(20, 30)]);
        assert_eq!((&a - &b).into_vec(), vec![iv(1, 10)]);
        assert!((&b - &b).is_empty());
    }

    #[test]
    fn merge_coalesces_runs() {
        let t = tree(&[iv(1, 5), iv(3, 8), iv(10, 12)]);
        assert_eq!(t.merge().into_vec(), vec![iv(1, 8), iv(10, 12)]);
    }

    #[test]
    fn merge_keeps_gap_between_open_ends() {
        let t: IntervalTree<i32> = vec![
            Interval::closed_open(1, 3).unwrap(),
            Interval::open_closed(3, 5).unwrap(),
        ]
        .into_iter()
        .collect();
        assert_eq!(t.merge().len(), 2);
    }

    #[test]
    fn merge_absorbs_nested_intervals() {
        let t = tree(&[iv(0, 100), iv(2, 3), iv(50, 60), iv(101, 102)]);
        assert_eq!(t.merge().into_vec(), vec![iv(0, 100), iv(101, 102)]);
    }

    #[test]
    fn merge_of_empty_tree_is_empty() {
        assert!(IntervalTree::<i32>::new().merge().is_empty());
    }
}
