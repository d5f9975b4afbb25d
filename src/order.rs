//! Orders over limits, and the total order over intervals derived from them.
//!
//! Every boundary of an interval is placed at a *position*: its limit value
//! plus a bias which nudges open boundaries inwards. An inclusive start sits
//! exactly on its value, an exclusive start just after it; an inclusive end
//! sits on its value, an exclusive end just before it. All comparisons in
//! this crate (ordering, overlap, covering, merging) are expressed on
//! positions, so the tie-break between `[1,5]` and `]1,5]` used to place
//! intervals in the tree is the same one used to decide covering.

use std::cmp::Ordering;

use crate::interval::Interval;

/// A total order over limits, supplied by the caller.
///
/// Implementations must be a valid strict weak ordering; the tree is
/// corrupted otherwise.
pub trait LimitOrder<L> {
    fn compare(&self, a: &L, b: &L) -> Ordering;
}

/// The order given by `L: Ord`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<L: Ord> LimitOrder<L> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &L, b: &L) -> Ordering {
        a.cmp(b)
    }
}

/// Adapts a comparison closure into a [`LimitOrder`].
///
/// ```
/// use aa_interval_tree::{Interval, IntervalTree, OrderFn};
///
/// // Case-insensitive limits.
/// let order = OrderFn(|a: &&str, b: &&str| a.to_lowercase().cmp(&b.to_lowercase()));
/// let mut tree = IntervalTree::with_order(order);
/// assert!(tree.add(Interval::new_by("a", "M", true, true, tree.order()).unwrap()));
/// assert_eq!(tree.intersect_limit(&"C").len(), 1);
/// ```
#[derive(Clone, Copy)]
pub struct OrderFn<F>(pub F);

impl<L, F> LimitOrder<L> for OrderFn<F>
where
    F: Fn(&L, &L) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &L, b: &L) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> std::fmt::Debug for OrderFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("OrderFn(..)")
    }
}

// Positions of the four kinds of boundaries relative to their value.
const START_INCLUDED: i8 = 0;
const START_EXCLUDED: i8 = 1;
const END_INCLUDED: i8 = 0;
const END_EXCLUDED: i8 = -1;

#[inline]
pub(crate) fn start_bias(inclusive: bool) -> i8 {
    if inclusive {
        START_INCLUDED
    } else {
        START_EXCLUDED
    }
}

#[inline]
pub(crate) fn end_bias(inclusive: bool) -> i8 {
    if inclusive {
        END_INCLUDED
    } else {
        END_EXCLUDED
    }
}

/// Compares two boundary positions.
#[inline]
pub(crate) fn compare_positions<L, C>(order: &C, a: &L, a_bias: i8, b: &L, b_bias: i8) -> Ordering
where
    C: LimitOrder<L> + ?Sized,
{
    order.compare(a, b).then(a_bias.cmp(&b_bias))
}

/// Compares the starts of `a` and `b`. An inclusive start sorts first.
#[inline]
pub(crate) fn compare_starts<L, C>(order: &C, a: &Interval<L>, b: &Interval<L>) -> Ordering
where
    C: LimitOrder<L> + ?Sized,
{
    compare_positions(
        order,
        &a.start,
        start_bias(a.start_inclusive),
        &b.start,
        start_bias(b.start_inclusive),
    )
}

/// Compares the ends of `a` and `b`. An exclusive end sorts first.
#[inline]
pub(crate) fn compare_ends<L, C>(order: &C, a: &Interval<L>, b: &Interval<L>) -> Ordering
where
    C: LimitOrder<L> + ?Sized,
{
    compare_positions(
        order,
        &a.end,
        end_bias(a.end_inclusive),
        &b.end,
        end_bias(b.end_inclusive),
    )
}

/// Compares the start of `a` with the end of `b`.
#[inline]
pub(crate) fn compare_start_end<L, C>(order: &C, a: &Interval<L>, b: &Interval<L>) -> Ordering
where
    C: LimitOrder<L> + ?Sized,
{
    compare_positions(
        order,
        &a.start,
        start_bias(a.start_inclusive),
        &b.end,
        end_bias(b.end_inclusive),
    )
}

/// The total order over intervals: start position first, then end position.
///
/// Two intervals compare `Equal` iff all four fields match under `order`.
pub fn compare_intervals<L, C>(order: &C, a: &Interval<L>, b: &Interval<L>) -> Ordering
where
    C: LimitOrder<L> + ?Sized,
{
    compare_starts(order, a, b).then_with(|| compare_ends(order, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Ordering::*;

    fn iv(s: i32, e: i32, si: bool, ei: bool) -> Interval<i32> {
        Interval::new(s, e, si, ei).unwrap()
    }

    #[test]
    fn orders_by_start_then_end() {
        assert_eq!(compare_intervals(&NaturalOrder, &iv(1, 9, true, true), &iv(2, 3, true, true)), Less);
        assert_eq!(compare_intervals(&NaturalOrder, &iv(1, 3, true, true), &iv(1, 9, true, true)), Less);
        assert_eq!(compare_intervals(&NaturalOrder, &iv(1, 3, true, true), &iv(1, 3, true, true)), Equal);
    }

    #[test]
    fn inclusive_start_sorts_first_exclusive_end_sorts_first() {
        assert_eq!(compare_intervals(&NaturalOrder, &iv(1, 5, true, true), &iv(1, 5, false, true)), Less);
        assert_eq!(compare_intervals(&NaturalOrder, &iv(1, 5, true, false), &iv(1, 5, true, true)), Less);
        assert_eq!(compare_intervals(&NaturalOrder, &iv(1, 5, false, false), &iv(1, 5, false, true)), Less);
    }

    #[test]
    fn custom_order_is_respected() {
        let reversed = OrderFn(|a: &i32, b: &i32| b.cmp(a));
        let a = Interval::new_by(9, 5, true, true, &reversed).unwrap();
        let b = Interval::new_by(3, 1, true, true, &reversed).unwrap();
        assert_eq!(compare_intervals(&reversed, &a, &b), Less);
    }

    #[test]
    fn start_against_end() {
        // ]3,... starts after ...,3] ends.
        assert_eq!(compare_start_end(&NaturalOrder, &iv(3, 5, false, true), &iv(1, 3, true, true)), Greater);
        assert_eq!(compare_start_end(&NaturalOrder, &iv(3, 5, true, true), &iv(1, 3, true, true)), Equal);
        assert_eq!(compare_start_end(&NaturalOrder, &iv(3, 5, true, true), &iv(1, 3, true, false)), Greater);
    }
}
