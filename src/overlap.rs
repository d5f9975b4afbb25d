use std::cmp::Ordering::*;

use crate::interval::Interval;
use crate::order::{compare_ends, compare_start_end, compare_starts, LimitOrder};

/// How a stored interval must relate to a query interval to be returned by
/// [`crate::IntervalTree::intersect`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverlapMode {
    /// The stored interval shares at least one limit value with the query.
    #[default]
    Any,
    /// The stored interval contains the whole query.
    Cover,
    /// The stored interval is contained in the query.
    Within,
}

/// Returns whether some limit satisfies the boundaries of both `a` and `b`.
pub fn overlaps<L, C>(order: &C, a: &Interval<L>, b: &Interval<L>) -> bool
where
    C: LimitOrder<L> + ?Sized,
{
    compare_start_end(order, a, b) != Greater && compare_start_end(order, b, a) != Greater
}

/// Returns whether `outer` contains every limit of `inner`.
pub fn covers<L, C>(order: &C, outer: &Interval<L>, inner: &Interval<L>) -> bool
where
    C: LimitOrder<L> + ?Sized,
{
    compare_starts(order, outer, inner) != Greater && compare_ends(order, outer, inner) != Less
}

/// Returns whether `a` and `b` are contiguous: one ends on the value the
/// other starts on, and at least one of those two boundaries is inclusive.
///
/// Intervals sharing an inclusive boundary also overlap; `touches` does not
/// exclude that case.
pub fn touches<L, C>(order: &C, a: &Interval<L>, b: &Interval<L>) -> bool
where
    C: LimitOrder<L> + ?Sized,
{
    let meets = |left: &Interval<L>, right: &Interval<L>| {
        order.compare(&left.end, &right.start) == Equal
            && (left.end_inclusive || right.start_inclusive)
    };
    meets(a, b) || meets(b, a)
}

/// Returns whether `stored` relates to `query` under `mode`.
pub fn matches<L, C>(order: &C, mode: OverlapMode, stored: &Interval<L>, query: &Interval<L>) -> bool
where
    C: LimitOrder<L> + ?Sized,
{
    match mode {
        OverlapMode::Any => overlaps(order, stored, query),
        OverlapMode::Cover => covers(order, stored, query),
        OverlapMode::Within => covers(order, query, stored),
    }
}

/// The smallest interval containing both `a` and `b`. On equal limits the
/// inclusive boundary wins.
pub(crate) fn span<L, C>(order: &C, a: &Interval<L>, b: &Interval<L>) -> Interval<L>
where
    L: Clone,
    C: LimitOrder<L> + ?Sized,
{
    let (start, start_inclusive) = if compare_starts(order, a, b) != Greater {
        (a.start.clone(), a.start_inclusive)
    } else {
        (b.start.clone(), b.start_inclusive)
    };
    let (end, end_inclusive) = if compare_ends(order, a, b) != Less {
        (a.end.clone(), a.end_inclusive)
    } else {
        (b.end.clone(), b.end_inclusive)
    };
    Interval {
        start,
        end,
        start_inclusive,
        end_inclusive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::NaturalOrder;

    fn iv(s: i32, e: i32, si: bool, ei: bool) -> Interval<i32> {
        Interval::new(s, e, si, ei).unwrap()
    }

    #[test]
    fn overlap_honors_open_ends() {
        let o = &NaturalOrder;
        assert!(overlaps(o, &iv(1, 3, true, true), &iv(3, 5, true, true)));
        assert!(!overlaps(o, &iv(1, 3, true, false), &iv(3, 5, true, true)));
        assert!(!overlaps(o, &iv(1, 3, true, true), &iv(3, 5, false, true)));
        assert!(overlaps(o, &iv(1, 5, false, false), &iv(2, 2, true, true)));
        assert!(!overlaps(o, &iv(1, 5, false, false), &iv(5, 5, true, true)));
        assert!(!overlaps(o, &iv(1, 2, true, true), &iv(4, 5, true, true)));
    }

    #[test]
    fn touch_requires_an_inclusive_side() {
        let o = &NaturalOrder;
        assert!(touches(o, &iv(1, 3, true, false), &iv(3, 5, true, true)));
        assert!(touches(o, &iv(3, 5, false, true), &iv(1, 3, true, true)));
        assert!(!touches(o, &iv(1, 3, true, false), &iv(3, 5, false, true)));
        assert!(!touches(o, &iv(1, 2, true, true), &iv(3, 5, true, true)));
    }

    #[test]
    fn cover_tightens_at_open_ends() {
        let o = &NaturalOrder;
        assert!(covers(o, &iv(1, 5, true, true), &iv(1, 5, false, false)));
        assert!(!covers(o, &iv(1, 5, false, false), &iv(1, 5, true, true)));
        assert!(covers(o, &iv(1, 5, false, true), &iv(2, 5, true, true)));
        assert!(matches(o, OverlapMode::Within, &iv(2, 3, true, true), &iv(1, 5, true, true)));
        assert!(!matches(o, OverlapMode::Cover, &iv(2, 3, true, true), &iv(1, 5, true, true)));
    }

    #[test]
    fn default_mode_is_any() {
        assert_eq!(OverlapMode::default(), OverlapMode::Any);
    }

    #[test]
    fn span_prefers_inclusive_boundaries() {
        let o = &NaturalOrder;
        assert_eq!(span(o, &iv(1, 5, false, false), &iv(1, 5, true, false)), iv(1, 5, true, false));
        assert_eq!(span(o, &iv(1, 3, true, false), &iv(3, 5, true, false)), iv(1, 5, true, false));
        assert_eq!(span(o, &iv(2, 9, false, true), &iv(1, 4, true, true)), iv(1, 9, true, true));
    }
}
