use std::fmt;
use std::ops::Bound::{self, *};
use std::ops::{Range, RangeBounds, RangeInclusive};

#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

use crate::order::{LimitOrder, NaturalOrder};

/// Reasons an interval cannot be built from a pair of limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum IntervalError {
    /// The start limit is greater than the end limit.
    #[error("interval start is greater than its end")]
    Decreasing,
    /// Start and end are equal, but one of the two boundaries is open.
    #[error("single-point interval must be inclusive on both ends")]
    OpenPoint,
}

/// An immutable interval over an ordered limit type.
///
/// Each end carries its own inclusivity flag. An interval always satisfies
/// `start <= end`, and a single-point interval is closed on both ends.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval<L> {
    pub(crate) start: L,
    pub(crate) end: L,
    pub(crate) start_inclusive: bool,
    pub(crate) end_inclusive: bool,
}

impl<L> Interval<L> {
    /// Builds an interval using the natural order of `L` for validation.
    ///
    /// ```
    /// use aa_interval_tree::{Interval, IntervalError};
    ///
    /// let interval = Interval::new(1, 5, true, false)?;
    /// assert_eq!(interval.to_string(), "[1,5[");
    /// assert_eq!(Interval::new(5, 1, true, true), Err(IntervalError::Decreasing));
    /// assert_eq!(Interval::new(3, 3, true, false), Err(IntervalError::OpenPoint));
    /// # Ok::<(), IntervalError>(())
    /// ```
    pub fn new(
        start: L,
        end: L,
        start_inclusive: bool,
        end_inclusive: bool,
    ) -> Result<Interval<L>, IntervalError>
    where
        L: Ord,
    {
        Interval::new_by(start, end, start_inclusive, end_inclusive, &NaturalOrder)
    }

    /// Builds an interval, validating it against a caller-supplied limit order.
    pub fn new_by<C>(
        start: L,
        end: L,
        start_inclusive: bool,
        end_inclusive: bool,
        order: &C,
    ) -> Result<Interval<L>, IntervalError>
    where
        C: LimitOrder<L> + ?Sized,
    {
        let interval = Interval {
            start,
            end,
            start_inclusive,
            end_inclusive,
        };
        interval.check_by(order)?;
        Ok(interval)
    }

    /// Checks `start <= end` under `order`, and that a single point is
    /// closed on both ends.
    pub fn check_by<C>(&self, order: &C) -> Result<(), IntervalError>
    where
        C: LimitOrder<L> + ?Sized,
    {
        match order.compare(&self.start, &self.end) {
            std::cmp::Ordering::Greater => Err(IntervalError::Decreasing),
            std::cmp::Ordering::Equal if !(self.start_inclusive && self.end_inclusive) => {
                Err(IntervalError::OpenPoint)
            }
            _ => Ok(()),
        }
    }

    /// `[start, end]`
    pub fn closed(start: L, end: L) -> Result<Interval<L>, IntervalError>
    where
        L: Ord,
    {
        Interval::new(start, end, true, true)
    }

    /// `]start, end[`
    pub fn open(start: L, end: L) -> Result<Interval<L>, IntervalError>
    where
        L: Ord,
    {
        Interval::new(start, end, false, false)
    }

    /// `[start, end[`
    pub fn closed_open(start: L, end: L) -> Result<Interval<L>, IntervalError>
    where
        L: Ord,
    {
        Interval::new(start, end, true, false)
    }

    /// `]start, end]`
    pub fn open_closed(start: L, end: L) -> Result<Interval<L>, IntervalError>
    where
        L: Ord,
    {
        Interval::new(start, end, false, true)
    }

    /// The degenerate closed interval `[limit, limit]`. Always valid.
    pub fn point(limit: L) -> Interval<L>
    where
        L: Clone,
    {
        Interval {
            start: limit.clone(),
            end: limit,
            start_inclusive: true,
            end_inclusive: true,
        }
    }

    pub fn start(&self) -> &L {
        &self.start
    }

    pub fn end(&self) -> &L {
        &self.end
    }

    pub fn start_inclusive(&self) -> bool {
        self.start_inclusive
    }

    pub fn end_inclusive(&self) -> bool {
        self.end_inclusive
    }

    /// Returns whether `start == end` under `PartialEq`. Trees built with a
    /// custom [`LimitOrder`] should use [`Self::is_point_by`].
    pub fn is_point(&self) -> bool
    where
        L: PartialEq,
    {
        self.start == self.end
    }

    /// Returns whether `start` and `end` are equal under `order`.
    pub fn is_point_by<C>(&self, order: &C) -> bool
    where
        C: LimitOrder<L> + ?Sized,
    {
        order.compare(&self.start, &self.end) == std::cmp::Ordering::Equal
    }

    pub fn into_parts(self) -> (L, L, bool, bool) {
        (self.start, self.end, self.start_inclusive, self.end_inclusive)
    }
}

impl<L> RangeBounds<L> for Interval<L> {
    fn start_bound(&self) -> Bound<&L> {
        if self.start_inclusive {
            Included(&self.start)
        } else {
            Excluded(&self.start)
        }
    }

    fn end_bound(&self) -> Bound<&L> {
        if self.end_inclusive {
            Included(&self.end)
        } else {
            Excluded(&self.end)
        }
    }
}

impl<L: Ord> TryFrom<Range<L>> for Interval<L> {
    type Error = IntervalError;

    /// `a..b` becomes `[a, b[`. An empty `a..a` is rejected as an open point.
    fn try_from(range: Range<L>) -> Result<Self, Self::Error> {
        Interval::closed_open(range.start, range.end)
    }
}

impl<L: Ord> TryFrom<RangeInclusive<L>> for Interval<L> {
    type Error = IntervalError;

    fn try_from(range: RangeInclusive<L>) -> Result<Self, Self::Error> {
        let (start, end) = range.into_inner();
        Interval::closed(start, end)
    }
}

impl<L> fmt::Display for Interval<L>
where
    L: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let open = if self.start_inclusive { '[' } else { ']' };
        let close = if self.end_inclusive { ']' } else { '[' };
        write!(f, "{}{},{}{}", open, self.start, self.end, close)
    }
}
