use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::interval_tree::{BulkHints, IntervalTree};
use crate::order::LimitOrder;

#[derive(Deserialize)]
#[serde(rename = "Interval")]
struct RawInterval<L> {
    start: L,
    end: L,
    start_inclusive: bool,
    end_inclusive: bool,
}

// Deserialized intervals go through the same validation as `Interval::new`.
impl<'de, L> Deserialize<'de> for Interval<L>
where
    L: Ord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawInterval::<L>::deserialize(deserializer)?;
        Interval::new(raw.start, raw.end, raw.start_inclusive, raw.end_inclusive)
            .map_err(de::Error::custom)
    }
}

/// A tree serializes as the ascending sequence of its intervals.
impl<L, C> Serialize for IntervalTree<L, C>
where
    L: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

// Each interval is validated against `C::default()`, the order the tree is
// rebuilt with.
impl<'de, L, C> Deserialize<'de> for IntervalTree<L, C>
where
    L: Clone + Deserialize<'de>,
    C: LimitOrder<L> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let order = C::default();
        let intervals = Vec::<RawInterval<L>>::deserialize(deserializer)?
            .into_iter()
            .map(|raw| {
                Interval::new_by(
                    raw.start,
                    raw.end,
                    raw.start_inclusive,
                    raw.end_inclusive,
                    &order,
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(de::Error::custom)?;
        Ok(IntervalTree::from_intervals(
            intervals,
            order,
            BulkHints::default(),
        ))
    }
}
