use std::cmp::Ordering::*;
use std::fmt;

use crate::interval::Interval;
use crate::order::{
    compare_intervals, compare_positions, compare_start_end, compare_starts, end_bias, start_bias,
    LimitOrder,
};
use crate::overlap::{matches, OverlapMode};

pub(crate) type Link<L> = Option<Box<Node<L>>>;

/// A node of the AA-tree. `max_end` is the greatest end boundary found in
/// the subtree rooted here, this node included.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Node<L> {
    pub key: Interval<L>,
    pub max_end: L,
    pub max_end_inclusive: bool,
    pub level: usize,
    pub left: Link<L>,
    pub right: Link<L>,
}

impl<L> fmt::Display for Node<L>
where
    L: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let max = if self.max_end_inclusive {
            format!("{}]", self.max_end)
        } else {
            format!("{}[", self.max_end)
        };

        match (&self.left, &self.right) {
            (None, None) => write!(f, " {{ {} L{} ({}) }} ", self.key, self.level, max),
            (None, Some(right)) => write!(
                f,
                " {{ {} L{} ({}) right:{}}} ",
                self.key, self.level, max, right
            ),
            (Some(left), None) => write!(
                f,
                " {{ {} L{} ({}) left:{}}} ",
                self.key, self.level, max, left
            ),
            (Some(left), Some(right)) => write!(
                f,
                " {{ {} L{} ({}) left:{}right:{}}} ",
                self.key, self.level, max, left, right
            ),
        }
    }
}

impl<L> Node<L> {
    pub fn new(key: Interval<L>) -> Node<L>
    where
        L: Clone,
    {
        let max = key.end.clone();
        let max_inclusive = key.end_inclusive;

        Node {
            key,
            max_end: max,
            max_end_inclusive: max_inclusive,
            level: 1,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Recomputes `max_end` from this node's own end and its children.
    /// Children must already be up to date.
    fn refresh<C>(&mut self, order: &C)
    where
        L: Clone,
        C: LimitOrder<L> + ?Sized,
    {
        let mut max = &self.key.end;
        let mut max_inclusive = self.key.end_inclusive;
        for child in [&self.left, &self.right].into_iter().flatten() {
            let candidate = compare_positions(
                order,
                &child.max_end,
                end_bias(child.max_end_inclusive),
                max,
                end_bias(max_inclusive),
            );
            if candidate == Greater {
                max = &child.max_end;
                max_inclusive = child.max_end_inclusive;
            }
        }
        let max = max.clone();
        self.max_end = max;
        self.max_end_inclusive = max_inclusive;
    }
}

fn level<L>(link: &Link<L>) -> usize {
    link.as_ref().map_or(0, |node| node.level)
}

/// Rotates right when the left child sits on the same level.
fn skew<L, C>(mut node: Box<Node<L>>, order: &C) -> Box<Node<L>>
where
    L: Clone,
    C: LimitOrder<L> + ?Sized,
{
    match node.left.take() {
        Some(mut left) if left.level == node.level => {
            node.left = left.right.take();
            node.refresh(order);
            left.right = Some(node);
            left.refresh(order);
            left
        }
        left => {
            node.left = left;
            node
        }
    }
}

/// Rotates left and promotes when two right links chain on the same level.
fn split<L, C>(mut node: Box<Node<L>>, order: &C) -> Box<Node<L>>
where
    L: Clone,
    C: LimitOrder<L> + ?Sized,
{
    match node.right.take() {
        Some(mut right) if level(&right.right) == node.level => {
            node.right = right.left.take();
            node.refresh(order);
            right.left = Some(node);
            right.level += 1;
            right.refresh(order);
            right
        }
        right => {
            node.right = right;
            node
        }
    }
}

/// Inserts `key` below `link`. Sets `inserted` unless an equal interval is
/// already present, in which case the subtree is returned untouched.
pub(crate) fn insert<L, C>(
    link: Link<L>,
    key: Interval<L>,
    order: &C,
    inserted: &mut bool,
) -> Box<Node<L>>
where
    L: Clone,
    C: LimitOrder<L> + ?Sized,
{
    let mut node = match link {
        None => {
            *inserted = true;
            return Box::new(Node::new(key));
        }
        Some(node) => node,
    };

    match compare_intervals(order, &key, &node.key) {
        Less => node.left = Some(insert(node.left.take(), key, order, inserted)),
        Greater => node.right = Some(insert(node.right.take(), key, order, inserted)),
        Equal => return node,
    }
    if !*inserted {
        return node;
    }

    node.refresh(order);
    split(skew(node, order), order)
}

/// Appends `key` as the new maximum of the subtree without comparing it to
/// anything. The caller guarantees it sorts after every stored interval.
pub(crate) fn push_back<L, C>(link: Link<L>, key: Interval<L>, order: &C) -> Box<Node<L>>
where
    L: Clone,
    C: LimitOrder<L> + ?Sized,
{
    let mut node = match link {
        None => return Box::new(Node::new(key)),
        Some(node) => node,
    };

    node.right = Some(push_back(node.right.take(), key, order));
    node.refresh(order);
    split(skew(node, order), order)
}

/// Removes the interval equal to `key`, if any. Sets `removed` on success.
pub(crate) fn remove<L, C>(link: Link<L>, key: &Interval<L>, order: &C, removed: &mut bool) -> Link<L>
where
    L: Clone,
    C: LimitOrder<L> + ?Sized,
{
    let mut node = link?;

    match compare_intervals(order, key, &node.key) {
        Less => node.left = remove(node.left.take(), key, order, removed),
        Greater => node.right = remove(node.right.take(), key, order, removed),
        Equal => {
            *removed = true;
            if node.is_leaf() {
                return None;
            }
            if let Some(left) = node.left.take() {
                let (rest, predecessor) = take_max(left, order);
                node.left = rest;
                node.key = predecessor;
            } else if let Some(right) = node.right.take() {
                let (rest, successor) = take_min(right, order);
                node.right = rest;
                node.key = successor;
            }
        }
    }
    if !*removed {
        return Some(node);
    }

    Some(rebalance(node, order))
}

fn take_min<L, C>(mut node: Box<Node<L>>, order: &C) -> (Link<L>, Interval<L>)
where
    L: Clone,
    C: LimitOrder<L> + ?Sized,
{
    match node.left.take() {
        // Without a left child, any right child is a leaf on the same level.
        None => {
            let Node { key, right, .. } = *node;
            (right, key)
        }
        Some(left) => {
            let (rest, min) = take_min(left, order);
            node.left = rest;
            (Some(rebalance(node, order)), min)
        }
    }
}

fn take_max<L, C>(mut node: Box<Node<L>>, order: &C) -> (Link<L>, Interval<L>)
where
    L: Clone,
    C: LimitOrder<L> + ?Sized,
{
    match node.right.take() {
        // Without a right child the node is a level-1 leaf.
        None => {
            let Node { key, left, .. } = *node;
            (left, key)
        }
        Some(right) => {
            let (rest, max) = take_max(right, order);
            node.right = rest;
            (Some(rebalance(node, order)), max)
        }
    }
}

/// Restores the level invariants on the way up after a removal.
fn rebalance<L, C>(mut node: Box<Node<L>>, order: &C) -> Box<Node<L>>
where
    L: Clone,
    C: LimitOrder<L> + ?Sized,
{
    let should_be = level(&node.left).min(level(&node.right)) + 1;
    if should_be < node.level {
        node.level = should_be;
        if let Some(right) = node.right.as_mut() {
            if should_be < right.level {
                right.level = should_be;
            }
        }
    }
    node.refresh(order);

    let mut node = skew(node, order);
    node.right = node.right.take().map(|right| {
        let mut right = skew(right, order);
        right.right = right.right.take().map(|grandchild| skew(grandchild, order));
        right
    });
    let mut node = split(node, order);
    node.right = node.right.take().map(|right| split(right, order));
    node
}

pub(crate) fn find<'a, L, C>(mut link: &'a Link<L>, key: &Interval<L>, order: &C) -> Option<&'a Interval<L>>
where
    C: LimitOrder<L> + ?Sized,
{
    while let Some(node) = link {
        link = match compare_intervals(order, key, &node.key) {
            Less => &node.left,
            Greater => &node.right,
            Equal => return Some(&node.key),
        };
    }
    None
}

/// Collects, in ascending order, every interval below `link` matching
/// `query` under `mode`. Subtrees are skipped when their `max_end` cannot
/// reach the query, or when their starts lie past it.
pub(crate) fn search<'a, L, C>(
    link: &'a Link<L>,
    query: &Interval<L>,
    mode: OverlapMode,
    order: &C,
    out: &mut Vec<&'a Interval<L>>,
) where
    C: LimitOrder<L> + ?Sized,
{
    let node = match link {
        Some(node) => node,
        None => return,
    };

    let out_of_reach = match mode {
        OverlapMode::Any | OverlapMode::Within => {
            compare_positions(
                order,
                &node.max_end,
                end_bias(node.max_end_inclusive),
                &query.start,
                start_bias(query.start_inclusive),
            ) == Less
        }
        OverlapMode::Cover => {
            compare_positions(
                order,
                &node.max_end,
                end_bias(node.max_end_inclusive),
                &query.end,
                end_bias(query.end_inclusive),
            ) == Less
        }
    };
    if out_of_reach {
        return;
    }

    let starts_before = compare_starts(order, &node.key, query) == Less;
    if !(mode == OverlapMode::Within && starts_before) {
        search(&node.left, query, mode, order, out);
    }

    let past_query = match mode {
        OverlapMode::Any | OverlapMode::Within => compare_start_end(order, &node.key, query) == Greater,
        OverlapMode::Cover => compare_starts(order, &node.key, query) == Greater,
    };
    if past_query {
        return;
    }

    if matches(order, mode, &node.key, query) {
        out.push(&node.key);
    }
    search(&node.right, query, mode, order, out);
}

/// Panics unless the subtree obeys the AA level rules, is ordered, and
/// carries exact `max_end` values. Returns the number of nodes.
#[cfg(test)]
pub(crate) fn check<L, C>(link: &Link<L>, order: &C) -> usize
where
    L: Clone + PartialEq + fmt::Debug,
    C: LimitOrder<L> + ?Sized,
{
    let node = match link {
        Some(node) => node,
        None => return 0,
    };

    if node.is_leaf() {
        assert_eq!(node.level, 1, "leaf {:?} is not on level 1", node.key);
    }
    if node.level > 1 {
        assert!(
            node.left.is_some() && node.right.is_some(),
            "node {:?} above level 1 lacks a child",
            node.key
        );
    }
    assert_eq!(level(&node.left) + 1, node.level, "left child of {:?} is not one level down", node.key);
    assert!(
        level(&node.right) == node.level || level(&node.right) + 1 == node.level,
        "right child of {:?} is misplaced",
        node.key
    );
    if let Some(right) = &node.right {
        assert!(level(&right.right) < node.level, "double horizontal link under {:?}", node.key);
        assert_eq!(compare_intervals(order, &node.key, &right.key), Less);
    }
    if let Some(left) = &node.left {
        assert_eq!(compare_intervals(order, &left.key, &node.key), Less);
    }

    let mut expected = (**node).clone();
    expected.refresh(order);
    assert!(
        expected.max_end == node.max_end && expected.max_end_inclusive == node.max_end_inclusive,
        "stale max end at {:?}",
        node.key
    );

    1 + check(&node.left, order) + check(&node.right, order)
}

#[cfg(test)]
pub(crate) fn height<L>(link: &Link<L>) -> usize {
    match link {
        None => 0,
        Some(node) => 1 + height(&node.left).max(height(&node.right)),
    }
}
