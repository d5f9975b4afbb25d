use std::iter::FusedIterator;

use crate::interval::Interval;
use crate::node::{Link, Node};

/// Ascending iterator over the intervals of an [`crate::IntervalTree`].
#[derive(Clone, Debug)]
pub struct Iter<'a, L> {
    stack: Vec<&'a Node<L>>,
    remaining: usize,
}

impl<'a, L> Iter<'a, L> {
    pub(crate) fn new(root: &'a Link<L>, len: usize) -> Iter<'a, L> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link<L>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, L> Iterator for Iter<'a, L> {
    type Item = &'a Interval<L>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<L> ExactSizeIterator for Iter<'_, L> {}
impl<L> FusedIterator for Iter<'_, L> {}

/// Owning ascending iterator, tearing the tree down as it goes.
#[derive(Debug)]
pub struct IntoIter<L> {
    stack: Vec<Box<Node<L>>>,
    remaining: usize,
}

impl<L> IntoIter<L> {
    pub(crate) fn new(root: Link<L>, len: usize) -> IntoIter<L> {
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<L>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<L> Iterator for IntoIter<L> {
    type Item = Interval<L>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<L> ExactSizeIterator for IntoIter<L> {}
impl<L> FusedIterator for IntoIter<L> {}
