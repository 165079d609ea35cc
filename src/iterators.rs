use core::{iter::FusedIterator, slice};

use crate::node::Node;

/// An `InOrderIterator` walks every element stored in a tree: left subtree,
/// then the node's own bucket, then the right subtree.
///
/// Returned by [`crate::IntervalTree::iter`]; [`crate::IndexedIntervalTree::iter`]
/// wraps it to yield plain indices.
#[derive(Debug)]
pub struct InOrderIterator<'a, T, E> {
    pub(crate) nodes: Vec<(&'a Node<T, E>, bool)>, // (node, visited)
    pub(crate) bucket: slice::Iter<'a, E>,
}

impl<'a, T, E> InOrderIterator<'a, T, E> {
    pub(crate) fn new(root: Option<&'a Node<T, E>>) -> Self {
        InOrderIterator {
            nodes: root.into_iter().map(|node| (node, false)).collect(),
            bucket: [].iter(),
        }
    }
}

impl<'a, T, E> Iterator for InOrderIterator<'a, T, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        loop {
            if let Some(item) = self.bucket.next() {
                return Some(item);
            }

            let (node, visited) = self.nodes.pop()?;
            if visited {
                // Left subtree is done: emit the bucket, then move right.
                if let Some(right) = &node.right_child {
                    self.nodes.push((right.as_ref(), false));
                }
                self.bucket = node.bucket.iter();
            } else {
                self.nodes.push((node, true));
                if let Some(left) = &node.left_child {
                    self.nodes.push((left.as_ref(), false));
                }
            }
        }
    }
}

impl<T, E> FusedIterator for InOrderIterator<'_, T, E> {}
