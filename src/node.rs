use core::{cmp::max, ops::ControlFlow};
use log::trace;

use crate::interval::{overlaps, Coordinate};

/// Span `(leftmost start, rightmost end)` covered by a subtree.
pub(crate) type Extent<T> = (T, T);

/// One level of a centered interval tree.
///
/// `E` is whatever the tree stores (an owned interval or an index into a
/// borrowed container); its end points are read through a `bounds` accessor
/// handed to every operation.
#[derive(Clone, Debug)]
pub(crate) struct Node<T, E> {
    pub center: T,
    // Sorted by start. Every element overlaps `center` unless the node is a
    // leaf bucket, in which case it simply holds the whole remaining set.
    pub bucket: Vec<E>,
    // Elements ending before `center`.
    pub left_child: Option<Box<Node<T, E>>>,
    // Elements starting after `center`.
    pub right_child: Option<Box<Node<T, E>>>,
}

impl<T: Coordinate, E> Node<T, E> {
    /// Recursively partitions `items` around the start of their median element.
    ///
    /// `extent` is `None` on the top-level call: the input is then sorted by
    /// start and its span computed from the data. Children always receive
    /// start-sorted input together with the span inherited from their parent.
    pub fn build<F>(
        mut items: Vec<E>,
        bounds: &F,
        depth: usize,
        extent: Option<Extent<T>>,
        min_bucket: usize,
    ) -> Node<T, E>
    where
        F: Fn(&E) -> (T, T),
    {
        let depth = depth.saturating_sub(1);
        if depth == 0 || items.is_empty() || items.len() < min_bucket {
            return Node::leaf(items, bounds);
        }

        let (left_extent, right_extent) = match extent {
            Some(extent) => extent,
            None => {
                items.sort_by_key(|item| bounds(item).0);
                let leftmost = bounds(&items[0]).0;
                let rightmost = items
                    .iter()
                    .map(|item| bounds(item).1)
                    .fold(leftmost, max);
                (leftmost, rightmost)
            }
        };

        let center = bounds(&items[items.len() / 2]).0;

        // The input is start-sorted, so every partition stays start-sorted.
        let mut lefts = Vec::new();
        let mut rights = Vec::new();
        let mut bucket = Vec::new();
        for item in items {
            let (start, end) = bounds(&item);
            debug_assert!(start <= end, "interval [{start:?},{end:?}] is inverted");
            if end < center {
                lefts.push(item);
            } else if start > center {
                rights.push(item);
            } else {
                bucket.push(item);
            }
        }

        trace!(
            "node center {:?} over [{:?},{:?}]: {} left, {} centered, {} right",
            center,
            left_extent,
            right_extent,
            lefts.len(),
            bucket.len(),
            rights.len()
        );

        let left_child = (!lefts.is_empty()).then(|| {
            Box::new(Node::build(
                lefts,
                bounds,
                depth,
                Some((left_extent, center)),
                min_bucket,
            ))
        });
        let right_child = (!rights.is_empty()).then(|| {
            Box::new(Node::build(
                rights,
                bounds,
                depth,
                Some((center, right_extent)),
                min_bucket,
            ))
        });

        Node {
            center,
            bucket,
            left_child,
            right_child,
        }
    }

    fn leaf<F>(mut items: Vec<E>, bounds: &F) -> Node<T, E>
    where
        F: Fn(&E) -> (T, T),
    {
        trace!("leaf bucket of {} intervals", items.len());
        for item in &items {
            let (start, end) = bounds(item);
            debug_assert!(start <= end, "interval [{start:?},{end:?}] is inverted");
        }
        items.sort_by_key(|item| bounds(item).0);
        Node {
            center: T::zero(),
            bucket: items,
            left_child: None,
            right_child: None,
        }
    }

    /// Appends every element overlapping `[start, stop]` to `matches`, in
    /// traversal order: own bucket, then left subtree, then right subtree.
    ///
    /// With `first_only` the walk breaks out of the whole recursion as soon as
    /// one match has been recorded.
    pub fn find_overlaps<'a, F>(
        &'a self,
        start: T,
        stop: T,
        bounds: &F,
        first_only: bool,
        matches: &mut Vec<&'a E>,
    ) -> ControlFlow<()>
    where
        F: Fn(&E) -> (T, T),
    {
        let reachable = self
            .bucket
            .first()
            .is_some_and(|first| stop >= bounds(first).0);
        if reachable {
            for item in &self.bucket {
                let (item_start, item_end) = bounds(item);
                if item_start > stop {
                    break;
                }
                if overlaps(item_start, item_end, start, stop) {
                    matches.push(item);
                    if first_only {
                        return ControlFlow::Break(());
                    }
                }
            }
        }

        if let Some(left) = &self.left_child {
            if start <= self.center {
                left.find_overlaps(start, stop, bounds, first_only, matches)?;
            }
        }
        if let Some(right) = &self.right_child {
            if stop >= self.center {
                right.find_overlaps(start, stop, bounds, first_only, matches)?;
            }
        }
        ControlFlow::Continue(())
    }
}

impl<T, E> Node<T, E> {
    /// Number of levels, a single node counting as one.
    pub fn height(&self) -> usize {
        1 + max(
            Node::child_height(&self.left_child),
            Node::child_height(&self.right_child),
        )
    }

    fn child_height(node: &Option<Box<Node<T, E>>>) -> usize {
        node.as_ref().map_or(0, |node| node.height())
    }

    /// Number of stored elements in the subtree.
    pub fn size(&self) -> usize {
        self.bucket.len()
            + self.left_child.as_ref().map_or(0, |node| node.size())
            + self.right_child.as_ref().map_or(0, |node| node.size())
    }
}
