#![warn(clippy::cargo)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::all)]
#![warn(
    missing_debug_implementations,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_must_use
)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

//! A balanced, centered interval tree over closed integer intervals.
//!
//! The tree is built once from a fixed collection of [`Interval`]s and is
//! read-only afterwards. It answers "which intervals overlap `[start, stop]`?"
//! and computes the set difference between two trees (the parts of every
//! interval of one tree not covered by the other), which is the usual
//! building block for genomic coordinate intersection.
//!
//! Each node partitions its intervals around a center taken from the start of
//! the median interval: intervals ending before the center go left, intervals
//! starting after it go right, and the rest stay at the node sorted by start.
//! Small sets and sets past the depth budget are kept as one flat sorted
//! bucket instead (see [`BuildParams`]).

use core::fmt::{self, Debug};
use std::sync::Arc;

use log::debug;

mod config;
mod error;
mod indexed;
mod interval;
mod iterators;
mod merge;
mod node;
mod subtract;

pub use config::BuildParams;
pub use error::Error;
pub use indexed::{IndexedIntervalTree, IntervalSource};
pub use interval::{Coordinate, Interval};
pub use iterators::InOrderIterator;
pub use merge::merge_chain;
pub use subtract::subtract_interval;

use node::Node;

fn interval_bounds<T: Copy>(interval: &Interval<T>) -> (T, T) {
    (interval.start, interval.end)
}

/// An immutable interval tree.
///
/// Cloning is cheap: clones share the same nodes. A built tree can be queried
/// from any number of threads at once.
///
/// # Examples
/// ```
/// use centered_interval_tree::{Interval, IntervalTree};
///
/// let tree = IntervalTree::new(vec![
///     Interval::new(1i64, 5, 0),
///     Interval::new(10, 20, 1),
///     Interval::new(15, 25, 2),
/// ]);
///
/// let mut overlaps = tree.find_overlaps(18, 22);
/// overlaps.sort_by_key(|interval| interval.value);
/// assert_eq!(overlaps, vec![Interval::new(10, 20, 1), Interval::new(15, 25, 2)]);
///
/// assert!(tree.overlaps(5, 9));
/// assert!(!tree.overlaps(6, 9));
/// ```
#[derive(Clone)]
pub struct IntervalTree<T> {
    root: Option<Arc<Node<T, Interval<T>>>>,
    size: usize,
}

impl<T: Coordinate> IntervalTree<T> {
    /// Builds a tree with the default [`BuildParams`].
    #[must_use]
    pub fn new(intervals: Vec<Interval<T>>) -> IntervalTree<T> {
        IntervalTree::with_params(intervals, &BuildParams::default())
    }

    /// Builds a tree from `intervals`.
    ///
    /// Every interval must satisfy `start <= end`; this is checked in debug
    /// builds only.
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::{BuildParams, Interval, IntervalTree};
    ///
    /// let intervals: Vec<Interval<i64>> =
    ///     (0..1000).map(|i| Interval::new(i * 10, i * 10 + 5, i)).collect();
    ///
    /// let flat = IntervalTree::with_params(intervals.clone(), &BuildParams::new(0, 512));
    /// let deep = IntervalTree::with_params(intervals, &BuildParams::new(16, 8));
    /// assert_eq!(flat.height(), 1);
    /// assert!(deep.height() > 1);
    /// assert_eq!(flat.find_overlaps(4995, 5000).len(), 2);
    /// assert_eq!(deep.find_overlaps(4995, 5000).len(), 2);
    /// ```
    #[must_use]
    pub fn with_params(intervals: Vec<Interval<T>>, params: &BuildParams) -> IntervalTree<T> {
        let size = intervals.len();
        if size == 0 {
            return IntervalTree::empty();
        }

        let root = Node::build(
            intervals,
            &interval_bounds,
            params.max_depth,
            None,
            params.min_bucket,
        );
        debug_assert_eq!(root.size(), size);
        debug!(
            "built interval tree over {} intervals: height {}, max_depth {}, min_bucket {}",
            size,
            root.height(),
            params.max_depth,
            params.min_bucket
        );

        IntervalTree {
            root: Some(Arc::new(root)),
            size,
        }
    }

    /// A tree without intervals. Every query on it returns nothing.
    #[must_use]
    pub fn empty() -> IntervalTree<T> {
        IntervalTree {
            root: None,
            size: 0,
        }
    }

    /// Returns true if there are no intervals in the tree, false otherwise
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns total number of intervals in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns the number of node levels, 0 for an empty tree
    #[must_use]
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    /// Returns the intervals overlapping `[start, stop]`.
    ///
    /// Results come in traversal order (a node's own intervals, then its left
    /// subtree, then its right subtree), not sorted by position. With
    /// `stop_at_first` the walk ends at the first match, so at most one
    /// interval is returned.
    ///
    /// # Arguments
    /// * `start`, `stop`: closed query range; touching end points overlap
    /// * `stop_at_first`: return after the first match
    #[must_use]
    pub fn overlapping_intervals(&self, start: T, stop: T, stop_at_first: bool) -> Vec<Interval<T>> {
        let Some(root) = &self.root else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        let _ = root.find_overlaps(start, stop, &interval_bounds, stop_at_first, &mut matches);
        matches.into_iter().copied().collect()
    }

    /// Returns all intervals that overlap `[start, stop]`, in traversal order
    #[must_use]
    pub fn find_overlaps(&self, start: T, stop: T) -> Vec<Interval<T>> {
        self.overlapping_intervals(start, stop, false)
    }

    /// Returns the first interval found that overlaps `[start, stop]`
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::{Interval, IntervalTree};
    ///
    /// let tree: IntervalTree<i64> = vec![Interval::new(0, 3, 0), Interval::new(6, 10, 1)]
    ///     .into_iter()
    ///     .collect();
    ///
    /// assert_eq!(tree.find_overlap(8, 12), Some(Interval::new(6, 10, 1)));
    /// assert!(tree.find_overlap(4, 5).is_none());
    /// ```
    #[must_use]
    pub fn find_overlap(&self, start: T, stop: T) -> Option<Interval<T>> {
        self.overlapping_intervals(start, stop, true).first().copied()
    }

    /// Returns true if some interval in the tree overlaps `[start, stop]`
    #[must_use]
    pub fn overlaps(&self, start: T, stop: T) -> bool {
        self.find_overlap(start, stop).is_some()
    }

    /// Subtracts every region covered by `other` from every interval of this
    /// tree and returns the uncovered fragments.
    ///
    /// Fragments are grouped by source interval, source intervals following
    /// the in-order walk of [`IntervalTree::iter`]. An interval that `other`
    /// does not touch at all is returned unchanged with its value; every
    /// other fragment carries [`Interval::NO_VALUE`]. Fragments of different
    /// source intervals are never merged.
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::{Interval, IntervalTree};
    ///
    /// let a = IntervalTree::new(vec![Interval::new(1i64, 100, 0)]);
    /// let b = IntervalTree::new(vec![Interval::new(10, 20, 0), Interval::new(50, 60, 0)]);
    ///
    /// assert_eq!(
    ///     a.subtract(&b),
    ///     vec![
    ///         Interval::new(1, 9, -1),
    ///         Interval::new(21, 49, -1),
    ///         Interval::new(61, 100, -1),
    ///     ]
    /// );
    /// assert!(a.subtract(&a).is_empty());
    /// ```
    #[must_use]
    pub fn subtract(&self, other: &IntervalTree<T>) -> Vec<Interval<T>> {
        let mut fragments = Vec::new();
        for interval in self.iter() {
            let mut covering = other.find_overlaps(interval.start, interval.end);
            covering.sort_by_key(|cover| cover.start);
            subtract::push_uncovered(interval, &covering, &mut fragments);
        }

        debug!(
            "subtracted {} intervals from {}: {} fragments",
            other.len(),
            self.len(),
            fragments.len()
        );
        fragments
    }

    /// Returns all intervals in the tree following an in-order traversal:
    /// left subtree, a node's own intervals, right subtree.
    #[must_use]
    pub fn intervals(&self) -> Vec<Interval<T>> {
        self.iter().copied().collect()
    }

    /// Iterates over all intervals in the same order as [`IntervalTree::intervals`]
    #[must_use]
    pub fn iter(&self) -> InOrderIterator<'_, T, Interval<T>> {
        InOrderIterator::new(self.root.as_deref())
    }
}

impl<T: Coordinate> Default for IntervalTree<T> {
    fn default() -> Self {
        IntervalTree::empty()
    }
}

impl<T: Coordinate> FromIterator<Interval<T>> for IntervalTree<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        IntervalTree::new(iter.into_iter().collect())
    }
}

impl<'a, T: Coordinate> IntoIterator for &'a IntervalTree<T> {
    type Item = &'a Interval<T>;
    type IntoIter = InOrderIterator<'a, T, Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Coordinate> Debug for IntervalTree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str("IntervalTree ")?;
        fmt.debug_set().entries(self.iter()).finish()
    }
}
