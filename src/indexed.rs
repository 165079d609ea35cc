use core::{fmt, ops::RangeInclusive};

use log::debug;

use crate::{
    config::BuildParams,
    interval::{Coordinate, Interval},
    iterators::InOrderIterator,
    node::Node,
};

/// An indexable collection of closed intervals.
///
/// Lets an [`IndexedIntervalTree`] be built over data the caller already owns
/// without copying it: the tree only stores positions into the collection.
pub trait IntervalSource {
    /// End point type of the intervals.
    type Coord: Coordinate;

    /// Number of intervals in the collection.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start of the interval at `index`.
    fn start(&self, index: usize) -> Self::Coord;

    /// End (inclusive) of the interval at `index`.
    fn end(&self, index: usize) -> Self::Coord;
}

impl<T: Coordinate> IntervalSource for [Interval<T>] {
    type Coord = T;

    fn len(&self) -> usize {
        <[Interval<T>]>::len(self)
    }

    fn start(&self, index: usize) -> T {
        self[index].start
    }

    fn end(&self, index: usize) -> T {
        self[index].end
    }
}

impl<T: Coordinate> IntervalSource for Vec<Interval<T>> {
    type Coord = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn start(&self, index: usize) -> T {
        self[index].start
    }

    fn end(&self, index: usize) -> T {
        self[index].end
    }
}

impl<T: Coordinate> IntervalSource for [(T, T)] {
    type Coord = T;

    fn len(&self) -> usize {
        <[(T, T)]>::len(self)
    }

    fn start(&self, index: usize) -> T {
        self[index].0
    }

    fn end(&self, index: usize) -> T {
        self[index].1
    }
}

impl<T: Coordinate> IntervalSource for [RangeInclusive<T>] {
    type Coord = T;

    fn len(&self) -> usize {
        <[RangeInclusive<T>]>::len(self)
    }

    fn start(&self, index: usize) -> T {
        *self[index].start()
    }

    fn end(&self, index: usize) -> T {
        *self[index].end()
    }
}

/// A centered interval tree over positions into a borrowed [`IntervalSource`].
///
/// The source is borrowed for the whole lifetime of the tree and is never
/// copied; queries return indices into it.
///
/// # Examples
/// ```
/// use centered_interval_tree::IndexedIntervalTree;
///
/// let exons = vec![(100i64, 200), (150, 300), (400, 500)];
/// let tree = IndexedIntervalTree::new(exons.as_slice());
///
/// let mut hits = tree.find_overlaps(180, 420);
/// hits.sort_unstable();
/// assert_eq!(hits, vec![0, 1, 2]);
/// assert_eq!(tree.find_overlap(301, 399), None);
/// ```
pub struct IndexedIntervalTree<'a, S: IntervalSource + ?Sized> {
    source: &'a S,
    root: Option<Node<S::Coord, usize>>,
}

impl<'a, S: IntervalSource + ?Sized> IndexedIntervalTree<'a, S> {
    /// Builds a tree over every interval in `source` with default parameters.
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self::with_params(source, &BuildParams::default())
    }

    /// Builds a tree over every interval in `source`.
    #[must_use]
    pub fn with_params(source: &'a S, params: &BuildParams) -> Self {
        let indices: Vec<usize> = (0..source.len()).collect();
        let bounds = |index: &usize| (source.start(*index), source.end(*index));
        let root = (!indices.is_empty()).then(|| {
            Node::build(indices, &bounds, params.max_depth, None, params.min_bucket)
        });

        debug!(
            "built indexed interval tree over {} intervals, height {}",
            source.len(),
            root.as_ref().map_or(0, Node::height)
        );

        IndexedIntervalTree { source, root }
    }

    /// The collection the tree indexes.
    #[must_use]
    pub fn source(&self) -> &'a S {
        self.source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Indices of every interval overlapping `[start, stop]`, in traversal order.
    #[must_use]
    pub fn find_overlaps(&self, start: S::Coord, stop: S::Coord) -> Vec<usize> {
        self.query(start, stop, false)
    }

    /// Index of the first interval found overlapping `[start, stop]`.
    #[must_use]
    pub fn find_overlap(&self, start: S::Coord, stop: S::Coord) -> Option<usize> {
        self.query(start, stop, true).first().copied()
    }

    fn query(&self, start: S::Coord, stop: S::Coord, first_only: bool) -> Vec<usize> {
        let Some(root) = &self.root else {
            return Vec::new();
        };
        let source = self.source;
        let bounds = |index: &usize| (source.start(*index), source.end(*index));

        let mut matches = Vec::new();
        let _ = root.find_overlaps(start, stop, &bounds, first_only, &mut matches);
        matches.into_iter().copied().collect()
    }

    /// Iterates over every index in the tree, in order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        InOrderIterator::new(self.root.as_ref()).copied()
    }
}

impl<S: IntervalSource + ?Sized> fmt::Debug for IndexedIntervalTree<'_, S> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("IndexedIntervalTree")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
