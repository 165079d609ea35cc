use core::cmp::{max, min};

use crate::interval::{Coordinate, Interval};

/// Returns the bounding interval of the run of overlapping intervals that
/// starts with the first element of `intervals`.
///
/// The scan grows the running bounds while each next interval overlaps them
/// and stops at the first one that does not, so later disjoint groups are not
/// unioned. A run of a single interval keeps its value; a merged run carries
/// [`Interval::NO_VALUE`]. An empty input yields [`Interval::invalid`].
///
/// # Examples
/// ```
/// use centered_interval_tree::{merge_chain, Interval};
///
/// let merged = merge_chain(&[
///     Interval::new(1i64, 5, 0),
///     Interval::new(4, 9, 1),
///     Interval::new(9, 12, 2),
///     Interval::new(20, 30, 3),
/// ]);
/// assert_eq!(merged, Interval::new(1, 12, -1));
/// assert!(!merge_chain::<i64>(&[]).is_valid());
/// ```
#[must_use]
pub fn merge_chain<T: Coordinate>(intervals: &[Interval<T>]) -> Interval<T> {
    let Some((first, rest)) = intervals.split_first() else {
        return Interval::invalid();
    };

    let mut merged = *first;
    for interval in rest {
        if !interval.overlaps(merged.start, merged.end) {
            break;
        }
        merged.start = min(merged.start, interval.start);
        merged.end = max(merged.end, interval.end);
        merged.value = Interval::<T>::NO_VALUE;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_chain_single() {
        let interval = Interval::new(3i64, 8, 5);
        assert_eq!(merge_chain(&[interval]), interval);
    }

    #[test]
    fn merge_chain_stops_at_first_gap() {
        let merged = merge_chain(&[
            Interval::new(10i64, 20, 0),
            Interval::new(15, 25, 1),
            Interval::new(40, 50, 2),
            Interval::new(12, 45, 3),
        ]);
        assert_eq!(merged, Interval::new(10, 25, -1));
    }

    #[test]
    fn merge_chain_extends_left() {
        let merged = merge_chain(&[Interval::new(10i64, 20, 0), Interval::new(2, 11, 1)]);
        assert_eq!(merged, Interval::new(2, 20, -1));
    }

    #[test]
    fn merge_chain_contained_run() {
        let merged = merge_chain(&[Interval::new(0i32, 100, 0), Interval::new(10, 20, 1)]);
        assert_eq!((merged.start, merged.end), (0, 100));
    }

    #[test]
    fn merge_chain_empty_is_sentinel() {
        assert_eq!(merge_chain::<i32>(&[]), Interval::new(-1, -1, -1));
    }
}
