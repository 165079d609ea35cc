use crate::interval::{Coordinate, Interval};

/// Returns the parts of `interval` not covered by any of `covering`.
///
/// Fragments come out ordered by position, are maximal, and are tagged with
/// [`Interval::NO_VALUE`]. If nothing in `covering` overlaps `interval` it is
/// returned unchanged, value included.
///
/// # Examples
/// ```
/// use centered_interval_tree::{subtract_interval, Interval};
///
/// let fragments = subtract_interval(
///     &Interval::new(1i64, 100, 0),
///     &[Interval::new(50, 60, 0), Interval::new(10, 20, 0)],
/// );
/// assert_eq!(
///     fragments,
///     vec![
///         Interval::new(1, 9, -1),
///         Interval::new(21, 49, -1),
///         Interval::new(61, 100, -1),
///     ]
/// );
/// ```
#[must_use]
pub fn subtract_interval<T: Coordinate>(
    interval: &Interval<T>,
    covering: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut covering: Vec<Interval<T>> = covering
        .iter()
        .filter(|other| other.overlaps(interval.start, interval.end))
        .copied()
        .collect();
    covering.sort_by_key(|other| other.start);

    let mut fragments = Vec::new();
    push_uncovered(interval, &covering, &mut fragments);
    fragments
}

/// Sweeps `covering` left to right, coalescing it into windows, and pushes the
/// gaps of `interval` between and around those windows onto `fragments`.
///
/// `covering` must be sorted by start and every element must overlap
/// `interval`.
pub(crate) fn push_uncovered<T: Coordinate>(
    interval: &Interval<T>,
    covering: &[Interval<T>],
    fragments: &mut Vec<Interval<T>>,
) {
    let Some((first, rest)) = covering.split_first() else {
        fragments.push(*interval);
        return;
    };

    let mut start_this = interval.start;
    let mut start_other = first.start;
    let mut stop_other = first.end;

    let mut rest = rest.iter();
    while start_this < interval.end {
        let Some(next) = rest.next() else {
            break;
        };

        if next.end <= stop_other {
            continue;
        }
        if next.start <= stop_other {
            stop_other = next.end;
            continue;
        }

        if start_other > start_this {
            fragments.push(Interval::fragment(start_this, start_other - T::one()));
        }
        // `next` starts after the window, so the window cannot end at T::max.
        start_this = stop_other + T::one();
        start_other = next.start;
        stop_other = next.end;
    }

    if start_other > start_this {
        fragments.push(Interval::fragment(start_this, start_other - T::one()));
    }
    if stop_other < interval.end {
        fragments.push(Interval::fragment(stop_other + T::one(), interval.end));
    }
}
