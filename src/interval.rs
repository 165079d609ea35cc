use core::fmt::{self, Debug, Display};
use num::{PrimInt, Signed};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Numeric type usable as an interval end point.
///
/// Any signed primitive integer qualifies; the signedness is needed for the
/// `-1` sentinel returned by [`crate::merge_chain`] on empty input.
pub trait Coordinate: PrimInt + Signed + Debug {}

impl<T: PrimInt + Signed + Debug> Coordinate for T {}

/// A closed interval `[start, end]` with an opaque integer tag.
///
/// Both end points are inclusive, so `[1,5]` and `[5,9]` overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(rkyv::Archive, rkyv::Deserialize, rkyv::Serialize)]
#[archive_attr(derive(bytecheck::CheckBytes))]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
    pub value: i64,
}

impl<T: Coordinate> Interval<T> {
    /// Tag carried by intervals that do not stem 1:1 from a single source interval.
    pub const NO_VALUE: i64 = -1;

    /// Creates a new interval. `start <= end` is the caller's responsibility;
    /// use [`Interval::try_new`] when the end points come from untrusted input.
    #[must_use]
    pub fn new(start: T, end: T, value: i64) -> Interval<T> {
        Interval { start, end, value }
    }

    /// Creates a new interval, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns [`Error::InvertedInterval`] when `start` lies after `end`.
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::Interval;
    ///
    /// assert!(Interval::try_new(3i64, 7, 0).is_ok());
    /// assert!(Interval::try_new(7i64, 3, 0).is_err());
    /// ```
    pub fn try_new(start: T, end: T, value: i64) -> Result<Interval<T>, Error> {
        if start > end {
            return Err(Error::InvertedInterval {
                start: start.to_i128().unwrap_or_default(),
                end: end.to_i128().unwrap_or_default(),
            });
        }
        Ok(Interval { start, end, value })
    }

    /// A fragment of some source interval, tagged with [`Interval::NO_VALUE`].
    pub(crate) fn fragment(start: T, end: T) -> Interval<T> {
        Interval::new(start, end, Self::NO_VALUE)
    }

    /// The "no interval" sentinel `[-1,-1]` with value `-1`.
    #[must_use]
    pub fn invalid() -> Interval<T> {
        let minus_one = -T::one();
        Interval::new(minus_one, minus_one, Self::NO_VALUE)
    }

    /// Returns false only for the [`Interval::invalid`] sentinel.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        *self != Self::invalid()
    }

    /// Number of integer points covered by the interval, `None` if that
    /// count does not fit in `T`.
    #[must_use]
    pub fn width(&self) -> Option<T> {
        self.end.checked_sub(&self.start)?.checked_add(&T::one())
    }

    /// Closed-interval overlap test, touching end points count.
    #[must_use]
    pub fn overlaps(&self, start: T, stop: T) -> bool {
        overlaps(self.start, self.end, start, stop)
    }

    /// Returns true if `point` lies within the interval.
    #[must_use]
    pub fn contains(&self, point: T) -> bool {
        self.start <= point && point <= self.end
    }
}

/// Closed overlap predicate shared by every traversal.
#[inline]
pub(crate) fn overlaps<T: PartialOrd>(start: T, end: T, query_start: T, query_stop: T) -> bool {
    end >= query_start && start <= query_stop
}

impl<T: Coordinate> Default for Interval<T> {
    fn default() -> Self {
        Interval::invalid()
    }
}

impl<T: Display> Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.start, self.end)
    }
}

impl<T: Coordinate> From<(T, T, i64)> for Interval<T> {
    fn from((start, end, value): (T, T, i64)) -> Self {
        Interval::new(start, end, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_overlap_is_closed() {
        let interval = Interval::new(5i64, 10, 0);
        assert!(interval.overlaps(10, 12));
        assert!(interval.overlaps(0, 5));
        assert!(interval.overlaps(6, 7));
        assert!(!interval.overlaps(11, 20));
        assert!(!interval.overlaps(0, 4));
    }

    #[test]
    fn interval_inverted_query_matches_nothing() {
        let interval = Interval::new(5i64, 10, 0);
        assert!(!interval.overlaps(12, 3));
    }

    #[test]
    fn interval_sentinel() {
        let invalid = Interval::<i32>::invalid();
        assert_eq!((invalid.start, invalid.end, invalid.value), (-1, -1, -1));
        assert!(!invalid.is_valid());
        assert!(Interval::new(-1i32, -1, 0).is_valid());
        assert_eq!(Interval::<i32>::default(), invalid);
    }

    #[test]
    fn interval_try_new() {
        assert!(matches!(
            Interval::try_new(9i64, 2, 4),
            Err(Error::InvertedInterval { start: 9, end: 2 })
        ));
        assert_eq!(Interval::try_new(2i64, 2, 4).unwrap(), Interval::new(2, 2, 4));
    }

    #[test]
    fn interval_display_and_len() {
        let interval = Interval::new(-3i64, 4, 7);
        assert_eq!(format!("{}", interval), "[-3,4]");
        assert_eq!(interval.width(), Some(8));
        assert!(interval.contains(-3));
        assert!(!interval.contains(5));
    }

    #[test]
    fn interval_width_of_wide_intervals() {
        assert_eq!(Interval::new(7i64, 7, 0).width(), Some(1));
        assert_eq!(Interval::new(1i64, i64::MAX, 0).width(), Some(i64::MAX));
        assert_eq!(Interval::new(0i64, i64::MAX, 0).width(), None);
        assert_eq!(Interval::new(i64::MIN, i64::MAX, 0).width(), None);
        assert_eq!(Interval::new(i8::MIN, -1, 0).width(), None);
    }

    #[test]
    fn interval_serde_json() {
        let interval = Interval::new(10i64, 20, 3);
        let json = serde_json::to_string(&interval).unwrap();
        assert_eq!(json, r#"{"start":10,"end":20,"value":3}"#);
        let parsed: Interval<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, interval);
    }

    #[test]
    fn interval_rkyv_archive() {
        let interval = Interval::new(100i64, 250, 9);
        let bytes = rkyv::to_bytes::<_, 256>(&interval).unwrap();
        let archived = rkyv::check_archived_root::<Interval<i64>>(&bytes[..]).unwrap();
        assert_eq!(archived.start, 100);
        assert_eq!(archived.end, 250);

        let restored: Interval<i64> =
            rkyv::Deserialize::deserialize(archived, &mut rkyv::Infallible).unwrap();
        assert_eq!(restored, interval);
    }
}
