//! Date range finder
//!
//! Tracks the earliest and latest record timestamps seen.

use crate::types::DateRange;
use chrono::NaiveDateTime;

/// Running min/max over observed timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRangeFinder {
    range: Option<DateRange>,
}

impl DateRangeFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the range to cover `at`
    pub fn observe(&mut self, at: NaiveDateTime) {
        match self.range.as_mut() {
            Some(range) => range.extend(at),
            None => self.range = Some(DateRange::single(at)),
        }
    }

    /// The inclusive range, or `None` if nothing was observed
    pub fn finish(self) -> Option<DateRange> {
        self.range
    }
}

impl FromIterator<NaiveDateTime> for DateRangeFinder {
    fn from_iter<I: IntoIterator<Item = NaiveDateTime>>(iter: I) -> Self {
        let mut finder = DateRangeFinder::new();
        for at in iter {
            finder.observe(at);
        }
        finder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_range_is_undefined() {
        assert_eq!(DateRangeFinder::new().finish(), None);
    }

    #[test]
    fn test_single_timestamp() {
        let range = [at(1, 10)]
            .into_iter()
            .collect::<DateRangeFinder>()
            .finish()
            .unwrap();

        assert_eq!(range.start, at(1, 10));
        assert_eq!(range.end, at(1, 10));
    }

    #[test]
    fn test_unordered_timestamps() {
        let stamps = [at(14, 9), at(2, 16), at(28, 8), at(2, 15), at(20, 11)];
        let range = stamps
            .iter()
            .copied()
            .collect::<DateRangeFinder>()
            .finish()
            .unwrap();

        assert_eq!(range.start, at(2, 15));
        assert_eq!(range.end, at(28, 8));
        assert!(range.start <= range.end);
        assert!(stamps.contains(&range.start));
        assert!(stamps.contains(&range.end));
    }
}
