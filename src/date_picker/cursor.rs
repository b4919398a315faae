use chrono::{Datelike, NaiveDate};

use crate::calendar::{CalendarGrid, MONTHS, month_dates};

/// The month shown by the calendar, independent of the selected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCursor {
    pub year: i32,
    /// Zero-based, always `0..=11`.
    pub month: u32,
}

impl ViewCursor {
    /// `month` is zero-based; out-of-range values roll into later years.
    /// Saturates at `i32::MAX`.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year: year.saturating_add((month / 12) as i32),
            month: month % 12,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// Stays put at the first month of `i32::MIN`.
    pub fn retreat(&mut self) {
        if self.month == 0 {
            if let Some(year) = self.year.checked_sub(1) {
                self.year = year;
                self.month = 11;
            }
        } else {
            self.month -= 1;
        }
    }

    /// Stays put at the last month of `i32::MAX`.
    pub fn advance(&mut self) {
        if self.month == 11 {
            if let Some(year) = self.year.checked_add(1) {
                self.year = year;
                self.month = 0;
            }
        } else {
            self.month += 1;
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    pub fn grid(&self) -> CalendarGrid {
        month_dates(self.year, self.month)
    }

    /// `"FEB 2024"`.
    pub fn title(&self) -> String {
        format!("{} {}", MONTHS[self.month as usize], self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_advances_return_to_same_month_next_year() {
        for month in 0..12 {
            let mut cursor = ViewCursor::new(2024, month);
            for _ in 0..12 {
                cursor.advance();
            }
            assert_eq!(cursor, ViewCursor::new(2025, month));
        }
    }

    #[test]
    fn retreat_from_january_wraps_to_december() {
        let mut cursor = ViewCursor::new(2024, 0);
        cursor.retreat();
        assert_eq!(cursor, ViewCursor { year: 2023, month: 11 });
    }

    #[test]
    fn advance_from_december_wraps_to_january() {
        let mut cursor = ViewCursor::new(2024, 11);
        cursor.advance();
        assert_eq!(cursor, ViewCursor { year: 2025, month: 0 });
        assert_eq!(cursor.title(), "JAN 2025");
    }

    #[test]
    fn extreme_years_saturate() {
        assert_eq!(ViewCursor::new(i32::MAX, 12), ViewCursor { year: i32::MAX, month: 0 });

        let mut last = ViewCursor::new(i32::MAX, 11);
        last.advance();
        assert_eq!(last, ViewCursor { year: i32::MAX, month: 11 });

        let mut first = ViewCursor::new(i32::MIN, 0);
        first.retreat();
        assert_eq!(first, ViewCursor { year: i32::MIN, month: 0 });
    }
}
