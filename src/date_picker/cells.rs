use chrono::NaiveDate;

use crate::calendar::CalendarGrid;

/// A grid date with its rendering flags resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCell {
    pub date: NaiveDate,
    pub offset: bool,
    pub disabled: bool,
    pub today: bool,
    pub selected: bool,
    /// Offset cell blanked because offset days are hidden.
    pub hidden: bool,
}

impl DateCell {
    /// Hidden and disabled cells accept no selection.
    pub fn is_selectable(&self) -> bool {
        !self.hidden && !self.disabled
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CellPolicy {
    pub(crate) today: NaiveDate,
    pub(crate) selected: Option<NaiveDate>,
    pub(crate) disable_past: bool,
    pub(crate) hide_offset: bool,
}

impl CellPolicy {
    pub(crate) fn cell(&self, date: NaiveDate, offset: bool) -> DateCell {
        DateCell {
            date,
            offset,
            disabled: self.disable_past && date < self.today,
            today: date == self.today,
            selected: self.selected == Some(date),
            hidden: self.hide_offset && offset,
        }
    }

    pub(crate) fn weeks(&self, grid: &CalendarGrid) -> Vec<Vec<DateCell>> {
        grid.weeks()
            .map(|week| {
                week.iter()
                    .map(|day| self.cell(day.date, day.offset))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn flags_follow_policy() {
        let policy = CellPolicy {
            today: date(2024, 2, 10),
            selected: Some(date(2024, 2, 15)),
            disable_past: true,
            hide_offset: true,
        };
        let past = policy.cell(date(2024, 2, 9), false);
        assert!(past.disabled && !past.is_selectable());
        let today = policy.cell(date(2024, 2, 10), false);
        assert!(today.today && !today.disabled);
        assert!(policy.cell(date(2024, 2, 15), false).selected);
        let offset = policy.cell(date(2024, 3, 1), true);
        assert!(offset.hidden && !offset.is_selectable());
    }

    #[test]
    fn nothing_disabled_without_restriction() {
        let policy = CellPolicy {
            today: date(2024, 2, 10),
            selected: None,
            disable_past: false,
            hide_offset: false,
        };
        let cell = policy.cell(date(1990, 1, 1), true);
        assert!(cell.is_selectable());
        assert!(!cell.selected);
    }
}
