use chrono::{Datelike, NaiveDate};

use super::datetime::MonthIndex;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(NaiveDate),
}

impl GridCell {
    pub fn date(&self) -> Option<&NaiveDate> {
        match self {
            GridCell::Day(date) => Some(date),
            GridCell::Blank => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, GridCell::Blank)
    }
}

/// Monday-first layout of one month in complete weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: MonthIndex,
    start_offset: usize,
    days_in_month: u32,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn new(month: MonthIndex) -> Self {
        let days_in_month = month.num_days();
        let start_offset = month.first_day().weekday().num_days_from_monday() as usize;
        let total_cells = total_cells(start_offset, days_in_month as usize);

        let cells = (0..total_cells)
            .map(|idx| {
                let day_num = idx as i64 - start_offset as i64 + 1;
                if day_num < 1 || day_num > days_in_month as i64 {
                    GridCell::Blank
                } else {
                    month
                        .day(day_num as u32)
                        .map_or(GridCell::Blank, GridCell::Day)
                }
            })
            .collect();

        MonthGrid {
            month,
            start_offset,
            days_in_month,
            cells,
        }
    }

    pub fn month(&self) -> &MonthIndex {
        &self.month
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn num_weeks(&self) -> usize {
        self.cells.len() / DAYS_PER_WEEK
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn position_of(&self, date: &NaiveDate) -> Option<usize> {
        if self.month.contains(date) {
            Some(self.start_offset + date.day0() as usize)
        } else {
            None
        }
    }
}

impl From<MonthIndex> for MonthGrid {
    fn from(month: MonthIndex) -> Self {
        MonthGrid::new(month)
    }
}

// Smallest multiple of a week that holds the offset and every day.
fn total_cells(start_offset: usize, days_in_month: usize) -> usize {
    let used = start_offset + days_in_month;
    ((used + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK) * DAYS_PER_WEEK
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use num_traits::FromPrimitive;

    fn month(y: i32, m: u32) -> MonthIndex {
        MonthIndex::new(Month::from_u32(m).unwrap(), y).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_february_2024() {
        let grid = MonthGrid::new(month(2024, 2));

        assert_eq!(grid.start_offset(), 3);
        assert_eq!(grid.days_in_month(), 29);
        assert_eq!(grid.len(), 35);
        assert_eq!(grid.num_weeks(), 5);
        assert_eq!(grid.cells()[3], GridCell::Day(date(2024, 2, 1)));
        assert_eq!(grid.cells()[31], GridCell::Day(date(2024, 2, 29)));
        assert!(grid.cells()[..3].iter().all(GridCell::is_blank));
        assert!(grid.cells()[32..].iter().all(GridCell::is_blank));
        assert_eq!(grid.position_of(&date(2024, 2, 29)), Some(31));
        assert_eq!(grid.position_of(&date(2024, 3, 1)), None);
    }

    #[test]
    fn month_starting_on_monday_has_no_leading_blanks() {
        let grid = MonthGrid::new(month(2024, 1));

        assert_eq!(grid.start_offset(), 0);
        assert_eq!(grid.cells()[0], GridCell::Day(date(2024, 1, 1)));
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn month_starting_on_sunday_needs_six_weeks() {
        let grid = MonthGrid::new(month(2024, 9));

        assert_eq!(grid.start_offset(), 6);
        assert_eq!(grid.len(), 42);
        assert_eq!(grid.weeks().count(), 6);
    }

    #[test]
    fn february_filling_four_exact_weeks() {
        // 2021-02-01 is a Monday and the month has 28 days
        let grid = MonthGrid::new(month(2021, 2));

        assert_eq!(grid.len(), 28);
        assert!(grid.cells().iter().all(|cell| !cell.is_blank()));
    }

    #[test]
    fn every_day_appears_exactly_once() {
        let mut m = month(1899, 1);
        while m < month(2101, 1) {
            let grid = MonthGrid::new(m);

            assert_eq!(grid.len() % DAYS_PER_WEEK, 0);
            assert!(grid.len() >= grid.start_offset() + grid.days_in_month() as usize);
            assert!(grid.len() < grid.start_offset() + grid.days_in_month() as usize + 7);

            for day in m.days() {
                let hits = grid
                    .cells()
                    .iter()
                    .filter(|cell| **cell == GridCell::Day(day))
                    .count();
                assert_eq!(hits, 1, "{} in {:?}", day, m);
                assert_eq!(grid.cells()[grid.position_of(&day).unwrap()], GridCell::Day(day));
            }

            m = m.next();
        }
    }

    #[test]
    fn weeks_start_on_monday() {
        let grid = MonthGrid::new(month(2024, 3));

        for week in grid.weeks() {
            if let Some(date) = week[0].date() {
                assert_eq!(date.weekday(), chrono::Weekday::Mon);
            }
        }
    }
}
