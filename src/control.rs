use chrono::{Datelike, Duration, NaiveDate};
use std::ops::ControlFlow;

use crate::backend::ClientHandle;
use crate::cmds::Cmd;
use crate::provider::{MonthGrid, MonthIndex};
use crate::store::ActivityStore;

/// Widest cursor step in days. Any step beyond it leaves the date range.
const MAX_CURSOR_STEP: i64 = 1 << 32;

/// The day being edited together with its working text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    date: NaiveDate,
    buffer: String,
}

impl Selection {
    pub fn date(&self) -> &NaiveDate {
        &self.date
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

/// Owns all calendar state. Every change goes through [`Controller::handle`].
#[derive(Debug)]
pub struct Controller {
    month: MonthIndex,
    cursor: NaiveDate,
    today: NaiveDate,
    selection: Option<Selection>,
    store: ActivityStore,
    backend: Option<ClientHandle>,
}

impl Controller {
    pub fn new(today: NaiveDate, store: ActivityStore, backend: Option<ClientHandle>) -> Self {
        Controller {
            month: MonthIndex::from(today),
            cursor: today,
            today,
            selection: None,
            store,
            backend,
        }
    }

    pub fn with_cursor(mut self, cursor: NaiveDate) -> Self {
        self.goto(cursor);
        self
    }

    pub fn month(&self) -> &MonthIndex {
        &self.month
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.month)
    }

    pub fn cursor(&self) -> &NaiveDate {
        &self.cursor
    }

    pub fn today(&self) -> &NaiveDate {
        &self.today
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    pub fn backend(&self) -> Option<&ClientHandle> {
        self.backend.as_ref()
    }

    pub fn handle(&mut self, cmd: Cmd) -> ControlFlow<()> {
        log::trace!("Handling {:?}", cmd);

        match cmd {
            Cmd::Noop => {}
            Cmd::ShiftMonth(months) => self.set_month(self.month.shift(months)),
            Cmd::SetMonth(month) => self.set_month(month),
            Cmd::Today => self.goto(self.today),
            Cmd::MoveCursor(days) => {
                let cursor = Some(days)
                    .filter(|days| (-MAX_CURSOR_STEP..=MAX_CURSOR_STEP).contains(days))
                    .and_then(|days| self.cursor.checked_add_signed(Duration::days(days)));
                match cursor {
                    Some(cursor) => self.goto(cursor),
                    None => log::debug!("Cursor step of {} days is out of range", days),
                }
            }
            Cmd::GotoDate(date) => self.goto(date),
            Cmd::SelectDay(date) => self.select(date),
            Cmd::SelectCursor => self.select(self.cursor),
            Cmd::InsertChar(c) => {
                if let Some(selection) = self.selection.as_mut() {
                    selection.buffer.push(c);
                }
            }
            Cmd::DeleteBackwards => {
                if let Some(selection) = self.selection.as_mut() {
                    selection.buffer.pop();
                }
            }
            Cmd::SaveDay => self.save_selection(),
            Cmd::Close => self.selection = None,
            Cmd::ClearDay => {
                self.store.save(&self.cursor, "");
                if self.selection.as_ref().map(|s| s.date) == Some(self.cursor) {
                    self.selection = None;
                }
            }
            Cmd::Exit => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }

    fn goto(&mut self, date: NaiveDate) {
        self.cursor = date;
        if !self.month.contains(&date) {
            self.month = MonthIndex::from(date);
        }
    }

    // Keeps the cursor's day of month, clamped to the length of `month`.
    fn set_month(&mut self, month: MonthIndex) {
        self.month = month;
        let day = self.cursor.day().min(month.num_days());
        if let Some(cursor) = month.day(day) {
            self.cursor = cursor;
        }
    }

    fn select(&mut self, date: NaiveDate) {
        self.goto(date);
        self.selection = Some(Selection {
            date,
            buffer: self.store.get(&date).to_text(),
        });
    }

    fn save_selection(&mut self) {
        let selection = match self.selection.take() {
            Some(selection) => selection,
            None => {
                log::debug!("Nothing selected to save");
                return;
            }
        };

        let saved = self.store.save(&selection.date, &selection.buffer);
        if !saved.is_empty() {
            self.selection = Some(Selection {
                date: selection.date,
                buffer: saved.to_text(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn controller() -> Controller {
        Controller::new(date(2024, 3, 15), ActivityStore::new(), None)
    }

    fn type_text(ctrl: &mut Controller, text: &str) {
        for c in text.chars() {
            ctrl.handle(Cmd::InsertChar(c));
        }
    }

    #[test]
    fn starts_on_today() {
        let ctrl = controller();
        assert_eq!(ctrl.month().first_day(), date(2024, 3, 1));
        assert_eq!(ctrl.cursor(), &date(2024, 3, 15));
        assert!(ctrl.selection().is_none());
        assert!(ctrl.backend().is_none());
    }

    #[test]
    fn month_navigation_rolls_over_years() {
        let mut ctrl = controller();

        ctrl.handle(Cmd::ShiftMonth(-3));
        assert_eq!(ctrl.month().first_day(), date(2023, 12, 1));
        assert_eq!(ctrl.cursor(), &date(2023, 12, 15));

        ctrl.handle(Cmd::ShiftMonth(13));
        assert_eq!(ctrl.month().first_day(), date(2025, 1, 1));
    }

    #[test]
    fn month_change_clamps_cursor_day() {
        let mut ctrl = controller().with_cursor(date(2024, 1, 31));

        ctrl.handle(Cmd::ShiftMonth(1));
        assert_eq!(ctrl.cursor(), &date(2024, 2, 29));
    }

    #[test]
    fn cursor_drags_month_along() {
        let mut ctrl = controller().with_cursor(date(2024, 3, 31));

        ctrl.handle(Cmd::MoveCursor(1));
        assert_eq!(ctrl.cursor(), &date(2024, 4, 1));
        assert_eq!(ctrl.month().first_day(), date(2024, 4, 1));

        ctrl.handle(Cmd::MoveCursor(-7));
        assert_eq!(ctrl.month().first_day(), date(2024, 3, 1));

        ctrl.handle(Cmd::Today);
        assert_eq!(ctrl.cursor(), &date(2024, 3, 15));
    }

    #[test]
    fn huge_cursor_steps_are_ignored() {
        let mut ctrl = controller();

        for days in &[1_000_000_000_000_000, MAX_CURSOR_STEP, i64::MAX, i64::MIN] {
            assert_eq!(ctrl.handle(Cmd::MoveCursor(*days)), ControlFlow::Continue(()));
            assert_eq!(ctrl.cursor(), &date(2024, 3, 15));
            assert_eq!(ctrl.month().first_day(), date(2024, 3, 1));
        }
    }

    #[test]
    fn select_seeds_buffer_from_store() {
        let mut ctrl = controller();
        let day = date(2024, 3, 15);

        ctrl.handle(Cmd::SelectDay(day));
        type_text(&mut ctrl, "Yoga\n\n  Team sync  \n");
        ctrl.handle(Cmd::SaveDay);
        ctrl.handle(Cmd::Close);

        ctrl.handle(Cmd::SelectDay(day));
        assert_eq!(ctrl.selection().unwrap().buffer(), "Yoga\nTeam sync");
    }

    #[test]
    fn save_keeps_surface_open_with_normalized_text() {
        let mut ctrl = controller();
        let day = date(2024, 3, 15);

        ctrl.handle(Cmd::SelectCursor);
        type_text(&mut ctrl, " Yoga \n\nTeam sync\n");
        ctrl.handle(Cmd::SaveDay);

        let selection = ctrl.selection().unwrap();
        assert_eq!(selection.date(), &day);
        assert_eq!(selection.buffer(), "Yoga\nTeam sync");
        assert!(ctrl.store().has_activities(&day));
    }

    #[test]
    fn saving_blank_text_clears_day_and_closes() {
        let mut ctrl = controller();
        let day = date(2024, 3, 15);

        ctrl.handle(Cmd::SelectDay(day));
        type_text(&mut ctrl, "Yoga");
        ctrl.handle(Cmd::SaveDay);

        for _ in 0.."Yoga".len() {
            ctrl.handle(Cmd::DeleteBackwards);
        }
        type_text(&mut ctrl, "   \n");
        ctrl.handle(Cmd::SaveDay);

        assert!(ctrl.selection().is_none());
        assert!(!ctrl.store().has_activities(&day));
    }

    #[test]
    fn close_discards_unsaved_edits() {
        let mut ctrl = controller();
        let day = date(2024, 3, 15);

        ctrl.handle(Cmd::SelectDay(day));
        type_text(&mut ctrl, "Yoga");
        ctrl.handle(Cmd::Close);

        assert!(ctrl.selection().is_none());
        assert!(ctrl.store().get(&day).is_empty());
    }

    #[test]
    fn save_without_selection_is_a_noop() {
        let mut ctrl = controller();

        assert_eq!(ctrl.handle(Cmd::SaveDay), ControlFlow::Continue(()));
        assert!(ctrl.store().is_empty());
    }

    #[test]
    fn clear_day_removes_activities_under_cursor() {
        let mut ctrl = controller();

        ctrl.handle(Cmd::SelectCursor);
        type_text(&mut ctrl, "Yoga");
        ctrl.handle(Cmd::SaveDay);
        ctrl.handle(Cmd::ClearDay);

        assert!(ctrl.selection().is_none());
        assert!(ctrl.store().is_empty());
    }

    #[test]
    fn exit_breaks() {
        assert_eq!(controller().handle(Cmd::Exit), ControlFlow::Break(()));
    }
}
