use chrono::NaiveDate;

use crate::provider::MonthIndex;

/// State transitions understood by the [`Controller`](crate::control::Controller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    Noop,
    /// Move the displayed month by a signed number of months.
    ShiftMonth(i32),
    SetMonth(MonthIndex),
    Today,
    /// Move the day cursor by a signed number of days.
    MoveCursor(i64),
    GotoDate(NaiveDate),
    /// Open the edit surface for a day, seeded with its activities.
    SelectDay(NaiveDate),
    SelectCursor,
    InsertChar(char),
    DeleteBackwards,
    SaveDay,
    /// Close the edit surface, discarding unsaved edits.
    Close,
    /// Remove all activities of the day under the cursor.
    ClearDay,
    Exit,
}

impl Default for Cmd {
    fn default() -> Self {
        Cmd::Noop
    }
}
