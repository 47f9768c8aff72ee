pub mod activity_window;
pub mod app;
pub mod calendar_window;
pub mod command;
pub mod context;
pub mod insert;

pub use activity_window::{ActivityWindow, ActivityWindowBehaviour};
pub use calendar_window::{CalendarWindow, MonthText};
pub use command::CommandParser;
pub use context::{Context, Mode, Theme};
pub use insert::InsertBehaviour;
