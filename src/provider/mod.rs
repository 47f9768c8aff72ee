pub mod datetime;
pub mod error;
pub mod grid;

pub use datetime::{days_of_month, parse_date, DateKey, MonthIndex};
pub use error::{Error, ErrorKind, Result};
pub use grid::{GridCell, MonthGrid, DAYS_PER_WEEK};
