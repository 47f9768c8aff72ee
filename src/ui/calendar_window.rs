use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use std::fmt::{self, Display, Write};
use unsegen::base::*;
use unsegen::widget::*;

use crate::control::Controller;
use crate::locale::{month_label, WEEKDAY_HEADER};
use crate::provider::{GridCell, MonthGrid, DAYS_PER_WEEK};

use super::{Context, Theme};

pub struct DayCell<'a> {
    cell: GridCell,
    selected: bool,
    is_today: bool,
    has_activities: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    const CELL_HEIGHT: usize = 1;
    const CELL_WIDTH: usize = 5;

    fn new(cell: GridCell, theme: &'a Theme) -> Self {
        DayCell {
            cell,
            selected: false,
            is_today: false,
            has_activities: false,
            theme,
        }
    }

    fn select(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }

    fn activities(mut self, has_activities: bool) -> Self {
        self.has_activities = has_activities;
        self
    }

    fn style(&self) -> StyleModifier {
        let style = if self.selected {
            self.theme.focus_day_style
        } else if self.is_today {
            self.theme.today_day_style
        } else if self.has_activities {
            self.theme.activity_day_style
        } else {
            self.theme.day_style
        };
        style.format(self.theme.day_text_style)
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = match self.cell {
            GridCell::Blank => return write!(f, "{:width$}", "", width = Self::CELL_WIDTH),
            GridCell::Day(date) => date,
        };

        let arg_today = if self.is_today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_focus = if self.selected {
            self.theme.focus_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_activity = if self.has_activities {
            self.theme.activity_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, "{}{}{:>2}{}", arg_today, arg_focus, date.day(), arg_activity)
    }
}

fn day_cell<'t>(cell: GridCell, controller: &Controller, theme: &'t Theme) -> DayCell<'t> {
    let date = cell.date().copied();
    let is = |other: &NaiveDate| date.as_ref() == Some(other);

    DayCell::new(cell, theme)
        .select(is(controller.cursor()))
        .today(is(controller.today()))
        .activities(date.map_or(false, |d| controller.store().has_activities(&d)))
}

/// The displayed month: a label, the weekday header and one row per week.
pub struct CalendarWindow<'a> {
    context: &'a Context,
    grid: MonthGrid,
}

impl<'a> CalendarWindow<'a> {
    const HEADER_ROWS: usize = 2;

    pub fn new(context: &'a Context) -> Self {
        CalendarWindow {
            context,
            grid: context.controller().grid(),
        }
    }
}

impl Widget for CalendarWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(DAYS_PER_WEEK * DayCell::CELL_WIDTH),
            height: RowDemand::exact(
                Self::HEADER_ROWS + self.grid.num_weeks() * DayCell::CELL_HEIGHT,
            ),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let controller = self.context.controller();
        let header_style = theme
            .month_header_style
            .format(theme.month_header_text_style);

        let mut cursor = Cursor::new(&mut window)
            .wrapping_mode(WrappingMode::Wrap)
            .style_modifier(header_style);

        if let Err(err) = writeln!(&mut cursor, "{}", month_label(self.grid.month())) {
            log::warn!("Error while writing month label: {}", err);
        }

        for &head in WEEKDAY_HEADER.iter() {
            if let Err(err) = write!(&mut cursor, "{:>width$} ", head, width = DayCell::CELL_WIDTH - 1)
            {
                log::warn!("Error while writing weekday header: {}", err);
            }
        }
        cursor.fill_and_wrap_line();

        for week in self.grid.weeks() {
            for &cell in week {
                let day = day_cell(cell, controller, theme);
                cursor.set_style_modifier(day.style());
                if let Err(err) = write!(&mut cursor, "{}", day) {
                    log::warn!("Error while writing day: {}", err);
                }
            }
            cursor.set_style_modifier(StyleModifier::new());
            cursor.fill_and_wrap_line();
        }
    }
}

/// Plain-text rendering of the displayed month for non-interactive output.
pub struct MonthText<'a> {
    controller: &'a Controller,
    theme: &'a Theme,
}

impl<'a> MonthText<'a> {
    pub fn new(controller: &'a Controller, theme: &'a Theme) -> Self {
        MonthText { controller, theme }
    }
}

impl Display for MonthText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.controller.grid();

        writeln!(f, "{}", month_label(grid.month()))?;
        for head in WEEKDAY_HEADER.iter() {
            write!(f, "{:>width$} ", head, width = DayCell::CELL_WIDTH - 1)?;
        }
        writeln!(f)?;

        for week in grid.weeks() {
            for &cell in week {
                write!(f, "{}", day_cell(cell, self.controller, self.theme))?;
            }
            writeln!(f)?;
        }

        for (day, activities) in self.controller.store().activities_in(grid.month()) {
            writeln!(f, "{:>2}: {}", day.day(), activities.iter().join(", "))?;
        }

        Ok(())
    }
}
