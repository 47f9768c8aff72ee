use std::fmt::{self, Write};
use unsegen::base::*;
use unsegen::input::Scrollable;
use unsegen::widget::*;

use crate::locale::long_date;
use crate::ui::Context;

const EDIT_HINT: &str = "Una actividad por línea. Ctrl-S guarda, Esc cancela.";
const EMPTY_HINT: &str = "Sin actividades. Pulsa 'i' para agregar.";
const BUFFER_CURSOR: char = '█';

/// Activities of the day under the cursor, or the edit surface when a day
/// is selected.
pub struct ActivityWindow<'a> {
    context: &'a Context,
}

impl<'a> ActivityWindow<'a> {
    pub fn new(context: &'a Context) -> Self {
        ActivityWindow { context }
    }

    fn draw_list(&self, cursor: &mut Cursor) -> fmt::Result {
        let controller = self.context.controller();
        let day = controller.cursor();
        let activities = controller.store().get(day);

        let saved_style = cursor.get_style_modifier();
        cursor.apply_style_modifier(self.context.theme.month_header_style);
        writeln!(cursor, "{}", long_date(day))?;
        cursor.set_style_modifier(saved_style);

        if activities.is_empty() {
            return writeln!(cursor, "{}", EMPTY_HINT);
        }

        for (idx, activity) in activities.iter().enumerate() {
            let saved_style = cursor.get_style_modifier();

            if idx == self.context.activity_index {
                cursor.apply_style_modifier(StyleModifier::new().invert(true));
            }

            write!(cursor, " • {}", activity)?;

            cursor.fill_and_wrap_line();
            cursor.set_style_modifier(saved_style);
        }

        Ok(())
    }

    fn draw_editor(&self, cursor: &mut Cursor) -> fmt::Result {
        let selection = match self.context.controller().selection() {
            Some(selection) => selection,
            None => return Ok(()),
        };

        let saved_style = cursor.get_style_modifier();
        cursor.apply_style_modifier(self.context.theme.month_header_style);
        writeln!(cursor, "Actividades para el {}", long_date(selection.date()))?;
        cursor.set_style_modifier(saved_style);
        writeln!(cursor, "{}", EDIT_HINT)?;
        cursor.fill_and_wrap_line();

        write!(cursor, "{}{}", selection.buffer(), BUFFER_CURSOR)
    }
}

impl Widget for ActivityWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(20),
            height: RowDemand::at_least(10),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window).wrapping_mode(WrappingMode::Wrap);

        let result = if self.context.controller().selection().is_some() {
            self.draw_editor(&mut cursor)
        } else {
            self.draw_list(&mut cursor)
        };

        if let Err(err) = result {
            log::warn!("Error while writing activities: {}", err);
        }
    }
}

/// Moves the highlighted activity of the day under the cursor.
pub struct ActivityWindowBehaviour<'a>(pub &'a mut Context, pub usize);

impl Scrollable for ActivityWindowBehaviour<'_> {
    fn scroll_backwards(&mut self) -> unsegen::input::OperationResult {
        if self.0.activity_index > 0 {
            self.0.activity_index -= 1;
            Ok(())
        } else {
            Err(())
        }
    }

    fn scroll_forwards(&mut self) -> unsegen::input::OperationResult {
        if self.0.activity_index + 1 < self.1 {
            self.0.activity_index += 1;
            Ok(())
        } else {
            Err(())
        }
    }
}
