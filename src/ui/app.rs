use std::convert::TryFrom;
use std::ops::ControlFlow;

use crate::cmds::Cmd;
use crate::control::Controller;
use crate::events::{Dispatcher, Event};

use super::{
    ActivityWindow, ActivityWindowBehaviour, CalendarWindow, CommandParser, Context,
    InsertBehaviour, Mode, Theme,
};

use unsegen::base::{GraphemeCluster, Terminal};
use unsegen::input::{
    EditBehavior, Input, Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior,
};
use unsegen::widget::*;

pub struct App {
    context: Context,
}

impl App {
    pub fn new(controller: Controller, theme: Theme) -> App {
        App {
            context: Context::new(controller, theme),
        }
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let spacer = " ".with_demand(|_| Demand2D {
            width: ColDemand::exact(1),
            height: RowDemand::exact(1),
        });

        let mut layout = HLayout::new()
            .separator(GraphemeCluster::try_from(' ').unwrap())
            .widget(spacer);

        if self.context.mode == Mode::Command {
            layout = layout.widget(self.context.command_line.as_widget());
        } else if let Some(message) = &self.context.last_error_message {
            layout = layout.widget(message.as_str());
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w {
        VLayout::new()
            .widget(
                HLayout::new()
                    .separator(GraphemeCluster::try_from('│').unwrap())
                    .widget(CalendarWindow::new(&self.context))
                    .widget(ActivityWindow::new(&self.context)),
            )
            .widget(self.bottom_bar())
    }

    fn handle_input(&mut self, input: Input) -> ControlFlow<()> {
        if input.matches(Key::Esc) {
            self.context.cancel();
            return ControlFlow::Continue(());
        }

        match self.context.mode {
            Mode::Normal => {
                let num_activities = self
                    .context
                    .controller()
                    .store()
                    .get(self.context.controller().cursor())
                    .len();

                let leftover = input
                    .chain((Key::Char('q'), || {
                        self.context.handle(Cmd::Exit);
                    }))
                    .chain((Key::Char(':'), || self.context.mode = Mode::Command))
                    .chain((Key::Char('i'), || {
                        self.context.handle(Cmd::SelectCursor);
                    }))
                    .chain((Key::Char('\n'), || {
                        self.context.handle(Cmd::SelectCursor);
                    }))
                    .chain((Key::Char('x'), || {
                        self.context.handle(Cmd::ClearDay);
                    }))
                    .chain((Key::Char('t'), || {
                        self.context.handle(Cmd::Today);
                    }))
                    .chain((Key::Char('L'), || {
                        self.context.handle(Cmd::ShiftMonth(1));
                    }))
                    .chain((Key::Char('>'), || {
                        self.context.handle(Cmd::ShiftMonth(1));
                    }))
                    .chain((Key::Char('H'), || {
                        self.context.handle(Cmd::ShiftMonth(-1));
                    }))
                    .chain((Key::Char('<'), || {
                        self.context.handle(Cmd::ShiftMonth(-1));
                    }))
                    .chain(
                        NavigateBehavior::new(&mut CursorBehaviour(&mut self.context))
                            .down_on(Key::Char('j'))
                            .up_on(Key::Char('k'))
                            .left_on(Key::Char('h'))
                            .right_on(Key::Char('l')),
                    )
                    .chain(
                        ScrollBehavior::new(&mut ActivityWindowBehaviour(
                            &mut self.context,
                            num_activities,
                        ))
                        .forwards_on(Key::Char(']'))
                        .backwards_on(Key::Char('[')),
                    )
                    .finish();

                if let Some(input) = leftover {
                    log::trace!("Unhandled input {:?}", input.event);
                }
            }
            Mode::Insert => {
                input.chain(InsertBehaviour::new(&mut self.context)).finish();
            }
            Mode::Command => {
                input
                    .chain(CommandParser::new(&mut self.context))
                    .chain(
                        EditBehavior::new(&mut self.context.command_line)
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(&mut self.context.command_line)
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .finish();
            }
        }

        if self.context.should_quit() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        while run {
            // Handle events
            if let Ok(event) = dispatcher.next() {
                match event {
                    Event::Update => self.context.update(),
                    Event::Input(input) => {
                        if let ControlFlow::Break(()) = self.handle_input(input) {
                            run = false;
                        }
                    }
                }
            } else {
                log::error!("Event dispatcher disconnected");
                run = false;
            }

            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();
        }

        Ok(())
    }
}

struct CursorBehaviour<'a>(&'a mut Context);

impl CursorBehaviour<'_> {
    fn move_cursor(&mut self, days: i64) -> OperationResult {
        match self.0.handle(Cmd::MoveCursor(days)) {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(()) => Err(()),
        }
    }
}

impl Navigatable for CursorBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        self.move_cursor(7)
    }

    fn move_left(&mut self) -> OperationResult {
        self.move_cursor(-1)
    }

    fn move_right(&mut self) -> OperationResult {
        self.move_cursor(1)
    }

    fn move_up(&mut self) -> OperationResult {
        self.move_cursor(-7)
    }
}
