use unsegen::input::*;

use super::context::Context;
use crate::cmds::Cmd;

/// Key mapping of the edit surface.
pub fn insert_cmd(key: Key) -> Option<Cmd> {
    match key {
        Key::Ctrl('s') => Some(Cmd::SaveDay),
        Key::Backspace => Some(Cmd::DeleteBackwards),
        Key::Char(c) => Some(Cmd::InsertChar(c)),
        _ => None,
    }
}

pub struct InsertBehaviour<'a> {
    context: &'a mut Context,
}

impl<'a> InsertBehaviour<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        InsertBehaviour { context }
    }
}

impl Behavior for InsertBehaviour<'_> {
    fn input(self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            if let Some(cmd) = insert_cmd(key) {
                self.context.handle(cmd);
                return None;
            }
        }
        Some(input)
    }
}
