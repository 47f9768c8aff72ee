use chrono::{DateTime, Local};
use std::ops::ControlFlow;

use crate::cmds::Cmd;
use crate::config::ThemeConfig;
use crate::control::Controller;

use unsegen::base::style::*;
use unsegen::input::Editable;
use unsegen::widget::builtin::PromptLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub day_text_style: TextFormatModifier,
    pub focus_day_style: StyleModifier,
    pub focus_day_char: Option<char>,
    pub today_day_style: StyleModifier,
    pub today_day_char: Option<char>,
    pub activity_day_style: StyleModifier,
    pub activity_day_char: Option<char>,
    pub month_header_style: StyleModifier,
    pub month_header_text_style: TextFormatModifier,
    pub error_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from(&ThemeConfig::default())
    }
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        Theme {
            day_style: StyleModifier::default(),
            day_text_style: TextFormatModifier::default(),
            focus_day_style: StyleModifier::default().bg_color(Color::Blue),
            focus_day_char: config.focus_day_char,
            today_day_style: StyleModifier::default().invert(true),
            today_day_char: config.today_day_char,
            activity_day_style: StyleModifier::default().fg_color(Color::Green),
            activity_day_char: config.activity_day_char,
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            month_header_text_style: TextFormatModifier::default().bold(true),
            error_style: StyleModifier::default().fg_color(Color::LightRed),
        }
    }
}

pub struct Context {
    pub mode: Mode,
    pub theme: Theme,
    pub command_line: PromptLine,
    pub last_error_message: Option<String>,
    pub activity_index: usize,
    quit: bool,
    controller: Controller,
    now: DateTime<Local>,
}

impl Context {
    pub fn new(controller: Controller, theme: Theme) -> Self {
        Context {
            mode: Mode::Normal,
            theme,
            command_line: PromptLine::with_prompt(":".to_owned()),
            last_error_message: None,
            activity_index: 0,
            quit: false,
            controller,
            now: Local::now(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn now(&self) -> &DateTime<Local> {
        &self.now
    }

    pub fn update(&mut self) {
        self.now = Local::now();
        self.controller.set_today(self.now.date_naive());
    }

    /// Forwards `cmd` to the controller and keeps the mode in sync with the
    /// edit surface.
    pub fn handle(&mut self, cmd: Cmd) -> ControlFlow<()> {
        let cursor = *self.controller.cursor();
        let flow = self.controller.handle(cmd);
        if flow.is_break() {
            self.quit = true;
        }

        if *self.controller.cursor() != cursor {
            self.activity_index = 0;
        }

        match (self.mode, self.controller.selection().is_some()) {
            (Mode::Insert, false) => self.mode = Mode::Normal,
            (Mode::Normal, true) | (Mode::Command, true) => self.mode = Mode::Insert,
            _ => {}
        }

        flow
    }

    /// Returns to normal mode, dropping unsaved edits and any half typed
    /// command.
    pub fn cancel(&mut self) {
        match self.mode {
            Mode::Insert => {
                self.handle(Cmd::Close);
            }
            Mode::Command => {
                let _ = self.command_line.clear();
            }
            Mode::Normal => {}
        }
        self.mode = Mode::Normal;
    }

    pub fn report_error(&mut self, message: String) {
        log::warn!("{}", message);
        self.last_error_message = Some(message);
    }
}
