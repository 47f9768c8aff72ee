use std::convert::TryFrom;
use std::result::Result;
use unsegen::input::*;

use nom::{
    bytes::complete::take_till1,
    character::complete::{digit1, space1},
    combinator::{all_consuming, opt, rest},
    error::{Error, ErrorKind, ParseError},
    sequence::{pair, separated_pair},
    Err, IResult,
};

use super::context::{Context, Mode};
use crate::cmds::Cmd;
use crate::provider::{parse_date, MonthIndex};

pub type ActionResult = Result<Cmd, Error<String>>;

pub enum Action {
    Arg(fn(&str) -> ActionResult),
    NoArg(Cmd),
    /// Takes the repeat count, `None` if the count is out of range.
    Repeatable(fn(i64) -> Option<Cmd>),
}

const COMMANDS: &[(&str, Action)] = &[
    (
        "nm",
        Action::Repeatable(|n| i32::try_from(n).ok().map(Cmd::ShiftMonth)),
    ),
    (
        "pm",
        Action::Repeatable(|n| i32::try_from(n).ok().map(|n| Cmd::ShiftMonth(-n))),
    ),
    ("gd", Action::Repeatable(|n| Some(Cmd::MoveCursor(n)))),
    ("gD", Action::Repeatable(|n| Some(Cmd::MoveCursor(-n)))),
    (
        "gw",
        Action::Repeatable(|n| n.checked_mul(7).map(Cmd::MoveCursor)),
    ),
    (
        "gW",
        Action::Repeatable(|n| n.checked_mul(-7).map(Cmd::MoveCursor)),
    ),
    ("today", Action::NoArg(Cmd::Today)),
    ("edit", Action::NoArg(Cmd::SelectCursor)),
    ("clear", Action::NoArg(Cmd::ClearDay)),
    ("q", Action::NoArg(Cmd::Exit)),
    ("quit", Action::NoArg(Cmd::Exit)),
    (
        "goto",
        Action::Arg(|arg| {
            parse_date(arg)
                .map(Cmd::GotoDate)
                .map_err(|_| Error::new(arg.to_owned(), ErrorKind::Verify))
        }),
    ),
    (
        "month",
        Action::Arg(|arg| {
            arg.parse::<MonthIndex>()
                .map(Cmd::SetMonth)
                .map_err(|_| Error::new(arg.to_owned(), ErrorKind::Verify))
        }),
    ),
];

fn match_action(input: &str) -> IResult<&str, &'static Action> {
    if let Some((_, act)) = COMMANDS.iter().find(|(name, _)| *name == input) {
        Ok(("", act))
    } else {
        Err(Err::Failure(ParseError::from_error_kind(
            input,
            ErrorKind::Tag,
        )))
    }
}

fn unknown(cmd: &str) -> Error<String> {
    ParseError::from_error_kind(cmd.to_owned(), ErrorKind::Tag)
}

/// Parses a command line such as `3nm`, `today` or `goto 2024-03-15`.
pub fn parse_command(cmd: &str) -> ActionResult {
    let cmd = cmd.trim();

    let with_arg: IResult<&str, (&str, &str)> = all_consuming(separated_pair(
        take_till1(|c: char| c.is_whitespace()),
        space1,
        rest,
    ))(cmd);

    if let Ok((_, (name, arg))) = with_arg {
        return match match_action(name) {
            Ok((_, Action::Arg(a))) => a(arg.trim()),
            _ => Err(unknown(cmd)),
        };
    }

    let (_, (repeat, act)) =
        all_consuming(pair(opt(digit1), match_action))(cmd).map_err(|_| unknown(cmd))?;

    match (act, repeat) {
        (Action::Repeatable(a), None) => a(1).ok_or_else(|| unknown(cmd)),
        (Action::Repeatable(a), Some(repeat)) => repeat
            .parse::<i64>()
            .ok()
            .and_then(a)
            .ok_or_else(|| ParseError::from_error_kind(repeat.to_owned(), ErrorKind::Digit)),
        (Action::NoArg(c), None) => Ok(*c),
        _ => Err(unknown(cmd)),
    }
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> Result<(), Error<String>> {
        let cmd = parse_command(cmd)?;
        log::debug!("Running command {:?}", cmd);
        self.context.handle(cmd);
        Ok(())
    }

    fn report_error(&mut self, error: Error<String>) {
        self.context
            .report_error(format!("Invalid command: {}", error.input));
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            match key {
                Key::Char('\n') => {
                    let cmd = self.context.command_line.finish_line().to_owned();
                    if let Err(e) = self.run_command(&cmd) {
                        self.report_error(e);
                    } else {
                        self.context.last_error_message = None;
                        if self.context.mode == Mode::Command {
                            self.context.mode = Mode::Normal;
                        }
                    }
                    None
                }
                _ => Some(input),
            }
        } else {
            Some(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn repeatable_commands() {
        assert_eq!(parse_command("nm").unwrap(), Cmd::ShiftMonth(1));
        assert_eq!(parse_command("3nm").unwrap(), Cmd::ShiftMonth(3));
        assert_eq!(parse_command("2pm").unwrap(), Cmd::ShiftMonth(-2));
        assert_eq!(parse_command("gD").unwrap(), Cmd::MoveCursor(-1));
        assert_eq!(parse_command("2gw").unwrap(), Cmd::MoveCursor(14));
    }

    #[test]
    fn oversized_repeat_counts_are_rejected() {
        assert_eq!(
            parse_command("2000000000000000000gw").unwrap_err().input,
            "2000000000000000000"
        );
        assert!(parse_command("2000000000000000000gW").is_err());
        assert!(parse_command("4294967297nm").is_err());
        assert!(parse_command("2147483648pm").is_err());
        assert!(parse_command("99999999999999999999gd").is_err());

        assert_eq!(
            parse_command("2147483647nm").unwrap(),
            Cmd::ShiftMonth(i32::MAX)
        );
        assert_eq!(
            parse_command("1000000000000000gd").unwrap(),
            Cmd::MoveCursor(1_000_000_000_000_000)
        );
    }

    #[test]
    fn plain_commands() {
        assert_eq!(parse_command("today").unwrap(), Cmd::Today);
        assert_eq!(parse_command(" clear ").unwrap(), Cmd::ClearDay);
        assert_eq!(parse_command("q").unwrap(), Cmd::Exit);
        assert!(parse_command("3today").is_err());
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(
            parse_command("goto 2024-03-15").unwrap(),
            Cmd::GotoDate(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        assert_eq!(
            parse_command("month 2023-12").unwrap(),
            Cmd::SetMonth("2023-12".parse().unwrap())
        );
        assert!(parse_command("goto 2024-02-30").is_err());
        assert!(parse_command("today 2024-02-01").is_err());
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert!(parse_command("").is_err());
        assert!(parse_command("frobnicate").is_err());
        assert_eq!(parse_command("xx").unwrap_err().input, "xx");
    }
}
