extern crate calendario as lib;

use chrono::{Local, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::backend::ClientHandle;
use lib::control::Controller;
use lib::events::Dispatcher;
use lib::store::ActivityStore;
use lib::ui::{app::App, MonthText, Theme};
use nix::sys::{signal, termios};
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "calendario",
    about = "Calendario - a month calendar with daily activity notes."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the month non-interactively"
    )]
    pub show: bool,

    #[structopt(
        short = "d",
        long = "date",
        help = "initially selected day (YYYY-MM-DD)",
        parse(try_from_str = lib::provider::parse_date)
    )]
    pub date: Option<NaiveDate>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let backend = ClientHandle::from_settings(&config.backend);
    let theme = Theme::from(&config.theme);

    let today = Local::now().date_naive();
    let controller = Controller::new(today, ActivityStore::new(), backend)
        .with_cursor(args.date.unwrap_or(today));

    if args.show {
        print!("{}", MonthText::new(&controller, &theme));
        return Ok(());
    }

    const STDOUT: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDOUT)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDOUT, termios::SetArg::TCSANOW, &attr);
        }

        println!("Calendario ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let mut signals_to_wait = signal::SigSet::empty();
    signals_to_wait.add(signal::SIGWINCH);

    let dispatcher = Dispatcher::from_config(&config, signals_to_wait);

    // Setup unsegen terminal
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    let mut app = App::new(controller, theme);

    app.run(dispatcher, term)
}
