use clap::{CommandFactory, Parser};
use log::info;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::error::Error;
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clti::core::clock::{Clock, SystemClock};
use clti::core::config::{Defaults, Overrides};
use clti::core::duration::default_parser;
use clti::core::exit::{self, EXIT_FAILURE, Exit};
use clti::core::session;
use clti::core::state::{Countdown, Outcome};
use clti::handoff;
use clti::tui::banner::select_renderer;
use clti::tui::event::KeyPoller;
use clti::tui::{self, TerminalScreen};

#[derive(Parser)]
#[command(
    name = "clti",
    about = "The command line timer",
    after_help = "Press 'p' to pause, 'r' to resume, 'q' to quit."
)]
struct Args {
    /// Set config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Set figlet font
    #[arg(short, long, value_name = "FONT")]
    font: Option<String>,

    /// Set figlet font directory
    #[arg(short = 'd', long, value_name = "DIR")]
    font_directory: Option<String>,

    /// Set command to execute after finishing uninterrupted
    #[arg(short = 'x', long, value_name = "COMMAND")]
    execute: Option<String>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    /// Minutes, or a duration such as "1 h 30 m", "90s", "1:30:00"
    #[arg(value_name = "TIME", allow_negative_numbers = true)]
    time: Vec<String>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and friends are not failures; keep 2 for "user quit".
            return if e.use_stderr() {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if args.time.is_empty() {
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("clti: {e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// File logger under the cache directory; the terminal belongs to the countdown.
fn init_logging(verbose: bool) {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("clti")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Ok(log_file) = File::create(dir.join("clti.log")) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn run(args: Args) -> Result<ExitCode, Box<dyn Error>> {
    let overrides = Overrides {
        config: args.config,
        font: args.font,
        font_directory: args.font_directory,
        command: args.execute,
    };
    let defaults = Defaults::standard();
    let parser = default_parser();
    let config = session::prepare(&args.time, &overrides, &defaults, parser.as_ref())?;

    let clock = SystemClock;
    let mut keys = KeyPoller;
    let mut screen = TerminalScreen::new(select_renderer(&config.font_path))?;
    let mut countdown = Countdown::start(clock.now(), config.duration_secs, config.command);

    let outcome = tui::run(&mut countdown, &mut keys, &mut screen, &clock);
    // The terminal must be back to normal before anything else owns it.
    drop(screen);

    let outcome = outcome?;
    match outcome {
        Outcome::Aborted => info!("Countdown aborted by user"),
        Outcome::Completed => info!("Countdown completed"),
    }

    match exit::finish(outcome, countdown.post_command()) {
        Exit::Code(code) => Ok(ExitCode::from(code)),
        Exit::HandOff(command) => {
            let e = handoff::exec_command(command);
            Err(format!("cannot execute {command:?}: {e}").into())
        }
    }
}
