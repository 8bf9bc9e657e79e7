mod app;
mod audio;
mod config;
mod game;
mod keyboard;
mod logging;
mod ui;

use anyhow::Context;
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use tracing::{info, warn};

/// Command line options
#[derive(Debug, Default)]
struct Options {
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    logging::init(options.debug)?;
    let config = config::load_config();

    let (mut terminal, releases_reported) = setup_terminal()?;

    // Run game
    let result = app::run(&mut terminal, &config, releases_reported);

    restore_terminal(terminal.backend_mut(), releases_reported)?;
    info!("session ended");
    result
}

/// Raw mode, alternate screen, title, and release reporting where the
/// terminal supports it. Anything that fails after raw mode is on is undone
/// before the error is returned.
fn setup_terminal() -> anyhow::Result<(Terminal<CrosstermBackend<Stdout>>, bool)> {
    enable_raw_mode().context("failed to enable raw mode")?;

    let mut stdout = io::stdout();
    let releases_reported = supports_keyboard_enhancement().unwrap_or(false);
    let entered = enter_screen(&mut stdout, releases_reported)
        .context("failed to set up terminal screen")
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
        });

    match entered {
        Ok(terminal) => Ok((terminal, releases_reported)),
        Err(e) => {
            if let Err(restore) = restore_terminal(&mut io::stdout(), releases_reported) {
                warn!(error = %restore, "failed to restore terminal");
            }
            Err(e)
        }
    }
}

fn enter_screen<W: Write>(out: &mut W, releases_reported: bool) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, SetTitle("Ping Pong"))?;
    // Key release events let held paddle keys stop exactly on release
    if releases_reported {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    Ok(())
}

fn restore_terminal<W: Write>(out: &mut W, releases_reported: bool) -> anyhow::Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    leave_screen(out, releases_reported)?;
    Ok(())
}

fn leave_screen<W: Write>(out: &mut W, releases_reported: bool) -> io::Result<()> {
    if releases_reported {
        if let Err(e) = execute!(out, PopKeyboardEnhancementFlags) {
            warn!(error = %e, "failed to pop keyboard enhancement flags");
        }
    }
    execute!(out, LeaveAlternateScreen, Show)
}

/// Parse command line arguments
fn parse_args(args: &[String]) -> Options {
    let program = args.first().map(String::as_str).unwrap_or("pingpong");
    let mut options = Options::default();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--debug" | "-d" => options.debug = true,
            "--help" | "-h" => {
                print_usage(program);
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage(program);
                std::process::exit(1);
            }
        }
    }

    options
}

fn print_usage(program: &str) {
    println!("Ping Pong - Terminal Pong against the computer");
    println!();
    println!("Usage:");
    println!("  {}            # Play", program);
    println!(
        "  {} --debug    # Play and log to {}",
        program,
        logging::log_path().display()
    );
    println!();
    println!("Pick a best-of-3, 5 or 7 match, then move with W/S.");
    println!(
        "Settings live in {}",
        config::loader::get_config_path().display()
    );
}
