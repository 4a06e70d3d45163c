//! Calcdesk — a keyboard-driven calculator with persistent history.
//!
//! With key arguments, feeds them through the key map and prints the final
//! display. Without, runs an interactive console session on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::error;

use calcdesk::app::{App, AppOptions};
use calcdesk::logging;
use calcdesk::managers::key_map::{KeyMapTrait, Modifiers};
use calcdesk::types::settings::StorageBackend;
use calcdesk::ui::display::RecordingDisplay;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Sqlite,
    File,
    Memory,
}

impl From<Backend> for StorageBackend {
    fn from(b: Backend) -> Self {
        match b {
            Backend::Sqlite => StorageBackend::Sqlite,
            Backend::File => StorageBackend::File,
            Backend::Memory => StorageBackend::Memory,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "calcdesk", version, about = "Arithmetic calculator with persistent history")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<String>,

    /// History storage backend (overrides the settings file)
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Directory holding the history database or store file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keys to type, e.g. `2+3=`; each character is one key press
    keys: Vec<String>,
}

/// Maps a console character to a key name. `=` stands in for Enter.
fn key_name(c: char) -> String {
    match c {
        '=' => "Enter".to_string(),
        other => other.to_string(),
    }
}

fn type_keys(app: &mut App, text: &str) {
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        if let Some(event) = app.key_map.translate(&key_name(c), Modifiers::NONE) {
            app.calculator.handle_event(event);
        }
    }
}

fn print_display(out: &mut impl Write, display: &RecordingDisplay) -> io::Result<()> {
    let state = display.state();
    if state.result.is_empty() {
        writeln!(out, "{}", state.expression)
    } else {
        writeln!(out, "{}\n= {}", state.expression, state.result)
    }
}

fn print_history(out: &mut impl Write, app: &App) -> io::Result<()> {
    let history = app.calculator.history();
    if history.is_empty() {
        return writeln!(out, "(no history)");
    }
    for (i, entry) in history.iter().enumerate() {
        writeln!(out, "{:>3}  {}    {}", i, entry.summary(), entry.timestamp)?;
    }
    Ok(())
}

/// Runs one console command. Returns `false` when the session should end.
fn run_command(out: &mut impl Write, app: &mut App, display: &RecordingDisplay, line: &str) -> io::Result<bool> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some(":quit") | Some(":q") => return Ok(false),
        Some(":history") => print_history(out, app)?,
        Some(":clear-history") => {
            app.calculator.clear_history();
            writeln!(out, "history cleared")?;
        }
        Some(":select") => match words.next().and_then(|w| w.parse::<usize>().ok()) {
            Some(index) => {
                if app.calculator.select_history(index) {
                    print_display(out, display)?;
                } else {
                    writeln!(out, "no history entry {}", index)?;
                }
            }
            None => writeln!(out, "usage: :select N")?,
        },
        _ => writeln!(out, "commands: :history, :select N, :clear-history, :quit")?,
    }
    Ok(true)
}

fn interactive(app: &mut App, display: &RecordingDisplay) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "calcdesk {} — type keys, '=' to evaluate, :quit to exit", env!("CARGO_PKG_VERSION"))?;
    print_display(&mut out, display)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.starts_with(':') {
            if !run_command(&mut out, app, display, trimmed)? {
                break;
            }
            continue;
        }
        type_keys(app, trimmed);
        print_display(&mut out, display)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(&logging::configured_level(cli.config.clone()));

    let display = RecordingDisplay::new();
    let options = AppOptions {
        config_path: cli.config.clone(),
        backend: cli.backend.map(StorageBackend::from),
        data_dir: cli.data_dir.clone(),
    };

    let mut app = match App::with_display(options, Box::new(display.clone())) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to initialize calcdesk");
            std::process::exit(1);
        }
    };

    let result = if cli.keys.is_empty() {
        interactive(&mut app, &display)
    } else {
        for keys in &cli.keys {
            type_keys(&mut app, keys);
        }
        print_display(&mut io::stdout().lock(), &display)
    };

    if let Err(e) = result {
        error!(error = %e, "console i/o failed");
        std::process::exit(1);
    }
}
