use anyhow::{Context, Result};
use clap::Parser;
use spyglass::index::build_index;
use spyglass::launcher::SystemLauncher;
use spyglass::line::LineIO;
use spyglass::session::{self, Session};
use spyglass::utils::{init_logging, AppConfig, InteractionMode};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use termcolor::{ColorChoice, StandardStream};

#[derive(Parser)]
#[command(name = "spyglass")]
#[command(about = "Index a directory tree and find files by name as you type")]
struct Cli {
    /// Directory to index (defaults to the current directory)
    root: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let root = match resolve_root(cli.root) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("spyglass: {:#}", e);
            return ExitCode::from(1);
        }
    };

    match run(&root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("spyglass: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// The given root, or the working directory, as an absolute path. Must be
/// an existing directory.
fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().context("Could not determine the current directory")?,
    };
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }
    std::path::absolute(&root).with_context(|| format!("Could not resolve {}", root.display()))
}

fn run(root: &Path) -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("spyglass: {:#}, using defaults", e);
        AppConfig::default()
    });

    // Logging is best effort; the finder works without it
    if let Err(e) = init_logging() {
        eprintln!("spyglass: logging disabled: {:#}", e);
    }

    let (mut index, stats) = build_index(root, &config.index_options());
    tracing::info!(
        files = stats.indexed,
        skipped = stats.skipped,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "index ready"
    );

    let mut launcher = SystemLauncher;
    let result = {
        let mut session = Session::new(&index, config.session_options());
        match select_mode(config.interaction) {
            InteractionMode::Raw => run_raw(&mut session, &mut launcher, config.viewport_height()),
            _ => run_line(&mut session, &mut launcher, config.color),
        }
    };

    index.clear();
    result
}

/// Resolve `Auto` against the actual stdin and stdout
fn select_mode(configured: InteractionMode) -> InteractionMode {
    let mode = match configured {
        InteractionMode::Auto if io::stdin().is_terminal() && io::stdout().is_terminal() => {
            InteractionMode::Raw
        }
        InteractionMode::Auto => InteractionMode::Line,
        mode => mode,
    };

    if mode == InteractionMode::Raw && !cfg!(feature = "interactive") {
        tracing::warn!("built without the interactive feature, using line mode");
        return InteractionMode::Line;
    }
    mode
}

#[cfg(feature = "interactive")]
fn run_raw(session: &mut Session<'_>, launcher: &mut SystemLauncher, viewport_height: usize) -> Result<()> {
    spyglass::tui::run(session, launcher, viewport_height)
}

#[cfg(not(feature = "interactive"))]
fn run_raw(session: &mut Session<'_>, launcher: &mut SystemLauncher, _viewport_height: usize) -> Result<()> {
    run_line(session, launcher, true)
}

fn run_line(session: &mut Session<'_>, launcher: &mut SystemLauncher, color: bool) -> Result<()> {
    let choice = if color && io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let stdin = io::stdin();
    let mut io = LineIO::new(stdin.lock(), StandardStream::stdout(choice));
    io.print_banner()?;
    session::run(session, &mut io, launcher)
}
