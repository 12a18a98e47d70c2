//! Interactive search session.
//!
//! A single-threaded state machine that turns input events into query edits,
//! re-runs the search on every change and hands a chosen path to a
//! [`FileLauncher`]. Terminal handling lives behind [`TerminalIO`] so the
//! same session drives both the raw-key TUI and the line-oriented mode.

use crate::index::{FileEntry, NameIndex};
use crate::query::SearchEngine;
use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// Default number of matches kept per search (one viewport)
pub const DEFAULT_MAX_RESULTS: usize = 12;

/// Default query length limit, in characters
pub const DEFAULT_MAX_QUERY_LEN: usize = 255;

/// Where the session is in its read-eval-render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Editing the query
    Typing,
    /// Waiting for a numeric choice among the current matches
    Confirming,
    Terminated,
}

/// One unit of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Append a character to the query
    Char(char),
    /// Delete the last query character
    Backspace,
    /// Enter: start choosing among the current matches
    Confirm,
    /// Escape, Ctrl+C, `exit` or end of input
    Terminate,
    /// Replace the whole query (line mode reads one query per line)
    ReplaceQuery(String),
    /// Raw text typed at the selection prompt
    Selection(String),
}

/// Opens a file with the host's default application. Fire-and-forget.
pub trait FileLauncher {
    fn open(&mut self, path: &Path);
}

/// Terminal capability used by [`run`]
pub trait TerminalIO {
    /// Draw the current session state
    fn render(&mut self, view: &View<'_>) -> Result<()>;

    /// Block until the next input for `state` is available.
    ///
    /// In [`LoopState::Confirming`] implementations read a whole line and
    /// return it as [`Input::Selection`].
    fn read_input(&mut self, state: LoopState) -> Result<Input>;
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub max_results: usize,
    pub max_query_len: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            max_query_len: DEFAULT_MAX_QUERY_LEN,
        }
    }
}

/// Snapshot of everything a renderer needs
#[derive(Debug, Clone, Copy)]
pub struct View<'s> {
    pub state: LoopState,
    pub query: &'s str,
    pub matches: &'s [&'s FileEntry],
    pub total_files: usize,
    pub elapsed: Duration,
    pub capped: bool,
}

pub struct Session<'a> {
    engine: SearchEngine<'a>,
    options: SessionOptions,
    state: LoopState,
    query: String,
    matches: Vec<&'a FileEntry>,
    elapsed: Duration,
    capped: bool,
}

impl<'a> Session<'a> {
    pub fn new(index: &'a NameIndex, options: SessionOptions) -> Self {
        Self {
            engine: SearchEngine::new(index),
            options,
            state: LoopState::Typing,
            query: String::new(),
            matches: Vec::new(),
            elapsed: Duration::ZERO,
            capped: false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[&'a FileEntry] {
        &self.matches
    }

    pub fn view(&self) -> View<'_> {
        View {
            state: self.state,
            query: &self.query,
            matches: &self.matches,
            total_files: self.engine.index().total_files(),
            elapsed: self.elapsed,
            capped: self.capped,
        }
    }

    /// Apply one input and return the resulting state
    pub fn handle(&mut self, input: Input, launcher: &mut dyn FileLauncher) -> LoopState {
        match (self.state, input) {
            (LoopState::Terminated, _) => {}
            (_, Input::Terminate) => {
                tracing::debug!("session terminated");
                self.state = LoopState::Terminated;
            }
            (LoopState::Typing, Input::Char(c)) => {
                if !c.is_control() && self.query.chars().count() < self.options.max_query_len {
                    self.query.push(c);
                    self.refresh();
                }
            }
            (LoopState::Typing, Input::Backspace) => {
                if self.query.pop().is_some() {
                    self.refresh();
                }
            }
            (LoopState::Typing, Input::ReplaceQuery(text)) => {
                let text: String = text
                    .chars()
                    .filter(|c| !c.is_control())
                    .take(self.options.max_query_len)
                    .collect();
                if text != self.query {
                    self.query = text;
                    self.refresh();
                }
            }
            (LoopState::Typing, Input::Confirm) => {
                if !self.matches.is_empty() {
                    self.state = LoopState::Confirming;
                }
            }
            (LoopState::Confirming, Input::Selection(text)) => {
                match parse_selection(&text, self.matches.len()) {
                    Some(choice) => {
                        let entry: &'a FileEntry = self.matches[choice - 1];
                        let path = entry.full_path();
                        tracing::info!(path = %path.display(), "opening");
                        launcher.open(path);
                    }
                    None => tracing::debug!(input = %text, "selection cancelled"),
                }
                // Every answer to the prompt starts a fresh search
                self.query.clear();
                self.refresh();
                self.state = LoopState::Typing;
            }
            // Anything else is meaningless in the current state
            (state, input) => tracing::trace!(?state, ?input, "ignored input"),
        }
        self.state
    }

    fn refresh(&mut self) {
        let outcome = self.engine.search(&self.query, self.options.max_results);
        self.matches = outcome.matches;
        self.elapsed = outcome.elapsed;
        self.capped = outcome.capped;
    }
}

/// Parse a 1-based choice. `None` means cancel: zero, out of range or not a number.
pub fn parse_selection(text: &str, count: usize) -> Option<usize> {
    let choice: usize = text.trim().parse().ok()?;
    (1..=count).contains(&choice).then_some(choice)
}

/// Run the read-eval-render loop until the session terminates
pub fn run(
    session: &mut Session<'_>,
    io: &mut dyn TerminalIO,
    launcher: &mut dyn FileLauncher,
) -> Result<()> {
    while session.state() != LoopState::Terminated {
        io.render(&session.view())?;
        let input = io.read_input(session.state())?;
        session.handle(input, launcher);
    }
    Ok(())
}
