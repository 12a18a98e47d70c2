mod ui;

pub use ui::{Row, Screen};

use crate::session::{self, FileLauncher, Input, LoopState, Session, TerminalIO, View};
use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::OnceLock;

/// Exit status after SIGINT, SIGTERM or SIGHUP while the TUI is up
pub const SIGNAL_EXIT_CODE: i32 = 130;

/// Raw mode plus alternate screen, released on drop.
///
/// Dropping restores the terminal on every exit path: normal return, an
/// error bubbling up through `?`, or a panic unwinding through the loop.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        if let Err(e) = install_signal_handler() {
            tracing::warn!("terminal will not be restored on signals: {:#}", e);
        }
        enable_raw_mode().context("Failed to enable raw mode")?;
        // From here on the guard owns the cleanup, even if the next step fails
        let guard = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave raw mode and the alternate screen. Safe to call when neither is active.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Restore the terminal and exit when the process is signalled.
///
/// Signals terminate without unwinding, so [`TerminalGuard`]'s `Drop` never
/// runs for them. Installed once per process; later calls return the
/// first outcome.
pub fn install_signal_handler() -> Result<()> {
    static INSTALLED: OnceLock<Result<(), String>> = OnceLock::new();

    INSTALLED
        .get_or_init(|| {
            ctrlc::set_handler(|| {
                restore_terminal();
                std::process::exit(SIGNAL_EXIT_CODE);
            })
            .map_err(|e| e.to_string())
        })
        .clone()
        .map_err(|e| anyhow::anyhow!("Failed to install signal handler: {e}"))
}

/// What a key means for the session, if anything
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Input(Input),
    /// Edit the selection prompt without producing an input yet
    PromptPush(char),
    PromptPop,
    PromptSubmit,
    /// Esc at the prompt answers with nothing, which cancels
    PromptCancel,
    Ignore,
}

fn map_key(key: KeyEvent, state: LoopState) -> KeyAction {
    // Only handle key press events, not release or repeat
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return KeyAction::Input(Input::Terminate),
        (KeyModifiers::CONTROL, KeyCode::Char('h')) => {
            return match state {
                LoopState::Confirming => KeyAction::PromptPop,
                _ => KeyAction::Input(Input::Backspace),
            };
        }
        // AltGr arrives as Ctrl+Alt on Windows; the composed character is real input
        (m, KeyCode::Char(_)) if m.contains(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
        (m, _) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => return KeyAction::Ignore,
        _ => {}
    }

    match state {
        LoopState::Confirming => match key.code {
            KeyCode::Enter => KeyAction::PromptSubmit,
            KeyCode::Esc => KeyAction::PromptCancel,
            KeyCode::Backspace => KeyAction::PromptPop,
            KeyCode::Char(c) => KeyAction::PromptPush(c),
            _ => KeyAction::Ignore,
        },
        _ => match key.code {
            KeyCode::Esc => KeyAction::Input(Input::Terminate),
            KeyCode::Enter => KeyAction::Input(Input::Confirm),
            KeyCode::Backspace => KeyAction::Input(Input::Backspace),
            KeyCode::Char(c) => KeyAction::Input(Input::Char(c)),
            _ => KeyAction::Ignore,
        },
    }
}

/// Full-screen raw-key [`TerminalIO`]
pub struct RawTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    viewport_height: usize,
    screen: Screen,
    selection: String,
    // Dropped last so the terminal is restored after ratatui is done with it
    _guard: TerminalGuard,
}

impl RawTerminal {
    pub fn new(viewport_height: usize) -> Result<Self> {
        let guard = TerminalGuard::acquire()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

        // Clear the terminal to prevent any artifacts from previous content
        terminal.clear()?;

        Ok(Self {
            terminal,
            viewport_height: viewport_height.max(1),
            screen: Screen::default(),
            selection: String::new(),
            _guard: guard,
        })
    }

    fn redraw(&mut self) -> Result<()> {
        let screen = &self.screen;
        let selection = self.selection.as_str();
        let height = self.viewport_height;
        self.terminal
            .draw(|f| ui::draw(f, screen, selection, height))
            .context("Failed to draw")?;
        Ok(())
    }
}

impl TerminalIO for RawTerminal {
    fn render(&mut self, view: &View<'_>) -> Result<()> {
        self.screen = Screen::from_view(view, self.viewport_height);
        if view.state != LoopState::Confirming {
            self.selection.clear();
        }
        self.redraw()
    }

    fn read_input(&mut self, state: LoopState) -> Result<Input> {
        loop {
            let key = match event::read().context("Failed to read terminal event")? {
                Event::Key(key) => key,
                Event::Resize(_, _) => {
                    self.redraw()?;
                    continue;
                }
                _ => continue,
            };

            match map_key(key, state) {
                KeyAction::Input(input) => return Ok(input),
                KeyAction::PromptSubmit => {
                    return Ok(Input::Selection(std::mem::take(&mut self.selection)));
                }
                KeyAction::PromptCancel => {
                    self.selection.clear();
                    return Ok(Input::Selection(String::new()));
                }
                KeyAction::PromptPush(c) => {
                    self.selection.push(c);
                    self.redraw()?;
                }
                KeyAction::PromptPop => {
                    self.selection.pop();
                    self.redraw()?;
                }
                KeyAction::Ignore => {}
            }
        }
    }
}

/// Run a session in the full-screen TUI until the user quits
pub fn run(session: &mut Session<'_>, launcher: &mut dyn FileLauncher, viewport_height: usize) -> Result<()> {
    let mut terminal = RawTerminal::new(viewport_height)?;
    tracing::debug!("raw mode acquired");
    let result = session::run(session, &mut terminal, launcher);
    drop(terminal);
    tracing::debug!("raw mode released");
    result
}
