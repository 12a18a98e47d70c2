//! Line-oriented interaction.
//!
//! Used when stdin or stdout is not a terminal, or when configured. Each
//! line is one input: a new query, an empty line to pick a result, `exit`
//! to quit. End of input quits as well.

use crate::output::print_view;
use crate::session::{Input, LoopState, TerminalIO, View};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Command that ends a line-mode session
pub const EXIT_COMMAND: &str = "exit";

pub struct LineIO<R, W> {
    input: R,
    output: W,
    raw: Vec<u8>,
    line: String,
}

impl<R: BufRead, W: WriteColor> LineIO<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            raw: Vec::new(),
            line: String::new(),
        }
    }

    /// Print the banner shown once before the first prompt
    pub fn print_banner(&mut self) -> Result<()> {
        self.output
            .set_color(ColorSpec::new().set_fg(Some(Color::White)).set_bold(true))?;
        writeln!(self.output, "  SPYGLASS SEARCH")?;
        self.output.reset()?;
        self.output.set_color(ColorSpec::new().set_dimmed(true))?;
        writeln!(
            self.output,
            "  Type a query and press Enter. Empty line to open. '{}' to quit.",
            EXIT_COMMAND
        )?;
        self.output.reset()?;
        writeln!(self.output)?;
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Next line without its terminator, `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced, never rejected.
    fn next_line(&mut self) -> Result<Option<&str>> {
        self.raw.clear();
        let read = self
            .input
            .read_until(b'\n', &mut self.raw)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        self.line = String::from_utf8_lossy(&self.raw).into_owned();
        Ok(Some(self.line.trim_end_matches(['\r', '\n'])))
    }
}

impl<R: BufRead, W: WriteColor> TerminalIO for LineIO<R, W> {
    fn render(&mut self, view: &View<'_>) -> Result<()> {
        print_view(&mut self.output, view).context("Failed to write output")
    }

    fn read_input(&mut self, state: LoopState) -> Result<Input> {
        let Some(line) = self.next_line()? else {
            return Ok(Input::Terminate);
        };

        let input = match state {
            LoopState::Confirming => Input::Selection(line.to_string()),
            _ if line.trim() == EXIT_COMMAND => Input::Terminate,
            _ if line.is_empty() => Input::Confirm,
            _ => Input::ReplaceQuery(line.to_string()),
        };
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use termcolor::NoColor;

    fn io(text: &str) -> LineIO<Cursor<Vec<u8>>, NoColor<Vec<u8>>> {
        LineIO::new(Cursor::new(text.as_bytes().to_vec()), NoColor::new(Vec::new()))
    }

    #[test]
    fn test_lines_map_to_inputs() {
        let mut io = io("report\n\n2\r\n exit \n");
        assert_eq!(
            io.read_input(LoopState::Typing).unwrap(),
            Input::ReplaceQuery("report".into())
        );
        assert_eq!(io.read_input(LoopState::Typing).unwrap(), Input::Confirm);
        assert_eq!(
            io.read_input(LoopState::Confirming).unwrap(),
            Input::Selection("2".into())
        );
        assert_eq!(io.read_input(LoopState::Typing).unwrap(), Input::Terminate);
    }

    #[test]
    fn test_end_of_input_terminates() {
        let mut io = io("");
        assert_eq!(io.read_input(LoopState::Typing).unwrap(), Input::Terminate);
        assert_eq!(io.read_input(LoopState::Confirming).unwrap(), Input::Terminate);
    }

    #[test]
    fn test_exit_at_prompt_is_a_selection() {
        // At the selection prompt every line is a choice; "exit" just cancels
        let mut io = io("exit\n");
        assert_eq!(
            io.read_input(LoopState::Confirming).unwrap(),
            Input::Selection("exit".into())
        );
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_the_session() {
        let mut io = LineIO::new(
            Cursor::new(b"caf\xe9\nreport\n".to_vec()),
            NoColor::new(Vec::new()),
        );
        assert_eq!(
            io.read_input(LoopState::Typing).unwrap(),
            Input::ReplaceQuery("caf\u{fffd}".into())
        );
        assert_eq!(
            io.read_input(LoopState::Typing).unwrap(),
            Input::ReplaceQuery("report".into())
        );
    }

    #[test]
    fn test_invalid_utf8_selection_cancels() {
        let mut io = LineIO::new(Cursor::new(b"\xff\xfe\n".to_vec()), NoColor::new(Vec::new()));
        let input = io.read_input(LoopState::Confirming).unwrap();
        assert_eq!(input, Input::Selection("\u{fffd}\u{fffd}".into()));
        assert_eq!(crate::session::parse_selection("\u{fffd}\u{fffd}", 3), None);
    }

    #[test]
    fn test_banner() {
        let mut io = io("");
        io.print_banner().unwrap();
        let (_, out) = io.into_inner();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("SPYGLASS SEARCH"));
        assert!(text.contains("'exit' to quit"));
    }
}
