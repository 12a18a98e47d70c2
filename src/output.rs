//! Result formatting shared by the TUI and line mode

use crate::session::{LoopState, View};
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Column budget for the path column
pub const PATH_WIDTH: usize = 55;

/// Column budget for the file name column
pub const NAME_WIDTH: usize = 35;

/// Keep the tail of `path` so it fits in `max_len - 1` characters.
///
/// Paths shorter than `max_len` are returned unchanged; longer ones become
/// `...` followed by as much of the end as fits.
pub fn shorten_path(path: &str, max_len: usize) -> String {
    let len = path.chars().count();
    if len < max_len {
        return path.to_string();
    }
    let keep = max_len.saturating_sub(4);
    let tail: String = path.chars().skip(len - keep).collect();
    format!("...{}", tail)
}

/// Truncate a file name to `width` characters, marking the cut with `...`
pub fn fit_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let head: String = name.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", head)
}

/// Status line shown under the results
pub fn status_line(view: &View<'_>) -> String {
    if view.query.is_empty() {
        format!("{} files indexed. Ready.", view.total_files)
    } else if view.capped {
        format!(
            "Found {} matches in {:.4}s (limit reached)",
            view.matches.len(),
            view.elapsed.as_secs_f64()
        )
    } else {
        format!(
            "Found {} matches in {:.4}s",
            view.matches.len(),
            view.elapsed.as_secs_f64()
        )
    }
}

/// Prompt shown while waiting for a selection
pub fn selection_prompt(count: usize) -> String {
    format!("Open file ID (1-{}): ", count)
}

/// Print the current view as plain (optionally colored) lines
pub fn print_view<W: WriteColor>(out: &mut W, view: &View<'_>) -> io::Result<()> {
    match view.state {
        LoopState::Typing => {
            if !view.query.is_empty() {
                if view.matches.is_empty() {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                    writeln!(out, "       No matches found.")?;
                    out.reset()?;
                }
                for (i, entry) in view.matches.iter().enumerate() {
                    let path = entry.full_path().display().to_string();
                    print_match_row(out, i + 1, entry.name(), &path)?;
                }
            }

            out.set_color(ColorSpec::new().set_dimmed(true))?;
            writeln!(out, "  {}", status_line(view))?;
            out.reset()?;

            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(out, "  > ")?;
            out.reset()?;
        }
        LoopState::Confirming => {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(out, "  {}", selection_prompt(view.matches.len()))?;
            out.reset()?;
        }
        LoopState::Terminated => {}
    }
    out.flush()
}

/// `[ID]  name  path`
fn print_match_row<W: WriteColor>(out: &mut W, id: usize, name: &str, path: &str) -> io::Result<()> {
    write!(out, "  ")?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "[{:2}]", id)?;
    out.reset()?;
    write!(out, "  ")?;

    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{:<width$}", fit_name(name, NAME_WIDTH), width = NAME_WIDTH)?;
    out.reset()?;
    write!(out, "  ")?;

    out.set_color(ColorSpec::new().set_dimmed(true))?;
    write!(out, "{}", shorten_path(path, PATH_WIDTH))?;
    out.reset()?;

    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::NameIndex;
    use crate::session::{Session, SessionOptions};
    use std::time::Duration;
    use termcolor::NoColor;

    fn render(view: &View<'_>) -> String {
        let mut out = NoColor::new(Vec::new());
        print_view(&mut out, view).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_shorten_path_keeps_short_paths() {
        assert_eq!(shorten_path("/a/b.txt", 55), "/a/b.txt");
    }

    #[test]
    fn test_shorten_path_keeps_tail() {
        let long = format!("/{}/file.txt", "x".repeat(80));
        let short = shorten_path(&long, 55);
        assert!(short.starts_with("..."));
        assert!(short.ends_with("/file.txt"));
        assert_eq!(short.chars().count(), 54);
    }

    #[test]
    fn test_shorten_path_multibyte() {
        let long = "ü".repeat(60);
        let short = shorten_path(&long, 10);
        assert_eq!(short, format!("...{}", "ü".repeat(6)));
    }

    #[test]
    fn test_fit_name() {
        assert_eq!(fit_name("short.txt", 35), "short.txt");
        let long = "a".repeat(40);
        let fitted = fit_name(&long, 35);
        assert_eq!(fitted.chars().count(), 35);
        assert!(fitted.ends_with("..."));
    }

    #[test]
    fn test_status_line_variants() {
        let view = View {
            state: LoopState::Typing,
            query: "",
            matches: &[],
            total_files: 42,
            elapsed: Duration::ZERO,
            capped: false,
        };
        assert_eq!(status_line(&view), "42 files indexed. Ready.");

        let view = View {
            query: "q",
            elapsed: Duration::from_millis(1),
            ..view
        };
        assert_eq!(status_line(&view), "Found 0 matches in 0.0010s");
    }

    #[test]
    fn test_print_view_lists_numbered_matches() {
        let mut index = NameIndex::new();
        index.insert("report.pdf", "/docs/report.pdf");
        let mut session = Session::new(&index, SessionOptions::default());
        session.handle(
            crate::session::Input::ReplaceQuery("report".into()),
            &mut NoLaunch,
        );

        let text = render(&session.view());
        assert!(text.contains("[ 1]  report.pdf"));
        assert!(text.contains("/docs/report.pdf"));
        assert!(text.contains("Found 1 matches"));
    }

    #[test]
    fn test_print_view_no_matches() {
        let index = NameIndex::new();
        let mut session = Session::new(&index, SessionOptions::default());
        session.handle(crate::session::Input::Char('z'), &mut NoLaunch);

        let text = render(&session.view());
        assert!(text.contains("No matches found."));
    }

    #[test]
    fn test_print_view_confirm_prompt() {
        let mut index = NameIndex::new();
        index.insert("a.txt", "/a.txt");
        index.insert("b.txt", "/b.txt");
        let mut session = Session::new(&index, SessionOptions::default());
        session.handle(crate::session::Input::ReplaceQuery(".txt".into()), &mut NoLaunch);
        session.handle(crate::session::Input::Confirm, &mut NoLaunch);

        assert_eq!(render(&session.view()), "  Open file ID (1-2): ");
    }

    struct NoLaunch;

    impl crate::session::FileLauncher for NoLaunch {
        fn open(&mut self, _path: &std::path::Path) {}
    }
}
