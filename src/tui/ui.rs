use crate::output::{fit_name, selection_prompt, shorten_path, status_line, NAME_WIDTH, PATH_WIDTH};
use crate::session::{LoopState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// One result row, already shortened for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub path: String,
}

/// Owned copy of a [`View`], kept so the screen can be redrawn while the
/// selection prompt is being edited
#[derive(Debug, Clone)]
pub struct Screen {
    pub state: LoopState,
    pub query: String,
    pub rows: Vec<Row>,
    pub status: String,
    pub no_matches: bool,
}

impl Screen {
    pub fn from_view(view: &View<'_>, viewport_height: usize) -> Self {
        let rows = view
            .matches
            .iter()
            .take(viewport_height)
            .map(|entry| Row {
                name: fit_name(entry.name(), NAME_WIDTH),
                path: shorten_path(&entry.full_path().display().to_string(), PATH_WIDTH),
            })
            .collect();

        Self {
            state: view.state,
            query: view.query.to_string(),
            rows,
            status: status_line(view),
            no_matches: !view.query.is_empty() && view.matches.is_empty(),
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            state: LoopState::Typing,
            query: String::new(),
            rows: Vec::new(),
            status: String::new(),
            no_matches: false,
        }
    }
}

/// Saturating conversion for terminal coordinates
fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

pub fn draw(f: &mut Frame, screen: &Screen, selection: &str, viewport_height: usize) {
    let results_height = to_u16(viewport_height).saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                          // Title
            Constraint::Length(3),                          // Query input
            Constraint::Length(results_height),             // Results
            Constraint::Length(1),                          // Status bar
            Constraint::Length(1),                          // Selection prompt
            Constraint::Min(0),
        ])
        .split(f.area());

    draw_title(f, chunks[0]);
    draw_query_input(f, screen, chunks[1]);
    draw_results_list(f, screen, chunks[2]);
    draw_status_bar(f, screen, chunks[3]);
    draw_prompt(f, screen, selection, chunks[4]);
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "  SPYGLASS SEARCH",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  Type to search. Enter to open. Esc to quit.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]);
    f.render_widget(title, area);
}

fn draw_query_input(f: &mut Frame, screen: &Screen, area: Rect) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::styled(
            screen.query.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Search "));

    f.render_widget(input, area);

    if screen.state == LoopState::Typing {
        let x = area
            .x
            .saturating_add(3)
            .saturating_add(to_u16(screen.query.chars().count()));
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_results_list(f: &mut Frame, screen: &Screen, area: Rect) {
    let items: Vec<ListItem> = if screen.no_matches {
        vec![ListItem::new(Span::styled(
            "     No matches found.",
            Style::default().fg(Color::Yellow),
        ))]
    } else {
        screen
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let line = Line::from(vec![
                    Span::styled(format!("[{:2}]", i + 1), Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<width$}", row.name, width = NAME_WIDTH),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(row.path.as_str(), Style::default().add_modifier(Modifier::DIM)),
                ]);
                ListItem::new(line)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Results ({}) ", screen.rows.len())),
    );

    f.render_widget(list, area);
}

fn draw_status_bar(f: &mut Frame, screen: &Screen, area: Rect) {
    let status = Paragraph::new(format!("  {}", screen.status))
        .style(Style::default().add_modifier(Modifier::DIM));

    f.render_widget(status, area);
}

fn draw_prompt(f: &mut Frame, screen: &Screen, selection: &str, area: Rect) {
    if screen.state != LoopState::Confirming {
        return;
    }

    let prompt = format!("  {}", selection_prompt(screen.rows.len()));
    let x = area
        .x
        .saturating_add(to_u16(prompt.chars().count() + selection.chars().count()));
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Cyan)),
        Span::raw(selection),
    ]);
    f.render_widget(Paragraph::new(line), area);
    f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
}
