//! Terminal rendering for the weekly grid.
//!
//! One row per task, one column per weekday, cells drawn as `[x]`/`[ ]`.
//! The header shows the displayed week's date range, the footer shows key
//! help and any storage warnings.

use crate::app::{Action, App};
use crate::store::StatusStore;
use crate::week::DAY_NAMES;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Map a key press to a dashboard action.
#[must_use]
pub const fn map_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('p') => Some(Action::PreviousWeek),
        KeyCode::Char('n') => Some(Action::NextWeek),
        KeyCode::Char('c') => Some(Action::CurrentWeek),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::Right => Some(Action::MoveRight),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        _ => None,
    }
}

/// Draw one frame of the dashboard.
pub fn draw<S: StatusStore>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::raw("Task completion for the week of "),
        Span::styled(
            format!("{} .. {}", app.week().start(), app.week().end()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().title("weekgrid").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    f.render_widget(grid_table(app), chunks[1]);

    let footer_text = if app.warnings().is_empty() {
        "p/n/c: previous/next/current week   arrows: move   space: toggle   q: quit".to_string()
    } else {
        app.warnings().join("; ")
    };
    let footer_style = if app.warnings().is_empty() {
        Style::default()
    } else {
        Style::default().fg(Color::Yellow)
    };
    let footer = Paragraph::new(Span::styled(footer_text, footer_style))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[2]);
}

/// Build the checkbox table for the current grid state.
fn grid_table<S: StatusStore>(app: &App<S>) -> Table<'_> {
    let (cursor_row, cursor_col) = app.cursor();

    let header = Row::new(
        std::iter::once(Cell::from("Task")).chain(
            DAY_NAMES
                .iter()
                .map(|day| Cell::from(&day[..3]).style(Style::default().fg(Color::Cyan))),
        ),
    );

    let rows = app.tasks().iter().enumerate().map(|(row, task)| {
        let cells = std::iter::once(Cell::from(task.as_str())).chain((0..7).map(|col| {
            let mark = if app.is_done(row, col) { "[x]" } else { "[ ]" };
            let style = if (row, col) == (cursor_row, cursor_col) {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Cell::from(mark).style(style)
        }));
        Row::new(cells)
    });

    let mut widths = vec![Constraint::Min(12)];
    widths.extend(std::iter::repeat(Constraint::Length(5)).take(7));

    Table::new(rows, widths).header(header).block(Block::default().borders(Borders::ALL))
}
