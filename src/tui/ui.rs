//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::features::breathing::{circle_scale, Phase};
use crate::tui::app::{App, HELP};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    render_header(frame, chunks[0]);
    render_patterns(frame, app, body[0]);
    render_exercise(frame, app, body[1]);
    render_status_bar(frame, app, chunks[2]);
}

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Inhale => Color::Blue,
        Phase::Hold => Color::Yellow,
        Phase::Exhale => Color::Green,
        Phase::Pause => Color::Magenta,
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect) {
    let header = Paragraph::new(" Salutis · Breathing Exercises ")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_patterns(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .patterns()
        .enumerate()
        .map(|(i, pattern)| {
            let is_selected = i == app.selected;
            let lines = vec![
                Line::from(Span::styled(
                    pattern.name().to_string(),
                    Style::default().add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                )),
                Line::from(Span::styled(
                    format!("  {}", pattern.format_durations()),
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Patterns "))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn circle_bar(width: u16, scale: f64) -> String {
    let filled = (f64::from(width) * scale).round() as usize;
    "█".repeat(filled.min(width as usize))
}

fn render_exercise(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let session = app.session();
    let phase = session.phase();
    let color = phase_color(phase);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", session.pattern().name()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1),
            Constraint::Length(1), // Phase label
            Constraint::Length(1), // Remaining seconds
            Constraint::Length(1), // Cycle count
            Constraint::Length(1),
            Constraint::Length(3), // Circle
            Constraint::Length(3), // Gauge
            Constraint::Min(0),
        ])
        .split(inner);

    let description = Paragraph::new(session.pattern().description().to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(description, rows[0]);

    let label = Paragraph::new(phase.label())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(label, rows[2]);

    let remaining = Paragraph::new(format!("{}s", session.remaining_seconds()))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(remaining, rows[3]);

    let state = if session.is_running() { "" } else { " (paused)" };
    let cycles = Paragraph::new(format!("Cycle {}{state}", session.cycle_count() + 1))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(cycles, rows[4]);

    let progress = session.progress();
    let bar = circle_bar(rows[6].width, circle_scale(phase, progress));
    let circle = Paragraph::new(vec![Line::from(bar.clone()), Line::from(bar.clone()), Line::from(bar)])
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(circle, rows[6]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(progress.clamp(0.0, 1.0));
    frame.render_widget(gauge, rows[7]);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = if app.show_help {
        HELP
    } else {
        app.status.as_deref().unwrap_or(HELP)
    };

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
