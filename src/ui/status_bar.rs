use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::viewer::fetcher::FetchStatus;

fn status_span(status: FetchStatus) -> Span<'static> {
    match status {
        FetchStatus::Idle => Span::styled("Idle", Style::default().fg(Color::DarkGray)),
        FetchStatus::Loading => Span::styled("Loading…", Style::default().fg(Color::Yellow)),
        FetchStatus::Success => Span::styled("Up to date", Style::default().fg(Color::Green)),
        FetchStatus::Error => Span::styled("Fetch failed", Style::default().fg(Color::Red)),
    }
}

/// Build the status line (extracted for testability)
fn build_status_line(title: &str, summary: &str, status: FetchStatus, search_term: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw(" │ "),
        Span::raw(summary.to_string()),
    ];
    if !search_term.is_empty() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Filter:", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" \"{}\"", search_term)));
    }
    spans.push(Span::raw(" │ "));
    spans.push(status_span(status));
    Line::from(spans)
}

/// Render the bottom status bar for the active screen
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    title: &str,
    summary: &str,
    status: FetchStatus,
    search_term: &str,
) {
    let line = build_status_line(title, summary, status, search_term);
    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}
