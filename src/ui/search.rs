//! Table filter box
//!
//! One-line input above the rows. The term filters on the backend, so the
//! right edge shows how many records the current term matches.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What the filter box shows
pub struct FilterBox<'a> {
    pub term: &'a str,
    /// Receiving keystrokes
    pub editing: bool,
    /// Records matching the term, None while a fetch is outstanding
    pub matches: Option<u64>,
    pub vim_mode: bool,
}

/// Last part of `term` that fits in `width` columns
///
/// While typing, the end of the term (where the cursor is) must stay visible.
pub fn visible_tail(term: &str, width: usize) -> &str {
    if term.width() <= width {
        return term;
    }
    let mut used = 0;
    let mut start = term.len();
    for (idx, ch) in term.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &term[start..]
}

fn count_label(filter: &FilterBox<'_>) -> String {
    match (filter.term.is_empty(), filter.matches) {
        (_, None) => "…".to_string(),
        (true, Some(n)) => format!("{} total", n),
        (false, Some(1)) => "1 match".to_string(),
        (false, Some(n)) => format!("{} matches", n),
    }
}

fn title(filter: &FilterBox<'_>) -> String {
    if filter.editing {
        " Filter · Enter keep · Esc clear ".to_string()
    } else if !filter.term.is_empty() {
        " Filter · Esc clear ".to_string()
    } else {
        let key = if filter.vim_mode { "/" } else { "Ctrl-F" };
        format!(" Filter ({}) ", key)
    }
}

/// Render the filter box
pub fn render_filter_box(f: &mut Frame, area: Rect, filter: &FilterBox<'_>) {
    let border = if filter.editing { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title(filter))
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let count = count_label(filter);
    let [input_area, count_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(count.width() as u16 + 1)]).areas(inner);

    let input = if filter.editing {
        // One column for the cursor
        let room = (input_area.width as usize).saturating_sub(1);
        Line::from(vec![
            Span::raw(visible_tail(filter.term, room).to_string()),
            Span::styled("█", Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if filter.term.is_empty() {
        Line::from(Span::styled(
            "type to filter",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(
            crate::utils::truncate_to_width(filter.term, input_area.width as usize),
            Style::default().fg(Color::Yellow),
        ))
    };
    f.render_widget(Paragraph::new(input), input_area);

    let count_style = if filter.matches == Some(0) {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(count, count_style))).alignment(ratatui::layout::Alignment::Right),
        count_area,
    );
}
