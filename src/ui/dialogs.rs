use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{ConfirmDelete, DetailPopup};

/// Center a `width` x `height` box inside `area`, shrinking it to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the delete confirmation dialog
pub fn render_delete_confirmation(f: &mut Frame, pending: &ConfirmDelete) {
    let prompt_text = format!(
        "Delete {} (#{})?\n\n\
        WARNING: This action cannot be undone!\n\n\
        Continue? (y/n)",
        pending.label, pending.id
    );

    let prompt_area = centered(f.area(), 50, 9);

    let prompt = Paragraph::new(prompt_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Lines of the detail popup, keys padded to a common width
fn detail_lines(popup: &DetailPopup) -> Vec<Line<'_>> {
    let key_width = popup
        .fields
        .iter()
        .map(|(key, _)| unicode_width::UnicodeWidthStr::width(key.as_str()))
        .max()
        .unwrap_or(0);

    if popup.fields.is_empty() {
        return vec![Line::from(Span::styled("No fields", Style::default().fg(Color::DarkGray)))];
    }

    popup
        .fields
        .iter()
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", key, width = key_width),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw(value.as_str()),
            ])
        })
        .collect()
}

/// Render the read-only record popup
pub fn render_detail_popup(f: &mut Frame, popup: &DetailPopup) {
    let area = f.area();
    let popup_height = (popup.fields.len() as u16).saturating_add(4).min(area.height.saturating_sub(4)).max(5);
    let popup_area = centered(area, 70, popup_height);

    let paragraph = Paragraph::new(detail_lines(popup))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", popup.title))
                .title_bottom(" ↑/↓ scroll · Esc close ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false })
        .scroll((popup.scroll_offset, 0));

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}
