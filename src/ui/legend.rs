use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Yellow))
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(vim_mode: bool, search_mode: bool, has_search_query: bool) -> Vec<Span<'static>> {
    // Typing in the search box: only the keys that leave it
    if search_mode {
        return vec![
            key("Enter"),
            Span::raw(":Accept Search  "),
            key("Esc"),
            Span::raw(":Cancel Search  "),
            key("^C"),
            Span::raw(":Quit"),
        ];
    }

    let mut hotkey_spans = vec![];

    if vim_mode {
        hotkey_spans.extend(vec![
            key("j/k"),
            Span::raw(":Row  "),
            key("h/l"),
            Span::raw(":Page  "),
        ]);
    } else {
        hotkey_spans.extend(vec![
            key("↑/↓"),
            Span::raw(":Row  "),
            key("←/→"),
            Span::raw(":Page  "),
        ]);
    }

    hotkey_spans.extend(vec![
        key("Home"),
        Span::raw(":First Page  "),
        key("s"),
        Span::raw(":Page Size  "),
    ]);

    if has_search_query {
        hotkey_spans.extend(vec![key("Esc"), Span::raw(":Clear Search  ")]);
    } else {
        let search_key = if vim_mode { "/" } else { "^F" };
        hotkey_spans.extend(vec![key(search_key), Span::raw(":Search  ")]);
    }

    hotkey_spans.extend(vec![
        key("v"),
        Span::raw(":View  "),
        key("d"),
        Span::raw(":Delete  "),
        key("r"),
        Span::raw(":Retry  "),
        key("Tab/1-9"),
        Span::raw(":Screen  "),
        key("q"),
        Span::raw(":Quit"),
    ]);

    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(vim_mode: bool, search_mode: bool, has_search_query: bool) -> Paragraph<'static> {
    let hotkey_line = Line::from(build_hotkey_spans(vim_mode, search_mode, has_search_query));

    Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

/// Render the hotkey legend (changes with vim mode and search state)
pub fn render_legend(f: &mut Frame, area: Rect, vim_mode: bool, search_mode: bool, has_search_query: bool) {
    let legend = build_legend_paragraph(vim_mode, search_mode, has_search_query);
    f.render_widget(legend, area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, vim_mode: bool, search_mode: bool, has_search_query: bool) -> u16 {
    // line_count() miscounts when a bordered block is attached, so count without it
    let hotkey_line = Line::from(build_hotkey_spans(vim_mode, search_mode, has_search_query));
    let paragraph_for_counting = Paragraph::new(vec![hotkey_line]).wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_to_text(spans: &[Span]) -> String {
        spans.iter().map(|span| span.content.as_ref()).collect::<Vec<_>>().join("")
    }

    #[test]
    fn test_legend_navigation_keys_follow_vim_mode() {
        let text = spans_to_text(&build_hotkey_spans(false, false, false));
        assert!(text.contains("↑/↓:Row"));
        assert!(text.contains("^F:Search"));

        let text = spans_to_text(&build_hotkey_spans(true, false, false));
        assert!(text.contains("j/k:Row"));
        assert!(text.contains("h/l:Page"));
        assert!(text.contains("/:Search"));
    }

    #[test]
    fn test_legend_offers_clearing_an_accepted_search() {
        let text = spans_to_text(&build_hotkey_spans(false, false, true));
        assert!(text.contains("Esc:Clear Search"));
        assert!(!text.contains("^F:Search"));
    }

    #[test]
    fn test_legend_while_typing_search() {
        let text = spans_to_text(&build_hotkey_spans(false, true, false));
        assert!(text.contains("Enter:Accept Search"));
        assert!(text.contains("Esc:Cancel Search"));
        // Letters are typed into the box while searching
        assert!(!text.contains("q:Quit"));
        assert!(!text.contains("d:Delete"));
    }

    #[test]
    fn test_legend_height_wraps_on_narrow_terminals() {
        assert_eq!(calculate_legend_height(400, false, false, false), 3);
        assert!(calculate_legend_height(40, false, false, false) > 3);
    }
}
