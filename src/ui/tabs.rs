use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Tab titles, numbered for the 1-9 shortcuts
pub fn tab_titles<'a>(titles: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    titles
        .into_iter()
        .enumerate()
        .map(|(idx, title)| {
            if idx < 9 {
                format!("{} {}", idx + 1, title)
            } else {
                title.to_string()
            }
        })
        .collect()
}

/// Render the screen tabs at the top, with the backend address on the right
pub fn render_tabs(f: &mut Frame, area: Rect, titles: Vec<String>, active: usize, base_url: &str) {
    let block = Block::default().borders(Borders::ALL).title(" PTW Admin ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let url_width = (unicode_width::UnicodeWidthStr::width(base_url) as u16 + 1).min(inner.width / 3);
    let [tabs_area, url_area] = Layout::horizontal([Constraint::Min(0), Constraint::Length(url_width)]).areas(inner);

    let tabs = Tabs::new(titles)
        .select(active)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider("│");
    f.render_widget(tabs, tabs_area);

    let url = crate::utils::truncate_to_width(base_url, url_area.width as usize);
    let url_line = Line::from(Span::styled(url, Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(url_line).alignment(Alignment::Right), url_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_tab_titles_are_numbered() {
        let titles = tab_titles(["Regions", "Circles"]);
        assert_eq!(titles, vec!["1 Regions", "2 Circles"]);
    }

    #[test]
    fn test_tabs_render_titles_and_url() {
        let backend = TestBackend::new(100, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                render_tabs(
                    f,
                    f.area(),
                    tab_titles(["Regions", "Circles"]),
                    1,
                    "http://localhost:8000",
                )
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let line: String = (0..100).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert!(line.contains("1 Regions"));
        assert!(line.contains("2 Circles"));
        assert!(line.contains("localhost:8000"));
    }
}
