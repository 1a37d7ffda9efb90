use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Top screen tabs
    pub tabs_area: Rect,
    /// Collection table (search box, rows and pagination footer)
    pub content_area: Rect,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(
    terminal_size: Rect,
    vim_mode: bool,
    search_mode: bool,
    has_search_query: bool,
) -> LayoutInfo {
    let legend_height =
        super::legend::calculate_legend_height(terminal_size.width, vim_mode, search_mode, has_search_query);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Tabs (top border, titles, bottom border)
            Constraint::Min(8),                // Table
            Constraint::Length(legend_height), // Legend (exact fit for wrapped content)
            Constraint::Length(3),             // Status bar
        ])
        .split(terminal_size);

    LayoutInfo {
        tabs_area: main_chunks[0],
        content_area: main_chunks[1],
        legend_area: main_chunks[2],
        status_area: main_chunks[3],
    }
}
