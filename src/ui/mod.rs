// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (tabs, table, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - tabs: Renders the top screen tabs with the backend address
// - legend: Renders hotkey legend
// - search: Renders the filter box above the table rows
// - status_bar: Renders bottom status bar with page position and fetch state
// - dialogs: Renders the delete confirmation and record detail popups
// - toast: Renders toast notifications (brief pop-up messages)
//
// The collection table itself is drawn by `viewer::table`.

pub mod dialogs;
pub mod layout;
pub mod legend;
pub mod render;
pub mod search;
pub mod status_bar;
pub mod tabs;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
