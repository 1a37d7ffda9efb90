use crate::App;
use ratatui::Frame;

use super::{dialogs, layout, legend, status_bar, tabs, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let vim_mode = app.model.ui.vim_mode;

    let (search_mode, has_search_query) = app
        .active_screen()
        .map(|screen| (screen.search_active(), !screen.search_term().is_empty()))
        .unwrap_or((false, false));
    let layout_info = layout::calculate_layout(size, vim_mode, search_mode, has_search_query);

    let titles = tabs::tab_titles(app.screens.iter().map(|s| s.view.title()));
    tabs::render_tabs(f, layout_info.tabs_area, titles, app.model.active_screen, &app.base_url);

    if let Some(screen) = app.active_screen_mut() {
        screen.render(f, layout_info.content_area);
    }

    legend::render_legend(f, layout_info.legend_area, vim_mode, search_mode, has_search_query);

    if let Some(screen) = app.active_screen() {
        status_bar::render_status_bar(
            f,
            layout_info.status_area,
            screen.title(),
            &screen.summary(),
            screen.status(),
            screen.search_term(),
        );
    }

    // Dialogs draw over everything else
    if let Some(pending) = &app.model.ui.confirm_delete {
        dialogs::render_delete_confirmation(f, pending);
    } else if let Some(popup) = &app.model.ui.detail_popup {
        dialogs::render_detail_popup(f, popup);
    }

    if let Some((message, _, is_error)) = &app.model.ui.toast_message {
        toast::render_toast(f, size, message, *is_error);
    }
}
