//! Input mapping for the collection viewer
//!
//! Translates crossterm key and mouse events into [`TableEvent`]s. Mapping is
//! pure; the viewer decides what each event does to the query and fetcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::query::PerPage;
use super::table::{HitTarget, TableHitMap};
use crate::logic::navigation;

/// Something the user did to the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// New search term (may be empty)
    SearchChanged(String),
    BeginSearch,
    /// Leave search input, keeping the term
    EndSearch,
    /// Leave search input and clear the term
    CancelSearch,
    PageChanged(u32),
    PerPageChanged(PerPage),
    Retry,
    Select(Option<usize>),
    InvokeAction { row: usize, action: usize },
}

/// What the key mapper needs to know about the table
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    pub search_active: bool,
    pub vim_mode: bool,
    pub search_term: &'a str,
    pub selected: Option<usize>,
    pub rows_len: usize,
    pub page: u32,
    pub per_page: PerPage,
    pub hotkeys: &'a [char],
}

/// Map a key press to a table event
///
/// Returns None for keys the table does not own (quit, screen switching),
/// leaving them to the application.
pub fn map_key(key: KeyEvent, ctx: &KeyContext<'_>) -> Option<TableEvent> {
    if ctx.search_active {
        return map_search_key(key, ctx);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('f') if ctrl => Some(TableEvent::BeginSearch),
        _ if ctrl => None,
        KeyCode::Char('/') => Some(TableEvent::BeginSearch),
        KeyCode::Esc if !ctx.search_term.is_empty() => Some(TableEvent::SearchChanged(String::new())),

        KeyCode::Down => Some(TableEvent::Select(navigation::next_row(ctx.selected, ctx.rows_len))),
        KeyCode::Up => Some(TableEvent::Select(navigation::prev_row(ctx.selected, ctx.rows_len))),
        KeyCode::Char('j') if ctx.vim_mode => {
            Some(TableEvent::Select(navigation::next_row(ctx.selected, ctx.rows_len)))
        }
        KeyCode::Char('k') if ctx.vim_mode => {
            Some(TableEvent::Select(navigation::prev_row(ctx.selected, ctx.rows_len)))
        }

        KeyCode::Left | KeyCode::PageUp => prev_page(ctx),
        KeyCode::Right | KeyCode::PageDown => Some(TableEvent::PageChanged(ctx.page.saturating_add(1))),
        KeyCode::Char('h') if ctx.vim_mode => prev_page(ctx),
        KeyCode::Char('l') if ctx.vim_mode => Some(TableEvent::PageChanged(ctx.page.saturating_add(1))),
        KeyCode::Home => Some(TableEvent::PageChanged(1)),

        KeyCode::Char('s') => Some(TableEvent::PerPageChanged(ctx.per_page.next())),
        KeyCode::Char('r') => Some(TableEvent::Retry),

        KeyCode::Enter if !ctx.hotkeys.is_empty() => ctx
            .selected
            .map(|row| TableEvent::InvokeAction { row, action: 0 }),
        KeyCode::Char(c) => {
            let action = ctx.hotkeys.iter().position(|h| *h == c)?;
            ctx.selected.map(|row| TableEvent::InvokeAction { row, action })
        }
        _ => None,
    }
}

fn prev_page(ctx: &KeyContext<'_>) -> Option<TableEvent> {
    (ctx.page > 1).then(|| TableEvent::PageChanged(ctx.page - 1))
}

fn map_search_key(key: KeyEvent, ctx: &KeyContext<'_>) -> Option<TableEvent> {
    match key.code {
        KeyCode::Esc => Some(TableEvent::CancelSearch),
        KeyCode::Enter => Some(TableEvent::EndSearch),
        KeyCode::Backspace => {
            let mut term = ctx.search_term.to_string();
            term.pop()?;
            Some(TableEvent::SearchChanged(term))
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut term = ctx.search_term.to_string();
            term.push(c);
            Some(TableEvent::SearchChanged(term))
        }
        _ => None,
    }
}

/// Map a mouse event to a table event using the last render's hit map
///
/// Every control reacts to the left press only. The release that ends the
/// same click maps to nothing, however long the button was held.
pub fn map_mouse(
    mouse: MouseEvent,
    hits: &TableHitMap,
    page: u32,
    per_page: PerPage,
) -> Option<TableEvent> {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return None;
    }

    match hits.target_at(mouse.column, mouse.row)? {
        HitTarget::Action { row, action } => Some(TableEvent::InvokeAction { row, action }),
        HitTarget::Row(row) => Some(TableEvent::Select(Some(row))),
        HitTarget::Prev => Some(TableEvent::PageChanged(page.saturating_sub(1))),
        HitTarget::Next => Some(TableEvent::PageChanged(page.saturating_add(1))),
        HitTarget::PerPage => Some(TableEvent::PerPageChanged(per_page.next())),
        HitTarget::Retry => Some(TableEvent::Retry),
        HitTarget::Search => Some(TableEvent::BeginSearch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::table::ActionHit;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctx<'a>(hotkeys: &'a [char]) -> KeyContext<'a> {
        KeyContext {
            search_active: false,
            vim_mode: false,
            search_term: "",
            selected: Some(1),
            rows_len: 5,
            page: 2,
            per_page: PerPage::Ten,
            hotkeys,
        }
    }

    fn click(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_navigation_keys() {
        let c = ctx(&[]);
        assert_eq!(map_key(key(KeyCode::Down), &c), Some(TableEvent::Select(Some(2))));
        assert_eq!(map_key(key(KeyCode::Up), &c), Some(TableEvent::Select(Some(0))));
        assert_eq!(map_key(key(KeyCode::Left), &c), Some(TableEvent::PageChanged(1)));
        assert_eq!(map_key(key(KeyCode::PageDown), &c), Some(TableEvent::PageChanged(3)));
        assert_eq!(
            map_key(key(KeyCode::Char('s')), &c),
            Some(TableEvent::PerPageChanged(PerPage::Twenty))
        );
    }

    #[test]
    fn test_vim_keys_only_in_vim_mode() {
        let mut c = ctx(&[]);
        assert_eq!(map_key(key(KeyCode::Char('j')), &c), None);
        c.vim_mode = true;
        assert_eq!(map_key(key(KeyCode::Char('j')), &c), Some(TableEvent::Select(Some(2))));
        assert_eq!(map_key(key(KeyCode::Char('h')), &c), Some(TableEvent::PageChanged(1)));
    }

    #[test]
    fn test_prev_on_first_page_maps_to_nothing() {
        let mut c = ctx(&[]);
        c.page = 1;
        assert_eq!(map_key(key(KeyCode::Left), &c), None);
    }

    #[test]
    fn test_hotkeys_invoke_on_selected_row() {
        let c = ctx(&['v', 'd']);
        assert_eq!(
            map_key(key(KeyCode::Char('d')), &c),
            Some(TableEvent::InvokeAction { row: 1, action: 1 })
        );
        assert_eq!(
            map_key(key(KeyCode::Enter), &c),
            Some(TableEvent::InvokeAction { row: 1, action: 0 })
        );

        let mut none_selected = ctx(&['v', 'd']);
        none_selected.selected = None;
        assert_eq!(map_key(key(KeyCode::Char('d')), &none_selected), None);
    }

    #[test]
    fn test_search_typing() {
        let mut c = ctx(&['v']);
        assert_eq!(map_key(key(KeyCode::Char('/')), &c), Some(TableEvent::BeginSearch));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL), &c),
            Some(TableEvent::BeginSearch)
        );

        c.search_active = true;
        c.search_term = "gri";
        assert_eq!(
            map_key(key(KeyCode::Char('d')), &c),
            Some(TableEvent::SearchChanged("grid".to_string()))
        );
        assert_eq!(
            map_key(key(KeyCode::Backspace), &c),
            Some(TableEvent::SearchChanged("gr".to_string()))
        );
        assert_eq!(map_key(key(KeyCode::Enter), &c), Some(TableEvent::EndSearch));
        assert_eq!(map_key(key(KeyCode::Esc), &c), Some(TableEvent::CancelSearch));

        c.search_term = "";
        assert_eq!(map_key(key(KeyCode::Backspace), &c), None);
    }

    #[test]
    fn test_esc_clears_applied_search() {
        let mut c = ctx(&[]);
        assert_eq!(map_key(key(KeyCode::Esc), &c), None);
        c.search_term = "feeder";
        assert_eq!(
            map_key(key(KeyCode::Esc), &c),
            Some(TableEvent::SearchChanged(String::new()))
        );
    }

    #[test]
    fn test_app_keys_pass_through() {
        let c = ctx(&[]);
        assert_eq!(map_key(key(KeyCode::Char('q')), &c), None);
        assert_eq!(map_key(key(KeyCode::Tab), &c), None);
    }

    #[test]
    fn test_mouse_controls_fire_on_press_only() {
        let hits = TableHitMap {
            actions: vec![ActionHit {
                area: Rect::new(50, 6, 10, 1),
                row: 2,
                action: 1,
            }],
            next: Some(Rect::new(70, 18, 6, 1)),
            ..Default::default()
        };

        let expected = Some(TableEvent::InvokeAction { row: 2, action: 1 });
        let down = click(MouseEventKind::Down(MouseButton::Left), 52, 6);
        let up = click(MouseEventKind::Up(MouseButton::Left), 52, 6);
        assert_eq!(map_mouse(down, &hits, 1, PerPage::Ten), expected);
        assert_eq!(map_mouse(up, &hits, 1, PerPage::Ten), None);

        let down = click(MouseEventKind::Down(MouseButton::Left), 71, 18);
        let up = click(MouseEventKind::Up(MouseButton::Left), 71, 18);
        assert_eq!(map_mouse(down, &hits, 1, PerPage::Ten), Some(TableEvent::PageChanged(2)));
        assert_eq!(map_mouse(up, &hits, 1, PerPage::Ten), None);
    }

    #[test]
    fn test_mouse_outside_controls() {
        let hits = TableHitMap::default();
        let down = click(MouseEventKind::Down(MouseButton::Left), 3, 3);
        assert_eq!(map_mouse(down, &hits, 1, PerPage::Ten), None);
        let scroll = click(MouseEventKind::ScrollDown, 3, 3);
        assert_eq!(map_mouse(scroll, &hits, 1, PerPage::Ten), None);
    }
}
