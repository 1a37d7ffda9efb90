//! Tabular Renderer
//!
//! Pure presentation of one page of records. The renderer draws whatever
//! state it is handed (loading, error, empty or rows) plus the pagination
//! footer, and reports where its interactive controls landed so mouse input
//! can be mapped back to events. It never fetches and never fails.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use super::query::PerPage;
use super::Record;
use crate::logic::errors::{self, FetchError};
use crate::logic::{formatting, navigation, pagination};
use crate::utils::truncate_to_width;

/// Width of the "#" sequence column
const SEQ_WIDTH: u16 = 5;

/// Formats one cell for a record
///
/// Blanket-implemented for `Fn(&T, usize) -> String`, where the `usize` is the
/// row's index within the page.
pub trait CellFormatter<T> {
    fn format(&self, record: &T, row_index: usize) -> String;
}

impl<T, F> CellFormatter<T> for F
where
    F: Fn(&T, usize) -> String,
{
    fn format(&self, record: &T, row_index: usize) -> String {
        self(record, row_index)
    }
}

pub struct Column<T> {
    pub key: String,
    pub label: String,
    pub width: Constraint,
    render: Option<Box<dyn CellFormatter<T>>>,
}

impl<T: Record> Column<T> {
    /// Column showing the raw field `key` verbatim
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: Constraint::Fill(1),
            render: None,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Constraint::Length(width);
        self
    }

    pub fn render_with<F>(mut self, render: F) -> Self
    where
        F: Fn(&T, usize) -> String + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    pub fn has_formatter(&self) -> bool {
        self.render.is_some()
    }

    /// Text for this column in one row
    ///
    /// `raw` is the record's serialized form; it is only consulted when the
    /// column has no formatter.
    pub fn cell(&self, record: &T, raw: &Value, row_index: usize) -> String {
        match &self.render {
            Some(render) => render.format(record, row_index),
            None => raw.get(&self.key).map(formatting::json_cell).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionVariant {
    Default,
    Danger,
}

pub struct RowAction<T> {
    pub label: String,
    pub hotkey: char,
    pub variant: ActionVariant,
    on_invoke: Box<dyn Fn(&T)>,
}

impl<T> RowAction<T> {
    pub fn new<F>(label: impl Into<String>, hotkey: char, on_invoke: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        Self {
            label: label.into(),
            hotkey,
            variant: ActionVariant::Default,
            on_invoke: Box::new(on_invoke),
        }
    }

    pub fn danger(mut self) -> Self {
        self.variant = ActionVariant::Danger;
        self
    }

    pub fn invoke(&self, record: &T) {
        (self.on_invoke)(record)
    }

    /// Text drawn in the action's cell, e.g. "[d] Delete"
    pub fn cell_text(&self) -> String {
        format!("[{}] {}", self.hotkey, self.label)
    }
}

/// Everything the renderer draws, borrowed from the screen for one frame
pub struct TableView<'a, T> {
    pub title: &'a str,
    pub rows: &'a [T],
    pub columns: &'a [Column<T>],
    pub actions: &'a [RowAction<T>],
    pub loading: bool,
    pub error: Option<&'a FetchError>,
    pub page: u32,
    pub per_page: PerPage,
    pub total: u64,
    pub search: &'a str,
    pub search_active: bool,
    pub selected: Option<usize>,
    pub retry_available: bool,
    pub vim_mode: bool,
}

/// Mutually exclusive body states, checked in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Loading,
    Error,
    Empty,
    Rows,
}

pub fn render_state(loading: bool, has_error: bool, rows_len: usize) -> RenderState {
    if loading {
        RenderState::Loading
    } else if has_error {
        RenderState::Error
    } else if rows_len == 0 {
        RenderState::Empty
    } else {
        RenderState::Rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionHit {
    pub area: Rect,
    pub row: usize,
    pub action: usize,
}

/// Something clickable in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Action { row: usize, action: usize },
    Row(usize),
    Prev,
    Next,
    PerPage,
    Retry,
    Search,
}

/// Screen positions of the table's controls from the last render
///
/// Disabled controls (Prev on page 1, Next on the last page, Retry without a
/// retry handler) are not recorded, so clicks on them hit nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableHitMap {
    pub rows: Vec<(Rect, usize)>,
    pub actions: Vec<ActionHit>,
    pub prev: Option<Rect>,
    pub next: Option<Rect>,
    pub per_page: Option<Rect>,
    pub retry: Option<Rect>,
    pub search: Option<Rect>,
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

impl TableHitMap {
    pub fn target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        if let Some(hit) = self.actions.iter().find(|h| contains(h.area, column, row)) {
            return Some(HitTarget::Action {
                row: hit.row,
                action: hit.action,
            });
        }

        let controls = [
            (self.prev, HitTarget::Prev),
            (self.next, HitTarget::Next),
            (self.per_page, HitTarget::PerPage),
            (self.retry, HitTarget::Retry),
            (self.search, HitTarget::Search),
        ];
        for (area, target) in controls {
            if area.is_some_and(|a| contains(a, column, row)) {
                return Some(target);
            }
        }

        self.rows
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, idx)| HitTarget::Row(*idx))
    }
}

/// Write `text` centered on the one-line `line`; returns the occupied area
fn centered_text(f: &mut Frame, line: Rect, text: &str, style: Style) -> Rect {
    let text = truncate_to_width(text, line.width as usize);
    let width = (text.width() as u16).min(line.width);
    let x = line.x + (line.width - width) / 2;
    f.buffer_mut().set_stringn(x, line.y, &text, width as usize, style);
    Rect {
        x,
        y: line.y,
        width,
        height: 1,
    }
}

fn write_cell(f: &mut Frame, cell: Rect, y: u16, text: &str, style: Style) {
    let text = truncate_to_width(text, cell.width as usize);
    f.buffer_mut().set_stringn(cell.x, y, &text, cell.width as usize, style);
}

/// Render the whole table region and return its hit map
pub fn render_table<T: Record>(f: &mut Frame, area: Rect, view: &TableView<'_, T>) -> TableHitMap {
    let mut hits = TableHitMap::default();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", view.title))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [search_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(2),
        Constraint::Length(1),
    ])
    .areas(inner);

    let filter = crate::ui::search::FilterBox {
        term: view.search,
        editing: view.search_active,
        matches: if view.loading { None } else { Some(view.total) },
        vim_mode: view.vim_mode,
    };
    crate::ui::search::render_filter_box(f, search_area, &filter);
    hits.search = Some(search_area);

    render_body(f, body_area, view, &mut hits);
    render_footer(f, footer_area, view, &mut hits);

    hits
}

fn render_body<T: Record>(f: &mut Frame, body: Rect, view: &TableView<'_, T>, hits: &mut TableHitMap) {
    if body.height == 0 {
        return;
    }

    let action_texts: Vec<String> = view.actions.iter().map(|a| a.cell_text()).collect();

    let mut constraints = vec![Constraint::Length(SEQ_WIDTH)];
    constraints.extend(view.columns.iter().map(|c| c.width));
    constraints.extend(action_texts.iter().map(|t| Constraint::Length(t.width() as u16)));

    let header = Rect { height: 1, ..body };
    let cells = Layout::horizontal(constraints).spacing(1).split(header);

    // Header
    let header_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    write_cell(f, cells[0], header.y, "#", header_style);
    for (idx, column) in view.columns.iter().enumerate() {
        write_cell(f, cells[1 + idx], header.y, &column.label, header_style);
    }
    if let Some(first_action) = cells.get(1 + view.columns.len()) {
        if !view.actions.is_empty() {
            write_cell(f, *first_action, header.y, "Actions", header_style);
        }
    }

    let rows_area = Rect {
        y: body.y + 1,
        height: body.height - 1,
        ..body
    };
    if rows_area.height == 0 {
        return;
    }

    match render_state(view.loading, view.error.is_some(), view.rows.len()) {
        RenderState::Loading => {
            let line = Rect { height: 1, ..rows_area };
            centered_text(f, line, "Loading…", Style::default().fg(Color::Cyan));
        }
        RenderState::Error => {
            let Some(error) = view.error else { return };
            let mut y = rows_area.y;
            let bottom = rows_area.y + rows_area.height;

            let line = Rect { y, height: 1, ..rows_area };
            centered_text(f, line, &format!("⚠ {}", error.message), Style::default().fg(Color::Red));
            y += 1;

            if let Some(hint) = errors::hint_for(error.kind) {
                if y < bottom {
                    let line = Rect { y, height: 1, ..rows_area };
                    centered_text(f, line, hint, Style::default().fg(Color::DarkGray));
                    y += 1;
                }
            }

            if view.retry_available {
                // Blank line before the control when there is room
                if y + 1 < bottom {
                    y += 1;
                }
                if y < bottom {
                    let line = Rect { y, height: 1, ..rows_area };
                    let retry_style = Style::default().fg(Color::Black).bg(Color::Yellow);
                    hits.retry = Some(centered_text(f, line, "[ Retry (r) ]", retry_style));
                }
            }
        }
        RenderState::Empty => {
            let line = Rect { height: 1, ..rows_area };
            let text = if view.search.is_empty() {
                "No records found".to_string()
            } else {
                format!("No records match \"{}\"", view.search)
            };
            centered_text(f, line, &text, Style::default().fg(Color::Gray));
        }
        RenderState::Rows => {
            let capacity = rows_area.height as usize;
            let offset = navigation::scroll_offset(view.selected, capacity);
            let needs_raw = view.columns.iter().any(|c| !c.has_formatter());
            let per_page = view.per_page.get();

            for (idx, record) in view.rows.iter().enumerate().skip(offset).take(capacity) {
                let y = rows_area.y + (idx - offset) as u16;
                let row_rect = Rect { y, height: 1, ..rows_area };

                let selected = view.selected == Some(idx);
                let base = if selected {
                    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                if selected {
                    f.buffer_mut().set_style(row_rect, base);
                }

                let raw = if needs_raw {
                    serde_json::to_value(record).unwrap_or(Value::Null)
                } else {
                    Value::Null
                };

                let seq = pagination::row_sequence_number(view.page, per_page, idx);
                write_cell(f, cells[0], y, &format!("{:>width$}", seq, width = SEQ_WIDTH as usize), base);

                for (col_idx, column) in view.columns.iter().enumerate() {
                    let text = column.cell(record, &raw, idx);
                    write_cell(f, cells[1 + col_idx], y, &text, base);
                }

                for (action_idx, action) in view.actions.iter().enumerate() {
                    let cell = cells[1 + view.columns.len() + action_idx];
                    let color = match action.variant {
                        ActionVariant::Default => Color::Cyan,
                        ActionVariant::Danger => Color::Red,
                    };
                    write_cell(f, cell, y, &action_texts[action_idx], base.fg(color));
                    hits.actions.push(ActionHit {
                        area: Rect { y, height: 1, ..cell },
                        row: idx,
                        action: action_idx,
                    });
                }

                hits.rows.push((row_rect, idx));
            }
        }
    }
}

fn render_footer<T>(f: &mut Frame, footer: Rect, view: &TableView<'_, T>, hits: &mut TableHitMap) {
    if footer.height == 0 {
        return;
    }

    let per_page = view.per_page.get();
    let total_pages = pagination::total_pages(view.total, per_page);
    // Rows of the last good page do not belong to the page being asked for
    let shown = match render_state(view.loading, view.error.is_some(), view.rows.len()) {
        RenderState::Rows => view.rows.len(),
        _ => 0,
    };
    let summary = pagination::footer_text(view.page, per_page, view.total, shown);

    let prev_label = "◀ Prev";
    let page_label = format!("Page {} of {}", view.page, total_pages);
    let next_label = "Next ▶";
    let per_page_label = format!("Per page: {}", view.per_page);

    let [summary_area, prev_area, page_area, next_area, per_page_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(prev_label.width() as u16),
        Constraint::Length(page_label.width() as u16),
        Constraint::Length(next_label.width() as u16),
        Constraint::Length(per_page_label.width() as u16),
    ])
    .spacing(2)
    .areas(footer);

    write_cell(f, summary_area, footer.y, &summary, Style::default().fg(Color::Gray));

    let enabled = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);

    let prev_on = pagination::prev_enabled(view.page);
    write_cell(f, prev_area, footer.y, prev_label, if prev_on { enabled } else { disabled });
    if prev_on {
        hits.prev = Some(prev_area);
    }

    write_cell(f, page_area, footer.y, &page_label, Style::default());

    let next_on = pagination::next_enabled(view.page, view.total, per_page);
    write_cell(f, next_area, footer.y, next_label, if next_on { enabled } else { disabled });
    if next_on {
        hits.next = Some(next_area);
    }

    write_cell(f, per_page_area, footer.y, &per_page_label, Style::default().fg(Color::Yellow));
    hits.per_page = Some(per_page_area);
}
