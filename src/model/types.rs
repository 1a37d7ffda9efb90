//! Shared types for the Model

/// Pending delete waiting for y/n
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmDelete {
    pub resource: &'static str,
    pub id: u64,
    /// Human-readable name of the record ("Circle Lahore")
    pub label: String,
}

/// Read-only popup listing one record's fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailPopup {
    pub title: String,
    pub fields: Vec<(String, String)>,
    pub scroll_offset: u16,
}

/// Requests raised by row actions for the application to carry out
///
/// Row actions run inside the viewer and cannot reach the application state,
/// so they send one of these over a channel instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppCommand {
    ShowDetail(DetailPopup),
    ConfirmDelete(ConfirmDelete),
}
