//! Admin screens
//!
//! One [`CollectionViewer`] per backend collection, with its columns and row
//! actions. Row actions never touch application state directly; they send an
//! [`AppCommand`] to the application.

use serde::de::DeserializeOwned;
use tokio::sync::mpsc;

use crate::api::{PtwClient, ResourceLister};
use crate::logic::formatting;
use crate::model::{AppCommand, ConfirmDelete, DetailPopup};
use crate::records::{
    ref_name, Circle, Division, Feeder, GridStation, Incident, Permit, Region, SubDivision,
};
use crate::viewer::query::PerPage;
use crate::viewer::table::{Column, RowAction};
use crate::viewer::{CollectionScreen, CollectionViewer, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Regions,
    Circles,
    Divisions,
    SubDivisions,
    Feeders,
    GridStations,
    Permits,
    Incidents,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Regions,
        ResourceKind::Circles,
        ResourceKind::Divisions,
        ResourceKind::SubDivisions,
        ResourceKind::Feeders,
        ResourceKind::GridStations,
        ResourceKind::Permits,
        ResourceKind::Incidents,
    ];

    /// Path segment under `/api/`
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::Regions => "regions",
            ResourceKind::Circles => "circles",
            ResourceKind::Divisions => "divisions",
            ResourceKind::SubDivisions => "sub-divisions",
            ResourceKind::Feeders => "feeders",
            ResourceKind::GridStations => "grid-stations",
            ResourceKind::Permits => "permits",
            ResourceKind::Incidents => "incidents",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::Regions => "Regions",
            ResourceKind::Circles => "Circles",
            ResourceKind::Divisions => "Divisions",
            ResourceKind::SubDivisions => "Sub-Divisions",
            ResourceKind::Feeders => "Feeders",
            ResourceKind::GridStations => "Grid Stations",
            ResourceKind::Permits => "Permits",
            ResourceKind::Incidents => "Incidents",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Regions => "Region",
            ResourceKind::Circles => "Circle",
            ResourceKind::Divisions => "Division",
            ResourceKind::SubDivisions => "Sub-Division",
            ResourceKind::Feeders => "Feeder",
            ResourceKind::GridStations => "Grid Station",
            ResourceKind::Permits => "Permit",
            ResourceKind::Incidents => "Incident",
        }
    }

    /// Hierarchy records can be deleted from the admin screens; workflow
    /// records (permits, incidents) cannot.
    pub fn deletable(self) -> bool {
        !matches!(self, ResourceKind::Permits | ResourceKind::Incidents)
    }
}

fn voltage(kv: Option<u32>) -> String {
    kv.map(|v| format!("{} kV", v)).unwrap_or_default()
}

fn timestamp(raw: &Option<String>) -> String {
    raw.as_deref().map(formatting::format_timestamp).unwrap_or_default()
}

fn view_action<T: Record>(kind: ResourceKind, commands: mpsc::UnboundedSender<AppCommand>) -> RowAction<T> {
    RowAction::new("View", 'v', move |record: &T| {
        let fields = serde_json::to_value(record)
            .map(|value| formatting::record_fields(&value))
            .unwrap_or_default();
        let _ = commands.send(AppCommand::ShowDetail(DetailPopup {
            title: format!("{} #{}", kind.singular(), record.id()),
            fields,
            scroll_offset: 0,
        }));
    })
}

fn delete_action<T: Record>(
    kind: ResourceKind,
    commands: mpsc::UnboundedSender<AppCommand>,
    label: fn(&T) -> String,
) -> RowAction<T> {
    RowAction::new("Delete", 'd', move |record: &T| {
        let _ = commands.send(AppCommand::ConfirmDelete(ConfirmDelete {
            resource: kind.endpoint(),
            id: record.id(),
            label: format!("{} {}", kind.singular(), label(record)),
        }));
    })
    .danger()
}

/// Everything a screen needs besides its record type
pub struct ScreenContext {
    pub client: PtwClient,
    pub commands: mpsc::UnboundedSender<AppCommand>,
    pub per_page: PerPage,
    pub vim_mode: bool,
}

fn screen<T>(
    kind: ResourceKind,
    ctx: &ScreenContext,
    columns: Vec<Column<T>>,
    label: fn(&T) -> String,
) -> Box<dyn CollectionScreen>
where
    T: Record + DeserializeOwned,
{
    let mut actions = vec![view_action(kind, ctx.commands.clone())];
    if kind.deletable() {
        actions.push(delete_action(kind, ctx.commands.clone(), label));
    }

    let list = ResourceLister::<T>::new(ctx.client.clone(), kind.endpoint());
    Box::new(
        CollectionViewer::new(kind.title(), ctx.per_page, list)
            .with_columns(columns)
            .with_actions(actions)
            .with_vim_mode(ctx.vim_mode),
    )
}

pub fn build_screen(kind: ResourceKind, ctx: &ScreenContext) -> Box<dyn CollectionScreen> {
    match kind {
        ResourceKind::Regions => screen::<Region>(
            kind,
            ctx,
            vec![Column::new("name", "Name"), Column::new("code", "Code").width(10)],
            |r| r.name.clone(),
        ),
        ResourceKind::Circles => screen::<Circle>(
            kind,
            ctx,
            vec![
                Column::new("name", "Name"),
                Column::new("code", "Code").width(10),
                Column::new("region", "Region").render_with(|c: &Circle, _| ref_name(&c.region)),
            ],
            |c| c.name.clone(),
        ),
        ResourceKind::Divisions => screen::<Division>(
            kind,
            ctx,
            vec![
                Column::new("name", "Name"),
                Column::new("code", "Code").width(10),
                Column::new("circle", "Circle").render_with(|d: &Division, _| ref_name(&d.circle)),
            ],
            |d| d.name.clone(),
        ),
        ResourceKind::SubDivisions => screen::<SubDivision>(
            kind,
            ctx,
            vec![
                Column::new("name", "Name"),
                Column::new("code", "Code").width(10),
                Column::new("division", "Division")
                    .render_with(|s: &SubDivision, _| ref_name(&s.division)),
            ],
            |s| s.name.clone(),
        ),
        ResourceKind::Feeders => screen::<Feeder>(
            kind,
            ctx,
            vec![
                Column::new("name", "Name"),
                Column::new("code", "Code").width(10),
                Column::new("voltage_kv", "Voltage")
                    .width(8)
                    .render_with(|f: &Feeder, _| voltage(f.voltage_kv)),
                Column::new("grid_station", "Grid Station")
                    .render_with(|f: &Feeder, _| ref_name(&f.grid_station)),
                Column::new("sub_division", "Sub-Division")
                    .render_with(|f: &Feeder, _| ref_name(&f.sub_division)),
            ],
            |f| f.name.clone(),
        ),
        ResourceKind::GridStations => screen::<GridStation>(
            kind,
            ctx,
            vec![
                Column::new("name", "Name"),
                Column::new("code", "Code").width(10),
                Column::new("voltage_kv", "Voltage")
                    .width(8)
                    .render_with(|g: &GridStation, _| voltage(g.voltage_kv)),
                Column::new("sub_division", "Sub-Division")
                    .render_with(|g: &GridStation, _| ref_name(&g.sub_division)),
            ],
            |g| g.name.clone(),
        ),
        ResourceKind::Permits => screen::<Permit>(
            kind,
            ctx,
            vec![
                Column::new("ptw_number", "PTW No.").width(16),
                Column::new("feeder", "Feeder").render_with(|p: &Permit, _| ref_name(&p.feeder)),
                Column::new("status", "Status").render_with(|p: &Permit, _| formatting::humanize_status(&p.status)),
                Column::new("scheduled_start", "Scheduled")
                    .width(16)
                    .render_with(|p: &Permit, _| timestamp(&p.scheduled_start)),
                Column::new("work_description", "Work"),
            ],
            |p| p.ptw_number.clone(),
        ),
        ResourceKind::Incidents => screen::<Incident>(
            kind,
            ctx,
            vec![
                Column::new("title", "Title"),
                Column::new("severity", "Severity").width(10).render_with(|i: &Incident, _| {
                    i.severity.as_deref().map(formatting::humanize_status).unwrap_or_default()
                }),
                Column::new("status", "Status").render_with(|i: &Incident, _| formatting::humanize_status(&i.status)),
                Column::new("feeder", "Feeder").render_with(|i: &Incident, _| ref_name(&i.feeder)),
                Column::new("occurred_at", "Occurred")
                    .width(16)
                    .render_with(|i: &Incident, _| timestamp(&i.occurred_at)),
            ],
            |i| i.title.clone(),
        ),
    }
}
