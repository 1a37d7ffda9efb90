//! Application state and orchestration
//!
//! [`App`] ties the collection screens to the model, the background API
//! worker and the row-action command channel. Input handling lives in
//! `handlers/`, drawing in `ui/`.

pub(crate) mod commands;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::api::PtwClient;
use crate::config::Config;
use crate::model::{AppCommand, Model};
use crate::resources::{self, ResourceKind, ScreenContext};
use crate::services::{self, ApiRequest, ApiResponse};
use crate::viewer::query::PerPage;
use crate::viewer::CollectionScreen;

/// One tab: a collection screen and the backend collection behind it
pub struct Screen {
    pub endpoint: &'static str,
    pub view: Box<dyn CollectionScreen>,
}

pub struct App {
    pub model: Model,
    pub screens: Vec<Screen>,
    pub base_url: String,

    api_tx: mpsc::UnboundedSender<ApiRequest>,
    api_rx: mpsc::UnboundedReceiver<ApiResponse>,
    command_rx: mpsc::UnboundedReceiver<AppCommand>,
}

impl App {
    /// Build the client, the API worker and every screen, then load the first
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &Config, per_page: PerPage) -> Result<Self> {
        let client = PtwClient::new(
            config.base_url.clone(),
            config.api_token.clone(),
            config.request_timeout(),
        )?;
        let (api_tx, api_rx) = services::spawn_api_service(client.clone());
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let ctx = ScreenContext {
            client: client.clone(),
            commands: command_tx,
            per_page,
            vim_mode: config.vim_mode,
        };
        let screens = ResourceKind::ALL
            .iter()
            .map(|kind| Screen {
                endpoint: kind.endpoint(),
                view: resources::build_screen(*kind, &ctx),
            })
            .collect();

        crate::log_debug(&format!(
            "DEBUG [App]: base_url={} per_page={} vim_mode={}",
            client.base_url(),
            per_page,
            config.vim_mode
        ));

        Ok(Self::from_parts(
            Model::new(config.vim_mode),
            screens,
            client.base_url().to_string(),
            api_tx,
            api_rx,
            command_rx,
        ))
    }

    /// Assemble an app from already-built pieces and mount the first screen
    pub fn from_parts(
        model: Model,
        screens: Vec<Screen>,
        base_url: String,
        api_tx: mpsc::UnboundedSender<ApiRequest>,
        api_rx: mpsc::UnboundedReceiver<ApiResponse>,
        command_rx: mpsc::UnboundedReceiver<AppCommand>,
    ) -> Self {
        let mut app = Self {
            model,
            screens,
            base_url,
            api_tx,
            api_rx,
            command_rx,
        };
        app.mount_active();
        app
    }

    pub fn active_screen(&self) -> Option<&dyn CollectionScreen> {
        self.screens.get(self.model.active_screen).map(|s| s.view.as_ref())
    }

    pub fn active_screen_mut(&mut self) -> Option<&mut (dyn CollectionScreen + 'static)> {
        self.screens.get_mut(self.model.active_screen).map(|s| s.view.as_mut())
    }

    fn mount_active(&mut self) {
        if let Some(screen) = self.active_screen_mut() {
            screen.mount();
        }
    }

    /// Show screen `index`, loading it on first visit
    pub fn switch_to(&mut self, index: usize) {
        if self.model.select_screen(index, self.screens.len()) {
            self.mount_active();
        }
    }

    pub fn cycle_screen(&mut self, forward: bool) {
        self.model.cycle_screen(self.screens.len(), forward);
        self.mount_active();
    }

    /// Refetch every screen showing `endpoint` that has been loaded
    pub fn refresh_endpoint(&mut self, endpoint: &str) {
        for screen in self.screens.iter_mut().filter(|s| s.endpoint == endpoint) {
            if screen.view.status() != crate::viewer::fetcher::FetchStatus::Idle {
                screen.view.refresh();
            }
        }
    }

    /// Hand a mutation to the background worker
    pub fn send_api_request(&self, request: ApiRequest) {
        if self.api_tx.send(request).is_err() {
            crate::log_debug("DEBUG [App]: API service is gone, request dropped");
        }
    }

    /// Drain every channel and expire the toast
    ///
    /// Returns true if anything changed that needs a redraw.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        for screen in self.screens.iter_mut() {
            changed |= screen.view.tick();
        }

        while let Ok(command) = self.command_rx.try_recv() {
            self.handle_command(command);
            changed = true;
        }

        while let Ok(response) = self.api_rx.try_recv() {
            crate::handlers::handle_api_response(self, response);
            changed = true;
        }

        if self.model.ui.should_dismiss_toast() {
            self.model.ui.dismiss_toast();
            changed = true;
        }

        changed
    }
}
