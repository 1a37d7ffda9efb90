//! Row action commands
//!
//! Row actions run inside a screen and report what they want through
//! [`AppCommand`]; the app opens the matching dialog here. Only one modal is
//! shown at a time, so a command arriving while one is open replaces it.

use crate::model::AppCommand;
use crate::services::ApiRequest;
use crate::App;

impl App {
    pub(crate) fn handle_command(&mut self, command: AppCommand) {
        match command {
            AppCommand::ShowDetail(popup) => {
                crate::log_debug(&format!("DEBUG [App]: detail popup '{}'", popup.title));
                self.model.ui.close_all_modals();
                self.model.ui.detail_popup = Some(popup);
            }
            AppCommand::ConfirmDelete(pending) => {
                crate::log_debug(&format!(
                    "DEBUG [App]: confirm delete {} id={}",
                    pending.resource, pending.id
                ));
                self.model.ui.close_all_modals();
                self.model.ui.confirm_delete = Some(pending);
            }
        }
    }

    /// User answered yes to the delete dialog
    pub(crate) fn confirm_pending_delete(&mut self) {
        let Some(pending) = self.model.ui.confirm_delete.take() else {
            return;
        };
        self.model.ui.show_toast(format!("Deleting {}…", pending.label));
        self.send_api_request(ApiRequest::DeleteRecord {
            resource: pending.resource,
            id: pending.id,
            label: pending.label,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::app::testing::harness;
    use crate::model::{AppCommand, ConfirmDelete, DetailPopup};
    use crate::services::ApiRequest;

    fn pending() -> ConfirmDelete {
        ConfirmDelete {
            resource: "circles",
            id: 12,
            label: "Circle Lahore".to_string(),
        }
    }

    #[tokio::test]
    async fn test_commands_open_dialogs() {
        let mut h = harness();
        h.commands
            .send(AppCommand::ShowDetail(DetailPopup {
                title: "Circle #12".to_string(),
                fields: vec![("Name".to_string(), "Lahore".to_string())],
                scroll_offset: 0,
            }))
            .unwrap();
        h.app.tick();
        assert!(h.app.model.ui.detail_popup.is_some());

        h.commands.send(AppCommand::ConfirmDelete(pending())).unwrap();
        h.app.tick();
        assert!(h.app.model.ui.detail_popup.is_none());
        assert_eq!(h.app.model.ui.confirm_delete, Some(pending()));
    }

    #[tokio::test]
    async fn test_confirm_sends_delete_request() {
        let mut h = harness();
        h.app.model.ui.confirm_delete = Some(pending());
        h.app.confirm_pending_delete();

        assert!(h.app.model.ui.confirm_delete.is_none());
        let ApiRequest::DeleteRecord { resource, id, .. } = h.api_requests.try_recv().unwrap();
        assert_eq!((resource, id), ("circles", 12));

        // Nothing pending: nothing sent
        h.app.confirm_pending_delete();
        assert!(h.api_requests.try_recv().is_err());
    }
}
