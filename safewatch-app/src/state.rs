use std::sync::Arc;

use log::{error, info};
use safewatch_logic::{EmergencyDialer, StateUpdateSender, Tracker, TrackerSettings};
use serde::{Deserialize, Serialize};
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tauri_plugin_notification::NotificationExt;
use tauri_specta::Event;

use crate::{dialer::TauriDialer, location::TauriLocation, map::TauriMap};

/// The tracker's UI state has changed, fetch it again with `get_ui_state`
#[derive(Serialize, Deserialize, Clone, Default, Debug, specta::Type, tauri_specta::Event)]
pub struct UiStateUpdate;

const APP_TITLE: &str = "Safewatch";

pub struct TauriStateUpdateSender(AppHandle);

impl TauriStateUpdateSender {
    fn new(app: &AppHandle) -> Self {
        Self(app.clone())
    }
}

impl StateUpdateSender for TauriStateUpdateSender {
    fn send_update(&self) {
        if let Err(why) = UiStateUpdate.emit(&self.0) {
            error!("Error sending tracker state update to UI: {why:?}");
        }
    }

    fn alert(&self, message: &str) {
        self.0
            .dialog()
            .message(message)
            .title(APP_TITLE)
            .kind(MessageDialogKind::Warning)
            .show(|_| {});
    }

    fn notify(&self, message: &str) {
        let res = self
            .0
            .notification()
            .builder()
            .title(APP_TITLE)
            .body(message)
            .show();
        if let Err(why) = res {
            error!("Failed to show notification: {why:?}");
        }
    }
}

pub type AppTracker = Tracker<TauriLocation, TauriMap, TauriStateUpdateSender>;

pub struct AppState {
    pub tracker: Arc<AppTracker>,
    pub dialer: EmergencyDialer<TauriDialer>,
}

impl AppState {
    pub fn new(app: &AppHandle) -> Self {
        let settings = TrackerSettings::default();
        let dialer = EmergencyDialer::new(
            TauriDialer::new(app.clone()),
            settings.emergency_number.clone(),
        );
        let tracker = Arc::new(AppTracker::new(
            settings,
            TauriLocation::new(app.clone()),
            TauriMap::new(app.clone()),
            TauriStateUpdateSender::new(app),
        ));
        Self { tracker, dialer }
    }

    /// Run the tracker's event loop in the background until the app exits
    pub fn spawn_tracker_loop(&self) {
        let tracker = self.tracker.clone();
        tauri::async_runtime::spawn(async move {
            tracker.main_loop().await;
            info!("Tracker loop exited");
        });
    }
}
