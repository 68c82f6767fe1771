use serde::{Deserialize, Serialize};

use crate::location::Fix;

/// Receives notice that the visible state of the tracker changed.
pub trait StateUpdateSender {
    /// The [TrackerUiState] changed, the UI should fetch it again
    fn send_update(&self);

    /// Show a blocking alert, used when the platform can't provide locations at all
    fn alert(&self, message: &str);

    /// A notification was raised while processing a fix, contains its final text
    fn notify(&self, _message: &str) {}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, specta::Type)]
/// Everything the UI displays, besides the map
pub struct TrackerUiState {
    /// Last displayed latitude, not present until the first fix
    pub latitude: Option<f64>,
    /// Last displayed longitude, not present until the first fix
    pub longitude: Option<f64>,
    /// Last displayed accuracy in meters, not present until the first fix
    pub accuracy: Option<f64>,
    pub status: String,
    /// The most recent notification, never cleared once set
    pub notification: Option<String>,
    /// Whether the "start watching" control is enabled
    pub start_enabled: bool,
    /// Whether the "stop watching" control is enabled
    pub stop_enabled: bool,
}

impl Default for TrackerUiState {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            accuracy: None,
            status: "Not watching location.".to_string(),
            notification: None,
            start_enabled: true,
            stop_enabled: false,
        }
    }
}

impl TrackerUiState {
    pub fn show_fix(&mut self, fix: &Fix) {
        self.latitude = Some(fix.latitude);
        self.longitude = Some(fix.longitude);
        self.accuracy = Some(fix.accuracy);
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Overwrite the notification panel, there's only ever one message
    pub fn show_notification(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
    }

    pub fn set_watching(&mut self, watching: bool) {
        self.start_enabled = !watching;
        self.stop_enabled = watching;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_last_write_wins() {
        let mut ui = TrackerUiState::default();
        assert!(ui.notification.is_none());

        ui.show_notification("first");
        ui.show_notification("second");

        assert_eq!(ui.notification.as_deref(), Some("second"));
    }

    #[test]
    fn test_controls() {
        let mut ui = TrackerUiState::default();
        assert!(ui.start_enabled && !ui.stop_enabled);

        ui.set_watching(true);
        assert!(!ui.start_enabled && ui.stop_enabled);

        ui.set_watching(false);
        assert!(ui.start_enabled && !ui.stop_enabled);
    }
}
