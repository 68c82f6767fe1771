use anyhow::{Context, Result};
use log::{error, warn};
use safewatch_logic::{
    Fix, LocationEvent, LocationFailure, LocationSender, LocationSource, WatchId, WatchOptions,
};
use tauri::AppHandle;
use tauri_plugin_geolocation::{GeolocationExt, PositionOptions, WatchEvent};

pub struct TauriLocation(AppHandle);

impl TauriLocation {
    pub fn new(app: AppHandle) -> Self {
        Self(app)
    }
}

/// The plugin only reports failures as text, recover the code from it
fn failure_code(message: &str) -> u16 {
    let message = message.to_ascii_lowercase();
    let failure = if message.contains("denied") || message.contains("permission") {
        LocationFailure::PermissionDenied
    } else if message.contains("unavailable") || message.contains("disabled") {
        LocationFailure::PositionUnavailable
    } else if message.contains("timeout") || message.contains("timed out") {
        LocationFailure::Timeout
    } else {
        LocationFailure::Unknown
    };
    failure.code()
}

impl LocationSource for TauriLocation {
    fn is_supported(&self) -> bool {
        // The geolocation plugin only has mobile implementations
        cfg!(mobile)
    }

    fn subscribe(&self, options: &WatchOptions, sender: LocationSender) -> Result<WatchId> {
        let options = PositionOptions {
            enable_high_accuracy: options.enable_high_accuracy,
            timeout: options.timeout_ms,
            maximum_age: options.maximum_age_ms,
        };

        self.0
            .geolocation()
            .watch_position(options, move |event| {
                let event = match event {
                    WatchEvent::Position(pos) => LocationEvent::Fix(Fix::new(
                        pos.coords.latitude,
                        pos.coords.longitude,
                        pos.coords.accuracy,
                    )),
                    WatchEvent::Error(why) => {
                        warn!("Location watch error: {why}");
                        LocationEvent::Failure(failure_code(&why))
                    }
                };
                // Receiver is gone once the tracker shuts down
                sender.send(event);
            })
            .context("Failed to start location watch")
    }

    fn cancel(&self, id: WatchId) {
        if let Err(why) = self.0.geolocation().clear_watch(id) {
            error!("Failed to clear location watch {id}: {why:?}");
        }
    }
}
