use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::prelude::*;

/// Degrees for coordinates, meters for accuracy, as the platform reports them
pub type LocationComponent = f64;

/// Handle the platform hands back for an active subscription
pub type WatchId = u32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, specta::Type)]
/// A single position reading as gotten from a Geolocation API
pub struct Fix {
    /// Latitude in degrees
    pub latitude: LocationComponent,
    /// Longitude in degrees
    pub longitude: LocationComponent,
    /// Accuracy radius in meters
    pub accuracy: LocationComponent,
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
        }
    }

    pub fn lat_lon(&self) -> LatLon {
        LatLon {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, specta::Type)]
/// A bare coordinate pair, used for map positioning
pub struct LatLon {
    pub lat: LocationComponent,
    pub lon: LocationComponent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, specta::Type)]
/// Options passed to the platform when subscribing
pub struct WatchOptions {
    pub enable_high_accuracy: bool,
    /// Per-reading timeout in milliseconds
    pub timeout_ms: u32,
    /// Maximum age of a cached reading in milliseconds, 0 forces a fresh one every time
    pub maximum_age_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: 5000,
            maximum_age_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Something delivered by an active subscription
pub enum LocationEvent {
    /// A successful reading
    Fix(Fix),
    /// A failed reading, contains the raw platform failure code
    Failure(u16),
}

/// Number the tracker gives each subscription it starts, so readings still queued from an
/// earlier one can be told apart from current ones
pub type SubscriptionSeq = u32;

/// Sending half handed to a [LocationSource], stamps every event with the subscription it
/// was created for
#[derive(Debug, Clone)]
pub struct LocationSender {
    seq: SubscriptionSeq,
    tx: UnboundedSender<(SubscriptionSeq, LocationEvent)>,
}

impl LocationSender {
    pub fn new(
        seq: SubscriptionSeq,
        tx: UnboundedSender<(SubscriptionSeq, LocationEvent)>,
    ) -> Self {
        Self { seq, tx }
    }

    pub fn seq(&self) -> SubscriptionSeq {
        self.seq
    }

    /// Returns false once the receiving tracker is gone
    pub fn send(&self, event: LocationEvent) -> bool {
        self.tx.send((self.seq, event)).is_ok()
    }
}

/// A continuous position source provided by the platform.
pub trait LocationSource {
    /// Whether the platform has any location capability at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Begin delivering [LocationEvent]s to `sender` until [LocationSource::cancel] is called
    /// with the returned id. Readings may keep arriving for a short while after cancelling.
    fn subscribe(&self, options: &WatchOptions, sender: LocationSender) -> Result<WatchId>;

    /// Stop a subscription
    fn cancel(&self, id: WatchId);
}
