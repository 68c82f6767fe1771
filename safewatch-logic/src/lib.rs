mod dialer;
mod display;
mod distance;
mod failure;
mod location;
mod map;
mod processor;
mod settings;
mod tracker;
mod zones;

pub use dialer::{Dialer, EmergencyDialer};
pub use display::{StateUpdateSender, TrackerUiState};
pub use distance::{EARTH_RADIUS_METERS, distance};
pub use failure::LocationFailure;
pub use location::{
    Fix, LatLon, LocationEvent, LocationSender, LocationSource, SubscriptionSeq, WatchId,
    WatchOptions,
};
pub use map::{MapView, MapWidget, TileLayer};
pub use processor::PositionProcessor;
pub use settings::{MapSettings, TrackerSettings};
pub use tracker::{Tracker, WatchSession};
pub use zones::{UnsafeZone, ZoneRegistry};

pub mod prelude {
    use anyhow::Error as AnyhowError;
    use std::result::Result as StdResult;
    pub type Result<T = (), E = AnyhowError> = StdResult<T, E>;
    pub use anyhow::Context;
}
