use log::error;
use safewatch_logic::{LatLon, MapWidget, TileLayer};
use serde::{Deserialize, Serialize};
use tauri::AppHandle;
use tauri_specta::Event;

/// The map in the web view should change
#[derive(Serialize, Deserialize, Clone, Debug, specta::Type, tauri_specta::Event)]
pub enum MapUpdate {
    /// Create the map centered here with the given tile layer
    Create {
        center: LatLon,
        zoom: u8,
        tiles: TileLayer,
    },
    /// Add the position marker
    PlaceMarker(LatLon),
    /// Move the position marker
    MoveMarker(LatLon),
    /// Recenter the map
    SetView(LatLon),
}

/// Forwards map changes to the web view, where the actual map widget lives
pub struct TauriMap(AppHandle);

impl TauriMap {
    pub fn new(app: AppHandle) -> Self {
        Self(app)
    }

    fn emit(&self, update: MapUpdate) {
        if let Err(why) = update.emit(&self.0) {
            error!("Error sending map update to UI: {why:?}");
        }
    }
}

impl MapWidget for TauriMap {
    fn create(&mut self, center: LatLon, zoom: u8, tiles: &TileLayer) {
        self.emit(MapUpdate::Create {
            center,
            zoom,
            tiles: tiles.clone(),
        });
    }

    fn place_marker(&mut self, at: LatLon) {
        self.emit(MapUpdate::PlaceMarker(at));
    }

    fn move_marker(&mut self, to: LatLon) {
        self.emit(MapUpdate::MoveMarker(to));
    }

    fn set_view(&mut self, center: LatLon) {
        self.emit(MapUpdate::SetView(center));
    }
}
