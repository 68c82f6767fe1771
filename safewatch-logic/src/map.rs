use log::debug;
use serde::{Deserialize, Serialize};

use crate::location::LatLon;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, specta::Type)]
/// Base tile layer for the map
pub struct TileLayer {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            max_zoom: 19,
        }
    }
}

/// A map display provided by the platform.
pub trait MapWidget {
    /// Create the view centered on `center` and add the base tile layer
    fn create(&mut self, center: LatLon, zoom: u8, tiles: &TileLayer);
    /// Add the position marker
    fn place_marker(&mut self, at: LatLon);
    /// Move the existing position marker
    fn move_marker(&mut self, to: LatLon);
    /// Recenter the view, keeping the zoom
    fn set_view(&mut self, center: LatLon);
}

/// Lazily creates the map on the first position, then just follows the position.
/// Once created the map stays created.
pub struct MapView<W: MapWidget> {
    widget: W,
    zoom: u8,
    tiles: TileLayer,
    initialized: bool,
}

impl<W: MapWidget> MapView<W> {
    pub fn new(widget: W, zoom: u8, tiles: TileLayer) -> Self {
        Self {
            widget,
            zoom,
            tiles,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    fn initialize(&mut self, at: LatLon) {
        debug!("Creating map at {}, {}", at.lat, at.lon);
        self.widget.create(at, self.zoom, &self.tiles);
        self.widget.place_marker(at);
        self.initialized = true;
    }

    pub fn update(&mut self, at: LatLon) {
        if self.initialized {
            self.widget.move_marker(at);
            self.widget.set_view(at);
        } else {
            self.initialize(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{MapCall, RecordingMap};

    const A: LatLon = LatLon { lat: 1.0, lon: 2.0 };
    const B: LatLon = LatLon { lat: 3.0, lon: 4.0 };

    #[test]
    fn test_first_update_initializes() {
        let mut view = MapView::new(RecordingMap::default(), 13, TileLayer::default());
        assert!(!view.is_initialized());

        view.update(A);

        assert!(view.is_initialized());
        assert_eq!(
            view.widget().calls,
            vec![
                MapCall::Create(A, 13, TileLayer::default()),
                MapCall::PlaceMarker(A)
            ]
        );
    }

    #[test]
    fn test_later_updates_move() {
        let mut view = MapView::new(RecordingMap::default(), 13, TileLayer::default());
        view.update(A);
        view.update(B);
        view.update(A);

        let calls = &view.widget().calls;
        assert_eq!(
            calls
                .iter()
                .filter(|c| matches!(c, MapCall::Create(..)))
                .count(),
            1,
            "Map created more than once"
        );
        assert_eq!(
            &calls[2..],
            &[
                MapCall::MoveMarker(B),
                MapCall::SetView(B),
                MapCall::MoveMarker(A),
                MapCall::SetView(A)
            ]
        );
    }
}
