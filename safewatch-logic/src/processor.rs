use log::{debug, info};

use crate::{
    display::TrackerUiState,
    distance::distance,
    location::Fix,
    map::{MapView, MapWidget},
    zones::ZoneRegistry,
};

/// Turns incoming fixes into UI updates, map movement, and notifications.
pub struct PositionProcessor {
    threshold_meters: f64,
    zones: ZoneRegistry,
    last_fix: Option<Fix>,
}

impl PositionProcessor {
    pub fn new(threshold_meters: f64, zones: ZoneRegistry) -> Self {
        Self {
            threshold_meters,
            zones,
            last_fix: None,
        }
    }

    pub fn last_fix(&self) -> Option<&Fix> {
        self.last_fix.as_ref()
    }

    /// Forget the previous fix, the next fix won't be compared against anything
    pub fn reset(&mut self) {
        self.last_fix = None;
    }

    /// Process a single fix. Returns the final notification message if this fix raised one.
    pub fn process<W: MapWidget>(
        &mut self,
        fix: Fix,
        ui: &mut TrackerUiState,
        map: &mut MapView<W>,
    ) -> Option<String> {
        ui.show_fix(&fix);
        ui.set_status("Location updated.");

        map.update(fix.lat_lon());

        let mut raised = None;

        if let Some(prev) = self.last_fix {
            let moved = distance(prev.latitude, prev.longitude, fix.latitude, fix.longitude);
            debug!("Moved {moved:.2}m since last fix");
            if moved > self.threshold_meters {
                info!("Unusual movement of {moved:.2}m");
                let msg = format!(
                    "Unusual activity detected! Large movement of {moved:.2} meters."
                );
                ui.show_notification(msg.clone());
                raised = Some(msg);
            }
        }

        // Zone warnings take precedence over the movement notice
        if let Some(zone) = self.zones.zone_containing(fix.latitude, fix.longitude) {
            info!("Fix is inside unsafe zone {}", zone.name);
            let msg = format!("Warning: Unsafe activity detected in {}.", zone.name);
            ui.show_notification(msg.clone());
            raised = Some(msg);
        }

        self.last_fix = Some(fix);

        raised
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{map::TileLayer, tests::RecordingMap};

    fn setup() -> (PositionProcessor, TrackerUiState, MapView<RecordingMap>) {
        (
            PositionProcessor::new(500.0, ZoneRegistry::default()),
            TrackerUiState::default(),
            MapView::new(RecordingMap::default(), 13, TileLayer::default()),
        )
    }

    #[test]
    fn test_fix_is_displayed_verbatim() {
        let (mut processor, mut ui, mut map) = setup();
        let fix = Fix::new(10.123456789, -20.5, 7.25);

        let raised = processor.process(fix, &mut ui, &mut map);

        assert!(raised.is_none());
        assert_eq!(ui.latitude, Some(10.123456789));
        assert_eq!(ui.longitude, Some(-20.5));
        assert_eq!(ui.accuracy, Some(7.25));
        assert_eq!(ui.status, "Location updated.");
        assert!(ui.notification.is_none());
        assert!(map.is_initialized());
        assert_eq!(processor.last_fix(), Some(&fix));
    }

    #[test]
    fn test_large_movement_is_unusual() {
        let (mut processor, mut ui, mut map) = setup();

        processor.process(Fix::new(22.5700, 88.3600, 5.0), &mut ui, &mut map);
        assert!(ui.notification.is_none());

        processor.process(Fix::new(22.5800, 88.3700, 5.0), &mut ui, &mut map);

        let expected = distance(22.5700, 88.3600, 22.5800, 88.3700);
        let msg = ui.notification.expect("No notification raised");
        assert!(msg.starts_with("Unusual activity"), "Got {msg}");
        assert!(
            msg.contains(&format!("{expected:.2} meters")),
            "{msg} doesn't contain {expected:.2}"
        );
    }

    #[test]
    fn test_small_movement_is_not_unusual() {
        let (mut processor, mut ui, mut map) = setup();

        processor.process(Fix::new(10.0, 10.0, 5.0), &mut ui, &mut map);
        let raised = processor.process(Fix::new(10.001, 10.001, 5.0), &mut ui, &mut map);

        assert!(raised.is_none());
        assert!(ui.notification.is_none());
    }

    #[test]
    fn test_zone_overrides_movement() {
        let (mut processor, mut ui, mut map) = setup();

        processor.process(Fix::new(0.0, 0.0, 5.0), &mut ui, &mut map);
        let raised = processor.process(Fix::new(22.5712, 88.3622, 5.0), &mut ui, &mut map);

        assert_eq!(
            raised.as_deref(),
            Some("Warning: Unsafe activity detected in Unsafe Area 2.")
        );
        assert_eq!(ui.notification, raised);
    }

    #[test]
    fn test_zone_on_first_fix() {
        let (mut processor, mut ui, mut map) = setup();

        processor.process(Fix::new(22.5730, 88.3644, 5.0), &mut ui, &mut map);

        let msg = ui.notification.expect("No notification raised");
        assert!(msg.contains("Theft Zone 1"), "Got {msg}");
    }

    #[test]
    fn test_notification_is_never_cleared() {
        let (mut processor, mut ui, mut map) = setup();

        processor.process(Fix::new(22.5730, 88.3644, 5.0), &mut ui, &mut map);
        processor.process(Fix::new(22.5731, 88.3652, 5.0), &mut ui, &mut map);
        let raised = processor.process(Fix::new(22.5731, 88.3653, 5.0), &mut ui, &mut map);

        assert!(raised.is_none());
        let msg = ui.notification.expect("Notification was cleared");
        assert!(msg.contains("Theft Zone 1"), "Got {msg}");
    }

    #[test]
    fn test_reset_forgets_last_fix() {
        let (mut processor, mut ui, mut map) = setup();

        processor.process(Fix::new(0.0, 0.0, 5.0), &mut ui, &mut map);
        processor.reset();
        let raised = processor.process(Fix::new(10.0, 10.0, 5.0), &mut ui, &mut map);

        assert!(raised.is_none());
    }
}
