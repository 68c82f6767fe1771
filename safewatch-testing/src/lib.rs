use std::{
    path::Path,
    sync::{Arc, Mutex},
    time::Duration,
};

use log::{debug, info, warn};
use safewatch_logic::{
    Dialer, EmergencyDialer, Fix, LatLon, LocationEvent, LocationSender, LocationSource,
    MapWidget, StateUpdateSender, TileLayer, Tracker, TrackerSettings, TrackerUiState, WatchId,
    WatchOptions,
};
use serde::{Deserialize, Serialize};

pub mod prelude {
    pub use anyhow::{Context, anyhow, bail};
    pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
}

pub use prelude::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One step of a replay script
pub enum ScriptStep {
    /// Press "start watching"
    Start,
    /// Press "stop watching"
    Stop,
    /// Press the emergency call button
    Call,
    /// The platform delivers a reading
    Fix(Fix),
    /// The platform delivers a failure code
    Failure(u16),
    /// Let time pass
    WaitMs(u64),
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&raw).context("Failed to parse script")
}

pub fn load_settings(path: &Path) -> Result<TrackerSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    serde_json::from_str(&raw).context("Failed to parse settings")
}

#[derive(Default)]
struct ScriptedSourceState {
    supported: bool,
    next_id: WatchId,
    active: Option<(WatchId, LocationSender)>,
}

/// Location source fed by the replay script instead of a GPS
#[derive(Clone)]
pub struct ScriptedSource(Arc<Mutex<ScriptedSourceState>>);

impl ScriptedSource {
    pub fn new(supported: bool) -> Self {
        Self(Arc::new(Mutex::new(ScriptedSourceState {
            supported,
            ..Default::default()
        })))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptedSourceState> {
        // Nothing panics while holding this lock
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn emit(&self, event: LocationEvent) {
        if let Some((id, tx)) = &self.lock().active {
            debug!("Delivering {event:?} to watch {id}");
            tx.send(event);
        } else {
            warn!("No active watch, dropping scripted {event:?}");
        }
    }
}

impl LocationSource for ScriptedSource {
    fn is_supported(&self) -> bool {
        self.lock().supported
    }

    fn subscribe(&self, options: &WatchOptions, sender: LocationSender) -> Result<WatchId> {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        debug!(
            "Scripted watch {id} started for subscription {} with {options:?}",
            sender.seq()
        );
        state.active = Some((id, sender));
        Ok(id)
    }

    fn cancel(&self, id: WatchId) {
        let mut state = self.lock();
        if state.active.as_ref().is_some_and(|(active, _)| *active == id) {
            state.active = None;
        }
    }
}

/// Map that just logs what it would draw
pub struct LogMap;

impl MapWidget for LogMap {
    fn create(&mut self, center: LatLon, zoom: u8, tiles: &TileLayer) {
        info!(
            "Map created at {}, {} (zoom {zoom}, tiles {})",
            center.lat, center.lon, tiles.url_template
        );
    }

    fn place_marker(&mut self, at: LatLon) {
        info!("Marker placed at {}, {}", at.lat, at.lon);
    }

    fn move_marker(&mut self, to: LatLon) {
        info!("Marker moved to {}, {}", to.lat, to.lon);
    }

    fn set_view(&mut self, center: LatLon) {
        debug!("Map recentered on {}, {}", center.lat, center.lon);
    }
}

#[derive(Default)]
struct Raised {
    alerts: Vec<String>,
    notifications: Vec<String>,
    dialed: Vec<String>,
}

/// Collects alerts, notifications and dial requests so the replay can report them
#[derive(Clone, Default)]
pub struct ReplayOutput(Arc<Mutex<Raised>>);

impl ReplayOutput {
    fn lock(&self) -> std::sync::MutexGuard<'_, Raised> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.lock().notifications.clone()
    }

    pub fn dialed(&self) -> Vec<String> {
        self.lock().dialed.clone()
    }
}

impl StateUpdateSender for ReplayOutput {
    fn send_update(&self) {
        debug!("UI state changed");
    }

    fn alert(&self, message: &str) {
        warn!("ALERT: {message}");
        self.lock().alerts.push(message.to_string());
    }

    fn notify(&self, message: &str) {
        info!("Notification: {message}");
        self.lock().notifications.push(message.to_string());
    }
}

impl Dialer for ReplayOutput {
    fn dial(&self, number: &str) {
        info!("Dialing tel:{number}");
        self.lock().dialed.push(number.to_string());
    }
}

type ReplayTracker = Tracker<ScriptedSource, LogMap, ReplayOutput>;

/// A tracker wired to scripted input, stepped one [ScriptStep] at a time
pub struct Replay {
    tracker: ReplayTracker,
    source: ScriptedSource,
    dialer: EmergencyDialer<ReplayOutput>,
    output: ReplayOutput,
}

impl Replay {
    pub fn new(settings: TrackerSettings, supported: bool) -> Self {
        let source = ScriptedSource::new(supported);
        let output = ReplayOutput::default();
        let dialer = EmergencyDialer::new(output.clone(), settings.emergency_number.clone());
        let tracker = ReplayTracker::new(settings, source.clone(), LogMap, output.clone());
        Self {
            tracker,
            source,
            dialer,
            output,
        }
    }

    pub fn output(&self) -> &ReplayOutput {
        &self.output
    }

    /// Perform a step and let the tracker handle whatever it caused
    pub async fn step(&self, step: &ScriptStep) -> TrackerUiState {
        match step {
            ScriptStep::Start => self.tracker.start_watching().await,
            ScriptStep::Stop => self.tracker.stop_watching().await,
            ScriptStep::Call => self.dialer.call(),
            ScriptStep::Fix(fix) => self.source.emit(LocationEvent::Fix(*fix)),
            ScriptStep::Failure(code) => self.source.emit(LocationEvent::Failure(*code)),
            ScriptStep::WaitMs(ms) => tokio::time::sleep(Duration::from_millis(*ms)).await,
        }
        self.tracker.pump().await;
        self.tracker.get_ui_state().await
    }

    pub async fn run(&self, steps: &[ScriptStep]) -> Vec<TrackerUiState> {
        let mut states = Vec::with_capacity(steps.len());
        for step in steps {
            states.push(self.step(step).await);
        }
        states
    }
}
