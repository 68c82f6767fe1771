use log::{debug, error, info, warn};
use tokio::sync::{
    Mutex,
    mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tokio_util::sync::CancellationToken;

use crate::{
    display::{StateUpdateSender, TrackerUiState},
    failure::LocationFailure,
    location::{LocationEvent, LocationSender, LocationSource, SubscriptionSeq, WatchId},
    map::{MapView, MapWidget},
    processor::PositionProcessor,
    settings::TrackerSettings,
};

const UNSUPPORTED_MSG: &str = "Geolocation is not supported on this device.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Whether a continuous location subscription is running
pub enum WatchSession {
    #[default]
    Inactive,
    Active(WatchId),
}

impl WatchSession {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

struct TrackerState<M: MapWidget> {
    session: WatchSession,
    /// Most recently issued subscription number
    seq: SubscriptionSeq,
    processor: PositionProcessor,
    map: MapView<M>,
    ui: TrackerUiState,
}

/// Struct representing a tracking session, subscribes to positions with [LocationSource], shows
/// them on a [MapWidget], and tells the UI what changed with [StateUpdateSender].
pub struct Tracker<L: LocationSource, M: MapWidget, S: StateUpdateSender> {
    settings: TrackerSettings,
    state: Mutex<TrackerState<M>>,
    location: L,
    state_update_sender: S,
    events: (
        UnboundedSender<(SubscriptionSeq, LocationEvent)>,
        Mutex<UnboundedReceiver<(SubscriptionSeq, LocationEvent)>>,
    ),
    cancel: CancellationToken,
}

impl<L: LocationSource, M: MapWidget, S: StateUpdateSender> Tracker<L, M, S> {
    pub fn new(settings: TrackerSettings, location: L, map: M, state_update_sender: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let state = TrackerState {
            session: WatchSession::Inactive,
            seq: 0,
            processor: PositionProcessor::new(
                settings.unusual_distance_meters,
                settings.zone_registry(),
            ),
            map: MapView::new(map, settings.map.zoom, settings.map.tiles.clone()),
            ui: TrackerUiState::default(),
        };

        Self {
            settings,
            state: Mutex::new(state),
            location,
            state_update_sender,
            events: (tx, Mutex::new(rx)),
            cancel: CancellationToken::new(),
        }
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub async fn get_ui_state(&self) -> TrackerUiState {
        self.state.lock().await.ui.clone()
    }

    pub async fn session(&self) -> WatchSession {
        self.state.lock().await.session
    }

    /// Begin watching the location. Does nothing if already watching, alerts the user if the
    /// platform can't provide a location.
    pub async fn start_watching(&self) {
        let mut state = self.state.lock().await;

        if let WatchSession::Active(id) = state.session {
            warn!("Already watching location (watch {id}), ignoring start");
            return;
        }

        if !self.location.is_supported() {
            warn!("Location is not supported on this platform");
            drop(state);
            self.state_update_sender.alert(UNSUPPORTED_MSG);
            return;
        }

        state.seq += 1;
        let sender = LocationSender::new(state.seq, self.events.0.clone());

        match self.location.subscribe(&self.settings.watch, sender) {
            Ok(id) => {
                info!("Started watching location (watch {id})");
                state.session = WatchSession::Active(id);
                state.ui.set_watching(true);
                state.ui.set_status("Watching location...");
                drop(state);
                self.state_update_sender.send_update();
            }
            Err(why) => {
                error!("Failed to subscribe to location updates: {why:?}");
                drop(state);
                self.state_update_sender.alert(UNSUPPORTED_MSG);
            }
        }
    }

    /// Stop watching the location, does nothing if not watching.
    pub async fn stop_watching(&self) {
        let mut state = self.state.lock().await;

        let WatchSession::Active(id) = state.session else {
            debug!("Not watching location, nothing to stop");
            return;
        };

        self.location.cancel(id);
        info!("Stopped watching location (watch {id})");

        state.session = WatchSession::Inactive;
        state.processor.reset();
        state.ui.set_watching(false);
        state.ui.set_status("Stopped watching location.");
        drop(state);

        self.state_update_sender.send_update();
    }

    fn handle_event(
        &self,
        state: &mut TrackerState<M>,
        seq: SubscriptionSeq,
        event: LocationEvent,
    ) {
        if !state.session.is_active() || seq != state.seq {
            debug!("Dropping {event:?} from subscription {seq}, it was stopped");
            return;
        }

        match event {
            LocationEvent::Fix(fix) => {
                debug!("Fix: {}, {} (±{}m)", fix.latitude, fix.longitude, fix.accuracy);
                let TrackerState {
                    processor, ui, map, ..
                } = state;
                if let Some(msg) = processor.process(fix, ui, map) {
                    self.state_update_sender.notify(&msg);
                }
            }
            LocationEvent::Failure(code) => {
                if LocationFailure::report(code, &mut state.ui) {
                    warn!("Location reading failed: {}", state.ui.status);
                } else {
                    debug!("Ignoring unrecognized location failure code {code}");
                    return;
                }
            }
        }

        self.state_update_sender.send_update();
    }

    /// Process every event that's currently queued without waiting for more.
    /// Returns how many events were handled.
    pub async fn pump(&self) -> usize {
        let mut events = self.events.1.lock().await;
        let mut handled = 0;
        while let Ok((seq, event)) = events.try_recv() {
            let mut state = self.state.lock().await;
            self.handle_event(&mut state, seq, event);
            handled += 1;
        }
        handled
    }

    /// Stop the main loop, this also stops watching
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Main loop of the tracker, handles events from [LocationSource] one at a time until
    /// [Tracker::shutdown] is called.
    pub async fn main_loop(&self) {
        let mut events = self.events.1.lock().await;

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    break;
                }

                event = events.recv() => {
                    // We hold a sender ourselves so this only ends if the channel is torn down
                    let Some((seq, event)) = event else {
                        break;
                    };
                    let mut state = self.state.lock().await;
                    self.handle_event(&mut state, seq, event);
                }
            }
        }

        drop(events);
        self.stop_watching().await;
    }
}
