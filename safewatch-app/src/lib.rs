mod dialer;
mod location;
mod map;
mod state;

use log::LevelFilter;
use safewatch_logic::{TrackerSettings, TrackerUiState};
use tauri::{Manager, RunEvent, State};
use tauri_specta::{ErrorHandlingMode, collect_commands, collect_events};

use std::result::Result as StdResult;

use crate::{
    map::MapUpdate,
    state::{AppState, UiStateUpdate},
};

type Result<T = (), E = String> = StdResult<T, E>;

#[tauri::command]
#[specta::specta]
/// Get everything the tracker screen displays, call after receiving [UiStateUpdate]
async fn get_ui_state(state: State<'_, AppState>) -> Result<TrackerUiState> {
    Ok(state.tracker.get_ui_state().await)
}

#[tauri::command]
#[specta::specta]
/// Get the settings the tracker was started with, includes the unsafe zones for display
fn get_settings(state: State<'_, AppState>) -> Result<TrackerSettings> {
    Ok(state.tracker.settings().clone())
}

#[tauri::command]
#[specta::specta]
/// Start watching the device location. Does nothing if already watching.
async fn start_watching(state: State<'_, AppState>) -> Result {
    state.tracker.start_watching().await;
    Ok(())
}

#[tauri::command]
#[specta::specta]
/// Stop watching the device location. Does nothing if not watching.
async fn stop_watching(state: State<'_, AppState>) -> Result {
    state.tracker.stop_watching().await;
    Ok(())
}

#[tauri::command]
#[specta::specta]
/// Open the phone dialer with the emergency number
fn emergency_call(state: State<'_, AppState>) -> Result {
    state.dialer.call();
    Ok(())
}

pub fn mk_specta() -> tauri_specta::Builder {
    tauri_specta::Builder::<tauri::Wry>::new()
        .error_handling(ErrorHandlingMode::Throw)
        .commands(collect_commands![
            get_ui_state,
            get_settings,
            start_watching,
            stop_watching,
            emergency_call,
        ])
        .events(collect_events![UiStateUpdate, MapUpdate])
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = mk_specta();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(LevelFilter::Debug)
                .build(),
        )
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_geolocation::init())
        .invoke_handler(builder.invoke_handler())
        .setup(move |app| {
            builder.mount_events(app);

            let state = AppState::new(app.handle());
            state.spawn_tracker_loop();
            app.manage(state);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|handle, event| {
        if let RunEvent::Exit = event {
            handle.state::<AppState>().tracker.shutdown();
        }
    });
}
