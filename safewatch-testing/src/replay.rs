use std::path::PathBuf;

use clap::Parser;
use log::info;
use safewatch_logic::TrackerSettings;
use safewatch_test_shared::{Replay, load_script, load_settings, prelude::*};

#[derive(Parser)]
/// Replay a scripted location session against the tracker and print what the UI would show
struct Cli {
    /// Path to a JSON list of script steps
    #[arg(required_unless_present = "print_settings")]
    script: Option<PathBuf>,

    /// Path to JSON tracker settings, missing fields use the defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print each UI state as a line of JSON
    #[arg(long)]
    json: bool,

    /// Act like a platform without any location capability
    #[arg(long)]
    unsupported: bool,

    /// Print the default settings as JSON and exit
    #[arg(long)]
    print_settings: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    colog::init();

    let cli = Cli::parse();

    if cli.print_settings {
        let raw = serde_json::to_string_pretty(&TrackerSettings::default())
            .context("Failed to encode settings")?;
        println!("{raw}");
        return Ok(());
    }

    let script = cli.script.context("No script given")?;
    let steps = load_script(&script)?;
    let settings = cli
        .settings
        .as_deref()
        .map(load_settings)
        .transpose()?
        .unwrap_or_default();

    info!("Replaying {} steps", steps.len());

    let replay = Replay::new(settings, !cli.unsupported);

    for (i, step) in steps.iter().enumerate() {
        let state = replay.step(step).await;
        if cli.json {
            let line = serde_json::to_string(&state).context("Failed to encode UI state")?;
            println!("{line}");
        } else {
            println!("[{i}] {step:?}");
            println!("    status: {}", state.status);
            if let (Some(lat), Some(lon), Some(acc)) =
                (state.latitude, state.longitude, state.accuracy)
            {
                println!("    position: {lat}, {lon} (±{acc}m)");
            }
            if let Some(notification) = &state.notification {
                println!("    notification: {notification}");
            }
            println!(
                "    controls: start {}, stop {}",
                enabled(state.start_enabled),
                enabled(state.stop_enabled)
            );
        }
    }

    let alerts = replay.output().alerts();
    if !alerts.is_empty() {
        eprintln!("{} alert(s) raised", alerts.len());
    }

    Ok(())
}

fn enabled(on: bool) -> &'static str {
    if on { "enabled" } else { "disabled" }
}
