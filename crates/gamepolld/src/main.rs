mod cli;
mod logging;

use std::fs;

use clap::Parser;
use colored::Colorize;
use crossbeam_channel::unbounded;

use gamepoll::{GamepadEvent, GamepadListener, GamepadOptions};
use gamepoll_sdl::{run, IntervalScheduler, SdlSource, FRAME_INTERVAL};

use crate::cli::{Cli, Command};

fn load_options(path: Option<&str>) -> Result<GamepadOptions, String> {
    let Some(path) = path else {
        return Ok(GamepadOptions::default());
    };
    let input = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {path}: {e}"))?;
    serde_yaml::from_str(&input)
        .map_err(|e| format!("invalid options file {path}: {e}"))
}

fn main() {
    let cli = Cli::parse();
    logging::setup(cli.verbose, cli.no_color);

    match cli.command {
        Command::Run { options } => run_monitor(options.as_deref()),
    }
}

fn run_monitor(options_path: Option<&str>) {
    let options = match load_options(options_path) {
        Ok(options) => options,
        Err(e) => {
            print_error!("{e}");
            return;
        }
    };

    // Handle Ctrl+C to exit cleanly
    let (stop_tx, stop_rx) = unbounded::<()>();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    }) {
        print_error!("failed to set Ctrl+C handler: {e}");
        return;
    }

    let source = match SdlSource::new() {
        Ok(source) => source,
        Err(e) => {
            print_error!("failed to start gamepad backend: {e}");
            return;
        }
    };

    let mut listener =
        GamepadListener::new(source, IntervalScheduler::new(), options);

    listener.on("gamepad:connected", |event| {
        if let GamepadEvent::Connected { slot } = event {
            print_info!("controller connected at slot {slot}");
        }
    });
    listener.on("gamepad:disconnected", |event| {
        if let GamepadEvent::Disconnected { slot } = event {
            print_info!("controller disconnected from slot {slot}");
        }
    });
    listener.on("gamepad:axis", |event| {
        if let GamepadEvent::Axis { slot, axis, value } = event {
            print_debug!("slot {slot} axis {axis} -> {value:.3}");
        }
    });
    listener.on("gamepad:button", |event| {
        if let GamepadEvent::Button { slot, index, pressed, value, .. } = event {
            print_info!(
                "slot {slot} button {index} -> {value:.3} (pressed: {pressed})"
            );
        }
    });

    print_info!("gamepolld started. Polling for controller events.");
    if let Err(e) = run(&mut listener, FRAME_INTERVAL, &stop_rx) {
        print_error!("poll loop stopped: {e}");
    }
}
