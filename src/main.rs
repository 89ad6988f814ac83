use log::{error, info};

mod audio;
mod call_controller;
mod call_session;
mod call_timer;
mod commands;
mod components;
mod config;
mod event_channel;
mod roster;

use components::App;
use config::AppConfig;

fn main() {
    // Initialize logging
    env_logger::init();

    info!("Starting Fake Call");

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        error!("Invalid configuration, falling back to defaults: {}", e);
        AppConfig::default()
    });

    // Launch the Dioxus desktop application with the configuration as root context
    dioxus::LaunchBuilder::desktop()
        .with_context(config)
        .launch(App);
}
