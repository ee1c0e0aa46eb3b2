//! Field planning map application.
//!
//! Shows satellite imagery with a label overlay, an anchor marker ("SET") and a route of
//! waypoints. The toolbar switches between moving the anchor and appending waypoints with map
//! clicks. The same application runs natively and in the browser.

#![warn(clippy::unwrap_used)]

use std::sync::Arc;

use anyhow::Context as _;
use fieldplan::config::FieldplanConfig;
use fieldplan::MapInteraction;
use galileo::control::UserEventHandler;
use parking_lot::RwLock;
use wasm_bindgen::prelude::*;

mod app;
mod drawer;
mod handler;
pub mod map;
mod surface;
#[cfg(target_arch = "wasm32")]
mod web;

pub use app::FieldplanApp;
pub use handler::{click_handler, SharedInteraction};
pub use surface::GalileoSurface;

/// Environment variable with the path to a JSON configuration file.
pub const CONFIG_ENV: &str = "FIELDPLAN_CONFIG";

/// Loads the configuration and runs the application until its window is closed.
pub fn run() -> anyhow::Result<()> {
    let config = load_config()?;

    let features = map::FeatureLayers::new(&config);
    let (map, layers) = map::build_map(&config, &features)?;

    let interaction: SharedInteraction = Arc::new(RwLock::new(MapInteraction::new(
        &config.map,
        GalileoSurface::new(features),
    )));
    let handler = click_handler(interaction.clone());

    galileo_egui::InitBuilder::new(map)
        .with_handlers([Box::new(handler) as Box<dyn UserEventHandler>])
        .with_app_builder(move |egui_map_state| {
            log::info!("Field plan map started");
            Box::new(FieldplanApp::new(
                egui_map_state,
                interaction,
                layers,
                &config,
            ))
        })
        .init()
        .map_err(|err| anyhow::anyhow!("failed to start the application: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> anyhow::Result<FieldplanConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => FieldplanConfig::from_file(&path).with_context(|| {
            format!(
                "failed to load configuration from {}",
                path.to_string_lossy()
            )
        }),
        None => Ok(FieldplanConfig::default()),
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> anyhow::Result<FieldplanConfig> {
    let config = FieldplanConfig::default();
    config.validate().context("invalid default configuration")?;
    Ok(config)
}

/// Browser entry point.
#[wasm_bindgen]
pub fn main() {
    console_error_panic_hook::set_once();

    // Installs the web logger, so it goes first.
    if let Err(err) = run() {
        log::error!("{err:#}");
    }

    #[cfg(target_arch = "wasm32")]
    if let Err(err) = web::wire_drawer() {
        log::warn!("Failed to wire the page drawer: {err:?}");
    }
}
