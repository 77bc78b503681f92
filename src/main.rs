// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PIXLOC - Pixel Locator
//!
//! A cross-platform desktop application that shows the intrinsic pixel
//! coordinates under the cursor of an uploaded image, measured from the
//! image's bottom-left corner, with a freeze toggle to pin a reading.

mod app;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::PixlocApp;
use models::settings::Settings;

fn main() -> Result<()> {
    // Initialize logging, defaulting to info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([480.0, 360.0])
            .with_drag_and_drop(true)
            .with_title("PIXLOC - Pixel Locator"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "PIXLOC",
        options,
        Box::new(|_cc| Ok(Box::new(PixlocApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
