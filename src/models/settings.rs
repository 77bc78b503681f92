// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read once at startup from the file named by the
//! `PIXLOC_CONFIG` environment variable (YAML or JSON). Missing fields take
//! their default values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an optional settings file.
pub const CONFIG_ENV: &str = "PIXLOC_CONFIG";

/// User-tunable display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Largest width the image is displayed at, in logical pixels
    pub max_display_width: f32,
    /// Largest height the image is displayed at, in logical pixels
    pub max_display_height: f32,
    /// Draw a crosshair at the current reading
    pub show_crosshair: bool,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_display_width: 800.0,
            max_display_height: 600.0,
            show_crosshair: true,
            window_width: 1024.0,
            window_height: 768.0,
        }
    }
}

impl Settings {
    /// Load settings from `PIXLOC_CONFIG`, falling back to defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) else {
            return Self::default();
        };

        match crate::io::serialization::import_settings(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }
}
