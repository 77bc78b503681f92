// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Reading export and settings import.
//!
//! Coordinate readings can be exported as YAML or JSON. The same two
//! formats are accepted for the settings file.

use crate::error::PixlocError;
use crate::models::{reading::Reading, settings::Settings};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Serialization format, chosen from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, PixlocError> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(PixlocError::UnsupportedExtension(extension.to_string())),
        }
    }
}

/// Export a reading to YAML format.
pub fn export_yaml(reading: &Reading, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(reading)?;
    std::fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Export a reading to JSON format.
pub fn export_json(reading: &Reading, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(reading)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Export a reading, picking the format from the file extension.
pub fn export_reading(reading: &Reading, path: &Path) -> Result<()> {
    match Format::from_path(path)? {
        Format::Yaml => export_yaml(reading, path),
        Format::Json => export_json(reading, path),
    }
}

/// Import settings, picking the format from the file extension.
pub fn import_settings(path: &Path) -> Result<Settings> {
    import(path)
}

fn import<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value = match format {
        Format::Yaml => serde_yaml::from_str(&text)?,
        Format::Json => serde_json::from_str(&text)?,
    };
    Ok(value)
}
