// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Exportable snapshot of the coordinate readout.

use serde::{Deserialize, Serialize};

/// A single coordinate reading, as shown in the status readout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Name of the uploaded file
    pub source: String,
    /// Declared MIME type of the upload
    pub mime: String,
    pub image_width: u32,
    pub image_height: u32,
    /// Pixels right of the left edge
    pub x: u32,
    /// Pixels up from the bottom edge
    pub y: u32,
    pub frozen: bool,
}
