// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the transform from display (screen) coordinates to
//! intrinsic image pixels with a bottom-left origin, and the aspect-preserving
//! fit used to size the displayed image.

use serde::{Deserialize, Serialize};

/// On-screen bounding rectangle of the displayed image, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rectangle that can be divided by without producing inf/NaN.
    pub fn is_usable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

impl From<egui::Rect> for DisplayRect {
    fn from(rect: egui::Rect) -> Self {
        Self::new(
            rect.min.x as f64,
            rect.min.y as f64,
            rect.width() as f64,
            rect.height() as f64,
        )
    }
}

/// Natural pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrinsicSize {
    pub width: u32,
    pub height: u32,
}

impl IntrinsicSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Pixel coordinate in intrinsic space, origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub x: u32,
    pub y: u32,
}

impl Cursor {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Convert a display position into intrinsic pixel coordinates.
///
/// The vertical axis is flipped so that Y grows upward from the bottom edge.
/// Both axes are clamped to `[0, width] x [0, height]`, so positions outside
/// the rectangle still produce in-bounds coordinates. Returns `None` when the
/// image has no width or the rectangle is unusable; a zero height just pins
/// Y to 0.
pub fn display_to_image(
    display_x: f64,
    display_y: f64,
    rect: &DisplayRect,
    size: IntrinsicSize,
) -> Option<Cursor> {
    if size.width == 0 || !rect.is_usable() || !display_x.is_finite() || !display_y.is_finite() {
        return None;
    }

    let width = size.width as f64;
    let height = size.height as f64;

    let scale_x = width / rect.width;
    let scale_y = height / rect.height;

    let raw_x = (display_x - rect.left) * scale_x;
    let raw_y_top = (display_y - rect.top) * scale_y;

    let x = raw_x.clamp(0.0, width).round();
    let y = (height - raw_y_top).clamp(0.0, height).round();

    Some(Cursor::new(x as u32, y as u32))
}

/// Position of an intrinsic pixel coordinate on the display surface.
///
/// Inverse of [`display_to_image`], used to draw the crosshair.
pub fn image_to_display(cursor: Cursor, rect: &DisplayRect, size: IntrinsicSize) -> Option<(f64, f64)> {
    if size.width == 0 || !rect.is_usable() {
        return None;
    }
    let x = rect.left + cursor.x as f64 / size.width as f64 * rect.width;
    let y = if size.height == 0 {
        rect.top + rect.height
    } else {
        rect.top + (1.0 - cursor.y as f64 / size.height as f64) * rect.height
    };
    Some((x, y))
}

/// Fit an image inside a bounding box, preserving aspect ratio.
///
/// Images smaller than the box are shown at their natural size.
pub fn fit_within(size: IntrinsicSize, max_width: f32, max_height: f32) -> (f32, f32) {
    if size.is_empty() || max_width <= 0.0 || max_height <= 0.0 {
        return (0.0, 0.0);
    }

    let width = size.width as f32;
    let height = size.height as f32;
    let scale = (max_width / width).min(max_height / height).min(1.0);

    (width * scale, height * scale)
}
