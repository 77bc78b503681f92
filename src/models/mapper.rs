// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Coordinate mapper state.
//!
//! The mapper owns the single bound image resource and tracks the intrinsic
//! size, the last cursor reading, the freeze flag and any upload error.
//! Every UI event is routed into one of its transition methods; the egui
//! layer never mutates this state directly.

use super::format::ImageFormat;
use super::reading::Reading;
use crate::error::PixlocError;
use crate::util::geometry::{display_to_image, Cursor, DisplayRect, IntrinsicSize};

/// Anything the mapper can bind as its image resource.
pub trait ImageResource {
    /// Display name of the upload (usually the file name).
    fn name(&self) -> &str;

    /// Declared MIME type of the upload.
    fn mime(&self) -> &str;
}

/// Whether pointer movement updates the cursor reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Freeze {
    #[default]
    Live,
    Frozen,
}

impl Freeze {
    fn toggled(self) -> Self {
        match self {
            Freeze::Live => Freeze::Frozen,
            Freeze::Frozen => Freeze::Live,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Freeze::Live => "Live",
            Freeze::Frozen => "Frozen",
        }
    }
}

/// Generation number issued by each successful load.
///
/// Decode completions carry the ticket of the load that started them, so a
/// superseded decode can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Maps pointer positions over the displayed image to intrinsic pixels.
#[derive(Debug)]
pub struct CoordinateMapper<R> {
    resource: Option<R>,
    ticket: u64,
    size: IntrinsicSize,
    cursor: Cursor,
    freeze: Freeze,
    error: Option<String>,
}

impl<R> Default for CoordinateMapper<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> CoordinateMapper<R> {
    pub fn new() -> Self {
        Self {
            resource: None,
            ticket: 0,
            size: IntrinsicSize::default(),
            cursor: Cursor::default(),
            freeze: Freeze::Live,
            error: None,
        }
    }

    pub fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    pub fn resource(&self) -> Option<&R> {
        self.resource.as_ref()
    }

    pub fn resource_mut(&mut self) -> Option<&mut R> {
        self.resource.as_mut()
    }

    pub fn intrinsic_size(&self) -> IntrinsicSize {
        self.size
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn freeze(&self) -> Freeze {
        self.freeze
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze == Freeze::Frozen
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A resource is bound and its dimensions are known.
    pub fn is_ready(&self) -> bool {
        self.resource.is_some() && self.size.width > 0
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        self.resource.is_some() && ticket.0 == self.ticket
    }

    /// Record that the bound resource finished decoding.
    ///
    /// Returns `false` (and changes nothing) when the ticket belongs to a
    /// resource that has since been replaced or cleared.
    pub fn on_resource_ready(&mut self, ticket: LoadTicket, size: IntrinsicSize) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Ignoring stale decode completion {:?}", ticket);
            return false;
        }
        self.size = size;
        true
    }

    /// Release the bound resource after its decode failed.
    pub fn fail_decode(&mut self, ticket: LoadTicket, message: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.clear();
        self.error = Some(message);
        true
    }

    /// Update the cursor from a pointer position over the display surface.
    ///
    /// Returns whether the cursor reading changed.
    pub fn on_pointer_move(&mut self, display_x: f64, display_y: f64, rect: &DisplayRect) -> bool {
        if self.is_frozen() || self.resource.is_none() || self.size.width == 0 {
            return false;
        }

        match display_to_image(display_x, display_y, rect, self.size) {
            Some(cursor) if cursor != self.cursor => {
                log::trace!("Cursor at ({}, {})", cursor.x, cursor.y);
                self.cursor = cursor;
                true
            }
            _ => false,
        }
    }

    /// Flip between live and frozen. Does nothing without a bound resource.
    pub fn toggle_freeze(&mut self) {
        if self.resource.is_none() {
            return;
        }
        self.freeze = self.freeze.toggled();
        log::info!("Coordinates {}", self.freeze.label().to_lowercase());
    }

    pub fn unfreeze(&mut self) {
        self.freeze = Freeze::Live;
    }

    /// Release the bound resource and reset every piece of state.
    pub fn clear(&mut self) {
        // Dropping the old value releases the resource
        self.resource = None;
        self.size = IntrinsicSize::default();
        self.cursor = Cursor::default();
        self.freeze = Freeze::Live;
        self.error = None;
    }
}

impl<R: ImageResource> CoordinateMapper<R> {
    /// Bind a newly uploaded resource.
    ///
    /// A resource whose declared type is not accepted is dropped without
    /// being bound. The previous resource is released as well, so nothing is
    /// displayed, and the error message is recorded.
    pub fn load(&mut self, resource: R) -> Result<(LoadTicket, ImageFormat), PixlocError> {
        let format = match ImageFormat::validate(resource.mime()) {
            Ok(format) => format,
            Err(err) => {
                log::warn!("Rejected upload {}: {}", resource.name(), err);
                self.error = Some(err.to_string());
                self.resource = None;
                return Err(err);
            }
        };

        log::info!("Loading {} ({})", resource.name(), format.mime());

        self.clear();
        self.resource = Some(resource);
        self.ticket += 1;

        Ok((LoadTicket(self.ticket), format))
    }

    /// Snapshot of the current readout, once the image is ready.
    pub fn reading(&self) -> Option<Reading> {
        let resource = self.resource.as_ref().filter(|_| self.is_ready())?;
        Some(Reading {
            source: resource.name().to_string(),
            mime: resource.mime().to_string(),
            image_width: self.size.width,
            image_height: self.size.height,
            x: self.cursor.x,
            y: self.cursor.y,
            frozen: self.is_frozen(),
        })
    }
}
