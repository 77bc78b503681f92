// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Status readout panel.
//!
//! Shows the current coordinate reading, the live/frozen indicator, the
//! intrinsic image size and any upload error.

use crate::models::mapper::Freeze;
use crate::util::geometry::{Cursor, IntrinsicSize};

/// Text of the coordinate readout.
pub fn coordinate_text(cursor: Cursor) -> String {
    format!("{} pixels right, {} pixels up", cursor.x, cursor.y)
}

/// Text of the intrinsic size readout.
pub fn size_text(size: IntrinsicSize) -> String {
    format!("{} × {} px", size.width, size.height)
}

/// Text shown in place of the readout before an image is ready.
pub fn placeholder_text(decoding: bool) -> &'static str {
    if decoding {
        "Decoding…"
    } else {
        "No image loaded"
    }
}

/// Display the status bar.
///
/// `size` is `None` until the bound image has decoded; `decoding` tells a
/// pending decode apart from having no image at all.
pub fn show(
    ui: &mut egui::Ui,
    cursor: Cursor,
    freeze: Freeze,
    size: Option<IntrinsicSize>,
    decoding: bool,
    error: Option<&str>,
) {
    ui.horizontal(|ui| {
        match size {
            Some(size) => {
                ui.label(egui::RichText::new(coordinate_text(cursor)).monospace().strong());
                ui.separator();

                let color = match freeze {
                    Freeze::Live => egui::Color32::from_rgb(90, 200, 120),
                    Freeze::Frozen => egui::Color32::from_rgb(255, 80, 80),
                };
                ui.label(egui::RichText::new(format!("● {}", freeze.label())).color(color));
                ui.separator();

                ui.label(size_text(size));
            }
            None => {
                if decoding {
                    ui.spinner();
                }
                ui.label(placeholder_text(decoding));
            }
        }

        if let Some(message) = error {
            ui.separator();
            ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(255, 110, 110)));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_text() {
        assert_eq!(coordinate_text(Cursor::new(100, 0)), "100 pixels right, 0 pixels up");
        assert_eq!(size_text(IntrinsicSize::new(200, 100)), "200 × 100 px");
    }

    #[test]
    fn test_placeholder_while_decoding() {
        assert_eq!(placeholder_text(true), "Decoding…");
        assert_eq!(placeholder_text(false), "No image loaded");
    }
}
