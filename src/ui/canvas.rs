// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Display surface for the uploaded image.
//!
//! This module paints the bound image at a bounded, aspect-preserving size
//! and reports pointer movement and clicks over it, together with the
//! image's on-screen rectangle.

use crate::models::settings::Settings;
use crate::util::geometry::{fit_within, image_to_display, Cursor, DisplayRect, IntrinsicSize};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Pointer hovered the image at `(x, y)` in screen space
    PointerMoved { x: f64, y: f64, rect: DisplayRect },
    ToggleFreeze,
}

/// What the canvas should display this frame.
pub enum CanvasContent<'a> {
    /// No image bound
    Empty,
    /// Bound but still decoding
    Decoding(&'a str),
    Ready {
        texture: &'a egui::TextureHandle,
        size: IntrinsicSize,
        cursor: Cursor,
        frozen: bool,
    },
}

/// Display the canvas area and handle mouse interactions.
pub fn show(ui: &mut egui::Ui, content: CanvasContent<'_>, settings: &Settings) -> CanvasAction {
    let mut action = CanvasAction::None;
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        match content {
            CanvasContent::Ready {
                texture,
                size,
                cursor,
                frozen,
            } => {
                let available = ui.available_size();
                let (display_width, display_height) = fit_within(
                    size,
                    settings.max_display_width.min(available.x),
                    settings.max_display_height.min(available.y),
                );

                // Center the image
                let x_offset = ((available.x - display_width) / 2.0).max(0.0);
                let y_offset = ((available.y - display_height) / 2.0).max(0.0);

                let image_rect = egui::Rect::from_min_size(
                    ui.min_rect().min + egui::vec2(x_offset, y_offset),
                    egui::vec2(display_width, display_height),
                );

                ui.painter().image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                let response = ui
                    .allocate_rect(image_rect, egui::Sense::click())
                    .on_hover_cursor(egui::CursorIcon::Crosshair);
                let rect = DisplayRect::from(image_rect);

                if let Some(pos) = response.hover_pos() {
                    action = CanvasAction::PointerMoved {
                        x: pos.x as f64,
                        y: pos.y as f64,
                        rect,
                    };
                }

                // A click wins over the hover report for this frame
                if response.clicked() {
                    action = CanvasAction::ToggleFreeze;
                }

                if settings.show_crosshair && (frozen || response.hovered()) {
                    draw_crosshair(ui.painter(), image_rect, &rect, size, cursor, frozen);
                }
            }
            CanvasContent::Decoding(name) => {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new(format!("Decoding {}...", name))
                                .size(16.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                    });
                });
            }
            CanvasContent::Empty => {
                // Show welcome message when no file is loaded
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.heading(
                            egui::RichText::new("PIXLOC")
                                .size(32.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                        ui.label(
                            egui::RichText::new("Pixel Locator")
                                .size(14.0)
                                .color(egui::Color32::from_gray(150)),
                        );
                        ui.add_space(20.0);
                        ui.label(
                            egui::RichText::new("Open or drop an image to read pixel coordinates")
                                .color(egui::Color32::from_gray(180)),
                        );
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new("JPG, PNG, GIF, WEBP or BMP")
                                .weak()
                                .color(egui::Color32::from_gray(130)),
                        );
                    });
                });
            }
        }
    });

    action
}

/// Draw crosshair lines through the current reading.
fn draw_crosshair(
    painter: &egui::Painter,
    image_rect: egui::Rect,
    rect: &DisplayRect,
    size: IntrinsicSize,
    cursor: Cursor,
    frozen: bool,
) {
    let Some((x, y)) = image_to_display(cursor, rect, size) else {
        return;
    };
    let (x, y) = (x as f32, y as f32);

    let color = if frozen {
        egui::Color32::from_rgb(255, 80, 80)
    } else {
        egui::Color32::from_white_alpha(140)
    };
    let stroke = egui::Stroke::new(1.0, color);

    painter.line_segment([egui::pos2(image_rect.min.x, y), egui::pos2(image_rect.max.x, y)], stroke);
    painter.line_segment([egui::pos2(x, image_rect.min.y), egui::pos2(x, image_rect.max.y)], stroke);
    painter.circle_stroke(egui::pos2(x, y), 4.0, egui::Stroke::new(1.5, color));
}
