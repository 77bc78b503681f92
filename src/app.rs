// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the coordinate mapper and routes every UI event (file
//! selection, drag and drop, pointer movement, clicks, keyboard shortcuts
//! and decode completion) into the matching mapper transition.

use crate::error::PixlocError;
use crate::io::media::{self, DecodeOutcome, Upload};
use crate::models::{
    format::ImageFormat,
    mapper::{CoordinateMapper, ImageResource, LoadTicket},
    settings::Settings,
};
use crate::ui::{
    canvas::{self, CanvasAction, CanvasContent},
    status,
    toolbar::{self, ToolbarAction},
};
use crate::util::geometry::IntrinsicSize;
use std::sync::mpsc::{Receiver, TryRecvError};

/// The image currently bound to the mapper.
///
/// Dropping it releases the GPU texture.
struct BoundImage {
    name: String,
    mime: String,
    /// Attached once decoding finishes
    texture: Option<egui::TextureHandle>,
}

impl ImageResource for BoundImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime(&self) -> &str {
        &self.mime
    }
}

/// Main application state.
pub struct PixlocApp {
    settings: Settings,

    /// Coordinate mapping state and the bound image
    mapper: CoordinateMapper<BoundImage>,

    /// Pending background decode for the bound image
    decoder: Option<(LoadTicket, Receiver<DecodeOutcome>)>,
}

impl Default for PixlocApp {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl PixlocApp {
    /// Create a new PIXLOC application instance.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            mapper: CoordinateMapper::new(),
            decoder: None,
        }
    }

    /// Bind an upload and start decoding it in the background.
    fn upload(&mut self, upload: Upload) {
        let Upload { name, mime, bytes } = upload;
        let resource = BoundImage {
            name,
            mime,
            texture: None,
        };

        match self.mapper.load(resource) {
            Ok((ticket, format)) => {
                // Replacing the receiver discards any superseded decode
                self.decoder = Some((ticket, media::spawn_decode(ticket, bytes, format)));
            }
            Err(e) => {
                // The previous image was released, so its decode is moot
                self.decoder = None;
                log::debug!("Upload not bound: {}", e);
            }
        }
    }

    /// Show the native file picker and upload the chosen file.
    fn open_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &ImageFormat::all_extensions())
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };

        match media::read_upload(&path) {
            Ok(upload) => self.upload(upload),
            Err(e) => log::error!("Failed to open {}: {:#}", path.display(), e),
        }
    }

    /// Upload the first file dropped onto the window, if any.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let Some(file) = ctx.input(|i| i.raw.dropped_files.first().cloned()) else {
            return;
        };

        match media::dropped_upload(&file) {
            Ok(upload) => self.upload(upload),
            Err(e) => log::error!("Failed to read dropped file: {:#}", e),
        }
    }

    /// Export the current reading to a file chosen by the user.
    fn export_reading(&self, default_name: &str, filter_name: &str, extensions: &[&str]) {
        let Some(reading) = self.mapper.reading() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter(filter_name, extensions)
            .set_file_name(default_name)
            .save_file()
        else {
            return;
        };

        match crate::io::serialization::export_reading(&reading, &path) {
            Ok(()) => log::info!("Exported reading to {}", path.display()),
            Err(e) => log::error!("Failed to export reading: {:#}", e),
        }
    }

    /// Check for a finished background decode.
    fn poll_decoder(&mut self, ctx: &egui::Context) {
        let Some((ticket, receiver)) = &self.decoder else {
            return;
        };
        let ticket = *ticket;

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.decoder = None;
                log::error!("Decode worker exited without a result");
                self.mapper
                    .fail_decode(ticket, "Failed to decode image: worker stopped".to_string());
                return;
            }
        };
        self.decoder = None;

        let name = self
            .mapper
            .resource()
            .map(|r| r.name.clone())
            .unwrap_or_default();

        // The mapper keeps the true size; only the texture is downscaled
        let max_side = ctx.input(|i| i.max_texture_side);
        let result = outcome.result.and_then(|decoded| {
            let size = IntrinsicSize::new(decoded.width, decoded.height);
            media::fit_texture(decoded, max_side).map(|display| (size, display))
        });

        match result {
            Ok((size, display)) => {
                if !self.mapper.on_resource_ready(outcome.ticket, size) {
                    return;
                }
                if display.width != size.width {
                    log::info!(
                        "Texture for {} downscaled to {}x{} (GPU limit {})",
                        name,
                        display.width,
                        display.height,
                        max_side
                    );
                }

                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [display.width as usize, display.height as usize],
                    &display.pixels,
                );
                let texture = ctx.load_texture(name.clone(), color_image, egui::TextureOptions::LINEAR);
                if let Some(bound) = self.mapper.resource_mut() {
                    bound.texture = Some(texture);
                }

                log::info!("Decoded {} ({}x{})", name, size.width, size.height);
            }
            Err(e) => {
                let cause = match e {
                    PixlocError::Decode(message) => message,
                    other => other.to_string(),
                };
                log::error!("Failed to decode {}: {}", name, cause);
                self.mapper
                    .fail_decode(outcome.ticket, format!("Failed to decode {}: {}", name, cause));
            }
        }
    }

    fn clear(&mut self) {
        self.decoder = None;
        self.mapper.clear();
        log::info!("Cleared image");
    }

    fn toggle_freeze(&mut self) {
        self.mapper.toggle_freeze();
    }

    fn unfreeze(&mut self) {
        if self.mapper.is_frozen() {
            log::info!("Coordinates live");
        }
        self.mapper.unfreeze();
    }

    /// What the canvas should display for the current mapper state.
    fn canvas_content(&self) -> CanvasContent<'_> {
        let Some(bound) = self.mapper.resource() else {
            return CanvasContent::Empty;
        };
        match &bound.texture {
            Some(texture) if self.mapper.is_ready() => CanvasContent::Ready {
                texture,
                size: self.mapper.intrinsic_size(),
                cursor: self.mapper.cursor(),
                frozen: self.mapper.is_frozen(),
            },
            _ => CanvasContent::Decoding(&bound.name),
        }
    }
}

impl eframe::App for PixlocApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_decoder(ctx);
        self.handle_dropped_files(ctx);

        // Keep polling while a decode is in flight
        if self.decoder.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        self.open_dialog();
                        ui.close_menu();
                    }
                    let can_export = self.mapper.reading().is_some();
                    ui.add_enabled_ui(can_export, |ui| {
                        ui.menu_button("Export Reading", |ui| {
                            if ui.button("Export as YAML...").clicked() {
                                self.export_reading("reading.yaml", "YAML", &["yaml", "yml"]);
                                ui.close_menu();
                            }
                            if ui.button("Export as JSON...").clicked() {
                                self.export_reading("reading.json", "JSON", &["json"]);
                                ui.close_menu();
                            }
                        });
                    });
                    if self.mapper.has_resource() && ui.button("Clear").clicked() {
                        self.clear();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, self.mapper.has_resource(), self.mapper.is_frozen())
            })
            .inner;

        match toolbar_action {
            ToolbarAction::Open => self.open_dialog(),
            ToolbarAction::ToggleFreeze => self.toggle_freeze(),
            ToolbarAction::Unfreeze => self.unfreeze(),
            ToolbarAction::Clear => self.clear(),
            ToolbarAction::None => {}
        }

        // Status readout (bottom)
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let size = self
                .mapper
                .is_ready()
                .then(|| self.mapper.intrinsic_size());
            status::show(
                ui,
                self.mapper.cursor(),
                self.mapper.freeze(),
                size,
                self.mapper.has_resource(),
                self.mapper.error(),
            );
        });

        // Keyboard shortcuts, ignored while a text field has focus
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
                self.toggle_freeze();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.unfreeze();
            }
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, self.canvas_content(), &self.settings))
            .inner;

        match canvas_action {
            CanvasAction::PointerMoved { x, y, rect } => {
                self.mapper.on_pointer_move(x, y, &rect);
            }
            CanvasAction::ToggleFreeze => self.toggle_freeze(),
            CanvasAction::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn png_upload(name: &str, width: u32, height: u32) -> Upload {
        let image = image::RgbaImage::new(width, height);
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        Upload {
            name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: bytes.into_inner(),
        }
    }

    /// Wait for the background decode and run one poll.
    fn finish_decode(app: &mut PixlocApp, ctx: &egui::Context) {
        for _ in 0..500 {
            app.poll_decoder(ctx);
            if app.decoder.is_none() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("decode did not finish");
    }

    #[test]
    fn test_upload_decodes_and_attaches_texture() {
        let ctx = egui::Context::default();
        let mut app = PixlocApp::default();

        app.upload(png_upload("a.png", 40, 30));
        assert!(app.mapper.has_resource());
        assert!(!app.mapper.is_ready());

        finish_decode(&mut app, &ctx);
        assert!(app.mapper.is_ready());
        assert_eq!(app.mapper.intrinsic_size(), IntrinsicSize::new(40, 30));
        assert!(app.mapper.resource().unwrap().texture.is_some());
    }

    #[test]
    fn test_superseded_upload_keeps_newest_size() {
        let ctx = egui::Context::default();
        let mut app = PixlocApp::default();

        app.upload(png_upload("first.png", 8, 8));
        app.upload(png_upload("second.png", 16, 4));
        finish_decode(&mut app, &ctx);

        assert_eq!(app.mapper.resource().unwrap().name, "second.png");
        assert_eq!(app.mapper.intrinsic_size(), IntrinsicSize::new(16, 4));
    }

    #[test]
    fn test_rejected_upload_sets_error() {
        let mut app = PixlocApp::default();
        let mut upload = png_upload("scan.tiff", 2, 2);
        upload.mime = "image/tiff".to_string();

        app.upload(upload);
        assert!(!app.mapper.has_resource());
        assert!(app.decoder.is_none());
        assert_eq!(
            app.mapper.error(),
            Some("Unsupported format: image/tiff. Please upload JPG, PNG, GIF, WEBP, or BMP.")
        );
    }

    #[test]
    fn test_corrupt_upload_reports_decode_failure() {
        let ctx = egui::Context::default();
        let mut app = PixlocApp::default();

        app.upload(Upload {
            name: "broken.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0, 1, 2, 3],
        });
        finish_decode(&mut app, &ctx);

        assert!(!app.mapper.has_resource());
        assert!(app.mapper.error().unwrap().starts_with("Failed to decode broken.png"));
    }

    #[test]
    fn test_rejected_upload_releases_previous_image() {
        let ctx = egui::Context::default();
        let mut app = PixlocApp::default();
        app.upload(png_upload("a.png", 12, 6));
        finish_decode(&mut app, &ctx);
        assert!(app.mapper.is_ready());

        let mut upload = png_upload("scan.tiff", 2, 2);
        upload.mime = "image/tiff".to_string();
        app.upload(upload);

        assert!(!app.mapper.has_resource());
        assert!(matches!(app.canvas_content(), CanvasContent::Empty));
        app.toggle_freeze();
        assert!(!app.mapper.is_frozen());
    }

    #[test]
    fn test_rejected_upload_drops_pending_decode() {
        let mut app = PixlocApp::default();
        app.upload(png_upload("a.png", 4, 4));
        assert!(app.decoder.is_some());

        let mut upload = png_upload("scan.tiff", 2, 2);
        upload.mime = "image/tiff".to_string();
        app.upload(upload);

        assert!(app.decoder.is_none());
        assert!(!app.mapper.has_resource());
    }

    #[test]
    fn test_oversized_image_keeps_intrinsic_size() {
        let ctx = egui::Context::default();
        let max_side = ctx.input(|i| i.max_texture_side);
        let width = max_side as u32 + 500;

        let mut app = PixlocApp::default();
        app.upload(png_upload("panorama.png", width, 4));
        finish_decode(&mut app, &ctx);

        assert_eq!(app.mapper.intrinsic_size(), IntrinsicSize::new(width, 4));
        let texture = app.mapper.resource().unwrap().texture.as_ref().unwrap();
        assert!(texture.size()[0] <= max_side);
        assert!(texture.size()[1] <= max_side);
    }

    #[test]
    fn test_clear_drops_pending_decode() {
        let mut app = PixlocApp::default();
        app.upload(png_upload("a.png", 4, 4));
        app.clear();

        assert!(app.decoder.is_none());
        assert!(!app.mapper.has_resource());
        assert!(matches!(app.canvas_content(), CanvasContent::Empty));
    }
}
