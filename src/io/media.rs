// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading.
//!
//! This module reads uploaded files, determines their declared MIME type,
//! and decodes them into RGBA pixels on a background thread so the UI
//! stays responsive.

use crate::error::PixlocError;
use crate::models::format::{guess_mime, ImageFormat};
use crate::models::mapper::LoadTicket;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};

/// A file-like upload: raw bytes plus the type it claims to be.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decoded image ready for texture upload.
#[derive(Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major, top row first
    pub pixels: Vec<u8>,
}

/// Completion message from a background decode.
#[derive(Debug)]
pub struct DecodeOutcome {
    pub ticket: LoadTicket,
    pub result: Result<DecodedImage, PixlocError>,
}

/// Read a file from disk as an upload.
pub fn read_upload(path: &Path) -> Result<Upload> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Upload {
        name: display_name(path),
        mime: guess_mime(path),
        bytes,
    })
}

/// Convert a file dropped onto the window into an upload.
///
/// A MIME type reported by the platform wins over the extension guess.
pub fn dropped_upload(file: &egui::DroppedFile) -> Result<Upload> {
    let path = file.path.as_deref();
    let name = match path {
        Some(p) if file.name.is_empty() => display_name(p),
        _ => file.name.clone(),
    };

    let mime = if !file.mime.trim().is_empty() {
        file.mime.clone()
    } else {
        guess_mime(path.unwrap_or_else(|| Path::new(&file.name)))
    };

    let bytes = match (&file.bytes, path) {
        (Some(bytes), _) => bytes.to_vec(),
        (None, Some(p)) => std::fs::read(p).with_context(|| format!("reading {}", p.display()))?,
        (None, None) => anyhow::bail!("dropped file {} has no content", name),
    };

    Ok(Upload { name, mime, bytes })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Decode image bytes, trying the declared format before content sniffing.
pub fn decode(bytes: &[u8], format: ImageFormat) -> Result<DecodedImage, PixlocError> {
    let image = image::load_from_memory_with_format(bytes, format.decoder_format())
        .or_else(|declared_err| {
            log::debug!("Declared format {} failed ({}), sniffing", format.mime(), declared_err);
            image::load_from_memory(bytes).map_err(|_| declared_err)
        })
        .map_err(|e| PixlocError::Decode(e.to_string()))?;

    let rgba = image.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Shrink an image for display so neither side exceeds `max_side`.
///
/// The GPU rejects textures larger than its maximum side, so oversized
/// images are resized before upload. Images that already fit are returned
/// unchanged.
pub fn fit_texture(decoded: DecodedImage, max_side: usize) -> Result<DecodedImage, PixlocError> {
    let longest = decoded.width.max(decoded.height) as usize;
    if longest <= max_side || max_side == 0 {
        return Ok(decoded);
    }

    let scale = max_side as f32 / longest as f32;
    let width = ((decoded.width as f32 * scale).round() as u32).clamp(1, max_side as u32);
    let height = ((decoded.height as f32 * scale).round() as u32).clamp(1, max_side as u32);

    let (source_width, source_height) = (decoded.width, decoded.height);
    let buffer = image::RgbaImage::from_raw(source_width, source_height, decoded.pixels)
        .ok_or_else(|| {
            PixlocError::Decode(format!("pixel buffer does not match {}x{}", source_width, source_height))
        })?;
    let resized = image::imageops::resize(&buffer, width, height, image::imageops::FilterType::Triangle);

    Ok(DecodedImage {
        width,
        height,
        pixels: resized.into_raw(),
    })
}

/// Decode on a background thread, reporting back over a channel.
///
/// If the receiver is dropped before the decode finishes (because a newer
/// upload replaced it), the result is discarded.
pub fn spawn_decode(ticket: LoadTicket, bytes: Vec<u8>, format: ImageFormat) -> Receiver<DecodeOutcome> {
    let (sender, receiver) = channel();

    std::thread::spawn(move || {
        let result = decode(&bytes, format);
        let _ = sender.send(DecodeOutcome { ticket, result });
    });

    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mapper::{CoordinateMapper, ImageResource};
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    struct Named(&'static str);

    impl ImageResource for Named {
        fn name(&self) -> &str {
            "named"
        }

        fn mime(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_decode_reports_dimensions() {
        let decoded = decode(&encode_png(7, 3), ImageFormat::Png).unwrap();
        assert_eq!((decoded.width, decoded.height), (7, 3));
        assert_eq!(decoded.pixels.len(), 7 * 3 * 4);
        assert_eq!(&decoded.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_sniffs_mislabelled_content() {
        // PNG bytes declared as JPEG still decode
        let decoded = decode(&encode_png(4, 5), ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 5));
    }

    #[test]
    fn test_decode_garbage_is_error() {
        let result = decode(b"definitely not an image", ImageFormat::Png);
        assert!(matches!(result, Err(PixlocError::Decode(_))));
    }

    #[test]
    fn test_fit_texture_shrinks_longest_side() {
        let wide = decode(&encode_png(300, 10), ImageFormat::Png).unwrap();
        let fitted = fit_texture(wide, 100).unwrap();
        assert_eq!((fitted.width, fitted.height), (100, 3));
        assert_eq!(fitted.pixels.len(), 100 * 3 * 4);

        let tall = decode(&encode_png(2, 500), ImageFormat::Png).unwrap();
        let fitted = fit_texture(tall, 50).unwrap();
        assert_eq!((fitted.width, fitted.height), (1, 50));
    }

    #[test]
    fn test_fit_texture_keeps_small_images() {
        let small = decode(&encode_png(64, 32), ImageFormat::Png).unwrap();
        let pixels = small.pixels.clone();
        let fitted = fit_texture(small, 64).unwrap();
        assert_eq!((fitted.width, fitted.height), (64, 32));
        assert_eq!(fitted.pixels, pixels);
    }

    #[test]
    fn test_fit_texture_rejects_short_buffer() {
        let broken = DecodedImage {
            width: 300,
            height: 10,
            pixels: vec![0; 16],
        };
        assert!(matches!(fit_texture(broken, 100), Err(PixlocError::Decode(_))));
    }

    #[test]
    fn test_spawn_decode_carries_ticket() {
        let mut mapper = CoordinateMapper::new();
        let (ticket, format) = mapper.load(Named("image/png")).unwrap();

        let outcome = spawn_decode(ticket, encode_png(10, 20), format).recv().unwrap();
        assert_eq!(outcome.ticket, ticket);
        let decoded = outcome.result.unwrap();
        assert_eq!((decoded.width, decoded.height), (10, 20));
    }

    #[test]
    fn test_read_upload_guesses_mime() {
        let path = std::env::temp_dir().join(format!("pixloc-{}-upload.png", std::process::id()));
        std::fs::write(&path, encode_png(2, 2)).unwrap();

        let upload = read_upload(&path).unwrap();
        assert_eq!(upload.mime, "image/png");
        assert!(upload.name.ends_with("upload.png"));
        assert!(!upload.bytes.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_dropped_upload_prefers_declared_mime() {
        let file = egui::DroppedFile {
            name: "photo.png".to_string(),
            mime: "image/tiff".to_string(),
            bytes: Some(encode_png(1, 1).into()),
            ..Default::default()
        };
        let upload = dropped_upload(&file).unwrap();
        assert_eq!(upload.mime, "image/tiff");

        let file = egui::DroppedFile {
            name: "photo.png".to_string(),
            bytes: Some(encode_png(1, 1).into()),
            ..Default::default()
        };
        assert_eq!(dropped_upload(&file).unwrap().mime, "image/png");
    }

    #[test]
    fn test_dropped_upload_without_content_is_error() {
        let file = egui::DroppedFile {
            name: "ghost.png".to_string(),
            ..Default::default()
        };
        assert!(dropped_upload(&file).is_err());
    }
}
