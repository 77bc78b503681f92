// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Accepted image formats and declared MIME types.
//!
//! Uploads are validated against a fixed allow-list of MIME types. Native
//! files carry no declared type, so one is guessed from the extension.

use crate::error::PixlocError;
use std::path::Path;

/// Fallback declared type for files with an unknown extension.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// An image format accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    /// All accepted formats, in the order they are presented to the user.
    pub const ALL: [ImageFormat; 5] = [
        ImageFormat::Jpeg,
        ImageFormat::Png,
        ImageFormat::Gif,
        ImageFormat::Webp,
        ImageFormat::Bmp,
    ];

    /// Canonical MIME type.
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Bmp => "image/bmp",
        }
    }

    /// File extensions associated with the format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Jpeg => &["jpg", "jpeg", "jfif"],
            ImageFormat::Png => &["png"],
            ImageFormat::Gif => &["gif"],
            ImageFormat::Webp => &["webp"],
            ImageFormat::Bmp => &["bmp"],
        }
    }

    /// Matching decoder format in the `image` crate.
    pub fn decoder_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Webp => image::ImageFormat::WebP,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }

    /// Look up an accepted format from a declared MIME type.
    ///
    /// Matching ignores case, surrounding whitespace and any `;` parameters.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|format| format.mime().eq_ignore_ascii_case(essence))
    }

    /// Validate a declared MIME type against the allow-list.
    pub fn validate(mime: &str) -> Result<Self, PixlocError> {
        Self::from_mime(mime).ok_or_else(|| PixlocError::UnsupportedFormat(mime.to_string()))
    }

    /// Every accepted extension, for file dialog filters.
    pub fn all_extensions() -> Vec<&'static str> {
        Self::ALL
            .into_iter()
            .flat_map(|format| format.extensions().iter().copied())
            .collect()
    }
}

/// Guess the declared MIME type of a file from its extension.
pub fn guess_mime(path: &Path) -> String {
    let Some(extension) = path.extension().and_then(|s| s.to_str()) else {
        return OCTET_STREAM.to_string();
    };
    let extension = extension.to_ascii_lowercase();

    if let Some(format) = ImageFormat::ALL
        .into_iter()
        .find(|format| format.extensions().contains(&extension.as_str()))
    {
        return format.mime().to_string();
    }

    // Well-known image types that are not accepted still get their real name
    let mime = match extension.as_str() {
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => OCTET_STREAM,
    };
    mime.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_mimes() {
        for format in ImageFormat::ALL {
            assert_eq!(ImageFormat::from_mime(format.mime()), Some(format));
        }
        assert_eq!(ImageFormat::from_mime(" IMAGE/PNG "), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::from_mime("image/jpeg; q=0.9"),
            Some(ImageFormat::Jpeg)
        );
    }

    #[test]
    fn test_rejected_mimes() {
        for mime in ["image/tiff", "image/svg+xml", "text/plain", "", OCTET_STREAM] {
            assert!(ImageFormat::from_mime(mime).is_none());
            match ImageFormat::validate(mime) {
                Err(PixlocError::UnsupportedFormat(declared)) => assert_eq!(declared, mime),
                other => panic!("expected rejection for {mime:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("a/b/scan.jpeg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("icon.png")), "image/png");
        assert_eq!(guess_mime(Path::new("anim.gif")), "image/gif");
        assert_eq!(guess_mime(Path::new("pic.webp")), "image/webp");
        assert_eq!(guess_mime(Path::new("old.bmp")), "image/bmp");
        assert_eq!(guess_mime(Path::new("scan.tiff")), "image/tiff");
        assert_eq!(guess_mime(Path::new("README")), OCTET_STREAM);
        assert_eq!(guess_mime(Path::new("data.xyz")), OCTET_STREAM);
    }

    #[test]
    fn test_all_extensions_cover_formats() {
        let extensions = ImageFormat::all_extensions();
        for ext in ["jpg", "jpeg", "png", "gif", "webp", "bmp"] {
            assert!(extensions.contains(&ext));
        }
    }
}
