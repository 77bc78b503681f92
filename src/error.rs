// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for image loading and export.

use thiserror::Error;

/// Errors surfaced by the coordinate mapper and its I/O helpers.
#[derive(Debug, Error)]
pub enum PixlocError {
    /// The declared MIME type of an upload is not in the accepted set.
    #[error("Unsupported format: {0}. Please upload JPG, PNG, GIF, WEBP, or BMP.")]
    UnsupportedFormat(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_message() {
        let err = PixlocError::UnsupportedFormat("image/tiff".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported format: image/tiff. Please upload JPG, PNG, GIF, WEBP, or BMP."
        );
    }
}
