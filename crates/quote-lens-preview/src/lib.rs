#![warn(missing_docs)]
//! # quote-lens-preview
//!
//! ## Purpose
//! Tracks the currently selected quote file and produces lightweight preview
//! content for it.
//!
//! ## Responsibilities
//! - Replace the live selection wholesale on every file-chosen event.
//! - Plan asynchronous thumbnail decodes for image selections and synchronous
//!   captions for everything else.
//! - Discard decode results that belong to a superseded selection.
//!
//! ## Data flow
//! File-chosen events update [`PreviewController`], which emits a
//! [`PreviewPlan`]. The driver executes image decodes off the event loop via
//! [`decode_preview_thumbnail`] and feeds results back through
//! [`PreviewController::apply_decoded`].
//!
//! ## Ownership and lifetimes
//! Preview content owns its pixel buffer so a pending decode never borrows
//! from the controller.
//!
//! ## Error model
//! Decode failures return [`PreviewError`]. The preview path is
//! fire-and-forget: a failed decode leaves the preview area empty and is not
//! surfaced to the user.
//!
//! ## Security and privacy notes
//! Thumbnails are derived views of user-chosen files and never leave the
//! process.

use quote_lens_core::QuoteImage;
use thiserror::Error;

/// Bounding-box width for decoded preview thumbnails.
pub const PREVIEW_MAX_WIDTH: u32 = 300;
/// Bounding-box height for decoded preview thumbnails.
pub const PREVIEW_MAX_HEIGHT: u32 = 170;

/// Small RGBA bitmap used for on-screen preview rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewThumbnail {
    /// Thumbnail width in pixels.
    pub width: u32,
    /// Thumbnail height in pixels.
    pub height: u32,
    /// RGBA bytes in row-major order.
    pub rgba: Vec<u8>,
}

/// Content currently shown in the preview area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    /// Decoded image thumbnail plus file-name caption.
    Image {
        /// Decoded thumbnail bitmap.
        thumbnail: PreviewThumbnail,
        /// File-name caption shown under the image.
        caption: String,
    },
    /// Caption-only preview for non-image files.
    Caption(String),
}

/// Action the driver must take after a file-chosen event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewPlan {
    /// Preview area was cleared; nothing else to do.
    Cleared,
    /// Caption content was set synchronously and can be shown now.
    ShowCaption(String),
    /// Decode the selection's bytes off the event loop and feed the result
    /// back with the given sequence number.
    DecodeImage {
        /// Selection sequence number tagging this decode.
        seq: u64,
    },
}

/// Tracks the live selection and the preview content derived from it.
///
/// Every selection bumps a monotonically increasing sequence number; decode
/// results carrying a stale number are discarded, so a slow decode of an
/// earlier file can never overwrite the preview of a later one.
#[derive(Debug, Default)]
pub struct PreviewController {
    seq: u64,
    content: Option<PreviewContent>,
}

impl PreviewController {
    /// Creates an empty preview controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a file-chosen event.
    ///
    /// Clears any previous preview content unconditionally. Image selections
    /// produce a decode plan; other files get a synchronous
    /// `Selected: <name>` caption.
    pub fn on_file_chosen(&mut self, file: Option<&QuoteImage>) -> PreviewPlan {
        self.seq = self.seq.wrapping_add(1);
        self.content = None;

        let Some(file) = file else {
            return PreviewPlan::Cleared;
        };

        if file.is_image() {
            PreviewPlan::DecodeImage { seq: self.seq }
        } else {
            let caption = format!("Selected: {}", file.file_name);
            self.content = Some(PreviewContent::Caption(caption.clone()));
            PreviewPlan::ShowCaption(caption)
        }
    }

    /// Applies a completed decode.
    ///
    /// Returns the content to show when the decode still matches the live
    /// selection, or `None` when it is stale and must be discarded.
    pub fn apply_decoded(
        &mut self,
        seq: u64,
        thumbnail: PreviewThumbnail,
        caption: impl Into<String>,
    ) -> Option<&PreviewContent> {
        if seq != self.seq {
            return None;
        }

        self.content = Some(PreviewContent::Image {
            thumbnail,
            caption: caption.into(),
        });
        self.content.as_ref()
    }

    /// Returns the current preview content, if any.
    pub fn content(&self) -> Option<&PreviewContent> {
        self.content.as_ref()
    }

    /// Returns the current selection sequence number.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Decodes image bytes into an aspect-preserving preview thumbnail.
///
/// The thumbnail fits inside `max_width` x `max_height` without upscaling
/// distortion concerns; tiny sources still produce at least a 1x1 output.
///
/// # Errors
/// Returns [`PreviewError::Decode`] when the bytes are not a decodable image.
pub fn decode_preview_thumbnail(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
) -> Result<PreviewThumbnail, PreviewError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|error| PreviewError::Decode(error.to_string()))?
        .to_rgba8();

    let source_width = decoded.width().max(1);
    let source_height = decoded.height().max(1);
    let x_scale = max_width as f32 / source_width as f32;
    let y_scale = max_height as f32 / source_height as f32;
    let scale = x_scale.min(y_scale).min(1.0).max(0.001);
    let target_width = (source_width as f32 * scale).round().max(1.0) as u32;
    let target_height = (source_height as f32 * scale).round().max(1.0) as u32;

    let thumbnail = image::imageops::resize(
        &decoded,
        target_width,
        target_height,
        image::imageops::FilterType::Triangle,
    );

    Ok(PreviewThumbnail {
        width: target_width,
        height: target_height,
        rgba: thumbnail.into_raw(),
    })
}

/// Errors produced by preview decoding.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Image bytes could not be decoded.
    #[error("preview decode failure: {0}")]
    Decode(String),
}
