// src/domain/resolution/value_objects.rs
//
// Resolution Value Objects
//
// Pure data produced by the resolver and consumed by pagination and layout.
// No I/O happens here.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::domain::reference::ReferenceKind;

// ============================================================================
// COVER IMAGE
// ============================================================================

/// Where a cover image came from (for diagnostics only)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverOrigin {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for CoverOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverOrigin::Url(url) => write!(f, "{}", url),
            CoverOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Decoded cover art, 8-bit RGB, row-major
#[derive(Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub origin: CoverOrigin,
}

impl CoverImage {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>, origin: CoverOrigin) -> Self {
        Self {
            width,
            height,
            rgb,
            origin,
        }
    }

    /// Height over width; 1.0 for degenerate images
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 {
            return 1.0;
        }
        self.height as f32 / self.width as f32
    }
}

// Pixel data is noise in logs.
impl fmt::Debug for CoverImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("origin", &self.origin)
            .finish()
    }
}

// ============================================================================
// RESOLVED CARD
// ============================================================================

/// A card ready for layout.
///
/// INVARIANTS:
/// - `code_payload` equals the original link list line verbatim, even for
///   `cover|target` lines where title and cover come from the two halves
/// - `artist` may be empty, never absent
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCard {
    pub title: String,
    pub artist: String,
    pub cover: Option<CoverImage>,
    pub code_payload: String,
    pub source_kind: ReferenceKind,
}

impl ResolvedCard {
    pub fn new(title: String, artist: String, code_payload: String, source_kind: ReferenceKind) -> Self {
        Self {
            title,
            artist,
            cover: None,
            code_payload,
            source_kind,
        }
    }

    pub fn with_cover(mut self, cover: Option<CoverImage>) -> Self {
        self.cover = cover;
        self
    }

    /// Whether the brand mark should be drawn above the code mark
    pub fn shows_brand_mark(&self) -> bool {
        self.source_kind.is_streaming()
    }
}

// ============================================================================
// RESOLUTION WARNING (RECOVERABLE CHANNEL)
// ============================================================================

/// Something went wrong for one card, but the card is still printable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolutionWarning {
    /// A `cover|target` hint pointed at a local file that does not exist
    MissingCoverFile { path: PathBuf },

    /// The provider returned no artwork for a streaming reference
    MissingArtwork { reference: String },

    /// A `cover|` line with nothing after the delimiter
    EmptyTarget { raw: String },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::MissingCoverFile { path } => {
                write!(f, "Could not find file {}", path.display())
            }
            ResolutionWarning::MissingArtwork { reference } => {
                write!(f, "No artwork listed for {}", reference)
            }
            ResolutionWarning::EmptyTarget { raw } => {
                write!(f, "Empty target in '{}'", raw)
            }
        }
    }
}
