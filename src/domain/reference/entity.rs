// src/domain/reference/entity.rs

use serde::{Deserialize, Serialize};

/// Closed set of reference kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    StreamAlbum,
    StreamTrack,
    StreamPlaylist,
    /// `cover|target` syntax; the target is still a web URL or a local path
    CoverTaggedTarget,
    WebUrl,
    LocalPath,
}

impl ReferenceKind {
    /// True for references resolved through the streaming metadata provider
    pub fn is_streaming(&self) -> bool {
        matches!(
            self,
            ReferenceKind::StreamAlbum | ReferenceKind::StreamTrack | ReferenceKind::StreamPlaylist
        )
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::StreamAlbum => write!(f, "stream_album"),
            ReferenceKind::StreamTrack => write!(f, "stream_track"),
            ReferenceKind::StreamPlaylist => write!(f, "stream_playlist"),
            ReferenceKind::CoverTaggedTarget => write!(f, "cover_tagged_target"),
            ReferenceKind::WebUrl => write!(f, "web_url"),
            ReferenceKind::LocalPath => write!(f, "local_path"),
        }
    }
}

/// Result of classifying one link list line.
///
/// INVARIANTS:
/// - `raw_text` is the whole line, untouched
/// - `id` is Some only for streaming kinds
/// - `cover_hint` is Some only for CoverTaggedTarget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedReference {
    pub kind: ReferenceKind,
    pub id: Option<String>,
    pub cover_hint: Option<String>,
    pub target: String,
    pub raw_text: String,
}

impl TypedReference {
    pub fn streaming(kind: ReferenceKind, id: String, raw_text: String) -> Self {
        Self {
            kind,
            id: Some(id),
            cover_hint: None,
            target: String::new(),
            raw_text,
        }
    }

    /// Kind of the payload after any cover hint has been split off
    pub fn target_kind(&self) -> ReferenceKind {
        match self.kind {
            ReferenceKind::CoverTaggedTarget => target_kind_of(&self.target),
            other => other,
        }
    }
}

/// WebUrl or LocalPath, decided by scheme
pub fn target_kind_of(target: &str) -> ReferenceKind {
    if is_web_url(target) {
        ReferenceKind::WebUrl
    } else {
        ReferenceKind::LocalPath
    }
}

pub fn is_web_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}
