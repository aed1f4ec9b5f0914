// src/domain/reference/classifier.rs
//
// Reference classification
//
// RULES (priority order):
// 1. Streaming prefixes (album, track, playlist) take the id up to the first space
// 2. A `|` splits cover hint and target at the LAST delimiter
// 3. Anything else is the target itself
// 4. Targets with an http(s) scheme are web URLs, everything else is a local path

use super::entity::{target_kind_of, ReferenceKind, TypedReference};

pub const ALBUM_PREFIX: &str = "spotify:album:";
pub const TRACK_PREFIX: &str = "spotify:track:";
pub const PLAYLIST_PREFIX: &str = "spotify:playlist:";

const STREAMING_PREFIXES: [(&str, ReferenceKind); 3] = [
    (ALBUM_PREFIX, ReferenceKind::StreamAlbum),
    (TRACK_PREFIX, ReferenceKind::StreamTrack),
    (PLAYLIST_PREFIX, ReferenceKind::StreamPlaylist),
];

const COVER_DELIMITER: char = '|';

/// Classify one pre-filtered link list line. Never fails.
pub fn classify(line: &str) -> TypedReference {
    for (prefix, kind) in STREAMING_PREFIXES {
        if let Some(remainder) = line.strip_prefix(prefix) {
            return TypedReference::streaming(kind, strip_annotation(remainder).to_string(), line.to_string());
        }
    }

    match line.rfind(COVER_DELIMITER) {
        Some(index) => {
            let cover_hint = &line[..index];
            let target = &line[index + COVER_DELIMITER.len_utf8()..];
            TypedReference {
                kind: ReferenceKind::CoverTaggedTarget,
                id: None,
                cover_hint: Some(cover_hint.to_string()),
                target: target.to_string(),
                raw_text: line.to_string(),
            }
        }
        None => TypedReference {
            kind: target_kind_of(line),
            id: None,
            cover_hint: None,
            target: line.to_string(),
            raw_text: line.to_string(),
        },
    }
}

/// Text after the first space is a human annotation.
fn strip_annotation(remainder: &str) -> &str {
    match remainder.find(' ') {
        Some(index) => &remainder[..index],
        None => remainder,
    }
}
