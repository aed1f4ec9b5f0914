// src/services/resolution_service.rs
//
// Metadata Resolution
//
// Turns a TypedReference into a printable ResolvedCard.
//
// CRITICAL RULES:
// - code_payload is ALWAYS the raw line, even for `cover|target` lines
// - Provider and cover download failures are fatal (AppResult)
// - A missing local cover is a warning, never an error
// - One reference at a time, in order; no shared state between cards
//   except the collected warnings

use std::path::{Path, PathBuf};

use crate::domain::reference::entity::is_web_url;
use crate::domain::reference::{ReferenceKind, TypedReference};
use crate::domain::resolution::{CoverImage, ResolutionWarning, ResolvedCard};
use crate::error::{AppError, AppResult};
use crate::integrations::images::ImageLoader;
use crate::integrations::spotify::MetadataProvider;

/// Appended to the share path by the share cover heuristic
pub const SHARE_COVER_FILE: &str = "cover.jpg";

/// Characters of the target skipped before looking for the next `/`
const SHARE_PREFIX_SKIP: usize = 4;

// ============================================================================
// SHARE COVER HEURISTIC
// ============================================================================

/// Fallback cover location for a local target.
///
/// Swaps the mount prefix of `target` (everything before the first `/` at
/// or after its fourth character) for `share_root` and appends
/// `/cover.jpg`. No path when there is no such `/`.
///
/// `share_cover_path("/srv", "/mnt/music/Album")` is `/srv/music/Album/cover.jpg`.
pub fn share_cover_path(share_root: &str, target: &str) -> Option<PathBuf> {
    let (index, _) = target
        .char_indices()
        .skip(SHARE_PREFIX_SKIP)
        .find(|(_, c)| *c == '/')?;

    Some(PathBuf::from(format!(
        "{}{}/{}",
        share_root,
        &target[index..],
        SHARE_COVER_FILE
    )))
}

/// Text after the last `/`, or the whole target
fn last_segment(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}

// ============================================================================
// RESOLVER
// ============================================================================

pub struct MetadataResolver<'a> {
    provider: &'a dyn MetadataProvider,
    images: &'a dyn ImageLoader,
    share_path: &'a str,
    warnings: Vec<ResolutionWarning>,
}

impl<'a> MetadataResolver<'a> {
    pub fn new(
        provider: &'a dyn MetadataProvider,
        images: &'a dyn ImageLoader,
        share_path: &'a str,
    ) -> Self {
        Self {
            provider,
            images,
            share_path,
            warnings: Vec::new(),
        }
    }

    pub fn warnings(&self) -> &[ResolutionWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<ResolutionWarning> {
        self.warnings
    }

    fn warn(&mut self, warning: ResolutionWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub async fn resolve(&mut self, reference: &TypedReference) -> AppResult<ResolvedCard> {
        log::debug!("Resolving {} reference '{}'", reference.kind, reference.raw_text);

        let card = match reference.kind {
            ReferenceKind::StreamAlbum => {
                let id = Self::provider_id(reference)?;
                let album = self.provider.lookup_album(id).await?;
                let cover = self.first_artwork(&album.images, reference).await?;
                ResolvedCard::new(
                    album.name,
                    album.artists.into_iter().next().unwrap_or_default(),
                    reference.raw_text.clone(),
                    reference.kind,
                )
                .with_cover(cover)
            }
            ReferenceKind::StreamTrack => {
                let id = Self::provider_id(reference)?;
                let track = self.provider.lookup_track(id).await?;
                let cover = self.first_artwork(&track.album_images, reference).await?;
                ResolvedCard::new(
                    track.name,
                    track.artists.into_iter().next().unwrap_or_default(),
                    reference.raw_text.clone(),
                    reference.kind,
                )
                .with_cover(cover)
            }
            ReferenceKind::StreamPlaylist => {
                let id = Self::provider_id(reference)?;
                let playlist = self.provider.lookup_playlist(id).await?;
                let cover = self.first_artwork(&playlist.cover_images, reference).await?;
                // The description takes the artist slot
                ResolvedCard::new(
                    playlist.name,
                    playlist.description.unwrap_or_default(),
                    reference.raw_text.clone(),
                    reference.kind,
                )
                .with_cover(cover)
            }
            ReferenceKind::CoverTaggedTarget | ReferenceKind::WebUrl | ReferenceKind::LocalPath => {
                let cover = match reference.cover_hint.as_deref() {
                    Some(hint) => self.resolve_cover_hint(hint).await?,
                    None => None,
                };
                self.resolve_target(reference, cover)
            }
        };

        Ok(card)
    }

    fn provider_id(reference: &TypedReference) -> AppResult<&str> {
        reference.id.as_deref().ok_or_else(|| {
            AppError::Provider(format!("Reference '{}' has no provider id", reference.raw_text))
        })
    }

    async fn first_artwork(
        &mut self,
        urls: &[String],
        reference: &TypedReference,
    ) -> AppResult<Option<CoverImage>> {
        match urls.first() {
            Some(url) => self.images.load_from_url(url).await.map(Some),
            None => {
                self.warn(ResolutionWarning::MissingArtwork {
                    reference: reference.raw_text.clone(),
                });
                Ok(None)
            }
        }
    }

    async fn resolve_cover_hint(&mut self, hint: &str) -> AppResult<Option<CoverImage>> {
        if hint.is_empty() {
            return Ok(None);
        }

        if is_web_url(hint) {
            return self.images.load_from_url(hint).await.map(Some);
        }

        let path = Path::new(hint);
        let cover = self.images.load_from_path(path)?;
        if cover.is_none() {
            self.warn(ResolutionWarning::MissingCoverFile {
                path: path.to_path_buf(),
            });
        }
        Ok(cover)
    }

    fn resolve_target(&mut self, reference: &TypedReference, cover: Option<CoverImage>) -> ResolvedCard {
        let target = reference.target.as_str();

        if target.is_empty() {
            self.warn(ResolutionWarning::EmptyTarget {
                raw: reference.raw_text.clone(),
            });
        }

        let (title, cover) = match reference.target_kind() {
            ReferenceKind::WebUrl => (target.to_string(), cover),
            _ => {
                let cover = match cover {
                    Some(cover) => Some(cover),
                    None => self.share_cover(target),
                };
                (last_segment(target).to_string(), cover)
            }
        };

        ResolvedCard::new(title, String::new(), reference.raw_text.clone(), reference.kind)
            .with_cover(cover)
    }

    /// Best effort: absent or unreadable share covers are skipped silently
    fn share_cover(&self, target: &str) -> Option<CoverImage> {
        let path = share_cover_path(self.share_path, target)?;
        match self.images.load_from_path(&path) {
            Ok(Some(cover)) => Some(cover),
            Ok(None) => {
                log::debug!("No share cover at {}", path.display());
                None
            }
            Err(e) => {
                log::debug!("Ignoring unreadable share cover {}: {}", path.display(), e);
                None
            }
        }
    }
}
