// src/integrations/spotify/provider.rs
//
// Metadata provider seam
//
// The resolver only sees this trait. Lookups return plain DTOs; nothing here
// knows about cards.

use async_trait::async_trait;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumMetadata {
    pub name: String,
    pub artists: Vec<String>,
    /// Artwork URLs, largest first as listed by the provider
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub name: String,
    pub artists: Vec<String>,
    /// Artwork of the album the track belongs to
    pub album_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistMetadata {
    pub name: String,
    pub description: Option<String>,
    pub cover_images: Vec<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn lookup_album(&self, id: &str) -> AppResult<AlbumMetadata>;

    async fn lookup_track(&self, id: &str) -> AppResult<TrackMetadata>;

    async fn lookup_playlist(&self, id: &str) -> AppResult<PlaylistMetadata>;
}

/// Stands in when no client credentials are configured.
///
/// Link lists without streaming references run fine; the first streaming
/// lookup fails the run.
#[derive(Debug, Default)]
pub struct UnconfiguredProvider;

impl UnconfiguredProvider {
    fn unavailable(what: &str, id: &str) -> AppError {
        AppError::Provider(format!(
            "cannot look up {} {}: no spotify_client_id configured",
            what, id
        ))
    }
}

#[async_trait]
impl MetadataProvider for UnconfiguredProvider {
    async fn lookup_album(&self, id: &str) -> AppResult<AlbumMetadata> {
        Err(Self::unavailable("album", id))
    }

    async fn lookup_track(&self, id: &str) -> AppResult<TrackMetadata> {
        Err(Self::unavailable("track", id))
    }

    async fn lookup_playlist(&self, id: &str) -> AppResult<PlaylistMetadata> {
        Err(Self::unavailable("playlist", id))
    }
}
