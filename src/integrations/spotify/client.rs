// src/integrations/spotify/client.rs
//
// Spotify Web API Integration
//
// ARCHITECTURE:
// - Client-credentials flow, one token per run (acquired in `connect`)
// - Three read-only lookups: album, track, playlist (+ playlist cover images)
// - Maps API payloads → provider DTOs; cards are built elsewhere
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Any non-success status is an error; there are no retries

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::provider::{AlbumMetadata, MetadataProvider, PlaylistMetadata, TrackMetadata};
use crate::config::ProviderCredentials;
use crate::error::{AppError, AppResult};

const API_BASE_URL: &str = "https://api.spotify.com";
const ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// API PAYLOADS
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ArtistData {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: String,
}

#[derive(Debug, Deserialize)]
struct AlbumData {
    name: String,
    #[serde(default)]
    artists: Vec<ArtistData>,
    #[serde(default)]
    images: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct TrackAlbumData {
    #[serde(default)]
    images: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct TrackData {
    name: String,
    #[serde(default)]
    artists: Vec<ArtistData>,
    album: TrackAlbumData,
}

#[derive(Debug, Deserialize)]
struct PlaylistData {
    name: String,
    description: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// Spotify Web API client holding the run's access token
pub struct SpotifyClient {
    api_base_url: String,
    http_client: Client,
    access_token: String,
}

impl SpotifyClient {
    /// Exchange client credentials for an access token against the public API
    pub async fn connect(credentials: &ProviderCredentials) -> AppResult<Self> {
        Self::connect_to(API_BASE_URL, ACCOUNTS_BASE_URL, credentials).await
    }

    /// Same as `connect`, against explicit endpoints
    pub async fn connect_to(
        api_base_url: &str,
        accounts_base_url: &str,
        credentials: &ProviderCredentials,
    ) -> AppResult<Self> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let response = http_client
            .post(format!("{}/api/token", accounts_base_url.trim_end_matches('/')))
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Provider(format!(
                "Token request returned status: {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse token response: {}", e)))?;

        log::info!("Acquired Spotify access token");
        log::debug!("Access token: {}", token.access_token);

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            http_client,
            access_token: token.access_token,
        })
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    async fn get_json<T>(&self, path: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.api_base_url, path);

        let response = self
            .http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Spotify API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Provider(format!(
                "Spotify API returned status {} for {}",
                response.status(),
                path
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse Spotify response for {}: {}", path, e)))
    }

    fn names(artists: Vec<ArtistData>) -> Vec<String> {
        artists.into_iter().map(|a| a.name).collect()
    }

    fn urls(images: Vec<ImageData>) -> Vec<String> {
        images.into_iter().map(|i| i.url).collect()
    }
}

#[async_trait]
impl MetadataProvider for SpotifyClient {
    async fn lookup_album(&self, id: &str) -> AppResult<AlbumMetadata> {
        let album: AlbumData = self.get_json(&format!("/v1/albums/{}", id)).await?;
        Ok(AlbumMetadata {
            name: album.name,
            artists: Self::names(album.artists),
            images: Self::urls(album.images),
        })
    }

    async fn lookup_track(&self, id: &str) -> AppResult<TrackMetadata> {
        let track: TrackData = self.get_json(&format!("/v1/tracks/{}", id)).await?;
        Ok(TrackMetadata {
            name: track.name,
            artists: Self::names(track.artists),
            album_images: Self::urls(track.album.images),
        })
    }

    async fn lookup_playlist(&self, id: &str) -> AppResult<PlaylistMetadata> {
        let playlist: PlaylistData = self.get_json(&format!("/v1/playlists/{}", id)).await?;
        let images: Vec<ImageData> = self.get_json(&format!("/v1/playlists/{}/images", id)).await?;
        Ok(PlaylistMetadata {
            name: playlist.name,
            description: playlist.description,
            cover_images: Self::urls(images),
        })
    }
}
