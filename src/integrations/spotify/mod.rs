// src/integrations/spotify/mod.rs

pub mod client;
pub mod provider;

pub use client::SpotifyClient;
pub use provider::{
    AlbumMetadata, MetadataProvider, PlaylistMetadata, TrackMetadata, UnconfiguredProvider,
};

#[cfg(test)]
pub use provider::MockMetadataProvider;
