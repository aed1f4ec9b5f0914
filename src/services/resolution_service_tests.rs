// src/services/resolution_service_tests.rs
//
// Resolver behaviour against mocked collaborators
//
// INVARIANTS TESTED:
// - code_payload is the raw line for every kind
// - Streaming lookups map name/artist/artwork fields as documented
// - Missing local covers become warnings, not errors
// - Provider failures propagate

#[cfg(test)]
mod resolver_tests {
    use std::path::{Path, PathBuf};

    use crate::domain::reference::{classify, ReferenceKind};
    use crate::domain::resolution::{CoverImage, CoverOrigin, ResolutionWarning};
    use crate::error::AppError;
    use crate::integrations::images::MockImageLoader;
    use crate::integrations::spotify::{
        AlbumMetadata, MockMetadataProvider, PlaylistMetadata, TrackMetadata,
    };
    use crate::services::resolution_service::MetadataResolver;

    fn cover_from(url: &str) -> CoverImage {
        CoverImage::new(1, 1, vec![0, 0, 0], CoverOrigin::Url(url.to_string()))
    }

    fn cover_at(path: &Path) -> CoverImage {
        CoverImage::new(1, 1, vec![9, 9, 9], CoverOrigin::File(path.to_path_buf()))
    }

    /// Provider that must never be called
    fn silent_provider() -> MockMetadataProvider {
        let mut provider = MockMetadataProvider::new();
        provider.expect_lookup_album().never();
        provider.expect_lookup_track().never();
        provider.expect_lookup_playlist().never();
        provider
    }

    /// Image loader with no files on disk and working downloads
    fn empty_disk_loader() -> MockImageLoader {
        let mut images = MockImageLoader::new();
        images.expect_load_from_path().returning(|_| Ok(None));
        images
            .expect_load_from_url()
            .returning(|url| Ok(cover_from(url)));
        images
    }

    // ========================================================================
    // STREAMING REFERENCES
    // ========================================================================

    #[tokio::test]
    async fn test_album_maps_first_artist_and_image() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_lookup_album()
            .withf(|id| id == "XYZ")
            .times(1)
            .returning(|_| {
                Ok(AlbumMetadata {
                    name: "Kind of Blue".to_string(),
                    artists: vec!["Miles Davis".to_string(), "John Coltrane".to_string()],
                    images: vec![
                        "https://i.example/640".to_string(),
                        "https://i.example/300".to_string(),
                    ],
                })
            });
        let images = empty_disk_loader();

        let mut resolver = MetadataResolver::new(&provider, &images, "");
        let card = resolver
            .resolve(&classify("spotify:album:XYZ"))
            .await
            .unwrap();

        assert_eq!(card.title, "Kind of Blue");
        assert_eq!(card.artist, "Miles Davis");
        assert_eq!(card.code_payload, "spotify:album:XYZ");
        assert_eq!(card.source_kind, ReferenceKind::StreamAlbum);
        assert_eq!(
            card.cover.unwrap().origin,
            CoverOrigin::Url("https://i.example/640".to_string())
        );
        assert!(resolver.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_track_uses_parent_album_artwork() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_lookup_track().returning(|_| {
            Ok(TrackMetadata {
                name: "So What".to_string(),
                artists: vec!["Miles Davis".to_string()],
                album_images: vec!["https://i.example/album".to_string()],
            })
        });
        let images = empty_disk_loader();

        let mut resolver = MetadataResolver::new(&provider, &images, "");
        let card = resolver.resolve(&classify("spotify:track:abc")).await.unwrap();

        assert_eq!(card.title, "So What");
        assert_eq!(card.artist, "Miles Davis");
        assert!(card.cover.is_some());
        assert!(card.shows_brand_mark());
    }

    #[tokio::test]
    async fn test_playlist_description_fills_artist_slot() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_lookup_playlist().returning(|_| {
            Ok(PlaylistMetadata {
                name: "Sunday Morning".to_string(),
                description: Some("Slow coffee songs".to_string()),
                cover_images: vec!["https://mosaic.example/1".to_string()],
            })
        });
        let images = empty_disk_loader();

        let mut resolver = MetadataResolver::new(&provider, &images, "");
        let card = resolver.resolve(&classify("spotify:playlist:p1")).await.unwrap();

        assert_eq!(card.title, "Sunday Morning");
        assert_eq!(card.artist, "Slow coffee songs");
    }

    #[tokio::test]
    async fn test_album_without_artists_or_images_degrades() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_lookup_album().returning(|_| {
            Ok(AlbumMetadata {
                name: "Untitled".to_string(),
                artists: vec![],
                images: vec![],
            })
        });
        let mut images = MockImageLoader::new();
        images.expect_load_from_url().never();

        let mut resolver = MetadataResolver::new(&provider, &images, "");
        let card = resolver.resolve(&classify("spotify:album:bare")).await.unwrap();

        assert_eq!(card.artist, "");
        assert!(card.cover.is_none());
        assert_eq!(
            resolver.into_warnings(),
            vec![ResolutionWarning::MissingArtwork {
                reference: "spotify:album:bare".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_lookup_album()
            .returning(|_| Err(AppError::Provider("token expired".to_string())));
        let images = empty_disk_loader();

        let mut resolver = MetadataResolver::new(&provider, &images, "");
        let result = resolver.resolve(&classify("spotify:album:XYZ")).await;

        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[tokio::test]
    async fn test_artwork_download_failure_is_fatal() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_lookup_album().returning(|_| {
            Ok(AlbumMetadata {
                name: "A".to_string(),
                artists: vec!["B".to_string()],
                images: vec!["https://i.example/gone".to_string()],
            })
        });
        let mut images = MockImageLoader::new();
        images
            .expect_load_from_url()
            .returning(|_| Err(AppError::Download("status 404".to_string())));

        let mut resolver = MetadataResolver::new(&provider, &images, "");
        let result = resolver.resolve(&classify("spotify:album:XYZ")).await;

        assert!(matches!(result, Err(AppError::Download(_))));
    }

    // ========================================================================
    // COVER-TAGGED, WEB AND LOCAL REFERENCES
    // ========================================================================

    #[tokio::test]
    async fn test_cover_tagged_payload_is_whole_line() {
        let provider = silent_provider();
        let images = empty_disk_loader();

        let line = "https://img.example/c.jpg|/mnt/music/Artist/Album";
        let mut resolver = MetadataResolver::new(&provider, &images, "/srv");
        let card = resolver.resolve(&classify(line)).await.unwrap();

        assert_eq!(card.code_payload, line);
        assert_eq!(card.title, "Album");
        assert_eq!(card.artist, "");
        assert_eq!(
            card.cover.unwrap().origin,
            CoverOrigin::Url("https://img.example/c.jpg".to_string())
        );
        assert_eq!(card.source_kind, ReferenceKind::CoverTaggedTarget);
    }

    #[tokio::test]
    async fn test_web_url_without_hint() {
        let provider = silent_provider();
        let mut images = MockImageLoader::new();
        images.expect_load_from_path().never();
        images.expect_load_from_url().never();

        let mut resolver = MetadataResolver::new(&provider, &images, "/srv");
        let card = resolver
            .resolve(&classify("https://radio.example/live"))
            .await
            .unwrap();

        assert!(card.cover.is_none());
        assert_eq!(card.title, "https://radio.example/live");
        assert_eq!(card.artist, "");
        assert!(!card.shows_brand_mark());
    }

    #[tokio::test]
    async fn test_missing_local_cover_is_warning() {
        let provider = silent_provider();
        let images = empty_disk_loader();

        let mut resolver = MetadataResolver::new(&provider, &images, "/srv");
        let card = resolver
            .resolve(&classify("/covers/missing.jpg|https://radio.example/live"))
            .await
            .unwrap();

        assert!(card.cover.is_none());
        assert_eq!(card.title, "https://radio.example/live");
        assert_eq!(
            resolver.warnings(),
            &[ResolutionWarning::MissingCoverFile {
                path: PathBuf::from("/covers/missing.jpg")
            }]
        );
    }

    #[tokio::test]
    async fn test_local_cover_hint_wins_over_share_cover() {
        let provider = silent_provider();
        let mut images = MockImageLoader::new();
        images
            .expect_load_from_path()
            .withf(|path| path == Path::new("/covers/a.jpg"))
            .times(1)
            .returning(|path| Ok(Some(cover_at(path))));

        let mut resolver = MetadataResolver::new(&provider, &images, "/srv");
        let card = resolver
            .resolve(&classify("/covers/a.jpg|/mnt/music/Album"))
            .await
            .unwrap();

        assert_eq!(
            card.cover.unwrap().origin,
            CoverOrigin::File(PathBuf::from("/covers/a.jpg"))
        );
    }

    #[tokio::test]
    async fn test_local_path_uses_share_cover() {
        let provider = silent_provider();
        let mut images = MockImageLoader::new();
        images
            .expect_load_from_path()
            .withf(|path| path == Path::new("/srv/music/Artist/Album/cover.jpg"))
            .returning(|path| Ok(Some(cover_at(path))));

        let mut resolver = MetadataResolver::new(&provider, &images, "/srv");
        let card = resolver
            .resolve(&classify("/mnt/music/Artist/Album"))
            .await
            .unwrap();

        assert_eq!(card.title, "Album");
        assert!(card.cover.is_some());
        assert!(resolver.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_local_path_without_share_cover_is_silent() {
        let provider = silent_provider();
        let images = empty_disk_loader();

        let mut resolver = MetadataResolver::new(&provider, &images, "/srv");
        let card = resolver.resolve(&classify("/mnt/music/Album")).await.unwrap();

        assert!(card.cover.is_none());
        assert!(resolver.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_lone_delimiter_yields_empty_card() {
        let provider = silent_provider();
        let images = empty_disk_loader();

        let mut resolver = MetadataResolver::new(&provider, &images, "/srv");
        let card = resolver.resolve(&classify("|")).await.unwrap();

        assert_eq!(card.title, "");
        assert_eq!(card.artist, "");
        assert_eq!(card.code_payload, "|");
        assert_eq!(
            resolver.into_warnings(),
            vec![ResolutionWarning::EmptyTarget {
                raw: "|".to_string()
            }]
        );
    }
}
