// src/integrations/images/loader.rs
//
// Image loading
//
// - Local files: a missing file is `Ok(None)`, not an error; the caller
//   decides whether that deserves a warning
// - URLs: any download or decode failure is an error
// - Everything is decoded to 8-bit RGB up front

use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use crate::domain::resolution::{CoverImage, CoverOrigin};
use crate::error::{AppError, AppResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Load a local image if the file exists
    fn load_from_path(&self, path: &Path) -> AppResult<Option<CoverImage>>;

    async fn load_from_url(&self, url: &str) -> AppResult<CoverImage>;
}

/// Decode encoded image bytes (JPEG, PNG, ...) into RGB
pub fn decode_image(bytes: &[u8], origin: CoverOrigin) -> AppResult<CoverImage> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(CoverImage::new(width, height, rgb.into_raw(), origin))
}

pub struct HttpImageLoader {
    http_client: Client,
}

impl HttpImageLoader {
    pub fn new() -> AppResult<Self> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    fn load_from_path(&self, path: &Path) -> AppResult<Option<CoverImage>> {
        if !path.is_file() {
            return Ok(None);
        }

        let bytes = std::fs::read(path)?;
        decode_image(&bytes, CoverOrigin::File(path.to_path_buf())).map(Some)
    }

    async fn load_from_url(&self, url: &str) -> AppResult<CoverImage> {
        log::debug!("Fetching image {}", url);

        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Download(format!(
                "Image download returned status {} for {}",
                response.status(),
                url
            )));
        }

        let bytes = response.bytes().await?;
        decode_image(&bytes, CoverOrigin::Url(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 10, 10]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let cover = decode_image(&png_bytes(3, 2), CoverOrigin::Url("u".to_string())).unwrap();
        assert_eq!((cover.width, cover.height), (3, 2));
        assert_eq!(cover.rgb.len(), 3 * 2 * 3);
        assert_eq!(&cover.rgb[..3], &[200, 10, 10]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_image(b"not an image", CoverOrigin::Url("u".to_string()));
        assert!(matches!(result, Err(AppError::Image(_))));
    }

    #[test]
    fn test_missing_path_is_none() {
        let loader = HttpImageLoader::new().unwrap();
        let result = loader.load_from_path(Path::new("/no/such/cover.jpg")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_existing_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        std::fs::write(&path, png_bytes(4, 4)).unwrap();

        let loader = HttpImageLoader::new().unwrap();
        let cover = loader.load_from_path(&path).unwrap().unwrap();
        assert_eq!(cover.width, 4);
        assert_eq!(cover.origin, CoverOrigin::File(path));
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cover.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(png_bytes(5, 5))
            .create_async()
            .await;

        let loader = HttpImageLoader::new().unwrap();
        let url = format!("{}/cover.png", server.url());
        let cover = loader.load_from_url(&url).await.unwrap();
        assert_eq!(cover.width, 5);
        assert_eq!(cover.origin, CoverOrigin::Url(url));
    }

    #[tokio::test]
    async fn test_url_not_found_is_error() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/gone.png").with_status(404).create_async().await;

        let loader = HttpImageLoader::new().unwrap();
        let result = loader.load_from_url(&format!("{}/gone.png", server.url())).await;
        assert!(result.is_err());
    }
}
