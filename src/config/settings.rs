// src/config/settings.rs
//
// Card deck configuration (TOML)
//
// PRINCIPLES:
// - Every geometry key has a default matching a landscape A4 sheet of six cards
// - Lengths are millimetres, except border width and font sizes which are points
// - Paths are required; nothing is inferred from the working directory
// - Validation happens once, at load time

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
const APP_DIR_NAME: &str = "cardfold";

/// Page and card geometry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub page_width: f32,
    pub page_height: f32,
    pub cards_per_row: usize,
    pub card_width: f32,
    pub border_width: f32,
    pub code_size: f32,
    pub top_margin: f32,
    pub cover_size: f32,
    pub artist_padding_top: f32,
    pub artist_font_size: f32,
    pub title_padding_top: f32,
    pub title_font_size: f32,
    pub title_max_height: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_width: 297.0,
            page_height: 210.0,
            cards_per_row: 6,
            card_width: 40.0,
            border_width: 1.0,
            code_size: 22.0,
            top_margin: 11.0,
            cover_size: 30.0,
            artist_padding_top: 5.0,
            artist_font_size: 8.0,
            title_padding_top: 3.0,
            title_font_size: 9.0,
            title_max_height: 22.0,
        }
    }
}

impl LayoutSettings {
    /// Width of one printed row of cards, in millimetres
    pub fn strip_width(&self) -> f32 {
        self.card_width * self.cards_per_row as f32
    }

    fn validate(&self) -> AppResult<()> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("card_width", self.card_width),
            ("code_size", self.code_size),
            ("cover_size", self.cover_size),
            ("artist_font_size", self.artist_font_size),
            ("title_font_size", self.title_font_size),
            ("title_max_height", self.title_max_height),
        ];
        for (key, value) in positive {
            if !(value > 0.0) {
                return Err(AppError::Config(format!("{} must be positive, got {}", key, value)));
            }
        }

        if self.border_width < 0.0 {
            return Err(AppError::Config("border_width cannot be negative".to_string()));
        }

        if self.cards_per_row == 0 {
            return Err(AppError::Config("cards_per_row must be at least 1".to_string()));
        }

        if self.strip_width() > self.page_width {
            return Err(AppError::Config(format!(
                "{} cards of {} mm do not fit on a {} mm wide page",
                self.cards_per_row, self.card_width, self.page_width
            )));
        }

        Ok(())
    }
}

/// Client-credentials pair for the streaming metadata provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub layout: LayoutSettings,

    /// Where the PDF is written
    pub destination_file: PathBuf,

    /// The link list, one reference per line
    pub cards_file: PathBuf,

    /// Root prepended to local paths when looking for share cover art
    #[serde(default)]
    pub share_path: String,

    /// Brand image drawn above the code mark of streaming cards.
    /// Unset means streaming cards print without it (see config.example.toml).
    #[serde(default)]
    pub brand_mark: Option<PathBuf>,

    #[serde(default)]
    pub spotify_client_id: Option<String>,

    #[serde(default)]
    pub spotify_client_secret: Option<String>,
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Could not read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve which config file to use.
    ///
    /// An explicit path always wins. Otherwise `config.toml` in the working
    /// directory, then `<user config dir>/cardfold/config.toml`.
    pub fn locate(explicit: Option<&Path>) -> AppResult<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Ok(local);
        }

        let user = dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_CONFIG_FILE))
            .filter(|path| path.exists());

        user.ok_or_else(|| {
            AppError::Config(format!(
                "No {} in the working directory or the user config directory",
                DEFAULT_CONFIG_FILE
            ))
        })
    }

    /// Credentials are only usable when the client id is non-empty.
    pub fn provider_credentials(&self) -> Option<ProviderCredentials> {
        let client_id = self.spotify_client_id.as_deref().filter(|id| !id.is_empty())?;
        Some(ProviderCredentials {
            client_id: client_id.to_string(),
            client_secret: self.spotify_client_secret.clone().unwrap_or_default(),
        })
    }

    fn validate(&self) -> AppResult<()> {
        self.layout.validate()?;

        if self.destination_file.as_os_str().is_empty() {
            return Err(AppError::Config("destination_file cannot be empty".to_string()));
        }
        if self.cards_file.as_os_str().is_empty() {
            return Err(AppError::Config("cards_file cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        destination_file = "cards.pdf"
        cards_file = "links.txt"
    "#;

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(config.layout, LayoutSettings::default());
        assert_eq!(config.layout.cards_per_row, 6);
        assert_eq!(config.share_path, "");
        assert!(config.brand_mark.is_none());
        assert!(config.provider_credentials().is_none());
    }

    #[test]
    fn test_overrides() {
        let raw = r#"
            destination_file = "out/deck.pdf"
            cards_file = "links.txt"
            share_path = "/mnt/music"
            cards_per_row = 4
            card_width = 50
            title_font_size = 10.5
            spotify_client_id = "abc"
            spotify_client_secret = "xyz"
        "#;
        let config = Config::from_toml(raw).unwrap();
        assert_eq!(config.layout.cards_per_row, 4);
        assert!((config.layout.card_width - 50.0).abs() < f32::EPSILON);
        assert!((config.layout.title_font_size - 10.5).abs() < f32::EPSILON);
        assert_eq!(config.share_path, "/mnt/music");

        let credentials = config.provider_credentials().unwrap();
        assert_eq!(credentials.client_id, "abc");
        assert_eq!(credentials.client_secret, "xyz");
    }

    #[test]
    fn test_empty_client_id_means_no_credentials() {
        let raw = format!("{}\nspotify_client_id = \"\"\n", MINIMAL);
        let config = Config::from_toml(&raw).unwrap();
        assert!(config.provider_credentials().is_none());
    }

    #[test]
    fn test_zero_cards_per_row_rejected() {
        let raw = format!("{}\ncards_per_row = 0\n", MINIMAL);
        let result = Config::from_toml(&raw);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_strip_wider_than_page_rejected() {
        let raw = format!("{}\ncards_per_row = 8\ncard_width = 40\n", MINIMAL);
        match Config::from_toml(&raw) {
            Err(AppError::Config(msg)) => assert!(msg.contains("do not fit")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_key() {
        let result = Config::from_toml("cards_file = \"links.txt\"");
        assert!(matches!(result, Err(AppError::ConfigParse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.cards_file, PathBuf::from("links.txt"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/definitely/not/here/config.toml"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let path = Config::locate(Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_toml(include_str!("../../config.example.toml")).unwrap();
        assert_eq!(config.brand_mark, Some(PathBuf::from("spotify-logo.png")));
        assert_eq!(config.layout, LayoutSettings::default());
        assert!(config.provider_credentials().is_none());
    }
}
