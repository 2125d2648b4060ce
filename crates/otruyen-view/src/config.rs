use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 25;
pub const DEFAULT_HOME_WINDOW_SIZE: u32 = 5;
pub const DEFAULT_LISTING_WINDOW_SIZE: u32 = 7;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
    #[serde(default = "default_home_window_size")]
    pub home_window_size: u32,
    #[serde(default = "default_listing_window_size")]
    pub listing_window_size: u32,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Requests wait indefinitely unless this is set
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: otruyen_home().join("config.yml"),
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            items_per_page: default_items_per_page(),
            home_window_size: default_home_window_size(),
            listing_window_size: default_listing_window_size(),
            user_agent: None,
            request_timeout_secs: None,
        }
    }
}

fn otruyen_home() -> PathBuf {
    match std::env::var("OTRUYEN_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".otruyen"),
    }
}

fn default_api_base_url() -> String {
    "https://otruyenapi.com".to_string()
}

fn default_image_base_url() -> String {
    "https://img.otruyenapi.com".to_string()
}

fn default_items_per_page() -> u32 {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_home_window_size() -> u32 {
    DEFAULT_HOME_WINDOW_SIZE
}

fn default_listing_window_size() -> u32 {
    DEFAULT_LISTING_WINDOW_SIZE
}

impl Config {
    /// Read the config at `path`, or at `$OTRUYEN_HOME/config.yml` when no
    /// path is given. A missing file is created with default values.
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Config> {
        let config_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => otruyen_home().join("config.yml"),
        };

        match std::fs::File::open(&config_path) {
            Ok(file) => {
                info!("open config from {:?}", config_path);
                let mut cfg: Self = serde_yml::from_reader(file)?;
                cfg.path = config_path;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Config {
                    path: config_path,
                    ..Default::default()
                };
                if let Err(e) = cfg.save() {
                    warn!("failed to write default config at {:?}: {}", cfg.path, e);
                } else {
                    info!("write default config at {:?}", cfg.path);
                }
                Ok(cfg)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("items_per_page", self.items_per_page),
            ("home_window_size", self.home_window_size),
            ("listing_window_size", self.listing_window_size),
        ] {
            if value < 1 {
                bail!("{} in {:?} must be at least 1", name, self.path);
            }
        }

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_yml::to_string(&self)?)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
