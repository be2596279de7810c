use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::{HttpSettings, CORE_MEDIA_USER_AGENT};

/// Default chunk size for ranged media GETs.
pub const DEFAULT_CHUNK_SIZE: u64 = 524_288;

const DEFAULT_PLAYLIST_PREFIX: &str = "http://www.bbc.co.uk/iplayer/playlist/";
const DEFAULT_MEDIA_SELECTOR_PREFIX: &str =
    "http://www.bbc.co.uk/mediaselector/3/auth/iplayer_streaming_http_mp4";

/// Global configuration loaded from `~/.config/ipd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpdConfig {
    /// Playlist endpoint; the programme id is appended directly.
    pub playlist_prefix: String,
    /// Media selector endpoint; `/{version}?{cache_bust}` is appended.
    pub media_selector_prefix: String,
    /// Client identity sent on every request.
    pub user_agent: String,
    /// Bytes per ranged chunk GET.
    pub chunk_size: u64,
    /// Connection timeout in seconds for all requests.
    pub connect_timeout_secs: u64,
    /// Overall timeout in seconds for metadata requests (playlist, auth, probe).
    pub metadata_timeout_secs: u64,
    /// Overall timeout in seconds for a single chunk request.
    pub chunk_timeout_secs: u64,
    /// Default destination directory; the current directory when unset.
    #[serde(default)]
    pub destination: Option<PathBuf>,
}

impl Default for IpdConfig {
    fn default() -> Self {
        Self {
            playlist_prefix: DEFAULT_PLAYLIST_PREFIX.to_string(),
            media_selector_prefix: DEFAULT_MEDIA_SELECTOR_PREFIX.to_string(),
            user_agent: CORE_MEDIA_USER_AGENT.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout_secs: 15,
            metadata_timeout_secs: 30,
            chunk_timeout_secs: 3600,
            destination: None,
        }
    }
}

impl IpdConfig {
    /// Transport settings for the short metadata requests.
    pub fn metadata_http(&self) -> HttpSettings {
        HttpSettings {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.metadata_timeout_secs),
        }
    }

    /// Transport settings for chunk requests (long hard timeout).
    pub fn chunk_http(&self) -> HttpSettings {
        HttpSettings {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.chunk_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ipd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<IpdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = IpdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: IpdConfig = toml::from_str(&data)?;
    Ok(cfg)
}
