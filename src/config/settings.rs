use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use serde::{Serialize, Deserialize};
use thiserror::Error;

const CONFIG_FILE: &str = "wardrobe.toml";
const ENV_PREFIX: &str = "WARDROBE";

pub const DEFAULT_CONTENT_HOST: &str = "https://account.altvr.com";
pub const DEFAULT_HEADER: &str = "Bravent Designs";
pub const DEFAULT_PREVIEW_MARGIN: f32 = 1.5;
pub const DEFAULT_SCALE_STEP: f32 = 0.02;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to write settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// =============================================================================
// Settings sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Scheme and host of the content API, without a trailing path
    pub content_host: String,
    /// Upper bound for one catalog request; 0 disables the timeout
    pub request_timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            content_host: DEFAULT_CONTENT_HOST.to_string(),
            request_timeout_secs: 30,
            retry_attempts: 0,
            retry_backoff_ms: 500,
        }
    }
}

impl CatalogSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub header: String,
    pub remove_artifact: String,
    pub scale_up_artifact: String,
    pub scale_down_artifact: String,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            remove_artifact: "artifact:1150513214480450500".to_string(),
            scale_up_artifact: "artifact:1150512610458730762".to_string(),
            scale_down_artifact: "artifact:1150512673557840258".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardrobeBehaviorSettings {
    pub preview_margin: f32,
    pub scale_step: f32,
    /// Lower clamp for worn scale axes; unset means unbounded
    pub scale_min: Option<f32>,
    /// Upper clamp for worn scale axes; unset means unbounded
    pub scale_max: Option<f32>,
}

impl Default for WardrobeBehaviorSettings {
    fn default() -> Self {
        Self {
            preview_margin: DEFAULT_PREVIEW_MARGIN,
            scale_step: DEFAULT_SCALE_STEP,
            scale_min: None,
            scale_max: None,
        }
    }
}

impl WardrobeBehaviorSettings {
    pub fn clamp_scale(&self, value: f32) -> f32 {
        let value = match self.scale_min {
            Some(min) => value.max(min),
            None => value,
        };
        match self.scale_max {
            Some(max) => value.min(max),
            None => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    /// Content pack used when the host parameter set does not name one
    pub content_pack: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardrobeSettings {
    pub catalog: CatalogSettings,
    pub menu: MenuSettings,
    pub wardrobe: WardrobeBehaviorSettings,
    pub session: SessionDefaults,
}

// =============================================================================
// Loading
// =============================================================================

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "mre", "mre-wardrobe")
        .map(|proj| proj.config_dir().join(CONFIG_FILE))
}

impl WardrobeSettings {
    /// Layer defaults, an optional TOML file and `WARDROBE_` environment
    /// overrides (e.g. `WARDROBE_CATALOG__CONTENT_HOST`).
    ///
    /// An explicit `path` must exist; the per-user config file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&WardrobeSettings::default())?);

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = config_path() {
                    builder = builder.add_source(config::File::from(default_path).required(false));
                }
            }
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<WardrobeSettings>()?;

        tracing::debug!("Loaded wardrobe settings: {:?}", settings);
        Ok(settings)
    }

    /// Load from a TOML file only, without environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&WardrobeSettings::default())?)
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize::<WardrobeSettings>()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        Ok(())
    }
}
