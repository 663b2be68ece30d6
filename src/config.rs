use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const DEFAULT_EDAMAM_ENDPOINT: &str = "https://api.edamam.com/api/nutrition-details";

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Google Cloud Vision credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_vision_endpoint")]
    pub endpoint: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_vision_endpoint(),
        }
    }
}

fn default_vision_endpoint() -> String {
    DEFAULT_VISION_ENDPOINT.to_string()
}

/// Edamam Nutrition Analysis credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdamamConfig {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    #[serde(default = "default_edamam_endpoint")]
    pub endpoint: String,
}

impl Default for EdamamConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            endpoint: default_edamam_endpoint(),
        }
    }
}

impl EdamamConfig {
    /// Returns true if both the app id and key are set
    pub fn is_configured(&self) -> bool {
        self.app_id.is_some() && self.app_key.is_some()
    }
}

fn default_edamam_endpoint() -> String {
    DEFAULT_EDAMAM_ENDPOINT.to_string()
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the nutrition log
    pub data_dir: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    #[serde(skip_serializing)]
    pub vision: VisionConfig,
    #[serde(skip_serializing)]
    pub edamam: EdamamConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    vision: Option<VisionConfig>,
    edamam: Option<EdamamConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut config_file = None;
        let mut vision = VisionConfig::default();
        let mut edamam = EdamamConfig::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(v) = file_config.vision {
                vision = v;
            }
            if let Some(e) = file_config.edamam {
                edamam = e;
            }
        }

        if let Ok(dir) = std::env::var("MEALSNAP_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(key) = std::env::var("GOOGLE_VISION_API_KEY") {
            vision.api_key = Some(key);
        }
        if let Ok(id) = std::env::var("EDAMAM_APP_ID") {
            edamam.app_id = Some(id);
        }
        if let Ok(key) = std::env::var("EDAMAM_APP_KEY") {
            edamam.app_key = Some(key);
        }

        tracing::debug!(
            "Config loaded: data_dir={} ({})",
            data_dir.value.display(),
            data_dir.source
        );

        Ok(Self {
            data_dir,
            config_file,
            vision,
            edamam,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/mealsnap/
    /// - macOS: ~/Library/Application Support/mealsnap/
    /// - Windows: %APPDATA%/mealsnap/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mealsnap")
    }

    /// Default data directory: `<platform data dir>/mealsnap/nutrition`
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mealsnap")
            .join("nutrition")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
