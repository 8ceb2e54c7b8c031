use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use fractalis_engine::config::{AnimationOptions, ColorOptions, InteractionOptions, RenderOptions};
use fractalis_engine::window::{LogicalSize, RuntimeConfig, WindowMode};

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "FRACTALIS_CONFIG";

/// Settings file picked up from the working directory when `CONFIG_ENV` is unset.
pub const DEFAULT_PATH: &str = "fractalis.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Everything the viewer reads from its settings file.
///
/// Unknown tables and keys are rejected at every level.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub window: WindowSettings,
    pub colors: ColorOptions,
    pub interaction: InteractionOptions,
    pub animation: AnimationOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSettings {
    pub title: String,
    /// Identifier the window is registered under.
    pub surface: String,
    /// Identifier the renderer attaches to.
    pub target: String,
    pub width: f64,
    pub height: f64,
    pub fullscreen: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "fractalis".to_string(),
            surface: "backdrop".to_string(),
            target: "backdrop".to_string(),
            width: 1280.0,
            height: 720.0,
            fullscreen: true,
        }
    }
}

impl Settings {
    /// Loads settings from `$FRACTALIS_CONFIG`, else `./fractalis.toml`, else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match locate(std::env::var_os(CONFIG_ENV)) {
            Some(path) => Self::from_file(&path),
            None => {
                log::info!("no settings file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The `[colors]`, `[interaction]` and `[animation]` tables as render options.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            colors: self.colors.clone(),
            interaction: self.interaction.clone(),
            animation: self.animation.clone(),
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.window.title.clone(),
            initial_size: LogicalSize::new(self.window.width, self.window.height),
            mode: if self.window.fullscreen {
                WindowMode::Fullscreen
            } else {
                WindowMode::Windowed
            },
            surface_id: self.window.surface.clone(),
        }
    }
}

fn locate(from_env: Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = from_env {
        return Some(PathBuf::from(path));
    }

    let fallback = Path::new(DEFAULT_PATH);
    fallback.is_file().then(|| fallback.to_path_buf())
}
