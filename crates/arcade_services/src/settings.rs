//! Settings management

use arcade_core::{EngineError, SessionConfig, Surface};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings")]
    Parse(#[from] serde_json::Error),
}

/// Engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub session: SessionConfig,
    pub surface: SurfaceSettings,
}

/// Playfield dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Validated surface for `Session::attach_surface`.
    pub fn surface(&self) -> Result<Surface, EngineError> {
        Surface::new(self.surface.width, self.surface.height)
    }
}
