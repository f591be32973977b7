//! Error types for palette extraction

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Error, Debug)]
pub enum PaletteError {
    /// The image could not be read or decoded.
    #[error("Failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A configuration value is outside its accepted range.
    #[error("Invalid parameter: {parameter} = {value} ({reason})")]
    Configuration {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A JSON configuration file could not be read or parsed.
    #[error("Failed to read config {path}: {message}")]
    ConfigFile {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PaletteError {
    pub(crate) fn load(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(
        parameter: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::Configuration {
            parameter,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn config_file<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigFile {
            path: path.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the failure happened before any pixel was read.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PaletteError::Configuration { .. } | PaletteError::ConfigFile { .. }
        )
    }
}
