//! Extraction parameters.
//!
//! Every field has a default, so a JSON config only needs the keys it changes:
//!
//! ```no_run
//! use image_to_palette_wasm::ExtractionConfig;
//! use std::path::Path;
//!
//! let config = ExtractionConfig::from_json_file(Path::new("palette.json"))?;
//! # Ok::<(), image_to_palette_wasm::PaletteError>(())
//! ```

use crate::error::{PaletteError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PALETTE_SIZE: usize = 3;
pub const DEFAULT_WHITE_THRESHOLD: u8 = 240;
pub const DEFAULT_BLACK_THRESHOLD: u8 = 20;
pub const DEFAULT_SIMILARITY_THRESHOLD: u32 = 50;
pub const DEFAULT_CLUSTERS: usize = 3;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// `kmeans_colors` stores cluster membership as `u8`.
pub const MAX_CLUSTERS: usize = 256;

/// Fixed working resolution pixels are sampled at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resize {
    pub width: u32,
    pub height: u32,
}

impl Resize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Resize {
    fn default() -> Self {
        Self::new(150, 150)
    }
}

/// How pixels are reduced to weighted colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// One entry per distinct pixel value, weighted by occurrence.
    #[default]
    ExactFrequency,
    /// k-means in RGB space, weighted by cluster size.
    CentroidClustering {
        #[serde(default = "default_clusters")]
        k: usize,
        #[serde(default = "default_max_iterations")]
        max_iterations: usize,
        /// Fixed seed for the initial centroids; drawn from the OS when absent.
        #[serde(default)]
        seed: Option<u64>,
    },
}

fn default_clusters() -> usize {
    DEFAULT_CLUSTERS
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Strategy {
    pub fn clustering(k: usize) -> Self {
        Strategy::CentroidClustering {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum number of colors returned.
    pub palette_size: usize,

    /// Pixels with every channel above this are treated as background.
    pub white_threshold: u8,

    /// Pixels with every channel below this are treated as text.
    pub black_threshold: u8,

    /// Minimum Manhattan distance between two returned colors. 0 keeps near-duplicates.
    pub similarity_threshold: u32,

    pub strategy: Strategy,

    /// Working resolution; `None` samples the image at its native size.
    pub resize: Option<Resize>,

    /// Only the heaviest `n` candidates are considered for the palette.
    pub candidate_limit: Option<usize>,

    /// Drop fully transparent pixels instead of reading their RGB.
    pub ignore_transparent: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::distinct()
    }
}

impl ExtractionConfig {
    /// Background filter, exact counting and near-duplicate suppression.
    pub fn distinct() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            strategy: Strategy::ExactFrequency,
            resize: Some(Resize::default()),
            candidate_limit: None,
            ignore_transparent: false,
        }
    }

    /// Plain most-common colors of a 50x50 thumbnail.
    pub fn frequency() -> Self {
        Self {
            palette_size: 6,
            similarity_threshold: 0,
            resize: Some(Resize::new(50, 50)),
            ..Self::distinct().without_filter()
        }
    }

    /// k-means with `k = 3` over every pixel.
    pub fn clustered() -> Self {
        Self {
            strategy: Strategy::clustering(DEFAULT_CLUSTERS),
            similarity_threshold: 0,
            ..Self::distinct().without_filter()
        }
    }

    /// Thresholds that keep every pixel.
    pub fn without_filter(self) -> Self {
        Self {
            white_threshold: u8::MAX,
            black_threshold: 0,
            ..self
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| PaletteError::config_file(path, e))?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| PaletteError::config_file(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no extraction could honor.
    pub fn validate(&self) -> Result<()> {
        if self.palette_size == 0 {
            return Err(PaletteError::config(
                "palette_size",
                self.palette_size,
                "must be at least 1",
            ));
        }

        if let Strategy::CentroidClustering {
            k, max_iterations, ..
        } = self.strategy
        {
            if k == 0 || k > MAX_CLUSTERS {
                return Err(PaletteError::config("k", k, "must be between 1 and 256"));
            }
            if max_iterations == 0 {
                return Err(PaletteError::config(
                    "max_iterations",
                    max_iterations,
                    "must be at least 1",
                ));
            }
        }

        if let Some(size) = self.resize {
            if size.width == 0 || size.height == 0 {
                return Err(PaletteError::config(
                    "resize",
                    format!("{}x{}", size.width, size.height),
                    "dimensions must be non-zero",
                ));
            }
        }

        if self.candidate_limit == Some(0) {
            return Err(PaletteError::config(
                "candidate_limit",
                0,
                "must be at least 1 when set",
            ));
        }

        Ok(())
    }
}
