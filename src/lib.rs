use js_sys::{Array, Object, Reflect};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wasm_bindgen::prelude::*;

pub mod aggregate;
pub mod color;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod select;

pub use color::{ColorCount, Rgb};
pub use config::{ExtractionConfig, Resize, Strategy};
pub use error::{PaletteError, Result};
pub use select::PaletteEntry;

/// Ranked colors of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
    /// Pixels read at the working resolution.
    pub sampled: usize,
    /// Pixels left after the background filter; proportions are relative to this.
    pub filtered: usize,
}

impl Palette {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hex(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.hex.as_str()).collect()
    }
}

/// Extract the palette of an image file.
///
/// Steps performed:
/// 1. Decode and box-downscale to the configured working resolution.
/// 2. Drop near-white and near-black pixels.
/// 3. Count exact colors, or run k-means, depending on `config.strategy`.
/// 4. Rank by weight and skip colors too close to one already chosen.
///
/// An image with nothing left after filtering yields an empty palette.
pub fn extract_palette(path: &Path, config: &ExtractionConfig) -> Result<Palette> {
    config.validate()?;
    let pixels = loader::load_pixels(path, config.resize, config.ignore_transparent)?;
    Ok(run_pipeline(&pixels, config))
}

/// [`extract_palette`] for an encoded image already in memory.
pub fn extract_palette_from_memory(input: &[u8], config: &ExtractionConfig) -> Result<Palette> {
    config.validate()?;
    let pixels = loader::load_pixels_from_memory(input, config.resize, config.ignore_transparent)?;
    Ok(run_pipeline(&pixels, config))
}

/// Run filter, aggregation and selection over already-decoded pixels.
pub fn extract_from_pixels(pixels: &[Rgb], config: &ExtractionConfig) -> Result<Palette> {
    config.validate()?;
    Ok(run_pipeline(pixels, config))
}

fn run_pipeline(pixels: &[Rgb], config: &ExtractionConfig) -> Palette {
    let filtered =
        filter::filter_background(pixels, config.white_threshold, config.black_threshold);
    tracing::debug!("Filter kept {} of {} pixels", filtered.len(), pixels.len());

    let counts = aggregate::aggregate(&filtered, &config.strategy);
    tracing::debug!("Aggregated into {} weighted colors", counts.len());

    let entries = select::select(
        counts,
        config.palette_size,
        config.similarity_threshold,
        config.candidate_limit,
        Some(filtered.len()),
    );

    if entries.is_empty() {
        tracing::info!("No colored pixels left after filtering");
    } else {
        tracing::info!("Extracted {} palette colors", entries.len());
    }

    Palette {
        entries,
        sampled: pixels.len(),
        filtered: filtered.len(),
    }
}

/// Settings for the wasm entry point.
///
/// `strategy` is `"exact"` (the default) or `"kmeans"`; `k` sets the cluster
/// count for the latter.
pub fn wasm_config(
    n_colors: usize,
    strategy: Option<&str>,
    k: Option<usize>,
) -> Result<ExtractionConfig> {
    let strategy = match strategy.unwrap_or("exact") {
        "exact" => Strategy::ExactFrequency,
        "kmeans" => Strategy::clustering(k.unwrap_or(config::DEFAULT_CLUSTERS)),
        other => {
            return Err(PaletteError::config(
                "strategy",
                other,
                "expected \"exact\" or \"kmeans\"",
            ));
        }
    };
    let config = ExtractionConfig {
        palette_size: n_colors,
        strategy,
        ..ExtractionConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Extract a palette from encoded image bytes.
///
/// Returns `{ palette: string[], proportions: number[] }`.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_js(
    input: Vec<u8>,
    n_colors: usize,
    strategy: Option<String>,
    k: Option<usize>,
) -> std::result::Result<Object, JsValue> {
    let to_js = |e: PaletteError| JsValue::from_str(&e.to_string());
    let config = wasm_config(n_colors, strategy.as_deref(), k).map_err(to_js)?;
    let palette = extract_palette_from_memory(&input, &config).map_err(to_js)?;

    let palette_js = Array::new();
    let proportions_js = Array::new();
    for entry in &palette.entries {
        palette_js.push(&JsValue::from_str(&entry.hex));
        proportions_js.push(&JsValue::from_f64(entry.proportion.unwrap_or(0.0)));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("palette"), &palette_js)?;
    Reflect::set(&result, &JsValue::from_str("proportions"), &proportions_js)?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_pixels() -> Vec<Rgb> {
        let mut pixels = vec![Rgb::new(255, 255, 255); 90];
        pixels.extend(vec![Rgb::new(10, 10, 10); 5]);
        pixels.extend(vec![Rgb::new(200, 30, 30); 3]);
        pixels.extend(vec![Rgb::new(205, 35, 33); 2]);
        pixels
    }

    #[test]
    fn test_background_and_near_duplicates_removed() {
        let palette =
            extract_from_pixels(&scenario_pixels(), &ExtractionConfig::default()).unwrap();
        assert_eq!(palette.hex(), vec!["#c81e1e"]);
        assert_eq!(palette.entries[0].proportion, Some(1.0));
        assert_eq!(palette.sampled, 100);
        assert_eq!(palette.filtered, 5);
    }

    #[test]
    fn test_all_white_is_empty_not_error() {
        let pixels = vec![Rgb::new(255, 255, 255); 400];
        let palette = extract_from_pixels(&pixels, &ExtractionConfig::default()).unwrap();
        assert!(palette.is_empty());
        assert_eq!(palette.filtered, 0);
    }

    #[test]
    fn test_invalid_config_fails_before_processing() {
        let config = ExtractionConfig {
            palette_size: 0,
            ..Default::default()
        };
        let err = extract_from_pixels(&scenario_pixels(), &config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_exact_frequency_is_repeatable() {
        let pixels: Vec<Rgb> = (0..2000u32)
            .map(|i| Rgb::new((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i % 97) as u8))
            .collect();
        let config = ExtractionConfig {
            palette_size: 6,
            ..Default::default()
        };
        let first = extract_from_pixels(&pixels, &config).unwrap();
        let second = extract_from_pixels(&pixels, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_proportions_sum_to_one_when_all_colors_kept() {
        let pixels = scenario_pixels();
        let config = ExtractionConfig {
            palette_size: 10,
            similarity_threshold: 0,
            ..ExtractionConfig::default().without_filter()
        };
        let palette = extract_from_pixels(&pixels, &config).unwrap();
        assert_eq!(palette.entries.len(), 4);
        let sum: f64 = palette.entries.iter().filter_map(|e| e.proportion).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_wasm_config_selects_strategy() {
        let config = wasm_config(4, None, None).unwrap();
        assert_eq!(config.palette_size, 4);
        assert_eq!(config.strategy, Strategy::ExactFrequency);

        let config = wasm_config(3, Some("kmeans"), Some(5)).unwrap();
        assert_eq!(config.strategy, Strategy::clustering(5));

        let config = wasm_config(3, Some("kmeans"), None).unwrap();
        assert_eq!(config.strategy, Strategy::clustering(config::DEFAULT_CLUSTERS));
    }

    #[test]
    fn test_wasm_config_rejects_bad_input() {
        let err = wasm_config(3, Some("median_cut"), None).unwrap_err();
        assert!(matches!(
            err,
            PaletteError::Configuration {
                parameter: "strategy",
                ..
            }
        ));
        assert!(wasm_config(0, None, None).unwrap_err().is_configuration());
        assert!(wasm_config(3, Some("kmeans"), Some(0)).is_err());
    }
}
