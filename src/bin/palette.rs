use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image_to_palette_wasm::config::{DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS};
use image_to_palette_wasm::{ExtractionConfig, Palette, Resize, Strategy, extract_palette};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    /// Count exact pixel values
    Exact,
    /// k-means clustering in RGB space
    Kmeans,
}

/// Extract the dominant colors of images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with extraction settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of colors to report
    #[arg(short = 'n', long)]
    colors: Option<usize>,

    /// Grouping method
    #[arg(short, long, value_enum)]
    method: Option<Method>,

    /// Cluster count for k-means
    #[arg(short = 'k', long)]
    clusters: Option<usize>,

    /// Iteration cap for k-means
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Seed for k-means initialisation
    #[arg(long)]
    seed: Option<u64>,

    /// Pixels brighter than this on every channel are ignored
    #[arg(long)]
    white: Option<u8>,

    /// Pixels darker than this on every channel are ignored
    #[arg(long)]
    black: Option<u8>,

    /// Keep near-white and near-black pixels
    #[arg(long, conflicts_with_all = ["white", "black"])]
    no_filter: bool,

    /// Minimum Manhattan distance between reported colors (0 disables)
    #[arg(short, long)]
    distance: Option<u32>,

    /// Square working resolution in pixels
    #[arg(short, long, conflicts_with = "native")]
    size: Option<u32>,

    /// Sample at the image's own resolution
    #[arg(long)]
    native: bool,

    /// Only consider this many of the most frequent candidates
    #[arg(long)]
    candidate_limit: Option<usize>,

    /// Skip fully transparent pixels
    #[arg(long)]
    ignore_transparent: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn extraction_config(&self) -> Result<ExtractionConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractionConfig::from_json_file(path)?,
            None => ExtractionConfig::default(),
        };

        if let Some(n) = self.colors {
            config.palette_size = n;
        }

        let (k, max_iterations, seed) = match config.strategy {
            Strategy::CentroidClustering {
                k,
                max_iterations,
                seed,
            } => (k, max_iterations, seed),
            Strategy::ExactFrequency => (DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS, None),
        };
        let use_kmeans = match self.method {
            Some(Method::Exact) => false,
            Some(Method::Kmeans) => true,
            None => matches!(config.strategy, Strategy::CentroidClustering { .. }),
        };
        config.strategy = if use_kmeans {
            Strategy::CentroidClustering {
                k: self.clusters.unwrap_or(k),
                max_iterations: self.max_iterations.unwrap_or(max_iterations),
                seed: self.seed.or(seed),
            }
        } else {
            Strategy::ExactFrequency
        };

        if self.no_filter {
            config = config.without_filter();
        }
        if let Some(white) = self.white {
            config.white_threshold = white;
        }
        if let Some(black) = self.black {
            config.black_threshold = black;
        }
        if let Some(distance) = self.distance {
            config.similarity_threshold = distance;
        }
        if let Some(size) = self.size {
            config.resize = Some(Resize::new(size, size));
        }
        if self.native {
            config.resize = None;
        }
        if self.candidate_limit.is_some() {
            config.candidate_limit = self.candidate_limit;
        }
        if self.ignore_transparent {
            config.ignore_transparent = true;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    path: &'a Path,
    #[serde(flatten)]
    palette: &'a Palette,
}

fn print_text(path: &Path, palette: &Palette) {
    println!("{}:", path.display());
    if palette.is_empty() {
        println!("  No colored pixels found");
        return;
    }
    for entry in &palette.entries {
        match entry.proportion {
            Some(p) => println!("  - {} (proportion: {:.4})", entry.hex, p),
            None => println!("  - {}", entry.hex),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = args.extraction_config().context("invalid configuration")?;
    tracing::debug!("Using {:?}", config);

    let mut reports = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let palette = extract_palette(input, &config)
            .with_context(|| format!("palette extraction failed for {}", input.display()))?;

        if args.json {
            reports.push((input.as_path(), palette));
        } else {
            print_text(input, &palette);
        }
    }

    if args.json {
        let out: Vec<Report> = reports
            .iter()
            .map(|(path, palette)| Report { path: *path, palette })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    }

    Ok(())
}
