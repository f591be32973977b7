use crate::color::{ColorCount, Rgb};
use crate::config::Strategy;
use kmeans_colors::get_kmeans;
use palette::Srgb;
use std::collections::{HashMap, HashSet};

/// Reduce pixels to weighted representative colors.
///
/// The result is unordered as far as callers are concerned; ranking happens in
/// [`crate::select`].
pub fn aggregate(pixels: &[Rgb], strategy: &Strategy) -> Vec<ColorCount> {
    if pixels.is_empty() {
        return Vec::new();
    }

    match *strategy {
        Strategy::ExactFrequency => count_exact(pixels),
        Strategy::CentroidClustering {
            k,
            max_iterations,
            seed,
        } => cluster(pixels, k, max_iterations, seed.unwrap_or_else(random_seed)),
    }
}

/// One entry per distinct color, in order of first appearance.
pub fn count_exact(pixels: &[Rgb]) -> Vec<ColorCount> {
    let mut slots: HashMap<Rgb, usize> = HashMap::new();
    let mut counts: Vec<ColorCount> = Vec::new();

    for &p in pixels {
        match slots.get(&p) {
            Some(&i) => counts[i].count += 1,
            None => {
                slots.insert(p, counts.len());
                counts.push(ColorCount::new(p, 1));
            }
        }
    }

    counts
}

/// k-means over RGB, weighted by cluster membership.
///
/// `k` is capped at the number of distinct colors so every initial centroid
/// lands on a real pixel. Clusters left empty after refinement are dropped.
pub fn cluster(pixels: &[Rgb], k: usize, max_iterations: usize, seed: u64) -> Vec<ColorCount> {
    let distinct = pixels.iter().collect::<HashSet<_>>().len();
    let k = if k > distinct {
        tracing::warn!(
            "Only {} distinct colors available, reducing k from {}",
            distinct,
            k
        );
        distinct
    } else {
        k
    };

    let points: Vec<Srgb> = pixels
        .iter()
        .map(|p| Srgb::new(p.r, p.g, p.b).into_format::<f32>())
        .collect();

    // A converge threshold of zero keeps iterating until assignments stop moving.
    let kmeans = get_kmeans(k, max_iterations, 0.0, false, &points, seed);
    tracing::debug!(
        "k-means finished: k={}, score={}, seed={}",
        k,
        kmeans.score,
        seed
    );

    let mut members = vec![0usize; kmeans.centroids.len()];
    for &idx in &kmeans.indices {
        members[idx as usize] += 1;
    }

    kmeans
        .centroids
        .iter()
        .zip(members)
        .filter(|&(_, count)| count > 0)
        .map(|(c, count)| ColorCount::new(round_centroid(c), count))
        .collect()
}

fn round_centroid(c: &Srgb) -> Rgb {
    let channel = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(c.red), channel(c.green), channel(c.blue))
}

fn random_seed() -> u64 {
    getrandom::u64().unwrap_or_else(|e| {
        tracing::warn!("No OS randomness available ({}), using seed 0", e);
        0
    })
}
