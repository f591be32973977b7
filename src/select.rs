use crate::color::{ColorCount, Rgb};
use serde::{Deserialize, Serialize};

/// One color of the final palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Lowercase `#rrggbb`.
    pub hex: String,
    pub color: Rgb,
    /// Pixels this color stands for.
    pub count: usize,
    /// Share of the filtered pixels, when that total is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proportion: Option<f64>,
}

impl PaletteEntry {
    fn new(color: Rgb, count: usize, total: Option<usize>) -> Self {
        let proportion = total
            .filter(|&t| t > 0)
            .map(|t| count as f64 / t as f64);
        Self {
            hex: color.to_hex(),
            color,
            count,
            proportion,
        }
    }
}

/// Rank weighted colors and greedily keep the visually distinct ones.
///
/// A candidate is accepted only when its Manhattan distance to every color
/// already accepted is at least `min_distance`. Equal weights keep their input
/// order. At most `limit` candidates are inspected when it is set.
pub fn select(
    mut counts: Vec<ColorCount>,
    palette_size: usize,
    min_distance: u32,
    limit: Option<usize>,
    total: Option<usize>,
) -> Vec<PaletteEntry> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(limit) = limit {
        counts.truncate(limit);
    }

    let mut accepted: Vec<ColorCount> = Vec::with_capacity(palette_size);
    for candidate in counts {
        if accepted.len() >= palette_size {
            break;
        }
        let distinct = accepted
            .iter()
            .all(|kept| kept.color.manhattan(&candidate.color) >= min_distance);
        if distinct {
            accepted.push(candidate);
        }
    }

    accepted
        .into_iter()
        .map(|c| PaletteEntry::new(c.color, c.count, total))
        .collect()
}
