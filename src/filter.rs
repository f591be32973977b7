use crate::color::Rgb;

/// True for near-white background or near-black text pixels.
#[inline]
pub fn is_background(p: &Rgb, white_threshold: u8, black_threshold: u8) -> bool {
    let white = p.r > white_threshold && p.g > white_threshold && p.b > white_threshold;
    let black = p.r < black_threshold && p.g < black_threshold && p.b < black_threshold;
    white || black
}

/// Keep only pixels that are not background, preserving order.
pub fn filter_background(pixels: &[Rgb], white_threshold: u8, black_threshold: u8) -> Vec<Rgb> {
    pixels
        .iter()
        .copied()
        .filter(|p| !is_background(p, white_threshold, black_threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_extremes_only() {
        let pixels = [
            Rgb::new(255, 255, 255),
            Rgb::new(241, 241, 241),
            Rgb::new(240, 250, 250),
            Rgb::new(10, 10, 10),
            Rgb::new(19, 19, 20),
            Rgb::new(200, 30, 30),
        ];
        let kept = filter_background(&pixels, 240, 20);
        assert_eq!(
            kept,
            vec![
                Rgb::new(240, 250, 250),
                Rgb::new(19, 19, 20),
                Rgb::new(200, 30, 30)
            ]
        );
    }

    #[test]
    fn test_degenerate_thresholds_keep_everything() {
        let pixels = [
            Rgb::new(255, 255, 255),
            Rgb::new(0, 0, 0),
            Rgb::new(12, 200, 90),
        ];
        assert_eq!(filter_background(&pixels, 255, 0), pixels.to_vec());
    }

    #[test]
    fn test_all_white_filters_to_empty() {
        let pixels = vec![Rgb::new(255, 255, 255); 32];
        assert!(filter_background(&pixels, 240, 20).is_empty());
    }
}
