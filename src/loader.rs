use crate::color::Rgb;
use crate::config::Resize;
use crate::error::{PaletteError, Result};
use image::{DynamicImage, GenericImageView, ImageReader, RgbaImage, imageops};
use std::io::Cursor;
use std::path::Path;

/// Decode an image file and sample it into a flat list of RGB pixels.
pub fn load_pixels(
    path: &Path,
    resize: Option<Resize>,
    ignore_transparent: bool,
) -> Result<Vec<Rgb>> {
    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| PaletteError::load(path, image::ImageError::IoError(e)))?
        .decode()
        .map_err(|e| PaletteError::load(path, e))?;
    tracing::debug!("Decoded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(sample_pixels(&img, resize, ignore_transparent))
}

/// Same as [`load_pixels`] for an already-read encoded image.
pub fn load_pixels_from_memory(
    bytes: &[u8],
    resize: Option<Resize>,
    ignore_transparent: bool,
) -> Result<Vec<Rgb>> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PaletteError::load("<memory>", image::ImageError::IoError(e)))?
        .decode()
        .map_err(|e| PaletteError::load("<memory>", e))?;
    Ok(sample_pixels(&img, resize, ignore_transparent))
}

/// Row-major RGB pixels of `img` at the working resolution, alpha dropped.
///
/// Images already smaller than `resize` are read as they are.
pub fn sample_pixels(
    img: &DynamicImage,
    resize: Option<Resize>,
    ignore_transparent: bool,
) -> Vec<Rgb> {
    let (in_w, in_h) = img.dimensions();
    let rgba = img.to_rgba8();

    let working = match resize {
        Some(size) => downscale_box(&rgba, size.width.min(in_w), size.height.min(in_h)),
        None => rgba,
    };

    working
        .pixels()
        .filter(|p| !(ignore_transparent && p[3] == 0))
        .map(|p| Rgb::new(p[0], p[1], p[2]))
        .collect()
}

/// Down-scale with area averaging, so each source pixel contributes in
/// proportion to how much of an output pixel it covers.
fn downscale_box(img: &RgbaImage, out_w: u32, out_h: u32) -> RgbaImage {
    if img.dimensions() == (out_w, out_h) {
        return img.clone();
    }
    imageops::thumbnail(img, out_w, out_h)
}
