//! Final remapping: replace every full-resolution pixel with its nearest
//! palette entry.
//!
//! The palette is computed on a possibly downsampled dataset but applied
//! to the original raster on purpose — clustering stays fast while the
//! output keeps full resolution.

use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::ReduceError;
use crate::nearest::nearest_neighbor;
use crate::{Centroid, Palette};

/// Remap `image` onto `palette`, producing a new raster with the same
/// dimensions and channel count. The input is not mutated; samples are
/// the matched centroid's channels rounded and clamped to the 0–255
/// domain.
pub fn quantize(image: &DynamicImage, palette: &Palette) -> Result<RgbaImage, ReduceError> {
    if palette.is_empty() {
        return Err(ReduceError::EmptyPalette);
    }
    if !palette
        .iter()
        .all(|c| c.iter().all(|sample| sample.is_finite()))
    {
        return Err(ReduceError::NonFiniteSample("palette"));
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let query = [
            src.0[0] as f64,
            src.0[1] as f64,
            src.0[2] as f64,
            src.0[3] as f64,
        ];
        let matched = &palette[nearest_neighbor(&query, palette)];
        *dst = Rgba([
            clamp_to_u8(matched[0]),
            clamp_to_u8(matched[1]),
            clamp_to_u8(matched[2]),
            clamp_to_u8(matched[3]),
        ]);
    }

    Ok(out)
}

fn clamp_to_u8(sample: f64) -> u8 {
    sample.round().clamp(0.0, 255.0) as u8
}

/// Hex string (RRGGBB) for a centroid, for host display.
pub fn centroid_to_hex(centroid: &Centroid) -> String {
    format!(
        "{:02X}{:02X}{:02X}",
        clamp_to_u8(centroid[0]),
        clamp_to_u8(centroid[1]),
        clamp_to_u8(centroid[2])
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn scenario_palette() -> Palette {
        vec![[5.0, 5.0, 5.0, 255.0], [252.5, 252.5, 252.5, 255.0]]
    }

    fn scenario_image() -> DynamicImage {
        let mut img = RgbaImage::new(4, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([10, 10, 10, 255]));
        img.put_pixel(2, 0, Rgba([250, 250, 250, 255]));
        img.put_pixel(3, 0, Rgba([255, 255, 255, 255]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn dark_pixels_map_to_the_dark_centroid() {
        let out = quantize(&scenario_image(), &scenario_palette()).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [5, 5, 5, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [5, 5, 5, 255]);
        // 252.5 rounds to 253 (round half away from zero).
        assert_eq!(out.get_pixel(2, 0).0, [253, 253, 253, 255]);
        assert_eq!(out.get_pixel(3, 0).0, [253, 253, 253, 255]);
    }

    #[test]
    fn output_keeps_original_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(7, 3));
        let out = quantize(&img, &scenario_palette()).unwrap();
        assert_eq!(out.dimensions(), (7, 3));
    }

    #[test]
    fn quantizing_twice_is_idempotent() {
        let once = quantize(&scenario_image(), &scenario_palette()).unwrap();
        let twice = quantize(&DynamicImage::ImageRgba8(once.clone()), &scenario_palette()).unwrap();
        assert_eq!(once.as_raw(), twice.as_raw());
    }

    #[test]
    fn input_image_is_not_mutated() {
        let img = scenario_image();
        let before = img.to_rgba8().as_raw().clone();
        let _ = quantize(&img, &scenario_palette()).unwrap();
        assert_eq!(img.to_rgba8().as_raw(), &before);
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(
            quantize(&scenario_image(), &Vec::new()),
            Err(ReduceError::EmptyPalette)
        ));
    }

    #[test]
    fn non_finite_palette_is_rejected() {
        let palette = vec![[f64::INFINITY, 0.0, 0.0, 255.0]];
        assert!(matches!(
            quantize(&scenario_image(), &palette),
            Err(ReduceError::NonFiniteSample(_))
        ));
    }

    #[test]
    fn out_of_domain_centroids_are_clamped() {
        let palette = vec![[-20.0, 300.0, 128.0, 255.0]];
        let out = quantize(&scenario_image(), &palette).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [0, 255, 128, 255]);
    }

    #[test]
    fn centroid_hex_rounds_and_clamps() {
        assert_eq!(centroid_to_hex(&[5.0, 5.0, 5.0, 255.0]), "050505");
        assert_eq!(centroid_to_hex(&[252.5, 252.5, 252.5, 255.0]), "FDFDFD");
        assert_eq!(centroid_to_hex(&[-1.0, 256.0, 15.5, 0.0]), "00FF10");
    }
}
