//! Dataset extraction: decode a raster (optionally downsampled to a pixel
//! budget) into the flat point set consumed by clustering.
//!
//! Row-major order is a hard requirement, not a convenience: the
//! clusterer draws dataset indices from the seeded generator, so two
//! datasets built from the same image and budget must be identical in
//! ordering for results to reproduce.

use image::{imageops::FilterType, DynamicImage, GenericImageView};

use crate::error::ReduceError;
use crate::{Dataset, CHANNELS};

/// Dimensions after fitting `width x height` under `budget` pixels while
/// keeping the aspect ratio: `scale = sqrt(budget / aspect)`, then floor
/// both axes. The floored product never exceeds the budget. Degenerate
/// aspect ratios can floor an axis to zero, so each axis is clamped to 1.
pub fn rescale_dimensions(width: u32, height: u32, budget: u32) -> (u32, u32) {
    let aspect = width as f64 / height as f64;
    let scale = (budget as f64 / aspect).sqrt();
    let new_width = (aspect * scale).floor() as u32;
    let new_height = scale.floor() as u32;
    (new_width.max(1), new_height.max(1))
}

/// Decode `image` into a row-major dataset of RGBA points.
///
/// When `pixel_budget` is `Some(p)` with `p > 0` and the image holds more
/// than `p` pixels, the image is first resampled down to fit the budget
/// (bilinear filter). `None` or `Some(0)` disables downsampling.
pub fn extract_dataset(
    image: &DynamicImage,
    pixel_budget: Option<u32>,
) -> Result<Dataset, ReduceError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ReduceError::ZeroDimension);
    }

    let rgba = match pixel_budget {
        Some(budget) if budget > 0 && (width as u64) * (height as u64) > budget as u64 => {
            let (new_width, new_height) = rescale_dimensions(width, height, budget);
            log::info!(
                "downsampling {width}x{height} to {new_width}x{new_height} \
                 for a budget of {budget} pixels"
            );
            image::imageops::resize(image, new_width, new_height, FilterType::Triangle)
        }
        _ => image.to_rgba8(),
    };

    let mut dataset = Dataset::with_capacity(rgba.as_raw().len() / CHANNELS);
    for chunk in rgba.as_raw().chunks_exact(CHANNELS) {
        dataset.push([
            chunk[0] as f64,
            chunk[1] as f64,
            chunk[2] as f64,
            chunk[3] as f64,
        ]);
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn rescale_keeps_dimensions_that_already_fit() {
        assert_eq!(rescale_dimensions(100, 100, 10_000), (100, 100));
    }

    #[test]
    fn rescale_respects_the_budget_and_aspect_ratio() {
        let cases = [
            (1920u32, 1080u32, 50_000u32),
            (4000, 3000, 50_000),
            (333, 777, 10_000),
            (5000, 100, 1_000),
        ];
        for (w, h, budget) in cases {
            let (nw, nh) = rescale_dimensions(w, h, budget);
            assert!(nw as u64 * nh as u64 <= budget as u64, "{w}x{h}@{budget}");
            let aspect = w as f64 / h as f64;
            let new_aspect = nw as f64 / nh as f64;
            // Up to floor rounding on both axes.
            assert!((aspect - new_aspect).abs() / aspect < 0.05, "{w}x{h}@{budget}");
        }
    }

    #[test]
    fn rescale_never_returns_a_zero_axis() {
        let (nw, nh) = rescale_dimensions(1, 10_000, 10);
        assert!(nw >= 1 && nh >= 1);
    }

    #[test]
    fn extraction_preserves_row_major_order() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([1, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([2, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([3, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([4, 0, 0, 255]));

        let dataset = extract_dataset(&DynamicImage::ImageRgba8(img), None).unwrap();
        let reds: Vec<f64> = dataset.iter().map(|p| p[0]).collect();
        assert_eq!(reds, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn budget_larger_than_image_is_a_no_op() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(10, 10));
        let dataset = extract_dataset(&img, Some(50_000)).unwrap();
        assert_eq!(dataset.len(), 100);
    }

    #[test]
    fn zero_budget_disables_downsampling() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(40, 40));
        let dataset = extract_dataset(&img, Some(0)).unwrap();
        assert_eq!(dataset.len(), 1600);
    }

    #[test]
    fn oversized_image_is_downsampled_under_the_budget() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(100, 100));
        let dataset = extract_dataset(&img, Some(400)).unwrap();
        assert!(dataset.len() <= 400);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(0, 5));
        assert!(matches!(
            extract_dataset(&img, None),
            Err(ReduceError::ZeroDimension)
        ));
    }
}
