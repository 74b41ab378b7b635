//! Reduce an image's palette to k representative colors.
//!
//! The pipeline is: decode → extract a (possibly downsampled) dataset →
//! seeded k-means clustering → remap every full-resolution pixel to its
//! nearest palette entry → encode. Clustering is fully deterministic: the
//! same image, color count, and seed always produce the same palette.
//!
//! The crate is consumed two ways, mirrored by the two entry points
//! below: [`reduce_colors`] for a browser host through wasm-bindgen, and
//! [`reduce_colors_bytes`] for native callers (used by `reduce-cli`).
//! Hosts supply encoded image bytes and get back a PNG byte stream plus
//! the palette as hex strings; everything in between works on decoded
//! RGBA rasters via [`extract_dataset`], [`cluster`], and [`quantize`].

use image::ImageFormat;
use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};

pub mod dataset;
pub mod error;
pub mod kmeans;
pub mod nearest;
pub mod quantize;
pub mod rng;

pub use dataset::{extract_dataset, rescale_dimensions};
pub use error::ReduceError;
pub use kmeans::{cluster, cluster_seeded, MAX_ITERATIONS};
pub use nearest::nearest_neighbor;
pub use quantize::{centroid_to_hex, quantize};
pub use rng::SeededRng;

/// Channel count of every pixel and centroid; rasters are handled as
/// RGBA8 throughout.
pub const CHANNELS: usize = 4;

/// One sample position's channel values, promoted to f64 so clustering
/// arithmetic is stable across platforms.
pub type Pixel = [f64; CHANNELS];

/// A cluster mean. Not necessarily equal to any existing pixel.
pub type Centroid = [f64; CHANNELS];

/// Ordered set of k centroids, in assignment order.
pub type Palette = Vec<Centroid>;

/// Flat row-major point set extracted from a raster.
pub type Dataset = Vec<Pixel>;

/// Default dataset pixel budget when the host does not pass one.
pub const DEFAULT_PIXEL_BUDGET: u32 = 50_000;

/// Reduce an encoded image to `color_count` colors.
///
/// `pixel_budget` caps how many pixels feed the clusterer: `None` applies
/// the default of 50 000, `Some(0)` clusters every pixel. The palette is
/// always applied to the image at full resolution.
///
/// Returns `{ image: Uint8Array (PNG bytes), palette: Array<hex string> }`
/// for the JavaScript host.
#[wasm_bindgen]
pub fn reduce_colors(
    input: Vec<u8>,
    color_count: usize,
    pixel_budget: Option<u32>,
) -> Result<Object, JsValue> {
    let img = image::load_from_memory(&input)
        .map_err(|e| JsValue::from_str(&format!("Unable to decode image: {e}")))?;

    let budget = pixel_budget.unwrap_or(DEFAULT_PIXEL_BUDGET);
    let dataset =
        extract_dataset(&img, Some(budget)).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let palette = cluster(&dataset, color_count).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let reduced = quantize(&img, &palette).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut buf = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buf);
        image::DynamicImage::ImageRgba8(reduced)
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| JsValue::from_str(&format!("PNG encode error: {e}")))?;
    }

    let img_js = Uint8Array::from(buf.as_slice());
    let palette_js = Array::new();
    for centroid in &palette {
        palette_js.push(&JsValue::from_str(&centroid_to_hex(centroid)));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("image"), &img_js)?;
    Reflect::set(&result, &JsValue::from_str("palette"), &palette_js)?;

    Ok(result)
}

/// Native twin of [`reduce_colors`]: PNG bytes plus the palette as hex
/// strings.
#[cfg(not(target_arch = "wasm32"))]
pub fn reduce_colors_bytes(
    input: &[u8],
    color_count: usize,
    pixel_budget: Option<u32>,
) -> Result<(Vec<u8>, Vec<String>)> {
    let img = image::load_from_memory(input).context("unable to decode image")?;

    let budget = pixel_budget.unwrap_or(DEFAULT_PIXEL_BUDGET);
    let dataset = extract_dataset(&img, Some(budget)).context("dataset extraction failed")?;
    let palette = cluster(&dataset, color_count).context("clustering failed")?;
    let reduced = quantize(&img, &palette).context("remapping failed")?;

    let mut buf = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buf);
        image::DynamicImage::ImageRgba8(reduced)
            .write_to(&mut cursor, ImageFormat::Png)
            .context("PNG encode failed")?;
    }

    let palette_hex = palette.iter().map(centroid_to_hex).collect();
    Ok((buf, palette_hex))
}
