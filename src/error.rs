use thiserror::Error;

/// Errors surfaced by the core pipeline. Decoding failures come from the
/// host-supplied bytes; everything else is invalid input to clustering or
/// remapping. Non-convergence is deliberately not represented here — the
/// clusterer returns its best palette and logs a warning instead.
#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    #[error("dataset is empty; nothing to cluster")]
    EmptyDataset,

    #[error("color count must be at least 1, got {0}")]
    InvalidColorCount(usize),

    #[error("palette is empty; nothing to remap against")]
    EmptyPalette,

    #[error("non-finite channel sample encountered in {0}")]
    NonFiniteSample(&'static str),

    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
