use anyhow::{Context, Result};
use clap::Parser;
use image_color_reducer_wasm::reduce_colors_bytes;
use std::fs;
use std::path::PathBuf;

/// Reduce images to a fixed number of colors (native wrapper around the
/// WASM library).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of palette colors produced by k-means
    #[arg(short = 'k', long, default_value_t = 8)]
    color_count: usize,

    /// Maximum number of pixels fed to clustering; larger images are
    /// downsampled first. 0 clusters every pixel.
    #[arg(short = 'b', long, default_value_t = 50_000)]
    pixel_budget: u32,

    /// Output directory
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Output filename prefix (ignored when --out-dir supplied)
    #[arg(short = 'p', long, default_value = "reduced_")]
    prefix: String,

    /// Print each image's palette as a JSON array of hex strings
    #[arg(long)]
    print_palette: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    for input in &args.inputs {
        let bytes =
            fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let (png, palette) =
            reduce_colors_bytes(&bytes, args.color_count, Some(args.pixel_budget))
                .with_context(|| format!("reducing {}", input.display()))?;

        let out_path = if let Some(dir) = &args.out_dir {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            dir.join(format!("{stem}.png"))
        } else {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            PathBuf::from(format!("{}{}", args.prefix, name))
        };

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, png)?;
        println!("Saved → {}", out_path.display());

        if args.print_palette {
            println!("{}", serde_json::to_string(&palette)?);
        }
    }

    Ok(())
}
