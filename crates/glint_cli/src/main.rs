mod cli;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{load_scene, SceneDescription};
use glint_renderer::{render, render_parallel, ImageBuffer, Scene};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Glint");

    let mut description = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, rendering the showcase scene");
            SceneDescription::showcase()
        }
    };
    args.apply_overrides(&mut description.settings);

    let scene = Scene::from_description(&description).context("Invalid scene")?;

    let start = Instant::now();
    let image = if args.single_threaded {
        render(&scene)
    } else {
        render_parallel(&scene)
    };
    log::info!("Frame finished in {:?}", start.elapsed());

    save_png(&image, &args.output)?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}

/// Encode the rendered frame as an 8-bit RGB PNG.
fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("Image buffer size does not match its dimensions")?;
    rgb.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
