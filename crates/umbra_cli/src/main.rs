use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use umbra_core::SceneDescription;
use umbra_renderer::{render, render_parallel, ImageBuffer, PinholeCamera, RenderConfig};

mod cli;
mod demo;

use cli::Args;

/// Read a JSON render configuration.
fn load_config(path: &Path) -> Result<RenderConfig> {
    let json = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing config {}", path.display()))
}

/// Encode the image as an 8-bit PNG.
fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let buffer = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("image buffer does not match its dimensions")?;
    buffer
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting umbra");

    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    let config = args.apply_to(base)?;

    let (description, base_dir) = match &args.scene {
        Some(path) => {
            let description = SceneDescription::load(path)
                .with_context(|| format!("loading scene {}", path.display()))?;
            (description, path.parent())
        }
        None => {
            log::info!("No scene given, using the built-in {} demo", config.algorithm);
            (demo::scene_for(config.algorithm), None)
        }
    };

    if let Some(path) = &args.write_scene {
        fs::write(path, description.to_json()?).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote scene description to {}", path.display());
    }

    let start = Instant::now();
    let built = description.build(base_dir);
    if !built.texture_failures.is_empty() {
        log::warn!("{} texture(s) failed to load", built.texture_failures.len());
    }
    log::info!("Scene setup: {:.2?}", start.elapsed());

    let camera = PinholeCamera::from(&built.camera);

    let image = if args.sequential {
        render(&built.scene, &camera, &config)?
    } else {
        if let Some(threads) = args.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("configuring the worker pool")?;
        }
        render_parallel(&built.scene, &camera, &config)?
    };

    save_png(&image, &args.output)?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
