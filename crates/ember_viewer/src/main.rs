mod cli;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use ember_core::Scene;
use ember_renderer::{Camera, DispatchMode, RenderSettings, RenderStatus, Renderer};
use log::LevelFilter;

use cli::{Args, SceneChoice};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(LevelFilter::from(args.log_level))
        .parse_default_env()
        .init();

    let scene = match args.scene {
        SceneChoice::Demo => Scene::demo(),
        SceneChoice::Random => scenes::random_scene(args.seed),
    };
    scene.validate().context("scene failed validation")?;

    let settings = RenderSettings {
        accumulate: !args.no_accumulate,
        dispatch: args
            .bucket_size
            .map_or(DispatchMode::Rows, |size| DispatchMode::Buckets { size }),
    };

    let mut camera = Camera::default();
    let mut renderer = Renderer::with_settings(settings);
    camera.resize(args.width, args.height);
    renderer.resize(args.width, args.height);

    log::info!(
        "Rendering {} frames at {}x{} ({:?}, accumulate: {})",
        args.frames,
        args.width,
        args.height,
        renderer.settings().dispatch,
        renderer.settings().accumulate
    );

    let orbit = args.orbit.to_radians();
    let mut total = std::time::Duration::ZERO;

    for _ in 0..args.frames {
        match renderer.render(&scene, &camera)? {
            RenderStatus::Rendered { frame_index } => {
                total += renderer.last_render_time();
                log::info!("Frame {} in {:.3}ms", frame_index, renderer.last_render_time().as_secs_f64() * 1000.0);
            }
            RenderStatus::EmptyViewport => {
                log::warn!("Viewport is empty, nothing to render");
                break;
            }
            RenderStatus::Cancelled => break,
        }

        if camera.rotate(orbit, 0.0) {
            renderer.reset_frame_index();
        }
    }

    log::info!("Rendered in {:?} total", total);

    if renderer.image_data().is_empty() {
        return Ok(());
    }

    save_png(&renderer, &args.output)?;
    log::info!("Saved to {}", args.output);

    Ok(())
}

fn save_png(renderer: &Renderer, path: &str) -> Result<()> {
    // Packed pixels keep R in the low byte, so little-endian memory is RGBA8.
    let bytes: Vec<u8> = if cfg!(target_endian = "little") {
        renderer.image_bytes().to_vec()
    } else {
        renderer.image_data().iter().flat_map(|pixel| pixel.to_le_bytes()).collect()
    };

    let image = image::RgbaImage::from_raw(renderer.width(), renderer.height(), bytes)
        .context("output buffer does not match image dimensions")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path))?;

    Ok(())
}
