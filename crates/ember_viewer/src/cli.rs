use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Which scene to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Pink sphere, orange light sphere, blue ground
    Demo,
    /// A field of small random spheres on the demo ground
    Random,
}

/// Headless driver for the progressive renderer.
#[derive(Parser, Debug)]
#[command(name = "ember_viewer")]
#[command(about = "Render frames with the Ember progressive path tracer and save the result")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 450)]
    pub height: u32,

    /// Number of frames to render
    #[arg(short, long, default_value_t = 16)]
    pub frames: u32,

    /// Render every frame from scratch instead of accumulating
    #[arg(long)]
    pub no_accumulate: bool,

    /// Trace square tiles of this size instead of whole rows
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneChoice::Demo)]
    pub scene: SceneChoice,

    /// Seed for the random scene
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Yaw the camera by this many degrees after each frame (restarts accumulation)
    #[arg(long, default_value_t = 0.0)]
    pub orbit: f32,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: String,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}
