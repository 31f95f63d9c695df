mod app;
mod ar;
mod assets;
mod camera;
mod components;
mod config;
mod context;
mod driver;
mod engine;
mod error;
mod events;
mod fsm;
mod geometry;
mod recording;
mod renderer;
mod scene;
mod systems;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use app::DemoApp;
use clap::Parser;
use config::SceneConfig;
use engine::window::GameWindow;
use error::{AppError, GfxError};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rampshot", about = "Ball-on-ramp launch demo")]
struct Args {
    /// Scene config (TOML). Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "rampshot=trace". RUST_LOG wins if set.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Align the scene to the configured marker
    #[arg(long)]
    ar: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "fatal");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = SceneConfig::load(args.config.as_deref())?;
    if args.ar {
        config.ar.enabled = true;
    }

    let sdl = sdl2::init().map_err(GfxError::Sdl)?;
    let window = GameWindow::new(
        &sdl,
        &config.window.title,
        config.window.width,
        config.window.height,
    )?;

    let mut app = DemoApp::new(config, &window)?;
    app.run(&sdl, &window)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_all_flags() {
        let args = Args::try_parse_from([
            "rampshot",
            "--config",
            "scene.toml",
            "--log-level",
            "debug",
            "--ar",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("scene.toml")));
        assert_eq!(args.log_level, "debug");
        assert!(args.ar);
    }

    #[test]
    fn cli_defaults() {
        let args = Args::try_parse_from(["rampshot"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "info");
        assert!(!args.ar);
    }
}
