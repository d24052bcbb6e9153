use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cubeturn::{AppConfig, PuzzleConfig, PuzzleController};

#[derive(Parser)]
#[command(name = "cubeturn", version, about = "Interactive 3x3x3 puzzle with camera-relative turns")]
struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value = "800")]
    height: u32,

    /// Face turn speed in radians per second
    #[arg(long, default_value = "10")]
    turn_speed: f32,

    /// Initial turn angle in degrees (45, 90 or 180)
    #[arg(long, default_value = "90")]
    turn_angle: f32,

    /// Sticker image drawn on every cubie face
    #[arg(long, value_name = "PATH")]
    texture: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let puzzle_config = PuzzleConfig::new()
        .turn_angle(cli.turn_angle)
        .turn_speed(cli.turn_speed);
    puzzle_config.validate()?;

    let mut app_config = AppConfig::new().size(cli.width, cli.height);
    if let Some(path) = cli.texture {
        app_config = app_config.texture(path);
    }

    tracing::info!("cubeturn starting");
    cubeturn::run(app_config, PuzzleController::new(puzzle_config))?;
    Ok(())
}
