//! Overgrown Dusk runner
//!
//! Runs the platformer's frame loop without a window:
//! - Scripted key timelines stand in for the keyboard
//! - A fixed-rate synthetic clock drives every frame
//! - Status lines, events and snapshots go to the log

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use overgrown_dusk::config::{Config, LogFormat};
use overgrown_dusk::game::{GameSession, Level};
use overgrown_dusk::input::InputScript;
use overgrown_dusk::util::time::Timer;

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level, config.log_format);

    let tuning = config.load_tuning()?;
    let script = match &config.input_script {
        Some(path) => {
            info!(path = %path.display(), "Loading input script");
            InputScript::from_file(path)?
        }
        None => {
            warn!("INPUT_SCRIPT not set, running the built-in demo timeline");
            InputScript::demo()
        }
    };

    info!(
        frame_rate = config.frame_rate,
        max_frames = config.max_frames,
        script_end_ms = script.end_ms(),
        "Starting Overgrown Dusk simulation"
    );

    let timer = Timer::new();
    let mut session = GameSession::new(
        Level::dusk(),
        tuning,
        script,
        config.frame_rate,
        config.snapshot_every,
    );
    let summary = session.run(config.max_frames);

    info!(
        elapsed_ms = timer.elapsed_ms(),
        summary = %serde_json::to_string(&summary)?,
        "Simulation complete"
    );
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str, format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
    }
}
