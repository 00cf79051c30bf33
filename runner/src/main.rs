mod autopilot;
mod broadcaster;
mod config;

use std::time::Duration;

use clap::Parser;
use snake_duel_engine::games::SessionRng;
use snake_duel_engine::games::snake::{
    DriverSettings, MonotonicTime, SessionCommand, SessionDriver, SnakeSession,
};
use snake_duel_engine::{LogLevel, log, logger};
use tokio::sync::mpsc;

use autopilot::Autopilot;
use broadcaster::ChannelBroadcaster;
use config::{CONFIG_FILE, get_config_manager};

#[derive(Parser)]
#[command(name = "snake_duel")]
struct Args {
    /// YAML config file; defaults are used when it does not exist.
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    /// Seed for food placement and NPC recovery.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    max_ticks: Option<u64>,

    /// Tick interval override in milliseconds.
    #[arg(long)]
    speed: Option<u64>,

    #[arg(long)]
    infinite: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("SnakeDuel".to_string())
    } else {
        None
    };
    let level = if args.verbose { LogLevel::Debug } else { LogLevel::Info };
    logger::init_logger(prefix, level);

    let file_config = get_config_manager(&args.config).get_config()?;
    let mut game_config = file_config.game.clone();
    if args.infinite {
        game_config.infinite_mode = true;
    }
    let runner_config = file_config.runner.clone();
    let max_ticks = args.max_ticks.or(runner_config.max_ticks);

    let rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    log!("Starting session with seed {}", rng.seed());
    let mut session = SnakeSession::new(game_config.clone(), Box::new(rng))?;
    if let Some(speed_ms) = args.speed {
        session.set_speed(speed_ms)?;
    }

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let autopilot = Autopilot::new(game_config, &runner_config);
    let autopilot_handle = tokio::spawn(autopilot.run(event_rx, command_tx.clone()));

    command_tx.send(SessionCommand::Start)?;

    let settings = DriverSettings {
        frame_interval: Duration::from_millis(runner_config.frame_interval_ms),
        max_ticks,
    };
    let summary = SessionDriver::run(
        session,
        command_rx,
        ChannelBroadcaster::new(event_tx),
        MonotonicTime::new(),
        settings,
    )
    .await;

    autopilot_handle.await?;

    println!(
        "[{}] ticks={} score={} health={} phase={:?} player_len={} npc_len={}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        summary.ticks,
        summary.score,
        summary.health,
        summary.phase,
        summary.player_len,
        summary.npc_len,
    );

    Ok(())
}
