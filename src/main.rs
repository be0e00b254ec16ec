use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use lane_rush::simulation::{
    GameMode, Leaderboard, MissionKind, RaceConfig, SimWorld, SimulationConfig, LOOKAHEAD_DISTANCE,
    MAX_BOOST_ENERGY, METERS_PER_UNIT,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Endless,
    TimeAttack,
    Mission,
    Race,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MissionArg {
    Coins,
    Distance,
    Score,
    Dodge,
}

impl From<MissionArg> for MissionKind {
    fn from(arg: MissionArg) -> Self {
        match arg {
            MissionArg::Coins => MissionKind::CollectCoins,
            MissionArg::Distance => MissionKind::TravelDistance,
            MissionArg::Score => MissionKind::ReachScore,
            MissionArg::Dodge => MissionKind::DodgeObstacles,
        }
    }
}

impl ModeArg {
    fn game_mode(self, mission: MissionArg) -> GameMode {
        match self {
            ModeArg::Endless => GameMode::Endless,
            ModeArg::TimeAttack => GameMode::TimeAttack,
            ModeArg::Mission => GameMode::Mission(mission.into()),
            ModeArg::Race => GameMode::Race,
        }
    }
}

#[derive(Parser)]
#[command(name = "lane_rush")]
#[command(about = "Lane racing simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Game mode
    #[arg(long, value_enum, default_value_t = ModeArg::Endless)]
    mode: ModeArg,

    /// Mission goal when playing a mission
    #[arg(long, value_enum, default_value_t = MissionArg::Coins)]
    mission: MissionArg,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "3600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.0166667")]
    delta: f32,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Number of lanes (6 or 8 are the usual layouts)
    #[arg(long, default_value = "8")]
    lanes: usize,

    /// AI opponents in race mode
    #[arg(long, default_value = "5")]
    opponents: usize,

    /// Race length in meters
    #[arg(long)]
    race_length: Option<f32>,

    /// Print a text map of the field every simulated second
    #[arg(long)]
    map: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode.game_mode(cli.mission);

    let mut config = SimulationConfig::new(800.0, 800.0, cli.lanes);
    config.seed = cli.seed;

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config, mode);
            return Ok(());
        }
        #[cfg(not(feature = "ui"))]
        {
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,lane_rush=info"))
        .init();
    run_headless(&cli, config, mode)
}

/// Run a session in headless mode (no graphics)
fn run_headless(cli: &Cli, config: SimulationConfig, mode: GameMode) -> Result<()> {
    info!("Running lane simulation in headless mode...");
    info!("Mode: {}, Ticks: {}, Delta: {}s", mode.name(), cli.ticks, cli.delta);

    let base_speed = config.base_speed;
    let mut world = SimWorld::with_config(config, mode).context("Failed to create world")?;
    if mode == GameMode::Race {
        let race_config = RaceConfig {
            length: cli.race_length.unwrap_or(RaceConfig::default().length),
            base_speed: base_speed * METERS_PER_UNIT,
            ..RaceConfig::default()
        };
        world.configure_race(race_config, cli.opponents)?;
    }

    // Calculate how many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / cli.delta).ceil().max(1.0) as u32;

    let mut tick = 0;
    while tick < cli.ticks && !world.is_session_over() {
        let ticks_to_run = ticks_per_second.min(cli.ticks - tick);
        for _ in 0..ticks_to_run {
            tick += 1;
            autopilot(&mut world);
            world.update(cli.delta);
            for event in world.drain_events() {
                log::debug!("Event: {:?}", event);
            }
            if world.is_session_over() {
                break;
            }
        }

        info!("--- After tick {} ({:.1}s simulated time) ---", tick, world.time);
        info!("{}", world.status_line());
        if cli.map {
            println!("{}", world.draw_map());
        }
    }

    let summary = world.summary();
    info!("=== SESSION COMPLETE ===");
    info!("Score: {}", summary.score);
    info!("Distance: {:.0}m", summary.distance);
    info!("Coins: {}", summary.coins);
    match summary.end_reason {
        Some(reason) => info!("End reason: {:?}", reason),
        None => info!("End reason: tick limit"),
    }

    let recorded_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut leaderboard = Leaderboard::new();
    if let Some(rank) = leaderboard.record_session("autopilot", &summary, recorded_at) {
        info!("Leaderboard rank: {}", rank);
    }
    Ok(())
}

/// Steer out of lanes with a hazard close ahead and burn full energy on boosts
fn autopilot(world: &mut SimWorld) {
    let player_y = world.player.position.y;
    let reach = player_y - LOOKAHEAD_DISTANCE;
    let danger = |lane: usize| {
        let ahead = |y: f32| y > reach && y < player_y + world.player.height;
        world.obstacles.iter().any(|o| o.lane == lane && ahead(o.position.y))
            || world.rivals.iter().any(|r| r.lane == lane && ahead(r.position.y))
    };

    let lane = world.player.lane;
    if danger(lane) {
        let left = lane.checked_sub(1).filter(|&l| !danger(l));
        let right = Some(lane + 1).filter(|&l| l < world.config.lane_count() && !danger(l));
        match (left, right) {
            (Some(_), _) => {
                world.move_left();
            }
            (None, Some(_)) => {
                world.move_right();
            }
            (None, None) => {}
        }
    }

    if world.player.boost_energy.value() >= MAX_BOOST_ENERGY {
        world.use_boost_energy();
    }
}

#[cfg(feature = "ui")]
fn run_with_ui(config: SimulationConfig, mode: GameMode) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Lane Rush UI...");
    println!();
    println!("Controls:");
    println!("  Left/Right  - Change lane");
    println!("  Space       - Spend boost energy");
    println!("  R           - Restart after the session ends");
    println!("  ESC         - Exit");
    println!();

    let (width, height) = (config.screen_width() as u32, config.screen_height() as u32);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,lane_rush=info".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Lane Rush".into(),
                        resolution: (width, height).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(lane_rush::ui::LaneRushUIPlugin { config, mode })
        .run();
}
