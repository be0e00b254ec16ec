//! Standalone lane racing simulation
//!
//! This module contains all the gameplay logic and can run independently of
//! the Bevy game engine. It can be driven from the console or from tests
//! without booting up the full game.

mod ai;
mod collision;
mod config;
mod effects;
mod entities;
mod events;
mod game_state;
mod leaderboard;
mod player;
mod race;
mod scoring;
mod spawner;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use ai::{
    safe_lanes, AiDriver, BehaviorProfile, DriverView, Hazard, HazardKind, BRAKE_SPEED_MULTIPLIER,
    CRUISE_SPEED_MULTIPLIER, LANE_SAFETY_WINDOW, LOOKAHEAD_DISTANCE,
};
#[allow(unused_imports)]
pub use collision::{collides, magnet_pull, MAGNET_RADIUS};
#[allow(unused_imports)]
pub use config::{SimulationConfig, DEFAULT_LANE_COUNT, MAX_FRAME_DT, MAX_TIMER_DT};
#[allow(unused_imports)]
pub use effects::{
    BoostEnergy, BoostRamp, EffectKind, EffectState, EffectTimers, BOOST_DURATION,
    BOOST_ENERGY_COST, BOOST_ENERGY_PER_COIN, BOOST_FACTOR, BOOST_RAMP_RATE, MAGNET_DURATION,
    MAX_BOOST_ENERGY, SHIELD_DURATION, SLOW_MO_DURATION, SLOW_MO_FACTOR,
};
#[allow(unused_imports)]
pub use entities::{Obstacle, Oscillation, Pickup, PickupKind, RivalCar};
#[allow(unused_imports)]
pub use events::{EventQueue, GameEvent};
#[allow(unused_imports)]
pub use game_state::{
    EndReason, GameMode, GameState, Mission, MissionKind, TIME_ATTACK_COIN_BONUS,
    TIME_ATTACK_DURATION,
};
#[allow(unused_imports)]
pub use leaderboard::{Leaderboard, LeaderboardEntry, LEADERBOARD_SIZE};
#[allow(unused_imports)]
pub use player::PlayerCar;
#[allow(unused_imports)]
pub use race::{
    race_score, PlayerProgress, RaceConfig, RaceManager, RaceOpponent, RaceResult, RaceStatus,
    Racer, Standing, RACE_COUNTDOWN, RACE_LENGTH,
};
#[allow(unused_imports)]
pub use scoring::{
    multiplier_for, pickup_score, ScoreState, COMBO_WINDOW, OBSTACLE_PASS_SCORE,
    RIVAL_PASS_SCORE, SHIELD_OBSTACLE_BONUS, SHIELD_RIVAL_BONUS,
};
#[allow(unused_imports)]
pub use spawner::{free_lanes, Field, Spawn, SpawnClass, Spawner};
#[allow(unused_imports)]
pub use types::{
    Bounds, CarBody, CarKind, ObstacleId, ObstacleKind, PickupId, Position, RivalId, SimId,
    CAR_HEIGHT, CAR_WIDTH, METERS_PER_UNIT, OBSTACLE_SIZE, PICKUP_SIZE,
};
pub use world::{SessionSummary, SimWorld, DEFAULT_RACE_OPPONENTS};
