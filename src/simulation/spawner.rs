//! Time-gated spawning of obstacles, rival cars and pickups
//!
//! Each entity class keeps its own timer with a randomly drawn threshold.
//! When the threshold passes the spawner tries once: it picks a free lane at
//! random or skips the cycle if none is free. Nothing is queued.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::ops::Range;

use super::ai::BehaviorProfile;
use super::config::SimulationConfig;
use super::effects::EffectKind;
use super::entities::{Obstacle, Oscillation, Pickup, PickupKind, RivalCar};
use super::types::{CarKind, ObstacleKind, OBSTACLE_SIZE};

pub const OBSTACLE_INTERVAL: Range<f32> = 3.0..6.0;
pub const RIVAL_INTERVAL: Range<f32> = 4.0..8.0;
pub const COIN_INTERVAL: Range<f32> = 1.0..3.0;
pub const BOOST_INTERVAL: Range<f32> = 10.0..20.0;
pub const SHIELD_INTERVAL: Range<f32> = 15.0..30.0;
pub const MAGNET_INTERVAL: Range<f32> = 12.0..25.0;
pub const SLOW_MO_INTERVAL: Range<f32> = 15.0..30.0;

/// Chance a new obstacle sweeps sideways
pub const MOVING_OBSTACLE_CHANCE: f64 = 0.25;
/// Chance a new rival gets an AI driver
pub const AI_RIVAL_CHANCE: f64 = 0.7;

/// What the spawner asks the world to create
#[derive(Debug, Clone, PartialEq)]
pub enum Spawn {
    Obstacle {
        lane: usize,
        kind: ObstacleKind,
        oscillation: Option<Oscillation>,
    },
    Rival {
        lane: usize,
        kind: CarKind,
        profile: Option<BehaviorProfile>,
    },
    Pickup {
        lane: usize,
        kind: PickupKind,
    },
}

/// Spawn groups sharing a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnClass {
    Obstacle,
    Rival,
    Pickup(PickupKind),
}

#[derive(Debug, Clone)]
struct SpawnTimer {
    class: SpawnClass,
    interval: Range<f32>,
    elapsed: f32,
    threshold: f32,
}

impl SpawnTimer {
    fn new<R: Rng + ?Sized>(class: SpawnClass, interval: Range<f32>, rng: &mut R) -> Self {
        let threshold = rng.random_range(interval.clone());
        Self {
            class,
            interval,
            elapsed: 0.0,
            threshold,
        }
    }

    /// Returns true when the threshold passed; the timer restarts either way
    fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        self.elapsed += dt;
        if self.elapsed < self.threshold {
            return false;
        }
        self.elapsed = 0.0;
        self.threshold = rng.random_range(self.interval.clone());
        true
    }
}

/// Entities currently on the field, as the spawner sees them
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub obstacles: &'a [Obstacle],
    pub rivals: &'a [RivalCar],
    pub pickups: &'a [Pickup],
}

#[derive(Debug, Clone)]
pub struct Spawner {
    timers: Vec<SpawnTimer>,
}

impl Spawner {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let timers = vec![
            SpawnTimer::new(SpawnClass::Obstacle, OBSTACLE_INTERVAL, rng),
            SpawnTimer::new(SpawnClass::Rival, RIVAL_INTERVAL, rng),
            SpawnTimer::new(SpawnClass::Pickup(PickupKind::Coin), COIN_INTERVAL, rng),
            SpawnTimer::new(
                SpawnClass::Pickup(PickupKind::PowerUp(EffectKind::Boost)),
                BOOST_INTERVAL,
                rng,
            ),
            SpawnTimer::new(
                SpawnClass::Pickup(PickupKind::PowerUp(EffectKind::Shield)),
                SHIELD_INTERVAL,
                rng,
            ),
            SpawnTimer::new(
                SpawnClass::Pickup(PickupKind::PowerUp(EffectKind::Magnet)),
                MAGNET_INTERVAL,
                rng,
            ),
            SpawnTimer::new(
                SpawnClass::Pickup(PickupKind::PowerUp(EffectKind::SlowMo)),
                SLOW_MO_INTERVAL,
                rng,
            ),
        ];
        Self { timers }
    }

    /// Advance every timer and return the spawns that found a lane
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        config: &SimulationConfig,
        field: &Field<'_>,
        rng: &mut R,
    ) -> Vec<Spawn> {
        let mut due = Vec::new();
        for timer in &mut self.timers {
            if timer.tick(dt, rng) {
                due.push(timer.class);
            }
        }

        let mut spawns = Vec::new();
        for class in due {
            if at_capacity(class, config, field) {
                continue;
            }
            let lanes = free_lanes(class, config, field);
            let Some(&lane) = lanes.choose(rng) else {
                debug!("No free lane for {:?}, skipping", class);
                continue;
            };
            spawns.push(build_spawn(class, lane, config, rng));
        }
        spawns
    }
}

fn at_capacity(class: SpawnClass, config: &SimulationConfig, field: &Field<'_>) -> bool {
    match class {
        SpawnClass::Obstacle => field.obstacles.len() >= config.max_obstacles,
        SpawnClass::Rival => field.rivals.len() >= config.max_rivals,
        SpawnClass::Pickup(PickupKind::Coin) => {
            field.pickups.iter().filter(|p| p.is_coin()).count() >= config.max_coins
        }
        // One of each power-up at a time
        SpawnClass::Pickup(kind) => field.pickups.iter().any(|p| p.kind == kind),
    }
}

/// Lanes where neither the lane nor its neighbours hold a same-class entity
/// inside the band at the top of the field. Obstacles and rivals count as one
/// hazard class so they never wall off the road together.
pub fn free_lanes(class: SpawnClass, config: &SimulationConfig, field: &Field<'_>) -> Vec<usize> {
    let band = config.spawn_safety_distance;
    let occupied: Vec<usize> = match class {
        SpawnClass::Obstacle | SpawnClass::Rival => field
            .obstacles
            .iter()
            .filter(|o| o.position.y < band)
            .map(|o| o.lane)
            .chain(
                field
                    .rivals
                    .iter()
                    .filter(|r| r.position.y < band)
                    .map(|r| r.lane),
            )
            .collect(),
        SpawnClass::Pickup(_) => field
            .pickups
            .iter()
            .filter(|p| p.position.y < band)
            .map(|p| p.lane)
            .collect(),
    };

    (0..config.lane_count())
        .filter(|&lane| !occupied.iter().any(|&taken| taken.abs_diff(lane) <= 1))
        .collect()
}

fn build_spawn<R: Rng + ?Sized>(
    class: SpawnClass,
    lane: usize,
    config: &SimulationConfig,
    rng: &mut R,
) -> Spawn {
    match class {
        SpawnClass::Obstacle => {
            let kind = ObstacleKind::ALL.choose(rng).copied().unwrap_or(ObstacleKind::Cone);
            let amplitude = ((config.lane_width() - OBSTACLE_SIZE) / 2.0).max(0.0);
            let oscillation = (amplitude > 0.0 && rng.random_bool(MOVING_OBSTACLE_CHANCE)).then(|| {
                Oscillation {
                    phase: rng.random_range(0.0..std::f32::consts::TAU),
                    amplitude,
                    frequency: rng.random_range(1.5..3.0),
                }
            });
            Spawn::Obstacle {
                lane,
                kind,
                oscillation,
            }
        }
        SpawnClass::Rival => {
            let kind = CarKind::ALL.choose(rng).copied().unwrap_or(CarKind::Sedan);
            let profile = if rng.random_bool(AI_RIVAL_CHANCE) {
                BehaviorProfile::ALL.choose(rng).copied()
            } else {
                None
            };
            Spawn::Rival {
                lane,
                kind,
                profile,
            }
        }
        SpawnClass::Pickup(kind) => Spawn::Pickup { lane, kind },
    }
}
