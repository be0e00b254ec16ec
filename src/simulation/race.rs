//! Race mode: the player against AI opponents over a fixed distance
//!
//! Opponents live on a 1-D track measured in meters, in the same units as the
//! player's distance travelled. They are projected into screen space only to
//! share the lane-change AI with endless-mode rivals.

use anyhow::{bail, Result};
use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::Rng;

use super::ai::{AiDriver, BehaviorProfile, DriverView, Hazard, HazardKind, CRUISE_SPEED_MULTIPLIER};
use super::events::GameEvent;
use super::types::METERS_PER_UNIT;

/// Default race length in meters
pub const RACE_LENGTH: f32 = 5000.0;
/// Seconds of countdown before the start
pub const RACE_COUNTDOWN: f32 = 3.0;
/// Rank-based score for ranks 1 to 6; anything lower gets the last tier
pub const RANK_SCORES: [u32; 6] = [1000, 750, 500, 300, 200, 100];
/// Time bonus starts here and loses one point per tenth of a second
pub const TIME_BONUS_BASE: u32 = 500;
/// Relative random speed spread applied to opponents
pub const SPEED_JITTER: f32 = 0.03;

/// Score for finishing at `rank` (1-based) after `finish_seconds`
pub fn race_score(rank: usize, finish_seconds: f32) -> u32 {
    let tier = RANK_SCORES
        .get(rank.saturating_sub(1))
        .copied()
        .unwrap_or(RANK_SCORES[RANK_SCORES.len() - 1]);
    let penalty = (finish_seconds.max(0.0) * 10.0).floor() as u32;
    tier + TIME_BONUS_BASE.saturating_sub(penalty)
}

/// Interpolated time at which a racer moving from `previous` to `current`
/// during a frame starting at `start` crossed `length`
fn crossing_time(length: f32, previous: f32, current: f32, start: f32, dt: f32) -> Option<f32> {
    if current < length {
        return None;
    }
    let travelled = current - previous;
    let fraction = if travelled > 0.0 {
        ((length - previous) / travelled).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Some(start + fraction * dt)
}

#[derive(Debug, Clone)]
pub struct RaceConfig {
    /// Race length in meters
    pub length: f32,
    pub countdown: f32,
    /// Opponent speed at difficulty 0, meters per second
    pub base_speed: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            length: RACE_LENGTH,
            countdown: RACE_COUNTDOWN,
            base_speed: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    Countdown,
    Racing,
    Finished,
}

/// A participant in the race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Racer {
    Player,
    Opponent(usize),
}

#[derive(Debug, Clone)]
pub struct RaceOpponent {
    pub id: usize,
    pub name: String,
    pub lane: usize,
    /// Meters from the start line
    pub position: f32,
    /// Cruising speed in meters per second
    pub speed: f32,
    pub difficulty: u8,
    pub driver: AiDriver,
    pub finished: bool,
    pub finish_time: Option<f32>,
}

impl RaceOpponent {
    fn effective_speed(&self) -> f32 {
        self.speed * self.driver.speed_multiplier() / CRUISE_SPEED_MULTIPLIER
    }
}

/// Final result for the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceResult {
    pub rank: usize,
    pub finish_time: f32,
    pub score: u32,
}

/// One line of the live leaderboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standing {
    pub racer: Racer,
    pub position: f32,
    pub finish_time: Option<f32>,
}

/// What the opponents need to know about the player each frame
#[derive(Debug, Clone, Copy)]
pub struct PlayerProgress {
    /// Meters travelled
    pub position: f32,
    pub lane: usize,
    /// Player's vertical screen position
    pub screen_y: f32,
}

#[derive(Debug, Clone)]
pub struct RaceManager {
    pub config: RaceConfig,
    pub status: RaceStatus,
    pub countdown_remaining: f32,
    /// Seconds since the start signal
    pub elapsed: f32,
    pub opponents: Vec<RaceOpponent>,
    pub player_position: f32,
    pub player_finish_time: Option<f32>,
    pub player_result: Option<RaceResult>,
    /// Racers in the order they crossed the line
    pub finish_order: Vec<Racer>,
}

impl RaceManager {
    pub fn new(config: RaceConfig) -> Result<Self> {
        if config.length <= 0.0 {
            bail!("race length must be positive, got {}", config.length);
        }
        if config.base_speed <= 0.0 {
            bail!("opponent base speed must be positive");
        }
        Ok(Self {
            countdown_remaining: config.countdown.max(0.0),
            config,
            status: RaceStatus::Countdown,
            elapsed: 0.0,
            opponents: Vec::new(),
            player_position: 0.0,
            player_finish_time: None,
            player_result: None,
            finish_order: Vec::new(),
        })
    }

    /// Add an opponent whose speed derives from a 1-5 difficulty rating
    pub fn add_opponent<R: Rng + ?Sized>(
        &mut self,
        name: impl Into<String>,
        difficulty: u8,
        lane: usize,
        rng: &mut R,
    ) -> Result<usize> {
        if !(1..=5).contains(&difficulty) {
            bail!("difficulty must be between 1 and 5, got {}", difficulty);
        }
        let jitter = 1.0 + rng.random_range(-SPEED_JITTER..=SPEED_JITTER);
        let speed = self.config.base_speed * (0.84 + 0.04 * difficulty as f32) * jitter;
        let profile = match difficulty {
            1 | 2 => BehaviorProfile::Cautious,
            3 => BehaviorProfile::Normal,
            _ => BehaviorProfile::Aggressive,
        };
        Ok(self.push_opponent(name.into(), difficulty, lane, speed, profile))
    }

    /// Add an opponent with an explicit speed in meters per second
    pub fn add_opponent_with_speed(
        &mut self,
        name: impl Into<String>,
        lane: usize,
        speed: f32,
        profile: BehaviorProfile,
    ) -> usize {
        self.push_opponent(name.into(), 3, lane, speed, profile)
    }

    fn push_opponent(
        &mut self,
        name: String,
        difficulty: u8,
        lane: usize,
        speed: f32,
        profile: BehaviorProfile,
    ) -> usize {
        let id = self.opponents.len();
        self.opponents.push(RaceOpponent {
            id,
            name,
            lane,
            position: 0.0,
            speed,
            difficulty,
            driver: AiDriver::new(profile, lane),
            finished: false,
            finish_time: None,
        });
        id
    }

    pub fn is_racing(&self) -> bool {
        self.status == RaceStatus::Racing
    }

    pub fn is_finished(&self) -> bool {
        self.status == RaceStatus::Finished
    }

    pub fn player_finished(&self) -> bool {
        self.player_finish_time.is_some()
    }

    /// Advance the race. `obstacles` are hazards in screen space around the
    /// player; opponents are projected into the same space.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        player: PlayerProgress,
        obstacles: &[Hazard],
        lane_count: usize,
        rng: &mut R,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.status {
            RaceStatus::Finished => return events,
            RaceStatus::Countdown => {
                self.countdown_remaining -= dt;
                if self.countdown_remaining <= 0.0 {
                    self.countdown_remaining = 0.0;
                    self.status = RaceStatus::Racing;
                    info!("Race started: {:.0}m, {} opponents", self.config.length, self.opponents.len());
                    events.push(GameEvent::RaceStarted);
                }
                return events;
            }
            RaceStatus::Racing => {}
        }

        let start_elapsed = self.elapsed;
        self.elapsed += dt;

        // (racer, exact crossing time) for everyone crossing this frame
        let mut crossings: Vec<(Racer, f32)> = Vec::new();

        if !self.player_finished() {
            let previous = self.player_position;
            self.player_position = player.position;
            if let Some(t) = crossing_time(self.config.length, previous, player.position, start_elapsed, dt) {
                crossings.push((Racer::Player, t));
            }
        }

        self.drive_opponents(dt, player, obstacles, lane_count, rng);

        let length = self.config.length;
        for opponent in &mut self.opponents {
            if opponent.finished {
                continue;
            }
            let previous = opponent.position;
            opponent.position += opponent.effective_speed() * dt;
            if let Some(t) = crossing_time(length, previous, opponent.position, start_elapsed, dt) {
                crossings.push((Racer::Opponent(opponent.id), t));
            }
        }

        crossings.sort_by_key(|(_, t)| OrderedFloat(*t));
        for (racer, time) in crossings {
            self.finish_order.push(racer);
            let rank = self.finish_order.len();
            match racer {
                Racer::Player => {
                    self.player_finish_time = Some(time);
                    let result = RaceResult {
                        rank,
                        finish_time: time,
                        score: race_score(rank, time),
                    };
                    info!(
                        "Player finished P{} in {:.2}s (+{} points)",
                        rank, time, result.score
                    );
                    self.player_result = Some(result);
                    events.push(GameEvent::PlayerFinishedRace { rank });
                }
                Racer::Opponent(id) => {
                    if let Some(opponent) = self.opponents.get_mut(id) {
                        opponent.finished = true;
                        opponent.finish_time = Some(time);
                        debug!("{} finished P{} in {:.2}s", opponent.name, rank, time);
                    }
                }
            }
        }

        if self.player_finished() && self.opponents.iter().all(|o| o.finished) {
            self.status = RaceStatus::Finished;
            info!("Race finished after {:.2}s", self.elapsed);
            events.push(GameEvent::RaceFinished);
        }

        events
    }

    /// Screen `y` of a racer `position` meters down the track
    fn project(&self, position: f32, player: &PlayerProgress) -> f32 {
        player.screen_y - (position - player.position) / METERS_PER_UNIT
    }

    fn drive_opponents<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        player: PlayerProgress,
        obstacles: &[Hazard],
        lane_count: usize,
        rng: &mut R,
    ) {
        let projected: Vec<(usize, f32)> = self
            .opponents
            .iter()
            .map(|o| (o.lane, self.project(o.position, &player)))
            .collect();

        for index in 0..self.opponents.len() {
            if self.opponents[index].finished {
                continue;
            }
            let (lane, y) = projected[index];

            let mut hazards: Vec<Hazard> = obstacles.to_vec();
            hazards.extend(
                projected
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, &(lane, y))| Hazard {
                        lane,
                        y,
                        kind: HazardKind::Car,
                    }),
            );
            if !self.player_finished() {
                hazards.push(Hazard {
                    lane: player.lane,
                    y: player.screen_y,
                    kind: HazardKind::Car,
                });
            }

            let view = DriverView {
                lane,
                y,
                lane_count,
                player_lane: player.lane,
                hazards: &hazards,
            };
            let opponent = &mut self.opponents[index];
            opponent.driver.decide(&view, dt, rng);
            opponent.driver.converge(&mut opponent.lane);
        }
    }

    /// Every racer ordered by finish time, then by distance covered
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .opponents
            .iter()
            .map(|o| Standing {
                racer: Racer::Opponent(o.id),
                position: o.position.min(self.config.length),
                finish_time: o.finish_time,
            })
            .collect();
        standings.push(Standing {
            racer: Racer::Player,
            position: self.player_position.min(self.config.length),
            finish_time: self.player_finish_time,
        });
        standings.sort_by_key(|s| match s.finish_time {
            Some(t) => (0, OrderedFloat(t)),
            None => (1, OrderedFloat(-s.position)),
        });
        standings
    }

    /// Player's current place, 1-based
    pub fn player_rank(&self) -> usize {
        self.standings()
            .iter()
            .position(|s| s.racer == Racer::Player)
            .map(|i| i + 1)
            .unwrap_or(self.opponents.len() + 1)
    }

    pub fn summary(&self) -> String {
        format!(
            "Race: {:?} | {:.0}/{:.0}m | P{}/{} | {:.1}s",
            self.status,
            self.player_position.min(self.config.length),
            self.config.length,
            self.player_rank(),
            self.opponents.len() + 1,
            self.elapsed
        )
    }
}
