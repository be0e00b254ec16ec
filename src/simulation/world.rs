//! Main simulation world that ties everything together
//!
//! This is the entry point for running a session without any Bevy
//! dependencies. One call to [`SimWorld::update`] advances every phase in a
//! fixed order: spawner, AI, movement, collisions and scoring, timers, race.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ai::{AiDriver, BehaviorProfile, DriverView, Hazard, HazardKind};
use super::collision::{collides, magnet_pull};
use super::config::{SimulationConfig, MAX_TIMER_DT};
use super::effects::{EffectKind, BOOST_ENERGY_PER_COIN};
use super::entities::{Obstacle, Oscillation, Pickup, PickupKind, RivalCar};
use super::events::{EventQueue, GameEvent};
use super::game_state::{EndReason, GameMode, GameState};
use super::player::PlayerCar;
use super::race::{PlayerProgress, RaceConfig, RaceManager};
use super::scoring::ScoreState;
use super::spawner::{Field, Spawn, Spawner};
use super::types::{
    CarKind, ObstacleId, ObstacleKind, PickupId, Position, RivalId, SimId, CAR_HEIGHT,
    METERS_PER_UNIT, OBSTACLE_SIZE, PICKUP_SIZE,
};

/// Opponents in a default race
pub const DEFAULT_RACE_OPPONENTS: usize = 5;
/// Scroll speed never ramps beyond this multiple of the base speed
pub const MAX_SPEED_RAMP: f32 = 2.0;

/// Final numbers handed to the persistence layer
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub mode: GameMode,
    pub score: u32,
    pub distance: f32,
    pub coins: u32,
    pub end_reason: Option<EndReason>,
}

/// The main simulation world
pub struct SimWorld {
    pub config: SimulationConfig,
    pub player: PlayerCar,
    pub rivals: Vec<RivalCar>,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub score: ScoreState,
    pub game_state: GameState,
    /// Present only in race mode
    pub race: Option<RaceManager>,
    /// Simulation time
    pub time: f32,
    spawner: Spawner,
    events: EventQueue,
    next_id: usize,
    rng: StdRng,
}

impl SimWorld {
    /// Create a world with the default configuration
    pub fn new(mode: GameMode) -> Self {
        Self::build(SimulationConfig::default(), mode)
    }

    /// Create a world with a seeded RNG for reproducible sessions
    pub fn new_with_seed(mode: GameMode, seed: u64) -> Self {
        Self::build(SimulationConfig::default().with_seed(seed), mode)
    }

    /// Create a world from an explicit configuration
    pub fn with_config(config: SimulationConfig, mode: GameMode) -> Result<Self> {
        config.validate().context("Invalid simulation configuration")?;
        Ok(Self::build(config, mode))
    }

    fn build(config: SimulationConfig, mode: GameMode) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let spawner = Spawner::new(&mut rng);
        let start_lane = (config.lane_count() / 2).saturating_sub(1);
        let player = PlayerCar::new(&config, start_lane);

        let mut world = Self {
            config,
            player,
            rivals: Vec::new(),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            score: ScoreState::new(),
            game_state: GameState::new(mode),
            race: None,
            time: 0.0,
            spawner,
            events: EventQueue::default(),
            next_id: 0,
            rng,
        };

        if mode == GameMode::Race {
            let race_config = RaceConfig {
                base_speed: world.config.base_speed * METERS_PER_UNIT,
                ..RaceConfig::default()
            };
            if let Err(err) = world.configure_race(race_config, DEFAULT_RACE_OPPONENTS) {
                warn!("Could not set up race: {:#}", err);
            }
        }
        world
    }

    /// Replace the race with a fresh one of `opponents` random-difficulty AI cars
    pub fn configure_race(&mut self, race_config: RaceConfig, opponents: usize) -> Result<()> {
        let mut race = RaceManager::new(race_config).context("Failed to create race")?;
        for i in 0..opponents {
            let difficulty = self.random_range(1..6) as u8;
            let lane = i % self.config.lane_count().max(1);
            race.add_opponent(format!("Rival {}", i + 1), difficulty, lane, &mut self.rng)?;
        }
        self.race = Some(race);
        Ok(())
    }

    fn random_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.rng.random_range(range)
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn mode(&self) -> GameMode {
        self.game_state.mode
    }

    // ----- input -----

    pub fn move_left(&mut self) -> bool {
        !self.is_session_over() && self.player.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        !self.is_session_over() && self.player.move_right()
    }

    /// Spend 30 energy on a boost. False if the energy is short or the session ended.
    pub fn use_boost_energy(&mut self) -> bool {
        if self.is_session_over() {
            return false;
        }
        let was_active = self.player.effects.is_active(EffectKind::Boost);
        if !self.player.use_boost_energy() {
            return false;
        }
        self.events.push(GameEvent::BoostEnergyUsed);
        if !was_active {
            self.events.push(GameEvent::PowerUpActivated(EffectKind::Boost));
        }
        true
    }

    /// Apply a new screen size and rebuild lane positions for everything on the field
    pub fn on_resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.config
            .resize(width, height)
            .with_context(|| format!("Failed to resize to {}x{}", width, height))?;
        self.player.apply_config(&self.config);
        for rival in &mut self.rivals {
            rival.lane = rival.lane.min(self.config.lane_count() - 1);
            rival.position.x = self.config.lane_position(rival.lane);
        }
        for obstacle in &mut self.obstacles {
            obstacle.lane = obstacle.lane.min(self.config.lane_count() - 1);
            obstacle.sweep(self.config.lane_position(obstacle.lane), 0.0);
        }
        for pickup in &mut self.pickups {
            pickup.lane = pickup.lane.min(self.config.lane_count() - 1);
            pickup.position.x = self.config.lane_position(pickup.lane);
        }
        Ok(())
    }

    // ----- manual placement -----

    /// Place an obstacle at the centre of `lane`
    pub fn spawn_obstacle(&mut self, lane: usize, y: f32, kind: ObstacleKind) -> ObstacleId {
        self.insert_obstacle(lane, y, kind, None)
    }

    /// Place an obstacle that sweeps sideways inside `lane`
    pub fn spawn_moving_obstacle(
        &mut self,
        lane: usize,
        y: f32,
        kind: ObstacleKind,
        oscillation: Oscillation,
    ) -> ObstacleId {
        self.insert_obstacle(lane, y, kind, Some(oscillation))
    }

    fn insert_obstacle(
        &mut self,
        lane: usize,
        y: f32,
        kind: ObstacleKind,
        oscillation: Option<Oscillation>,
    ) -> ObstacleId {
        let lane = self.clamp_lane(lane);
        let id = ObstacleId(self.next_sim_id());
        let lane_x = self.config.lane_position(lane);
        let mut obstacle = Obstacle::new(id, lane, Position::new(lane_x, y), kind);
        if let Some(oscillation) = oscillation {
            obstacle = obstacle.with_oscillation(oscillation);
            obstacle.sweep(lane_x, 0.0);
        }
        self.obstacles.push(obstacle);
        id
    }

    /// Place a rival car; `profile` makes it AI-controlled
    pub fn spawn_rival(
        &mut self,
        lane: usize,
        y: f32,
        kind: CarKind,
        profile: Option<BehaviorProfile>,
    ) -> RivalId {
        let lane = self.clamp_lane(lane);
        let id = RivalId(self.next_sim_id());
        let position = Position::new(self.config.lane_position(lane), y);
        let mut rival = RivalCar::new(id, lane, position, kind);
        if let Some(profile) = profile {
            rival = rival.with_driver(AiDriver::new(profile, lane));
        }
        self.rivals.push(rival);
        id
    }

    pub fn spawn_pickup(&mut self, lane: usize, y: f32, kind: PickupKind) -> PickupId {
        let lane = self.clamp_lane(lane);
        let id = PickupId(self.next_sim_id());
        let position = Position::new(self.config.lane_position(lane), y);
        self.pickups.push(Pickup::new(id, lane, position, kind));
        id
    }

    fn clamp_lane(&self, lane: usize) -> usize {
        debug_assert!(lane < self.config.lane_count(), "lane {} out of range", lane);
        lane.min(self.config.lane_count().saturating_sub(1))
    }

    fn apply_spawn(&mut self, spawn: Spawn) {
        match spawn {
            Spawn::Obstacle {
                lane,
                kind,
                oscillation,
            } => {
                let id = self.insert_obstacle(lane, -OBSTACLE_SIZE / 2.0, kind, oscillation);
                debug!("Spawned obstacle {:?} in lane {}", id, lane);
            }
            Spawn::Rival {
                lane,
                kind,
                profile,
            } => {
                let id = self.spawn_rival(lane, -kind.height() / 2.0, kind, profile);
                debug!("Spawned rival {:?} ({:?}, {:?}) in lane {}", id, kind, profile, lane);
            }
            Spawn::Pickup { lane, kind } => {
                let id = self.spawn_pickup(lane, -PICKUP_SIZE / 2.0, kind);
                debug!("Spawned {:?} {:?} in lane {}", kind, id, lane);
            }
        }
    }

    // ----- state queries -----

    /// True once the player crashed
    pub fn is_game_over(&self) -> bool {
        self.game_state.game_over
    }

    /// True once the session ended for any reason
    pub fn is_session_over(&self) -> bool {
        self.game_state.is_over()
    }

    pub fn race_finished(&self) -> bool {
        self.race.as_ref().is_some_and(RaceManager::is_finished)
    }

    /// Scroll speed before power-up factors. The distance ramp is off in
    /// races, where opponents cruise at a fixed speed.
    pub fn current_speed(&self) -> f32 {
        if self.game_state.mode == GameMode::Race {
            return self.config.base_speed;
        }
        let ramp = 1.0 + self.config.speed_ramp_per_km * self.score.distance / 1000.0;
        self.config.base_speed * ramp.min(MAX_SPEED_RAMP)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.pending()
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            mode: self.game_state.mode,
            score: self.score.score,
            distance: self.score.distance,
            coins: self.score.coins,
            end_reason: self.game_state.end_reason,
        }
    }

    // ----- frame update -----

    /// Advance the simulation by one frame of `dt` seconds.
    ///
    /// `dt` is clamped twice. Gameplay uses `min(dt, config.max_dt)`: movement,
    /// the boost ramp, spawning, AI, the race clock, combo decay, the
    /// time-attack clock and mission time all advance by at most 1/30 s per
    /// call, so a long hitch slows the session down rather than skipping it.
    /// Power-up timers use `min(dt, MAX_TIMER_DT)` (0.25 s).
    pub fn update(&mut self, dt: f32) {
        let frame_dt = dt.clamp(0.0, self.config.max_dt);
        let timer_dt = dt.clamp(0.0, MAX_TIMER_DT);
        let multiplier_before = self.score.multiplier;

        if self.is_session_over() {
            // Effects still run out so the UI can report them as expired
            self.update_timers(timer_dt, 0.0);
            return;
        }

        let race_gate = self
            .race
            .as_ref()
            .map(|race| !race.is_racing() || race.player_finished());
        if race_gate == Some(true) {
            // Countdown, or the player is done and waits for the field
            self.update_timers(timer_dt, 0.0);
            self.update_race(frame_dt);
            return;
        }

        self.time += frame_dt;

        if self.config.spawning_enabled {
            self.run_spawner(frame_dt);
        }
        self.run_ai(frame_dt);
        self.move_player(frame_dt);
        self.resolve_entities(frame_dt);
        self.update_timers(timer_dt, frame_dt);
        self.update_race(frame_dt);

        if self.score.multiplier != multiplier_before {
            self.events
                .push(GameEvent::ComboMultiplierChanged(self.score.multiplier));
        }
    }

    fn run_spawner(&mut self, dt: f32) {
        let field = Field {
            obstacles: &self.obstacles,
            rivals: &self.rivals,
            pickups: &self.pickups,
        };
        let spawns = self.spawner.update(dt, &self.config, &field, &mut self.rng);
        for spawn in spawns {
            self.apply_spawn(spawn);
        }
    }

    /// Hazards in screen space, tagged with the rival that owns them
    fn hazards(&self) -> Vec<(Option<RivalId>, Hazard)> {
        let obstacles = self.obstacles.iter().map(|o| {
            (
                None,
                Hazard {
                    lane: o.lane,
                    y: o.position.y,
                    kind: HazardKind::Obstacle,
                },
            )
        });
        let rivals = self.rivals.iter().map(|r| {
            (
                Some(r.id),
                Hazard {
                    lane: r.lane,
                    y: r.position.y,
                    kind: HazardKind::Car,
                },
            )
        });
        let player = std::iter::once((
            None,
            Hazard {
                lane: self.player.lane,
                y: self.player.position.y,
                kind: HazardKind::Car,
            },
        ));
        obstacles.chain(rivals).chain(player).collect()
    }

    fn run_ai(&mut self, dt: f32) {
        let hazards = self.hazards();
        let player_lane = self.player.lane;
        let lane_count = self.config.lane_count();

        for rival in &mut self.rivals {
            let Some(driver) = rival.driver.as_mut() else {
                continue;
            };
            let others: Vec<Hazard> = hazards
                .iter()
                .filter(|(owner, _)| *owner != Some(rival.id))
                .map(|(_, hazard)| *hazard)
                .collect();
            let view = DriverView {
                lane: rival.lane,
                y: rival.position.y,
                lane_count,
                player_lane,
                hazards: &others,
            };
            driver.decide(&view, dt, &mut self.rng);
            if driver.converge(&mut rival.lane) {
                rival.position.x = self.config.lane_position(rival.lane);
            }
        }
    }

    fn move_player(&mut self, dt: f32) {
        self.player.update_motion(dt);
        let displacement = self.current_speed() * self.player.speed_factor() * dt;
        let meters = displacement * METERS_PER_UNIT;
        self.score.distance += meters;
        self.player.boost_energy.regenerate(dt, meters);
    }

    fn crash(&mut self) {
        let at = self.player.position;
        self.game_state.crash(at);
        self.events.push(GameEvent::Crash { x: at.x, y: at.y });
        info!(
            "Crashed at ({:.0}, {:.0}) after {:.0}m with {} points",
            at.x, at.y, self.score.distance, self.score.score
        );
    }

    /// Move every scrolling entity, then resolve passes and collisions
    fn resolve_entities(&mut self, dt: f32) {
        let scroll = self.current_speed() * self.player.speed_factor() * dt;
        let bottom = self.config.screen_height();
        let player_bounds = self.player.bounds();
        let shielded = self.player.has_shield();

        // Obstacles
        let mut crashed = false;
        let mut index = 0;
        while index < self.obstacles.len() {
            let lane_x = self.config.lane_position(self.obstacles[index].lane);
            let obstacle = &mut self.obstacles[index];
            obstacle.position.y += scroll;
            obstacle.sweep(lane_x, dt);

            if obstacle.position.y - obstacle.height / 2.0 > bottom {
                self.obstacles.remove(index);
                self.score.pass_obstacle();
                continue;
            }
            if collides(&obstacle.bounds(), &player_bounds) {
                if shielded {
                    self.obstacles.remove(index);
                    self.score.shield_block_obstacle();
                    self.events.push(GameEvent::ShieldBlock);
                    continue;
                }
                crashed = true;
                break;
            }
            index += 1;
        }
        if crashed {
            self.crash();
            return;
        }

        // Rival cars
        let mut index = 0;
        while index < self.rivals.len() {
            let rival = &mut self.rivals[index];
            rival.position.y += scroll * rival.speed_multiplier();

            if rival.position.y - rival.height / 2.0 > bottom {
                self.rivals.remove(index);
                self.score.pass_rival();
                continue;
            }
            if collides(&rival.bounds(), &player_bounds) {
                if shielded {
                    self.rivals.remove(index);
                    self.score.shield_block_rival();
                    self.events.push(GameEvent::ShieldBlock);
                    continue;
                }
                crashed = true;
                break;
            }
            index += 1;
        }
        if crashed {
            self.crash();
            return;
        }

        // Pickups
        let magnet = self.player.has_magnet();
        let player_position = self.player.position;
        let mut collected = Vec::new();
        for pickup in &mut self.pickups {
            pickup.position.y += scroll;
            if magnet && pickup.is_coin() {
                magnet_pull(&mut pickup.position, &player_position, dt);
            }
            if !pickup.collected && collides(&pickup.bounds(), &player_bounds) {
                pickup.collected = true;
                collected.push(pickup.kind);
            }
        }
        self.pickups
            .retain(|p| !p.collected && p.position.y - p.height / 2.0 <= bottom);

        for kind in collected {
            self.collect(kind);
        }
    }

    fn collect(&mut self, kind: PickupKind) {
        self.score.collect(kind);
        match kind {
            PickupKind::Coin => {
                self.player.boost_energy.gain(BOOST_ENERGY_PER_COIN);
                self.game_state.on_coin();
                self.events.push(GameEvent::CoinCollected);
            }
            PickupKind::PowerUp(effect) => {
                self.player.activate_effect(effect);
                debug!("Activated {:?} for {:.1}s", effect, effect.duration());
                self.events.push(GameEvent::PowerUpActivated(effect));
            }
        }
    }

    /// Effect timers, combo decay and mode goals
    fn update_timers(&mut self, timer_dt: f32, frame_dt: f32) {
        for expired in self.player.tick_effects(timer_dt) {
            debug!("{:?} expired", expired);
            self.events.push(GameEvent::PowerUpDeactivated(expired));
        }
        // The boost ramp settles even when nothing else moves
        if frame_dt == 0.0 {
            self.player.boost_ramp.update(timer_dt);
        }

        if self.is_session_over() {
            return;
        }
        self.score.update(frame_dt);
        match self.game_state.update(frame_dt, &self.score) {
            Some(EndReason::TimeUp) => {
                info!("Time up with {} points", self.score.score);
                self.events.push(GameEvent::TimeUp);
            }
            Some(EndReason::MissionComplete) => {
                info!("Mission complete after {:.1}s", self.game_state.time);
                self.events.push(GameEvent::MissionComplete);
            }
            _ => {}
        }
    }

    fn update_race(&mut self, dt: f32) {
        if self.is_session_over() {
            return;
        }
        let obstacles: Vec<Hazard> = self
            .obstacles
            .iter()
            .map(|o| Hazard {
                lane: o.lane,
                y: o.position.y,
                kind: HazardKind::Obstacle,
            })
            .collect();
        let progress = PlayerProgress {
            position: self.score.distance,
            lane: self.player.lane,
            screen_y: self.player.position.y,
        };
        let lane_count = self.config.lane_count();
        let Some(race) = self.race.as_mut() else {
            return;
        };
        let events = race.update(dt, progress, &obstacles, lane_count, &mut self.rng);
        for event in events {
            match event {
                GameEvent::PlayerFinishedRace { .. } => {
                    if let Some(result) = race.player_result {
                        self.score.add(result.score);
                    }
                }
                GameEvent::RaceFinished => self.game_state.end(EndReason::RaceFinished),
                _ => {}
            }
            self.events.push(event);
        }
    }

    // ----- reporting -----

    pub fn status_line(&self) -> String {
        let mut line = format!(
            "{} | {} | Lane {} | Energy {:.0} | Speed x{:.2}",
            self.game_state.summary(),
            self.score.summary(),
            self.player.lane,
            self.player.boost_energy.value(),
            self.player.speed_factor()
        );
        let active: Vec<String> = self
            .player
            .effects
            .active_kinds()
            .map(|kind| format!("{:?} {:.1}s", kind, self.player.effects.remaining(kind)))
            .collect();
        if !active.is_empty() {
            line.push_str(&format!(" | {}", active.join(", ")));
        }
        if let Some(race) = &self.race {
            line.push_str(&format!(" | {}", race.summary()));
        }
        line
    }

    /// Draw the field as text, one character per lane and one row per car length
    pub fn draw_map(&self) -> String {
        let row_height = CAR_HEIGHT / 2.0;
        let rows = (self.config.screen_height() / row_height).ceil().max(1.0) as usize;
        let lanes = self.config.lane_count();
        let mut grid = vec![vec!['.'; lanes]; rows];

        let mut plot = |x: f32, y: f32, glyph: char| {
            if y < 0.0 || y >= self.config.screen_height() {
                return;
            }
            let row = ((y / row_height) as usize).min(rows - 1);
            let col = self.config.lane_at(x);
            grid[row][col] = glyph;
        };

        for pickup in &self.pickups {
            let glyph = match pickup.kind {
                PickupKind::Coin => '$',
                PickupKind::PowerUp(EffectKind::Boost) => 'B',
                PickupKind::PowerUp(EffectKind::Shield) => 'S',
                PickupKind::PowerUp(EffectKind::Magnet) => 'M',
                PickupKind::PowerUp(EffectKind::SlowMo) => 'T',
            };
            plot(pickup.position.x, pickup.position.y, glyph);
        }
        for obstacle in &self.obstacles {
            plot(obstacle.position.x, obstacle.position.y, if obstacle.is_moving() { '~' } else { '#' });
        }
        for rival in &self.rivals {
            plot(rival.position.x, rival.position.y, if rival.driver.is_some() { 'A' } else { 'R' });
        }
        plot(self.player.position.x, self.player.position.y, '^');

        let mut out = String::new();
        out.push_str("Legend: ^=Player, R=Rival, A=AI rival, #=Obstacle, ~=Moving obstacle, $=Coin, B/S/M/T=Power-ups\n");
        for row in &grid {
            out.push('|');
            out.extend(row.iter());
            out.push_str("|\n");
        }
        out
    }
}
