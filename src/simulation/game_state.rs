//! Game modes and session win/loss tracking
//!
//! This module turns the raw simulation into a session: it knows which mode is
//! being played, counts the time-attack clock down, tracks mission progress
//! and records why the session ended.

use super::scoring::ScoreState;
use super::types::Position;

/// Seconds on the clock at the start of a time attack
pub const TIME_ATTACK_DURATION: f32 = 60.0;
/// Seconds added to the time-attack clock per coin
pub const TIME_ATTACK_COIN_BONUS: f32 = 1.0;

/// Mission targets
pub const MISSION_COINS: f32 = 30.0;
pub const MISSION_DISTANCE: f32 = 1000.0;
pub const MISSION_SCORE: f32 = 500.0;
pub const MISSION_DODGES: f32 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionKind {
    CollectCoins,
    TravelDistance,
    ReachScore,
    DodgeObstacles,
}

impl MissionKind {
    pub fn default_target(self) -> f32 {
        match self {
            MissionKind::CollectCoins => MISSION_COINS,
            MissionKind::TravelDistance => MISSION_DISTANCE,
            MissionKind::ReachScore => MISSION_SCORE,
            MissionKind::DodgeObstacles => MISSION_DODGES,
        }
    }

    /// Current value of the tracked quantity
    fn measure(self, score: &ScoreState) -> f32 {
        match self {
            MissionKind::CollectCoins => score.coins as f32,
            MissionKind::TravelDistance => score.distance,
            MissionKind::ReachScore => score.score as f32,
            MissionKind::DodgeObstacles => score.obstacles_dodged as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mission {
    pub kind: MissionKind,
    pub target: f32,
    pub progress: f32,
}

impl Mission {
    pub fn new(kind: MissionKind) -> Self {
        Self::with_target(kind, kind.default_target())
    }

    pub fn with_target(kind: MissionKind, target: f32) -> Self {
        Self {
            kind,
            target,
            progress: 0.0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }

    /// Progress as a percentage, capped at 100
    pub fn percent(&self) -> f32 {
        if self.target <= 0.0 {
            return 100.0;
        }
        (self.progress / self.target * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Endless,
    TimeAttack,
    Mission(MissionKind),
    Race,
}

impl GameMode {
    /// Stable key used for leaderboards
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Endless => "endless",
            GameMode::TimeAttack => "time_attack",
            GameMode::Mission(_) => "mission",
            GameMode::Race => "race",
        }
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Crashed,
    TimeUp,
    MissionComplete,
    RaceFinished,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    /// Session time in seconds
    pub time: f32,
    /// Time-attack clock; `None` in other modes
    pub time_remaining: Option<f32>,
    pub mission: Option<Mission>,
    /// Set by a terminal collision
    pub game_over: bool,
    pub crash_position: Option<Position>,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            time: 0.0,
            time_remaining: (mode == GameMode::TimeAttack).then_some(TIME_ATTACK_DURATION),
            mission: match mode {
                GameMode::Mission(kind) => Some(Mission::new(kind)),
                _ => None,
            },
            game_over: false,
            crash_position: None,
            end_reason: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.end_reason.is_some()
    }

    pub fn mission_complete(&self) -> bool {
        self.end_reason == Some(EndReason::MissionComplete)
    }

    pub fn crash(&mut self, at: Position) {
        self.game_over = true;
        self.crash_position = Some(at);
        self.end(EndReason::Crashed);
    }

    /// Record the end of the session; the first reason wins
    pub fn end(&mut self, reason: EndReason) {
        if self.end_reason.is_none() {
            self.end_reason = Some(reason);
        }
    }

    pub fn on_coin(&mut self) {
        if let Some(remaining) = &mut self.time_remaining {
            *remaining += TIME_ATTACK_COIN_BONUS;
        }
    }

    /// Advance the clock and check mode goals. Returns the reason if the
    /// session ended during this call.
    pub fn update(&mut self, dt: f32, score: &ScoreState) -> Option<EndReason> {
        if self.is_over() {
            return None;
        }
        self.time += dt;

        if let Some(mission) = &mut self.mission {
            mission.progress = mission.kind.measure(score);
            if mission.is_complete() {
                self.end(EndReason::MissionComplete);
                return self.end_reason;
            }
        }

        if let Some(remaining) = &mut self.time_remaining {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *remaining = 0.0;
                self.end(EndReason::TimeUp);
                return self.end_reason;
            }
        }

        None
    }

    pub fn summary(&self) -> String {
        let mut line = format!("Mode: {} | Time: {:.1}s", self.mode.name(), self.time);
        if let Some(remaining) = self.time_remaining {
            line.push_str(&format!(" | Clock: {:.1}s", remaining));
        }
        if let Some(mission) = &self.mission {
            line.push_str(&format!(" | Mission: {:.0}%", mission.percent()));
        }
        line
    }
}
