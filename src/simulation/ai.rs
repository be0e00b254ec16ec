//! Lane-change and braking decisions for computer-driven cars
//!
//! One decision procedure serves every AI car, endless-mode rivals and race
//! opponents alike. Behaviour differences come from [`BehaviorProfile`].

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

/// How far ahead (towards smaller `y`) a driver looks for hazards
pub const LOOKAHEAD_DISTANCE: f32 = 280.0;
/// Half-height of the window that must be clear in a candidate lane
pub const LANE_SAFETY_WINDOW: f32 = 180.0;
/// Lane-change cooldown range in seconds
pub const LANE_CHANGE_COOLDOWN: std::ops::Range<f32> = 2.0..4.0;
/// Brake cooldown range in seconds
pub const BRAKE_COOLDOWN: std::ops::Range<f32> = 0.5..1.5;
/// Chance an aggressive driver with no escape lane starts braking
pub const BRAKE_CHANCE: f64 = 0.3;
/// Per-frame chance an aggressive driver moves into the player's lane
pub const AGGRESSIVE_BLOCK_CHANCE: f64 = 0.05;
/// Per-frame chance a normal driver wanders to a random lane
pub const NORMAL_WANDER_CHANCE: f64 = 0.02;

/// Speed multiplier while cruising
pub const CRUISE_SPEED_MULTIPLIER: f32 = 0.8;
/// Speed multiplier while braking
pub const BRAKE_SPEED_MULTIPLIER: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorProfile {
    Normal,
    Aggressive,
    Cautious,
}

impl BehaviorProfile {
    pub const ALL: [BehaviorProfile; 3] = [
        BehaviorProfile::Normal,
        BehaviorProfile::Aggressive,
        BehaviorProfile::Cautious,
    ];
}

/// What a hazard is, as seen by a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    Obstacle,
    Car,
}

/// Something a driver must not run into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hazard {
    pub lane: usize,
    pub y: f32,
    pub kind: HazardKind,
}

/// The surroundings a driver decides against. `hazards` must not contain the
/// driver itself.
#[derive(Debug, Clone, Copy)]
pub struct DriverView<'a> {
    pub lane: usize,
    pub y: f32,
    pub lane_count: usize,
    pub player_lane: usize,
    pub hazards: &'a [Hazard],
}

/// Decision state carried by every AI car
#[derive(Debug, Clone, PartialEq)]
pub struct AiDriver {
    pub profile: BehaviorProfile,
    pub target_lane: usize,
    pub lane_change_cooldown: f32,
    pub braking: bool,
    pub brake_cooldown: f32,
    pub obstacle_ahead: bool,
    pub car_ahead: bool,
}

impl AiDriver {
    pub fn new(profile: BehaviorProfile, lane: usize) -> Self {
        Self {
            profile,
            target_lane: lane,
            lane_change_cooldown: 0.0,
            braking: false,
            brake_cooldown: 0.0,
            obstacle_ahead: false,
            car_ahead: false,
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        if self.braking {
            BRAKE_SPEED_MULTIPLIER
        } else {
            CRUISE_SPEED_MULTIPLIER
        }
    }

    /// Run one frame of decision making. Returns the new target lane if the
    /// driver picked one this frame.
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        view: &DriverView<'_>,
        dt: f32,
        rng: &mut R,
    ) -> Option<usize> {
        if self.braking {
            self.brake_cooldown -= dt;
            if self.brake_cooldown <= 0.0 {
                self.brake_cooldown = 0.0;
                self.braking = false;
            }
        } else if self.brake_cooldown > 0.0 {
            self.brake_cooldown = (self.brake_cooldown - dt).max(0.0);
        }

        if self.lane_change_cooldown > 0.0 {
            self.lane_change_cooldown = (self.lane_change_cooldown - dt).max(0.0);
            return None;
        }

        self.scan_ahead(view);

        if self.obstacle_ahead || self.car_ahead {
            let safe = safe_lanes(view);
            if let Some(&lane) = safe.choose(rng) {
                self.retarget(lane, rng);
                debug!("AI {:?} swerving from lane {} to {}", self.profile, view.lane, lane);
                return Some(lane);
            }
            if self.profile == BehaviorProfile::Aggressive
                && !self.braking
                && self.brake_cooldown <= 0.0
                && rng.random_bool(BRAKE_CHANCE)
            {
                self.braking = true;
                self.brake_cooldown = rng.random_range(BRAKE_COOLDOWN);
                debug!("AI boxed in at lane {}, braking", view.lane);
            }
            return None;
        }

        let lane = match self.profile {
            BehaviorProfile::Aggressive if rng.random_bool(AGGRESSIVE_BLOCK_CHANCE) => {
                Some(view.player_lane.min(view.lane_count.saturating_sub(1)))
            }
            BehaviorProfile::Normal if rng.random_bool(NORMAL_WANDER_CHANCE) => {
                Some(rng.random_range(0..view.lane_count.max(1)))
            }
            _ => None,
        }?;

        if lane == view.lane {
            return None;
        }
        self.retarget(lane, rng);
        Some(lane)
    }

    fn retarget<R: Rng + ?Sized>(&mut self, lane: usize, rng: &mut R) {
        self.target_lane = lane;
        self.lane_change_cooldown = rng.random_range(LANE_CHANGE_COOLDOWN);
    }

    fn scan_ahead(&mut self, view: &DriverView<'_>) {
        self.obstacle_ahead = false;
        self.car_ahead = false;
        for hazard in view.hazards {
            if hazard.lane != view.lane {
                continue;
            }
            let gap = view.y - hazard.y;
            if gap > 0.0 && gap <= LOOKAHEAD_DISTANCE {
                match hazard.kind {
                    HazardKind::Obstacle => self.obstacle_ahead = true,
                    HazardKind::Car => self.car_ahead = true,
                }
            }
        }
    }

    /// Step `lane` one lane towards the target. Returns true if it moved.
    pub fn converge(&self, lane: &mut usize) -> bool {
        if *lane < self.target_lane {
            *lane += 1;
            true
        } else if *lane > self.target_lane {
            *lane -= 1;
            true
        } else {
            false
        }
    }
}

/// Lanes other than the driver's own with no hazard inside the safety window
pub fn safe_lanes(view: &DriverView<'_>) -> Vec<usize> {
    (0..view.lane_count)
        .filter(|&lane| lane != view.lane)
        .filter(|&lane| {
            !view
                .hazards
                .iter()
                .any(|h| h.lane == lane && (h.y - view.y).abs() < LANE_SAFETY_WINDOW)
        })
        .collect()
}
