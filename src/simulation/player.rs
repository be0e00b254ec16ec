//! The player car
//!
//! The car is pinned vertically on screen; forward motion is tracked as
//! distance travelled. Lane changes snap `x` to the new lane at once and start
//! a cosmetic swerve that never takes part in collision tests.

use super::config::SimulationConfig;
use super::effects::{BoostEnergy, BoostRamp, EffectKind, EffectTimers, SLOW_MO_FACTOR};
use super::types::{Bounds, Position, CAR_HEIGHT, CAR_WIDTH};

/// Seconds for the swerve offset to settle back to zero
pub const SWERVE_DURATION: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct PlayerCar {
    pub lane: usize,
    pub position: Position,
    pub width: f32,
    pub height: f32,
    /// Cosmetic lateral offset, decays to zero
    pub swerve_offset: f32,
    pub effects: EffectTimers,
    pub boost_ramp: BoostRamp,
    pub boost_energy: BoostEnergy,
    lane_count: usize,
    lane_positions: Vec<f32>,
}

impl PlayerCar {
    pub fn new(config: &SimulationConfig, lane: usize) -> Self {
        let lane = lane.min(config.lane_count().saturating_sub(1));
        Self {
            lane,
            position: Position::new(config.lane_position(lane), config.player_y()),
            width: CAR_WIDTH,
            height: CAR_HEIGHT,
            swerve_offset: 0.0,
            effects: EffectTimers::default(),
            boost_ramp: BoostRamp::default(),
            boost_energy: BoostEnergy::default(),
            lane_count: config.lane_count(),
            lane_positions: config.lane_positions().to_vec(),
        }
    }

    /// Re-read lane geometry after a resize, keeping the current lane
    pub fn apply_config(&mut self, config: &SimulationConfig) {
        self.lane_count = config.lane_count();
        self.lane_positions = config.lane_positions().to_vec();
        self.lane = self.lane.min(self.lane_count.saturating_sub(1));
        self.position = Position::new(config.lane_position(self.lane), config.player_y());
    }

    pub fn move_left(&mut self) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.change_lane(self.lane - 1);
        // Car jumps left, so the drawn body starts right of the lane centre
        self.swerve_offset = self.width / 2.0;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.lane + 1 >= self.lane_count {
            return false;
        }
        self.change_lane(self.lane + 1);
        self.swerve_offset = -self.width / 2.0;
        true
    }

    fn change_lane(&mut self, lane: usize) {
        self.lane = lane;
        if let Some(x) = self.lane_positions.get(lane) {
            self.position.x = *x;
        }
    }

    /// Spend stored energy on a boost. Returns false if there was not enough.
    pub fn use_boost_energy(&mut self) -> bool {
        if !self.boost_energy.try_spend() {
            return false;
        }
        self.activate_effect(EffectKind::Boost);
        true
    }

    /// Start (or restart) an effect. Returns true if it was not already active.
    pub fn activate_effect(&mut self, kind: EffectKind) -> bool {
        if kind == EffectKind::Boost {
            self.boost_ramp.engage();
        }
        self.effects.activate(kind)
    }

    /// Count effect timers down. Returns the effects that just expired.
    pub fn tick_effects(&mut self, dt: f32) -> Vec<EffectKind> {
        let expired = self.effects.tick(dt);
        if expired.contains(&EffectKind::Boost) {
            self.boost_ramp.release();
        }
        expired
    }

    pub fn update_motion(&mut self, dt: f32) {
        self.boost_ramp.update(dt);
        let decay = self.width / 2.0 / SWERVE_DURATION * dt;
        if self.swerve_offset.abs() <= decay {
            self.swerve_offset = 0.0;
        } else {
            self.swerve_offset -= decay.copysign(self.swerve_offset);
        }
    }

    /// Multiplier applied to every scroll displacement
    pub fn speed_factor(&self) -> f32 {
        let slow = if self.effects.is_active(EffectKind::SlowMo) {
            SLOW_MO_FACTOR
        } else {
            1.0
        };
        slow * self.boost_ramp.current
    }

    pub fn has_shield(&self) -> bool {
        self.effects.is_active(EffectKind::Shield)
    }

    pub fn has_magnet(&self) -> bool {
        self.effects.is_active(EffectKind::Magnet)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.width, self.height)
    }

    /// Where the renderer should draw the car
    pub fn render_x(&self) -> f32 {
        self.position.x + self.swerve_offset
    }
}
