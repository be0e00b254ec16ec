//! Scrolling entities: rival cars, obstacles and pickups
//!
//! Every entity sits in one lane. Only moving obstacles leave the lane
//! centre, sweeping sideways inside their lane.

use super::ai::AiDriver;
use super::effects::EffectKind;
use super::types::{
    Bounds, CarKind, ObstacleId, ObstacleKind, PickupId, Position, RivalId, CAR_WIDTH,
    OBSTACLE_SIZE, PICKUP_SIZE,
};

/// Speed multiplier of rival cars without a driver
pub const PASSIVE_RIVAL_SPEED_MULTIPLIER: f32 = 0.8;

/// A non-player car scrolling down the field
#[derive(Debug, Clone)]
pub struct RivalCar {
    pub id: RivalId,
    pub lane: usize,
    pub position: Position,
    pub kind: CarKind,
    pub width: f32,
    pub height: f32,
    /// Present on AI-controlled rivals
    pub driver: Option<AiDriver>,
}

impl RivalCar {
    pub fn new(id: RivalId, lane: usize, position: Position, kind: CarKind) -> Self {
        Self {
            id,
            lane,
            position,
            kind,
            width: CAR_WIDTH,
            height: kind.height(),
            driver: None,
        }
    }

    pub fn with_driver(mut self, driver: AiDriver) -> Self {
        self.driver = Some(driver);
        self
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.driver
            .as_ref()
            .map(AiDriver::speed_multiplier)
            .unwrap_or(PASSIVE_RIVAL_SPEED_MULTIPLIER)
    }

    pub fn is_braking(&self) -> bool {
        self.driver.as_ref().is_some_and(|d| d.braking)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.width, self.height)
    }
}

/// Sideways sweep of a moving obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub phase: f32,
    pub amplitude: f32,
    /// Radians per second
    pub frequency: f32,
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub lane: usize,
    pub position: Position,
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
    pub oscillation: Option<Oscillation>,
}

impl Obstacle {
    pub fn new(id: ObstacleId, lane: usize, position: Position, kind: ObstacleKind) -> Self {
        Self {
            id,
            lane,
            position,
            kind,
            width: OBSTACLE_SIZE,
            height: OBSTACLE_SIZE,
            oscillation: None,
        }
    }

    pub fn with_oscillation(mut self, oscillation: Oscillation) -> Self {
        self.oscillation = Some(oscillation);
        self
    }

    pub fn is_moving(&self) -> bool {
        self.oscillation.is_some()
    }

    /// Advance the sweep and place `x` relative to the lane centre
    pub fn sweep(&mut self, lane_x: f32, dt: f32) {
        match &mut self.oscillation {
            Some(osc) => {
                osc.phase = (osc.phase + osc.frequency * dt) % std::f32::consts::TAU;
                self.position.x = lane_x + osc.amplitude * osc.phase.sin();
            }
            None => self.position.x = lane_x,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.width, self.height)
    }
}

/// What a pickup grants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Coin,
    PowerUp(EffectKind),
}

#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: PickupId,
    pub lane: usize,
    pub position: Position,
    pub kind: PickupKind,
    pub width: f32,
    pub height: f32,
    /// Set once on collection; the pickup is removed in the same frame
    pub collected: bool,
}

impl Pickup {
    pub fn new(id: PickupId, lane: usize, position: Position, kind: PickupKind) -> Self {
        Self {
            id,
            lane,
            position,
            kind,
            width: PICKUP_SIZE,
            height: PICKUP_SIZE,
            collected: false,
        }
    }

    pub fn is_coin(&self) -> bool {
        self.kind == PickupKind::Coin
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.width, self.height)
    }
}
