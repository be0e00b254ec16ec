//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;

use crate::simulation::{
    GameMode, ObstacleId, PickupId, Position, RivalId, SimWorld, SimulationConfig,
};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource {
    pub world: SimWorld,
    /// Kept so a finished session can be restarted with the same settings
    pub config: SimulationConfig,
    pub mode: GameMode,
}

impl SimWorldResource {
    pub fn new(config: SimulationConfig, mode: GameMode) -> Self {
        let world = match SimWorld::with_config(config.clone(), mode) {
            Ok(world) => world,
            Err(err) => {
                warn!("{:#}; falling back to the default configuration", err);
                SimWorld::new(mode)
            }
        };
        Self {
            world,
            config,
            mode,
        }
    }

    /// Throw the current session away and start a new one
    pub fn restart(&mut self) {
        *self = Self::new(self.config.clone(), self.mode);
    }

    /// Convert a simulation position (origin top-left, y down) to Bevy space
    pub fn to_screen(&self, position: &Position, z: f32) -> Vec3 {
        let config = &self.world.config;
        Vec3::new(
            position.x - config.screen_width() / 2.0,
            config.screen_height() / 2.0 - position.y,
            z,
        )
    }
}

/// Marker for entities synced from simulation
#[derive(Component)]
pub struct SimSynced;

/// The player's car sprite
#[derive(Component)]
pub struct PlayerSprite;

/// Links a Bevy entity to a simulation rival car
#[derive(Component)]
pub struct RivalLink(pub RivalId);

/// Links a Bevy entity to a simulation obstacle
#[derive(Component)]
pub struct ObstacleLink(pub ObstacleId);

/// Links a Bevy entity to a simulation pickup
#[derive(Component)]
pub struct PickupLink(pub PickupId);

/// Lane divider stripe; rebuilt when the window is resized
#[derive(Component)]
pub struct LaneMarker;

/// Marker for HUD text elements
#[derive(Component)]
pub enum HudText {
    /// Score, combo and distance
    Score,
    /// Active power-ups and boost energy
    Effects,
    /// Mode progress, race standings or the game over banner
    Status,
}
