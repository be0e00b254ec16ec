//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all gameplay logic is in the `simulation` module.
//! The UI reads state from `SimWorld` and renders it as 2D sprites.

mod components;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{ObstacleLink, PickupLink, RivalLink, SimSynced, SimWorldResource};
pub use sync::{sync_obstacles, sync_pickups, sync_rivals};

use crate::simulation::{GameMode, SimulationConfig};
use input::{handle_input, handle_restart};
use sync::{sync_player, tick_simulation, update_hud_text};
use world::{handle_window_resize, setup_hud, setup_world};

/// Plugin to register all UI systems
pub struct LaneRushUIPlugin {
    pub config: SimulationConfig,
    pub mode: GameMode,
}

impl Plugin for LaneRushUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimWorldResource::new(self.config.clone(), self.mode))
            .add_systems(Startup, (setup_world, setup_hud))
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_restart,
                    handle_window_resize,
                    sync_player,
                    sync_rivals,
                    sync_obstacles,
                    sync_pickups,
                    update_hud_text,
                ),
            );
    }
}
