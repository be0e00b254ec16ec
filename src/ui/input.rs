//! Input handling systems

use bevy::prelude::*;

use super::components::{SimSynced, SimWorldResource};

/// Steering, boost and exit keys
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }

    let world = &mut sim_world.world;
    if keyboard.just_pressed(KeyCode::ArrowLeft) || keyboard.just_pressed(KeyCode::KeyA) {
        world.move_left();
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) || keyboard.just_pressed(KeyCode::KeyD) {
        world.move_right();
    }
    if keyboard.just_pressed(KeyCode::Space) && !world.use_boost_energy() {
        debug!("Not enough boost energy");
    }
}

/// Start a new session once the current one is over
pub fn handle_restart(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
    synced_query: Query<Entity, With<SimSynced>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) || !sim_world.world.is_session_over() {
        return;
    }

    let summary = sim_world.world.summary();
    info!(
        "Session over: {} points, {:.0}m, {} coins",
        summary.score, summary.distance, summary.coins
    );

    // Ids restart from zero in the new world, so old sprites must go
    for entity in synced_query.iter() {
        commands.entity(entity).despawn();
    }
    sim_world.restart();
}
