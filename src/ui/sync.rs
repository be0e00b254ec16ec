//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{
    HudText, ObstacleLink, PickupLink, PlayerSprite, RivalLink, SimSynced, SimWorldResource,
};
use crate::simulation::{
    CarKind, EffectKind, EndReason, GameEvent, ObstacleKind, PickupKind, MAX_BOOST_ENERGY,
};

const PICKUP_Z: f32 = 1.0;
const OBSTACLE_Z: f32 = 2.0;
const CAR_Z: f32 = 3.0;

/// System to run simulation tick
pub fn tick_simulation(time: Res<Time>, mut sim_world: ResMut<SimWorldResource>) {
    sim_world.world.update(time.delta_secs());
    for event in sim_world.world.drain_events() {
        match event {
            GameEvent::Crash { .. } | GameEvent::MissionComplete | GameEvent::TimeUp => {
                info!("{:?}", event)
            }
            GameEvent::PlayerFinishedRace { rank } => info!("Finished the race in place {}", rank),
            _ => debug!("{:?}", event),
        }
    }
}

fn rival_color(kind: CarKind) -> Color {
    match kind {
        CarKind::Sedan => Color::srgb(0.2, 0.4, 0.8),
        CarKind::Suv => Color::srgb(0.3, 0.6, 0.3),
        CarKind::Truck => Color::srgb(0.5, 0.5, 0.55),
    }
}

fn obstacle_color(kind: ObstacleKind) -> Color {
    match kind {
        ObstacleKind::Cone => Color::srgb(1.0, 0.5, 0.0),
        ObstacleKind::Barrier => Color::srgb(0.9, 0.9, 0.9),
        ObstacleKind::Pothole => Color::srgb(0.1, 0.1, 0.1),
    }
}

fn pickup_color(kind: PickupKind) -> Color {
    match kind {
        PickupKind::Coin => Color::srgb(1.0, 0.85, 0.0),
        PickupKind::PowerUp(EffectKind::Boost) => Color::srgb(1.0, 0.3, 0.1),
        PickupKind::PowerUp(EffectKind::Shield) => Color::srgb(0.3, 0.8, 1.0),
        PickupKind::PowerUp(EffectKind::Magnet) => Color::srgb(0.8, 0.2, 0.8),
        PickupKind::PowerUp(EffectKind::SlowMo) => Color::srgb(0.4, 1.0, 0.6),
    }
}

/// System to move the player sprite and tint it while shielded
pub fn sync_player(
    sim_world: Res<SimWorldResource>,
    mut player_query: Query<(&mut Transform, &mut Sprite), With<PlayerSprite>>,
) {
    let player = &sim_world.world.player;
    let mut position = player.position;
    position.x = player.render_x();

    for (mut transform, mut sprite) in player_query.iter_mut() {
        transform.translation = sim_world.to_screen(&position, CAR_Z);
        sprite.custom_size = Some(Vec2::new(player.width, player.height));
        sprite.color = if sim_world.world.is_game_over() {
            Color::srgb(0.4, 0.1, 0.1)
        } else if player.has_shield() {
            Color::srgb(0.5, 0.9, 1.0)
        } else {
            Color::srgb(0.9, 0.15, 0.15)
        };
    }
}

/// System to sync rival car sprites
pub fn sync_rivals(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut rival_query: Query<(Entity, &RivalLink, &mut Transform)>,
) {
    let world = &sim_world.world;
    let mut existing = HashSet::new();

    for (entity, link, mut transform) in rival_query.iter_mut() {
        if let Some(rival) = world.rivals.iter().find(|r| r.id == link.0) {
            existing.insert(link.0);
            transform.translation = sim_world.to_screen(&rival.position, CAR_Z);
        } else {
            // Rival left the field, despawn
            commands.entity(entity).despawn();
        }
    }

    for rival in world.rivals.iter().filter(|r| !existing.contains(&r.id)) {
        commands.spawn((
            SimSynced,
            RivalLink(rival.id),
            Sprite::from_color(rival_color(rival.kind), Vec2::new(rival.width, rival.height)),
            Transform::from_translation(sim_world.to_screen(&rival.position, CAR_Z)),
        ));
    }
}

/// System to sync obstacle sprites
pub fn sync_obstacles(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut obstacle_query: Query<(Entity, &ObstacleLink, &mut Transform)>,
) {
    let world = &sim_world.world;
    let mut existing = HashSet::new();

    for (entity, link, mut transform) in obstacle_query.iter_mut() {
        if let Some(obstacle) = world.obstacles.iter().find(|o| o.id == link.0) {
            existing.insert(link.0);
            transform.translation = sim_world.to_screen(&obstacle.position, OBSTACLE_Z);
        } else {
            commands.entity(entity).despawn();
        }
    }

    for obstacle in world.obstacles.iter().filter(|o| !existing.contains(&o.id)) {
        commands.spawn((
            SimSynced,
            ObstacleLink(obstacle.id),
            Sprite::from_color(
                obstacle_color(obstacle.kind),
                Vec2::new(obstacle.width, obstacle.height),
            ),
            Transform::from_translation(sim_world.to_screen(&obstacle.position, OBSTACLE_Z)),
        ));
    }
}

/// System to sync coin and power-up sprites
pub fn sync_pickups(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut pickup_query: Query<(Entity, &PickupLink, &mut Transform)>,
) {
    let world = &sim_world.world;
    let mut existing = HashSet::new();

    for (entity, link, mut transform) in pickup_query.iter_mut() {
        if let Some(pickup) = world.pickups.iter().find(|p| p.id == link.0) {
            existing.insert(link.0);
            transform.translation = sim_world.to_screen(&pickup.position, PICKUP_Z);
        } else {
            commands.entity(entity).despawn();
        }
    }

    for pickup in world.pickups.iter().filter(|p| !existing.contains(&p.id)) {
        commands.spawn((
            SimSynced,
            PickupLink(pickup.id),
            Sprite::from_color(pickup_color(pickup.kind), Vec2::new(pickup.width, pickup.height)),
            Transform::from_translation(sim_world.to_screen(&pickup.position, PICKUP_Z)),
        ));
    }
}

/// System to update the HUD text
pub fn update_hud_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<(&HudText, &mut Text)>,
) {
    let world = &sim_world.world;

    for (hud, mut text) in text_query.iter_mut() {
        match hud {
            HudText::Score => {
                **text = format!(
                    "Score: {}  x{}  Combo: {}  Distance: {:.0}m  Coins: {}",
                    world.score.score,
                    world.score.multiplier,
                    world.score.combo,
                    world.score.distance,
                    world.score.coins
                );
            }
            HudText::Effects => {
                let mut line = format!(
                    "Energy: {:.0}/{:.0}",
                    world.player.boost_energy.value(),
                    MAX_BOOST_ENERGY
                );
                for kind in world.player.effects.active_kinds() {
                    line.push_str(&format!(
                        "  {:?} {:.1}s",
                        kind,
                        world.player.effects.remaining(kind)
                    ));
                }
                **text = line;
            }
            HudText::Status => {
                **text = match world.game_state.end_reason {
                    Some(EndReason::Crashed) => "CRASHED - press R to restart".to_string(),
                    Some(EndReason::TimeUp) => "TIME UP - press R to restart".to_string(),
                    Some(EndReason::MissionComplete) => {
                        "MISSION COMPLETE - press R to restart".to_string()
                    }
                    Some(EndReason::RaceFinished) => match world.race.as_ref() {
                        Some(race) => format!(
                            "RACE FINISHED - place {} - press R to restart",
                            race.player_rank()
                        ),
                        None => "RACE FINISHED - press R to restart".to_string(),
                    },
                    None => match world.race.as_ref() {
                        Some(race) => race.summary(),
                        None => world.game_state.summary(),
                    },
                };
            }
        }
    }
}
