//! Sprite syncing tests for the Bevy visualizer
#![cfg(feature = "ui")]

use bevy::prelude::*;

use lane_rush::simulation::{GameMode, ObstacleKind, PickupKind, SimulationConfig};
use lane_rush::ui::{
    sync_obstacles, sync_pickups, sync_rivals, ObstacleLink, PickupLink, SimSynced,
    SimWorldResource,
};

fn sync_app() -> App {
    let config = SimulationConfig::default().with_seed(5).with_spawning(false);
    let mut app = App::new();
    app.insert_resource(SimWorldResource::new(config, GameMode::Endless))
        .add_systems(Update, (sync_rivals, sync_obstacles, sync_pickups));
    app
}

fn count<C: Component>(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, With<C>>();
    query.iter(app.world()).count()
}

#[test]
fn test_sprites_follow_simulation_entities() {
    let mut app = sync_app();
    let obstacle = app
        .world_mut()
        .resource_mut::<SimWorldResource>()
        .world
        .spawn_obstacle(2, 100.0, ObstacleKind::Cone);
    app.world_mut()
        .resource_mut::<SimWorldResource>()
        .world
        .spawn_pickup(4, 50.0, PickupKind::Coin);

    app.update();
    assert_eq!(count::<ObstacleLink>(&mut app), 1);
    assert_eq!(count::<PickupLink>(&mut app), 1);
    assert_eq!(count::<SimSynced>(&mut app), 2);

    // Moving the obstacle moves its sprite instead of spawning a new one
    {
        let mut sim = app.world_mut().resource_mut::<SimWorldResource>();
        sim.world.obstacles[0].position.y = 300.0;
    }
    app.update();
    assert_eq!(count::<ObstacleLink>(&mut app), 1);

    let expected_y = 800.0 / 2.0 - 300.0;
    let mut query = app.world_mut().query::<(&ObstacleLink, &Transform)>();
    let (link, transform) = query.single(app.world()).expect("one obstacle sprite");
    assert!(link.0 == obstacle);
    assert_eq!(transform.translation.y, expected_y);
}

#[test]
fn test_sprites_despawn_with_their_entities() {
    let mut app = sync_app();
    {
        let mut sim = app.world_mut().resource_mut::<SimWorldResource>();
        sim.world.spawn_obstacle(1, 100.0, ObstacleKind::Barrier);
        sim.world.spawn_obstacle(5, 120.0, ObstacleKind::Pothole);
    }
    app.update();
    assert_eq!(count::<ObstacleLink>(&mut app), 2);

    app.world_mut()
        .resource_mut::<SimWorldResource>()
        .world
        .obstacles
        .remove(0);
    app.update();
    assert_eq!(count::<ObstacleLink>(&mut app), 1);

    app.world_mut()
        .resource_mut::<SimWorldResource>()
        .world
        .obstacles
        .clear();
    app.update();
    assert_eq!(count::<ObstacleLink>(&mut app), 0);
    assert_eq!(count::<SimSynced>(&mut app), 0);
}
