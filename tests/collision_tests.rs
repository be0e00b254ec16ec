//! Collision, pass and pickup resolution tests

use lane_rush::simulation::{
    collides, magnet_pull, Bounds, CarKind, EffectKind, EndReason, GameEvent, GameMode,
    ObstacleKind, PickupKind, Position, SimWorld, SimulationConfig, MAGNET_RADIUS,
};

const DT: f32 = 1.0 / 60.0;

fn quiet_world() -> SimWorld {
    let config = SimulationConfig::default().with_seed(11).with_spawning(false);
    SimWorld::with_config(config, GameMode::Endless).expect("valid config")
}

#[test]
fn test_collides_is_symmetric() {
    let a = Bounds::new(Position::new(100.0, 100.0), 50.0, 90.0);
    let b = Bounds::new(Position::new(140.0, 170.0), 50.0, 50.0);
    let c = Bounds::new(Position::new(300.0, 100.0), 50.0, 50.0);
    assert!(collides(&a, &b));
    assert!(collides(&b, &a));
    assert!(!collides(&a, &c));
    assert!(!collides(&c, &a));
}

#[test]
fn test_touching_edges_do_not_collide() {
    let a = Bounds::new(Position::new(0.0, 0.0), 50.0, 50.0);
    let b = Bounds::new(Position::new(50.0, 0.0), 50.0, 50.0);
    assert!(!collides(&a, &b));
}

#[test]
fn test_magnet_pull_only_inside_radius() {
    let target = Position::new(0.0, 0.0);
    let mut near = Position::new(100.0, 0.0);
    assert!(magnet_pull(&mut near, &target, DT));
    assert!(near.x < 100.0);
    assert_eq!(near.y, 0.0);

    let mut far = Position::new(MAGNET_RADIUS + 1.0, 0.0);
    assert!(!magnet_pull(&mut far, &target, DT));
    assert_eq!(far.x, MAGNET_RADIUS + 1.0);
}

#[test]
fn test_magnet_pull_never_overshoots() {
    let target = Position::new(0.0, 0.0);
    let mut coin = Position::new(10.0, 0.0);
    magnet_pull(&mut coin, &target, 10.0);
    assert!(coin.x >= 0.0);
}

/// An obstacle scrolling off the bottom in another lane is worth one point
#[test]
fn test_obstacle_pass_scores_one_point() {
    let mut world = quiet_world();
    let id = world.spawn_obstacle(0, -25.0, ObstacleKind::Cone);

    let mut frames = 0;
    while world.obstacles.iter().any(|o| o.id == id) && frames < 1000 {
        world.update(DT);
        frames += 1;
    }

    assert!(world.obstacles.is_empty(), "obstacle never left the field");
    assert_eq!(world.score.score, 1);
    assert_eq!(world.score.obstacles_dodged, 1);
    assert!(!world.is_game_over());
}

#[test]
fn test_rival_pass_scores_by_multiplier() {
    let mut world = quiet_world();
    world.spawn_rival(7, 0.0, CarKind::Sedan, None);

    for _ in 0..1000 {
        world.update(DT);
        if world.rivals.is_empty() {
            break;
        }
    }

    assert!(world.rivals.is_empty());
    assert_eq!(world.score.score, 2);
    assert_eq!(world.score.combo, 1);
}

#[test]
fn test_crash_without_shield_ends_session() {
    let mut world = quiet_world();
    let lane = world.player.lane;
    let y = world.player.position.y - 60.0;
    world.spawn_obstacle(lane, y, ObstacleKind::Barrier);

    world.update(DT);

    assert!(world.is_game_over());
    assert_eq!(world.game_state.end_reason, Some(EndReason::Crashed));
    assert!(world.game_state.crash_position.is_some());
    assert!(world
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::Crash { .. })));

    // Nothing moves after the crash
    let frozen_y = world.obstacles[0].position.y;
    let frozen_distance = world.score.distance;
    world.update(DT);
    assert_eq!(world.obstacles[0].position.y, frozen_y);
    assert_eq!(world.score.distance, frozen_distance);
}

#[test]
fn test_shield_absorbs_obstacle() {
    let mut world = quiet_world();
    world.player.activate_effect(EffectKind::Shield);
    let lane = world.player.lane;
    let y = world.player.position.y - 60.0;
    world.spawn_obstacle(lane, y, ObstacleKind::Cone);

    world.update(DT);

    assert!(!world.is_game_over());
    assert!(world.obstacles.is_empty());
    assert_eq!(world.score.score, 2);
    assert_eq!(world.score.combo, 2);
    assert!(world.player.has_shield(), "shield is time-limited, not single-use");
    assert!(world.drain_events().contains(&GameEvent::ShieldBlock));
}

#[test]
fn test_shield_absorbs_rival() {
    let mut world = quiet_world();
    world.player.activate_effect(EffectKind::Shield);
    let lane = world.player.lane;
    let y = world.player.position.y - 60.0;
    world.spawn_rival(lane, y, CarKind::Truck, None);

    world.update(DT);

    assert!(!world.is_game_over());
    assert!(world.rivals.is_empty());
    assert_eq!(world.score.score, 3);
}

#[test]
fn test_coin_collection() {
    let mut world = quiet_world();
    let lane = world.player.lane;
    let y = world.player.position.y;
    world.spawn_pickup(lane, y, PickupKind::Coin);

    world.update(DT);

    assert!(world.pickups.is_empty());
    assert_eq!(world.score.coins, 1);
    assert_eq!(world.score.score, 5);
    assert!(world.player.boost_energy.value() >= 5.0);
    assert!(world.drain_events().contains(&GameEvent::CoinCollected));
}

#[test]
fn test_power_up_collection_activates_effect() {
    let mut world = quiet_world();
    let lane = world.player.lane;
    let y = world.player.position.y;
    world.spawn_pickup(lane, y, PickupKind::PowerUp(EffectKind::SlowMo));

    world.update(DT);

    assert!(world.player.effects.is_active(EffectKind::SlowMo));
    assert_eq!(world.score.score, 25);
    assert_eq!(world.score.coins, 0);
    assert!(world
        .drain_events()
        .contains(&GameEvent::PowerUpActivated(EffectKind::SlowMo)));
}

#[test]
fn test_magnet_draws_in_coin_from_next_lane() {
    let mut world = quiet_world();
    let lane = world.player.lane + 1;
    let y = world.player.position.y - 20.0;
    world.player.activate_effect(EffectKind::Magnet);
    world.spawn_pickup(lane, y, PickupKind::Coin);

    for _ in 0..60 {
        world.update(DT);
    }

    assert_eq!(world.score.coins, 1);
}

#[test]
fn test_coin_in_next_lane_is_missed_without_magnet() {
    let mut world = quiet_world();
    let lane = world.player.lane + 1;
    let y = world.player.position.y - 20.0;
    world.spawn_pickup(lane, y, PickupKind::Coin);

    for _ in 0..60 {
        world.update(DT);
    }

    assert_eq!(world.score.coins, 0);
}

#[test]
fn test_pickup_leaving_field_is_removed_without_score() {
    let mut world = quiet_world();
    world.spawn_pickup(0, 700.0, PickupKind::Coin);

    for _ in 0..120 {
        world.update(DT);
    }

    assert!(world.pickups.is_empty());
    assert_eq!(world.score.score, 0);
}
