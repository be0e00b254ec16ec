//! Race mode tests

use rand::rngs::StdRng;
use rand::SeedableRng;

use lane_rush::simulation::{
    race_score, BehaviorProfile, EndReason, GameEvent, GameMode, PlayerProgress, RaceConfig,
    RaceManager, RaceStatus, Racer, SimWorld, SimulationConfig,
};

fn short_race() -> RaceManager {
    RaceManager::new(RaceConfig {
        length: 100.0,
        countdown: 3.0,
        base_speed: 30.0,
    })
    .expect("valid race")
}

fn progress(position: f32) -> PlayerProgress {
    PlayerProgress {
        position,
        lane: 3,
        screen_y: 650.0,
    }
}

#[test]
fn test_race_score_tiers_and_time_bonus() {
    assert_eq!(race_score(1, 0.0), 1500);
    assert_eq!(race_score(1, 4.0), 1460);
    assert_eq!(race_score(2, 10.0), 750 + 400);
    assert_eq!(race_score(6, 100.0), 100);
    assert_eq!(race_score(9, 0.0), 100 + 500);
}

#[test]
fn test_invalid_race_setup_is_rejected() {
    assert!(RaceManager::new(RaceConfig {
        length: 0.0,
        ..RaceConfig::default()
    })
    .is_err());

    let mut race = short_race();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(race.add_opponent("Too easy", 0, 0, &mut rng).is_err());
    assert!(race.add_opponent("Too hard", 6, 0, &mut rng).is_err());
    assert!(race.opponents.is_empty());
}

#[test]
fn test_opponent_speed_follows_difficulty() {
    let mut race = short_race();
    let mut rng = StdRng::seed_from_u64(1);
    let id = race.add_opponent("Ace", 5, 0, &mut rng).expect("valid difficulty");
    let opponent = &race.opponents[id];
    let nominal = 30.0 * (0.84 + 0.04 * 5.0);
    assert!((opponent.speed - nominal).abs() <= nominal * 0.03 + 1e-3);
    assert_eq!(opponent.driver.profile, BehaviorProfile::Aggressive);
}

#[test]
fn test_countdown_holds_everyone_at_the_line() {
    let mut race = short_race();
    race.add_opponent_with_speed("Bot", 0, 20.0, BehaviorProfile::Cautious);
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..11 {
        let events = race.update(0.25, progress(0.0), &[], 8, &mut rng);
        assert!(events.is_empty());
        assert_eq!(race.status, RaceStatus::Countdown);
    }
    let events = race.update(0.25, progress(0.0), &[], 8, &mut rng);
    assert_eq!(events, vec![GameEvent::RaceStarted]);
    assert!(race.is_racing());
    assert_eq!(race.opponents[0].position, 0.0);
    assert_eq!(race.elapsed, 0.0);
}

/// Player and one opponent both finish; ranks follow the crossing order
#[test]
fn test_race_finishes_only_after_everyone_crosses() {
    let mut race = short_race();
    race.add_opponent_with_speed("Bot", 0, 20.0, BehaviorProfile::Cautious);
    let mut rng = StdRng::seed_from_u64(3);
    let dt = 0.25;

    while !race.is_racing() {
        race.update(dt, progress(0.0), &[], 8, &mut rng);
    }

    let mut player_position = 0.0;
    let mut player_rank = None;
    let mut finished_events = 0;
    for _ in 0..100 {
        player_position += 25.0 * dt;
        for event in race.update(dt, progress(player_position), &[], 8, &mut rng) {
            match event {
                GameEvent::PlayerFinishedRace { rank } => {
                    player_rank = Some(rank);
                    assert!(!race.is_finished(), "opponent is still racing");
                }
                GameEvent::RaceFinished => finished_events += 1,
                _ => {}
            }
        }
        if race.is_finished() {
            break;
        }
    }

    assert!(race.is_finished());
    assert_eq!(finished_events, 1);
    assert_eq!(player_rank, Some(1));
    assert!(race.opponents[0].finished);
    assert_eq!(race.finish_order, vec![Racer::Player, Racer::Opponent(0)]);

    let result = race.player_result.expect("player finished");
    assert_eq!(result.rank, 1);
    assert!((result.finish_time - 4.0).abs() < 1e-3);
    assert_eq!(result.score, race_score(1, result.finish_time));

    let opponent_time = race.opponents[0].finish_time.expect("opponent finished");
    assert!((opponent_time - 5.0).abs() < 1e-2);
    assert!(opponent_time > result.finish_time);
}

#[test]
fn test_same_frame_crossings_use_interpolated_times() {
    let mut race = RaceManager::new(RaceConfig {
        length: 100.0,
        countdown: 0.0,
        base_speed: 30.0,
    })
    .expect("valid race");
    race.add_opponent_with_speed("Sprinter", 0, 31.0, BehaviorProfile::Cautious);
    let mut rng = StdRng::seed_from_u64(5);

    // Zero countdown still takes one frame to start
    race.update(1.0, progress(0.0), &[], 8, &mut rng);
    assert!(race.is_racing());

    for second in 1..=4 {
        race.update(1.0, progress(30.0 * second as f32), &[], 8, &mut rng);
    }

    // Both cross during the fourth second; the opponent gets there first
    assert!(race.is_finished());
    assert_eq!(race.finish_order, vec![Racer::Opponent(0), Racer::Player]);
    assert_eq!(race.player_result.map(|r| r.rank), Some(2));
    let player_time = race.player_finish_time.expect("player finished");
    assert!((player_time - (3.0 + 10.0 / 30.0)).abs() < 1e-3);
}

#[test]
fn test_standings_order_by_distance_while_racing() {
    let mut race = RaceManager::new(RaceConfig {
        length: 1000.0,
        countdown: 0.0,
        base_speed: 30.0,
    })
    .expect("valid race");
    race.add_opponent_with_speed("Slow", 0, 10.0, BehaviorProfile::Cautious);
    race.add_opponent_with_speed("Fast", 7, 40.0, BehaviorProfile::Cautious);
    let mut rng = StdRng::seed_from_u64(5);

    race.update(1.0, progress(0.0), &[], 8, &mut rng);
    race.update(1.0, progress(25.0), &[], 8, &mut rng);

    let order: Vec<Racer> = race.standings().iter().map(|s| s.racer).collect();
    assert_eq!(
        order,
        vec![Racer::Opponent(1), Racer::Player, Racer::Opponent(0)]
    );
    assert_eq!(race.player_rank(), 2);
}

#[test]
fn test_race_mode_world_runs_to_completion() {
    let config = SimulationConfig::default().with_seed(21).with_spawning(false);
    let mut world = SimWorld::with_config(config, GameMode::Race).expect("valid config");
    world
        .configure_race(
            RaceConfig {
                length: 100.0,
                countdown: 0.5,
                base_speed: 5.0,
            },
            1,
        )
        .expect("race setup");

    world.update(1.0 / 30.0);
    assert_eq!(world.score.distance, 0.0, "nobody moves during the countdown");

    let mut events = Vec::new();
    for _ in 0..(30 * 60) {
        world.update(1.0 / 30.0);
        events.extend(world.drain_events());
        if world.is_session_over() {
            break;
        }
    }

    assert!(world.race_finished());
    assert_eq!(world.game_state.end_reason, Some(EndReason::RaceFinished));
    assert!(events.contains(&GameEvent::RaceStarted));
    assert!(events.contains(&GameEvent::PlayerFinishedRace { rank: 1 }));
    assert!(events.contains(&GameEvent::RaceFinished));

    let race = world.race.as_ref().expect("race mode");
    let result = race.player_result.expect("player finished");
    assert_eq!(world.score.score, result.score);
    assert!(world.score.score > 1000);
}

#[test]
fn test_default_race_world_has_opponents() {
    let world = SimWorld::new_with_seed(GameMode::Race, 4);
    let race = world.race.as_ref().expect("race mode creates a race");
    assert_eq!(race.opponents.len(), 5);
    assert_eq!(race.status, RaceStatus::Countdown);
    assert!(SimWorld::new_with_seed(GameMode::Endless, 4).race.is_none());
}

#[test]
fn test_fast_opponent_beats_an_idle_player() {
    let config = SimulationConfig::default().with_seed(11).with_spawning(false);
    let mut world = SimWorld::with_config(config, GameMode::Race).expect("valid config");

    let mut rng = StdRng::seed_from_u64(11);
    let mut race = RaceManager::new(RaceConfig {
        length: 600.0,
        countdown: 0.5,
        base_speed: 30.0,
    })
    .expect("valid race");
    race.add_opponent("Ace", 5, 0, &mut rng).expect("difficulty 5 is valid");
    world.race = Some(race);

    for _ in 0..(30 * 60) {
        world.update(1.0 / 30.0);
        if world.is_session_over() {
            break;
        }
    }

    assert_eq!(world.game_state.end_reason, Some(EndReason::RaceFinished));
    let race = world.race.as_ref().expect("race mode");
    assert_eq!(race.finish_order, vec![Racer::Opponent(0), Racer::Player]);
    let result = race.player_result.expect("player finished");
    assert_eq!(result.rank, 2);
    let opponent_time = race.opponents[0].finish_time.expect("opponent finished");
    assert!(opponent_time < result.finish_time);
    // no distance ramp in races: 600 m at the flat 30 m/s
    assert!((result.finish_time - 20.0).abs() < 0.1);
}

#[test]
fn test_race_speed_ignores_distance_ramp() {
    let mut race_world = SimWorld::new_with_seed(GameMode::Race, 2);
    let mut endless_world = SimWorld::new_with_seed(GameMode::Endless, 2);
    race_world.score.distance = 3000.0;
    endless_world.score.distance = 3000.0;

    assert_eq!(race_world.current_speed(), race_world.config.base_speed);
    assert!(endless_world.current_speed() > endless_world.config.base_speed);
}
