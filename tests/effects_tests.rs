//! Power-up timers, boost ramp and boost energy tests

use lane_rush::simulation::{
    BoostEnergy, BoostRamp, EffectKind, EffectTimers, GameEvent, GameMode, SimWorld,
    SimulationConfig, BOOST_DURATION, BOOST_ENERGY_COST, BOOST_FACTOR, MAX_BOOST_ENERGY,
    SHIELD_DURATION, SLOW_MO_FACTOR,
};

const DT: f32 = 1.0 / 60.0;

fn quiet_world() -> SimWorld {
    let config = SimulationConfig::default().with_seed(5).with_spawning(false);
    SimWorld::with_config(config, GameMode::Endless).expect("valid config")
}

#[test]
fn test_effect_timer_counts_down_and_expires() {
    let mut timers = EffectTimers::default();
    assert!(timers.activate(EffectKind::Shield));
    assert_eq!(timers.remaining(EffectKind::Shield), SHIELD_DURATION);

    assert!(timers.tick(SHIELD_DURATION - 1.0).is_empty());
    assert!(timers.is_active(EffectKind::Shield));

    let expired = timers.tick(1.5);
    assert_eq!(expired, vec![EffectKind::Shield]);
    assert!(!timers.is_active(EffectKind::Shield));
    assert_eq!(timers.remaining(EffectKind::Shield), 0.0);
}

#[test]
fn test_reactivation_resets_timer() {
    let mut timers = EffectTimers::default();
    timers.activate(EffectKind::Magnet);
    timers.tick(3.0);
    assert!(!timers.activate(EffectKind::Magnet));
    assert_eq!(
        timers.remaining(EffectKind::Magnet),
        EffectKind::Magnet.duration()
    );
}

#[test]
fn test_active_kinds_lists_running_effects() {
    let mut timers = EffectTimers::default();
    timers.activate(EffectKind::Boost);
    timers.activate(EffectKind::SlowMo);
    let active: Vec<EffectKind> = timers.active_kinds().collect();
    assert_eq!(active, vec![EffectKind::Boost, EffectKind::SlowMo]);

    timers.deactivate(EffectKind::Boost);
    assert!(!timers.is_active(EffectKind::Boost));
}

#[test]
fn test_boost_ramp_rises_without_overshoot() {
    let mut ramp = BoostRamp::default();
    ramp.engage();

    let mut previous = ramp.current;
    for _ in 0..120 {
        ramp.update(DT);
        assert!(ramp.current >= previous);
        assert!(ramp.current <= BOOST_FACTOR);
        previous = ramp.current;
    }
    assert_eq!(ramp.current, BOOST_FACTOR);

    ramp.release();
    for _ in 0..120 {
        ramp.update(DT);
        assert!(ramp.current <= previous);
        assert!(ramp.current >= 1.0);
        previous = ramp.current;
    }
    assert_eq!(ramp.current, 1.0);
}

#[test]
fn test_boost_energy_gating() {
    let mut energy = BoostEnergy::new(BOOST_ENERGY_COST - 1.0);
    assert!(!energy.try_spend());
    assert_eq!(energy.value(), BOOST_ENERGY_COST - 1.0);

    energy.gain(1.0);
    assert!(energy.try_spend());
    assert_eq!(energy.value(), 0.0);
}

#[test]
fn test_boost_energy_is_capped() {
    let mut energy = BoostEnergy::new(500.0);
    assert_eq!(energy.value(), MAX_BOOST_ENERGY);
    energy.regenerate(10.0, 1000.0);
    assert_eq!(energy.value(), MAX_BOOST_ENERGY);
}

#[test]
fn test_boost_energy_regenerates_with_time_and_distance() {
    let mut energy = BoostEnergy::default();
    energy.regenerate(1.0, 0.0);
    assert!((energy.value() - 10.0).abs() < 1e-4);
    energy.regenerate(0.0, 100.0);
    assert!((energy.value() - 15.0).abs() < 1e-4);
}

#[test]
fn test_use_boost_energy_needs_energy() {
    let mut world = quiet_world();
    assert!(!world.use_boost_energy());
    assert!(!world.player.effects.is_active(EffectKind::Boost));
    assert!(world.drain_events().is_empty());

    world.player.boost_energy = BoostEnergy::new(MAX_BOOST_ENERGY);
    assert!(world.use_boost_energy());
    assert!(world.player.effects.is_active(EffectKind::Boost));
    assert_eq!(
        world.player.boost_energy.value(),
        MAX_BOOST_ENERGY - BOOST_ENERGY_COST
    );
    let events = world.drain_events();
    assert!(events.contains(&GameEvent::BoostEnergyUsed));
    assert!(events.contains(&GameEvent::PowerUpActivated(EffectKind::Boost)));
}

/// Boost speeds the world up gradually and settles back after it expires
#[test]
fn test_boost_speed_factor_over_lifetime() {
    let mut world = quiet_world();
    world.player.boost_energy = BoostEnergy::new(MAX_BOOST_ENERGY);
    world.use_boost_energy();

    world.update(DT);
    let early = world.player.speed_factor();
    assert!(early > 1.0 && early < BOOST_FACTOR);

    let mut elapsed = DT;
    while elapsed < BOOST_DURATION - 0.5 {
        world.update(DT);
        elapsed += DT;
    }
    assert_eq!(world.player.speed_factor(), BOOST_FACTOR);

    let mut deactivated = false;
    for _ in 0..180 {
        world.update(DT);
        deactivated |= world
            .drain_events()
            .contains(&GameEvent::PowerUpDeactivated(EffectKind::Boost));
    }
    assert!(deactivated);
    assert!(!world.player.effects.is_active(EffectKind::Boost));
    assert_eq!(world.player.speed_factor(), 1.0);
}

#[test]
fn test_slow_mo_halves_scroll() {
    let mut normal = quiet_world();
    let mut slowed = quiet_world();
    slowed.player.activate_effect(EffectKind::SlowMo);
    assert_eq!(slowed.player.speed_factor(), SLOW_MO_FACTOR);

    for _ in 0..30 {
        normal.update(DT);
        slowed.update(DT);
    }
    let ratio = slowed.score.distance / normal.score.distance;
    assert!((ratio - SLOW_MO_FACTOR).abs() < 0.01, "ratio was {}", ratio);
}

#[test]
fn test_timers_use_capped_raw_dt() {
    let mut world = quiet_world();
    world.player.activate_effect(EffectKind::Shield);

    // A one-second hitch only advances gameplay by the frame cap, but the
    // effect clock still loses the timer cap
    world.update(1.0);

    let remaining = world.player.effects.remaining(EffectKind::Shield);
    assert!((remaining - (SHIELD_DURATION - 0.25)).abs() < 1e-4);
    assert!(world.time < 0.05);
}
