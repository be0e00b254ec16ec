use std::process::{Command, Output};

fn run_headless(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lane_rush"))
        .args(args)
        .env("RUST_LOG", "warn,lane_rush=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&["--ticks", "600", "--seed", "7"]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SESSION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
}

/// Test that the session summary is logged
#[test]
fn test_session_summary_logged() {
    let output = run_headless(&["--ticks", "300", "--seed", "7", "--mode", "time-attack"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    for key in ["Score:", "Distance:", "Coins:", "End reason:", "Mode: time_attack"] {
        assert!(stderr.contains(key), "Missing '{}' in output", key);
    }
}

/// Test that a short race runs to the finish line
#[test]
fn test_headless_race_finishes() {
    let output = run_headless(&[
        "--mode",
        "race",
        "--race-length",
        "50",
        "--opponents",
        "2",
        "--ticks",
        "3600",
        "--seed",
        "3",
    ]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Race started"), "Race never started");
    assert!(
        stderr.contains("End reason: RaceFinished"),
        "Race did not finish. stderr: {}",
        stderr
    );
}

/// Test that the text map is printed when requested
#[test]
fn test_map_output() {
    let output = run_headless(&["--ticks", "60", "--seed", "1", "--map"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Legend:"));
    assert!(stdout.contains('^'));
}

/// Test that bad arguments are rejected
#[test]
fn test_unknown_mode_fails() {
    let output = run_headless(&["--mode", "arcade"]);
    assert!(!output.status.success());
}

/// Test that the mode and mission values are checked and listed in --help
#[test]
fn test_mode_values_listed_in_help() {
    let output = run_headless(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for value in ["endless", "time-attack", "mission", "race", "coins", "dodge"] {
        assert!(stdout.contains(value), "--help does not list '{}'", value);
    }

    let output = run_headless(&["--mode", "mission", "--mission", "laps"]);
    assert!(!output.status.success());

    let output = run_headless(&["--ticks", "60", "--seed", "2", "--mode", "mission", "--mission", "dodge"]);
    assert!(output.status.success(), "Simulation failed to run");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Mode: mission"));
}
