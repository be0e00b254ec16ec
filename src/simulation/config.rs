//! Simulation configuration
//!
//! Screen size and lane geometry live here instead of in global state. The
//! geometry fields are private so the derived lane table is always rebuilt
//! together with them, through [`SimulationConfig::new`],
//! [`SimulationConfig::with_lane_count`] or [`SimulationConfig::resize`].

use anyhow::{bail, Result};

use super::types::CAR_WIDTH;

/// Canonical lane count
pub const DEFAULT_LANE_COUNT: usize = 8;

/// Largest frame step the simulation accepts (seconds)
pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

/// Largest step effect timers accept (seconds)
pub const MAX_TIMER_DT: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    screen_width: f32,
    screen_height: f32,
    lane_count: usize,
    /// Scroll speed in screen units per second at 1x speed factor
    pub base_speed: f32,
    /// Fractional speed increase per kilometre travelled (0 disables the ramp)
    pub speed_ramp_per_km: f32,
    /// Upper bound on `dt` passed to the gameplay phases
    pub max_dt: f32,
    pub max_obstacles: usize,
    pub max_rivals: usize,
    pub max_coins: usize,
    /// Band at the top of the field checked for lane occupancy when spawning
    pub spawn_safety_distance: f32,
    pub spawning_enabled: bool,
    pub seed: Option<u64>,
    lane_width: f32,
    lane_positions: Vec<f32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(800.0, 800.0, DEFAULT_LANE_COUNT)
    }
}

impl SimulationConfig {
    pub fn new(screen_width: f32, screen_height: f32, lane_count: usize) -> Self {
        let mut config = Self {
            screen_width,
            screen_height,
            lane_count,
            base_speed: 300.0,
            speed_ramp_per_km: 0.25,
            max_dt: MAX_FRAME_DT,
            max_obstacles: 2,
            max_rivals: 2,
            max_coins: 6,
            spawn_safety_distance: 200.0,
            spawning_enabled: true,
            seed: None,
            lane_width: 0.0,
            lane_positions: Vec::new(),
        };
        config.recompute_lanes();
        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Same screen, different number of lanes
    pub fn with_lane_count(mut self, lane_count: usize) -> Self {
        self.lane_count = lane_count;
        self.recompute_lanes();
        self
    }

    pub fn with_spawning(mut self, enabled: bool) -> Self {
        self.spawning_enabled = enabled;
        self
    }

    /// Check that the geometry can host the simulation
    pub fn validate(&self) -> Result<()> {
        if self.lane_count == 0 {
            bail!("lane count must be at least 1");
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            bail!(
                "screen dimensions must be positive, got {}x{}",
                self.screen_width,
                self.screen_height
            );
        }
        if self.lane_width() < CAR_WIDTH {
            bail!(
                "lanes are {:.1} units wide, narrower than a car ({:.1})",
                self.lane_width(),
                CAR_WIDTH
            );
        }
        if self.max_dt <= 0.0 {
            bail!("max_dt must be positive");
        }
        Ok(())
    }

    /// Change the screen size and rebuild the lane table
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        let previous = (self.screen_width, self.screen_height);
        self.screen_width = width;
        self.screen_height = height;
        self.recompute_lanes();
        if let Err(err) = self.validate() {
            self.screen_width = previous.0;
            self.screen_height = previous.1;
            self.recompute_lanes();
            return Err(err);
        }
        Ok(())
    }

    fn recompute_lanes(&mut self) {
        self.lane_width = if self.lane_count > 0 {
            self.screen_width / self.lane_count as f32
        } else {
            0.0
        };
        self.lane_positions = (0..self.lane_count)
            .map(|i| self.lane_width * i as f32 + self.lane_width / 2.0)
            .collect();
    }

    pub fn screen_width(&self) -> f32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> f32 {
        self.screen_height
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn lane_width(&self) -> f32 {
        self.lane_width
    }

    /// Horizontal centre of lane `lane`. Out-of-range lanes clamp to the edge.
    pub fn lane_position(&self, lane: usize) -> f32 {
        let last = self.lane_count.saturating_sub(1);
        self.lane_positions
            .get(lane.min(last))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn lane_positions(&self) -> &[f32] {
        &self.lane_positions
    }

    /// Lane whose centre is nearest to `x`
    pub fn lane_at(&self, x: f32) -> usize {
        if self.lane_width <= 0.0 {
            return 0;
        }
        let lane = (x / self.lane_width).floor();
        (lane.max(0.0) as usize).min(self.lane_count.saturating_sub(1))
    }

    /// Vertical screen position the player car is pinned to
    pub fn player_y(&self) -> f32 {
        self.screen_height - 150.0
    }
}
