//! Score, coins, combo and multiplier bookkeeping
//!
//! Every scoring event is paid at the multiplier in force before the event,
//! then advances the combo. The combo resets when no event arrives within
//! [`COMBO_WINDOW`] seconds.

use super::effects::EffectKind;
use super::entities::PickupKind;

/// Seconds without a scoring event before the combo resets
pub const COMBO_WINDOW: f32 = 2.0;
/// Combo needed for the 2x multiplier
pub const COMBO_TIER_2: u32 = 5;
/// Combo needed for the 3x multiplier
pub const COMBO_TIER_3: u32 = 10;

/// Flat score for an obstacle scrolling past
pub const OBSTACLE_PASS_SCORE: u32 = 1;
/// Rival pass score, scaled by the multiplier
pub const RIVAL_PASS_SCORE: u32 = 2;
/// Shield hits, scaled by the multiplier
pub const SHIELD_OBSTACLE_BONUS: u32 = 2;
pub const SHIELD_RIVAL_BONUS: u32 = 3;
/// Coin value, scaled by the multiplier
pub const COIN_SCORE: u32 = 5;

/// Combo steps per event type
pub const COMBO_STEP_PASS: u32 = 1;
pub const COMBO_STEP_PICKUP: u32 = 1;
pub const COMBO_STEP_SHIELD: u32 = 2;

/// Multiplier for a given combo count
pub fn multiplier_for(combo: u32) -> u32 {
    if combo >= COMBO_TIER_3 {
        3
    } else if combo >= COMBO_TIER_2 {
        2
    } else {
        1
    }
}

/// Score for collecting a pickup at the given multiplier
pub fn pickup_score(kind: PickupKind, multiplier: u32) -> u32 {
    match kind {
        PickupKind::Coin => COIN_SCORE * multiplier,
        PickupKind::PowerUp(EffectKind::Boost) => 10,
        PickupKind::PowerUp(EffectKind::Shield) => 15,
        PickupKind::PowerUp(EffectKind::Magnet) => 15,
        PickupKind::PowerUp(EffectKind::SlowMo) => 25,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: u32,
    pub coins: u32,
    pub combo: u32,
    pub multiplier: u32,
    /// Seconds left before the combo decays
    pub combo_timer: f32,
    /// Meters travelled
    pub distance: f32,
    /// Obstacles passed or shield-blocked
    pub obstacles_dodged: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            multiplier: 1,
            ..Default::default()
        }
    }

    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Advance the combo and restart the decay window
    pub fn register_combo_event(&mut self, step: u32) {
        self.combo += step;
        self.combo_timer = COMBO_WINDOW;
        self.multiplier = multiplier_for(self.combo);
    }

    pub fn pass_obstacle(&mut self) {
        self.add(OBSTACLE_PASS_SCORE);
        self.obstacles_dodged += 1;
        self.register_combo_event(COMBO_STEP_PASS);
    }

    pub fn pass_rival(&mut self) {
        self.add(RIVAL_PASS_SCORE * self.multiplier);
        self.register_combo_event(COMBO_STEP_PASS);
    }

    pub fn shield_block_obstacle(&mut self) {
        self.add(SHIELD_OBSTACLE_BONUS * self.multiplier);
        self.obstacles_dodged += 1;
        self.register_combo_event(COMBO_STEP_SHIELD);
    }

    pub fn shield_block_rival(&mut self) {
        self.add(SHIELD_RIVAL_BONUS * self.multiplier);
        self.register_combo_event(COMBO_STEP_SHIELD);
    }

    pub fn collect(&mut self, kind: PickupKind) {
        self.add(pickup_score(kind, self.multiplier));
        if kind == PickupKind::Coin {
            self.coins += 1;
        }
        self.register_combo_event(COMBO_STEP_PICKUP);
    }

    /// Count the decay window down
    pub fn update(&mut self, dt: f32) {
        if self.combo == 0 {
            return;
        }
        self.combo_timer -= dt;
        if self.combo_timer <= 0.0 {
            self.combo = 0;
            self.combo_timer = 0.0;
            self.multiplier = 1;
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Score: {} | Coins: {} | Combo: {} (x{}) | Distance: {:.0}m",
            self.score, self.coins, self.combo, self.multiplier, self.distance
        )
    }
}
