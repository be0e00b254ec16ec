//! Outgoing gameplay events
//!
//! The core never plays sounds or touches the UI. It queues events instead and
//! the caller drains them once per frame.

use super::effects::EffectKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Terminal collision at the given screen position
    Crash { x: f32, y: f32 },
    /// An active shield destroyed a hazard
    ShieldBlock,
    CoinCollected,
    PowerUpActivated(EffectKind),
    PowerUpDeactivated(EffectKind),
    /// Boost bought with stored energy
    BoostEnergyUsed,
    ComboMultiplierChanged(u32),
    MissionComplete,
    TimeUp,
    RaceStarted,
    PlayerFinishedRace { rank: usize },
    RaceFinished,
}

/// Queue of events produced during `update`
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
