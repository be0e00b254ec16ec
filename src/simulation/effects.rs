//! Power-up effect timers, boost ramping and the boost energy economy

/// Seconds a boost lasts
pub const BOOST_DURATION: f32 = 5.0;
/// Seconds a shield lasts
pub const SHIELD_DURATION: f32 = 7.0;
/// Seconds a magnet lasts
pub const MAGNET_DURATION: f32 = 5.0;
/// Seconds slow motion lasts
pub const SLOW_MO_DURATION: f32 = 5.0;

/// Speed factor the boost ramps towards while active
pub const BOOST_FACTOR: f32 = 1.8;
/// Speed factor applied while slow motion is active
pub const SLOW_MO_FACTOR: f32 = 0.5;
/// How fast the current boost factor approaches its target, per second
pub const BOOST_RAMP_RATE: f32 = 1.2;

pub const MAX_BOOST_ENERGY: f32 = 100.0;
/// Energy spent to trigger a boost
pub const BOOST_ENERGY_COST: f32 = 30.0;
/// Passive regeneration per second
pub const BOOST_ENERGY_REGEN: f32 = 10.0;
/// Energy per meter travelled
pub const BOOST_ENERGY_PER_METER: f32 = 0.05;
/// Energy per coin collected
pub const BOOST_ENERGY_PER_COIN: f32 = 5.0;

/// The four timed effects a car can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Boost,
    Shield,
    Magnet,
    SlowMo,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Boost,
        EffectKind::Shield,
        EffectKind::Magnet,
        EffectKind::SlowMo,
    ];

    pub fn duration(self) -> f32 {
        match self {
            EffectKind::Boost => BOOST_DURATION,
            EffectKind::Shield => SHIELD_DURATION,
            EffectKind::Magnet => MAGNET_DURATION,
            EffectKind::SlowMo => SLOW_MO_DURATION,
        }
    }

    fn index(self) -> usize {
        match self {
            EffectKind::Boost => 0,
            EffectKind::Shield => 1,
            EffectKind::Magnet => 2,
            EffectKind::SlowMo => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectState {
    pub active: bool,
    pub remaining: f32,
    pub duration: f32,
}

impl EffectState {
    fn inactive(duration: f32) -> Self {
        Self {
            active: false,
            remaining: 0.0,
            duration,
        }
    }
}

/// One timer slot per [`EffectKind`]
#[derive(Debug, Clone)]
pub struct EffectTimers {
    slots: [EffectState; 4],
}

impl Default for EffectTimers {
    fn default() -> Self {
        Self {
            slots: EffectKind::ALL.map(|kind| EffectState::inactive(kind.duration())),
        }
    }
}

impl EffectTimers {
    pub fn get(&self, kind: EffectKind) -> &EffectState {
        &self.slots[kind.index()]
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.get(kind).active
    }

    pub fn remaining(&self, kind: EffectKind) -> f32 {
        self.get(kind).remaining
    }

    /// Start `kind`, or restart it at full duration if it is already running.
    /// Returns true if the effect was not active before.
    pub fn activate(&mut self, kind: EffectKind) -> bool {
        let slot = &mut self.slots[kind.index()];
        let was_active = slot.active;
        slot.active = true;
        slot.remaining = slot.duration;
        !was_active
    }

    pub fn deactivate(&mut self, kind: EffectKind) {
        let slot = &mut self.slots[kind.index()];
        slot.active = false;
        slot.remaining = 0.0;
    }

    /// Count every active timer down by `dt`. Returns the effects that expired.
    pub fn tick(&mut self, dt: f32) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        for kind in EffectKind::ALL {
            let slot = &mut self.slots[kind.index()];
            if !slot.active {
                continue;
            }
            slot.remaining -= dt;
            if slot.remaining <= 0.0 {
                slot.remaining = 0.0;
                slot.active = false;
                expired.push(kind);
            }
        }
        expired
    }

    pub fn active_kinds(&self) -> impl Iterator<Item = EffectKind> + '_ {
        EffectKind::ALL
            .into_iter()
            .filter(move |kind| self.is_active(*kind))
    }
}

/// Smoothly approaches the boost target instead of jumping to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostRamp {
    pub current: f32,
    pub target: f32,
}

impl Default for BoostRamp {
    fn default() -> Self {
        Self {
            current: 1.0,
            target: 1.0,
        }
    }
}

impl BoostRamp {
    pub fn engage(&mut self) {
        self.target = BOOST_FACTOR;
    }

    pub fn release(&mut self) {
        self.target = 1.0;
    }

    pub fn update(&mut self, dt: f32) {
        let max_step = BOOST_RAMP_RATE * dt;
        let diff = self.target - self.current;
        if diff.abs() <= max_step {
            self.current = self.target;
        } else {
            self.current += max_step.copysign(diff);
        }
    }
}

/// Stored energy that can be spent on a boost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostEnergy {
    value: f32,
}

impl Default for BoostEnergy {
    fn default() -> Self {
        Self { value: 0.0 }
    }
}

impl BoostEnergy {
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, MAX_BOOST_ENERGY),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn gain(&mut self, amount: f32) {
        self.value = (self.value + amount).clamp(0.0, MAX_BOOST_ENERGY);
    }

    pub fn regenerate(&mut self, dt: f32, meters_travelled: f32) {
        self.gain(BOOST_ENERGY_REGEN * dt + BOOST_ENERGY_PER_METER * meters_travelled);
    }

    /// Spend one boost worth of energy if there is enough
    pub fn try_spend(&mut self) -> bool {
        if self.value >= BOOST_ENERGY_COST {
            self.value -= BOOST_ENERGY_COST;
            true
        } else {
            false
        }
    }
}
