//! Core types for the lane simulation
//!
//! These are standalone types that don't depend on Bevy. Screen space has its
//! origin in the top-left corner with `y` growing towards the bottom, so
//! everything that scrolls "past" the player moves towards larger `y`.

/// A unique identifier for simulation entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for rival car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RivalId(pub SimId);

/// A wrapper type for obstacle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleId(pub SimId);

/// A wrapper type for pickup IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickupId(pub SimId);

/// A 2D position in screen units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned box centred on `center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Position,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(center: Position, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }
}

/// Body style of a rival car. Only the height differs in gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarKind {
    Sedan,
    Suv,
    Truck,
}

/// Per-kind body data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarBody {
    pub height_multiplier: f32,
    pub wheel_count: u8,
}

impl CarKind {
    pub const ALL: [CarKind; 3] = [CarKind::Sedan, CarKind::Suv, CarKind::Truck];

    pub fn body(self) -> CarBody {
        match self {
            CarKind::Sedan => CarBody {
                height_multiplier: 1.0,
                wheel_count: 4,
            },
            CarKind::Suv => CarBody {
                height_multiplier: 1.15,
                wheel_count: 4,
            },
            CarKind::Truck => CarBody {
                height_multiplier: 1.4,
                wheel_count: 6,
            },
        }
    }

    pub fn height(self) -> f32 {
        CAR_HEIGHT * self.body().height_multiplier
    }
}

/// Cosmetic obstacle look. No gameplay difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Cone,
    Barrier,
    Pothole,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Cone, ObstacleKind::Barrier, ObstacleKind::Pothole];
}

/// Width of every car (player and rivals) in screen units
pub const CAR_WIDTH: f32 = 50.0;

/// Base height of a car before the body-kind multiplier
pub const CAR_HEIGHT: f32 = 90.0;

/// Obstacle footprint (square)
pub const OBSTACLE_SIZE: f32 = 50.0;

/// Pickup footprint (square)
pub const PICKUP_SIZE: f32 = 30.0;

/// Distance in meters represented by one screen unit of scrolling
pub const METERS_PER_UNIT: f32 = 0.1;
