//! Box overlap tests and the coin magnet

use super::types::{Bounds, Position};

/// Coins closer than this to the player are pulled in while the magnet runs
pub const MAGNET_RADIUS: f32 = 150.0;
/// Pull speed per unit of remaining distance, per second
pub const MAGNET_PULL_GAIN: f32 = 6.0;
/// Upper bound on pull speed, units per second
pub const MAGNET_MAX_PULL_SPEED: f32 = 600.0;

/// Two boxes collide when they overlap on both axes
pub fn collides(a: &Bounds, b: &Bounds) -> bool {
    let dx = (a.center.x - b.center.x).abs();
    let dy = (a.center.y - b.center.y).abs();
    dx < (a.width + b.width) / 2.0 && dy < (a.height + b.height) / 2.0
}

/// Move `coin` towards `target` if it is inside the magnet radius.
/// Returns true if the coin was pulled.
pub fn magnet_pull(coin: &mut Position, target: &Position, dt: f32) -> bool {
    let distance = coin.distance(target);
    if distance >= MAGNET_RADIUS || distance <= f32::EPSILON {
        return false;
    }
    let speed = (distance * MAGNET_PULL_GAIN).min(MAGNET_MAX_PULL_SPEED);
    let step = (speed * dt).min(distance);
    coin.x += (target.x - coin.x) / distance * step;
    coin.y += (target.y - coin.y) / distance * step;
    true
}
