//! Thread-local particle RNG and the random helpers field rules draw from

use orrery_core::{Color, Point};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_entropy());
}

/// Reseed this thread's generator. Headless renders use this to reproduce a run.
pub fn reseed(seed: u64) {
    RNG.with(|rng| *rng.borrow_mut() = SmallRng::seed_from_u64(seed));
}

/// Returns a float in [min, max). An empty range yields exactly `min`.
pub fn random_float(min: f64, max: f64) -> f64 {
    let unit: f64 = RNG.with(|rng| rng.borrow_mut().gen());
    (max - min) * unit + min
}

/// Returns an integer in [min, max], both ends inclusive
pub fn random_int(min: i64, max: i64) -> i64 {
    random_float(min as f64, max as f64 + 1.0).floor() as i64
}

/// A whole-pixel coordinate anywhere in `[0, width] × [0, height]`
pub fn random_coordinates(width: u32, height: u32) -> Point {
    Point::new(
        random_int(0, width as i64) as f64,
        random_int(0, height as i64) as f64,
    )
}

/// The default particle fill: a random red channel over cyan, 40% opaque
pub fn random_fill() -> Color {
    Color::rgba(random_int(0, 255) as u8, 255, 255, 0.4)
}
