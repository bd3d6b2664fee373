// src/common/tracking.rs

use rand::Rng;

/// Exclusive upper bound of the tracking number space.
pub const TRACKING_NUMBER_SPACE: u32 = 1_000_000;

/// Draws a public tracking number uniformly from `[0, 1_000_000)` and
/// renders it as a plain decimal string, no zero padding. Uniqueness is the
/// caller's job.
pub fn generate_tracking_number() -> String {
    rand::thread_rng().gen_range(0..TRACKING_NUMBER_SPACE).to_string()
}
