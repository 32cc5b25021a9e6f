//! Difficulty curve - pure functions of (level, mode)
//!
//! Level is 1-based. Classic mode ramps harder and caps higher; Infinite
//! mode is the more forgiving curve of the two. All functions here are
//! deterministic and side-effect-free so they can be tested against literal
//! level inputs.

use crate::types::*;

/// How many blocks wide the moving row is at a given level.
///
/// Non-increasing step function of level; it never grows back within a run.
pub fn blocks_per_row(level: u32, mode: GameMode) -> u8 {
    match mode {
        GameMode::Classic => match level {
            0..=3 => 3,
            4..=9 => 2,
            _ => 1,
        },
        GameMode::Infinite => match level {
            0..=5 => 3,
            6..=15 => 2,
            _ => 1,
        },
    }
}

/// Lateral speed (units per tick) at a given level, capped per mode.
pub fn speed(level: u32, mode: GameMode) -> f32 {
    let (increment, max_speed) = match mode {
        GameMode::Classic => (CLASSIC_SPEED_INCREMENT, CLASSIC_MAX_SPEED),
        GameMode::Infinite => (INFINITE_SPEED_INCREMENT, INFINITE_MAX_SPEED),
    };
    let multiplier = 1.0 + (level.saturating_sub(1)) as f32 * increment;
    (BASE_SPEED * multiplier).min(max_speed)
}

/// Alignment tolerance at a given level, floored per mode.
///
/// Exposed as observable state for the host; the perfect-stack check itself
/// uses the fixed [`PERFECT_EPSILON`] threshold.
pub fn alignment_tolerance(level: u32, mode: GameMode) -> f32 {
    let (step, steps_every, min_tolerance) = match mode {
        GameMode::Classic => (CLASSIC_TOLERANCE_STEP, 3, CLASSIC_MIN_TOLERANCE),
        GameMode::Infinite => (INFINITE_TOLERANCE_STEP, 5, INFINITE_MIN_TOLERANCE),
    };
    let reduction = (level / steps_every) as f32 * step;
    (BASE_TOLERANCE - reduction).max(min_tolerance)
}

/// Seconds between discrete lateral steps in the grid presentation.
pub fn grid_move_interval(level: u32) -> f32 {
    (GRID_BASE_MOVE_INTERVAL - level as f32 * GRID_MOVE_INTERVAL_STEP).max(GRID_MIN_MOVE_INTERVAL)
}

/// Grid step interval after applying the power-up speed multiplier.
///
/// The multiplier comes from the external power-up provider at the moment
/// of use; a multiplier above 1 means faster stepping. Non-positive
/// multipliers are ignored rather than producing a frozen or negative
/// interval.
pub fn scaled_grid_move_interval(level: u32, speed_multiplier: f32) -> f32 {
    let base = grid_move_interval(level);
    if speed_multiplier > 0.0 {
        base / speed_multiplier
    } else {
        base
    }
}
