//! Shared types and constants
//!
//! Pure data structures used throughout the engine: game/presentation modes,
//! lifecycle phases, drop outcomes, discrete engine events, and the error
//! taxonomy. Nothing here depends on engine state.
//!
//! # Difficulty constants
//!
//! The difficulty curve is driven by a handful of literal constants
//! (see [`crate::difficulty`] for the functions that combine them):
//!
//! | Constant | Classic | Infinite |
//! |----------|---------|----------|
//! | speed increment per level | 0.15 | 0.10 |
//! | max speed | 6.0 | 4.5 |
//! | tolerance step | 0.3 per 3 levels | 0.2 per 5 levels |
//! | min tolerance | 0.5 | 0.8 |
//!
//! Speed starts at [`BASE_SPEED`] for both modes, alignment tolerance at
//! [`BASE_TOLERANCE`]. The grid presentation steps one column every
//! [`GRID_BASE_MOVE_INTERVAL`] seconds at level 0, shrinking by
//! [`GRID_MOVE_INTERVAL_STEP`] per level down to [`GRID_MIN_MOVE_INTERVAL`].

use serde::Serialize;

/// Number of columns in the grid presentation (fixed, LED-panel style)
pub const GRID_COLS: u8 = 7;

/// Base lateral speed at level 1 (units per tick, both modes)
pub const BASE_SPEED: f32 = 1.5;

/// Per-level speed increment in Classic mode
pub const CLASSIC_SPEED_INCREMENT: f32 = 0.15;

/// Per-level speed increment in Infinite mode (gentler curve)
pub const INFINITE_SPEED_INCREMENT: f32 = 0.10;

/// Speed cap in Classic mode
pub const CLASSIC_MAX_SPEED: f32 = 6.0;

/// Speed cap in Infinite mode
pub const INFINITE_MAX_SPEED: f32 = 4.5;

/// Alignment tolerance at level 1 (both modes)
pub const BASE_TOLERANCE: f32 = 2.0;

/// Tolerance reduction applied every 3 levels in Classic mode
pub const CLASSIC_TOLERANCE_STEP: f32 = 0.3;

/// Tolerance reduction applied every 5 levels in Infinite mode
pub const INFINITE_TOLERANCE_STEP: f32 = 0.2;

/// Tolerance floor in Classic mode
pub const CLASSIC_MIN_TOLERANCE: f32 = 0.5;

/// Tolerance floor in Infinite mode
pub const INFINITE_MIN_TOLERANCE: f32 = 0.8;

/// Seconds between grid steps at level 0
pub const GRID_BASE_MOVE_INTERVAL: f32 = 0.25;

/// Interval reduction per level (grid presentation)
pub const GRID_MOVE_INTERVAL_STEP: f32 = 0.015;

/// Fastest allowed grid step interval
pub const GRID_MIN_MOVE_INTERVAL: f32 = 0.08;

/// Overhang below this threshold still counts as a perfect stack.
///
/// Sub-unit rather than exact equality so floating-point jitter in the
/// continuous presentation cannot break a perfect streak.
pub const PERFECT_EPSILON: f32 = 1.0;

/// Continuous-mode speed units are "per tick" at a nominal 60 Hz; lateral
/// velocity in units/second is `speed * TICKS_PER_SECOND`.
pub const TICKS_PER_SECOND: f32 = 60.0;

/// The forced-drop counter fires every this many completed levels.
pub const FORCED_DROP_INTERVAL: u32 = 5;

/// Classic-mode level at which the minor prize triggers
pub const MINOR_PRIZE_LEVEL: u32 = 11;

/// Classic-mode level at which the major prize triggers
pub const MAJOR_PRIZE_LEVEL: u32 = 15;

/// Session mode: fixed-height run with prizes, or endless climb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameMode {
    Classic,
    Infinite,
}

impl GameMode {
    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "infinite" => Some(GameMode::Infinite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Infinite => "infinite",
        }
    }
}

/// Presentation geometry: continuous-position blocks or discrete grid cells.
///
/// One engine serves both; only the moving-block controller and the
/// playfield storage differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Geometry {
    Continuous,
    Grid,
}

impl Geometry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Geometry::Continuous => "continuous",
            Geometry::Grid => "grid",
        }
    }
}

/// Engine lifecycle phase.
///
/// `AwaitingFirstBlock -> NormalPlay -> (GameOver | Won)`. `Won` is the
/// Classic-mode success terminal: same stats shape as `GameOver`, distinct
/// signal for the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    AwaitingFirstBlock,
    NormalPlay,
    GameOver,
    Won,
}

impl Phase {
    /// Terminal phases accept no further drops or ticks.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver | Phase::Won)
    }
}

/// Pending prize, set on exact level-threshold crossings in Classic mode.
///
/// A non-`None` prize must be acknowledged (collected) before another
/// threshold can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrizeState {
    None,
    MinorPrize,
    MajorPrize,
}

/// Result of a single `drop()` resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DropOutcome {
    /// Block landed with a non-perfect overlap (or was the base block).
    Placed,
    /// Block landed within the perfect-stack threshold on both sides.
    PlacedPerfect,
    /// Zero overlap, but an extra life was consumed; the block was restored
    /// to exactly match the row below.
    RescuedByExtraLife,
    /// Zero overlap and no extra life available.
    GameOver,
    /// Classic mode: the final row was placed successfully.
    Won,
}

/// The four tallies reported once per session at termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    pub score: u32,
    pub blocks_placed: u32,
    pub perfect_stacks: u32,
    pub highest_combo: u32,
}

/// Discrete events emitted by `drop()`/`advance()`, drained by the host.
///
/// This replaces implicit field-change notification: the host reacts to
/// events rather than watching mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EngineEvent {
    BlockPlaced {
        perfect: bool,
        combo: u32,
        score_delta: u32,
    },
    Rescued,
    PrizeTriggered(PrizeState),
    GridExpanded {
        added_rows: usize,
    },
    SessionEnded {
        won: bool,
        stats: SessionStats,
    },
}

/// Caller-contract violations.
///
/// These are programming errors in the host, reported as an `Err` plus a
/// `warn` log; engine state is left untouched. Deterministic game outcomes
/// (game over, exhausted extra life) are *not* errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// `drop()`/`advance()` on a terminal or not-yet-started engine, or
    /// while paused.
    InvalidTransition,
    /// `acknowledge_prize()` with no prize pending.
    NoPrizePending,
}

impl EngineError {
    pub fn code(self) -> &'static str {
        match self {
            EngineError::InvalidTransition => "invalid_transition",
            EngineError::NoPrizePending => "no_prize_pending",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            EngineError::InvalidTransition => "operation not valid in the current phase",
            EngineError::NoPrizePending => "acknowledge_prize called with no prize pending",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_strings() {
        assert_eq!(GameMode::from_str("classic"), Some(GameMode::Classic));
        assert_eq!(GameMode::from_str("INFINITE"), Some(GameMode::Infinite));
        assert_eq!(GameMode::from_str("endless"), None);
        assert_eq!(GameMode::Classic.as_str(), "classic");
    }

    #[test]
    fn terminal_phases() {
        assert!(!Phase::AwaitingFirstBlock.is_terminal());
        assert!(!Phase::NormalPlay.is_terminal());
        assert!(Phase::GameOver.is_terminal());
        assert!(Phase::Won.is_terminal());
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(EngineError::InvalidTransition.code(), "invalid_transition");
        assert_eq!(EngineError::NoPrizePending.code(), "no_prize_pending");
    }
}
