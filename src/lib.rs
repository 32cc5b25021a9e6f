//! Stacker game engine - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation
//! logic of a Stacker-style block-stacking game. It has **zero dependencies**
//! on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same input sequence produces identical runs
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation hot paths for the advance/drop cycle
//!
//! # Module Structure
//!
//! - [`engine`]: The [`StackEngine`] state machine driving a whole run
//! - [`session`]: Level progression, prize thresholds, forced-drop cadence
//! - [`difficulty`]: The curve mapping level and mode to speed and block count
//! - [`overlap`]: Overlap resolution between a dropped block and the stack top
//! - [`mover`]: Lateral movement of the in-flight block, both presentations
//! - [`grid`]: Lit-cell matrix backing the grid presentation
//! - [`config`]: Tunable geometry and scoring parameters
//! - [`providers`]: Traits the host implements for power-ups, coins, stats
//! - [`snapshot`]: Serializable read-only view of the full engine state
//! - [`types`]: Shared enums, constants, events, and errors
//!
//! # Game Rules
//!
//! - **Two presentations**: continuous pixel positions or a 7-column lit-cell
//!   grid; both run the same progression and scoring rules
//! - **Two modes**: Classic ends in a win after 15 placed rows and pays out
//!   prizes at fixed levels; Infinite never wins and expands its grid instead
//! - **Placement**: a dropped block keeps only the part overlapping the row
//!   below; hanging past both edges by less than one unit counts as perfect
//! - **Combo**: consecutive perfect placements raise the combo counter and
//!   the score bonus; any imperfect placement resets it
//! - **Extra life**: a complete miss consumes an extra-life charge, when one
//!   is available, and replays the row instead of ending the game
//!
//! # Example
//!
//! ```
//! use stacker_core::{DropOutcome, EngineConfig, GameMode, Geometry, NoPowerUps, StackEngine};
//!
//! let mut engine = StackEngine::new(
//!     Geometry::Continuous,
//!     GameMode::Classic,
//!     EngineConfig::default(),
//!     NoPowerUps,
//! );
//! engine.start();
//!
//! // Let the block travel a little, then drop it.
//! engine.advance(0.05).unwrap();
//! let outcome = engine.drop().unwrap();
//!
//! // The first drop always lands and advances the level.
//! assert_eq!(outcome, DropOutcome::Placed);
//! assert_eq!(engine.level(), 2);
//! ```
//!
//! # Timing
//!
//! The engine is advanced with wall-clock seconds and internally scales
//! speeds against a 60 Hz reference tick:
//! - **Continuous**: lateral speed is `speed * 60` units per second
//! - **Grid**: one column step every `max(0.08, 0.25 - level * 0.015)` seconds
//! - **Power-ups**: the speed multiplier is read on every call, never cached
//!
//! Call [`StackEngine::advance`] every frame with elapsed time.

pub mod config;
pub mod difficulty;
pub mod engine;
pub mod grid;
pub mod mover;
pub mod overlap;
pub mod providers;
pub mod session;
pub mod snapshot;
pub mod types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use engine::{Block, StackEngine};
pub use overlap::{column_overlap, overlap, Overlap};
pub use providers::{CurrencyLedger, NoPowerUps, PowerUpProvider, StatsRecorder};
pub use session::GameSession;
pub use snapshot::{BlockSnapshot, EngineSnapshot, MoverSnapshot};
pub use types::{
    DropOutcome, EngineError, EngineEvent, GameMode, Geometry, Phase, PrizeState, SessionStats,
};
