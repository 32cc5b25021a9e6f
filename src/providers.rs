//! External collaborator interfaces
//!
//! The engine takes these as explicit dependencies instead of reaching for
//! process-wide singletons, so a test can hand it trivial fakes. Power-up
//! state is owned externally (activation and expiry are time-based in the
//! host); the engine queries it at the moment of use and never caches the
//! answers across ticks.

use crate::types::SessionStats;

/// Source of consumable and timed power-up effects.
pub trait PowerUpProvider {
    /// Whether an extra-life charge is available right now.
    fn has_extra_life(&self) -> bool;

    /// Consume one extra-life charge. Returning `false` (nothing left to
    /// consume) routes the drop to game over; it is not an error.
    fn consume_extra_life(&mut self) -> bool;

    /// Multiplier applied to lateral speed / step rate. 1.0 = no effect.
    fn speed_multiplier(&self) -> f32;

    /// Multiplier the currency collaborator applies to prize coins. The
    /// engine itself only ever reports base amounts.
    fn coin_multiplier(&self) -> f32;
}

/// Receives coin awards when a prize is collected.
pub trait CurrencyLedger {
    fn award(&mut self, amount: u32);
}

/// Receives the final tallies once per session at termination.
pub trait StatsRecorder {
    fn record_game(&mut self, stats: &SessionStats);
}

/// Provider with no power-ups at all; useful as a default and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPowerUps;

impl PowerUpProvider for NoPowerUps {
    fn has_extra_life(&self) -> bool {
        false
    }

    fn consume_extra_life(&mut self) -> bool {
        false
    }

    fn speed_multiplier(&self) -> f32 {
        1.0
    }

    fn coin_multiplier(&self) -> f32 {
        1.0
    }
}
