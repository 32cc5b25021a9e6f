//! Engine configuration
//!
//! All tunable geometry, scoring and prize numbers live here so the host can
//! reskin the game without touching engine code. Defaults reproduce the
//! shipped arcade balance.

use serde::{Deserialize, Serialize};

/// Tunable parameters for a [`crate::StackEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Horizontal extent of the playfield (continuous presentation).
    pub screen_width: f32,
    /// Margin kept clear on both sides of the travel range.
    pub screen_padding: f32,
    /// Width of a fresh 3-block row before any shrinkage.
    pub base_block_width: f32,
    /// Chopped blocks never get narrower than this.
    pub min_block_width: f32,
    /// Height of every placed block.
    pub block_height: f32,
    /// Palette size the host maps `color_index` into.
    pub color_count: u8,
    /// Points for an ordinary placement.
    pub normal_stack_score: u32,
    /// Points for a perfect placement.
    pub perfect_stack_bonus: u32,
    /// Coins awarded when the minor prize is collected.
    pub minor_prize_coins: u32,
    /// Coins awarded when the major prize is collected.
    pub major_prize_coins: u32,
    /// Rows in a Classic session; placing the last one wins.
    pub classic_rows: usize,
    /// Rows an Infinite session starts with.
    pub infinite_initial_rows: usize,
    /// Expansion triggers when the current row is within this many rows of
    /// the grid's capacity.
    pub expansion_margin: usize,
    /// Rows added per expansion.
    pub expansion_rows: usize,
}

impl EngineConfig {
    /// Inclusive travel range for a moving block of the given width.
    pub fn travel_bounds(&self, width: f32) -> (f32, f32) {
        let min_x = self.screen_padding;
        let max_x = (self.screen_width - self.screen_padding - width).max(min_x);
        (min_x, max_x)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen_width: 400.0,
            screen_padding: 16.0,
            base_block_width: 150.0,
            min_block_width: 12.0,
            block_height: 30.0,
            color_count: 6,
            normal_stack_score: 1,
            perfect_stack_bonus: 3,
            minor_prize_coins: 50,
            major_prize_coins: 150,
            classic_rows: 15,
            infinite_initial_rows: 20,
            expansion_margin: 5,
            expansion_rows: 20,
        }
    }
}
