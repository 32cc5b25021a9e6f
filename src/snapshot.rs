//! Read-only snapshot of engine state
//!
//! Built on demand for hosts that want to render or serialize the whole
//! state instead of reacting to discrete events.

use serde::Serialize;

use crate::engine::Block;
use crate::grid::Row;
use crate::types::{GameMode, Geometry, Phase, PrizeState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color_index: u8,
}

impl From<&Block> for BlockSnapshot {
    fn from(value: &Block) -> Self {
        Self {
            id: value.id,
            x: value.x,
            y: value.y,
            width: value.width,
            height: value.height,
            color_index: value.color_index,
        }
    }
}

/// The in-flight block's extent, per presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MoverSnapshot {
    Continuous { x: f32, width: f32 },
    Grid { columns: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub geometry: Geometry,
    pub mode: GameMode,
    pub phase: Phase,
    pub level: u32,
    pub blocks_per_row: u8,
    pub speed: f32,
    pub alignment_tolerance: f32,
    pub score: u32,
    pub combo: u32,
    pub prize_state: PrizeState,
    pub forced_drop_pending: bool,
    /// Placed blocks, bottom first (continuous presentation only).
    pub stack: Vec<BlockSnapshot>,
    /// Lit-cell rows (grid presentation only).
    pub grid_rows: Vec<Row>,
    pub current_row: usize,
    pub moving: Option<MoverSnapshot>,
}
