//! Moving-block controller
//!
//! Owns the oscillation of the in-flight block along the horizontal axis.
//! Two variants behind one tagged union: a continuous-position block that
//! slides across the screen, and a discrete run of grid columns that steps
//! one cell at a time. Advancing is the only mutating operation; reading
//! the current extent is side-effect-free.

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::types::{GRID_COLS, TICKS_PER_SECOND};

/// Column run storage, bounded by the grid width.
pub type ColumnRun = ArrayVec<u8, { GRID_COLS as usize }>;

/// Width of a fresh row given the level's block count and the width of the
/// block it will land on.
///
/// Three blocks get the base width, two get 90% and one gets 80%, but a new
/// row can never exceed the previous landed width (the shrink-only
/// invariant) nor fall below the minimum width.
pub fn width_for_row(blocks: u8, previous_width: f32, config: &EngineConfig) -> f32 {
    let base = config.base_block_width;
    let stepped = match blocks {
        3 => base,
        2 => base * 0.9,
        _ => base * 0.8,
    };
    stepped.min(previous_width).max(config.min_block_width)
}

/// Fixed-width block oscillating between the travel bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousMover {
    x: f32,
    width: f32,
    moving_right: bool,
}

impl ContinuousMover {
    /// Spawn at the left bound, moving right.
    pub fn new(width: f32, left_bound: f32) -> Self {
        Self {
            x: left_bound,
            width,
            moving_right: true,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Current horizontal extent as (left edge, width).
    pub fn extent(&self) -> (f32, f32) {
        (self.x, self.width)
    }

    /// Integrate lateral motion over `dt` seconds at `speed` units/tick,
    /// reversing direction at either bound.
    pub fn advance(&mut self, dt: f32, speed: f32, min_x: f32, max_x: f32) {
        let mut remaining = speed * TICKS_PER_SECOND * dt;
        if remaining <= 0.0 || max_x <= min_x {
            self.x = self.x.clamp(min_x, max_x.max(min_x));
            return;
        }

        // Reflect off the bounds until the travel budget is spent.
        while remaining > 0.0 {
            let room = if self.moving_right {
                max_x - self.x
            } else {
                self.x - min_x
            };
            if remaining <= room {
                self.x += if self.moving_right { remaining } else { -remaining };
                break;
            }
            self.x = if self.moving_right { max_x } else { min_x };
            self.moving_right = !self.moving_right;
            remaining -= room;
        }
    }
}

/// Contiguous run of lit columns stepping across the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMover {
    columns: ColumnRun,
    moving_right: bool,
    accumulator: f32,
}

impl GridMover {
    /// Spawn a run of `count` columns at the left edge, moving right.
    ///
    /// Direction is re-initialised here on every spawn rather than carried
    /// over from the previous row.
    pub fn new(count: u8) -> Self {
        let count = count.clamp(1, GRID_COLS);
        let mut columns = ColumnRun::new();
        for col in 0..count {
            columns.push(col);
        }
        Self {
            columns,
            moving_right: true,
            accumulator: 0.0,
        }
    }

    pub fn columns(&self) -> &[u8] {
        &self.columns
    }

    /// Shift the run one column, reversing at either grid edge.
    pub fn step(&mut self) {
        if self.columns.is_empty() {
            return;
        }
        let leftmost = self.columns[0];
        let rightmost = self.columns[self.columns.len() - 1];

        if self.moving_right && rightmost >= GRID_COLS - 1 {
            self.moving_right = false;
        } else if !self.moving_right && leftmost == 0 {
            self.moving_right = true;
        }

        for col in &mut self.columns {
            if self.moving_right {
                *col += 1;
            } else {
                *col -= 1;
            }
        }
    }

    /// Accumulate elapsed time and take as many steps as whole intervals
    /// have elapsed. Returns the number of steps taken.
    pub fn advance(&mut self, dt: f32, interval: f32) -> u32 {
        if interval <= 0.0 {
            return 0;
        }
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= interval {
            self.accumulator -= interval;
            self.step();
            steps += 1;
        }
        steps
    }
}
