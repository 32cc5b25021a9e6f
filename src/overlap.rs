//! Overlap calculator - pure geometry
//!
//! Computes how a dropped block relates to the block beneath it: the
//! overlapping region plus the overhang sticking out on each side. The same
//! semantics serve both presentations; the grid variant treats column
//! indices as unit-width cells and uses set intersection instead of
//! interval math.

use arrayvec::ArrayVec;

use crate::types::{GRID_COLS, PERFECT_EPSILON};

/// Result of intersecting a moving extent with the target beneath it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Left edge of the overlapping region (meaningful when `width > 0`).
    pub start: f32,
    /// Width of the overlapping region; zero means a complete miss.
    pub width: f32,
    /// How far the moving block sticks out past the target's left edge.
    pub left_overhang: f32,
    /// How far the moving block sticks out past the target's right edge.
    pub right_overhang: f32,
}

impl Overlap {
    /// Near-zero overhang on both sides.
    ///
    /// Sub-unit threshold rather than exact equality, so floating-point
    /// jitter in the oscillation cannot spoil an aligned drop.
    pub fn is_perfect(&self) -> bool {
        self.left_overhang < PERFECT_EPSILON && self.right_overhang < PERFECT_EPSILON
    }

    /// No overlapping region at all.
    pub fn is_miss(&self) -> bool {
        self.width <= 0.0
    }
}

/// Intersect the moving block's horizontal extent with the target block's.
pub fn overlap(
    moving_start: f32,
    moving_width: f32,
    target_start: f32,
    target_width: f32,
) -> Overlap {
    let moving_end = moving_start + moving_width;
    let target_end = target_start + target_width;

    let start = moving_start.max(target_start);
    let end = moving_end.min(target_end);

    Overlap {
        start,
        width: (end - start).max(0.0),
        left_overhang: (target_start - moving_start).max(0.0),
        right_overhang: (moving_end - target_end).max(0.0),
    }
}

/// Grid-mode equivalent: the column indices lit in both runs.
///
/// Inputs are sorted ascending (runs are contiguous); the intersection
/// preserves that order.
pub fn column_overlap(moving: &[u8], below: &[u8]) -> ArrayVec<u8, { GRID_COLS as usize }> {
    let mut out = ArrayVec::new();
    for &col in moving {
        if below.contains(&col) {
            out.push(col);
        }
    }
    out
}

/// Grid-mode perfect alignment: exact index-set equality with the row below.
pub fn columns_match(a: &[u8], b: &[u8]) -> bool {
    a == b
}
