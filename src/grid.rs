//! Grid playfield - boolean cell matrix for the grid presentation
//!
//! `rows x 7` lit-cell matrix plus the index of the row currently being
//! resolved. Infinite mode grows the matrix by splicing a batch of empty
//! rows in at index zero, which shifts every existing row index (and
//! `current_row`) by the batch size: any row index a caller cached before
//! the expansion is stale afterwards and must be recomputed.

use arrayvec::ArrayVec;

use crate::types::GRID_COLS;

/// One row of lit cells.
pub type Row = [bool; GRID_COLS as usize];

const EMPTY_ROW: Row = [false; GRID_COLS as usize];

/// Growable lit-cell matrix with a cursor for the row being resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<Row>,
    current_row: usize,
}

impl Grid {
    pub fn new(rows: usize) -> Self {
        Self {
            rows: vec![EMPTY_ROW; rows.max(1)],
            current_row: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn is_lit(&self, row: usize, col: u8) -> bool {
        self.rows
            .get(row)
            .map(|r| col < GRID_COLS && r[col as usize])
            .unwrap_or(false)
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// All rows, index 0 first.
    pub fn cells(&self) -> &[Row] {
        &self.rows
    }

    /// Lit column indices of a row, ascending.
    pub fn lit_columns(&self, row: usize) -> ArrayVec<u8, { GRID_COLS as usize }> {
        let mut out = ArrayVec::new();
        if let Some(r) = self.rows.get(row) {
            for (col, &lit) in r.iter().enumerate() {
                if lit {
                    out.push(col as u8);
                }
            }
        }
        out
    }

    /// Overwrite a row with exactly the given columns lit.
    pub fn paint_row(&mut self, row: usize, columns: &[u8]) {
        if let Some(r) = self.rows.get_mut(row) {
            *r = EMPTY_ROW;
            for &col in columns {
                if col < GRID_COLS {
                    r[col as usize] = true;
                }
            }
        }
    }

    pub fn clear_row(&mut self, row: usize) {
        if let Some(r) = self.rows.get_mut(row) {
            *r = EMPTY_ROW;
        }
    }

    /// Move the cursor to the next row after a successful placement.
    pub fn advance_row(&mut self) {
        self.current_row += 1;
    }

    /// True when the cursor is within `margin` rows of capacity.
    pub fn needs_expansion(&self, margin: usize) -> bool {
        self.current_row + margin >= self.rows.len()
    }

    /// Splice `added` empty rows in at index zero as one atomic step.
    ///
    /// Every existing row lands at its old index plus `added`, and
    /// `current_row` shifts with them.
    pub fn expand(&mut self, added: usize) {
        self.rows.splice(0..0, std::iter::repeat(EMPTY_ROW).take(added));
        self.current_row += added;
    }
}
