//! Two-parameter sensitivity grids

use serde::{Deserialize, Serialize};

use super::results::Estimate;

/// Number of perturbations along each axis (-2Δ, -Δ, 0, +Δ, +2Δ)
pub const GRID_POINTS: usize = 5;

/// One axis of a sensitivity grid, centred on the model's current parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridAxis {
    pub label: String,
    pub center: f64,
    pub step: f64,
}

impl GridAxis {
    #[must_use]
    pub fn new(label: impl Into<String>, center: f64, step: f64) -> Self {
        Self {
            label: label.into(),
            center,
            step,
        }
    }

    /// Symmetric perturbations around the centre, in ascending order for positive steps
    #[must_use]
    pub fn values(&self) -> [f64; GRID_POINTS] {
        [
            self.center - 2.0 * self.step,
            self.center - self.step,
            self.center,
            self.center + self.step,
            self.center + 2.0 * self.step,
        ]
    }
}

/// Valuation evaluated over the cross product of two parameter axes.
///
/// Cells are stored row-major: `cells[row * cols.len() + col]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityGrid {
    pub row_label: String,
    pub col_label: String,
    pub rows: Vec<f64>,
    pub cols: Vec<f64>,
    pub cells: Vec<Estimate>,
    /// Market price the cells are compared against, if any
    pub reference_price: Option<f64>,
}

impl SensitivityGrid {
    /// Cell at (row, col); `None` when out of range
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Estimate> {
        if row >= self.rows.len() || col >= self.cols.len() {
            return None;
        }
        self.cells.get(row * self.cols.len() + col).copied()
    }

    /// Centre cell, which reproduces the model at its current parameters
    #[must_use]
    pub fn center(&self) -> Option<Estimate> {
        self.cell(self.rows.len() / 2, self.cols.len() / 2)
    }

    /// Whether the cell value exceeds the reference price (an undervalued read).
    ///
    /// `None` when there is no reference price, the cell is out of range, or the
    /// cell is non-computable.
    #[must_use]
    pub fn is_above_reference(&self, row: usize, col: usize) -> Option<bool> {
        let price = self.reference_price?;
        let value = self.cell(row, col)?.value()?;
        Some(value > price)
    }

    /// Iterate over rows as slices of cells
    pub fn row_cells(&self) -> impl Iterator<Item = (f64, &[Estimate])> {
        self.rows
            .iter()
            .copied()
            .zip(self.cells.chunks(self.cols.len().max(1)))
    }
}
