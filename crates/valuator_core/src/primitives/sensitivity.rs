//! Sensitivity grid construction
//!
//! Evaluates a two-parameter valuation over the cross product of two
//! symmetric axes. Cells are evaluated in parallel when the `parallel`
//! feature is enabled; the resulting order is row-major either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::{Estimate, GridAxis, SensitivityGrid};

/// Axes and reference price for a sensitivity grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
    pub row: GridAxis,
    pub col: GridAxis,
    pub reference_price: Option<f64>,
}

/// Evaluate `valuation(row_value, col_value)` over every grid point
pub fn build_sensitivity_grid<F>(params: &GridParams, valuation: F) -> SensitivityGrid
where
    F: Fn(f64, f64) -> Estimate + Sync,
{
    let rows = params.row.values().to_vec();
    let cols = params.col.values().to_vec();
    let points: Vec<(f64, f64)> = rows
        .iter()
        .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
        .collect();

    #[cfg(feature = "parallel")]
    let cells: Vec<Estimate> = points.par_iter().map(|&(r, c)| valuation(r, c)).collect();

    #[cfg(not(feature = "parallel"))]
    let cells: Vec<Estimate> = points.iter().map(|&(r, c)| valuation(r, c)).collect();

    SensitivityGrid {
        row_label: params.row.label.clone(),
        col_label: params.col.label.clone(),
        rows,
        cols,
        cells,
        reference_price: params.reference_price,
    }
}
