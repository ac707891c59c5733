use ndarray::Array2;

use crate::*;
pub use bernoulli::*;

mod bernoulli;

/// Strategy arming the cells of a freshly allocated board.
pub trait MinefieldGenerator {
    /// Arms up to `total_mines` cells and returns how many were armed.
    fn lay_mines(
        self,
        cells: &mut Array2<Cell>,
        density: f64,
        total_mines: CellCount,
    ) -> CellCount;
}
