use super::*;

/// Places mines by independent per-cell trials with probability `density`, sweeping the whole board in row order
/// until the target count is armed. Low densities can take several sweeps.
#[derive(Clone, Debug, PartialEq)]
pub struct BernoulliGenerator {
    seed: u64,
}

impl BernoulliGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for BernoulliGenerator {
    fn lay_mines(
        self,
        cells: &mut Array2<Cell>,
        density: f64,
        total_mines: CellCount,
    ) -> CellCount {
        use rand::prelude::*;

        let total_cells: CellCount = cells.len().try_into().unwrap_or(CellCount::MAX);

        // optimize for full boards
        if total_mines >= total_cells {
            if total_mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    total_mines,
                    total_cells
                );
            }
            cells.iter_mut().for_each(Cell::arm);
            return total_cells;
        }

        // zero density would never arm anything
        let density = density.clamp(1.0 / f64::from(total_cells), 1.0);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut armed: CellCount = 0;
        let mut sweeps = 0u32;

        while armed < total_mines {
            sweeps += 1;
            for cell in cells.iter_mut() {
                if armed >= total_mines {
                    break;
                }
                if !cell.has_mine() && rng.random_bool(density) {
                    cell.arm();
                    armed += 1;
                }
            }
        }

        log::trace!("Armed {} mines in {} sweeps", armed, sweeps);
        armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(side: usize) -> Array2<Cell> {
        Array2::default([side, side])
    }

    fn armed(cells: &Array2<Cell>) -> usize {
        cells.iter().filter(|cell| cell.has_mine()).count()
    }

    #[test]
    fn arms_exactly_the_requested_count() {
        let mut cells = board(20);

        let placed = BernoulliGenerator::new(7).lay_mines(&mut cells, 0.21, 84);

        assert_eq!(placed, 84);
        assert_eq!(armed(&cells), 84);
    }

    #[test]
    fn low_density_still_reaches_target() {
        let mut cells = board(30);

        let placed = BernoulliGenerator::new(3).lay_mines(&mut cells, 0.001, 5);

        assert_eq!(placed, 5);
        assert_eq!(armed(&cells), 5);
    }

    #[test]
    fn full_board_arms_everything() {
        let mut cells = board(4);

        let placed = BernoulliGenerator::new(1).lay_mines(&mut cells, 1.0, 16);

        assert_eq!(placed, 16);
        assert_eq!(armed(&cells), 16);
    }

    #[test]
    fn same_seed_same_layout() {
        let mut first = board(12);
        let mut second = board(12);

        BernoulliGenerator::new(42).lay_mines(&mut first, 0.3, 43);
        BernoulliGenerator::new(42).lay_mines(&mut second, 0.3, 43);

        assert_eq!(first, second);
    }
}
