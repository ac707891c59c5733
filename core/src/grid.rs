use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::round_half_up;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagChange {
    NoChange,
    Placed,
    Removed,
}

/// Square board of cells with mines laid out and adjacency counts computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    side_length: Coord,
    density: f64,
    total_mines: CellCount,
    hidden_mines: isize,
}

impl Grid {
    /// Random board, see [`Grid::generate`].
    pub fn new(side_length: Coord, density: f64, seed: u64) -> Result<Self> {
        Self::generate(side_length, density, BernoulliGenerator::new(seed))
    }

    /// Allocates a blank board, arms `round(density * side²)` cells (at least one) and counts neighbors.
    ///
    /// When the density would yield no mine it is re-derived as `1 / side²`.
    pub fn generate(
        side_length: Coord,
        density: f64,
        generator: impl MinefieldGenerator,
    ) -> Result<Self> {
        if side_length == 0 {
            return Err(GameError::InvalidSideLength);
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(GameError::InvalidDensity);
        }

        let total_cells = mult(side_length, side_length);
        let mut density = density;
        let mut total_mines = round_half_up(density * f64::from(total_cells))
            .min(u32::from(total_cells)) as CellCount;
        if total_mines < 1 {
            total_mines = 1;
            density = 1.0 / f64::from(total_cells);
            log::warn!(
                "Density too low for a {0}x{0} field, using a single mine (density {1})",
                side_length,
                density
            );
        }

        let mut cells = Array2::default((side_length, side_length).to_nd_index());
        let armed = generator.lay_mines(&mut cells, density, total_mines);
        if armed != total_mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                armed,
                total_mines
            );
        }

        let mut grid = Self {
            cells,
            side_length,
            density,
            total_mines: armed,
            hidden_mines: armed as isize,
        };
        grid.count_adjacent();
        log::debug!(
            "New {0}x{0} field, {1} mines, density {2}",
            side_length,
            armed,
            density
        );
        Ok(grid)
    }

    /// Board with mines exactly at `mine_coords`, mostly useful for tests and replays.
    pub fn from_mine_coords(side_length: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if side_length == 0 {
            return Err(GameError::InvalidSideLength);
        }

        let mut cells: Array2<Cell> = Array2::default((side_length, side_length).to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= side_length || coords.1 >= side_length {
                return Err(GameError::InvalidCoords);
            }
            cells[coords.to_nd_index()].arm();
        }

        let total_mines = cells
            .iter()
            .filter(|cell| cell.has_mine())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        let mut grid = Self {
            cells,
            side_length,
            density: f64::from(total_mines) / f64::from(mult(side_length, side_length)),
            total_mines,
            hidden_mines: total_mines as isize,
        };
        grid.count_adjacent();
        Ok(grid)
    }

    /// Replaces this board with a freshly generated one.
    pub fn reset(&mut self, side_length: Coord, density: f64, seed: u64) -> Result<()> {
        *self = Self::new(side_length, density, seed)?;
        Ok(())
    }

    pub fn side_length(&self) -> Coord {
        self.side_length
    }

    /// Density actually used for placement, after the single-mine correction.
    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    /// Mines not yet flagged, goes negative with more flags than mines.
    pub fn hidden_mines(&self) -> isize {
        self.hidden_mines
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.side_length, self.side_length)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.side_length && coords.1 < self.side_length {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn neighborhood(&self, coords: Coord2) -> Region {
        Region::neighborhood(coords, self.side_length)
    }

    pub fn full_region(&self) -> Region {
        Region::full(self.side_length)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_revealed())
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_flagged())
    }

    /// Coordinates of every armed cell, for the loss screen.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.full_region()
            .into_iter()
            .filter(move |&coords| self[coords].has_mine())
    }

    /// Flags an unrevealed cell, replacing a question mark, or removes its flag.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagChange> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match (cell.is_revealed(), cell.mark()) {
            (true, _) => FlagChange::NoChange,
            (false, Mark::Flag) => {
                cell.set_mark(Mark::None);
                self.hidden_mines += 1;
                FlagChange::Removed
            }
            (false, Mark::None | Mark::Question) => {
                cell.set_mark(Mark::Flag);
                self.hidden_mines -= 1;
                FlagChange::Placed
            }
        })
    }

    /// Adds or removes a question mark, flags are left alone.
    pub fn toggle_question(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match (cell.is_revealed(), cell.mark()) {
            (false, Mark::None) => {
                cell.set_mark(Mark::Question);
                MarkOutcome::Changed
            }
            (false, Mark::Question) => {
                cell.set_mark(Mark::None);
                MarkOutcome::Changed
            }
            _ => MarkOutcome::NoChange,
        })
    }

    pub fn clear_questions(&mut self) -> MarkOutcome {
        let mut outcome = MarkOutcome::NoChange;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_questioned()) {
            cell.set_mark(Mark::None);
            outcome = MarkOutcome::Changed;
        }
        outcome
    }

    /// Reveals a cell, a dropped flag gives its mine back to the hidden count.
    ///
    /// Returns the dropped mark, or `None` when the cell was already revealed.
    pub(crate) fn open(&mut self, coords: Coord2) -> Option<Mark> {
        let mark = self.cells[coords.to_nd_index()].reveal()?;
        if mark == Mark::Flag {
            self.hidden_mines += 1;
        }
        Some(mark)
    }

    fn count_adjacent(&mut self) {
        for coords in self.full_region() {
            let count = self
                .neighborhood(coords)
                .into_iter()
                .filter(|&pos| self[pos].has_mine())
                .count() as u8;
            self.cells[coords.to_nd_index()].set_adjacent_mines(count);
        }
    }

    fn count_cells(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| pred(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
