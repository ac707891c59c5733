use alloc::vec;
use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ChordOutcome {
    /// Not a numbered revealed cell, flag count mismatch, or every safe neighbor already open.
    NoChange,
    Cleared,
    /// A flag without a mine was found around the chorded cell, which ends the game.
    BadFlag(Coord2),
}

impl ChordOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Everything a single reveal operation changed.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealReport {
    /// Cells turned from hidden to revealed, in reveal order.
    pub revealed: Vec<Coord2>,
    /// Smallest rectangle covering every touched cell and neighborhood.
    pub dirty: Region,
    /// Flags that were sitting on cells opened by a flood fill.
    pub dropped_flags: CellCount,
}

/// Reveal operations on a borrowed grid.
///
/// One engine covers one player action: the dirty region only ever grows while it lives, and the revealed cells
/// are collected so the caller can settle score and sounds afterwards.
#[derive(Debug)]
pub struct RevealEngine<'a> {
    grid: &'a mut Grid,
    dirty: Region,
    revealed: Vec<Coord2>,
    dropped_flags: CellCount,
}

impl<'a> RevealEngine<'a> {
    /// Starts an operation at `origin`, the dirty region begins as that cell.
    pub fn new(grid: &'a mut Grid, origin: Coord2) -> Result<Self> {
        let origin = grid.validate_coords(origin)?;
        Ok(Self {
            grid,
            dirty: Region::cell(origin),
            revealed: Vec::new(),
            dropped_flags: 0,
        })
    }

    /// Reveals one cell, a no-op apart from the dirty region when it is already revealed.
    pub fn reveal_single(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.grid.validate_coords(coords)?;
        self.open(coords);
        self.dirty.include(Region::cell(coords));
        Ok(())
    }

    /// Opens the blank region around `coords`.
    ///
    /// Every visited blank cell gets its whole clamped neighborhood revealed, numbered cells on the border included,
    /// and only blank cells revealed that way are visited in turn. Cells already revealed are never visited again,
    /// which bounds the work list.
    pub fn flood_fill(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.grid.validate_coords(coords)?;
        let seed = self.grid[coords];
        if seed.has_mine() || !seed.is_blank() {
            return Err(GameError::NotBlank);
        }

        self.open(coords);
        let mut pending = vec![coords];
        while let Some(center) = pending.pop() {
            let ring = self.grid.neighborhood(center);
            self.dirty.include(ring);

            for pos in ring {
                if self.open(pos) && self.grid[pos].is_blank() {
                    log::trace!("Flood continues through {:?}", pos);
                    pending.push(pos);
                }
            }
        }

        log::trace!(
            "Flood fill from {:?} done, {} revealed so far, dirty {:?}",
            coords,
            self.revealed.len(),
            self.dirty
        );
        Ok(())
    }

    /// Reveals the safe neighbors of a numbered cell once its flag count matches its mine count.
    ///
    /// Flags are validated while counting: the first flag found without a mine aborts the chord.
    pub fn chord_clear(&mut self, coords: Coord2) -> Result<ChordOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        let center = self.grid[coords];
        if !center.is_revealed() || center.is_blank() {
            return Ok(ChordOutcome::NoChange);
        }

        let ring = self.grid.neighborhood(coords);
        let mut flag_count: CellCount = 0;
        let mut revealed_count: CellCount = 0;
        for pos in ring {
            let cell = self.grid[pos];
            if cell.is_flagged() {
                flag_count += 1;
                if !cell.has_mine() {
                    log::debug!("Chord at {:?} found a bad flag at {:?}", coords, pos);
                    self.dirty.include(Region::cell(pos));
                    return Ok(ChordOutcome::BadFlag(pos));
                }
            }
            if cell.is_revealed() {
                revealed_count += 1;
            }
        }

        let mine_count = CellCount::from(center.adjacent_mines());
        let open_grid = revealed_count == ring.area() - mine_count;
        if flag_count != mine_count || open_grid {
            return Ok(ChordOutcome::NoChange);
        }

        self.dirty.include(ring);
        for pos in ring {
            let cell = self.grid[pos];
            if cell.has_mine() || cell.is_revealed() {
                continue;
            }
            self.open(pos);
            if cell.is_blank() {
                self.flood_fill(pos)?;
            }
        }

        Ok(ChordOutcome::Cleared)
    }

    pub fn finish(self) -> RevealReport {
        RevealReport {
            revealed: self.revealed,
            dirty: self.dirty,
            dropped_flags: self.dropped_flags,
        }
    }

    fn open(&mut self, coords: Coord2) -> bool {
        match self.grid.open(coords) {
            None => false,
            Some(mark) => {
                if mark == Mark::Flag {
                    self.dropped_flags += 1;
                }
                self.revealed.push(coords);
                true
            }
        }
    }
}
