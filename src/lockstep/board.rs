//! Double-buffered simulation board.
//!
//! Storage is a pair of flat row-major grids plus a phase selector choosing
//! which grid is `current`; [`Board::swap`] flips the selector and never
//! copies cells, so the buffer exchange at a generation boundary is O(1).
//! Cells are atomic bytes: workers write disjoint rows of `next` through a
//! shared reference, and the generation barrier supplies cross-generation
//! visibility, so every atomic access here is relaxed.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{LifeError, Result};

const ALIVE: u8 = 1;
const DEAD: u8 = 0;

pub struct Board {
    size: usize,
    grids: [Box<[AtomicU8]>; 2],
    /// 0 or 1; `grids[phase]` is `current` and `grids[phase ^ 1]` is `next`.
    phase: AtomicU8,
}

impl Board {
    /// Allocates two zero-initialized `size x size` grids.
    pub fn allocate(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(LifeError::Allocation {
                size,
                message: "board must have at least one row".into(),
            });
        }
        let cells = size.checked_mul(size).ok_or_else(|| LifeError::Allocation {
            size,
            message: "cell count overflows usize".into(),
        })?;
        Ok(Self {
            size,
            grids: [Self::grid(size, cells)?, Self::grid(size, cells)?],
            phase: AtomicU8::new(0),
        })
    }

    fn grid(size: usize, cells: usize) -> Result<Box<[AtomicU8]>> {
        let mut grid = Vec::new();
        grid.try_reserve_exact(cells)
            .map_err(|err| LifeError::Allocation {
                size,
                message: err.to_string(),
            })?;
        grid.resize_with(cells, || AtomicU8::new(DEAD));
        Ok(grid.into_boxed_slice())
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.size || col >= self.size {
            return Err(LifeError::Index {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    #[inline(always)]
    fn current(&self) -> &[AtomicU8] {
        &self.grids[self.phase.load(Ordering::Relaxed) as usize]
    }

    #[inline(always)]
    fn next(&self) -> &[AtomicU8] {
        &self.grids[(self.phase.load(Ordering::Relaxed) ^ 1) as usize]
    }

    /// Length of one grid side.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Reads a cell from `current`.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        let idx = self.index(row, col)?;
        Ok(self.current()[idx].load(Ordering::Relaxed) == ALIVE)
    }

    /// Writes a cell into `next`. Each `next` cell must be written by
    /// exactly one worker per generation; the row partition enforces that.
    #[inline(always)]
    pub fn set_next(&self, row: usize, col: usize, alive: bool) -> Result<()> {
        let idx = self.index(row, col)?;
        self.next()[idx].store(if alive { ALIVE } else { DEAD }, Ordering::Relaxed);
        Ok(())
    }

    /// Seeds a cell in `current`. The exclusive borrow keeps seeding out of
    /// the compute phase.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        let idx = self.index(row, col)?;
        self.current()[idx].store(if alive { ALIVE } else { DEAD }, Ordering::Relaxed);
        Ok(())
    }

    /// Exchanges the roles of `current` and `next` by flipping the phase
    /// selector. Must only run in the barrier's serial section, while every
    /// worker is parked between generations.
    pub fn swap(&self) {
        self.phase.fetch_xor(1, Ordering::Relaxed);
    }

    /// Number of live cells in `current`.
    pub fn population(&self) -> usize {
        self.current()
            .iter()
            .filter(|cell| cell.load(Ordering::Relaxed) == ALIVE)
            .count()
    }

    /// Calls `f(row, col)` for every live cell in `current`, row-major.
    pub fn for_each_live<F: FnMut(usize, usize)>(&self, mut f: F) {
        let cells = self.current();
        for row in 0..self.size {
            for col in 0..self.size {
                if cells[row * self.size + col].load(Ordering::Relaxed) == ALIVE {
                    f(row, col);
                }
            }
        }
    }

    /// Live cells of `current` in row-major order.
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        let mut live = Vec::new();
        self.for_each_live(|row, col| live.push((row, col)));
        live
    }
}
