use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard},
};

use log::trace;

use crate::{Grid, GridError};

/// A [`Grid`] shared between a stepping thread and any number of readers.
///
/// Readers only ever observe whole generations: the next generation is
/// computed from a read snapshot and published with a single write. Cell
/// edits submitted while a step is running are queued and applied, in
/// order, right after the new generation is published.
#[derive(Clone)]
pub struct SharedGrid {
    grid: Arc<RwLock<Grid>>,
    pending: Arc<Mutex<Pending>>,
    stepping: Arc<Mutex<()>>,
    workers: NonZeroUsize,
    width: usize,
    height: usize,
}

/// Edits waiting for the running step, if any.
#[derive(Default)]
struct Pending {
    /// Set between taking the step's snapshot and publishing its result.
    in_step: bool,
    edits: Vec<Edit>,
}

#[derive(Clone, Copy, Debug)]
struct Edit {
    x: usize,
    y: usize,
    state: bool,
}

impl SharedGrid {
    /// `workers` - number of threads used to compute each generation
    pub fn new(grid: Grid, workers: NonZeroUsize) -> Self {
        let (width, height) = grid.size();
        Self {
            grid: Arc::new(RwLock::new(grid)),
            pending: Arc::new(Mutex::new(Pending::default())),
            stepping: Arc::new(Mutex::new(())),
            workers,
            width,
            height,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Read access to the current generation.
    ///
    /// Holding the guard delays the publication of the next generation.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Grid>, GridError> {
        self.grid.read().map_err(|_| GridError::Poisoned)
    }

    /// Copy of the current generation.
    pub fn snapshot(&self) -> Result<Grid, GridError> {
        Ok(self.read()?.clone())
    }

    /// Sets a cell, deferring the write until after the running step if there is one.
    pub fn queue_set(&self, x: usize, y: usize, state: bool) -> Result<(), GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let mut pending = self.lock_pending()?;
        if pending.in_step {
            pending.edits.push(Edit { x, y, state });
            return Ok(());
        }
        // `pending` stays locked, so no step can take its snapshot before this write
        let mut grid = self.grid.write().map_err(|_| GridError::Poisoned)?;
        grid.set(x, y, state)
    }

    /// Runs `f` on the grid while no step is in flight.
    pub fn update<T>(&self, f: impl FnOnce(&mut Grid) -> T) -> Result<T, GridError> {
        let _stepping = self.stepping.lock().map_err(|_| GridError::Poisoned)?;
        let mut grid = self.grid.write().map_err(|_| GridError::Poisoned)?;
        Ok(f(&mut grid))
    }

    /// Computes and publishes the next generation, then applies queued edits.
    pub fn step(&self) -> Result<(), GridError> {
        let _stepping = self.stepping.lock().map_err(|_| GridError::Poisoned)?;
        self.lock_pending()?.in_step = true;
        let next = self.read().map(|grid| grid.successor(self.workers));

        let mut pending = self.lock_pending()?;
        pending.in_step = false;
        let next = next?;
        let mut grid = self.grid.write().map_err(|_| GridError::Poisoned)?;
        *grid = next;
        for edit in pending.edits.drain(..) {
            grid.set(edit.x, edit.y, edit.state)?;
        }
        trace!("published generation {}", grid.generation());
        Ok(())
    }

    fn lock_pending(&self) -> Result<MutexGuard<'_, Pending>, GridError> {
        self.pending.lock().map_err(|_| GridError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pattern;

    #[test]
    fn idle_edits_apply_immediately() {
        let shared = SharedGrid::new(Grid::new(4, 4).unwrap(), NonZeroUsize::MIN);
        shared.queue_set(1, 2, true).unwrap();
        assert_eq!(shared.read().unwrap().get(1, 2), Ok(true));
        assert!(matches!(
            shared.queue_set(4, 0, true),
            Err(GridError::OutOfRange { .. })
        ));
    }

    #[test]
    fn step_matches_plain_grid() {
        let mut grid = Grid::new(8, 8).unwrap();
        let glider = Pattern::from_rle(crate::pattern::GLIDER).unwrap();
        grid.place(&glider, 1, 1).unwrap();
        let shared = SharedGrid::new(grid.clone(), NonZeroUsize::new(2).unwrap());
        for _ in 0..10 {
            shared.step().unwrap();
            grid.step();
        }
        assert_eq!(shared.snapshot().unwrap(), grid);
        assert_eq!(shared.read().unwrap().generation(), 10);
    }

    #[test]
    fn update_runs_exclusively() {
        let shared = SharedGrid::new(Grid::new(3, 3).unwrap(), NonZeroUsize::MIN);
        let population = shared
            .update(|grid| {
                grid.fill();
                grid.population()
            })
            .unwrap();
        assert_eq!(population, 9);
        assert_eq!(shared.snapshot().unwrap().population(), 9);
    }
}
