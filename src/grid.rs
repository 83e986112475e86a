use std::{fmt, num::NonZeroUsize};

use log::{debug, trace};
use rand::Rng;

use crate::{GridError, Pattern};

/// Chance of a cell being alive after [`Grid::randomize`] when the caller has no preference.
pub const DEFAULT_FILL_RATE: f64 = 1. / 6.;

/// Conway's Game of Life on a `width x height` torus.
///
/// Cells are stored row-major. Every generation is computed into a second
/// buffer of the same size from a read-only view of the current one, and the
/// two buffers are swapped once all cells are done.
#[derive(Clone, Debug)]
pub struct Grid {
    cells_curr: Vec<bool>,
    cells_next: Vec<bool>,
    width: usize,
    height: usize,
    generation: u64,
}

impl Grid {
    /// Creates a field filled with dead cells.
    ///
    /// Zero sides and areas that cannot be addressed (`width * height` above
    /// `isize::MAX`) are rejected.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let size = width
            .checked_mul(height)
            .filter(|&size| size != 0 && size <= isize::MAX as usize)
            .ok_or(GridError::InvalidDimensions { width, height })?;
        debug!("created {}x{} grid", width, height);
        Ok(Self {
            cells_curr: vec![false; size],
            cells_next: vec![false; size],
            width,
            height,
            generation: 0,
        })
    }

    /// Creates a field with random cells.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    pub fn random(
        width: usize,
        height: usize,
        seed: Option<u64>,
        fill_rate: f64,
    ) -> Result<Self, GridError> {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };
        let mut result = Self::new(width, height)?;
        result.randomize(&mut rng, fill_rate)?;
        Ok(result)
    }

    /// `(width, height)` of the field
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Generations computed since the field was last reseeded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells_curr.iter().filter(|&&c| c).count()
    }

    /// Row-major view of the current generation.
    pub fn cells(&self) -> &[bool] {
        &self.cells_curr
    }

    pub fn clear(&mut self) {
        self.cells_curr.fill(false);
        self.generation = 0;
    }

    pub fn fill(&mut self) {
        self.cells_curr.fill(true);
        self.generation = 0;
    }

    /// Sets every cell alive with probability `probability`, independently.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        probability: f64,
    ) -> Result<(), GridError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GridError::InvalidProbability(probability));
        }
        for cell in self.cells_curr.iter_mut() {
            *cell = rng.gen_bool(probability);
        }
        self.generation = 0;
        debug!(
            "randomized {}x{} grid with fill rate {}",
            self.width, self.height, probability
        );
        Ok(())
    }

    /// Replaces the whole field with row-major `states`.
    pub fn set_cells(&mut self, states: &[bool]) -> Result<(), GridError> {
        if states.len() != self.cells_curr.len() {
            return Err(GridError::CellCountMismatch {
                expected: self.cells_curr.len(),
                actual: states.len(),
            });
        }
        self.cells_curr.copy_from_slice(states);
        self.generation = 0;
        Ok(())
    }

    pub fn get(&self, x: usize, y: usize) -> Result<bool, GridError> {
        self.index(x, y).map(|i| self.cells_curr[i])
    }

    /// Coordinates are not wrapped: anything outside the field is rejected.
    pub fn set(&mut self, x: usize, y: usize, state: bool) -> Result<(), GridError> {
        let i = self.index(x, y)?;
        self.cells_curr[i] = state;
        Ok(())
    }

    /// Stamps the alive cells of `pattern` with its top-left corner at `(x, y)`.
    ///
    /// The anchor must lie on the field; the pattern itself wraps around the edges.
    pub fn place(&mut self, pattern: &Pattern, x: usize, y: usize) -> Result<(), GridError> {
        self.index(x, y)?;
        for (px, py) in pattern.alive_cells() {
            let cx = (x + px % self.width) % self.width;
            let cy = (y + py % self.height) % self.height;
            self.cells_curr[cx + cy * self.width] = true;
        }
        Ok(())
    }

    /// Parses `rle` and stamps it like [`Grid::place`].
    pub fn place_rle(&mut self, rle: &str, x: usize, y: usize) -> Result<(), GridError> {
        let pattern = Pattern::from_rle(rle)?;
        self.place(&pattern, x, y)
    }

    /// Advances the field by one generation.
    pub fn step(&mut self) {
        let view = View {
            cells: &self.cells_curr,
            width: self.width,
            height: self.height,
        };
        view.update_rows(0, &mut self.cells_next);
        self.publish();
    }

    /// Advances the field by `n` generations.
    pub fn steps(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Same as [`Grid::step`], with rows split between `workers` scoped threads.
    pub fn step_parallel(&mut self, workers: NonZeroUsize) {
        let view = View {
            cells: &self.cells_curr,
            width: self.width,
            height: self.height,
        };
        let rows_per_worker = self.height.div_ceil(workers.get());
        std::thread::scope(|s| {
            for (i, dst) in self
                .cells_next
                .chunks_mut(rows_per_worker * self.width)
                .enumerate()
            {
                s.spawn(move || view.update_rows(i * rows_per_worker, dst));
            }
        });
        self.publish();
    }

    /// Computes the next generation into a fresh grid, leaving `self` untouched.
    pub fn successor(&self, workers: NonZeroUsize) -> Self {
        let mut next = self.clone();
        if workers.get() == 1 {
            next.step();
        } else {
            next.step_parallel(workers);
        }
        next
    }

    fn publish(&mut self) {
        std::mem::swap(&mut self.cells_curr, &mut self.cells_next);
        self.generation += 1;
        trace!("generation {} computed", self.generation);
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x + y * self.width)
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.cells_curr == other.cells_curr
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells_curr.chunks(self.width) {
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Read-only snapshot of one generation shared by all workers of a step.
#[derive(Clone, Copy)]
struct View<'a> {
    cells: &'a [bool],
    width: usize,
    height: usize,
}

impl View<'_> {
    fn get(&self, x: usize, y: usize) -> bool {
        self.cells[x + y * self.width]
    }

    fn count_neibs(&self, x: usize, y: usize) -> usize {
        let x1 = if x == 0 { self.width - 1 } else { x - 1 };
        let x2 = if x == self.width - 1 { 0 } else { x + 1 };
        let y1 = if y == 0 { self.height - 1 } else { y - 1 };
        let y2 = if y == self.height - 1 { 0 } else { y + 1 };
        self.get(x1, y1) as usize
            + self.get(x, y1) as usize
            + self.get(x2, y1) as usize
            + self.get(x1, y) as usize
            + self.get(x2, y) as usize
            + self.get(x1, y2) as usize
            + self.get(x, y2) as usize
            + self.get(x2, y2) as usize
    }

    /// Birth on 3, survival on 2 or 3.
    fn evaluate_next(&self, x: usize, y: usize) -> bool {
        let population = self.count_neibs(x, y);
        population == 3 || (population == 2 && self.get(x, y))
    }

    /// Fills `dst` with whole rows of the next generation starting at row `first_row`.
    fn update_rows(&self, first_row: usize, dst: &mut [bool]) {
        for (i, row) in dst.chunks_mut(self.width).enumerate() {
            let y = first_row + i;
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.evaluate_next(x, y);
            }
        }
    }
}
