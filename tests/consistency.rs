#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use rand::SeedableRng;
    use torus_life::Grid;

    const SEED: u64 = 42;
    const FILL_RATE: f64 = 0.3;

    fn randomly_filled(width: usize, height: usize, seed: u64) -> Grid {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::new(width, height).unwrap();
        grid.randomize(&mut rng, FILL_RATE).unwrap();
        grid
    }

    fn assert_fields_equal(a: &Grid, b: &Grid) {
        assert_eq!(a.size(), b.size());
        if a == b {
            return;
        }
        let (w, _) = a.size();
        let i = a
            .cells()
            .iter()
            .zip(b.cells())
            .position(|(x, y)| x != y)
            .unwrap();
        panic!("Mismatch at ({}, {}):\n{}\n{}", i % w, i / w, a, b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for (w, h) in [(64, 48), (17, 5), (1, 9)] {
            let mut sequential = randomly_filled(w, h, SEED);
            let mut parallel = [1, 3, 7, 100].map(|n| {
                (
                    NonZeroUsize::new(n).unwrap(),
                    randomly_filled(w, h, SEED),
                )
            });

            for _ in 0..50 {
                sequential.step();
                for (workers, grid) in parallel.iter_mut() {
                    grid.step_parallel(*workers);
                }
                for (_, grid) in parallel.iter() {
                    assert_fields_equal(&sequential, grid);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_history() {
        let mut a = randomly_filled(40, 30, SEED);
        let mut b = randomly_filled(40, 30, SEED);
        let mut c = a.clone();
        c.set_cells(b.cells()).unwrap();

        a.steps(100);
        b.steps(100);
        c.steps(100);
        assert_fields_equal(&a, &b);
        assert_fields_equal(&a, &c);
        assert_eq!(a.generation(), 100);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = randomly_filled(40, 30, SEED);
        let b = randomly_filled(40, 30, SEED + 1);
        assert_ne!(a, b);
    }
}
