#![warn(clippy::all)]

use anyhow::{anyhow, Context, Result};
use log::info;
use torus_life::{Config, Grid, NiceInt, Pattern};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_args(std::env::args().skip(1)).context("bad arguments")?;
    let mut grid = seed(&config)?;
    info!(
        "{}x{} grid, population {}",
        config.width,
        config.height,
        NiceInt::from_usize(grid.population())
    );

    let timer = std::time::Instant::now();
    for _ in 0..config.generations {
        if config.workers.get() == 1 {
            grid.step();
        } else {
            grid.step_parallel(config.workers);
        }
        if config.report_every != 0 && grid.generation() % config.report_every == 0 {
            info!(
                "generation {}: population {}",
                NiceInt::from(grid.generation()),
                NiceInt::from_usize(grid.population())
            );
        }
    }
    info!(
        "{} generations in {:?} with {} worker(s)",
        NiceInt::from(config.generations),
        timer.elapsed(),
        config.workers
    );

    if config.print {
        print!("{}", grid);
    }
    Ok(())
}

fn seed(config: &Config) -> Result<Grid> {
    let Some(name) = &config.pattern else {
        return Ok(Grid::random(
            config.width,
            config.height,
            config.seed,
            config.fill_rate,
        )?);
    };
    let rle = Pattern::named(name).ok_or_else(|| anyhow!("unknown pattern `{}`", name))?;
    let pattern = Pattern::from_rle(rle)?;
    let (w, h) = pattern.size();
    let mut grid = Grid::new(config.width, config.height)?;
    let x = (config.width / 2).saturating_sub(w / 2);
    let y = (config.height / 2).saturating_sub(h / 2);
    grid.place(&pattern, x, y)?;
    Ok(grid)
}
