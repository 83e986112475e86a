//! Conway's Game of Life on a fixed-size torus.
//!
//! [`Grid`] holds the cells and advances them one generation at a time,
//! sequentially or split between worker threads. [`SharedGrid`] lets a
//! renderer read whole generations while another thread steps and edits.

mod config;
mod error;
mod grid;
pub mod pattern;
mod shared;
mod utils;

pub use config::Config;
pub use error::{ConfigError, GridError, PatternError};
pub use grid::{Grid, DEFAULT_FILL_RATE};
pub use pattern::Pattern;
pub use shared::SharedGrid;
pub use utils::NiceInt;
