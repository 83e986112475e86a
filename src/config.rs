use std::{num::NonZeroUsize, str::FromStr};

use crate::{ConfigError, DEFAULT_FILL_RATE};

/// Settings of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Chance of a cell being alive when the grid is seeded randomly.
    pub fill_rate: f64,
    /// `None` seeds the generator from entropy.
    pub seed: Option<u64>,
    pub generations: u64,
    /// Population is logged every `report_every` generations (never if 0).
    pub report_every: u64,
    pub workers: NonZeroUsize,
    /// Built-in pattern to place at the centre instead of random cells.
    pub pattern: Option<String>,
    /// Print the final generation to stdout.
    pub print: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: Self::WIDTH,
            height: Self::HEIGHT,
            fill_rate: DEFAULT_FILL_RATE,
            seed: None,
            generations: 100,
            report_every: 10,
            workers: NonZeroUsize::MIN,
            pattern: None,
            print: false,
        }
    }
}

impl Config {
    pub const WIDTH: usize = 150;
    pub const HEIGHT: usize = 80;

    /// Builds a config from `key=value` arguments applied over the defaults.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| ConfigError::Malformed(arg.to_string()))?;
            config.apply(key.trim(), value.trim())?;
        }
        Ok(config)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "width" => self.width = parse(key, value)?,
            "height" => self.height = parse(key, value)?,
            "fill" => self.fill_rate = parse(key, value)?,
            "seed" => self.seed = Some(parse(key, value)?),
            "generations" => self.generations = parse(key, value)?,
            "report" => self.report_every = parse(key, value)?,
            "workers" => self.workers = parse(key, value)?,
            "pattern" => self.pattern = Some(value.to_string()),
            "print" => self.print = parse(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
