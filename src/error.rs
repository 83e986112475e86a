//! Error types for grid, pattern and configuration operations.

/// Errors reported by [`Grid`](crate::Grid) and [`SharedGrid`](crate::SharedGrid).
///
/// All of them are usage errors detected synchronously at the call site;
/// the grid is left untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Construction requested with a zero width or height.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Single-cell access outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Fill probability outside `[0, 1]` (or NaN).
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// Bulk cell load with the wrong number of states.
    #[error("expected {expected} cell states, got {actual}")]
    CellCountMismatch {
        /// `width * height` of the grid.
        expected: usize,
        /// Length of the supplied slice.
        actual: usize,
    },

    /// A pattern could not be parsed.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A thread panicked while holding one of the shared grid's locks.
    #[error("shared grid lock poisoned")]
    Poisoned,
}

/// Errors produced while parsing RLE pattern text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// No `x = .., y = ..` header line before the pattern body.
    #[error("missing `x = .., y = ..` header")]
    MissingHeader,

    /// A header value or run count is not a valid number.
    #[error("invalid number `{0}`")]
    BadNumber(String),

    /// A character that is not part of the two-state RLE alphabet.
    #[error("unexpected symbol `{0}`")]
    UnexpectedSymbol(char),

    /// The header declares more cells than [`Pattern::MAX_CELLS`](crate::Pattern::MAX_CELLS).
    #[error("declared size {width}x{height} is too large")]
    TooLarge {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },

    /// A run of cells falls outside the dimensions declared in the header.
    #[error("cell ({x}, {y}) is outside the declared {width}x{height} bounds")]
    OutOfBounds {
        /// Column reached by the run.
        x: usize,
        /// Row reached by the run.
        y: usize,
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },
}

/// Errors produced while building a [`Config`](crate::Config) from arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Argument not of the form `key=value`.
    #[error("expected `key=value`, got `{0}`")]
    Malformed(String),

    /// Key not recognised.
    #[error("unknown setting `{0}`")]
    UnknownKey(String),

    /// Value could not be parsed for its key.
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Offending value.
        value: String,
    },
}
