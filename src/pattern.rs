use crate::PatternError;

/// Two-by-two still life.
pub const BLOCK: &str = "x = 2, y = 2\n2o$2o!";
/// Period 2 oscillator.
pub const BLINKER: &str = "x = 3, y = 1\n3o!";
/// Moves one cell diagonally (towards growing `x` and `y`) every 4 generations.
pub const GLIDER: &str = "x = 3, y = 3\nbo$2bo$3o!";

/// Small rectangular arrangement of cells, to be stamped onto a [`Grid`](crate::Grid).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Pattern {
    /// Largest `width * height` a header may declare.
    pub const MAX_CELLS: usize = 1 << 24;

    /// RLE text of a built-in pattern, looked up by its lowercase name.
    pub fn named(name: &str) -> Option<&'static str> {
        match name {
            "block" => Some(BLOCK),
            "blinker" => Some(BLINKER),
            "glider" => Some(GLIDER),
            _ => None,
        }
    }

    /// Parses run-length encoded pattern text.
    ///
    /// Lines starting with `#` are comments. The first other line must be the
    /// `x = <width>, y = <height>` header; any `rule` entry is ignored.
    pub fn from_rle(data: &str) -> Result<Self, PatternError> {
        let mut lines = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        let (width, height) = parse_header(lines.next().ok_or(PatternError::MissingHeader)?)?;

        let area = width
            .checked_mul(height)
            .filter(|&area| area <= Self::MAX_CELLS)
            .ok_or(PatternError::TooLarge { width, height })?;
        let mut cells = vec![false; area];
        let (mut x, mut y, mut cnt) = (0usize, 0usize, None::<usize>);
        'body: for line in lines {
            for ch in line.chars() {
                match ch {
                    '0'..='9' => {
                        let digit = ch as usize - '0' as usize;
                        let value = cnt
                            .unwrap_or(0)
                            .checked_mul(10)
                            .and_then(|c| c.checked_add(digit))
                            .ok_or_else(|| PatternError::BadNumber(line.to_string()))?;
                        cnt = Some(value);
                    }
                    'b' => {
                        x = x.saturating_add(cnt.take().unwrap_or(1));
                        if x > width {
                            return Err(out_of_bounds(x - 1, y, width, height));
                        }
                    }
                    'o' => {
                        let end = x.saturating_add(cnt.take().unwrap_or(1));
                        if end > width || y >= height {
                            let last = end.saturating_sub(1);
                            return Err(out_of_bounds(last, y, width, height));
                        }
                        cells[x + y * width..end + y * width].fill(true);
                        x = end;
                    }
                    '$' => (x, y) = (0, y.saturating_add(cnt.take().unwrap_or(1))),
                    '!' => break 'body,
                    c if c.is_whitespace() => {}
                    c => return Err(PatternError::UnexpectedSymbol(c)),
                }
            }
        }

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// `(width, height)` declared by the header
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Coordinates of alive cells, relative to the top-left corner.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| (i % width, i / width))
    }
}

fn out_of_bounds(x: usize, y: usize, width: usize, height: usize) -> PatternError {
    PatternError::OutOfBounds {
        x,
        y,
        width,
        height,
    }
}

/// Returns `(width, height)` from a line such as `x = 3, y = 3, rule = B3/S23`.
fn parse_header(line: &str) -> Result<(usize, usize), PatternError> {
    let (mut width, mut height) = (None, None);
    for entry in line.split(',') {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(PatternError::MissingHeader);
        };
        let parse = || {
            value
                .trim()
                .parse::<usize>()
                .map_err(|_| PatternError::BadNumber(value.trim().to_string()))
        };
        match key.trim() {
            "x" => width = Some(parse()?),
            "y" => height = Some(parse()?),
            _ => {}
        }
    }
    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(PatternError::MissingHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_glider() {
        let glider = Pattern::from_rle(GLIDER).unwrap();
        assert_eq!(glider.size(), (3, 3));
        assert_eq!(
            glider.alive_cells().collect::<Vec<_>>(),
            vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn comments_rule_and_line_breaks() {
        let rle = "#N Beehive\n#C still life\nx = 4, y = 3, rule = B3/S23\nb2ob$\no2bo$b2o\nb!";
        let beehive = Pattern::from_rle(rle).unwrap();
        assert_eq!(beehive.size(), (4, 3));
        assert_eq!(beehive.alive_cells().count(), 6);
    }

    #[test]
    fn multi_digit_runs_and_blank_rows() {
        let pattern = Pattern::from_rle("x = 12, y = 3\n12o2$o!").unwrap();
        let cells = pattern.alive_cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), 13);
        assert_eq!(cells.last(), Some(&(0, 2)));
    }

    #[test]
    fn named_patterns_parse() {
        for name in ["block", "blinker", "glider"] {
            let rle = Pattern::named(name).unwrap();
            assert!(Pattern::from_rle(rle).is_ok(), "{name}");
        }
        assert_eq!(Pattern::named("gun"), None);
    }

    #[test]
    fn errors() {
        assert_eq!(Pattern::from_rle(""), Err(PatternError::MissingHeader));
        assert_eq!(
            Pattern::from_rle("#C only\n3o!"),
            Err(PatternError::MissingHeader)
        );
        assert_eq!(
            Pattern::from_rle("x = three, y = 1\n3o!"),
            Err(PatternError::BadNumber("three".to_string()))
        );
        assert_eq!(
            Pattern::from_rle("x = 3, y = 1\n2x!"),
            Err(PatternError::UnexpectedSymbol('x'))
        );
        assert_eq!(
            Pattern::from_rle("x = 3, y = 1\n4o!"),
            Err(PatternError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 1
            })
        );
        assert!(matches!(
            Pattern::from_rle("x = 3, y = 1\no$o!"),
            Err(PatternError::OutOfBounds { y: 1, .. })
        ));
    }

    #[test]
    fn huge_runs_are_errors() {
        assert!(matches!(
            Pattern::from_rle("x = 3, y = 1\n2b18446744073709551615b!"),
            Err(PatternError::OutOfBounds { y: 0, .. })
        ));
        assert!(matches!(
            Pattern::from_rle("x = 3, y = 1\n2b18446744073709551615o!"),
            Err(PatternError::OutOfBounds { y: 0, .. })
        ));
        assert!(matches!(
            Pattern::from_rle("x = 3, y = 2\n18446744073709551615$o!"),
            Err(PatternError::OutOfBounds { x: 0, .. })
        ));
        assert_eq!(
            Pattern::from_rle("x = 3, y = 1\n99999999999999999999o!"),
            Err(PatternError::BadNumber("99999999999999999999o!".to_string()))
        );
    }

    #[test]
    fn huge_headers_are_errors() {
        assert_eq!(
            Pattern::from_rle("x = 4294967296, y = 4294967296\no!"),
            Err(PatternError::TooLarge {
                width: 4294967296,
                height: 4294967296
            })
        );
        assert_eq!(
            Pattern::from_rle("x = 18446744073709551615, y = 2\no!"),
            Err(PatternError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );
        assert_eq!(
            Pattern::from_rle("x = 16777217, y = 1\no!"),
            Err(PatternError::TooLarge {
                width: 16777217,
                height: 1
            })
        );
        assert!(Pattern::from_rle("x = 4096, y = 4096\no!").is_ok());
    }
}
