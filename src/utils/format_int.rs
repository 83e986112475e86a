/// Integer displayed with `'` between groups of three digits, e.g. `12'000'000`.
pub struct NiceInt(u64);

impl NiceInt {
    pub fn from_usize(value: usize) -> Self {
        Self(value as u64)
    }
}

impl From<u64> for NiceInt {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for NiceInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.to_string();
        for (i, ch) in digits.chars().enumerate() {
            if i != 0 && (digits.len() - i) % 3 == 0 {
                f.write_str("'")?;
            }
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
