use core::fmt;
use core::str::FromStr;
use thiserror::Error;

const SCALE: i128 = 1_000_000;
const FRACTION_DIGITS: usize = 6;

/// A migration version stored as a fixed-point count of millionths.
///
/// Versions compare exactly, so `1.1` built from a float and `"1.1"` parsed
/// from a filename are the same version. The whole part may use the full
/// `i64` range, which leaves room for timestamp versions such as
/// `20240101120000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(i128);

impl Version {
    /// Stands in for floats that have no version: non-finite, or a whole
    /// part outside `i64`. It sorts below every other version and fails
    /// validation as an illegal version.
    pub const INVALID: Version = Version(i128::MIN);

    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::INVALID;
        }

        let whole = value.trunc();
        if whole.abs() >= i64::MAX as f64 {
            return Self::INVALID;
        }

        let fraction = ((value - whole) * SCALE as f64).round() as i128;
        let units = i128::from(whole as i64) * SCALE + fraction;

        // Below half a millionth still has to stay negative.
        if units == 0 && value < 0.0 {
            return Version(-1);
        }
        Version(units)
    }

    pub fn to_f64(&self) -> f64 {
        let whole = (self.0 / SCALE) as f64;
        let fraction = (self.0 % SCALE) as f64 / SCALE as f64;
        whole + fraction
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl From<f64> for Version {
    fn from(value: f64) -> Self {
        Version::from_f64(value)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            return f.write_str("out-of-range");
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / SCALE as u128;
        let fraction = abs % SCALE as u128;

        let digits = format!("{fraction:0width$}", width = FRACTION_DIGITS);
        let trimmed = digits.trim_end_matches('0');
        let trimmed = if trimmed.is_empty() { "0" } else { trimmed };

        write!(f, "{sign}{whole}.{trimmed}")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid version '{input}': {reason}")]
pub struct VersionParseError {
    pub input: String,
    pub reason: String,
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| VersionParseError {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, fraction) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(err("expected digits before the decimal point"));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(err("expected digits after the decimal point"));
        }
        if fraction.len() > FRACTION_DIGITS {
            return Err(err("at most six fractional digits are supported"));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| err("whole part does not fit in 64 bits"))?;
        let padded = format!("{fraction:0<width$}", width = FRACTION_DIGITS);
        let fraction: i128 = padded
            .parse()
            .map_err(|_| err("expected digits after the decimal point"))?;

        let units = i128::from(whole) * SCALE + fraction;
        Ok(Version(if negative { -units } else { units }))
    }
}
