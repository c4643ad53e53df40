//! Station code types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when a station code is malformed or not served by the planner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code {code:?}: {reason}")]
pub struct InvalidStationCode {
    code: String,
    reason: &'static str,
}

impl InvalidStationCode {
    pub(crate) fn new(code: impl Into<String>, reason: &'static str) -> Self {
        Self {
            code: code.into(),
            reason,
        }
    }

    /// The rejected input.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// A valid 4-character BART station abbreviation.
///
/// BART abbreviations are uppercase ASCII letters or digits (`EMBR`, `16TH`).
/// Any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use bart_server::domain::StationCode;
///
/// let embr = StationCode::parse("EMBR").unwrap();
/// assert_eq!(embr.as_str(), "EMBR");
/// assert_eq!(embr, StationCode::EMBR);
///
/// // Lowercase is rejected unless normalized first
/// assert!(StationCode::parse("embr").is_err());
/// assert!(StationCode::parse_normalized(" embr ").is_ok());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("EMB").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode([u8; 4]);

impl StationCode {
    pub const EMBR: StationCode = StationCode(*b"EMBR");
    pub const MONT: StationCode = StationCode(*b"MONT");
    pub const POWL: StationCode = StationCode(*b"POWL");
    pub const CIVC: StationCode = StationCode(*b"CIVC");

    /// Parse a station code from a string.
    ///
    /// The input must be exactly 4 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidStationCode::new(s, "must be exactly 4 characters"));
        }

        for &b in bytes {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStationCode::new(
                    s,
                    "must be uppercase ASCII letters or digits",
                ));
            }
        }

        Ok(StationCode([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Parse user input: surrounding whitespace is trimmed and letters uppercased.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII letters and digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
