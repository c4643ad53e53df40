//! BART ETD API response DTOs.
//!
//! These types map directly to the `etd.aspx?cmd=etd&json=y` response. The
//! provider sends every value as a string and omits fields freely, so every
//! leaf is an `Option<String>`; numbers are accepted too and kept as text.
//! Nothing here is trusted until it passes through `convert`.

use serde::{Deserialize, Deserializer};

/// Top-level ETD response.
#[derive(Debug, Clone, Deserialize)]
pub struct EtdResponse {
    pub root: Option<EtdRoot>,
}

/// The `root` object of an ETD response.
#[derive(Debug, Clone, Deserialize)]
pub struct EtdRoot {
    /// Date the board was generated ("10/19/2026").
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,

    /// Time the board was generated ("09:30:12 AM PDT").
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,

    /// Requested stations. A single-station query returns at most one.
    #[serde(default)]
    pub station: Vec<RawStation>,
}

/// One station's board.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub abbr: Option<String>,

    /// Absent when no trains are predicted (e.g. overnight).
    #[serde(default)]
    pub etd: Vec<RawEtd>,
}

/// Estimates for one destination line.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEtd {
    #[serde(default, deserialize_with = "lenient_string")]
    pub destination: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub abbreviation: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub limited: Option<String>,

    #[serde(default)]
    pub estimate: Vec<RawEstimate>,
}

/// One predicted train, exactly as sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEstimate {
    /// Minutes until departure, or "Leaving".
    #[serde(default, deserialize_with = "lenient_string")]
    pub minutes: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub platform: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub direction: Option<String>,

    /// Number of cars.
    #[serde(default, deserialize_with = "lenient_string")]
    pub length: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub color: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub hexcolor: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub bikeflag: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub delay: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub cancelflag: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub dynamicflag: Option<String>,
}

/// Accept a string, a number or a boolean; anything else becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
