//! Conversion from BART DTOs to domain types.
//!
//! Every fallback rule for untrusted provider fields lives here. A single
//! malformed value never rejects its estimate: it is logged and replaced
//! with the documented default.

use std::str::FromStr;

use tracing::debug;

use crate::domain::{
    ArrivalEstimate, DEFAULT_CAR_COUNT, DEFAULT_PLATFORM, DestinationGroup, LineColor,
    StationCode, StationSnapshot, UNKNOWN_MINUTES,
};

use super::types::{EtdResponse, RawEstimate, RawStation};

/// A single provider field that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed {field}: {value:?}")]
pub struct MalformedField {
    pub field: &'static str,
    pub value: String,
}

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The response has no `root.station[0]`
    #[error("response contains no station")]
    MissingStation,

    /// The station abbreviation is absent or not a valid code
    #[error("invalid station abbreviation: {0:?}")]
    InvalidAbbreviation(String),
}

/// Convert a full ETD response to the snapshot of its first station.
pub fn convert_response(response: &EtdResponse) -> Result<StationSnapshot, ConversionError> {
    let station = response
        .root
        .as_ref()
        .and_then(|root| root.station.first())
        .ok_or(ConversionError::MissingStation)?;

    convert_station(station)
}

/// Convert one station's board.
pub fn convert_station(raw: &RawStation) -> Result<StationSnapshot, ConversionError> {
    let abbr = raw.abbr.as_deref().unwrap_or_default();
    let code = StationCode::parse_normalized(abbr)
        .map_err(|_| ConversionError::InvalidAbbreviation(abbr.to_string()))?;

    let groups = raw
        .etd
        .iter()
        .map(|etd| {
            let destination = etd.destination.clone().unwrap_or_default();
            let estimates = etd
                .estimate
                .iter()
                .map(|est| convert_estimate(&destination, est))
                .collect();

            DestinationGroup {
                abbreviation: etd.abbreviation.clone().unwrap_or_default(),
                destination,
                estimates,
            }
        })
        .collect();

    Ok(StationSnapshot {
        name: raw.name.clone().unwrap_or_else(|| code.to_string()),
        code,
        groups,
    })
}

/// Normalize one raw estimate, applying every fallback rule.
///
/// | field    | fallback           |
/// |----------|--------------------|
/// | minutes  | `UNKNOWN_MINUTES`  |
/// | platform | `DEFAULT_PLATFORM` |
/// | length   | `DEFAULT_CAR_COUNT`|
/// | delay    | 0                  |
/// | color    | `LineColor::Blue`  |
///
/// Minutes at or beyond `UNKNOWN_MINUTES` are treated as unknown.
pub fn convert_estimate(destination: &str, raw: &RawEstimate) -> ArrivalEstimate {
    let platform = non_empty(raw.platform.as_deref())
        .unwrap_or(DEFAULT_PLATFORM)
        .to_string();

    let color = match non_empty(raw.color.as_deref()) {
        Some(c) => LineColor::parse(c).unwrap_or_else(|| {
            debug!(color = c, "unknown line colour, using default");
            LineColor::default()
        }),
        None => LineColor::default(),
    };

    let minutes = parse_or("minutes", raw.minutes.as_deref(), UNKNOWN_MINUTES);

    ArrivalEstimate {
        destination: destination.to_string(),
        minutes: minutes.min(UNKNOWN_MINUTES),
        platform,
        cars: parse_or("length", raw.length.as_deref(), DEFAULT_CAR_COUNT),
        delay_mins: parse_or("delay", raw.delay.as_deref(), 0),
        color,
        hex_color: non_empty(raw.hexcolor.as_deref()).map(str::to_string),
        direction: non_empty(raw.direction.as_deref()).map(str::to_string),
    }
}

/// Parse an optional field. Blank counts as absent.
fn parse_field<T: FromStr>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, MalformedField> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };

    raw.parse().map(Some).map_err(|_| MalformedField {
        field,
        value: raw.to_string(),
    })
}

fn parse_or<T: FromStr>(field: &'static str, raw: Option<&str>, default: T) -> T {
    match parse_field(field, raw) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            debug!(error = %e, "using default for malformed field");
            default
        }
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
