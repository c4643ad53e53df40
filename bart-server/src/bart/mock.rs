//! Mock BART client for running without the live API.
//!
//! Loads sample ETD responses from JSON files and serves them as if they
//! were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{StationCode, StationSnapshot};

use super::convert::convert_response;
use super::error::BartError;
use super::types::EtdResponse;

/// Serves fixed ETD boards, one per station, loaded once at startup.
#[derive(Clone)]
pub struct MockBartClient {
    boards: Arc<HashMap<StationCode, EtdResponse>>,
}

impl MockBartClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{CODE}.json` (e.g., `EMBR.json`, `MONT.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, BartError> {
        Ok(Self::from_boards(load_boards(data_dir.as_ref())?))
    }

    /// Create a mock client from already-parsed responses.
    pub fn from_boards(boards: HashMap<StationCode, EtdResponse>) -> Self {
        Self {
            boards: Arc::new(boards),
        }
    }

    /// Get the departure board for a station.
    ///
    /// Mimics `BartClient::get_etd`. A station with no file behaves like an
    /// API error.
    pub async fn get_etd(&self, code: StationCode) -> Result<StationSnapshot, BartError> {
        let response = self.boards.get(&code).ok_or_else(|| BartError::Api {
            status: 404,
            message: format!(
                "No mock data for station {}. Available: {:?}",
                code,
                self.available_stations()
            ),
        })?;

        convert_response(response).map_err(|source| BartError::NoStationData {
            station: code,
            source,
        })
    }

    /// Stations with a board, sorted.
    pub fn available_stations(&self) -> Vec<StationCode> {
        let mut codes: Vec<StationCode> = self.boards.keys().copied().collect();
        codes.sort();
        codes
    }
}

fn load_boards(data_dir: &Path) -> Result<HashMap<StationCode, EtdResponse>, BartError> {
    let mut boards = HashMap::new();

    let entries = std::fs::read_dir(data_dir).map_err(|e| BartError::Api {
        status: 0,
        message: format!("Failed to read mock data directory: {}", e),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| BartError::Api {
            status: 0,
            message: format!("Failed to read directory entry: {}", e),
        })?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        // "EMBR.json" -> "EMBR"
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| BartError::Api {
                status: 0,
                message: format!("Invalid filename: {:?}", path),
            })?;

        let code = StationCode::parse(stem).map_err(|e| BartError::Api {
            status: 0,
            message: format!("Invalid station code in filename: {}", e),
        })?;

        let json = std::fs::read_to_string(&path).map_err(|e| BartError::Api {
            status: 0,
            message: format!("Failed to read {:?}: {}", path, e),
        })?;

        let response: EtdResponse = serde_json::from_str(&json).map_err(|e| BartError::Json {
            message: format!("Failed to parse {:?}: {}", path, e),
            body: None,
        })?;

        boards.insert(code, response);
    }

    if boards.is_empty() {
        return Err(BartError::Api {
            status: 0,
            message: format!("No mock board files found in {:?}", data_dir),
        });
    }

    Ok(boards)
}
