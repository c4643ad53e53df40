//! Source of station snapshots.

use std::future::Future;

use crate::domain::{StationCode, StationSnapshot};

use super::client::BartClient;
use super::error::BartError;
use super::mock::MockBartClient;

/// Trait for providing live departure boards.
///
/// This abstraction allows the fetcher and cache to be tested with
/// in-memory data.
pub trait EtdProvider: Send + Sync {
    /// Fetch one station's current board.
    fn station_etd(
        &self,
        code: StationCode,
    ) -> impl Future<Output = Result<StationSnapshot, BartError>> + Send;
}

impl EtdProvider for BartClient {
    fn station_etd(
        &self,
        code: StationCode,
    ) -> impl Future<Output = Result<StationSnapshot, BartError>> + Send {
        self.get_etd(code)
    }
}

impl EtdProvider for MockBartClient {
    fn station_etd(
        &self,
        code: StationCode,
    ) -> impl Future<Output = Result<StationSnapshot, BartError>> + Send {
        self.get_etd(code)
    }
}

/// The provider the server runs against, chosen at startup.
#[derive(Clone)]
pub enum Upstream {
    Live(BartClient),
    Mock(MockBartClient),
}

impl EtdProvider for Upstream {
    async fn station_etd(&self, code: StationCode) -> Result<StationSnapshot, BartError> {
        match self {
            Upstream::Live(client) => client.get_etd(code).await,
            Upstream::Mock(client) => client.get_etd(code).await,
        }
    }
}
