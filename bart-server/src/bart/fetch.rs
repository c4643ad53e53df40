//! Concurrent snapshot fetching for a roster of stations.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{StationCode, StationData};

use super::error::BartError;
use super::provider::EtdProvider;

/// Fetch every station in `codes` concurrently.
///
/// Each station is fetched independently under its own `timeout`. A station
/// whose fetch fails, times out, or returns no usable board maps to `None`;
/// siblings are unaffected. The result has exactly one entry per code.
pub async fn fetch_stations<P: EtdProvider>(
    provider: &P,
    codes: &[StationCode],
    timeout: Duration,
) -> StationData {
    let futures: Vec<_> = codes
        .iter()
        .map(|&code| async move {
            let result = match tokio::time::timeout(timeout, provider.station_etd(code)).await {
                Ok(result) => result,
                Err(_) => Err(BartError::Timeout(code)),
            };

            match result {
                Ok(snapshot) => {
                    debug!(station = %code, groups = snapshot.groups.len(), "fetched ETD board");
                    (code, Some(Arc::new(snapshot)))
                }
                Err(e) => {
                    warn!(station = %code, error = %e, "failed to fetch ETD board, treating as unavailable");
                    (code, None)
                }
            }
        })
        .collect();

    join_all(futures).await.into_iter().collect()
}
