//! BART real-time departures (ETD) client.
//!
//! This module provides an HTTP client for the BART legacy API's
//! `etd.aspx?cmd=etd` endpoint, a file-backed mock, and the concurrent
//! fetcher the planner uses to snapshot its station roster.
//!
//! Key characteristics of the ETD feed:
//! - Every value is a string, including numbers; fields are often omitted
//! - Minutes may be the literal "Leaving" for a train at the platform
//! - Estimates within a destination line are not guaranteed to be sorted

mod client;
mod convert;
mod error;
mod fetch;
mod mock;
mod provider;
mod types;

pub use client::{BartClient, BartConfig, PUBLIC_API_KEY};
pub use convert::{ConversionError, MalformedField, convert_estimate, convert_response};
pub use error::BartError;
pub use fetch::fetch_stations;
pub use mock::MockBartClient;
pub use provider::{EtdProvider, Upstream};
pub use types::{EtdResponse, EtdRoot, RawEstimate, RawEtd, RawStation};
