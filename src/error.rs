use std::time::Duration;

use thiserror::Error;

use crate::core::provider::ProviderError;

/// Every failure the registrar core can hand back to a caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not find a Route53 hosted zone for {domain}")]
    NoHostedZoneFound { domain: String },

    #[error("record {record} does not belong to zone {zone}")]
    RecordNotInZone { record: String, zone: String },

    #[error("timed out after {timeout:?} waiting for change {change_id} to be applied")]
    WatchTimedOut { change_id: String, timeout: Duration },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type Result<T> = std::result::Result<T, Error>;
