use crate::core::change::{ChangeBatch, ChangeInfo};
use async_trait::async_trait;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The record set named by a delete does not exist at the provider.
    #[error("record set {name} was not found")]
    RecordSetNotFound { name: String },

    #[error("{operation} failed: {source}")]
    Api {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl ProviderError {
    pub fn api(operation: &'static str, source: impl Into<BoxError>) -> Self {
        ProviderError::Api {
            operation,
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZoneSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZoneDetail {
    pub id: String,
    pub name: String,
    pub nameservers: Vec<String>,
}

/// The slice of the Route53 API the registrar relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Route53Api: Send + Sync {
    async fn list_hosted_zones_by_name(
        &self,
        dns_name: &str,
        max_items: i32,
    ) -> Result<Vec<HostedZoneSummary>, ProviderError>;

    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZoneDetail, ProviderError>;

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        batch: ChangeBatch,
    ) -> Result<ChangeInfo, ProviderError>;

    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo, ProviderError>;
}
