//! AWS Route53 provider backed by the official SDK

pub mod client;
pub mod error;


pub use client::AwsRoute53;

use crate::core::change::{ChangeBatch, ChangeInfo};
use crate::core::provider::{HostedZoneDetail, HostedZoneSummary, ProviderError, Route53Api};
use async_trait::async_trait;

#[async_trait]
impl Route53Api for AwsRoute53 {
    async fn list_hosted_zones_by_name(
        &self,
        dns_name: &str,
        max_items: i32,
    ) -> Result<Vec<HostedZoneSummary>, ProviderError> {
        self.list_zones(dns_name, max_items).await
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZoneDetail, ProviderError> {
        self.zone_detail(zone_id).await
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        batch: ChangeBatch,
    ) -> Result<ChangeInfo, ProviderError> {
        self.submit(zone_id, batch).await
    }

    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo, ProviderError> {
        self.change(change_id).await
    }
}
