use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_route53::Client;
use aws_sdk_route53::types::{
    Change, ChangeAction as SdkChangeAction, ChangeBatch as SdkChangeBatch, ResourceRecord,
    ResourceRecordSet, RrType,
};
use log::debug;

use crate::core::change::{ChangeAction, ChangeBatch, ChangeInfo, RecordSet};
use crate::core::provider::{HostedZoneDetail, HostedZoneSummary, ProviderError};
use crate::core::zone::normalize_name;
use crate::providers::route53::error::{map_change_error, map_status, missing};

pub const ENDPOINT_URL_ENV: &str = "ROUTE53_ENDPOINT_URL";

/// Route53 is global, but request signing still needs a region.
const FALLBACK_REGION: &str = "us-east-1";

pub struct AwsRoute53 {
    client: Client,
}

impl AwsRoute53 {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(conf: aws_sdk_route53::Config) -> Self {
        Self::new(Client::from_conf(conf))
    }

    /// Uses the standard AWS credential and region chain. `ROUTE53_ENDPOINT_URL` points the
    /// client somewhere else, e.g. LocalStack.
    pub async fn from_env() -> Self {
        let region = RegionProviderChain::default_provider().or_else(FALLBACK_REGION);
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Ok(endpoint) = std::env::var(ENDPOINT_URL_ENV) {
            debug!("using route53 endpoint {endpoint}");
            loader = loader.endpoint_url(endpoint);
        }
        Self::new(Client::new(&loader.load().await))
    }

    pub(crate) async fn list_zones(
        &self,
        dns_name: &str,
        max_items: i32,
    ) -> Result<Vec<HostedZoneSummary>, ProviderError> {
        let output = self
            .client
            .list_hosted_zones_by_name()
            .dns_name(dns_name)
            .max_items(max_items)
            .send()
            .await
            .map_err(|e| ProviderError::api("ListHostedZonesByName", e))?;

        Ok(output
            .hosted_zones()
            .iter()
            .map(|zone| HostedZoneSummary {
                id: zone.id().to_string(),
                name: zone.name().to_string(),
            })
            .collect())
    }

    pub(crate) async fn zone_detail(&self, zone_id: &str) -> Result<HostedZoneDetail, ProviderError> {
        let output = self
            .client
            .get_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| ProviderError::api("GetHostedZone", e))?;

        let zone = output
            .hosted_zone()
            .ok_or_else(|| missing("GetHostedZone", "HostedZone"))?;
        let nameservers = output
            .delegation_set()
            .map(|set| set.name_servers().to_vec())
            .unwrap_or_default();

        Ok(HostedZoneDetail {
            id: zone.id().to_string(),
            name: zone.name().to_string(),
            nameservers,
        })
    }

    pub(crate) async fn submit(
        &self,
        zone_id: &str,
        batch: ChangeBatch,
    ) -> Result<ChangeInfo, ProviderError> {
        let record_set = match batch.action {
            // Route53 only deletes a record set when it is named exactly, values included.
            ChangeAction::Delete if batch.record_set.values.is_empty() => {
                self.current_cname(zone_id, &batch.record_set.name).await?
            }
            _ => build_record_set(&batch.record_set)?,
        };

        let change = Change::builder()
            .action(sdk_action(batch.action))
            .resource_record_set(record_set)
            .build()
            .map_err(|e| ProviderError::api("ChangeResourceRecordSets", e))?;
        let change_batch = SdkChangeBatch::builder()
            .changes(change)
            .comment(batch.comment)
            .build()
            .map_err(|e| ProviderError::api("ChangeResourceRecordSets", e))?;

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(change_batch)
            .send()
            .await
            .map_err(|e| map_change_error(&batch.record_set.name, e))?;

        let info = output
            .change_info()
            .ok_or_else(|| missing("ChangeResourceRecordSets", "ChangeInfo"))?;
        Ok(ChangeInfo {
            id: info.id().to_string(),
            status: map_status(info.status()),
        })
    }

    pub(crate) async fn change(&self, change_id: &str) -> Result<ChangeInfo, ProviderError> {
        let output = self
            .client
            .get_change()
            .id(change_id)
            .send()
            .await
            .map_err(|e| ProviderError::api("GetChange", e))?;

        let info = output
            .change_info()
            .ok_or_else(|| missing("GetChange", "ChangeInfo"))?;
        Ok(ChangeInfo {
            id: info.id().to_string(),
            status: map_status(info.status()),
        })
    }

    async fn current_cname(
        &self,
        zone_id: &str,
        name: &str,
    ) -> Result<ResourceRecordSet, ProviderError> {
        let output = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(zone_id)
            .start_record_name(name)
            .start_record_type(RrType::Cname)
            .max_items(1)
            .send()
            .await
            .map_err(|e| ProviderError::api("ListResourceRecordSets", e))?;

        // The listing starts at the given name but happily returns whatever record follows it.
        output
            .resource_record_sets()
            .iter()
            .find(|set| {
                *set.r#type() == RrType::Cname && normalize_name(set.name()) == normalize_name(name)
            })
            .cloned()
            .ok_or_else(|| ProviderError::RecordSetNotFound {
                name: name.to_string(),
            })
    }
}

fn sdk_action(action: ChangeAction) -> SdkChangeAction {
    match action {
        ChangeAction::Upsert => SdkChangeAction::Upsert,
        ChangeAction::Delete => SdkChangeAction::Delete,
    }
}

pub(crate) fn build_record_set(set: &RecordSet) -> Result<ResourceRecordSet, ProviderError> {
    let mut builder = ResourceRecordSet::builder()
        .name(&set.name)
        .r#type(RrType::Cname);
    if let Some(ttl) = set.ttl {
        builder = builder.ttl(ttl);
    }
    for value in &set.values {
        let record = ResourceRecord::builder()
            .value(value)
            .build()
            .map_err(|e| ProviderError::api("ChangeResourceRecordSets", e))?;
        builder = builder.resource_records(record);
    }
    builder
        .build()
        .map_err(|e| ProviderError::api("ChangeResourceRecordSets", e))
}
