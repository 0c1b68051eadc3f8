use std::sync::Arc;

use log::debug;

use crate::core::change::{ChangeHandle, ChangeRequest};
use crate::core::ownership::belongs_to_zone;
use crate::core::provider::Route53Api;
use crate::core::zone::Zone;
use crate::error::{Error, Result};

pub const DEFAULT_RECORD_TTL: i64 = 60;
pub const DEFAULT_CHANGE_COMMENT: &str = "Managed by route53-registrar";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSettings {
    pub ttl: i64,
    pub comment: String,
}

impl Default for ChangeSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_RECORD_TTL,
            comment: DEFAULT_CHANGE_COMMENT.to_string(),
        }
    }
}

/// Submits CNAME changes to a resolved zone. Records outside the zone are refused before
/// anything reaches the provider.
pub struct ChangeSubmitter {
    api: Arc<dyn Route53Api>,
    settings: ChangeSettings,
}

impl ChangeSubmitter {
    pub fn new(api: Arc<dyn Route53Api>, settings: ChangeSettings) -> Self {
        Self { api, settings }
    }

    pub async fn upsert(&self, zone: &Zone, record_name: &str, value: &str) -> Result<ChangeHandle> {
        let request = ChangeRequest::upsert(record_name, value, self.settings.ttl);
        self.submit(zone, request).await
    }

    /// Deleting a record that does not exist comes back as a provider error; whether that
    /// counts as done is up to the caller.
    pub async fn delete(&self, zone: &Zone, record_name: &str) -> Result<ChangeHandle> {
        let request = ChangeRequest::delete(record_name);
        self.submit(zone, request).await
    }

    async fn submit(&self, zone: &Zone, request: ChangeRequest) -> Result<ChangeHandle> {
        if !belongs_to_zone(&request.record_name, zone.name()) {
            return Err(Error::RecordNotInZone {
                record: request.record_name,
                zone: zone.name().to_string(),
            });
        }

        let action = request.action;
        let batch = request.into_batch(&self.settings.comment);
        let info = self
            .api
            .change_resource_record_sets(zone.id(), batch)
            .await?;

        debug!(
            "route53 {:?} change {} has been submitted to zone {}",
            action,
            info.id,
            zone.id()
        );

        Ok(ChangeHandle::new(info.id))
    }
}
