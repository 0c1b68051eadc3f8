//! One hosted zone's worth of CNAME management: resolve once, then submit and confirm changes.

use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{Config, MissingRecordPolicy};
use crate::core::change::ChangeHandle;
use crate::core::provider::{ProviderError, Route53Api};
use crate::core::zone::Zone;
use crate::error::{Error, Result};
use crate::resolver::resolve_zone;
use crate::submitter::ChangeSubmitter;
use crate::timer::{Timers, TokioTimers};
use crate::watcher::ChangeWatcher;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "change_id", rename_all = "snake_case")]
pub enum ChangeOutcome {
    /// The provider reports the change as in sync.
    Applied(ChangeHandle),
    /// Accepted by the provider; propagation was not awaited.
    Submitted(ChangeHandle),
    /// The record to delete was already gone.
    AlreadyAbsent,
}

/// Callers changing the same record concurrently must serialize themselves.
pub struct ZoneRegistrar {
    zone: Zone,
    submitter: ChangeSubmitter,
    watcher: ChangeWatcher,
    wait_for_sync: bool,
    missing_record: MissingRecordPolicy,
}

impl ZoneRegistrar {
    pub async fn connect(api: Arc<dyn Route53Api>, domain: &str, config: &Config) -> Result<Self> {
        Self::connect_with_timers(api, Arc::new(TokioTimers), domain, config).await
    }

    pub async fn connect_with_timers(
        api: Arc<dyn Route53Api>,
        timers: Arc<dyn Timers>,
        domain: &str,
        config: &Config,
    ) -> Result<Self> {
        let zone = resolve_zone(api.as_ref(), domain).await?;

        Ok(Self {
            zone,
            submitter: ChangeSubmitter::new(api.clone(), config.change.clone()),
            watcher: ChangeWatcher::new(api, timers, config.watch),
            wait_for_sync: config.wait_for_sync,
            missing_record: config.missing_record,
        })
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub async fn upsert_cname(&self, record_name: &str, value: &str) -> Result<ChangeOutcome> {
        let handle = self.submitter.upsert(&self.zone, record_name, value).await?;
        self.finish(handle).await
    }

    pub async fn delete_cname(&self, record_name: &str) -> Result<ChangeOutcome> {
        match self.submitter.delete(&self.zone, record_name).await {
            Ok(handle) => self.finish(handle).await,
            Err(Error::Provider(ProviderError::RecordSetNotFound { name }))
                if self.missing_record == MissingRecordPolicy::Ignore =>
            {
                warn!("route53 record {name} is already absent, nothing to delete");
                Ok(ChangeOutcome::AlreadyAbsent)
            }
            Err(err) => Err(err),
        }
    }

    async fn finish(&self, handle: ChangeHandle) -> Result<ChangeOutcome> {
        if !self.wait_for_sync {
            info!("route53 change {handle} submitted, not waiting for nameservers to sync");
            return Ok(ChangeOutcome::Submitted(handle));
        }

        debug!("route53 changes have been submitted, waiting for nameservers to sync");
        self.watcher.await_applied(&handle).await?;
        Ok(ChangeOutcome::Applied(handle))
    }
}
