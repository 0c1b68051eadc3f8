//! Scripted provider and leak-tracking timers shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::change::{ChangeBatch, ChangeInfo, ChangeStatus};
use crate::core::provider::{HostedZoneDetail, HostedZoneSummary, ProviderError, Route53Api};
use crate::timer::{Deadline, Ticker, Timers, TokioTimers};

pub type StatusResult = Result<ChangeStatus, ProviderError>;

/// Route53 stand-in that records every call and replays scripted change statuses.
#[derive(Default)]
pub struct StubRoute53 {
    pub zones: Vec<HostedZoneDetail>,
    pub statuses: Mutex<VecDeque<StatusResult>>,
    pub missing_records: Vec<String>,
    pub submitted: Mutex<Vec<ChangeBatch>>,
    pub polled: Mutex<Vec<String>>,
    pub list_calls: AtomicUsize,
    pub get_zone_calls: AtomicUsize,
    pub next_change: AtomicUsize,
}

impl StubRoute53 {
    pub fn with_zone(name: &str, id: &str, nameservers: &[&str]) -> Self {
        Self {
            zones: vec![HostedZoneDetail {
                id: id.to_string(),
                name: name.to_string(),
                nameservers: nameservers.iter().map(ToString::to_string).collect(),
            }],
            ..Self::default()
        }
    }

    pub fn script(self, statuses: impl IntoIterator<Item = StatusResult>) -> Self {
        self.statuses.lock().unwrap().extend(statuses);
        self
    }

    pub fn submitted(&self) -> Vec<ChangeBatch> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn polled(&self) -> Vec<String> {
        self.polled.lock().unwrap().clone()
    }
}

#[async_trait]
impl Route53Api for StubRoute53 {
    async fn list_hosted_zones_by_name(
        &self,
        dns_name: &str,
        max_items: i32,
    ) -> Result<Vec<HostedZoneSummary>, ProviderError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Route53 lists zones in order starting at the requested name, exact or not.
        Ok(self
            .zones
            .iter()
            .filter(|zone| zone.name.as_str() >= dns_name)
            .take(usize::try_from(max_items).unwrap_or(0))
            .map(|zone| HostedZoneSummary {
                id: zone.id.clone(),
                name: zone.name.clone(),
            })
            .collect())
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZoneDetail, ProviderError> {
        self.get_zone_calls.fetch_add(1, Ordering::SeqCst);
        self.zones
            .iter()
            .find(|zone| zone.id == zone_id)
            .cloned()
            .ok_or_else(|| ProviderError::api("GetHostedZone", "NoSuchHostedZone"))
    }

    async fn change_resource_record_sets(
        &self,
        _zone_id: &str,
        batch: ChangeBatch,
    ) -> Result<ChangeInfo, ProviderError> {
        if self.missing_records.contains(&batch.record_set.name) {
            return Err(ProviderError::RecordSetNotFound {
                name: batch.record_set.name,
            });
        }
        self.submitted.lock().unwrap().push(batch);
        let n = self.next_change.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ChangeInfo {
            id: format!("/change/C{n}"),
            status: ChangeStatus::Pending,
        })
    }

    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo, ProviderError> {
        self.polled.lock().unwrap().push(change_id.to_string());
        let next = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ChangeStatus::Insync));
        next.map(|status| ChangeInfo {
            id: change_id.to_string(),
            status,
        })
    }
}

/// Wraps the tokio timers and counts how many are alive.
#[derive(Clone, Default)]
pub struct TrackingTimers {
    live: Arc<AtomicUsize>,
    created: Arc<AtomicUsize>,
}

impl TrackingTimers {
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    fn guard(&self) -> LiveGuard {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        LiveGuard(self.live.clone())
    }
}

struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct TrackedTicker {
    inner: Box<dyn Ticker>,
    _guard: LiveGuard,
}

#[async_trait]
impl Ticker for TrackedTicker {
    async fn tick(&mut self) {
        self.inner.tick().await;
    }
}

impl Timers for TrackingTimers {
    fn interval(&self, period: Duration) -> Box<dyn Ticker> {
        Box::new(TrackedTicker {
            inner: TokioTimers.interval(period),
            _guard: self.guard(),
        })
    }

    fn deadline(&self, after: Duration) -> Deadline {
        let guard = self.guard();
        let sleep = TokioTimers.deadline(after);
        Box::pin(async move {
            let _guard = guard;
            sleep.await;
        })
    }
}
