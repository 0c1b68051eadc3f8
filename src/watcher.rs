//! Waits for a submitted change to reach the nameservers.
//!
//! Each wait owns an interval ticker and a deadline. Every tick polls the change status; the
//! deadline cancels the wait at any point, including mid-poll. Nothing is retried: a failed
//! poll ends the wait just like the deadline does.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::core::change::{ChangeHandle, ChangeStatus};
use crate::core::provider::{ProviderError, Route53Api};
use crate::error::{Error, Result};
use crate::timer::Timers;

pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_WATCH_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_WATCH_INTERVAL,
            timeout: DEFAULT_WATCH_TIMEOUT,
        }
    }
}

#[derive(Debug)]
enum WatchState {
    Polling,
    Applied,
    TimedOut,
    Errored(ProviderError),
}

pub struct ChangeWatcher {
    api: Arc<dyn Route53Api>,
    timers: Arc<dyn Timers>,
    settings: WatchSettings,
}

impl ChangeWatcher {
    pub fn new(api: Arc<dyn Route53Api>, timers: Arc<dyn Timers>, settings: WatchSettings) -> Self {
        Self {
            api,
            timers,
            settings,
        }
    }

    /// Blocks until the change is `INSYNC`, the status poll fails, or the timeout elapses.
    /// A timeout does not undo the change; it may still apply later.
    pub async fn await_applied(&self, handle: &ChangeHandle) -> Result<()> {
        let mut ticker = self.timers.interval(self.settings.interval);
        let mut deadline = self.timers.deadline(self.settings.timeout);

        let result = loop {
            let state = tokio::select! {
                biased;
                () = &mut deadline => WatchState::TimedOut,
                next = async {
                    ticker.tick().await;
                    self.poll(handle).await
                } => next,
            };

            match state {
                WatchState::Polling => continue,
                WatchState::Applied => break Ok(()),
                WatchState::TimedOut => {
                    break Err(Error::WatchTimedOut {
                        change_id: handle.id().to_string(),
                        timeout: self.settings.timeout,
                    });
                }
                WatchState::Errored(err) => break Err(err.into()),
            }
        };

        drop(ticker);
        drop(deadline);

        if result.is_ok() {
            info!("route53 change {handle} is in sync");
        }
        result
    }

    async fn poll(&self, handle: &ChangeHandle) -> WatchState {
        match self.api.get_change(handle.id()).await {
            Err(err) => WatchState::Errored(err),
            Ok(info) if info.status == ChangeStatus::Insync => WatchState::Applied,
            Ok(_) => {
                debug!(
                    "route53 change {handle} is still being applied, waiting for {:?}",
                    self.settings.interval
                );
                WatchState::Polling
            }
        }
    }
}
