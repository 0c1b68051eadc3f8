//! Timers the change watcher races against each other.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Instant, MissedTickBehavior};

pub type Deadline = Pin<Box<dyn Future<Output = ()> + Send>>;

#[async_trait]
pub trait Ticker: Send {
    /// Resolves on the next tick.
    async fn tick(&mut self);
}

pub trait Timers: Send + Sync {
    /// A ticker whose first tick lands one full `period` after creation.
    fn interval(&self, period: Duration) -> Box<dyn Ticker>;

    fn deadline(&self, after: Duration) -> Deadline;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimers;

struct TokioTicker(time::Interval);

#[async_trait]
impl Ticker for TokioTicker {
    async fn tick(&mut self) {
        self.0.tick().await;
    }
}

impl Timers for TokioTimers {
    fn interval(&self, period: Duration) -> Box<dyn Ticker> {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Box::new(TokioTicker(interval))
    }

    fn deadline(&self, after: Duration) -> Deadline {
        Box::pin(time::sleep(after))
    }
}
