//! Manages CNAME records in a single Route53 hosted zone and confirms each change has reached
//! the zone's nameservers before returning.

pub mod config;
pub mod core;
pub mod error;
pub mod providers;
pub mod registrar;
pub mod resolver;
pub mod submitter;
pub mod timer;
pub mod watcher;

#[cfg(test)]
mod test_support;

pub use config::{Config, ConfigError, MissingRecordPolicy};
pub use crate::core::change::{ChangeHandle, ChangeStatus};
pub use crate::core::ownership::belongs_to_zone;
pub use crate::core::provider::{ProviderError, Route53Api};
pub use crate::core::zone::Zone;
pub use error::{Error, Result};
pub use registrar::{ChangeOutcome, ZoneRegistrar};
