//! Provider-agnostic building blocks: zones, record ownership and change payloads.

pub mod change;
pub mod ownership;
pub mod provider;
pub mod zone;
