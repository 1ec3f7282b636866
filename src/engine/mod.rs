//! The IP-state refresh engine.
//!
//! This module provides:
//! - The engine owning the current [`crate::identity::NetworkIdentity`]
//!   ([`RefreshEngine`])
//! - Change notifications ([`IdentityUpdated`])
//! - The periodic schedule and its cancellation handle ([`RefreshHandle`])
//! - Error handling ([`EngineError`])

mod error;
mod refresh;
mod schedule;
mod subscribers;

#[cfg(test)]
mod test_fixtures;

pub use error::EngineError;
pub use refresh::RefreshEngine;
pub use schedule::RefreshHandle;
pub use subscribers::IdentityUpdated;
