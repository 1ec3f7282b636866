//! ipwatch: local and external IP address monitor
//!
//! A library that keeps the host's network identity (non-loopback IPv4
//! addresses plus the externally visible address) up to date on a fixed
//! schedule and publishes every refresh to subscribers.

pub mod config;
pub mod engine;
pub mod identity;
pub mod lookup;
pub mod network;
pub mod time;
pub mod view;
