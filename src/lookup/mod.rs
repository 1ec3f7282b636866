//! External address lookup over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - The bounded "what is my address" probe ([`ExternalAddressProbe`])

mod client;
mod error;
mod http;
mod probe;


pub use client::ReqwestClient;
pub use error::{HttpError, LookupError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use probe::ExternalAddressProbe;
