//! HTTP transport module
//!
//! The connector core only sees the `Transport` trait: a GET with a URL and
//! query map that yields a status code and a body. `HttpClient` is the
//! bundled implementation; it handles authentication, retries with backoff,
//! rate limiting, and timeouts.

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{Transport, TransportResponse};
