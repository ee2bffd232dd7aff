//! Per-batch HTTP client construction.

use std::time::Duration;

use reqwest::{
    header,
    header::{HeaderMap, HeaderValue},
    Client,
};

use crate::prelude::*;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the client shared by all provider calls of one batch.
///
/// The client is dropped when the batch finishes, releasing the connection
/// pool on every exit path.
pub fn build_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(concat!("geofuse / ", env!("CARGO_PKG_VERSION"), " (Rust)")),
    );
    Client::builder()
        .gzip(true)
        .use_rustls_tls()
        .default_headers(headers)
        .timeout(DEFAULT_TIMEOUT)
        .pool_idle_timeout(Some(Duration::from_secs(600)))
        .build()
        .context("failed to build an HTTP client")
}
