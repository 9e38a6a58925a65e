//! Reqwest-based HTTP sending for the wif context.
//!
//! ```no_run
//! use wif_core::{Context, OsEnv};
//! use wif_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};
use wif_core::{Error, HttpSend, Result};

/// HttpSend implementation backed by a [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let uri = req.uri().to_string();
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert http request")
                .with_source(e)
                .with_context(format!("uri: {uri}"))
        })?;

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                let retryable = e.is_timeout() || e.is_connect();
                Error::unexpected("failed to send http request")
                    .with_source(e)
                    .with_context(format!("uri: {uri}"))
                    .set_retryable(retryable)
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::unexpected("failed to read http response body")
                    .with_source(e)
                    .with_context(format!("uri: {uri}"))
                    .set_retryable(true)
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
