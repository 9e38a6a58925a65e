use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::{Method, StatusCode};
use log::debug;
use serde::Deserialize;
use wif_core::time::parse_rfc3339;
use wif_core::{Context, Error, ProvideCredential, Result};

/// EcsCredentialProvider loads credentials from the ECS container credentials endpoint.
///
/// The endpoint is resolved from, in order:
/// - `AWS_CONTAINER_CREDENTIALS_RELATIVE_URI`, appended to `http://169.254.170.2`
/// - `AWS_CONTAINER_CREDENTIALS_FULL_URI`, used as is
///
/// If `AWS_CONTAINER_AUTHORIZATION_TOKEN` is set, it's sent as the
/// `Authorization` header.
///
/// References:
/// - [IAM roles for tasks](https://docs.aws.amazon.com/AmazonECS/latest/developerguide/task-iam-roles.html)
#[derive(Debug, Default, Clone)]
pub struct EcsCredentialProvider {
    endpoint: Option<String>,
}

impl EcsCredentialProvider {
    /// Create a new `EcsCredentialProvider` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base endpoint used with `AWS_CONTAINER_CREDENTIALS_RELATIVE_URI`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    fn url(&self, ctx: &Context) -> Option<String> {
        let relative_uri = ctx
            .env_var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI)
            .filter(|v| !v.is_empty());
        let full_uri = ctx
            .env_var(AWS_CONTAINER_CREDENTIALS_FULL_URI)
            .filter(|v| !v.is_empty());

        match (relative_uri, full_uri) {
            (Some(relative), _) => {
                let endpoint = self.endpoint.as_deref().unwrap_or(ECS_CONTAINER_ENDPOINT);
                Some(format!("{}{relative}", endpoint.trim_end_matches('/')))
            }
            (None, Some(full)) => Some(full),
            (None, None) => None,
        }
    }
}

#[async_trait]
impl ProvideCredential for EcsCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(url) = self.url(ctx) else {
            debug!("not running in ECS, skip container credentials");
            return Ok(None);
        };

        let mut req = http::Request::builder().uri(&url).method(Method::GET);
        if let Some(token) = ctx
            .env_var(AWS_CONTAINER_AUTHORIZATION_TOKEN)
            .filter(|v| !v.is_empty())
        {
            req = req.header(AUTHORIZATION, token);
        }
        let req = req.body(Bytes::new()).map_err(|e| {
            Error::unexpected("failed to build ECS credentials request").with_source(e)
        })?;

        let resp = ctx.http_send_as_string(req).await.map_err(|e| {
            Error::unexpected("failed to reach ECS credentials endpoint")
                .with_source(e)
                .with_context(format!("url: {url}"))
                .set_retryable(true)
        })?;

        if resp.status() != StatusCode::OK {
            let status = resp.status();
            let err = Error::credential_invalid(format!(
                "request to ECS credentials endpoint failed: status={status}, body={}",
                resp.body()
            ))
            .with_context(format!("url: {url}"));
            return Err(err.set_retryable(status.is_server_error()));
        }

        let cred: EcsTaskCredentials = serde_json::from_str(resp.body()).map_err(|e| {
            Error::unexpected("failed to parse ECS task credentials").with_source(e)
        })?;

        let expires_in = parse_rfc3339(&cred.expiration).map_err(|e| {
            Error::unexpected("failed to parse ECS credentials expiration").with_source(e)
        })?;

        debug!("loaded credential from ECS, expires at {expires_in}");
        Ok(Some(Credential {
            access_key_id: cred.access_key_id,
            secret_access_key: cred.secret_access_key,
            session_token: Some(cred.token),
            expires_in: Some(expires_in),
        }))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EcsTaskCredentials {
    access_key_id: String,
    secret_access_key: String,
    token: String,
    expiration: String,
}
