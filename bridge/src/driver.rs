use bytes::Bytes;
use http::{header, Method, StatusCode};
use log::{debug, info};
use serde_json::Value;
use wif_core::{Context, Error, Result, Signer};
use wif_google::AwsExternalAccountCredentialProvider;

use crate::config::DriverConfig;
use crate::federation::load_federation_config;
use crate::supplier::DefaultAwsSecurityCredentialsSupplier;

/// Driver runs the whole federation flow once.
///
/// It reads the federation config from S3, mints a Google token from the
/// workload's AWS credentials and calls `api_url` with it.
#[derive(Debug)]
pub struct Driver {
    ctx: Context,
    config: DriverConfig,
    supplier: DefaultAwsSecurityCredentialsSupplier,
}

impl Driver {
    /// Create a new driver with the default supplier.
    pub fn new(ctx: Context, config: DriverConfig) -> Self {
        Self {
            supplier: DefaultAwsSecurityCredentialsSupplier::new(ctx.clone()),
            ctx,
            config,
        }
    }

    /// Create a new driver with config loaded from the environment of `ctx`.
    pub fn from_env(ctx: Context) -> Result<Self> {
        let config = DriverConfig::from_env(&ctx)?;
        Ok(Self::new(ctx, config))
    }

    /// Replace the AWS credentials supplier.
    pub fn with_supplier(mut self, supplier: DefaultAwsSecurityCredentialsSupplier) -> Self {
        self.supplier = supplier;
        self
    }

    /// Config used by this driver.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run the flow and return the JSON body returned by `api_url`.
    pub async fn run(self) -> Result<Value> {
        let region = self.config.region.as_deref().ok_or_else(|| {
            Error::config_invalid(format!(
                "{} environment variable is not set",
                wif_aws::AWS_REGION
            ))
        })?;

        let federation = load_federation_config(
            &self.ctx,
            self.supplier.credential_provider(),
            &self.config.s3_bucket_name,
            &self.config.config_key,
            region,
        )
        .await?;

        let provider = self
            .config
            .scopes
            .iter()
            .fold(
                AwsExternalAccountCredentialProvider::new(federation, self.supplier),
                |provider, scope| provider.with_scope(scope),
            );
        info!("GCP WIF Credentials Object Created");

        let signer = Signer::new(self.ctx.clone(), provider, wif_google::RequestSigner::new());

        info!("Making an authenticated request to {}", self.config.api_url);
        let (mut parts, body) = http::Request::builder()
            .method(Method::GET)
            .uri(&self.config.api_url)
            .header(header::ACCEPT, "application/json")
            .body(Bytes::new())
            .map_err(|e| {
                Error::config_invalid("invalid api url")
                    .with_source(e)
                    .with_context(format!("url: {}", self.config.api_url))
            })?
            .into_parts();
        signer.sign(&mut parts, None).await?;

        let resp = self
            .ctx
            .http_send(http::Request::from_parts(parts, body))
            .await?;
        let status = resp.status();
        debug!("api responded with status {status}");

        if status != StatusCode::OK {
            let err = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    Error::permission_denied("federated token was rejected")
                }
                _ => Error::unexpected("api call failed"),
            };
            return Err(err
                .with_context(format!("url: {}", self.config.api_url))
                .with_context(format!("status: {status}"))
                .with_context(format!("body: {}", String::from_utf8_lossy(resp.body())))
                .set_retryable(status.is_server_error()));
        }

        info!("Response of GCP API call received");
        serde_json::from_slice(resp.body())
            .map_err(|e| Error::unexpected("api response is not valid JSON").with_source(e))
    }
}
