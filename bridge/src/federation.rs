use bytes::Bytes;
use http::{Method, StatusCode};
use log::{debug, info};
use wif_aws::{Credential, RequestSigner};
use wif_core::{Context, Error, ProvideCredential, Result, SignRequest};
use wif_google::FederationConfig;

/// Load the workload identity federation config stored in S3.
///
/// The object is fetched with a SigV4 signed `GET` using credentials from
/// `credential_provider`, then parsed as a [`FederationConfig`].
pub async fn load_federation_config(
    ctx: &Context,
    credential_provider: &dyn ProvideCredential<Credential = Credential>,
    bucket: &str,
    key: &str,
    region: &str,
) -> Result<FederationConfig> {
    let url = format!(
        "https://{bucket}.s3.{region}.amazonaws.com/{}",
        key.trim_start_matches('/')
    );
    debug!("loading federation config from {url}");

    let cred = credential_provider
        .provide_credential(ctx)
        .await?
        .ok_or_else(|| Error::credential_invalid("no AWS credentials found to read S3"))?;

    let (mut parts, body) = http::Request::builder()
        .method(Method::GET)
        .uri(&url)
        .body(Bytes::new())
        .map_err(|e| {
            Error::config_invalid("invalid S3 bucket or key")
                .with_source(e)
                .with_context(format!("url: {url}"))
        })?
        .into_parts();

    RequestSigner::new("s3", region)
        .sign_request(ctx, &mut parts, Some(&cred), None)
        .await?;

    let resp = ctx.http_send(http::Request::from_parts(parts, body)).await?;
    if resp.status() != StatusCode::OK {
        let status = resp.status();
        let err = match status {
            StatusCode::FORBIDDEN => Error::permission_denied("access to federation config denied"),
            StatusCode::NOT_FOUND => Error::config_invalid("federation config not found"),
            _ => Error::unexpected("failed to read federation config"),
        };
        return Err(err
            .with_context(format!("url: {url}"))
            .with_context(format!("status: {status}"))
            .with_context(format!("body: {}", String::from_utf8_lossy(resp.body())))
            .set_retryable(status.is_server_error()));
    }

    info!("Reading Workload Identity Federation credential configuration from S3");
    FederationConfig::from_slice(resp.body()).map_err(|e| e.with_context(format!("url: {url}")))
}
