use wif_core::{Context, Error, Result};
use wif_google::DEFAULT_SCOPE;

/// Bucket holding the federation config. Required.
pub const S3_BUCKET_NAME: &str = "S3_BUCKET_NAME";
/// Object key of the federation config.
pub const WIF_CONFIG_KEY: &str = "WIF_CONFIG_KEY";
/// Comma separated OAuth2 scopes.
pub const WIF_SCOPES: &str = "WIF_SCOPES";
/// Google API to call once federated.
pub const WIF_API_URL: &str = "WIF_API_URL";

const DEFAULT_CONFIG_KEY: &str = "client_config.json";
const DEFAULT_API_URL: &str = "https://cloudresourcemanager.googleapis.com/v1/projects";

/// Config of the bridge driver, read from environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Bucket holding the federation config.
    pub s3_bucket_name: String,
    /// Object key of the federation config.
    pub config_key: String,
    /// Region of the bucket, read from `AWS_REGION`.
    pub region: Option<String>,
    /// OAuth2 scopes requested for the federated token.
    pub scopes: Vec<String>,
    /// API called with the federated token.
    pub api_url: String,
}

impl DriverConfig {
    /// Load config from the environment of `ctx`.
    pub fn from_env(ctx: &Context) -> Result<Self> {
        let non_empty = |key: &str| ctx.env_var(key).filter(|v| !v.trim().is_empty());

        let s3_bucket_name = non_empty(S3_BUCKET_NAME).ok_or_else(|| {
            Error::config_invalid(format!("{S3_BUCKET_NAME} environment variable not set"))
        })?;

        let scopes = non_empty(WIF_SCOPES)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_SCOPE.to_string()]);

        Ok(Self {
            s3_bucket_name,
            config_key: non_empty(WIF_CONFIG_KEY).unwrap_or_else(|| DEFAULT_CONFIG_KEY.to_string()),
            region: non_empty(wif_aws::AWS_REGION),
            scopes,
            api_url: non_empty(WIF_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}
