use crate::constants::AWS_REGION;
use log::debug;
use wif_core::{Context, Error, Result};

/// EnvRegionProvider reads the AWS region from a single environment variable.
///
/// The variable is read on every call and returned exactly as set. An unset,
/// empty or whitespace-only value is an error.
///
/// Defaults to `AWS_REGION`, which ECS sets for every task.
#[derive(Debug, Clone)]
pub struct EnvRegionProvider {
    key: String,
}

impl Default for EnvRegionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvRegionProvider {
    /// Create a new `EnvRegionProvider` reading `AWS_REGION`.
    pub fn new() -> Self {
        Self {
            key: AWS_REGION.to_string(),
        }
    }

    /// Read the region from another environment variable.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The environment variable this provider reads.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the configured region.
    pub fn provide_region(&self, ctx: &Context) -> Result<String> {
        let region = ctx
            .env_var(&self.key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                Error::config_invalid(format!("{} environment variable is not set", self.key))
                    .with_context("hint: set it to the AWS region of this workload, like us-east-1")
            })?;

        debug!("loaded region {region} from {}", self.key);
        Ok(region)
    }
}
