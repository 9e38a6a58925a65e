use crate::constants::DEFAULT_TOKEN_URL;
use serde::Deserialize;
use wif_core::{Error, Result};

/// FederationConfig is the workload identity federation client configuration.
///
/// It's the `external_account` JSON document generated by
/// `gcloud iam workload-identity-pools create-cred-config`. Fields that only
/// matter to other credential sources, like `credential_source`, are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FederationConfig {
    /// The workload identity pool provider resource name.
    pub audience: String,
    /// The subject token type, `urn:ietf:params:aws:token-type:aws4_request` for AWS.
    pub subject_token_type: String,
    /// The STS endpoint that exchanges the subject token.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// The URL used to impersonate a service account, if any.
    #[serde(default)]
    pub service_account_impersonation_url: Option<String>,
    /// Options for service account impersonation.
    #[serde(default)]
    pub service_account_impersonation: Option<ServiceAccountImpersonation>,
}

/// Options for service account impersonation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ServiceAccountImpersonation {
    /// The lifetime of the impersonated token in seconds.
    pub token_lifetime_seconds: Option<u64>,
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

impl FederationConfig {
    /// Create a new config for the given audience and subject token type.
    pub fn new(audience: impl Into<String>, subject_token_type: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            subject_token_type: subject_token_type.into(),
            token_url: default_token_url(),
            service_account_impersonation_url: None,
            service_account_impersonation: None,
        }
    }

    /// Set the service account impersonation url.
    pub fn with_service_account_impersonation_url(mut self, url: impl Into<String>) -> Self {
        self.service_account_impersonation_url = Some(url.into());
        self
    }

    /// Parse the config from its JSON representation.
    pub fn from_slice(content: &[u8]) -> Result<Self> {
        let config: FederationConfig = serde_json::from_slice(content).map_err(|e| {
            Error::config_invalid("failed to parse federation config").with_source(e)
        })?;

        if config.audience.trim().is_empty() {
            return Err(Error::config_invalid("federation config has empty audience"));
        }
        if config.subject_token_type.trim().is_empty() {
            return Err(Error::config_invalid(
                "federation config has empty subject_token_type",
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_TYPE_AWS4_REQUEST;
    use pretty_assertions::assert_eq;
    use wif_core::ErrorKind;

    const AUDIENCE: &str =
        "//iam.googleapis.com/projects/123456/locations/global/workloadIdentityPools/wif-pool/providers/aws";

    #[test]
    fn test_parse_generated_config() {
        let content = format!(
            r#"{{
                "universe_domain": "googleapis.com",
                "type": "external_account",
                "audience": "{AUDIENCE}",
                "subject_token_type": "urn:ietf:params:aws:token-type:aws4_request",
                "service_account_impersonation_url": "https://iamcredentials.googleapis.com/v1/projects/-/serviceAccounts/wif@demo.iam.gserviceaccount.com:generateAccessToken",
                "token_url": "https://sts.googleapis.com/v1/token",
                "credential_source": {{
                    "environment_id": "aws1",
                    "region_url": "http://169.254.169.254/latest/meta-data/placement/availability-zone",
                    "url": "http://169.254.169.254/latest/meta-data/iam/security-credentials",
                    "regional_cred_verification_url": "https://sts.{{region}}.amazonaws.com?Action=GetCallerIdentity&Version=2011-06-15"
                }}
            }}"#
        );

        let config = FederationConfig::from_slice(content.as_bytes()).unwrap();
        assert_eq!(config.audience, AUDIENCE);
        assert_eq!(config.subject_token_type, TOKEN_TYPE_AWS4_REQUEST);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert!(config
            .service_account_impersonation_url
            .as_deref()
            .is_some_and(|v| v.ends_with(":generateAccessToken")));
        assert_eq!(config.service_account_impersonation, None);
    }

    #[test]
    fn test_parse_minimal_config() {
        let content = format!(
            r#"{{
                "audience": "{AUDIENCE}",
                "subject_token_type": "urn:ietf:params:aws:token-type:aws4_request",
                "service_account_impersonation": {{ "token_lifetime_seconds": 600 }}
            }}"#
        );

        let config = FederationConfig::from_slice(content.as_bytes()).unwrap();
        assert_eq!(
            config,
            FederationConfig {
                service_account_impersonation: Some(ServiceAccountImpersonation {
                    token_lifetime_seconds: Some(600),
                }),
                ..FederationConfig::new(AUDIENCE, TOKEN_TYPE_AWS4_REQUEST)
            }
        );
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = FederationConfig::from_slice(b"not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = FederationConfig::from_slice(br#"{"subject_token_type": "x"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err =
            FederationConfig::from_slice(br#"{"audience": " ", "subject_token_type": "x"}"#)
                .unwrap_err();
        assert_eq!(err.message(), "federation config has empty audience");
    }
}
