use async_trait::async_trait;
use std::fmt::{self, Debug};
use wif_core::utils::Redact;
use wif_core::Result;

/// AwsSecurityCredentials is a snapshot of the AWS credentials handed out by a supplier.
///
/// Suppliers build a fresh value for every call, the exchange client never
/// keeps it around after signing.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsSecurityCredentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Session token, set for temporary credentials.
    pub session_token: Option<String>,
}

impl AwsSecurityCredentials {
    /// Create a new `AwsSecurityCredentials`.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }
}

impl Debug for AwsSecurityCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSecurityCredentials")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .finish()
    }
}

impl From<wif_aws::Credential> for AwsSecurityCredentials {
    fn from(cred: wif_aws::Credential) -> Self {
        Self {
            access_key_id: cred.access_key_id,
            secret_access_key: cred.secret_access_key,
            session_token: cred.session_token,
        }
    }
}

impl From<AwsSecurityCredentials> for wif_aws::Credential {
    fn from(cred: AwsSecurityCredentials) -> Self {
        Self {
            access_key_id: cred.access_key_id,
            secret_access_key: cred.secret_access_key,
            session_token: cred.session_token,
            expires_in: None,
        }
    }
}

/// Information about the exchange in progress, passed to every supplier call.
#[derive(Debug, Clone)]
pub struct SupplierContext {
    audience: String,
    subject_token_type: String,
}

impl SupplierContext {
    /// Create a new `SupplierContext`.
    pub fn new(audience: impl Into<String>, subject_token_type: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            subject_token_type: subject_token_type.into(),
        }
    }

    /// The workload identity pool provider the token is requested for.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// The subject token type that will be sent to STS.
    pub fn subject_token_type(&self) -> &str {
        &self.subject_token_type
    }
}

/// Information about the token request in progress, passed to every supplier call.
#[derive(Debug, Clone)]
pub struct SupplierRequest {
    token_url: String,
}

impl SupplierRequest {
    /// Create a new `SupplierRequest`.
    pub fn new(token_url: impl Into<String>) -> Self {
        Self {
            token_url: token_url.into(),
        }
    }

    /// The STS endpoint the subject token will be exchanged at.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

/// AwsSecurityCredentialsSupplier supplies AWS credentials and region on demand.
///
/// The exchange client calls it every time it mints a token. Implementations
/// should not cache: the underlying AWS credentials rotate on their own
/// schedule.
///
/// Failures should be reported as [`wif_core::ErrorKind::SupplierFailed`].
/// The client propagates them unchanged, including the retryable flag.
#[async_trait]
pub trait AwsSecurityCredentialsSupplier: Debug + Send + Sync + 'static {
    /// Return the current AWS security credentials.
    async fn aws_security_credentials(
        &self,
        ctx: &SupplierContext,
        req: &SupplierRequest,
    ) -> Result<AwsSecurityCredentials>;

    /// Return the AWS region the credentials belong to, like `us-east-1`.
    async fn aws_region(&self, ctx: &SupplierContext, req: &SupplierRequest) -> Result<String>;
}
