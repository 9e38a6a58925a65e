//! Google Cloud workload identity federation for AWS workloads.
//!
//! [`AwsExternalAccountCredentialProvider`] turns AWS credentials into a
//! Google access token. The AWS side is abstracted behind
//! [`AwsSecurityCredentialsSupplier`], so credentials can come from any
//! source the workload has.

mod constants;
pub use constants::{DEFAULT_SCOPE, DEFAULT_TOKEN_URL, TOKEN_TYPE_AWS4_REQUEST};

mod config;
pub use config::{FederationConfig, ServiceAccountImpersonation};

mod credential;
pub use credential::Token;

mod supplier;
pub use supplier::{
    AwsSecurityCredentials, AwsSecurityCredentialsSupplier, SupplierContext, SupplierRequest,
};

mod provide_credential;
pub use provide_credential::AwsExternalAccountCredentialProvider;

mod sign_request;
pub use sign_request::RequestSigner;
