use crate::{Context, Result};
use std::fmt::Debug;
use std::time::Duration;

/// SigningCredential is a credential that [`crate::Signer`] can cache.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Whether the credential can still be used.
    fn is_valid(&self) -> bool;
}

/// ProvideCredential loads a credential from wherever the workload keeps it.
///
/// AWS providers return access keys, the Google provider returns a bearer token.
///
/// Returning `Ok(None)` means this provider has nothing to offer in the current
/// environment; returning `Err` means it tried and failed.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load signing credential from current env.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest is the trait used by signer to sign the request.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this builder.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request in place.
    ///
    /// ## Credential
    ///
    /// The `credential` parameter is the credential required by the signer to sign the request.
    /// Signers should leave the request untouched if no credential is given.
    ///
    /// ## Expires In
    ///
    /// The `expires_in` parameter specifies the expiration time for the result.
    /// If the signer does not support expiration, it should return an error.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()>;
}
