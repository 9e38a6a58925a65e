use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;
use wif_aws::{Credential, DefaultCredentialProvider, EnvRegionProvider};
use wif_core::{Context, Error, ProvideCredential, Result};
use wif_google::{
    AwsSecurityCredentials, AwsSecurityCredentialsSupplier, SupplierContext, SupplierRequest,
};

/// DefaultAwsSecurityCredentialsSupplier supplies the credentials and region of the running workload.
///
/// Credentials come from the AWS default chain, the region from `AWS_REGION`.
/// Nothing is cached: every call asks the sources again.
///
/// Every failure is reported as a retryable [`wif_core::ErrorKind::SupplierFailed`]
/// with the underlying error kept as its source. Whether to retry is up to the
/// token exchange client.
#[derive(Debug)]
pub struct DefaultAwsSecurityCredentialsSupplier {
    ctx: Context,
    credential: Arc<dyn ProvideCredential<Credential = Credential>>,
    region: EnvRegionProvider,
}

impl DefaultAwsSecurityCredentialsSupplier {
    /// Create a new supplier reading from the given context.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            credential: Arc::new(DefaultCredentialProvider::new()),
            region: EnvRegionProvider::new(),
        }
    }

    /// Replace the AWS credential source.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        self.credential = Arc::new(provider);
        self
    }

    /// The AWS credential source used by this supplier.
    pub fn credential_provider(&self) -> &dyn ProvideCredential<Credential = Credential> {
        self.credential.as_ref()
    }

    /// Replace the AWS region source.
    pub fn with_region_provider(mut self, provider: EnvRegionProvider) -> Self {
        self.region = provider;
        self
    }

    async fn load_credential(&self) -> Result<Credential> {
        let cred = self
            .credential
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| Error::credential_invalid("no AWS credentials found"))?;

        if cred.access_key_id.is_empty() || cred.secret_access_key.is_empty() {
            return Err(Error::credential_invalid(
                "AWS credentials have empty access key id or secret access key",
            ));
        }

        Ok(cred)
    }
}

#[async_trait]
impl AwsSecurityCredentialsSupplier for DefaultAwsSecurityCredentialsSupplier {
    async fn aws_security_credentials(
        &self,
        _: &SupplierContext,
        _: &SupplierRequest,
    ) -> Result<AwsSecurityCredentials> {
        match self.load_credential().await {
            Ok(cred) => {
                info!("AWS credentials obtained successfully");
                Ok(cred.into())
            }
            Err(err) => {
                error!("Error fetching AWS credentials: {err:?}");
                Err(Error::supplier_failed("failed to fetch AWS credentials").with_source(err))
            }
        }
    }

    async fn aws_region(&self, _: &SupplierContext, _: &SupplierRequest) -> Result<String> {
        match self.region.provide_region(&self.ctx) {
            Ok(region) => {
                info!("Fetched AWS region");
                Ok(region)
            }
            Err(err) => {
                error!("Error fetching AWS region: {err:?}");
                Err(Error::supplier_failed("failed to fetch AWS region").with_source(err))
            }
        }
    }
}
