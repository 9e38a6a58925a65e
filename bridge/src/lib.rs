//! Bridge AWS workloads into Google Cloud through workload identity federation.
//!
//! [`DefaultAwsSecurityCredentialsSupplier`] hands the workload's AWS
//! credentials and region to [`wif_google::AwsExternalAccountCredentialProvider`].
//! [`Driver`] wires everything together: it loads the federation config from
//! S3, mints a Google token and calls a Google API with it.

mod config;
pub use config::{DriverConfig, S3_BUCKET_NAME, WIF_API_URL, WIF_CONFIG_KEY, WIF_SCOPES};

mod driver;
pub use driver::Driver;

mod federation;
pub use federation::load_federation_config;

mod supplier;
pub use supplier::DefaultAwsSecurityCredentialsSupplier;
