//! AWS credential sources, region lookup and SigV4 signing.
//!
//! This crate provides the AWS half of the workload identity bridge:
//!
//! - [`DefaultCredentialProvider`] resolves credentials from env, shared
//!   profile files, the ECS container endpoint and EC2 IMDSv2, in that order.
//! - [`EnvRegionProvider`] reads the region of the workload.
//! - [`RequestSigner`] signs requests with AWS SigV4.
//!
//! ## Example
//!
//! ```no_run
//! use wif_aws::{DefaultCredentialProvider, RequestSigner};
//! use wif_core::{Context, OsEnv, Signer};
//! use wif_file_read_tokio::TokioFileRead;
//! use wif_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> wif_core::Result<()> {
//! let ctx = Context::new()
//!     .with_file_read(TokioFileRead)
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//!
//! let signer = Signer::new(
//!     ctx,
//!     DefaultCredentialProvider::new(),
//!     RequestSigner::new("s3", "us-east-1"),
//! );
//!
//! let mut parts = http::Request::get("https://my-bucket.s3.us-east-1.amazonaws.com/key")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{AWS_REGION, X_AMZ_CONTENT_SHA_256};

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod region;
pub use region::EnvRegionProvider;

mod sign_request;
pub use sign_request::RequestSigner;

mod utils;
pub use utils::sts_endpoint;
