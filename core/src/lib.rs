//! Core components for the AWS to Google Cloud workload identity bridge.
//!
//! This crate provides the foundational types and traits shared by the
//! `wif-*` crates. It defines the abstractions that let credential sources,
//! token exchange and request signing be composed and tested in isolation.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`) and request signing (`SignRequest`)
//! - **Signer**: Caches a credential and signs requests with it, refreshing when it expires
//! - **Error**: One error type with a kind, a wrapped cause and a retryable flag
//!
//! ## Example
//!
//! A signer that reads an API key from the environment and sends it in a header:
//!
//! ```no_run
//! use async_trait::async_trait;
//! use std::time::Duration;
//! use wif_core::{Context, OsEnv, ProvideCredential, Result, SignRequest, Signer, SigningCredential};
//!
//! #[derive(Clone, Debug)]
//! struct ApiKey(String);
//!
//! impl SigningCredential for ApiKey {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct EnvApiKey;
//!
//! #[async_trait]
//! impl ProvideCredential for EnvApiKey {
//!     type Credential = ApiKey;
//!
//!     async fn provide_credential(&self, ctx: &Context) -> Result<Option<ApiKey>> {
//!         Ok(ctx.env_var("API_KEY").map(ApiKey))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct ApiKeySigner;
//!
//! #[async_trait]
//! impl SignRequest for ApiKeySigner {
//!     type Credential = ApiKey;
//!
//!     async fn sign_request(
//!         &self,
//!         _: &Context,
//!         req: &mut http::request::Parts,
//!         cred: Option<&ApiKey>,
//!         _: Option<Duration>,
//!     ) -> Result<()> {
//!         if let Some(cred) = cred {
//!             req.headers.insert("x-api-key", cred.0.parse()?);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new().with_env(OsEnv), EnvApiKey, ApiKeySigner);
//!
//! let (mut parts, _) = http::Request::get("https://example.com").body(())?.into_parts();
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{
    Context, Env, FileRead, HttpSend, NoopEnv, NoopFileRead, NoopHttpSend, OsEnv, StaticEnv,
};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;
