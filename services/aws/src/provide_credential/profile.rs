use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use ini::Ini;
use log::debug;
use wif_core::{Context, Error, ProvideCredential, Result};

/// ProfileCredentialProvider loads AWS credentials from the shared files.
///
/// This provider loads credentials from, in order:
/// - `~/.aws/credentials` (or the path specified by `AWS_SHARED_CREDENTIALS_FILE`)
/// - `~/.aws/config` (or the path specified by `AWS_CONFIG_FILE`)
///
/// The profile to use is determined by:
/// 1. The `AWS_PROFILE` environment variable
/// 2. The profile specified via `with_profile()`
/// 3. Default to "default"
#[derive(Debug)]
pub struct ProfileCredentialProvider {
    profile: String,
    config_file: Option<String>,
    credentials_file: Option<String>,
}

impl Default for ProfileCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Which of the two shared files is being read.
///
/// They differ in section naming: the config file prefixes every non-default
/// profile with `profile `.
#[derive(Debug, Clone, Copy)]
enum SharedFile {
    Credentials,
    Config,
}

impl SharedFile {
    fn section(&self, profile: &str) -> String {
        match (self, profile) {
            (SharedFile::Credentials, p) | (SharedFile::Config, p @ "default") => p.to_string(),
            (SharedFile::Config, p) => format!("profile {p}"),
        }
    }
}

impl ProfileCredentialProvider {
    /// Create a new ProfileCredentialProvider with default settings.
    pub fn new() -> Self {
        Self {
            profile: "default".to_string(),
            config_file: None,
            credentials_file: None,
        }
    }

    /// Set the profile name to use.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the path to the config file.
    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Set the path to the credentials file.
    pub fn with_credentials_file(mut self, path: impl Into<String>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    fn path(&self, ctx: &Context, file: SharedFile) -> String {
        let (configured, env_key, default) = match file {
            SharedFile::Credentials => (
                &self.credentials_file,
                AWS_SHARED_CREDENTIALS_FILE,
                "~/.aws/credentials",
            ),
            SharedFile::Config => (&self.config_file, AWS_CONFIG_FILE, "~/.aws/config"),
        };

        configured
            .clone()
            .or_else(|| ctx.env_var(env_key))
            .unwrap_or_else(|| default.to_string())
    }

    async fn load_from_file(
        &self,
        ctx: &Context,
        file: SharedFile,
        profile: &str,
    ) -> Result<Option<Credential>> {
        let path = self.path(ctx, file);
        let Some(expanded_path) = ctx.expand_home_dir(&path) else {
            debug!("failed to expand homedir for path: {path}");
            return Ok(None);
        };

        let content = match ctx.file_read(&expanded_path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read {file:?} file {expanded_path}: {err:?}");
                return Ok(None);
            }
        };

        let conf = Ini::load_from_str(&String::from_utf8_lossy(&content)).map_err(|e| {
            Error::config_invalid(format!("failed to parse {file:?} file"))
                .with_source(e)
                .with_context(format!("path: {expanded_path}"))
        })?;

        let Some(props) = conf.section(Some(file.section(profile))) else {
            debug!("profile {profile} not found in {file:?} file");
            return Ok(None);
        };

        match (
            props.get("aws_access_key_id"),
            props.get("aws_secret_access_key"),
        ) {
            (Some(ak), Some(sk)) => Ok(Some(Credential {
                access_key_id: ak.to_string(),
                secret_access_key: sk.to_string(),
                session_token: props.get("aws_session_token").map(|s| s.to_string()),
                expires_in: None,
            })),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl ProvideCredential for ProfileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let profile = ctx
            .env_var(AWS_PROFILE)
            .unwrap_or_else(|| self.profile.clone());

        if let Some(cred) = self
            .load_from_file(ctx, SharedFile::Credentials, &profile)
            .await?
        {
            return Ok(Some(cred));
        }

        self.load_from_file(ctx, SharedFile::Config, &profile).await
    }
}
