// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

/// Context carries everything a credential provider may touch outside
/// of its own state: files, HTTP and the process environment.
///
/// A fresh context can't do anything. File reads and HTTP calls fail, and
/// the environment is empty. Binaries plug in real implementations, tests
/// plug in mocks:
///
/// ```
/// use wif_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// assert!(ctx.env_var("WIF_SURELY_NOT_SET").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Context {
    fs: Arc<dyn FileRead>,
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a context backed by [`NoopFileRead`], [`NoopHttpSend`] and [`NoopEnv`].
    pub fn new() -> Self {
        Self {
            fs: Arc::new(NoopFileRead),
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
        }
    }

    /// Use `fs` to read files.
    pub fn with_file_read(mut self, fs: impl FileRead) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Use `http` to send requests.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Use `env` as process environment.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Read the whole file at `path`.
    #[inline]
    pub async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        self.fs.file_read(path).await
    }

    /// Send `req` and wait for the whole response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Send `req` and decode the response body as lossy utf-8.
    pub async fn http_send_as_string(
        &self,
        req: http::Request<Bytes>,
    ) -> Result<http::Response<String>> {
        let (parts, body) = self.http.http_send(req).await?.into_parts();
        Ok(http::Response::from_parts(
            parts,
            String::from_utf8_lossy(&body).into_owned(),
        ))
    }

    /// Home directory of the current user, if known.
    #[inline]
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.env.home_dir()
    }

    /// Replace a leading `~` in `path` with the home directory.
    ///
    /// Paths without a leading `~/` (or `~\`) are returned as is. Returns
    /// `None` if the path needs a home directory but none is known.
    pub fn expand_home_dir(&self, path: &str) -> Option<String> {
        match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
            None => Some(path.to_string()),
            Some(rest) => self
                .home_dir()
                .map(|home| home.join(rest).to_string_lossy().into_owned()),
        }
    }

    /// Value of environment variable `key`, `None` if unset or not utf-8.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }
}

/// FileRead reads whole files, like the AWS shared config files.
#[async_trait::async_trait]
pub trait FileRead: Debug + Send + Sync + 'static {
    /// Read the whole file at `path`.
    async fn file_read(&self, path: &str) -> Result<Vec<u8>>;
}

/// HttpSend sends the requests credential providers need, like IMDS calls
/// or the Google STS token exchange.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send `req` and wait for the whole response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Env is the process environment as seen by credential providers.
pub trait Env: Debug + Send + Sync + 'static {
    /// Value of `key`, `None` if unset or not utf-8.
    fn var(&self, key: &str) -> Option<String>;

    /// Home directory of the current user.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// OsEnv reads the real process environment.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home::home_dir()
    }
}

/// StaticEnv is a fixed environment, mostly used in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// Home directory to report.
    pub home_dir: Option<PathBuf>,
    /// Variables to report.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir.clone()
    }
}

/// NoopFileRead fails every read.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileRead;

#[async_trait::async_trait]
impl FileRead for NoopFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        Err(Error::unexpected("no file reader configured in context")
            .with_context(format!("path: {path}")))
    }
}

/// NoopHttpSend fails every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected("no http client configured in context")
            .with_context(format!("uri: {}", req.uri())))
    }
}

/// NoopEnv is an empty environment without home directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _: &str) -> Option<String> {
        None
    }

    fn home_dir(&self) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_dir() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: Some(PathBuf::from("/home/wif")),
            envs: HashMap::new(),
        });

        assert_eq!(
            ctx.expand_home_dir("~/.aws/config").as_deref(),
            Some("/home/wif/.aws/config")
        );
        assert_eq!(
            ctx.expand_home_dir("/etc/aws/config").as_deref(),
            Some("/etc/aws/config")
        );
    }

    #[test]
    fn test_expand_home_dir_without_home() {
        let ctx = Context::new();
        assert_eq!(ctx.expand_home_dir("~/.aws/config"), None);
    }

    #[tokio::test]
    async fn test_noop_components() {
        let ctx = Context::new();

        assert!(ctx.env_var("AWS_REGION").is_none());
        assert!(ctx.file_read("/tmp/not_exist").await.is_err());

        let req = http::Request::get("http://127.0.0.1")
            .body(Bytes::new())
            .expect("request must be valid");
        assert!(ctx.http_send(req).await.is_err());
    }
}
