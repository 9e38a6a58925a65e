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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use wif_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads AWS credentials from `AWS_ACCESS_KEY_ID`,
/// `AWS_SECRET_ACCESS_KEY` and the optional `AWS_SESSION_TOKEN`.
///
/// Empty values are treated as unset.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let var = |key: &str| ctx.env_var(key).filter(|v| !v.is_empty());

        let Some((access_key_id, secret_access_key)) =
            var(AWS_ACCESS_KEY_ID).zip(var(AWS_SECRET_ACCESS_KEY))
        else {
            return Ok(None);
        };

        Ok(Some(Credential {
            access_key_id,
            secret_access_key,
            session_token: var(AWS_SESSION_TOKEN),
            expires_in: None,
        }))
    }
}
