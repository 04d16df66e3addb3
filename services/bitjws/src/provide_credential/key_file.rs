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

use crate::constants::BITJWS_KEY_FILE;
use crate::SigningIdentity;
use async_trait::async_trait;
use log::debug;
use swaggersign_core::{Context, Error, ProvideCredential, Result};

/// KeyFileCredentialProvider loads a WIF encoded private key from a file.
///
/// The path is taken from the provider itself when set, otherwise from
/// `BITJWS_KEY_FILE`. A leading `~` is expanded to the home directory.
#[derive(Debug, Default, Clone)]
pub struct KeyFileCredentialProvider {
    path: Option<String>,
}

impl KeyFileCredentialProvider {
    /// Create a new KeyFileCredentialProvider reading `BITJWS_KEY_FILE`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the key from `path` instead of `BITJWS_KEY_FILE`.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for KeyFileCredentialProvider {
    type Credential = SigningIdentity;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(path) = self.path.clone().or_else(|| ctx.env_var(BITJWS_KEY_FILE)) else {
            return Ok(None);
        };

        let path = ctx
            .expand_home_dir(&path)
            .ok_or_else(|| Error::config_invalid(format!("failed to expand home directory in {path}")))?;

        let content = match ctx.file_read_as_string(&path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("bitjws key file {path} is not readable: {err}");
                return Ok(None);
            }
        };

        debug!("loading signing identity from key file {path}");
        SigningIdentity::from_wif(content.trim()).map(Some)
    }
}
