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

use crate::constants::BITJWS_PRIVATE_KEY;
use crate::SigningIdentity;
use async_trait::async_trait;
use log::debug;
use swaggersign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads a WIF encoded private key from `BITJWS_PRIVATE_KEY`.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider {}

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = SigningIdentity;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(wif) = ctx.env_var(BITJWS_PRIVATE_KEY) else {
            return Ok(None);
        };
        let wif = wif.trim();
        if wif.is_empty() {
            return Ok(None);
        }

        debug!("loading signing identity from {BITJWS_PRIVATE_KEY}");
        SigningIdentity::from_wif(wif).map(Some)
    }
}
