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

use crate::SigningIdentity;
use async_trait::async_trait;
use swaggersign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider always hands out the identity it was built with.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    identity: SigningIdentity,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with the given identity.
    pub fn new(identity: SigningIdentity) -> Self {
        Self { identity }
    }

    /// Create a new StaticCredentialProvider from a WIF encoded private key.
    pub fn from_wif(wif: &str) -> Result<Self> {
        Ok(Self::new(SigningIdentity::from_wif(wif)?))
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = SigningIdentity;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.identity.clone()))
    }
}
