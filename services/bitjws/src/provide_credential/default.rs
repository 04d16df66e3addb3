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

use crate::provide_credential::{EnvCredentialProvider, KeyFileCredentialProvider};
use crate::SigningIdentity;
use async_trait::async_trait;
use swaggersign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider looks for a persisted signing identity.
///
/// Resolution order:
///
/// 1. `BITJWS_PRIVATE_KEY`
/// 2. the file named by `BITJWS_KEY_FILE`
///
/// Returns `None` when neither is configured; the caller decides whether to
/// generate a fresh identity.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<SigningIdentity>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(KeyFileCredentialProvider::new());

        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = SigningIdentity;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BITJWS_KEY_FILE, BITJWS_PRIVATE_KEY};
    use std::collections::HashMap;
    use swaggersign_core::StaticEnv;
    use swaggersign_file_read_tokio::TokioFileRead;

    #[tokio::test]
    async fn test_env_wins_over_key_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        std::io::Write::write_all(
            &mut file,
            b"5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ",
        )?;

        let ctx = Context::new()
            .with_file_read(TokioFileRead)
            .with_env(StaticEnv {
                home_dir: None,
                envs: HashMap::from([
                    (
                        BITJWS_PRIVATE_KEY.to_string(),
                        "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn".to_string(),
                    ),
                    (
                        BITJWS_KEY_FILE.to_string(),
                        file.path().to_string_lossy().to_string(),
                    ),
                ]),
            });

        let identity = DefaultCredentialProvider::new()
            .provide_credential(&ctx)
            .await?
            .expect("identity must be loaded");
        assert_eq!(
            identity.public_key_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_nothing_configured() -> anyhow::Result<()> {
        let ctx = Context::new().with_env(StaticEnv::default());

        let identity = DefaultCredentialProvider::new()
            .provide_credential(&ctx)
            .await?;
        assert!(identity.is_none());

        Ok(())
    }
}
