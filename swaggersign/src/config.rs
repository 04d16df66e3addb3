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

use crate::http_client::HttpClient;
use crate::observe::{NoopObserver, Observe};
use crate::Result;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;
use swaggersign_bitjws::{DefaultCredentialProvider, SigningIdentity};
use swaggersign_core::{Context, ProvideCredential};

/// Config controls how requests are built and observed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Check parameter values against their declared types before sending.
    ///
    /// Default to `true`.
    pub validate_requests: bool,
    /// Headers sent with the specification fetch and with every call.
    ///
    /// Per-call `_request_options.headers` override entries with the same name.
    pub request_headers: BTreeMap<String, String>,
    /// Sink for caller-facing call events.
    pub observer: Arc<dyn Observe>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate_requests: true,
            request_headers: BTreeMap::new(),
            observer: Arc::new(NoopObserver),
        }
    }
}

impl Config {
    /// Enable or disable request validation.
    pub fn with_validate_requests(mut self, validate: bool) -> Self {
        self.validate_requests = validate;
        self
    }

    /// Add a header sent with every request.
    pub fn with_request_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_headers.insert(name.into(), value.into());
        self
    }

    /// Set the observer receiving call events.
    pub fn with_observer(mut self, observer: impl Observe) -> Self {
        self.observer = Arc::new(observer);
        self
    }
}

/// IdentitySource describes where the client's signing identity comes from.
///
/// It is resolved exactly once, while the client is built.
#[derive(Debug, Clone, Default)]
pub enum IdentitySource {
    /// Generate a fresh identity.
    #[default]
    Generate,
    /// Use an already constructed identity.
    Raw(SigningIdentity),
    /// Decode a WIF encoded private key.
    Encoded(String),
    /// Load from `BITJWS_PRIVATE_KEY` or `BITJWS_KEY_FILE`, generating a
    /// fresh identity if neither is set.
    Environment,
}

impl IdentitySource {
    pub(crate) async fn resolve(self, ctx: &Context) -> Result<SigningIdentity> {
        let identity = match self {
            IdentitySource::Generate => SigningIdentity::generate(),
            IdentitySource::Raw(identity) => identity,
            IdentitySource::Encoded(wif) => SigningIdentity::from_wif(&wif)?,
            IdentitySource::Environment => {
                match DefaultCredentialProvider::new().provide_credential(ctx).await? {
                    Some(identity) => identity,
                    None => {
                        debug!("no persisted signing identity found, generating one");
                        SigningIdentity::generate()
                    }
                }
            }
        };
        Ok(identity)
    }
}

impl From<SigningIdentity> for IdentitySource {
    fn from(identity: SigningIdentity) -> Self {
        IdentitySource::Raw(identity)
    }
}

impl From<&str> for IdentitySource {
    fn from(wif: &str) -> Self {
        IdentitySource::Encoded(wif.to_string())
    }
}

impl From<String> for IdentitySource {
    fn from(wif: String) -> Self {
        IdentitySource::Encoded(wif)
    }
}

/// ClientOptions gathers everything a [`crate::SwaggerClient`] is built from.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Signing identity of the client.
    pub identity: IdentitySource,
    /// Custom transport.
    ///
    /// When set, no signing key is registered automatically: the caller is
    /// responsible for signing.
    pub http_client: Option<Arc<dyn HttpClient>>,
    /// I/O context; [`crate::default_context`] when unset.
    pub context: Option<Context>,
    /// Client configuration.
    pub config: Config,
}

impl ClientOptions {
    /// Set the signing identity source.
    pub fn with_identity(mut self, identity: impl Into<IdentitySource>) -> Self {
        self.identity = identity.into();
        self
    }

    /// Use a custom transport.
    pub fn with_http_client(mut self, http_client: impl HttpClient) -> Self {
        self.http_client = Some(Arc::new(http_client));
        self
    }

    /// Use a custom I/O context.
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the client configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}
