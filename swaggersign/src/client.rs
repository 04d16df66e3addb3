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

use crate::config::{ClientOptions, Config};
use crate::http_client::HttpClient;
use crate::loader::Loader;
use crate::resource::Resource;
use crate::spec::{declared_host, Spec};
use crate::transport::SigningTransport;
use crate::Result;
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use swaggersign_bitjws::SigningIdentity;
use swaggersign_core::{Context, OsEnv};
use swaggersign_file_read_tokio::TokioFileRead;
use swaggersign_http_send_reqwest::ReqwestHttpSend;

/// Create a context backed by tokio file reads, reqwest and the OS environment.
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// SwaggerClient exposes the operations of a Swagger-documented API,
/// signing every call with one identity.
///
/// ```no_run
/// use serde_json::{json, Map};
/// use swaggersign::{ClientOptions, SwaggerClient};
///
/// # async fn example() -> swaggersign::Result<()> {
/// let client = SwaggerClient::from_url(
///     "https://api.example.com/swagger.json",
///     ClientOptions::default().with_identity("KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617"),
/// )
/// .await?;
///
/// let mut kwargs = Map::new();
/// kwargs.insert("id".to_string(), json!(5));
/// let widget = client
///     .resource("widget")
///     .and_then(|r| r.operation("getWidget"))
///     .expect("operation must exist")
///     .call(kwargs)?
///     .result()
///     .await?;
/// println!("{widget}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SwaggerClient {
    spec: Arc<Spec>,
    resources: BTreeMap<String, Resource>,
    identity: SigningIdentity,
}

impl SwaggerClient {
    /// Build a client from the document at `spec_url`.
    ///
    /// Unless a custom transport is configured, the host of `spec_url` is
    /// registered for signing before the document is fetched.
    pub async fn from_url(spec_url: &str, options: ClientOptions) -> Result<Self> {
        debug!("loading from {spec_url}");
        let ClientOptions {
            identity,
            http_client,
            context,
            config,
        } = options;
        let ctx = context.unwrap_or_else(default_context);
        let identity = identity.resolve(&ctx).await?;

        let (spec_dict, http_client): (Value, Arc<dyn HttpClient>) = match http_client {
            Some(http_client) => {
                let spec_dict = Loader::new(ctx, http_client.as_ref())
                    .with_request_headers(config.request_headers.clone())
                    .load_spec(spec_url)
                    .await?;
                (spec_dict, http_client)
            }
            None => {
                let mut transport = SigningTransport::new(ctx.clone());
                if let Some(host) = host_of(spec_url) {
                    transport.set_signing_key(&host, identity.clone());
                }
                let spec_dict = Loader::new(ctx, &transport)
                    .with_request_headers(config.request_headers.clone())
                    .load_spec(spec_url)
                    .await?;
                register_declared_host(&mut transport, &spec_dict, &identity);
                (spec_dict, Arc::new(transport))
            }
        };

        Self::build(spec_dict, Some(spec_url), http_client, config, identity)
    }

    /// Build a client from an already loaded document.
    ///
    /// `origin_url` is where the document came from, if anywhere.
    pub async fn from_spec(
        spec_dict: Value,
        origin_url: Option<&str>,
        options: ClientOptions,
    ) -> Result<Self> {
        let ClientOptions {
            identity,
            http_client,
            context,
            config,
        } = options;
        let ctx = context.unwrap_or_else(default_context);
        let identity = identity.resolve(&ctx).await?;

        let http_client: Arc<dyn HttpClient> = match http_client {
            Some(http_client) => http_client,
            None => {
                let mut transport = SigningTransport::new(ctx);
                if let Some(host) = origin_url.and_then(host_of) {
                    transport.set_signing_key(&host, identity.clone());
                }
                register_declared_host(&mut transport, &spec_dict, &identity);
                Arc::new(transport)
            }
        };

        Self::build(spec_dict, origin_url, http_client, config, identity)
    }

    fn build(
        spec_dict: Value,
        origin_url: Option<&str>,
        http_client: Arc<dyn HttpClient>,
        config: Config,
        identity: SigningIdentity,
    ) -> Result<Self> {
        let spec = Arc::new(Spec::from_dict(spec_dict, origin_url, http_client, config)?);
        let resources = spec
            .resources()
            .iter()
            .map(|(name, resource)| (name.clone(), Resource::new(resource, &spec)))
            .collect();

        Ok(Self {
            spec,
            resources,
            identity,
        })
    }

    /// Look up a resource by name.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// Names of all resources, sorted.
    pub fn resource_names(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    /// Identity every call is signed with.
    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    /// Parsed specification.
    pub fn spec(&self) -> &Spec {
        &self.spec
    }
}

fn host_of(url: &str) -> Option<String> {
    let uri = url.parse::<http::Uri>().ok()?;
    uri.host().map(str::to_string)
}

fn register_declared_host(
    transport: &mut SigningTransport,
    spec_dict: &Value,
    identity: &SigningIdentity,
) {
    let Some(host) = declared_host(spec_dict) else {
        return;
    };
    if !transport.is_registered(&host) {
        transport.set_signing_key(&host, identity.clone());
    }
}
