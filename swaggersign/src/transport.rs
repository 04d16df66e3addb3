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

use crate::http_client::{HttpClient, HttpFuture, ResponseCallback};
use crate::request::RequestDescription;
use crate::response::IncomingResponse;
use log::{debug, warn};
use std::collections::HashMap;
use swaggersign_bitjws::{RequestSigner, SigningIdentity, StaticCredentialProvider};
use swaggersign_core::{Context, Error, Signer};

/// SigningTransport signs every request for a registered host before
/// sending it through [`Context::http_send`].
///
/// Requests are signed after they are fully built, so the signature covers
/// the method, url and body that are actually transmitted.
#[derive(Debug, Clone)]
pub struct SigningTransport {
    ctx: Context,
    signers: HashMap<String, Signer<SigningIdentity>>,
}

impl SigningTransport {
    /// Create a new SigningTransport without any registered host.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            signers: HashMap::new(),
        }
    }

    /// Sign requests sent to `host` with `identity`.
    ///
    /// A previous registration for the same host is replaced.
    pub fn set_signing_key(&mut self, host: &str, identity: SigningIdentity) {
        debug!(
            "registering signing key {} for host {host}",
            identity.public_key_hex()
        );
        let signer = Signer::new(
            self.ctx.clone(),
            StaticCredentialProvider::new(identity),
            RequestSigner::new(),
        );
        self.signers.insert(host.to_ascii_lowercase(), signer);
    }

    /// Returns true if requests to `host` are signed.
    pub fn is_registered(&self, host: &str) -> bool {
        self.signers.contains_key(&host.to_ascii_lowercase())
    }

    fn signer_for(&self, url: &str) -> Option<Signer<SigningIdentity>> {
        let uri = url.parse::<http::Uri>().ok()?;
        self.signers
            .get(&uri.host()?.to_ascii_lowercase())
            .cloned()
    }
}

impl HttpClient for SigningTransport {
    fn request(&self, request: RequestDescription, callback: ResponseCallback) -> HttpFuture {
        let ctx = self.ctx.clone();
        let signer = self.signer_for(&request.url);

        HttpFuture::new(async move {
            let (mut parts, body) = request.to_http_request()?.into_parts();
            match signer {
                Some(signer) => signer.sign(&mut parts, &body).await?,
                None => warn!("no signing key registered for {}, sending unsigned", parts.uri),
            }
            debug!("sending {} {}", parts.method, parts.uri);

            let send = ctx.http_send(http::Request::from_parts(parts, body));
            let resp = match request.timeout {
                Some(limit) => tokio::time::timeout(limit, send).await.map_err(|_| {
                    Error::timeout(format!("request did not complete within {limit:?}"))
                })?,
                None => send.await,
            }?;

            callback(IncomingResponse::from_http(resp))
        })
    }
}
