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

use crate::token::{self, Claims};
use crate::constants::BITJWS_SCHEME;
use crate::SigningIdentity;
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use swaggersign_core::time::{now, unix_timestamp};
use swaggersign_core::{Context, Error, Result, SignRequest};

/// RequestSigner attaches the bitjws signed-message header.
///
/// The token covers the method, the complete URI and the body digest of the
/// request exactly as it is about to be sent, so it must run after the
/// request is fully built.
#[derive(Debug, Default)]
pub struct RequestSigner {}

impl RequestSigner {
    /// Create a new bitjws request signer.
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = SigningIdentity;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(identity) = credential else {
            return Ok(());
        };

        if req.uri.authority().is_none() {
            return Err(Error::request_invalid(
                "request without authority is invalid for signing",
            ));
        }

        let claims = Claims::for_request(req, body, unix_timestamp(now()));
        debug!("bitjws claims to sign: {:?}", claims);

        let token = token::encode(identity, &claims)?;
        req.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("{BITJWS_SCHEME} {token}"))?,
        );

        Ok(())
    }
}
