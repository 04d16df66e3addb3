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

use crate::constants::{BITJWS_ALGORITHM, BITJWS_TYPE};
use crate::SigningIdentity;
use serde::{Deserialize, Serialize};
use swaggersign_core::hash::{base64url_decode, base64url_encode, hex_sha256};
use swaggersign_core::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct JwsHeader {
    pub alg: String,
    pub typ: String,
    pub kid: String,
}

/// Claims carried by a signed-message token.
///
/// Together they pin the request the token was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Upper-case HTTP method.
    pub method: String,
    /// Full request URI, query string included.
    pub aud: String,
    /// Hex encoded SHA-256 of the request body.
    pub data: String,
    /// Issued-at, seconds since the unix epoch.
    pub iat: i64,
}

impl Claims {
    /// Build the claims describing `parts` + `body` as they will be sent.
    pub fn for_request(parts: &http::request::Parts, body: &[u8], iat: i64) -> Self {
        Self {
            method: parts.method.as_str().to_string(),
            aud: parts.uri.to_string(),
            data: hex_sha256(body),
            iat,
        }
    }

    /// Check that these claims describe `parts` + `body`, ignoring `iat`.
    pub fn matches(&self, parts: &http::request::Parts, body: &[u8]) -> bool {
        let actual = Self::for_request(parts, body, self.iat);
        self == &actual
    }
}

pub(crate) struct DecodedToken {
    pub header: JwsHeader,
    pub claims: Claims,
    pub signing_input: String,
    pub signature: Vec<u8>,
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String> {
    let bs = serde_json::to_vec(value)
        .map_err(|e| Error::unexpected("failed to serialize token segment").with_source(e))?;
    Ok(base64url_encode(&bs))
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T> {
    let bs = base64url_decode(segment)?;
    serde_json::from_slice(&bs)
        .map_err(|e| Error::request_invalid("malformed token segment").with_source(e))
}

/// Serialize and sign `claims` into a compact JWS.
pub(crate) fn encode(identity: &SigningIdentity, claims: &Claims) -> Result<String> {
    let header = JwsHeader {
        alg: BITJWS_ALGORITHM.to_string(),
        typ: BITJWS_TYPE.to_string(),
        kid: identity.public_key_hex(),
    };

    let signing_input = format!("{}.{}", encode_segment(&header)?, encode_segment(claims)?);
    let signature = identity.sign(signing_input.as_bytes());
    Ok(format!("{signing_input}.{}", base64url_encode(&signature)))
}

pub(crate) fn decode(token: &str) -> Result<DecodedToken> {
    let mut segments = token.split('.');
    let (Some(header), Some(claims), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::request_invalid(
            "token must have exactly three segments",
        ));
    };

    Ok(DecodedToken {
        header: decode_segment(header)?,
        claims: decode_segment(claims)?,
        signing_input: format!("{header}.{claims}"),
        signature: base64url_decode(signature)?,
    })
}
