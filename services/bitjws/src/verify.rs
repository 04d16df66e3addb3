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

use crate::constants::{BITJWS_ALGORITHM, BITJWS_SCHEME};
use crate::token::{self, Claims};
use crate::PublicKey;
use http::header::AUTHORIZATION;
use http::request::Parts;
use k256::ecdsa::signature::Verifier;
use k256::ecdsa::Signature;
use log::debug;
use swaggersign_core::{Error, Result};

/// Verify a compact signed-message token against the expected public key.
///
/// Returns the claims on success. The caller still has to compare them with
/// the request it received, see [`verify_request`].
pub fn verify_token(token: &str, expected: &PublicKey) -> Result<Claims> {
    let decoded = token::decode(token)?;

    if decoded.header.alg != BITJWS_ALGORITHM {
        return Err(Error::request_invalid(format!(
            "unsupported token algorithm {}",
            decoded.header.alg
        )));
    }

    let expected_kid = hex::encode(expected.to_encoded_point(true).as_bytes());
    if decoded.header.kid != expected_kid {
        return Err(Error::credential_invalid(format!(
            "token signed by {}, expected {}",
            decoded.header.kid, expected_kid
        )));
    }

    let signature = Signature::from_slice(&decoded.signature)
        .map_err(|e| Error::request_invalid("malformed token signature").with_source(e))?;
    expected
        .verify(decoded.signing_input.as_bytes(), &signature)
        .map_err(|e| Error::credential_invalid("token signature mismatch").with_source(e))?;

    Ok(decoded.claims)
}

/// Check that `parts` + `body` carry a valid signed-message header issued by
/// `expected` for exactly this method, URI and body.
pub fn verify_request(parts: &Parts, body: &[u8], expected: &PublicKey) -> bool {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        debug!("request has no authorization header");
        return false;
    };
    let Some(token) = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix(BITJWS_SCHEME))
        .map(str::trim)
    else {
        debug!("authorization header is not a {BITJWS_SCHEME} token");
        return false;
    };

    match verify_token(token, expected) {
        Ok(claims) if claims.matches(parts, body) => true,
        Ok(claims) => {
            debug!("token claims {claims:?} do not describe the received request");
            false
        }
        Err(err) => {
            debug!("token rejected: {err}");
            false
        }
    }
}
