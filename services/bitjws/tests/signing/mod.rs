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

use anyhow::Result;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::{Method, Request, Uri};
use log::debug;
use pretty_assertions::assert_eq;
use swaggersign_bitjws::{
    verify_request, verify_token, Claims, RequestSigner, SigningIdentity,
    StaticCredentialProvider, BITJWS_SCHEME,
};
use swaggersign_core::{Context, Signer};
use test_case::test_case;

const KEY: &str = "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617";

fn init_signer() -> Result<(SigningIdentity, Signer<SigningIdentity>)> {
    let _ = env_logger::builder().is_test(true).try_init();

    let identity = SigningIdentity::from_wif(KEY)?;
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new(identity.clone()),
        RequestSigner::new(),
    );
    Ok((identity, signer))
}

async fn signed(method: Method, uri: &str, body: &'static [u8]) -> Result<(Parts, Bytes)> {
    let (_, signer) = init_signer()?;

    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::from_static(body))?;
    let (mut parts, body) = req.into_parts();
    signer.sign(&mut parts, &body).await?;
    debug!("signed request: {parts:?}");

    Ok((parts, body))
}

#[tokio::test]
async fn test_signed_request_verifies() -> Result<()> {
    let (identity, _) = init_signer()?;
    let (parts, body) = signed(
        Method::POST,
        "https://api.example.com/v1/widget?dry_run=true",
        b"{\"id\":5}",
    )
    .await?;

    assert!(verify_request(&parts, &body, &identity.public_key()));
    Ok(())
}

#[tokio::test]
async fn test_token_claims_describe_request() -> Result<()> {
    let (identity, _) = init_signer()?;
    let (parts, body) = signed(Method::GET, "https://api.example.com/v1/widget/5", b"").await?;

    let header = parts.headers[AUTHORIZATION].to_str()?;
    let token = header
        .strip_prefix(BITJWS_SCHEME)
        .expect("scheme prefix")
        .trim();
    let claims = verify_token(token, &identity.public_key())?;

    assert_eq!(
        claims,
        Claims::for_request(&parts, &body, claims.iat),
    );
    assert_eq!(claims.method, "GET");
    assert_eq!(claims.aud, "https://api.example.com/v1/widget/5");
    Ok(())
}

#[tokio::test]
async fn test_other_key_is_rejected() -> Result<()> {
    let (parts, body) = signed(Method::GET, "https://api.example.com/v1/widget/5", b"").await?;

    let stranger = SigningIdentity::generate();
    assert!(!verify_request(&parts, &body, &stranger.public_key()));
    Ok(())
}

#[test_case(Some("https://api.example.com/v1/widget/6"), None, None; "uri")]
#[test_case(Some("https://api.example.com/v1/widget/5?x=1"), None, None; "query")]
#[test_case(None, Some(Method::DELETE), None; "method")]
#[test_case(None, None, Some(b"{\"id\":6}".as_slice()); "body")]
#[tokio::test]
async fn test_tampered_request_is_rejected(
    uri: Option<&str>,
    method: Option<Method>,
    body: Option<&'static [u8]>,
) -> Result<()> {
    let (identity, _) = init_signer()?;
    let (mut parts, mut sent) = signed(
        Method::POST,
        "https://api.example.com/v1/widget/5",
        b"{\"id\":5}",
    )
    .await?;

    if let Some(uri) = uri {
        parts.uri = uri.parse::<Uri>()?;
    }
    if let Some(method) = method {
        parts.method = method;
    }
    if let Some(body) = body {
        sent = Bytes::from_static(body);
    }

    assert!(!verify_request(&parts, &sent, &identity.public_key()));
    Ok(())
}

#[tokio::test]
async fn test_unsigned_request_is_rejected() -> Result<()> {
    let (identity, _) = init_signer()?;
    let (parts, body) = Request::get("https://api.example.com/v1/widget/5")
        .body(Bytes::new())?
        .into_parts();

    assert!(!verify_request(&parts, &body, &identity.public_key()));
    Ok(())
}
