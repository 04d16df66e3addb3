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

use crate::{widgets_spec, MockHttpSend, ORIGIN_URL, WIF};
use http::header::AUTHORIZATION;
use pretty_assertions::assert_eq;
use serde_json::json;
use swaggersign::{ClientOptions, Config, Error, IdentitySource, SwaggerClient};
use swaggersign_bitjws::{verify_request, SigningIdentity};
use swaggersign_core::{Context, StaticEnv};
use swaggersign_file_read_tokio::TokioFileRead;

#[tokio::test]
async fn test_from_url_local_file() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("widgets.json");
    std::fs::write(&path, serde_json::to_vec(&widgets_spec())?)?;
    let path = path.to_string_lossy().to_string();

    let client = SwaggerClient::from_url(
        &path,
        ClientOptions::default().with_context(
            Context::new()
                .with_file_read(TokioFileRead)
                .with_env(StaticEnv::default()),
        ),
    )
    .await?;

    assert_eq!(client.resource_names(), vec!["ping", "widget"]);
    assert_eq!(
        client.resource("widget").map(|r| r.operation_names()),
        Some(vec!["createWidget", "getWidget"])
    );
    assert_eq!(client.spec().api_url(), "https://api.example.com/v1");
    assert_eq!(client.spec().origin_url(), Some(path.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_from_url_remote_fetch_is_signed() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let send = MockHttpSend::new().with_route("/swagger.json", 200, &widgets_spec().to_string());
    let client = SwaggerClient::from_url(
        ORIGIN_URL,
        ClientOptions::default()
            .with_identity(WIF)
            .with_context(Context::new().with_http_send(send.clone()))
            .with_config(Config::default().with_request_header("X-Api-Version", "1")),
    )
    .await?;
    assert_eq!(client.resource_names(), vec!["ping", "widget"]);

    let (parts, body) = send.take_requests().remove(0).into_parts();
    assert_eq!(parts.uri.to_string(), ORIGIN_URL);
    assert_eq!(parts.headers["x-api-version"], "1");
    assert!(parts.headers.contains_key(AUTHORIZATION));
    assert!(verify_request(&parts, &body, &client.identity().public_key()));
    Ok(())
}

#[tokio::test]
async fn test_from_url_remote_failure() {
    let err = SwaggerClient::from_url(
        ORIGIN_URL,
        ClientOptions::default().with_context(Context::new().with_http_send(MockHttpSend::new())),
    )
    .await
    .unwrap_err();

    let Error::Http(err) = err else {
        panic!("expected http error, got {err:?}");
    };
    assert_eq!(err.status(), 404);
}

#[tokio::test]
async fn test_identity_sources() -> anyhow::Result<()> {
    let ctx = Context::new().with_env(StaticEnv::default());
    let build = |identity: IdentitySource| {
        SwaggerClient::from_spec(
            widgets_spec(),
            Some(ORIGIN_URL),
            ClientOptions::default()
                .with_identity(identity)
                .with_context(ctx.clone()),
        )
    };

    let encoded = build(IdentitySource::from(WIF)).await?;
    assert_eq!(encoded.identity().to_wif(), WIF);

    let raw = SigningIdentity::generate();
    let client = build(IdentitySource::from(raw.clone())).await?;
    assert_eq!(client.identity(), &raw);

    let a = build(IdentitySource::Generate).await?;
    let b = build(IdentitySource::Generate).await?;
    assert_ne!(a.identity(), b.identity());

    let err = build(IdentitySource::from("not a key")).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    Ok(())
}

#[tokio::test]
async fn test_from_spec_without_host() {
    let err = SwaggerClient::from_spec(
        json!({"swagger": "2.0", "paths": {}}),
        None,
        ClientOptions::default().with_context(Context::new()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Spec(_)));
}
