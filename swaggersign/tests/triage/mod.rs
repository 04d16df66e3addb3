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

use crate::{kwargs, widget_client, MockHttpSend};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use swaggersign::{Config, Error, HttpError, SwaggerClient};

async fn get_widget(client: &SwaggerClient, args: Value) -> swaggersign::Result<Value> {
    client
        .resource("widget")
        .and_then(|r| r.operation("getWidget"))
        .expect("getWidget must exist")
        .call(kwargs(args))?
        .result()
        .await
}

fn http_error(result: swaggersign::Result<Value>) -> HttpError {
    match result {
        Err(Error::Http(err)) => err,
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_success_returns_unmarshalled_value() -> anyhow::Result<()> {
    let send = MockHttpSend::new().with_route("/v1/widget/5", 200, r#"{"id":5,"name":"sprocket"}"#);
    let client = widget_client(send, Config::default()).await;

    let value = get_widget(&client, json!({"id": 5})).await?;
    assert_eq!(value, json!({"id": 5, "name": "sprocket"}));
    Ok(())
}

#[tokio::test]
async fn test_server_error_is_minimal_even_when_declared() {
    let send = MockHttpSend::new().with_route("/v1/widget/5", 503, r#"{"reason":"maintenance"}"#);
    let client = widget_client(send, Config::default()).await;

    let err = http_error(get_widget(&client, json!({"id": 5})).await);
    assert_eq!(err, HttpError::new(503, "Service Unavailable"));
    assert_eq!(err.to_string(), "503 Service Unavailable");
}

#[tokio::test]
async fn test_undeclared_status_has_diagnostic() {
    let client = widget_client(MockHttpSend::new(), Config::default()).await;

    let err = http_error(get_widget(&client, json!({"id": 5})).await);
    assert_eq!(err.status(), 404);
    assert_eq!(err.payload(), None);
    assert_eq!(
        err.message(),
        Some(
            "Response specification matching http status_code 404 not found for operation \
             getWidget. Either add a response specification for the status_code or use a \
             `default` response."
        )
    );
}

#[tokio::test]
async fn test_declared_error_carries_payload() {
    let send = MockHttpSend::new().with_route("/v1/widget/0", 400, r#"{"reason":"bad input"}"#);
    let client = widget_client(send, Config::default()).await;

    let err = http_error(get_widget(&client, json!({"id": 0})).await);
    assert_eq!(err.status(), 400);
    assert_eq!(err.payload(), Some(&json!({"reason": "bad input"})));
}

#[tokio::test]
async fn test_timeout_option_is_honored() {
    let send = MockHttpSend::new()
        .with_route("/v1/widget/5", 200, r#"{"id":5}"#)
        .with_delay(Duration::from_secs(5));
    let client = widget_client(send, Config::default()).await;

    let err = get_widget(
        &client,
        json!({"id": 5, "_request_options": {"timeout": 0.05}}),
    )
    .await
    .unwrap_err();
    assert!(err.is_timeout(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_transport_failure_is_surfaced_as_is() -> anyhow::Result<()> {
    let client = SwaggerClient::from_spec(
        crate::widgets_spec(),
        Some(crate::ORIGIN_URL),
        swaggersign::ClientOptions::default()
            .with_context(swaggersign_core::Context::new()),
    )
    .await?;

    let err = get_widget(&client, json!({"id": 5})).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "unexpected error: {err:?}");
    Ok(())
}
