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

use crate::{kwargs, widget_client, MockHttpSend, WIF};
use bytes::Bytes;
use http::header::AUTHORIZATION;
use pretty_assertions::assert_eq;
use serde_json::json;
use swaggersign::{
    ClientOptions, Config, HttpClient, RequestDescription, SigningTransport, SwaggerClient,
};
use swaggersign_bitjws::{verify_request, SigningIdentity};
use swaggersign_core::Context;

#[tokio::test]
async fn test_get_widget_is_signed_by_client_identity() -> anyhow::Result<()> {
    let send = MockHttpSend::new().with_route("/v1/widget/5", 200, r#"{"id":5}"#);
    let client = widget_client(send.clone(), Config::default()).await;
    assert_eq!(client.identity(), &SigningIdentity::from_wif(WIF)?);

    client
        .resource("widget")
        .and_then(|r| r.operation("getWidget"))
        .expect("getWidget must exist")
        .call(kwargs(json!({"id": 5})))?
        .await?;

    let mut requests = send.take_requests();
    assert_eq!(requests.len(), 1);
    let (parts, body) = requests.remove(0).into_parts();
    assert_eq!(
        parts.uri.to_string(),
        "https://api.example.com/v1/widget/5?verbose=false"
    );
    assert!(parts.headers[AUTHORIZATION].to_str()?.starts_with("BitJWS "));
    assert!(verify_request(&parts, &body, &client.identity().public_key()));
    Ok(())
}

#[tokio::test]
async fn test_signature_covers_transmitted_body() -> anyhow::Result<()> {
    let send = MockHttpSend::new().with_route("/v1/widget", 201, r#"{"id":7}"#);
    let client = widget_client(send.clone(), Config::default()).await;

    let created = client
        .resource("widget")
        .and_then(|r| r.operation("createWidget"))
        .expect("createWidget must exist")
        .call(kwargs(json!({
            "widget": {"id": 7, "name": "gear"},
            "X-Request-Id": "req-7"
        })))?
        .await?;
    assert_eq!(created, json!({"id": 7}));

    let (parts, body) = send.take_requests().remove(0).into_parts();
    let key = client.identity().public_key();
    assert_eq!(body.as_ref(), br#"{"id":7,"name":"gear"}"#);
    assert!(verify_request(&parts, &body, &key));
    assert!(!verify_request(
        &parts,
        &Bytes::from_static(br#"{"id":8,"name":"gear"}"#),
        &key
    ));
    Ok(())
}

#[tokio::test]
async fn test_every_call_presents_same_identity() -> anyhow::Result<()> {
    let send = MockHttpSend::new()
        .with_route("/v1/widget/1", 200, r#"{"id":1}"#)
        .with_route("/v1/widget/2", 200, r#"{"id":2}"#);
    let client = widget_client(send.clone(), Config::default()).await;
    let get_widget = client
        .resource("widget")
        .and_then(|r| r.operation("getWidget"))
        .expect("getWidget must exist");

    let first = get_widget.call(kwargs(json!({"id": 1})))?;
    let second = get_widget.call(kwargs(json!({"id": 2})))?;
    let (a, b) = tokio::join!(first, second);
    assert_eq!(a?, json!({"id": 1}));
    assert_eq!(b?, json!({"id": 2}));

    let key = client.identity().public_key();
    for req in send.take_requests() {
        let (parts, body) = req.into_parts();
        assert!(verify_request(&parts, &body, &key));
    }
    Ok(())
}

#[tokio::test]
async fn test_unregistered_host_is_sent_unsigned() -> anyhow::Result<()> {
    let send = MockHttpSend::new().with_route("/ping", 200, "");
    let mut transport = SigningTransport::new(Context::new().with_http_send(send.clone()));
    transport.set_signing_key("api.example.com", SigningIdentity::generate());
    assert!(transport.is_registered("API.example.com"));

    let request = RequestDescription {
        method: "GET".to_string(),
        url: "https://elsewhere.example.com/ping".to_string(),
        ..Default::default()
    };
    let status = transport
        .request(request, Box::new(|resp| Ok(json!(resp.status))))
        .await?;
    assert_eq!(status, json!(200));

    let requests = send.take_requests();
    assert!(requests[0].headers().get(AUTHORIZATION).is_none());
    Ok(())
}

#[tokio::test]
async fn test_reregistration_replaces_identity() -> anyhow::Result<()> {
    let send = MockHttpSend::new().with_route("/ping", 200, "");
    let first = SigningIdentity::generate();
    let second = SigningIdentity::generate();

    let mut transport = SigningTransport::new(Context::new().with_http_send(send.clone()));
    transport.set_signing_key("api.example.com", first.clone());
    transport.set_signing_key("api.example.com", second.clone());

    let request = RequestDescription {
        method: "GET".to_string(),
        url: "https://api.example.com/ping".to_string(),
        ..Default::default()
    };
    transport
        .request(request, Box::new(|_| Ok(json!(null))))
        .await?;

    let (parts, body) = send.take_requests().remove(0).into_parts();
    assert!(verify_request(&parts, &body, &second.public_key()));
    assert!(!verify_request(&parts, &body, &first.public_key()));
    Ok(())
}

#[tokio::test]
async fn test_custom_http_client_is_not_signed_automatically() -> anyhow::Result<()> {
    let send = MockHttpSend::new().with_route("/v1/widget/5", 200, r#"{"id":5}"#);
    let transport = SigningTransport::new(Context::new().with_http_send(send.clone()));

    let client = SwaggerClient::from_spec(
        crate::widgets_spec(),
        Some(crate::ORIGIN_URL),
        ClientOptions::default()
            .with_identity(WIF)
            .with_http_client(transport),
    )
    .await?;

    client
        .resource("widget")
        .and_then(|r| r.operation("getWidget"))
        .expect("getWidget must exist")
        .call(kwargs(json!({"id": 5})))?
        .await?;

    let requests = send.take_requests();
    assert!(requests[0].headers().get(AUTHORIZATION).is_none());
    Ok(())
}
