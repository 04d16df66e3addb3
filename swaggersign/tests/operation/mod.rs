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
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use swaggersign::{
    CallableOperation, Config, Error, Observe, OperationMetadata, RequestBody, SwaggerClient,
};
use test_case::test_case;

fn operation<'a>(client: &'a SwaggerClient, resource: &str, name: &str) -> &'a CallableOperation {
    client
        .resource(resource)
        .and_then(|r| r.operation(name))
        .expect("operation must exist")
}

#[tokio::test]
async fn test_construct_request_resolves_url_and_defaults() -> anyhow::Result<()> {
    let client = widget_client(MockHttpSend::new(), Config::default()).await;
    let get_widget = operation(&client, "widget", "getWidget");

    let req = get_widget.construct_request(kwargs(json!({"id": 5})))?;
    assert_eq!(req.method, "GET");
    assert_eq!(req.url, "https://api.example.com/v1/widget/5");
    assert_eq!(req.params, vec![("verbose".to_string(), "false".to_string())]);
    assert_eq!(req.body, None);
    assert_eq!(req.full_url(), "https://api.example.com/v1/widget/5?verbose=false");
    Ok(())
}

#[tokio::test]
async fn test_omitted_default_equals_explicit_default() -> anyhow::Result<()> {
    let client = widget_client(MockHttpSend::new(), Config::default()).await;
    let get_widget = operation(&client, "widget", "getWidget");

    let omitted = get_widget.construct_request(kwargs(json!({"id": 5})))?;
    let explicit = get_widget.construct_request(kwargs(json!({"id": 5, "verbose": false})))?;
    assert_eq!(omitted, explicit);
    Ok(())
}

#[tokio::test]
async fn test_construct_request_is_deterministic() -> anyhow::Result<()> {
    let client = widget_client(MockHttpSend::new(), Config::default()).await;
    let create = operation(&client, "widget", "createWidget");
    let args = json!({
        "widget": {"id": 5, "name": "sprocket"},
        "X-Request-Id": "req-1",
        "_request_options": {"headers": {"X-Trace": "t"}, "timeout": 2}
    });

    let first = create.construct_request(kwargs(args.clone()))?;
    let second = create.construct_request(kwargs(args))?;
    assert_eq!(first, second);
    assert_eq!(
        first.to_http_request()?.body(),
        second.to_http_request()?.body()
    );
    Ok(())
}

#[test_case("widget"; "body")]
#[test_case("X-Request-Id"; "header")]
#[tokio::test]
async fn test_missing_required_param(missing: &str) {
    let client = widget_client(MockHttpSend::new(), Config::default()).await;
    let create = operation(&client, "widget", "createWidget");

    let mut args = kwargs(json!({"widget": {"id": 5}, "X-Request-Id": "req-1"}));
    args.remove(missing);

    let err = create.construct_request(args).unwrap_err();
    let Error::Mapping(message) = err else {
        panic!("expected mapping error, got {err:?}");
    };
    assert_eq!(message, format!("{missing} is a required parameter"));
}

#[tokio::test]
async fn test_missing_required_reported_before_unknown() {
    let client = widget_client(MockHttpSend::new(), Config::default()).await;
    let get_widget = operation(&client, "widget", "getWidget");

    let err = get_widget
        .construct_request(kwargs(json!({"colour": "red"})))
        .unwrap_err();
    assert!(matches!(err, Error::Mapping(m) if m == "id is a required parameter"));
}

#[tokio::test]
async fn test_unknown_param() {
    let client = widget_client(MockHttpSend::new(), Config::default()).await;
    let get_widget = operation(&client, "widget", "getWidget");

    let err = get_widget
        .construct_request(kwargs(json!({"id": 5, "colour": "red"})))
        .unwrap_err();
    assert!(matches!(err, Error::Mapping(m) if m == "getWidget does not have parameter colour"));
}

#[tokio::test]
async fn test_request_options_layer_onto_defaults() -> anyhow::Result<()> {
    let config = Config::default()
        .with_request_header("X-Client", "swaggersign")
        .with_request_header("X-Trace", "default");
    let client = widget_client(MockHttpSend::new(), config).await;
    let create = operation(&client, "widget", "createWidget");

    let req = create.construct_request(kwargs(json!({
        "widget": {"id": 5},
        "X-Request-Id": "req-1",
        "dry_run": true,
        "_request_options": {
            "headers": {"X-Trace": "call"},
            "connect_timeout": 1,
            "timeout": 2.5
        }
    })))?;

    assert_eq!(req.method, "POST");
    assert_eq!(
        req.headers,
        BTreeMap::from([
            ("X-Client".to_string(), "swaggersign".to_string()),
            ("X-Request-Id".to_string(), "req-1".to_string()),
            ("X-Trace".to_string(), "call".to_string()),
        ])
    );
    assert_eq!(req.params, vec![("dry_run".to_string(), "true".to_string())]);
    assert_eq!(req.body, Some(RequestBody::Json(json!({"id": 5}))));
    assert_eq!(req.connect_timeout, Some(Duration::from_secs(1)));
    assert_eq!(req.timeout, Some(Duration::from_millis(2500)));
    Ok(())
}

#[tokio::test]
async fn test_validation_follows_config() -> anyhow::Result<()> {
    let client = widget_client(MockHttpSend::new(), Config::default()).await;
    let err = operation(&client, "widget", "getWidget")
        .construct_request(kwargs(json!({"id": "five"})))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let client = widget_client(
        MockHttpSend::new(),
        Config::default().with_validate_requests(false),
    )
    .await;
    let req = operation(&client, "widget", "getWidget")
        .construct_request(kwargs(json!({"id": "five"})))?;
    assert_eq!(req.url, "https://api.example.com/v1/widget/five");
    Ok(())
}

#[tokio::test]
async fn test_call_fails_before_sending() {
    let send = MockHttpSend::new();
    let client = widget_client(send.clone(), Config::default()).await;

    let err = operation(&client, "widget", "getWidget")
        .call(Map::new())
        .unwrap_err();
    assert!(matches!(err, Error::Mapping(_)));
    assert!(send.take_requests().is_empty());
}

#[tokio::test]
async fn test_metadata_and_docstring() {
    let client = widget_client(MockHttpSend::new(), Config::default()).await;
    let get_widget = operation(&client, "widget", "getWidget");

    assert_eq!(get_widget.operation_id(), "getWidget");
    assert_eq!(get_widget.http_method(), "get");
    assert_eq!(get_widget.path_name(), "/widget/{id}");
    assert_eq!(get_widget.params().len(), 2);
    assert!(!get_widget.is_deprecated());
    assert_eq!(get_widget.spec().api_url(), "https://api.example.com/v1");

    let doc = get_widget.docstring();
    assert!(doc.starts_with("GET /widget/{id}\n"));
    assert!(doc.contains("Fetch one widget."));
    assert!(doc.contains(":param id: Widget id."));
    assert!(doc.contains(":type id: integer in path, required"));
    assert!(doc.contains(":type verbose: boolean in query, default false"));
    assert!(doc.contains(":returns: responses 200, 400, 503"));

    let ping = operation(&client, "ping", "ping");
    assert!(ping.docstring().starts_with("GET /ping [DEPRECATED]\n"));
}

#[derive(Debug, Default)]
struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
}

impl Observe for RecordingObserver {
    fn operation_called(&self, operation_id: &str, kwargs: &Map<String, Value>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("call {operation_id} {}", Value::Object(kwargs.clone())));
    }

    fn deprecated_operation(&self, operation_id: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("deprecated {operation_id}"));
    }
}

#[tokio::test]
async fn test_observer_sees_calls_and_deprecations() -> anyhow::Result<()> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let observer = RecordingObserver {
        events: events.clone(),
    };
    let send = MockHttpSend::new().with_route("/v1/ping", 200, "");
    let client = widget_client(send, Config::default().with_observer(observer)).await;

    let value = operation(&client, "ping", "ping").call(Map::new())?.await?;
    assert_eq!(value, Value::Null);
    assert_eq!(
        *events.lock().unwrap(),
        vec!["call ping {}".to_string(), "deprecated ping".to_string()]
    );
    Ok(())
}
