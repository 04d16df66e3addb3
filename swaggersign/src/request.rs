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

use crate::{Error, Result};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use swaggersign_core::RequestTimeouts;

/// Reserved keyword carrying per-call transport options.
pub const REQUEST_OPTIONS: &str = "_request_options";

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document from a `body` parameter.
    Json(Value),
    /// Url-encoded fields from `formData` parameters.
    Form(Vec<(String, String)>),
}

/// RequestDescription is a fully resolved request, built once per call and
/// consumed by the transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestDescription {
    /// Upper-case HTTP method.
    pub method: String,
    /// Request url without query string.
    pub url: String,
    /// Query parameters in placement order.
    pub params: Vec<(String, String)>,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Request body.
    pub body: Option<RequestBody>,
    /// Bound on the wait for response headers.
    pub connect_timeout: Option<Duration>,
    /// Bound on the whole exchange.
    pub timeout: Option<Duration>,
}

impl RequestDescription {
    /// Url including the encoded query string.
    pub fn full_url(&self) -> String {
        if self.params.is_empty() {
            return self.url.clone();
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{sep}{query}", self.url)
    }

    /// Serialize into the http request that will be signed and sent.
    pub fn to_http_request(&self) -> swaggersign_core::Result<http::Request<Bytes>> {
        let mut builder = http::Request::builder()
            .method(self.method.as_str())
            .uri(self.full_url())
            .extension(RequestTimeouts {
                connect_timeout: self.connect_timeout,
                timeout: self.timeout,
            });

        let (content_type, body) = match &self.body {
            None => (None, Bytes::new()),
            Some(RequestBody::Json(value)) => {
                let bs = serde_json::to_vec(value).map_err(|e| {
                    swaggersign_core::Error::request_invalid("failed to serialize json body")
                        .with_source(e)
                })?;
                (Some("application/json"), Bytes::from(bs))
            }
            Some(RequestBody::Form(fields)) => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields.iter())
                    .finish();
                (
                    Some("application/x-www-form-urlencoded"),
                    Bytes::from(encoded),
                )
            }
        };

        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(content_type) = content_type {
            let declared = self
                .headers
                .keys()
                .any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
            if !declared {
                builder = builder.header(CONTENT_TYPE, content_type);
            }
        }

        Ok(builder.body(body)?)
    }
}

/// Per-call transport options passed under [`REQUEST_OPTIONS`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestOptions {
    /// Extra headers for this call.
    pub headers: BTreeMap<String, String>,
    /// See [`RequestDescription::connect_timeout`].
    pub connect_timeout: Option<Duration>,
    /// See [`RequestDescription::timeout`].
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Parse options from their keyword form.
    ///
    /// Timeouts are given in seconds; unrecognized options are ignored.
    pub fn from_value(value: &Value) -> Result<Self> {
        let options = value
            .as_object()
            .ok_or_else(|| Error::Mapping(format!("{REQUEST_OPTIONS} must be a mapping")))?;

        let mut headers = BTreeMap::new();
        if let Some(declared) = options.get("headers") {
            let declared = declared
                .as_object()
                .ok_or_else(|| Error::Mapping("request option headers must be a mapping".to_string()))?;
            for (name, value) in declared {
                headers.insert(name.clone(), stringify(value));
            }
        }

        Ok(Self {
            headers,
            connect_timeout: parse_seconds(options, "connect_timeout")?,
            timeout: parse_seconds(options, "timeout")?,
        })
    }
}

fn parse_seconds(options: &Map<String, Value>, key: &str) -> Result<Option<Duration>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .and_then(|v| Duration::try_from_secs_f64(v).ok())
            .map(Some)
            .ok_or_else(|| {
                Error::Mapping(format!(
                    "request option {key} must be a non-negative number of seconds"
                ))
            }),
    }
}

/// Render a JSON value the way it travels in paths, queries and headers.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(v) => v.clone(),
        Value::Null => String::new(),
        v => v.to_string(),
    }
}
