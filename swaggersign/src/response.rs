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

use crate::spec::Operation;
use crate::{Error, Result};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use serde_json::Value;

/// IncomingResponse is the raw response handed to the response callback.
#[derive(Debug, Clone)]
pub struct IncomingResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase of the status.
    pub reason: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// Buffered response body.
    pub body: Bytes,
}

impl IncomingResponse {
    /// Wrap a buffered http response.
    pub fn from_http(resp: http::Response<Bytes>) -> Self {
        let (parts, body) = resp.into_parts();
        Self {
            status: parts.status.as_u16(),
            reason: parts
                .status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
            headers: parts.headers,
            body,
        }
    }

    /// Body decoded as (lossy) utf-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_json(&self) -> bool {
        match self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            None => true,
            Some(v) => {
                let mime = v.split(';').next().unwrap_or("").trim();
                mime == "application/json" || mime.ends_with("+json")
            }
        }
    }
}

/// Turn `response` into the value declared for its status by `operation`.
///
/// The response declared for the exact status is used, falling back to
/// `default`. Without either, fails with [`Error::ResponseNotFound`].
pub fn unmarshal_response(response: &IncomingResponse, operation: &Operation) -> Result<Value> {
    let Some(declared) = operation.response_for(response.status) else {
        return Err(Error::ResponseNotFound(format!(
            "Response specification matching http status_code {} not found for operation {}. \
             Either add a response specification for the status_code or use a `default` response.",
            response.status, operation.operation_id
        )));
    };

    if declared.schema.is_none() || response.body.is_empty() {
        return Ok(Value::Null);
    }

    if !response.is_json() {
        return Ok(Value::String(response.text()));
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        Error::Validation(format!(
            "response of {} is not valid JSON: {e}",
            operation.operation_id
        ))
    })
}
