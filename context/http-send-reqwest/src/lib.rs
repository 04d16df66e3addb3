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

//! Reqwest-based `HttpSend` implementation for swaggersign.
//!
//! Per-call timeouts arrive as a [`RequestTimeouts`] extension on the
//! request:
//!
//! - `timeout` is applied as reqwest's per-request timeout and bounds the
//!   whole exchange, body included.
//! - `connect_timeout` bounds the wait until response headers arrive.
//!   reqwest only configures connect timeouts per client, so the closest
//!   per-request bound is used instead.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use swaggersign_core::{Error, HttpSend, RequestTimeouts, Result};

/// HttpSend backed by a `reqwest::Client`.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn from_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::timeout(format!("http request timed out: {err}")).with_source(err)
    } else if err.is_builder() {
        Error::request_invalid(format!("invalid http request: {err}")).with_source(err)
    } else {
        Error::unexpected(format!("failed to send http request: {err}")).with_source(err)
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let timeouts = req
            .extensions()
            .get::<RequestTimeouts>()
            .copied()
            .unwrap_or_default();

        let mut req = Request::try_from(req).map_err(from_reqwest_error)?;
        if let Some(timeout) = timeouts.timeout {
            *req.timeout_mut() = Some(timeout);
        }
        debug!("sending {} {}", req.method(), req.url());

        let send = self.client.execute(req);
        let resp = match timeouts.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, send).await.map_err(|_| {
                Error::timeout(format!("no response within connect timeout {limit:?}"))
            })?,
            None => send.await,
        }
        .map_err(from_reqwest_error)?;

        let resp: http::Response<_> = resp.into();
        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(from_reqwest_error)?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
