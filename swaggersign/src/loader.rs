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

use crate::error::HttpError;
use crate::http_client::HttpClient;
use crate::request::RequestDescription;
use crate::{Error, Result};
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use swaggersign_core::Context;

/// Loader fetches a specification document.
///
/// Remote documents go through the given [`HttpClient`], so the fetch is
/// signed like any other call. Local documents are read through
/// [`Context::file_read`].
#[derive(Debug)]
pub struct Loader<'a> {
    ctx: Context,
    http_client: &'a dyn HttpClient,
    request_headers: BTreeMap<String, String>,
}

impl<'a> Loader<'a> {
    /// Create a new Loader.
    pub fn new(ctx: Context, http_client: &'a dyn HttpClient) -> Self {
        Self {
            ctx,
            http_client,
            request_headers: BTreeMap::new(),
        }
    }

    /// Send `headers` with remote fetches.
    pub fn with_request_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.request_headers = headers;
        self
    }

    /// Load the document at `location`: an `http(s)://` url, a `file://`
    /// url or a plain path.
    pub async fn load_spec(&self, location: &str) -> Result<Value> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return self.load_remote(location).await;
        }

        let path = location.strip_prefix("file://").unwrap_or(location);
        let path = self
            .ctx
            .expand_home_dir(path)
            .ok_or_else(|| Error::Spec("failed to expand home directory".to_string()))?;
        debug!("loading spec from file {path}");

        let content = self.ctx.file_read(&path).await?;
        parse_document(location, &content)
    }

    async fn load_remote(&self, url: &str) -> Result<Value> {
        debug!("loading spec from {url}");
        let request = RequestDescription {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: self.request_headers.clone(),
            ..Default::default()
        };

        let location = url.to_string();
        self.http_client
            .request(
                request,
                Box::new(move |response| {
                    if !response.is_success() {
                        return Err(HttpError::new(response.status, response.reason.clone())
                            .with_message(format!("failed to load spec from {location}"))
                            .into());
                    }
                    parse_document(&location, &response.body)
                }),
            )
            .await
    }
}

fn parse_document(location: &str, content: &[u8]) -> Result<Value> {
    serde_json::from_slice(content)
        .map_err(|e| Error::Spec(format!("document at {location} is not valid JSON: {e}")))
}
