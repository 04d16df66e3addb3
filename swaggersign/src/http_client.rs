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

use crate::request::RequestDescription;
use crate::response::IncomingResponse;
use crate::Result;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// ResponseCallback turns the raw response of one request into its result.
///
/// It is consumed by the transport and runs at most once.
pub type ResponseCallback = Box<dyn FnOnce(IncomingResponse) -> Result<Value> + Send>;

/// HttpClient sends a described request and hands the response to its callback.
pub trait HttpClient: Debug + Send + Sync + 'static {
    /// Start the exchange for `request`.
    ///
    /// Implementations must not block: the exchange runs when the returned
    /// future is awaited. Transport failures resolve the future with an
    /// error without calling `callback`.
    fn request(&self, request: RequestDescription, callback: ResponseCallback) -> HttpFuture;
}

/// HttpFuture is the handle of one in-flight exchange.
///
/// Nothing is sent until the future is polled.
pub struct HttpFuture {
    inner: Pin<Box<dyn Future<Output = Result<Value>> + Send>>,
}

impl HttpFuture {
    /// Wrap the future driving an exchange.
    pub fn new(fut: impl Future<Output = Result<Value>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(fut),
        }
    }

    /// Wait for the result of the exchange.
    pub async fn result(self) -> Result<Value> {
        self.await
    }

    /// Wait for the result of the exchange for at most `timeout`.
    pub async fn result_with_timeout(self, timeout: Duration) -> Result<Value> {
        tokio::time::timeout(timeout, self).await.map_err(|_| {
            swaggersign_core::Error::timeout(format!("no result within {timeout:?}"))
        })?
    }
}

impl Future for HttpFuture {
    type Output = Result<Value>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl Debug for HttpFuture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFuture").finish_non_exhaustive()
    }
}
