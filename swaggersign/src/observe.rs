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

use log::{debug, warn};
use serde_json::{Map, Value};
use std::fmt::Debug;

/// Observe receives caller-facing events about operation calls.
///
/// Events never influence the outcome of a call.
pub trait Observe: Debug + Send + Sync + 'static {
    /// An operation is about to be called with `kwargs`.
    fn operation_called(&self, operation_id: &str, kwargs: &Map<String, Value>);

    /// A deprecated operation is being called.
    fn deprecated_operation(&self, operation_id: &str);
}

/// NoopObserver drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observe for NoopObserver {
    fn operation_called(&self, _: &str, _: &Map<String, Value>) {}

    fn deprecated_operation(&self, _: &str) {}
}

/// LogObserver forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observe for LogObserver {
    fn operation_called(&self, operation_id: &str, kwargs: &Map<String, Value>) {
        debug!("{operation_id}({})", Value::Object(kwargs.clone()));
    }

    fn deprecated_operation(&self, operation_id: &str) {
        warn!("{operation_id} has been deprecated");
    }
}
