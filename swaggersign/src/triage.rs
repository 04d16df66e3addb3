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
use crate::response::{unmarshal_response, IncomingResponse};
use crate::spec::Operation;
use crate::{Error, Result};
use log::debug;
use serde_json::Value;

/// Classify the response of `operation` into its value or an [`HttpError`].
///
/// - A 5xx response fails with status and reason only, even if a response is
///   declared for it.
/// - A status without a declared response fails with the diagnostic message.
/// - A body that cannot be unmarshalled fails with the unmarshal error as message.
/// - A declared non-2xx response fails carrying the unmarshalled payload.
/// - Otherwise the unmarshalled value is returned.
pub fn response_callback(response: IncomingResponse, operation: &Operation) -> Result<Value> {
    raise_on_unexpected(&response)?;

    let value = match unmarshal_response(&response, operation) {
        Ok(value) => value,
        Err(Error::ResponseNotFound(message)) => {
            return Err(HttpError::new(response.status, response.reason)
                .with_message(message)
                .into())
        }
        Err(err) => {
            return Err(HttpError::new(response.status, response.reason)
                .with_message(err.to_string())
                .into())
        }
    };

    raise_on_expected(&response, value)
}

fn raise_on_unexpected(response: &IncomingResponse) -> Result<()> {
    if (500..600).contains(&response.status) {
        debug!(
            "server failure {} {}, skipping response matching",
            response.status, response.reason
        );
        return Err(HttpError::new(response.status, response.reason.clone()).into());
    }
    Ok(())
}

fn raise_on_expected(response: &IncomingResponse, value: Value) -> Result<Value> {
    if !response.is_success() {
        return Err(HttpError::new(response.status, response.reason.clone())
            .with_payload(value)
            .into());
    }
    Ok(value)
}
