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

use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// HttpError is the single error shape produced by response triage.
///
/// - A 5xx response carries only status and reason.
/// - A status without a declared response carries a diagnostic `message`.
/// - A declared non-2xx response carries the unmarshalled `payload`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpError {
    status: u16,
    reason: String,
    message: Option<String>,
    payload: Option<Value>,
}

impl HttpError {
    /// Create a new HttpError with status and reason phrase.
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            message: None,
            payload: None,
        }
    }

    /// Attach a diagnostic message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the unmarshalled error payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// HTTP status code of the response.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase of the response.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Diagnostic message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Structured error payload, if the response was documented.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.reason)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(payload) = &self.payload {
            write!(f, ": {payload}")?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Error returned by client construction and operation calls.
#[derive(Error, Debug)]
pub enum Error {
    /// Call arguments do not fit the operation: a required parameter is
    /// missing or an unknown one was supplied. Raised before any I/O.
    #[error("mapping error: {0}")]
    Mapping(String),
    /// A parameter value contradicts its declared type.
    #[error("validation error: {0}")]
    Validation(String),
    /// The server answered with a failing or undocumented status.
    #[error("http error: {0}")]
    Http(#[from] HttpError),
    /// No response is declared for the received status.
    #[error("{0}")]
    ResponseNotFound(String),
    /// The specification document cannot be interpreted.
    #[error("invalid specification: {0}")]
    Spec(String),
    /// Failure while signing or moving bytes, surfaced as-is.
    #[error(transparent)]
    Transport(#[from] swaggersign_core::Error),
}

impl Error {
    /// Returns true if the call failed because a timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(err) if err.is_timeout())
    }

    /// Returns the HttpError if the server answered with a failure.
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            Error::Http(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type used by swaggersign.
pub type Result<T> = std::result::Result<T, Error>;
