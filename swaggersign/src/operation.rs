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

use crate::http_client::{HttpFuture, ResponseCallback};
use crate::param::marshal_param;
use crate::request::{RequestDescription, RequestOptions, REQUEST_OPTIONS};
use crate::spec::{Operation, Param, Spec};
use crate::triage::response_callback;
use crate::{Error, Result};
use log::debug;
use serde_json::{Map, Value};
use std::fmt::Write;
use std::sync::Arc;

/// OperationMetadata is the static description an operation exposes.
pub trait OperationMetadata {
    /// Operation identifier.
    fn operation_id(&self) -> &str;
    /// Lower-case HTTP method.
    fn http_method(&self) -> &str;
    /// Path template relative to the api url.
    fn path_name(&self) -> &str;
    /// Declared parameters in document order.
    fn params(&self) -> &[Param];
    /// Whether the operation is marked deprecated.
    fn is_deprecated(&self) -> bool;
}

impl OperationMetadata for Operation {
    fn operation_id(&self) -> &str {
        &self.operation_id
    }

    fn http_method(&self) -> &str {
        &self.http_method
    }

    fn path_name(&self) -> &str {
        &self.path_name
    }

    fn params(&self) -> &[Param] {
        &self.params
    }

    fn is_deprecated(&self) -> bool {
        self.deprecated
    }
}

/// CallableOperation turns keyword arguments into a request for one
/// operation and sends it through the spec's transport.
#[derive(Debug, Clone)]
pub struct CallableOperation {
    operation: Arc<Operation>,
    spec: Arc<Spec>,
}

impl OperationMetadata for CallableOperation {
    fn operation_id(&self) -> &str {
        self.operation.operation_id()
    }

    fn http_method(&self) -> &str {
        self.operation.http_method()
    }

    fn path_name(&self) -> &str {
        self.operation.path_name()
    }

    fn params(&self) -> &[Param] {
        self.operation.params()
    }

    fn is_deprecated(&self) -> bool {
        self.operation.is_deprecated()
    }
}

impl CallableOperation {
    /// Bind `operation` to the spec it belongs to.
    pub fn new(operation: Arc<Operation>, spec: Arc<Spec>) -> Self {
        Self { operation, spec }
    }

    /// Static description of the operation.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Spec the operation belongs to.
    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Build the request for a call with `kwargs`.
    ///
    /// The reserved `_request_options` entry may carry `headers`,
    /// `connect_timeout` and `timeout` (seconds). No I/O happens here and
    /// the same kwargs always produce the same request.
    pub fn construct_request(&self, mut kwargs: Map<String, Value>) -> Result<RequestDescription> {
        let options = match kwargs.remove(REQUEST_OPTIONS) {
            Some(value) => RequestOptions::from_value(&value)?,
            None => RequestOptions::default(),
        };

        let mut headers = self.spec.config().request_headers.clone();
        headers.extend(options.headers);

        let mut request = RequestDescription {
            method: self.operation.http_method.to_ascii_uppercase(),
            url: format!(
                "{}{}",
                self.spec.api_url().trim_end_matches('/'),
                self.operation.path_name
            ),
            params: Vec::new(),
            headers,
            body: None,
            connect_timeout: options.connect_timeout,
            timeout: options.timeout,
        };

        self.construct_params(&mut request, kwargs)?;
        Ok(request)
    }

    /// Marshal `kwargs` into `request`.
    ///
    /// Declared parameters are placed first: a missing required one fails
    /// before any unknown name is reported. Omitted parameters with a
    /// declared default are placed with that default.
    pub fn construct_params(
        &self,
        request: &mut RequestDescription,
        kwargs: Map<String, Value>,
    ) -> Result<()> {
        let validate = self.spec.config().validate_requests;

        for param in &self.operation.params {
            match kwargs.get(&param.name) {
                Some(value) => marshal_param(param, Some(value), request, validate)?,
                None if param.required => {
                    return Err(Error::Mapping(format!(
                        "{} is a required parameter",
                        param.name
                    )))
                }
                None if param.has_default() => marshal_param(param, None, request, validate)?,
                None => {}
            }
        }

        if let Some(unknown) = kwargs
            .keys()
            .find(|name| self.operation.param(name).is_none())
        {
            return Err(Error::Mapping(format!(
                "{} does not have parameter {unknown}",
                self.operation.operation_id
            )));
        }

        Ok(())
    }

    /// Call the operation.
    ///
    /// The request is built and validated immediately: a [`Error::Mapping`]
    /// is returned before anything is sent. The returned future performs the
    /// exchange and resolves to the unmarshalled value or an error.
    pub fn call(&self, kwargs: Map<String, Value>) -> Result<HttpFuture> {
        let observer = &self.spec.config().observer;
        observer.operation_called(&self.operation.operation_id, &kwargs);
        if self.operation.deprecated {
            observer.deprecated_operation(&self.operation.operation_id);
        }

        let request = self.construct_request(kwargs)?;
        debug!(
            "{} resolved to {} {}",
            self.operation.operation_id,
            request.method,
            request.full_url()
        );

        let operation = self.operation.clone();
        let callback: ResponseCallback =
            Box::new(move |response| response_callback(response, &operation));
        Ok(self.spec.http_client().request(request, callback))
    }

    /// Human readable description of the operation and its parameters.
    pub fn docstring(&self) -> String {
        let op = &self.operation;
        let mut s = String::new();

        let _ = writeln!(
            s,
            "{} {}{}",
            op.http_method.to_ascii_uppercase(),
            op.path_name,
            if op.deprecated { " [DEPRECATED]" } else { "" }
        );
        for text in [&op.summary, &op.description].into_iter().flatten() {
            let _ = writeln!(s, "\n{text}");
        }

        if !op.params.is_empty() {
            let _ = writeln!(s);
        }
        for param in &op.params {
            let _ = write!(
                s,
                ":param {}: {}",
                param.name,
                param.description.as_deref().unwrap_or("")
            );
            let _ = write!(
                s,
                "\n:type {}: {} in {}{}",
                param.name,
                param.param_type.as_deref().unwrap_or("any"),
                param.location.as_str(),
                if param.required { ", required" } else { "" }
            );
            if let Some(default) = &param.default {
                let _ = write!(s, ", default {default}");
            }
            let _ = writeln!(s);
        }

        if !op.responses.is_empty() {
            let codes = op.responses.keys().cloned().collect::<Vec<_>>().join(", ");
            let _ = writeln!(s, "\n:returns: responses {codes}");
        }

        s
    }
}
