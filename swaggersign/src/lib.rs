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

//! Swagger clients whose every call carries a bitjws signed-message header.
//!
//! A [`SwaggerClient`] is built from a Swagger 2.0 document. Its operations
//! are grouped into [`Resource`]s and called with keyword arguments:
//!
//! 1. [`CallableOperation::construct_request`] maps the arguments onto a
//!    [`RequestDescription`], failing early with [`Error::Mapping`].
//! 2. The [`HttpClient`], by default a [`SigningTransport`], signs the fully
//!    built request and sends it.
//! 3. Response triage turns the response into the declared value or an
//!    [`HttpError`].
//!
//! ```no_run
//! use serde_json::{json, Map};
//! use swaggersign::{ClientOptions, Config, LogObserver, SwaggerClient};
//!
//! # async fn example() -> swaggersign::Result<()> {
//! let options = ClientOptions::default()
//!     .with_config(Config::default().with_observer(LogObserver));
//! let client = SwaggerClient::from_url("https://api.example.com/swagger.json", options).await?;
//! println!("signing as {}", client.identity().public_key_hex());
//!
//! for name in client.resource_names() {
//!     println!("{name}");
//! }
//!
//! let mut kwargs = Map::new();
//! kwargs.insert("id".to_string(), json!(5));
//! kwargs.insert("_request_options".to_string(), json!({"timeout": 5}));
//! if let Some(op) = client.resource("widget").and_then(|r| r.operation("getWidget")) {
//!     let widget = op.call(kwargs)?.await?;
//!     println!("{widget}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
pub use error::{Error, HttpError, Result};

mod observe;
pub use observe::{LogObserver, NoopObserver, Observe};

mod config;
pub use config::{ClientOptions, Config, IdentitySource};

pub mod spec;
pub use spec::Spec;

mod loader;
pub use loader::Loader;

mod request;
pub use request::{RequestBody, RequestDescription, RequestOptions, REQUEST_OPTIONS};

mod param;
pub use param::marshal_param;

mod response;
pub use response::{unmarshal_response, IncomingResponse};

mod http_client;
pub use http_client::{HttpClient, HttpFuture, ResponseCallback};

mod transport;
pub use transport::SigningTransport;

mod triage;
pub use triage::response_callback;

mod operation;
pub use operation::{CallableOperation, OperationMetadata};

mod resource;
pub use resource::Resource;

mod client;
pub use client::{default_context, SwaggerClient};
