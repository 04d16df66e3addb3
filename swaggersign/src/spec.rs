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

//! Swagger 2.0 specification model.

use crate::config::Config;
use crate::http_client::HttpClient;
use crate::{Error, Result};
use log::debug;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use std::sync::Arc;

const HTTP_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];
const MAX_REF_DEPTH: usize = 16;

/// Where a parameter is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Substituted into the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as a request header.
    Header,
    /// Sent as an url-encoded form field.
    FormData,
    /// Sent as the JSON request body.
    Body,
}

impl FromStr for ParamLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "path" => Ok(ParamLocation::Path),
            "query" => Ok(ParamLocation::Query),
            "header" => Ok(ParamLocation::Header),
            "formData" => Ok(ParamLocation::FormData),
            "body" => Ok(ParamLocation::Body),
            v => Err(Error::Spec(format!("unknown parameter location {v}"))),
        }
    }
}

impl ParamLocation {
    /// Name of the location as written in the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::FormData => "formData",
            ParamLocation::Body => "body",
        }
    }
}

/// Declared parameter of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name, also the keyword used when calling.
    pub name: String,
    /// Placement in the request.
    pub location: ParamLocation,
    /// Whether the caller must supply a value.
    pub required: bool,
    /// Declared default value.
    pub default: Option<Value>,
    /// Declared primitive type; for body parameters the schema's type.
    pub param_type: Option<String>,
    /// Array serialization for query parameters.
    pub collection_format: Option<String>,
    /// Free text description.
    pub description: Option<String>,
    /// Body schema.
    pub schema: Option<Value>,
}

impl Param {
    /// Returns true if the parameter declares a default value.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    fn from_value(value: &Value) -> Result<Self> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Spec("parameter without name".to_string()))?;
        let location: ParamLocation = value
            .get("in")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Spec(format!("parameter {name} without location")))?
            .parse()?;
        let schema = value.get("schema").cloned();
        let param_type = value
            .get("type")
            .or_else(|| schema.as_ref().and_then(|s| s.get("type")))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            name: name.to_string(),
            location,
            // Path parameters are always required.
            required: location == ParamLocation::Path
                || value.get("required").and_then(Value::as_bool).unwrap_or(false),
            default: value
                .get("default")
                .or_else(|| schema.as_ref().and_then(|s| s.get("default")))
                .cloned(),
            param_type,
            collection_format: value
                .get("collectionFormat")
                .and_then(Value::as_str)
                .map(str::to_string),
            description: value
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            schema,
        })
    }
}

/// Declared response of an operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseSpec {
    /// Free text description.
    pub description: Option<String>,
    /// Response body schema; `None` means the body carries no value.
    pub schema: Option<Value>,
}

/// Static metadata of one remote operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Operation identifier, usable as an identifier.
    pub operation_id: String,
    /// Lower-case HTTP method.
    pub http_method: String,
    /// Path template relative to the api url, e.g. `/widget/{id}`.
    pub path_name: String,
    /// Declared parameters in document order.
    pub params: Vec<Param>,
    /// Declared responses keyed by status code or `default`.
    pub responses: BTreeMap<String, ResponseSpec>,
    /// Whether the operation is marked deprecated.
    pub deprecated: bool,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Tags grouping the operation into resources.
    pub tags: Vec<String>,
}

impl Operation {
    /// Look up a declared parameter by name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Response declared for `status`, falling back to `default`.
    pub fn response_for(&self, status: u16) -> Option<&ResponseSpec> {
        self.responses
            .get(&status.to_string())
            .or_else(|| self.responses.get("default"))
    }
}

/// Operations sharing one tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceSpec {
    /// Resource name.
    pub name: String,
    /// Operations keyed by operation id.
    pub operations: BTreeMap<String, Arc<Operation>>,
}

/// Spec is the parsed, read-only description of a remote API.
pub struct Spec {
    spec_dict: Value,
    origin_url: Option<String>,
    api_url: String,
    resources: BTreeMap<String, ResourceSpec>,
    http_client: Arc<dyn HttpClient>,
    config: Config,
}

impl Debug for Spec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spec")
            .field("origin_url", &self.origin_url)
            .field("api_url", &self.api_url)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("http_client", &self.http_client)
            .finish()
    }
}

impl Spec {
    /// Build a Spec from a Swagger 2.0 document.
    ///
    /// `origin_url` is where the document came from; it supplies scheme and
    /// host when the document omits them.
    pub fn from_dict(
        spec_dict: Value,
        origin_url: Option<&str>,
        http_client: Arc<dyn HttpClient>,
        config: Config,
    ) -> Result<Self> {
        if !spec_dict.is_object() {
            return Err(Error::Spec("document must be a JSON object".to_string()));
        }

        let api_url = build_api_url(&spec_dict, origin_url)?;
        debug!("api url resolved to {api_url}");
        let resources = build_resources(&spec_dict)?;

        Ok(Self {
            spec_dict,
            origin_url: origin_url.map(str::to_string),
            api_url,
            resources,
            http_client,
            config,
        })
    }

    /// Raw document the spec was built from.
    pub fn spec_dict(&self) -> &Value {
        &self.spec_dict
    }

    /// Location the document was loaded from.
    pub fn origin_url(&self) -> Option<&str> {
        self.origin_url.as_deref()
    }

    /// Base url every operation path is joined onto.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Host declared by the document, without port.
    pub fn declared_host(&self) -> Option<String> {
        declared_host(&self.spec_dict)
    }

    /// Resources keyed by name.
    pub fn resources(&self) -> &BTreeMap<String, ResourceSpec> {
        &self.resources
    }

    /// Transport used by every operation.
    pub fn http_client(&self) -> &Arc<dyn HttpClient> {
        &self.http_client
    }

    /// Client configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Host of the document's `host` field, without port.
pub(crate) fn declared_host(spec_dict: &Value) -> Option<String> {
    spec_dict
        .get("host")
        .and_then(Value::as_str)
        .and_then(|v| v.parse::<http::uri::Authority>().ok())
        .map(|v| v.host().to_string())
}

fn build_api_url(spec_dict: &Value, origin_url: Option<&str>) -> Result<String> {
    let origin = match origin_url {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => Some(
            url.parse::<http::Uri>()
                .map_err(|e| Error::Spec(format!("invalid origin url {url}: {e}")))?,
        ),
        _ => None,
    };

    let scheme = spec_dict
        .get("schemes")
        .and_then(Value::as_array)
        .and_then(|v| v.first())
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| origin.as_ref().and_then(|o| o.scheme_str()).map(str::to_string))
        .unwrap_or_else(|| "http".to_string());

    let host = spec_dict
        .get("host")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            origin
                .as_ref()
                .and_then(|o| o.authority())
                .map(|a| a.to_string())
        })
        .ok_or_else(|| Error::Spec("neither host nor an http origin url is known".to_string()))?;

    let base_path = spec_dict
        .get("basePath")
        .and_then(Value::as_str)
        .unwrap_or("/");

    Ok(format!("{scheme}://{host}{base_path}"))
}

fn resolve_ref<'a>(spec_dict: &'a Value, mut value: &'a Value) -> Result<&'a Value> {
    for _ in 0..MAX_REF_DEPTH {
        let Some(reference) = value.get("$ref").and_then(Value::as_str) else {
            return Ok(value);
        };
        let pointer = reference
            .strip_prefix('#')
            .ok_or_else(|| Error::Spec(format!("only local references are supported: {reference}")))?;
        value = spec_dict
            .pointer(pointer)
            .ok_or_else(|| Error::Spec(format!("unresolvable reference {reference}")))?;
    }
    Err(Error::Spec("reference chain is too deep".to_string()))
}

/// Map `name` to identifier characters, collapsing separator runs into one `_`.
fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}

fn build_params(
    spec_dict: &Value,
    path_item: &Map<String, Value>,
    operation: &Map<String, Value>,
) -> Result<Vec<Param>> {
    let mut params: Vec<Param> = Vec::new();
    let declared = [path_item.get("parameters"), operation.get("parameters")];

    for list in declared.into_iter().flatten() {
        let list = list
            .as_array()
            .ok_or_else(|| Error::Spec("parameters must be a list".to_string()))?;
        for value in list {
            let param = Param::from_value(resolve_ref(spec_dict, value)?)?;
            // Operation level definitions override path level ones.
            match params
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                Some(existing) => *existing = param,
                None => params.push(param),
            }
        }
    }

    Ok(params)
}

fn build_responses(
    spec_dict: &Value,
    operation: &Map<String, Value>,
) -> Result<BTreeMap<String, ResponseSpec>> {
    let mut responses = BTreeMap::new();
    let Some(declared) = operation.get("responses").and_then(Value::as_object) else {
        return Ok(responses);
    };

    for (status, value) in declared {
        let value = resolve_ref(spec_dict, value)?;
        let schema = match value.get("schema") {
            Some(schema) => Some(resolve_ref(spec_dict, schema)?.clone()),
            None => None,
        };
        responses.insert(
            status.clone(),
            ResponseSpec {
                description: value
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                schema,
            },
        );
    }

    Ok(responses)
}

fn build_resources(spec_dict: &Value) -> Result<BTreeMap<String, ResourceSpec>> {
    let mut resources: BTreeMap<String, ResourceSpec> = BTreeMap::new();
    let Some(paths) = spec_dict.get("paths").and_then(Value::as_object) else {
        return Ok(resources);
    };

    for (path_name, path_item) in paths {
        let path_item = resolve_ref(spec_dict, path_item)?
            .as_object()
            .ok_or_else(|| Error::Spec(format!("path item {path_name} must be an object")))?;

        for method in HTTP_METHODS {
            let Some(operation) = path_item.get(method).and_then(Value::as_object) else {
                continue;
            };

            let operation_id = operation
                .get("operationId")
                .and_then(Value::as_str)
                .map(sanitize_name)
                .unwrap_or_else(|| sanitize_name(&format!("{method}_{path_name}")));
            let mut tags: Vec<String> = operation
                .get("tags")
                .and_then(Value::as_array)
                .map(|v| v.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default();
            let mut seen = BTreeSet::new();
            tags.retain(|tag| seen.insert(tag.clone()));
            if tags.is_empty() {
                let segment = path_name.trim_start_matches('/').split('/').next().unwrap_or("");
                let name = sanitize_name(segment);
                tags.push(if name.is_empty() { "default".to_string() } else { name });
            }

            let operation = Arc::new(Operation {
                operation_id: operation_id.clone(),
                http_method: method.to_string(),
                path_name: path_name.clone(),
                params: build_params(spec_dict, path_item, operation)?,
                responses: build_responses(spec_dict, operation)?,
                deprecated: operation
                    .get("deprecated")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                summary: operation
                    .get("summary")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                description: operation
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                tags: tags.clone(),
            });

            for tag in tags {
                let resource = resources.entry(tag.clone()).or_insert_with(|| ResourceSpec {
                    name: tag,
                    operations: BTreeMap::new(),
                });
                if resource
                    .operations
                    .insert(operation_id.clone(), operation.clone())
                    .is_some()
                {
                    return Err(Error::Spec(format!(
                        "duplicate operation {operation_id} in resource {}",
                        resource.name
                    )));
                }
            }
        }
    }

    Ok(resources)
}
