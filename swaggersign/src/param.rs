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

use crate::request::{stringify, RequestBody, RequestDescription};
use crate::spec::{Param, ParamLocation};
use crate::{Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

/// Characters left as-is when a value is substituted into a path segment.
static PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Place `value` for `param` into `request`.
///
/// `None` (or an explicit JSON null) means the caller did not supply a
/// value: the declared default is used, and without one nothing is placed.
/// With `validate`, a value whose JSON type contradicts the declared type
/// fails with [`Error::Validation`].
pub fn marshal_param(
    param: &Param,
    value: Option<&Value>,
    request: &mut RequestDescription,
    validate: bool,
) -> Result<()> {
    let value = match value.filter(|v| !v.is_null()).or(param.default.as_ref()) {
        Some(value) => value,
        None if param.required => {
            return Err(Error::Mapping(format!(
                "{} is a required parameter",
                param.name
            )))
        }
        None => return Ok(()),
    };

    if validate {
        validate_type(param, value)?;
    }

    match param.location {
        ParamLocation::Path => {
            let placeholder = format!("{{{}}}", param.name);
            let encoded = utf8_percent_encode(&stringify(value), PATH_SEGMENT_ENCODE_SET).to_string();
            request.url = request.url.replace(&placeholder, &encoded);
        }
        ParamLocation::Query => match value {
            Value::Array(items) => marshal_collection(param, items, request),
            value => request.params.push((param.name.clone(), stringify(value))),
        },
        ParamLocation::Header => {
            request.headers.insert(param.name.clone(), stringify(value));
        }
        ParamLocation::FormData => match &mut request.body {
            None => {
                request.body = Some(RequestBody::Form(vec![(
                    param.name.clone(),
                    stringify(value),
                )]))
            }
            Some(RequestBody::Form(fields)) => fields.push((param.name.clone(), stringify(value))),
            Some(RequestBody::Json(_)) => {
                return Err(Error::Mapping(format!(
                    "form parameter {} conflicts with a body parameter",
                    param.name
                )))
            }
        },
        ParamLocation::Body => {
            if matches!(request.body, Some(RequestBody::Form(_))) {
                return Err(Error::Mapping(format!(
                    "body parameter {} conflicts with form parameters",
                    param.name
                )));
            }
            request.body = Some(RequestBody::Json(value.clone()));
        }
    }

    Ok(())
}

fn marshal_collection(param: &Param, items: &[Value], request: &mut RequestDescription) {
    let sep = match param.collection_format.as_deref() {
        Some("multi") => {
            for item in items {
                request.params.push((param.name.clone(), stringify(item)));
            }
            return;
        }
        Some("ssv") => " ",
        Some("tsv") => "\t",
        Some("pipes") => "|",
        _ => ",",
    };

    let joined = items.iter().map(stringify).collect::<Vec<_>>().join(sep);
    request.params.push((param.name.clone(), joined));
}

fn validate_type(param: &Param, value: &Value) -> Result<()> {
    let Some(expected) = param.param_type.as_deref() else {
        return Ok(());
    };

    let valid = match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => true,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{} is not of type {expected}: {value}",
            param.name
        )))
    }
}
