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

use crate::operation::CallableOperation;
use crate::spec::{ResourceSpec, Spec};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Resource groups the callable operations sharing one tag.
#[derive(Debug, Clone)]
pub struct Resource {
    name: String,
    operations: BTreeMap<String, CallableOperation>,
}

impl Resource {
    pub(crate) fn new(resource: &ResourceSpec, spec: &Arc<Spec>) -> Self {
        Self {
            name: resource.name.clone(),
            operations: resource
                .operations
                .iter()
                .map(|(id, op)| (id.clone(), CallableOperation::new(op.clone(), spec.clone())))
                .collect(),
        }
    }

    /// Name of the resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an operation by its identifier.
    pub fn operation(&self, operation_id: &str) -> Option<&CallableOperation> {
        self.operations.get(operation_id)
    }

    /// Identifiers of all operations, sorted.
    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.keys().map(String::as_str).collect()
    }
}
