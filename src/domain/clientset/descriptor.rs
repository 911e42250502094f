// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Descriptors of a discovered clientset: clientset -> client -> resource -> operation.
//!
//! Built once per generation pass by [`super::walk`] and never mutated afterwards.

use crate::domain::schema::{MethodDecl, TypeRef};
use crate::shared::naming::{go_type, to_snake_case, type_name};
use serde::Serialize;
use std::fmt;

pub const CONTEXT_TYPE: &str = "context.Context";
pub const ERROR_TYPE: &str = "error";

/// A method of a wrapped interface: either instrumented, or delegated as-is.
#[derive(Debug, Clone)]
pub enum Member<T> {
    Wrapped(T),
    Direct(MethodDecl),
}

impl<T> Member<T> {
    pub fn as_wrapped(&self) -> Option<&T> {
        match self {
            Member::Wrapped(inner) => Some(inner),
            Member::Direct(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Clientset {
    pub ty: TypeRef,
    pub members: Vec<Member<Client>>,
}

impl Clientset {
    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.members.iter().filter_map(Member::as_wrapped)
    }

    pub fn package(&self) -> &str {
        self.ty.as_named().map(|(package, _)| package).unwrap_or_default()
    }

    pub fn resource_count(&self) -> usize {
        self.clients().map(|c| c.resources().count()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    pub method: MethodDecl,
    pub ty: TypeRef,
    pub members: Vec<Member<Resource>>,
}

impl Client {
    pub fn name(&self) -> &str {
        &self.method.name
    }

    pub fn type_name(&self) -> String {
        type_name(&self.ty)
    }

    /// Field holding the wrapped client inside the clientset struct.
    pub fn field_name(&self) -> String {
        self.method.name.to_lowercase()
    }

    pub fn wrapper_name(&self) -> String {
        format!("wrapped{}", self.type_name())
    }

    pub fn constructor_name(&self) -> String {
        format!("new{}", self.type_name())
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.members.iter().filter_map(Member::as_wrapped)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Namespaced,
    Cluster,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Namespaced => "Namespaced",
            Scope::Cluster => "Cluster",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Resource {
    pub method: MethodDecl,
    pub ty: TypeRef,
    pub scope: Scope,
    pub operations: Vec<Operation>,
}

impl Resource {
    pub fn name(&self) -> &str {
        &self.method.name
    }

    pub fn type_name(&self) -> String {
        type_name(&self.ty)
    }

    pub fn kind(&self) -> String {
        self.type_name().replace("Interface", "")
    }

    pub fn wrapper_name(&self, client: &Client) -> String {
        format!("wrapped{}{}", client.type_name(), self.type_name())
    }

    pub fn constructor_name(&self, client: &Client) -> String {
        format!("new{}{}", client.type_name(), self.type_name())
    }

    pub fn traced_count(&self) -> usize {
        self.operations.iter().filter(|op| op.has_context()).count()
    }
}

#[derive(Debug, Clone)]
pub struct Operation {
    pub method: MethodDecl,
}

impl Operation {
    pub fn name(&self) -> &str {
        &self.method.name
    }

    /// Name passed to the metrics recorder.
    pub fn metric_name(&self) -> String {
        to_snake_case(&self.method.name)
    }

    pub fn has_context(&self) -> bool {
        self.method
            .params
            .first()
            .map(|ty| go_type(ty) == CONTEXT_TYPE)
            .unwrap_or(false)
    }

    pub fn has_error(&self) -> bool {
        self.error_index().is_some()
    }

    /// Index of the last `error` result.
    pub fn error_index(&self) -> Option<usize> {
        self.method
            .results
            .iter()
            .rposition(|ty| go_type(ty) == ERROR_TYPE)
    }
}
