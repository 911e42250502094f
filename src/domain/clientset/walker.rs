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

//! Discovers clients, resources and operations starting from the root interface.
//!
//! A method is an accessor when it returns exactly one interface value and its
//! name is not excluded at that level. This heuristic misclassifies any other
//! method of the same shape; excluded names are passed through unchanged.

use super::descriptor::{Client, Clientset, Member, Operation, Resource, Scope};
use crate::domain::schema::{ApiSchema, MethodDecl, TypeRef};
use crate::infrastructure::constants::{DEFAULT_CLIENTSET_EXCLUSIONS, DEFAULT_CLIENT_EXCLUSIONS};
use crate::shared::error::{Result, WrapgenError};
use crate::shared::naming::type_name;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Clientset methods never treated as client accessors.
    pub clientset_exclusions: Vec<String>,
    /// Typed client methods never treated as resource accessors.
    pub client_exclusions: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            clientset_exclusions: DEFAULT_CLIENTSET_EXCLUSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            client_exclusions: DEFAULT_CLIENT_EXCLUSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

pub fn walk(schema: &ApiSchema, options: &WalkOptions) -> Result<Clientset> {
    let root = schema.root().clone();
    let methods = declared_methods(schema, &root)?;

    let mut members = Vec::with_capacity(methods.len());
    for method in methods {
        match accessor_target(schema, method, &options.clientset_exclusions) {
            Some(ty) => members.push(Member::Wrapped(walk_client(schema, options, &root, method, ty)?)),
            None => members.push(Member::Direct(method.clone())),
        }
    }

    let clientset = Clientset { ty: root, members };
    check_unique_names(&clientset)?;
    Ok(clientset)
}

fn walk_client(
    schema: &ApiSchema,
    options: &WalkOptions,
    owner: &TypeRef,
    method: &MethodDecl,
    ty: &TypeRef,
) -> Result<Client> {
    if !method.params.is_empty() {
        return Err(WrapgenError::unsupported_accessor(
            type_name(owner),
            &method.name,
            "client accessors cannot take parameters",
        ));
    }
    let methods = opaque_guard(schema, owner, method, ty)?;

    let mut members = Vec::with_capacity(methods.len());
    for inner in methods {
        match accessor_target(schema, inner, &options.client_exclusions) {
            Some(resource_ty) => {
                members.push(Member::Wrapped(walk_resource(schema, ty, inner, resource_ty)?))
            }
            None => members.push(Member::Direct(inner.clone())),
        }
    }

    let client = Client {
        method: method.clone(),
        ty: ty.clone(),
        members,
    };
    debug!(
        "Discovered client {} ({}) with {} resources",
        client.name(),
        client.type_name(),
        client.resources().count()
    );
    Ok(client)
}

fn walk_resource(
    schema: &ApiSchema,
    owner: &TypeRef,
    method: &MethodDecl,
    ty: &TypeRef,
) -> Result<Resource> {
    let scope = match method.params.len() {
        0 => Scope::Cluster,
        1 => Scope::Namespaced,
        n => {
            return Err(WrapgenError::unsupported_accessor(
                type_name(owner),
                &method.name,
                format!("resource accessors take at most one parameter, found {}", n),
            ))
        }
    };
    if method.is_variadic() {
        return Err(WrapgenError::unsupported_accessor(
            type_name(owner),
            &method.name,
            "namespace parameter cannot be variadic",
        ));
    }

    let operations = opaque_guard(schema, owner, method, ty)?
        .iter()
        .map(|m| Operation { method: m.clone() })
        .collect();

    Ok(Resource {
        method: method.clone(),
        ty: ty.clone(),
        scope,
        operations,
    })
}

fn accessor_target<'a>(
    schema: &ApiSchema,
    method: &'a MethodDecl,
    exclusions: &[String],
) -> Option<&'a TypeRef> {
    if exclusions.iter().any(|name| name == &method.name) {
        return None;
    }
    match method.results.as_slice() {
        [ty] if schema.is_interface(ty) => Some(ty),
        _ => None,
    }
}

fn declared_methods<'a>(schema: &'a ApiSchema, ty: &TypeRef) -> Result<&'a [MethodDecl]> {
    schema
        .methods(ty)
        .ok_or_else(|| WrapgenError::UnknownInterface(ty.to_string()))
}

/// Methods of an accessor's interface; accessors to undescribed interfaces are rejected.
fn opaque_guard<'a>(
    schema: &'a ApiSchema,
    owner: &TypeRef,
    method: &MethodDecl,
    ty: &TypeRef,
) -> Result<&'a [MethodDecl]> {
    schema.methods(ty).ok_or_else(|| {
        WrapgenError::unsupported_accessor(
            type_name(owner),
            &method.name,
            format!("returns {} whose methods are not described", ty),
        )
    })
}

fn check_unique_names(clientset: &Clientset) -> Result<()> {
    let mut wrappers = HashSet::new();
    let mut fields = HashSet::from(["inner".to_string()]);

    for client in clientset.clients() {
        if !fields.insert(client.field_name()) {
            return Err(WrapgenError::DuplicateWrapper(format!(
                "clientset field {}",
                client.field_name()
            )));
        }
        if !wrappers.insert(client.wrapper_name()) {
            return Err(WrapgenError::DuplicateWrapper(client.wrapper_name()));
        }
        for resource in client.resources() {
            let name = resource.wrapper_name(client);
            if !wrappers.insert(name.clone()) {
                return Err(WrapgenError::DuplicateWrapper(name));
            }
        }
    }
    Ok(())
}
