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

//! Identifier and type formatting used by the generated Go source.

use crate::domain::schema::TypeRef;
use regex::Regex;
use std::sync::OnceLock;

fn first_cap_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"))
}

fn all_cap_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"))
}

fn non_ident_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"))
}

/// `UpdateStatus` -> `update_status`, `OpenAPISchema` -> `open_api_schema`.
pub fn to_snake_case(s: &str) -> String {
    let snake = first_cap_re().replace_all(s, "${1}_${2}");
    let snake = all_cap_re().replace_all(&snake, "${1}_${2}");
    snake.to_lowercase()
}

/// Collapse an import path into a valid Go identifier, used as the import alias.
pub fn package_alias(package: &str) -> String {
    let alias = non_ident_re().replace_all(package, "_").into_owned();
    if alias.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", alias)
    } else {
        alias
    }
}

/// Format a type the way it appears in generated code, qualified by import alias.
pub fn go_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Builtin(name) => name.clone(),
        TypeRef::Named { package, name } => format!("{}.{}", package_alias(package), name),
        TypeRef::Pointer(elem) => format!("*{}", go_type(elem)),
        TypeRef::Slice(elem) => format!("[]{}", go_type(elem)),
        TypeRef::Map(key, value) => format!("map[{}]{}", go_type(key), go_type(value)),
        TypeRef::Variadic(elem) => format!("...{}", go_type(elem)),
    }
}

/// Bare type name of a named type (`PodInterface` for `k8s.io/.../v1.PodInterface`).
pub fn type_name(ty: &TypeRef) -> String {
    match ty.as_named() {
        Some((_, name)) => name.to_string(),
        None => go_type(ty),
    }
}
