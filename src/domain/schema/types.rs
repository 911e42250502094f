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

//! Go type expressions as they are written in a schema file.
//!
//! A named type is written with its full import path, e.g.
//! `k8s.io/api/core/v1.Pod` or `context.Context`. The type name follows the
//! last `.` of the final path segment, so dotted host names and versioned
//! segments such as `gopkg.in/yaml.v2` stay in the package path.

use crate::shared::error::{Result, WrapgenError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Builtin(String),
    Named { package: String, name: String },
    Pointer(Box<TypeRef>),
    Slice(Box<TypeRef>),
    Map(Box<TypeRef>, Box<TypeRef>),
    /// Only valid as the last parameter of a method.
    Variadic(Box<TypeRef>),
}

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"))
}

fn package_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.~\-]+(/[A-Za-z0-9_.~\-]+)*$").expect("valid path regex"))
}

impl TypeRef {
    pub fn builtin(name: impl Into<String>) -> Self {
        TypeRef::Builtin(name.into())
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef::Named {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn parse(expr: &str) -> Result<Self> {
        let trimmed = expr.trim();
        if let Some(rest) = trimmed.strip_prefix("...") {
            let elem = Self::parse_plain(expr, rest)?;
            return Ok(TypeRef::Variadic(Box::new(elem)));
        }
        Self::parse_plain(expr, trimmed)
    }

    fn parse_plain(expr: &str, s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(WrapgenError::invalid_type(expr, "empty type"));
        }
        if s.starts_with("...") {
            return Err(WrapgenError::invalid_type(
                expr,
                "variadic marker is only allowed at the outermost level",
            ));
        }
        if let Some(rest) = s.strip_prefix('*') {
            return Ok(TypeRef::Pointer(Box::new(Self::parse_plain(expr, rest)?)));
        }
        if let Some(rest) = s.strip_prefix("[]") {
            return Ok(TypeRef::Slice(Box::new(Self::parse_plain(expr, rest)?)));
        }
        if let Some(rest) = s.strip_prefix("map[") {
            let close = matching_bracket(rest)
                .ok_or_else(|| WrapgenError::invalid_type(expr, "unbalanced map key brackets"))?;
            let key = Self::parse_plain(expr, &rest[..close])?;
            let value = Self::parse_plain(expr, &rest[close + 1..])?;
            return Ok(TypeRef::Map(Box::new(key), Box::new(value)));
        }
        if s.starts_with('[') {
            return Err(WrapgenError::invalid_type(expr, "fixed size arrays are not supported"));
        }
        if s == "interface{}" {
            return Ok(TypeRef::builtin(s));
        }

        let name_start = s.rfind('/').map(|i| i + 1).unwrap_or(0);
        match s[name_start..].rfind('.') {
            None => {
                if name_start > 0 {
                    return Err(WrapgenError::invalid_type(expr, "missing type name after package path"));
                }
                if !identifier_re().is_match(s) {
                    return Err(WrapgenError::invalid_type(expr, "invalid identifier"));
                }
                Ok(TypeRef::builtin(s))
            }
            Some(dot) => {
                let (package, name) = (&s[..name_start + dot], &s[name_start + dot + 1..]);
                if !package_path_re().is_match(package) {
                    return Err(WrapgenError::invalid_type(expr, "invalid package path"));
                }
                if !identifier_re().is_match(name) {
                    return Err(WrapgenError::invalid_type(expr, "invalid type name"));
                }
                Ok(TypeRef::named(package, name))
            }
        }
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self, TypeRef::Variadic(_))
    }

    /// Returns `(package, name)` for named types.
    pub fn as_named(&self) -> Option<(&str, &str)> {
        match self {
            TypeRef::Named { package, name } => Some((package, name)),
            _ => None,
        }
    }

    /// Collects every package referenced by this type, looking through
    /// pointers, slices, maps and variadic markers.
    pub fn collect_packages(&self, out: &mut BTreeSet<String>) {
        match self {
            TypeRef::Builtin(_) => {}
            TypeRef::Named { package, .. } => {
                out.insert(package.clone());
            }
            TypeRef::Pointer(elem) | TypeRef::Slice(elem) | TypeRef::Variadic(elem) => {
                elem.collect_packages(out)
            }
            TypeRef::Map(key, value) => {
                key.collect_packages(out);
                value.collect_packages(out);
            }
        }
    }
}

fn matching_bracket(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Builtin(name) => write!(f, "{}", name),
            TypeRef::Named { package, name } => write!(f, "{}.{}", package, name),
            TypeRef::Pointer(elem) => write!(f, "*{}", elem),
            TypeRef::Slice(elem) => write!(f, "[]{}", elem),
            TypeRef::Map(key, value) => write!(f, "map[{}]{}", key, value),
            TypeRef::Variadic(elem) => write!(f, "...{}", elem),
        }
    }
}

impl FromStr for TypeRef {
    type Err = WrapgenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = WrapgenError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}
