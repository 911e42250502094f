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

//! Declarative description of a clientset's interface hierarchy.

use super::types::TypeRef;
use crate::shared::error::{Result, WrapgenError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::read_to_string;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    #[serde(default)]
    pub results: Vec<TypeRef>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, params: Vec<TypeRef>, results: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            params,
            results,
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.params.last().map(TypeRef::is_variadic).unwrap_or(false)
    }

    fn validate(&self, owner: &str) -> Result<()> {
        let starts_upper = self
            .name
            .chars()
            .next()
            .map(|c| c.is_ascii_uppercase())
            .unwrap_or(false);
        if !starts_upper || !self.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(WrapgenError::schema_error(format!(
                "{}: method '{}' is not an exported Go identifier",
                owner, self.name
            )));
        }

        if let Some(pos) = self.params.iter().position(TypeRef::is_variadic) {
            if pos + 1 != self.params.len() {
                return Err(WrapgenError::schema_error(format!(
                    "{}.{}: only the last parameter may be variadic",
                    owner, self.name
                )));
            }
        }
        if self.results.iter().any(TypeRef::is_variadic) {
            return Err(WrapgenError::schema_error(format!(
                "{}.{}: results cannot be variadic",
                owner, self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: TypeRef,
    #[serde(default)]
    pub embeds: Vec<TypeRef>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// Schema file as written on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaFile {
    pub root: TypeRef,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDecl>,
    #[serde(default)]
    pub external_interfaces: Vec<TypeRef>,
}

/// Validated schema with embeddings resolved and method sets sorted by name.
#[derive(Debug, Clone)]
pub struct ApiSchema {
    root: TypeRef,
    interfaces: BTreeMap<String, Vec<MethodDecl>>,
    external: BTreeSet<String>,
}

impl ApiSchema {
    /// Load a schema file. `.json` files are read as JSON, everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            WrapgenError::schema_error(format!("Failed to read schema {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let schema = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        debug!(
            "Loaded schema {} ({} interfaces)",
            path.display(),
            schema.interfaces.len()
        );
        Ok(schema)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: SchemaFile = serde_yaml::from_str(content)?;
        Self::from_decl(file)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: SchemaFile = serde_json::from_str(content)?;
        Self::from_decl(file)
    }

    pub fn from_decl(file: SchemaFile) -> Result<Self> {
        let mut decls: BTreeMap<String, &InterfaceDecl> = BTreeMap::new();
        for decl in &file.interfaces {
            let key = qualified(&decl.name)?;
            if decls.insert(key.clone(), decl).is_some() {
                return Err(WrapgenError::schema_error(format!(
                    "interface {} is declared more than once",
                    key
                )));
            }
        }

        let mut external = BTreeSet::new();
        for ty in &file.external_interfaces {
            let key = qualified(ty)?;
            if decls.contains_key(&key) {
                return Err(WrapgenError::schema_error(format!(
                    "interface {} is both declared and external",
                    key
                )));
            }
            external.insert(key);
        }

        let root = qualified(&file.root)?;
        if !decls.contains_key(&root) {
            return Err(WrapgenError::UnknownInterface(format!(
                "root {} is not a declared interface",
                root
            )));
        }

        let mut interfaces = BTreeMap::new();
        for name in decls.keys() {
            let mut visiting = HashSet::new();
            resolve(name, &decls, &mut visiting, &mut interfaces)?;
        }

        Ok(Self {
            root: file.root,
            interfaces,
            external,
        })
    }

    pub fn root(&self) -> &TypeRef {
        &self.root
    }

    /// Method set of a declared interface, sorted by name.
    pub fn methods(&self, ty: &TypeRef) -> Option<&[MethodDecl]> {
        let (package, name) = ty.as_named()?;
        self.interfaces
            .get(&format!("{}.{}", package, name))
            .map(Vec::as_slice)
    }

    pub fn is_interface(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Builtin(name) => name == "error",
            TypeRef::Named { package, name } => {
                let key = format!("{}.{}", package, name);
                self.interfaces.contains_key(&key) || self.external.contains(&key)
            }
            _ => false,
        }
    }
}

fn qualified(ty: &TypeRef) -> Result<String> {
    match ty.as_named() {
        Some((package, name)) => Ok(format!("{}.{}", package, name)),
        None => Err(WrapgenError::schema_error(format!(
            "'{}' is not a package qualified interface name",
            ty
        ))),
    }
}

fn resolve(
    name: &str,
    decls: &BTreeMap<String, &InterfaceDecl>,
    visiting: &mut HashSet<String>,
    resolved: &mut BTreeMap<String, Vec<MethodDecl>>,
) -> Result<()> {
    if resolved.contains_key(name) {
        return Ok(());
    }
    if !visiting.insert(name.to_string()) {
        return Err(WrapgenError::schema_error(format!(
            "interface {} embeds itself",
            name
        )));
    }

    let decl = decls.get(name).ok_or_else(|| {
        WrapgenError::UnknownInterface(format!("embedded interface {} is not declared", name))
    })?;

    let mut methods: BTreeMap<String, MethodDecl> = BTreeMap::new();
    let mut merge = |method: &MethodDecl| -> Result<()> {
        match methods.get(&method.name) {
            Some(existing) if existing != method => Err(WrapgenError::schema_error(format!(
                "{}: conflicting declarations of method {}",
                name, method.name
            ))),
            Some(_) => Ok(()),
            None => {
                methods.insert(method.name.clone(), method.clone());
                Ok(())
            }
        }
    };

    for embed in &decl.embeds {
        let embed_name = qualified(embed)?;
        resolve(&embed_name, decls, visiting, resolved)?;
        for method in &resolved[&embed_name] {
            merge(method)?;
        }
    }
    for method in &decl.methods {
        method.validate(name)?;
        merge(method)?;
    }

    visiting.remove(name);
    // BTreeMap iteration keeps the method set in byte order of names.
    resolved.insert(name.to_string(), methods.into_values().collect());
    Ok(())
}
