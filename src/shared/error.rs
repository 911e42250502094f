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

use std::path::PathBuf;
use thiserror::Error;
pub type Result<T> = std::result::Result<T, WrapgenError>;

#[derive(Error, Debug)]
pub enum WrapgenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Invalid type expression '{expr}': {reason}")]
    InvalidType { expr: String, reason: String },

    #[error("Unknown interface: {0}")]
    UnknownInterface(String),

    #[error("Unsupported accessor {interface}.{method}: {reason}")]
    UnsupportedAccessor {
        interface: String,
        method: String,
        reason: String,
    },

    #[error("Duplicate wrapper type '{0}' in generated output")]
    DuplicateWrapper(String),

    #[error("Import alias '{alias}' is shared by {first} and {second}")]
    ImportAliasCollision {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create file {}: {source}", path.display())]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Formatter failed: {0}")]
    Formatter(String),

    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl WrapgenError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn schema_error(context: impl Into<String>) -> Self {
        Self::SchemaError(context.into())
    }

    pub fn invalid_type(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidType {
            expr: expr.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_accessor(
        interface: impl Into<String>,
        method: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedAccessor {
            interface: interface.into(),
            method: method.into(),
            reason: reason.into(),
        }
    }
}
