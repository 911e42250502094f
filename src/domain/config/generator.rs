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

//! Type definitions for the generator configuration file (`wrapgen.toml`)

use crate::domain::clientset::WalkOptions;
use crate::infrastructure::constants::*;
use crate::shared::error::{Result, WrapgenError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

// ============================================================================
// Main generator configuration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConf {
    /// Name of the file written into every output directory
    pub file_name: String,
    /// Go package clause of generated files, unless an output overrides it
    pub package: String,
    pub rest_package: String,
    /// Optional post-processing command, e.g. `["gofmt"]`
    pub formatter: Option<Vec<String>>,
    pub metrics: MetricsConf,
    pub tracing: TracingConf,
    pub walker: WalkerConf,
    #[serde(rename = "target")]
    pub targets: Vec<TargetConf>,
}

impl Default for GeneratorConf {
    fn default() -> Self {
        Self {
            file_name: GENERATED_FILE_NAME.to_string(),
            package: GENERATED_PACKAGE.to_string(),
            rest_package: REST_PACKAGE.to_string(),
            formatter: None,
            metrics: MetricsConf::default(),
            tracing: TracingConf::default(),
            walker: WalkerConf::default(),
            targets: Vec::new(),
        }
    }
}

impl GeneratorConf {
    /// Load configuration from a TOML file. Relative paths inside the file are
    /// resolved against the file's directory.
    pub fn from<T: AsRef<Path>>(path: T) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            WrapgenError::config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut conf = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            conf.resolve_paths(base);
        }
        Ok(conf)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        for target in &mut self.targets {
            if target.schema.is_relative() {
                target.schema = base.join(&target.schema);
            }
            for output in &mut target.outputs {
                if output.dir.is_relative() {
                    output.base_dir = Some(base.to_path_buf());
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(WrapgenError::config_error("no [[target]] configured"));
        }
        if self.file_name.is_empty()
            || self.file_name.contains('/')
            || !self.file_name.ends_with(".go")
        {
            return Err(WrapgenError::config_error(format!(
                "file_name must be a plain .go file name, got '{}'",
                self.file_name
            )));
        }
        validate_package_name(&self.package)?;
        if let Some(formatter) = &self.formatter {
            if formatter.is_empty() {
                return Err(WrapgenError::config_error("formatter command is empty"));
            }
        }

        let mut names = HashSet::new();
        let mut outputs = HashSet::new();
        for target in &self.targets {
            if target.name.is_empty() {
                return Err(WrapgenError::config_error("target name is required"));
            }
            if !names.insert(target.name.as_str()) {
                return Err(WrapgenError::config_error(format!(
                    "target '{}' is configured more than once",
                    target.name
                )));
            }
            if target.outputs.is_empty() {
                return Err(WrapgenError::config_error(format!(
                    "target '{}' has no [[target.output]]",
                    target.name
                )));
            }
            for output in &target.outputs {
                if let Some(package) = &output.package {
                    validate_package_name(package)?;
                }
                let path = output.file_path(&self.file_name);
                if !outputs.insert(path.clone()) {
                    return Err(WrapgenError::config_error(format!(
                        "output {} is written by more than one target",
                        path.display()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Targets to run: all of them, or the one named.
    pub fn select_targets(&self, name: Option<&str>) -> Result<Vec<&TargetConf>> {
        match name {
            None => Ok(self.targets.iter().collect()),
            Some(name) => self
                .targets
                .iter()
                .find(|t| t.name == name)
                .map(|t| vec![t])
                .ok_or_else(|| WrapgenError::config_error(format!("unknown target '{}'", name))),
        }
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            clientset_exclusions: self.walker.clientset_exclusions.clone(),
            client_exclusions: self.walker.client_exclusions.clone(),
        }
    }
}

fn validate_package_name(package: &str) -> Result<()> {
    let valid = package
        .chars()
        .next()
        .map(|c| c.is_ascii_lowercase() || c == '_')
        .unwrap_or(false)
        && package
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(WrapgenError::config_error(format!(
            "'{}' is not a valid Go package name",
            package
        )))
    }
}

// ============================================================================
// Instrumentation packages
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConf {
    pub package: String,
}

impl Default for MetricsConf {
    fn default() -> Self {
        Self {
            package: METRICS_PACKAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TracingConf {
    pub package: String,
    pub attribute_package: String,
    pub codes_package: String,
    pub span_prefix: String,
}

impl Default for TracingConf {
    fn default() -> Self {
        Self {
            package: TRACING_PACKAGE.to_string(),
            attribute_package: ATTRIBUTE_PACKAGE.to_string(),
            codes_package: CODES_PACKAGE.to_string(),
            span_prefix: SPAN_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WalkerConf {
    pub clientset_exclusions: Vec<String>,
    pub client_exclusions: Vec<String>,
}

impl Default for WalkerConf {
    fn default() -> Self {
        let defaults = WalkOptions::default();
        Self {
            clientset_exclusions: defaults.clientset_exclusions,
            client_exclusions: defaults.client_exclusions,
        }
    }
}

// ============================================================================
// Targets
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TargetConf {
    pub name: String,
    pub schema: PathBuf,
    /// Emit `NewForConfig`, which calls the root package's own `NewForConfig`.
    pub new_for_config: bool,
    #[serde(rename = "output")]
    pub outputs: Vec<OutputConf>,
}

impl Default for TargetConf {
    fn default() -> Self {
        Self {
            name: String::new(),
            schema: PathBuf::new(),
            new_for_config: true,
            outputs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WrapperKind {
    Metrics,
    Traces,
}

impl WrapperKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapperKind::Metrics => "metrics",
            WrapperKind::Traces => "traces",
        }
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WrapperKind {
    type Err = WrapgenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "metrics" => Ok(WrapperKind::Metrics),
            "traces" => Ok(WrapperKind::Traces),
            _ => Err(WrapgenError::config_error(format!(
                "Invalid wrapper kind: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConf {
    pub kind: WrapperKind,
    /// Output directory, as written in the config file
    pub dir: PathBuf,
    /// Tracing component name; defaults to `dir`
    #[serde(default)]
    pub component: Option<String>,
    /// Overrides the top-level `package`
    #[serde(default)]
    pub package: Option<String>,
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl OutputConf {
    pub fn new(kind: WrapperKind, dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            dir: dir.into(),
            component: None,
            package: None,
            base_dir: None,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(&self.dir),
            None => self.dir.clone(),
        }
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.output_dir().join(file_name)
    }

    pub fn component(&self) -> String {
        self.component
            .clone()
            .unwrap_or_else(|| self.dir.to_string_lossy().replace('\\', "/"))
    }

    pub fn package<'a>(&'a self, default: &'a str) -> &'a str {
        self.package.as_deref().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONF: &str = r#"
package = "client"

[tracing]
span_prefix = "KUBE"

[[target]]
name = "kyverno"
schema = "schemas/kyverno.yaml"

[[target.output]]
kind = "metrics"
dir = "pkg/clients/wrappers/metrics/kyverno"

[[target.output]]
kind = "traces"
dir = "pkg/clients/wrappers/traces/kyverno"
"#;

    #[test]
    fn test_parse_with_defaults() {
        let conf = GeneratorConf::from_toml_str(CONF).unwrap();
        assert_eq!(conf.file_name, "clientset.generated.go");
        assert_eq!(conf.metrics.package, METRICS_PACKAGE);
        assert_eq!(conf.tracing.attribute_package, ATTRIBUTE_PACKAGE);
        assert_eq!(conf.walker.clientset_exclusions, vec!["Discovery"]);
        assert_eq!(conf.targets.len(), 1);
        assert!(conf.targets[0].new_for_config);
        assert_eq!(conf.targets[0].outputs[1].kind, WrapperKind::Traces);
        conf.validate().unwrap();
    }

    #[test]
    fn test_resolve_paths_against_config_dir() {
        let mut conf = GeneratorConf::from_toml_str(CONF).unwrap();
        conf.resolve_paths(Path::new("/repo"));
        let target = &conf.targets[0];
        assert_eq!(target.schema, PathBuf::from("/repo/schemas/kyverno.yaml"));
        assert_eq!(
            target.outputs[0].file_path(&conf.file_name),
            PathBuf::from("/repo/pkg/clients/wrappers/metrics/kyverno/clientset.generated.go")
        );
        // the tracing component stays relative to the repository
        assert_eq!(
            target.outputs[1].component(),
            "pkg/clients/wrappers/traces/kyverno"
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_outputs() {
        let mut conf = GeneratorConf::from_toml_str(CONF).unwrap();
        conf.targets[0].outputs[1].kind = WrapperKind::Metrics;
        conf.targets[0].outputs[1].dir = conf.targets[0].outputs[0].dir.clone();
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_package() {
        let mut conf = GeneratorConf::from_toml_str(CONF).unwrap();
        conf.package = "Client-Go".to_string();
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_validate_requires_targets() {
        let conf = GeneratorConf::default();
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_select_targets() {
        let conf = GeneratorConf::from_toml_str(CONF).unwrap();
        assert_eq!(conf.select_targets(None).unwrap().len(), 1);
        assert_eq!(conf.select_targets(Some("kyverno")).unwrap().len(), 1);
        assert!(conf.select_targets(Some("kube")).is_err());
    }

    #[test]
    fn test_wrapper_kind_from_str() {
        assert_eq!("metrics".parse::<WrapperKind>().unwrap(), WrapperKind::Metrics);
        assert!("logging".parse::<WrapperKind>().is_err());
    }
}
