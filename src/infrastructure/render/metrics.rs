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

use super::go_file::{params, quote, results, write_inner_call};
use super::{StateField, WrapperTemplate};
use crate::domain::clientset::{Client, Clientset, Operation, Resource};
use crate::infrastructure::constants::{
    CLUSTERED_RECORDER_FN, METRICS_CLIENT_TYPE, METRICS_CONFIG_MANAGER, METRICS_RECORDER,
    NAMESPACED_RECORDER_FN,
};
use crate::shared::naming::package_alias;
use std::fmt::{self, Write};

/// Records one query per resource operation through the metrics subsystem.
#[derive(Debug, Clone)]
pub struct MetricsTemplate {
    package: String,
    alias: String,
}

impl MetricsTemplate {
    pub fn new(metrics_package: impl Into<String>) -> Self {
        let package = metrics_package.into();
        let alias = package_alias(&package);
        Self { package, alias }
    }

    fn qualified(&self, name: &str) -> String {
        format!("{}.{}", self.alias, name)
    }
}

impl WrapperTemplate for MetricsTemplate {
    fn imports(&self, _clientset: &Clientset) -> Vec<String> {
        vec![self.package.clone()]
    }

    fn clientset_params(&self) -> Vec<(String, String)> {
        vec![
            ("m".to_string(), self.qualified(METRICS_CONFIG_MANAGER)),
            ("t".to_string(), self.qualified(METRICS_CLIENT_TYPE)),
        ]
    }

    fn client_state(&self) -> Vec<StateField> {
        vec![
            StateField::new("metrics", "metrics", self.qualified(METRICS_CONFIG_MANAGER)),
            StateField::new("clientType", "t", self.qualified(METRICS_CLIENT_TYPE)),
        ]
    }

    fn resource_state(&self) -> Vec<StateField> {
        vec![StateField::new(
            "recorder",
            "recorder",
            self.qualified(METRICS_RECORDER),
        )]
    }

    fn write_resource_accessor(
        &self,
        out: &mut String,
        client: &Client,
        resource: &Resource,
        arg: Option<&str>,
    ) -> fmt::Result {
        let kind = quote(&resource.kind());
        match arg {
            Some(namespace) => writeln!(
                out,
                "\trecorder := {}(c.metrics, {}, {}, c.clientType)",
                self.qualified(NAMESPACED_RECORDER_FN),
                namespace,
                kind
            )?,
            None => writeln!(
                out,
                "\trecorder := {}(c.metrics, {}, c.clientType)",
                self.qualified(CLUSTERED_RECORDER_FN),
                kind
            )?,
        }
        writeln!(
            out,
            "\treturn {}(c.inner.{}({}), recorder)",
            resource.constructor_name(client),
            resource.name(),
            arg.unwrap_or_default()
        )
    }

    fn write_operation(
        &self,
        out: &mut String,
        client: &Client,
        resource: &Resource,
        operation: &Operation,
    ) -> fmt::Result {
        let method = &operation.method;
        writeln!(
            out,
            "func (c *{}) {}({}){} {{",
            resource.wrapper_name(client),
            method.name,
            params(method),
            results(method)
        )?;
        writeln!(
            out,
            "\tdefer c.recorder.Record({})",
            quote(&operation.metric_name())
        )?;
        write_inner_call(out, method)?;
        writeln!(out, "}}")
    }
}
