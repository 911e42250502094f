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

use super::go_file::{args, params, quote, results, rets, write_delegate, write_inner_call};
use super::WrapperTemplate;
use crate::domain::clientset::{Client, Clientset, Operation, Resource};
use crate::domain::config::TracingConf;
use crate::infrastructure::constants::START_SPAN_FN;
use crate::shared::naming::package_alias;
use std::fmt::{self, Write};

/// Brackets every context aware operation with a span.
#[derive(Debug, Clone)]
pub struct TracesTemplate {
    conf: TracingConf,
    component: String,
}

impl TracesTemplate {
    pub fn new(conf: TracingConf, component: impl Into<String>) -> Self {
        Self {
            conf,
            component: component.into(),
        }
    }

    fn attribute(&self, key: &str, value: &str) -> String {
        format!(
            "{}.String({}, {})",
            package_alias(&self.conf.attribute_package),
            quote(key),
            quote(value)
        )
    }

    fn span_name(&self, client: &Client, resource: &Resource, operation: &Operation) -> String {
        let path = format!("{}/{}/{}", client.name(), resource.kind(), operation.name());
        if self.conf.span_prefix.is_empty() {
            path
        } else {
            format!("{} {}", self.conf.span_prefix, path)
        }
    }
}

impl WrapperTemplate for TracesTemplate {
    fn imports(&self, clientset: &Clientset) -> Vec<String> {
        let traced = clientset
            .clients()
            .flat_map(|c| c.resources())
            .flat_map(|r| r.operations.iter())
            .filter(|op| op.has_context());

        let mut imports = Vec::new();
        let mut with_error = false;
        for op in traced {
            if imports.is_empty() {
                imports.push(self.conf.package.clone());
                imports.push(self.conf.attribute_package.clone());
            }
            with_error |= op.has_error();
        }
        if with_error {
            imports.push(self.conf.codes_package.clone());
        }
        imports
    }

    fn write_resource_accessor(
        &self,
        out: &mut String,
        client: &Client,
        resource: &Resource,
        arg: Option<&str>,
    ) -> fmt::Result {
        writeln!(
            out,
            "\treturn {}(c.inner.{}({}))",
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
        let wrapper = resource.wrapper_name(client);
        let method = &operation.method;
        if !operation.has_context() {
            return write_delegate(out, &wrapper, method);
        }

        writeln!(
            out,
            "func (c *{}) {}({}){} {{",
            wrapper,
            method.name,
            params(method),
            results(method)
        )?;
        writeln!(
            out,
            "\tctx, span := {}.{}(",
            package_alias(&self.conf.package),
            START_SPAN_FN
        )?;
        writeln!(out, "\t\targ0,")?;
        writeln!(out, "\t\t{},", quote(&self.component))?;
        writeln!(
            out,
            "\t\t{},",
            quote(&self.span_name(client, resource, operation))
        )?;
        writeln!(out, "\t\t{},", self.attribute("client", client.name()))?;
        writeln!(out, "\t\t{},", self.attribute("resource", resource.name()))?;
        writeln!(out, "\t\t{},", self.attribute("kind", &resource.kind()))?;
        writeln!(out, "\t\t{},", self.attribute("operation", operation.name()))?;
        writeln!(out, "\t)")?;
        writeln!(out, "\tdefer span.End()")?;
        writeln!(out, "\targ0 = ctx")?;

        match operation.error_index() {
            Some(index) => {
                let rets = rets(method);
                let err = format!("ret{}", index);
                writeln!(
                    out,
                    "\t{} := c.inner.{}({})",
                    rets,
                    method.name,
                    args(method)
                )?;
                writeln!(out, "\tif {} != nil {{", err)?;
                writeln!(out, "\t\tspan.RecordError({})", err)?;
                writeln!(
                    out,
                    "\t\tspan.SetStatus({}.Error, {}.Error())",
                    package_alias(&self.conf.codes_package),
                    err
                )?;
                writeln!(out, "\t}}")?;
                writeln!(out, "\treturn {}", rets)?;
            }
            None => write_inner_call(out, method)?,
        }
        writeln!(out, "}}")
    }
}
