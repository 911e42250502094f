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

//! Go source rendering for wrapped clientsets.
//!
//! The layout of the file (Wrap, NewForConfig, the clientset struct, one
//! wrapper per client and resource) is shared; a [`WrapperTemplate`] supplies
//! the instrumentation specific parts.

pub mod go_file;
pub mod metrics;
pub mod traces;

pub use metrics::MetricsTemplate;
pub use traces::TracesTemplate;

use crate::domain::clientset::{check_import_aliases, resolve_imports, Client, Clientset, Member, Operation, Resource};
use crate::shared::naming::{go_type, package_alias};
use crate::shared::Result;
use go_file::{results, write_delegate, write_keyed_values, write_preamble, write_struct};
use std::collections::BTreeSet;
use std::fmt::{self, Write};

/// State carried by a wrapper struct besides `inner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateField {
    /// Struct field name.
    pub field: String,
    /// Constructor parameter name.
    pub param: String,
    pub ty: String,
}

impl StateField {
    pub fn new(field: impl Into<String>, param: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            param: param.into(),
            ty: ty.into(),
        }
    }
}

/// Instrumentation specific parts of a wrapper file.
pub trait WrapperTemplate {
    /// Packages the template references besides the ones found in signatures.
    fn imports(&self, clientset: &Clientset) -> Vec<String>;

    /// Extra `(name, type)` parameters of `Wrap` and `NewForConfig`, forwarded
    /// positionally to every client constructor.
    fn clientset_params(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn client_state(&self) -> Vec<StateField> {
        Vec::new()
    }

    fn resource_state(&self) -> Vec<StateField> {
        Vec::new()
    }

    /// Body of a resource accessor on the client wrapper. `arg` is the
    /// accessor argument (the namespace) when the resource is namespaced.
    fn write_resource_accessor(
        &self,
        out: &mut String,
        client: &Client,
        resource: &Resource,
        arg: Option<&str>,
    ) -> fmt::Result;

    /// A complete method on the resource wrapper.
    fn write_operation(
        &self,
        out: &mut String,
        client: &Client,
        resource: &Resource,
        operation: &Operation,
    ) -> fmt::Result;
}

/// Settings shared by every template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Go package clause of the generated file.
    pub package: String,
    pub rest_package: String,
    /// Emit `NewForConfig` next to `Wrap`.
    pub new_for_config: bool,
}

/// Render the complete wrapper file in memory.
pub fn render(
    clientset: &Clientset,
    options: &RenderOptions,
    template: &dyn WrapperTemplate,
) -> Result<String> {
    let mut base = template.imports(clientset);
    if options.new_for_config {
        base.push(options.rest_package.clone());
    }
    let imports = resolve_imports(clientset, base);
    check_import_aliases(&imports)?;

    let mut out = String::new();
    write_file(&mut out, clientset, options, template, &imports)?;
    Ok(out)
}

fn write_file(
    out: &mut String,
    clientset: &Clientset,
    options: &RenderOptions,
    template: &dyn WrapperTemplate,
    imports: &BTreeSet<String>,
) -> fmt::Result {
    write_preamble(out, &options.package, imports)?;

    let root = go_type(&clientset.ty);
    let params = template.clientset_params();
    let extra_params: String = params
        .iter()
        .map(|(name, ty)| format!(", {} {}", name, ty))
        .collect();
    let extra_args: String = params.iter().map(|(name, _)| format!(", {}", name)).collect();

    writeln!(out)?;
    writeln!(out, "// Wrap")?;
    writeln!(out, "func Wrap(inner {}{}) {} {{", root, extra_params, root)?;
    writeln!(out, "\treturn &clientset{{")?;
    let mut pairs = vec![("inner".to_string(), "inner".to_string())];
    for client in clientset.clients() {
        pairs.push((
            client.field_name(),
            format!(
                "{}(inner.{}(){})",
                client.constructor_name(),
                client.name(),
                extra_args
            ),
        ));
    }
    write_keyed_values(out, "\t\t", &pairs)?;
    writeln!(out, "\t}}")?;
    writeln!(out, "}}")?;

    if options.new_for_config {
        writeln!(out)?;
        writeln!(out, "// NewForConfig")?;
        writeln!(
            out,
            "func NewForConfig(c *{}.Config{}) ({}, error) {{",
            package_alias(&options.rest_package),
            extra_params,
            root
        )?;
        writeln!(
            out,
            "\tinner, err := {}.NewForConfig(c)",
            package_alias(clientset.package())
        )?;
        writeln!(out, "\tif err != nil {{")?;
        writeln!(out, "\t\treturn nil, err")?;
        writeln!(out, "\t}}")?;
        writeln!(out, "\treturn Wrap(inner{}), nil", extra_args)?;
        writeln!(out, "}}")?;
    }

    write_clientset(out, clientset)?;
    for client in clientset.clients() {
        write_client(out, client, template)?;
    }
    for client in clientset.clients() {
        for resource in client.resources() {
            write_resource(out, client, resource, template)?;
        }
    }
    Ok(())
}

fn write_clientset(out: &mut String, clientset: &Clientset) -> fmt::Result {
    let mut fields = vec![("inner".to_string(), go_type(&clientset.ty))];
    for client in clientset.clients() {
        fields.push((client.field_name(), go_type(&client.ty)));
    }

    writeln!(out)?;
    writeln!(out, "// clientset wrapper")?;
    write_struct(out, "clientset", &fields)?;
    writeln!(out)?;
    for member in &clientset.members {
        match member {
            Member::Direct(method) => {
                writeln!(out, "// {} is NOT instrumented", method.name)?;
                write_delegate(out, "clientset", method)?;
            }
            Member::Wrapped(client) => {
                writeln!(
                    out,
                    "func (c *clientset) {}(){} {{",
                    client.name(),
                    results(&client.method)
                )?;
                writeln!(out, "\treturn c.{}", client.field_name())?;
                writeln!(out, "}}")?;
            }
        }
    }
    Ok(())
}

fn write_client(out: &mut String, client: &Client, template: &dyn WrapperTemplate) -> fmt::Result {
    let wrapper = client.wrapper_name();
    let state = template.client_state();
    write_wrapper_header(
        out,
        &wrapper,
        &client.constructor_name(),
        &go_type(&client.ty),
        &state,
    )?;

    for member in &client.members {
        match member {
            Member::Direct(method) => {
                writeln!(out, "// {} is NOT instrumented", method.name)?;
                write_delegate(out, &wrapper, method)?;
            }
            Member::Wrapped(resource) => {
                let (params, arg) = match resource.method.params.first() {
                    Some(ty) => (format!("namespace {}", go_type(ty)), Some("namespace")),
                    None => (String::new(), None),
                };
                writeln!(
                    out,
                    "func (c *{}) {}({}){} {{",
                    wrapper,
                    resource.name(),
                    params,
                    results(&resource.method)
                )?;
                template.write_resource_accessor(out, client, resource, arg)?;
                writeln!(out, "}}")?;
            }
        }
    }
    Ok(())
}

fn write_resource(
    out: &mut String,
    client: &Client,
    resource: &Resource,
    template: &dyn WrapperTemplate,
) -> fmt::Result {
    write_wrapper_header(
        out,
        &resource.wrapper_name(client),
        &resource.constructor_name(client),
        &go_type(&resource.ty),
        &template.resource_state(),
    )?;
    for operation in &resource.operations {
        template.write_operation(out, client, resource, operation)?;
    }
    Ok(())
}

/// Struct declaration plus constructor of one wrapper type.
fn write_wrapper_header(
    out: &mut String,
    wrapper: &str,
    constructor: &str,
    inner: &str,
    state: &[StateField],
) -> fmt::Result {
    let mut fields = vec![("inner".to_string(), inner.to_string())];
    fields.extend(state.iter().map(|s| (s.field.clone(), s.ty.clone())));

    writeln!(out)?;
    writeln!(out, "// {} wrapper", wrapper)?;
    write_struct(out, wrapper, &fields)?;
    writeln!(out)?;

    let params: String = state
        .iter()
        .map(|s| format!(", {} {}", s.param, s.ty))
        .collect();
    let args: String = state.iter().map(|s| format!(", {}", s.param)).collect();
    writeln!(
        out,
        "func {}(inner {}{}) {} {{",
        constructor, inner, params, inner
    )?;
    writeln!(out, "\treturn &{}{{inner{}}}", wrapper, args)?;
    writeln!(out, "}}")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::clientset::{walk, Clientset, WalkOptions};
    use crate::domain::schema::ApiSchema;

    pub const FOO_SCHEMA: &str = r#"
root: example.com/foo/clientset.Interface
externalInterfaces:
  - k8s.io/client-go/rest.Interface
  - k8s.io/client-go/discovery.DiscoveryInterface
interfaces:
  - name: example.com/foo/clientset.Interface
    methods:
      - name: Discovery
        results: [k8s.io/client-go/discovery.DiscoveryInterface]
      - name: FooV1
        results: [example.com/foo/typed/v1.FooInterface]
  - name: example.com/foo/typed/v1.FooInterface
    methods:
      - name: RESTClient
        results: [k8s.io/client-go/rest.Interface]
      - name: Widgets
        params: [string]
        results: [example.com/foo/typed/v1.WidgetInterface]
      - name: Gadgets
        results: [example.com/foo/typed/v1.GadgetInterface]
  - name: example.com/foo/typed/v1.WidgetInterface
    methods:
      - name: Create
        params: [context.Context, "*example.com/foo/api/v1.Widget"]
        results: ["*example.com/foo/api/v1.Widget", error]
      - name: UpdateStatus
        params: [context.Context, "*example.com/foo/api/v1.Widget"]
        results: ["*example.com/foo/api/v1.Widget", error]
      - name: Delete
        params: [context.Context, string]
        results: [error]
      - name: Apply
        params: [context.Context, string, "...string"]
        results: ["*example.com/foo/api/v1.Widget", error]
  - name: example.com/foo/typed/v1.GadgetInterface
    methods:
      - name: Watch
        params: [context.Context]
        results: [k8s.io/apimachinery/pkg/watch.Interface]
      - name: Name
        results: [string]
"#;

    pub fn foo_clientset() -> Clientset {
        let schema = ApiSchema::from_yaml_str(FOO_SCHEMA).unwrap();
        walk(&schema, &WalkOptions::default()).unwrap()
    }
}
