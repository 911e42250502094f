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

use clientset_wrapgen::domain::config::apply_to_generator_conf;
use clientset_wrapgen::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

mod test_utils {
    use super::*;

    pub const FOO_SCHEMA: &str = r#"
root: example.com/foo/clientset.Interface
externalInterfaces:
  - k8s.io/client-go/discovery.DiscoveryInterface
  - k8s.io/client-go/rest.Interface
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
  - name: example.com/foo/typed/v1.WidgetInterface
    methods:
      - name: Get
        params: [context.Context, string, example.com/foo/meta.GetOptions]
        results: ["*example.com/foo/api/v1.Widget", error]
"#;

    /// Same hierarchy, declared in a different order.
    pub const FOO_SCHEMA_SHUFFLED: &str = r#"
root: example.com/foo/clientset.Interface
externalInterfaces:
  - k8s.io/client-go/rest.Interface
  - k8s.io/client-go/discovery.DiscoveryInterface
interfaces:
  - name: example.com/foo/typed/v1.WidgetInterface
    methods:
      - name: Get
        params: [context.Context, string, example.com/foo/meta.GetOptions]
        results: ["*example.com/foo/api/v1.Widget", error]
  - name: example.com/foo/typed/v1.FooInterface
    methods:
      - name: Widgets
        params: [string]
        results: [example.com/foo/typed/v1.WidgetInterface]
      - name: RESTClient
        results: [k8s.io/client-go/rest.Interface]
  - name: example.com/foo/clientset.Interface
    methods:
      - name: FooV1
        results: [example.com/foo/typed/v1.FooInterface]
      - name: Discovery
        results: [k8s.io/client-go/discovery.DiscoveryInterface]
"#;

    pub const CONF: &str = r#"
package = "client"

[metrics]
package = "example.com/foo/metrics"

[[target]]
name = "foo"
schema = "schemas/foo.yaml"

[[target.output]]
kind = "metrics"
dir = "pkg/clients/metrics/foo"

[[target.output]]
kind = "traces"
dir = "pkg/clients/traces/foo"
"#;

    pub fn render_with(schema: &str, kind: WrapperKind) -> String {
        let schema = ApiSchema::from_yaml_str(schema).unwrap();
        let clientset = walk(&schema, &WalkOptions::default()).unwrap();
        let options = RenderOptions {
            package: "client".to_string(),
            rest_package: "k8s.io/client-go/rest".to_string(),
            new_for_config: true,
        };
        match kind {
            WrapperKind::Metrics => render(
                &clientset,
                &options,
                &MetricsTemplate::new("github.com/kyverno/kyverno/pkg/metrics"),
            )
            .unwrap(),
            WrapperKind::Traces => render(
                &clientset,
                &options,
                &TracesTemplate::new(Default::default(), "pkg/clients/traces/foo"),
            )
            .unwrap(),
        }
    }

    /// Lay out a config file and its schema in `dir`.
    pub fn write_project(dir: &Path, conf: &str) {
        fs::create_dir_all(dir.join("schemas")).unwrap();
        fs::write(dir.join("schemas/foo.yaml"), FOO_SCHEMA).unwrap();
        fs::write(dir.join("wrapgen.toml"), conf).unwrap();
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_foo_widgets_metrics_scenario() {
    let out = test_utils::render_with(test_utils::FOO_SCHEMA, WrapperKind::Metrics);

    assert!(out.contains("type wrappedFooInterface struct {"));
    assert!(out.contains(
        "func (c *wrappedFooInterface) Widgets(namespace string) example_com_foo_typed_v1.WidgetInterface {\n\
         \trecorder := github_com_kyverno_kyverno_pkg_metrics.NamespacedClientQueryRecorder(c.metrics, namespace, \"Widget\", c.clientType)\n\
         \treturn newFooInterfaceWidgetInterface(c.inner.Widgets(namespace), recorder)\n}\n"
    ));
    assert!(out.contains("type wrappedFooInterfaceWidgetInterface struct {"));
    assert!(out.contains(
        "func (c *wrappedFooInterfaceWidgetInterface) Get(arg0 context.Context, arg1 string, arg2 example_com_foo_meta.GetOptions) (*example_com_foo_api_v1.Widget, error) {\n\
         \tdefer c.recorder.Record(\"get\")\n\
         \treturn c.inner.Get(arg0, arg1, arg2)\n}\n"
    ));
}

#[test]
fn test_foo_widgets_traces_scenario() {
    let out = test_utils::render_with(test_utils::FOO_SCHEMA, WrapperKind::Traces);

    assert!(out.contains("\t\t\"KUBE FooV1/Widget/Get\",\n"));
    assert!(out.contains("\tret0, ret1 := c.inner.Get(arg0, arg1, arg2)\n"));
    assert!(out.contains("\t\tspan.SetStatus(go_opentelemetry_io_otel_codes.Error, ret1.Error())\n"));
}

#[test]
fn test_generated_file_layout() {
    let out = test_utils::render_with(test_utils::FOO_SCHEMA, WrapperKind::Metrics);

    assert!(out.starts_with("// Code generated by clientset-wrapgen. DO NOT EDIT.\n\npackage client\n\nimport (\n\tcontext \"context\"\n\n"));
    let wrap = out.find("// Wrap").unwrap();
    let new_for_config = out.find("// NewForConfig").unwrap();
    let clientset = out.find("// clientset wrapper").unwrap();
    let client = out.find("// wrappedFooInterface wrapper").unwrap();
    let resource = out.find("// wrappedFooInterfaceWidgetInterface wrapper").unwrap();
    assert!(wrap < new_for_config);
    assert!(new_for_config < clientset);
    assert!(clientset < client);
    assert!(client < resource);

    // one wrapper type and constructor per client and resource
    assert_eq!(out.matches("type wrapped").count(), 2);
    assert_eq!(out.matches("\nfunc newFooInterface").count(), 2);
}

#[test]
fn test_exclusions_are_passed_through() {
    let out = test_utils::render_with(test_utils::FOO_SCHEMA, WrapperKind::Metrics);

    assert!(out.contains("\treturn c.inner.Discovery()\n"));
    assert!(out.contains("\treturn c.inner.RESTClient()\n"));
    assert!(!out.contains("newDiscovery"));
    assert!(!out.contains("wrappedFooInterfaceInterface"));
}

#[test]
fn test_output_is_deterministic_and_order_independent() {
    for kind in [WrapperKind::Metrics, WrapperKind::Traces] {
        let first = test_utils::render_with(test_utils::FOO_SCHEMA, kind);
        let second = test_utils::render_with(test_utils::FOO_SCHEMA, kind);
        let shuffled = test_utils::render_with(test_utils::FOO_SCHEMA_SHUFFLED, kind);
        assert_eq!(first, second);
        assert_eq!(first, shuffled);
    }
}

#[test]
fn test_imports_cover_every_signature() {
    let schema = ApiSchema::from_yaml_str(test_utils::FOO_SCHEMA).unwrap();
    let clientset = walk(&schema, &WalkOptions::default()).unwrap();
    let imports: Vec<String> = resolve_imports(&clientset, Vec::<String>::new())
        .into_iter()
        .collect();
    assert_eq!(
        imports,
        vec![
            "context",
            "example.com/foo/api/v1",
            "example.com/foo/clientset",
            "example.com/foo/meta",
            "example.com/foo/typed/v1",
            "k8s.io/client-go/discovery",
            "k8s.io/client-go/rest",
        ]
    );
}

#[test]
fn test_render_rejects_colliding_import_aliases() {
    let yaml = test_utils::FOO_SCHEMA.replace(
        "example.com/foo/meta.GetOptions",
        "example.com/foo/api-v1.GetOptions",
    );
    let yaml = yaml.replace("example.com/foo/api/v1.Widget", "example.com/foo/api_v1.Widget");
    let schema = ApiSchema::from_yaml_str(&yaml).unwrap();
    let clientset = walk(&schema, &WalkOptions::default()).unwrap();
    let options = RenderOptions {
        package: "client".to_string(),
        rest_package: "k8s.io/client-go/rest".to_string(),
        new_for_config: true,
    };
    let err = render(
        &clientset,
        &options,
        &MetricsTemplate::new("github.com/kyverno/kyverno/pkg/metrics"),
    )
    .unwrap_err();
    assert!(matches!(err, WrapgenError::ImportAliasCollision { .. }));
    assert!(err.to_string().contains("example.com/foo/api-v1"));
}

// ============================================================================
// Configuration driven generation
// ============================================================================

#[test]
fn test_generate_from_config_file() {
    let dir = TempDir::new().unwrap();
    test_utils::write_project(dir.path(), test_utils::CONF);

    let conf = GeneratorConf::from(dir.path().join("wrapgen.toml")).unwrap();
    let descriptor = WrapperDescriptor::new(conf).unwrap();
    let written = descriptor.generate(None).unwrap();
    assert_eq!(written.len(), 2);

    let metrics = fs::read_to_string(
        dir.path()
            .join("pkg/clients/metrics/foo/clientset.generated.go"),
    )
    .unwrap();
    assert!(metrics.contains("example_com_foo_metrics \"example.com/foo/metrics\""));

    let traces = fs::read_to_string(
        dir.path()
            .join("pkg/clients/traces/foo/clientset.generated.go"),
    )
    .unwrap();
    assert!(traces.contains("\t\t\"pkg/clients/traces/foo\",\n"));
}

#[test]
fn test_check_detects_stale_and_missing_files() {
    let dir = TempDir::new().unwrap();
    test_utils::write_project(dir.path(), test_utils::CONF);
    let conf = GeneratorConf::from(dir.path().join("wrapgen.toml")).unwrap();
    let descriptor = WrapperDescriptor::new(conf).unwrap();

    let before = descriptor.check(None).unwrap();
    assert!(before.iter().all(|(_, s)| *s == FileStatus::Missing));

    descriptor.generate(None).unwrap();
    let metrics = dir
        .path()
        .join("pkg/clients/metrics/foo/clientset.generated.go");
    fs::write(&metrics, "package client\n").unwrap();

    let after = descriptor.check(Some("foo")).unwrap();
    let statuses: Vec<(WrapperKind, FileStatus)> =
        after.iter().map(|(f, s)| (f.kind, *s)).collect();
    assert_eq!(
        statuses,
        vec![
            (WrapperKind::Metrics, FileStatus::Stale),
            (WrapperKind::Traces, FileStatus::UpToDate),
        ]
    );
}

#[test]
fn test_dynamic_overrides_change_package_paths() {
    let dir = TempDir::new().unwrap();
    test_utils::write_project(dir.path(), test_utils::CONF);

    let mut conf = GeneratorConf::from(dir.path().join("wrapgen.toml")).unwrap();
    let overrides: HashMap<String, String> = [
        ("metrics.package", "example.com/other/metrics"),
        ("tracing.span-prefix", "CLIENT"),
        ("output.package", "wrappers"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    apply_to_generator_conf(&overrides, &mut conf);

    let files = WrapperDescriptor::new(conf).unwrap().render_all(None).unwrap();
    let metrics = &files[0].contents;
    let traces = &files[1].contents;
    assert!(metrics.contains("package wrappers\n"));
    assert!(metrics.contains("example_com_other_metrics.MetricsConfigManager"));
    assert!(!metrics.contains("example.com/foo/metrics"));
    assert!(traces.contains("\"CLIENT FooV1/Widget/Get\""));
}

#[test]
fn test_walker_exclusions_from_config() {
    let dir = TempDir::new().unwrap();
    let conf = format!(
        "{}\n[walker]\nclient_exclusions = [\"RESTClient\", \"Widgets\"]\n",
        test_utils::CONF
    );
    test_utils::write_project(dir.path(), &conf);

    let conf = GeneratorConf::from(dir.path().join("wrapgen.toml")).unwrap();
    let files = WrapperDescriptor::new(conf).unwrap().render_all(None).unwrap();
    let metrics = &files[0].contents;
    assert!(metrics.contains("// Widgets is NOT instrumented\n"));
    assert!(metrics.contains("\treturn c.inner.Widgets(arg0)\n"));
    assert!(!metrics.contains("wrappedFooInterfaceWidgetInterface"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_multi_parameter_accessor_is_rejected() {
    let schema = ApiSchema::from_yaml_str(
        r#"
root: example.com/foo.Interface
interfaces:
  - name: example.com/foo.Interface
    methods:
      - name: FooV1
        results: [example.com/foo.FooInterface]
  - name: example.com/foo.FooInterface
    methods:
      - name: Widgets
        params: [string, string]
        results: [example.com/foo.WidgetInterface]
  - name: example.com/foo.WidgetInterface
    methods: []
"#,
    )
    .unwrap();
    let err = walk(&schema, &WalkOptions::default()).unwrap_err();
    assert!(matches!(err, WrapgenError::UnsupportedAccessor { .. }));
    assert!(err.to_string().contains("Widgets"));
}

#[test]
fn test_unknown_target_is_rejected() {
    let dir = TempDir::new().unwrap();
    test_utils::write_project(dir.path(), test_utils::CONF);
    let conf = GeneratorConf::from(dir.path().join("wrapgen.toml")).unwrap();
    let descriptor = WrapperDescriptor::new(conf).unwrap();
    assert!(descriptor.generate(Some("bar")).is_err());
    assert!(!dir.path().join("pkg").exists());
}
