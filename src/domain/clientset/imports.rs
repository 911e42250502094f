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

use super::descriptor::{Clientset, Member};
use crate::domain::schema::MethodDecl;
use crate::shared::error::{Result, WrapgenError};
use crate::shared::naming::package_alias;
use std::collections::{BTreeMap, BTreeSet};

/// Sorted set of every package referenced by a rendered signature, plus `base`.
pub fn resolve_imports<I, S>(clientset: &Clientset, base: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut packages: BTreeSet<String> = base.into_iter().map(Into::into).collect();
    clientset.ty.collect_packages(&mut packages);

    for member in &clientset.members {
        match member {
            Member::Direct(method) => collect_method(method, &mut packages),
            Member::Wrapped(client) => {
                collect_method(&client.method, &mut packages);
                for inner in &client.members {
                    match inner {
                        Member::Direct(method) => collect_method(method, &mut packages),
                        Member::Wrapped(resource) => {
                            collect_method(&resource.method, &mut packages);
                            for op in &resource.operations {
                                collect_method(&op.method, &mut packages);
                            }
                        }
                    }
                }
            }
        }
    }

    packages.remove("");
    packages
}

/// Fails when two import paths sanitize to the same alias, e.g.
/// `example.com/a-b` and `example.com/a_b`.
pub fn check_import_aliases(imports: &BTreeSet<String>) -> Result<()> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for path in imports {
        let alias = package_alias(path);
        if let Some(first) = seen.get(&alias) {
            return Err(WrapgenError::ImportAliasCollision {
                alias,
                first: first.to_string(),
                second: path.clone(),
            });
        }
        seen.insert(alias, path);
    }
    Ok(())
}

fn collect_method(method: &MethodDecl, out: &mut BTreeSet<String>) {
    for ty in method.params.iter().chain(method.results.iter()) {
        ty.collect_packages(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clientset::{walk, WalkOptions};
    use crate::domain::schema::ApiSchema;

    const SCHEMA: &str = r#"
root: example.com/foo/clientset.Interface
externalInterfaces:
  - k8s.io/client-go/rest.Interface
interfaces:
  - name: example.com/foo/clientset.Interface
    methods:
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
      - name: Patch
        params: [context.Context, string, k8s.io/apimachinery/pkg/types.PatchType, "[]byte", "...string"]
        results: ["*example.com/foo/api/v1.Widget", error]
      - name: List
        params: [context.Context]
        results: ["[]*example.com/foo/api/v1.Widget", error]
"#;

    #[test]
    fn test_imports_sorted_and_deduplicated() {
        let schema = ApiSchema::from_yaml_str(SCHEMA).unwrap();
        let clientset = walk(&schema, &WalkOptions::default()).unwrap();
        let imports = resolve_imports(&clientset, ["k8s.io/client-go/rest", "example.com/metrics"]);
        assert_eq!(
            imports.into_iter().collect::<Vec<_>>(),
            vec![
                "context",
                "example.com/foo/api/v1",
                "example.com/foo/clientset",
                "example.com/foo/typed/v1",
                "example.com/metrics",
                "k8s.io/apimachinery/pkg/types",
                "k8s.io/client-go/rest",
            ]
        );
        check_import_aliases(&imports_of(SCHEMA)).unwrap();
    }

    fn imports_of(schema: &str) -> BTreeSet<String> {
        let schema = ApiSchema::from_yaml_str(schema).unwrap();
        let clientset = walk(&schema, &WalkOptions::default()).unwrap();
        resolve_imports(&clientset, Vec::<String>::new())
    }

    #[test]
    fn test_alias_collision_rejected() {
        let yaml = r#"
root: example.com/foo/clientset.Interface
interfaces:
  - name: example.com/foo/clientset.Interface
    methods:
      - name: FooV1
        results: [example.com/foo/typed/v1.FooInterface]
  - name: example.com/foo/typed/v1.FooInterface
    methods:
      - name: Widgets
        results: [example.com/foo/typed/v1.WidgetInterface]
  - name: example.com/foo/typed/v1.WidgetInterface
    methods:
      - name: Convert
        params: [context.Context, "*example.com/a-b.Widget"]
        results: ["*example.com/a_b.Widget", error]
"#;
        let err = check_import_aliases(&imports_of(yaml)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Import alias 'example_com_a_b' is shared by example.com/a-b and example.com/a_b"
        );
    }
}
