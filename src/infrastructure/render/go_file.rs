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

//! Low level pieces of a Go source file: import block, signatures, alignment.

use crate::domain::schema::MethodDecl;
use crate::infrastructure::constants::GENERATED_HEADER;
use crate::shared::naming::{go_type, package_alias};
use std::collections::BTreeSet;
use std::fmt::{self, Write};

/// Writes the header, package clause and import block.
///
/// Standard library packages (no dot in the first path element) form the
/// first import group, everything else the second, each sorted.
pub fn write_preamble(out: &mut String, package: &str, imports: &BTreeSet<String>) -> fmt::Result {
    writeln!(out, "{}", GENERATED_HEADER)?;
    writeln!(out)?;
    writeln!(out, "package {}", package)?;

    let (std, third_party): (Vec<&String>, Vec<&String>) =
        imports.iter().partition(|path| is_std_package(path));
    if imports.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "import (")?;
    for path in &std {
        writeln!(out, "\t{} \"{}\"", package_alias(path), path)?;
    }
    if !std.is_empty() && !third_party.is_empty() {
        writeln!(out)?;
    }
    for path in &third_party {
        writeln!(out, "\t{} \"{}\"", package_alias(path), path)?;
    }
    writeln!(out, ")")?;
    Ok(())
}

fn is_std_package(path: &str) -> bool {
    !path.split('/').next().unwrap_or_default().contains('.')
}

/// `arg0 context.Context, arg1 string, arg2 ...string`
pub fn params(method: &MethodDecl) -> String {
    method
        .params
        .iter()
        .enumerate()
        .map(|(i, ty)| format!("arg{} {}", i, go_type(ty)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `arg0, arg1, arg2...`
pub fn args(method: &MethodDecl) -> String {
    method
        .params
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            if ty.is_variadic() {
                format!("arg{}...", i)
            } else {
                format!("arg{}", i)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result list with its leading space: ``, ` error`, ` (*v1.Pod, error)`.
pub fn results(method: &MethodDecl) -> String {
    match method.results.as_slice() {
        [] => String::new(),
        [single] => format!(" {}", go_type(single)),
        many => format!(
            " ({})",
            many.iter().map(go_type).collect::<Vec<_>>().join(", ")
        ),
    }
}

/// `ret0, ret1`
pub fn rets(method: &MethodDecl) -> String {
    (0..method.results.len())
        .map(|i| format!("ret{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A method on `receiver` forwarding straight to `c.inner`.
pub fn write_delegate(out: &mut String, receiver: &str, method: &MethodDecl) -> fmt::Result {
    writeln!(
        out,
        "func (c *{}) {}({}){} {{",
        receiver,
        method.name,
        params(method),
        results(method)
    )?;
    write_inner_call(out, method)?;
    writeln!(out, "}}")
}

/// `return c.inner.Name(args)`, or a bare call when there is nothing to return.
pub fn write_inner_call(out: &mut String, method: &MethodDecl) -> fmt::Result {
    let ret = if method.results.is_empty() { "" } else { "return " };
    writeln!(out, "\t{}c.inner.{}({})", ret, method.name, args(method))
}

/// Struct fields with their types aligned in one column.
pub fn write_struct(out: &mut String, name: &str, fields: &[(String, String)]) -> fmt::Result {
    writeln!(out, "type {} struct {{", name)?;
    let width = fields.iter().map(|(f, _)| f.len()).max().unwrap_or(0);
    for (field, ty) in fields {
        writeln!(out, "\t{:<width$} {}", field, ty, width = width)?;
    }
    writeln!(out, "}}")
}

/// `key: value,` lines of a composite literal, values aligned in one column.
pub fn write_keyed_values(out: &mut String, indent: &str, pairs: &[(String, String)]) -> fmt::Result {
    let width = pairs.iter().map(|(k, _)| k.len() + 1).max().unwrap_or(0);
    for (key, value) in pairs {
        writeln!(
            out,
            "{}{:<width$} {},",
            indent,
            format!("{}:", key),
            value,
            width = width
        )?;
    }
    Ok(())
}

/// Go interpreted string literal.
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
