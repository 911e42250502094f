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

use super::generator::GeneratorConf;
use std::collections::HashMap;
use tracing::warn;

const KNOWN_KEYS: &[&str] = &[
    "output.file-name",
    "output.package",
    "rest.package",
    "metrics.package",
    "tracing.package",
    "tracing.attribute-package",
    "tracing.codes-package",
    "tracing.span-prefix",
    "formatter",
];

/// Apply `-D key=value` overrides on top of the loaded configuration.
pub fn apply_to_generator_conf(configs: &HashMap<String, String>, conf: &mut GeneratorConf) {
    if let Some(file_name) = configs.get("output.file-name") {
        conf.file_name = file_name.clone();
    }

    if let Some(package) = configs.get("output.package") {
        conf.package = package.clone();
    }

    if let Some(package) = configs.get("rest.package") {
        conf.rest_package = package.clone();
    }

    if let Some(package) = configs.get("metrics.package") {
        conf.metrics.package = package.clone();
    }

    if let Some(package) = configs.get("tracing.package") {
        conf.tracing.package = package.clone();
    }

    if let Some(package) = configs.get("tracing.attribute-package") {
        conf.tracing.attribute_package = package.clone();
    }

    if let Some(package) = configs.get("tracing.codes-package") {
        conf.tracing.codes_package = package.clone();
    }

    if let Some(prefix) = configs.get("tracing.span-prefix") {
        conf.tracing.span_prefix = prefix.clone();
    }

    // whitespace separated command line, empty disables formatting
    if let Some(formatter) = configs.get("formatter") {
        let command: Vec<String> = formatter.split_whitespace().map(str::to_string).collect();
        conf.formatter = if command.is_empty() { None } else { Some(command) };
    }

    for key in configs.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn!("Ignoring unknown dynamic property: {}", key);
        }
    }
}
