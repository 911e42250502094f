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

/// Generator configuration
pub const DEFAULT_CONFIG_FILE: &str = "wrapgen.toml";
pub const GENERATED_FILE_NAME: &str = "clientset.generated.go";
pub const GENERATED_PACKAGE: &str = "client";
pub const GENERATED_HEADER: &str = "// Code generated by clientset-wrapgen. DO NOT EDIT.";

/// Walker exclusions
pub const DEFAULT_CLIENTSET_EXCLUSIONS: &[&str] = &["Discovery"];
pub const DEFAULT_CLIENT_EXCLUSIONS: &[&str] = &["RESTClient"];

/// Client libraries
pub const REST_PACKAGE: &str = "k8s.io/client-go/rest";

/// Metrics subsystem
pub const METRICS_PACKAGE: &str = "github.com/kyverno/kyverno/pkg/metrics";
pub const METRICS_CONFIG_MANAGER: &str = "MetricsConfigManager";
pub const METRICS_CLIENT_TYPE: &str = "ClientType";
pub const METRICS_RECORDER: &str = "Recorder";
pub const NAMESPACED_RECORDER_FN: &str = "NamespacedClientQueryRecorder";
pub const CLUSTERED_RECORDER_FN: &str = "ClusteredClientQueryRecorder";

/// Tracing subsystem
pub const TRACING_PACKAGE: &str = "github.com/kyverno/kyverno/pkg/tracing";
pub const ATTRIBUTE_PACKAGE: &str = "go.opentelemetry.io/otel/attribute";
pub const CODES_PACKAGE: &str = "go.opentelemetry.io/otel/codes";
pub const START_SPAN_FN: &str = "StartSpan";
pub const SPAN_PREFIX: &str = "KUBE";
