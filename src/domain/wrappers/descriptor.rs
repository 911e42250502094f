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

use crate::domain::clientset::{walk, Clientset};
use crate::domain::config::{GeneratorConf, OutputConf, TargetConf, WrapperKind};
use crate::domain::schema::ApiSchema;
use crate::infrastructure::output::{
    ensure_file_contents, file_status, CommandFormatter, FileStatus, SourceFormatter,
};
use crate::infrastructure::render::{
    render, MetricsTemplate, RenderOptions, TracesTemplate, WrapperTemplate,
};
use crate::shared::error::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// One rendered output, held in memory until every output of the run rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub target: String,
    pub kind: WrapperKind,
    pub path: PathBuf,
    pub contents: String,
}

pub struct WrapperDescriptor {
    conf: GeneratorConf,
    formatter: Option<Box<dyn SourceFormatter>>,
}

impl WrapperDescriptor {
    /// Validates the configuration; the formatter comes from `conf.formatter`.
    pub fn new(conf: GeneratorConf) -> Result<Self> {
        conf.validate()?;
        let formatter = conf
            .formatter
            .clone()
            .map(|command| Box::new(CommandFormatter::new(command)) as Box<dyn SourceFormatter>);
        Ok(Self { conf, formatter })
    }

    pub fn with_formatter(mut self, formatter: Box<dyn SourceFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn without_formatter(mut self) -> Self {
        self.formatter = None;
        self
    }

    pub fn conf(&self) -> &GeneratorConf {
        &self.conf
    }

    /// Load the target's schema and discover its clientset.
    pub fn load_clientset(&self, target: &TargetConf) -> Result<Clientset> {
        let schema = ApiSchema::from_file(&target.schema)?;
        let clientset = walk(&schema, &self.conf.walk_options())?;
        debug!("Walked {} from {}", clientset.ty, target.schema.display());
        info!(
            "Target {}: {} clients, {} resources",
            target.name,
            clientset.clients().count(),
            clientset.resource_count()
        );
        Ok(clientset)
    }

    pub fn render_output(
        &self,
        target: &TargetConf,
        clientset: &Clientset,
        output: &OutputConf,
    ) -> Result<GeneratedFile> {
        let options = RenderOptions {
            package: output.package(&self.conf.package).to_string(),
            rest_package: self.conf.rest_package.clone(),
            new_for_config: target.new_for_config,
        };
        let template: Box<dyn WrapperTemplate> = match output.kind {
            WrapperKind::Metrics => Box::new(MetricsTemplate::new(&self.conf.metrics.package)),
            WrapperKind::Traces => Box::new(TracesTemplate::new(
                self.conf.tracing.clone(),
                output.component(),
            )),
        };

        let mut contents = render(clientset, &options, template.as_ref())?;
        if let Some(formatter) = &self.formatter {
            contents = formatter.format(&contents)?;
        }

        Ok(GeneratedFile {
            target: target.name.clone(),
            kind: output.kind,
            path: output.file_path(&self.conf.file_name),
            contents,
        })
    }

    /// Render every output of the selected targets without touching the disk.
    pub fn render_all(&self, target: Option<&str>) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::new();
        for target in self.conf.select_targets(target)? {
            let clientset = self.load_clientset(target)?;
            for output in &target.outputs {
                files.push(self.render_output(target, &clientset, output)?);
            }
        }
        Ok(files)
    }

    /// Render everything, then write the files whose contents changed.
    pub fn generate(&self, target: Option<&str>) -> Result<Vec<(GeneratedFile, bool)>> {
        let files = self.render_all(target)?;
        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let changed = ensure_file_contents(&file.path, &file.contents)?;
            written.push((file, changed));
        }
        Ok(written)
    }

    /// Compare rendered outputs with the files on disk.
    pub fn check(&self, target: Option<&str>) -> Result<Vec<(GeneratedFile, FileStatus)>> {
        Ok(self
            .render_all(target)?
            .into_iter()
            .map(|file| {
                let status = file_status(&file.path, &file.contents);
                (file, status)
            })
            .collect())
    }
}
