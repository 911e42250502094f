//! Wrapper generation commands

use crate::cli::display::{FileRow, ResourceRow, TableRenderer};
use crate::domain::clientset::walk;
use crate::domain::config::{apply_to_generator_conf, GeneratorConf};
use crate::domain::schema::ApiSchema;
use crate::domain::wrappers::{GeneratedFile, WrapperDescriptor};
use crate::infrastructure::constants::DEFAULT_CONFIG_FILE;
use crate::infrastructure::output::FileStatus;
use clap::{Args, Parser, ValueEnum};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Options shared by every command that reads the generator configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to the generator configuration file
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_FILE, value_name = "PATH")]
    pub config: PathBuf,

    /// Only process the named target
    #[arg(long, short = 't')]
    pub target: Option<String>,

    /// Skip the configured formatter
    #[arg(long)]
    pub no_format: bool,

    /// Dynamic configuration properties to override any settings (-D key=value)
    ///
    /// Output: output.file-name, output.package
    /// Packages: rest.package, metrics.package, tracing.package,
    /// tracing.attribute-package, tracing.codes-package
    /// Spans: tracing.span-prefix
    /// Formatting: formatter (whitespace separated command, empty disables it)
    ///
    /// Example: -Dtracing.span-prefix=CLIENT -Dformatter=gofmt
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

impl ConfigArgs {
    /// Load the configuration file and apply `-D` overrides.
    pub fn load_conf(&self) -> anyhow::Result<GeneratorConf> {
        let mut conf = GeneratorConf::from(&self.config)?;
        self.apply_properties(&mut conf)?;
        Ok(conf)
    }

    fn apply_properties(&self, conf: &mut GeneratorConf) -> anyhow::Result<()> {
        if !self.properties.is_empty() {
            let configs =
                parse_dynamic_configs(&self.properties).map_err(|e| anyhow::anyhow!(e))?;
            apply_to_generator_conf(&configs, conf);
        }
        Ok(())
    }

    pub fn descriptor(&self) -> anyhow::Result<WrapperDescriptor> {
        let descriptor = WrapperDescriptor::new(self.load_conf()?)?;
        Ok(if self.no_format {
            descriptor.without_formatter()
        } else {
            descriptor
        })
    }
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckCommand {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Yaml,
    Json,
}

#[derive(Parser, Debug, Clone)]
pub struct InspectCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Inspect a schema file directly instead of the configured targets
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl GenerateCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let descriptor = self.config.descriptor()?;
        let written = descriptor.generate(self.config.target.as_deref())?;

        let changed = written.iter().filter(|(_, changed)| *changed).count();
        let rows: Vec<FileRow> = written
            .into_iter()
            .map(|(file, changed)| file_row(file, FileStatus::UpToDate, changed))
            .collect();
        println!("{}", TableRenderer::new().render_files(&rows));
        info!("{} of {} generated files updated", changed, rows.len());
        Ok(())
    }
}

impl CheckCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let descriptor = self.config.descriptor()?;
        let statuses = descriptor.check(self.config.target.as_deref())?;

        let rows: Vec<FileRow> = statuses
            .into_iter()
            .map(|(file, status)| file_row(file, status, false))
            .collect();
        println!("{}", TableRenderer::new().render_files(&rows));

        let outdated = rows
            .iter()
            .filter(|row| row.status != FileStatus::UpToDate)
            .count();
        if outdated > 0 {
            anyhow::bail!(
                "{} generated file(s) out of date, run `clientset-wrapgen generate`",
                outdated
            );
        }
        Ok(())
    }
}

impl InspectCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let targets = match &self.schema {
            Some(schema) => vec![(schema.display().to_string(), self.inspect_schema(schema)?)],
            None => {
                let descriptor = self.config.descriptor()?;
                let mut targets = Vec::new();
                for target in descriptor
                    .conf()
                    .select_targets(self.config.target.as_deref())?
                {
                    let clientset = descriptor.load_clientset(target)?;
                    targets.push((target.name.clone(), ResourceRow::from_clientset(&clientset)));
                }
                targets
            }
        };

        match self.format {
            OutputFormat::Table => {
                let renderer = TableRenderer::new();
                for (name, rows) in &targets {
                    println!("{}", renderer.render_resources(name, rows));
                }
            }
            OutputFormat::Yaml => {
                let map: BTreeMap<&str, &Vec<ResourceRow>> =
                    targets.iter().map(|(n, r)| (n.as_str(), r)).collect();
                print!("{}", serde_yaml::to_string(&map)?);
            }
            OutputFormat::Json => {
                let map: BTreeMap<&str, &Vec<ResourceRow>> =
                    targets.iter().map(|(n, r)| (n.as_str(), r)).collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            }
        }
        Ok(())
    }

    /// Walk a schema file; walker settings come from the configuration when it exists.
    fn inspect_schema(&self, schema: &Path) -> anyhow::Result<Vec<ResourceRow>> {
        let conf = if self.config.config.exists() {
            self.config.load_conf()?
        } else {
            warn!(
                "{} not found, using default walker settings",
                self.config.config.display()
            );
            let mut conf = GeneratorConf::default();
            self.config.apply_properties(&mut conf)?;
            conf
        };
        let schema = ApiSchema::from_file(schema)?;
        let clientset = walk(&schema, &conf.walk_options())?;
        Ok(ResourceRow::from_clientset(&clientset))
    }
}

fn file_row(file: GeneratedFile, status: FileStatus, written: bool) -> FileRow {
    FileRow {
        target: file.target,
        kind: file.kind,
        path: file.path.display().to_string(),
        status,
        written,
    }
}

/// Parse dynamic configuration properties from -D key=value format
pub fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>, String> {
    let mut map = HashMap::new();

    for config in configs {
        let parts: Vec<&str> = config.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            ));
        }

        let key = parts[0].trim();
        let value = parts[1].trim();

        if key.is_empty() {
            return Err(format!("Empty key in config: '{}'", config));
        }

        map.insert(key.to_string(), value.to_string());
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dynamic_configs() {
        let configs = vec![
            "tracing.span-prefix=CLIENT".to_string(),
            "formatter=gofmt -s".to_string(),
            "output.package = wrappers".to_string(),
        ];
        let map = parse_dynamic_configs(&configs).unwrap();
        assert_eq!(map["tracing.span-prefix"], "CLIENT");
        assert_eq!(map["formatter"], "gofmt -s");
        assert_eq!(map["output.package"], "wrappers");
    }

    #[test]
    fn test_parse_dynamic_configs_empty_value() {
        let map = parse_dynamic_configs(&["formatter=".to_string()]).unwrap();
        assert_eq!(map["formatter"], "");
    }

    #[test]
    fn test_parse_dynamic_configs_invalid() {
        assert!(parse_dynamic_configs(&["novalue".to_string()]).is_err());
        assert!(parse_dynamic_configs(&["=value".to_string()]).is_err());
    }
}
