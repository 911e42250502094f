//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::clientset::{Clientset, Scope};
use crate::domain::config::WrapperKind;
use crate::infrastructure::output::FileStatus;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

/// One discovered resource, as listed by `inspect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRow {
    pub client: String,
    pub resource: String,
    pub kind: String,
    pub scope: Scope,
    pub operations: usize,
    pub traced: usize,
}

impl ResourceRow {
    pub fn from_clientset(clientset: &Clientset) -> Vec<Self> {
        clientset
            .clients()
            .flat_map(|client| {
                client.resources().map(move |resource| ResourceRow {
                    client: client.name().to_string(),
                    resource: resource.name().to_string(),
                    kind: resource.kind(),
                    scope: resource.scope,
                    operations: resource.operations.len(),
                    traced: resource.traced_count(),
                })
            })
            .collect()
    }
}

/// One generated file, as listed by `generate` and `check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRow {
    pub target: String,
    pub kind: WrapperKind,
    pub path: String,
    pub status: FileStatus,
    /// Written during this run
    pub written: bool,
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the resources discovered for one target
    pub fn render_resources(&self, target: &str, rows: &[ResourceRow]) -> String {
        if rows.is_empty() {
            return format!("No resources discovered for target {}", target);
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("CLIENT").set_alignment(CellAlignment::Left),
                Cell::new("RESOURCE").set_alignment(CellAlignment::Left),
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("SCOPE").set_alignment(CellAlignment::Center),
                Cell::new("OPERATIONS").set_alignment(CellAlignment::Center),
                Cell::new("TRACED").set_alignment(CellAlignment::Center),
            ]);

        for row in rows {
            table.add_row(vec![
                Cell::new(&row.client),
                Cell::new(&row.resource),
                Cell::new(&row.kind),
                Cell::new(row.scope.as_str()).fg(self.theme.get_scope_color(row.scope)),
                Cell::new(row.operations).set_alignment(CellAlignment::Center),
                Cell::new(format!("{}/{}", row.traced, row.operations))
                    .fg(self.theme.get_coverage_color(row.traced, row.operations))
                    .set_alignment(CellAlignment::Center),
            ]);
        }

        let clients = {
            let mut names: Vec<&str> = rows.iter().map(|r| r.client.as_str()).collect();
            names.dedup();
            names.len()
        };

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Target {} {} ─╮\n",
            target,
            format!("[{} clients, {} resources]", clients, rows.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Render the status of generated files
    pub fn render_files(&self, rows: &[FileRow]) -> String {
        if rows.is_empty() {
            return "No outputs configured".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("TARGET").set_alignment(CellAlignment::Left),
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("FILE").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
            ]);

        for row in rows {
            let status = if row.written {
                Cell::new(format!("{} Written", StatusIcon::WRITTEN)).fg(Color::Cyan)
            } else {
                Cell::new(format!(
                    "{} {}",
                    StatusIcon::get_status_icon(row.status),
                    StatusIcon::get_status_text(row.status)
                ))
                .fg(self.theme.get_status_color(row.status))
            };
            table.add_row(vec![
                Cell::new(&row.target),
                Cell::new(row.kind.as_str()),
                Cell::new(&row.path),
                status,
            ]);
        }

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Up to date  {} Written  {} Stale  {} Missing\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::WRITTEN.cyan(),
            StatusIcon::WARNING.yellow(),
            StatusIcon::ERROR.red()
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(client: &str, resource: &str, scope: Scope) -> ResourceRow {
        ResourceRow {
            client: client.to_string(),
            resource: resource.to_string(),
            kind: resource.trim_end_matches('s').to_string(),
            scope,
            operations: 4,
            traced: 3,
        }
    }

    #[test]
    fn test_render_empty_resources() {
        let renderer = TableRenderer::new();
        let output = renderer.render_resources("foo", &[]);
        assert!(output.contains("No resources discovered for target foo"));
    }

    #[test]
    fn test_render_resources() {
        let renderer = TableRenderer::new();
        let rows = vec![
            resource("FooV1", "Widgets", Scope::Namespaced),
            resource("FooV1", "Gadgets", Scope::Cluster),
        ];
        let output = renderer.render_resources("foo", &rows);
        assert!(output.contains("Widgets"));
        assert!(output.contains("Namespaced"));
        assert!(output.contains("Cluster"));
        assert!(output.contains("3/4"));
        assert!(output.contains("1 clients, 2 resources"));
    }

    #[test]
    fn test_render_files() {
        let renderer = TableRenderer::new();
        let rows = vec![
            FileRow {
                target: "kyverno".to_string(),
                kind: WrapperKind::Metrics,
                path: "metrics/kyverno/clientset.generated.go".to_string(),
                status: FileStatus::Stale,
                written: false,
            },
            FileRow {
                target: "kyverno".to_string(),
                kind: WrapperKind::Traces,
                path: "traces/kyverno/clientset.generated.go".to_string(),
                status: FileStatus::UpToDate,
                written: true,
            },
        ];
        let output = renderer.render_files(&rows);
        assert!(output.contains("Stale"));
        assert!(output.contains("Written"));
        assert!(output.contains("metrics"));
    }
}
