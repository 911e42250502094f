//! Color theme for CLI output

use crate::domain::clientset::Scope;
use crate::infrastructure::output::FileStatus;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color based on generated file status
    pub fn get_status_color(&self, status: FileStatus) -> TableColor {
        match status {
            FileStatus::UpToDate => self.success,
            FileStatus::Stale => self.warning,
            FileStatus::Missing => self.error,
        }
    }

    pub fn get_scope_color(&self, scope: Scope) -> TableColor {
        match scope {
            Scope::Namespaced => self.info,
            Scope::Cluster => self.muted,
        }
    }

    /// Traced operations out of all operations of a resource
    pub fn get_coverage_color(&self, traced: usize, total: usize) -> TableColor {
        if total == 0 {
            self.muted
        } else if traced == total {
            self.success
        } else if traced > 0 {
            self.warning
        } else {
            self.error
        }
    }
}
