//! Status icons for CLI output

use crate::infrastructure::output::FileStatus;

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Generated file matches the rendered output
    pub const SUCCESS: &'static str = "✓";

    /// Generated file differs from the rendered output
    pub const WARNING: &'static str = "⚠";

    /// Generated file does not exist
    pub const ERROR: &'static str = "✗";

    /// File written during this run
    pub const WRITTEN: &'static str = "✎";

    pub fn get_status_icon(status: FileStatus) -> &'static str {
        match status {
            FileStatus::UpToDate => Self::SUCCESS,
            FileStatus::Stale => Self::WARNING,
            FileStatus::Missing => Self::ERROR,
        }
    }

    pub fn get_status_text(status: FileStatus) -> &'static str {
        match status {
            FileStatus::UpToDate => "Up to date",
            FileStatus::Stale => "Stale",
            FileStatus::Missing => "Missing",
        }
    }
}
