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

//! Writing generated files and comparing them with what is on disk.

use crate::shared::error::{Result, WrapgenError};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use xshell::{cmd, Shell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
    UpToDate,
    Stale,
    Missing,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::UpToDate => "up-to-date",
            FileStatus::Stale => "stale",
            FileStatus::Missing => "missing",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare `contents` with the file on disk, ignoring CRLF line endings.
pub fn file_status(file: &Path, contents: &str) -> FileStatus {
    match fs::read_to_string(file) {
        Ok(old) if normalize_newlines(&old) == normalize_newlines(contents) => FileStatus::UpToDate,
        Ok(_) => FileStatus::Stale,
        Err(_) => FileStatus::Missing,
    }
}

/// Write `contents` unless the file already holds them. Returns whether the
/// file was written.
pub fn ensure_file_contents(file: &Path, contents: &str) -> Result<bool> {
    if file_status(file, contents) == FileStatus::UpToDate {
        debug!("{} is up to date", file.display());
        return Ok(false);
    }

    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| WrapgenError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(file, contents).map_err(|source| WrapgenError::CreateFile {
        path: file.to_path_buf(),
        source,
    })?;
    info!("{} was not up to date, updated", file.display());
    Ok(true)
}

/// Post-processing applied to rendered source before it is compared or written.
pub trait SourceFormatter {
    fn format(&self, text: &str) -> Result<String>;
}

/// Runs an external command (e.g. `gofmt`) with the source on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    command: Vec<String>,
}

impl CommandFormatter {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl SourceFormatter for CommandFormatter {
    fn format(&self, text: &str) -> Result<String> {
        debug!("Formatting with {}", self.command.join(" "));
        reformat(&self.command, text)
    }
}

/// Pipe `text` through an external formatter such as `gofmt`.
pub fn reformat(command: &[String], text: &str) -> Result<String> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| WrapgenError::Formatter("empty formatter command".to_string()))?;

    let sh = Shell::new().map_err(|e| WrapgenError::Formatter(e.to_string()))?;
    let stdout = cmd!(sh, "{program} {args...}")
        .quiet()
        .stdin(text)
        .read()
        .map_err(|e| WrapgenError::Formatter(e.to_string()))?;
    // read() strips the trailing newline
    Ok(format!("{}\n", stdout))
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_file_contents_creates_directories() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a/b/clientset.generated.go");

        assert_eq!(file_status(&file, "package client\n"), FileStatus::Missing);
        assert!(ensure_file_contents(&file, "package client\n").unwrap());
        assert_eq!(fs::read_to_string(&file).unwrap(), "package client\n");
        assert_eq!(file_status(&file, "package client\n"), FileStatus::UpToDate);
    }

    #[test]
    fn test_unchanged_file_is_not_rewritten() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("out.go");
        fs::write(&file, "package client\r\n").unwrap();

        assert!(!ensure_file_contents(&file, "package client\n").unwrap());
        // original line endings kept
        assert_eq!(fs::read_to_string(&file).unwrap(), "package client\r\n");
    }

    #[test]
    fn test_stale_file_is_replaced() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("out.go");
        fs::write(&file, "package old\n").unwrap();

        assert_eq!(file_status(&file, "package client\n"), FileStatus::Stale);
        assert!(ensure_file_contents(&file, "package client\n").unwrap());
        assert_eq!(fs::read_to_string(&file).unwrap(), "package client\n");
    }

    #[test]
    fn test_directory_creation_failure_names_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = ensure_file_contents(&blocker.join("sub/out.go"), "x").unwrap_err();
        assert!(matches!(err, WrapgenError::CreateDir { .. }));
        assert!(err.to_string().contains("blocker"));
    }

    #[test]
    fn test_empty_formatter_command() {
        let err = reformat(&[], "package client").unwrap_err();
        assert!(matches!(err, WrapgenError::Formatter(_)));
    }
}
