use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// In-memory lines of one source file while it is being rewritten.
///
/// The original newline style (CRLF or LF) and trailing newline are kept so
/// that writing the file back only changes the lines that were edited.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    pub lines: Vec<String>,
    newline: &'static str,
    had_trailing_newline: bool,
    changed: bool,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {:?}", path))?;
        Ok(Self::from_content(path, &content))
    }

    pub fn from_content(path: &Path, content: &str) -> Self {
        let newline = if content.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        };

        Self {
            path: path.to_path_buf(),
            lines: content.lines().map(str::to_string).collect(),
            newline,
            had_trailing_newline: content.ends_with('\n'),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub fn content(&self) -> String {
        let mut content = self.lines.join(self.newline);
        if self.had_trailing_newline {
            content.push_str(self.newline);
        }
        content
    }

    /// Write the file back if anything changed. Returns whether it was written.
    pub fn flush(&self) -> Result<bool> {
        if !self.changed {
            return Ok(false);
        }
        fs::write(&self.path, self.content())
            .with_context(|| format!("Failed to write source file: {:?}", self.path))?;
        Ok(true)
    }
}
