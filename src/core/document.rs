//! The scrollable content: a list of text lines with a revision counter.
//!
//! Every mutation bumps the revision so callers can tell whether anything
//! changed since they last looked.

use std::path::Path;
use std::sync::Arc;

/// Immutable copy of the lines, cheap to hand to a background capture.
pub type DocumentSnapshot = Arc<[String]>;

#[derive(Debug, Clone, Default)]
pub struct Document {
    lines: Vec<String>,
    revision: u64,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(|l| l.replace('\t', "    ")).collect(),
            revision: 0,
        }
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
        self.revision += 1;
    }

    /// Remove the last line, if any.
    pub fn pop_line(&mut self) -> Option<String> {
        let line = self.lines.pop()?;
        self.revision += 1;
        Some(line)
    }

    pub fn replace(&mut self, other: Document) {
        self.lines = other.lines;
        self.revision += 1;
    }

    /// `None` when there is nothing to capture.
    pub fn snapshot(&self) -> Option<DocumentSnapshot> {
        if self.lines.is_empty() {
            return None;
        }
        Some(self.lines.clone().into())
    }
}
