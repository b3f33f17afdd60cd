//! External vector-to-metafile conversion.
//!
//! The one blocking, failure-prone external dependency is modeled as an
//! explicit collaborator: probe once before any page work, then convert
//! one SVG file to an EMF artifact per page.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::types::{ConvertError, Result};

/// Converts an SVG file into an EMF metafile.
pub trait MetafileConverter {
    /// Pre-flight probe. Returns the tool's version string on success.
    fn probe(&self) -> Result<String>;

    /// Convert `input` (SVG) into `output` (EMF). Success means a zero
    /// exit code and a written output file.
    fn convert(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Inkscape-backed converter.
pub struct InkscapeConverter {
    executable: PathBuf,
}

impl InkscapeConverter {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    fn tool_name(&self) -> String {
        self.executable.display().to_string()
    }
}

impl MetafileConverter for InkscapeConverter {
    fn probe(&self) -> Result<String> {
        let output = Command::new(&self.executable)
            .arg("--version")
            .output()
            .map_err(|source| ConvertError::ExternalToolUnavailable {
                tool: self.tool_name(),
                source,
            })?;
        if !output.status.success() {
            return Err(ConvertError::ExternalToolUnavailable {
                tool: self.tool_name(),
                source: std::io::Error::other(
                    String::from_utf8_lossy(&output.stderr).trim().to_string(),
                ),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let result = Command::new(&self.executable)
            .arg(input)
            .arg("--export-type=emf")
            .arg("--export-filename")
            .arg(output)
            .output()?;
        if !result.status.success() {
            return Err(ConvertError::ExternalToolInvocationFailure {
                tool: self.tool_name(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
