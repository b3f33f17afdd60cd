//! Conversion configuration.

use std::path::{Path, PathBuf};

use crate::geometry;
use crate::types::{ConvertError, Result};

/// Immutable configuration for one conversion run, parsed once and passed
/// explicitly into the pipeline.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Source PDF path.
    pub input: PathBuf,
    /// Destination .pptx path.
    pub output: PathBuf,
    /// Use the vector strategy (SVG + external metafile conversion)
    /// instead of raster rendering.
    pub vector: bool,
    /// Render DPI for the raster strategy; ignored in vector mode.
    pub dpi: u32,
    /// Aspect-ratio spec: "auto", "W:H", or a decimal string.
    pub aspect_ratio: String,
    /// External converter executable for the vector strategy.
    pub inkscape_path: PathBuf,
}

impl ConvertOptions {
    /// Options for converting `input`, with the output path defaulting to
    /// the input path with its extension replaced by "pptx".
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = default_output_path(&input);
        Self {
            input,
            output,
            vector: false,
            dpi: 600,
            aspect_ratio: "auto".to_string(),
            inkscape_path: PathBuf::from("inkscape"),
        }
    }

    /// Validate everything that can fail before any per-page work: the
    /// input must exist and the aspect-ratio spec must parse.
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(ConvertError::InputNotFound(self.input.clone()));
        }
        // syntactic ratio check; the page-derived resolution happens later
        let mut diagnostics = Vec::new();
        geometry::resolve_ratio(&self.aspect_ratio, None, &mut diagnostics)?;
        Ok(())
    }
}

/// The input path with its extension replaced by "pptx".
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("pptx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_replaces_extension() {
        assert_eq!(
            default_output_path(Path::new("deck/slides.pdf")),
            PathBuf::from("deck/slides.pptx")
        );
        assert_eq!(
            default_output_path(Path::new("noext")),
            PathBuf::from("noext.pptx")
        );
    }

    #[test]
    fn test_validate_missing_input() {
        let options = ConvertOptions::new("/definitely/not/here.pdf");
        assert!(matches!(
            options.validate(),
            Err(ConvertError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_validate_bad_ratio_spec() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut options = ConvertOptions::new(file.path());
        options.aspect_ratio = "abc".to_string();
        assert!(matches!(
            options.validate(),
            Err(ConvertError::InvalidAspectRatioFormat(_))
        ));
    }
}
