use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::ratio::Ratio;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),
    #[error("invalid aspect ratio {0:?}: use \"auto\", \"W:H\", or a decimal value")]
    InvalidAspectRatioFormat(String),
    #[error("aspect ratio must be positive: {0}")]
    NonPositiveAspectRatio(String),
    #[error("external converter {tool:?} is not available: {source}")]
    ExternalToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("external converter {tool:?} failed ({status}): {stderr}")]
    ExternalToolInvocationFailure {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("render error: {0}")]
    Render(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] mupdf::Error),
    #[error("deck error: {0}")]
    Deck(#[from] pptx_deck::DeckError),
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// A non-fatal condition surfaced to the user without altering control
/// flow. Collected on the conversion report and forwarded to the observer.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// An explicitly supplied aspect ratio differs from the document's own.
    AspectRatioMismatch { requested: Ratio, page: Ratio },
    /// A link annotation of a kind the converter does not reproduce.
    UnsupportedLinkKind { kind: String, page: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AspectRatioMismatch { requested, page } => write!(
                f,
                "requested aspect ratio {} does not match the document's {}",
                requested, page
            ),
            Diagnostic::UnsupportedLinkKind { kind, page } => {
                write!(f, "unsupported link kind {:?} on page {}", kind, page)
            }
        }
    }
}

/// Slide dimensions in EMUs (914400 per inch), fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideDimensions {
    pub width: i64,
    pub height: i64,
}

/// A link annotation rectangle in page point space, as enumerated by the
/// source document provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// A raw link annotation from the source document: a kind tag plus the
/// kind-specific fields, before classification and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLinkAnnotation {
    pub kind: RawLinkKind,
    pub rect: RawRect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawLinkKind {
    /// External URI target.
    Uri { uri: String },
    /// In-document jump; `page` may be negative when the target is unknown.
    Goto { page: i32 },
    /// Jump into another file; `page` is -1 when no page is addressed.
    RemoteGoto { file: String, page: i32 },
    /// Named destination; `page` is the resolved 0-based target, or -1 when
    /// the name does not resolve.
    Named { name: String, page: i32 },
    /// Any annotation kind the converter does not reproduce.
    Other { kind: String },
}

/// A classified link with geometry normalized to fractions of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub target: LinkTarget,
    pub rect: LinkRect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    /// External URI, reproduced verbatim.
    Uri(String),
    /// 0-based index of the output slide to jump to.
    Page(usize),
    /// Remote file reference, with a `#page=N` suffix when a page is known.
    Remote(String),
}

/// Fractional page coordinates, each in [0, 1], with `x0 <= x1` and
/// `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}
