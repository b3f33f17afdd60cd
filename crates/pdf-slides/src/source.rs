//! Source document access.
//!
//! [`PageSource`] is the collaborator interface the pipeline consumes:
//! page count, page sizes, raster rendering, vector export, and raw link
//! enumeration. [`MuPdfSource`] implements it over MuPDF.

use std::borrow::Cow;
use std::path::Path;

use mupdf::{Colorspace, Document, Matrix};
use percent_encoding::percent_decode_str;

use crate::types::{ConvertError, RawLinkAnnotation, RawLinkKind, RawRect, Result};

/// Raw RGB pixels of a rendered page.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGB8 rows, `width * height * 3` bytes.
    pub pixels: Vec<u8>,
}

/// A paginated source document.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Raw page width and height in source units (points).
    fn page_size(&self, index: usize) -> Result<(f32, f32)>;

    /// Render a page at a uniform scale factor relative to its raw size.
    fn render_raster(&self, index: usize, scale: f32) -> Result<RasterImage>;

    /// Export a page as an SVG document.
    fn export_svg(&self, index: usize) -> Result<String>;

    /// Enumerate the page's link annotations in document order.
    fn raw_links(&self, index: usize) -> Result<Vec<RawLinkAnnotation>>;
}

/// A PDF opened through MuPDF.
pub struct MuPdfSource {
    document: Document,
    page_count: usize,
}

impl MuPdfSource {
    pub fn open(path: &Path) -> Result<Self> {
        let document = Document::open(path.to_string_lossy().as_ref())?;
        let page_count = document.page_count()?.max(0) as usize;
        Ok(Self {
            document,
            page_count,
        })
    }

    /// Resolve a link URI to a 0-based page number, or -1.
    fn resolve_named(&self, uri: &str) -> i32 {
        match self.document.resolve_link(uri) {
            Ok(Some(dest)) => dest.loc.page_number as i32,
            _ => -1,
        }
    }
}

impl PageSource for MuPdfSource {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        let page = self.document.load_page(index as i32)?;
        let bounds = page.bounds()?;
        Ok((bounds.x1 - bounds.x0, bounds.y1 - bounds.y0))
    }

    fn render_raster(&self, index: usize, scale: f32) -> Result<RasterImage> {
        let page = self.document.load_page(index as i32)?;
        let matrix = Matrix::new_scale(scale, scale);
        let pixmap = page.to_pixmap(&matrix, &Colorspace::device_rgb(), false, false)?;
        pixmap_to_rgb(&pixmap)
    }

    fn export_svg(&self, index: usize) -> Result<String> {
        let page = self.document.load_page(index as i32)?;
        Ok(page.to_svg(&Matrix::IDENTITY)?)
    }

    fn raw_links(&self, index: usize) -> Result<Vec<RawLinkAnnotation>> {
        let page = self.document.load_page(index as i32)?;
        let mut annotations = Vec::new();
        for link in page.links()? {
            let bounds = link.bounds;
            let rect = RawRect {
                x0: bounds.x0,
                y0: bounds.y0,
                x1: bounds.x1,
                y1: bounds.y1,
            };
            let mut kind = match link.dest {
                Some(dest) => RawLinkKind::Goto {
                    page: dest.loc.page_number as i32,
                },
                None => classify_uri(&link.uri, |uri| self.resolve_named(uri)),
            };
            // destination pages are clamped into the document, as MuPDF
            // does for explicit destinations
            let last_page = self.page_count.saturating_sub(1) as i32;
            match &mut kind {
                RawLinkKind::Goto { page } | RawLinkKind::Named { page, .. } if *page >= 0 => {
                    *page = (*page).min(last_page);
                }
                _ => {}
            }
            annotations.push(RawLinkAnnotation { kind, rect });
        }
        Ok(annotations)
    }
}

/// Classify the flattened link URI MuPDF reports for a link annotation.
///
/// MuPDF collapses all PDF action types into a single URI string; this
/// reconstructs the annotation kind from its shape: a fragment-only URI is
/// an in-document jump (explicit `#page=` or a named destination resolved
/// through `resolve`), a `.pdf` path is a remote jump, an external scheme
/// is a plain URI, and everything else (launch-style local paths) is
/// unsupported.
fn classify_uri(uri: &str, resolve: impl Fn(&str) -> i32) -> RawLinkKind {
    let uri = uri.trim();
    if uri.is_empty() {
        return RawLinkKind::Other {
            kind: "empty".into(),
        };
    }

    let (head, params) = uri
        .split_once('#')
        .map(|(head, params)| (head.trim(), params.trim()))
        .unwrap_or((uri, ""));

    if head.is_empty() {
        return match parse_page_param(params) {
            Some(page) => RawLinkKind::Goto { page },
            None => RawLinkKind::Named {
                name: url_unescape(strip_prefix_icase(params, "nameddest=").unwrap_or(params)),
                page: resolve(uri),
            },
        };
    }

    let (file, is_explicit_file) = strip_prefix_icase(head, "file://")
        .or_else(|| strip_prefix_icase(head, "file:"))
        .map(|path| (path, true))
        .unwrap_or((head, false));

    if is_pdf_path(file) {
        return RawLinkKind::RemoteGoto {
            file: url_unescape(file),
            page: parse_page_param(params).unwrap_or(-1),
        };
    }

    if !is_explicit_file && is_external_link(uri) {
        RawLinkKind::Uri {
            uri: uri.to_string(),
        }
    } else {
        RawLinkKind::Other {
            kind: "launch".into(),
        }
    }
}

/// Checks if a string has an external scheme (http, mailto, ...): a colon
/// after at least three leading characters, scheme charset per RFC 3986.
/// The length constraint keeps DOS drive letters out.
fn is_external_link(uri: &str) -> bool {
    match uri.find(':') {
        Some(pos) if pos > 2 => {
            uri.as_bytes()[0].is_ascii_alphabetic()
                && uri[1..pos]
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
        }
        _ => false,
    }
}

/// Checks if a path names a PDF file (".pdf", case-insensitive).
fn is_pdf_path(file_name: &str) -> bool {
    file_name.len() > 4
        && file_name
            .get(file_name.len() - 4..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(".pdf"))
}

/// Extract a `page=` parameter from a fragment, 1-based on the wire,
/// converted to 0-based and floored at 0.
fn parse_page_param(params: &str) -> Option<i32> {
    params
        .split(['&', '#'])
        .map(str::trim)
        .filter_map(|part| part.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("page"))
        .and_then(|(_, value)| value.trim().parse::<i32>().ok())
        .map(|page| page.saturating_sub(1).max(0))
}

fn strip_prefix_icase<'a>(s: &'a str, pat: &str) -> Option<&'a str> {
    s.get(..pat.len())
        .filter(|head| head.eq_ignore_ascii_case(pat))
        .and_then(|_| s.get(pat.len()..))
}

/// Unescape %XX sequences, falling back to the input on invalid UTF-8.
fn url_unescape(s: &str) -> String {
    percent_decode_str(s)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_else(|_| s.to_string())
}

/// Repack a MuPDF pixmap into tight RGB rows.
fn pixmap_to_rgb(pixmap: &mupdf::Pixmap) -> Result<RasterImage> {
    let n = pixmap.n() as usize;
    if n < 3 {
        return Err(ConvertError::Render(format!(
            "unsupported pixmap format: {} channels",
            n
        )));
    }

    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let stride = pixmap.stride() as usize;
    let samples = pixmap.samples();
    let row_bytes = width * n;
    if samples.len() < stride.saturating_mul(height) || row_bytes > stride {
        return Err(ConvertError::Render("pixmap buffer size mismatch".into()));
    }

    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        let row = &samples[y * stride..y * stride + row_bytes];
        if n == 3 {
            pixels.extend_from_slice(row);
        } else {
            for px in row.chunks_exact(n) {
                pixels.extend_from_slice(&px[..3]);
            }
        }
    }

    Ok(RasterImage {
        width: width as u32,
        height: height as u32,
        pixels,
    })
}
