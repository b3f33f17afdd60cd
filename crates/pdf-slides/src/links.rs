//! Link classification and geometry normalization.

use crate::types::{Diagnostic, Link, LinkRect, LinkTarget, RawLinkAnnotation, RawLinkKind};

/// Classify a page's raw link annotations into retained [`Link`]s.
///
/// Annotation order is preserved. Internal jumps with unknown targets and
/// named destinations that do not resolve (or resolve to the page they sit
/// on) are dropped silently; annotation kinds the converter does not
/// reproduce are dropped with an [`Diagnostic::UnsupportedLinkKind`].
pub fn extract_links(
    page_index: usize,
    page_width: f32,
    page_height: f32,
    annotations: &[RawLinkAnnotation],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Link> {
    if page_width <= 0.0 || page_height <= 0.0 {
        return Vec::new();
    }

    let mut links = Vec::new();
    for annotation in annotations {
        let target = match &annotation.kind {
            RawLinkKind::Uri { uri } => LinkTarget::Uri(uri.clone()),
            RawLinkKind::Goto { page } => {
                if *page < 0 {
                    continue;
                }
                LinkTarget::Page(*page as usize)
            }
            RawLinkKind::RemoteGoto { file, page } => {
                if *page >= 0 {
                    // remote page references are 1-based on the wire
                    LinkTarget::Remote(format!("{}#page={}", file, page + 1))
                } else {
                    LinkTarget::Remote(file.clone())
                }
            }
            RawLinkKind::Named { page, .. } => {
                // Unresolved names and self-referential jumps address
                // structural features rather than navigation targets.
                if *page < 0 || *page as usize == page_index {
                    continue;
                }
                LinkTarget::Page(*page as usize)
            }
            RawLinkKind::Other { kind } => {
                diagnostics.push(Diagnostic::UnsupportedLinkKind {
                    kind: kind.clone(),
                    page: page_index,
                });
                continue;
            }
        };

        links.push(Link {
            target,
            rect: normalize_rect(annotation.rect.x0, annotation.rect.y0, annotation.rect.x1, annotation.rect.y1, page_width, page_height),
        });
    }
    links
}

/// Divide by the page size, order the corners, and clamp into [0, 1].
fn normalize_rect(x0: f32, y0: f32, x1: f32, y1: f32, page_width: f32, page_height: f32) -> LinkRect {
    let fx0 = (x0.min(x1) / page_width) as f64;
    let fx1 = (x0.max(x1) / page_width) as f64;
    let fy0 = (y0.min(y1) / page_height) as f64;
    let fy1 = (y0.max(y1) / page_height) as f64;
    LinkRect {
        x0: fx0.clamp(0.0, 1.0),
        y0: fy0.clamp(0.0, 1.0),
        x1: fx1.clamp(0.0, 1.0),
        y1: fy1.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawRect;

    fn annotation(kind: RawLinkKind) -> RawLinkAnnotation {
        RawLinkAnnotation {
            kind,
            rect: RawRect {
                x0: 100.0,
                y0: 50.0,
                x1: 300.0,
                y1: 100.0,
            },
        }
    }

    #[test]
    fn test_rect_normalized_to_page_fractions() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            0,
            1000.0,
            500.0,
            &[annotation(RawLinkKind::Uri {
                uri: "https://example.com".into(),
            })],
            &mut diagnostics,
        );
        assert_eq!(links.len(), 1);
        let rect = links[0].rect;
        assert_eq!(rect.x0, 0.1);
        assert_eq!(rect.y0, 0.1);
        assert_eq!(rect.x1, 0.3);
        assert_eq!(rect.y1, 0.2);
    }

    #[test]
    fn test_out_of_bounds_rect_is_clamped_and_ordered() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            0,
            100.0,
            100.0,
            &[RawLinkAnnotation {
                kind: RawLinkKind::Uri {
                    uri: "https://example.com".into(),
                },
                rect: RawRect {
                    x0: 150.0,
                    y0: 80.0,
                    x1: -20.0,
                    y1: 20.0,
                },
            }],
            &mut diagnostics,
        );
        let rect = links[0].rect;
        assert!(rect.x0 <= rect.x1 && rect.y0 <= rect.y1);
        assert!(rect.x0 >= 0.0 && rect.x1 <= 1.0);
        assert!(rect.y0 >= 0.0 && rect.y1 <= 1.0);
    }

    #[test]
    fn test_negative_goto_dropped() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            0,
            100.0,
            100.0,
            &[annotation(RawLinkKind::Goto { page: -1 })],
            &mut diagnostics,
        );
        assert!(links.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_remote_goto_page_suffix_is_one_based() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            0,
            100.0,
            100.0,
            &[annotation(RawLinkKind::RemoteGoto {
                file: "x.pdf".into(),
                page: 2,
            })],
            &mut diagnostics,
        );
        assert_eq!(links[0].target, LinkTarget::Remote("x.pdf#page=3".into()));
    }

    #[test]
    fn test_remote_goto_without_page() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            0,
            100.0,
            100.0,
            &[annotation(RawLinkKind::RemoteGoto {
                file: "other.pdf".into(),
                page: -1,
            })],
            &mut diagnostics,
        );
        assert_eq!(links[0].target, LinkTarget::Remote("other.pdf".into()));
    }

    #[test]
    fn test_named_destination_to_other_page_retained() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            0,
            100.0,
            100.0,
            &[annotation(RawLinkKind::Named {
                name: "Chapter2".into(),
                page: 5,
            })],
            &mut diagnostics,
        );
        assert_eq!(links[0].target, LinkTarget::Page(5));
    }

    #[test]
    fn test_same_page_named_destination_is_dropped() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            3,
            100.0,
            100.0,
            &[annotation(RawLinkKind::Named {
                name: "Here".into(),
                page: 3,
            })],
            &mut diagnostics,
        );
        assert!(links.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unresolved_named_destination_is_dropped() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            0,
            100.0,
            100.0,
            &[annotation(RawLinkKind::Named {
                name: "Missing".into(),
                page: -1,
            })],
            &mut diagnostics,
        );
        assert!(links.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unsupported_kind_emits_diagnostic_and_continues() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            7,
            100.0,
            100.0,
            &[
                annotation(RawLinkKind::Other {
                    kind: "launch".into(),
                }),
                annotation(RawLinkKind::Uri {
                    uri: "https://example.com".into(),
                }),
            ],
            &mut diagnostics,
        );
        assert_eq!(links.len(), 1);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnsupportedLinkKind {
                kind: "launch".into(),
                page: 7,
            }]
        );
    }

    #[test]
    fn test_zero_sized_page_yields_no_links() {
        let mut diagnostics = Vec::new();
        let links = extract_links(
            0,
            0.0,
            100.0,
            &[annotation(RawLinkKind::Uri {
                uri: "https://example.com".into(),
            })],
            &mut diagnostics,
        );
        assert!(links.is_empty());
    }
}
