//! Slide composition: one rendered visual plus link overlays.

use pptx_deck::{ClickAction, Slide};

use crate::render::RenderedPage;
use crate::types::{Link, LinkTarget, Result, SlideDimensions};

/// Populate an empty slide with its page's visual and link overlays.
///
/// The visual fills the slide's full bounds; each link becomes a
/// borderless, fully transparent rectangle at its fractional position
/// scaled into EMU space, wired to the matching click action.
pub fn compose_slide(
    slide: &mut Slide,
    visual: RenderedPage,
    links: &[Link],
    dimensions: SlideDimensions,
) -> Result<()> {
    slide.add_picture_with_format(
        visual.data,
        visual.format,
        0,
        0,
        dimensions.width,
        dimensions.height,
    );

    for link in links {
        let left = (link.rect.x0 * dimensions.width as f64) as i64;
        let top = (link.rect.y0 * dimensions.height as f64) as i64;
        let width = ((link.rect.x1 - link.rect.x0) * dimensions.width as f64) as i64;
        let height = ((link.rect.y1 - link.rect.y0) * dimensions.height as f64) as i64;

        let action = match &link.target {
            LinkTarget::Uri(uri) => ClickAction::Hyperlink(uri.clone()),
            LinkTarget::Page(index) => ClickAction::SlideJump(*index),
            LinkTarget::Remote(reference) => ClickAction::Hyperlink(reference.clone()),
        };

        slide.add_overlay(left, top, width, height, action);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LinkRect;
    use pptx_deck::{Deck, PictureFormat};

    fn png_visual() -> RenderedPage {
        RenderedPage {
            data: vec![0x89, 0x50, 0x4E, 0x47],
            format: PictureFormat::Png,
        }
    }

    fn dimensions() -> SlideDimensions {
        SlideDimensions {
            width: 9_144_000,
            height: 5_143_500,
        }
    }

    #[test]
    fn test_slide_without_links_has_single_shape() {
        let mut deck = Deck::new();
        let slide = deck.add_slide();
        compose_slide(slide, png_visual(), &[], dimensions()).unwrap();
        assert_eq!(slide.shape_count(), 1);
    }

    #[test]
    fn test_each_link_becomes_one_overlay() {
        let mut deck = Deck::new();
        let slide = deck.add_slide();
        let links = vec![
            Link {
                target: LinkTarget::Uri("https://example.com".into()),
                rect: LinkRect {
                    x0: 0.0,
                    y0: 0.0,
                    x1: 0.5,
                    y1: 0.5,
                },
            },
            Link {
                target: LinkTarget::Page(3),
                rect: LinkRect {
                    x0: 0.25,
                    y0: 0.5,
                    x1: 1.0,
                    y1: 1.0,
                },
            },
        ];
        compose_slide(slide, png_visual(), &links, dimensions()).unwrap();
        assert_eq!(slide.shape_count(), 3);
    }

    #[test]
    fn test_overlay_geometry_truncates_to_emu() {
        let mut deck = Deck::new();
        let slide = deck.add_slide();
        let links = vec![Link {
            target: LinkTarget::Uri("https://example.com".into()),
            rect: LinkRect {
                x0: 0.1,
                y0: 0.2,
                x1: 0.4,
                y1: 0.9,
            },
        }];
        compose_slide(slide, png_visual(), &links, dimensions()).unwrap();

        let deck_bytes = deck.to_bytes().unwrap();
        let mut archive =
            zip::ZipArchive::new(std::io::Cursor::new(deck_bytes)).unwrap();
        let mut slide_xml = String::new();
        use std::io::Read;
        archive
            .by_name("ppt/slides/slide1.xml")
            .unwrap()
            .read_to_string(&mut slide_xml)
            .unwrap();

        let left = (0.1f64 * 9_144_000.0) as i64;
        let top = (0.2f64 * 5_143_500.0) as i64;
        let width = ((0.4f64 - 0.1) * 9_144_000.0) as i64;
        let height = ((0.9f64 - 0.2) * 5_143_500.0) as i64;
        assert!(slide_xml.contains(&format!(r#"<a:off x="{}" y="{}"/>"#, left, top)));
        assert!(slide_xml.contains(&format!(r#"<a:ext cx="{}" cy="{}"/>"#, width, height)));
    }
}
