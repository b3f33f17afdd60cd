//! Slide model and slide-part XML generation.

use crate::error::{DeckError, Result};
use crate::format::PictureFormat;
use crate::shape::{ClickAction, Shape, ShapeRels};

/// A slide in a deck.
///
/// Slides start empty against the blank layout and are populated by adding
/// shapes; they carry no template placeholders.
#[derive(Debug, Clone)]
pub struct Slide {
    pub(crate) slide_id: u32,
    pub(crate) shapes: Vec<Shape>,
}

impl Slide {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Get the number of shapes on the slide.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Add a picture to the slide, detecting the format from the bytes.
    pub fn add_picture(&mut self, data: Vec<u8>, x: i64, y: i64, width: i64, height: i64) -> Result<()> {
        let format =
            PictureFormat::detect_from_bytes(&data).ok_or(DeckError::UnknownPictureFormat)?;
        self.add_picture_with_format(data, format, x, y, width, height);
        Ok(())
    }

    /// Add a picture with an explicitly stated format.
    pub fn add_picture_with_format(
        &mut self,
        data: Vec<u8>,
        format: PictureFormat,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) {
        // IDs: 1 = group shape, 2+ = user shapes
        let shape_id = (self.shapes.len() + 2) as u32;
        self.shapes
            .push(Shape::new_picture(shape_id, data, format, x, y, width, height));
    }

    /// Add a rectangle to the slide. `fill_color` is a hex RGB string;
    /// `None` produces a borderless, fully transparent rectangle.
    pub fn add_rectangle(
        &mut self,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        fill_color: Option<String>,
    ) {
        let shape_id = (self.shapes.len() + 2) as u32;
        self.shapes
            .push(Shape::new_rectangle(shape_id, x, y, width, height, fill_color, None));
    }

    /// Add a borderless, fully transparent rectangle that activates the
    /// given click action. This is the overlay used to carry link regions.
    pub fn add_overlay(&mut self, x: i64, y: i64, width: i64, height: i64, click: ClickAction) {
        let shape_id = (self.shapes.len() + 2) as u32;
        self.shapes
            .push(Shape::new_rectangle(shape_id, x, y, width, height, None, Some(click)));
    }

    /// Collect picture payloads from this slide in shape order.
    pub(crate) fn collect_pictures(&self) -> Vec<(&[u8], PictureFormat)> {
        self.shapes.iter().filter_map(|s| s.picture_data()).collect()
    }

    /// Collect click actions from this slide in shape order.
    pub(crate) fn collect_click_actions(&self) -> Vec<&ClickAction> {
        self.shapes.iter().filter_map(|s| s.click_action()).collect()
    }

    /// Generate the slide part XML. `shape_rels` carries the relationship
    /// IDs the package writer allocated for each shape, in shape order.
    pub(crate) fn to_xml(&self, shape_rels: &[ShapeRels<'_>]) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        for (index, shape) in self.shapes.iter().enumerate() {
            let rels = shape_rels
                .get(index)
                .map(|r| ShapeRels {
                    image: r.image,
                    click: r.click,
                })
                .unwrap_or_default();
            shape.to_xml(&mut xml, rels)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}
