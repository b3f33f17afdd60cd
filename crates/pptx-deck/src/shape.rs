//! Shape types and XML generation for deck slides.

use std::fmt::Write as FmtWrite;

use crate::error::Result;
use crate::format::PictureFormat;

/// Escape XML special characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// What activating (clicking) a shape does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Open an external target (URL, mailto, file reference).
    Hyperlink(String),
    /// Jump to another slide in the same deck (0-based index).
    SlideJump(usize),
}

/// A shape on a slide.
#[derive(Debug, Clone)]
pub struct Shape {
    pub(crate) shape_id: u32,
    pub(crate) kind: ShapeKind,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeKind {
    Picture {
        data: Vec<u8>,
        format: PictureFormat,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
    Rectangle {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        /// Solid fill color as hex RGB; `None` renders the rectangle
        /// borderless and fully transparent (no fill, no line).
        fill_color: Option<String>,
        click: Option<ClickAction>,
    },
}

/// Relationship IDs resolved for a shape at package-write time.
#[derive(Debug, Default)]
pub(crate) struct ShapeRels<'a> {
    /// Relationship ID of the embedded picture part.
    pub image: Option<&'a str>,
    /// Relationship ID of the click target (hyperlink or slide part).
    pub click: Option<&'a str>,
}

impl Shape {
    pub(crate) fn new_picture(
        shape_id: u32,
        data: Vec<u8>,
        format: PictureFormat,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Self {
        Self {
            shape_id,
            kind: ShapeKind::Picture {
                data,
                format,
                x,
                y,
                width,
                height,
            },
        }
    }

    pub(crate) fn new_rectangle(
        shape_id: u32,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        fill_color: Option<String>,
        click: Option<ClickAction>,
    ) -> Self {
        Self {
            shape_id,
            kind: ShapeKind::Rectangle {
                x,
                y,
                width,
                height,
                fill_color,
                click,
            },
        }
    }

    /// Get picture data and format if this shape is a picture.
    pub(crate) fn picture_data(&self) -> Option<(&[u8], PictureFormat)> {
        match &self.kind {
            ShapeKind::Picture { data, format, .. } => Some((data.as_slice(), *format)),
            _ => None,
        }
    }

    /// Get the click action if this shape carries one.
    pub(crate) fn click_action(&self) -> Option<&ClickAction> {
        match &self.kind {
            ShapeKind::Rectangle { click, .. } => click.as_ref(),
            _ => None,
        }
    }

    /// Generate XML for this shape with relationship IDs resolved by the
    /// package writer.
    pub(crate) fn to_xml(&self, xml: &mut String, rels: ShapeRels<'_>) -> Result<()> {
        match &self.kind {
            ShapeKind::Picture {
                x,
                y,
                width,
                height,
                ..
            } => {
                xml.push_str("<p:pic>");
                xml.push_str("<p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Picture {}"/>"#,
                    self.shape_id, self.shape_id
                )?;
                xml.push_str("<p:cNvPicPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                let rid = rels.image.unwrap_or("rId2");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, rid)?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
                xml.push_str("</p:blipFill>");

                xml.push_str("<p:spPr>");
                xml.push_str("<a:xfrm>");
                write!(xml, r#"<a:off x="{}" y="{}"/>"#, x, y)?;
                write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, width, height)?;
                xml.push_str("</a:xfrm>");
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr>");
                xml.push_str("</p:pic>");
            }
            ShapeKind::Rectangle {
                x,
                y,
                width,
                height,
                fill_color,
                click,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                match (click, rels.click) {
                    (Some(ClickAction::Hyperlink(_)), Some(rid)) => {
                        write!(
                            xml,
                            r#"<p:cNvPr id="{}" name="Rectangle {}">"#,
                            self.shape_id, self.shape_id
                        )?;
                        write!(xml, r#"<a:hlinkClick r:id="{}"/>"#, rid)?;
                        xml.push_str("</p:cNvPr>");
                    }
                    (Some(ClickAction::SlideJump(_)), Some(rid)) => {
                        write!(
                            xml,
                            r#"<p:cNvPr id="{}" name="Rectangle {}">"#,
                            self.shape_id, self.shape_id
                        )?;
                        write!(
                            xml,
                            r#"<a:hlinkClick r:id="{}" action="ppaction://hlinksldjump"/>"#,
                            rid
                        )?;
                        xml.push_str("</p:cNvPr>");
                    }
                    _ => {
                        write!(
                            xml,
                            r#"<p:cNvPr id="{}" name="Rectangle {}"/>"#,
                            self.shape_id, self.shape_id
                        )?;
                    }
                }
                xml.push_str("<p:cNvSpPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                xml.push_str("<a:xfrm>");
                write!(xml, r#"<a:off x="{}" y="{}"/>"#, x, y)?;
                write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, width, height)?;
                xml.push_str("</a:xfrm>");
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);

                match fill_color {
                    Some(color) => {
                        xml.push_str("<a:solidFill>");
                        write!(xml, r#"<a:srgbClr val="{}"/>"#, escape_xml(color))?;
                        xml.push_str("</a:solidFill>");
                    }
                    None => {
                        xml.push_str("<a:noFill/>");
                        xml.push_str("<a:ln><a:noFill/></a:ln>");
                    }
                }

                xml.push_str("</p:spPr>");
                xml.push_str("</p:sp>");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_escaping() {
        let escaped = escape_xml(r#"<foo & "bar">"#);
        assert_eq!(escaped, "&lt;foo &amp; &quot;bar&quot;&gt;");
    }

    #[test]
    fn test_overlay_rectangle_xml() {
        let shape = Shape::new_rectangle(
            2,
            100,
            200,
            300,
            400,
            None,
            Some(ClickAction::Hyperlink("https://example.com".into())),
        );
        let mut xml = String::new();
        shape
            .to_xml(
                &mut xml,
                ShapeRels {
                    image: None,
                    click: Some("rId3"),
                },
            )
            .unwrap();

        assert!(xml.contains(r#"<a:hlinkClick r:id="rId3"/>"#));
        assert!(xml.contains(r#"<a:off x="100" y="200"/>"#));
        assert!(xml.contains(r#"<a:ext cx="300" cy="400"/>"#));
        assert!(xml.contains("<a:noFill/>"));
        assert!(xml.contains("<a:ln><a:noFill/></a:ln>"));
    }

    #[test]
    fn test_slide_jump_xml() {
        let shape = Shape::new_rectangle(3, 0, 0, 10, 10, None, Some(ClickAction::SlideJump(4)));
        let mut xml = String::new();
        shape
            .to_xml(
                &mut xml,
                ShapeRels {
                    image: None,
                    click: Some("rId5"),
                },
            )
            .unwrap();

        assert!(xml.contains(r#"action="ppaction://hlinksldjump""#));
        assert!(xml.contains(r#"r:id="rId5""#));
    }

    #[test]
    fn test_filled_rectangle_has_no_transparency_markup() {
        let shape = Shape::new_rectangle(2, 0, 0, 10, 10, Some("4472C4".into()), None);
        let mut xml = String::new();
        shape.to_xml(&mut xml, ShapeRels::default()).unwrap();

        assert!(xml.contains(r#"<a:srgbClr val="4472C4"/>"#));
        assert!(!xml.contains("<a:noFill/>"));
    }

    #[test]
    fn test_picture_xml_uses_embed_rel() {
        let shape = Shape::new_picture(
            2,
            vec![0x89, 0x50, 0x4E, 0x47],
            PictureFormat::Png,
            0,
            0,
            9144000,
            5143500,
        );
        let mut xml = String::new();
        shape
            .to_xml(
                &mut xml,
                ShapeRels {
                    image: Some("rId2"),
                    click: None,
                },
            )
            .unwrap();

        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains("<a:stretch><a:fillRect/></a:stretch>"));
    }
}
