//! OPC package assembly for decks.
//!
//! Serializes a [`Deck`](crate::Deck) into a .pptx ZIP container: the
//! [Content_Types].xml map, package and part relationships, static template
//! parts, and one slide part (plus media and relationships) per slide.

use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::deck::Deck;
use crate::error::Result;
use crate::format::PictureFormat;
use crate::shape::{escape_xml, ClickAction, ShapeRels};
use crate::template;

mod rel_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extendedProperties";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const PRES_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
    pub const VIEW_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
    pub const TABLE_STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

mod content_type {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const SLIDE: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const PRES_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
    pub const VIEW_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
    pub const TABLE_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
    pub const CORE_PROPERTIES: &str =
        "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
}

/// Builder for [Content_Types].xml: default extension mappings plus
/// part-name overrides.
struct ContentTypes {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), content_type::RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), content_type::XML.to_string());
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_string(), content_type.to_string());
    }

    fn add_override(&mut self, partname: &str, content_type: &str) {
        self.overrides
            .insert(partname.to_string(), content_type.to_string());
    }

    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        for (extension, ct) in &self.defaults {
            write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(extension),
                escape_xml(ct)
            )?;
        }
        for (partname, ct) in &self.overrides {
            write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(ct)
            )?;
        }
        xml.push_str("</Types>");
        Ok(xml)
    }
}

/// An ordered relationship list for one rels part, allocating sequential
/// `rIdN` identifiers.
struct Relationships {
    entries: Vec<(String, String, String, bool)>,
}

impl Relationships {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an internal relationship; returns the allocated `rIdN`.
    fn add(&mut self, rel_type: &str, target: &str) -> String {
        self.push(rel_type, target, false)
    }

    /// Add an external-mode relationship; returns the allocated `rIdN`.
    fn add_external(&mut self, rel_type: &str, target: &str) -> String {
        self.push(rel_type, target, true)
    }

    fn push(&mut self, rel_type: &str, target: &str, external: bool) -> String {
        let rel_id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((
            rel_id.clone(),
            rel_type.to_string(),
            target.to_string(),
            external,
        ));
        rel_id
    }

    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (rel_id, rel_type, target, external) in &self.entries {
            if *external {
                write!(
                    xml,
                    r#"<Relationship Id="{}" Type="{}" Target="{}" TargetMode="External"/>"#,
                    rel_id,
                    rel_type,
                    escape_xml(target)
                )?;
            } else {
                write!(
                    xml,
                    r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                    rel_id,
                    rel_type,
                    escape_xml(target)
                )?;
            }
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

/// Serialize a deck to .pptx bytes.
pub(crate) fn write_package(deck: &Deck) -> Result<Vec<u8>> {
    let mut parts: Vec<(String, Vec<u8>)> = Vec::new();
    let mut content_types = ContentTypes::new();

    // Static template parts
    push_part(
        &mut parts,
        &mut content_types,
        "ppt/slideMasters/slideMaster1.xml",
        content_type::SLIDE_MASTER,
        template::SLIDE_MASTER_XML.as_bytes().to_vec(),
    );
    push_part(
        &mut parts,
        &mut content_types,
        "ppt/slideLayouts/slideLayout1.xml",
        content_type::SLIDE_LAYOUT,
        template::SLIDE_LAYOUT_XML.as_bytes().to_vec(),
    );
    push_part(
        &mut parts,
        &mut content_types,
        "ppt/theme/theme1.xml",
        content_type::THEME,
        template::THEME_XML.as_bytes().to_vec(),
    );
    push_part(
        &mut parts,
        &mut content_types,
        "ppt/presProps.xml",
        content_type::PRES_PROPS,
        template::PRES_PROPS_XML.as_bytes().to_vec(),
    );
    push_part(
        &mut parts,
        &mut content_types,
        "ppt/viewProps.xml",
        content_type::VIEW_PROPS,
        template::VIEW_PROPS_XML.as_bytes().to_vec(),
    );
    push_part(
        &mut parts,
        &mut content_types,
        "ppt/tableStyles.xml",
        content_type::TABLE_STYLES,
        template::TABLE_STYLES_XML.as_bytes().to_vec(),
    );
    push_part(
        &mut parts,
        &mut content_types,
        "docProps/core.xml",
        content_type::CORE_PROPERTIES,
        template::CORE_PROPS_XML.as_bytes().to_vec(),
    );
    push_part(
        &mut parts,
        &mut content_types,
        "docProps/app.xml",
        content_type::EXTENDED_PROPERTIES,
        template::APP_PROPS_XML.as_bytes().to_vec(),
    );

    // Fixed relationships of the static parts
    let mut master_rels = Relationships::new();
    master_rels.add(rel_type::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master_rels.add(rel_type::THEME, "../theme/theme1.xml");
    parts.push((
        "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
        master_rels.to_xml()?.into_bytes(),
    ));

    let mut layout_rels = Relationships::new();
    layout_rels.add(rel_type::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    parts.push((
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
        layout_rels.to_xml()?.into_bytes(),
    ));

    // Slide parts, their media, and their relationships
    let mut media_counter = 0usize;
    for (slide_index, slide) in deck.slides().iter().enumerate() {
        let slide_number = slide_index + 1;
        let mut rels = Relationships::new();
        rels.add(rel_type::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

        // Allocate relationship IDs per shape in shape order.
        let mut allocated: Vec<(Option<String>, Option<String>)> =
            Vec::with_capacity(slide.shapes.len());
        for shape in &slide.shapes {
            let image_rid = shape.picture_data().map(|(data, format)| {
                media_counter += 1;
                let filename = format!("image{}.{}", media_counter, format.extension());
                register_media_type(&mut content_types, format);
                parts.push((format!("ppt/media/{}", filename), data.to_vec()));
                rels.add(rel_type::IMAGE, &format!("../media/{}", filename))
            });
            let click_rid = shape.click_action().map(|action| match action {
                ClickAction::Hyperlink(target) => rels.add_external(rel_type::HYPERLINK, target),
                ClickAction::SlideJump(index) => {
                    rels.add(rel_type::SLIDE, &format!("slide{}.xml", index + 1))
                }
            });
            allocated.push((image_rid, click_rid));
        }

        let shape_rels: Vec<ShapeRels<'_>> = allocated
            .iter()
            .map(|(image, click)| ShapeRels {
                image: image.as_deref(),
                click: click.as_deref(),
            })
            .collect();

        let partname = format!("ppt/slides/slide{}.xml", slide_number);
        content_types.add_override(&format!("/{}", partname), content_type::SLIDE);
        parts.push((partname, slide.to_xml(&shape_rels)?.into_bytes()));
        parts.push((
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_number),
            rels.to_xml()?.into_bytes(),
        ));
    }

    // Presentation part and its relationships
    let mut pres_rels = Relationships::new();
    pres_rels.add(rel_type::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    let slide_rel_ids: Vec<String> = (1..=deck.slide_count())
        .map(|n| pres_rels.add(rel_type::SLIDE, &format!("slides/slide{}.xml", n)))
        .collect();
    pres_rels.add(rel_type::PRES_PROPS, "presProps.xml");
    pres_rels.add(rel_type::VIEW_PROPS, "viewProps.xml");
    pres_rels.add(rel_type::THEME, "theme/theme1.xml");
    pres_rels.add(rel_type::TABLE_STYLES, "tableStyles.xml");

    push_part(
        &mut parts,
        &mut content_types,
        "ppt/presentation.xml",
        content_type::PRESENTATION,
        deck.presentation_xml(&slide_rel_ids)?.into_bytes(),
    );
    parts.push((
        "ppt/_rels/presentation.xml.rels".to_string(),
        pres_rels.to_xml()?.into_bytes(),
    ));

    // Package-level relationships
    let mut pkg_rels = Relationships::new();
    pkg_rels.add(rel_type::OFFICE_DOCUMENT, "ppt/presentation.xml");
    pkg_rels.add(rel_type::CORE_PROPERTIES, "docProps/core.xml");
    pkg_rels.add(rel_type::EXTENDED_PROPERTIES, "docProps/app.xml");
    parts.push(("_rels/.rels".to_string(), pkg_rels.to_xml()?.into_bytes()));

    write_zip(&content_types.to_xml()?, &parts)
}

fn push_part(
    parts: &mut Vec<(String, Vec<u8>)>,
    content_types: &mut ContentTypes,
    partname: &str,
    content_type: &str,
    blob: Vec<u8>,
) {
    content_types.add_override(&format!("/{}", partname), content_type);
    parts.push((partname.to_string(), blob));
}

fn register_media_type(content_types: &mut ContentTypes, format: PictureFormat) {
    content_types.add_default(format.extension(), format.mime_type());
}

fn write_zip(content_types_xml: &str, parts: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml.as_bytes())?;

    for (name, blob) in parts {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(blob)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
