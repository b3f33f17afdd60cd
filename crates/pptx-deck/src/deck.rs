//! Deck model and presentation part XML generation.

use std::fmt::Write as FmtWrite;
use std::path::Path;

use crate::error::Result;
use crate::package;
use crate::slide::Slide;

/// Default slide width in EMUs (10 inches).
const DEFAULT_SLIDE_WIDTH: i64 = 9_144_000;
/// Default slide height in EMUs (7.5 inches, 4:3).
const DEFAULT_SLIDE_HEIGHT: i64 = 6_858_000;

/// A slide deck under construction.
///
/// Holds the slide size (EMUs, 914400 per inch) and the ordered slides.
/// The deck is serialized to a .pptx package exactly once via [`Deck::save`]
/// or [`Deck::to_bytes`].
#[derive(Debug)]
pub struct Deck {
    pub(crate) slides: Vec<Slide>,
    slide_width: i64,
    slide_height: i64,
}

impl Deck {
    /// Create a new empty deck with default 4:3 dimensions.
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: DEFAULT_SLIDE_WIDTH,
            slide_height: DEFAULT_SLIDE_HEIGHT,
        }
    }

    /// Set the slide size in EMUs.
    pub fn set_slide_size(&mut self, width: i64, height: i64) {
        self.slide_width = width;
        self.slide_height = height;
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Append a new empty slide and return a mutable reference to it.
    pub fn add_slide(&mut self) -> &mut Slide {
        let slide_id = (self.slides.len() + 256) as u32;
        self.slides.push(Slide::new(slide_id));
        self.slides.last_mut().expect("slide just pushed")
    }

    /// Get a mutable reference to a slide by 0-based index.
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Get the slides in order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Serialize the deck to .pptx bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        package::write_package(self)
    }

    /// Serialize the deck and write it to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Generate the presentation part XML. `slide_rel_ids` carries the
    /// relationship ID allocated for each slide, in slide order.
    pub(crate) fn presentation_xml(&self, slide_rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);

        xml.push_str("<p:sldMasterIdLst>");
        xml.push_str(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#);
        xml.push_str("</p:sldMasterIdLst>");

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (index, slide) in self.slides.iter().enumerate() {
                let rel_id = slide_rel_ids.get(index).map(String::as_str).unwrap_or("rId2");
                write!(xml, r#"<p:sldId id="{}" r:id="{}"/>"#, slide.slide_id(), rel_id)?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deck_defaults() {
        let deck = Deck::new();
        assert_eq!(deck.slide_count(), 0);
        assert_eq!(deck.slide_width(), 9_144_000);
        assert_eq!(deck.slide_height(), 6_858_000);
    }

    #[test]
    fn test_add_slide() {
        let mut deck = Deck::new();
        deck.add_slide();
        deck.add_slide();
        assert_eq!(deck.slide_count(), 2);
        assert!(deck.slide_mut(1).is_some());
        assert!(deck.slide_mut(2).is_none());
    }

    #[test]
    fn test_presentation_xml_slide_size() {
        let mut deck = Deck::new();
        deck.set_slide_size(9_144_000, 5_143_500);
        deck.add_slide();
        let xml = deck
            .presentation_xml(&["rId2".to_string()])
            .unwrap();
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
    }

    #[test]
    fn test_presentation_xml_empty_deck_has_no_slide_list() {
        let deck = Deck::new();
        let xml = deck.presentation_xml(&[]).unwrap();
        assert!(!xml.contains("<p:sldIdLst>"));
        assert!(xml.contains("<p:sldMasterIdLst>"));
    }
}
