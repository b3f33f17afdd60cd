//! Run orchestration: the sequential page-to-slide pipeline.

use pptx_deck::Deck;

use crate::compose::compose_slide;
use crate::geometry;
use crate::links::extract_links;
use crate::metafile::InkscapeConverter;
use crate::options::ConvertOptions;
use crate::ratio::Ratio;
use crate::render::PageRenderer;
use crate::source::{MuPdfSource, PageSource};
use crate::types::{Diagnostic, Result, SlideDimensions};

/// Receives progress and diagnostics while a run executes. All methods
/// have no-op defaults.
pub trait ConvertObserver {
    fn page_finished(&mut self, index: usize, count: usize) {
        let _ = (index, count);
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        let _ = diagnostic;
    }
}

/// Observer that ignores everything.
pub struct NullObserver;

impl ConvertObserver for NullObserver {}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct ConvertReport {
    /// Pages converted; equals the slide count of the written deck.
    pub pages: usize,
    pub ratio: Ratio,
    pub dimensions: SlideDimensions,
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert the configured input file. Validates the configuration, opens
/// the source, and runs [`assemble`] with the renderer the options select.
pub fn convert_file(
    options: &ConvertOptions,
    observer: &mut dyn ConvertObserver,
) -> Result<ConvertReport> {
    options.validate()?;
    let source = MuPdfSource::open(&options.input)?;
    let renderer = if options.vector {
        PageRenderer::Vector {
            converter: Box::new(InkscapeConverter::new(&options.inkscape_path)),
        }
    } else {
        PageRenderer::Raster { dpi: options.dpi }
    };
    assemble(&source, options, renderer, observer)
}

/// Drive the whole pipeline: resolve geometry once from the first page,
/// pre-allocate one slide per page, then extract, render, and compose each
/// page in order. The deck is persisted exactly once, after every page
/// succeeded; a failed run writes nothing to the destination.
pub fn assemble(
    source: &dyn PageSource,
    options: &ConvertOptions,
    renderer: PageRenderer,
    observer: &mut dyn ConvertObserver,
) -> Result<ConvertReport> {
    let mut diagnostics = Vec::new();
    let page_count = source.page_count();

    let first_page_size = if page_count > 0 {
        Some(source.page_size(0)?)
    } else {
        None
    };
    let ratio = geometry::resolve_ratio(&options.aspect_ratio, first_page_size, &mut diagnostics)?;
    let dimensions = geometry::slide_dimensions(ratio);
    for diagnostic in &diagnostics {
        observer.diagnostic(diagnostic);
    }

    renderer.preflight()?;

    let mut deck = Deck::new();
    deck.set_slide_size(dimensions.width, dimensions.height);
    for _ in 0..page_count {
        deck.add_slide();
    }

    for index in 0..page_count {
        let (page_width, page_height) = source.page_size(index)?;
        let annotations = source.raw_links(index)?;

        let mut page_diagnostics = Vec::new();
        let links = extract_links(
            index,
            page_width,
            page_height,
            &annotations,
            &mut page_diagnostics,
        );
        for diagnostic in &page_diagnostics {
            observer.diagnostic(diagnostic);
        }
        diagnostics.append(&mut page_diagnostics);

        let visual = renderer.render(source, index)?;
        let slide = deck
            .slide_mut(index)
            .ok_or(pptx_deck::DeckError::NoSuchSlide(index))?;
        compose_slide(slide, visual, &links, dimensions)?;

        observer.page_finished(index, page_count);
    }

    deck.save(&options.output)?;

    Ok(ConvertReport {
        pages: page_count,
        ratio,
        dimensions,
        diagnostics,
    })
}
