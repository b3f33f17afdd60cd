//! PDF-to-slide-deck conversion.
//!
//! Converts a PDF into a .pptx presentation, one slide per page: the page's
//! visual content becomes a full-bleed background and its link annotations
//! become invisible clickable overlays. Pages render either as supersampled
//! PNG (in-process) or as SVG converted to EMF by an external tool.

mod assemble;
mod compose;
mod geometry;
mod links;
mod metafile;
mod options;
mod ratio;
mod render;
mod source;
mod types;

pub use assemble::{assemble, convert_file, ConvertObserver, ConvertReport, NullObserver};
pub use compose::compose_slide;
pub use geometry::{
    resolve_ratio, slide_dimensions, EMU_PER_INCH, MAX_RATIO_DENOMINATOR, MAX_SLIDE_HEIGHT,
    MAX_SLIDE_WIDTH,
};
pub use links::extract_links;
pub use metafile::{InkscapeConverter, MetafileConverter};
pub use options::{default_output_path, ConvertOptions};
pub use ratio::Ratio;
pub use render::{PageRenderer, RenderedPage};
pub use source::{MuPdfSource, PageSource, RasterImage};
pub use types::*;
