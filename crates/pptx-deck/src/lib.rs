//! Minimal PPTX (OOXML presentation) authoring.
//!
//! Builds a slide deck in memory (slide size, slides, picture and
//! rectangle shapes, hyperlink and slide-jump click actions) and writes it
//! out as a complete OPC package. Slides are composed fresh on a blank
//! layout; there are no template placeholders to manage.

mod deck;
mod error;
mod format;
mod package;
mod shape;
mod slide;
mod template;

pub use deck::Deck;
pub use error::{DeckError, Result};
pub use format::PictureFormat;
pub use shape::ClickAction;
pub use slide::Slide;
