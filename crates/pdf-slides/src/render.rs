//! Page rendering strategies.
//!
//! Either strategy yields a [`RenderedPage`]: an encoded visual that fills
//! the slide's full bounds. Composition never inspects which strategy
//! produced it.

use std::io::Cursor;

use pptx_deck::PictureFormat;

use crate::metafile::MetafileConverter;
use crate::source::{PageSource, RasterImage};
use crate::types::{ConvertError, Result};

/// Fixed supersampling factor applied on top of the configured DPI.
const SUPERSAMPLE: f32 = 2.0;

/// A page's visual content, encoded and ready to embed.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub data: Vec<u8>,
    pub format: PictureFormat,
}

/// The rendering strategy, selected once for a whole run.
pub enum PageRenderer {
    /// In-process pixel rendering at a configured DPI, PNG-encoded.
    Raster { dpi: u32 },
    /// SVG export converted to an EMF metafile by an external tool.
    Vector {
        converter: Box<dyn MetafileConverter>,
    },
}

impl PageRenderer {
    /// One-time pre-flight, run before any page work. The vector strategy
    /// probes the external tool and fails fast when it is unavailable.
    pub fn preflight(&self) -> Result<()> {
        match self {
            PageRenderer::Raster { .. } => Ok(()),
            PageRenderer::Vector { converter } => {
                let version = converter.probe()?;
                log::info!("metafile converter: {}", version);
                Ok(())
            }
        }
    }

    pub fn render(&self, source: &dyn PageSource, index: usize) -> Result<RenderedPage> {
        match self {
            PageRenderer::Raster { dpi } => render_raster(source, index, *dpi),
            PageRenderer::Vector { converter } => render_vector(source, index, converter.as_ref()),
        }
    }
}

fn render_raster(source: &dyn PageSource, index: usize, dpi: u32) -> Result<RenderedPage> {
    let scale = dpi as f32 / 72.0 * SUPERSAMPLE;
    let image = source.render_raster(index, scale)?;
    Ok(RenderedPage {
        data: encode_png(image)?,
        format: PictureFormat::Png,
    })
}

fn encode_png(image: RasterImage) -> Result<Vec<u8>> {
    let buffer = image::RgbImage::from_raw(image.width, image.height, image.pixels)
        .ok_or_else(|| ConvertError::Render("raster buffer does not match its dimensions".into()))?;
    let mut bytes = Vec::new();
    buffer.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Export, convert, and read back one page through scoped temp files. The
/// temp files are removed when this function returns, on any path.
fn render_vector(
    source: &dyn PageSource,
    index: usize,
    converter: &dyn MetafileConverter,
) -> Result<RenderedPage> {
    let svg = source.export_svg(index)?;

    let svg_file = tempfile::Builder::new()
        .prefix("page")
        .suffix(".svg")
        .tempfile()?;
    std::fs::write(svg_file.path(), svg.as_bytes())?;

    let emf_file = tempfile::Builder::new()
        .prefix("page")
        .suffix(".emf")
        .tempfile()?;
    converter.convert(svg_file.path(), emf_file.path())?;

    let data = std::fs::read(emf_file.path())?;
    Ok(RenderedPage {
        data,
        format: PictureFormat::Emf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_roundtrips_dimensions() {
        let image = RasterImage {
            width: 2,
            height: 2,
            pixels: vec![255; 12],
        };
        let bytes = encode_png(image).unwrap();
        assert_eq!(PictureFormat::detect_from_bytes(&bytes), Some(PictureFormat::Png));
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        let image = RasterImage {
            width: 4,
            height: 4,
            pixels: vec![0; 3],
        };
        assert!(matches!(
            encode_png(image),
            Err(ConvertError::Render(_))
        ));
    }
}
