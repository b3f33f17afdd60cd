//! Slide geometry: aspect-ratio resolution and EMU dimension derivation.

use crate::ratio::Ratio;
use crate::types::{ConvertError, Diagnostic, Result, SlideDimensions};

/// EMUs (English Metric Units) per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Maximum slide width in EMUs (10 inches).
pub const MAX_SLIDE_WIDTH: i64 = 9_144_000;

/// Maximum slide height in EMUs (5.625 inches, the 16:9 ceiling).
pub const MAX_SLIDE_HEIGHT: i64 = 5_143_500;

/// Denominator bound for aspect-ratio rationals.
pub const MAX_RATIO_DENOMINATOR: i64 = 100;

/// Resolve the slide aspect ratio from the CLI spec and the first page's
/// raw size (points). `page_size` is `None` for documents without pages;
/// "auto" then falls back to the 16:9 ceiling and explicit ratios are
/// accepted without a mismatch check.
///
/// An explicitly supplied ratio whose bounded form differs from the page's
/// own yields a [`Diagnostic::AspectRatioMismatch`] and is used anyway.
pub fn resolve_ratio(
    spec: &str,
    page_size: Option<(f32, f32)>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Ratio> {
    let page_ratio = page_size
        .filter(|(_, height)| *height > 0.0)
        .and_then(|(width, height)| {
            Ratio::approximate(width as f64 / height as f64, MAX_RATIO_DENOMINATOR)
        });

    let ratio = if spec == "auto" {
        page_ratio.unwrap_or(Ratio::WIDESCREEN)
    } else {
        let requested = parse_ratio_spec(spec)?;
        if !requested.is_positive() {
            return Err(ConvertError::NonPositiveAspectRatio(requested.to_string()));
        }
        if let Some(page) = page_ratio {
            if page != requested {
                diagnostics.push(Diagnostic::AspectRatioMismatch {
                    requested,
                    page,
                });
            }
        }
        requested
    };

    if !ratio.is_positive() {
        return Err(ConvertError::NonPositiveAspectRatio(ratio.to_string()));
    }
    Ok(ratio)
}

/// Parse an explicit ratio spec: "W:H" with positive integers, or a
/// decimal string. Both forms are bounded to denominator 100.
fn parse_ratio_spec(spec: &str) -> Result<Ratio> {
    if let Some((width, height)) = spec.split_once(':') {
        if let (Ok(width), Ok(height)) = (width.parse::<u32>(), height.parse::<u32>()) {
            if width == 0 || height == 0 {
                return Err(ConvertError::NonPositiveAspectRatio(spec.to_string()));
            }
            let ratio = Ratio::new(width as i64, height as i64)
                .ok_or_else(|| ConvertError::InvalidAspectRatioFormat(spec.to_string()))?;
            return Ok(ratio.limit_denominator(MAX_RATIO_DENOMINATOR));
        }
        return Err(ConvertError::InvalidAspectRatioFormat(spec.to_string()));
    }

    let value: f64 = spec
        .trim()
        .parse()
        .map_err(|_| ConvertError::InvalidAspectRatioFormat(spec.to_string()))?;
    Ratio::approximate(value, MAX_RATIO_DENOMINATOR)
        .ok_or_else(|| ConvertError::InvalidAspectRatioFormat(spec.to_string()))
}

/// Slide dimensions for a positive ratio: `width = min(MAX_W, ratio * MAX_H)`,
/// `height = width / ratio`, both truncated, in exact integer arithmetic.
pub fn slide_dimensions(ratio: Ratio) -> SlideDimensions {
    let width = (ratio.num() as i128 * MAX_SLIDE_HEIGHT as i128 / ratio.den() as i128)
        .min(MAX_SLIDE_WIDTH as i128);
    let height = width * ratio.den() as i128 / ratio.num() as i128;
    SlideDimensions {
        width: width as i64,
        height: height as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widescreen_dimensions_hit_both_bounds() {
        let dims = slide_dimensions(Ratio::WIDESCREEN);
        assert_eq!(dims.width, MAX_SLIDE_WIDTH);
        assert_eq!(dims.height, MAX_SLIDE_HEIGHT);
    }
}
