use pdf_slides::*;

#[test]
fn test_parse_w_h_spec_is_exact() {
    let mut diagnostics = Vec::new();
    let ratio = resolve_ratio("16:9", None, &mut diagnostics).unwrap();
    assert_eq!((ratio.num(), ratio.den()), (16, 9));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_parse_decimal_spec() {
    let mut diagnostics = Vec::new();
    let ratio = resolve_ratio("1.5", None, &mut diagnostics).unwrap();
    assert_eq!((ratio.num(), ratio.den()), (3, 2));
}

#[test]
fn test_parse_unreduced_w_h_spec() {
    let mut diagnostics = Vec::new();
    let ratio = resolve_ratio("1920:1080", None, &mut diagnostics).unwrap();
    assert_eq!((ratio.num(), ratio.den()), (16, 9));
}

#[test]
fn test_invalid_spec_fails() {
    let mut diagnostics = Vec::new();
    let result = resolve_ratio("abc", None, &mut diagnostics);
    assert!(matches!(
        result,
        Err(ConvertError::InvalidAspectRatioFormat(_))
    ));
}

#[test]
fn test_malformed_colon_spec_fails() {
    let mut diagnostics = Vec::new();
    assert!(matches!(
        resolve_ratio("16:9:2", None, &mut diagnostics),
        Err(ConvertError::InvalidAspectRatioFormat(_))
    ));
    assert!(matches!(
        resolve_ratio("-1:2", None, &mut diagnostics),
        Err(ConvertError::InvalidAspectRatioFormat(_))
    ));
}

#[test]
fn test_negative_decimal_fails_as_non_positive() {
    let mut diagnostics = Vec::new();
    let result = resolve_ratio("-1", None, &mut diagnostics);
    assert!(matches!(
        result,
        Err(ConvertError::NonPositiveAspectRatio(_))
    ));
}

#[test]
fn test_zero_component_fails_as_non_positive() {
    let mut diagnostics = Vec::new();
    assert!(matches!(
        resolve_ratio("16:0", None, &mut diagnostics),
        Err(ConvertError::NonPositiveAspectRatio(_))
    ));
    assert!(matches!(
        resolve_ratio("0:9", None, &mut diagnostics),
        Err(ConvertError::NonPositiveAspectRatio(_))
    ));
}

#[test]
fn test_vanishing_decimal_fails_as_non_positive() {
    // 0.001 collapses to 0/1 under the denominator bound
    let mut diagnostics = Vec::new();
    let result = resolve_ratio("0.001", None, &mut diagnostics);
    assert!(matches!(
        result,
        Err(ConvertError::NonPositiveAspectRatio(_))
    ));
}

#[test]
fn test_auto_from_widescreen_page() {
    let mut diagnostics = Vec::new();
    let ratio = resolve_ratio("auto", Some((1920.0, 1080.0)), &mut diagnostics).unwrap();
    assert_eq!((ratio.num(), ratio.den()), (16, 9));

    let dims = slide_dimensions(ratio);
    assert_eq!(dims.width, 9_144_000);
    assert_eq!(dims.height, 5_143_500);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_auto_without_page_falls_back_to_widescreen() {
    let mut diagnostics = Vec::new();
    let ratio = resolve_ratio("auto", None, &mut diagnostics).unwrap();
    let dims = slide_dimensions(ratio);
    assert_eq!(dims.width, 9_144_000);
    assert_eq!(dims.height, 5_143_500);
}

#[test]
fn test_explicit_ratio_mismatch_is_diagnosed_but_used() {
    let mut diagnostics = Vec::new();
    let ratio = resolve_ratio("4:3", Some((1920.0, 1080.0)), &mut diagnostics).unwrap();
    assert_eq!((ratio.num(), ratio.den()), (4, 3));
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0],
        Diagnostic::AspectRatioMismatch { .. }
    ));

    let dims = slide_dimensions(ratio);
    assert_eq!(dims.width, 6_858_000);
    assert_eq!(dims.height, 5_143_500);
}

#[test]
fn test_matching_explicit_ratio_has_no_diagnostic() {
    let mut diagnostics = Vec::new();
    let ratio = resolve_ratio("16:9", Some((1920.0, 1080.0)), &mut diagnostics).unwrap();
    assert_eq!((ratio.num(), ratio.den()), (16, 9));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_dimensions_bounded_and_ratio_consistent() {
    let specs = ["16:9", "4:3", "1:1", "21:9", "3:4", "0.7727", "2.39"];
    for spec in specs {
        let mut diagnostics = Vec::new();
        let ratio = resolve_ratio(spec, None, &mut diagnostics).unwrap();
        let dims = slide_dimensions(ratio);

        assert!(dims.width <= MAX_SLIDE_WIDTH, "width bound for {}", spec);
        assert!(dims.height <= MAX_SLIDE_HEIGHT, "height bound for {}", spec);

        // width/height equals the ratio up to integer truncation
        let reconstructed = dims.width as f64 / dims.height as f64;
        assert!(
            (reconstructed - ratio.to_f64()).abs() < 1e-5,
            "ratio consistency for {}: {} vs {}",
            spec,
            reconstructed,
            ratio.to_f64()
        );
    }
}

#[test]
fn test_portrait_page_auto_ratio() {
    // US Letter portrait: 612 x 792 points reduces to 17:22
    let mut diagnostics = Vec::new();
    let ratio = resolve_ratio("auto", Some((612.0, 792.0)), &mut diagnostics).unwrap();
    assert_eq!((ratio.num(), ratio.den()), (17, 22));

    let dims = slide_dimensions(ratio);
    assert!(dims.width < MAX_SLIDE_WIDTH);
    assert_eq!(dims.height, MAX_SLIDE_HEIGHT - 1);
}
