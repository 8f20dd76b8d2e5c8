//! Parameter validation and request construction.
//!
//! All checks run before the encoder is invoked, so a rejected request
//! never costs an encode.

use crate::config::QrConfig;
use crate::qr::error::QrError;
use crate::qr::types::{EcLevel, EncodeRequest, HexColor, OutputFormat, RawParams};

/// Validate raw content and return it trimmed.
pub fn validate(content: Option<&str>, max_chars: usize) -> Result<String, QrError> {
    let trimmed = content.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(QrError::MissingParameter("text"));
    }

    let length = trimmed.chars().count();
    if length > max_chars {
        return Err(QrError::ContentTooLong {
            length,
            max: max_chars,
        });
    }

    Ok(trimmed.to_string())
}

/// Build an [`EncodeRequest`] from raw parameters, applying defaults.
///
/// `default_format` is used when the caller did not name a format.
pub fn build_request(
    raw: &RawParams,
    config: &QrConfig,
    default_format: OutputFormat,
) -> Result<EncodeRequest, QrError> {
    let content = validate(raw.content.as_deref(), config.max_content_chars)?;

    let pixel_width = parse_bounded(
        "size",
        raw.width.as_deref(),
        config.default_width,
        config.min_width,
        config.max_width,
    )?;
    let margin = parse_bounded(
        "margin",
        raw.margin.as_deref(),
        config.default_margin,
        0,
        config.max_margin,
    )?;

    let dark_color = parse_color("dark", raw.dark.as_deref(), &config.default_dark, HexColor::BLACK)?;
    let light_color = parse_color("light", raw.light.as_deref(), &config.default_light, HexColor::WHITE)?;

    let error_correction = match non_blank(raw.ecc.as_deref()) {
        Some(level) => level.parse::<EcLevel>()?,
        None => config.default_error_correction.parse().unwrap_or(EcLevel::M),
    };

    let output_format = match non_blank(raw.format.as_deref()) {
        Some(format) => format.parse::<OutputFormat>()?,
        None => default_format,
    };

    Ok(EncodeRequest {
        content,
        pixel_width,
        margin,
        dark_color,
        light_color,
        error_correction,
        output_format,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bounded(
    name: &'static str,
    value: Option<&str>,
    default: u32,
    min: u32,
    max: u32,
) -> Result<u32, QrError> {
    let Some(text) = non_blank(value) else {
        return Ok(default);
    };

    let parsed: u32 = text
        .parse()
        .map_err(|_| QrError::invalid(name, format!("'{}' is not a non-negative integer", text)))?;

    if parsed < min || parsed > max {
        return Err(QrError::invalid(
            name,
            format!("{} is outside the allowed range [{}, {}]", parsed, min, max),
        ));
    }

    Ok(parsed)
}

fn parse_color(
    name: &'static str,
    value: Option<&str>,
    configured_default: &str,
    fallback: HexColor,
) -> Result<HexColor, QrError> {
    match non_blank(value) {
        Some(text) => text.parse().map_err(|reason| QrError::invalid(name, reason)),
        None => Ok(configured_default.parse().unwrap_or(fallback)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(content: &str) -> RawParams {
        RawParams {
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert_eq!(validate(Some("a"), 4096).unwrap(), "a");
        let max = "x".repeat(4096);
        assert_eq!(validate(Some(&max), 4096).unwrap().len(), 4096);
    }

    #[test]
    fn test_validate_rejects_missing_and_blank() {
        assert_eq!(validate(None, 4096), Err(QrError::MissingParameter("text")));
        assert_eq!(validate(Some(""), 4096), Err(QrError::MissingParameter("text")));
        assert_eq!(validate(Some("  \n\t"), 4096), Err(QrError::MissingParameter("text")));
    }

    #[test]
    fn test_validate_rejects_overlong() {
        let long = "x".repeat(4097);
        assert_eq!(
            validate(Some(&long), 4096),
            Err(QrError::ContentTooLong { length: 4097, max: 4096 })
        );
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        let wide = "é".repeat(4096);
        assert!(wide.len() > 4096);
        assert!(validate(Some(&wide), 4096).is_ok());
    }

    #[test]
    fn test_validate_trims() {
        assert_eq!(validate(Some("  hello  "), 4096).unwrap(), "hello");
    }

    #[test]
    fn test_build_request_defaults() {
        let req = build_request(&raw("Hello"), &QrConfig::default(), OutputFormat::Png).unwrap();
        assert_eq!(req.content, "Hello");
        assert_eq!(req.pixel_width, 300);
        assert_eq!(req.margin, 4);
        assert_eq!(req.dark_color, HexColor::BLACK);
        assert_eq!(req.light_color, HexColor::WHITE);
        assert_eq!(req.error_correction, EcLevel::M);
        assert_eq!(req.output_format, OutputFormat::Png);
    }

    #[test]
    fn test_build_request_explicit_values() {
        let params = RawParams {
            content: Some("Hi".into()),
            width: Some("512".into()),
            margin: Some("0".into()),
            dark: Some("#112233".into()),
            light: Some("eeeeee".into()),
            ecc: Some("h".into()),
            format: Some("svg".into()),
        };
        let req = build_request(&params, &QrConfig::default(), OutputFormat::Png).unwrap();
        assert_eq!(req.pixel_width, 512);
        assert_eq!(req.margin, 0);
        assert_eq!(req.dark_color.to_hex(), "112233");
        assert_eq!(req.light_color.to_hex(), "EEEEEE");
        assert_eq!(req.error_correction, EcLevel::H);
        assert_eq!(req.output_format, OutputFormat::Svg);
    }

    #[test]
    fn test_build_request_rejects_non_numeric() {
        let params = RawParams {
            width: Some("big".into()),
            ..raw("Hi")
        };
        let err = build_request(&params, &QrConfig::default(), OutputFormat::Png).unwrap_err();
        assert!(matches!(err, QrError::InvalidParameter { name: "size", .. }));

        let params = RawParams {
            margin: Some("-1".into()),
            ..raw("Hi")
        };
        let err = build_request(&params, &QrConfig::default(), OutputFormat::Png).unwrap_err();
        assert!(matches!(err, QrError::InvalidParameter { name: "margin", .. }));
    }

    #[test]
    fn test_build_request_enforces_ranges() {
        for width in ["15", "4097", "100000"] {
            let params = RawParams {
                width: Some(width.into()),
                ..raw("Hi")
            };
            assert!(build_request(&params, &QrConfig::default(), OutputFormat::Png).is_err());
        }

        let params = RawParams {
            margin: Some("65".into()),
            ..raw("Hi")
        };
        assert!(build_request(&params, &QrConfig::default(), OutputFormat::Png).is_err());
    }

    #[test]
    fn test_build_request_rejects_bad_color_and_format() {
        let params = RawParams {
            dark: Some("black".into()),
            ..raw("Hi")
        };
        let err = build_request(&params, &QrConfig::default(), OutputFormat::Png).unwrap_err();
        assert!(matches!(err, QrError::InvalidParameter { name: "dark", .. }));

        let params = RawParams {
            format: Some("jpeg".into()),
            ..raw("Hi")
        };
        let err = build_request(&params, &QrConfig::default(), OutputFormat::Png).unwrap_err();
        assert_eq!(err, QrError::InvalidFormat("jpeg".into()));
    }

    #[test]
    fn test_validation_runs_before_other_checks() {
        let params = RawParams {
            format: Some("jpeg".into()),
            ..Default::default()
        };
        let err = build_request(&params, &QrConfig::default(), OutputFormat::Png).unwrap_err();
        assert_eq!(err, QrError::MissingParameter("text"));
    }

    #[test]
    fn test_configured_defaults_apply() {
        let config = QrConfig {
            default_width: 200,
            default_error_correction: "H".into(),
            default_dark: "FF0000".into(),
            ..QrConfig::default()
        };
        let req = build_request(&raw("Hi"), &config, OutputFormat::Base64).unwrap();
        assert_eq!(req.pixel_width, 200);
        assert_eq!(req.error_correction, EcLevel::H);
        assert_eq!(req.dark_color.to_hex(), "FF0000");
        assert_eq!(req.output_format, OutputFormat::Base64);
    }
}
