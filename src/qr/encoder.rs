//! Encoder capability.
//!
//! Symbol construction is delegated to the `qrcode` crate; pixel buffers and
//! PNG output come from `image`. This module only composes them: margin,
//! colors, final size and output representation.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::render::{svg, unicode};
use qrcode::QrCode;

use crate::qr::error::QrError;
use crate::qr::types::{EncodeRequest, EncodeResult, OutputFormat};

pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Turns a validated request into image bytes or text.
///
/// Implementations are synchronous; callers run them on the blocking pool.
pub trait Encoder: Send + Sync {
    fn encode(&self, request: &EncodeRequest) -> Result<EncodeResult, QrError>;
}

/// Production encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl Encoder for QrCodeEncoder {
    fn encode(&self, request: &EncodeRequest) -> Result<EncodeResult, QrError> {
        let code = symbol(request)?;
        match request.output_format {
            OutputFormat::Png => render_png(&code, request).map(EncodeResult::Png),
            OutputFormat::Base64 => {
                let png = render_png(&code, request)?;
                Ok(EncodeResult::DataUrl(to_data_url(&png)))
            }
            OutputFormat::Svg => Ok(EncodeResult::Svg(render_svg(&code, request))),
            OutputFormat::Terminal => Ok(EncodeResult::Terminal(render_terminal(&code, request))),
        }
    }
}

/// Wrap PNG bytes in a `data:` URL.
pub fn to_data_url(png: &[u8]) -> String {
    format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png))
}

fn symbol(request: &EncodeRequest) -> Result<QrCode, QrError> {
    QrCode::with_error_correction_level(request.content.as_bytes(), request.error_correction.into())
        .map_err(|e| QrError::EncodingFailed(e.to_string()))
}

/// Modules per side including the margin on both edges.
fn total_modules(code: &QrCode, margin: u32) -> u32 {
    code.width() as u32 + margin * 2
}

fn render_png(code: &QrCode, request: &EncodeRequest) -> Result<Vec<u8>, QrError> {
    let dark = Rgba(request.dark_color.rgba());
    let light = Rgba(request.light_color.rgba());

    let total = total_modules(code, request.margin);
    let module_px = (request.pixel_width / total).max(1);

    let symbol = code
        .render::<Rgba<u8>>()
        .quiet_zone(false)
        .module_dimensions(module_px, module_px)
        .dark_color(dark)
        .light_color(light)
        .build();

    let side = total * module_px;
    let offset = i64::from(request.margin * module_px);
    let mut canvas = RgbaImage::from_pixel(side, side, light);
    imageops::replace(&mut canvas, &symbol, offset, offset);

    // Widths too small for one pixel per module keep the 1px canvas.
    if request.pixel_width >= total && side != request.pixel_width {
        canvas = imageops::resize(
            &canvas,
            request.pixel_width,
            request.pixel_width,
            imageops::FilterType::Nearest,
        );
    }

    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| QrError::EncodingFailed(e.to_string()))?;
    Ok(bytes)
}

fn render_svg(code: &QrCode, request: &EncodeRequest) -> String {
    let dark = request.dark_color.to_css();
    let light = request.light_color.to_css();

    let inner = code
        .render::<svg::Color>()
        .quiet_zone(false)
        .module_dimensions(1, 1)
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build();
    let inner = inner.find("<svg").map_or(inner.as_str(), |start| &inner[start..]);

    let total = total_modules(code, request.margin);
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{size}" height="{size}" "#,
            r#"viewBox="0 0 {total} {total}" shape-rendering="crispEdges">"#,
            r#"<rect width="{total}" height="{total}" fill="{light}"/>"#,
            r#"<g transform="translate({margin},{margin})">{inner}</g></svg>"#
        ),
        size = request.pixel_width,
        total = total,
        light = light,
        margin = request.margin,
        inner = inner,
    )
}

fn render_terminal(code: &QrCode, request: &EncodeRequest) -> String {
    code.render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(request.margin > 0)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::types::{EcLevel, HexColor};

    fn request(content: &str, format: OutputFormat) -> EncodeRequest {
        EncodeRequest {
            content: content.to_string(),
            pixel_width: 300,
            margin: 4,
            dark_color: HexColor::BLACK,
            light_color: HexColor::WHITE,
            error_correction: EcLevel::M,
            output_format: format,
        }
    }

    #[test]
    fn test_png_has_requested_width() {
        let result = QrCodeEncoder.encode(&request("Hello", OutputFormat::Png)).unwrap();
        let EncodeResult::Png(bytes) = result else {
            panic!("expected png");
        };
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), 300);
        assert_eq!(img.height(), 300);
    }

    #[test]
    fn test_png_margin_uses_light_color() {
        let mut req = request("Hello", OutputFormat::Png);
        req.light_color = "00FF00".parse().unwrap();
        let EncodeResult::Png(bytes) = QrCodeEncoder.encode(&req).unwrap() else {
            panic!("expected png");
        };
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0xFF, 0, 0xFF]);
        assert_eq!(img.get_pixel(299, 299).0, [0, 0xFF, 0, 0xFF]);
    }

    #[test]
    fn test_tiny_width_falls_back_to_one_pixel_per_module() {
        let mut req = request("Hello", OutputFormat::Png);
        req.pixel_width = 16;
        let EncodeResult::Png(bytes) = QrCodeEncoder.encode(&req).unwrap() else {
            panic!("expected png");
        };
        let img = image::load_from_memory(&bytes).unwrap();
        // Version 1 symbol: 21 modules plus 4 on each side.
        assert_eq!(img.width(), 29);
    }

    #[test]
    fn test_svg_output() {
        let result = QrCodeEncoder.encode(&request("Hi", OutputFormat::Svg)).unwrap();
        let EncodeResult::Svg(markup) = result else {
            panic!("expected svg");
        };
        assert!(markup.starts_with("<svg"));
        assert!(!markup.contains("<?xml"));
        assert!(markup.contains(r#"width="300""#));
        assert!(markup.contains(r##"fill="#FFFFFF""##));
        assert!(markup.ends_with("</g></svg>"));
    }

    #[test]
    fn test_base64_is_data_url() {
        let result = QrCodeEncoder.encode(&request("Hi", OutputFormat::Base64)).unwrap();
        let EncodeResult::DataUrl(url) = result else {
            panic!("expected data url");
        };
        assert!(url.starts_with(DATA_URL_PREFIX));
        let bytes = STANDARD.decode(&url[DATA_URL_PREFIX.len()..]).unwrap();
        assert!(image::load_from_memory(&bytes).is_ok());
    }

    #[test]
    fn test_terminal_output() {
        let result = QrCodeEncoder.encode(&request("Hi", OutputFormat::Terminal)).unwrap();
        let EncodeResult::Terminal(text) = result else {
            panic!("expected terminal text");
        };
        assert!(text.lines().count() > 10);
        assert!(text.chars().any(|c| c == '█' || c == '▀' || c == '▄'));
    }

    #[test]
    fn test_capacity_overflow_is_encoding_failure() {
        let mut req = request(&"x".repeat(3000), OutputFormat::Png);
        req.error_correction = EcLevel::H;
        let err = QrCodeEncoder.encode(&req).unwrap_err();
        assert!(matches!(err, QrError::EncodingFailed(_)));
    }
}
