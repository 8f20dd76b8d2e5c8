//! Request and result types for QR generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::qr::error::QrError;

/// Output representation requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
    Base64,
    Terminal,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Base64 => "base64",
            OutputFormat::Terminal => "terminal",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Ok(OutputFormat::Png),
            "svg" | "image/svg+xml" => Ok(OutputFormat::Svg),
            "base64" | "dataurl" | "data-url" => Ok(OutputFormat::Base64),
            "terminal" | "text" | "utf8" | "ascii" => Ok(OutputFormat::Terminal),
            _ => Err(QrError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error correction level of the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcLevel {
    L,
    M,
    Q,
    H,
}

impl EcLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        }
    }
}

impl FromStr for EcLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(EcLevel::L),
            "M" | "MEDIUM" => Ok(EcLevel::M),
            "Q" | "QUARTILE" => Ok(EcLevel::Q),
            "H" | "HIGH" => Ok(EcLevel::H),
            _ => Err(QrError::invalid(
                "errorCorrectionLevel",
                format!("'{}' is not one of L, M, Q, H", s),
            )),
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// RGBA color parsed from `RRGGBB` or `RRGGBBAA`, with an optional `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor { r: 0, g: 0, b: 0, a: 0xFF };
    pub const WHITE: HexColor = HexColor { r: 0xFF, g: 0xFF, b: 0xFF, a: 0xFF };

    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Hex digits without the leading `#`, alpha omitted when opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 0xFF {
            format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// CSS form, e.g. `#000000`.
    pub fn to_css(&self) -> String {
        format!("#{}", self.to_hex())
    }
}

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("'{}' is not a 6 or 8 digit hex color", s));
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(HexColor {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: if hex.len() == 8 { byte(6)? } else { 0xFF },
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

/// A validated, normalized description of one QR generation task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    pub content: String,
    pub pixel_width: u32,
    pub margin: u32,
    pub dark_color: HexColor,
    pub light_color: HexColor,
    pub error_correction: EcLevel,
    pub output_format: OutputFormat,
}

/// Raw, unvalidated parameters as received from a query string or body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pub content: Option<String>,
    pub width: Option<String>,
    pub margin: Option<String>,
    pub dark: Option<String>,
    pub light: Option<String>,
    pub ecc: Option<String>,
    pub format: Option<String>,
}

/// Output of the encoder, tagged by format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeResult {
    Png(Vec<u8>),
    Svg(String),
    DataUrl(String),
    Terminal(String),
}

impl EncodeResult {
    pub fn format(&self) -> OutputFormat {
        match self {
            EncodeResult::Png(_) => OutputFormat::Png,
            EncodeResult::Svg(_) => OutputFormat::Svg,
            EncodeResult::DataUrl(_) => OutputFormat::Base64,
            EncodeResult::Terminal(_) => OutputFormat::Terminal,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            EncodeResult::Png(_) => "image/png",
            EncodeResult::Svg(_) => "image/svg+xml",
            EncodeResult::DataUrl(_) | EncodeResult::Terminal(_) => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            EncodeResult::Png(_) => "png",
            EncodeResult::Svg(_) => "svg",
            EncodeResult::DataUrl(_) | EncodeResult::Terminal(_) => "txt",
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            EncodeResult::Png(bytes) => bytes,
            EncodeResult::Svg(text) | EncodeResult::DataUrl(text) | EncodeResult::Terminal(text) => {
                text.into_bytes()
            }
        }
    }

    /// Textual form used in JSON envelopes; PNG bytes become a data-URL.
    pub fn into_text(self) -> String {
        match self {
            EncodeResult::Png(bytes) => crate::qr::encoder::to_data_url(&bytes),
            EncodeResult::Svg(text) | EncodeResult::DataUrl(text) | EncodeResult::Terminal(text) => text,
        }
    }
}
