//! Self-describing download links.
//!
//! A download URL carries the content as a base64 token plus every option
//! needed to regenerate the same image. Nothing is stored server side; a
//! download request is a fresh encode.

use base64::{
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD},
    Engine as _,
};
use url::Url;

use crate::qr::error::QrError;
use crate::qr::types::{EncodeRequest, RawParams};

pub const DOWNLOAD_PATH: &str = "/api/v1/download-qr";

const DOWNLOAD_SEGMENTS: [&str; 3] = ["api", "v1", "download-qr"];

/// Encode content as a URL-safe path token.
pub fn encode_token(content: &str) -> String {
    URL_SAFE_NO_PAD.encode(content.as_bytes())
}

/// Decode a path token back to content.
///
/// URL-safe and standard alphabets are both accepted, padded or not.
pub fn decode_token(token: &str) -> Result<String, QrError> {
    let token = token.trim();
    let bytes = [&URL_SAFE_NO_PAD, &URL_SAFE, &STANDARD, &STANDARD_NO_PAD]
        .iter()
        .find_map(|engine| engine.decode(token).ok())
        .ok_or_else(|| QrError::invalid("encodedContent", "not valid base64"))?;

    String::from_utf8(bytes).map_err(|_| QrError::invalid("encodedContent", "decoded content is not UTF-8"))
}

/// Build a URL that regenerates `request` as a PNG on demand.
///
/// The download path is appended to `base`, so a service mounted under a
/// prefix keeps its prefix in the link.
pub fn build_download_reference(base: &Url, request: &EncodeRequest) -> Result<Url, QrError> {
    let token = encode_token(&request.content);

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| QrError::EncodingFailed(format!("public URL '{}' cannot carry a path", base)))?
        .pop_if_empty()
        .extend(DOWNLOAD_SEGMENTS)
        .push(&token);

    url.query_pairs_mut()
        .append_pair("size", &request.pixel_width.to_string())
        .append_pair("margin", &request.margin.to_string())
        .append_pair("dark", &request.dark_color.to_hex())
        .append_pair("light", &request.light_color.to_hex())
        .append_pair("ecc", request.error_correction.as_str());

    Ok(url)
}

/// Same link with the attachment flag set.
pub fn direct_download(reference: &Url) -> Url {
    let mut url = reference.clone();
    url.query_pairs_mut().append_pair("download", "true");
    url
}

/// Raw parameters for a download request: the token supplies the content.
pub fn params_from_token(token: &str, mut query: RawParams) -> Result<RawParams, QrError> {
    query.content = Some(decode_token(token)?);
    // Downloads are always PNG.
    query.format = None;
    Ok(query)
}
