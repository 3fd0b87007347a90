//! Image References
//!
//! Item and material images are stored inline as `data:` URIs (or kept as
//! external URLs). Uploads must be `image/*` and at most 5MB.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

use super::entity::{DomainError, DomainResult};
use super::item::ItemType;

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

const CHARACTER_PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><circle fill="#e5a6b2" cx="50" cy="50" r="40"/><text y="60" x="50" text-anchor="middle" fill="white" font-size="30">⚔️</text></svg>"##;
const WEAPON_PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect fill="#e5a6b2" width="100" height="100" rx="10"/><text y="60" x="50" text-anchor="middle" fill="white" font-size="30">⚔️</text></svg>"##;

fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml,{}", utf8_percent_encode(svg, NON_ALPHANUMERIC))
}

/// Placeholder shown for items without an uploaded image
pub fn default_item_image(item_type: ItemType) -> String {
    match item_type {
        ItemType::Character => svg_data_uri(CHARACTER_PLACEHOLDER_SVG),
        ItemType::Weapon => svg_data_uri(WEAPON_PLACEHOLDER_SVG),
    }
}

/// Whether `url` is an inline SVG placeholder rather than a chosen image.
///
/// Older saves store the SVG unescaped, so only the prefix is compared.
pub fn is_placeholder_image(url: &str) -> bool {
    url.starts_with("data:image/svg+xml")
}

/// Reject anything that is not an `image/*` type or is larger than `max_bytes`
pub fn validate_image(mime: &str, size: u64, max_bytes: u64) -> DomainResult<()> {
    if !mime.starts_with("image/") {
        return Err(DomainError::validation(
            "Please select a valid image file (JPG, PNG, SVG, etc.)",
        ));
    }
    if size > max_bytes {
        return Err(DomainError::validation(format!(
            "Image size should be less than {}MB",
            max_bytes / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Declared MIME type and decoded payload size of a `data:` URI
pub fn inspect_data_uri(uri: &str) -> DomainResult<(String, u64)> {
    let malformed = || DomainError::validation("Malformed data URI");

    let rest = uri.strip_prefix("data:").ok_or_else(malformed)?;
    let (meta, payload) = rest.split_once(',').ok_or_else(malformed)?;

    let mut params = meta.split(';');
    let mime = match params.next() {
        Some(mime) if !mime.is_empty() => mime.to_ascii_lowercase(),
        _ => "text/plain".to_string(),
    };
    let is_base64 = params.any(|param| param.eq_ignore_ascii_case("base64"));

    let size = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD.decode(compact).map_err(|_| malformed())?.len() as u64
    } else {
        percent_decode_str(payload).count() as u64
    };

    Ok((mime, size))
}

/// Validate an image reference coming from a form.
///
/// `data:` URIs are checked like uploads; other references (URLs, app
/// asset paths) are accepted as-is.
pub fn check_image_reference(reference: &str, max_bytes: u64) -> DomainResult<()> {
    if reference.starts_with("data:") {
        let (mime, size) = inspect_data_uri(reference)?;
        validate_image(&mime, size, max_bytes)?;
    }
    Ok(())
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file into a `data:` URI, validating type and size first
pub fn load_image_file(path: &Path, max_bytes: u64) -> DomainResult<String> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let size = fs::metadata(path)
        .map_err(|e| DomainError::validation(format!("Cannot read {}: {}", path.display(), e)))?
        .len();
    validate_image(mime.essence_str(), size, max_bytes)?;

    let bytes = fs::read(path)
        .map_err(|e| DomainError::validation(format!("Cannot read {}: {}", path.display(), e)))?;
    Ok(encode_data_uri(mime.essence_str(), &bytes))
}
