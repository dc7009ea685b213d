use std::fmt;

use crate::error::{PasteError, PasteResult};

/// Prefix marking image entries in a clipboard offer
pub const IMAGE_PREFIX: &str = "image/";

/// Vendor prefix dropped from file extensions
const VENDOR_PREFIX: &str = "x-";

/// Image subtype offered by the clipboard, e.g. "png" for "image/png"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFormat(String);

impl ImageFormat {
    /// Parse a clipboard type tag; None unless it starts with "image/"
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.strip_prefix(IMAGE_PREFIX)
            .map(|subtype| ImageFormat(subtype.to_string()))
    }

    /// The subtype as offered, used verbatim when requesting data
    pub fn subtype(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageFormat {
    fn from(subtype: &str) -> Self {
        ImageFormat(subtype.to_string())
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep the image entries of a clipboard offer, in offered order
pub fn image_formats<S: AsRef<str>>(offer: &[S]) -> Vec<ImageFormat> {
    offer
        .iter()
        .filter_map(|tag| ImageFormat::from_tag(tag.as_ref()))
        .collect()
}

/// Selected request subtype and the file extension to write it under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatChoice {
    request: String,
    extension: String,
}

impl FormatChoice {
    /// Subtype sent back to the clipboard
    pub fn request(&self) -> &str {
        &self.request
    }

    /// Extension for the destination file, without the dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Full type tag to request, e.g. "image/x-ms-bmp"
    pub fn mime(&self) -> String {
        format!("{}{}", IMAGE_PREFIX, self.request)
    }
}

/// Pick the format to paste
///
/// PNG wins, then JPEG (written as ".jpg"), then whatever the clipboard
/// offered first. A leading "x-" is dropped from the extension only, so
/// "x-ms-bmp" is requested as "image/x-ms-bmp" and written as ".ms-bmp".
pub fn select_format(offers: &[ImageFormat]) -> PasteResult<FormatChoice> {
    let has = |subtype: &str| offers.iter().any(|f| f.subtype() == subtype);

    let (request, extension) = if has("png") {
        ("png", "png")
    } else if has("jpeg") {
        ("jpeg", "jpg")
    } else {
        let first = offers.first().ok_or(PasteError::NoImageOffered)?;
        (first.subtype(), first.subtype())
    };

    let extension = extension.strip_prefix(VENDOR_PREFIX).unwrap_or(extension);

    if !is_usable_subtype(request) || !is_usable_subtype(extension) {
        return Err(PasteError::MalformedOffer(format!("{}{}", IMAGE_PREFIX, request)));
    }

    Ok(FormatChoice {
        request: request.to_string(),
        extension: extension.to_string(),
    })
}

/// A subtype must work both as a type tag and as a file extension
fn is_usable_subtype(subtype: &str) -> bool {
    !subtype.is_empty()
        && !subtype.starts_with('.')
        && !subtype
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control())
}
