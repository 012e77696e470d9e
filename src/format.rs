//! Image format normalization and validation.
//!
//! The inference provider accepts a small closed set of image encodings; every
//! input file's extension is normalized to one of these tokens (or rejected)
//! before any remote call is made.

/// Image encoding accepted by the inference provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Look up a normalized extension token in the accepted set.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    /// Media type declared to the inference provider.
    pub fn media_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
        }
    }

    /// Canonical extension token.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
        }
    }
}

/// Normalize a file name's extension to a canonical token.
///
/// Takes the substring after the last `.`, lowercases it, and maps known
/// aliases (`jpg`) to their canonical form (`jpeg`). Returns an empty string
/// when the name has no separator. Does not validate acceptance; see
/// [`is_supported_extension`].
pub fn normalize_extension(file_name: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "jpg" => "jpeg".to_string(),
        _ => ext,
    }
}

/// Whether a normalized extension token is accepted by the provider.
///
/// Convenience form of [`ImageFormat::from_token`]; callers that also need
/// the format value (like the batch pipeline) validate through `from_token`
/// directly.
pub fn is_supported_extension(token: &str) -> bool {
    ImageFormat::from_token(token).is_some()
}
