//! Inline screenshot payload handling.
//!
//! Clients may send the `image` field either as a plain URL (stored verbatim)
//! or as a data-URL of the form `data:image/<ext>;base64,<payload>`. The
//! latter is decoded here and persisted through the screenshot store port,
//! after which the stored URL replaces the raw payload.

use base64::Engine as _;

/// Prefix identifying an inline image payload.
const DATA_URL_PREFIX: &str = "data:image/";

/// A decoded data-URL image ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrlImage {
    /// File extension taken from the media type (`png`, `jpeg`, ...).
    pub extension: String,
    /// Decoded image bytes.
    pub bytes: Vec<u8>,
}

impl DataUrlImage {
    /// Parse a `data:image/<ext>;base64,<payload>` string.
    ///
    /// Returns `None` for anything that does not match the shape, including
    /// plain URLs and malformed data-URLs; malformed inputs deliberately fall
    /// through so the caller stores the original string unchanged.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::screenshot::DataUrlImage;
    ///
    /// let image = DataUrlImage::parse("data:image/png;base64,AAAA").expect("valid data-URL");
    /// assert_eq!(image.extension, "png");
    /// assert_eq!(image.bytes.len(), 3);
    ///
    /// assert!(DataUrlImage::parse("/screenshots/123.png").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let rest = value.strip_prefix(DATA_URL_PREFIX)?;
        let (extension, payload) = rest.split_once(";base64,")?;
        if extension.is_empty()
            || payload.is_empty()
            || !extension
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return None;
        }
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload).ok()?;
        Some(Self {
            extension: extension.to_owned(),
            bytes,
        })
    }
}
