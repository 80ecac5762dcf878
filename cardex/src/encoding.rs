//! Image payload encoding.
//!
//! The whole upload is buffered and encoded as standard base64, then wrapped
//! in a `data:` URL for the inference request.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{CardexError, Result};

/// Media type used when the upload does not declare an image type.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// A base64-encoded image ready to be embedded in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime_type: String,
    base64: String,
}

impl ImagePayload {
    /// Encode raw image bytes.
    ///
    /// `mime_type` is kept only when it is an `image/*` type; anything else
    /// falls back to [`DEFAULT_MIME_TYPE`].
    pub fn encode(bytes: &[u8], mime_type: Option<&str>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CardexError::EmptyImage);
        }

        Ok(Self {
            mime_type: normalize_mime_type(mime_type),
            base64: STANDARD.encode(bytes),
        })
    }

    /// The media type placed in the data URL.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 text, without the data URL prefix.
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Render as `data:<mime>;base64,<payload>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    /// Decode the payload back into bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.base64)
            .map_err(|e| CardexError::Other(format!("invalid base64 payload: {}", e)))
    }
}

fn normalize_mime_type(mime_type: Option<&str>) -> String {
    match mime_type.map(str::trim) {
        Some(m)
            if m.len() > "image/".len()
                && m.get(..6).is_some_and(|p| p.eq_ignore_ascii_case("image/")) =>
        {
            m.to_ascii_lowercase()
        }
        _ => DEFAULT_MIME_TYPE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_returns_original_bytes() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4099).collect();
        let payload = ImagePayload::encode(&bytes, Some("image/png")).unwrap();
        assert_eq!(payload.decode().unwrap(), bytes);
    }

    #[test]
    fn data_url_has_prefix_and_padding() {
        let payload = ImagePayload::encode(b"ab", None).unwrap();
        assert_eq!(payload.base64(), "YWI=");
        assert_eq!(payload.data_url(), "data:image/jpeg;base64,YWI=");
    }

    #[test]
    fn non_image_mime_types_fall_back_to_jpeg() {
        let octet = ImagePayload::encode(b"x", Some("application/octet-stream")).unwrap();
        assert_eq!(octet.mime_type(), DEFAULT_MIME_TYPE);

        let bare = ImagePayload::encode(b"x", Some("image/")).unwrap();
        assert_eq!(bare.mime_type(), DEFAULT_MIME_TYPE);

        let png = ImagePayload::encode(b"x", Some("Image/PNG")).unwrap();
        assert_eq!(png.mime_type(), "image/png");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            ImagePayload::encode(&[], None),
            Err(CardexError::EmptyImage)
        ));
    }
}
