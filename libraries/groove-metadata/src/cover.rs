//! Embedded cover art as inline data URLs

use crate::error::{MetadataError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use groove_core::types::CoverRef;

/// Largest picture we will inline (5MB)
pub const MAX_COVER_SIZE: usize = 5 * 1024 * 1024;

/// Guess an image MIME type from its leading bytes
///
/// Unknown data is assumed to be JPEG, the common case for ID3 art.
pub fn sniff_mime(data: &[u8]) -> &'static str {
    match data {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'B', b'M', ..] => "image/bmp",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/jpeg",
    }
}

/// Encode picture bytes as a `data:` URL cover reference
pub fn cover_from_bytes(data: &[u8]) -> Result<CoverRef> {
    if data.len() > MAX_COVER_SIZE {
        return Err(MetadataError::CoverTooLarge {
            size: data.len(),
            max: MAX_COVER_SIZE,
        });
    }

    let url = format!("data:{};base64,{}", sniff_mime(data), STANDARD.encode(data));
    Ok(CoverRef::new(url))
}
