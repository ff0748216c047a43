//! Image decoding for layer admission and compositing.
//!
//! This module provides functionality for:
//! - Extracting the payload of a base64 data URI
//! - Probing natural dimensions without a full decode
//! - Decoding to an RGB [`Raster`]
//! - Resizing and cropping rasters
//!
//! # Architecture
//!
//! Everything here is synchronous and single-threaded; the browser side does
//! the asynchronous file reading and hands over complete byte buffers.

mod resize;
mod types;

use std::io::Cursor;

use base64::Engine;
use image::ImageReader;

pub use resize::{crop_region, resize};
pub use types::{DecodeError, FilterType, Raster};

const BASE64_MARKER: &str = "base64,";

/// Return the base64 payload of a data URI (everything after `base64,`).
pub fn data_uri_payload(uri: &str) -> Result<&str, DecodeError> {
    uri.find(BASE64_MARKER)
        .map(|index| &uri[index + BASE64_MARKER.len()..])
        .ok_or(DecodeError::NotDataUri)
}

/// Decode the bytes carried by a base64 data URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, DecodeError> {
    let payload = data_uri_payload(uri)?;
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

/// Read the natural pixel dimensions of an encoded image.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .into_dimensions()
        .map_err(|_| DecodeError::InvalidFormat)
}

/// Decode an encoded image (JPEG or PNG) into an RGB raster.
pub fn decode_raster(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .decode()
        .map_err(|_| DecodeError::InvalidFormat)?;
    Ok(Raster::from_rgb_image(img.into_rgb8()))
}


#[cfg(test)]
mod tests {
    use super::test_support::{png_bytes, png_data_uri};
    use super::*;

    #[test]
    fn test_data_uri_payload() {
        assert_eq!(data_uri_payload("data:image/png;base64,AAAA").unwrap(), "AAAA");
        assert!(matches!(
            data_uri_payload("https://example.com/a.png"),
            Err(DecodeError::NotDataUri)
        ));
    }

    #[test]
    fn test_decode_data_uri_invalid_base64() {
        let result = decode_data_uri("data:image/png;base64,@@@@");
        assert!(matches!(result, Err(DecodeError::InvalidBase64(_))));
    }

    #[test]
    fn test_probe_dimensions() {
        let bytes = png_bytes(7, 3, [10, 20, 30]);
        assert_eq!(probe_dimensions(&bytes).unwrap(), (7, 3));
    }

    #[test]
    fn test_probe_garbage() {
        assert!(probe_dimensions(b"not an image").is_err());
    }

    #[test]
    fn test_decode_raster() {
        let bytes = png_bytes(4, 2, [10, 20, 30]);
        let raster = decode_raster(&bytes).unwrap();
        assert_eq!((raster.width, raster.height), (4, 2));
        assert_eq!(raster.pixel(3, 1), Some([10, 20, 30]));
    }

    #[test]
    fn test_data_uri_round_trip() {
        let bytes = decode_data_uri(&png_data_uri(5, 6)).unwrap();
        assert_eq!(probe_dimensions(&bytes).unwrap(), (5, 6));
    }
}
