//! Derived image variant generation.

use bytes::Bytes;
use image::ImageFormat;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;

/// Thumbnail edge length in pixels.
pub const THUMBNAIL_SIZE: u32 = 150;
/// Medium variant maximum width in pixels.
pub const MEDIUM_WIDTH: u32 = 600;

/// Decoded source image plus its basic metadata.
pub struct DecodedImage {
    /// The decoded pixels.
    pub image: image::DynamicImage,
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
    /// Source format name ("jpeg", "png", ...).
    pub format: String,
}

/// Decode an uploaded blob, rejecting non-image payloads.
pub fn decode(data: &[u8]) -> AppResult<DecodedImage> {
    let format = image::guess_format(data)
        .map_err(|_| AppError::validation("Uploaded file is not a recognized image"))?;

    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Failed to decode image", e))?;

    Ok(DecodedImage {
        width: img.width(),
        height: img.height(),
        format: format_name(format).to_string(),
        image: img,
    })
}

/// Produce a square thumbnail, center-cropped, encoded as JPEG.
pub fn thumbnail(img: &image::DynamicImage) -> AppResult<Bytes> {
    let thumb = img.resize_to_fill(
        THUMBNAIL_SIZE,
        THUMBNAIL_SIZE,
        image::imageops::FilterType::Lanczos3,
    );
    encode_jpeg(&thumb)
}

/// Produce a medium variant capped at [`MEDIUM_WIDTH`], encoded as JPEG.
///
/// Images already narrower than the cap are re-encoded unscaled.
pub fn medium(img: &image::DynamicImage) -> AppResult<Bytes> {
    let resized = if img.width() > MEDIUM_WIDTH {
        img.resize(MEDIUM_WIDTH, u32::MAX, image::imageops::FilterType::Lanczos3)
    } else {
        img.clone()
    };
    encode_jpeg(&resized)
}

fn encode_jpeg(img: &image::DynamicImage) -> AppResult<Bytes> {
    let mut buf = std::io::Cursor::new(Vec::new());
    img.to_rgb8()
        .write_to(&mut buf, ImageFormat::Jpeg)
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to encode variant", e))?;
    Ok(Bytes::from(buf.into_inner()))
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        ImageFormat::Bmp => "bmp",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_reports_dimensions() {
        let decoded = decode(&sample_png(800, 600)).unwrap();
        assert_eq!(decoded.width, 800);
        assert_eq!(decoded.height, 600);
        assert_eq!(decoded.format, "png");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode(b"definitely not an image").is_err());
    }

    #[test]
    fn test_thumbnail_is_square() {
        let decoded = decode(&sample_png(800, 600)).unwrap();
        let thumb_bytes = thumbnail(&decoded.image).unwrap();
        let thumb = image::load_from_memory(&thumb_bytes).unwrap();
        assert_eq!(thumb.width(), THUMBNAIL_SIZE);
        assert_eq!(thumb.height(), THUMBNAIL_SIZE);
    }

    #[test]
    fn test_medium_caps_width() {
        let decoded = decode(&sample_png(1200, 900)).unwrap();
        let medium_bytes = medium(&decoded.image).unwrap();
        let med = image::load_from_memory(&medium_bytes).unwrap();
        assert_eq!(med.width(), MEDIUM_WIDTH);
    }
}
