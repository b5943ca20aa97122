//! Image decoding for uploaded decal files

use std::io::Cursor;
use std::path::Path;

use image::RgbaImage;

use super::{Texture, TextureError};

/// Decode an uploaded image (format detected from its contents)
pub fn decode_image(bytes: &[u8]) -> Result<Texture, TextureError> {
    let image = image::load_from_memory(bytes).map_err(|e| TextureError::Decode(e.to_string()))?;
    Texture::from_raster(image.to_rgba8())
}

/// Read and decode an image file
pub fn decode_file(path: impl AsRef<Path>) -> Result<Texture, TextureError> {
    let bytes = std::fs::read(path.as_ref()).map_err(|e| TextureError::Io(e.to_string()))?;
    decode_image(&bytes)
}

/// Encode a raster as PNG bytes
pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, TextureError> {
    let mut bytes = Vec::new();
    raster
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| TextureError::Encode(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png_keeps_native_aspect() {
        let raster = RgbaImage::from_pixel(64, 16, image::Rgba([255, 0, 0, 255]));
        let bytes = encode_png(&raster).unwrap();

        let texture = decode_image(&bytes).unwrap();
        assert_eq!(texture.width(), 64);
        assert_eq!(texture.height(), 16);
        assert_eq!(texture.aspect_ratio(), 4.0);
        assert_eq!(texture.raster().get_pixel(3, 3).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(TextureError::Decode(_))));
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_file("/nonexistent/logo.png");
        assert!(matches!(result, Err(TextureError::Io(_))));
    }
}
