//! Image asset at the Image Provider boundary.
//!
//! The engine is handed an already-rasterized bitmap and only ever reads its
//! pixels and native dimensions. Format-specific preprocessing happens
//! upstream; a decode helper for plain raster bytes is provided for shells
//! that have them on hand.

use image::RgbaImage;
use thiserror::Error;

/// Errors when accepting an image from the provider.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Bytes could not be decoded as a raster image
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Image has a zero dimension and cannot be annotated
    #[error("Image '{image_id}' has empty dimensions {width}x{height}")]
    EmptyImage {
        /// The offending image's id
        image_id: String,
        /// Decoded width
        width: u32,
        /// Decoded height
        height: u32,
    },
}

/// A displayable raster plus the identity the segmentation service knows it by.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    image_id: String,
    pixels: RgbaImage,
}

impl ImageAsset {
    /// Wrap an already-decoded raster.
    pub fn from_rgba(image_id: impl Into<String>, pixels: RgbaImage) -> Result<Self, AssetError> {
        let image_id = image_id.into();
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyImage {
                image_id,
                width,
                height,
            });
        }

        log::debug!("Image asset '{}' accepted at {}x{}", image_id, width, height);
        Ok(Self { image_id, pixels })
    }

    /// Decode raster bytes (PNG, JPEG, ...) into an asset.
    pub fn from_bytes(image_id: impl Into<String>, bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes)?;
        Self::from_rgba(image_id, decoded.to_rgba8())
    }

    /// The id the segmentation service and export payloads refer to.
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    /// Native pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Native width in pixels.
    pub fn width(&self) -> f32 {
        self.pixels.width() as f32
    }

    /// Native height in pixels.
    pub fn height(&self) -> f32 {
        self.pixels.height() as f32
    }

    /// The raster to draw.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba() {
        let asset =
            ImageAsset::from_rgba("img1", RgbaImage::new(64, 32)).expect("asset");
        assert_eq!(asset.image_id(), "img1");
        assert_eq!(asset.dimensions(), (64, 32));
        assert_eq!(asset.width(), 64.0);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let result = ImageAsset::from_rgba("img1", RgbaImage::new(0, 32));
        assert!(matches!(result, Err(AssetError::EmptyImage { width: 0, .. })));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = ImageAsset::from_bytes("img1", b"not an image");
        assert!(matches!(result, Err(AssetError::Decode(_))));
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        let mut bytes: Vec<u8> = Vec::new();
        let image = RgbaImage::new(4, 4);
        image
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .expect("encode");

        let asset = ImageAsset::from_bytes("img1", &bytes).expect("asset");
        assert_eq!(asset.dimensions(), (4, 4));
    }
}
