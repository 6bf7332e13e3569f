//! Image assets: dimension probing and alpha flattening

use crate::error::AssetError;
use image::{DynamicImage, GenericImageView, ImageBuffer};
use std::path::Path;

/// Pixel dimensions of an image without decoding it fully
pub fn probe(path: &Path) -> Result<(u32, u32), AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    image::image_dimensions(path).map_err(|e| AssetError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Width / height of an image, or `fallback` when it cannot be probed
pub fn aspect_ratio(path: &Path, fallback: f64) -> f64 {
    match probe(path) {
        Ok((width, height)) if width > 0 && height > 0 => f64::from(width) / f64::from(height),
        Ok(_) => {
            tracing::warn!(
                "Image {} has a zero dimension, using aspect ratio {}",
                path.display(),
                fallback
            );
            fallback
        }
        Err(e) => {
            tracing::warn!("{}, using aspect ratio {}", e, fallback);
            fallback
        }
    }
}

/// Load an image and composite any alpha channel onto white
pub fn load_flattened(path: &Path) -> Result<DynamicImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    let image = image::open(path).map_err(|e| AssetError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(flatten(image))
}

/// Drop the alpha channel, blending translucent pixels over a white background
pub fn flatten(image: DynamicImage) -> DynamicImage {
    if !image.color().has_alpha() {
        return DynamicImage::ImageRgb8(image.to_rgb8());
    }

    let (width, height) = image.dimensions();
    let rgba = image.to_rgba8();
    let flat = ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    });
    DynamicImage::ImageRgb8(flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_missing_image_uses_fallback() {
        let ratio = aspect_ratio(Path::new("/nonexistent/logo.png"), 3.0);
        assert_eq!(ratio, 3.0);
        assert!(matches!(
            probe(Path::new("/nonexistent/logo.png")),
            Err(AssetError::Missing(_))
        ));
    }

    #[test]
    fn test_probe_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        RgbaImage::from_pixel(60, 20, Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();

        assert_eq!(probe(&path).unwrap(), (60, 20));
        assert!((aspect_ratio(&path, 1.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_garbage_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(matches!(probe(&path), Err(AssetError::Unreadable { .. })));
        assert_eq!(aspect_ratio(&path, 2.0), 2.0);
    }

    #[test]
    fn test_flatten_blends_over_white() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));

        let flat = flatten(DynamicImage::ImageRgba8(img)).to_rgb8();
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [0, 0, 0]);
    }
}
