//! Image metadata via the `image` crate.
//!
//! Only the header is decoded: dimensions, container format and color type.

use std::path::Path;

use ::image::{ColorType, ImageDecoder, ImageFormat, ImageReader, ImageResult};
use tracing::warn;

use crate::domain::ImageMeta;

/// Read image header properties; any failure yields empty metadata
pub fn read_image(path: &Path) -> ImageMeta {
    match try_read_image(path) {
        Ok(meta) => meta,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "image metadata unavailable");
            ImageMeta::default()
        }
    }
}

fn try_read_image(path: &Path) -> ImageResult<ImageMeta> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format().map(format_name);
    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();

    Ok(ImageMeta {
        width: Some(width),
        height: Some(height),
        format,
        color_mode: Some(color_mode(decoder.color_type())),
    })
}

/// Upper-case format name, e.g. `JPEG`, `PNG`, `WEBP`
fn format_name(format: ImageFormat) -> String {
    format!("{:?}", format).to_uppercase()
}

/// Short pixel layout name for a decoder color type
fn color_mode(color: ColorType) -> String {
    match color {
        ColorType::L8 => "L".to_string(),
        ColorType::La8 => "LA".to_string(),
        ColorType::Rgb8 => "RGB".to_string(),
        ColorType::Rgba8 => "RGBA".to_string(),
        ColorType::L16 => "I;16".to_string(),
        ColorType::La16 => "LA;16".to_string(),
        ColorType::Rgb16 => "RGB;16".to_string(),
        ColorType::Rgba16 => "RGBA;16".to_string(),
        ColorType::Rgb32F => "RGB;F".to_string(),
        ColorType::Rgba32F => "RGBA;F".to_string(),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{GrayImage, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn test_reads_png_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("swatch.png");
        RgbImage::new(7, 5).save(&path).unwrap();

        let meta = read_image(&path);
        assert_eq!(meta.width, Some(7));
        assert_eq!(meta.height, Some(5));
        assert_eq!(meta.format.as_deref(), Some("PNG"));
        assert_eq!(meta.color_mode.as_deref(), Some("RGB"));
    }

    #[test]
    fn test_format_guessed_from_content_not_extension() {
        let dir = TempDir::new().unwrap();
        let png = dir.path().join("gray.png");
        GrayImage::new(3, 3).save(&png).unwrap();
        let misnamed = dir.path().join("gray.jpg");
        std::fs::rename(&png, &misnamed).unwrap();

        let meta = read_image(&misnamed);
        assert_eq!(meta.format.as_deref(), Some("PNG"));
        assert_eq!(meta.color_mode.as_deref(), Some("L"));
    }

    #[test]
    fn test_corrupt_image_degrades_to_empty_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert_eq!(read_image(&path), ImageMeta::default());
    }
}
