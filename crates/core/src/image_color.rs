//! Image preparation and mean-color sampling for Pantone matching.
//!
//! The uploaded image is center-cropped to a square and resized so that the
//! mean color reflects the garment rather than the background margins.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::CoreError;
use crate::pantone::Rgb;

/// Side length of the normalised square sample.
pub const SAMPLE_SIZE: u32 = 256;

/// A decoded, cropped and resized image ready for analysis.
pub struct ColorSample {
    image: DynamicImage,
}

impl ColorSample {
    /// Decode `bytes` (PNG, JPEG or WebP), center-crop and resize.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| CoreError::Validation(format!("Unsupported or corrupt image: {e}")))?;
        Ok(Self::from_image(decoded))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let side = width.min(height);
        let x = (width - side) / 2;
        let y = (height - side) / 2;
        let cropped = image.crop_imm(x, y, side, side);
        let resized = cropped.resize_exact(SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle);
        Self { image: resized }
    }

    /// Mean of each RGB channel, rounded to the nearest integer.
    pub fn mean_rgb(&self) -> Rgb {
        let rgb = self.image.to_rgb8();
        let mut sums = [0u64; 3];
        for pixel in rgb.pixels() {
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += u64::from(channel);
            }
        }
        let count = u64::from(rgb.width()) * u64::from(rgb.height());
        let mean = |sum: u64| ((sum + count / 2) / count.max(1)) as u8;
        Rgb::new(mean(sums[0]), mean(sums[1]), mean(sums[2]))
    }

    /// Encode the normalised sample as PNG for upload.
    pub fn to_png(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| CoreError::Internal(format!("Failed to encode PNG: {e}")))?;
        Ok(buf.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb as Pixel, RgbImage};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Pixel(color)))
    }

    #[test]
    fn solid_image_mean_is_its_color() {
        let sample = ColorSample::from_image(solid(40, 30, [15, 76, 129]));
        assert_eq!(sample.mean_rgb(), Rgb::new(15, 76, 129));
    }

    #[test]
    fn center_crop_discards_side_margins() {
        // 300x100: red center square, blue 100px bands on both sides.
        let mut img = RgbImage::from_pixel(300, 100, Pixel([0, 0, 255]));
        for x in 100..200 {
            for y in 0..100 {
                img.put_pixel(x, y, Pixel([255, 0, 0]));
            }
        }
        let sample = ColorSample::from_image(DynamicImage::ImageRgb8(img));
        assert_eq!(sample.mean_rgb(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn png_round_trip_decodes() {
        let sample = ColorSample::from_image(solid(10, 10, [1, 2, 3]));
        let png = sample.to_png().unwrap();
        let again = ColorSample::from_bytes(&png).unwrap();
        assert_eq!(again.mean_rgb(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn garbage_bytes_rejected() {
        assert!(ColorSample::from_bytes(b"not an image").is_err());
    }
}
