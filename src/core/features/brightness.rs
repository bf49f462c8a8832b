//! Average brightness via an area-average downsample.
//!
//! Uses fast_image_resize with a box filter to reduce the whole image to a
//! single pixel, then averages its normalized RGB channels.
//! Alpha is premultiplied before the downsample.

use crate::error::FeatureError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::DynamicImage;
use tracing::debug;

/// Brightness reported when the downsample cannot be computed
pub const FALLBACK_BRIGHTNESS: f64 = 0.5;

/// Reduce the full image extent to one RGB pixel.
///
/// Colors are premultiplied by alpha first, so transparent regions count
/// as dark.
pub fn area_average(image: &DynamicImage) -> Result<[u8; 3], FeatureError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(FeatureError::DegenerateImage { width, height });
    }

    let src_image = Image::from_vec_u8(width, height, premultiplied_rgb(image), PixelType::U8x3)
        .map_err(|e| FeatureError::DownsampleFailed(format!("source buffer: {}", e)))?;

    let mut dst_image = Image::new(1, 1, PixelType::U8x3);
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box));

    Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| FeatureError::DownsampleFailed(e.to_string()))?;

    match dst_image.buffer() {
        [r, g, b, ..] => Ok([*r, *g, *b]),
        _ => Err(FeatureError::DownsampleFailed(
            "destination pixel is missing channels".to_string(),
        )),
    }
}

/// Packed RGB bytes with each channel scaled by the pixel's alpha
fn premultiplied_rgb(image: &DynamicImage) -> Vec<u8> {
    if !image.color().has_alpha() {
        return image.to_rgb8().into_raw();
    }

    image
        .to_rgba8()
        .pixels()
        .flat_map(|p| {
            let [r, g, b, a] = p.0;
            let scale = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
            [scale(r), scale(g), scale(b)]
        })
        .collect()
}

/// Mean of the normalized R, G and B channels of the area average, in [0, 1].
///
/// Never fails: any downsample error yields [`FALLBACK_BRIGHTNESS`].
pub fn average_brightness(image: &DynamicImage) -> f64 {
    match area_average(image) {
        Ok([r, g, b]) => {
            let sum = r as f64 / 255.0 + g as f64 / 255.0 + b as f64 / 255.0;
            (sum / 3.0).clamp(0.0, 1.0)
        }
        Err(e) => {
            debug!(error = %e, "brightness unavailable, using fallback");
            FALLBACK_BRIGHTNESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn uniform(width: u32, height: u32, pixel: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb(pixel)))
    }

    #[test]
    fn white_image_is_fully_bright() {
        let brightness = average_brightness(&uniform(40, 30, [255, 255, 255]));
        assert!((brightness - 1.0).abs() < 1e-6, "got {}", brightness);
    }

    #[test]
    fn black_image_is_dark() {
        let brightness = average_brightness(&uniform(40, 30, [0, 0, 0]));
        assert!(brightness.abs() < 1e-6, "got {}", brightness);
    }

    #[test]
    fn averages_channels() {
        // (255 + 0 + 51) / 3 / 255 = 0.4
        let brightness = average_brightness(&uniform(16, 16, [255, 0, 51]));
        assert!((brightness - 0.4).abs() < 0.01, "got {}", brightness);
    }

    #[test]
    fn averages_over_whole_extent() {
        let image = ImageBuffer::from_fn(100, 50, |x, _| {
            if x < 50 {
                Rgb([0u8, 0, 0])
            } else {
                Rgb([255u8, 255, 255])
            }
        });
        let brightness = average_brightness(&DynamicImage::ImageRgb8(image));
        assert!((brightness - 0.5).abs() < 0.03, "got {}", brightness);
    }

    #[test]
    fn handles_alpha_images() {
        let image = ImageBuffer::from_pixel(8, 8, Rgba([204u8, 204, 204, 255]));
        let brightness = average_brightness(&DynamicImage::ImageRgba8(image));
        assert!((brightness - 0.8).abs() < 0.01, "got {}", brightness);
    }

    #[test]
    fn transparent_regions_count_as_dark() {
        let clear = ImageBuffer::from_pixel(8, 8, Rgba([255u8, 255, 255, 0]));
        assert!(average_brightness(&DynamicImage::ImageRgba8(clear)) < 1e-6);

        let half = ImageBuffer::from_pixel(8, 8, Rgba([255u8, 255, 255, 128]));
        let brightness = average_brightness(&DynamicImage::ImageRgba8(half));
        assert!((brightness - 0.5).abs() < 0.01, "got {}", brightness);
    }

    #[test]
    fn zero_area_image_falls_back() {
        let image = DynamicImage::new_rgb8(0, 0);
        assert_eq!(average_brightness(&image), FALLBACK_BRIGHTNESS);
        assert!(matches!(
            area_average(&image),
            Err(FeatureError::DegenerateImage { .. })
        ));
    }
}
