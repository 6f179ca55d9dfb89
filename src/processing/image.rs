use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use imageproc::contrast::threshold;
use imageproc::map::map_colors;
use log::{debug, warn};

use crate::models::{CropRegion, ExposureParams};
use crate::processing::exposure::ExposureEstimator;
use crate::utils::ScanError;

/// Pixel-level operations of the scanning pipeline: cropping and the
/// exposure/binarization enhancement that precedes OCR.
pub struct ImageProcessor;

impl ImageProcessor {
    pub fn open(image_path: &Path) -> Result<DynamicImage, ScanError> {
        image::open(image_path).map_err(|e| {
            ScanError::ImageProcessingError(format!("Failed to open image {:?}: {}", image_path, e))
        })
    }

    pub fn save(image: &DynamicImage, image_path: &Path) -> Result<(), ScanError> {
        image.save(image_path).map_err(|e| {
            ScanError::ImageProcessingError(format!("Failed to save image {:?}: {}", image_path, e))
        })
    }

    /// Mean luma of the image in [0, 1]. Empty images count as black.
    pub fn average_luminance(image: &DynamicImage) -> f64 {
        let gray = image.to_luma8();
        let pixel_count = gray.width() as u64 * gray.height() as u64;
        if pixel_count == 0 {
            return 0.0;
        }

        let sum: u64 = gray.pixels().map(|p| p[0] as u64).sum();
        sum as f64 / pixel_count as f64 / 255.0
    }

    /// Crops `region` out of `image` after clamping it to the image bounds.
    /// `None` when the region does not overlap the image.
    pub fn crop(image: &DynamicImage, region: &CropRegion) -> Option<DynamicImage> {
        let clamped = match region.clamp_to(image.width(), image.height()) {
            Some(clamped) => clamped,
            None => {
                warn!(
                    "Crop region {:?} lies outside the {}x{} image",
                    region,
                    image.width(),
                    image.height()
                );
                return None;
            }
        };

        let (x, y, width, height) = clamped.to_pixels();
        Some(image.crop_imm(x, y, width, height))
    }

    /// Exposure adjustment, upscaling and binarization with the given parameters.
    /// The resize is skipped when `upscale` would overflow the target size.
    pub fn enhance(image: &DynamicImage, params: &ExposureParams, upscale: u32) -> GrayImage {
        let gain = 2f64.powf(params.exposure_adjustment);
        let exposed = map_colors(&image.to_luma8(), |p: Luma<u8>| {
            Luma([(p[0] as f64 * gain).round().clamp(0.0, 255.0) as u8])
        });

        let target = exposed
            .width()
            .checked_mul(upscale)
            .zip(exposed.height().checked_mul(upscale));
        let scaled = match target {
            Some((width, height)) if upscale > 1 => {
                imageops::resize(&exposed, width, height, FilterType::Lanczos3)
            }
            Some(_) => exposed,
            None => {
                warn!("Upscale factor {} overflows the image size, skipping resize", upscale);
                exposed
            }
        };

        let cutoff = (params.binarization_threshold.clamp(0.0, 1.0) * 255.0).round() as u8;
        threshold(&scaled, cutoff)
    }

    /// Estimates parameters from the image itself and applies them.
    pub fn preprocess(image: &DynamicImage, upscale: u32) -> (DynamicImage, ExposureParams) {
        let luminance = Self::average_luminance(image);
        let params = ExposureEstimator::estimate(luminance);
        debug!(
            "Average luminance {:.3}: exposure {:.3}, threshold {:.3}",
            luminance, params.exposure_adjustment, params.binarization_threshold
        );

        let enhanced = Self::enhance(image, &params, upscale);
        (DynamicImage::ImageLuma8(enhanced), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    #[test]
    fn test_average_luminance() {
        assert_eq!(ImageProcessor::average_luminance(&gray(4, 4, 0)), 0.0);
        assert_eq!(ImageProcessor::average_luminance(&gray(4, 4, 255)), 1.0);

        let mut half = GrayImage::from_pixel(2, 1, Luma([0]));
        half.put_pixel(1, 0, Luma([255]));
        let luminance = ImageProcessor::average_luminance(&DynamicImage::ImageLuma8(half));
        assert!((luminance - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_crop_inside() {
        let cropped = ImageProcessor::crop(&gray(100, 50, 10), &CropRegion::new(10.0, 5.0, 20.0, 10.0)).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (20, 10));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let cropped = ImageProcessor::crop(&gray(100, 50, 10), &CropRegion::new(-10.0, 40.0, 200.0, 30.0)).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (100, 10));
    }

    #[test]
    fn test_crop_outside_is_none() {
        assert!(ImageProcessor::crop(&gray(100, 50, 10), &CropRegion::new(150.0, 0.0, 20.0, 10.0)).is_none());
    }

    #[test]
    fn test_enhance_upscales_and_binarizes() {
        let mut img = GrayImage::from_pixel(8, 4, Luma([230]));
        for x in 0..8 {
            img.put_pixel(x, 0, Luma([20]));
        }
        let params = ExposureParams {
            exposure_adjustment: 0.0,
            binarization_threshold: 0.5,
        };
        let enhanced = ImageProcessor::enhance(&DynamicImage::ImageLuma8(img), &params, 2);
        assert_eq!(enhanced.dimensions(), (16, 8));
        assert!(enhanced.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert_eq!(enhanced.get_pixel(8, 7)[0], 255);
        assert_eq!(enhanced.get_pixel(8, 0)[0], 0);
    }

    #[test]
    fn test_enhance_skips_overflowing_upscale() {
        let params = ExposureParams {
            exposure_adjustment: 0.0,
            binarization_threshold: 0.5,
        };
        let enhanced = ImageProcessor::enhance(&gray(1920, 2, 200), &params, 3_000_000);
        assert_eq!(enhanced.dimensions(), (1920, 2));
        assert!(enhanced.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_exposure_brightens() {
        let params = ExposureParams {
            exposure_adjustment: 1.0,
            binarization_threshold: 0.5,
        };
        // 100 * 2 = 200 > 127
        let enhanced = ImageProcessor::enhance(&gray(4, 4, 100), &params, 1);
        assert!(enhanced.pixels().all(|p| p[0] == 255));

        let params = ExposureParams {
            exposure_adjustment: -1.0,
            binarization_threshold: 0.5,
        };
        let enhanced = ImageProcessor::enhance(&gray(4, 4, 200), &params, 1);
        assert!(enhanced.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_preprocess_reports_params() {
        let (processed, params) = ImageProcessor::preprocess(&gray(10, 10, 240), 2);
        assert_eq!((processed.width(), processed.height()), (20, 20));
        assert!(params.exposure_adjustment < 0.5);
    }

    #[test]
    fn test_save_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        ImageProcessor::save(&gray(6, 3, 128), &path).unwrap();
        let reopened = ImageProcessor::open(&path).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (6, 3));
        assert!(ImageProcessor::open(&dir.path().join("missing.png")).is_err());
    }
}
