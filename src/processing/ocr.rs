use image::DynamicImage;

use crate::models::{Rect, SanitizedLines};

/// OCR engine boundary.
///
/// Returns one string per recognized line, top to bottom. An engine failure
/// is reported as an empty vector.
pub trait TextRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Vec<String>;
}

impl<F> TextRecognizer for F
where
    F: Fn(&DynamicImage) -> Vec<String>,
{
    fn recognize(&self, image: &DynamicImage) -> Vec<String> {
        self(image)
    }
}

/// Text rectangle detection boundary.
///
/// Boxes are normalized to the image size with a bottom-left origin.
pub trait TextRegionDetector {
    fn detect(&self, image: &DynamicImage) -> Vec<Rect>;
}

impl<F> TextRegionDetector for F
where
    F: Fn(&DynamicImage) -> Vec<Rect>,
{
    fn detect(&self, image: &DynamicImage) -> Vec<Rect> {
        self(image)
    }
}

/// Full MRZ grammar parser boundary, the slow path next to the quick parser.
pub trait MrzParser {
    type Output;

    fn parse(&self, lines: &SanitizedLines) -> Option<Self::Output>;
}
