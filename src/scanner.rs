use image::{DynamicImage, GenericImageView};
use log::{debug, info};

use crate::models::{CropRegion, Orientation, QuickResult, Rect, SanitizedLines, ScannerConfig};
use crate::processing::{
    ImageProcessor, LineSanitizer, MrzBandLocator, MrzParser, RegionMapper, TextRecognizer,
    TextRegionDetector,
};
use crate::validation::QuickMrzParser;

/// One captured camera frame plus the overlay state it was captured under.
pub struct Frame {
    pub image: DynamicImage,
    pub orientation: Orientation,
    /// Cutout already converted to normalized capture coordinates.
    pub cutout: Rect,
}

/// Per-session "result already delivered" latch.
///
/// Owned by the caller so the scanner itself stays stateless and can be
/// shared between frames.
#[derive(Debug, Default)]
pub struct ScanSession {
    delivered: bool,
}

impl ScanSession {
    pub fn new() -> Self {
        ScanSession::default()
    }

    pub fn is_finished(&self) -> bool {
        self.delivered
    }

    pub fn reset(&mut self) {
        self.delivered = false;
    }
}

/// Per-frame MRZ pipeline: crop, optional enhancement, OCR, sanitizing and
/// the quick TD3 parse.
pub struct MrzScanner<R: TextRecognizer> {
    config: ScannerConfig,
    recognizer: R,
    detector: Option<Box<dyn TextRegionDetector>>,
}

impl<R: TextRecognizer> MrzScanner<R> {
    pub fn new(recognizer: R, config: ScannerConfig) -> Self {
        MrzScanner {
            config,
            recognizer,
            detector: None,
        }
    }

    /// Narrow the OCR input to the MRZ band found by `detector`.
    pub fn with_detector<D: TextRegionDetector + 'static>(mut self, detector: D) -> Self {
        self.detector = Some(Box::new(detector));
        self
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Pixel region of the frame under the cutout, enlarged when configured.
    pub fn cutout_region(&self, frame: &Frame) -> CropRegion {
        let (width, height) = frame.image.dimensions();
        let region = RegionMapper::map_cutout_to_image(&frame.cutout, frame.orientation, width, height);

        match self.config.enlarge_margin {
            Some(margin) => RegionMapper::enlarge(&region, margin),
            None => region,
        }
    }

    /// The document part of the frame; the whole frame if the cutout misses it.
    pub fn document_image(&self, frame: &Frame) -> DynamicImage {
        let region = self.cutout_region(frame);
        ImageProcessor::crop(&frame.image, &region).unwrap_or_else(|| {
            debug!("Cutout crop failed, using the full frame");
            frame.image.clone()
        })
    }

    /// Image handed to the recognizer, or `None` when the frame should be skipped.
    pub fn ocr_input(&self, frame: &Frame) -> Option<DynamicImage> {
        let document = self.document_image(frame);

        let target = match &self.detector {
            Some(detector) => {
                let boxes = detector.detect(&document);
                let (width, height) = document.dimensions();
                let band = MrzBandLocator::locate(
                    &boxes,
                    width,
                    height,
                    self.config.mrz_band_min_width_ratio,
                )?;
                ImageProcessor::crop(&document, &band)?
            }
            None => document,
        };

        if self.config.preprocess {
            let (enhanced, _) = ImageProcessor::preprocess(&target, self.config.upscale_factor);
            Some(enhanced)
        } else {
            Some(target)
        }
    }

    /// OCR output of the frame reduced to plausible MRZ lines.
    pub fn recognize_lines(&self, frame: &Frame) -> Option<SanitizedLines> {
        let image = self.ocr_input(frame)?;
        let raw = self.recognizer.recognize(&image);
        if raw.is_empty() {
            debug!("Recognizer returned no text");
        }
        LineSanitizer::sanitize_lines(&raw)
    }

    /// Runs the quick path on one frame.
    ///
    /// Returns a result at most once per session; later frames yield `None`
    /// until the session is reset.
    pub fn scan_frame(&self, session: &mut ScanSession, frame: &Frame) -> Option<QuickResult> {
        if session.is_finished() {
            return None;
        }

        let lines = self.recognize_lines(frame)?;
        let result = QuickMrzParser::find(lines.lines())?;

        session.delivered = true;
        info!("MRZ found for passport {}", result.passport_number());
        Some(result)
    }

    /// Runs the full-grammar path on one frame with an external parser.
    pub fn parse_frame_with<P: MrzParser>(&self, frame: &Frame, parser: &P) -> Option<P::Output> {
        let lines = self.recognize_lines(frame)?;
        parser.parse(&lines)
    }
}
