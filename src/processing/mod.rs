pub mod exposure;
pub mod image;
pub mod ocr;
pub mod region;
pub mod sanitizer;

pub use exposure::ExposureEstimator;
pub use self::image::ImageProcessor;
pub use ocr::{MrzParser, TextRecognizer, TextRegionDetector};
pub use region::{CutoutLayout, MrzBandLocator, RegionMapper};
pub use sanitizer::LineSanitizer;
