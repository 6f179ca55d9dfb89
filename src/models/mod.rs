pub mod config;
pub mod data;
pub mod geometry;

pub use config::{CutoutConfig, ScannerConfig};
pub use data::{ExposureParams, QuickResult, SanitizedLines, TD3_LINE_LENGTH};
pub use geometry::{CropRegion, Orientation, Rect};
