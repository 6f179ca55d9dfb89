use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::ScanError;

/// Largest accepted resampling factor of the enhancement step.
pub const MAX_UPSCALE_FACTOR: u32 = 8;

/// Geometry of the on-screen cutout the document has to be aligned with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutoutConfig {
    /// Width / height of the cutout. 125mm × 22mm covers the MRZ band of an ID-3 page.
    pub frame_ratio: f64,
    /// Share of the view width covered by the cutout.
    pub width_fraction: f64,
    /// Share of the free vertical space placed above the cutout.
    pub top_offset_ratio: f64,
}

impl Default for CutoutConfig {
    fn default() -> Self {
        CutoutConfig {
            frame_ratio: 125.0 / 22.0,
            width_fraction: 0.9,
            top_offset_ratio: 0.4,
        }
    }
}

/// Tunables of the per-frame scanning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Run exposure correction and binarization before OCR.
    pub preprocess: bool,
    /// Grow the cutout crop by this fraction of its height on every side.
    pub enlarge_margin: Option<f64>,
    /// Text boxes narrower than this share of the document width are not MRZ lines.
    pub mrz_band_min_width_ratio: f64,
    /// Resampling factor applied while preprocessing.
    pub upscale_factor: u32,
    pub cutout: CutoutConfig,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            preprocess: false,
            enlarge_margin: None,
            mrz_band_min_width_ratio: 0.8,
            upscale_factor: 2,
            cutout: CutoutConfig::default(),
        }
    }
}

impl ScannerConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config: ScannerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        log::debug!("Loaded scanner config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if let Some(margin) = self.enlarge_margin {
            if !margin.is_finite() || margin < 0.0 {
                return Err(ScanError::ConfigError(format!(
                    "enlarge_margin must be a non-negative number, got {}",
                    margin
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.mrz_band_min_width_ratio) {
            return Err(ScanError::ConfigError(format!(
                "mrz_band_min_width_ratio must lie in [0, 1], got {}",
                self.mrz_band_min_width_ratio
            )));
        }

        if self.upscale_factor == 0 || self.upscale_factor > MAX_UPSCALE_FACTOR {
            return Err(ScanError::ConfigError(format!(
                "upscale_factor must lie in [1, {}], got {}",
                MAX_UPSCALE_FACTOR, self.upscale_factor
            )));
        }

        let cutout = &self.cutout;
        if cutout.frame_ratio <= 0.0 || cutout.width_fraction <= 0.0 || cutout.width_fraction > 1.0 {
            return Err(ScanError::ConfigError(
                "cutout frame_ratio must be positive and width_fraction in (0, 1]".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&cutout.top_offset_ratio) {
            return Err(ScanError::ConfigError(format!(
                "cutout top_offset_ratio must lie in [0, 1], got {}",
                cutout.top_offset_ratio
            )));
        }

        Ok(())
    }
}
