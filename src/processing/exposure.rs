use crate::models::ExposureParams;

/// Exposure applied when the frame is neither too bright nor too dark.
pub const BASELINE_EXPOSURE: f64 = 0.5;

const BRIGHT_LUMINANCE: f64 = 0.8;
const DARK_LUMINANCE: f64 = 0.35;

/// Derives enhancement parameters from a frame's average luminance.
pub struct ExposureEstimator;

impl ExposureEstimator {
    /// `average_luminance` is expected in [0, 1]; values outside are clamped.
    pub fn estimate(average_luminance: f64) -> ExposureParams {
        let luminance = if average_luminance.is_nan() {
            0.0
        } else {
            average_luminance.clamp(0.0, 1.0)
        };

        // Document backgrounds dominate the average, so the threshold is
        // pushed towards white unless the frame is very dark.
        let threshold = 1.0 - (1.0 - luminance).powf(0.2);

        let mut exposure = BASELINE_EXPOSURE;
        if luminance > BRIGHT_LUMINANCE {
            exposure -= (luminance - 0.5) * 2.0;
        }
        if luminance < DARK_LUMINANCE {
            exposure += 2f64.powf(0.5 - luminance);
        }

        ExposureParams {
            exposure_adjustment: exposure,
            binarization_threshold: threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_bright_frame() {
        let params = ExposureEstimator::estimate(0.9);
        assert_close(params.binarization_threshold, 0.369);
        assert_close(params.exposure_adjustment, -0.3);
    }

    #[test]
    fn test_dark_frame() {
        let params = ExposureEstimator::estimate(0.1);
        // 0.5 + 2^0.4
        assert_close(params.exposure_adjustment, 0.5 + 1.3195);
        assert_close(params.binarization_threshold, 1.0 - 0.9f64.powf(0.2));
    }

    #[test]
    fn test_mid_range_keeps_baseline() {
        for luminance in [0.35, 0.5, 0.8] {
            let params = ExposureEstimator::estimate(luminance);
            assert_eq!(params.exposure_adjustment, BASELINE_EXPOSURE);
        }
    }

    #[test]
    fn test_threshold_bounds() {
        assert_eq!(ExposureEstimator::estimate(0.0).binarization_threshold, 0.0);
        assert_eq!(ExposureEstimator::estimate(1.0).binarization_threshold, 1.0);
        let mut previous = -1.0;
        for step in 0..=20 {
            let threshold = ExposureEstimator::estimate(step as f64 / 20.0).binarization_threshold;
            assert!((0.0..=1.0).contains(&threshold));
            assert!(threshold >= previous);
            previous = threshold;
        }
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(ExposureEstimator::estimate(1.7), ExposureEstimator::estimate(1.0));
        assert_eq!(ExposureEstimator::estimate(-0.2), ExposureEstimator::estimate(0.0));
    }
}
