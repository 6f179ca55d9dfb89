use log::debug;

use crate::models::{CropRegion, CutoutConfig, Orientation, Rect};

/// Maps the normalized cutout rectangle into the pixel space of a captured frame.
pub struct RegionMapper;

impl RegionMapper {
    /// `cutout` must already be normalized through the preview layer's
    /// metadata transform. Sensor buffers are always landscape, so portrait
    /// orientations swap the axes.
    pub fn map_cutout_to_image(
        cutout: &Rect,
        orientation: Orientation,
        image_width: u32,
        image_height: u32,
    ) -> CropRegion {
        let width = image_width as f64;
        let height = image_height as f64;

        match orientation {
            Orientation::Portrait | Orientation::PortraitUpsideDown => CropRegion::new(
                cutout.min_y() * width,
                cutout.min_x() * height,
                cutout.height * width,
                cutout.width * height,
            ),
            Orientation::LandscapeLeft | Orientation::LandscapeRight => CropRegion::new(
                cutout.min_x() * width,
                cutout.min_y() * height,
                cutout.width * width,
                cutout.height * height,
            ),
        }
    }

    /// Grows `region` by `margin_fraction` of its height on every side.
    pub fn enlarge(region: &CropRegion, margin_fraction: f64) -> CropRegion {
        let margin = margin_fraction * region.height;
        CropRegion::new(
            region.x - margin,
            region.y - margin,
            region.width + margin * 2.0,
            region.height + margin * 2.0,
        )
    }
}

/// Placement of the document cutout inside the preview view.
pub struct CutoutLayout;

impl CutoutLayout {
    pub fn cutout_rect(config: &CutoutConfig, view_width: f64, view_height: f64) -> Rect {
        let width = view_width * config.width_fraction;
        let height = width / config.frame_ratio;

        let top_offset = (view_height - height) * config.top_offset_ratio;
        let left_offset = (view_width - width) / 2.0;

        Rect::new(left_offset, top_offset, width, height)
    }

    /// Cutout centre as a fraction of the view; the camera focuses there.
    pub fn relative_center(config: &CutoutConfig, view_width: f64, view_height: f64) -> (f64, f64) {
        if view_width <= 0.0 || view_height <= 0.0 {
            return (0.5, 0.5);
        }

        let cutout = Self::cutout_rect(config, view_width, view_height);
        (cutout.mid_x() / view_width, cutout.mid_y() / view_height)
    }
}

/// Finds the MRZ band among detected text rectangles.
pub struct MrzBandLocator;

impl MrzBandLocator {
    /// `boxes` are normalized with a bottom-left origin, as text detectors
    /// report them. MRZ lines span nearly the full document width, so only
    /// boxes wider than `min_width_ratio` of the image are kept; the result is
    /// their union in top-left pixel space.
    pub fn locate(
        boxes: &[Rect],
        image_width: u32,
        image_height: u32,
        min_width_ratio: f64,
    ) -> Option<CropRegion> {
        let width = image_width as f64;
        let height = image_height as f64;

        let band = boxes
            .iter()
            .map(|b| {
                CropRegion::new(
                    b.x * width,
                    (1.0 - b.y - b.height) * height,
                    b.width * width,
                    b.height * height,
                )
            })
            .filter(|region| region.width > width * min_width_ratio)
            .reduce(|acc, region| acc.union(&region));

        if band.is_none() {
            debug!("No text box wide enough for an MRZ line among {}", boxes.len());
        }
        band
    }
}
