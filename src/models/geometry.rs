use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::ScanError;

/// Device orientation of the capture connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl FromStr for Orientation {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "portrait-upside-down" => Ok(Orientation::PortraitUpsideDown),
            "landscape-left" => Ok(Orientation::LandscapeLeft),
            "landscape-right" => Ok(Orientation::LandscapeRight),
            other => Err(ScanError::InvalidInput(format!("unknown orientation '{}'", other))),
        }
    }
}

/// Axis-aligned rectangle with a top-left origin.
///
/// Used for view-space rectangles (points) and for normalized [0, 1]
/// rectangles alike.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

/// Parses `x,y,width,height`.
impl FromStr for Rect {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ScanError::InvalidInput(format!("bad rectangle '{}': {}", s, e)))?;

        match parts.as_slice() {
            [x, y, width, height] => Ok(Rect::new(*x, *y, *width, *height)),
            _ => Err(ScanError::InvalidInput(format!(
                "rectangle '{}' needs four comma separated values",
                s
            ))),
        }
    }
}

/// Rectangle in image pixel space, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        CropRegion { x, y, width, height }
    }

    /// Smallest region containing both.
    pub fn union(&self, other: &CropRegion) -> CropRegion {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        CropRegion::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Pixel-aligned intersection with a `width` × `height` image.
    ///
    /// Returns `None` when nothing of the region lies inside the image, or when
    /// the region has a non-finite coordinate.
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Option<CropRegion> {
        let coords = [self.x, self.y, self.width, self.height];
        if coords.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let left = self.x.floor().max(0.0);
        let top = self.y.floor().max(0.0);
        let right = (self.x + self.width).ceil().min(image_width as f64);
        let bottom = (self.y + self.height).ceil().min(image_height as f64);

        if right <= left || bottom <= top {
            return None;
        }

        Some(CropRegion::new(left, top, right - left, bottom - top))
    }

    /// Integer `(x, y, width, height)` of an already clamped region.
    pub fn to_pixels(&self) -> (u32, u32, u32, u32) {
        (
            self.x.max(0.0) as u32,
            self.y.max(0.0) as u32,
            self.width.max(0.0) as u32,
            self.height.max(0.0) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_str() {
        assert_eq!("portrait".parse::<Orientation>().unwrap(), Orientation::Portrait);
        assert_eq!(
            "Landscape-Right".parse::<Orientation>().unwrap(),
            Orientation::LandscapeRight
        );
        assert!("sideways".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_rect_from_str() {
        let rect: Rect = "0.1, 0.2,0.5,0.1".parse().unwrap();
        assert_eq!(rect, Rect::new(0.1, 0.2, 0.5, 0.1));
        assert!("0.1,0.2,0.5".parse::<Rect>().is_err());
        assert!("a,b,c,d".parse::<Rect>().is_err());
    }

    #[test]
    fn test_clamp_inside_image_is_unchanged() {
        let region = CropRegion::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(region.clamp_to(640, 480), Some(region));
    }

    #[test]
    fn test_clamp_partially_outside() {
        let region = CropRegion::new(-5.5, 400.0, 100.0, 200.0);
        let clamped = region.clamp_to(640, 480).unwrap();
        assert_eq!(clamped, CropRegion::new(0.0, 400.0, 95.0, 80.0));
        assert_eq!(clamped.to_pixels(), (0, 400, 95, 80));
    }

    #[test]
    fn test_clamp_outside_is_none() {
        assert!(CropRegion::new(700.0, 0.0, 10.0, 10.0).clamp_to(640, 480).is_none());
        assert!(CropRegion::new(0.0, 0.0, 0.0, 10.0).clamp_to(640, 480).is_none());
        assert!(CropRegion::new(f64::NAN, 0.0, 10.0, 10.0).clamp_to(640, 480).is_none());
    }

    #[test]
    fn test_union() {
        let a = CropRegion::new(0.0, 10.0, 50.0, 10.0);
        let b = CropRegion::new(20.0, 30.0, 60.0, 5.0);
        assert_eq!(a.union(&b), CropRegion::new(0.0, 10.0, 80.0, 25.0));
    }
}
