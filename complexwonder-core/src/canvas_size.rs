use serde::{Deserialize, Serialize};

/// Canvas (viewport) size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Area in pixels
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when either side is zero; nothing can be drawn.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half the width in pixels (NDC x = 1 maps here).
    pub fn half_width(&self) -> f64 {
        self.width as f64 / 2.0
    }

    /// Half the height in pixels (NDC y = 1 maps here).
    pub fn half_height(&self) -> f64 {
        self.height as f64 / 2.0
    }

    /// Convert a pixel position (origin top-left, y down) to an offset from
    /// the canvas center with y pointing up.
    pub fn center_offset(&self, px: f64, py: f64) -> (f64, f64) {
        (px - self.half_width(), self.half_height() - py)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_area() {
        let size = CanvasSize::new(1920, 1080);
        assert_eq!(size.area(), 1920 * 1080);
    }

    #[test]
    fn test_canvas_size_empty() {
        assert!(CanvasSize::new(0, 100).is_empty());
        assert!(CanvasSize::new(100, 0).is_empty());
        assert!(!CanvasSize::new(1, 1).is_empty());
    }

    #[test]
    fn test_half_extents() {
        let size = CanvasSize::new(801, 600);
        assert_eq!(size.half_width(), 400.5);
        assert_eq!(size.half_height(), 300.0);
    }

    #[test]
    fn test_center_offset_flips_y() {
        let size = CanvasSize::new(800, 600);
        assert_eq!(size.center_offset(400.0, 300.0), (0.0, 0.0));
        assert_eq!(size.center_offset(0.0, 0.0), (-400.0, 300.0));
        assert_eq!(size.center_offset(800.0, 600.0), (400.0, -300.0));
    }

    #[test]
    fn test_canvas_size_serialization_roundtrip() {
        let original = CanvasSize::new(640, 480);

        let json = serde_json::to_string(&original).unwrap();
        let restored: CanvasSize = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, original);
    }
}
