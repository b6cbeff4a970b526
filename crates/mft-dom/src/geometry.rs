//! Geometry
//!
//! Client-rect geometry. The focus machinery only cares whether an element
//! generates any boxes at all, but hosts may carry real coordinates.

/// Rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);

        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }
}
