//! Screen-space regions handed over by the rendering layer.

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies inside, edges included.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_includes_edges() {
        let bounds = Bounds::new(10.0, 20.0, 100.0, 40.0);
        assert!(bounds.contains(10.0, 20.0));
        assert!(bounds.contains(110.0, 60.0));
        assert!(bounds.contains(50.0, 30.0));
        assert!(!bounds.contains(9.9, 30.0));
        assert!(!bounds.contains(50.0, 60.1));
    }

    #[test]
    fn test_default_is_empty_at_origin() {
        let bounds = Bounds::default();
        assert_eq!(bounds.right(), 0.0);
        assert!(bounds.contains(0.0, 0.0));
        assert!(!bounds.contains(1.0, 0.0));
    }
}
