/// Plain value types for positions and axis-aligned boxes in world pixels

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Strict overlap test. Rectangles that only share an edge do not
    /// intersect, and an empty rectangle intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_contained_rect_intersects() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 18.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let empty = Rect::new(5.0, 5.0, 0.0, 3.0);
        assert!(!a.intersects(&empty));
        assert!(!empty.intersects(&a));
    }

    #[test]
    fn test_from_parts() {
        let rect = Rect::from_parts(Position::new(3.0, 4.0), Size::new(5.0, 18.0));
        assert_eq!(rect, Rect::new(3.0, 4.0, 5.0, 18.0));
        assert_eq!(rect.right(), 8.0);
        assert_eq!(rect.bottom(), 22.0);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_intersection_is_symmetric(
                ax in -100.0f32..100.0, ay in -100.0f32..100.0,
                aw in 0.0f32..50.0, ah in 0.0f32..50.0,
                bx in -100.0f32..100.0, by in -100.0f32..100.0,
                bw in 0.0f32..50.0, bh in 0.0f32..50.0,
            ) {
                let a = Rect::new(ax, ay, aw, ah);
                let b = Rect::new(bx, by, bw, bh);
                prop_assert_eq!(a.intersects(&b), b.intersects(&a));
            }
        }
    }
}
