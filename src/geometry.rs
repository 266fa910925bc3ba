/// Axis-aligned rectangles in world space.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True when the horizontal spans intersect (edges excluded).
    pub fn spans_x(&self, other: &Rect) -> bool {
        self.right() > other.x && self.x < other.right()
    }
}

/// Unit vector from `(x0, y0)` toward `(x1, y1)`; a zero distance counts as 1
/// so coincident points yield a zero vector instead of NaN.
pub fn direction(x0: f32, y0: f32, x1: f32, y1: f32) -> (f32, f32) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let dist = dx.hypot(dy);
    let dist = if dist == 0.0 { 1.0 } else { dist };
    (dx / dist, dy / dist)
}
