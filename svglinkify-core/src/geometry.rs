//! Basic geometric types and the pixel → PDF user space transform

/// Points per pixel for bounding boxes reported by the rendering engine
/// (72 pt/in over 96 px/in). Independent of the export DPI.
pub const PIXELS_TO_POINTS: f64 = 0.75;

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in PDF user space defined by two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    /// Lower-left corner
    pub lower_left: Point,
    /// Upper-right corner
    pub upper_right: Point,
}

impl Rectangle {
    /// Create a new rectangle from two points
    pub fn new(lower_left: Point, upper_right: Point) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    /// Map a pixel box with a top-left origin onto a page whose top edge
    /// sits at `page_top` points.
    pub fn from_pixel_box(x: f64, y: f64, width: f64, height: f64, page_top: f64) -> Self {
        let left = x * PIXELS_TO_POINTS;
        let right = (x + width) * PIXELS_TO_POINTS;
        let top = page_top - y * PIXELS_TO_POINTS;
        let bottom = page_top - (y + height) * PIXELS_TO_POINTS;
        Self::new(Point::new(left, bottom), Point::new(right, top))
    }

    pub fn left(&self) -> f64 {
        self.lower_left.x
    }

    pub fn bottom(&self) -> f64 {
        self.lower_left.y
    }

    pub fn right(&self) -> f64 {
        self.upper_right.x
    }

    pub fn top(&self) -> f64 {
        self.upper_right.y
    }

    /// Get the width
    pub fn width(&self) -> f64 {
        self.upper_right.x - self.lower_left.x
    }

    /// Get the height
    pub fn height(&self) -> f64 {
        self.upper_right.y - self.lower_left.y
    }

    /// `left top right bottom`, the corner order used for link `/Rect`.
    pub fn to_rect_operands(&self) -> String {
        format!(
            "{:.6} {:.6} {:.6} {:.6}",
            self.left(),
            self.top(),
            self.right(),
            self.bottom()
        )
    }

    /// `left bottom right top`, the operand order of a `/FitR` destination.
    pub fn to_fit_operands(&self) -> String {
        format!(
            "{:.6} {:.6} {:.6} {:.6}",
            self.left(),
            self.bottom(),
            self.right(),
            self.top()
        )
    }
}
