/// Screen-space shape intersection
///
/// A closed set of shapes with one intersection function per pair of shape
/// kinds. Menu hover testing uses the rectangle/rectangle case; circles are
/// available for round hit areas (cursor, touch points).
///
/// # Architecture
///
/// - `Shape` enum: the closed set of supported shapes
/// - `Shape::intersects()`: dispatches on the *pair* of variants
/// - `rect_rect` / `rect_circle` / `circle_circle`: pure pairwise tests
///
/// All tests are strict: shapes that only touch along an edge do not intersect.
use sdl2::rect::Rect;

/// A hit-testable shape in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rectangle(Rect),
    Circle { center: (f32, f32), radius: f32 },
}

impl Shape {
    /// Checks whether two shapes overlap.
    ///
    /// # Example
    ///
    /// ```rust
    /// let cursor = Shape::Circle { center: (20.0, 20.0), radius: 4.0 };
    /// let button = Shape::Rectangle(Rect::new(0, 0, 64, 32));
    ///
    /// assert!(cursor.intersects(&button));
    /// ```
    pub fn intersects(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Rectangle(a), Shape::Rectangle(b)) => rect_rect(a, b),
            (Shape::Rectangle(rect), Shape::Circle { center, radius })
            | (Shape::Circle { center, radius }, Shape::Rectangle(rect)) => {
                rect_circle(rect, *center, *radius)
            }
            (
                Shape::Circle { center: a, radius: ra },
                Shape::Circle { center: b, radius: rb },
            ) => circle_circle(*a, *ra, *b, *rb),
        }
    }
}

/// Axis-aligned rectangle overlap.
///
/// Two rectangles intersect if they overlap on both the X and Y axes. SDL2
/// rectangles have exclusive right/bottom edges, so touching edges don't count.
pub fn rect_rect(a: &Rect, b: &Rect) -> bool {
    let x_overlap = a.x() < b.x() + b.width() as i32 && a.x() + a.width() as i32 > b.x();
    let y_overlap = a.y() < b.y() + b.height() as i32 && a.y() + a.height() as i32 > b.y();

    x_overlap && y_overlap
}

/// Rectangle/circle overlap using the rectangle point closest to the circle center.
pub fn rect_circle(rect: &Rect, center: (f32, f32), radius: f32) -> bool {
    let left = rect.x() as f32;
    let top = rect.y() as f32;
    let right = left + rect.width() as f32;
    let bottom = top + rect.height() as f32;

    let closest_x = center.0.clamp(left, right);
    let closest_y = center.1.clamp(top, bottom);

    let dx = center.0 - closest_x;
    let dy = center.1 - closest_y;

    dx * dx + dy * dy < radius * radius
}

/// Circle/circle overlap.
pub fn circle_circle(a: (f32, f32), radius_a: f32, b: (f32, f32), radius_b: f32) -> bool {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    let reach = radius_a + radius_b;

    dx * dx + dy * dy < reach * reach
}

/// Builds a square of side `size` centered on `center`.
///
/// Used as the hover box around the cursor. SDL2 rectangles can't be empty,
/// so the side is at least one pixel.
pub fn square_around(center: (f32, f32), size: f32) -> Rect {
    let side = size.round().max(1.0);
    let half = side / 2.0;
    Rect::new(
        (center.0 - half).round() as i32,
        (center.1 - half).round() as i32,
        side as u32,
        side as u32,
    )
}
