use super::Point2;

/// Computes the signed area of the triangle `(a, b, c)` in the XY plane.
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let e1 = b - a;
    let e2 = c - a;
    0.5 * (e1.x * e2.y - e1.y * e2.x)
}

/// Computes the unsigned area of the triangle `(a, b, c)`.
#[must_use]
pub fn area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    signed_area(a, b, c).abs()
}

/// Returns the centroid of the triangle.
#[must_use]
pub fn centroid(a: &Point2, b: &Point2, c: &Point2) -> Point2 {
    Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

/// Returns the midpoint of the segment `a`-`b`.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}
