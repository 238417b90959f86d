use crate::math::{Rect, Vec2};

/// Cheap rejection test: the intersection of two bounding boxes, if any.
pub fn broad_phase(a: &Rect, b: &Rect) -> Option<Rect> {
    a.intersection(b)
}

/// Precise test: the first integer point inside `overlap` covered by both
/// shapes, scanning column by column.
///
/// Sampled points run from the rounded minimum corner up to, but excluding,
/// the rounded maximum corner, so a degenerate overlap samples nothing.
/// Halves round to even (2.5 starts at column 2).
pub fn narrow_phase(
    overlap: &Rect,
    a_opaque: impl Fn(Vec2) -> bool,
    b_opaque: impl Fn(Vec2) -> bool,
) -> Option<Vec2> {
    let (x0, x1) = (round_half_even(overlap.min.x), round_half_even(overlap.max.x));
    let (y0, y1) = (round_half_even(overlap.min.y), round_half_even(overlap.max.y));

    for x in x0..x1 {
        for y in y0..y1 {
            let point = Vec2::new(x as f32, y as f32);
            if a_opaque(point) && b_opaque(point) {
                return Some(point);
            }
        }
    }
    None
}

fn round_half_even(v: f32) -> i64 {
    v.round_ties_even() as i64
}
