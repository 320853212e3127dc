//! Shot hit-testing
//!
//! A shot is a point; a duck's target area is an axis-aligned ellipse
//! centered on the duck. When ducks overlap, the nearest one takes the hit.

use glam::Vec2;

use super::duck::Duck;

/// Whether `point` lies inside (or on) the axis-aligned ellipse at
/// `center` with semi-axes `radii`
pub fn point_in_ellipse(point: Vec2, center: Vec2, radii: Vec2) -> bool {
    if radii.x <= 0.0 || radii.y <= 0.0 {
        return false;
    }
    let d = (point - center) / radii;
    d.length_squared() <= 1.0
}

/// Index of the duck a shot at `point` hits, if any.
///
/// Ducks are considered in order of increasing distance from the shot;
/// equal distances keep slice order. Falling ducks never match.
pub fn resolve_shot(ducks: &[Duck], point: Vec2) -> Option<usize> {
    let mut order: Vec<(usize, f32)> = ducks
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_flying())
        .map(|(i, d)| (i, d.pos.distance_squared(point)))
        .collect();
    // Stable sort keeps spawn order on ties
    order.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    order
        .into_iter()
        .map(|(i, _)| i)
        .find(|&i| ducks[i].hit_test(point))
}
