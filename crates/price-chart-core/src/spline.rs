// File: crates/price-chart-core/src/spline.rs
// Summary: Cubic bezier control points for tension-smoothed line series.

use crate::geometry::{clamp, distance, Rect};

/// One plotted point with the bezier handles entering and leaving it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplinePoint {
    pub x: f32,
    pub y: f32,
    pub cp_prev: (f32, f32),
    pub cp_next: (f32, f32),
}

/// Handles for `cur` given its neighbours. Handle length is proportional to the
/// distance to each neighbour, scaled by `tension` (0 gives straight segments).
pub fn control_points(prev: (f32, f32), cur: (f32, f32), next: (f32, f32), tension: f32) -> ((f32, f32), (f32, f32)) {
    let d01 = distance(prev, cur);
    let d12 = distance(cur, next);
    let total = d01 + d12;
    let (s01, s12) = if total > 0.0 { (d01 / total, d12 / total) } else { (0.0, 0.0) };
    let fa = tension * s01;
    let fb = tension * s12;
    let dx = next.0 - prev.0;
    let dy = next.1 - prev.1;
    ((cur.0 - fa * dx, cur.1 - fa * dy), (cur.0 + fb * dx, cur.1 + fb * dy))
}

/// Smooth a polyline. Handles are kept inside `area` so curves do not overshoot
/// the plot.
pub fn smooth(points: &[(f32, f32)], tension: f32, area: &Rect) -> Vec<SplinePoint> {
    let n = points.len();
    let cap = |p: (f32, f32)| (clamp(p.0, area.left, area.right), clamp(p.1, area.top, area.bottom));
    (0..n)
        .map(|i| {
            let cur = points[i];
            let prev = if i == 0 { cur } else { points[i - 1] };
            let next = if i + 1 == n { cur } else { points[i + 1] };
            let (cp_prev, cp_next) = if tension > 0.0 { control_points(prev, cur, next, tension) } else { (cur, cur) };
            SplinePoint { x: cur.0, y: cur.1, cp_prev: cap(cp_prev), cp_next: cap(cp_next) }
        })
        .collect()
}

/// Build the stroke path for smoothed points.
pub fn to_path(points: &[SplinePoint]) -> skia_safe::Path {
    let mut path = skia_safe::Path::new();
    let Some(first) = points.first() else { return path };
    path.move_to((first.x, first.y));
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        path.cubic_to(a.cp_next, b.cp_prev, (b.x, b.y));
    }
    path
}
