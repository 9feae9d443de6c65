// File: crates/price-chart-core/src/grid.rs
// Summary: Tick layout helpers: nice Y ticks and X label skipping.

/// "Nice" step (1, 2, 5 x 10^k) close to `range`.
fn nice_num(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10f64.powf(exponent);
    let nice = if round {
        if fraction < 1.5 { 1.0 } else if fraction < 3.0 { 2.0 } else if fraction < 7.0 { 5.0 } else { 10.0 }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * 10f64.powf(exponent)
}

/// Evenly spaced round tick values covering `[min, max]`, at most about `max_ticks`.
/// A flat range is widened by one unit on each side. Empty for non-finite input.
pub fn nice_ticks(mut min: f64, mut max: f64, max_ticks: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }
    if (max - min).abs() < 1e-12 {
        min -= 1.0;
        max += 1.0;
    }
    let max_ticks = max_ticks.max(2);
    let range = nice_num(max - min, false);
    let step = nice_num(range / (max_ticks - 1) as f64, true);
    let lo = (min / step).floor() * step;
    let hi = (max / step).ceil() * step;
    let count = ((hi - lo) / step).round() as usize;
    // trim float noise such as 0.30000000000000004
    let decimals = (-step.log10().floor()).max(0.0) as i32;
    let factor = 10f64.powi(decimals);
    (0..=count).map(|i| ((lo + step * i as f64) * factor).round() / factor).collect()
}

/// Indices of the category labels that stay visible when at most `limit` fit.
/// Labels are skipped at a constant stride starting from the first one.
pub fn skip_labels(count: usize, limit: usize) -> Vec<usize> {
    if count == 0 || limit == 0 {
        return Vec::new();
    }
    let stride = count.div_ceil(limit);
    (0..count).step_by(stride).collect()
}

/// Y tick budget for a plot of `height_px`, one tick per ~40px, capped at 11.
pub fn y_tick_budget(height_px: f32) -> usize {
    ((height_px / 40.0).ceil() as usize).clamp(2, 11)
}
