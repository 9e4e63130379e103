// File: crates/chart-core/src/grid.rs
// Summary: Simple grid/tick layout helpers.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Round `span / target` to a 1, 2, 2.5 or 5 multiple of a power of ten.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span.abs() / target.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 { return 1.0; }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 2.5 {
        2.5
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Tick positions at multiples of a nice step that fall inside `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min { return Vec::new(); }
    let step = nice_step(max - min, target);
    let first = (min / step).ceil() * step;
    let eps = step * 1e-9;
    let mut out = Vec::new();
    let mut k = 0usize;
    loop {
        let v = first + step * k as f64;
        if v > max + eps { break; }
        // snap values like 1e-17 to a clean zero
        out.push(if v.abs() < eps { 0.0 } else { v });
        k += 1;
    }
    out
}

/// Format a tick value with just enough decimals to distinguish `step` multiples.
pub fn format_tick(value: f64, step: f64) -> String {
    let mut decimals = 0usize;
    while decimals < 6 {
        let scaled = step * 10f64.powi(decimals as i32);
        if (scaled - scaled.round()).abs() < 1e-6 { break; }
        decimals += 1;
    }
    format!("{value:.decimals$}")
}
