use itertools::{Itertools, MinMaxResult};

use plink::pace::PacePoint;

/// Compute X (seconds) and Y (inter-hit gap) bounds for the summary chart
pub fn compute_chart_params(pace: &[PacePoint], duration_secs: f64) -> (f64, f64) {
    let highest_gap = match pace.iter().map(|p| p.gap).minmax() {
        MinMaxResult::NoElements => 0.0,
        MinMaxResult::OneElement(gap) => gap,
        MinMaxResult::MinMax(_, max) => max,
    };

    (duration_secs.max(1.0), highest_gap.ceil().max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

/// Countdown display, rounded up so the clock never shows 00:00 early
pub fn format_mmss(secs: f64) -> String {
    let total = secs.max(0.0).ceil() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
