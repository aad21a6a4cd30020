/// One inter-hit gap sample: `gap` seconds between consecutive hits,
/// observed `t` seconds into the session. Feeds the summary chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacePoint {
    pub t: f64,
    pub gap: f64,
}

impl PacePoint {
    pub fn new(t: f64, gap: f64) -> Self {
        Self { t, gap }
    }
}

impl From<(f64, f64)> for PacePoint {
    fn from(v: (f64, f64)) -> Self {
        PacePoint { t: v.0, gap: v.1 }
    }
}

impl From<PacePoint> for (f64, f64) {
    fn from(p: PacePoint) -> Self {
        (p.t, p.gap)
    }
}
