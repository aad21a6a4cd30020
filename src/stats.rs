use std::time::SystemTime;

use crate::pace::PacePoint;
use crate::util::{mean, std_dev};

/// What a single trigger pull amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
}

/// Running tally for the current stretch of play, free play and timed
/// drills alike. Timing flows in through `now` arguments so tests never
/// sleep.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stats {
    pub score: u32,
    pub total_shots: u32,
    pub missed_shots: u32,
    /// Seconds between consecutive hits.
    pub hit_intervals: Vec<f64>,
    /// Seconds from the start of play to each hit.
    pub hit_marks: Vec<f64>,
    pub started_at: Option<SystemTime>,
    pub last_hit_at: Option<SystemTime>,
}

impl Stats {
    /// Zeroes every counter and restarts the clock at `now`.
    pub fn reset(&mut self, now: SystemTime) {
        *self = Stats {
            started_at: Some(now),
            ..Stats::default()
        };
    }

    pub fn record_shot(&mut self, outcome: Outcome, now: SystemTime) {
        self.total_shots += 1;
        match outcome {
            Outcome::Hit => {
                self.score += 1;
                if let Some(last) = self.last_hit_at {
                    self.hit_intervals.push(seconds_between(last, now));
                }
                if let Some(start) = self.started_at {
                    self.hit_marks.push(seconds_between(start, now));
                }
                self.last_hit_at = Some(now);
            }
            Outcome::Miss => {
                self.missed_shots += 1;
            }
        }
    }

    /// Snapshot of the run so far. Called exactly once per drill, when the
    /// countdown expires.
    pub fn summary(&self, now: SystemTime) -> Summary {
        let duration_secs = self
            .started_at
            .map(|start| seconds_between(start, now))
            .unwrap_or(0.0);
        let accuracy_percent = if self.total_shots == 0 {
            0.0
        } else {
            let hits = self.total_shots - self.missed_shots;
            (hits as f64 / self.total_shots as f64 * 100.0).clamp(0.0, 100.0)
        };
        // Zero-length runs report a pace of zero rather than inf/NaN.
        let shots_per_minute = if duration_secs > 0.0 {
            self.total_shots as f64 / (duration_secs / 60.0)
        } else {
            0.0
        };
        let pace = self
            .hit_marks
            .iter()
            .skip(1)
            .zip(self.hit_intervals.iter())
            .map(|(&t, &gap)| PacePoint::new(t, gap))
            .collect();

        Summary {
            final_score: self.score,
            duration_secs,
            avg_hit_interval: mean(&self.hit_intervals).unwrap_or(0.0),
            interval_std_dev: std_dev(&self.hit_intervals).unwrap_or(0.0),
            missed_shots: self.missed_shots,
            total_shots: self.total_shots,
            accuracy_percent,
            shots_per_minute,
            pace,
        }
    }
}

/// Final numbers for one timed drill, computed once and never revised.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub final_score: u32,
    pub duration_secs: f64,
    pub avg_hit_interval: f64,
    pub interval_std_dev: f64,
    pub missed_shots: u32,
    pub total_shots: u32,
    pub accuracy_percent: f64,
    pub shots_per_minute: f64,
    pub pace: Vec<PacePoint>,
}

fn seconds_between(earlier: SystemTime, later: SystemTime) -> f64 {
    later
        .duration_since(earlier)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
