use std::error::Error;
use std::fmt;
use std::time::SystemTime;

use crate::stats::{Outcome, Stats, Summary};
use crate::tier::Tier;
use crate::TICK_RATE_MS;

/// Where the session currently sits. `Running` carries the countdown,
/// `Ended` carries the summary computed the moment the timer expired.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Running { remaining_secs: f64 },
    Ended(Summary),
}

/// Starting a drill needs a difficulty pick first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    NoTierSelected,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::NoTierSelected => write!(f, "no difficulty selected"),
        }
    }
}

impl Error for StartError {}

/// One player session: free play while idle, a countdown drill once
/// started, a summary once the clock runs out. All mutation goes through
/// the transition methods below.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    tier: Option<Tier>,
    phase: Phase,
    pub stats: Stats,
}

impl Session {
    pub fn new(now: SystemTime) -> Self {
        let mut stats = Stats::default();
        stats.reset(now);
        Self {
            tier: None,
            phase: Phase::Idle,
            stats,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn remaining_secs(&self) -> Option<f64> {
        match self.phase {
            Phase::Running { remaining_secs } => Some(remaining_secs),
            _ => None,
        }
    }

    /// Picks the difficulty for the next drill. Only honored while idle;
    /// returns whether the pick took effect.
    pub fn select_tier(&mut self, tier: Tier) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.tier = Some(tier);
        true
    }

    /// Arms the countdown and zeroes the warm-up counters. Requires a
    /// difficulty pick. Ignored outside the idle phase.
    pub fn start(&mut self, duration_secs: f64, now: SystemTime) -> Result<(), StartError> {
        if self.phase != Phase::Idle {
            return Ok(());
        }
        if self.tier.is_none() {
            return Err(StartError::NoTierSelected);
        }
        self.stats.reset(now);
        self.phase = Phase::Running {
            remaining_secs: duration_secs,
        };
        Ok(())
    }

    /// Advances the countdown by one tick interval. The shared ticker
    /// keeps firing in every phase; outside `Running` this is a no-op.
    pub fn tick(&mut self, now: SystemTime) {
        if let Phase::Running { remaining_secs } = &mut self.phase {
            *remaining_secs -= TICK_RATE_MS as f64 / 1000.0;
            if *remaining_secs <= 0.0 {
                self.phase = Phase::Ended(self.stats.summary(now));
            }
        }
    }

    pub fn record_shot(&mut self, outcome: Outcome, now: SystemTime) {
        self.stats.record_shot(outcome, now);
    }

    /// Leaves the summary screen for free play. Repeat calls are no-ops.
    pub fn acknowledge(&mut self, now: SystemTime) -> bool {
        if !matches!(self.phase, Phase::Ended(_)) {
            return false;
        }
        self.tier = None;
        self.stats.reset(now);
        self.phase = Phase::Idle;
        true
    }

    /// Back to idle from anywhere: cancels any countdown, clears the tier
    /// pick and every counter.
    pub fn reset(&mut self, now: SystemTime) {
        self.tier = None;
        self.stats.reset(now);
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::time::Duration;

    fn at(start: SystemTime, secs: f64) -> SystemTime {
        start + Duration::from_secs_f64(secs)
    }

    fn run_out(session: &mut Session, start: SystemTime) -> SystemTime {
        let mut now = start;
        let mut ticks = 0;
        while session.is_running() {
            ticks += 1;
            assert!(ticks < 10_000, "countdown never expired");
            now = at(start, ticks as f64 * 0.1);
            session.tick(now);
        }
        now
    }

    #[test]
    fn new_sessions_sit_idle_with_no_tier() {
        let session = Session::new(SystemTime::UNIX_EPOCH);
        assert_eq!(*session.phase(), Phase::Idle);
        assert_eq!(session.tier(), None);
        assert_eq!(session.remaining_secs(), None);
    }

    #[test]
    fn starting_without_a_tier_is_refused() {
        let start = SystemTime::UNIX_EPOCH;
        let mut session = Session::new(start);
        session.record_shot(Outcome::Miss, at(start, 0.5));

        let err = session.start(30.0, at(start, 1.0));

        assert_eq!(err, Err(StartError::NoTierSelected));
        assert_eq!(*session.phase(), Phase::Idle);
        assert_eq!(session.stats.missed_shots, 1);
        assert_eq!(session.stats.total_shots, 1);
    }

    #[test]
    fn starting_resets_warm_up_counters() {
        let start = SystemTime::UNIX_EPOCH;
        let mut session = Session::new(start);
        session.record_shot(Outcome::Hit, at(start, 0.5));
        assert!(session.select_tier(Tier::Easy));

        session.start(30.0, at(start, 1.0)).unwrap();

        assert!(session.is_running());
        assert_eq!(session.remaining_secs(), Some(30.0));
        assert_eq!(session.stats.score, 0);
        assert_eq!(session.stats.total_shots, 0);
    }

    #[test]
    fn ticks_only_count_down_while_running() {
        let start = SystemTime::UNIX_EPOCH;
        let mut session = Session::new(start);

        session.tick(at(start, 0.1));
        assert_eq!(*session.phase(), Phase::Idle);

        session.select_tier(Tier::Medium);
        session.start(5.0, start).unwrap();
        session.tick(at(start, 0.1));
        let remaining = session.remaining_secs().unwrap();
        assert!((remaining - 4.9).abs() < 1e-9);
    }

    #[test]
    fn countdown_expiry_computes_the_summary_once() {
        let start = SystemTime::UNIX_EPOCH;
        let mut session = Session::new(start);
        session.select_tier(Tier::Easy);
        session.start(5.0, start).unwrap();
        session.record_shot(Outcome::Hit, at(start, 1.0));
        session.record_shot(Outcome::Hit, at(start, 2.0));

        run_out(&mut session, start);

        let summary = match session.phase() {
            Phase::Ended(summary) => summary.clone(),
            other => panic!("expected Ended, got {other:?}"),
        };
        assert_eq!(summary.final_score, 2);
        assert_eq!(summary.missed_shots, 0);
        assert_eq!(summary.accuracy_percent, 100.0);
        assert!((summary.duration_secs - 5.0).abs() < 0.2);

        // Later ticks leave the finished summary alone.
        session.tick(at(start, 60.0));
        assert_eq!(*session.phase(), Phase::Ended(summary));
    }

    #[test]
    fn tier_picks_outside_idle_are_ignored() {
        let start = SystemTime::UNIX_EPOCH;
        let mut session = Session::new(start);
        session.select_tier(Tier::Easy);
        session.start(5.0, start).unwrap();

        assert!(!session.select_tier(Tier::Hard));
        assert_eq!(session.tier(), Some(Tier::Easy));

        run_out(&mut session, start);
        assert!(!session.select_tier(Tier::Hard));
        assert_eq!(session.tier(), Some(Tier::Easy));
    }

    #[test]
    fn starting_twice_does_not_rearm_the_timer() {
        let start = SystemTime::UNIX_EPOCH;
        let mut session = Session::new(start);
        session.select_tier(Tier::Easy);
        session.start(5.0, start).unwrap();
        session.record_shot(Outcome::Hit, at(start, 1.0));
        session.tick(at(start, 1.0));

        assert_eq!(session.start(99.0, at(start, 1.0)), Ok(()));

        let remaining = session.remaining_secs().unwrap();
        assert!((remaining - 4.9).abs() < 1e-9);
        assert_eq!(session.stats.score, 1);
    }

    #[test]
    fn reset_cancels_a_running_countdown() {
        let start = SystemTime::UNIX_EPOCH;
        let mut session = Session::new(start);
        session.select_tier(Tier::Medium);
        session.start(30.0, start).unwrap();
        session.record_shot(Outcome::Hit, at(start, 1.0));
        session.tick(at(start, 1.0));

        session.reset(at(start, 2.0));

        assert_eq!(*session.phase(), Phase::Idle);
        assert_eq!(session.tier(), None);
        assert_eq!(session.stats.score, 0);

        // The ticker keeps firing; nothing decrements any more.
        for i in 0..50 {
            session.tick(at(start, 3.0 + i as f64 * 0.1));
        }
        assert_eq!(*session.phase(), Phase::Idle);
    }

    #[test]
    fn acknowledge_returns_to_free_play_exactly_once() {
        let start = SystemTime::UNIX_EPOCH;
        let mut session = Session::new(start);
        session.select_tier(Tier::Easy);
        session.start(1.0, start).unwrap();
        let ended_at = run_out(&mut session, start);
        assert_matches!(session.phase(), Phase::Ended(_));

        assert!(session.acknowledge(ended_at));
        assert_eq!(*session.phase(), Phase::Idle);
        assert_eq!(session.tier(), None);

        // A second acknowledge must not clobber free-play counters.
        session.record_shot(Outcome::Hit, at(start, 10.0));
        assert!(!session.acknowledge(at(start, 11.0)));
        assert_eq!(session.stats.score, 1);
    }
}
