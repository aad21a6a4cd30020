use plink::session::Phase;

/// Which top-level screen the binary draws. The scene doubles for free
/// play and running drills; the summary takes over once a drill ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Scene,
    Summary,
}

pub fn current_screen(phase: &Phase) -> Screen {
    match phase {
        Phase::Ended(_) => Screen::Summary,
        Phase::Idle | Phase::Running { .. } => Screen::Scene,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plink::session::Session;
    use plink::stats::Stats;
    use std::time::SystemTime;

    #[test]
    fn scene_screen_covers_idle_and_running() {
        let now = SystemTime::UNIX_EPOCH;
        let session = Session::new(now);
        assert_eq!(current_screen(session.phase()), Screen::Scene);

        assert_eq!(
            current_screen(&Phase::Running { remaining_secs: 3.0 }),
            Screen::Scene
        );
    }

    #[test]
    fn summary_screen_takes_over_when_ended() {
        let now = SystemTime::UNIX_EPOCH;
        let summary = Stats::default().summary(now);
        assert_eq!(current_screen(&Phase::Ended(summary)), Screen::Summary);
    }
}
