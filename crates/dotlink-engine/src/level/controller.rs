use crate::core::time::Countdown;
use crate::level::config::LevelConfig;
use crate::level::score::ScoreBand;
use crate::session::Attempt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No level started yet.
    Idle,
    Running,
    Won,
    Lost,
}

/// How an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub level: u32,
    pub won: bool,
    /// `initial_time - remaining_time`, in seconds.
    pub elapsed: u32,
    /// Only set for wins.
    pub score: Option<ScoreBand>,
}

/// Something the countdown produced during `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second passed; remaining seconds after the decrement.
    Tick(u32),
    /// Remaining time just hit the low-time threshold.
    LowTime(u32),
    Expired(Outcome),
}

/// Level lifecycle: countdown, win check, outcome.
#[derive(Debug, Clone)]
pub struct LevelController {
    config: Option<LevelConfig>,
    phase: Phase,
    countdown: Countdown,
    low_time_threshold: u32,
}

impl LevelController {
    pub fn new(low_time_threshold: u32) -> Self {
        Self {
            config: None,
            phase: Phase::Idle,
            countdown: Countdown::new(1.0),
            low_time_threshold,
        }
    }

    /// Reset the attempt and arm a fresh one-second countdown.
    pub fn start(&mut self, config: LevelConfig, attempt: &mut Attempt) {
        if self.countdown.arm() {
            log::debug!("previous countdown cancelled before re-arming");
        }
        *attempt = Attempt {
            remaining_time: config.initial_time,
            ..Attempt::default()
        };
        self.config = Some(config);
        self.phase = Phase::Running;
        log::info!(
            "level {} started: target {}, {}s",
            config.level,
            config.target,
            config.initial_time
        );
    }

    /// Feed frame time. Fires one tick per elapsed second while running.
    pub fn advance(&mut self, dt: f32, attempt: &mut Attempt) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        let ticks = self.countdown.accumulate(dt);
        for _ in 0..ticks {
            if self.phase != Phase::Running {
                break;
            }
            attempt.remaining_time = attempt.remaining_time.saturating_sub(1);
            events.push(TimerEvent::Tick(attempt.remaining_time));
            if attempt.remaining_time == 0 {
                if let Some(outcome) = self.finish(false, attempt) {
                    events.push(TimerEvent::Expired(outcome));
                }
                break;
            }
            if attempt.remaining_time == self.low_time_threshold {
                events.push(TimerEvent::LowTime(attempt.remaining_time));
            }
        }
        events
    }

    /// Count a win-color connection, then check for a win.
    pub fn record_win_connection(&mut self, attempt: &mut Attempt) -> Option<Outcome> {
        if self.phase != Phase::Running {
            return None;
        }
        attempt.win_connections += 1;
        self.check_win(attempt)
    }

    /// Win once the connection count reaches the level target.
    pub fn check_win(&mut self, attempt: &mut Attempt) -> Option<Outcome> {
        let target = self.config?.target;
        if self.phase == Phase::Running && attempt.win_connections >= target {
            return self.finish(true, attempt);
        }
        None
    }

    /// Abandon the running level without an outcome.
    pub fn stop(&mut self) -> bool {
        if self.phase == Phase::Running {
            self.phase = Phase::Idle;
        }
        self.countdown.cancel()
    }

    fn finish(&mut self, won: bool, attempt: &mut Attempt) -> Option<Outcome> {
        let config = self.config?;
        if !self.countdown.cancel() {
            log::warn!("level {} ended with no live countdown", config.level);
        }
        attempt.ended = true;
        self.phase = if won { Phase::Won } else { Phase::Lost };

        let elapsed = config.initial_time.saturating_sub(attempt.remaining_time);
        let score = won.then(|| ScoreBand::from_elapsed(elapsed, config.initial_time));
        log::info!(
            "level {} {} after {}s",
            config.level,
            if won { "won" } else { "lost" },
            elapsed
        );
        Some(Outcome {
            level: config.level,
            won,
            elapsed,
            score,
        })
    }

    /// Target connections still missing.
    pub fn dots_remaining(&self, attempt: &Attempt) -> u32 {
        self.config
            .map_or(0, |c| c.target.saturating_sub(attempt.win_connections))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> Option<&LevelConfig> {
        self.config.as_ref()
    }

    pub fn countdown_armed(&self) -> bool {
        self.countdown.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(target: u32, time: u32) -> (LevelController, Attempt) {
        let mut ctl = LevelController::new(5);
        let mut attempt = Attempt::default();
        ctl.start(LevelConfig::new(1, target, time), &mut attempt);
        (ctl, attempt)
    }

    #[test]
    fn start_resets_attempt() {
        let mut ctl = LevelController::new(5);
        let mut attempt = Attempt {
            win_connections: 7,
            remaining_time: 3,
            ended: true,
        };
        ctl.start(LevelConfig::new(2, 15, 60), &mut attempt);
        assert_eq!(attempt.win_connections, 0);
        assert_eq!(attempt.remaining_time, 60);
        assert!(!attempt.ended);
        assert_eq!(ctl.phase(), Phase::Running);
        assert!(ctl.countdown_armed());
    }

    #[test]
    fn win_at_target_not_before() {
        let (mut ctl, mut attempt) = started(3, 60);
        assert_eq!(ctl.record_win_connection(&mut attempt), None);
        assert_eq!(ctl.record_win_connection(&mut attempt), None);
        assert_eq!(attempt.win_connections, 2);
        assert_eq!(ctl.phase(), Phase::Running);

        let outcome = ctl.record_win_connection(&mut attempt).unwrap();
        assert!(outcome.won);
        assert_eq!(outcome.score, Some(ScoreBand::Perfect));
        assert_eq!(ctl.phase(), Phase::Won);
        assert!(attempt.ended);
        assert!(!ctl.countdown_armed());
    }

    #[test]
    fn no_counting_after_the_end() {
        let (mut ctl, mut attempt) = started(1, 60);
        ctl.record_win_connection(&mut attempt).unwrap();
        assert_eq!(ctl.record_win_connection(&mut attempt), None);
        assert_eq!(attempt.win_connections, 1);
    }

    #[test]
    fn countdown_ticks_and_signals_low_time() {
        let (mut ctl, mut attempt) = started(10, 7);
        assert_eq!(ctl.advance(1.0, &mut attempt), vec![TimerEvent::Tick(6)]);
        assert_eq!(
            ctl.advance(1.0, &mut attempt),
            vec![TimerEvent::Tick(5), TimerEvent::LowTime(5)]
        );
        assert!(ctl.advance(0.5, &mut attempt).is_empty());
        assert_eq!(attempt.remaining_time, 5);
    }

    #[test]
    fn expiry_loses_and_stops_the_countdown() {
        let (mut ctl, mut attempt) = started(10, 2);
        ctl.advance(1.0, &mut attempt);
        let events = ctl.advance(1.0, &mut attempt);
        let outcome = Outcome {
            level: 1,
            won: false,
            elapsed: 2,
            score: None,
        };
        assert_eq!(events, vec![TimerEvent::Tick(0), TimerEvent::Expired(outcome)]);
        assert_eq!(ctl.phase(), Phase::Lost);
        assert!(attempt.ended);
        assert!(ctl.advance(5.0, &mut attempt).is_empty());
        assert_eq!(attempt.remaining_time, 0);
    }

    #[test]
    fn no_decrement_after_win() {
        let (mut ctl, mut attempt) = started(1, 60);
        ctl.advance(1.0, &mut attempt);
        let outcome = ctl.record_win_connection(&mut attempt).unwrap();
        assert_eq!(outcome.elapsed, 1);
        assert!(ctl.advance(3.0, &mut attempt).is_empty());
        assert_eq!(attempt.remaining_time, 59);
    }

    #[test]
    fn restart_keeps_a_single_countdown() {
        let (mut ctl, mut attempt) = started(10, 60);
        ctl.advance(0.9, &mut attempt);
        ctl.start(LevelConfig::new(1, 10, 60), &mut attempt);
        // The old arming's 0.9s does not carry over.
        assert!(ctl.advance(0.2, &mut attempt).is_empty());
        assert_eq!(ctl.advance(0.8, &mut attempt), vec![TimerEvent::Tick(59)]);
    }

    #[test]
    fn stop_cancels_once() {
        let (mut ctl, _) = started(10, 60);
        assert!(ctl.stop());
        assert!(!ctl.stop());
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn dots_remaining_saturates() {
        let (ctl, mut attempt) = started(2, 60);
        attempt.win_connections = 5;
        assert_eq!(ctl.dots_remaining(&attempt), 0);
    }
}
