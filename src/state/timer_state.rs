//! Pomodoro timer state machine and configuration

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Accepted minute ranges for configuration updates, checked at the boundary
const STUDY_MINUTES: RangeInclusive<u64> = 1..=60;
const SHORT_BREAK_MINUTES: RangeInclusive<u64> = 1..=30;
const LONG_BREAK_MINUTES: RangeInclusive<u64> = 1..=60;
const CYCLES_PER_LONG_BREAK: RangeInclusive<u32> = 1..=10;

/// Interval type the timer is currently counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Study,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Human-readable phase name for logs and messages
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Study => "study",
            Phase::ShortBreak => "short break",
            Phase::LongBreak => "long break",
        }
    }
}

/// Run status of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
        }
    }
}

/// Timer durations and the cycle count before a long break
///
/// Replaceable between phases; the core assumes values were validated at the
/// CLI or API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub study_seconds: u64,
    pub short_break_seconds: u64,
    pub long_break_seconds: u64,
    pub cycles_per_long_break: u32,
}

impl TimerConfig {
    /// Build a configuration from minute values, rejecting anything outside
    /// the accepted ranges
    pub fn from_minutes(
        study: u64,
        short_break: u64,
        long_break: u64,
        cycles: u32,
    ) -> Result<Self, String> {
        if !STUDY_MINUTES.contains(&study) {
            return Err(format!(
                "study minutes must be between {} and {}",
                STUDY_MINUTES.start(),
                STUDY_MINUTES.end()
            ));
        }
        if !SHORT_BREAK_MINUTES.contains(&short_break) {
            return Err(format!(
                "short break minutes must be between {} and {}",
                SHORT_BREAK_MINUTES.start(),
                SHORT_BREAK_MINUTES.end()
            ));
        }
        if !LONG_BREAK_MINUTES.contains(&long_break) {
            return Err(format!(
                "long break minutes must be between {} and {}",
                LONG_BREAK_MINUTES.start(),
                LONG_BREAK_MINUTES.end()
            ));
        }
        if !CYCLES_PER_LONG_BREAK.contains(&cycles) {
            return Err(format!(
                "cycles per long break must be between {} and {}",
                CYCLES_PER_LONG_BREAK.start(),
                CYCLES_PER_LONG_BREAK.end()
            ));
        }

        Ok(Self {
            study_seconds: study * 60,
            short_break_seconds: short_break * 60,
            long_break_seconds: long_break * 60,
            cycles_per_long_break: cycles,
        })
    }

    /// Configured duration of a phase in seconds
    pub fn phase_seconds(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Study => self.study_seconds,
            Phase::ShortBreak => self.short_break_seconds,
            Phase::LongBreak => self.long_break_seconds,
        }
    }
}

impl Default for TimerConfig {
    /// Classic Pomodoro defaults: 25/5/15 minutes, long break every 4 cycles
    fn default() -> Self {
        Self {
            study_seconds: 25 * 60,
            short_break_seconds: 5 * 60,
            long_break_seconds: 15 * 60,
            cycles_per_long_break: 4,
        }
    }
}

/// Result of applying one tick to the timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// The timer was not running; nothing was counted
    Skipped,
    /// One second consumed, current phase still in progress
    Counted,
    /// The decrement exhausted the phase and a transition was applied
    PhaseCompleted(PhaseChange),
}

/// A phase transition, carried to the alert sink and the logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseChange {
    pub completed: Phase,
    pub next: Phase,
    pub next_duration_seconds: u64,
}

/// Timer state for tracking the Pomodoro countdown
///
/// `phase_total_seconds` captures the configured duration of the active phase
/// at phase entry, so rendering never has to re-derive which break length is
/// in effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub status: TimerStatus,
    pub remaining_seconds: u64,
    pub phase_total_seconds: u64,
    /// Completed study phases since the last long break,
    /// always below `cycles_per_long_break`
    pub completed_cycles: u32,
}

impl TimerState {
    /// Initial state for a configuration: study phase, full duration, idle
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            phase: Phase::Study,
            status: TimerStatus::Idle,
            remaining_seconds: config.study_seconds,
            phase_total_seconds: config.study_seconds,
            completed_cycles: 0,
        }
    }

    /// Reset to the initial state for `config`, keeping nothing
    pub fn reset(&mut self, config: &TimerConfig) {
        *self = Self::new(config);
    }

    /// Start the countdown. Only valid from Idle; anything else is a no-op.
    pub fn start(&mut self) -> bool {
        if self.status != TimerStatus::Idle {
            return false;
        }
        self.status = TimerStatus::Running;
        true
    }

    /// Halt ticking without touching the countdown. No-op unless Running.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.status = TimerStatus::Paused;
        true
    }

    /// Continue ticking from the paused point. No-op unless Paused.
    pub fn resume(&mut self) -> bool {
        if self.status != TimerStatus::Paused {
            return false;
        }
        self.status = TimerStatus::Running;
        true
    }

    /// Stop the countdown and reset to the initial state for `config`.
    /// Returns false when the state is already pristine.
    pub fn stop(&mut self, config: &TimerConfig) -> bool {
        let fresh = Self::new(config);
        if *self == fresh {
            return false;
        }
        *self = fresh;
        true
    }

    /// Consume one second of the active phase.
    ///
    /// Does nothing unless the timer is Running. When the phase is exhausted
    /// the transition is applied immediately and reported; durations of the
    /// next phase come from `config`, so configuration updates take effect
    /// from the next phase onward.
    pub fn tick(&mut self, config: &TimerConfig) -> Tick {
        if self.status != TimerStatus::Running {
            return Tick::Skipped;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            Tick::Counted
        } else {
            Tick::PhaseCompleted(self.complete_phase(config))
        }
    }

    /// Apply the phase-transition rules once the countdown reaches zero
    fn complete_phase(&mut self, config: &TimerConfig) -> PhaseChange {
        let completed = self.phase;
        let next = match completed {
            Phase::Study => {
                self.completed_cycles += 1;
                if self.completed_cycles >= config.cycles_per_long_break {
                    self.completed_cycles = 0;
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Study,
        };

        self.phase = next;
        self.phase_total_seconds = config.phase_seconds(next);
        self.remaining_seconds = self.phase_total_seconds;

        PhaseChange {
            completed,
            next,
            next_duration_seconds: self.phase_total_seconds,
        }
    }

    /// Share of the active phase already elapsed, 0.0 to 100.0
    pub fn progress_percent(&self) -> f64 {
        if self.phase_total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.phase_total_seconds.saturating_sub(self.remaining_seconds);
        elapsed as f64 / self.phase_total_seconds as f64 * 100.0
    }

    /// Display line for the current state, derived fresh on every render
    pub fn status_line(&self) -> String {
        if self.status == TimerStatus::Idle {
            return "Ready to start".to_string();
        }

        let minutes = self.phase_total_seconds / 60;
        let line = match self.phase {
            Phase::Study => "Study time!".to_string(),
            Phase::ShortBreak => format!("Short break for {} minutes!", minutes),
            Phase::LongBreak => format!("Long break for {} minutes!", minutes),
        };

        if self.status == TimerStatus::Paused {
            format!("(Paused) {}", line)
        } else {
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_config() -> TimerConfig {
        TimerConfig {
            study_seconds: 2,
            short_break_seconds: 1,
            long_break_seconds: 3,
            cycles_per_long_break: 2,
        }
    }

    fn running(config: &TimerConfig) -> TimerState {
        let mut timer = TimerState::new(config);
        assert!(timer.start());
        timer
    }

    #[test]
    fn starts_idle_in_study_phase() {
        let config = short_config();
        let timer = TimerState::new(&config);
        assert_eq!(timer.phase, Phase::Study);
        assert_eq!(timer.status, TimerStatus::Idle);
        assert_eq!(timer.remaining_seconds, 2);
        assert_eq!(timer.phase_total_seconds, 2);
        assert_eq!(timer.completed_cycles, 0);
    }

    #[test]
    fn redundant_commands_are_noops() {
        let config = short_config();
        let mut timer = TimerState::new(&config);

        assert!(!timer.pause());
        assert!(!timer.resume());
        assert!(!timer.stop(&config));

        assert!(timer.start());
        assert!(!timer.start());
        assert_eq!(timer.status, TimerStatus::Running);

        assert!(timer.pause());
        assert!(!timer.pause());
        assert!(!timer.start());
        assert_eq!(timer.status, TimerStatus::Paused);

        assert!(timer.resume());
        assert!(!timer.resume());
        assert_eq!(timer.status, TimerStatus::Running);
    }

    #[test]
    fn tick_is_ignored_unless_running() {
        let config = short_config();
        let mut timer = TimerState::new(&config);

        assert_eq!(timer.tick(&config), Tick::Skipped);
        assert_eq!(timer.remaining_seconds, 2);

        timer.start();
        timer.pause();
        assert_eq!(timer.tick(&config), Tick::Skipped);
        assert_eq!(timer.remaining_seconds, 2);
    }

    #[test]
    fn pause_then_resume_preserves_remaining_and_phase() {
        let config = short_config();
        let mut timer = running(&config);

        assert_eq!(timer.tick(&config), Tick::Counted);
        assert_eq!(timer.remaining_seconds, 1);

        timer.pause();
        timer.resume();
        assert_eq!(timer.phase, Phase::Study);
        assert_eq!(timer.remaining_seconds, 1);
    }

    #[test]
    fn study_completion_switches_to_short_break() {
        let config = short_config();
        let mut timer = running(&config);

        timer.tick(&config);
        let change = match timer.tick(&config) {
            Tick::PhaseCompleted(change) => change,
            other => panic!("expected a phase change, got {:?}", other),
        };

        assert_eq!(change.completed, Phase::Study);
        assert_eq!(change.next, Phase::ShortBreak);
        assert_eq!(change.next_duration_seconds, 1);
        assert_eq!(timer.phase, Phase::ShortBreak);
        assert_eq!(timer.remaining_seconds, 1);
        assert_eq!(timer.phase_total_seconds, 1);
        assert_eq!(timer.completed_cycles, 1);
        assert_eq!(timer.status, TimerStatus::Running);
    }

    #[test]
    fn cycle_target_triggers_long_break_and_resets_count() {
        let config = TimerConfig {
            study_seconds: 1,
            short_break_seconds: 1,
            long_break_seconds: 2,
            cycles_per_long_break: 4,
        };
        let mut timer = running(&config);

        for expected in 1..4 {
            assert!(matches!(timer.tick(&config), Tick::PhaseCompleted(_)));
            assert_eq!(timer.phase, Phase::ShortBreak);
            assert_eq!(timer.completed_cycles, expected);
            assert!(matches!(timer.tick(&config), Tick::PhaseCompleted(_)));
            assert_eq!(timer.phase, Phase::Study);
        }

        let change = match timer.tick(&config) {
            Tick::PhaseCompleted(change) => change,
            other => panic!("expected a phase change, got {:?}", other),
        };
        assert_eq!(change.next, Phase::LongBreak);
        assert_eq!(timer.completed_cycles, 0);
        assert_eq!(timer.remaining_seconds, 2);
    }

    #[test]
    fn full_rotation_scenario() {
        // study=2, short=1, long=3, cycles=2
        let config = short_config();
        let mut timer = running(&config);

        timer.tick(&config);
        timer.tick(&config);
        assert_eq!(timer.phase, Phase::ShortBreak);
        assert_eq!(timer.remaining_seconds, 1);
        assert_eq!(timer.completed_cycles, 1);

        timer.tick(&config);
        assert_eq!(timer.phase, Phase::Study);
        assert_eq!(timer.remaining_seconds, 2);

        timer.tick(&config);
        timer.tick(&config);
        assert_eq!(timer.phase, Phase::LongBreak);
        assert_eq!(timer.remaining_seconds, 3);
        assert_eq!(timer.completed_cycles, 0);
    }

    #[test]
    fn stop_resets_regardless_of_phase() {
        let config = short_config();
        let mut timer = running(&config);

        timer.tick(&config);
        timer.tick(&config);
        timer.pause();
        assert_eq!(timer.phase, Phase::ShortBreak);

        assert!(timer.stop(&config));
        assert_eq!(timer, TimerState::new(&config));
    }

    #[test]
    fn config_change_mid_phase_keeps_current_duration() {
        let config = short_config();
        let mut timer = running(&config);
        timer.tick(&config);
        assert_eq!(timer.remaining_seconds, 1);

        let updated = TimerConfig {
            study_seconds: 10,
            short_break_seconds: 5,
            long_break_seconds: 20,
            cycles_per_long_break: 2,
        };

        // The running study phase keeps its captured duration...
        assert_eq!(timer.phase_total_seconds, 2);

        // ...and the next phase picks up the new configuration.
        let change = match timer.tick(&updated) {
            Tick::PhaseCompleted(change) => change,
            other => panic!("expected a phase change, got {:?}", other),
        };
        assert_eq!(change.next, Phase::ShortBreak);
        assert_eq!(change.next_duration_seconds, 5);
        assert_eq!(timer.phase_total_seconds, 5);
    }

    #[test]
    fn from_minutes_validates_ranges() {
        assert!(TimerConfig::from_minutes(25, 5, 15, 4).is_ok());

        assert!(TimerConfig::from_minutes(0, 5, 15, 4).is_err());
        assert!(TimerConfig::from_minutes(61, 5, 15, 4).is_err());
        assert!(TimerConfig::from_minutes(25, 0, 15, 4).is_err());
        assert!(TimerConfig::from_minutes(25, 31, 15, 4).is_err());
        assert!(TimerConfig::from_minutes(25, 5, 0, 4).is_err());
        assert!(TimerConfig::from_minutes(25, 5, 61, 4).is_err());
        assert!(TimerConfig::from_minutes(25, 5, 15, 0).is_err());
        assert!(TimerConfig::from_minutes(25, 5, 15, 11).is_err());

        let config = TimerConfig::from_minutes(25, 5, 15, 4).unwrap();
        assert_eq!(config.study_seconds, 25 * 60);
        assert_eq!(config.short_break_seconds, 5 * 60);
        assert_eq!(config.long_break_seconds, 15 * 60);
        assert_eq!(config.cycles_per_long_break, 4);
    }

    #[test]
    fn status_line_is_derived_from_state() {
        let config = TimerConfig::default();
        let mut timer = TimerState::new(&config);
        assert_eq!(timer.status_line(), "Ready to start");

        timer.start();
        assert_eq!(timer.status_line(), "Study time!");

        timer.pause();
        assert_eq!(timer.status_line(), "(Paused) Study time!");

        timer.resume();
        timer.remaining_seconds = 1;
        timer.tick(&config);
        assert_eq!(timer.status_line(), "Short break for 5 minutes!");
    }

    #[test]
    fn progress_tracks_elapsed_share() {
        let config = TimerConfig {
            study_seconds: 4,
            short_break_seconds: 1,
            long_break_seconds: 2,
            cycles_per_long_break: 2,
        };
        let mut timer = running(&config);
        assert_eq!(timer.progress_percent(), 0.0);

        timer.tick(&config);
        assert_eq!(timer.progress_percent(), 25.0);

        timer.tick(&config);
        assert_eq!(timer.progress_percent(), 50.0);
    }
}
