//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::{Tick, TimerConfig, TimerState, TimerStatus};

/// Control events that wake or cancel the phase ticker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Pause,
    Resume,
    Stop,
    Reconfigure,
}

/// Result of a shell command against the timer
///
/// `changed` is false for redundant commands (start while running, pause
/// while idle, ...), which are no-ops rather than errors.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub timer: TimerState,
    pub changed: bool,
}

/// Main application state that holds the timer and its configuration
///
/// Single-writer discipline: command handlers mutate `status` and the
/// configuration (plus the explicit stop reset); only the phase ticker drives
/// `remaining_seconds` through `apply_tick`. Every mutation publishes a fresh
/// snapshot on the watch channel.
#[derive(Debug)]
pub struct AppState {
    /// Timer durations and cycle count, replaceable between phases
    pub timer_config: Arc<Mutex<TimerConfig>>,
    /// The Pomodoro state machine
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last command tracking
    pub last_command: Arc<Mutex<Option<String>>>,
    pub last_command_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel waking or cancelling the phase ticker
    pub control_tx: broadcast::Sender<TimerCommand>,
    /// Channel publishing every timer update
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with an idle timer for `config`
    pub fn new(port: u16, host: String, config: TimerConfig) -> Self {
        let initial = TimerState::new(&config);
        let (control_tx, _) = broadcast::channel(16);
        let (timer_update_tx, timer_update_rx) = watch::channel(initial.clone());

        Self {
            timer_config: Arc::new(Mutex::new(config)),
            timer_state: Arc::new(Mutex::new(initial)),
            start_time: Instant::now(),
            port,
            host,
            last_command: Arc::new(Mutex::new(None)),
            last_command_time: Arc::new(Mutex::new(None)),
            control_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply a command to the timer and notify the ticker on change
    fn command<F>(&self, name: &str, event: TimerCommand, apply: F) -> Result<CommandOutcome, String>
    where
        F: FnOnce(&mut TimerState, &TimerConfig) -> bool,
    {
        let config = self
            .timer_config
            .lock()
            .map_err(|e| format!("Failed to lock timer config: {}", e))?
            .clone();

        let mut timer = self
            .timer_state
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        let changed = apply(&mut timer, &config);
        let snapshot = timer.clone();
        drop(timer); // Release the lock early

        if changed {
            self.record_command(name);
            self.publish_timer(snapshot.clone());
            self.notify_control(event);
        }

        Ok(CommandOutcome {
            timer: snapshot,
            changed,
        })
    }

    /// Start the countdown from Idle
    pub fn start_timer(&self) -> Result<CommandOutcome, String> {
        info!("Starting timer");
        self.command("start", TimerCommand::Start, |timer, _| timer.start())
    }

    /// Pause a running countdown
    pub fn pause_timer(&self) -> Result<CommandOutcome, String> {
        info!("Pausing timer");
        self.command("pause", TimerCommand::Pause, |timer, _| timer.pause())
    }

    /// Resume a paused countdown
    pub fn resume_timer(&self) -> Result<CommandOutcome, String> {
        info!("Resuming timer");
        self.command("resume", TimerCommand::Resume, |timer, _| timer.resume())
    }

    /// Stop the countdown and reset to the initial state
    pub fn stop_timer(&self) -> Result<CommandOutcome, String> {
        info!("Stopping timer");
        self.command("stop", TimerCommand::Stop, |timer, config| timer.stop(config))
    }

    /// Replace the timer configuration.
    ///
    /// When the timer is Idle the state is reset under the new values; while
    /// Running or Paused the current phase keeps its captured duration and
    /// the new values apply from the next phase onward.
    pub fn update_config(&self, new_config: TimerConfig) -> Result<CommandOutcome, String> {
        info!(
            "Updating configuration: study={}s, short break={}s, long break={}s, cycles={}",
            new_config.study_seconds,
            new_config.short_break_seconds,
            new_config.long_break_seconds,
            new_config.cycles_per_long_break
        );

        let mut config = self
            .timer_config
            .lock()
            .map_err(|e| format!("Failed to lock timer config: {}", e))?;
        *config = new_config.clone();
        drop(config);

        let mut timer = self
            .timer_state
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        let reset = timer.status == TimerStatus::Idle;
        if reset {
            timer.reset(&new_config);
        }
        let snapshot = timer.clone();
        drop(timer);

        self.record_command("configure");
        self.publish_timer(snapshot.clone());
        self.notify_control(TimerCommand::Reconfigure);

        Ok(CommandOutcome {
            timer: snapshot,
            changed: reset,
        })
    }

    /// Apply one tick from the phase ticker. Only the ticker calls this.
    pub fn apply_tick(&self) -> Result<Tick, String> {
        let config = self
            .timer_config
            .lock()
            .map_err(|e| format!("Failed to lock timer config: {}", e))?
            .clone();

        let mut timer = self
            .timer_state
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        let tick = timer.tick(&config);
        let snapshot = timer.clone();
        drop(timer);

        if tick != Tick::Skipped {
            self.publish_timer(snapshot);
        }

        Ok(tick)
    }

    /// Whether the timer is currently Running
    pub fn is_running(&self) -> bool {
        self.timer_state
            .lock()
            .map(|timer| timer.status == TimerStatus::Running)
            .unwrap_or(false)
    }

    /// Get a snapshot of the current timer state
    pub fn snapshot(&self) -> Result<TimerState, String> {
        self.timer_state
            .lock()
            .map(|timer| timer.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Get a copy of the current configuration
    pub fn config(&self) -> Result<TimerConfig, String> {
        self.timer_config
            .lock()
            .map(|config| config.clone())
            .map_err(|e| format!("Failed to lock timer config: {}", e))
    }

    /// Publish a timer snapshot to watchers
    fn publish_timer(&self, snapshot: TimerState) {
        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// Wake the phase ticker with a control event
    fn notify_control(&self, event: TimerCommand) {
        if let Err(e) = self.control_tx.send(event) {
            warn!("Failed to send control event: {}", e);
        }
    }

    /// Record the last accepted command for status reporting
    fn record_command(&self, name: &str) {
        if let Ok(mut last_command) = self.last_command.lock() {
            *last_command = Some(name.to_string());
        }
        if let Ok(mut last_time) = self.last_command_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last command information
    pub fn get_last_command(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_command = self.last_command.lock().ok().and_then(|c| c.clone());
        let last_command_time = self.last_command_time.lock().ok().and_then(|t| *t);
        (last_command, last_command_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
