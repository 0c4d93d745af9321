//! Phase ticker background task

use std::{sync::Arc, time::Duration};

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, warn};

use crate::{
    services::play_alert,
    state::{AppState, Tick, TimerCommand},
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Background task that drives the Pomodoro countdown.
///
/// Sleeps on the control channel until a command makes the timer Running,
/// then counts down once per second until the timer leaves that status.
/// Subscribe the receiver before spawning so no command is missed.
pub async fn phase_ticker_task(
    state: Arc<AppState>,
    mut control_rx: broadcast::Receiver<TimerCommand>,
) {
    info!("Starting phase ticker task");

    loop {
        match control_rx.recv().await {
            Ok(command) => {
                debug!("Ticker received control event: {:?}", command);
                if state.is_running() {
                    run_tick_loop(&state, &mut control_rx).await;
                }
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Ticker lagged behind control events, skipped {}", missed);
                if state.is_running() {
                    run_tick_loop(&state, &mut control_rx).await;
                }
            }
            Err(RecvError::Closed) => {
                debug!("Control channel closed, ticker exiting");
                break;
            }
        }
    }
}

/// Count down once per second until the timer is paused or stopped.
///
/// The select polls the control channel on every iteration, so pause and
/// stop take effect within a single tick interval instead of committing to
/// the full remaining sleep.
async fn run_tick_loop(
    state: &Arc<AppState>,
    control_rx: &mut broadcast::Receiver<TimerCommand>,
) {
    // The first decrement lands a full interval after (re)start.
    let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let tick = match state.apply_tick() {
                    Ok(tick) => tick,
                    Err(e) => {
                        error!("Failed to apply tick: {}", e);
                        break;
                    }
                };

                match tick {
                    // Status changed between the select arms; stop ticking.
                    Tick::Skipped => break,
                    Tick::Counted => {}
                    Tick::PhaseCompleted(change) => {
                        info!(
                            "Phase complete: {} -> {} ({}s)",
                            change.completed.label(),
                            change.next.label(),
                            change.next_duration_seconds
                        );

                        // Fire-and-forget: a failed alert must not stall the countdown.
                        tokio::spawn(async move {
                            if let Err(e) = play_alert(&change).await {
                                warn!("Alert playback failed: {}", e);
                            }
                        });
                    }
                }
            }

            result = control_rx.recv() => {
                match result {
                    Ok(command) => {
                        debug!("Tick loop received control event: {:?}", command);
                        if !state.is_running() {
                            debug!("Timer no longer running, cancelling tick loop");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        warn!("Tick loop lagged behind control events, skipped {}", missed);
                        if !state.is_running() {
                            break;
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}
