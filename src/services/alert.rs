//! Audible phase-transition alerts

use std::io::{self, Write};

use notify_rust::Notification;
use tracing::info;

use crate::state::{Phase, PhaseChange};

/// Play the phase-transition alert.
///
/// Shows a desktop notification; when no notification daemon is reachable
/// the terminal bell is rung instead. The returned error is for logging
/// only, callers must never let it abort the phase transition.
pub async fn play_alert(change: &PhaseChange) -> Result<(), String> {
    let body = alert_message(change);
    info!("Alerting: {}", body);

    let shown = tokio::task::spawn_blocking(move || {
        Notification::new()
            .summary("Study Bell")
            .body(&body)
            .timeout(0) // No auto-dismiss
            .show()
    })
    .await;

    match shown {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => {
            terminal_bell();
            Err(format!("desktop notification failed: {}", e))
        }
        Err(e) => {
            terminal_bell();
            Err(format!("alert task failed: {}", e))
        }
    }
}

/// Human message for a completed phase
pub fn alert_message(change: &PhaseChange) -> String {
    let minutes = change.next_duration_seconds / 60;
    match change.next {
        Phase::Study => format!("Break is over! Starting a {}-minute study session.", minutes),
        Phase::ShortBreak => format!(
            "Study session complete! Time for a {}-minute break.",
            minutes
        ),
        Phase::LongBreak => format!("Cycle complete! Take a long {}-minute break.", minutes),
    }
}

/// ASCII bell fallback for systems without a notification daemon
fn terminal_bell() {
    print!("\x07");
    let _ = io::stdout().flush();
}
