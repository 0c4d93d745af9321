//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{TimerConfig, TimerState};
use crate::utils::contact;

/// Request body for PUT /config, in minutes as the original dialog took them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigUpdateRequest {
    pub study_minutes: u64,
    pub short_break_minutes: u64,
    pub long_break_minutes: u64,
    pub cycles_per_long_break: u32,
}

impl ConfigUpdateRequest {
    /// Validate the minute values and convert into a timer configuration
    pub fn into_config(self) -> Result<TimerConfig, String> {
        TimerConfig::from_minutes(
            self.study_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
            self.cycles_per_long_break,
        )
    }
}

/// API response structure for timer command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Response for a command that changed the timer; status reflects the
    /// timer's new run status
    pub fn changed(message: String, timer: TimerState) -> Self {
        Self::new(timer.status.as_str().to_string(), message, timer)
    }

    /// Response for a redundant command that was ignored
    pub fn unchanged(message: String, timer: TimerState) -> Self {
        Self::new("unchanged".to_string(), message, timer)
    }

    /// Response for a rejected request
    pub fn error(message: String, timer: TimerState) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Full status response for rendering the timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub config: TimerConfig,
    /// Display line derived from the timer state on each render
    pub status_text: String,
    /// Elapsed share of the active phase, for progress bars
    pub progress_percent: f64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_command: Option<String>,
    pub last_command_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: "1.0.0".to_string(),
        }
    }
}

/// App metadata and contact link, the data behind the original About dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub contact_email: String,
    /// Prebuilt mailto URL for the shell to hand to the mail composer
    pub contact_mailto: String,
}

impl AboutResponse {
    pub fn new() -> Self {
        Self {
            name: "Study Bell".to_string(),
            version: "1.0.0".to_string(),
            description: "A state-managed HTTP server driving a Pomodoro study timer".to_string(),
            contact_email: contact::CONTACT_EMAIL.to_string(),
            contact_mailto: contact::contact_mailto(),
        }
    }
}

impl Default for AboutResponse {
    fn default() -> Self {
        Self::new()
    }
}
