//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info, warn};

use crate::state::AppState;
use super::responses::{
    AboutResponse, ApiResponse, ConfigUpdateRequest, HealthResponse, StatusResponse,
};

/// Handle POST /start - Begin the study countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start_timer() {
        Ok(outcome) if outcome.changed => {
            info!("Start endpoint called - countdown running");
            Ok(Json(ApiResponse::changed(
                "Timer started".to_string(),
                outcome.timer,
            )))
        }
        Ok(outcome) => {
            info!("Start endpoint called - timer already active, ignored");
            Ok(Json(ApiResponse::unchanged(
                "Timer is already active".to_string(),
                outcome.timer,
            )))
        }
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Halt the countdown without losing progress
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause_timer() {
        Ok(outcome) if outcome.changed => {
            info!("Pause endpoint called - countdown halted");
            Ok(Json(ApiResponse::changed(
                "Timer paused".to_string(),
                outcome.timer,
            )))
        }
        Ok(outcome) => {
            info!("Pause endpoint called - timer not running, ignored");
            Ok(Json(ApiResponse::unchanged(
                "Timer is not running; nothing to pause".to_string(),
                outcome.timer,
            )))
        }
        Err(e) => {
            error!("Failed to pause timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /resume - Continue a paused countdown
pub async fn resume_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.resume_timer() {
        Ok(outcome) if outcome.changed => {
            info!("Resume endpoint called - countdown running again");
            Ok(Json(ApiResponse::changed(
                "Timer resumed".to_string(),
                outcome.timer,
            )))
        }
        Ok(outcome) => {
            info!("Resume endpoint called - timer not paused, ignored");
            Ok(Json(ApiResponse::unchanged(
                "Timer is not paused; nothing to resume".to_string(),
                outcome.timer,
            )))
        }
        Err(e) => {
            error!("Failed to resume timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Stop and reset the timer
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.stop_timer() {
        Ok(outcome) if outcome.changed => {
            info!("Stop endpoint called - timer reset");
            Ok(Json(ApiResponse::changed(
                "Timer stopped and reset".to_string(),
                outcome.timer,
            )))
        }
        Ok(outcome) => {
            info!("Stop endpoint called - timer already reset, ignored");
            Ok(Json(ApiResponse::unchanged(
                "Timer is already reset".to_string(),
                outcome.timer,
            )))
        }
        Err(e) => {
            error!("Failed to stop timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /config - Replace timer durations and cycle count
pub async fn config_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigUpdateRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let config = match request.into_config() {
        Ok(config) => config,
        Err(e) => {
            warn!("Rejected configuration update: {}", e);
            return match state.snapshot() {
                Ok(timer) => Ok(Json(ApiResponse::error(e, timer))),
                Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
            };
        }
    };

    match state.update_config(config) {
        Ok(outcome) if outcome.changed => {
            info!("Config endpoint called - timer reset under new configuration");
            Ok(Json(ApiResponse::changed(
                "Configuration updated; timer reset".to_string(),
                outcome.timer,
            )))
        }
        Ok(outcome) => {
            info!("Config endpoint called - new configuration applies from the next phase");
            Ok(Json(ApiResponse::changed(
                "Configuration updated; applies from the next phase".to_string(),
                outcome.timer,
            )))
        }
        Err(e) => {
            error!("Failed to update configuration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current timer state for rendering
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let config = match state.config() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to get timer config: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_command, last_command_time) = state.get_last_command();

    Ok(Json(StatusResponse {
        status_text: timer.status_line(),
        progress_percent: timer.progress_percent(),
        timer,
        config,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_command,
        last_command_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handle GET /about - App metadata and contact link
pub async fn about_handler() -> Json<AboutResponse> {
    Json(AboutResponse::new())
}
