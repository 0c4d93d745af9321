//! Study Bell - A state-managed HTTP server driving a Pomodoro study timer
//!
//! This library provides the Pomodoro timer core (study, short break, long
//! break rotation), the background ticking task that counts it down, and the
//! HTTP shell boundary any client renders it through.

pub mod api;
pub mod config;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
