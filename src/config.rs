//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::TimerConfig;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "study-bell")]
#[command(about = "A state-managed HTTP server driving a Pomodoro study timer")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "17025")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Study interval in minutes
    #[arg(short, long, default_value_t = 25, value_parser = clap::value_parser!(u64).range(1..=60))]
    pub study: u64,

    /// Short break in minutes
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..=30))]
    pub short_break: u64,

    /// Long break in minutes
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..=60))]
    pub long_break: u64,

    /// Study cycles before a long break
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub cycles: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Timer configuration from the minute arguments.
    /// Clap has already bounds-checked the values.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            study_seconds: self.study * 60,
            short_break_seconds: self.short_break * 60,
            long_break_seconds: self.long_break * 60,
            cycles_per_long_break: self.cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_pomodoro() {
        let config = Config::try_parse_from(["study-bell"]).unwrap();
        assert_eq!(config.study, 25);
        assert_eq!(config.short_break, 5);
        assert_eq!(config.long_break, 15);
        assert_eq!(config.cycles, 4);
        assert_eq!(config.timer_config(), TimerConfig::default());
    }

    #[test]
    fn out_of_range_minutes_are_rejected() {
        assert!(Config::try_parse_from(["study-bell", "--study", "0"]).is_err());
        assert!(Config::try_parse_from(["study-bell", "--study", "61"]).is_err());
        assert!(Config::try_parse_from(["study-bell", "--short-break", "31"]).is_err());
        assert!(Config::try_parse_from(["study-bell", "--cycles", "11"]).is_err());
        assert!(Config::try_parse_from(["study-bell", "--cycles", "3"]).is_ok());
    }
}
