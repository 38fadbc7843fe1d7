//! Runtime configuration
//!
//! [`BotConfig`] is parsed from the command line with environment fallbacks, so a `.env` file
//! (loaded by `main` before parsing) is enough to run the bot. [`BotSettings`] is the subset
//! the dispatcher and the sessions need, with delays as [`Duration`]s.

use std::time::Duration;

use clap::{ArgAction, Parser};

pub const DEFAULT_BASE_URL: &str = "https://lichess.org";
pub const DEFAULT_DEPTH: u32 = 4;
pub const DEFAULT_PORT: u16 = 5000;

/// Wait after a failed seek round or a dropped stream
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);
/// Wait after an accepted seek before seeking again
pub const DEFAULT_RESEEK_DELAY: Duration = Duration::from_secs(30);
/// Wait after the last game finished before seeking again
pub const DEFAULT_RESUME_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_MOVE_RETRIES: u32 = 3;
pub const DEFAULT_MOVE_RETRY_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_RATING_REFRESH: Duration = Duration::from_secs(600);

/// Command line and environment configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "chess_bot", version, about = "Plays rated games on Lichess with a minimax engine")]
pub struct BotConfig {
    /// API token with the bot:play scope
    #[arg(long, env = "LICHESS_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Account name of the bot, compared exactly against player ids
    #[arg(long, env = "BOT_USERNAME")]
    pub username: String,

    #[arg(long, env = "LICHESS_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Search depth in plies
    #[arg(
        long,
        env = "SEARCH_DEPTH",
        default_value_t = DEFAULT_DEPTH,
        value_parser = clap::value_parser!(u32).range(1..=8)
    )]
    pub depth: u32,

    /// Port of the status server
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "RATED", default_value_t = true, action = ArgAction::Set)]
    pub rated: bool,

    #[arg(long, env = "RETRY_DELAY_SECS", default_value_t = DEFAULT_RETRY_DELAY.as_secs())]
    pub retry_delay_secs: u64,

    #[arg(long, env = "RESEEK_DELAY_SECS", default_value_t = DEFAULT_RESEEK_DELAY.as_secs())]
    pub reseek_delay_secs: u64,

    #[arg(long, env = "RESUME_DELAY_SECS", default_value_t = DEFAULT_RESUME_DELAY.as_secs())]
    pub resume_delay_secs: u64,

    /// Attempts per move submission before the move is given up
    #[arg(long, env = "MOVE_RETRIES", default_value_t = DEFAULT_MOVE_RETRIES)]
    pub move_retries: u32,

    #[arg(long, env = "MOVE_RETRY_DELAY_SECS", default_value_t = DEFAULT_MOVE_RETRY_DELAY.as_secs())]
    pub move_retry_delay_secs: u64,

    #[arg(long, env = "RATING_REFRESH_SECS", default_value_t = DEFAULT_RATING_REFRESH.as_secs())]
    pub rating_refresh_secs: u64,
}

impl BotConfig {
    pub fn settings(&self) -> BotSettings {
        BotSettings {
            username: self.username.clone(),
            depth: self.depth,
            rated: self.rated,
            retry_delay: Duration::from_secs(self.retry_delay_secs),
            reseek_delay: Duration::from_secs(self.reseek_delay_secs),
            resume_delay: Duration::from_secs(self.resume_delay_secs),
            move_retries: self.move_retries.max(1),
            move_retry_delay: Duration::from_secs(self.move_retry_delay_secs),
        }
    }

    pub fn rating_refresh(&self) -> Duration {
        Duration::from_secs(self.rating_refresh_secs.max(1))
    }
}

/// Settings shared by the dispatcher, the seek loop and every session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    pub username: String,
    pub depth: u32,
    pub rated: bool,
    pub retry_delay: Duration,
    pub reseek_delay: Duration,
    pub resume_delay: Duration,
    pub move_retries: u32,
    pub move_retry_delay: Duration,
}

impl BotSettings {
    /// Default timings for `username`
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            depth: DEFAULT_DEPTH,
            rated: true,
            retry_delay: DEFAULT_RETRY_DELAY,
            reseek_delay: DEFAULT_RESEEK_DELAY,
            resume_delay: DEFAULT_RESUME_DELAY,
            move_retries: DEFAULT_MOVE_RETRIES,
            move_retry_delay: DEFAULT_MOVE_RETRY_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_arguments() {
        let config =
            BotConfig::try_parse_from(["chess_bot", "--token", "lip_x", "--username", "minimax-bot"])
                .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.rated);
        assert_eq!(config.settings(), BotSettings::new("minimax-bot"));
    }

    #[test]
    fn test_unrated_and_depth_override() {
        let config = BotConfig::try_parse_from([
            "chess_bot",
            "--token",
            "lip_x",
            "--username",
            "minimax-bot",
            "--rated",
            "false",
            "--depth",
            "2",
        ])
        .unwrap();
        let settings = config.settings();
        assert!(!settings.rated);
        assert_eq!(settings.depth, 2);
    }

    #[test]
    fn test_depth_out_of_range_is_rejected() {
        let result = BotConfig::try_parse_from([
            "chess_bot",
            "--token",
            "lip_x",
            "--username",
            "minimax-bot",
            "--depth",
            "0",
        ]);
        assert!(result.is_err());
    }
}
