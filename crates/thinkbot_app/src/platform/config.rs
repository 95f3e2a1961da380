//! Command line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use thinkbot_client::{ClientSettings, DEFAULT_BASE_URL};

#[derive(Debug, Clone, Parser)]
#[command(name = "thinkbot", version, about = "Terminal chat client for a ThinkBot server")]
pub struct AppConfig {
    /// Server base URL; endpoint paths are appended to it.
    #[arg(long, env = "THINKBOT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Initial endpoint selector value: answer, kbanswer or search.
    #[arg(long, env = "THINKBOT_ENDPOINT", default_value = "answer")]
    pub endpoint: String,

    /// Client-side request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Log file; the terminal itself is owned by the UI.
    #[arg(long, default_value = "./thinkbot.log")]
    pub log_file: PathBuf,

    #[arg(long, default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..ClientSettings::default()
        }
    }
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    thinkbot_logging::parse_level(value).ok_or_else(|| format!("unknown log level `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_server_contract() {
        let config = AppConfig::try_parse_from(["thinkbot"]).unwrap();
        let settings = config.client_settings();
        assert_eq!(settings.request_timeout, Duration::from_secs(60));
        assert_eq!(config.endpoint, "answer");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn flags_override_defaults() {
        let config = AppConfig::try_parse_from([
            "thinkbot",
            "--base-url",
            "http://bot.local:9000",
            "--endpoint",
            "kbanswer",
            "--timeout-secs",
            "5",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let settings = config.client_settings();
        assert_eq!(settings.base_url, "http://bot.local:9000");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(AppConfig::try_parse_from(["thinkbot", "--log-level", "chatty"]).is_err());
    }
}
