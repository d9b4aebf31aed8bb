use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_url: Option<String>,
    pub preferences_ttl_secs: u64,
    pub agent_command: Vec<String>,
    pub agent_timeout: Duration,
    pub static_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let agent_command = match std::env::var("AGENT_CLI") {
            Ok(command) if !command.trim().is_empty() => {
                command.split_whitespace().map(str::to_string).collect()
            }
            _ => default_agent_command(),
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            redis_url: std::env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            preferences_ttl_secs: std::env::var("PREFERENCES_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()?,
            agent_command,
            agent_timeout: Duration::from_secs(
                std::env::var("AGENT_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()?,
            ),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string())
                .into(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// This binary's own `invoke` subcommand, or `agentcore invoke` if the path is unknown.
fn default_agent_command() -> Vec<String> {
    match std::env::current_exe() {
        Ok(exe) => vec![exe.to_string_lossy().into_owned(), "invoke".to_string()],
        Err(_) => vec!["agentcore".to_string(), "invoke".to_string()],
    }
}
