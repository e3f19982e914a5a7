// Runtime configuration
// Values come from the process environment, optionally seeded from `.env`

use std::net::SocketAddr;
use thiserror::Error;

use crate::domain::group::team_balance::MinPlayersPolicy;
use crate::notifications::DEFAULT_DURATION_MS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEV_JWT_SECRET: &str = "dev-secret-key";

/// Environment variables read by [`AppConfig::from_env`]
pub const ENV_KEYS: [&str; 4] = [
    "MATCHUP_BIND_ADDR",
    "JWT_SECRET",
    "MATCHUP_MIN_PLAYERS_POLICY",
    "MATCHUP_NOTIFICATION_DURATION_MS",
];

/// Keys whose values are masked by [`mask_value`]
const SECRET_MARKERS: [&str; 5] = ["SECRET", "PASSWORD", "TOKEN", "KEY", "DATABASE_URL"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub min_players_policy: MinPlayersPolicy,
    pub notification_duration_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            min_players_policy: MinPlayersPolicy::default(),
            notification_duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

impl AppConfig {
    /// Reads configuration from environment variables
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `MATCHUP_BIND_ADDR` | `0.0.0.0:3000` |
    /// | `JWT_SECRET` | development secret (logged as a warning) |
    /// | `MATCHUP_MIN_PLAYERS_POLICY` | `reject` |
    /// | `MATCHUP_NOTIFICATION_DURATION_MS` | `5000` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("MATCHUP_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "MATCHUP_BIND_ADDR",
                message: e.to_string(),
            })?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            DEV_JWT_SECRET.to_string()
        });

        let min_players_policy = match lookup("MATCHUP_MIN_PLAYERS_POLICY") {
            Some(raw) => raw.parse::<MinPlayersPolicy>().map_err(|message| ConfigError::Invalid {
                key: "MATCHUP_MIN_PLAYERS_POLICY",
                message,
            })?,
            None => MinPlayersPolicy::default(),
        };

        let notification_duration_ms = match lookup("MATCHUP_NOTIFICATION_DURATION_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "MATCHUP_NOTIFICATION_DURATION_MS",
                message: e.to_string(),
            })?,
            None => DEFAULT_DURATION_MS,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            min_players_policy,
            notification_duration_ms,
        })
    }
}

/// Hides values of secret-looking keys for display
///
/// Keeps the first two characters of longer values so operators can tell
/// which secret is loaded.
///
/// # Example
/// ```
/// use matchup_api::config::mask_value;
///
/// assert_eq!(mask_value("JWT_SECRET", "supersecret"), "su*********");
/// assert_eq!(mask_value("MATCHUP_BIND_ADDR", "0.0.0.0:3000"), "0.0.0.0:3000");
/// ```
pub fn mask_value(key: &str, value: &str) -> String {
    let upper = key.to_ascii_uppercase();
    if !SECRET_MARKERS.iter().any(|marker| upper.contains(marker)) {
        return value.to_string();
    }

    let len = value.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    let visible: String = value.chars().take(2).collect();
    format!("{}{}", visible, "*".repeat(len - 2))
}
