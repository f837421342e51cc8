use std::env;
use std::time::Duration;

use chrono::{DateTime, Utc};
use url::Url;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub feed: FeedConfig,
    pub allowance: AllowanceConfig,
    pub window: ObservationWindow,
    /// Cadence of the background refresh loop
    pub poll_interval: Duration,
    /// Symbol whose presence in a post's text makes it qualifying
    pub marker: String,
    /// Identity tracked at startup; can be replaced at runtime via the API
    pub fid: Option<u64>,
}

/// Feed API client configuration
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub base_url: Url,
    /// Static credential headers expected by the feed API
    pub api_key: String,
    pub client_id: String,
    pub timeout: Duration,
}

/// Daily allowance configuration
#[derive(Debug, Clone)]
pub struct AllowanceConfig {
    /// Max qualifying outgoing actions credited per reset cycle
    pub daily_quota: u32,
    /// UTC hour at which the daily counter resets (0-23)
    pub reset_hour_utc: u32,
}

/// Fixed historical interval over which events are counted.
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy)]
pub struct ObservationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

const DEFAULT_FEED_URL: &str = "https://api.neynar.com/v2/farcaster/feed";
const DEFAULT_WINDOW_START: &str = "2025-02-01T00:00:00Z";
const DEFAULT_WINDOW_END: &str = "2025-12-31T23:59:59Z";
const DEFAULT_MARKER: &str = "\u{1F95C}"; // 🥜

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            feed: FeedConfig::from_env()?,
            allowance: AllowanceConfig::from_env()?,
            window: ObservationWindow::from_env()?,
            poll_interval: Duration::from_secs(
                env::var("POLL_INTERVAL_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .unwrap_or(60)
                    .max(1),
            ),
            marker: env::var("MARKER_TOKEN").unwrap_or_else(|_| DEFAULT_MARKER.to_string()),
            fid: match env::var("TRACKED_FID") {
                Ok(raw) => Some(raw.parse().map_err(|_| ConfigError::InvalidFid)?),
                Err(_) => None,
            },
        })
    }
}

impl FeedConfig {
    /// Load feed client configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = env::var("FEED_API_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());
        let base_url = Url::parse(&raw_url).map_err(|_| ConfigError::InvalidFeedUrl)?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ConfigError::InvalidFeedUrl);
        }

        Ok(Self {
            base_url,
            api_key: env::var("NEYNAR_API_KEY").map_err(|_| ConfigError::MissingApiKey)?,
            client_id: env::var("NEYNAR_CLIENT_ID").map_err(|_| ConfigError::MissingClientId)?,
            timeout: Duration::from_secs(
                env::var("FEED_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
            ),
        })
    }
}

impl AllowanceConfig {
    /// Load allowance configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let daily_quota = env::var("DAILY_ALLOWANCE")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        let reset_hour_utc: u32 = env::var("RESET_HOUR_UTC")
            .unwrap_or_else(|_| "11".to_string())
            .parse()
            .unwrap_or(11);

        if reset_hour_utc > 23 {
            return Err(ConfigError::InvalidResetHour);
        }

        Ok(Self {
            daily_quota,
            reset_hour_utc,
        })
    }
}

impl ObservationWindow {
    /// Load the observation window from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let start = parse_instant(
            &env::var("WINDOW_START").unwrap_or_else(|_| DEFAULT_WINDOW_START.to_string()),
        )?;
        let end = parse_instant(
            &env::var("WINDOW_END").unwrap_or_else(|_| DEFAULT_WINDOW_END.to_string()),
        )?;

        if start > end {
            return Err(ConfigError::InvalidWindow);
        }

        Ok(Self { start, end })
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, ConfigError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ConfigError::InvalidWindow)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidFeedUrl,
    MissingApiKey,
    MissingClientId,
    InvalidResetHour,
    InvalidWindow,
    InvalidFid,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid number"),
            ConfigError::InvalidFeedUrl => {
                write!(f, "FEED_API_URL must be a valid http(s) URL")
            }
            ConfigError::MissingApiKey => {
                write!(f, "NEYNAR_API_KEY environment variable is required")
            }
            ConfigError::MissingClientId => {
                write!(f, "NEYNAR_CLIENT_ID environment variable is required")
            }
            ConfigError::InvalidResetHour => {
                write!(f, "RESET_HOUR_UTC must be an hour between 0 and 23")
            }
            ConfigError::InvalidWindow => {
                write!(
                    f,
                    "WINDOW_START/WINDOW_END must be RFC 3339 instants with start <= end"
                )
            }
            ConfigError::InvalidFid => write!(f, "TRACKED_FID must be a valid number"),
        }
    }
}

impl std::error::Error for ConfigError {}
