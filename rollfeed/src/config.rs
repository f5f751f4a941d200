use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::domain::entities::ChannelInfo;
use crate::error::ConfigError;

/// Sources aggregated when `ROLLFEED_SOURCES` is not set
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://thediplomat.com/feed/",
    "https://www.foreignaffairs.com/rss.xml",
    "https://foreignpolicy.com/feed/",
    "https://evilgodfahim.github.io/ps/combined.xml",
    "https://evilgodfahim.github.io/eco/combined.xml",
    "https://www.eiu.com/n/feed/",
];

pub const DEFAULT_MAX_ITEMS: usize = 500;
pub const DEFAULT_FIRST_RUN_COUNT: usize = 50;
const DEFAULT_UTC_OFFSET_SECS: i32 = 6 * 3600;

/// Local time-of-day window in which the daily digest is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyWindow {
    pub hour: u32,
    /// Width of the window in minutes, starting at `hour:00`
    pub tolerance_minutes: u32,
    pub utc_offset: FixedOffset,
}

impl DailyWindow {
    /// True when `now`, read in the window's fixed offset, falls in
    /// `[hour:00, hour:tolerance)`.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.utc_offset);
        local.hour() == self.hour && local.minute() < self.tolerance_minutes
    }
}

impl Default for DailyWindow {
    fn default() -> Self {
        Self {
            hour: 9,
            tolerance_minutes: 5,
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS)
                .expect("UTC+6 is a valid offset"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Feed URLs, fetched in this order
    pub sources: Vec<String>,
    pub master_file: PathBuf,
    pub daily_file: PathBuf,
    pub state_file: PathBuf,
    /// Maximum items retained in the master feed
    pub max_items: usize,
    /// Items delivered by the very first digest
    pub first_run_count: usize,
    pub daily_window: DailyWindow,
    /// Produce the digest regardless of the daily window
    pub force_digest: bool,
    pub channel_link: String,
    pub channel_description: String,
    pub master_title: String,
    pub daily_title: String,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            master_file: PathBuf::from("feed_master.xml"),
            daily_file: PathBuf::from("daily_feed.xml"),
            state_file: PathBuf::from("last_seen.json"),
            max_items: DEFAULT_MAX_ITEMS,
            first_run_count: DEFAULT_FIRST_RUN_COUNT,
            daily_window: DailyWindow::default(),
            force_digest: false,
            channel_link: "https://evilgodfahim.github.io/".to_string(),
            channel_description: "Aggregated Inoreader feed".to_string(),
            master_title: "Master Feed (Updated every 30 mins)".to_string(),
            daily_title: "Daily Feed (Updated 9 AM BD)".to_string(),
            fetch_timeout: Duration::from_secs(30),
            user_agent: format!("rollfeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup, falling back to
    /// the defaults for anything unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sources = match lookup("ROLLFEED_SOURCES") {
            Some(raw) => parse_sources(&raw),
            None => defaults.sources,
        };

        let hour: u32 = parse_or(&lookup, "ROLLFEED_DAILY_HOUR", defaults.daily_window.hour)?;
        if hour > 23 {
            return Err(invalid("ROLLFEED_DAILY_HOUR", hour, "hour must be 0-23"));
        }

        let tolerance_minutes: u32 = parse_or(
            &lookup,
            "ROLLFEED_DAILY_TOLERANCE_MINUTES",
            defaults.daily_window.tolerance_minutes,
        )?;
        if tolerance_minutes == 0 || tolerance_minutes > 60 {
            return Err(invalid(
                "ROLLFEED_DAILY_TOLERANCE_MINUTES",
                tolerance_minutes,
                "must be 1-60",
            ));
        }

        let offset_hours: i32 = parse_or(
            &lookup,
            "ROLLFEED_UTC_OFFSET_HOURS",
            defaults.daily_window.utc_offset.local_minus_utc() / 3600,
        )?;
        let utc_offset = if (-23..=23).contains(&offset_hours) {
            FixedOffset::east_opt(offset_hours * 3600)
        } else {
            None
        }
        .ok_or_else(|| invalid("ROLLFEED_UTC_OFFSET_HOURS", offset_hours, "must be -23..=23"))?;

        let force_digest = match lookup("ROLLFEED_FORCE_DIGEST") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| invalid("ROLLFEED_FORCE_DIGEST", &raw, "expected true/false"))?,
            None => defaults.force_digest,
        };

        let timeout_secs: u64 = parse_or(
            &lookup,
            "ROLLFEED_FETCH_TIMEOUT_SECS",
            defaults.fetch_timeout.as_secs(),
        )?;

        Ok(Self {
            sources,
            master_file: lookup("ROLLFEED_MASTER_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.master_file),
            daily_file: lookup("ROLLFEED_DAILY_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.daily_file),
            state_file: lookup("ROLLFEED_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_file),
            max_items: parse_or(&lookup, "ROLLFEED_MAX_ITEMS", defaults.max_items)?,
            first_run_count: parse_or(
                &lookup,
                "ROLLFEED_FIRST_RUN_COUNT",
                defaults.first_run_count,
            )?,
            daily_window: DailyWindow {
                hour,
                tolerance_minutes,
                utc_offset,
            },
            force_digest,
            channel_link: lookup("ROLLFEED_CHANNEL_LINK").unwrap_or(defaults.channel_link),
            channel_description: lookup("ROLLFEED_CHANNEL_DESCRIPTION")
                .unwrap_or(defaults.channel_description),
            master_title: lookup("ROLLFEED_MASTER_TITLE").unwrap_or(defaults.master_title),
            daily_title: lookup("ROLLFEED_DAILY_TITLE").unwrap_or(defaults.daily_title),
            fetch_timeout: Duration::from_secs(timeout_secs),
            user_agent: lookup("ROLLFEED_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }

    /// Channel header for the master document
    pub fn master_channel(&self) -> ChannelInfo {
        ChannelInfo::new(
            &self.master_title,
            &self.channel_link,
            &self.channel_description,
        )
    }

    /// Channel header for the daily digest document
    pub fn daily_channel(&self) -> ChannelInfo {
        ChannelInfo::new(
            &self.daily_title,
            &self.channel_link,
            &self.channel_description,
        )
    }
}

fn parse_sources(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(key, &raw, e)),
        None => Ok(default),
    }
}

fn invalid(key: &'static str, value: impl Display, reason: impl Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
