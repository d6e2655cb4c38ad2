//! Configuration management for feedban.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::source::{FeedLocation, FeedSource};

/// Parse an interval string like "30m", "4h", "1d" into a duration.
/// ASCII-only to avoid Unicode edge cases when splitting off the suffix.
pub fn parse_interval(interval: &str) -> Option<Duration> {
    if !interval.is_ascii() || interval.len() < 2 {
        return None;
    }
    let (num_part, suffix) = interval.split_at(interval.len() - 1);
    let value: u64 = num_part.parse().ok()?;
    let secs = match suffix {
        "s" => value,
        "m" => value.checked_mul(60)?,
        "h" => value.checked_mul(3600)?,
        "d" => value.checked_mul(86_400)?,
        _ => return None,
    };
    Some(Duration::from_secs(secs))
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configured feed sources.
    pub feeds: Vec<FeedEntry>,

    /// Ranges that must never be blocked, applied to every feed.
    pub whitelist: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds: vec![FeedEntry {
                name_prefix: "AbuseFeed_".to_string(),
                url: Some("https://iplists.firehol.org/files/firehol_level1.netset".to_string()),
                path: None,
                interval: "4h".to_string(),
            }],
            whitelist: default_whitelist(),
        }
    }
}

/// One configured feed: a rule-group prefix, a single location, an interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Prefix naming the firewall rule group this feed owns.
    pub name_prefix: String,

    /// Network location (HTTPS). Mutually exclusive with `path`.
    #[serde(default)]
    pub url: Option<String>,

    /// Local file location. Mutually exclusive with `url`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Minimum time between fetch attempts, e.g. "30m", "4h".
    pub interval: String,
}

impl FeedEntry {
    /// Build the runtime source for this entry.
    pub fn to_source(&self) -> Result<FeedSource, FeedError> {
        let interval = parse_interval(&self.interval).ok_or_else(|| {
            FeedError::Config(format!(
                "feed '{}': invalid interval '{}' (use e.g. '30m', '4h', '1d')",
                self.name_prefix, self.interval
            ))
        })?;

        let location = match (&self.url, &self.path) {
            (Some(url), None) => FeedLocation::http(url.clone()),
            (None, Some(path)) => FeedLocation::file(path.clone()),
            _ => {
                return Err(FeedError::Config(format!(
                    "feed '{}': exactly one of url or path must be set",
                    self.name_prefix
                )))
            }
        };

        Ok(FeedSource::new(self.name_prefix.clone(), location, interval))
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FeedError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            FeedError::Config(format!("read {}: {}", path.as_ref().display(), e))
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            FeedError::Config(format!("parse {}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), FeedError> {
        for feed in &self.feeds {
            if feed.name_prefix.is_empty() {
                return Err(FeedError::Config("feed with empty name_prefix".into()));
            }
            if parse_interval(&feed.interval).is_none() {
                return Err(FeedError::Config(format!(
                    "feed '{}': invalid interval '{}'",
                    feed.name_prefix, feed.interval
                )));
            }
            match (&feed.url, &feed.path) {
                (Some(url), None) => {
                    if !url.starts_with("https://") {
                        return Err(FeedError::Config(format!(
                            "feed '{}': URL must use HTTPS: {}",
                            feed.name_prefix, url
                        )));
                    }
                }
                (None, Some(_)) => {}
                _ => {
                    return Err(FeedError::Config(format!(
                        "feed '{}': exactly one of url or path must be set",
                        feed.name_prefix
                    )))
                }
            }
        }

        for entry in &self.whitelist {
            if entry.parse::<ipnet::IpNet>().is_err()
                && entry.parse::<std::net::IpAddr>().is_err()
            {
                return Err(FeedError::Config(format!(
                    "invalid whitelist entry: {}",
                    entry
                )));
            }
        }

        Ok(())
    }

    /// Parse the configured whitelist entries into ranges.
    pub fn whitelist_ranges(&self) -> Vec<ipnet::IpNet> {
        self.whitelist
            .iter()
            .filter_map(|s| {
                if s.contains('/') {
                    s.parse::<ipnet::IpNet>().ok()
                } else {
                    s.parse::<std::net::IpAddr>().ok().map(ipnet::IpNet::from)
                }
            })
            .collect()
    }
}

fn default_whitelist() -> Vec<String> {
    vec![
        "192.168.0.0/16".to_string(), // RFC1918
        "10.0.0.0/8".to_string(),     // RFC1918
        "172.16.0.0/12".to_string(),  // RFC1918
        "127.0.0.0/8".to_string(),    // Loopback
    ]
}
