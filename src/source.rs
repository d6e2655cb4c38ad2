//! Feed source configuration, identity, and rate gating.

use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Where a feed's text comes from: a local file or an HTTP(S) base address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedLocation {
    /// Local file read in full as text.
    File(PathBuf),
    /// Network base address, slash-terminated (see [`FeedLocation::http`]).
    Http(String),
}

impl FeedLocation {
    /// Build a network location, normalizing the base address to end with a
    /// trailing `/` so relative retrieval resolves correctly.
    pub fn http(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        FeedLocation::Http(base)
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        FeedLocation::File(path.into())
    }
}

impl std::fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedLocation::File(path) => write!(f, "{}", path.display()),
            FeedLocation::Http(url) => f.write_str(url),
        }
    }
}

/// One configured blocklist feed and the firewall rule group it owns.
///
/// Identity: two sources are the same configured source iff `name_prefix`,
/// `location`, and `interval` are all equal. Hashing uses only `location`,
/// so equal sources hash equal while sources sharing a location may collide.
/// The mutable `last_run` bookkeeping never participates in identity.
#[derive(Debug, Clone)]
pub struct FeedSource {
    name_prefix: String,
    location: FeedLocation,
    interval: Duration,
    last_run: Option<Instant>,
}

impl FeedSource {
    pub fn new(name_prefix: impl Into<String>, location: FeedLocation, interval: Duration) -> Self {
        Self {
            name_prefix: name_prefix.into(),
            location,
            interval,
            last_run: None,
        }
    }

    /// Firewall rule group this source owns, e.g. `"AbuseFeed_"`.
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    pub fn location(&self) -> &FeedLocation {
        &self.location
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the last cycle was attempted, if any.
    pub fn last_run(&self) -> Option<Instant> {
        self.last_run
    }

    /// Rate gate: decide whether a cycle may start at `now`.
    ///
    /// Returns true and records `now` as the new last-run time iff the
    /// source never ran or at least `interval` has elapsed. `last_run`
    /// advances at the *start* of the decision, so a failed or cancelled
    /// cycle still consumes the interval.
    ///
    /// Must be driven by a single serialized caller; concurrent calls on the
    /// same source would race on `last_run` and are not supported. The outer
    /// scheduler is responsible for upholding that.
    pub fn should_run(&mut self, now: Instant) -> bool {
        let due = match self.last_run {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_run = Some(now);
        }
        due
    }
}

impl PartialEq for FeedSource {
    fn eq(&self, other: &Self) -> bool {
        self.name_prefix == other.name_prefix
            && self.location == other.location
            && self.interval == other.interval
    }
}

impl Eq for FeedSource {}

impl Hash for FeedSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(source: &FeedSource) -> u64 {
        let mut hasher = DefaultHasher::new();
        source.hash(&mut hasher);
        hasher.finish()
    }

    fn source(prefix: &str, url: &str, secs: u64) -> FeedSource {
        FeedSource::new(prefix, FeedLocation::http(url), Duration::from_secs(secs))
    }

    #[test]
    fn test_http_location_normalized_with_trailing_slash() {
        assert_eq!(
            FeedLocation::http("https://feeds.example.com/list"),
            FeedLocation::Http("https://feeds.example.com/list/".to_string())
        );
        // Already terminated: unchanged.
        assert_eq!(
            FeedLocation::http("https://feeds.example.com/list/"),
            FeedLocation::Http("https://feeds.example.com/list/".to_string())
        );
    }

    #[test]
    fn test_identical_configs_compare_equal() {
        let a = source("AbuseFeed_", "https://example.com/feed", 3600);
        let b = source("AbuseFeed_", "https://example.com/feed", 3600);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_same_location_different_prefix_hash_equal_not_equal() {
        let a = source("AbuseFeed_", "https://example.com/feed", 3600);
        let b = source("OtherFeed_", "https://example.com/feed", 3600);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_interval_participates_in_equality() {
        let a = source("AbuseFeed_", "https://example.com/feed", 3600);
        let b = source("AbuseFeed_", "https://example.com/feed", 7200);
        assert_ne!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_last_run_excluded_from_equality() {
        let mut a = source("AbuseFeed_", "https://example.com/feed", 3600);
        let b = a.clone();
        assert!(a.should_run(Instant::now()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_run_always_allowed() {
        let mut src = source("AbuseFeed_", "https://example.com/feed", 3600);
        assert!(src.last_run().is_none());
        assert!(src.should_run(Instant::now()));
        assert!(src.last_run().is_some());
    }

    #[test]
    fn test_gate_suppresses_until_interval_elapsed() {
        let mut src = source("AbuseFeed_", "https://example.com/feed", 60);
        let t0 = Instant::now();
        assert!(src.should_run(t0));

        // Half the interval: suppressed, last_run untouched.
        assert!(!src.should_run(t0 + Duration::from_secs(30)));
        assert_eq!(src.last_run(), Some(t0));

        // Exactly the interval: eligible again.
        assert!(src.should_run(t0 + Duration::from_secs(60)));
        assert_eq!(src.last_run(), Some(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn test_gate_advances_before_work_not_after() {
        // The gate commits last_run at decision time; whether the cycle then
        // fails is irrelevant to the next eligibility check.
        let mut src = source("AbuseFeed_", "https://example.com/feed", 60);
        let t0 = Instant::now();
        assert!(src.should_run(t0));
        assert!(!src.should_run(t0 + Duration::from_secs(59)));
        assert!(src.should_run(t0 + Duration::from_secs(61)));
    }

    #[test]
    fn test_gate_with_past_timestamp_is_safe() {
        // A now earlier than last_run must not panic or re-arm the gate.
        let mut src = source("AbuseFeed_", "https://example.com/feed", 60);
        let t0 = Instant::now() + Duration::from_secs(10);
        assert!(src.should_run(t0));
        assert!(!src.should_run(Instant::now()));
    }

    #[test]
    fn test_zero_interval_always_runs() {
        let mut src = source("AbuseFeed_", "https://example.com/feed", 0);
        let t0 = Instant::now();
        assert!(src.should_run(t0));
        assert!(src.should_run(t0));
    }

    #[test]
    fn test_file_location_display() {
        let loc = FeedLocation::file("/var/lib/feedban/feed.txt");
        assert_eq!(loc.to_string(), "/var/lib/feedban/feed.txt");
    }
}
