//! Whitelist filtering of candidate ranges.
//!
//! The whitelist evaluator is an optional collaborator: when none is
//! configured nothing is whitelisted and candidates pass through untouched.
//! Filtering happens per parsed range, never per feed line, so feed
//! formatting cannot bypass a whitelist decision.

use ipnet::IpNet;

#[cfg(test)]
use mockall::automock;

/// Collaborator contract answering "must this range never be blocked?".
///
/// Absence of a checker means "nothing is whitelisted" — model that as
/// `None`, not as an always-false implementation.
#[cfg_attr(test, automock)]
pub trait WhitelistChecker: Send + Sync {
    /// True if the range must be excluded from blocking.
    fn is_whitelisted(&self, range: &IpNet) -> bool;
}

/// Drop whitelisted ranges from a candidate set, preserving order.
pub fn filter_whitelisted(
    candidates: Vec<IpNet>,
    checker: Option<&dyn WhitelistChecker>,
) -> Vec<IpNet> {
    match checker {
        None => candidates,
        Some(checker) => candidates
            .into_iter()
            .filter(|range| !checker.is_whitelisted(range))
            .collect(),
    }
}

/// Containment-based whitelist over a fixed set of never-block ranges.
///
/// A candidate is whitelisted when some entry fully contains it. Partial
/// overlaps do not whitelist: the candidate is kept.
#[derive(Debug, Clone, Default)]
pub struct StaticWhitelist {
    entries: Vec<IpNet>,
}

impl StaticWhitelist {
    pub fn new(entries: Vec<IpNet>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WhitelistChecker for StaticWhitelist {
    fn is_whitelisted(&self, range: &IpNet) -> bool {
        self.entries.iter().any(|entry| contains(entry, range))
    }
}

/// Check if `container` fully contains `contained` (same address family).
fn contains(container: &IpNet, contained: &IpNet) -> bool {
    match (container, contained) {
        (IpNet::V4(c), IpNet::V4(t)) => c.contains(t),
        (IpNet::V6(c), IpNet::V6(t)) => c.contains(t),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> IpNet {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_checker_passes_everything() {
        let candidates = vec![net("1.2.3.4/32"), net("10.0.0.0/8")];
        let out = filter_whitelisted(candidates.clone(), None);
        assert_eq!(out, candidates);
    }

    #[test]
    fn test_whitelisted_range_excluded_order_preserved() {
        let candidates = vec![net("1.1.1.0/24"), net("10.0.0.1/32"), net("2.2.2.0/24")];
        let whitelist = StaticWhitelist::new(vec![net("10.0.0.0/8")]);
        let out = filter_whitelisted(candidates, Some(&whitelist));
        assert_eq!(out, vec![net("1.1.1.0/24"), net("2.2.2.0/24")]);
    }

    #[test]
    fn test_partial_overlap_is_kept() {
        // Candidate is wider than the whitelist entry: not fully contained,
        // so it stays blocked.
        let whitelist = StaticWhitelist::new(vec![net("10.1.0.0/16")]);
        let out = filter_whitelisted(vec![net("10.0.0.0/8")], Some(&whitelist));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_family_mismatch_never_whitelists() {
        let whitelist = StaticWhitelist::new(vec![net("::/0")]);
        let out = filter_whitelisted(vec![net("1.2.3.4/32")], Some(&whitelist));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_empty_whitelist() {
        let whitelist = StaticWhitelist::default();
        assert!(whitelist.is_empty());
        let out = filter_whitelisted(vec![net("1.2.3.4/32")], Some(&whitelist));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_checker_queried_per_range() {
        let mut mock = MockWhitelistChecker::new();
        mock.expect_is_whitelisted()
            .times(3)
            .returning(|range| range == &"10.0.0.1/32".parse::<IpNet>().unwrap());

        let candidates = vec![net("1.1.1.1/32"), net("10.0.0.1/32"), net("2.2.2.2/32")];
        let out = filter_whitelisted(candidates, Some(&mock));
        assert_eq!(out, vec![net("1.1.1.1/32"), net("2.2.2.2/32")]);
    }

    #[test]
    fn test_duplicates_filtered_individually() {
        let whitelist = StaticWhitelist::new(vec![net("10.0.0.0/8")]);
        let candidates = vec![net("10.0.0.1/32"), net("1.1.1.1/32"), net("10.0.0.1/32")];
        let out = filter_whitelisted(candidates, Some(&whitelist));
        assert_eq!(out, vec![net("1.1.1.1/32")]);
    }
}
