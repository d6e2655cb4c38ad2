//! Line-oriented feed text parsing.
//!
//! Threat-intelligence feeds come in several plaintext dialects: one IP or
//! CIDR per line, with comments introduced by `#` (FireHOL/Spamhaus), `'` or
//! `REM` (Windows-originated lists). The parser accepts all three, skips
//! anything it cannot parse, and never fails as a whole.

use ipnet::IpNet;
use std::net::IpAddr;

/// Hard cap on lines considered per fetch. Feeds beyond this are truncated
/// silently; the cap bounds CPU and memory against adversarial feed sizes.
pub const MAX_FEED_LINES: usize = 10_000;

/// Parse feed text into address ranges, in encountered order.
///
/// Rules, applied per line after trimming whitespace:
/// - lines past [`MAX_FEED_LINES`] are ignored;
/// - empty lines and lines starting with `#`, `'`, or `REM` are skipped;
/// - anything else must parse as a single IP or CIDR or is skipped silently.
///
/// Duplicates are kept and the result is not sorted; the submitted group
/// mirrors the feed as published.
pub fn parse_feed(text: &str) -> Vec<IpNet> {
    let mut ranges = Vec::new();

    for line in text.lines().take(MAX_FEED_LINES) {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }
        if let Some(net) = parse_entry(trimmed) {
            ranges.push(net);
        }
    }

    ranges
}

/// Comment conventions from the feed dialects we ingest.
fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with('\'') || line.starts_with("REM")
}

/// Parse a single entry as CIDR or bare address (host network).
fn parse_entry(entry: &str) -> Option<IpNet> {
    if entry.contains('/') {
        entry.parse::<IpNet>().ok()
    } else {
        entry.parse::<IpAddr>().ok().map(IpNet::from)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ipv4_string_strategy() -> impl Strategy<Value = String> {
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d))
    }

    fn ipv4_cidr_string_strategy() -> impl Strategy<Value = String> {
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255, 0u8..=32)
            .prop_map(|(a, b, c, d, prefix)| format!("{}.{}.{}.{}/{}", a, b, c, d, prefix))
    }

    fn feed_content_strategy(max_lines: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                ipv4_string_strategy(),
                ipv4_cidr_string_strategy(),
                Just("# comment".to_string()),
                Just("' comment".to_string()),
                Just("REM comment".to_string()),
                Just("".to_string()),
                Just("garbage".to_string()),
            ],
            0..max_lines,
        )
        .prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        /// Valid bare addresses always produce exactly one host network.
        #[test]
        fn prop_valid_ip_produces_host_net(ip in ipv4_string_strategy()) {
            let ranges = parse_feed(&format!("{}\n", ip));
            prop_assert_eq!(ranges.len(), 1);
            prop_assert_eq!(ranges[0].prefix_len(), 32);
        }

        /// Valid CIDRs parse when the prefix respects the host bits.
        #[test]
        fn prop_valid_cidr_no_panic(cidr in ipv4_cidr_string_strategy()) {
            let _ = parse_feed(&format!("{}\n", cidr));
        }

        /// Arbitrary feed content never panics and never exceeds the cap.
        #[test]
        fn prop_arbitrary_content_bounded(content in feed_content_strategy(200)) {
            let ranges = parse_feed(&content);
            prop_assert!(ranges.len() <= MAX_FEED_LINES);
        }

        /// Every parsed range round-trips through its string form.
        #[test]
        fn prop_parsed_ranges_are_valid(content in feed_content_strategy(100)) {
            for net in parse_feed(&content) {
                prop_assert!(net.to_string().parse::<IpNet>().is_ok());
            }
        }
    }
}
