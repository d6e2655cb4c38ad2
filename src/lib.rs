//! feedban - reconcile firewall rule groups from IP blocklist feeds.
//!
//! A feed is a plain-text list of IP addresses and CIDR ranges, fetched from
//! a local file or an HTTPS location on a per-source cadence. Each cycle the
//! feed is re-parsed, filtered against a whitelist, and bulk-replaced into
//! the firewall rule group owned by that source.
//!
//! The pipeline is fetch ([`fetcher`]) → parse ([`parser`]) → filter
//! ([`allowlist`]) → apply ([`firewall`]), orchestrated per source by
//! [`reconciler`] with rate gating from [`source`].

pub mod allowlist;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod firewall;
pub mod parser;
pub mod reconciler;
pub mod signal;
pub mod source;

pub use error::FeedError;
pub use reconciler::{Reconciler, Updatable, UpdateOutcome};
pub use source::{FeedLocation, FeedSource};
