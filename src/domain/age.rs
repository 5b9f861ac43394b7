//! Mint Age
//!
//! The outcome of an oldest-transaction lookup and the human-readable age
//! derived from it.

use chrono::{DateTime, TimeDelta, Utc};

/// Result of resolving when an address first appeared on chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintAge {
    /// The address has no transaction history
    NotFound,
    /// Oldest transaction located
    Found {
        /// Signature of the oldest transaction
        signature: String,
        /// Slot of the oldest transaction
        slot: u64,
        /// Block instant, `None` when neither the signature page nor
        /// `getBlockTime` could provide it
        minted_at: Option<DateTime<Utc>>,
    },
}

impl MintAge {
    /// Elapsed time between the mint instant and `now`, clamped at zero
    pub fn age_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        match self {
            MintAge::Found { minted_at: Some(at), .. } => Some((now - *at).max(TimeDelta::zero())),
            _ => None,
        }
    }
}

/// Convert a Unix timestamp from the RPC into a UTC instant
pub fn timestamp_to_utc(timestamp: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
}

/// Render a span as `3d 4h 5m`, dropping zero components.
///
/// Spans shorter than a minute render as seconds (`42s`). Negative spans
/// render as `0s`.
pub fn format_age(delta: TimeDelta) -> String {
    let secs = delta.num_seconds().max(0);
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let hours = rem / 3_600;
    let mins = (rem % 3_600) / 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if mins > 0 {
        parts.push(format!("{}m", mins));
    }

    if parts.is_empty() {
        format!("{}s", secs)
    } else {
        parts.join(" ")
    }
}
