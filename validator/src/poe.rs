// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Proof of existence store.

use crate::DiagnosticData;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use der::DateTime;

/// The instants at which tokens are proven to have existed.
///
/// Tokens without any recorded instant have no proof of existence.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProofOfExistence {
    proofs: BTreeMap<String, BTreeSet<DateTime>>,
}

impl ProofOfExistence {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the valid timestamps of `data`.
    ///
    /// Each valid timestamp proves every token it covers existed at its
    /// production time. Timestamps that failed validation prove nothing.
    pub fn extract(data: &DiagnosticData) -> Self {
        let mut poe = Self::new();
        for timestamp in data.timestamps().iter().filter(|t| t.is_valid()) {
            for id in timestamp.covered_tokens() {
                poe.add(id.as_str(), timestamp.production_time());
            }
        }
        poe
    }

    /// Record that token `id` existed at `time`.
    pub fn add(&mut self, id: impl Into<String>, time: DateTime) {
        self.proofs.entry(id.into()).or_default().insert(time);
    }

    /// Returns `true` when token `id` is proven to exist at or before `time`.
    pub fn exists_at_or_before(&self, id: &str, time: DateTime) -> bool {
        self.earliest_at_or_before(id, time).is_some()
    }

    /// The earliest proof for token `id` at or before `time`.
    pub fn earliest_at_or_before(&self, id: &str, time: DateTime) -> Option<DateTime> {
        self.proofs
            .get(id)
            .and_then(|times| times.first())
            .filter(|earliest| **earliest <= time)
            .copied()
    }

    /// Returns `true` when token `id` is proven to exist strictly before
    /// `time`.
    pub fn exists_before(&self, id: &str, time: DateTime) -> bool {
        self.proofs
            .get(id)
            .and_then(|times| times.first())
            .is_some_and(|earliest| *earliest < time)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TimestampToken;

    fn time(text: &str) -> DateTime {
        text.parse().expect("Failed to parse time")
    }

    #[test]
    fn unknown_token_has_no_proof() {
        let poe = ProofOfExistence::new();
        assert!(!poe.exists_at_or_before("S-1", time("2030-01-01T00:00:00Z")));
        assert_eq!(poe.earliest_at_or_before("S-1", time("2030-01-01T00:00:00Z")), None);
    }

    #[test]
    fn proof_at_the_instant_counts() {
        let mut poe = ProofOfExistence::new();
        poe.add("S-1", time("2024-01-01T00:00:00Z"));
        assert!(poe.exists_at_or_before("S-1", time("2024-01-01T00:00:00Z")));
        assert!(!poe.exists_at_or_before("S-1", time("2023-12-31T23:59:59Z")));
        assert!(!poe.exists_before("S-1", time("2024-01-01T00:00:00Z")));
        assert!(poe.exists_before("S-1", time("2024-01-01T00:00:01Z")));
    }

    #[test]
    fn earliest_proof_wins() {
        let mut poe = ProofOfExistence::new();
        poe.add("S-1", time("2025-01-01T00:00:00Z"));
        poe.add("S-1", time("2023-01-01T00:00:00Z"));
        poe.add("S-1", time("2024-01-01T00:00:00Z"));
        assert_eq!(
            poe.earliest_at_or_before("S-1", time("2030-01-01T00:00:00Z")),
            Some(time("2023-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn extract_skips_invalid_timestamps() {
        let valid = TimestampToken::new("T-1", time("2023-01-01T00:00:00Z"), ["S-1", "C-1"]);
        let invalid = TimestampToken::new("T-2", time("2022-01-01T00:00:00Z"), ["S-1"])
            .with_valid(false);
        let data = DiagnosticData::new([], [], [], [valid, invalid]);
        let poe = ProofOfExistence::extract(&data);
        let now = time("2030-01-01T00:00:00Z");
        assert_eq!(
            poe.earliest_at_or_before("S-1", now),
            Some(time("2023-01-01T00:00:00Z"))
        );
        assert!(poe.exists_at_or_before("C-1", now));
        assert!(!poe.exists_at_or_before("T-1", now));
    }
}
