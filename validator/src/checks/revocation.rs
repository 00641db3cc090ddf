// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Checks about the revocation data of a certificate.
//!
//! These take the revocation data as an `Option` since a certificate may not
//! have any.

use crate::{Check, Indication, MessageTag, RevocationToken, SubIndication};
use core::time::Duration;
use der::DateTime;

/// Checks that revocation data is present.
#[derive(Clone, Copy, Debug)]
pub struct RevocationDataAvailableCheck<'a> {
    revocation: Option<&'a RevocationToken>,
}

impl<'a> RevocationDataAvailableCheck<'a> {
    /// Create a new instance.
    pub fn new(revocation: Option<&'a RevocationToken>) -> Self {
        Self { revocation }
    }
}

impl Check for RevocationDataAvailableCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::RevocationDataAvailable
    }

    fn is_valid(&self) -> bool {
        self.revocation.is_some()
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::TryLater)
    }
}

/// Checks that the revocation data comes from a trusted issuer.
#[derive(Clone, Copy, Debug)]
pub struct RevocationDataTrustedCheck<'a> {
    revocation: Option<&'a RevocationToken>,
}

impl<'a> RevocationDataTrustedCheck<'a> {
    /// Create a new instance.
    pub fn new(revocation: Option<&'a RevocationToken>) -> Self {
        Self { revocation }
    }
}

impl Check for RevocationDataTrustedCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::RevocationDataTrusted
    }

    fn is_valid(&self) -> bool {
        self.revocation.is_some_and(RevocationToken::is_trusted)
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::TryLater)
    }
}

/// Checks that the revocation data is no older than a maximum age.
#[derive(Clone, Copy, Debug)]
pub struct RevocationFreshnessCheck<'a> {
    revocation: Option<&'a RevocationToken>,
    time: DateTime,
    max_age: Duration,
}

impl<'a> RevocationFreshnessCheck<'a> {
    /// Create a new instance.
    ///
    /// # Arguments
    /// * `revocation` - The revocation data to check
    /// * `time` - The validation time the age is relative to
    /// * `max_age` - The oldest the revocation data may be
    pub fn new(revocation: Option<&'a RevocationToken>, time: DateTime, max_age: Duration) -> Self {
        Self {
            revocation,
            time,
            max_age,
        }
    }
}

impl Check for RevocationFreshnessCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::RevocationFreshness
    }

    fn is_valid(&self) -> bool {
        self.revocation.is_some_and(|revocation| {
            let age = self
                .time
                .unix_duration()
                .saturating_sub(revocation.production_date().unix_duration());
            age <= self.max_age
        })
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::TryLater)
    }
}

/// Checks that the signing certificate is not revoked at a time.
#[derive(Clone, Copy, Debug)]
pub struct CertificateNotRevokedCheck<'a> {
    revocation: Option<&'a RevocationToken>,
    time: DateTime,
}

impl<'a> CertificateNotRevokedCheck<'a> {
    /// Create a new instance.
    pub fn new(revocation: Option<&'a RevocationToken>, time: DateTime) -> Self {
        Self { revocation, time }
    }
}

impl Check for CertificateNotRevokedCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::CertificateNotRevoked
    }

    fn is_valid(&self) -> bool {
        !self
            .revocation
            .is_some_and(|revocation| revocation.is_revoked_at(self.time))
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::RevokedNoPoe)
    }
}

/// Checks that the signing certificate is not suspended.
#[derive(Clone, Copy, Debug)]
pub struct CertificateNotOnHoldCheck<'a> {
    revocation: Option<&'a RevocationToken>,
}

impl<'a> CertificateNotOnHoldCheck<'a> {
    /// Create a new instance.
    pub fn new(revocation: Option<&'a RevocationToken>) -> Self {
        Self { revocation }
    }
}

impl Check for CertificateNotOnHoldCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::CertificateNotOnHold
    }

    fn is_valid(&self) -> bool {
        !self.revocation.is_some_and(RevocationToken::is_on_hold)
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::TryLater)
    }
}

/// Checks that a CA certificate is not revoked at a time.
#[derive(Clone, Copy, Debug)]
pub struct IntermediateCertificateNotRevokedCheck<'a> {
    revocation: Option<&'a RevocationToken>,
    time: DateTime,
}

impl<'a> IntermediateCertificateNotRevokedCheck<'a> {
    /// Create a new instance.
    pub fn new(revocation: Option<&'a RevocationToken>, time: DateTime) -> Self {
        Self { revocation, time }
    }
}

impl Check for IntermediateCertificateNotRevokedCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::IntermediateCertificateNotRevoked
    }

    fn is_valid(&self) -> bool {
        !self
            .revocation
            .is_some_and(|revocation| revocation.is_revoked_at(self.time))
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::RevokedCaNoPoe)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::RevocationReason;
    use yare::parameterized;

    fn time(text: &str) -> DateTime {
        text.parse().expect("Failed to parse time")
    }

    #[test]
    fn missing_revocation_data() {
        assert!(!RevocationDataAvailableCheck::new(None).is_valid());
        assert!(!RevocationDataTrustedCheck::new(None).is_valid());
        let now = time("2025-01-01T00:00:00Z");
        assert!(!RevocationFreshnessCheck::new(None, now, Duration::from_secs(60)).is_valid());
        assert!(CertificateNotRevokedCheck::new(None, now).is_valid());
        assert!(CertificateNotOnHoldCheck::new(None).is_valid());
        assert!(IntermediateCertificateNotRevokedCheck::new(None, now).is_valid());
    }

    #[parameterized(
        fresh = { "2025-01-01T00:00:00Z", true },
        at_max_age = { "2025-01-02T00:00:00Z", true },
        stale = { "2025-01-02T00:00:01Z", false },
        produced_after = { "2024-12-31T00:00:00Z", true },
    )]
    fn freshness_is_relative_to_the_validation_time(now: &str, fresh: bool) {
        let revocation = RevocationToken::good("R-1", time("2025-01-01T00:00:00Z"));
        let check =
            RevocationFreshnessCheck::new(Some(&revocation), time(now), Duration::from_secs(86400));
        assert_eq!(check.is_valid(), fresh);
    }

    #[test]
    fn revoked_signing_and_ca_certificates_map_differently() {
        let revocation = RevocationToken::revoked(
            "R-1",
            time("2025-01-01T00:00:00Z"),
            time("2024-06-01T00:00:00Z"),
            RevocationReason::KeyCompromise,
        )
        .with_trusted(true);
        let now = time("2025-01-01T00:00:00Z");

        let signing = CertificateNotRevokedCheck::new(Some(&revocation), now);
        let ca = IntermediateCertificateNotRevokedCheck::new(Some(&revocation), now);
        assert!(!signing.is_valid());
        assert!(!ca.is_valid());
        assert_eq!(signing.sub_indication(), Some(SubIndication::RevokedNoPoe));
        assert_eq!(ca.sub_indication(), Some(SubIndication::RevokedCaNoPoe));

        let before = time("2024-05-31T00:00:00Z");
        assert!(CertificateNotRevokedCheck::new(Some(&revocation), before).is_valid());
    }

    #[test]
    fn on_hold_is_try_later() {
        let revocation = RevocationToken::revoked(
            "R-1",
            time("2025-01-01T00:00:00Z"),
            time("2024-06-01T00:00:00Z"),
            RevocationReason::CertificateHold,
        );
        let check = CertificateNotOnHoldCheck::new(Some(&revocation));
        assert!(!check.is_valid());
        assert_eq!(check.sub_indication(), Some(SubIndication::TryLater));
        assert!(CertificateNotRevokedCheck::new(Some(&revocation), time("2025-01-01T00:00:00Z")).is_valid());
    }
}
