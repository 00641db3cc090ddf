// Copyright (c) 2023-2025 The MobileCoin Foundation

//! The validation policy.
//!
//! A policy attaches a [`Level`] to every check and carries the parameters of
//! the checks that need more than a level, key usages, cryptographic
//! strength and revocation freshness. Constraints are selected by
//! [`Context`] and [`SubContext`], falling back to less specific entries:
//!
//! 1. the exact context and sub context,
//! 2. the context with any sub context,
//! 3. any context with the sub context,
//! 4. any context and any sub context.
//!
//! Plain level constraints finally fall back to the policy's default level.

use crate::{
    Algorithm, Context, DigestAlgorithm, EncryptionAlgorithm, Error, KeyUsageBit, Level, Result,
    SignatureAlgorithm, SubContext,
};
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::time::Duration;
use der::DateTime;
use serde::{Deserialize, Serialize};

/// The checks a policy can configure.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum CheckType {
    CertificateExpiration,
    KeyUsage,
    CertificateSignature,
    CryptographicConstraints,
    RevocationDataAvailable,
    RevocationDataTrusted,
    RevocationFreshness,
    CertificateNotRevoked,
    CertificateNotOnHold,
    TslValidity,
    TslStatus,
    TslStatusAndValidity,
    IntermediateCertificateNotRevoked,
    Qualified,
    SupportedBySscd,
    IssuedToLegalPerson,
    SigningCertificateRecognition,
    SigningCertificateAttributePresent,
    DigestValuePresent,
    DigestValueMatch,
    IssuerSerialMatch,
    SignaturePolicyIdentified,
    ReferenceDataFound,
    ReferenceDataIntact,
    SignatureIntact,
    SigningTimePresent,
}

/// Something selected by context and sub context.
trait Scoped {
    fn context(&self) -> Option<Context>;
    fn sub_context(&self) -> Option<SubContext>;
}

/// Macro to implement [`Scoped`] for the constraint types
macro_rules! scoped {
    ($($constraint:ty),*) => {$(
        impl Scoped for $constraint {
            fn context(&self) -> Option<Context> {
                self.context
            }
            fn sub_context(&self) -> Option<SubContext> {
                self.sub_context
            }
        }
    )*}
}

scoped!(LevelConstraint, KeyUsageConstraint, CryptographicConstraint);

impl Scoped for TimeConstraint {
    fn context(&self) -> Option<Context> {
        self.context
    }
    fn sub_context(&self) -> Option<SubContext> {
        None
    }
}

fn resolve<'a, T: Scoped>(
    entries: &'a [T],
    context: Context,
    sub_context: Option<SubContext>,
) -> Option<&'a T> {
    let candidates = [
        (Some(context), sub_context),
        (Some(context), None),
        (None, sub_context),
        (None, None),
    ];
    candidates.iter().find_map(|(context, sub_context)| {
        entries
            .iter()
            .find(|entry| entry.context() == *context && entry.sub_context() == *sub_context)
    })
}

/// The level of one check.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LevelConstraint {
    check: CheckType,
    #[serde(default)]
    context: Option<Context>,
    #[serde(default)]
    sub_context: Option<SubContext>,
    level: Level,
}

impl LevelConstraint {
    /// Create a new instance. `None` selectors match anything.
    pub fn new(
        check: CheckType,
        context: Option<Context>,
        sub_context: Option<SubContext>,
        level: Level,
    ) -> Self {
        Self {
            check,
            context,
            sub_context,
            level,
        }
    }
}

/// The key usages a certificate must assert at least one of.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeyUsageConstraint {
    #[serde(default)]
    context: Option<Context>,
    #[serde(default)]
    sub_context: Option<SubContext>,
    level: Level,
    accepted: BTreeSet<KeyUsageBit>,
}

impl KeyUsageConstraint {
    /// Create a new instance. `None` selectors match anything.
    pub fn new(
        context: Option<Context>,
        sub_context: Option<SubContext>,
        level: Level,
        accepted: impl IntoIterator<Item = KeyUsageBit>,
    ) -> Self {
        Self {
            context,
            sub_context,
            level,
            accepted: accepted.into_iter().collect(),
        }
    }

    /// The level of the key usage check
    pub fn level(&self) -> Level {
        self.level
    }

    /// The accepted key usages
    pub fn accepted(&self) -> &BTreeSet<KeyUsageBit> {
        &self.accepted
    }
}

/// The date after which an algorithm is no longer considered secure.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AlgorithmExpiration {
    algorithm: Algorithm,
    /// For public key algorithms, the expiration only applies to keys of at
    /// most this many bits
    #[serde(default)]
    key_size: Option<u32>,
    #[serde(with = "crate::time")]
    date: DateTime,
}

impl AlgorithmExpiration {
    /// Create a new instance.
    pub fn new(algorithm: Algorithm, key_size: Option<u32>, date: DateTime) -> Self {
        Self {
            algorithm,
            key_size,
            date,
        }
    }

    fn applies_to(&self, signature_algorithm: &SignatureAlgorithm) -> bool {
        match self.algorithm {
            Algorithm::Digest(digest) => digest == signature_algorithm.digest(),
            Algorithm::Encryption(encryption) => {
                encryption == signature_algorithm.encryption()
                    && self
                        .key_size
                        .map_or(true, |size| signature_algorithm.key_length() <= size)
            }
        }
    }
}

/// The acceptable algorithms, key sizes and algorithm sunset dates.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CryptographicConstraint {
    #[serde(default)]
    context: Option<Context>,
    #[serde(default)]
    sub_context: Option<SubContext>,
    level: Level,
    acceptable_encryption_algorithms: BTreeSet<EncryptionAlgorithm>,
    acceptable_digest_algorithms: BTreeSet<DigestAlgorithm>,
    #[serde(default)]
    min_key_sizes: BTreeMap<EncryptionAlgorithm, u32>,
    #[serde(default)]
    expirations: Vec<AlgorithmExpiration>,
}

impl CryptographicConstraint {
    /// Create a new instance without any key size minimums or expirations.
    pub fn new(
        context: Option<Context>,
        sub_context: Option<SubContext>,
        level: Level,
        acceptable_encryption_algorithms: impl IntoIterator<Item = EncryptionAlgorithm>,
        acceptable_digest_algorithms: impl IntoIterator<Item = DigestAlgorithm>,
    ) -> Self {
        Self {
            context,
            sub_context,
            level,
            acceptable_encryption_algorithms: acceptable_encryption_algorithms
                .into_iter()
                .collect(),
            acceptable_digest_algorithms: acceptable_digest_algorithms.into_iter().collect(),
            min_key_sizes: BTreeMap::new(),
            expirations: Vec::new(),
        }
    }

    /// Require keys of `encryption` to be at least `bits` long.
    pub fn with_min_key_size(mut self, encryption: EncryptionAlgorithm, bits: u32) -> Self {
        self.min_key_sizes.insert(encryption, bits);
        self
    }

    /// Add an algorithm sunset date.
    pub fn with_expiration(mut self, expiration: AlgorithmExpiration) -> Self {
        self.expirations.push(expiration);
        self
    }

    /// The level of the cryptographic check
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns `true` when the algorithm and key size are acceptable,
    /// ignoring sunset dates.
    pub fn is_acceptable(&self, algorithm: &SignatureAlgorithm) -> bool {
        let min_key_size = self
            .min_key_sizes
            .get(&algorithm.encryption())
            .copied()
            .unwrap_or_default();
        self.acceptable_encryption_algorithms
            .contains(&algorithm.encryption())
            && self
                .acceptable_digest_algorithms
                .contains(&algorithm.digest())
            && algorithm.key_length() >= min_key_size
    }

    /// The earliest sunset date applying to `algorithm`, if any.
    pub fn expiration_of(&self, algorithm: &SignatureAlgorithm) -> Option<DateTime> {
        self.expirations
            .iter()
            .filter(|expiration| expiration.applies_to(algorithm))
            .map(|expiration| expiration.date)
            .min()
    }

    /// Returns `true` when `algorithm` is acceptable and not past its sunset
    /// at `time`.
    ///
    /// An algorithm is still usable up to, but not at, its sunset date.
    pub fn is_valid_at(&self, algorithm: &SignatureAlgorithm, time: DateTime) -> bool {
        self.is_acceptable(algorithm)
            && self
                .expiration_of(algorithm)
                .map_or(true, |sunset| time < sunset)
    }
}

/// How old revocation data may be.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimeConstraint {
    #[serde(default)]
    context: Option<Context>,
    level: Level,
    max_age_seconds: u64,
}

impl TimeConstraint {
    /// Create a new instance.
    pub fn new(context: Option<Context>, level: Level, max_age: Duration) -> Self {
        Self {
            context,
            level,
            max_age_seconds: max_age.as_secs(),
        }
    }

    /// The level of the freshness check
    pub fn level(&self) -> Level {
        self.level
    }

    /// The maximum age
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }
}

/// A validation policy.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationPolicy {
    /// The level of any check without a matching level constraint
    #[serde(default)]
    default_level: Option<Level>,
    #[serde(default)]
    levels: Vec<LevelConstraint>,
    #[serde(default)]
    key_usages: Vec<KeyUsageConstraint>,
    #[serde(default)]
    cryptographic: Vec<CryptographicConstraint>,
    #[serde(default)]
    revocation_freshness: Vec<TimeConstraint>,
}

impl ValidationPolicy {
    /// Create an empty policy where every check has the `default_level`.
    ///
    /// Key usage, cryptographic and freshness constraints have no default and
    /// need to be added for the checks that use them.
    pub fn new(default_level: Option<Level>) -> Self {
        Self {
            default_level,
            ..Default::default()
        }
    }

    /// Add a level constraint.
    pub fn with_level(mut self, constraint: LevelConstraint) -> Self {
        self.levels.push(constraint);
        self
    }

    /// Add a key usage constraint.
    pub fn with_key_usage(mut self, constraint: KeyUsageConstraint) -> Self {
        self.key_usages.push(constraint);
        self
    }

    /// Add a cryptographic constraint.
    pub fn with_cryptographic(mut self, constraint: CryptographicConstraint) -> Self {
        self.cryptographic.push(constraint);
        self
    }

    /// Add a revocation freshness constraint.
    pub fn with_revocation_freshness(mut self, constraint: TimeConstraint) -> Self {
        self.revocation_freshness.push(constraint);
        self
    }

    /// The level of `check` in the given context.
    pub fn level(
        &self,
        check: CheckType,
        context: Context,
        sub_context: Option<SubContext>,
    ) -> Result<Level> {
        let levels = self
            .levels
            .iter()
            .filter(|constraint| constraint.check == check)
            .cloned()
            .collect::<Vec<_>>();
        resolve(&levels, context, sub_context)
            .map(|constraint| constraint.level)
            .or(self.default_level)
            .ok_or(Error::MissingConstraint {
                check,
                context,
                sub_context,
            })
    }

    /// The key usage constraint for the given context.
    pub fn key_usage(
        &self,
        context: Context,
        sub_context: Option<SubContext>,
    ) -> Result<&KeyUsageConstraint> {
        resolve(&self.key_usages, context, sub_context).ok_or(Error::MissingConstraint {
            check: CheckType::KeyUsage,
            context,
            sub_context,
        })
    }

    /// The cryptographic constraint for the given context.
    pub fn cryptographic(
        &self,
        context: Context,
        sub_context: Option<SubContext>,
    ) -> Result<&CryptographicConstraint> {
        resolve(&self.cryptographic, context, sub_context).ok_or(Error::MissingConstraint {
            check: CheckType::CryptographicConstraints,
            context,
            sub_context,
        })
    }

    /// The revocation freshness constraint for the given context.
    pub fn revocation_freshness(&self, context: Context) -> Result<&TimeConstraint> {
        resolve(&self.revocation_freshness, context, None).ok_or(Error::MissingConstraint {
            check: CheckType::RevocationFreshness,
            context,
            sub_context: None,
        })
    }

    /// The sunset date of `algorithm` for the given context, `None` when it
    /// has none or no cryptographic constraint applies.
    pub fn algorithm_expiration(
        &self,
        algorithm: &SignatureAlgorithm,
        context: Context,
        sub_context: Option<SubContext>,
    ) -> Option<DateTime> {
        resolve(&self.cryptographic, context, sub_context)
            .and_then(|constraint| constraint.expiration_of(algorithm))
    }
}

impl TryFrom<&str> for ValidationPolicy {
    type Error = Error;

    fn try_from(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    use yare::parameterized;

    fn time(text: &str) -> DateTime {
        text.parse().expect("Failed to parse time")
    }

    fn layered_policy() -> ValidationPolicy {
        ValidationPolicy::new(None)
            .with_level(LevelConstraint::new(CheckType::KeyUsage, None, None, Level::Inform))
            .with_level(LevelConstraint::new(
                CheckType::KeyUsage,
                None,
                Some(SubContext::CaCertificate),
                Level::Ignore,
            ))
            .with_level(LevelConstraint::new(
                CheckType::KeyUsage,
                Some(Context::Signature),
                None,
                Level::Warn,
            ))
            .with_level(LevelConstraint::new(
                CheckType::KeyUsage,
                Some(Context::Signature),
                Some(SubContext::SigningCert),
                Level::Fail,
            ))
    }

    #[parameterized(
        exact = { Context::Signature, Some(SubContext::SigningCert), Level::Fail },
        context_only = { Context::Signature, Some(SubContext::CaCertificate), Level::Warn },
        context_without_sub = { Context::Signature, None, Level::Warn },
        sub_context_only = { Context::Timestamp, Some(SubContext::CaCertificate), Level::Ignore },
        wildcard = { Context::Revocation, Some(SubContext::SigningCert), Level::Inform },
    )]
    fn level_resolution_falls_back(
        context: Context,
        sub_context: Option<SubContext>,
        expected: Level,
    ) {
        let policy = layered_policy();
        let level = policy
            .level(CheckType::KeyUsage, context, sub_context)
            .expect("Level should resolve");
        assert_eq!(level, expected);
    }

    #[test]
    fn level_without_constraint_uses_default() {
        let policy = ValidationPolicy::new(Some(Level::Warn));
        let level = policy
            .level(CheckType::Qualified, Context::Signature, None)
            .expect("Level should resolve");
        assert_eq!(level, Level::Warn);
    }

    #[test]
    fn level_without_constraint_or_default_is_an_error() {
        let policy = layered_policy();
        assert_matches!(
            policy.level(CheckType::Qualified, Context::Signature, None),
            Err(Error::MissingConstraint {
                check: CheckType::Qualified,
                context: Context::Signature,
                sub_context: None,
            })
        );
    }

    #[test]
    fn missing_cryptographic_constraint_is_an_error() {
        let policy = ValidationPolicy::new(Some(Level::Fail));
        assert_matches!(
            policy.cryptographic(Context::Timestamp, Some(SubContext::SigningCert)),
            Err(Error::MissingConstraint {
                check: CheckType::CryptographicConstraints,
                ..
            })
        );
    }

    fn ecdsa_constraint() -> CryptographicConstraint {
        CryptographicConstraint::new(
            None,
            None,
            Level::Fail,
            [EncryptionAlgorithm::Ecdsa, EncryptionAlgorithm::Rsa],
            [DigestAlgorithm::Sha1, DigestAlgorithm::Sha256],
        )
        .with_min_key_size(EncryptionAlgorithm::Rsa, 2048)
        .with_expiration(AlgorithmExpiration::new(
            Algorithm::Digest(DigestAlgorithm::Sha1),
            None,
            time("2009-12-31T00:00:00Z"),
        ))
        .with_expiration(AlgorithmExpiration::new(
            Algorithm::Encryption(EncryptionAlgorithm::Rsa),
            Some(2048),
            time("2026-01-01T00:00:00Z"),
        ))
    }

    #[parameterized(
        ecdsa_sha256 = { EncryptionAlgorithm::Ecdsa, DigestAlgorithm::Sha256, 256, true },
        unacceptable_digest = { EncryptionAlgorithm::Ecdsa, DigestAlgorithm::Sha512, 256, false },
        unacceptable_encryption = { EncryptionAlgorithm::Dsa, DigestAlgorithm::Sha256, 2048, false },
        short_rsa = { EncryptionAlgorithm::Rsa, DigestAlgorithm::Sha256, 1024, false },
        expired_digest = { EncryptionAlgorithm::Ecdsa, DigestAlgorithm::Sha1, 256, false },
        expired_rsa_size = { EncryptionAlgorithm::Rsa, DigestAlgorithm::Sha256, 2048, false },
        long_rsa = { EncryptionAlgorithm::Rsa, DigestAlgorithm::Sha256, 4096, true },
    )]
    fn cryptographic_constraint_at_2030(
        encryption: EncryptionAlgorithm,
        digest: DigestAlgorithm,
        key_length: u32,
        expected: bool,
    ) {
        let algorithm = SignatureAlgorithm::new(encryption, digest, key_length);
        assert_eq!(
            ecdsa_constraint().is_valid_at(&algorithm, time("2030-01-01T00:00:00Z")),
            expected
        );
    }

    #[test]
    fn algorithm_is_usable_until_its_sunset() {
        let algorithm = SignatureAlgorithm::new(EncryptionAlgorithm::Rsa, DigestAlgorithm::Sha256, 2048);
        let constraint = ecdsa_constraint();
        assert!(constraint.is_valid_at(&algorithm, time("2025-12-31T23:59:59Z")));
        assert!(!constraint.is_valid_at(&algorithm, time("2026-01-01T00:00:00Z")));
    }

    #[test]
    fn earliest_applicable_sunset_wins() {
        let algorithm = SignatureAlgorithm::new(EncryptionAlgorithm::Rsa, DigestAlgorithm::Sha1, 2048);
        assert_eq!(
            ecdsa_constraint().expiration_of(&algorithm),
            Some(time("2009-12-31T00:00:00Z"))
        );
    }

    #[test]
    fn try_from_json() {
        let json = r#"{
            "default_level": "FAIL",
            "levels": [
                { "check": "KEY_USAGE", "context": "SIGNATURE", "sub_context": "CA_CERTIFICATE", "level": "WARN" }
            ],
            "key_usages": [
                { "sub_context": "SIGNING_CERT", "level": "FAIL", "accepted": ["NON_REPUDIATION"] }
            ],
            "cryptographic": [
                {
                    "level": "FAIL",
                    "acceptable_encryption_algorithms": ["ECDSA"],
                    "acceptable_digest_algorithms": ["SHA256"],
                    "min_key_sizes": { "ECDSA": 256 },
                    "expirations": [
                        { "algorithm": { "digest": "SHA1" }, "date": "2009-12-31T00:00:00Z" }
                    ]
                }
            ],
            "revocation_freshness": [ { "level": "FAIL", "max_age_seconds": 86400 } ]
        }"#;
        let policy = ValidationPolicy::try_from(json).expect("Failed to parse policy");
        assert_eq!(
            policy
                .level(CheckType::KeyUsage, Context::Signature, Some(SubContext::CaCertificate))
                .expect("Level should resolve"),
            Level::Warn
        );
        let key_usage = policy
            .key_usage(Context::Timestamp, Some(SubContext::SigningCert))
            .expect("Key usage should resolve");
        assert!(key_usage.accepted().contains(&KeyUsageBit::NonRepudiation));
        let freshness = policy
            .revocation_freshness(Context::Signature)
            .expect("Freshness should resolve");
        assert_eq!(freshness.max_age(), Duration::from_secs(86400));
        let algorithm =
            SignatureAlgorithm::new(EncryptionAlgorithm::Ecdsa, DigestAlgorithm::Sha1, 256);
        assert_eq!(
            policy.algorithm_expiration(&algorithm, Context::Signature, None),
            Some(time("2009-12-31T00:00:00Z"))
        );
    }

    #[test]
    fn try_from_json_with_unknown_field() {
        assert_matches!(
            ValidationPolicy::try_from(r#"{"default_level": "FAIL", "strict": true}"#),
            Err(Error::Serde(_))
        );
    }
}
