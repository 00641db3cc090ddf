// Copyright (c) 2023-2025 The MobileCoin Foundation

//! The evidence tokens a validation run reasons about.
//!
//! Tokens are produced by whatever parsed the signed object and are only read
//! here. Each concrete token type can be viewed through [`Token`], which gives
//! the capabilities shared by all of them.

use crate::{DigestAlgorithm, KeyUsageBit, SignatureAlgorithm};
use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use der::DateTime;
use serde::{Deserialize, Serialize};

/// Status of a trust service as published on a trusted list.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    /// The service is granted.
    Granted,
    /// The service is accredited.
    Accredited,
    /// The service is under supervision.
    UnderSupervision,
    /// The service was suspended.
    Suspended,
    /// The service was withdrawn.
    Withdrawn,
}

impl ServiceStatus {
    /// Returns `true` when certificates issued under this status can be
    /// trusted.
    pub fn is_acceptable(&self) -> bool {
        matches!(
            self,
            ServiceStatus::Granted | ServiceStatus::Accredited | ServiceStatus::UnderSupervision
        )
    }
}

/// Trusted list information for the service which issued a certificate.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrustedService {
    status: ServiceStatus,
    #[serde(with = "crate::time")]
    start_date: DateTime,
    #[serde(default, with = "crate::time::option")]
    end_date: Option<DateTime>,
}

impl TrustedService {
    /// Create a new instance.
    ///
    /// An `end_date` of `None` means the status is still current.
    pub fn new(status: ServiceStatus, start_date: DateTime, end_date: Option<DateTime>) -> Self {
        Self {
            status,
            start_date,
            end_date,
        }
    }

    /// The published status
    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    /// Returns `true` if the status applies at `time`.
    pub fn is_valid_at(&self, time: DateTime) -> bool {
        self.start_date <= time && self.end_date.map_or(true, |end| time <= end)
    }
}

/// An X.509 certificate from the diagnostic data.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateToken {
    id: String,
    #[serde(with = "crate::time")]
    not_before: DateTime,
    #[serde(with = "crate::time")]
    not_after: DateTime,
    /// The certificate is a trust anchor
    #[serde(default)]
    trusted: bool,
    #[serde(default)]
    key_usages: BTreeSet<KeyUsageBit>,
    #[serde(default)]
    signature_valid: bool,
    #[serde(default)]
    signature_algorithm: Option<SignatureAlgorithm>,
    /// Issuer first, trust anchor last
    #[serde(default)]
    certificate_chain: Vec<String>,
    #[serde(default)]
    revocation: Option<String>,
    #[serde(default)]
    trusted_service: Option<TrustedService>,
    #[serde(default)]
    qualified: bool,
    #[serde(default)]
    supported_by_sscd: bool,
    #[serde(default)]
    issued_to_legal_person: bool,
}

impl CertificateToken {
    /// Create a new instance with the given validity window.
    ///
    /// Everything else starts out as the least trustworthy value and is
    /// filled in with the `with_*()` methods.
    pub fn new(id: impl Into<String>, not_before: DateTime, not_after: DateTime) -> Self {
        Self {
            id: id.into(),
            not_before,
            not_after,
            trusted: false,
            key_usages: BTreeSet::new(),
            signature_valid: false,
            signature_algorithm: None,
            certificate_chain: Vec::new(),
            revocation: None,
            trusted_service: None,
            qualified: false,
            supported_by_sscd: false,
            issued_to_legal_person: false,
        }
    }

    /// Mark this certificate as a trust anchor or not.
    pub fn with_trusted(mut self, trusted: bool) -> Self {
        self.trusted = trusted;
        self
    }

    /// Set the key usage bits asserted by the certificate.
    pub fn with_key_usages(mut self, key_usages: impl IntoIterator<Item = KeyUsageBit>) -> Self {
        self.key_usages = key_usages.into_iter().collect();
        self
    }

    /// Set whether the certificate signature verified with the issuer key.
    pub fn with_signature_valid(mut self, signature_valid: bool) -> Self {
        self.signature_valid = signature_valid;
        self
    }

    /// Set the algorithm the issuer signed this certificate with.
    pub fn with_signature_algorithm(mut self, signature_algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = Some(signature_algorithm);
        self
    }

    /// Set the chain of issuer certificate ids, issuer first and trust anchor
    /// last.
    pub fn with_certificate_chain<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.certificate_chain = ids.into_iter().map(ToString::to_string).collect();
        self
    }

    /// Set the id of the revocation data covering this certificate.
    pub fn with_revocation(mut self, revocation_id: impl Into<String>) -> Self {
        self.revocation = Some(revocation_id.into());
        self
    }

    /// Set the trusted list information of the issuing service.
    pub fn with_trusted_service(mut self, trusted_service: TrustedService) -> Self {
        self.trusted_service = Some(trusted_service);
        self
    }

    /// Set the qualification attributes of the certificate.
    pub fn with_qualification(
        mut self,
        qualified: bool,
        supported_by_sscd: bool,
        issued_to_legal_person: bool,
    ) -> Self {
        self.qualified = qualified;
        self.supported_by_sscd = supported_by_sscd;
        self.issued_to_legal_person = issued_to_legal_person;
        self
    }

    /// The certificate id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start of the validity window
    pub fn not_before(&self) -> DateTime {
        self.not_before
    }

    /// End of the validity window
    pub fn not_after(&self) -> DateTime {
        self.not_after
    }

    /// Returns `true` when `time` falls inside the validity window, both ends
    /// inclusive.
    pub fn is_valid_at(&self, time: DateTime) -> bool {
        self.not_before <= time && time <= self.not_after
    }

    /// Returns `true` for a trust anchor
    pub fn is_trusted(&self) -> bool {
        self.trusted
    }

    /// The asserted key usage bits
    pub fn key_usages(&self) -> &BTreeSet<KeyUsageBit> {
        &self.key_usages
    }

    /// Returns `true` when the certificate signature is valid
    pub fn is_signature_valid(&self) -> bool {
        self.signature_valid
    }

    /// The algorithm the certificate is signed with
    pub fn signature_algorithm(&self) -> Option<&SignatureAlgorithm> {
        self.signature_algorithm.as_ref()
    }

    /// The issuer chain ids, issuer first and trust anchor last
    pub fn certificate_chain(&self) -> &[String] {
        &self.certificate_chain
    }

    /// The id of the revocation data for this certificate
    pub fn revocation_id(&self) -> Option<&str> {
        self.revocation.as_deref()
    }

    /// Trusted list information for the issuing service
    pub fn trusted_service(&self) -> Option<&TrustedService> {
        self.trusted_service.as_ref()
    }

    /// Returns `true` for a qualified certificate
    pub fn is_qualified(&self) -> bool {
        self.qualified
    }

    /// Returns `true` if the private key lives in a secure signature creation
    /// device
    pub fn is_supported_by_sscd(&self) -> bool {
        self.supported_by_sscd
    }

    /// Returns `true` if the certificate was issued to a legal person
    pub fn is_issued_to_legal_person(&self) -> bool {
        self.issued_to_legal_person
    }
}

/// The revocation status reported by a revocation data object.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevocationStatus {
    /// Not revoked
    Good,
    /// Revoked or suspended, see the reason
    Revoked,
    /// The responder does not know the certificate
    Unknown,
}

/// The reason code of a revocation, RFC 5280 section 5.3.1.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum RevocationReason {
    Unspecified,
    KeyCompromise,
    CaCompromise,
    AffiliationChanged,
    Superseded,
    CessationOfOperation,
    CertificateHold,
    RemoveFromCrl,
    PrivilegeWithdrawn,
    AaCompromise,
}

/// A CRL entry or OCSP response about one certificate.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RevocationToken {
    id: String,
    /// thisUpdate of a CRL, producedAt of an OCSP response
    #[serde(with = "crate::time")]
    production_date: DateTime,
    status: RevocationStatus,
    #[serde(default, with = "crate::time::option")]
    revocation_date: Option<DateTime>,
    #[serde(default)]
    reason: Option<RevocationReason>,
    /// The revocation issuer chains up to a trust anchor
    #[serde(default)]
    trusted: bool,
    #[serde(default)]
    signature_algorithm: Option<SignatureAlgorithm>,
}

impl RevocationToken {
    /// Create a "good" status produced at `production_date`.
    pub fn good(id: impl Into<String>, production_date: DateTime) -> Self {
        Self {
            id: id.into(),
            production_date,
            status: RevocationStatus::Good,
            revocation_date: None,
            reason: None,
            trusted: false,
            signature_algorithm: None,
        }
    }

    /// Create a "revoked" status produced at `production_date`.
    pub fn revoked(
        id: impl Into<String>,
        production_date: DateTime,
        revocation_date: DateTime,
        reason: RevocationReason,
    ) -> Self {
        Self {
            status: RevocationStatus::Revoked,
            revocation_date: Some(revocation_date),
            reason: Some(reason),
            ..Self::good(id, production_date)
        }
    }

    /// Set whether the revocation issuer is trusted.
    pub fn with_trusted(mut self, trusted: bool) -> Self {
        self.trusted = trusted;
        self
    }

    /// Set the algorithm the revocation data is signed with.
    pub fn with_signature_algorithm(mut self, signature_algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = Some(signature_algorithm);
        self
    }

    /// The revocation data id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When this revocation data was produced
    pub fn production_date(&self) -> DateTime {
        self.production_date
    }

    /// The reported status
    pub fn status(&self) -> RevocationStatus {
        self.status
    }

    /// When the certificate was revoked, if it was
    pub fn revocation_date(&self) -> Option<DateTime> {
        self.revocation_date
    }

    /// The revocation reason, if any
    pub fn reason(&self) -> Option<RevocationReason> {
        self.reason
    }

    /// Returns `true` if the revocation issuer is trusted
    pub fn is_trusted(&self) -> bool {
        self.trusted
    }

    /// The algorithm the revocation data is signed with
    pub fn signature_algorithm(&self) -> Option<&SignatureAlgorithm> {
        self.signature_algorithm.as_ref()
    }

    /// Returns `true` when the certificate is suspended rather than revoked.
    pub fn is_on_hold(&self) -> bool {
        self.status == RevocationStatus::Revoked
            && self.reason == Some(RevocationReason::CertificateHold)
    }

    /// Returns `true` when the certificate was definitively revoked at or
    /// before `time`.
    ///
    /// A revocation without a date is treated as having always applied.
    pub fn is_revoked_at(&self, time: DateTime) -> bool {
        self.status == RevocationStatus::Revoked
            && !self.is_on_hold()
            && self.revocation_date.map_or(true, |date| date <= time)
    }
}

/// A timestamp token. Each valid timestamp is a proof of existence for the
/// tokens it covers.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimestampToken {
    id: String,
    #[serde(with = "crate::time")]
    production_time: DateTime,
    /// The timestamp message imprint and signature were verified
    #[serde(default)]
    valid: bool,
    #[serde(default)]
    signing_certificate: Option<String>,
    /// Ids of the tokens whose existence this timestamp proves
    #[serde(default)]
    covered_tokens: Vec<String>,
    #[serde(default)]
    signature_algorithm: Option<SignatureAlgorithm>,
}

impl TimestampToken {
    /// Create a new, valid, timestamp proving the existence of
    /// `covered_tokens` at `production_time`.
    pub fn new<'a>(
        id: impl Into<String>,
        production_time: DateTime,
        covered_tokens: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            id: id.into(),
            production_time,
            valid: true,
            signing_certificate: None,
            covered_tokens: covered_tokens.into_iter().map(ToString::to_string).collect(),
            signature_algorithm: None,
        }
    }

    /// Set whether the timestamp itself validated.
    pub fn with_valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    /// Set the id of the timestamping unit certificate.
    pub fn with_signing_certificate(mut self, certificate_id: impl Into<String>) -> Self {
        self.signing_certificate = Some(certificate_id.into());
        self
    }

    /// The timestamp id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The time asserted by the timestamp
    pub fn production_time(&self) -> DateTime {
        self.production_time
    }

    /// Returns `true` if the timestamp validated
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Ids of the tokens covered by this timestamp
    pub fn covered_tokens(&self) -> &[String] {
        &self.covered_tokens
    }

    /// The id of the timestamping unit certificate
    pub fn signing_certificate_id(&self) -> Option<&str> {
        self.signing_certificate.as_deref()
    }

    /// The algorithm the timestamp is signed with
    pub fn signature_algorithm(&self) -> Option<&SignatureAlgorithm> {
        self.signature_algorithm.as_ref()
    }
}

/// Digest of the signing certificate as carried in the signed attributes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateDigest {
    algorithm: DigestAlgorithm,
    /// For JSON this will be hex-encoded bytes.
    #[serde(with = "hex")]
    value: Vec<u8>,
}

impl CertificateDigest {
    /// Create a new instance.
    pub fn new(algorithm: DigestAlgorithm, value: impl Into<Vec<u8>>) -> Self {
        Self {
            algorithm,
            value: value.into(),
        }
    }

    /// The digest algorithm
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// The digest bytes
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// How a signature references its signing certificate.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SigningCertificateReference {
    certificate_id: String,
    /// The signing-certificate signed attribute is present
    #[serde(default)]
    attribute_present: bool,
    #[serde(default)]
    digest: Option<CertificateDigest>,
    #[serde(default)]
    digest_match: bool,
    #[serde(default)]
    issuer_serial_match: bool,
}

impl SigningCertificateReference {
    /// Create a fully matching reference to `certificate_id` with the given
    /// digest.
    pub fn new(certificate_id: impl Into<String>, digest: Option<CertificateDigest>) -> Self {
        Self {
            certificate_id: certificate_id.into(),
            attribute_present: true,
            digest_match: digest.is_some(),
            digest,
            issuer_serial_match: true,
        }
    }

    /// Set whether the digest matched the certificate.
    pub fn with_digest_match(mut self, digest_match: bool) -> Self {
        self.digest_match = digest_match;
        self
    }

    /// Set whether the issuer and serial number matched the certificate.
    pub fn with_issuer_serial_match(mut self, issuer_serial_match: bool) -> Self {
        self.issuer_serial_match = issuer_serial_match;
        self
    }

    /// The referenced certificate id
    pub fn certificate_id(&self) -> &str {
        &self.certificate_id
    }

    /// Returns `true` if the signed attribute is present
    pub fn is_attribute_present(&self) -> bool {
        self.attribute_present
    }

    /// The digest of the signing certificate, if present
    pub fn digest(&self) -> Option<&CertificateDigest> {
        self.digest.as_ref()
    }

    /// Returns `true` if the digest matched the certificate
    pub fn is_digest_match(&self) -> bool {
        self.digest_match
    }

    /// Returns `true` if the issuer and serial matched the certificate
    pub fn is_issuer_serial_match(&self) -> bool {
        self.issuer_serial_match
    }
}

/// The signature policy a signature claims.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SignaturePolicy {
    id: String,
    /// The policy document was retrieved and its digest matched
    identified: bool,
}

impl SignaturePolicy {
    /// Create a new instance.
    pub fn new(id: impl Into<String>, identified: bool) -> Self {
        Self {
            id: id.into(),
            identified,
        }
    }

    /// The policy identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` if the policy could be identified
    pub fn is_identified(&self) -> bool {
        self.identified
    }
}

/// A signature from the diagnostic data.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureToken {
    id: String,
    #[serde(default)]
    signing_certificate: Option<SigningCertificateReference>,
    #[serde(default, with = "crate::time::option")]
    signing_time: Option<DateTime>,
    #[serde(default)]
    reference_data_found: bool,
    #[serde(default)]
    reference_data_intact: bool,
    #[serde(default)]
    signature_intact: bool,
    #[serde(default)]
    policy: Option<SignaturePolicy>,
    #[serde(default)]
    signature_algorithm: Option<SignatureAlgorithm>,
}

impl SignatureToken {
    /// Create a new instance whose signed data was found and verified.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            signing_certificate: None,
            signing_time: None,
            reference_data_found: true,
            reference_data_intact: true,
            signature_intact: true,
            policy: None,
            signature_algorithm: None,
        }
    }

    /// Set the signing certificate reference.
    pub fn with_signing_certificate(mut self, reference: SigningCertificateReference) -> Self {
        self.signing_certificate = Some(reference);
        self
    }

    /// Set the claimed signing time.
    pub fn with_signing_time(mut self, signing_time: DateTime) -> Self {
        self.signing_time = Some(signing_time);
        self
    }

    /// Set the outcome of verifying the signed data and signature value.
    pub fn with_integrity(
        mut self,
        reference_data_found: bool,
        reference_data_intact: bool,
        signature_intact: bool,
    ) -> Self {
        self.reference_data_found = reference_data_found;
        self.reference_data_intact = reference_data_intact;
        self.signature_intact = signature_intact;
        self
    }

    /// Set the claimed signature policy.
    pub fn with_policy(mut self, policy: SignaturePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set the signature algorithm.
    pub fn with_signature_algorithm(mut self, signature_algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = Some(signature_algorithm);
        self
    }

    /// The signature id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The signing certificate reference
    pub fn signing_certificate(&self) -> Option<&SigningCertificateReference> {
        self.signing_certificate.as_ref()
    }

    /// The claimed signing time
    pub fn signing_time(&self) -> Option<DateTime> {
        self.signing_time
    }

    /// Returns `true` if the signed data was found
    pub fn is_reference_data_found(&self) -> bool {
        self.reference_data_found
    }

    /// Returns `true` if the signed data digest matched
    pub fn is_reference_data_intact(&self) -> bool {
        self.reference_data_intact
    }

    /// Returns `true` if the signature value verified
    pub fn is_signature_intact(&self) -> bool {
        self.signature_intact
    }

    /// The claimed signature policy
    pub fn policy(&self) -> Option<&SignaturePolicy> {
        self.policy.as_ref()
    }

    /// The signature algorithm
    pub fn signature_algorithm(&self) -> Option<&SignatureAlgorithm> {
        self.signature_algorithm.as_ref()
    }
}

/// A view of any token with the capabilities they share.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token<'a> {
    /// The certificate of a signer
    SigningCertificate(&'a CertificateToken),
    /// An intermediate or trust anchor certificate
    CaCertificate(&'a CertificateToken),
    /// A revocation data object
    Revocation(&'a RevocationToken),
    /// A timestamp
    Timestamp(&'a TimestampToken),
    /// A signature
    Signature(&'a SignatureToken),
}

impl<'a> Token<'a> {
    /// The token id
    pub fn id(&self) -> &'a str {
        match self {
            Token::SigningCertificate(certificate) | Token::CaCertificate(certificate) => {
                certificate.id()
            }
            Token::Revocation(revocation) => revocation.id(),
            Token::Timestamp(timestamp) => timestamp.id(),
            Token::Signature(signature) => signature.id(),
        }
    }

    /// The `(notBefore, notAfter)` window, for certificates only
    pub fn validity(&self) -> Option<(DateTime, DateTime)> {
        match self {
            Token::SigningCertificate(certificate) | Token::CaCertificate(certificate) => {
                Some((certificate.not_before(), certificate.not_after()))
            }
            _ => None,
        }
    }

    /// The id of the revocation data, for certificates only
    pub fn revocation_id(&self) -> Option<&'a str> {
        match self {
            Token::SigningCertificate(certificate) | Token::CaCertificate(certificate) => {
                certificate.revocation_id()
            }
            _ => None,
        }
    }

    /// The algorithm the token is signed with
    pub fn signature_algorithm(&self) -> Option<&'a SignatureAlgorithm> {
        match self {
            Token::SigningCertificate(certificate) | Token::CaCertificate(certificate) => {
                certificate.signature_algorithm()
            }
            Token::Revocation(revocation) => revocation.signature_algorithm(),
            Token::Timestamp(timestamp) => timestamp.signature_algorithm(),
            Token::Signature(signature) => signature.signature_algorithm(),
        }
    }

    /// The id of the certificate that produced this token, for signatures
    /// and timestamps
    pub fn signing_certificate_id(&self) -> Option<&'a str> {
        match self {
            Token::Timestamp(timestamp) => timestamp.signing_certificate_id(),
            Token::Signature(signature) => signature
                .signing_certificate()
                .map(SigningCertificateReference::certificate_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{EncryptionAlgorithm, KeyUsageBit};

    fn time(text: &str) -> DateTime {
        text.parse().expect("Failed to parse time")
    }

    #[test]
    fn certificate_validity_window_is_inclusive() {
        let certificate = CertificateToken::new(
            "C-1",
            time("2020-01-01T00:00:00Z"),
            time("2030-01-01T00:00:00Z"),
        );
        assert!(certificate.is_valid_at(time("2020-01-01T00:00:00Z")));
        assert!(certificate.is_valid_at(time("2030-01-01T00:00:00Z")));
        assert!(!certificate.is_valid_at(time("2019-12-31T23:59:59Z")));
        assert!(!certificate.is_valid_at(time("2030-01-01T00:00:01Z")));
    }

    #[test]
    fn revocation_is_effective_from_its_date() {
        let revocation = RevocationToken::revoked(
            "R-1",
            time("2024-01-01T00:00:00Z"),
            time("2023-06-01T00:00:00Z"),
            RevocationReason::KeyCompromise,
        );
        assert!(!revocation.is_revoked_at(time("2023-05-31T23:59:59Z")));
        assert!(revocation.is_revoked_at(time("2023-06-01T00:00:00Z")));
        assert!(!revocation.is_on_hold());
    }

    #[test]
    fn certificate_hold_is_not_a_revocation() {
        let revocation = RevocationToken::revoked(
            "R-1",
            time("2024-01-01T00:00:00Z"),
            time("2023-06-01T00:00:00Z"),
            RevocationReason::CertificateHold,
        );
        assert!(revocation.is_on_hold());
        assert!(!revocation.is_revoked_at(time("2024-01-01T00:00:00Z")));
    }

    #[test]
    fn token_view_exposes_shared_capabilities() {
        let certificate = CertificateToken::new(
            "C-1",
            time("2020-01-01T00:00:00Z"),
            time("2030-01-01T00:00:00Z"),
        )
        .with_revocation("R-1")
        .with_key_usages([KeyUsageBit::NonRepudiation])
        .with_signature_algorithm(SignatureAlgorithm::new(
            EncryptionAlgorithm::Ecdsa,
            DigestAlgorithm::Sha256,
            256,
        ));
        let token = Token::SigningCertificate(&certificate);
        assert_eq!(token.id(), "C-1");
        assert_eq!(token.revocation_id(), Some("R-1"));
        assert_eq!(
            token.validity(),
            Some((time("2020-01-01T00:00:00Z"), time("2030-01-01T00:00:00Z")))
        );
        assert_eq!(token.signing_certificate_id(), None);

        let signature = SignatureToken::new("S-1")
            .with_signing_certificate(SigningCertificateReference::new("C-1", None));
        let token = Token::Signature(&signature);
        assert_eq!(token.signing_certificate_id(), Some("C-1"));
        assert_eq!(token.validity(), None);
        assert_eq!(token.signature_algorithm(), None);
    }

    #[test]
    fn deserialize_certificate_rejects_unknown_fields() {
        let json = r#"{
            "id": "C-1",
            "not_before": "2020-01-01T00:00:00Z",
            "not_after": "2030-01-01T00:00:00Z",
            "is_cool": true
        }"#;
        assert!(serde_json::from_str::<CertificateToken>(json).is_err());
    }

    #[test]
    fn deserialize_signing_certificate_digest_from_hex() {
        let json = r#"{
            "certificate_id": "C-1",
            "attribute_present": true,
            "digest": { "algorithm": "SHA256", "value": "c0ffee" },
            "digest_match": true,
            "issuer_serial_match": true
        }"#;
        let reference: SigningCertificateReference =
            serde_json::from_str(json).expect("Failed to parse reference");
        let digest = reference.digest().expect("Digest should be present");
        assert_eq!(digest.algorithm(), DigestAlgorithm::Sha256);
        assert_eq!(digest.value(), [0xc0, 0xff, 0xee]);
    }
}
