// Copyright (c) 2023-2025 The MobileCoin Foundation

//! The status codes shared by every validation block along with the
//! selectors used to resolve policy constraints.

use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// The coarse outcome of a validation block.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Indication {
    /// All of the checks were satisfied.
    Valid,
    /// At least one check proved the signature or certificate invalid.
    Invalid,
    /// The available evidence does not allow a positive or negative verdict.
    Indeterminate,
}

impl Display for Indication {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Indication::Valid => "VALID",
            Indication::Invalid => "INVALID",
            Indication::Indeterminate => "INDETERMINATE",
        };
        f.write_str(name)
    }
}

/// Refinement of an [`Indication::Invalid`] or
/// [`Indication::Indeterminate`] outcome.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubIndication {
    /// The signed object is not conformant to its format.
    FormatFailure,
    /// The digest of a signed data object does not match.
    HashFailure,
    /// The signature value could not be verified with the signing key.
    SigCryptoFailure,
    /// The signing certificate was revoked before the signing time.
    Revoked,
    /// The signing time lies after the expiration of the signing certificate.
    Expired,
    /// The signing time lies before the issuance of the signing certificate.
    NotYetValid,
    /// The signature attributes do not satisfy the constraints.
    SigConstraintsFailure,
    /// The certificate chain does not satisfy the chain constraints.
    ChainConstraintsFailure,
    /// The certificate chain could not be validated for an unspecified reason.
    CertificateChainGeneralFailure,
    /// An algorithm or key size is below the required security level.
    CryptoConstraintsFailure,
    /// An algorithm or key size is no longer secure and no proof of existence
    /// predates its sunset.
    CryptoConstraintsFailureNoPoe,
    /// The signing certificate is outside of its validity window and no proof
    /// of existence places the signature inside it.
    OutOfBoundsNoPoe,
    /// The signing certificate is revoked and no proof of existence predates
    /// the revocation.
    RevokedNoPoe,
    /// A CA certificate of the chain is revoked and no proof of existence
    /// predates the revocation.
    RevokedCaNoPoe,
    /// The signing certificate could not be identified.
    NoSigningCertificateFound,
    /// No chain up to a trust anchor could be found.
    NoCertificateChainFound,
    /// A proof of existence is missing.
    NoPoe,
    /// Up to date revocation information is not yet available.
    TryLater,
    /// The signed data could not be retrieved.
    SignedDataNotFound,
    /// The signature policy could not be processed.
    PolicyProcessingError,
}

impl SubIndication {
    /// The standardized name of this sub-indication.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubIndication::FormatFailure => "FORMAT_FAILURE",
            SubIndication::HashFailure => "HASH_FAILURE",
            SubIndication::SigCryptoFailure => "SIG_CRYPTO_FAILURE",
            SubIndication::Revoked => "REVOKED",
            SubIndication::Expired => "EXPIRED",
            SubIndication::NotYetValid => "NOT_YET_VALID",
            SubIndication::SigConstraintsFailure => "SIG_CONSTRAINTS_FAILURE",
            SubIndication::ChainConstraintsFailure => "CHAIN_CONSTRAINTS_FAILURE",
            SubIndication::CertificateChainGeneralFailure => "CERTIFICATE_CHAIN_GENERAL_FAILURE",
            SubIndication::CryptoConstraintsFailure => "CRYPTO_CONSTRAINTS_FAILURE",
            SubIndication::CryptoConstraintsFailureNoPoe => "CRYPTO_CONSTRAINTS_FAILURE_NO_POE",
            SubIndication::OutOfBoundsNoPoe => "OUT_OF_BOUNDS_NO_POE",
            SubIndication::RevokedNoPoe => "REVOKED_NO_POE",
            SubIndication::RevokedCaNoPoe => "REVOKED_CA_NO_POE",
            SubIndication::NoSigningCertificateFound => "NO_SIGNING_CERTIFICATE_FOUND",
            SubIndication::NoCertificateChainFound => "NO_CERTIFICATE_CHAIN_FOUND",
            SubIndication::NoPoe => "NO_POE",
            SubIndication::TryLater => "TRY_LATER",
            SubIndication::SignedDataNotFound => "SIGNED_DATA_NOT_FOUND",
            SubIndication::PolicyProcessingError => "POLICY_PROCESSING_ERROR",
        }
    }
}

impl Display for SubIndication {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The severity a policy attaches to a check.
///
/// The variant order is important, a higher variant is more severe.
/// ```
/// use mc_ades_validator::Level;
/// assert!(Level::Fail > Level::Warn);
/// assert!(Level::Inform > Level::Ignore);
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    /// The check is skipped.
    Ignore,
    /// A failure is recorded as information only.
    Inform,
    /// A failure is recorded as a warning and sets the indication, but the
    /// remaining checks still run.
    Warn,
    /// A failure sets the indication and halts the chain.
    Fail,
}

/// The evidentiary role being validated.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Context {
    /// The main signature.
    Signature,
    /// A timestamp token.
    Timestamp,
    /// A revocation data object (CRL or OCSP response).
    Revocation,
    /// A counter signature.
    CounterSignature,
}

/// Position of a certificate within the chain being walked.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubContext {
    /// The certificate of the signer.
    SigningCert,
    /// An intermediate or trust anchor certificate.
    CaCertificate,
}
