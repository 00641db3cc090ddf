// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Checks about a single certificate.

use crate::{CertificateToken, Check, Indication, KeyUsageBit, MessageTag, SubIndication};
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use der::DateTime;

/// Checks that the certificate chains up to a trust anchor.
#[derive(Clone, Debug)]
pub struct ProspectiveCertificateChainCheck<'a> {
    certificate: &'a CertificateToken,
    chain: Vec<&'a CertificateToken>,
}

impl<'a> ProspectiveCertificateChainCheck<'a> {
    /// Create a new instance.
    ///
    /// # Arguments
    /// * `certificate` - The certificate the chain starts from
    /// * `chain` - The issuers of `certificate`, issuer first and trust anchor
    ///   last
    pub fn new(certificate: &'a CertificateToken, chain: Vec<&'a CertificateToken>) -> Self {
        Self { certificate, chain }
    }
}

impl Check for ProspectiveCertificateChainCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::ProspectiveCertificateChain
    }

    fn is_valid(&self) -> bool {
        match self.chain.last() {
            Some(anchor) => anchor.is_trusted(),
            None => self.certificate.is_trusted(),
        }
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NoCertificateChainFound)
    }
}

/// Checks that the validity window of the certificate covers a time.
#[derive(Clone, Copy, Debug)]
pub struct CertificateExpirationCheck<'a> {
    certificate: &'a CertificateToken,
    time: DateTime,
}

impl<'a> CertificateExpirationCheck<'a> {
    /// Create a new instance.
    pub fn new(certificate: &'a CertificateToken, time: DateTime) -> Self {
        Self { certificate, time }
    }
}

impl Check for CertificateExpirationCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::CertificateExpiration
    }

    fn is_valid(&self) -> bool {
        self.certificate.is_valid_at(self.time)
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::OutOfBoundsNoPoe)
    }
}

/// Checks that the certificate asserts at least one of the accepted key
/// usages.
#[derive(Clone, Copy, Debug)]
pub struct KeyUsageCheck<'a> {
    certificate: &'a CertificateToken,
    accepted: &'a BTreeSet<KeyUsageBit>,
}

impl<'a> KeyUsageCheck<'a> {
    /// Create a new instance.
    pub fn new(certificate: &'a CertificateToken, accepted: &'a BTreeSet<KeyUsageBit>) -> Self {
        Self {
            certificate,
            accepted,
        }
    }
}

impl Check for KeyUsageCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::KeyUsage
    }

    fn is_valid(&self) -> bool {
        !self.certificate.key_usages().is_disjoint(self.accepted)
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::ChainConstraintsFailure)
    }
}

/// Checks the trusted service status applies at a time.
#[derive(Clone, Copy, Debug)]
pub struct TslValidityCheck<'a> {
    certificate: &'a CertificateToken,
    time: DateTime,
}

impl<'a> TslValidityCheck<'a> {
    /// Create a new instance.
    pub fn new(certificate: &'a CertificateToken, time: DateTime) -> Self {
        Self { certificate, time }
    }
}

impl Check for TslValidityCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::TslValidity
    }

    fn is_valid(&self) -> bool {
        self.certificate
            .trusted_service()
            .is_some_and(|service| service.is_valid_at(self.time))
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::ChainConstraintsFailure)
    }
}

/// Checks the trusted service status is acceptable and applies at a time.
#[derive(Clone, Copy, Debug)]
pub struct TslStatusAndValidityCheck<'a> {
    certificate: &'a CertificateToken,
    time: DateTime,
}

impl<'a> TslStatusAndValidityCheck<'a> {
    /// Create a new instance.
    pub fn new(certificate: &'a CertificateToken, time: DateTime) -> Self {
        Self { certificate, time }
    }
}

impl Check for TslStatusAndValidityCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::TslStatusAndValidity
    }

    fn is_valid(&self) -> bool {
        self.certificate.trusted_service().is_some_and(|service| {
            service.status().is_acceptable() && service.is_valid_at(self.time)
        })
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::ChainConstraintsFailure)
    }
}

token_check! {
    /// Checks the certificate signature verified with the issuer key.
    CertificateSignatureCheck(CertificateToken) => CertificateSignature,
        Indeterminate / CertificateChainGeneralFailure, |c| c.is_signature_valid();
    /// Checks the trusted service status is acceptable.
    TslStatusCheck(CertificateToken) => TslStatus,
        Indeterminate / ChainConstraintsFailure,
        |c| c.trusted_service().is_some_and(|service| service.status().is_acceptable());
    /// Checks the certificate is qualified.
    QualifiedCheck(CertificateToken) => Qualified,
        Indeterminate / ChainConstraintsFailure, |c| c.is_qualified();
    /// Checks the private key is held in a secure signature creation device.
    SupportedBySscdCheck(CertificateToken) => SupportedBySscd,
        Indeterminate / ChainConstraintsFailure, |c| c.is_supported_by_sscd();
    /// Checks the certificate was issued to a legal person.
    IssuedToLegalPersonCheck(CertificateToken) => IssuedToLegalPerson,
        Indeterminate / ChainConstraintsFailure, |c| c.is_issued_to_legal_person();
}
