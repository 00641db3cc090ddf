// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Checks used when validating a signature at a past time.

use crate::{
    CertificateToken, Check, Conclusion, Indication, Message, MessageTag, ProofOfExistence,
    SubIndication,
};
use alloc::format;
use alloc::vec::Vec;
use der::DateTime;

/// Checks the past certificate validation found a time the chain was valid
/// at.
///
/// On failure the status of the past certificate validation is reported.
#[derive(Clone, Copy, Debug)]
pub struct PastCertificateValidationCheck<'a> {
    conclusion: &'a Conclusion,
}

impl<'a> PastCertificateValidationCheck<'a> {
    /// Create a new instance from the past certificate validation
    /// conclusion.
    pub fn new(conclusion: &'a Conclusion) -> Self {
        Self { conclusion }
    }
}

impl Check for PastCertificateValidationCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::PastCertificateValidation
    }

    fn is_valid(&self) -> bool {
        self.conclusion.is_valid()
    }

    fn indication(&self) -> Indication {
        self.conclusion.indication()
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        self.conclusion.sub_indication()
    }
}

/// Checks a proof of existence of a token exists at or before the control
/// time.
///
/// On failure the current time status is reported.
#[derive(Clone, Copy, Debug)]
pub struct PoeExistsCheck<'a> {
    poe: &'a ProofOfExistence,
    token_id: &'a str,
    control_time: DateTime,
    current: &'a Conclusion,
}

impl<'a> PoeExistsCheck<'a> {
    /// Create a new instance.
    pub fn new(
        poe: &'a ProofOfExistence,
        token_id: &'a str,
        control_time: DateTime,
        current: &'a Conclusion,
    ) -> Self {
        Self {
            poe,
            token_id,
            control_time,
            current,
        }
    }
}

impl Check for PoeExistsCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::PoeExists
    }

    fn is_valid(&self) -> bool {
        self.poe
            .exists_at_or_before(self.token_id, self.control_time)
    }

    fn indication(&self) -> Indication {
        self.current.indication()
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        self.current.sub_indication()
    }
}

/// Checks the best signature time is not before the issuance of the signing
/// certificate.
#[derive(Clone, Copy, Debug)]
pub struct BestSignatureTimeNotBeforeCertificateIssuanceCheck<'a> {
    best_signature_time: DateTime,
    certificate: &'a CertificateToken,
}

impl<'a> BestSignatureTimeNotBeforeCertificateIssuanceCheck<'a> {
    /// Create a new instance.
    pub fn new(best_signature_time: DateTime, certificate: &'a CertificateToken) -> Self {
        Self {
            best_signature_time,
            certificate,
        }
    }
}

impl Check for BestSignatureTimeNotBeforeCertificateIssuanceCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::BestSignatureTimeNotBeforeCertificateIssuance
    }

    fn is_valid(&self) -> bool {
        self.best_signature_time >= self.certificate.not_before()
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NotYetValid)
    }
}

/// Checks the best signature time falls strictly between the issuance and
/// expiration of the signing certificate.
#[derive(Clone, Copy, Debug)]
pub struct BestSignatureTimeWithinCertificateValidityCheck<'a> {
    best_signature_time: DateTime,
    certificate: &'a CertificateToken,
}

impl<'a> BestSignatureTimeWithinCertificateValidityCheck<'a> {
    /// Create a new instance.
    pub fn new(best_signature_time: DateTime, certificate: &'a CertificateToken) -> Self {
        Self {
            best_signature_time,
            certificate,
        }
    }
}

impl Check for BestSignatureTimeWithinCertificateValidityCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::BestSignatureTimeWithinCertificateValidity
    }

    fn is_valid(&self) -> bool {
        self.certificate.not_before() < self.best_signature_time
            && self.best_signature_time < self.certificate.not_after()
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::OutOfBoundsNoPoe)
    }
}

/// A token whose algorithm fails the cryptographic constraints at the
/// validation time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImplicatedAlgorithm<'a> {
    /// The token using the algorithm
    pub token_id: &'a str,
    /// The date the algorithm stopped being secure, `None` when the algorithm
    /// or key size was never acceptable
    pub sunset: Option<DateTime>,
}

/// Checks every token relying on a rejected algorithm is proven to exist
/// before that algorithm's sunset.
///
/// Only sunsets can be overcome by a proof of existence. A token rejected
/// regardless of time fails the check, and so does an empty list since the
/// failure it should explain is unknown.
#[derive(Clone, Debug)]
pub struct CryptographicPoeCheck<'a> {
    poe: &'a ProofOfExistence,
    implicated: Vec<ImplicatedAlgorithm<'a>>,
}

impl<'a> CryptographicPoeCheck<'a> {
    /// Create a new instance.
    pub fn new(poe: &'a ProofOfExistence, implicated: Vec<ImplicatedAlgorithm<'a>>) -> Self {
        Self { poe, implicated }
    }
}

impl Check for CryptographicPoeCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::CryptographicPoe
    }

    fn is_valid(&self) -> bool {
        !self.implicated.is_empty()
            && self.implicated.iter().all(|implicated| {
                implicated
                    .sunset
                    .is_some_and(|sunset| self.poe.exists_before(implicated.token_id, sunset))
            })
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CryptoConstraintsFailureNoPoe)
    }
}

/// Checks the validation at the current time succeeded.
///
/// This reproduces the current time status when no past validation could
/// improve on it.
#[derive(Clone, Copy, Debug)]
pub struct CurrentTimeStatusCheck<'a> {
    current: &'a Conclusion,
}

impl<'a> CurrentTimeStatusCheck<'a> {
    /// Create a new instance from the current time conclusion.
    pub fn new(current: &'a Conclusion) -> Self {
        Self { current }
    }
}

impl Check for CurrentTimeStatusCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::CurrentTimeStatus
    }

    fn is_valid(&self) -> bool {
        self.current.is_valid()
    }

    fn indication(&self) -> Indication {
        self.current.indication()
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        self.current.sub_indication()
    }

    fn failure_message(&self) -> Message {
        Message::with_detail(
            MessageTag::CurrentTimeStatus,
            format!("the current time validation concluded {}", self.current),
        )
    }
}
