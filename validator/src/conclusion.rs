// Copyright (c) 2023-2025 The MobileCoin Foundation

//! The verdict accumulated by a rule chain.

use crate::{Indication, SubIndication};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};

/// The question asked by each check, used to identify it in messages and
/// reports.
#[derive(displaydoc::Display, Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MessageTag {
    /// Can the certificate chain be built till a trust anchor?
    ProspectiveCertificateChain,
    /// Is the certificate validity range covering the validation time?
    CertificateExpiration,
    /// Has the certificate key usage been verified?
    KeyUsage,
    /// Is the certificate signature intact?
    CertificateSignature,
    /// Are the cryptographic constraints met for the certificate?
    CertificateCryptographic,
    /// Are the cryptographic constraints met for the revocation data?
    RevocationCryptographic,
    /// Are the cryptographic constraints met for the signature?
    SignatureCryptographic,
    /// Are the cryptographic constraints met for the timestamp?
    TimestampCryptographic,
    /// Is the revocation data present for the certificate?
    RevocationDataAvailable,
    /// Is the revocation data issued by a trusted source?
    RevocationDataTrusted,
    /// Is the revocation information fresh for the certificate?
    RevocationFreshness,
    /// Is the certificate not revoked?
    CertificateNotRevoked,
    /// Is the certificate not on hold?
    CertificateNotOnHold,
    /// Is the trusted service status applicable at the validation time?
    TslValidity,
    /// Is the trusted service status acceptable?
    TslStatus,
    /// Is the trusted service status acceptable and applicable at the validation time?
    TslStatusAndValidity,
    /// Is the intermediate certificate not revoked?
    IntermediateCertificateNotRevoked,
    /// Is the certificate qualified?
    Qualified,
    /// Is the private key on a secure signature creation device?
    SupportedBySscd,
    /// Is the certificate issued to a legal person?
    IssuedToLegalPerson,
    /// Is there an identified candidate for the signing certificate?
    SigningCertificateRecognition,
    /// The signing certificate has been identified
    SigningCertificateIdentified,
    /// Is the signed attribute 'signing-certificate' present?
    SigningCertificateAttributePresent,
    /// Is the signed attribute 'signing-certificate' digest value present?
    DigestValuePresent,
    /// Does the 'signing-certificate' digest value match the certificate?
    DigestValueMatch,
    /// Do the issuer and serial number match the signing certificate?
    IssuerSerialMatch,
    /// Is the signature policy known?
    SignaturePolicyIdentified,
    /// Has the signed data been found?
    ReferenceDataFound,
    /// Is the signed data intact?
    ReferenceDataIntact,
    /// Is the signature intact?
    SignatureIntact,
    /// Is the signing time present?
    SigningTimePresent,
    /// Is the past certificate validation conclusion acceptable?
    PastCertificateValidation,
    /// Does a proof of existence predate the control time?
    PoeExists,
    /// Is the best signature time not before the certificate issuance?
    BestSignatureTimeNotBeforeCertificateIssuance,
    /// Is the best signature time after the certificate issuance and before its expiration?
    BestSignatureTimeWithinCertificateValidity,
    /// Does a proof of existence predate the sunset of every insecure algorithm?
    CryptographicPoe,
    /// Is the current time validation conclusion acceptable?
    CurrentTimeStatus,
}

/// A message recorded in a [`Conclusion`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    tag: MessageTag,
    detail: Option<String>,
}

impl Message {
    /// Create a message with no further detail.
    pub fn new(tag: MessageTag) -> Self {
        Self { tag, detail: None }
    }

    /// Create a message with some further detail.
    pub fn with_detail(tag: MessageTag, detail: impl Into<String>) -> Self {
        Self {
            tag,
            detail: Some(detail.into()),
        }
    }

    /// The tag of the check that produced the message
    pub fn tag(&self) -> MessageTag {
        self.tag
    }

    /// Further detail, if any
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.tag),
            None => write!(f, "{}", self.tag),
        }
    }
}

/// The verdict of a validation block.
///
/// A [`Indication::Valid`] conclusion never carries a sub-indication. The
/// message lists are kept in the order they were recorded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conclusion {
    indication: Indication,
    sub_indication: Option<SubIndication>,
    infos: Vec<Message>,
    warnings: Vec<Message>,
    errors: Vec<Message>,
}

impl Default for Conclusion {
    fn default() -> Self {
        Self::valid()
    }
}

impl Conclusion {
    /// A valid conclusion without any messages.
    pub fn valid() -> Self {
        Self {
            indication: Indication::Valid,
            sub_indication: None,
            infos: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// A conclusion with the given status and no messages.
    ///
    /// The sub-indication is dropped for [`Indication::Valid`].
    pub fn new(indication: Indication, sub_indication: Option<SubIndication>) -> Self {
        let mut conclusion = Self::valid();
        conclusion.set_status(indication, sub_indication);
        conclusion
    }

    /// The indication
    pub fn indication(&self) -> Indication {
        self.indication
    }

    /// The sub-indication, never present for a valid conclusion
    pub fn sub_indication(&self) -> Option<SubIndication> {
        self.sub_indication
    }

    /// Returns `true` for a [`Indication::Valid`] conclusion
    pub fn is_valid(&self) -> bool {
        self.indication == Indication::Valid
    }

    /// Informational messages
    pub fn infos(&self) -> &[Message] {
        &self.infos
    }

    /// Warnings from `WARN` level failures
    pub fn warnings(&self) -> &[Message] {
        &self.warnings
    }

    /// Errors from `FAIL` level failures
    pub fn errors(&self) -> &[Message] {
        &self.errors
    }

    pub(crate) fn set_status(
        &mut self,
        indication: Indication,
        sub_indication: Option<SubIndication>,
    ) {
        self.indication = indication;
        self.sub_indication = match indication {
            Indication::Valid => None,
            _ => sub_indication,
        };
    }

    pub(crate) fn add_info(&mut self, message: Message) {
        self.infos.push(message);
    }

    pub(crate) fn add_warning(&mut self, message: Message) {
        self.warnings.push(message);
    }

    pub(crate) fn add_error(&mut self, message: Message) {
        self.errors.push(message);
    }
}

impl Display for Conclusion {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.sub_indication {
            Some(sub_indication) => write!(f, "{}/{sub_indication}", self.indication),
            None => write!(f, "{}", self.indication),
        }
    }
}
