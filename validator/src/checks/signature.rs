// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Checks about the signature itself and how it references its signing
//! certificate.

use crate::{
    CertificateToken, Check, Indication, Message, MessageTag, SignatureToken, SubIndication,
};

/// Checks that the signing certificate of a signature has been resolved.
#[derive(Clone, Copy, Debug)]
pub struct SigningCertificateRecognitionCheck<'a> {
    signature: &'a SignatureToken,
    certificate: Option<&'a CertificateToken>,
}

impl<'a> SigningCertificateRecognitionCheck<'a> {
    /// Create a new instance.
    ///
    /// # Arguments
    /// * `signature` - The signature
    /// * `certificate` - The certificate the signature references, if it
    ///   could be found
    pub fn new(signature: &'a SignatureToken, certificate: Option<&'a CertificateToken>) -> Self {
        Self {
            signature,
            certificate,
        }
    }
}

impl Check for SigningCertificateRecognitionCheck<'_> {
    fn tag(&self) -> MessageTag {
        MessageTag::SigningCertificateRecognition
    }

    fn is_valid(&self) -> bool {
        match (self.signature.signing_certificate(), self.certificate) {
            (Some(reference), Some(certificate)) => reference.certificate_id() == certificate.id(),
            _ => false,
        }
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NoSigningCertificateFound)
    }

    fn success_info(&self) -> Option<Message> {
        self.certificate.map(|certificate| {
            Message::with_detail(MessageTag::SigningCertificateIdentified, certificate.id())
        })
    }
}

token_check! {
    /// Checks the signing-certificate signed attribute is present.
    SigningCertificateAttributePresentCheck(SignatureToken) => SigningCertificateAttributePresent,
        Invalid / FormatFailure,
        |s| s.signing_certificate().is_some_and(|r| r.is_attribute_present());
    /// Checks the signing-certificate attribute carries a digest value.
    DigestValuePresentCheck(SignatureToken) => DigestValuePresent,
        Invalid / FormatFailure,
        |s| s.signing_certificate().is_some_and(|r| r.digest().is_some());
    /// Checks the signing-certificate digest value matches the certificate.
    DigestValueMatchCheck(SignatureToken) => DigestValueMatch,
        Indeterminate / NoSigningCertificateFound,
        |s| s.signing_certificate().is_some_and(|r| r.is_digest_match());
    /// Checks the issuer and serial number match the certificate.
    IssuerSerialMatchCheck(SignatureToken) => IssuerSerialMatch,
        Indeterminate / NoSigningCertificateFound,
        |s| s.signing_certificate().is_some_and(|r| r.is_issuer_serial_match());
    /// Checks a claimed signature policy could be identified. A signature
    /// without a policy passes.
    SignaturePolicyIdentifiedCheck(SignatureToken) => SignaturePolicyIdentified,
        Indeterminate / PolicyProcessingError,
        |s| s.policy().map_or(true, |p| p.is_identified());
    /// Checks the signed data was found.
    ReferenceDataFoundCheck(SignatureToken) => ReferenceDataFound,
        Indeterminate / SignedDataNotFound, |s| s.is_reference_data_found();
    /// Checks the digest of the signed data matched.
    ReferenceDataIntactCheck(SignatureToken) => ReferenceDataIntact,
        Invalid / HashFailure, |s| s.is_reference_data_intact();
    /// Checks the signature value verified.
    SignatureIntactCheck(SignatureToken) => SignatureIntact,
        Invalid / SigCryptoFailure, |s| s.is_signature_intact();
    /// Checks the signature claims a signing time.
    SigningTimePresentCheck(SignatureToken) => SigningTimePresent,
        Indeterminate / SigConstraintsFailure, |s| s.signing_time().is_some();
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        CertificateDigest, DigestAlgorithm, SignaturePolicy, SigningCertificateReference,
    };
    use der::DateTime;

    fn time(text: &str) -> DateTime {
        text.parse().expect("Failed to parse time")
    }

    fn certificate() -> CertificateToken {
        CertificateToken::new("C-1", time("2020-01-01T00:00:00Z"), time("2030-01-01T00:00:00Z"))
    }

    #[test]
    fn recognition_notes_the_identified_certificate() {
        let certificate = certificate();
        let signature = SignatureToken::new("S-1")
            .with_signing_certificate(SigningCertificateReference::new("C-1", None));
        let check = SigningCertificateRecognitionCheck::new(&signature, Some(&certificate));
        assert!(check.is_valid());
        assert_eq!(
            check.success_info(),
            Some(Message::with_detail(MessageTag::SigningCertificateIdentified, "C-1"))
        );

        let unresolved = SigningCertificateRecognitionCheck::new(&signature, None);
        assert!(!unresolved.is_valid());
        assert_eq!(unresolved.success_info(), None);
    }

    #[test]
    fn absent_digest_is_a_format_failure() {
        let signature = SignatureToken::new("S-1")
            .with_signing_certificate(SigningCertificateReference::new("C-1", None));
        let check = DigestValuePresentCheck::new(&signature);
        assert!(!check.is_valid());
        assert_eq!(check.indication(), Indication::Invalid);
        assert_eq!(check.sub_indication(), Some(SubIndication::FormatFailure));
        assert!(!DigestValueMatchCheck::new(&signature).is_valid());
        assert!(SigningCertificateAttributePresentCheck::new(&signature).is_valid());
    }

    #[test]
    fn present_digest() {
        let signature = SignatureToken::new("S-1").with_signing_certificate(
            SigningCertificateReference::new(
                "C-1",
                Some(CertificateDigest::new(DigestAlgorithm::Sha256, [0u8; 32])),
            ),
        );
        assert!(DigestValuePresentCheck::new(&signature).is_valid());
        assert!(DigestValueMatchCheck::new(&signature).is_valid());
        assert!(IssuerSerialMatchCheck::new(&signature).is_valid());
    }

    #[test]
    fn signature_policy() {
        let implicit = SignatureToken::new("S-1");
        assert!(SignaturePolicyIdentifiedCheck::new(&implicit).is_valid());
        let unknown = SignatureToken::new("S-2").with_policy(SignaturePolicy::new("1.2.3", false));
        assert!(!SignaturePolicyIdentifiedCheck::new(&unknown).is_valid());
    }

    #[test]
    fn integrity_failures() {
        let signature = SignatureToken::new("S-1").with_integrity(true, false, false);
        assert!(ReferenceDataFoundCheck::new(&signature).is_valid());
        let hash = ReferenceDataIntactCheck::new(&signature);
        assert!(!hash.is_valid());
        assert_eq!(hash.sub_indication(), Some(SubIndication::HashFailure));
        let crypto = SignatureIntactCheck::new(&signature);
        assert!(!crypto.is_valid());
        assert_eq!(crypto.sub_indication(), Some(SubIndication::SigCryptoFailure));
        assert!(!SigningTimePresentCheck::new(&signature).is_valid());
    }
}
