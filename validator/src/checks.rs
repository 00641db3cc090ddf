// Copyright (c) 2023-2025 The MobileCoin Foundation

//! The leaf checks used by the validation blocks.
//!
//! Each check evaluates one predicate over already gathered evidence and
//! knows the [`Indication`](crate::Indication) and
//! [`SubIndication`](crate::SubIndication) it maps to when the predicate
//! does not hold.

/// Macro to generate the boilerplate of a check which is a plain predicate
/// over one token.
///
/// # Arguments
/// * `name` - The name of the check type
/// * `token` - The type of the token the check borrows
/// * `tag` - The [`MessageTag`](crate::MessageTag) variant of the check
/// * `indication` / `sub_indication` - The status variants on failure
/// * `predicate` - A closure like expression over the token
macro_rules! token_check {
    ($($(#[$meta:meta])* $name:ident($token:ty) => $tag:ident, $indication:ident / $sub_indication:ident, |$t:ident| $predicate:expr;)*) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name<'a> {
            token: &'a $token,
        }

        impl<'a> $name<'a> {
            /// Create a new instance.
            pub fn new(token: &'a $token) -> Self {
                Self { token }
            }
        }

        impl $crate::Check for $name<'_> {
            fn tag(&self) -> $crate::MessageTag {
                $crate::MessageTag::$tag
            }

            fn is_valid(&self) -> bool {
                let $t = self.token;
                $predicate
            }

            fn indication(&self) -> $crate::Indication {
                $crate::Indication::$indication
            }

            fn sub_indication(&self) -> Option<$crate::SubIndication> {
                Some($crate::SubIndication::$sub_indication)
            }
        }
    )*}
}

mod certificate;
mod cryptographic;
mod past;
mod revocation;
mod signature;

pub use certificate::{
    CertificateExpirationCheck, CertificateSignatureCheck, IssuedToLegalPersonCheck,
    KeyUsageCheck, ProspectiveCertificateChainCheck, QualifiedCheck, SupportedBySscdCheck,
    TslStatusAndValidityCheck, TslStatusCheck, TslValidityCheck,
};
pub use cryptographic::CryptographicCheck;
pub use past::{
    BestSignatureTimeNotBeforeCertificateIssuanceCheck,
    BestSignatureTimeWithinCertificateValidityCheck, CryptographicPoeCheck, CurrentTimeStatusCheck,
    ImplicatedAlgorithm, PastCertificateValidationCheck, PoeExistsCheck,
};
pub use revocation::{
    CertificateNotOnHoldCheck, CertificateNotRevokedCheck, IntermediateCertificateNotRevokedCheck,
    RevocationDataAvailableCheck, RevocationDataTrustedCheck, RevocationFreshnessCheck,
};
pub use signature::{
    DigestValueMatchCheck, DigestValuePresentCheck, IssuerSerialMatchCheck,
    ReferenceDataFoundCheck, ReferenceDataIntactCheck, SignatureIntactCheck,
    SignaturePolicyIdentifiedCheck, SigningCertificateAttributePresentCheck,
    SigningCertificateRecognitionCheck, SigningTimePresentCheck,
};
