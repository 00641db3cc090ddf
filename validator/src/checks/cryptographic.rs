// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Cryptographic strength of a token's signature.

use crate::{Check, CryptographicConstraint, Indication, MessageTag, SubIndication, Token};
use der::DateTime;

/// Checks the algorithm a token is signed with is acceptable and not past its
/// sunset at a time.
///
/// A token without a known signature algorithm does not pass.
#[derive(Clone, Copy, Debug)]
pub struct CryptographicCheck<'a> {
    token: Token<'a>,
    constraint: &'a CryptographicConstraint,
    time: DateTime,
}

impl<'a> CryptographicCheck<'a> {
    /// Create a new instance.
    pub fn new(token: Token<'a>, constraint: &'a CryptographicConstraint, time: DateTime) -> Self {
        Self {
            token,
            constraint,
            time,
        }
    }
}

impl Check for CryptographicCheck<'_> {
    fn tag(&self) -> MessageTag {
        match self.token {
            Token::SigningCertificate(_) | Token::CaCertificate(_) => {
                MessageTag::CertificateCryptographic
            }
            Token::Revocation(_) => MessageTag::RevocationCryptographic,
            Token::Timestamp(_) => MessageTag::TimestampCryptographic,
            Token::Signature(_) => MessageTag::SignatureCryptographic,
        }
    }

    fn is_valid(&self) -> bool {
        self.token
            .signature_algorithm()
            .is_some_and(|algorithm| self.constraint.is_valid_at(algorithm, self.time))
    }

    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CryptoConstraintsFailureNoPoe)
    }
}
