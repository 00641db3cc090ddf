// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Errors that can occur while setting up or running a validation
//!
//! These are integrity and configuration errors. A certificate that is
//! revoked, expired or otherwise untrustworthy is *not* an error, it is
//! reported through the [`Conclusion`](crate::Conclusion) of the block that
//! evaluated it.

use crate::{BlockType, CheckType, Context, SubContext};
use alloc::string::String;

/// Result type for fallible operations of this crate
pub type Result<T> = core::result::Result<T, Error>;

/// Error working with validation inputs
#[derive(displaydoc::Display, Debug)]
pub enum Error {
    /// Certificate {0} is referenced but is not present in the diagnostic data
    UnknownCertificate(String),
    /// Revocation data {0} is referenced but is not present in the diagnostic data
    UnknownRevocation(String),
    /// Signature {0} is not present in the diagnostic data
    UnknownSignature(String),
    /// The policy has no {check:?} constraint for context {context:?} and sub context {sub_context:?}
    #[allow(missing_docs)]
    MissingConstraint {
        check: CheckType,
        context: Context,
        sub_context: Option<SubContext>,
    },
    /// The rule chain for {0} was built without any checks
    EmptyChain(BlockType),
    /// Error parsing JSON: {0}
    Serde(serde_json::Error),
    /// Error converting from DER: {0}
    Der(der::Error),
    /// Unsupported certificate signature algorithm {0}
    UnsupportedSignatureAlgorithm(der::oid::ObjectIdentifier),
    /// An error occurred decoding the key from a certificate
    KeyDecoding,
    /// An error occurred decoding the signature from a certificate
    SignatureDecoding,
    /// A certificate chain needs at least one certificate
    EmptyCertificateChain,
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serde(e)
    }
}

impl From<der::Error> for Error {
    fn from(e: der::Error) -> Self {
        Error::Der(e)
    }
}
