// Copyright (c) 2023-2025 The MobileCoin Foundation

#![doc = include_str!("../README.md")]
#![deny(missing_docs, missing_debug_implementations, unsafe_code)]
#![no_std]

extern crate alloc;

mod algorithm;
mod bbb;
mod chain;
pub mod checks;
mod conclusion;
mod diagnostic;
mod error;
mod pcv;
mod poe;
mod policy;
mod psv;
mod report;
mod status;
mod time;
mod token;
pub mod x509;
mod xcv;

pub use algorithm::{
    Algorithm, DigestAlgorithm, EncryptionAlgorithm, KeyUsageBit, SignatureAlgorithm,
};
pub use bbb::{BasicBuildingBlocks, BasicBuildingBlocksReport};
pub use chain::{Check, RuleChain, RuleChainBuilder};
pub use conclusion::{Conclusion, Message, MessageTag};
pub use diagnostic::DiagnosticData;
pub use error::{Error, Result};
pub use pcv::{PastCertificateValidation, PastCertificateValidationReport};
pub use poe::ProofOfExistence;
pub use policy::{
    AlgorithmExpiration, CheckType, CryptographicConstraint, KeyUsageConstraint,
    LevelConstraint, TimeConstraint, ValidationPolicy,
};
pub use psv::PastSignatureValidation;
pub use report::{BlockReport, BlockType, ConstraintResult, ConstraintStatus};
pub use status::{Context, Indication, Level, SubContext, SubIndication};
pub use token::{
    CertificateDigest, CertificateToken, RevocationReason, RevocationStatus, RevocationToken,
    ServiceStatus, SignaturePolicy, SignatureToken, SigningCertificateReference, Token,
    TimestampToken, TrustedService,
};
pub use xcv::X509CertificateValidation;
