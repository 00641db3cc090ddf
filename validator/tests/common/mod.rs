// Copyright (c) 2023-2025 The MobileCoin Foundation

#![allow(dead_code)]

use der::DateTime;
use mc_ades_validator::{
    CertificateDigest, CertificateToken, DiagnosticData, DigestAlgorithm, EncryptionAlgorithm,
    KeyUsageBit, RevocationToken, SignatureAlgorithm, SignatureToken,
    SigningCertificateReference, TimestampToken, ValidationPolicy,
};

pub const POLICY: &str = include_str!("../data/policy.json");
pub const DIAGNOSTIC_DATA: &str = include_str!("../data/diagnostic_data.json");

const SIGNING_CERTIFICATE_DIGEST: &str =
    "5d5b3e0a1c7e9f3a2b4c6d8e0f1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c";

pub fn time(text: &str) -> DateTime {
    text.parse().expect("Failed to parse time")
}

/// The validation time of every test
pub fn now() -> DateTime {
    time("2025-01-01T00:00:00Z")
}

pub fn policy() -> ValidationPolicy {
    ValidationPolicy::try_from(POLICY).expect("Failed to parse policy")
}

pub fn ecdsa_sha256() -> SignatureAlgorithm {
    SignatureAlgorithm::new(EncryptionAlgorithm::Ecdsa, DigestAlgorithm::Sha256, 256)
}

pub fn ecdsa_sha1() -> SignatureAlgorithm {
    SignatureAlgorithm::new(EncryptionAlgorithm::Ecdsa, DigestAlgorithm::Sha1, 256)
}

/// The tokens of `data/diagnostic_data.json`, built in code so tests can
/// alter them before assembling the [`DiagnosticData`].
#[derive(Clone, Debug)]
pub struct Fixture {
    pub signature: SignatureToken,
    pub leaf: CertificateToken,
    pub ca: CertificateToken,
    pub root: CertificateToken,
    pub leaf_revocation: RevocationToken,
    pub ca_revocation: RevocationToken,
    pub timestamps: Vec<TimestampToken>,
}

impl Fixture {
    pub fn new() -> Self {
        let digest = hex::decode(SIGNING_CERTIFICATE_DIGEST).expect("Failed to decode digest");
        let signature = SignatureToken::new("S-1")
            .with_signing_certificate(SigningCertificateReference::new(
                "C-LEAF",
                Some(CertificateDigest::new(DigestAlgorithm::Sha256, digest)),
            ))
            .with_signing_time(time("2023-06-01T12:00:00Z"))
            .with_signature_algorithm(ecdsa_sha256());

        let leaf = CertificateToken::new(
            "C-LEAF",
            time("2022-01-01T00:00:00Z"),
            time("2029-01-01T00:00:00Z"),
        )
        .with_key_usages([KeyUsageBit::NonRepudiation])
        .with_signature_valid(true)
        .with_signature_algorithm(ecdsa_sha256())
        .with_certificate_chain(["C-CA", "C-ROOT"])
        .with_revocation("R-LEAF")
        .with_qualification(true, true, false);

        let ca = CertificateToken::new(
            "C-CA",
            time("2018-01-01T00:00:00Z"),
            time("2033-01-01T00:00:00Z"),
        )
        .with_key_usages([KeyUsageBit::KeyCertSign, KeyUsageBit::CrlSign])
        .with_signature_valid(true)
        .with_signature_algorithm(ecdsa_sha256())
        .with_certificate_chain(["C-ROOT"])
        .with_revocation("R-CA");

        let root = CertificateToken::new(
            "C-ROOT",
            time("2018-01-01T00:00:00Z"),
            time("2049-01-01T00:00:00Z"),
        )
        .with_trusted(true)
        .with_key_usages([KeyUsageBit::KeyCertSign, KeyUsageBit::CrlSign])
        .with_signature_valid(true)
        .with_signature_algorithm(ecdsa_sha256());

        Self {
            signature,
            leaf,
            ca,
            root,
            leaf_revocation: good("R-LEAF"),
            ca_revocation: good("R-CA"),
            timestamps: vec![TimestampToken::new(
                "T-1",
                time("2023-06-01T12:05:00Z"),
                ["S-1"],
            )],
        }
    }

    pub fn data(self) -> DiagnosticData {
        DiagnosticData::new(
            [self.signature],
            [self.leaf, self.ca, self.root],
            [self.leaf_revocation, self.ca_revocation],
            self.timestamps,
        )
    }
}

/// Trusted, fresh revocation data reporting a good status.
pub fn good(id: &str) -> RevocationToken {
    RevocationToken::good(id, time("2024-12-31T12:00:00Z"))
        .with_trusted(true)
        .with_signature_algorithm(ecdsa_sha256())
}
