// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Algorithm data types referenced by tokens and cryptographic constraints

use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Public key algorithm of a signature.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EncryptionAlgorithm {
    /// RSA
    Rsa,
    /// DSA
    Dsa,
    /// Elliptic curve DSA
    Ecdsa,
    /// Edwards curve DSA
    EdDsa,
}

/// Digest algorithm of a signature.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DigestAlgorithm {
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

/// Either kind of algorithm, used where a constraint may name both.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// A public key algorithm
    Encryption(EncryptionAlgorithm),
    /// A digest algorithm
    Digest(DigestAlgorithm),
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Algorithm::Encryption(algorithm) => write!(f, "{algorithm:?}"),
            Algorithm::Digest(algorithm) => write!(f, "{algorithm:?}"),
        }
    }
}

/// The algorithms used to produce a signature over a token.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureAlgorithm {
    encryption: EncryptionAlgorithm,
    digest: DigestAlgorithm,
    /// Size of the public key in bits
    key_length: u32,
}

impl SignatureAlgorithm {
    /// Create a new instance.
    pub fn new(encryption: EncryptionAlgorithm, digest: DigestAlgorithm, key_length: u32) -> Self {
        Self {
            encryption,
            digest,
            key_length,
        }
    }

    /// The public key algorithm
    pub fn encryption(&self) -> EncryptionAlgorithm {
        self.encryption
    }

    /// The digest algorithm
    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    /// The public key size in bits
    pub fn key_length(&self) -> u32 {
        self.key_length
    }
}

/// A bit of the X.509 key usage extension.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyUsageBit {
    /// digitalSignature
    DigitalSignature,
    /// nonRepudiation, also known as contentCommitment
    NonRepudiation,
    /// keyEncipherment
    KeyEncipherment,
    /// dataEncipherment
    DataEncipherment,
    /// keyAgreement
    KeyAgreement,
    /// keyCertSign
    KeyCertSign,
    /// cRLSign
    CrlSign,
    /// encipherOnly
    EncipherOnly,
    /// decipherOnly
    DecipherOnly,
}
