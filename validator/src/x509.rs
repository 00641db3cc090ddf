// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Building [`CertificateToken`]s from X.509 certificates.
//!
//! Only `ecdsa-with-SHA256` signatures over P-256 keys are supported.

use crate::{
    CertificateToken, DigestAlgorithm, EncryptionAlgorithm, Error, KeyUsageBit, Result,
    SignatureAlgorithm,
};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use der::oid::{AssociatedOid, ObjectIdentifier};
use der::{Decode, Encode};
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use tracing::trace;
use x509_cert::ext::pkix::KeyUsage;
use x509_cert::Certificate;

const OID_SIG_ECDSA_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");

/// The id of the token for `certificate`, derived from its serial number.
pub fn certificate_id(certificate: &Certificate) -> String {
    format!(
        "C-{}",
        hex::encode_upper(certificate.tbs_certificate.serial_number.as_bytes())
    )
}

/// Build the tokens for a certificate chain.
///
/// The `chain` goes from the leaf certificate to a self signed trust anchor.
/// Each returned token references the ids of its issuers and records whether
/// its signature verifies with the next certificate's key. The last
/// certificate is marked as the trust anchor and verified with its own key.
///
/// # Errors
/// * [`Error::EmptyCertificateChain`] when `chain` is empty.
/// * [`Error::UnsupportedSignatureAlgorithm`] for signatures other than
///   `ecdsa-with-SHA256`.
/// * [`Error::KeyDecoding`] and [`Error::SignatureDecoding`] for malformed
///   keys and signatures.
/// * [`Error::Der`] for malformed extensions.
pub fn certificate_chain_tokens(chain: &[Certificate]) -> Result<Vec<CertificateToken>> {
    if chain.is_empty() {
        return Err(Error::EmptyCertificateChain);
    }
    let ids = chain.iter().map(certificate_id).collect::<Vec<_>>();

    chain
        .iter()
        .enumerate()
        .map(|(index, certificate)| {
            let is_anchor = index + 1 == chain.len();
            let issuer = if is_anchor {
                certificate
            } else {
                &chain[index + 1]
            };
            let signature_valid = verify_signature(certificate, issuer)?;
            let validity = &certificate.tbs_certificate.validity;
            let token = CertificateToken::new(
                ids[index].clone(),
                validity.not_before.to_date_time(),
                validity.not_after.to_date_time(),
            )
            .with_trusted(is_anchor)
            .with_key_usages(key_usages(certificate)?)
            .with_signature_valid(signature_valid)
            .with_signature_algorithm(SignatureAlgorithm::new(
                EncryptionAlgorithm::Ecdsa,
                DigestAlgorithm::Sha256,
                256,
            ))
            .with_certificate_chain(ids[index + 1..].iter().map(String::as_str));
            trace!(id = token.id(), signature_valid, "Built certificate token");
            Ok(token)
        })
        .collect()
}

/// Verify the signature of `certificate` with the key of `issuer`.
///
/// A well formed signature which does not verify is `Ok(false)`.
fn verify_signature(certificate: &Certificate, issuer: &Certificate) -> Result<bool> {
    let algorithm = certificate.signature_algorithm.oid;
    if algorithm != OID_SIG_ECDSA_WITH_SHA256 {
        return Err(Error::UnsupportedSignatureAlgorithm(algorithm));
    }

    let key_bytes = issuer
        .tbs_certificate
        .subject_public_key_info
        .subject_public_key
        .as_bytes()
        .ok_or(Error::KeyDecoding)?;
    let key = VerifyingKey::from_sec1_bytes(key_bytes).map_err(|_| Error::KeyDecoding)?;

    let signature_bytes = certificate
        .signature
        .as_bytes()
        .ok_or(Error::SignatureDecoding)?;
    let signature = Signature::from_der(signature_bytes).map_err(|_| Error::SignatureDecoding)?;

    let message = certificate.tbs_certificate.to_der()?;
    Ok(key.verify(&message, &signature).is_ok())
}

fn key_usages(certificate: &Certificate) -> Result<Vec<KeyUsageBit>> {
    let extension = certificate
        .tbs_certificate
        .extensions
        .iter()
        .flatten()
        .find(|extension| extension.extn_id == KeyUsage::OID);
    let Some(extension) = extension else {
        return Ok(Vec::new());
    };
    let key_usage = KeyUsage::from_der(extension.extn_value.as_bytes())?;

    let bits = [
        (key_usage.digital_signature(), KeyUsageBit::DigitalSignature),
        (key_usage.non_repudiation(), KeyUsageBit::NonRepudiation),
        (key_usage.key_encipherment(), KeyUsageBit::KeyEncipherment),
        (key_usage.data_encipherment(), KeyUsageBit::DataEncipherment),
        (key_usage.key_agreement(), KeyUsageBit::KeyAgreement),
        (key_usage.key_cert_sign(), KeyUsageBit::KeyCertSign),
        (key_usage.crl_sign(), KeyUsageBit::CrlSign),
        (key_usage.encipher_only(), KeyUsageBit::EncipherOnly),
        (key_usage.decipher_only(), KeyUsageBit::DecipherOnly),
    ];
    Ok(bits
        .into_iter()
        .filter_map(|(set, bit)| set.then_some(bit))
        .collect())
}

impl From<&Certificate> for CertificateToken {
    /// A token for a lone certificate, without any issuer or signature
    /// information.
    fn from(certificate: &Certificate) -> Self {
        let validity = &certificate.tbs_certificate.validity;
        CertificateToken::new(
            certificate_id(certificate),
            validity.not_before.to_date_time(),
            validity.not_after.to_date_time(),
        )
    }
}
