// Copyright (c) 2023-2025 The MobileCoin Foundation

//! The container of every token gathered for one signed object.

use crate::{
    CertificateToken, Error, Result, RevocationToken, SignatureToken, TimestampToken,
};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// All of the tokens available to a validation run.
///
/// Lookups are by token id. An id that is referenced by one token but missing
/// from the container is an integrity error, never a validation outcome.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticData {
    #[serde(default)]
    signatures: Vec<SignatureToken>,
    #[serde(default)]
    certificates: Vec<CertificateToken>,
    #[serde(default)]
    revocations: Vec<RevocationToken>,
    #[serde(default)]
    timestamps: Vec<TimestampToken>,
}

impl DiagnosticData {
    /// Create a new instance.
    pub fn new(
        signatures: impl IntoIterator<Item = SignatureToken>,
        certificates: impl IntoIterator<Item = CertificateToken>,
        revocations: impl IntoIterator<Item = RevocationToken>,
        timestamps: impl IntoIterator<Item = TimestampToken>,
    ) -> Self {
        Self {
            signatures: signatures.into_iter().collect(),
            certificates: certificates.into_iter().collect(),
            revocations: revocations.into_iter().collect(),
            timestamps: timestamps.into_iter().collect(),
        }
    }

    /// The signatures
    pub fn signatures(&self) -> &[SignatureToken] {
        &self.signatures
    }

    /// The certificates
    pub fn certificates(&self) -> &[CertificateToken] {
        &self.certificates
    }

    /// The revocation data
    pub fn revocations(&self) -> &[RevocationToken] {
        &self.revocations
    }

    /// The timestamps
    pub fn timestamps(&self) -> &[TimestampToken] {
        &self.timestamps
    }

    /// Look up a signature by id.
    pub fn signature(&self, id: &str) -> Result<&SignatureToken> {
        self.signatures
            .iter()
            .find(|signature| signature.id() == id)
            .ok_or_else(|| Error::UnknownSignature(id.into()))
    }

    /// Look up a certificate by id.
    pub fn certificate(&self, id: &str) -> Result<&CertificateToken> {
        self.certificates
            .iter()
            .find(|certificate| certificate.id() == id)
            .ok_or_else(|| Error::UnknownCertificate(id.into()))
    }

    /// Look up a revocation data object by id.
    pub fn revocation(&self, id: &str) -> Result<&RevocationToken> {
        self.revocations
            .iter()
            .find(|revocation| revocation.id() == id)
            .ok_or_else(|| Error::UnknownRevocation(id.into()))
    }

    /// The revocation data of `certificate`, `None` when it has none.
    pub fn revocation_of(&self, certificate: &CertificateToken) -> Result<Option<&RevocationToken>> {
        certificate
            .revocation_id()
            .map(|id| self.revocation(id))
            .transpose()
    }

    /// The issuer chain of `certificate`, issuer first and trust anchor last.
    pub fn chain_of(&self, certificate: &CertificateToken) -> Result<Vec<&CertificateToken>> {
        certificate
            .certificate_chain()
            .iter()
            .map(|id| self.certificate(id))
            .collect()
    }
}

impl TryFrom<&str> for DiagnosticData {
    type Error = Error;

    fn try_from(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    use der::DateTime;

    fn time(text: &str) -> DateTime {
        text.parse().expect("Failed to parse time")
    }

    fn data() -> DiagnosticData {
        let anchor = CertificateToken::new(
            "C-ROOT",
            time("2018-01-01T00:00:00Z"),
            time("2049-01-01T00:00:00Z"),
        )
        .with_trusted(true);
        let leaf = CertificateToken::new(
            "C-LEAF",
            time("2022-01-01T00:00:00Z"),
            time("2029-01-01T00:00:00Z"),
        )
        .with_certificate_chain(["C-ROOT"])
        .with_revocation("R-LEAF");
        let revocation = RevocationToken::good("R-LEAF", time("2024-01-01T00:00:00Z"));
        DiagnosticData::new([], [leaf, anchor], [revocation], [])
    }

    #[test]
    fn chain_lookup_resolves_issuers_in_order() {
        let data = data();
        let leaf = data.certificate("C-LEAF").expect("Leaf should be present");
        let chain = data.chain_of(leaf).expect("Chain should resolve");
        let ids = chain.iter().map(|c| c.id()).collect::<Vec<_>>();
        assert_eq!(ids, ["C-ROOT"]);

        let revocation = data.revocation_of(leaf).expect("Revocation should resolve");
        assert_eq!(revocation.map(RevocationToken::id), Some("R-LEAF"));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let data = data();
        assert_matches!(data.certificate("C-NOPE"), Err(Error::UnknownCertificate(id)) if id == "C-NOPE");
        assert_matches!(data.revocation("R-NOPE"), Err(Error::UnknownRevocation(_)));
        assert_matches!(data.signature("S-NOPE"), Err(Error::UnknownSignature(_)));

        let orphan = CertificateToken::new(
            "C-ORPHAN",
            time("2022-01-01T00:00:00Z"),
            time("2029-01-01T00:00:00Z"),
        )
        .with_certificate_chain(["C-MISSING"]);
        assert_matches!(data.chain_of(&orphan), Err(Error::UnknownCertificate(_)));
    }

    #[test]
    fn try_from_json() {
        let json = r#"{
            "certificates": [
                { "id": "C-1", "not_before": "2020-01-01T00:00:00Z", "not_after": "2030-01-01T00:00:00Z", "trusted": true }
            ]
        }"#;
        let data = DiagnosticData::try_from(json).expect("Failed to parse diagnostic data");
        assert!(data.signatures().is_empty());
        assert!(data.certificate("C-1").expect("Certificate should be present").is_trusted());
    }

    #[test]
    fn try_from_bad_json() {
        assert_matches!(DiagnosticData::try_from(r#"{"certs": []}"#), Err(Error::Serde(_)));
    }
}
