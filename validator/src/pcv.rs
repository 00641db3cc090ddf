// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Past certificate validation.
//!
//! Finds the latest time at which a certificate chain that fails at the
//! current time could still be trusted, the *control time*, and re-checks
//! the chain at it.

use crate::checks::{
    CertificateExpirationCheck, CertificateSignatureCheck, ProspectiveCertificateChainCheck,
};
use crate::{
    BlockReport, BlockType, CertificateToken, Conclusion, Context, DiagnosticData, Level, Result,
    RuleChainBuilder, SubContext, ValidationPolicy,
};
use alloc::vec;
use alloc::vec::Vec;
use der::DateTime;
use tracing::debug;

/// The outcome of a [`PastCertificateValidation`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PastCertificateValidationReport {
    report: BlockReport,
    control_time: Option<DateTime>,
}

impl PastCertificateValidationReport {
    /// The block report
    pub fn report(&self) -> &BlockReport {
        &self.report
    }

    /// The verdict of the block
    pub fn conclusion(&self) -> &Conclusion {
        self.report.conclusion()
    }

    /// The time the chain was found valid at, `None` unless the conclusion
    /// is valid.
    pub fn control_time(&self) -> Option<DateTime> {
        self.control_time
    }

    /// Take the block report, discarding the control time.
    pub fn into_report(self) -> BlockReport {
        self.report
    }
}

/// Validates a certificate chain at a time in the past.
///
/// Starting at the current time, the chain is walked from the trust anchor
/// toward the certificate. For every certificate that is not a trust anchor
/// the control time moves back to:
/// 1. its revocation date, when it is revoked at the control time,
/// 2. otherwise its `notAfter`, when it expired before the control time,
/// 3. the sunset date of its signature algorithm, when that precedes the
///    control time.
///
/// The chain is then checked at the control time. When those checks fail
/// the status of the current time validation is carried over.
#[derive(Clone, Copy, Debug)]
pub struct PastCertificateValidation<'a> {
    data: &'a DiagnosticData,
    certificate: &'a CertificateToken,
    current_time: DateTime,
    context: Context,
    policy: &'a ValidationPolicy,
    current: &'a Conclusion,
}

impl<'a> PastCertificateValidation<'a> {
    /// Create a new instance.
    ///
    /// # Arguments
    /// * `data` - The diagnostic data the certificate chain is resolved from
    /// * `certificate` - The certificate the chain starts from
    /// * `current_time` - The time the walk starts from
    /// * `context` - What the certificate is used for
    /// * `policy` - The policy providing the algorithm sunset dates
    /// * `current` - The conclusion of the validation at the current time
    pub fn new(
        data: &'a DiagnosticData,
        certificate: &'a CertificateToken,
        current_time: DateTime,
        context: Context,
        policy: &'a ValidationPolicy,
        current: &'a Conclusion,
    ) -> Self {
        Self {
            data,
            certificate,
            current_time,
            context,
            policy,
            current,
        }
    }

    /// Run the validation.
    ///
    /// # Errors
    /// * [`Error::UnknownCertificate`](crate::Error::UnknownCertificate) and
    ///   [`Error::UnknownRevocation`](crate::Error::UnknownRevocation) when
    ///   the chain references tokens missing from the diagnostic data.
    pub fn execute(&self) -> Result<PastCertificateValidationReport> {
        let certificate = self.certificate;
        let chain = self.data.chain_of(certificate)?;
        let mut path = vec![certificate];
        path.extend(chain.iter().copied());

        let Some(control_time) = self.control_time(&path)? else {
            let report = BlockReport::new(
                BlockType::Pcv,
                Some(certificate.id().into()),
                Conclusion::valid(),
                Vec::new(),
                Vec::new(),
            );
            return Ok(self.carry_over(report));
        };

        let mut builder = RuleChainBuilder::new(BlockType::Pcv, Some(certificate.id()));
        builder.add(
            ProspectiveCertificateChainCheck::new(certificate, chain.clone()),
            Level::Fail,
        );
        builder.add(CertificateSignatureCheck::new(certificate), Level::Fail);
        builder.add(
            CertificateExpirationCheck::new(certificate, control_time),
            Level::Fail,
        );
        for &issuer in &chain {
            builder.add_scoped(CertificateSignatureCheck::new(issuer), Level::Fail, issuer.id());
            builder.add_scoped(
                CertificateExpirationCheck::new(issuer, control_time),
                Level::Fail,
                issuer.id(),
            );
        }
        let report = builder.build()?.execute();

        debug!(
            certificate = certificate.id(),
            control_time = %control_time,
            conclusion = %report.conclusion(),
            "Past certificate validation"
        );
        if report.conclusion().is_valid() {
            Ok(PastCertificateValidationReport {
                report,
                control_time: Some(control_time),
            })
        } else {
            Ok(self.carry_over(report))
        }
    }

    /// Walk `path`, certificate first, from its end and return the control
    /// time. `None` when a certificate is revoked without a known date.
    fn control_time(&self, path: &[&CertificateToken]) -> Result<Option<DateTime>> {
        let mut control_time = self.current_time;
        for (index, &certificate) in path.iter().enumerate().rev() {
            if certificate.is_trusted() {
                continue;
            }

            let revocation = self
                .data
                .revocation_of(certificate)?
                .filter(|revocation| revocation.is_revoked_at(control_time));
            match revocation {
                Some(revocation) => {
                    let Some(date) = revocation.revocation_date() else {
                        debug!(
                            certificate = certificate.id(),
                            "Revoked without a revocation date"
                        );
                        return Ok(None);
                    };
                    debug!(certificate = certificate.id(), control_time = %date, "Revoked");
                    control_time = date;
                }
                None if certificate.not_after() < control_time => {
                    control_time = certificate.not_after();
                    debug!(certificate = certificate.id(), control_time = %control_time, "Expired");
                }
                None => {}
            }

            let sub_context = if index == 0 {
                SubContext::SigningCert
            } else {
                SubContext::CaCertificate
            };
            let sunset = certificate.signature_algorithm().and_then(|algorithm| {
                self.policy
                    .algorithm_expiration(algorithm, self.context, Some(sub_context))
            });
            if let Some(sunset) = sunset.filter(|&sunset| sunset < control_time) {
                control_time = sunset;
                debug!(certificate = certificate.id(), control_time = %control_time, "Algorithm sunset");
            }
        }
        Ok(Some(control_time))
    }

    fn carry_over(&self, mut report: BlockReport) -> PastCertificateValidationReport {
        report
            .conclusion_mut()
            .set_status(self.current.indication(), self.current.sub_indication());
        PastCertificateValidationReport {
            report,
            control_time: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        AlgorithmExpiration, CryptographicConstraint, DigestAlgorithm, EncryptionAlgorithm,
        Indication, RevocationReason, RevocationToken, SignatureAlgorithm, SubIndication,
        Algorithm,
    };

    fn time(text: &str) -> DateTime {
        text.parse().expect("Failed to parse time")
    }

    fn anchor() -> CertificateToken {
        CertificateToken::new("C-ROOT", time("2010-01-01T00:00:00Z"), time("2040-01-01T00:00:00Z"))
            .with_trusted(true)
            .with_signature_valid(true)
    }

    fn leaf() -> CertificateToken {
        CertificateToken::new("C-LEAF", time("2020-01-01T00:00:00Z"), time("2022-01-01T00:00:00Z"))
            .with_signature_valid(true)
            .with_certificate_chain(["C-ROOT"])
    }

    fn policy() -> ValidationPolicy {
        ValidationPolicy::new(Some(Level::Fail))
    }

    fn expired() -> Conclusion {
        Conclusion::new(Indication::Indeterminate, Some(SubIndication::OutOfBoundsNoPoe))
    }

    #[test]
    fn expired_certificate_moves_control_time_to_not_after() {
        let data = DiagnosticData::new([], [leaf(), anchor()], [], []);
        let leaf = &data.certificates()[0];
        let policy = policy();
        let current = expired();
        let pcv = PastCertificateValidation::new(
            &data,
            leaf,
            time("2025-01-01T00:00:00Z"),
            Context::Signature,
            &policy,
            &current,
        )
        .execute()
        .expect("Failed to validate");

        assert!(pcv.conclusion().is_valid());
        assert_eq!(pcv.control_time(), Some(time("2022-01-01T00:00:00Z")));
        assert!(pcv.report().child("C-ROOT").is_some());
    }

    #[test]
    fn revoked_certificate_moves_control_time_to_revocation_date() {
        let revocation = RevocationToken::revoked(
            "R-LEAF",
            time("2021-07-01T00:00:00Z"),
            time("2021-06-01T00:00:00Z"),
            RevocationReason::KeyCompromise,
        );
        let data = DiagnosticData::new(
            [],
            [leaf().with_revocation("R-LEAF"), anchor()],
            [revocation],
            [],
        );
        let policy = policy();
        let current = Conclusion::new(Indication::Indeterminate, Some(SubIndication::RevokedNoPoe));
        let pcv = PastCertificateValidation::new(
            &data,
            &data.certificates()[0],
            time("2021-12-01T00:00:00Z"),
            Context::Signature,
            &policy,
            &current,
        )
        .execute()
        .expect("Failed to validate");

        assert_eq!(pcv.control_time(), Some(time("2021-06-01T00:00:00Z")));
    }

    #[test]
    fn algorithm_sunset_moves_control_time() {
        let sha1 = SignatureAlgorithm::new(EncryptionAlgorithm::Ecdsa, DigestAlgorithm::Sha1, 256);
        let data = DiagnosticData::new(
            [],
            [leaf().with_signature_algorithm(sha1), anchor()],
            [],
            [],
        );
        let policy = policy().with_cryptographic(
            CryptographicConstraint::new(
                None,
                None,
                Level::Fail,
                [EncryptionAlgorithm::Ecdsa],
                [DigestAlgorithm::Sha1],
            )
            .with_expiration(AlgorithmExpiration::new(
                Algorithm::Digest(DigestAlgorithm::Sha1),
                None,
                time("2020-06-01T00:00:00Z"),
            )),
        );
        let current = expired();
        let pcv = PastCertificateValidation::new(
            &data,
            &data.certificates()[0],
            time("2025-01-01T00:00:00Z"),
            Context::Signature,
            &policy,
            &current,
        )
        .execute()
        .expect("Failed to validate");

        assert_eq!(pcv.control_time(), Some(time("2020-06-01T00:00:00Z")));
    }

    #[test]
    fn failed_recheck_carries_over_current_status() {
        let data = DiagnosticData::new(
            [],
            [leaf().with_signature_valid(false), anchor()],
            [],
            [],
        );
        let policy = policy();
        let current = expired();
        let pcv = PastCertificateValidation::new(
            &data,
            &data.certificates()[0],
            time("2025-01-01T00:00:00Z"),
            Context::Signature,
            &policy,
            &current,
        )
        .execute()
        .expect("Failed to validate");

        assert_eq!(pcv.control_time(), None);
        assert_eq!(pcv.conclusion().indication(), Indication::Indeterminate);
        assert_eq!(
            pcv.conclusion().sub_indication(),
            Some(SubIndication::OutOfBoundsNoPoe)
        );
        assert_eq!(pcv.conclusion().errors().len(), 1);
    }

    #[test]
    fn revoked_without_date_has_no_control_time() {
        let revocation: RevocationToken = serde_json::from_str(
            r#"{"id": "R-LEAF", "production_date": "2021-07-01T00:00:00Z", "status": "REVOKED", "reason": "UNSPECIFIED"}"#,
        )
        .expect("Failed to parse revocation");
        assert_eq!(revocation.revocation_date(), None);

        let data = DiagnosticData::new(
            [],
            [leaf().with_revocation("R-LEAF"), anchor()],
            [revocation],
            [],
        );
        let policy = policy();
        let current = Conclusion::new(Indication::Indeterminate, Some(SubIndication::RevokedNoPoe));
        let pcv = PastCertificateValidation::new(
            &data,
            &data.certificates()[0],
            time("2021-12-01T00:00:00Z"),
            Context::Signature,
            &policy,
            &current,
        )
        .execute()
        .expect("Failed to validate");

        assert_eq!(pcv.control_time(), None);
        assert!(pcv.report().constraints().is_empty());
        assert_eq!(pcv.conclusion().sub_indication(), Some(SubIndication::RevokedNoPoe));
    }
}
