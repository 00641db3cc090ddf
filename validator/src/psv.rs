// Copyright (c) 2023-2025 The MobileCoin Foundation

//! Past signature validation.
//!
//! Tries to upgrade an `INDETERMINATE` conclusion reached at the current
//! time, using proofs of existence of the signed token.

use crate::checks::{
    BestSignatureTimeNotBeforeCertificateIssuanceCheck,
    BestSignatureTimeWithinCertificateValidityCheck, CryptographicPoeCheck,
    CurrentTimeStatusCheck, ImplicatedAlgorithm, PastCertificateValidationCheck, PoeExistsCheck,
};
use crate::{
    BlockReport, BlockType, CertificateToken, Conclusion, Context, DiagnosticData, Level,
    PastCertificateValidation, ProofOfExistence, Result, RuleChainBuilder, SignatureAlgorithm,
    SubContext, SubIndication, Token, ValidationPolicy,
};
use alloc::vec;
use alloc::vec::Vec;
use der::DateTime;
use tracing::debug;

/// Validates a token at a time in the past.
///
/// The past certificate validation of the signing certificate finds a
/// control time. When the token is proven to exist at or before it, the
/// status of the current time validation decides what else must hold:
/// * `REVOKED_NO_POE` and `REVOKED_CA_NO_POE` need nothing more,
/// * `OUT_OF_BOUNDS_NO_POE` needs the best signature time inside the
///   validity window of the signing certificate,
/// * `CRYPTO_CONSTRAINTS_FAILURE_NO_POE` needs every token using a rejected
///   algorithm to be proven to exist before that algorithm's sunset. An
///   algorithm rejected for any other reason is never upgraded.
///
/// Anything else reproduces the current time status.
#[derive(Clone, Copy, Debug)]
pub struct PastSignatureValidation<'a> {
    data: &'a DiagnosticData,
    token: Token<'a>,
    certificate: &'a CertificateToken,
    current_time: DateTime,
    context: Context,
    policy: &'a ValidationPolicy,
    poe: &'a ProofOfExistence,
    current: &'a Conclusion,
}

impl<'a> PastSignatureValidation<'a> {
    /// Create a new instance.
    ///
    /// # Arguments
    /// * `data` - The diagnostic data the certificate chain is resolved from
    /// * `token` - The signature or timestamp being validated
    /// * `certificate` - The signing certificate of `token`
    /// * `current_time` - The validation time
    /// * `context` - What the token is
    /// * `policy` - The policy providing the algorithm sunset dates
    /// * `poe` - The proofs of existence
    /// * `current` - The conclusion of the validation at the current time
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        data: &'a DiagnosticData,
        token: Token<'a>,
        certificate: &'a CertificateToken,
        current_time: DateTime,
        context: Context,
        policy: &'a ValidationPolicy,
        poe: &'a ProofOfExistence,
        current: &'a Conclusion,
    ) -> Self {
        Self {
            data,
            token,
            certificate,
            current_time,
            context,
            policy,
            poe,
            current,
        }
    }

    /// Run the validation.
    ///
    /// The past certificate validation report is attached as a nested
    /// block.
    ///
    /// # Errors
    /// * [`Error::UnknownCertificate`](crate::Error::UnknownCertificate) and
    ///   [`Error::UnknownRevocation`](crate::Error::UnknownRevocation) when
    ///   the chain references tokens missing from the diagnostic data.
    pub fn execute(&self) -> Result<BlockReport> {
        let pcv = PastCertificateValidation::new(
            self.data,
            self.certificate,
            self.current_time,
            self.context,
            self.policy,
            self.current,
        )
        .execute()?;

        let id = self.token.id();
        let poe = self.poe;
        let current = self.current;
        let proven = pcv
            .control_time()
            .filter(|&control_time| poe.exists_at_or_before(id, control_time));

        let mut builder = RuleChainBuilder::new(BlockType::Psv, Some(id));
        builder.add(PastCertificateValidationCheck::new(pcv.conclusion()), Level::Fail);
        match (proven, current.sub_indication()) {
            (
                Some(control_time),
                Some(SubIndication::RevokedNoPoe | SubIndication::RevokedCaNoPoe),
            ) => {
                debug!(token = id, "Proof of existence before revocation");
                builder.add(PoeExistsCheck::new(poe, id, control_time, current), Level::Fail);
            }
            (Some(control_time), Some(SubIndication::OutOfBoundsNoPoe)) => {
                debug!(token = id, "Best signature time within certificate validity");
                if let Some(best_signature_time) = poe.earliest_at_or_before(id, control_time) {
                    builder.add(
                        BestSignatureTimeNotBeforeCertificateIssuanceCheck::new(
                            best_signature_time,
                            self.certificate,
                        ),
                        Level::Fail,
                    );
                    builder.add(
                        BestSignatureTimeWithinCertificateValidityCheck::new(
                            best_signature_time,
                            self.certificate,
                        ),
                        Level::Fail,
                    );
                }
            }
            (Some(_), Some(SubIndication::CryptoConstraintsFailureNoPoe)) => {
                debug!(token = id, "Proof of existence before algorithm sunsets");
                builder.add(
                    CryptographicPoeCheck::new(poe, self.implicated_algorithms()?),
                    Level::Fail,
                );
            }
            _ => {
                debug!(token = id, current = %current, "Current time status");
                builder.add(CurrentTimeStatusCheck::new(current), Level::Fail);
            }
        }
        let mut report = builder.build()?.execute();
        report.push_child(pcv.into_report());

        debug!(token = id, conclusion = %report.conclusion(), "Past signature validation");
        Ok(report)
    }

    /// The tokens whose algorithm fails the cryptographic constraints at the
    /// current time: the token itself, the signing certificate, its issuers
    /// and their revocation data.
    ///
    /// Constraints are resolved as the current time validation resolves
    /// them, and checks below `WARN` could not have caused the failure.
    fn implicated_algorithms(&self) -> Result<Vec<ImplicatedAlgorithm<'a>>> {
        let mut implicated = Vec::new();
        let mut push = |token_id: &'a str,
                        algorithm: Option<&SignatureAlgorithm>,
                        context: Context,
                        sub_context: Option<SubContext>|
         -> Result<()> {
            let constraint = self.policy.cryptographic(context, sub_context)?;
            if constraint.level() < Level::Warn {
                return Ok(());
            }
            let sunset = match algorithm {
                Some(algorithm) if constraint.is_valid_at(algorithm, self.current_time) => {
                    return Ok(());
                }
                Some(algorithm) if constraint.is_acceptable(algorithm) => {
                    constraint.expiration_of(algorithm)
                }
                _ => None,
            };
            debug!(token = token_id, ?sunset, "Implicated algorithm");
            implicated.push(ImplicatedAlgorithm { token_id, sunset });
            Ok(())
        };

        push(
            self.token.id(),
            self.token.signature_algorithm(),
            self.context,
            None,
        )?;

        let mut path = vec![self.certificate];
        path.extend(self.data.chain_of(self.certificate)?);
        for (index, &certificate) in path.iter().enumerate() {
            let sub_context = if index == 0 {
                SubContext::SigningCert
            } else {
                SubContext::CaCertificate
            };
            push(
                certificate.id(),
                certificate.signature_algorithm(),
                self.context,
                Some(sub_context),
            )?;

            if let Some(revocation) = self.data.revocation_of(certificate)? {
                push(
                    revocation.id(),
                    revocation.signature_algorithm(),
                    Context::Revocation,
                    Some(sub_context),
                )?;
            }
        }
        Ok(implicated)
    }
}
