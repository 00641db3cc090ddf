// Copyright (c) 2023-2025 The MobileCoin Foundation

//! X.509 certificate validation of a signing certificate and its chain at
//! the current time.

use crate::checks::{
    CertificateExpirationCheck, CertificateNotOnHoldCheck, CertificateNotRevokedCheck,
    CertificateSignatureCheck, CryptographicCheck, IntermediateCertificateNotRevokedCheck,
    IssuedToLegalPersonCheck, KeyUsageCheck, ProspectiveCertificateChainCheck, QualifiedCheck,
    RevocationDataAvailableCheck, RevocationDataTrustedCheck, RevocationFreshnessCheck,
    SupportedBySscdCheck, TslStatusAndValidityCheck, TslStatusCheck, TslValidityCheck,
};
use crate::{
    BlockReport, BlockType, CertificateToken, CheckType, Context, DiagnosticData, Level, Result,
    RuleChainBuilder, SubContext, Token, ValidationPolicy,
};
use der::DateTime;
use tracing::debug;

/// Validates a certificate and its chain up to a trust anchor at the
/// current time.
///
/// The checks run, in order:
/// 1. the chain ends at a trust anchor, always at `FAIL`,
/// 2. the certificate's validity window, key usage, signature and
///    cryptographic strength,
/// 3. unless the certificate is itself a trust anchor, its revocation data
///    and trusted list status,
/// 4. for each issuer, in a nested block, its validity window, key usage,
///    signature, revocation and cryptographic strength,
/// 5. for [`Context::Signature`] only, the qualification of the certificate.
#[derive(Clone, Copy, Debug)]
pub struct X509CertificateValidation<'a> {
    data: &'a DiagnosticData,
    certificate: &'a CertificateToken,
    current_time: DateTime,
    context: Context,
    policy: &'a ValidationPolicy,
}

impl<'a> X509CertificateValidation<'a> {
    /// Create a new instance.
    ///
    /// # Arguments
    /// * `data` - The diagnostic data the certificate chain is resolved from
    /// * `certificate` - The certificate to validate
    /// * `current_time` - The time to validate at
    /// * `context` - What the certificate is used for
    /// * `policy` - The policy providing levels and constraints
    pub fn new(
        data: &'a DiagnosticData,
        certificate: &'a CertificateToken,
        current_time: DateTime,
        context: Context,
        policy: &'a ValidationPolicy,
    ) -> Self {
        Self {
            data,
            certificate,
            current_time,
            context,
            policy,
        }
    }

    fn level(&self, check: CheckType, sub_context: SubContext) -> Result<Level> {
        self.policy.level(check, self.context, Some(sub_context))
    }

    /// Run the validation.
    ///
    /// # Errors
    /// * [`Error::UnknownCertificate`](crate::Error::UnknownCertificate) and
    ///   [`Error::UnknownRevocation`](crate::Error::UnknownRevocation) when
    ///   the chain references tokens missing from the diagnostic data.
    /// * [`Error::MissingConstraint`](crate::Error::MissingConstraint) when
    ///   the policy has no constraint for a check.
    pub fn execute(&self) -> Result<BlockReport> {
        let data = self.data;
        let policy = self.policy;
        let certificate = self.certificate;
        let time = self.current_time;
        let signing = SubContext::SigningCert;
        let ca = SubContext::CaCertificate;

        let chain = data.chain_of(certificate)?;
        let revocation = data.revocation_of(certificate)?;

        let mut builder = RuleChainBuilder::new(BlockType::Xcv, Some(certificate.id()));
        builder.add(
            ProspectiveCertificateChainCheck::new(certificate, chain.clone()),
            Level::Fail,
        );

        builder.add(
            CertificateExpirationCheck::new(certificate, time),
            self.level(CheckType::CertificateExpiration, signing)?,
        );
        let key_usage = policy.key_usage(self.context, Some(signing))?;
        builder.add(
            KeyUsageCheck::new(certificate, key_usage.accepted()),
            key_usage.level(),
        );
        builder.add(
            CertificateSignatureCheck::new(certificate),
            self.level(CheckType::CertificateSignature, signing)?,
        );
        let cryptographic = policy.cryptographic(self.context, Some(signing))?;
        builder.add(
            CryptographicCheck::new(Token::SigningCertificate(certificate), cryptographic, time),
            cryptographic.level(),
        );

        if !certificate.is_trusted() {
            builder.add(
                RevocationDataAvailableCheck::new(revocation),
                self.level(CheckType::RevocationDataAvailable, signing)?,
            );
            builder.add(
                RevocationDataTrustedCheck::new(revocation),
                self.level(CheckType::RevocationDataTrusted, signing)?,
            );
            let freshness = policy.revocation_freshness(self.context)?;
            builder.add(
                RevocationFreshnessCheck::new(revocation, time, freshness.max_age()),
                freshness.level(),
            );
            builder.add(
                CertificateNotRevokedCheck::new(revocation, time),
                self.level(CheckType::CertificateNotRevoked, signing)?,
            );
            builder.add(
                CertificateNotOnHoldCheck::new(revocation),
                self.level(CheckType::CertificateNotOnHold, signing)?,
            );
            builder.add(
                TslValidityCheck::new(certificate, time),
                self.level(CheckType::TslValidity, signing)?,
            );
            builder.add(
                TslStatusCheck::new(certificate),
                self.level(CheckType::TslStatus, signing)?,
            );
            builder.add(
                TslStatusAndValidityCheck::new(certificate, time),
                self.level(CheckType::TslStatusAndValidity, signing)?,
            );
            if let Some(revocation) = revocation {
                let cryptographic = policy.cryptographic(Context::Revocation, Some(signing))?;
                builder.add(
                    CryptographicCheck::new(Token::Revocation(revocation), cryptographic, time),
                    cryptographic.level(),
                );
            }
        }

        for &issuer in &chain {
            let scope = issuer.id();
            let issuer_revocation = data.revocation_of(issuer)?;
            builder.add_scoped(
                CertificateExpirationCheck::new(issuer, time),
                self.level(CheckType::CertificateExpiration, ca)?,
                scope,
            );
            let key_usage = policy.key_usage(self.context, Some(ca))?;
            builder.add_scoped(
                KeyUsageCheck::new(issuer, key_usage.accepted()),
                key_usage.level(),
                scope,
            );
            builder.add_scoped(
                CertificateSignatureCheck::new(issuer),
                self.level(CheckType::CertificateSignature, ca)?,
                scope,
            );
            builder.add_scoped(
                IntermediateCertificateNotRevokedCheck::new(issuer_revocation, time),
                self.level(CheckType::IntermediateCertificateNotRevoked, ca)?,
                scope,
            );
            let cryptographic = policy.cryptographic(self.context, Some(ca))?;
            builder.add_scoped(
                CryptographicCheck::new(Token::CaCertificate(issuer), cryptographic, time),
                cryptographic.level(),
                scope,
            );
            if let Some(revocation) = issuer_revocation {
                let cryptographic = policy.cryptographic(Context::Revocation, Some(ca))?;
                builder.add_scoped(
                    CryptographicCheck::new(Token::Revocation(revocation), cryptographic, time),
                    cryptographic.level(),
                    scope,
                );
            }
        }

        if self.context == Context::Signature {
            builder.add(
                QualifiedCheck::new(certificate),
                self.level(CheckType::Qualified, signing)?,
            );
            builder.add(
                SupportedBySscdCheck::new(certificate),
                self.level(CheckType::SupportedBySscd, signing)?,
            );
            builder.add(
                IssuedToLegalPersonCheck::new(certificate),
                self.level(CheckType::IssuedToLegalPerson, signing)?,
            );
        }

        let report = builder.build()?.execute();
        debug!(
            certificate = certificate.id(),
            context = ?self.context,
            conclusion = %report.conclusion(),
            "X509 certificate validation"
        );
        Ok(report)
    }
}
