// Copyright (c) 2023-2025 The MobileCoin Foundation

//! The basic building blocks of the validation of one signature.

use crate::checks::{
    CryptographicCheck, DigestValueMatchCheck, DigestValuePresentCheck, IssuerSerialMatchCheck,
    ReferenceDataFoundCheck, ReferenceDataIntactCheck, SignatureIntactCheck,
    SignaturePolicyIdentifiedCheck, SigningCertificateAttributePresentCheck,
    SigningCertificateRecognitionCheck, SigningTimePresentCheck,
};
use crate::{
    BlockReport, BlockType, CheckType, Conclusion, Context, DiagnosticData, Level, Result,
    RuleChainBuilder, SignatureToken, SubContext, Token, ValidationPolicy,
    X509CertificateValidation,
};
use der::DateTime;
use tracing::debug;

/// The reports of each building block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BasicBuildingBlocksReport {
    isc: BlockReport,
    vci: BlockReport,
    cv: BlockReport,
    xcv: Option<BlockReport>,
    sav: BlockReport,
    conclusion: Conclusion,
}

impl BasicBuildingBlocksReport {
    /// Identification of the signing certificate
    pub fn isc(&self) -> &BlockReport {
        &self.isc
    }

    /// Validation context initialization
    pub fn vci(&self) -> &BlockReport {
        &self.vci
    }

    /// Cryptographic verification
    pub fn cv(&self) -> &BlockReport {
        &self.cv
    }

    /// X509 certificate validation, `None` when the signing certificate
    /// could not be resolved.
    pub fn xcv(&self) -> Option<&BlockReport> {
        self.xcv.as_ref()
    }

    /// Signature acceptance validation
    pub fn sav(&self) -> &BlockReport {
        &self.sav
    }

    /// The first conclusion that is not valid, in block order, otherwise
    /// valid.
    pub fn conclusion(&self) -> &Conclusion {
        &self.conclusion
    }
}

/// Runs the basic building blocks on a signature.
///
/// Every block runs, even after an earlier one failed.
#[derive(Clone, Copy, Debug)]
pub struct BasicBuildingBlocks<'a> {
    data: &'a DiagnosticData,
    signature: &'a SignatureToken,
    current_time: DateTime,
    policy: &'a ValidationPolicy,
    context: Context,
}

impl<'a> BasicBuildingBlocks<'a> {
    /// Create a new instance.
    ///
    /// # Arguments
    /// * `data` - The diagnostic data the signing certificate is resolved
    ///   from
    /// * `signature` - The signature to validate
    /// * `current_time` - The validation time
    /// * `policy` - The policy providing levels and constraints
    /// * `context` - What the signature is
    pub fn new(
        data: &'a DiagnosticData,
        signature: &'a SignatureToken,
        current_time: DateTime,
        policy: &'a ValidationPolicy,
        context: Context,
    ) -> Self {
        Self {
            data,
            signature,
            current_time,
            policy,
            context,
        }
    }

    fn level(&self, check: CheckType, sub_context: Option<SubContext>) -> Result<Level> {
        self.policy.level(check, self.context, sub_context)
    }

    /// Run the building blocks.
    ///
    /// # Errors
    /// * [`Error::MissingConstraint`](crate::Error::MissingConstraint) when
    ///   the policy has no constraint for a check.
    /// * Any error of [`X509CertificateValidation::execute`].
    pub fn execute(&self) -> Result<BasicBuildingBlocksReport> {
        let signature = self.signature;
        let id = Some(signature.id());
        let signing = Some(SubContext::SigningCert);
        let certificate = signature
            .signing_certificate()
            .and_then(|reference| self.data.certificate(reference.certificate_id()).ok());

        let mut isc = RuleChainBuilder::new(BlockType::Isc, id);
        isc.add(
            SigningCertificateRecognitionCheck::new(signature, certificate),
            self.level(CheckType::SigningCertificateRecognition, signing)?,
        )
        .add(
            SigningCertificateAttributePresentCheck::new(signature),
            self.level(CheckType::SigningCertificateAttributePresent, signing)?,
        )
        .add(
            DigestValuePresentCheck::new(signature),
            self.level(CheckType::DigestValuePresent, signing)?,
        )
        .add(
            DigestValueMatchCheck::new(signature),
            self.level(CheckType::DigestValueMatch, signing)?,
        )
        .add(
            IssuerSerialMatchCheck::new(signature),
            self.level(CheckType::IssuerSerialMatch, signing)?,
        );
        let isc = isc.build()?.execute();

        let mut vci = RuleChainBuilder::new(BlockType::Vci, id);
        vci.add(
            SignaturePolicyIdentifiedCheck::new(signature),
            self.level(CheckType::SignaturePolicyIdentified, None)?,
        );
        let vci = vci.build()?.execute();

        let mut cv = RuleChainBuilder::new(BlockType::Cv, id);
        cv.add(
            ReferenceDataFoundCheck::new(signature),
            self.level(CheckType::ReferenceDataFound, None)?,
        )
        .add(
            ReferenceDataIntactCheck::new(signature),
            self.level(CheckType::ReferenceDataIntact, None)?,
        )
        .add(
            SignatureIntactCheck::new(signature),
            self.level(CheckType::SignatureIntact, None)?,
        );
        let cv = cv.build()?.execute();

        let xcv = certificate
            .map(|certificate| {
                X509CertificateValidation::new(
                    self.data,
                    certificate,
                    self.current_time,
                    self.context,
                    self.policy,
                )
                .execute()
            })
            .transpose()?;

        let cryptographic = self.policy.cryptographic(self.context, None)?;
        let mut sav = RuleChainBuilder::new(BlockType::Sav, id);
        sav.add(
            SigningTimePresentCheck::new(signature),
            self.level(CheckType::SigningTimePresent, None)?,
        )
        .add(
            CryptographicCheck::new(Token::Signature(signature), cryptographic, self.current_time),
            cryptographic.level(),
        );
        let sav = sav.build()?.execute();

        let conclusion = [Some(&isc), Some(&vci), Some(&cv), xcv.as_ref(), Some(&sav)]
            .into_iter()
            .flatten()
            .map(BlockReport::conclusion)
            .find(|conclusion| !conclusion.is_valid())
            .cloned()
            .unwrap_or_default();

        debug!(
            signature = signature.id(),
            isc = %isc.conclusion(),
            vci = %vci.conclusion(),
            cv = %cv.conclusion(),
            sav = %sav.conclusion(),
            conclusion = %conclusion,
            "Basic building blocks"
        );
        Ok(BasicBuildingBlocksReport {
            isc,
            vci,
            cv,
            xcv,
            sav,
            conclusion,
        })
    }
}
