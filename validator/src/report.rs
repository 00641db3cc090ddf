// Copyright (c) 2023-2025 The MobileCoin Foundation

//! The tree of validation results.
//!
//! Displaying a [`BlockReport`] gives an indented tree of every block and of
//! the constraints it executed:
//!
//! ```text
//! - [x] X509 certificate validation (C-LEAF): VALID
//!   - [x] Can the certificate chain be built till a trust anchor?
//!   - [!] Has the certificate key usage been verified?
//!   - [x] X509 certificate validation (C-CA): VALID
//!     - [x] Is the certificate validity range covering the validation time?
//! ```

use crate::{Conclusion, Level, MessageTag};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};

/// The indentation of each level of the tree.
pub(crate) const MESSAGE_INDENT: usize = 2;

/// The validation blocks.
#[derive(displaydoc::Display, Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BlockType {
    /// Identification of the signing certificate
    Isc,
    /// Validation context initialization
    Vci,
    /// Cryptographic verification
    Cv,
    /// X509 certificate validation
    Xcv,
    /// Signature acceptance validation
    Sav,
    /// Past certificate validation
    Pcv,
    /// Past signature validation
    Psv,
    /// Basic building blocks
    Bbb,
}

/// Whether a constraint held.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ConstraintStatus {
    /// The check passed
    Ok,
    /// The check failed
    NotOk,
    /// The check was not evaluated because its level is `IGNORE`
    Ignored,
}

/// One executed constraint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstraintResult {
    tag: MessageTag,
    level: Level,
    status: ConstraintStatus,
}

impl ConstraintResult {
    /// Create a new instance.
    pub fn new(tag: MessageTag, level: Level, status: ConstraintStatus) -> Self {
        Self { tag, level, status }
    }

    /// The check that was executed
    pub fn tag(&self) -> MessageTag {
        self.tag
    }

    /// The level the check was executed at
    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether the check held
    pub fn status(&self) -> ConstraintStatus {
        self.status
    }

    fn marker(&self) -> &'static str {
        match (self.status, self.level) {
            (ConstraintStatus::Ok, _) => "[x]",
            (ConstraintStatus::Ignored, _) | (_, Level::Ignore) => "[-]",
            (ConstraintStatus::NotOk, Level::Inform) => "[i]",
            (ConstraintStatus::NotOk, Level::Warn) => "[!]",
            (ConstraintStatus::NotOk, Level::Fail) => "[ ]",
        }
    }
}

/// The result of one validation block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockReport {
    block_type: BlockType,
    token_id: Option<String>,
    conclusion: Conclusion,
    constraints: Vec<ConstraintResult>,
    children: Vec<BlockReport>,
}

impl BlockReport {
    /// Create a new instance.
    pub fn new(
        block_type: BlockType,
        token_id: Option<String>,
        conclusion: Conclusion,
        constraints: Vec<ConstraintResult>,
        children: Vec<BlockReport>,
    ) -> Self {
        Self {
            block_type,
            token_id,
            conclusion,
            constraints,
            children,
        }
    }

    /// The kind of block
    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// The id of the token the block validated
    pub fn token_id(&self) -> Option<&str> {
        self.token_id.as_deref()
    }

    /// The verdict of the block
    pub fn conclusion(&self) -> &Conclusion {
        &self.conclusion
    }

    /// The executed constraints, in execution order
    pub fn constraints(&self) -> &[ConstraintResult] {
        &self.constraints
    }

    /// The nested blocks, one per scope that started executing
    pub fn children(&self) -> &[BlockReport] {
        &self.children
    }

    /// The nested block for token `id`, if it executed.
    pub fn child(&self, id: &str) -> Option<&BlockReport> {
        self.children
            .iter()
            .find(|child| child.token_id() == Some(id))
    }

    /// Returns `true` if a constraint with `tag` executed in this block or
    /// any nested block.
    pub fn executed(&self, tag: MessageTag) -> bool {
        self.constraints.iter().any(|constraint| constraint.tag == tag)
            || self.children.iter().any(|child| child.executed(tag))
    }

    pub(crate) fn conclusion_mut(&mut self) -> &mut Conclusion {
        &mut self.conclusion
    }

    pub(crate) fn push_child(&mut self, child: BlockReport) {
        self.children.push(child);
    }

    pub(crate) fn fmt_padded(&self, f: &mut Formatter<'_>, pad: usize) -> core::fmt::Result {
        let status = if self.conclusion.is_valid() {
            "[x]"
        } else {
            "[ ]"
        };
        write!(f, "{:pad$}- {status} {}", "", self.block_type)?;
        if let Some(id) = &self.token_id {
            write!(f, " ({id})")?;
        }
        write!(f, ": {}", self.conclusion)?;

        let pad = pad + MESSAGE_INDENT;
        for constraint in &self.constraints {
            writeln!(f)?;
            write!(f, "{:pad$}- {} {}", "", constraint.marker(), constraint.tag)?;
        }
        for child in &self.children {
            writeln!(f)?;
            child.fmt_padded(f, pad)?;
        }
        Ok(())
    }
}

impl Display for BlockReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt_padded(f, 0)
    }
}
