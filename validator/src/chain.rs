// Copyright (c) 2023-2025 The MobileCoin Foundation

//! The rule chain engine.
//!
//! A [`RuleChain`] is an ordered, immutable sequence of [`Check`]s, each with
//! the [`Level`] the policy gave it. Executing the chain evaluates the checks
//! in construction order, threading one [`Conclusion`] through them:
//!
//! - `IGNORE` checks are not evaluated.
//! - A failed `INFORM` check records an information message.
//! - A failed `WARN` check records a warning and sets the indication, unless
//!   an earlier `WARN` failure already did. Execution continues.
//! - A failed `FAIL` check records an error, overwrites the indication and
//!   halts the chain.

use crate::{
    BlockReport, BlockType, Conclusion, ConstraintResult, ConstraintStatus, Error, Indication,
    Level, Message, MessageTag, Result, SubIndication,
};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use tracing::{debug, trace};

/// A single predicate over some evidence along with the status it maps to
/// when it does not hold.
pub trait Check: Debug {
    /// The question this check answers
    fn tag(&self) -> MessageTag;

    /// Evaluate the predicate.
    fn is_valid(&self) -> bool;

    /// The indication when the predicate does not hold
    fn indication(&self) -> Indication;

    /// The sub-indication when the predicate does not hold
    fn sub_indication(&self) -> Option<SubIndication>;

    /// The message recorded when the predicate does not hold.
    fn failure_message(&self) -> Message {
        Message::new(self.tag())
    }

    /// A note recorded when the predicate holds, for checks at `INFORM` or
    /// above.
    fn success_info(&self) -> Option<Message> {
        None
    }
}

/// A check along with how to run it.
#[derive(Debug)]
struct ChainItem<'a> {
    check: Box<dyn Check + 'a>,
    level: Level,
    scope: Option<String>,
}

/// Builder for a [`RuleChain`].
#[derive(Debug)]
pub struct RuleChainBuilder<'a> {
    block_type: BlockType,
    token_id: Option<String>,
    items: Vec<ChainItem<'a>>,
}

impl<'a> RuleChainBuilder<'a> {
    /// Start a chain for `block_type` about token `token_id`.
    pub fn new(block_type: BlockType, token_id: Option<&str>) -> Self {
        Self {
            block_type,
            token_id: token_id.map(Into::into),
            items: Vec::new(),
        }
    }

    /// Append `check` at `level`.
    pub fn add(&mut self, check: impl Check + 'a, level: Level) -> &mut Self {
        self.items.push(ChainItem {
            check: Box::new(check),
            level,
            scope: None,
        });
        self
    }

    /// Append `check` at `level`, reporting it in the nested block for token
    /// `scope`.
    pub fn add_scoped(&mut self, check: impl Check + 'a, level: Level, scope: &str) -> &mut Self {
        self.items.push(ChainItem {
            check: Box::new(check),
            level,
            scope: Some(scope.into()),
        });
        self
    }

    /// The number of checks added so far
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no checks have been added
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finish the chain.
    ///
    /// # Errors
    /// [`Error::EmptyChain`] if no checks were added.
    pub fn build(self) -> Result<RuleChain<'a>> {
        if self.items.is_empty() {
            return Err(Error::EmptyChain(self.block_type));
        }
        Ok(RuleChain {
            block_type: self.block_type,
            token_id: self.token_id,
            items: self.items,
        })
    }
}

/// An ordered, immutable, sequence of checks.
#[derive(Debug)]
pub struct RuleChain<'a> {
    block_type: BlockType,
    token_id: Option<String>,
    items: Vec<ChainItem<'a>>,
}

/// The running verdict of the chain or of one scope.
#[derive(Debug, Default)]
struct Accumulator {
    conclusion: Conclusion,
    constraints: Vec<ConstraintResult>,
    warned: bool,
}

impl Accumulator {
    fn record_failure(&mut self, check: &dyn Check, level: Level) {
        match level {
            Level::Ignore => {}
            Level::Inform => self.conclusion.add_info(check.failure_message()),
            Level::Warn => {
                self.conclusion.add_warning(check.failure_message());
                if !self.warned {
                    self.warned = true;
                    self.conclusion
                        .set_status(check.indication(), check.sub_indication());
                }
            }
            Level::Fail => {
                self.conclusion.add_error(check.failure_message());
                self.conclusion
                    .set_status(check.indication(), check.sub_indication());
            }
        }
    }
}

fn scope_accumulator<'s>(
    scopes: &'s mut Vec<(String, Accumulator)>,
    id: &str,
) -> &'s mut Accumulator {
    let position = match scopes.iter().position(|(scope, _)| scope == id) {
        Some(position) => position,
        None => {
            scopes.push((id.into(), Accumulator::default()));
            scopes.len() - 1
        }
    };
    &mut scopes[position].1
}

impl<'a> RuleChain<'a> {
    /// The block this chain validates
    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// Evaluate the checks in order and report the outcome.
    ///
    /// Checks added with [`RuleChainBuilder::add_scoped()`] are reported in
    /// a nested block per scope. Their failures also count for the chain as
    /// a whole, so a `FAIL` inside a scope halts the entire chain.
    pub fn execute(&self) -> BlockReport {
        let mut root = Accumulator::default();
        let mut scopes: Vec<(String, Accumulator)> = Vec::new();

        for item in &self.items {
            let check = item.check.as_ref();
            let status = if item.level == Level::Ignore {
                ConstraintStatus::Ignored
            } else if check.is_valid() {
                ConstraintStatus::Ok
            } else {
                ConstraintStatus::NotOk
            };
            trace!(check = ?check.tag(), level = ?item.level, ?status, scope = ?item.scope, "Executed check");

            let mut scope = item
                .scope
                .as_deref()
                .map(|id| scope_accumulator(&mut scopes, id));
            let result = ConstraintResult::new(check.tag(), item.level, status);
            match scope.as_deref_mut() {
                Some(accumulator) => accumulator.constraints.push(result),
                None => root.constraints.push(result),
            }

            match status {
                ConstraintStatus::Ok if item.level >= Level::Inform => {
                    if let Some(info) = check.success_info() {
                        if let Some(accumulator) = scope.as_deref_mut() {
                            accumulator.conclusion.add_info(info.clone());
                        }
                        root.conclusion.add_info(info);
                    }
                }
                ConstraintStatus::NotOk => {
                    if let Some(accumulator) = scope.as_deref_mut() {
                        accumulator.record_failure(check, item.level);
                    }
                    root.record_failure(check, item.level);
                    if item.level == Level::Fail {
                        debug!(block = ?self.block_type, check = ?check.tag(), "Chain halted");
                        break;
                    }
                }
                _ => {}
            }
        }

        debug!(block = ?self.block_type, token = ?self.token_id, conclusion = %root.conclusion, "Executed rule chain");
        let children = scopes
            .into_iter()
            .map(|(id, accumulator)| {
                BlockReport::new(
                    self.block_type,
                    Some(id),
                    accumulator.conclusion,
                    accumulator.constraints,
                    Vec::new(),
                )
            })
            .collect();
        BlockReport::new(
            self.block_type,
            self.token_id.clone(),
            root.conclusion,
            root.constraints,
            children,
        )
    }
}
