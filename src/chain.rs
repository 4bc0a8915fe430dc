//! Text syntax for assembling a chain of named handlers.
//!
//! Chain format:
//! ```text
//! # wrap, sign, then wrap again
//! transaction
//! | digest
//! | request
//! ```
//!
//! - Stages are separated by `|` or newlines
//! - Names are case-insensitive; surrounding whitespace is ignored
//! - Blank lines and lines starting with `#` are skipped
//!
//! Supported stages:
//! - `transaction` (or `tx`) - wrap in `<transaction>...</transaction>`
//! - `digest` - append `<digest>...</digest>`
//! - `request` (or `req`) - wrap in `<request>...</request>`

use tracing::debug;

use crate::Request;
use crate::digest::DigestAlgorithm;
use crate::error::ChainError;
use crate::handler::{BoxedHandler, Handler};
use crate::handlers::{CreateDigest, wrap_in_request_tag, wrap_in_transaction_tag};
use crate::trace::ChainTrace;

/// The chain equivalent to the common request pipeline.
pub const DEFAULT_CHAIN: &str = "transaction | digest | request";

/// A handler named in chain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Wrap in the transaction tag
    Transaction,
    /// Append a digest
    Digest,
    /// Wrap in the request tag
    Request,
}

impl HandlerKind {
    /// Stage name as written in chain text.
    pub fn name(&self) -> &'static str {
        match self {
            HandlerKind::Transaction => "transaction",
            HandlerKind::Digest => "digest",
            HandlerKind::Request => "request",
        }
    }

    fn lookup(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "transaction" | "tx" => Some(HandlerKind::Transaction),
            "digest" => Some(HandlerKind::Digest),
            "request" | "req" => Some(HandlerKind::Request),
            _ => None,
        }
    }

    /// Build the handler for this stage.
    pub fn to_handler(self, digest: DigestAlgorithm) -> BoxedHandler {
        match self {
            HandlerKind::Transaction => wrap_in_transaction_tag.boxed(),
            HandlerKind::Digest => CreateDigest::new(digest).boxed(),
            HandlerKind::Request => wrap_in_request_tag.boxed(),
        }
    }
}

/// Parse chain text into stage kinds.
pub fn parse_chain(text: &str) -> Result<Vec<HandlerKind>, ChainError> {
    let mut kinds = Vec::new();

    for line in text.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        for word in line.split('|').map(str::trim).filter(|w| !w.is_empty()) {
            let kind = HandlerKind::lookup(word).ok_or_else(|| ChainError::UnknownHandler {
                name: word.to_string(),
                position: kinds.len(),
            })?;
            kinds.push(kind);
        }
    }

    if kinds.is_empty() {
        return Err(ChainError::EmptyChain);
    }
    Ok(kinds)
}

struct Stage {
    name: String,
    handler: BoxedHandler,
}

/// An ordered list of named handlers.
///
/// Running a `Chain` gives the same result as folding its stages with
/// [`Handler::then`], but the stage boundaries stay visible for tracing.
#[derive(Default)]
pub struct Chain {
    stages: Vec<Stage>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from parsed stage kinds.
    pub fn build(kinds: &[HandlerKind], digest: DigestAlgorithm) -> Result<Self, ChainError> {
        if kinds.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(Self::assemble(kinds, digest))
    }

    /// Parse and build a chain from text.
    pub fn from_text(text: &str, digest: DigestAlgorithm) -> Result<Self, ChainError> {
        Self::build(&parse_chain(text)?, digest)
    }

    /// The chain for [`DEFAULT_CHAIN`].
    pub fn default_chain(digest: DigestAlgorithm) -> Self {
        let kinds = [
            HandlerKind::Transaction,
            HandlerKind::Digest,
            HandlerKind::Request,
        ];
        Self::assemble(&kinds, digest)
    }

    fn assemble(kinds: &[HandlerKind], digest: DigestAlgorithm) -> Self {
        kinds.iter().fold(Chain::new(), |chain, kind| {
            chain.push(kind.name(), kind.to_handler(digest))
        })
    }

    /// Append a named stage.
    pub fn push(
        mut self,
        name: impl Into<String>,
        handler: impl Handler + Send + Sync + 'static,
    ) -> Self {
        self.stages.push(Stage {
            name: name.into(),
            handler: handler.boxed(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name.clone()).collect()
    }

    /// Run the chain, recording the request at every pipe point.
    pub fn handle_traced(&self, request: &Request) -> (Request, ChainTrace) {
        let mut pipe_points = Vec::with_capacity(self.stages.len() + 1);
        pipe_points.push(request.clone());

        let mut current = request.clone();
        for stage in &self.stages {
            current = stage.handler.handle(&current);
            pipe_points.push(current.clone());
        }

        let trace = ChainTrace {
            stage_names: self.stage_names(),
            pipe_points,
        };
        (current, trace)
    }
}

impl Handler for Chain {
    fn handle(&self, request: &Request) -> Request {
        let mut current = request.clone();
        for (idx, stage) in self.stages.iter().enumerate() {
            current = stage.handler.handle(&current);
            debug!(
                stage = idx,
                name = %stage.name,
                len = current.data().len(),
                "stage complete"
            );
        }
        current
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("stages", &self.stage_names())
            .finish()
    }
}
