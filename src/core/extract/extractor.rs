//! Extractor plugin interface.

use swc_ecma_ast::Expr;

use crate::core::data::{MessageCandidate, SourceUnit};

/// Collects the candidates an extractor emits for the current node.
#[derive(Debug, Default)]
pub struct Emit {
    candidates: Vec<MessageCandidate>,
}

impl Emit {
    /// Report a translation call recognised at the current node.
    pub fn message(&mut self, candidate: MessageCandidate) {
        self.candidates.push(candidate);
    }

    pub(crate) fn take(&mut self) -> Vec<MessageCandidate> {
        std::mem::take(&mut self.candidates)
    }
}

/// Recognises a translation-call shape at a node.
///
/// Extractors are invoked for every expression of every parsed unit, in
/// registration order, and call [`Emit::message`] zero or more times.
/// Closures with the matching signature implement this trait.
pub trait Extractor: Send + Sync {
    fn extract(&self, node: &Expr, unit: &SourceUnit, emit: &mut Emit);
}

impl<F> Extractor for F
where
    F: Fn(&Expr, &SourceUnit, &mut Emit) + Send + Sync,
{
    fn extract(&self, node: &Expr, unit: &SourceUnit, emit: &mut Emit) {
        self(node, unit, emit)
    }
}
