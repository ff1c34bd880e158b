//! Built-in extractor for gettext-style call expressions.
//!
//! Recognises calls such as `gettext('Hello')`, `i18n.ngettext('cat', 'cats', n)`
//! or `this.$pgettext('menu', 'Open')` by callee name and reads the message
//! parts from fixed argument positions.

use std::collections::HashSet;

use swc_ecma_ast::{BinaryOp, CallExpr, Callee, Expr, Lit, MemberProp};

use super::extractor::{Emit, Extractor};
use crate::config::CalleeNames;
use crate::core::data::{MessageCandidate, SourceUnit};

/// Which call arguments hold which message parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentPositions {
    pub text: usize,
    pub text_plural: Option<usize>,
    pub context: Option<usize>,
}

impl ArgumentPositions {
    /// `gettext(text)`
    pub const GETTEXT: Self = Self {
        text: 0,
        text_plural: None,
        context: None,
    };
    /// `ngettext(text, plural, count)`
    pub const NGETTEXT: Self = Self {
        text: 0,
        text_plural: Some(1),
        context: None,
    };
    /// `pgettext(context, text)`
    pub const PGETTEXT: Self = Self {
        text: 1,
        text_plural: None,
        context: Some(0),
    };
    /// `npgettext(context, text, plural, count)`
    pub const NPGETTEXT: Self = Self {
        text: 1,
        text_plural: Some(2),
        context: Some(0),
    };
}

#[derive(Debug, Clone)]
pub struct CallExpressionExtractor {
    callee_names: HashSet<String>,
    positions: ArgumentPositions,
}

impl CallExpressionExtractor {
    pub fn new<I, S>(callee_names: I, positions: ArgumentPositions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            callee_names: callee_names.into_iter().map(Into::into).collect(),
            positions,
        }
    }

    fn matches(&self, call: &CallExpr) -> bool {
        let Callee::Expr(callee) = &call.callee else {
            return false;
        };
        callee_path(callee).is_some_and(|name| self.callee_names.contains(&name))
    }

    fn candidate(&self, call: &CallExpr) -> Option<MessageCandidate> {
        let text = string_argument(call, self.positions.text)?;
        if text.is_empty() {
            return None;
        }
        let mut candidate = MessageCandidate::new(text);
        if let Some(index) = self.positions.text_plural {
            candidate.text_plural = Some(string_argument(call, index)?);
        }
        if let Some(index) = self.positions.context {
            candidate.context = Some(string_argument(call, index)?);
        }
        Some(candidate)
    }
}

impl Extractor for CallExpressionExtractor {
    fn extract(&self, node: &Expr, _unit: &SourceUnit, emit: &mut Emit) {
        let Expr::Call(call) = node else {
            return;
        };
        if !self.matches(call) {
            return;
        }
        if let Some(candidate) = self.candidate(call) {
            emit.message(candidate);
        }
    }
}

/// The standard four gettext extractors for the configured callee names.
pub fn gettext_extractors(names: &CalleeNames) -> Vec<Box<dyn super::Extractor>> {
    [
        (&names.gettext, ArgumentPositions::GETTEXT),
        (&names.ngettext, ArgumentPositions::NGETTEXT),
        (&names.pgettext, ArgumentPositions::PGETTEXT),
        (&names.npgettext, ArgumentPositions::NPGETTEXT),
    ]
    .into_iter()
    .filter(|(callee_names, _)| !callee_names.is_empty())
    .map(|(callee_names, positions)| {
        Box::new(CallExpressionExtractor::new(callee_names.iter().cloned(), positions))
            as Box<dyn super::Extractor>
    })
    .collect()
}

/// Dotted name of a callee: `gettext`, `i18n.gettext`, `this.$gettext`.
///
/// Returns `None` for computed members and other non-name callees.
pub fn callee_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::This(_) => Some("this".to_string()),
        Expr::Paren(paren) => callee_path(&paren.expr),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            let object = callee_path(&member.obj)?;
            Some(format!("{}.{}", object, prop.sym))
        }
        _ => None,
    }
}

fn string_argument(call: &CallExpr, index: usize) -> Option<String> {
    let arg = call.args.get(index)?;
    if arg.spread.is_some() {
        return None;
    }
    string_value(&arg.expr)
}

/// Static string value of a literal, a substitution-free template literal,
/// or a `+` concatenation of those.
fn string_value(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
            let quasi = tpl.quasis.first()?;
            quasi.cooked.as_ref()?.as_str().map(str::to_string)
        }
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let left = string_value(&bin.left)?;
            let right = string_value(&bin.right)?;
            Some(left + right.as_str())
        }
        Expr::Paren(paren) => string_value(&paren.expr),
        _ => None,
    }
}
