//! In-place call rewriting visitor.

use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{CallExpr, Callee, Expr, ExprOrSpread, Ident};
use swc_core::ecma::visit::{noop_visit_mut_type, VisitMut, VisitMutWith};

use crate::matcher;
use crate::props;
use crate::traits::RewriteError;

/// Literal name of the target factory function.
pub const FACTORY_NAME: &str = "h";

/// Accumulator for one rewrite run.
///
/// Created per pipeline invocation and discarded with it; concurrent
/// document transforms never share one.
#[derive(Debug, Default, Clone, Copy)]
pub struct RewriteOutcome {
    /// At least one matching call was transformed
    pub did_rewrite: bool,

    /// The runtime import must be injected before serialization
    pub needs_import: bool,
}

/// Visitor that rewrites factory calls as it walks a script.
#[derive(Default)]
pub struct FactoryCallRewriter {
    /// Flags consumed by the pipeline after the walk
    pub outcome: RewriteOutcome,
    error: Option<RewriteError>,
}

impl FactoryCallRewriter {
    /// First error hit during the walk. Rewriting stops at the first error;
    /// the caller discards the partially mutated script.
    pub fn take_error(&mut self) -> Option<RewriteError> {
        self.error.take()
    }

    fn rewrite_call(&mut self, call: &mut CallExpr) {
        let children = props::collect_children(&mut call.args);
        let props_arg = call.args.pop();
        match props::merge(props_arg, children) {
            Ok(new_props) => {
                call.callee = Callee::Expr(Box::new(Expr::Ident(Ident::new(
                    FACTORY_NAME.into(),
                    DUMMY_SP,
                    SyntaxContext::empty(),
                ))));
                call.args.push(ExprOrSpread {
                    spread: None,
                    expr: Box::new(Expr::Object(new_props)),
                });
                self.outcome.did_rewrite = true;
                self.outcome.needs_import = true;
            }
            Err(error) => self.error = Some(error),
        }
    }
}

impl VisitMut for FactoryCallRewriter {
    noop_visit_mut_type!();

    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        // Children first, so nested factory calls are already rewritten when
        // the parent folds them into its props object.
        call.visit_mut_children_with(self);

        if self.error.is_some() {
            return;
        }
        if matcher::is_factory_call(call) {
            self.rewrite_call(call);
        }
    }
}
