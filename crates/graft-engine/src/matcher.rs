//! Factory call pattern matching.

use swc_core::ecma::ast::{CallExpr, Callee, Expr, MemberProp};

/// Object part of the factory callee pattern.
pub const FACTORY_OBJECT: &str = "React";

/// Property part of the factory callee pattern.
pub const FACTORY_METHOD: &str = "createElement";

/// Whether a call expression is a rewritable factory call.
///
/// Matches `React.createElement(type, props, ...)` by literal callee names
/// with at least two arguments. The check is purely structural: a local
/// binding that shadows `React` also matches, and computed access like
/// `React["createElement"]` never does.
pub fn is_factory_call(call: &CallExpr) -> bool {
    if call.args.len() < 2 {
        return false;
    }
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    let Expr::Member(member) = &**callee else {
        return false;
    };
    let Expr::Ident(object) = &*member.obj else {
        return false;
    };
    let MemberProp::Ident(property) = &member.prop else {
        return false;
    };
    object.sym.as_ref() == FACTORY_OBJECT && property.sym.as_ref() == FACTORY_METHOD
}
