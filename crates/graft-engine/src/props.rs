//! Children collection and props merging.

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
    ArrayLit, Expr, ExprOrSpread, IdentName, KeyValueProp, Lit, ObjectLit, Prop, PropName,
    PropOrSpread, SpreadElement,
};

use crate::traits::RewriteError;

/// Property key the children array is stored under.
pub const CHILDREN_KEY: &str = "children";

/// Drain a call's trailing arguments (index 2 onward) as the children list.
///
/// Argument order is preserved exactly; children render in argument order.
/// Spread arguments stay spread elements of the eventual array.
pub fn collect_children(args: &mut Vec<ExprOrSpread>) -> Vec<ExprOrSpread> {
    if args.len() > 2 {
        args.split_off(2)
    } else {
        Vec::new()
    }
}

/// Merge an optional props argument with a children list into the rewritten
/// props object.
///
/// A missing or null-like props argument yields a fresh `{ children: [...] }`.
/// An inline object literal keeps its properties and gets `children` appended
/// last. Any other expression is spread into a new object ahead of
/// `children`, so an existing `children` key in the spread source is
/// overridden by the explicit one.
pub fn merge(
    props_arg: Option<ExprOrSpread>,
    children: Vec<ExprOrSpread>,
) -> Result<ObjectLit, RewriteError> {
    let children_prop = children_entry(children);

    let Some(arg) = props_arg else {
        return Ok(object_of(vec![children_prop]));
    };
    if arg.spread.is_some() {
        return Err(RewriteError::UnsupportedPropsShape(
            "spread argument in props position".to_string(),
        ));
    }

    Ok(match *arg.expr {
        Expr::Lit(Lit::Null(_)) => object_of(vec![children_prop]),
        Expr::Ident(ref ident) if ident.sym.as_ref() == "undefined" => {
            object_of(vec![children_prop])
        }
        Expr::Object(mut object) => {
            object.props.push(children_prop);
            object
        }
        other => object_of(vec![
            PropOrSpread::Spread(SpreadElement {
                dot3_token: DUMMY_SP,
                expr: Box::new(other),
            }),
            children_prop,
        ]),
    })
}

fn object_of(props: Vec<PropOrSpread>) -> ObjectLit {
    ObjectLit {
        span: DUMMY_SP,
        props,
    }
}

fn children_entry(children: Vec<ExprOrSpread>) -> PropOrSpread {
    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
        key: PropName::Ident(IdentName::new(CHILDREN_KEY.into(), DUMMY_SP)),
        value: Box::new(Expr::Array(ArrayLit {
            span: DUMMY_SP,
            elems: children.into_iter().map(Some).collect(),
        })),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_core::ecma::ast::{ModuleItem, Stmt};

    fn call_args(source: &str) -> Vec<ExprOrSpread> {
        let parsed = crate::pipeline::parse_script(source).unwrap();
        let ModuleItem::Stmt(Stmt::Expr(stmt)) = &parsed.module.body[0] else {
            panic!("expected expression statement");
        };
        let Expr::Call(call) = &*stmt.expr else {
            panic!("expected call expression");
        };
        call.args.clone()
    }

    fn is_children_entry(prop: &PropOrSpread) -> bool {
        let PropOrSpread::Prop(prop) = prop else {
            return false;
        };
        let Prop::KeyValue(kv) = &**prop else {
            return false;
        };
        matches!(&kv.key, PropName::Ident(name) if name.sym.as_ref() == CHILDREN_KEY)
    }

    fn children_array(props: &ObjectLit) -> &ArrayLit {
        let Some(PropOrSpread::Prop(prop)) = props.props.last() else {
            panic!("expected a property");
        };
        let Prop::KeyValue(kv) = &**prop else {
            panic!("expected a key-value property");
        };
        let Expr::Array(array) = &*kv.value else {
            panic!("expected an array value");
        };
        array
    }

    #[test]
    fn collects_trailing_arguments_in_order() {
        let mut args = call_args("React.createElement('div', null, a, b, c);");
        let children = collect_children(&mut args);

        assert_eq!(args.len(), 2);
        assert_eq!(children.len(), 3);
        let names: Vec<&str> = children
            .iter()
            .map(|child| {
                let Expr::Ident(ident) = &*child.expr else {
                    panic!("expected identifier child");
                };
                ident.sym.as_ref()
            })
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn collects_nothing_from_two_argument_calls() {
        let mut args = call_args("React.createElement('div', null);");
        assert!(collect_children(&mut args).is_empty());
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn fresh_object_for_null_props() {
        let mut args = call_args("React.createElement('div', null, a);");
        let children = collect_children(&mut args);
        let merged = merge(args.pop(), children).unwrap();

        assert_eq!(merged.props.len(), 1);
        assert!(is_children_entry(&merged.props[0]));
        assert_eq!(children_array(&merged).elems.len(), 1);
    }

    #[test]
    fn fresh_object_for_undefined_props() {
        let mut args = call_args("React.createElement('div', undefined, a);");
        let children = collect_children(&mut args);
        let merged = merge(args.pop(), children).unwrap();

        assert_eq!(merged.props.len(), 1);
        assert!(is_children_entry(&merged.props[0]));
    }

    #[test]
    fn empty_children_array_for_childless_calls() {
        let mut args = call_args("React.createElement('div', null);");
        let children = collect_children(&mut args);
        let merged = merge(args.pop(), children).unwrap();

        assert!(children_array(&merged).elems.is_empty());
    }

    #[test]
    fn appends_children_to_object_literal() {
        let mut args = call_args("React.createElement('div', { id: 'x', role: 'tab' }, a);");
        let children = collect_children(&mut args);
        let merged = merge(args.pop(), children).unwrap();

        assert_eq!(merged.props.len(), 3);
        assert!(!is_children_entry(&merged.props[0]));
        assert!(!is_children_entry(&merged.props[1]));
        assert!(is_children_entry(&merged.props[2]));
    }

    #[test]
    fn spreads_other_props_shapes() {
        let mut args = call_args("React.createElement('div', props, a);");
        let children = collect_children(&mut args);
        let merged = merge(args.pop(), children).unwrap();

        assert_eq!(merged.props.len(), 2);
        assert!(matches!(&merged.props[0], PropOrSpread::Spread(_)));
        assert!(is_children_entry(&merged.props[1]));
    }

    #[test]
    fn rejects_spread_argument_in_props_position() {
        let mut args = call_args("React.createElement('div', ...rest);");
        let children = collect_children(&mut args);
        let result = merge(args.pop(), children);

        assert!(matches!(
            result,
            Err(RewriteError::UnsupportedPropsShape(_))
        ));
    }

    #[test]
    fn keeps_spread_children_as_spread_elements() {
        let mut args = call_args("React.createElement('div', null, ...items);");
        let children = collect_children(&mut args);
        let merged = merge(args.pop(), children).unwrap();

        let array = children_array(&merged);
        assert_eq!(array.elems.len(), 1);
        let Some(Some(element)) = array.elems.first() else {
            panic!("expected one array element");
        };
        assert!(element.spread.is_some());
    }
}
