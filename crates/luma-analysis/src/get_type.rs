//! Best-effort expression typing.
//!
//! Total functions: every path yields a concrete `LuaType`, falling back
//! to `Unknown` where the source carries no type information.

use crate::scope::{ScopeArena, ScopeId};
use crate::types::{FunctionType, LuaType};
use luma_parser::ast::{
    Constant, Expression, Field, FunctionBody, Operand, Operation, PrefixExpression, PrefixItem,
    PrefixStart, TableConstructor,
};

/// Type of an expression evaluated in `scope`.
#[must_use]
pub fn expression_type(arena: &ScopeArena, scope: ScopeId, expression: &Expression) -> LuaType {
    let base = operand_type(arena, scope, &expression.operand);
    let Some(first) = &expression.binary else {
        return base;
    };

    // Classify the whole flat operator chain. Comparisons dominate, then
    // and/or (typed as the left operand), then concatenation, then
    // arithmetic/bitwise.
    let mut comparison = false;
    let mut logic = false;
    let mut concat = false;
    let mut arithmetic = false;
    let mut current = Some(first.as_ref());
    while let Some(binary) = current {
        match binary.operation {
            Operation::Lt
            | Operation::Le
            | Operation::Gt
            | Operation::Ge
            | Operation::Eq
            | Operation::NotEq => comparison = true,
            Operation::And | Operation::Or => logic = true,
            Operation::Concat => concat = true,
            _ => arithmetic = true,
        }
        current = binary.expression.binary.as_deref();
    }
    if comparison {
        LuaType::Boolean
    } else if logic {
        base
    } else if concat {
        LuaType::String
    } else if arithmetic {
        LuaType::Number
    } else {
        base
    }
}

fn operand_type(arena: &ScopeArena, scope: ScopeId, operand: &Operand) -> LuaType {
    match operand {
        Operand::Constant(Constant::Nil) => LuaType::Nil,
        Operand::Constant(Constant::True) | Operand::Constant(Constant::False) => LuaType::Boolean,
        Operand::Constant(Constant::Dots) => LuaType::Unknown,
        Operand::Numeral(_) => LuaType::Number,
        Operand::LiteralString(_) => LuaType::String,
        Operand::Unary(unary) => match unary.operation {
            Operation::Not => LuaType::Boolean,
            _ => LuaType::Number,
        },
        Operand::Table(constructor) => table_type(arena, scope, constructor),
        Operand::Function(body) => LuaType::Function(Box::new(function_type(arena, scope, body))),
        Operand::Prefix(prefix) => prefix_type(arena, scope, prefix),
    }
}

/// Shape of a table constructor. Only `name = value` fields contribute
/// members; expression keys and positional values do not.
fn table_type(arena: &ScopeArena, scope: ScopeId, constructor: &TableConstructor) -> LuaType {
    let mut table = crate::types::TableType::default();
    for field in &constructor.fields {
        if let Field::ByName { name, value } = field {
            table
                .members
                .insert(name.text.clone(), expression_type(arena, scope, value));
        }
    }
    LuaType::Table(table)
}

/// Signature of a function literal or declaration body: one `Unknown`
/// parameter per declared name, results taken from the body's `return`
/// expressions typed against the declaring scope.
#[must_use]
pub fn function_type(arena: &ScopeArena, scope: ScopeId, body: &FunctionBody) -> FunctionType {
    FunctionType {
        parameters: body.parameters.iter().map(|_| LuaType::Unknown).collect(),
        results: body
            .block
            .return_statement
            .as_ref()
            .map(|expressions| {
                expressions
                    .iter()
                    .map(|expression| expression_type(arena, scope, expression))
                    .collect()
            })
            .unwrap_or_default(),
        is_method: false,
        script_input: None,
    }
}

/// Type of a member access on `base`: `Unknown` unless `base` is a table
/// with that member.
#[must_use]
pub fn member_type(base: &LuaType, name: &str) -> LuaType {
    match base {
        LuaType::Table(table) => table.member(name),
        _ => LuaType::Unknown,
    }
}

/// Primary (first) result of calling `base`: `Unknown` unless `base` is a
/// function with at least one declared result.
#[must_use]
pub fn call_result(base: &LuaType) -> LuaType {
    match base {
        LuaType::Function(function) => function.results.first().cloned().unwrap_or_default(),
        _ => LuaType::Unknown,
    }
}

/// Resolve a whole prefix-expression chain.
#[must_use]
pub fn prefix_type(arena: &ScopeArena, scope: ScopeId, prefix: &PrefixExpression) -> LuaType {
    let mut ty = match &prefix.start {
        PrefixStart::Name(name) => arena.variable_type(scope, &name.text),
        PrefixStart::Bracketed(inner) => expression_type(arena, scope, inner),
    };
    for item in &prefix.items {
        ty = suffix_type(&ty, item);
    }
    ty
}

/// Apply one chain segment to a base type. An index with a literal-string
/// key behaves like member access; any other computed index loses the
/// shape.
#[must_use]
pub fn suffix_type(base: &LuaType, item: &PrefixItem) -> LuaType {
    match item {
        PrefixItem::Member(name) => member_type(base, &name.text),
        PrefixItem::Index(index) => match &index.operand {
            Operand::LiteralString(key) if index.binary.is_none() => member_type(base, key),
            _ => LuaType::Unknown,
        },
        PrefixItem::Call(_) => call_result(base),
        PrefixItem::MethodCall(name, _) => call_result(&member_type(base, &name.text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script_inputs::ScriptInputs;
    use std::sync::Arc;

    fn type_of(source: &str) -> LuaType {
        let chunk = luma_parser::parse_block(&format!("probe = {source}")).expect("parse");
        let arena = ScopeArena::new(Arc::new(ScriptInputs::new()));
        let root = arena.root();
        match &chunk.block.statements[0] {
            luma_parser::ast::Statement::Assignment { values, .. } => {
                expression_type(&arena, root, &values[0])
            }
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn literal_types() {
        assert_eq!(type_of("nil"), LuaType::Nil);
        assert_eq!(type_of("true"), LuaType::Boolean);
        assert_eq!(type_of("42"), LuaType::Number);
        assert_eq!(type_of("'text'"), LuaType::String);
    }

    #[test]
    fn operator_chains() {
        assert_eq!(type_of("1 + 2"), LuaType::Number);
        assert_eq!(type_of("'a' .. 42"), LuaType::String);
        assert_eq!(type_of("1 < 2"), LuaType::Boolean);
        assert_eq!(type_of("not x"), LuaType::Boolean);
        assert_eq!(type_of("#t"), LuaType::Number);
    }

    #[test]
    fn table_constructor_members() {
        let ty = type_of("{ a = 1, 'positional', [k] = true }");
        let table = ty.as_table().expect("table type");
        assert_eq!(table.member("a"), LuaType::Number);
        assert_eq!(table.member("missing"), LuaType::Unknown);
        assert_eq!(table.members.len(), 1);
    }

    #[test]
    fn function_literal_signature() {
        let ty = type_of("function (a, b) return 1, 'two' end");
        let function = ty.as_function().expect("function type");
        assert_eq!(function.parameters.len(), 2);
        assert_eq!(
            function.results.as_slice(),
            &[LuaType::Number, LuaType::String]
        );
        assert!(!function.is_method);
        assert!(function.script_input.is_none());
    }
}
