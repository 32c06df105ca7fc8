//! Tests for statement and block parsing.

use luma_parser::ast::{PrefixItem, Statement};
use luma_parser::parse_block;

fn statements(source: &str) -> Vec<Statement> {
    parse_block(source).expect("parse failure").block.statements
}

#[test]
fn parse_local_assignment() {
    let parsed = statements("local a, b = 1, 'x'");
    match &parsed[0] {
        Statement::LocalAssignment { names, values } => {
            assert_eq!(names.len(), 2);
            assert_eq!(names[0].text, "a");
            assert_eq!(names[1].text, "b");
            assert_eq!(values.as_ref().map(Vec::len), Some(2));
        }
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn parse_local_assignment_without_values() {
    let parsed = statements("local a, b");
    match &parsed[0] {
        Statement::LocalAssignment { names, values } => {
            assert_eq!(names.len(), 2);
            assert!(values.is_none());
        }
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn parse_assignment_with_member_target() {
    let parsed = statements("a, t.b = 1, 2");
    match &parsed[0] {
        Statement::Assignment { targets, values } => {
            assert_eq!(targets.len(), 2);
            assert_eq!(values.len(), 2);
            assert!(targets[0].items.is_empty());
            assert!(matches!(&targets[1].items[0], PrefixItem::Member(name) if name.text == "b"));
        }
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn parse_if_elseif_else() {
    let parsed = statements("if a then b = 1 elseif c then b = 2 else b = 3 end");
    match &parsed[0] {
        Statement::If { arms, else_body } => {
            assert_eq!(arms.len(), 2);
            assert!(else_body.is_some());
        }
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn parse_numerical_for() {
    let parsed = statements("for i = 1, 10, 2 do x = i end");
    match &parsed[0] {
        Statement::NumericalFor { variable, step, body, .. } => {
            assert_eq!(variable.text, "i");
            assert!(step.is_some());
            assert_eq!(body.statements.len(), 1);
        }
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn parse_generic_for() {
    let parsed = statements("for k, v in pairs(t) do end");
    match &parsed[0] {
        Statement::GenericFor {
            variables,
            expressions,
            ..
        } => {
            assert_eq!(variables.len(), 2);
            assert_eq!(expressions.len(), 1);
        }
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn parse_function_declaration_with_method_name() {
    let parsed = statements("function t.a:m(x) return x end");
    match &parsed[0] {
        Statement::FunctionDeclaration { name, body } => {
            assert_eq!(name.start.text, "t");
            assert_eq!(name.rest.len(), 1);
            assert_eq!(name.rest[0].text, "a");
            assert_eq!(name.method.as_ref().map(|m| m.text.as_str()), Some("m"));
            assert_eq!(body.parameters.len(), 1);
            assert!(body.block.return_statement.is_some());
        }
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn parse_local_function() {
    let parsed = statements("local function go(n, ...) end");
    match &parsed[0] {
        Statement::LocalFunction { name, body } => {
            assert_eq!(name.text, "go");
            assert_eq!(body.parameters.len(), 1);
            assert!(body.varargs);
        }
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn parse_while_and_repeat() {
    let parsed = statements("while x do end repeat until x");
    assert!(matches!(&parsed[0], Statement::While { .. }));
    assert!(matches!(&parsed[1], Statement::Repeat { .. }));
}

#[test]
fn parse_call_statement_argument_forms() {
    let parsed = statements("print('a') print 'b' print{1} t:m(2)");
    assert_eq!(parsed.len(), 4);
    for statement in &parsed {
        assert!(matches!(statement, Statement::FunctionCall(_)));
    }
}

#[test]
fn parse_label_goto_break() {
    let parsed = statements("::top:: goto top while x do break end");
    assert!(matches!(&parsed[0], Statement::Label(name) if name.text == "top"));
    assert!(matches!(&parsed[1], Statement::Goto(name) if name.text == "top"));
}

#[test]
fn parse_return_with_expressions() {
    let chunk = parse_block("return 1, 'two'").expect("parse failure");
    let returned = chunk.block.return_statement.expect("return statement");
    assert_eq!(returned.len(), 2);
}

#[test]
fn parse_empty_return() {
    let chunk = parse_block("do return end").expect("parse failure");
    match &chunk.block.statements[0] {
        Statement::Do(body) => assert_eq!(body.return_statement.as_ref().map(Vec::len), Some(0)),
        other => panic!("unexpected statement {other:?}"),
    }
}

#[test]
fn bare_expression_statement_is_rejected() {
    assert!(parse_block("x").is_err());
    assert!(parse_block("f().y").is_err());
}

#[test]
fn unterminated_block_is_rejected() {
    assert!(parse_block("do x = 1").is_err());
    assert!(parse_block("local = 5").is_err());
}
