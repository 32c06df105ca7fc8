//! The analysis walker.
//!
//! One depth-first pass over a block's statements that mutates a scope in
//! place. Its only observable effect is the shape of the scope tree and
//! the table shapes reachable through it; it never reads results back and
//! never fails. Expressions are visited solely to recurse into nested
//! function bodies and table constructors, each function body receiving a
//! fresh child scope.

use crate::get_type::{expression_type, function_type};
use crate::scope::{ScopeArena, ScopeId};
use crate::script_inputs::ScriptInputs;
use crate::types::{LuaType, TableType};
use luma_parser::Chunk;
use luma_parser::ast::{
    Block, Expression, Field, FunctionBody, FunctionName, Name, Operand, PrefixExpression,
    PrefixItem, PrefixStart, Statement,
};
use std::sync::Arc;
use tracing::debug;

/// Analyze a parsed chunk into a fresh scope tree.
#[must_use]
pub fn analyze_chunk(chunk: &Chunk, script_inputs: Arc<ScriptInputs>) -> (ScopeArena, ScopeId) {
    let mut arena = ScopeArena::new(script_inputs);
    let root = arena.root();
    analyze_block(&mut arena, root, &chunk.block);
    debug!(scopes = arena.scopes().len(), "chunk analyzed");
    (arena, root)
}

/// Analyze `block` against an existing scope, mutating it in place.
/// Re-entrant across independent blocks; one writer per arena.
pub fn analyze_block(arena: &mut ScopeArena, scope: ScopeId, block: &Block) {
    Analyzer { arena }.block(scope, block);
}

struct Analyzer<'a> {
    arena: &'a mut ScopeArena,
}

impl Analyzer<'_> {
    fn block(&mut self, scope: ScopeId, block: &Block) {
        for statement in &block.statements {
            self.statement(scope, statement);
        }
        if let Some(expressions) = &block.return_statement {
            for expression in expressions {
                self.expression(scope, expression);
            }
        }
    }

    fn statement(&mut self, scope: ScopeId, statement: &Statement) {
        match statement {
            Statement::Empty | Statement::Break | Statement::Goto(_) => {}
            Statement::Label(name) => self.arena.add_label(scope, &name.text),
            Statement::Assignment { targets, values } => self.assignment(scope, targets, values),
            Statement::LocalAssignment { names, values } => {
                self.local_assignment(scope, names, values.as_deref());
            }
            Statement::FunctionCall(prefix) => self.prefix(scope, prefix),
            Statement::Do(body) => {
                let child = self.arena.new_child(scope);
                self.block(child, body);
            }
            Statement::While { condition: _, body } => {
                let child = self.arena.new_child(scope);
                self.block(child, body);
            }
            Statement::Repeat { body, condition: _ } => {
                let child = self.arena.new_child(scope);
                self.block(child, body);
            }
            Statement::If { arms, else_body } => {
                for arm in arms {
                    let child = self.arena.new_child(scope);
                    self.block(child, &arm.body);
                }
                if let Some(body) = else_body {
                    let child = self.arena.new_child(scope);
                    self.block(child, body);
                }
            }
            Statement::NumericalFor { variable, body, .. } => {
                let child = self.arena.new_child(scope);
                self.arena.add_variable(child, &variable.text, LuaType::Number);
                self.block(child, body);
            }
            Statement::GenericFor {
                variables,
                expressions,
                body,
            } => self.generic_for(scope, variables, expressions, body),
            Statement::FunctionDeclaration { name, body } => {
                self.function_declaration(scope, name, body);
            }
            Statement::LocalFunction { name, body } => {
                let function = function_type(self.arena, scope, body);
                self.arena
                    .add_variable(scope, &name.text, LuaType::Function(Box::new(function)));
                self.function_body(scope, body, Some(&name.text));
            }
        }
    }

    /// `a, b = e1, e2`: pair targets with expressions positionally; a
    /// target past the expression count gets `Unknown`.
    fn assignment(&mut self, scope: ScopeId, targets: &[PrefixExpression], values: &[Expression]) {
        for (i, target) in targets.iter().enumerate() {
            let ty = values
                .get(i)
                .map(|value| expression_type(self.arena, scope, value))
                .unwrap_or_default();
            self.assign_target(scope, target, ty);
        }
        for value in values {
            self.expression(scope, value);
        }
    }

    fn assign_target(&mut self, scope: ScopeId, target: &PrefixExpression, ty: LuaType) {
        // Bracketed-expression bases are not assignable paths
        let Some(start) = target.start_name() else {
            return;
        };
        if target.items.is_empty() {
            self.arena.update_variable(scope, &start.text, ty);
            return;
        }
        let mut table = self.arena.modify_table(scope, &start.text);
        let last = target.items.len() - 1;
        for (i, item) in target.items.iter().enumerate() {
            let PrefixItem::Member(member) = item else {
                // Computed index or call result in the path: the update is
                // silently dropped
                return;
            };
            let slot = table.members.entry(member.text.clone()).or_default();
            if i == last {
                *slot = ty;
                return;
            }
            if !matches!(slot, LuaType::Table(_)) {
                *slot = LuaType::Table(TableType::default());
            }
            table = match slot {
                LuaType::Table(next) => next,
                _ => unreachable!("slot was just coerced to a table"),
            };
        }
    }

    /// `local a, b = e1, e2`: always binds in the current scope,
    /// shadowing any outer binding of the same name.
    fn local_assignment(&mut self, scope: ScopeId, names: &[Name], values: Option<&[Expression]>) {
        let Some(values) = values else {
            for name in names {
                self.arena.add_variable(scope, &name.text, LuaType::Unknown);
            }
            return;
        };
        for (i, name) in names.iter().enumerate() {
            let ty = values
                .get(i)
                .map(|value| expression_type(self.arena, scope, value))
                .unwrap_or_default();
            self.arena.add_variable(scope, &name.text, ty);
        }
        for value in values {
            self.expression(scope, value);
        }
    }

    /// `for a, b in e do ... end`: only the first iterator expression is
    /// inspected; when it is a function, its result types go to the loop
    /// variables positionally.
    fn generic_for(
        &mut self,
        scope: ScopeId,
        variables: &[Name],
        expressions: &[Expression],
        body: &Block,
    ) {
        let child = self.arena.new_child(scope);
        let iterator = expressions
            .first()
            .map(|expression| expression_type(self.arena, scope, expression));
        match iterator {
            Some(LuaType::Function(function)) => {
                for (i, variable) in variables.iter().enumerate() {
                    let ty = function.results.get(i).cloned().unwrap_or_default();
                    self.arena.add_variable(child, &variable.text, ty);
                }
            }
            _ => {
                for variable in variables {
                    self.arena
                        .add_variable(child, &variable.text, LuaType::Unknown);
                }
            }
        }
        self.block(child, body);
    }

    /// `function name(...)`, `function t.a.b(...)`, `function t:m(...)`.
    fn function_declaration(&mut self, scope: ScopeId, name: &FunctionName, body: &FunctionBody) {
        let mut function = function_type(self.arena, scope, body);

        if name.rest.is_empty() && name.method.is_none() {
            // Bare name: bound before the body so the body can resolve
            // recursive self-calls and match the script-input registry
            self.arena
                .add_variable(scope, &name.start.text, LuaType::Function(Box::new(function)));
            self.function_body(scope, body, Some(&name.start.text));
            return;
        }

        let (member, path): (&Name, &[Name]) = match &name.method {
            Some(method) => {
                function.is_method = true;
                (method, name.rest.as_slice())
            }
            None => match name.rest.split_last() {
                Some((last, path)) => (last, path),
                None => return,
            },
        };
        let mut table = self.arena.modify_table(scope, &name.start.text);
        for segment in path {
            let slot = table.members.entry(segment.text.clone()).or_default();
            if !matches!(slot, LuaType::Table(_)) {
                *slot = LuaType::Table(TableType::default());
            }
            table = match slot {
                LuaType::Table(next) => next,
                _ => unreachable!("slot was just coerced to a table"),
            };
        }
        table
            .members
            .insert(member.text.clone(), LuaType::Function(Box::new(function)));

        // Methods and table members are not registered entry points
        self.function_body(scope, body, None);
    }

    /// Shared body analysis: fresh child scope, parameters typed from the
    /// script-input registry when `name` matches, `Unknown` otherwise.
    fn function_body(&mut self, scope: ScopeId, body: &FunctionBody, name: Option<&str>) {
        let child = self.arena.new_child(scope);
        let input = name.and_then(|name| {
            self.arena
                .script_inputs()
                .script_input(name)
                .cloned()
        });
        if let Some(function) = input {
            debug!(name, "parameters typed from script-input signature");
            for (i, parameter) in body.parameters.iter().enumerate() {
                let ty = function.parameters.get(i).cloned().unwrap_or_default();
                self.arena.add_variable(child, &parameter.text, ty);
            }
        } else {
            for parameter in &body.parameters {
                self.arena
                    .add_variable(child, &parameter.text, LuaType::Unknown);
            }
            if let Some(name) = name {
                // Visible to recursive calls from inside the body
                let ty = self.arena.variable_type(scope, name);
                self.arena.add_variable(child, name, ty);
            }
        }
        self.block(child, &body.block);
    }

    fn expression(&mut self, scope: ScopeId, expression: &Expression) {
        self.operand(scope, &expression.operand);
        if let Some(binary) = &expression.binary {
            self.expression(scope, &binary.expression);
        }
    }

    fn operand(&mut self, scope: ScopeId, operand: &Operand) {
        match operand {
            Operand::Constant(_) | Operand::Numeral(_) | Operand::LiteralString(_) => {}
            Operand::Unary(unary) => self.expression(scope, &unary.expression),
            Operand::Table(constructor) => {
                for field in &constructor.fields {
                    match field {
                        Field::ByExpression { key, value } => {
                            self.expression(scope, key);
                            self.expression(scope, value);
                        }
                        Field::ByName { value, .. } => self.expression(scope, value),
                        Field::Positional(value) => self.expression(scope, value),
                    }
                }
            }
            Operand::Function(body) => self.function_body(scope, body, None),
            Operand::Prefix(prefix) => self.prefix(scope, prefix),
        }
    }

    fn prefix(&mut self, scope: ScopeId, prefix: &PrefixExpression) {
        if let PrefixStart::Bracketed(inner) = &prefix.start {
            self.expression(scope, inner);
        }
        for item in &prefix.items {
            match item {
                PrefixItem::Member(_) => {}
                PrefixItem::Index(index) => self.expression(scope, index),
                PrefixItem::Call(arguments) | PrefixItem::MethodCall(_, arguments) => {
                    for argument in arguments {
                        self.expression(scope, argument);
                    }
                }
            }
        }
    }
}
