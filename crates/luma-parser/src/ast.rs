//! Lua AST types.
//!
//! Boxed tagged unions: every recursive grammar production (an expression
//! containing a sub-expression, a statement containing a block) holds its
//! recursive branch through an owned `Box`, giving the self-referential
//! grammar a finite representation.
//!
//! Chain-positioned nodes (`Name`, `PrefixExpression`) carry byte spans so
//! editor tooling can map them back to source; the spans are opaque to the
//! analysis crates.

use luma_common::Span;
use serde::Serialize;

/// Binary and unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Operation {
    Add,    // +
    Sub,    // -
    Mul,    // *
    Div,    // /
    IDiv,   // //
    Mod,    // %
    Pow,    // ^
    Unm,    // unary -
    BAnd,   // &
    BOr,    // |
    BXor,   // binary ~
    BNot,   // unary ~
    Shl,    // <<
    Shr,    // >>
    Concat, // ..
    Len,    // #
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
    Eq,     // ==
    NotEq,  // ~=
    And,    // and
    Or,     // or
    Not,    // not
}

/// Keyword expression constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Constant {
    Nil,
    True,
    False,
    /// `...` varargs
    Dots,
}

/// An identifier with its source span.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Name {
    pub text: String,
    pub span: Span,
}

impl Name {
    #[must_use]
    pub fn new(text: impl Into<String>, span: Span) -> Name {
        Name {
            text: text.into(),
            span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Expression {
    pub operand: Operand,
    pub binary: Option<Box<BinaryOperation>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinaryOperation {
    pub operation: Operation,
    pub expression: Expression,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnaryOperation {
    pub operation: Operation,
    pub expression: Expression,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Operand {
    Constant(Constant),
    Numeral(f64),
    LiteralString(String),
    Unary(Box<UnaryOperation>),
    Table(TableConstructor),
    Function(Box<FunctionBody>),
    Prefix(Box<PrefixExpression>),
}

/// Table constructor fields, in source order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Field {
    /// `[key] = value`
    ByExpression { key: Expression, value: Expression },
    /// `name = value`
    ByName { name: Name, value: Expression },
    /// positional `value`
    Positional(Expression),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableConstructor {
    pub fields: Vec<Field>,
}

/// First segment of a prefix-expression chain.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PrefixStart {
    Name(Name),
    /// `( expression )`
    Bracketed(Box<Expression>),
}

/// One suffix segment of a prefix-expression chain.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PrefixItem {
    /// `.name`
    Member(Name),
    /// `[ expression ]`
    Index(Box<Expression>),
    /// `( arguments )`, `"string"` or `{ table }` call forms
    Call(Vec<Expression>),
    /// `:name ( arguments )`
    MethodCall(Name, Vec<Expression>),
}

/// A chain of name/member/index/call segments forming one addressable
/// value reference, e.g. `a.b:c()[d]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrefixExpression {
    pub start: PrefixStart,
    pub items: Vec<PrefixItem>,
    pub span: Span,
}

impl PrefixExpression {
    /// The plain name this chain starts with, if any.
    #[must_use]
    pub fn start_name(&self) -> Option<&Name> {
        match &self.start {
            PrefixStart::Name(name) => Some(name),
            PrefixStart::Bracketed(_) => None,
        }
    }

    /// True when the chain ends in a call segment (a valid call statement).
    #[must_use]
    pub fn ends_in_call(&self) -> bool {
        matches!(
            self.items.last(),
            Some(PrefixItem::Call(_)) | Some(PrefixItem::MethodCall(_, _))
        )
    }
}

/// Result of the restricted variable/chain parser entry point.
///
/// Unlike [`PrefixExpression`] this may end with a bare `:name` method
/// reference without arguments, which the completion UI resolves to the
/// method member itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChainExpression {
    pub start: Name,
    pub items: Vec<PrefixItem>,
    pub method: Option<Name>,
    pub span: Span,
}

/// Name of a `function` declaration statement: `start{.rest}[:method]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionName {
    pub start: Name,
    pub rest: Vec<Name>,
    pub method: Option<Name>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionBody {
    pub parameters: Vec<Name>,
    pub varargs: bool,
    pub block: Block,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IfArm {
    pub condition: Expression,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Statement {
    Empty,
    Assignment {
        targets: Vec<PrefixExpression>,
        values: Vec<Expression>,
    },
    LocalAssignment {
        names: Vec<Name>,
        values: Option<Vec<Expression>>,
    },
    FunctionCall(PrefixExpression),
    Label(Name),
    Goto(Name),
    Break,
    Do(Block),
    While {
        condition: Expression,
        body: Block,
    },
    Repeat {
        body: Block,
        condition: Expression,
    },
    If {
        arms: Vec<IfArm>,
        else_body: Option<Block>,
    },
    NumericalFor {
        variable: Name,
        first: Expression,
        last: Expression,
        step: Option<Expression>,
        body: Block,
    },
    GenericFor {
        variables: Vec<Name>,
        expressions: Vec<Expression>,
        body: Block,
    },
    FunctionDeclaration {
        name: FunctionName,
        body: FunctionBody,
    },
    LocalFunction {
        name: Name,
        body: FunctionBody,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    /// Expressions of the trailing `return` statement, if present.
    pub return_statement: Option<Vec<Expression>>,
}
