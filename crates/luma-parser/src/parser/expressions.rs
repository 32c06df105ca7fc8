//! Parser state - expression parsing methods.

use super::ParserState;
use crate::ast::{
    BinaryOperation, Constant, Expression, Field, FunctionBody, Name, Operand, Operation,
    PrefixExpression, PrefixItem, PrefixStart, TableConstructor, UnaryOperation,
};
use crate::error::ParseError;
use crate::scanner::TokenKind;
use luma_common::{ElementKind, SourceElement, Span};

fn binary_operation(kind: TokenKind) -> Option<Operation> {
    Some(match kind {
        TokenKind::Plus => Operation::Add,
        TokenKind::Minus => Operation::Sub,
        TokenKind::Star => Operation::Mul,
        TokenKind::Slash => Operation::Div,
        TokenKind::SlashSlash => Operation::IDiv,
        TokenKind::Percent => Operation::Mod,
        TokenKind::Caret => Operation::Pow,
        TokenKind::Ampersand => Operation::BAnd,
        TokenKind::Pipe => Operation::BOr,
        TokenKind::Tilde => Operation::BXor,
        TokenKind::LessLess => Operation::Shl,
        TokenKind::GreaterGreater => Operation::Shr,
        TokenKind::DotDot => Operation::Concat,
        TokenKind::Less => Operation::Lt,
        TokenKind::LessEqual => Operation::Le,
        TokenKind::Greater => Operation::Gt,
        TokenKind::GreaterEqual => Operation::Ge,
        TokenKind::EqualEqual => Operation::Eq,
        TokenKind::TildeEqual => Operation::NotEq,
        TokenKind::And => Operation::And,
        TokenKind::Or => Operation::Or,
        _ => return None,
    })
}

fn unary_operation(kind: TokenKind) -> Option<Operation> {
    Some(match kind {
        TokenKind::Minus => Operation::Unm,
        TokenKind::Not => Operation::Not,
        TokenKind::Hash => Operation::Len,
        TokenKind::Tilde => Operation::BNot,
        _ => return None,
    })
}

impl ParserState<'_> {
    /// `exp ::= operand [binop exp]` - the binary tail is kept as a flat
    /// right-leaning chain; operator precedence is irrelevant to type
    /// inference and is not reconstructed.
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let operand = self.parse_operand()?;
        let binary = match binary_operation(self.token.kind) {
            Some(operation) => {
                self.bump()?;
                Some(Box::new(BinaryOperation {
                    operation,
                    expression: self.parse_expression()?,
                }))
            }
            None => None,
        };
        Ok(Expression { operand, binary })
    }

    pub(crate) fn parse_expression_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut expressions = vec![self.parse_expression()?];
        while self.at(TokenKind::Comma) {
            self.bump()?;
            expressions.push(self.parse_expression()?);
        }
        Ok(expressions)
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        if let Some(operation) = unary_operation(self.token.kind) {
            self.bump()?;
            return Ok(Operand::Unary(Box::new(UnaryOperation {
                operation,
                expression: self.parse_expression()?,
            })));
        }
        match self.token.kind {
            TokenKind::Nil => {
                self.bump()?;
                Ok(Operand::Constant(Constant::Nil))
            }
            TokenKind::True => {
                self.bump()?;
                Ok(Operand::Constant(Constant::True))
            }
            TokenKind::False => {
                self.bump()?;
                Ok(Operand::Constant(Constant::False))
            }
            TokenKind::Ellipsis => {
                self.bump()?;
                Ok(Operand::Constant(Constant::Dots))
            }
            TokenKind::Numeral => {
                let number = self.token.number;
                self.bump()?;
                Ok(Operand::Numeral(number))
            }
            TokenKind::LiteralString => {
                let text = std::mem::take(&mut self.token.text);
                self.bump()?;
                Ok(Operand::LiteralString(text))
            }
            TokenKind::Function => {
                self.bump()?;
                Ok(Operand::Function(Box::new(self.parse_function_body()?)))
            }
            TokenKind::LeftBrace => Ok(Operand::Table(self.parse_table_constructor()?)),
            TokenKind::Name | TokenKind::LeftParen => {
                Ok(Operand::Prefix(Box::new(self.parse_prefix_expression()?)))
            }
            _ => Err(self.error("expression expected")),
        }
    }

    /// `prefixexp ::= (Name | '(' exp ')') { '.' Name | '[' exp ']' |
    /// args | ':' Name args }`
    ///
    /// Chains starting with a name record a `Variable` element spanning
    /// the name and its leading member/index segments (the part before the
    /// first call).
    pub(crate) fn parse_prefix_expression(&mut self) -> Result<PrefixExpression, ParseError> {
        let begin = self.token.span.begin;
        let start = match self.token.kind {
            TokenKind::Name => PrefixStart::Name(self.take_name("name")?),
            TokenKind::LeftParen => {
                self.bump()?;
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "')'")?;
                PrefixStart::Bracketed(Box::new(inner))
            }
            _ => return Err(self.error("name or '(' expected")),
        };
        let mut items = Vec::new();
        let mut var_end = self.last_end;
        let mut in_var_prefix = matches!(start, PrefixStart::Name(_));
        loop {
            match self.token.kind {
                TokenKind::Dot => {
                    self.bump()?;
                    let name = self.take_name("member name")?;
                    if in_var_prefix {
                        var_end = self.last_end;
                    }
                    items.push(PrefixItem::Member(name));
                }
                TokenKind::LeftBracket => {
                    self.bump()?;
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RightBracket, "']'")?;
                    if in_var_prefix {
                        var_end = self.last_end;
                    }
                    items.push(PrefixItem::Index(Box::new(index)));
                }
                TokenKind::LeftParen | TokenKind::LiteralString | TokenKind::LeftBrace => {
                    in_var_prefix = false;
                    items.push(PrefixItem::Call(self.parse_call_arguments()?));
                }
                TokenKind::Colon => {
                    in_var_prefix = false;
                    self.bump()?;
                    let name = self.take_name("method name")?;
                    items.push(PrefixItem::MethodCall(name, self.parse_call_arguments()?));
                }
                _ => break,
            }
        }
        if matches!(start, PrefixStart::Name(_)) {
            self.elements.push(SourceElement::new(
                ElementKind::Variable,
                Span::new(begin, var_end),
            ));
        }
        Ok(PrefixExpression {
            start,
            items,
            span: Span::new(begin, self.last_end),
        })
    }

    /// `args ::= '(' [explist] ')' | LiteralString | tableconstructor`
    pub(crate) fn parse_call_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        match self.token.kind {
            TokenKind::LeftParen => {
                self.bump()?;
                let arguments = if self.at(TokenKind::RightParen) {
                    Vec::new()
                } else {
                    self.parse_expression_list()?
                };
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(arguments)
            }
            TokenKind::LiteralString => {
                let text = std::mem::take(&mut self.token.text);
                self.bump()?;
                Ok(vec![Expression {
                    operand: Operand::LiteralString(text),
                    binary: None,
                }])
            }
            TokenKind::LeftBrace => {
                let table = self.parse_table_constructor()?;
                Ok(vec![Expression {
                    operand: Operand::Table(table),
                    binary: None,
                }])
            }
            _ => Err(self.error("function arguments expected")),
        }
    }

    fn parse_table_constructor(&mut self) -> Result<TableConstructor, ParseError> {
        self.expect(TokenKind::LeftBrace, "'{'")?;
        let mut fields = Vec::new();
        while !self.at(TokenKind::RightBrace) {
            fields.push(self.parse_field()?);
            if self.at(TokenKind::Comma) || self.at(TokenKind::Semicolon) {
                self.bump()?;
            } else {
                break;
            }
        }
        self.expect(TokenKind::RightBrace, "'}'")?;
        Ok(TableConstructor { fields })
    }

    fn parse_field(&mut self) -> Result<Field, ParseError> {
        match self.token.kind {
            TokenKind::LeftBracket => {
                self.bump()?;
                let key = self.parse_expression()?;
                self.expect(TokenKind::RightBracket, "']'")?;
                self.expect(TokenKind::Equal, "'='")?;
                Ok(Field::ByExpression {
                    key,
                    value: self.parse_expression()?,
                })
            }
            TokenKind::Name if self.peek_kind() == TokenKind::Equal => {
                let name = self.take_name("field name")?;
                self.expect(TokenKind::Equal, "'='")?;
                Ok(Field::ByName {
                    name,
                    value: self.parse_expression()?,
                })
            }
            _ => Ok(Field::Positional(self.parse_expression()?)),
        }
    }

    /// `funcbody ::= '(' [parlist] ')' block 'end'` - called with the
    /// `function` keyword already consumed.
    pub(crate) fn parse_function_body(&mut self) -> Result<FunctionBody, ParseError> {
        let begin = self.token.span.begin;
        self.expect(TokenKind::LeftParen, "'('")?;
        let mut parameters: Vec<Name> = Vec::new();
        let mut varargs = false;
        if !self.at(TokenKind::RightParen) {
            loop {
                if self.at(TokenKind::Ellipsis) {
                    self.bump()?;
                    varargs = true;
                    break;
                }
                parameters.push(self.take_name("parameter name")?);
                if self.at(TokenKind::Comma) {
                    self.bump()?;
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "')'")?;
        let block = self.parse_block()?;
        let end = self.token.span.end;
        self.expect(TokenKind::End, "'end'")?;
        Ok(FunctionBody {
            parameters,
            varargs,
            block,
            span: Span::new(begin, end),
        })
    }
}
