//! Parser state - statement and block parsing methods.

use super::ParserState;
use crate::ast::{Block, FunctionName, IfArm, Statement};
use crate::error::ParseError;
use crate::scanner::TokenKind;

impl ParserState<'_> {
    /// Tokens that terminate a block without being part of it.
    fn block_follow(&self) -> bool {
        matches!(
            self.token.kind,
            TokenKind::End
                | TokenKind::Else
                | TokenKind::Elseif
                | TokenKind::Until
                | TokenKind::Eof
        )
    }

    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let mut statements = Vec::new();
        let mut return_statement = None;
        loop {
            if self.at(TokenKind::Return) {
                self.bump()?;
                let expressions = if self.block_follow() || self.at(TokenKind::Semicolon) {
                    Vec::new()
                } else {
                    self.parse_expression_list()?
                };
                if self.at(TokenKind::Semicolon) {
                    self.bump()?;
                }
                return_statement = Some(expressions);
                break;
            }
            if self.block_follow() {
                break;
            }
            if self.at(TokenKind::Semicolon) {
                self.bump()?;
                statements.push(Statement::Empty);
                continue;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Block {
            statements,
            return_statement,
        })
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.token.kind {
            TokenKind::ColonColon => {
                self.bump()?;
                let name = self.take_name("label name")?;
                self.expect(TokenKind::ColonColon, "'::'")?;
                Ok(Statement::Label(name))
            }
            TokenKind::Break => {
                self.bump()?;
                Ok(Statement::Break)
            }
            TokenKind::Goto => {
                self.bump()?;
                Ok(Statement::Goto(self.take_name("label name")?))
            }
            TokenKind::Do => {
                self.bump()?;
                let body = self.parse_block()?;
                self.expect(TokenKind::End, "'end'")?;
                Ok(Statement::Do(body))
            }
            TokenKind::While => {
                self.bump()?;
                let condition = self.parse_expression()?;
                self.expect(TokenKind::Do, "'do'")?;
                let body = self.parse_block()?;
                self.expect(TokenKind::End, "'end'")?;
                Ok(Statement::While { condition, body })
            }
            TokenKind::Repeat => {
                self.bump()?;
                let body = self.parse_block()?;
                self.expect(TokenKind::Until, "'until'")?;
                Ok(Statement::Repeat {
                    body,
                    condition: self.parse_expression()?,
                })
            }
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::Function => self.parse_function_declaration(),
            TokenKind::Local => self.parse_local(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        self.bump()?;
        let mut arms = Vec::new();
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Then, "'then'")?;
        arms.push(IfArm {
            condition,
            body: self.parse_block()?,
        });
        while self.at(TokenKind::Elseif) {
            self.bump()?;
            let condition = self.parse_expression()?;
            self.expect(TokenKind::Then, "'then'")?;
            arms.push(IfArm {
                condition,
                body: self.parse_block()?,
            });
        }
        let else_body = if self.at(TokenKind::Else) {
            self.bump()?;
            Some(self.parse_block()?)
        } else {
            None
        };
        self.expect(TokenKind::End, "'end'")?;
        Ok(Statement::If { arms, else_body })
    }

    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        self.bump()?;
        let first_name = self.take_name("loop variable")?;
        if self.at(TokenKind::Equal) {
            self.bump()?;
            let first = self.parse_expression()?;
            self.expect(TokenKind::Comma, "','")?;
            let last = self.parse_expression()?;
            let step = if self.at(TokenKind::Comma) {
                self.bump()?;
                Some(self.parse_expression()?)
            } else {
                None
            };
            self.expect(TokenKind::Do, "'do'")?;
            let body = self.parse_block()?;
            self.expect(TokenKind::End, "'end'")?;
            Ok(Statement::NumericalFor {
                variable: first_name,
                first,
                last,
                step,
                body,
            })
        } else {
            let mut variables = vec![first_name];
            while self.at(TokenKind::Comma) {
                self.bump()?;
                variables.push(self.take_name("loop variable")?);
            }
            self.expect(TokenKind::In, "'in'")?;
            let expressions = self.parse_expression_list()?;
            self.expect(TokenKind::Do, "'do'")?;
            let body = self.parse_block()?;
            self.expect(TokenKind::End, "'end'")?;
            Ok(Statement::GenericFor {
                variables,
                expressions,
                body,
            })
        }
    }

    /// `function Name {'.' Name} [':' Name] funcbody`
    fn parse_function_declaration(&mut self) -> Result<Statement, ParseError> {
        self.bump()?;
        let start = self.take_name("function name")?;
        let mut rest = Vec::new();
        while self.at(TokenKind::Dot) {
            self.bump()?;
            rest.push(self.take_name("member name")?);
        }
        let method = if self.at(TokenKind::Colon) {
            self.bump()?;
            Some(self.take_name("method name")?)
        } else {
            None
        };
        let body = self.parse_function_body()?;
        Ok(Statement::FunctionDeclaration {
            name: FunctionName {
                start,
                rest,
                method,
            },
            body,
        })
    }

    fn parse_local(&mut self) -> Result<Statement, ParseError> {
        self.bump()?;
        if self.at(TokenKind::Function) {
            self.bump()?;
            let name = self.take_name("function name")?;
            let body = self.parse_function_body()?;
            return Ok(Statement::LocalFunction { name, body });
        }
        let mut names = vec![self.take_name("variable name")?];
        while self.at(TokenKind::Comma) {
            self.bump()?;
            names.push(self.take_name("variable name")?);
        }
        let values = if self.at(TokenKind::Equal) {
            self.bump()?;
            Some(self.parse_expression_list()?)
        } else {
            None
        };
        Ok(Statement::LocalAssignment { names, values })
    }

    /// Either an assignment (`varlist '=' explist`) or a call statement;
    /// any other expression in statement position is a syntax error.
    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let target = self.parse_prefix_expression()?;
        if self.at(TokenKind::Equal) || self.at(TokenKind::Comma) {
            let mut targets = vec![target];
            while self.at(TokenKind::Comma) {
                self.bump()?;
                targets.push(self.parse_prefix_expression()?);
            }
            self.expect(TokenKind::Equal, "'='")?;
            let values = self.parse_expression_list()?;
            return Ok(Statement::Assignment { targets, values });
        }
        if target.ends_in_call() {
            return Ok(Statement::FunctionCall(target));
        }
        Err(self.error("unexpected expression statement"))
    }
}
