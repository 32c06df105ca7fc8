//! Recursive descent Lua parser.
//!
//! `ParserState` owns the scanner, the one-token lookahead and the element
//! list collected for highlighting. Statement and expression methods are
//! split across `statements.rs` and `expressions.rs`.

mod expressions;
mod statements;

use crate::ast::{Block, ChainExpression, Name, PrefixItem};
use crate::error::ParseError;
use crate::scanner::{ScannerState, Token, TokenKind};
use luma_common::{ElementKind, Elements, SourceElement, Span};

/// A parsed top-level block together with the source elements recorded
/// while parsing it.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub block: Block,
    pub elements: Elements,
}

/// Result of the restricted variable/chain entry point.
///
/// `consumed` is the exact count of source bytes the parse advanced over;
/// callers that require a full parse compare it against the input length.
#[derive(Clone, Debug)]
pub struct ChainParse {
    pub chain: Option<ChainExpression>,
    pub consumed: usize,
}

/// Parse a whole Lua chunk.
pub fn parse_block(source: &str) -> Result<Chunk, ParseError> {
    let mut parser = ParserState::new(source);
    parser.prime()?;
    let block = parser.parse_block()?;
    parser.expect_eof()?;
    let mut elements = parser.elements;
    elements.sort_by_key(|element| element.span.begin);
    Ok(Chunk { block, elements })
}

/// Parse a single variable/member/call chain from the start of `source`.
///
/// Never fails: malformed input yields `chain: None`. A chain that parses
/// but does not reach the end of `source` is reported with the byte count
/// it did consume.
pub fn parse_chain(source: &str) -> ChainParse {
    let mut parser = ParserState::new(source);
    if parser.prime().is_err() {
        return ChainParse {
            chain: None,
            consumed: 0,
        };
    }
    match parser.parse_chain_expression() {
        Ok(chain) => ChainParse {
            consumed: parser.last_end as usize,
            chain: Some(chain),
        },
        Err(error) => {
            tracing::debug!(%error, "chain parse failed");
            ChainParse {
                chain: None,
                consumed: 0,
            }
        }
    }
}

pub(crate) struct ParserState<'a> {
    scanner: ScannerState<'a>,
    token: Token,
    /// End offset of the last consumed token.
    last_end: u32,
    elements: Elements,
}

impl<'a> ParserState<'a> {
    pub(crate) fn new(source: &'a str) -> ParserState<'a> {
        ParserState {
            scanner: ScannerState::new(source),
            token: Token::eof(0),
            last_end: 0,
            elements: Vec::new(),
        }
    }

    /// Fetch the first token. Called once before parsing starts.
    pub(crate) fn prime(&mut self) -> Result<(), ParseError> {
        self.token = self.scanner.next_token()?;
        Ok(())
    }

    /// Consume the current token, recording its highlight element.
    pub(crate) fn bump(&mut self) -> Result<(), ParseError> {
        if self.token.kind.is_keyword() {
            self.elements
                .push(SourceElement::new(ElementKind::Keyword, self.token.span));
        } else if self.token.kind == TokenKind::Numeral {
            self.elements
                .push(SourceElement::new(ElementKind::Numeral, self.token.span));
        } else if self.token.kind == TokenKind::LiteralString {
            self.elements.push(SourceElement::new(
                ElementKind::LiteralString,
                self.token.span,
            ));
        }
        self.last_end = self.token.span.end;
        self.token = self.scanner.next_token()?;
        Ok(())
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.scanner
            .clone()
            .next_token()
            .map(|token| token.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn error(&self, message: &str) -> ParseError {
        ParseError::new(message, self.token.span)
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), ParseError> {
        if self.token.kind != kind {
            return Err(self.error(&format!("{what} expected")));
        }
        self.bump()
    }

    pub(crate) fn expect_eof(&mut self) -> Result<(), ParseError> {
        if self.token.kind != TokenKind::Eof {
            return Err(self.error("unexpected token after block"));
        }
        Ok(())
    }

    /// Consume a `Name` token, taking ownership of its text.
    pub(crate) fn take_name(&mut self, what: &str) -> Result<Name, ParseError> {
        if self.token.kind != TokenKind::Name {
            return Err(self.error(&format!("{what} expected")));
        }
        let name = Name::new(std::mem::take(&mut self.token.text), self.token.span);
        self.bump()?;
        Ok(name)
    }

    /// The restricted chain grammar: `Name { '.' Name | '[' exp ']' |
    /// call | ':' Name call } [ ':' Name ]`.
    ///
    /// A trailing `:name` without arguments is accepted so completion can
    /// address a method member that is not being called yet; it must be
    /// the last segment.
    pub(crate) fn parse_chain_expression(&mut self) -> Result<ChainExpression, ParseError> {
        let start = self.take_name("variable name")?;
        let begin = start.span.begin;
        let mut items = Vec::new();
        let mut method = None;
        loop {
            match self.token.kind {
                TokenKind::Dot => {
                    self.bump()?;
                    items.push(PrefixItem::Member(self.take_name("member name")?));
                }
                TokenKind::LeftBracket => {
                    self.bump()?;
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RightBracket, "']'")?;
                    items.push(PrefixItem::Index(Box::new(index)));
                }
                TokenKind::LeftParen => {
                    let arguments = self.parse_call_arguments()?;
                    items.push(PrefixItem::Call(arguments));
                }
                TokenKind::Colon => {
                    self.bump()?;
                    let name = self.take_name("method name")?;
                    if self.at(TokenKind::LeftParen) {
                        let arguments = self.parse_call_arguments()?;
                        items.push(PrefixItem::MethodCall(name, arguments));
                    } else {
                        method = Some(name);
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(ChainExpression {
            start,
            items,
            method,
            span: Span::new(begin, self.last_end),
        })
    }
}
