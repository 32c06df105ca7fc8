//! Lua tokenizer.
//!
//! Byte-oriented single-pass scanner. Each call to [`ScannerState::next_token`]
//! skips whitespace and comments and produces the next token with its byte
//! span. Literal string contents are decoded into the token; numeral values
//! are parsed into an `f64`.

use crate::error::ParseError;
use luma_common::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Eof,
    Name,
    Numeral,
    LiteralString,
    // Keywords
    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    Goto,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,
    // Symbols
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash,
    Percent,
    Caret,
    Hash,
    Ampersand,
    Tilde,
    Pipe,
    LessLess,
    GreaterGreater,
    Equal,
    EqualEqual,
    TildeEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Colon,
    ColonColon,
    Comma,
    Dot,
    DotDot,
    Ellipsis,
}

impl TokenKind {
    pub(crate) fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::And
                | TokenKind::Break
                | TokenKind::Do
                | TokenKind::Else
                | TokenKind::Elseif
                | TokenKind::End
                | TokenKind::False
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::Goto
                | TokenKind::If
                | TokenKind::In
                | TokenKind::Local
                | TokenKind::Nil
                | TokenKind::Not
                | TokenKind::Or
                | TokenKind::Repeat
                | TokenKind::Return
                | TokenKind::Then
                | TokenKind::True
                | TokenKind::Until
                | TokenKind::While
        )
    }
}

fn keyword_kind(text: &str) -> Option<TokenKind> {
    Some(match text {
        "and" => TokenKind::And,
        "break" => TokenKind::Break,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "elseif" => TokenKind::Elseif,
        "end" => TokenKind::End,
        "false" => TokenKind::False,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "goto" => TokenKind::Goto,
        "if" => TokenKind::If,
        "in" => TokenKind::In,
        "local" => TokenKind::Local,
        "nil" => TokenKind::Nil,
        "not" => TokenKind::Not,
        "or" => TokenKind::Or,
        "repeat" => TokenKind::Repeat,
        "return" => TokenKind::Return,
        "then" => TokenKind::Then,
        "true" => TokenKind::True,
        "until" => TokenKind::Until,
        "while" => TokenKind::While,
        _ => return None,
    })
}

#[derive(Clone, Debug)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Name text, or decoded string contents for `LiteralString`.
    pub text: String,
    /// Numeric value for `Numeral`.
    pub number: f64,
}

impl Token {
    pub(crate) fn eof(offset: u32) -> Token {
        Token {
            kind: TokenKind::Eof,
            span: Span::new(offset, offset),
            text: String::new(),
            number: 0.0,
        }
    }
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[derive(Clone)]
pub(crate) struct ScannerState<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ScannerState<'a> {
    pub(crate) fn new(source: &'a str) -> ScannerState<'a> {
        ScannerState {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn span_from(&self, begin: usize) -> Span {
        Span::new(begin as u32, self.pos as u32)
    }

    fn error_here(&self, begin: usize, message: &str) -> ParseError {
        ParseError::new(message, self.span_from(begin))
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.pos += 1;
                }
                Some(b'-') if self.peek_at(1) == Some(b'-') => {
                    let begin = self.pos;
                    self.pos += 2;
                    if let Some(level) = self.long_bracket_level() {
                        self.read_long_string(level)
                            .map_err(|_| self.error_here(begin, "unfinished long comment"))?;
                    } else {
                        while let Some(b) = self.peek() {
                            if b == b'\n' {
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// If the scanner sits on a long-bracket opener (`[[`, `[=[`, ...),
    /// consume it and return its level.
    fn long_bracket_level(&mut self) -> Option<usize> {
        if self.peek() != Some(b'[') {
            return None;
        }
        let mut level = 0;
        while self.peek_at(1 + level) == Some(b'=') {
            level += 1;
        }
        if self.peek_at(1 + level) == Some(b'[') {
            self.pos += 2 + level;
            Some(level)
        } else {
            None
        }
    }

    /// Read the contents of a long string up to and past its closing
    /// bracket. The opener has already been consumed.
    fn read_long_string(&mut self, level: usize) -> Result<String, ParseError> {
        let begin = self.pos;
        // A newline immediately after the opener is not part of the contents
        if self.peek() == Some(b'\n') {
            self.pos += 1;
        }
        let content_begin = self.pos;
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == b']' {
                let mut close = 0;
                while self.peek_at(1 + close) == Some(b'=') {
                    close += 1;
                }
                if close == level && self.peek_at(1 + close) == Some(b']') {
                    let content = self.source[content_begin..self.pos].to_string();
                    self.pos += 2 + level;
                    return Ok(content);
                }
            }
            self.pos += 1;
        }
        Err(self.error_here(begin, "unfinished long string"))
    }

    fn read_short_string(&mut self, quote: u8, begin: usize) -> Result<String, ParseError> {
        // Decoded byte-wise: unescaped bytes are copied through verbatim,
        // which keeps multi-byte UTF-8 sequences intact
        let mut out = Vec::new();
        loop {
            let Some(b) = self.peek() else {
                return Err(self.error_here(begin, "unfinished string"));
            };
            self.pos += 1;
            match b {
                b if b == quote => {
                    return String::from_utf8(out)
                        .map_err(|_| self.error_here(begin, "malformed string"));
                }
                b'\n' => return Err(self.error_here(begin, "unfinished string")),
                b'\\' => {
                    let Some(esc) = self.peek() else {
                        return Err(self.error_here(begin, "unfinished string"));
                    };
                    self.pos += 1;
                    match esc {
                        b'n' => out.push(b'\n'),
                        b't' => out.push(b'\t'),
                        b'r' => out.push(b'\r'),
                        b'a' => out.push(0x07),
                        b'b' => out.push(0x08),
                        b'f' => out.push(0x0c),
                        b'v' => out.push(0x0b),
                        other => out.push(other),
                    }
                }
                other => out.push(other),
            }
        }
    }

    fn read_numeral(&mut self, begin: usize) -> Result<Token, ParseError> {
        if self.peek() == Some(b'0')
            && matches!(self.peek_at(1), Some(b'x') | Some(b'X'))
            && self.peek_at(2).is_some_and(|b| b.is_ascii_hexdigit())
        {
            self.pos += 2;
            let digits_begin = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            let value = u64::from_str_radix(&self.source[digits_begin..self.pos], 16)
                .map_err(|_| self.error_here(begin, "malformed number"))?;
            return Ok(Token {
                kind: TokenKind::Numeral,
                span: self.span_from(begin),
                text: String::new(),
                number: value as f64,
            });
        }

        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mut lookahead = 1;
            if matches!(self.peek_at(1), Some(b'+') | Some(b'-')) {
                lookahead = 2;
            }
            if self.peek_at(lookahead).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += lookahead;
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        let number: f64 = self.source[begin..self.pos]
            .parse()
            .map_err(|_| self.error_here(begin, "malformed number"))?;
        Ok(Token {
            kind: TokenKind::Numeral,
            span: self.span_from(begin),
            text: String::new(),
            number,
        })
    }

    fn symbol(&mut self, kind: TokenKind, begin: usize, len: usize) -> Token {
        self.pos = begin + len;
        Token {
            kind,
            span: self.span_from(begin),
            text: String::new(),
            number: 0.0,
        }
    }

    pub(crate) fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia()?;
        let begin = self.pos;
        let Some(b) = self.peek() else {
            return Ok(Token::eof(self.pos as u32));
        };

        if is_name_start(b) {
            while self.peek().is_some_and(is_name_char) {
                self.pos += 1;
            }
            let text = &self.source[begin..self.pos];
            let kind = keyword_kind(text).unwrap_or(TokenKind::Name);
            return Ok(Token {
                kind,
                span: self.span_from(begin),
                text: if kind == TokenKind::Name {
                    text.to_string()
                } else {
                    String::new()
                },
                number: 0.0,
            });
        }

        if b.is_ascii_digit() || (b == b'.' && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()))
        {
            return self.read_numeral(begin);
        }

        match b {
            b'"' | b'\'' => {
                self.pos += 1;
                let text = self.read_short_string(b, begin)?;
                Ok(Token {
                    kind: TokenKind::LiteralString,
                    span: self.span_from(begin),
                    text,
                    number: 0.0,
                })
            }
            b'[' => {
                if let Some(level) = self.long_bracket_level() {
                    let text = self.read_long_string(level)?;
                    Ok(Token {
                        kind: TokenKind::LiteralString,
                        span: self.span_from(begin),
                        text,
                        number: 0.0,
                    })
                } else {
                    Ok(self.symbol(TokenKind::LeftBracket, begin, 1))
                }
            }
            b'+' => Ok(self.symbol(TokenKind::Plus, begin, 1)),
            b'-' => Ok(self.symbol(TokenKind::Minus, begin, 1)),
            b'*' => Ok(self.symbol(TokenKind::Star, begin, 1)),
            b'/' => {
                if self.peek_at(1) == Some(b'/') {
                    Ok(self.symbol(TokenKind::SlashSlash, begin, 2))
                } else {
                    Ok(self.symbol(TokenKind::Slash, begin, 1))
                }
            }
            b'%' => Ok(self.symbol(TokenKind::Percent, begin, 1)),
            b'^' => Ok(self.symbol(TokenKind::Caret, begin, 1)),
            b'#' => Ok(self.symbol(TokenKind::Hash, begin, 1)),
            b'&' => Ok(self.symbol(TokenKind::Ampersand, begin, 1)),
            b'~' => {
                if self.peek_at(1) == Some(b'=') {
                    Ok(self.symbol(TokenKind::TildeEqual, begin, 2))
                } else {
                    Ok(self.symbol(TokenKind::Tilde, begin, 1))
                }
            }
            b'|' => Ok(self.symbol(TokenKind::Pipe, begin, 1)),
            b'<' => match self.peek_at(1) {
                Some(b'<') => Ok(self.symbol(TokenKind::LessLess, begin, 2)),
                Some(b'=') => Ok(self.symbol(TokenKind::LessEqual, begin, 2)),
                _ => Ok(self.symbol(TokenKind::Less, begin, 1)),
            },
            b'>' => match self.peek_at(1) {
                Some(b'>') => Ok(self.symbol(TokenKind::GreaterGreater, begin, 2)),
                Some(b'=') => Ok(self.symbol(TokenKind::GreaterEqual, begin, 2)),
                _ => Ok(self.symbol(TokenKind::Greater, begin, 1)),
            },
            b'=' => {
                if self.peek_at(1) == Some(b'=') {
                    Ok(self.symbol(TokenKind::EqualEqual, begin, 2))
                } else {
                    Ok(self.symbol(TokenKind::Equal, begin, 1))
                }
            }
            b'(' => Ok(self.symbol(TokenKind::LeftParen, begin, 1)),
            b')' => Ok(self.symbol(TokenKind::RightParen, begin, 1)),
            b'{' => Ok(self.symbol(TokenKind::LeftBrace, begin, 1)),
            b'}' => Ok(self.symbol(TokenKind::RightBrace, begin, 1)),
            b']' => Ok(self.symbol(TokenKind::RightBracket, begin, 1)),
            b';' => Ok(self.symbol(TokenKind::Semicolon, begin, 1)),
            b':' => {
                if self.peek_at(1) == Some(b':') {
                    Ok(self.symbol(TokenKind::ColonColon, begin, 2))
                } else {
                    Ok(self.symbol(TokenKind::Colon, begin, 1))
                }
            }
            b',' => Ok(self.symbol(TokenKind::Comma, begin, 1)),
            b'.' => {
                if self.peek_at(1) == Some(b'.') {
                    if self.peek_at(2) == Some(b'.') {
                        Ok(self.symbol(TokenKind::Ellipsis, begin, 3))
                    } else {
                        Ok(self.symbol(TokenKind::DotDot, begin, 2))
                    }
                } else {
                    Ok(self.symbol(TokenKind::Dot, begin, 1))
                }
            }
            _ => {
                self.pos += 1;
                Err(self.error_here(begin, "unexpected character"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = ScannerState::new(source);
        let mut out = Vec::new();
        loop {
            let token = scanner.next_token().expect("scan failure");
            if token.kind == TokenKind::Eof {
                return out;
            }
            out.push(token.kind);
        }
    }

    #[test]
    fn scans_keywords_and_names() {
        assert_eq!(
            kinds("local x = nil"),
            vec![
                TokenKind::Local,
                TokenKind::Name,
                TokenKind::Equal,
                TokenKind::Nil
            ]
        );
    }

    #[test]
    fn scans_numerals() {
        let mut scanner = ScannerState::new("42 3.5 1e3 0x10");
        let values: Vec<f64> = (0..4)
            .map(|_| scanner.next_token().expect("scan failure").number)
            .collect();
        assert_eq!(values, vec![42.0, 3.5, 1000.0, 16.0]);
    }

    #[test]
    fn string_span_includes_quotes() {
        let mut scanner = ScannerState::new("'hello'");
        let token = scanner.next_token().expect("scan failure");
        assert_eq!(token.kind, TokenKind::LiteralString);
        assert_eq!(token.text, "hello");
        assert_eq!(token.span, Span::new(0, 7));
    }

    #[test]
    fn long_strings_and_comments() {
        assert_eq!(
            kinds("--[[ skipped ]] x -- line\ny"),
            vec![TokenKind::Name, TokenKind::Name]
        );
        let mut scanner = ScannerState::new("[==[raw ]] text]==]");
        let token = scanner.next_token().expect("scan failure");
        assert_eq!(token.kind, TokenKind::LiteralString);
        assert_eq!(token.text, "raw ]] text");
    }

    #[test]
    fn concat_versus_dots() {
        assert_eq!(
            kinds("a .. b ... a.b"),
            vec![
                TokenKind::Name,
                TokenKind::DotDot,
                TokenKind::Name,
                TokenKind::Ellipsis,
                TokenKind::Name,
                TokenKind::Dot,
                TokenKind::Name
            ]
        );
    }

    #[test]
    fn non_ascii_string_contents_survive_decoding() {
        let mut scanner = ScannerState::new("'héllo wörld'");
        let token = scanner.next_token().expect("scan failure");
        assert_eq!(token.kind, TokenKind::LiteralString);
        assert_eq!(token.text, "héllo wörld");

        let mut scanner = ScannerState::new("'caf\\é'");
        let token = scanner.next_token().expect("scan failure");
        assert_eq!(token.text, "café");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut scanner = ScannerState::new("'open");
        assert!(scanner.next_token().is_err());
    }
}
