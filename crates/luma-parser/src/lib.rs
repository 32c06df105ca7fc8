//! Lua parser for the luma analyzer.
//!
//! This crate provides the syntactic analysis phase:
//! - `scanner` - Lua tokenizer
//! - `ast` - Boxed tagged-union AST types
//! - `parser` - Recursive descent parser with two entry points:
//!   `parse_block` for whole chunks and `parse_chain` for the restricted
//!   variable/chain grammar used by completion

pub mod ast;
pub mod error;
pub mod parser;
pub(crate) mod scanner;

pub use error::ParseError;
pub use parser::{ChainParse, Chunk, parse_block, parse_chain};
