//! Scope-based type inference for Lua blocks.
//!
//! This crate provides the semantic analysis phase:
//! - `types` - Inferred type model (`LuaType`, `FunctionType`, `TableType`)
//! - `scope` - Lexical scope tree built over an arena (`ScopeArena`)
//! - `script_inputs` - Registry of externally declared entry points
//! - `get_type` - Best-effort expression typing
//! - `analyze` - The walker populating a scope tree from a parsed block
//!
//! Every operation here is total: missing information degrades to
//! `LuaType::Unknown` instead of failing, so the engines stay usable on
//! incomplete or mid-edit source.

pub mod analyze;
pub mod get_type;
pub mod scope;
pub mod script_inputs;
pub mod types;

pub use analyze::{analyze_block, analyze_chunk};
pub use scope::{Scope, ScopeArena, ScopeId};
pub use script_inputs::ScriptInputs;
pub use types::{FunctionType, LuaType, TableType};
