//! Completion-context extraction for the luma analyzer.
//!
//! Given raw source text and a cursor offset, this crate recovers the
//! variable/member/call chain the cursor sits in:
//! - `extract` - bounded backward scan over the raw bytes
//! - `chain` - parse the extracted text and resolve its type against an
//!   analyzed scope tree
//!
//! Everything here is a pure function of its inputs; a cursor that is not
//! on chain text yields an empty result, never an error.

pub mod chain;
pub mod extract;

pub use chain::{chain_type, variable_at};
pub use extract::extract_variable_at;
