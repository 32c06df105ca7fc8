//! Chain parsing and type resolution for completion queries.

use crate::extract::extract_variable_at;
use luma_analysis::get_type::{member_type, suffix_type};
use luma_analysis::{LuaType, ScopeArena, ScopeId};
use luma_parser::ast::ChainExpression;
use luma_parser::parse_chain;
use tracing::debug;

/// Extract the chain under the cursor and parse it through the restricted
/// variable grammar. The parse is accepted only when it consumes the
/// extracted substring entirely; anything else is "no variable found",
/// a normal outcome for non-chain text.
#[must_use]
pub fn variable_at(text: &str, pos: Option<usize>) -> Option<ChainExpression> {
    let extracted = extract_variable_at(text, pos);
    if extracted.is_empty() {
        return None;
    }
    let parsed = parse_chain(extracted);
    match parsed.chain {
        Some(chain) if parsed.consumed == extracted.len() => Some(chain),
        _ => {
            debug!(extracted, consumed = parsed.consumed, "partial chain parse rejected");
            None
        }
    }
}

/// Resolve a parsed chain against an analyzed scope tree: look up the
/// start name lexically from `scope`, then walk the member/index/call
/// segments. A trailing `:name` method reference resolves to the method
/// member itself.
#[must_use]
pub fn chain_type(arena: &ScopeArena, scope: ScopeId, chain: &ChainExpression) -> LuaType {
    let mut ty = arena.variable_type(scope, &chain.start.text);
    for item in &chain.items {
        ty = suffix_type(&ty, item);
    }
    if let Some(method) = &chain.method {
        ty = member_type(&ty, &method.text);
    }
    ty
}
