//! Inferred Lua type model.

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

/// The type inferred for a variable, table member or expression.
///
/// `Unknown` is the absorbing default: every inference path that runs out
/// of information produces it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub enum LuaType {
    #[default]
    Unknown,
    Nil,
    Boolean,
    Number,
    String,
    Function(Box<FunctionType>),
    Table(TableType),
}

impl LuaType {
    #[must_use]
    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            LuaType::Function(function) => Some(function.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&TableType> {
        match self {
            LuaType::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Signature of a function value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FunctionType {
    pub parameters: SmallVec<[LuaType; 4]>,
    pub results: SmallVec<[LuaType; 4]>,
    /// Declared with the `function t:m(...)` method syntax, which
    /// implicitly receives a leading `self`.
    pub is_method: bool,
    /// Name under which this signature was registered as a script input,
    /// `None` for ordinary functions.
    pub script_input: Option<String>,
}

/// Shape of a table value. Members are created lazily as assignments
/// reference them and are never removed within one analysis pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TableType {
    pub members: FxHashMap<String, LuaType>,
}

impl TableType {
    /// Type of a member, `Unknown` when absent.
    #[must_use]
    pub fn member(&self, name: &str) -> LuaType {
        self.members.get(name).cloned().unwrap_or_default()
    }
}
