//! Registry of externally declared script entry points.
//!
//! Host applications declare the functions they will call into a script
//! ("script inputs") together with authoritative parameter and result
//! types. When the walker analyzes a function declaration whose name
//! matches a registered input, the declared parameter types replace the
//! `Unknown` defaults inside the function body.
//!
//! The registry is built once, then shared read-only across a whole scope
//! tree; it is passed explicitly to the analysis entry point rather than
//! living in global state.

use crate::types::{FunctionType, LuaType};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
pub struct ScriptInputs {
    inputs: FxHashMap<String, FunctionType>,
}

impl ScriptInputs {
    #[must_use]
    pub fn new() -> ScriptInputs {
        ScriptInputs::default()
    }

    /// Declare an entry point. Re-registering a name overwrites it.
    pub fn register(
        &mut self,
        name: &str,
        parameters: impl IntoIterator<Item = LuaType>,
        results: impl IntoIterator<Item = LuaType>,
    ) {
        self.inputs.insert(
            name.to_string(),
            FunctionType {
                parameters: parameters.into_iter().collect(),
                results: results.into_iter().collect(),
                is_method: false,
                script_input: Some(name.to_string()),
            },
        );
    }

    /// The authoritative signature registered under `name`, if any.
    #[must_use]
    pub fn script_input(&self, name: &str) -> Option<&FunctionType> {
        self.inputs.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
