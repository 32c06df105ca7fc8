//! Lexical scope tree.
//!
//! Scopes live in an arena: a scope refers to its parent through a
//! non-owning `ScopeId`, and ownership flows child to root through the
//! arena's backing vector, so no reference cycles can form. The arena also
//! carries the script-input registry shared read-only by the whole tree.

use crate::script_inputs::ScriptInputs;
use crate::types::{LuaType, TableType};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::sync::Arc;

/// Index of a scope in its [`ScopeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A lexical binding environment tied to one block.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    /// Nested block scopes, in analysis order.
    pub children: Vec<ScopeId>,
    variables: FxHashMap<String, LuaType>,
    labels: FxHashSet<String>,
}

impl Scope {
    #[must_use]
    pub fn variables(&self) -> &FxHashMap<String, LuaType> {
        &self.variables
    }

    #[must_use]
    pub fn labels(&self) -> &FxHashSet<String> {
        &self.labels
    }
}

/// Arena owning a tree of scopes rooted at [`ScopeId::ROOT`].
#[derive(Clone, Debug, Serialize)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
    #[serde(skip)]
    script_inputs: Arc<ScriptInputs>,
}

impl ScopeArena {
    #[must_use]
    pub fn new(script_inputs: Arc<ScriptInputs>) -> ScopeArena {
        ScopeArena {
            scopes: vec![Scope::default()],
            script_inputs,
        }
    }

    #[must_use]
    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    #[must_use]
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    #[must_use]
    pub fn script_inputs(&self) -> &ScriptInputs {
        &self.script_inputs
    }

    /// Allocate a fresh scope and attach it as the next child of `parent`.
    pub fn new_child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        self.scopes[parent.index()].children.push(id);
        id
    }

    /// Bind `name` in exactly this scope, overwriting any previous binding
    /// there (weak update).
    pub fn add_variable(&mut self, scope: ScopeId, name: &str, ty: LuaType) {
        self.scopes[scope.index()]
            .variables
            .insert(name.to_string(), ty);
    }

    /// Lexical lookup, walking outward through parents. Total: an unbound
    /// name yields `Unknown`.
    #[must_use]
    pub fn variable_type(&self, scope: ScopeId, name: &str) -> LuaType {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.index()];
            if let Some(ty) = scope.variables.get(name) {
                return ty.clone();
            }
            current = scope.parent;
        }
        LuaType::Unknown
    }

    /// Plain-assignment update: overwrite the binding at the scope where
    /// `name` is already bound, or create it in `scope` when no enclosing
    /// binding exists (Lua's implicit creation on assignment).
    pub fn update_variable(&mut self, scope: ScopeId, name: &str, ty: LuaType) {
        let target = self.binding_scope(scope, name).unwrap_or(scope);
        self.scopes[target.index()]
            .variables
            .insert(name.to_string(), ty);
    }

    /// Resolve `name` for member mutation: the binding is coerced to a
    /// table (replacing any non-table type) at the scope where it already
    /// exists, or created in `scope`, and its shape is returned for
    /// navigation.
    pub fn modify_table(&mut self, scope: ScopeId, name: &str) -> &mut TableType {
        let target = self.binding_scope(scope, name).unwrap_or(scope);
        let slot = self.scopes[target.index()]
            .variables
            .entry(name.to_string())
            .or_default();
        if !matches!(slot, LuaType::Table(_)) {
            *slot = LuaType::Table(TableType::default());
        }
        match slot {
            LuaType::Table(table) => table,
            _ => unreachable!("binding was just coerced to a table"),
        }
    }

    /// Record a label declared directly in this block.
    pub fn add_label(&mut self, scope: ScopeId, name: &str) {
        self.scopes[scope.index()].labels.insert(name.to_string());
    }

    /// True when a label of that name is declared in this scope or any
    /// enclosing one.
    #[must_use]
    pub fn label_visible(&self, scope: ScopeId, name: &str) -> bool {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.index()];
            if scope.labels.contains(name) {
                return true;
            }
            current = scope.parent;
        }
        false
    }

    fn binding_scope(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.index()];
            if scope.variables.contains_key(name) {
                return Some(id);
            }
            current = scope.parent;
        }
        None
    }
}
