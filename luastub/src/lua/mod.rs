//! Stubs for user-authored Lua classes.
//!
//! Classes are recovered from `class(...)` declarations and their
//! `Name:__init` bodies, then rendered as constructor-only stubs so that
//! other files can call `Name(...)` with checked arguments.

pub mod doc_comment;
pub mod extract;
pub mod render;

use crate::error::Result;
use crate::model::Named;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaParam {
    pub name: String,
    pub ty: String,
    pub description: Option<String>,
    pub variadic: bool,
}

impl LuaParam {
    /// A parameter straight from the signature, before any comment overlay.
    pub fn untyped(name: &str, variadic: bool) -> Self {
        Self {
            name: name.to_string(),
            ty: "any".to_string(),
            description: None,
            variadic,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LuaConstructor {
    pub description: Vec<String>,
    pub params: Vec<LuaParam>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LuaClass {
    pub name: String,
    pub inherits: Option<String>,
    pub constructors: Vec<LuaConstructor>,
    /// Assigned to a non-local variable.
    pub global: bool,
    /// Preceded by a hand-written `---@class` annotation.
    pub has_comment: bool,
}

/// Parse `source` and render the stub file for it.
pub fn generate(label: &Path, source: &str, ctx: &render::CodeContext) -> Result<String> {
    let classes: Named<LuaClass> = extract::extract(label, source)?;
    Ok(render::render_file(label, &classes, ctx))
}
