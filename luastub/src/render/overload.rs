//! Overload synthesis for the `Events` and `Hooks` libraries.
//!
//! `Events:Subscribe` and `Hooks:Install` take a name plus a callback whose
//! signature depends on that name. For every catalog entry we emit one
//! `---@overload` narrowing the name to a string literal and spelling out
//! the matching callback type, so the analyzer can check handlers.

use crate::error::{Result, StubError};
use crate::model::{Event, Hook, Method, Param, TypeDesc};
use crate::render::types::type_string;
use tracing::{debug, warn};

/// A `fun(...)` type under construction.
#[derive(Debug, Default)]
pub struct FunctionType {
    /// Used in error messages only.
    pub name: String,
    pub params: Vec<(String, FnParam)>,
    pub returns: Vec<TypeDesc>,
}

#[derive(Debug)]
pub enum FnParam {
    /// A documented value, rendered through the type-string renderer.
    Value(Param),
    /// A string literal type such as `"Player:Joined"`.
    Literal(String),
    /// A nested callable, expanded recursively.
    Function(FunctionType),
    /// A bare name with no annotation.
    Untyped,
}

impl FunctionType {
    fn push(&mut self, name: &str, param: FnParam) {
        self.params.push((name.to_string(), param));
    }
}

/// Render `fun(a: T, cb: fun(x: U): V): W`.
pub fn function_type(f: &FunctionType) -> Result<String> {
    let mut params = Vec::with_capacity(f.params.len());
    for (name, param) in &f.params {
        let rendered = match param {
            FnParam::Value(p) => {
                let ty = type_string(&p.ty, p.default_text().is_some());
                if p.variadic {
                    format!("...: {}", ty)
                } else {
                    format!("{}: {}", name, ty)
                }
            }
            FnParam::Literal(text) => format!("{}: \"{}\"", name, text),
            FnParam::Function(inner) => format!("{}: {}", name, function_type(inner)?),
            FnParam::Untyped => name.clone(),
        };
        params.push(rendered);
    }

    let returns = match f.returns.as_slice() {
        [] => String::new(),
        [single] => format!(": {}", type_string(single, false)),
        _ => {
            return Err(StubError::MultipleReturns {
                name: f.name.clone(),
            })
        }
    };

    Ok(format!("fun({}){}", params.join(", "), returns))
}

fn value(p: &Param) -> FnParam {
    FnParam::Value(p.clone())
}

fn self_param(library: &str) -> FnParam {
    FnParam::Value(Param {
        ty: TypeDesc::named(library),
        ..Default::default()
    })
}

/// One overload per event for `Events:Subscribe`; other methods get none.
pub fn event_overloads(library: &str, method: &Method, events: &[Event]) -> Result<Vec<String>> {
    if method.name != "Subscribe" {
        return Ok(Vec::new());
    }
    if method.param("eventName").is_none() || method.param("callback").is_none() {
        debug!(library, method = %method.name, "missing eventName/callback, no event overloads");
        return Ok(Vec::new());
    }
    let context = method.param("context");

    let mut lines = Vec::with_capacity(events.len());
    for event in events {
        let mut callback = FunctionType {
            name: format!("{} callback", event.name),
            ..Default::default()
        };
        if context.is_some() {
            callback.push("userData", FnParam::Untyped);
        }
        for (name, p) in event.params.iter().flat_map(|p| p.iter()) {
            callback.push(name, value(p));
        }

        let mut overload = FunctionType {
            name: format!("{}:{}", library, method.name),
            returns: method.returns().to_vec(),
            ..Default::default()
        };
        overload.push("self", self_param(library));
        overload.push("eventName", FnParam::Literal(event.name.clone()));
        if let Some(ctx) = context {
            overload.push("context", value(ctx));
        }
        overload.push("callback", FnParam::Function(callback));

        lines.push(format!("---@overload {}", function_type(&overload)?));
    }
    Ok(lines)
}

/// One overload per hook for `Hooks:Install`; other methods get none.
///
/// Install's own parameters keep their declared positions; `hookName`
/// becomes the literal and `callback` the hook-specific function type.
pub fn hook_overloads(library: &str, method: &Method, hooks: &[Hook]) -> Result<Vec<String>> {
    if method.name != "Install" {
        return Ok(Vec::new());
    }
    if method.param("hookName").is_none() || method.param("callback").is_none() {
        debug!(library, method = %method.name, "missing hookName/callback, no hook overloads");
        return Ok(Vec::new());
    }

    let mut lines = Vec::with_capacity(hooks.len());
    for hook in hooks {
        let hook_returns = hook.returns.as_ref().map(|r| r.as_slice()).unwrap_or_default();
        if hook_returns.len() > 1 {
            warn!(library, hook = %hook.name, "multiple return values are not supported, overload skipped");
            continue;
        }

        let mut overload = FunctionType {
            name: format!("{}:{}", library, method.name),
            returns: method.returns().to_vec(),
            ..Default::default()
        };
        overload.push("self", self_param(library));
        for (name, p) in method.params() {
            let param = match name.as_str() {
                "hookName" => FnParam::Literal(hook.name.clone()),
                "callback" => {
                    let mut callback = FunctionType {
                        name: format!("hook {}", hook.name),
                        returns: hook_returns.to_vec(),
                        ..Default::default()
                    };
                    callback.push("hookCtx", FnParam::Untyped);
                    for (arg, hp) in hook.params.iter().flat_map(|p| p.iter()) {
                        callback.push(arg, value(hp));
                    }
                    FnParam::Function(callback)
                }
                _ => value(p),
            };
            overload.push(name, param);
        }

        lines.push(format!("---@overload {}", function_type(&overload)?));
    }
    Ok(lines)
}
