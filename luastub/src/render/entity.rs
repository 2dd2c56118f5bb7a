//! Per-entity renderers: one annotation line, or a block for callables.

use crate::model::{Constructor, Method, Operator, OperatorKind, Param, Property, TypeDesc};
use crate::render::types::{description_lines, lua_type, type_comment, type_string, CommentOpts};
use tracing::warn;

pub fn property(name: &str, p: &Property, leading: &[&str]) -> String {
    let comment = type_comment(
        &p.ty,
        CommentOpts {
            leading,
            read_only: p.read_only,
            default: None,
        },
    );
    format!("---@field {} {}{}", name, type_string(&p.ty, false), comment)
}

pub fn param(name: &str, p: &Param) -> String {
    let default = p.default_text();
    let ty = type_string(&p.ty, default.is_some());
    let comment = type_comment(
        &p.ty,
        CommentOpts {
            leading: &[],
            read_only: p.read_only,
            default: default.as_deref(),
        },
    );
    if p.variadic {
        format!("---@vararg {}{}", ty, comment)
    } else {
        format!("---@param {} {}{}", name, ty, comment)
    }
}

/// One `---@return` line per value, in declaration order.
pub fn returns(values: &[TypeDesc]) -> Vec<String> {
    values
        .iter()
        .map(|r| {
            format!(
                "---@return {}{}",
                type_string(r, false),
                type_comment(r, CommentOpts::default())
            )
        })
        .collect()
}

/// Render an operator annotation, or a warning comment for comparison kinds.
pub fn operator(op: &Operator) -> String {
    let keyword = match op.kind {
        OperatorKind::Add => "add",
        OperatorKind::Sub => "sub",
        OperatorKind::Mult => "mul",
        OperatorKind::Div => "div",
        OperatorKind::Mod => "mod",
        OperatorKind::Eq | OperatorKind::Lt | OperatorKind::Gt => {
            warn!(operator = op.kind.as_str(), "operator has no annotation form");
            return format!(
                "-- WARNING: operator `{}` ({} -> {}) is not supported by the annotation format",
                op.kind.as_str(),
                op.rhs,
                op.returns
            );
        }
    };
    format!(
        "---@operator {}({}): {}",
        keyword,
        lua_type(&op.rhs),
        lua_type(&op.returns)
    )
}

/// Argument list of a stub: declared names, `...` for the variadic one.
pub fn stub_args<'a>(params: impl IntoIterator<Item = (&'a String, &'a Param)>) -> String {
    params
        .into_iter()
        .map(|(name, p)| if p.variadic { "..." } else { name.as_str() })
        .collect::<Vec<_>>()
        .join(", ")
}

fn comment_lines<'a>(lines: &mut Vec<String>, text: impl IntoIterator<Item = &'a str>) {
    lines.extend(text.into_iter().map(|s| format!("---{}", s)));
}

pub fn constructor(class: &str, c: &Constructor, tags: &[String]) -> String {
    let mut lines = vec![format!("---{} constructor", class)];
    comment_lines(&mut lines, tags.iter().map(String::as_str));
    comment_lines(&mut lines, description_lines(c.description.as_deref()));

    let params: Vec<_> = c.params.iter().flat_map(|p| p.iter()).collect();
    for (name, p) in &params {
        lines.push(param(name, p));
    }

    lines.extend(returns(std::slice::from_ref(&TypeDesc::named(class))));
    lines.push(format!(
        "function {}({}) end",
        class,
        stub_args(params.iter().copied())
    ));
    lines.join("\n")
}

/// Render a method under `owner`, with `overloads` placed right above the stub.
pub fn method(owner: &str, m: &Method, tags: &[String], overloads: &[String]) -> String {
    let mut lines = Vec::new();
    comment_lines(&mut lines, tags.iter().map(String::as_str));
    comment_lines(&mut lines, description_lines(m.description.as_deref()));

    for (name, p) in m.params() {
        lines.push(param(name, p));
    }
    lines.extend(returns(m.returns()));
    lines.extend(overloads.iter().cloned());

    lines.push(format!(
        "function {}:{}({}) end",
        owner,
        m.name,
        stub_args(m.params())
    ));
    lines.join("\n")
}

/// Build a `Named<Param>` from `(name, param)` pairs, keeping order.
#[cfg(test)]
pub(crate) fn named(pairs: &[(&str, Param)]) -> crate::model::Named<Param> {
    pairs
        .iter()
        .map(|(n, p)| (n.to_string(), p.clone()))
        .collect()
}
