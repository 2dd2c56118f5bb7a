use super::{LuaClass, LuaConstructor};
use crate::model::Named;
use crate::render::{section, timestamp};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct CodeContext {
    pub title: String,
    /// Emit classes that are not bound to a global variable.
    pub force_global: bool,
    pub generated_on: DateTime<Utc>,
}

pub fn header(label: &Path, ctx: &CodeContext) -> String {
    [
        "--[[".to_string(),
        format!("    {} - Intermediate Lua binding", ctx.title),
        format!("    Type: {}", label.display()),
        format!("    Generated on: {}", timestamp(&ctx.generated_on)),
        "--]]".to_string(),
        String::new(),
        "---@meta".to_string(),
        String::new(),
    ]
    .join("\n")
}

fn constructor(class: &str, c: &LuaConstructor) -> String {
    let mut lines: Vec<String> = c.description.iter().map(|d| format!("---{}", d)).collect();
    for p in &c.params {
        let mut line = if p.variadic {
            format!("---@vararg {}", p.ty)
        } else {
            format!("---@param {} {}", p.name, p.ty)
        };
        if let Some(ref desc) = p.description {
            line.push_str(&format!(" @ {}", desc));
        }
        lines.push(line);
    }
    let args: Vec<&str> = c.params.iter().map(|p| p.name.as_str()).collect();
    lines.push(format!("---@return {}", class));
    lines.push(format!("function {}({}) end", class, args.join(", ")));
    lines.join("\n")
}

/// Render one class, or `None` when the policy keeps it out.
pub fn render_class(c: &LuaClass, force_global: bool) -> Option<String> {
    if !c.global && !force_global {
        debug!(class = %c.name, "not bound to a global, skipped");
        return None;
    }

    let mut blocks = Vec::new();
    if !c.has_comment {
        let head = match c.inherits {
            Some(ref base) => format!("---@class {} : {}", c.name, base),
            None => format!("---@class {}", c.name),
        };
        let local = if c.global { "" } else { "local " };
        blocks.push(format!("{}\n{}{} = {{}}", head, local, c.name));
    }
    blocks.extend(c.constructors.iter().map(|cons| constructor(&c.name, cons)));

    Some(section("Class", &blocks.join("\n\n")))
}

/// Full stub file for the classes of one source file.
pub fn render_file(label: &Path, classes: &Named<LuaClass>, ctx: &CodeContext) -> String {
    let sections: Vec<String> = classes
        .values()
        .filter_map(|c| {
            let section = render_class(c, ctx.force_global)?;
            info!("Generating code for class {} in {}...", c.name, label.display());
            Some(section)
        })
        .collect();

    let head = header(label, ctx);
    if sections.is_empty() {
        head
    } else {
        format!("{}\n{}\n", head, sections.join("\n\n"))
    }
}
