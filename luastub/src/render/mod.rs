//! Stub rendering: shared layout helpers and the per-kind visitor.

pub mod document;
pub mod entity;
pub mod overload;
pub mod types;

use chrono::{DateTime, Utc};

/// Everything a document render needs besides the document itself.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Tool name printed in the header.
    pub title: String,
    pub website: Option<String>,
    /// Component directory name, e.g. `server`.
    pub component: String,
    /// Extra `---` lines placed on constructors, methods and enums.
    pub tags: Vec<String>,
    pub generated_on: DateTime<Utc>,
}

impl RenderContext {
    /// Component name as shown to readers: `server` → `Server`.
    pub fn component_label(&self) -> String {
        let mut chars = self.component.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Header block for documentation-driven stubs.
pub fn header(name: &str, kind: &str, ctx: &RenderContext) -> String {
    let mut lines = vec![
        "--[[".to_string(),
        format!("    {}", ctx.title),
        format!("    Type: {} ({} {})", name, ctx.component_label(), kind),
    ];
    if let Some(ref website) = ctx.website {
        lines.push(format!("    Website: {}", website));
    }
    lines.push(format!("    Generated on: {}", timestamp(&ctx.generated_on)));
    lines.push("--]]".to_string());
    lines.push(String::new());
    lines.push("---@meta".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Wrap `body` in a named `--region` block.
pub fn section(name: &str, body: &str) -> String {
    if body.is_empty() {
        format!("--region {name}\n\n--endregion {name}")
    } else {
        format!("--region {name}\n\n{body}\n\n--endregion {name}")
    }
}
