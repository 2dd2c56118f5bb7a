//! Structured `---` comments attached to Lua declarations.

use regex::Regex;
use std::sync::LazyLock;

// Comment text as full_moon hands it over: the leading `--` is already gone,
// so `---@param` arrives as `-@param`.
static RE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-@param\s+(\S+)\s+(\S+)(?:\s+(.*))?$").unwrap());
static RE_VARARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-@vararg\s+(\S+)(?:\s+(.*))?$").unwrap());
static RE_CLASS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-@class\s+\S").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocLine {
    Param {
        name: String,
        ty: String,
        description: Option<String>,
    },
    Vararg {
        ty: String,
        description: Option<String>,
    },
    /// A hand-written `---@class` annotation.
    Class,
    /// Free text, without the `---` marker.
    Description(String),
    /// Any other `---@` tag.
    Other,
}

fn description(raw: Option<regex::Match<'_>>) -> Option<String> {
    let text = raw?.as_str().trim();
    let text = text.strip_prefix('@').unwrap_or(text).trim_start();
    (!text.is_empty()).then(|| text.to_string())
}

/// Classify one single-line comment body. Plain `--` comments yield `None`.
pub fn parse_line(comment: &str) -> Option<DocLine> {
    let comment = comment.trim_end();
    if let Some(caps) = RE_PARAM.captures(comment) {
        return Some(DocLine::Param {
            name: caps[1].to_string(),
            ty: caps[2].to_string(),
            description: description(caps.get(3)),
        });
    }
    if let Some(caps) = RE_VARARG.captures(comment) {
        return Some(DocLine::Vararg {
            ty: caps[1].to_string(),
            description: description(caps.get(2)),
        });
    }
    if RE_CLASS.is_match(comment) {
        return Some(DocLine::Class);
    }
    let text = comment.strip_prefix('-')?;
    if text.starts_with('@') {
        Some(DocLine::Other)
    } else {
        Some(DocLine::Description(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_with_type_and_description() {
        assert_eq!(
            parse_line("-@param speed number @ meters per second"),
            Some(DocLine::Param {
                name: "speed".to_string(),
                ty: "number".to_string(),
                description: Some("meters per second".to_string()),
            })
        );
    }

    #[test]
    fn param_without_description() {
        assert_eq!(
            parse_line("-@param name string"),
            Some(DocLine::Param {
                name: "name".to_string(),
                ty: "string".to_string(),
                description: None,
            })
        );
    }

    #[test]
    fn vararg_description_without_at_marker() {
        assert_eq!(
            parse_line("-@vararg integer extra ids"),
            Some(DocLine::Vararg {
                ty: "integer".to_string(),
                description: Some("extra ids".to_string()),
            })
        );
    }

    #[test]
    fn class_and_other_tags() {
        assert_eq!(parse_line("-@class Player : Entity"), Some(DocLine::Class));
        assert_eq!(parse_line("-@return Player"), Some(DocLine::Other));
    }

    #[test]
    fn free_text_keeps_leading_space() {
        assert_eq!(
            parse_line("- Creates a player"),
            Some(DocLine::Description(" Creates a player".to_string()))
        );
    }

    #[test]
    fn plain_comments_are_ignored() {
        assert_eq!(parse_line(" just a note"), None);
    }
}
