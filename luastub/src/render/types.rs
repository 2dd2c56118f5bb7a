//! Type-string and descriptive-comment rendering.
//!
//! Both functions are total: every descriptor maps to exactly one string.

use crate::model::TypeDesc;

/// Remap a documentation primitive to its annotation name.
///
/// Anything outside the fixed table is a class or enum reference and
/// passes through unchanged.
pub fn lua_type(name: &str) -> &str {
    match name {
        "int" => "integer",
        "float" => "number",
        "bool" => "boolean",
        "callable" => "function",
        other => other,
    }
}

/// Render the annotation type expression for a descriptor.
///
/// `has_default` marks default-bearing params, which are nilable even when
/// the descriptor itself is not flagged `nullable`.
pub fn type_string(t: &TypeDesc, has_default: bool) -> String {
    let base = lua_type(&t.name);

    // First matching container shape wins.
    let mut out = if t.vector && t.nested_vector {
        format!("vector|{base}[][]")
    } else if t.vector && t.nested_map {
        format!("vector|table<integer, {base}>[]")
    } else if t.vector {
        format!("vector|{base}[]")
    } else if t.map && t.nested_vector {
        format!("table<integer, vector|{base}[]>")
    } else if t.map && t.nested_map {
        format!("table<integer, table<integer, {base}>>")
    } else if t.map {
        format!("table<integer, {base}>")
    } else {
        base.to_string()
    };

    if t.nullable || has_default {
        out.push_str("|nil");
    }
    out
}

/// Extra inputs for [`type_comment`] that live outside the descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommentOpts<'a> {
    /// Fragments placed before everything else (e.g. `Static`).
    pub leading: &'a [&'a str],
    pub read_only: bool,
    pub default: Option<&'a str>,
}

/// Render the trailing ` @ a | b | c` comment, or an empty string.
pub fn type_comment(t: &TypeDesc, opts: CommentOpts<'_>) -> String {
    let mut fragments: Vec<String> = opts.leading.iter().map(|s| s.to_string()).collect();

    if opts.read_only {
        fragments.push("**Read Only**".to_string());
    }

    if t.vector {
        fragments.push(format!("**Vector Type: `{}`**", t.name));
        fragments.push("**Cannot be instantiated directly**".to_string());
    }

    if let Some(default) = opts.default {
        fragments.push(format!("Default: {default}"));
    }

    fragments.extend(description_lines(t.description.as_deref()).map(str::to_string));

    if fragments.is_empty() {
        String::new()
    } else {
        format!(" @ {}", fragments.join(" | "))
    }
}

/// Non-blank lines of a free-text description, trimmed.
pub fn description_lines(description: Option<&str>) -> impl Iterator<Item = &str> {
    description
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(name: &str) -> TypeDesc {
        TypeDesc::named(name)
    }

    #[test]
    fn primitives_remap() {
        assert_eq!(lua_type("int"), "integer");
        assert_eq!(lua_type("float"), "number");
        assert_eq!(lua_type("bool"), "boolean");
        assert_eq!(lua_type("callable"), "function");
    }

    #[test]
    fn other_names_pass_through() {
        for name in ["string", "Vec3", "Entity", "integer", "Float", ""] {
            assert_eq!(lua_type(name), name);
        }
    }

    #[test]
    fn container_precedence() {
        let cases: [(bool, bool, bool, bool, &str); 7] = [
            (true, false, true, false, "vector|number[][]"),
            (true, false, false, true, "vector|table<integer, number>[]"),
            (true, false, false, false, "vector|number[]"),
            (false, true, true, false, "table<integer, vector|number[]>"),
            (false, true, false, true, "table<integer, table<integer, number>>"),
            (false, true, false, false, "table<integer, number>"),
            (false, false, false, false, "number"),
        ];
        for (vector, map, nested_vector, nested_map, expected) in cases {
            let t = TypeDesc {
                vector,
                map,
                nested_vector,
                nested_map,
                ..desc("float")
            };
            assert_eq!(type_string(&t, false), expected);
        }
    }

    #[test]
    fn vector_beats_map_when_both_set() {
        let t = TypeDesc {
            vector: true,
            map: true,
            ..desc("int")
        };
        assert_eq!(type_string(&t, false), "vector|integer[]");
    }

    #[test]
    fn nullable_or_default_is_nilable() {
        let t = TypeDesc {
            nullable: true,
            ..desc("string")
        };
        assert_eq!(type_string(&t, false), "string|nil");
        assert_eq!(type_string(&desc("string"), true), "string|nil");
    }

    #[test]
    fn comment_fragment_order() {
        let t = TypeDesc {
            vector: true,
            description: Some("First line\n\n  Second line  \n".to_string()),
            ..desc("Entity")
        };
        let out = type_comment(
            &t,
            CommentOpts {
                leading: &["Static"],
                read_only: true,
                default: Some("nil"),
            },
        );
        assert_eq!(
            out,
            " @ Static | **Read Only** | **Vector Type: `Entity`** | **Cannot be instantiated directly** | Default: nil | First line | Second line"
        );
    }

    #[test]
    fn empty_comment_has_no_separator() {
        assert_eq!(type_comment(&desc("int"), CommentOpts::default()), "");
    }
}
