//! Document visitors: one linear pass per kind, declaration order kept.

use crate::error::Result;
use crate::model::{Catalog, ClassDoc, Document, EnumDoc, LibraryDoc, Method};
use crate::render::types::description_lines;
use crate::render::{entity, header, overload, section, RenderContext};

/// Render a complete stub file for one document.
pub fn render(doc: &Document, ctx: &RenderContext, catalog: &Catalog) -> Result<String> {
    let body = match doc {
        Document::Enum(e) => visit_enum(e, ctx),
        Document::Class(c) => visit_class(c, ctx),
        Document::Library(l) => visit_library(l, ctx, catalog)?,
    };
    Ok(format!("{}\n{}\n", header(doc.name(), doc.kind(), ctx), body))
}

fn tag_lines(ctx: &RenderContext) -> impl Iterator<Item = String> + '_ {
    ctx.tags.iter().map(|t| format!("---{}", t))
}

fn visit_enum(e: &EnumDoc, ctx: &RenderContext) -> String {
    let mut lines = vec![
        format!("---@class {}", e.name),
        format!("---{} (Enum)", e.name),
    ];
    lines.extend(tag_lines(ctx));
    lines.push(format!("{} = {{}}", e.name));

    for (name, constant) in &e.values {
        lines.extend(description_lines(constant.description.as_deref()).map(|d| format!("---{}", d)));
        lines.push(format!("{}.{} = {}", e.name, name, constant.value));
    }

    section("Enum", &lines.join("\n"))
}

fn visit_class(c: &ClassDoc, ctx: &RenderContext) -> String {
    let mut lines = match c.inherits {
        Some(ref base) => vec![format!("---@class {} : {}", c.name, base)],
        None => vec![format!("---@class {}", c.name)],
    };

    for (name, prop) in &c.properties {
        lines.push(entity::property(name, prop, &[]));
    }
    for (name, prop) in &c.static_properties {
        lines.push(entity::property(name, prop, &["Static"]));
    }
    for op in &c.operators {
        lines.push(entity::operator(op));
    }

    lines.push(format!("---{} (Class)", c.name));
    lines.push(format!("{} = {{}}", c.name));

    let constructors: Vec<String> = c
        .constructors
        .iter()
        .map(|cons| entity::constructor(&c.name, cons, &ctx.tags))
        .collect();
    let methods: Vec<String> = c
        .methods
        .iter()
        .map(|m| entity::method(&c.name, m, &ctx.tags, &[]))
        .collect();

    let body = [
        lines.join("\n"),
        section("Constructors", &constructors.join("\n\n")),
        section("Methods", &methods.join("\n\n")),
    ]
    .join("\n\n");

    section("Class", &body)
}

fn visit_library(l: &LibraryDoc, ctx: &RenderContext, catalog: &Catalog) -> Result<String> {
    let head = [
        format!("---@class {}", l.name),
        format!("---{} (Library)", l.name),
        format!("{} = {{}}", l.name),
    ]
    .join("\n");

    let mut methods = Vec::with_capacity(l.methods.len());
    for m in &l.methods {
        let overloads = synthesized_overloads(&l.name, m, catalog)?;
        methods.push(entity::method(&l.name, m, &ctx.tags, &overloads));
    }

    let body = [head, section("Methods", &methods.join("\n\n"))].join("\n\n");
    Ok(section("Library", &body))
}

/// Catalog-driven overloads; only `Events` and `Hooks` have any.
fn synthesized_overloads(library: &str, m: &Method, catalog: &Catalog) -> Result<Vec<String>> {
    match library {
        "Events" => overload::event_overloads(library, m, &catalog.events),
        "Hooks" => overload::hook_overloads(library, m, &catalog.hooks),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumValue, Event, Hook, Operator, OperatorKind, Property, Returns, TypeDesc};
    use crate::render::tests::ctx;

    fn enum_doc() -> Document {
        Document::Enum(EnumDoc {
            name: "Team".to_string(),
            values: [
                ("RED".to_string(), EnumValue { value: 0, description: None }),
                ("BLUE".to_string(), EnumValue { value: 1, description: None }),
            ]
            .into_iter()
            .collect(),
        })
    }

    fn body_of(out: &str) -> &str {
        out.split_once("---@meta\n").map(|(_, b)| b).unwrap()
    }

    #[test]
    fn enum_assigns_constants_in_order() {
        let out = render(&enum_doc(), &ctx(), &Catalog::default()).unwrap();
        assert_eq!(
            body_of(&out),
            "\n--region Enum\n\n---@class Team\n---Team (Enum)\nTeam = {}\nTeam.RED = 0\nTeam.BLUE = 1\n\n--endregion Enum\n"
        );
    }

    #[test]
    fn rendering_is_stable() {
        let a = render(&enum_doc(), &ctx(), &Catalog::default()).unwrap();
        let b = render(&enum_doc(), &ctx(), &Catalog::default()).unwrap();
        assert_eq!(a, b);
    }

    fn vec3() -> ClassDoc {
        let prop = |ty: &str| Property {
            ty: TypeDesc::named(ty),
            read_only: false,
        };
        ClassDoc {
            name: "Vec3".to_string(),
            inherits: Some("Base".to_string()),
            properties: [("x", "float"), ("y", "float"), ("z", "float")]
                .into_iter()
                .map(|(n, t)| (n.to_string(), prop(t)))
                .collect(),
            static_properties: [("zero".to_string(), prop("Vec3"))].into_iter().collect(),
            operators: vec![
                Operator {
                    kind: OperatorKind::Add,
                    rhs: "Vec3".to_string(),
                    returns: "Vec3".to_string(),
                },
                Operator {
                    kind: OperatorKind::Eq,
                    rhs: "Vec3".to_string(),
                    returns: "bool".to_string(),
                },
            ],
            constructors: vec![Default::default()],
            methods: vec![Method {
                name: "Length".to_string(),
                returns: Some(Returns::Single(TypeDesc::named("float"))),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn class_layout() {
        let out = render(&Document::Class(vec3()), &ctx(), &Catalog::default()).unwrap();
        let expected = "
--region Class

---@class Vec3 : Base
---@field x number
---@field y number
---@field z number
---@field zero Vec3 @ Static
---@operator add(Vec3): Vec3
-- WARNING: operator `eq` (Vec3 -> bool) is not supported by the annotation format
---Vec3 (Class)
Vec3 = {}

--region Constructors

---Vec3 constructor
---@return Vec3
function Vec3() end

--endregion Constructors

--region Methods

---@return number
function Vec3:Length() end

--endregion Methods

--endregion Class
";
        assert_eq!(body_of(&out), expected);
    }

    #[test]
    fn class_without_members_keeps_sections() {
        let doc = ClassDoc {
            name: "Empty".to_string(),
            ..Default::default()
        };
        let out = render(&Document::Class(doc), &ctx(), &Catalog::default()).unwrap();
        assert!(out.contains("--region Constructors\n\n--endregion Constructors"));
        assert!(out.contains("--region Methods\n\n--endregion Methods"));
    }

    #[test]
    fn tags_precede_methods() {
        let mut c = ctx();
        c.tags = vec!["`CLIENT ONLY`".to_string()];
        let out = render(&Document::Class(vec3()), &c, &Catalog::default()).unwrap();
        assert!(out.contains("---`CLIENT ONLY`\n---@return number\nfunction Vec3:Length() end"));
        assert!(out.contains("---Vec3 constructor\n---`CLIENT ONLY`\n"));
    }

    #[test]
    fn hooks_library_gets_overloads() {
        let install: Method = serde_yaml::from_str(
            "name: Install\nparams:\n  hookName: {type: string}\n  priority: {type: int}\n  callback: {type: callable}\nreturns: {type: Hook}\n",
        )
        .unwrap();
        let lib = LibraryDoc {
            name: "Hooks".to_string(),
            methods: vec![install],
        };
        let catalog = Catalog {
            events: Vec::new(),
            hooks: vec![serde_yaml::from_str::<Hook>(
                "name: Engine:Update\nparams:\n  dt: {type: float}\nreturns: {type: bool}\n",
            )
            .unwrap()],
        };
        let out = render(&Document::Library(lib), &ctx(), &catalog).unwrap();
        assert!(out.contains("---@class Hooks\n---Hooks (Library)\nHooks = {}\n"));
        assert!(out.contains(
            "---@return Hook\n---@overload fun(self: Hooks, hookName: \"Engine:Update\", priority: integer, callback: fun(hookCtx, dt: number): boolean): Hook\nfunction Hooks:Install(hookName, priority, callback) end"
        ));
    }

    #[test]
    fn other_libraries_ignore_catalog() {
        let subscribe: Method = serde_yaml::from_str(
            "name: Subscribe\nparams:\n  eventName: {type: string}\n  callback: {type: callable}\n",
        )
        .unwrap();
        let lib = LibraryDoc {
            name: "NetEvents".to_string(),
            methods: vec![subscribe],
        };
        let catalog = Catalog {
            events: vec![Event {
                name: "Player:Joined".to_string(),
                params: None,
            }],
            hooks: Vec::new(),
        };
        let out = render(&Document::Library(lib), &ctx(), &catalog).unwrap();
        assert!(!out.contains("@overload"));
    }
}
