//! Data model for YAML documentation, one value per persisted document.
//!
//! Maps are `IndexMap`s so declaration order survives deserialization and
//! is reproduced verbatim in the generated stubs.

use indexmap::IndexMap;
use serde::Deserialize;

/// Ordered `name → value` map as written in the YAML source.
pub type Named<T> = IndexMap<String, T>;

/// A documentation record, dispatched on its `type` key.
#[derive(Debug)]
pub enum Document {
    Class(ClassDoc),
    Library(LibraryDoc),
    Enum(EnumDoc),
}

impl Document {
    pub fn name(&self) -> &str {
        match self {
            Document::Class(c) => &c.name,
            Document::Library(l) => &l.name,
            Document::Enum(e) => &e.name,
        }
    }

    /// The `type` keyword this document was declared with.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Class(_) => "class",
            Document::Library(_) => "library",
            Document::Enum(_) => "enum",
        }
    }
}

/// Shared shape of parameters, properties and return values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDesc {
    #[serde(rename = "type")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nullable: bool,
    /// Backed by a native vector exposed to Lua.
    #[serde(default, rename = "array")]
    pub vector: bool,
    /// Backed by a plain Lua table.
    #[serde(default, rename = "table")]
    pub map: bool,
    #[serde(default, rename = "nestedArray")]
    pub nested_vector: bool,
    #[serde(default, rename = "nestedTable")]
    pub nested_map: bool,
}

impl TypeDesc {
    pub fn named(name: impl Into<String>) -> Self {
        TypeDesc {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    #[serde(flatten)]
    pub ty: TypeDesc,
    /// Literal default value; YAML scalars of any kind are accepted.
    #[serde(default)]
    pub default: Option<serde_yaml::Value>,
    #[serde(default)]
    pub variadic: bool,
    #[serde(default)]
    pub read_only: bool,
}

impl Param {
    /// Default value as the text that appears in annotations.
    pub fn default_text(&self) -> Option<String> {
        match self.default.as_ref()? {
            serde_yaml::Value::Null => None,
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            other => serde_yaml::to_string(other)
                .ok()
                .map(|s| s.trim_end().to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(flatten)]
    pub ty: TypeDesc,
    #[serde(default)]
    pub read_only: bool,
}

/// A method's `returns` key: one descriptor or an ordered list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Returns {
    Single(TypeDesc),
    Multiple(Vec<TypeDesc>),
}

impl Returns {
    pub fn as_slice(&self) -> &[TypeDesc] {
        match self {
            Returns::Single(t) => std::slice::from_ref(t),
            Returns::Multiple(list) => list,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Option<Named<Param>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Option<Named<Param>>,
    #[serde(default)]
    pub returns: Option<Returns>,
}

impl Method {
    pub fn params(&self) -> impl Iterator<Item = (&String, &Param)> {
        self.params.iter().flat_map(|p| p.iter())
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.as_ref()?.get(name)
    }

    pub fn returns(&self) -> &[TypeDesc] {
        self.returns.as_ref().map(Returns::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorKind {
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Eq,
    Lt,
    Gt,
}

impl OperatorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperatorKind::Add => "add",
            OperatorKind::Sub => "sub",
            OperatorKind::Mult => "mult",
            OperatorKind::Div => "div",
            OperatorKind::Mod => "mod",
            OperatorKind::Eq => "eq",
            OperatorKind::Lt => "lt",
            OperatorKind::Gt => "gt",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Operator {
    #[serde(rename = "type")]
    pub kind: OperatorKind,
    pub rhs: String,
    pub returns: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassDoc {
    pub name: String,
    #[serde(default)]
    pub inherits: Option<String>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub properties: Named<Property>,
    #[serde(default, rename = "static")]
    pub static_properties: Named<Property>,
    #[serde(default)]
    pub operators: Vec<Operator>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryDoc {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumValue {
    pub value: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumDoc {
    pub name: String,
    #[serde(default)]
    pub values: Named<EnumValue>,
}

/// An event delivered to `Events:Subscribe` callbacks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub params: Option<Named<Param>>,
}

/// A hook installable through `Hooks:Install`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hook {
    pub name: String,
    #[serde(default)]
    pub params: Option<Named<Param>>,
    #[serde(default)]
    pub returns: Option<Returns>,
}

/// Events and hooks of one component, consulted during overload synthesis.
#[derive(Debug, Default)]
pub struct Catalog {
    pub events: Vec<Event>,
    pub hooks: Vec<Hook>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_flattens_type_fields() {
        let p: Param =
            serde_yaml::from_str("type: float\narray: true\ndefault: 1.5\nreadOnly: true\n")
                .unwrap();
        assert_eq!(p.ty.name, "float");
        assert!(p.ty.vector);
        assert!(p.read_only);
        assert_eq!(p.default_text().as_deref(), Some("1.5"));
    }

    #[test]
    fn returns_accepts_single_or_list() {
        let single: Returns = serde_yaml::from_str("type: bool\n").unwrap();
        assert_eq!(single.as_slice().len(), 1);
        let many: Returns = serde_yaml::from_str("- type: int\n- type: string\n").unwrap();
        assert_eq!(many.as_slice().len(), 2);
    }

    #[test]
    fn class_properties_keep_declaration_order() {
        let yaml = "name: Vec\nproperties:\n  z: {type: float}\n  a: {type: float}\n  m: {type: float}\n";
        let c: ClassDoc = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<_> = c.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn operator_kinds_parse() {
        let op: Operator = serde_yaml::from_str("type: mult\nrhs: float\nreturns: Vec3\n").unwrap();
        assert_eq!(op.kind, OperatorKind::Mult);
    }
}
