//! YAML document loading.

use crate::error::{Result, StubError};
use crate::model::{Catalog, Document, Event, Hook};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// List the `*.yaml` files directly inside `dir`, sorted. A missing
/// directory yields an empty list.
pub fn yaml_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("*.yaml");
    let mut files: Vec<PathBuf> = match glob::glob(&pattern.to_string_lossy()) {
        Ok(paths) => paths.filter_map(|r| r.ok()).filter(|p| p.is_file()).collect(),
        Err(e) => {
            warn!("invalid glob pattern {}: {}", pattern.display(), e);
            Vec::new()
        }
    };
    files.sort();
    files
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| StubError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_yaml::from_str(content).map_err(|source| StubError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse one documentation file, dispatching on its `type` key.
pub fn parse_document(path: &Path, content: &str) -> Result<Document> {
    let value: serde_yaml::Value = parse(path, content)?;
    let kind = value
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let parsed = match kind.as_str() {
        "class" => serde_yaml::from_value(value).map(Document::Class),
        "library" => serde_yaml::from_value(value).map(Document::Library),
        "enum" => serde_yaml::from_value(value).map(Document::Enum),
        _ => {
            let name = value
                .get("name")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| path.display().to_string());
            return Err(StubError::UnknownKind { name, kind });
        }
    };
    parsed.map_err(|source| StubError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_document(path: &Path) -> Result<Document> {
    parse_document(path, &read(path)?)
}

/// Entries that failed to load, with their file.
pub type LoadErrors = Vec<(PathBuf, StubError)>;

fn load_all<T: DeserializeOwned>(dir: &Path, errors: &mut LoadErrors) -> Vec<T> {
    let mut entries = Vec::new();
    for path in yaml_files(dir) {
        match read(&path).and_then(|content| parse(&path, &content)) {
            Ok(entry) => entries.push(entry),
            Err(e) => errors.push((path, e)),
        }
    }
    entries
}

/// Load the event and hook catalog of one component directory.
///
/// A bad entry is returned as an error and left out of the catalog; the
/// remaining entries still load.
pub fn load_catalog(component_dir: &Path) -> (Catalog, LoadErrors) {
    let mut errors = Vec::new();
    let catalog = Catalog {
        events: load_all::<Event>(&component_dir.join("event"), &mut errors),
        hooks: load_all::<Hook>(&component_dir.join("hook"), &mut errors),
    };
    (catalog, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn dispatches_on_type() {
        let doc = parse_document(Path::new("Team.yaml"), "name: Team\ntype: enum\nvalues:\n  RED: {value: 0}\n").unwrap();
        assert!(matches!(doc, Document::Enum(ref e) if e.values["RED"].value == 0));
        assert_eq!(doc.kind(), "enum");

        let doc = parse_document(Path::new("Net.yaml"), "name: Net\ntype: library\n").unwrap();
        assert!(matches!(doc, Document::Library(_)));
    }

    #[test]
    fn unknown_type_is_structural_error() {
        let err = parse_document(Path::new("x.yaml"), "name: Thing\ntype: widget\n").unwrap_err();
        match err {
            StubError::UnknownKind { name, kind } => {
                assert_eq!(name, "Thing");
                assert_eq!(kind, "widget");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_yaml_names_the_file() {
        let err = parse_document(Path::new("bad.yaml"), "name: [unterminated\n").unwrap_err();
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn document_name_comes_from_content() {
        let doc = parse_document(Path::new("file_name.yaml"), "name: Declared\ntype: class\n").unwrap();
        assert_eq!(doc.name(), "Declared");
    }

    #[test]
    fn catalog_reads_events_and_hooks_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("event")).unwrap();
        fs::write(dir.path().join("event/b.yaml"), "name: B:Second\n").unwrap();
        fs::write(dir.path().join("event/a.yaml"), "name: A:First\nparams:\n  x: {type: int}\n").unwrap();
        fs::write(dir.path().join("event/notes.txt"), "ignored").unwrap();

        let (catalog, errors) = load_catalog(dir.path());
        assert!(errors.is_empty());
        let names: Vec<_> = catalog.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A:First", "B:Second"]);
        assert!(catalog.hooks.is_empty());
    }

    #[test]
    fn bad_catalog_entry_is_reported_and_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("hook")).unwrap();
        fs::write(dir.path().join("hook/a.yaml"), "name: [unterminated\n").unwrap();
        fs::write(dir.path().join("hook/b.yaml"), "name: Engine:Update\n").unwrap();

        let (catalog, errors) = load_catalog(dir.path());
        assert_eq!(catalog.hooks.len(), 1);
        assert_eq!(catalog.hooks[0].name, "Engine:Update");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].0.ends_with("a.yaml"));
    }

    #[test]
    fn directory_names_are_not_glob_patterns() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs [v2]");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("Team.yaml"), "name: Team\ntype: enum\n").unwrap();

        let files = yaml_files(&docs);
        assert_eq!(files, [docs.join("Team.yaml")]);
    }
}
