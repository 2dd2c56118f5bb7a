//! Batch orchestration for both pipelines.
//!
//! Every document or source file is attempted; failures are collected into
//! the [`Report`] instead of aborting the run.

use crate::config::StubsConfig;
use crate::loader;
use crate::lua::{self, render::CodeContext};
use crate::render::{document, RenderContext};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Documentation subdirectories that produce stub files. `event/` and
/// `hook/` only feed the overload catalog.
const DOCUMENT_DIRS: [&str; 2] = ["type", "library"];

#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct Report {
    pub written: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl Report {
    fn record(&mut self, path: &Path, result: Result<PathBuf>) {
        match result {
            Ok(out) => self.written.push(out),
            Err(error) => self.fail(path, error),
        }
    }

    fn fail(&mut self, path: &Path, error: anyhow::Error) {
        error!("{}: {:#}", path.display(), error);
        self.failures.push(Failure {
            path: path.to_path_buf(),
            error,
        });
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

fn write(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

pub struct StubJob<'a> {
    pub docs: &'a Path,
    pub output: &'a Path,
    pub config: &'a StubsConfig,
    pub generated_on: DateTime<Utc>,
}

/// Documentation pipeline: one stub per class, enum and library document.
pub fn generate_stubs(job: &StubJob) -> Report {
    let mut report = Report::default();

    for component in &job.config.components {
        let dir = job.docs.join(component);
        if !dir.is_dir() {
            debug!(component = %component, "no documentation directory");
            continue;
        }

        let (catalog, errors) = loader::load_catalog(&dir);
        for (path, e) in errors {
            report.fail(&path, e.into());
        }
        debug!(
            component = %component,
            events = catalog.events.len(),
            hooks = catalog.hooks.len(),
            "loaded catalog"
        );

        let ctx = RenderContext {
            title: job.config.title.clone(),
            website: job.config.website.clone(),
            component: component.clone(),
            tags: job.config.tags_for(component),
            generated_on: job.generated_on,
        };

        for kind in DOCUMENT_DIRS {
            let out_dir = job.output.join(component).join(kind);
            for path in loader::yaml_files(&dir.join(kind)) {
                let result = stub_document(&path, &out_dir, &ctx, &catalog);
                report.record(&path, result);
            }
        }
    }

    report
}

fn stub_document(
    path: &Path,
    out_dir: &Path,
    ctx: &RenderContext,
    catalog: &crate::model::Catalog,
) -> Result<PathBuf> {
    let doc = loader::load_document(path)?;
    info!("Generating {} code for {}...", doc.kind(), doc.name());
    let text = document::render(&doc, ctx, catalog)?;
    let out = out_dir.join(format!("{}.lua", doc.name()));
    write(&out, &text)?;
    Ok(out)
}

pub struct CodeJob<'a> {
    pub root: &'a Path,
    pub output: &'a Path,
    pub ctx: CodeContext,
}

/// Source-extraction pipeline: one stub per input file, mirrored under
/// the output directory by its path relative to the root.
pub fn generate_code(job: &CodeJob, files: &[PathBuf]) -> Report {
    let mut report = Report::default();
    for path in files {
        let result = code_file(path, job);
        report.record(path, result);
    }
    report
}

/// `path` relative to `root`, comparing canonical forms so that `.` or
/// `..` segments do not matter. Inputs outside the root keep their file name.
fn relative_to(path: &Path, root: &Path) -> PathBuf {
    if let Ok(rel) = path.strip_prefix(root) {
        return rel.to_path_buf();
    }
    if let (Ok(path), Ok(root)) = (fs::canonicalize(path), fs::canonicalize(root)) {
        if let Ok(rel) = path.strip_prefix(&root) {
            return rel.to_path_buf();
        }
    }
    path.file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| path.to_path_buf())
}

fn code_file(path: &Path, job: &CodeJob) -> Result<PathBuf> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let rel = relative_to(path, job.root);
    let text = lua::generate(&rel, &source, &job.ctx)?;
    let out = job.output.join(&rel);
    write(&out, &text)?;
    Ok(out)
}

fn is_lua(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "lua")
}

/// Resolve the Lua inputs of a `code` run. Directories are scanned
/// recursively, anything else is treated as a glob; without inputs the
/// whole root is scanned. Files under `output` are never returned.
pub fn lua_files(root: &Path, inputs: &[String], output: &Path) -> Result<Vec<PathBuf>> {
    let output = fs::canonicalize(output).unwrap_or_else(|_| output.to_path_buf());
    let excluded = |p: &Path| {
        fs::canonicalize(p)
            .map(|c| c.starts_with(&output))
            .unwrap_or(false)
    };

    let scan = |dir: &Path, files: &mut Vec<PathBuf>| {
        for entry in WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !excluded(e.path()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_lua(path) {
                files.push(path.to_path_buf());
            }
        }
    };

    let mut files = Vec::new();
    if inputs.is_empty() {
        scan(root, &mut files);
    }
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            scan(path, &mut files);
            continue;
        }
        if path.is_file() {
            if !excluded(path) {
                files.push(path.to_path_buf());
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(input)
            .with_context(|| format!("invalid glob pattern: {}", input))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && is_lua(p) && !excluded(p))
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", input);
        }
        files.extend(matches);
    }

    files.sort();
    files.dedup();
    Ok(files)
}
