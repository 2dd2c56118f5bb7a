//! `luastub.toml`, the optional project configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_FILE: &str = "luastub.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub stubs: StubsConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StubsConfig {
    /// Shown on the first line of every header.
    pub title: String,
    pub website: Option<String>,
    /// Component directories scanned under the docs root, in order.
    pub components: Vec<String>,
    /// Component name → extra `---` line.
    pub tags: BTreeMap<String, String>,
}

impl Default for StubsConfig {
    fn default() -> Self {
        Self {
            title: "Lua bindings".to_string(),
            website: None,
            components: ["shared", "server", "client"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            tags: BTreeMap::new(),
        }
    }
}

impl StubsConfig {
    pub fn tags_for(&self, component: &str) -> Vec<String> {
        self.tags.get(component).cloned().into_iter().collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    pub disable: bool,
    pub force_global: bool,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `explicit` if given (it must exist), otherwise `luastub.toml`
    /// in the working directory when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p,
            None if Path::new(DEFAULT_FILE).is_file() => Path::new(DEFAULT_FILE),
            None => return Ok(Self::default()),
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}
