//! Sandbox resolution configuration.
//!
//! Built once per bundle invocation by an external templating step and
//! immutable afterwards. The JSON field names match what that step emits.

use crate::error::Error;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Ordered alias → output-location table.
///
/// Match order is insertion order, which in turn is the key order of the
/// JSON object the templating step produced. A plain map type would lose
/// that, so entries live in a `Vec` with a hand-rolled serde impl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleMappings {
    entries: Vec<(String, String)>,
}

impl ModuleMappings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alias → target entry.
    pub fn push(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.entries.push((alias.into(), target.into()));
    }

    /// Builder-style `push`.
    #[must_use]
    pub fn with(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.push(alias, target);
        self
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ModuleMappings {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for ModuleMappings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ModuleMappings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingsVisitor;

        impl<'de> Visitor<'de> for MappingsVisitor {
            type Value = ModuleMappings;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of module aliases to output paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    entries.push((k, v));
                }
                Ok(ModuleMappings { entries })
            }
        }

        deserializer.deserialize_map(MappingsVisitor)
    }
}

/// Configuration for sandbox resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxConfig {
    /// Working directory of the sandboxed build.
    #[serde(default = "default_sandbox_root")]
    pub sandbox_root: PathBuf,

    /// Subpath under the sandbox root where compiled output is staged.
    #[serde(alias = "rootDir")]
    pub output_root: String,

    /// Name of the primary workspace; distinguishes own-workspace imports
    /// from already-workspace-qualified ones.
    pub workspace_name: String,

    /// Ordered alias → output-location table.
    #[serde(default)]
    pub module_mappings: ModuleMappings,

    /// Banner text carried through to the packaging stage, never resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

fn default_sandbox_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            sandbox_root: default_sandbox_root(),
            output_root: String::new(),
            workspace_name: String::new(),
            module_mappings: ModuleMappings::new(),
            banner: None,
        }
    }
}

impl SandboxConfig {
    /// Create a config rooted at the given sandbox directory.
    #[must_use]
    pub fn new(sandbox_root: PathBuf) -> Self {
        Self {
            sandbox_root,
            ..Default::default()
        }
    }

    /// Set the output root subpath.
    #[must_use]
    pub fn with_output_root(mut self, output_root: impl Into<String>) -> Self {
        self.output_root = output_root.into();
        self
    }

    /// Set the primary workspace name.
    #[must_use]
    pub fn with_workspace_name(mut self, name: impl Into<String>) -> Self {
        self.workspace_name = name.into();
        self
    }

    /// Set the mapping table.
    #[must_use]
    pub fn with_module_mappings(mut self, mappings: ModuleMappings) -> Self {
        self.module_mappings = mappings;
        self
    }

    /// Set the pass-through banner text.
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// Load a config from a JSON file produced by the templating step.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappings_preserve_insertion_order() {
        let json = r#"{"@foo": "libs/foo", "@foo/bar": "libs/bar", "aaa": "libs/aaa"}"#;
        let mappings: ModuleMappings = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = mappings.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["@foo", "@foo/bar", "aaa"]);
    }

    #[test]
    fn mappings_round_trip() {
        let mappings = ModuleMappings::new()
            .with("@app", "app")
            .with("@lib", "libs/lib/index.d.ts");
        let json = serde_json::to_string(&mappings).unwrap();
        let back: ModuleMappings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mappings);
    }

    #[test]
    fn config_from_templated_json() {
        let json = r#"{
            "rootDir": "bin/app.es6",
            "workspaceName": "myworkspace",
            "moduleMappings": {"@app/core": "app/core/index.d.ts"}
        }"#;
        let config: SandboxConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.output_root, "bin/app.es6");
        assert_eq!(config.workspace_name, "myworkspace");
        assert_eq!(config.module_mappings.len(), 1);
        assert!(config.banner.is_none());
    }

    #[test]
    fn builder_chain() {
        let config = SandboxConfig::new(PathBuf::from("/sandbox"))
            .with_output_root("out")
            .with_workspace_name("app")
            .with_banner("/* bundled */");
        assert_eq!(config.sandbox_root, PathBuf::from("/sandbox"));
        assert_eq!(config.output_root, "out");
        assert_eq!(config.banner.as_deref(), Some("/* bundled */"));
    }
}
