//! Sandbox import resolution.
//!
//! Maps import specifiers to staged build-output files inside a hermetic
//! sandbox, where every compiled module has been moved under a uniform
//! output root and source-relative locality is gone. Mirrors compile-time
//! path mapping at bundle time.
//!
//! ## Specifier Types
//!
//! - Relative: `./utils`, `../lib/foo`
//! - Fully qualified: `/sandbox/out/app/src/main.js`
//! - Bare: alias from the mapping table, workspace path, or package name
//!
//! Precedence is strict and first-success-wins: fully-qualified file,
//! relative, mapping table, workspace-relative, then unresolved. Every miss
//! short of a hard error is soft; the caller's fallback decides what an
//! unresolved specifier means.

use crate::config::SandboxConfig;
use crate::error::Error;
use crate::paths;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions probed against staged output, in order.
///
/// The sandbox holds compiled output only, so TypeScript sources are never
/// probed. Type-declaration targets in the mapping table have their `.d.ts`
/// suffix stripped before probing.
pub const OUTPUT_EXTENSIONS: &[&str] = &[".js", ".mjs", ".json"];

/// Index files probed when a candidate is a directory.
const INDEX_FILES: &[&str] = &["index.js", "index.mjs", "index.json"];

/// Strip a trailing type-declaration suffix from a mapping target.
///
/// Mapping targets come from type-checking configuration and may point at
/// `index.d.ts`; at bundle time only the compiled `.js` exists next to it.
fn strip_declaration_suffix(target: &str) -> &str {
    target.strip_suffix(".d.ts").unwrap_or(target)
}

/// Sandbox import resolver.
///
/// Pure and stateless across calls: the configuration is read-only and the
/// only side effects are read-only filesystem probes (plus debug logging,
/// which never changes an outcome).
#[derive(Debug, Clone)]
pub struct SandboxResolver {
    config: SandboxConfig,
}

impl SandboxResolver {
    /// Create a resolver over an immutable sandbox configuration.
    #[must_use]
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    /// The configuration this resolver was built with.
    #[must_use]
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Resolve an import specifier against the sandbox.
    ///
    /// Returns `Ok(Some(path))` on a match, `Ok(None)` when no strategy
    /// matched (the next resolver in the pipeline gets its turn), and an
    /// error only for a relative import with no importer, which is a fatal
    /// configuration problem rather than a lookup miss.
    pub fn resolve(
        &self,
        specifier: &str,
        importer: Option<&str>,
    ) -> Result<Option<PathBuf>, Error> {
        // A prior pipeline stage may have fully resolved the path already.
        if Path::new(specifier).is_file() {
            debug!(specifier, "resolved fully qualified");
            return Ok(Some(PathBuf::from(specifier)));
        }

        debug!(specifier, importer, "resolving");

        if specifier.starts_with("./") || specifier.starts_with("../") {
            let importer = match importer.filter(|i| !i.is_empty()) {
                Some(i) => i,
                None => return Err(Error::RelativeWithoutImporter),
            };
            if let Some(found) = self.resolve_relative(specifier, importer) {
                return Ok(Some(found));
            }
        }

        if let Some(found) = self.resolve_mapped(specifier) {
            return Ok(Some(found));
        }

        if let Some(found) = self.resolve_workspace(specifier) {
            return Ok(Some(found));
        }

        debug!(specifier, "unresolved, deferring to the rest of the pipeline");
        Ok(None)
    }

    /// Resolve a `./` or `../` specifier relative to its importer.
    ///
    /// The importer's directory is re-expressed relative to the output root
    /// when it lies inside it; an importer outside the output root keeps its
    /// raw directory, which the probe then grafts back under the root.
    fn resolve_relative(&self, specifier: &str, importer: &str) -> Option<PathBuf> {
        let importer_dir = Path::new(importer).parent().unwrap_or(Path::new(""));
        let rel = paths::relative_to(&self.output_base(), importer_dir);
        let dir = if paths::escapes(&rel) {
            importer_dir.to_path_buf()
        } else {
            rel
        };
        self.resolve_in_output_root(&dir.join(specifier))
    }

    /// Scan the mapping table in insertion order.
    ///
    /// An entry matches on the exact alias or on `alias + '/'`. The first
    /// entry whose spliced target actually resolves wins; a prefix match
    /// whose target file is missing falls through to the next entry. An
    /// earlier short alias can therefore shadow a later, more specific one
    /// when its target happens to exist at the wrong subpath; that ordering
    /// is part of the contract.
    fn resolve_mapped(&self, specifier: &str) -> Option<PathBuf> {
        for (alias, target) in self.config.module_mappings.iter() {
            let rest = if specifier == alias {
                ""
            } else {
                match specifier
                    .strip_prefix(alias)
                    .and_then(|r| r.strip_prefix('/'))
                {
                    Some(r) => r,
                    None => continue,
                }
            };

            let target = strip_declaration_suffix(target);
            let candidate = if rest.is_empty() {
                PathBuf::from(target)
            } else {
                Path::new(target).join(rest)
            };
            debug!(specifier, alias, candidate = %candidate.display(), "module mapping matched");
            if let Some(found) = self.resolve_in_output_root(&candidate) {
                return Some(found);
            }
        }
        None
    }

    /// Resolve a bare specifier as a workspace path.
    ///
    /// A specifier under the primary workspace name is stripped to its
    /// workspace-relative part; one that escapes belongs to an external
    /// workspace, whose name is a real directory under the output root,
    /// so the raw specifier is probed instead.
    fn resolve_workspace(&self, specifier: &str) -> Option<PathBuf> {
        let rel = paths::relative_to(
            Path::new(&self.config.workspace_name),
            Path::new(specifier),
        );
        let candidate = if paths::escapes(&rel) {
            PathBuf::from(specifier)
        } else {
            rel
        };
        self.resolve_in_output_root(&candidate)
    }

    /// Probe a candidate path under `sandbox_root/output_root`.
    ///
    /// Standard module-resolution semantics against staged output: exact
    /// file, extension probing, then index files for directories. A miss is
    /// soft.
    fn resolve_in_output_root(&self, candidate: &Path) -> Option<PathBuf> {
        let target = paths::join_under(&self.output_base(), candidate);
        debug!(candidate = %candidate.display(), target = %target.display(), "trying candidate under output root");
        probe(&target)
    }

    fn output_base(&self) -> PathBuf {
        self.config.sandbox_root.join(&self.config.output_root)
    }
}

/// Probe a single location: exact file, extensions, directory index files.
fn probe(target: &Path) -> Option<PathBuf> {
    if target.is_file() {
        return dunce::canonicalize(target).ok();
    }

    for ext in OUTPUT_EXTENSIONS {
        // Appended at the OsString level; `display()` would mangle
        // non-UTF-8 path bytes.
        let mut with_ext = target.as_os_str().to_os_string();
        with_ext.push(ext);
        let with_ext = PathBuf::from(with_ext);
        if with_ext.is_file() {
            return dunce::canonicalize(with_ext).ok();
        }
    }

    if target.is_dir() {
        for index in INDEX_FILES {
            let index_path = target.join(index);
            if index_path.is_file() {
                return dunce::canonicalize(index_path).ok();
            }
        }
    }

    None
}
