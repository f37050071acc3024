//! Plugin hooks for the bundler pipeline.
//!
//! A trimmed Rollup-style surface: the pipeline asks each plugin's
//! `resolve_id` in registration order and the first `Some` wins. The two
//! built-in plugins cover the whole resolution policy for a sandboxed
//! build: [`SandboxResolvePlugin`] runs first and maps specifiers into the
//! output tree; [`NotResolvedPlugin`] runs last and turns anything still
//! unresolved into either a silent deferral (runtime built-ins) or a hard
//! build failure.
//!
//! Plugins placed between the two can implement `node_modules`-style
//! default resolution or virtual modules; the core does not need them.

use crate::builtins::is_builtin;
use crate::config::SandboxConfig;
use crate::error::Error;
use crate::resolver::SandboxResolver;
use std::path::PathBuf;
use tracing::debug;

/// Result type for plugin hooks.
pub type HookResult<T> = Result<T, Error>;

/// Context passed to plugin hooks.
#[derive(Debug, Default, Clone)]
pub struct PluginContext {
    /// Working directory of the build.
    pub cwd: PathBuf,
}

impl PluginContext {
    /// Create a new plugin context.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }
}

/// Result of a `resolve_id` hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveIdResult {
    /// Resolved module ID (usually a file path).
    pub id: String,
    /// Whether this module is external (left to the runtime, not bundled).
    pub external: bool,
}

impl ResolveIdResult {
    /// Create a resolved module result.
    pub fn resolved(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external: false,
        }
    }

    /// Create an external module result.
    pub fn external(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external: true,
        }
    }
}

/// A resolution-stage plugin.
///
/// `Ok(None)` from `resolve_id` means "not mine, ask the next plugin";
/// an error halts the build.
pub trait Plugin: Send + Sync {
    /// Plugin name for debugging and error messages.
    fn name(&self) -> &str;

    /// Resolve a module specifier to an ID.
    fn resolve_id(
        &self,
        _specifier: &str,
        _importer: Option<&str>,
        _ctx: &PluginContext,
    ) -> HookResult<Option<ResolveIdResult>> {
        Ok(None)
    }
}

/// An ordered chain of plugins.
pub struct PluginContainer {
    plugins: Vec<Box<dyn Plugin>>,
    ctx: PluginContext,
}

impl PluginContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            plugins: Vec::new(),
            ctx: PluginContext::new(cwd),
        }
    }

    /// Build the standard sandbox chain: resolver first, fallback last.
    #[must_use]
    pub fn sandbox(config: SandboxConfig) -> Self {
        let cwd = config.sandbox_root.clone();
        let mut container = Self::new(cwd);
        container.add(Box::new(SandboxResolvePlugin::new(config)));
        container.add(Box::new(NotResolvedPlugin));
        container
    }

    /// Append a plugin. Registration order is invocation order.
    pub fn add(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Get the context (read-only).
    #[must_use]
    pub fn context(&self) -> &PluginContext {
        &self.ctx
    }

    /// Ask each plugin to resolve, in order; first `Some` wins.
    pub fn resolve_id(
        &self,
        specifier: &str,
        importer: Option<&str>,
    ) -> HookResult<Option<ResolveIdResult>> {
        for plugin in &self.plugins {
            if let Some(result) = plugin.resolve_id(specifier, importer, &self.ctx)? {
                debug!(plugin = plugin.name(), specifier, id = %result.id, "resolved");
                return Ok(Some(result));
            }
        }
        Ok(None)
    }

    /// Escalate a warning surfaced by the surrounding bundle process.
    ///
    /// Always fails: a warning this pipeline cannot classify as harmless
    /// must not ship as a silently ambiguous bundle.
    pub fn on_warning(&self, message: &str) -> Result<(), Error> {
        Err(Error::FatalWarning(message.to_string()))
    }
}

/// Plugin wrapping the sandbox resolver.
///
/// Runs first in the chain; returning `Ok(None)` hands the specifier to
/// whatever default resolution sits behind it.
pub struct SandboxResolvePlugin {
    resolver: SandboxResolver,
}

impl SandboxResolvePlugin {
    /// Create the plugin from a sandbox configuration.
    #[must_use]
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            resolver: SandboxResolver::new(config),
        }
    }

    /// The underlying resolver.
    #[must_use]
    pub fn resolver(&self) -> &SandboxResolver {
        &self.resolver
    }
}

impl Plugin for SandboxResolvePlugin {
    fn name(&self) -> &str {
        "sandbox-resolve"
    }

    fn resolve_id(
        &self,
        specifier: &str,
        importer: Option<&str>,
        _ctx: &PluginContext,
    ) -> HookResult<Option<ResolveIdResult>> {
        Ok(self
            .resolver
            .resolve(specifier, importer)?
            .map(|path| ResolveIdResult::resolved(path.to_string_lossy())))
    }
}

/// Terminal fallback for specifiers nothing else resolved.
///
/// Runtime built-ins are marked external and skipped silently; anything
/// else is a genuinely missing module and halts the build with both the
/// specifier and the importing file in the message.
pub struct NotResolvedPlugin;

impl Plugin for NotResolvedPlugin {
    fn name(&self) -> &str {
        "not-resolved"
    }

    fn resolve_id(
        &self,
        specifier: &str,
        importer: Option<&str>,
        _ctx: &PluginContext,
    ) -> HookResult<Option<ResolveIdResult>> {
        if is_builtin(specifier) {
            debug!(specifier, "deferring built-in to runtime resolution");
            return Ok(Some(ResolveIdResult::external(specifier)));
        }
        Err(Error::UnresolvedImport {
            specifier: specifier.to_string(),
            importer: importer.unwrap_or("<entry>").to_string(),
        })
    }
}
