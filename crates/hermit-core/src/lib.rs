#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Core library for hermit: deterministic module resolution for bundler
//! pipelines running inside hermetic, sandboxed build trees.
//!
//! The sandbox stages every compiled module under a uniform output root,
//! so the usual locality between a source file and its imports is gone.
//! [`SandboxResolver`] reconstructs it: relative imports, an ordered
//! alias mapping table, and workspace-qualified paths all land back on
//! staged output files. [`PluginContainer::sandbox`] wires the resolver
//! and its terminal fallback into a Rollup-style `resolve_id` chain.

pub mod builtins;
pub mod config;
pub mod error;
pub mod paths;
pub mod plugin;
pub mod resolver;

pub use builtins::is_builtin;
pub use config::{ModuleMappings, SandboxConfig};
pub use error::Error;
pub use plugin::{
    HookResult, NotResolvedPlugin, Plugin, PluginContainer, PluginContext, ResolveIdResult,
    SandboxResolvePlugin,
};
pub use resolver::{SandboxResolver, OUTPUT_EXTENSIONS};

/// Crate version, stamped into CLI output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
