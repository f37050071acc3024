//! Node runtime built-in module names.
//!
//! The fallback handler defers these to the runtime's own resolution
//! instead of treating them as missing output files.

/// Built-in module names, sorted for binary search.
///
/// Includes the subpath forms (`fs/promises`) the runtime exposes directly.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Check whether a specifier names a runtime built-in module.
///
/// Accepts both the bare name (`fs`) and the `node:` prefixed form
/// (`node:fs`).
#[must_use]
pub fn is_builtin(specifier: &str) -> bool {
    let name = specifier.strip_prefix("node:").unwrap_or(specifier);
    NODE_BUILTINS.binary_search(&name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_sorted() {
        assert!(NODE_BUILTINS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn bare_names() {
        assert!(is_builtin("fs"));
        assert!(is_builtin("path"));
        assert!(is_builtin("fs/promises"));
    }

    #[test]
    fn node_prefixed() {
        assert!(is_builtin("node:fs"));
        assert!(is_builtin("node:stream/web"));
    }

    #[test]
    fn not_builtins() {
        assert!(!is_builtin("lodash"));
        assert!(!is_builtin("@scope/pkg"));
        assert!(!is_builtin("fs/extra"));
    }
}
