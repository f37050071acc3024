#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod logging;

use clap::Parser;
use hermit_core::{PluginContainer, SandboxConfig};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hermit")]
#[command(author, version, about = "Resolve imports against a hermetic sandbox layout", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted log lines to stderr
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve a single import specifier through the sandbox plugin chain
    Resolve {
        /// The import specifier (e.g. "./util", "@myws/core", "myws/pkg/mod")
        specifier: String,

        /// Absolute path of the importing file
        #[arg(long, value_name = "PATH")]
        importer: Option<String>,

        /// JSON config produced by the build templating step
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Override the sandbox root (defaults to the working directory)
        #[arg(long, value_name = "PATH")]
        sandbox_root: Option<PathBuf>,

        /// Override the output root subpath
        #[arg(long, value_name = "SUBPATH")]
        output_root: Option<String>,

        /// Override the primary workspace name
        #[arg(long, value_name = "NAME")]
        workspace_name: Option<String>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json);

    match cli.command {
        Commands::Resolve {
            specifier,
            importer,
            config,
            sandbox_root,
            output_root,
            workspace_name,
        } => run_resolve(
            &specifier,
            importer.as_deref(),
            config.as_deref(),
            sandbox_root,
            output_root,
            workspace_name,
        ),
        Commands::Version => {
            println!("hermit {}", hermit_core::VERSION);
            Ok(())
        }
    }
}

fn run_resolve(
    specifier: &str,
    importer: Option<&str>,
    config_path: Option<&std::path::Path>,
    sandbox_root: Option<PathBuf>,
    output_root: Option<String>,
    workspace_name: Option<String>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => SandboxConfig::load(path).into_diagnostic()?,
        None => SandboxConfig::default(),
    };
    if let Some(root) = sandbox_root {
        config.sandbox_root = root;
    }
    if let Some(out) = output_root {
        config.output_root = out;
    }
    if let Some(name) = workspace_name {
        config.workspace_name = name;
    }

    let chain = PluginContainer::sandbox(config);
    match chain.resolve_id(specifier, importer).into_diagnostic()? {
        Some(result) if result.external => {
            println!("external {}", result.id);
        }
        Some(result) => {
            println!("{}", result.id);
        }
        // The chain ends in the not-resolved fallback, which either answers
        // or errors; getting here means the chain was misassembled.
        None => {
            return Err(hermit_core::Error::other(format!(
                "no resolver handled '{specifier}'"
            )))
            .into_diagnostic();
        }
    }
    Ok(())
}
