use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{GeneratorConfig, DEFAULT_RUNTIME_CRATE, DEFAULT_TARGET_PACKAGE};
use crate::design::load_design;
use crate::generator::{canonical_template, Generator, NameResolver};

/// Command-line interface for appgen
///
/// Generates the boilerplate layer of an API from its design document.
#[derive(Parser, Debug)]
#[command(name = "appgen")]
#[command(about = "Design-driven API code generator", long_about = None, version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate contexts, controllers, hrefs and types from a design document
    ///
    /// The package directory under the output directory is replaced as a whole; if
    /// generation fails it is removed.
    Generate {
        /// Path to the design document (YAML or JSON)
        #[arg(short, long)]
        design: PathBuf,

        /// Directory the package directory is created in
        #[arg(short, long, env = "APPGEN_OUTPUT")]
        output: PathBuf,

        /// Name of the generated package (and of its directory)
        #[arg(short, long, env = "APPGEN_PACKAGE", default_value = DEFAULT_TARGET_PACKAGE)]
        package: String,

        /// Rust path of the crate providing `runtime` to the generated code
        #[arg(long, env = "APPGEN_RUNTIME_CRATE", default_value = DEFAULT_RUNTIME_CRATE)]
        runtime_crate: String,
    },
    /// Print the routes and generated context names of a design document
    Inspect {
        /// Path to the design document (YAML or JSON)
        #[arg(short, long)]
        design: PathBuf,
    },
}

/// Parse command-line arguments and run the selected command
///
/// # Errors
///
/// Loading, validation and generation failures, with context.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run an already parsed command line
///
/// # Errors
///
/// See [`run_cli`].
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            design,
            output,
            package,
            runtime_crate,
        } => {
            let config = GeneratorConfig::new(output)
                .with_target_package(package)
                .with_runtime_crate(runtime_crate);
            for file in generate_from_file(&design, config)? {
                println!("{}", file.display());
            }
            Ok(())
        }
        Commands::Inspect { design } => {
            print!("{}", inspect(&design)?);
            Ok(())
        }
    }
}

/// Loads a design document and generates it with `config`.
///
/// # Errors
///
/// Loading and generation failures.
pub fn generate_from_file(design: &Path, config: GeneratorConfig) -> anyhow::Result<Vec<PathBuf>> {
    let api = load_design(design)?;
    let output = config.output_root();
    let files = Generator::new(config)
        .generate(&api)
        .with_context(|| format!("Failed to generate {} into {}", api.label(), output.display()))?;
    info!(files = files.len(), output = %output.display(), "Generated application code");
    Ok(files)
}

/// Renders the route table of a design document: one line per route with its
/// context type, and the canonical href template of every resource.
///
/// # Errors
///
/// Loading and validation failures.
pub fn inspect(design: &Path) -> anyhow::Result<String> {
    let api = load_design(design)?;
    api.validate()
        .with_context(|| format!("Invalid design {}", design.display()))?;

    let mut out = String::new();
    for version in &api.versions {
        out.push_str(&format!("{}\n", version.label(&api)));
        let names = NameResolver::for_version(version);
        for resource in &version.resources {
            match resource.canonical_route() {
                Some(route) => out.push_str(&format!(
                    "  {} (href {})\n",
                    resource.name,
                    canonical_template(&route.full_path(version, resource))
                )),
                None => out.push_str(&format!("  {}\n", resource.name)),
            }
            for action in &resource.actions {
                let context = names.context_name(resource, action)?;
                for route in &action.routes {
                    out.push_str(&format!(
                        "    {:<7} {:<40} {}\n",
                        route.method_upper(),
                        route.full_path(version, resource),
                        context
                    ));
                }
            }
        }
    }
    Ok(out)
}
