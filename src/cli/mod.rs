//! # CLI Module
//!
//! Command-line interface of the `appgen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate the application code of a design document:
//!
//! ```bash
//! appgen generate --design cellar.yaml --output gen --package cellar
//! ```
//!
//! Options:
//! - `--design <FILE>` - Path to the design document, YAML or JSON (required)
//! - `--output <DIR>` - Directory the package directory is created in (env `APPGEN_OUTPUT`)
//! - `--package <NAME>` - Package name, default `app` (env `APPGEN_PACKAGE`)
//! - `--runtime-crate <PATH>` - Path of the runtime crate, default `appgen` (env `APPGEN_RUNTIME_CRATE`)
//!
//! The generated files are printed one per line.
//!
//! ### `inspect`
//!
//! Print the routes of a design document with the context type serving each:
//!
//! ```bash
//! appgen inspect --design cellar.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use appgen::cli::{run, Cli};
//! use clap::Parser;
//!
//! run(Cli::parse())?;
//! ```

mod commands;


pub use commands::{generate_from_file, inspect, run, run_cli, Cli, Commands};
