//! # appgen
//!
//! **appgen** is a design-driven code generator for HTTP APIs. Given the design graph of
//! an API (versions, resources, actions, routes, responses and types) it emits the
//! boilerplate layer of the service: per-action context types, controller traits with
//! route registration, canonical href factories and the media and user type definitions.
//!
//! ## Architecture
//!
//! - **[`design`]** - the typed design graph, its derived accessors and YAML/JSON loading
//! - **[`generator`]** - naming, merging, template records, writers and the orchestrator
//! - **[`runtime`]** - request contexts, routing and version selection for generated code
//! - **[`config`]** - output location and runtime path of a generation run
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//! - **[`cli`]** - the `appgen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as appgen generate
//!     participant Design as design::load_design
//!     participant Gen as generator::Generator
//!     participant Data as generator::data
//!     participant Writer as generator::Writer
//!     participant FS as File System
//!
//!     CLI->>Design: load_design("cellar.yaml")
//!     Design-->>CLI: Api
//!     CLI->>Gen: generate(&api)
//!     Gen->>Gen: validate config and design
//!     Gen->>FS: remove and recreate output root
//!     loop every version
//!         Gen->>Data: context / controller / href records
//!         Data-->>Gen: records
//!         Gen->>Writer: execute(record)
//!         Writer->>FS: contexts.rs, controllers.rs, hrefs.rs
//!     end
//!     Gen->>Writer: media types, user types
//!     Writer->>FS: media_types.rs, user_types.rs
//!     Gen-->>CLI: ledger of generated files
//! ```
//!
//! Any failure removes the output root and returns the error; a panic does the same
//! through a drop guard. A run therefore leaves either the complete set of files or
//! nothing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use appgen::config::GeneratorConfig;
//! use appgen::design::load_design;
//! use appgen::generator::generate;
//!
//! let api = load_design("cellar.yaml".as_ref())?;
//! let config = GeneratorConfig::new("gen").with_target_package("cellar");
//! let files = generate(&api, &config)?;
//! ```

pub mod cli;
pub mod config;
pub mod design;
pub mod error;
pub mod generator;
pub mod logging;
pub mod runtime;

pub use config::GeneratorConfig;
pub use design::{load_design, Api};
pub use error::GenError;
pub use generator::{generate, Generator};
