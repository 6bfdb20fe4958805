//! # Generator Module
//!
//! Turns a design graph into the boilerplate layer of an HTTP API: per-action context
//! types, controller traits with their route registration, canonical href factories and
//! the media and user type definitions.
//!
//! ## Pipeline
//!
//! ```text
//! Api → Generator (traversal, ledger) → data builders → askama records → Writer → file
//! ```
//!
//! 1. **Validation** - configuration and design are checked before any file is touched
//! 2. **Naming** - a [`NameResolver`] fixes every identifier of a version up front
//! 3. **Records** - builders in [`data`] assemble one record per design element
//! 4. **Writers** - each output file is rendered, parsed with `syn` and pretty-printed
//!
//! ## Generated Files
//!
//! Per version (the package root for the unversioned API, `<version>/` otherwise):
//! `contexts.rs`, `controllers.rs`, `hrefs.rs`. At the package root: `media_types.rs`
//! and `user_types.rs`. The caller declares the modules; no `mod.rs` is written.
//!
//! ## Failure Handling
//!
//! A run either leaves exactly the reported files behind or nothing at all. Errors
//! abort the run and remove the package directory; a panic is covered by a
//! [`CrashGuard`] that does the same while unwinding.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use appgen::config::GeneratorConfig;
//! use appgen::design::load_design;
//! use appgen::generator::generate;
//!
//! let api = load_design("design.yaml".as_ref())?;
//! let files = generate(&api, &GeneratorConfig::new("gen").with_target_package("cellar"))?;
//! for file in files {
//!     println!("{}", file.display());
//! }
//! ```

mod cleanup;
pub mod data;
mod generate;
mod merge;
mod naming;
mod templates;
mod types;
mod writer;

pub use cleanup::{remove_output_dir, CrashGuard};
pub use data::{
    canonical_template, context_data, controller_data, href_data, media_type_data,
    user_type_data,
};
pub use generate::{
    generate, Generator, CONTEXTS_FILE, CONTROLLERS_FILE, HREFS_FILE, MEDIA_TYPES_FILE,
    USER_TYPES_FILE,
};
pub use merge::merge;
pub(crate) use naming::is_keyword;
pub use naming::{export_name, screaming_name, snake_name, words, NameResolver, ResourceNames};
pub use templates::*;
pub use types::TypeIndex;
pub use writer::{
    ContextsWriter, ControllersWriter, HrefsWriter, MediaTypesWriter, UserTypesWriter, Writer,
};
