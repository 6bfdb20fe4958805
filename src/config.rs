//! # Generator Configuration
//!
//! Where a generation run writes and how the generated code refers to its runtime.
//!
//! ## Output Layout
//!
//! The output root is `output_dir/target_package`. A run owns that directory: it is
//! deleted and recreated before anything is written, and removed again when the run
//! fails.
//!
//! ```text
//! output_dir/
//! └── target_package/
//!     ├── contexts.rs       # unversioned API
//!     ├── controllers.rs
//!     ├── hrefs.rs
//!     ├── v1/               # one directory per named version
//!     │   ├── contexts.rs
//!     │   ├── controllers.rs
//!     │   └── hrefs.rs
//!     ├── media_types.rs
//!     └── user_types.rs
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use appgen::config::GeneratorConfig;
//!
//! let config = GeneratorConfig::new("gen").with_target_package("cellar");
//! assert_eq!(config.output_root(), std::path::Path::new("gen/cellar"));
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use crate::error::GenError;
use crate::generator::is_keyword;

/// Package name used when none is configured.
pub const DEFAULT_TARGET_PACKAGE: &str = "app";

/// Path of the crate providing `runtime` to the generated code.
pub const DEFAULT_RUNTIME_CRATE: &str = "appgen";

/// Configuration of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory the package directory is created in
    pub output_dir: PathBuf,
    /// Name of the generated package; also its directory name
    pub target_package: String,
    /// Path generated imports use to reach the runtime, e.g. `appgen` or `crate::rt`
    pub runtime_crate: String,
}

impl GeneratorConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            target_package: DEFAULT_TARGET_PACKAGE.to_string(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
        }
    }

    pub fn with_target_package(mut self, package: impl Into<String>) -> Self {
        self.target_package = package.into();
        self
    }

    pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }

    /// Directory owned by a generation run.
    pub fn output_root(&self) -> PathBuf {
        self.output_dir.join(&self.target_package)
    }

    /// Checks the configuration before any filesystem change.
    ///
    /// # Errors
    ///
    /// [`GenError::InvalidConfig`] when the output directory is empty, the package is
    /// not a plain Rust identifier, or the runtime path is not a Rust path.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(GenError::InvalidConfig("output directory is empty".into()));
        }
        if !is_identifier(&self.target_package) {
            return Err(GenError::InvalidConfig(format!(
                "target package {:?} is not a valid Rust identifier",
                self.target_package
            )));
        }
        let path_ok = !self.runtime_crate.is_empty()
            && self
                .runtime_crate
                .split("::")
                .all(|seg| is_identifier(seg) || matches!(seg, "crate" | "super" | "self"));
        if !path_ok {
            return Err(GenError::InvalidConfig(format!(
                "runtime crate {:?} is not a valid Rust path",
                self.runtime_crate
            )));
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
        && !is_keyword(name)
}
