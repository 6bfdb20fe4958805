use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::config::GeneratorConfig;
use crate::design::{Api, Version};
use crate::error::GenError;

use super::cleanup::{remove_output_dir, CrashGuard};
use super::data::{context_data, controller_data, href_data, media_type_data, user_type_data};
use super::naming::NameResolver;
use super::templates::Import;
use super::types::TypeIndex;
use super::writer::{
    ContextsWriter, ControllersWriter, HrefsWriter, MediaTypesWriter, UserTypesWriter,
};

pub const CONTEXTS_FILE: &str = "contexts.rs";
pub const CONTROLLERS_FILE: &str = "controllers.rs";
pub const HREFS_FILE: &str = "hrefs.rs";
pub const MEDIA_TYPES_FILE: &str = "media_types.rs";
pub const USER_TYPES_FILE: &str = "user_types.rs";

/// Generates the application code of a design into `output_dir/target_package`.
///
/// Shorthand for [`Generator::generate`] with a fresh generator.
///
/// # Errors
///
/// See [`Generator::generate`].
pub fn generate(api: &Api, config: &GeneratorConfig) -> Result<Vec<PathBuf>, GenError> {
    Generator::new(config.clone()).generate(api)
}

/// Drives one generation run and keeps the ledger of the files it produced.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    genfiles: Vec<PathBuf>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            genfiles: Vec::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Files of the last successful run, in production order. Empty after a failed or
    /// panicking run.
    pub fn genfiles(&self) -> &[PathBuf] {
        &self.genfiles
    }

    /// Replaces the output root with the code generated from `api`.
    ///
    /// The configuration and the design are checked before the filesystem is touched.
    /// On success the output root holds exactly the returned files. On failure, or if
    /// generation panics, the output root is removed and the ledger discarded; the
    /// error is returned unchanged.
    ///
    /// # Errors
    ///
    /// Any [`GenError`] raised by validation, a builder or a writer.
    pub fn generate(&mut self, api: &Api) -> Result<Vec<PathBuf>, GenError> {
        self.config.validate()?;
        api.validate()?;

        let outdir = self.config.output_root();
        info!(
            api = %api.name,
            output = %outdir.display(),
            versions = api.versions.len(),
            "Generating application code"
        );

        // Only a run that returns Ok replaces the ledger.
        self.genfiles.clear();
        let mut ledger = Vec::new();
        let mut guard = CrashGuard::arm(&outdir);
        let result = self.run(api, &outdir, &mut ledger);
        guard.disarm();

        match result {
            Ok(()) => {
                info!(files = ledger.len(), "Generation complete");
                self.genfiles = ledger;
                Ok(self.genfiles.clone())
            }
            Err(err) => {
                error!(error = %err, output = %outdir.display(), "Generation failed, removing output");
                self.cleanup();
                Err(err)
            }
        }
    }

    /// Removes the output root and forgets the ledger. Safe to call repeatedly.
    pub fn cleanup(&mut self) {
        let outdir = self.config.output_root();
        if let Err(e) = remove_output_dir(&outdir) {
            error!(output = %outdir.display(), error = %e, "Failed to remove output directory");
        }
        self.genfiles.clear();
    }

    fn run(&self, api: &Api, outdir: &Path, ledger: &mut Vec<PathBuf>) -> Result<(), GenError> {
        remove_output_dir(outdir).map_err(|e| GenError::io(outdir, e))?;
        fs::create_dir_all(outdir).map_err(|e| GenError::io(outdir, e))?;

        let types = TypeIndex::new(api);
        for version in &api.versions {
            let verdir = if version.is_versioned() {
                let dir = outdir.join(&version.version);
                fs::create_dir_all(&dir).map_err(|e| GenError::io(&dir, e))?;
                dir
            } else {
                outdir.to_path_buf()
            };
            let names = NameResolver::for_version(version);
            self.generate_contexts(ledger, &verdir, api, version, &names, &types)?;
            self.generate_controllers(ledger, &verdir, api, version, &names)?;
            self.generate_hrefs(ledger, &verdir, api, version, &names)?;
        }
        self.generate_media_types(ledger, outdir, api, &types)?;
        self.generate_user_types(ledger, outdir, api, &types)?;
        Ok(())
    }

    fn generate_contexts(
        &self,
        ledger: &mut Vec<PathBuf>,
        verdir: &Path,
        api: &Api,
        version: &Version,
        names: &NameResolver,
        types: &TypeIndex,
    ) -> Result<(), GenError> {
        let path = verdir.join(CONTEXTS_FILE);
        let mut writer = ContextsWriter::create(&path)?;
        record(ledger, &path);

        let types_root = types_root(version);
        let rt = &self.config.runtime_crate;
        let imports = [
            Import::new("std::collections::BTreeMap"),
            Import::new(format!(
                "{rt}::runtime::{{BadRequestError, Error, RequestContext, parse_json_param, parse_param}}"
            )),
            Import::new(format!("{types_root}::media_types::*")),
            Import::new(format!("{types_root}::user_types::*")),
        ];
        let title = format!("{}: Application Contexts", version.label(api));
        writer.write_header(&title, &self.config.target_package, &imports);

        for resource in &version.resources {
            for action in &resource.actions {
                let data = context_data(api, version, resource, action, names, types)?;
                writer.execute(&data)?;
            }
        }
        writer.format_code()
    }

    fn generate_controllers(
        &self,
        ledger: &mut Vec<PathBuf>,
        verdir: &Path,
        api: &Api,
        version: &Version,
        names: &NameResolver,
    ) -> Result<(), GenError> {
        let path = verdir.join(CONTROLLERS_FILE);
        let mut writer = ControllersWriter::create(&path)?;
        record(ledger, &path);

        let rt = &self.config.runtime_crate;
        let imports = [
            Import::new("std::sync::Arc"),
            Import::new(format!("{rt}::runtime::{{Error, RequestContext, ServeMux}}")),
            Import::new("super::contexts::*"),
        ];
        let title = format!("{}: Application Controllers", version.label(api));
        writer.write_header(&title, &self.config.target_package, &imports);

        for resource in &version.resources {
            match controller_data(api, version, resource, names)? {
                Some(data) => writer.execute(&data)?,
                None => debug!(resource = %resource.name, "Skipping controller of resource without actions"),
            }
        }
        writer.format_code()
    }

    fn generate_hrefs(
        &self,
        ledger: &mut Vec<PathBuf>,
        verdir: &Path,
        api: &Api,
        version: &Version,
        names: &NameResolver,
    ) -> Result<(), GenError> {
        let path = verdir.join(HREFS_FILE);
        let mut writer = HrefsWriter::create(&path)?;
        record(ledger, &path);

        let rt = &self.config.runtime_crate;
        let imports = [
            Import::new("std::fmt::Display"),
            Import::new(format!("{rt}::runtime::href")),
        ];
        let title = format!("{}: Application Resource Href Factories", version.label(api));
        writer.write_header(&title, &self.config.target_package, &imports);

        for resource in &version.resources {
            writer.execute(&href_data(api, version, resource, names)?)?;
        }
        writer.format_code()
    }

    fn generate_media_types(
        &self,
        ledger: &mut Vec<PathBuf>,
        outdir: &Path,
        api: &Api,
        types: &TypeIndex,
    ) -> Result<(), GenError> {
        let path = outdir.join(MEDIA_TYPES_FILE);
        let mut writer = MediaTypesWriter::create(&path)?;
        record(ledger, &path);

        let imports = [
            Import::new("serde::{Deserialize, Serialize}"),
            Import::new("std::collections::BTreeMap"),
            Import::new("super::user_types::*"),
        ];
        let title = format!("{}: Application Media Types", api.label());
        writer.write_header(&title, &self.config.target_package, &imports);

        for media_type in &api.media_types {
            match media_type_data(media_type, types)? {
                Some(data) => writer.execute(&data)?,
                None => debug!(identifier = %media_type.identifier, "Skipping media type without structure"),
            }
        }
        writer.format_code()
    }

    fn generate_user_types(
        &self,
        ledger: &mut Vec<PathBuf>,
        outdir: &Path,
        api: &Api,
        types: &TypeIndex,
    ) -> Result<(), GenError> {
        let path = outdir.join(USER_TYPES_FILE);
        let mut writer = UserTypesWriter::create(&path)?;
        record(ledger, &path);

        let imports = [
            Import::new("serde::{Deserialize, Serialize}"),
            Import::new("std::collections::BTreeMap"),
            Import::new("super::media_types::*"),
        ];
        let title = format!("{}: Application User Types", api.label());
        writer.write_header(&title, &self.config.target_package, &imports);

        for user_type in &api.user_types {
            writer.execute(&user_type_data(user_type, types)?)?;
        }
        writer.format_code()
    }

}

fn record(ledger: &mut Vec<PathBuf>, path: &Path) {
    debug!(path = %path.display(), "Generating file");
    ledger.push(path.to_path_buf());
}

/// Module path from a version's files to the package root, where the type files live.
fn types_root(version: &Version) -> &'static str {
    if version.is_versioned() {
        "super::super"
    } else {
        "super"
    }
}
