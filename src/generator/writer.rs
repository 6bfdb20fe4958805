use std::fs::File;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::GenError;

use super::templates::{
    ContextData, ControllerData, HrefData, Import, MediaTypeData, Record, UserTypeData,
};

/// Writes the contexts file of one version.
pub type ContextsWriter = Writer<ContextData>;
/// Writes the controllers file of one version.
pub type ControllersWriter = Writer<ControllerData>;
/// Writes the href factories file of one version.
pub type HrefsWriter = Writer<HrefData>;
/// Writes the media types file.
pub type MediaTypesWriter = Writer<MediaTypeData>;
/// Writes the user types file.
pub type UserTypesWriter = Writer<UserTypeData>;

/// Owns one generated output file.
///
/// Usage is `create`, `write_header` once, `execute` per record, then `format_code`,
/// which validates and pretty-prints the accumulated source and writes it to disk.
/// Failures are returned as is; the writer never removes what it created.
#[derive(Debug)]
pub struct Writer<R> {
    path: PathBuf,
    file: File,
    header: String,
    source: String,
    _records: PhantomData<fn(&R)>,
}

impl<R: Record> Writer<R> {
    /// Creates (or truncates) the output file.
    ///
    /// # Errors
    ///
    /// [`GenError::Io`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, GenError> {
        let file = File::create(path).map_err(|e| GenError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            header: String::new(),
            source: String::new(),
            _records: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sets the header comment and the import list of the file.
    pub fn write_header(&mut self, title: &str, package: &str, imports: &[Import]) {
        self.header = format!(
            "// Code generated by appgen. DO NOT EDIT.\n//\n// {}\n//\n// Package: {}\n\n",
            single_line(title),
            single_line(package)
        );
        self.source
            .push_str("#![allow(dead_code, unused_imports, non_camel_case_types)]\n\n");
        for import in imports {
            self.source.push_str(&format!("use {};\n", import.path));
        }
        self.source.push('\n');
    }

    /// Renders one record into the file body.
    ///
    /// # Errors
    ///
    /// [`GenError::Render`] if the template fails.
    pub fn execute(&mut self, record: &R) -> Result<(), GenError> {
        let rendered = record.render().map_err(|source| GenError::Render {
            what: R::KIND.to_string(),
            path: self.path.clone(),
            source,
        })?;
        self.source.push_str(&rendered);
        self.source.push_str("\n\n");
        Ok(())
    }

    /// Parses the accumulated source, pretty-prints it and writes the file.
    ///
    /// # Errors
    ///
    /// [`GenError::Format`] if the source is not valid Rust, [`GenError::Io`] if the
    /// write fails.
    pub fn format_code(mut self) -> Result<(), GenError> {
        let parsed = syn::parse_file(&self.source).map_err(|source| GenError::Format {
            path: self.path.clone(),
            source,
        })?;
        let formatted = prettyplease::unparse(&parsed);
        self.file
            .write_all(self.header.as_bytes())
            .and_then(|()| self.file.write_all(formatted.as_bytes()))
            .and_then(|()| self.file.flush())
            .map_err(|e| GenError::io(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = self.header.len() + formatted.len(), "Wrote generated file");
        Ok(())
    }
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}
