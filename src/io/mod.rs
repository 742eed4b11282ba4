//! # Reading and writing of linear programs
//!
//! This module provides read and write functionality for files in the LP format.
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::data::linear_program::general_form::GeneralForm;
use crate::io::error::{Export, Import};
use crate::io::lp::LP;
use crate::io::lp::number::parse::Parse;
use crate::io::lp::number::traits::{Field, Format};
use crate::io::options::{ExportOptions, ImportOptions};

pub mod error;
pub mod lp;
pub mod options;

/// File extension of LP files, compared case insensitively.
const LP_EXTENSION: &str = "lp";

/// Import a problem from a file.
///
/// Currently only supports the LP filetype.
///
/// The `import` function takes a file path and returns, if successful, a struct which can be
/// converted to a linear program in general form.
///
/// # Errors
///
/// When a file extension is unknown, a file cannot be found or read, or the contents are not a
/// syntactically correct LP file.
pub fn import<F: Parse + Field>(file_path: &Path) -> Result<LP<F>, Import> {
    check_extension(file_path).map_err(Import::FileExtension)?;

    let program = fs::read_to_string(file_path)?;
    debug!(path = %file_path.display(), bytes = program.len(), "read LP file");

    lp::parse(&program)
}

/// Import a problem from a file and convert it into a linear program in general form.
///
/// # Errors
///
/// In the situations `import` fails, and when the program is inconsistent.
pub fn import_general_form<F: Parse + Field>(
    file_path: &Path,
    options: &ImportOptions,
) -> Result<GeneralForm<F>, Import> {
    let general_form = import(file_path)?.into_general_form(options)?;
    debug!(statistics = %general_form.statistics(), "imported linear program");

    Ok(general_form)
}

/// Write a linear program to an LP file.
///
/// # Errors
///
/// When the file extension is not `lp`, or the file can't be written.
pub fn export<F: Field + Format>(
    general_form: &GeneralForm<F>,
    file_path: &Path,
    options: &ExportOptions,
) -> Result<(), Export> {
    check_extension(file_path).map_err(Export::FileExtension)?;

    let text = lp::write::to_string(general_form, options)?;
    fs::write(file_path, &text)?;
    debug!(path = %file_path.display(), bytes = text.len(), "wrote LP file");

    Ok(())
}

/// Check that a path has the LP extension.
///
/// # Errors
///
/// A message for the end user if it doesn't.
fn check_extension(file_path: &Path) -> Result<(), String> {
    match file_path.extension().map(OsStr::to_str) {
        Some(Some(extension)) if extension.eq_ignore_ascii_case(LP_EXTENSION) => Ok(()),
        Some(Some(extension)) => Err(format!(
            "Could not recognise file extension \"{extension}\" of file: {file_path:?}",
        )),
        Some(None) => Err(format!(
            "Could not convert OsStr to &str, probably invalid unicode: {file_path:?}",
        )),
        None => Err(format!("Could not read extension from file path: {file_path:?}")),
    }
}
