//! # Error reporting for reading and writing of linear program files
//!
//! A collection of enums and structures describing any problems encountered during reading,
//! parsing, converting and writing.
use std::error::Error as StdError;
use std::fmt;
use std::io;

use thiserror::Error;

/// An `Import` error is created when an error was encountered during IO, parsing or conversion.
///
/// It is the highest error in the io error hierarchy.
#[derive(Debug, Error)]
pub enum Import {
    /// The file extension of the provided file path is not known or supported.
    ///
    /// The contained `String` is a message for the end user.
    #[error("{0}")]
    FileExtension(String),
    /// The file to read isn't found, or the reading of file couldn't start or was interrupted.
    #[error("could not read the linear program file")]
    IO(#[from] io::Error),
    /// Contents of the file could not be parsed into a linear program.
    ///
    /// # Note
    ///
    /// If the linear program is inconsistent, that will not be represented with this error. This
    /// variant should only be created for syntactically incorrect files.
    #[error(transparent)]
    Parse(#[from] Parse),
    /// There is a logical inconsistency in the linear program described by a file.
    ///
    /// For example, two constraints might have the same label.
    #[error(transparent)]
    LinearProgram(#[from] Inconsistency),
}

/// An `Export` error is created when a linear program could not be written.
#[derive(Debug, Error)]
pub enum Export {
    /// The file extension of the provided file path is not known or supported.
    #[error("{0}")]
    FileExtension(String),
    /// The file could not be created or written to.
    #[error("could not write the linear program file")]
    IO(#[from] io::Error),
    /// Formatting the program text failed.
    #[error("could not format the linear program")]
    Format(#[from] fmt::Error),
}

/// Result of a parsing step.
pub type ParseResult<T> = Result<T, Parse>;

/// A `FileLocation` references a line in the file by the line number of the file as originally
/// read from the disk (counting from 1). It contains a reference to the line itself.
pub type FileLocation<'a> = (usize, &'a str);

/// A `Parse` error represents all errors encountered during parsing.
///
/// It may recursively hold more `Parse` errors to provide more detail. At the end of this chain,
/// there may be a file location containing a line number and line, at which the error was caused,
/// or an error from outside this crate.
#[derive(Debug)]
pub struct Parse {
    description: String,
    source: Option<Source>,
}

/// What caused a `Parse` error.
#[derive(Debug)]
enum Source {
    FileLocation(usize, String),
    Nested(Box<Parse>),
    Other(Box<dyn StdError + Send + Sync>),
}

impl Parse {
    /// Create a new `Parse` error with only a description.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong at the moment of creation.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), source: None }
    }

    /// Create a new `Parse` error with a location in the file as a cause.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong at the moment of creation.
    /// * `file_location`: A line number and line that caused the error.
    pub fn with_location(description: impl Into<String>, file_location: FileLocation) -> Self {
        let (line_number, line) = file_location;
        Self {
            description: description.into(),
            source: Some(Source::FileLocation(line_number, line.to_string())),
        }
    }

    /// Wrap a new `Parse` error around an existing one.
    ///
    /// # Arguments
    ///
    /// * `description`: What went wrong, one level higher.
    #[must_use]
    pub fn wrap(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            source: Some(Source::Nested(Box::new(self))),
        }
    }

    /// Wrap a `Parse` error around an error from outside this module.
    pub fn wrap_other(
        source: impl StdError + Send + Sync + 'static,
        description: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            source: Some(Source::Other(Box::new(source))),
        }
    }

    /// Description of this error, without the chain of causes.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Line number at which the error was caused, if known.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match &self.source {
            Some(Source::FileLocation(number, _)) => Some(*number),
            Some(Source::Nested(error)) => error.line_number(),
            Some(Source::Other(_)) | None => None,
        }
    }

    /// Get all descriptions in the chain, starting with this one.
    fn chain_description(&self) -> Vec<String> {
        let mut descriptions = vec![self.description.clone()];

        match &self.source {
            Some(Source::FileLocation(line_number, line)) => {
                descriptions.push(format!("\tCaused at line\t{line_number}:\t{line}"));
            },
            Some(Source::Nested(error)) => descriptions.extend(error.chain_description()),
            Some(Source::Other(error)) => descriptions.push(format!("\tCaused by:\t{error}")),
            None => {},
        }

        descriptions
    }
}

impl fmt::Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseError: {}", self.chain_description().join("\n"))
    }
}

impl StdError for Parse {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.source {
            Some(Source::Nested(error)) => Some(error.as_ref() as &(dyn StdError + 'static)),
            Some(Source::Other(error)) => Some(error.as_ref() as &(dyn StdError + 'static)),
            Some(Source::FileLocation(..)) | None => None,
        }
    }
}

/// An `Inconsistency` is returned when the linear program is inconsistently represented in the
/// file.
///
/// This error is not meant for linear programs that are infeasible or unbounded, but only for
/// descriptions of linear programs that can't be made sense of.
#[derive(Debug, Error)]
#[error("ProgramError: {description}")]
pub struct Inconsistency {
    description: String,
}

impl Inconsistency {
    /// Wrap a text in an `Inconsistency`.
    ///
    /// # Arguments
    ///
    /// * `description`: A human-readable text meant for the end user.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into() }
    }

    /// Description of the inconsistency.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod test {
    use std::error::Error;

    use crate::io::error::{Import, Inconsistency, Parse};

    #[test]
    fn chain() {
        let error = Parse::with_location("Unknown token.", (3, "  x ?? 4"))
            .wrap("Could not read constraint.");

        assert_eq!(error.description(), "Could not read constraint.");
        assert_eq!(error.line_number(), Some(3));
        assert_eq!(
            error.to_string(),
            "ParseError: Could not read constraint.\nUnknown token.\n\tCaused at line\t3:\t  x ?? 4",
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn other() {
        let inner = "x".parse::<f64>().unwrap_err();
        let error = Parse::wrap_other(inner, "Not a number.");
        assert_eq!(error.line_number(), None);
        assert!(error.to_string().starts_with("ParseError: Not a number.\n\tCaused by:"));
    }

    #[test]
    fn conversions() {
        let import: Import = Inconsistency::new("Duplicate label.").into();
        assert!(matches!(import, Import::LinearProgram(_)));
        assert_eq!(import.to_string(), "ProgramError: Duplicate label.");

        let import: Import = Parse::new("Empty file.").into();
        assert!(matches!(import, Import::Parse(_)));
    }
}
