//! # Reading and writing options
//!
//! Both option structures deserialize with defaults for missing fields, such that they can be
//! embedded in a larger configuration file.
use serde::{Deserialize, Serialize};

/// How an `LP` is converted into a `GeneralForm`.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Treat constraint labels that break the naming convention as an error.
    ///
    /// That is, a label prefix that doesn't match the relation of the constraint, or one half of
    /// a ranged constraint without the other half. When `false`, these are logged and the
    /// constraint is read as written.
    pub strict_labels: bool,
    /// Remove the `ONE_VAR_CONSTANT` variable, moving its coefficients into the fixed cost and
    /// the right-hand sides.
    pub fold_one_var_constant: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            strict_labels: false,
            fold_one_var_constant: true,
        }
    }
}

/// How a `GeneralForm` is written.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Start the file with a comment holding the model name.
    pub source_comment: bool,
    /// When to write the row fixing `ONE_VAR_CONSTANT`.
    ///
    /// Never written for a program that has `ONE_VAR_CONSTANT` as an ordinary variable or row, as
    /// read with `ImportOptions::fold_one_var_constant` switched off.
    pub constant_row: ConstantRow,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            source_comment: true,
            constant_row: ConstantRow::Always,
        }
    }
}

/// When to write the `c_e_ONE_VAR_CONSTANT` row.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantRow {
    /// In every file, as Pyomo does.
    #[default]
    Always,
    /// Only if the variable is written elsewhere: for a fixed cost, an empty objective function or
    /// a constraint without coefficients.
    WhenNeeded,
}

#[cfg(test)]
mod test {
    use crate::io::options::{ConstantRow, ExportOptions, ImportOptions};

    #[test]
    fn defaults() {
        let options: ImportOptions = toml::from_str("").unwrap();
        assert_eq!(options, ImportOptions::default());
        assert!(options.fold_one_var_constant);
        assert!(!options.strict_labels);

        let options: ExportOptions = toml::from_str("").unwrap();
        assert_eq!(options, ExportOptions::default());
    }

    #[test]
    fn partial() {
        let options: ImportOptions = toml::from_str("strict_labels = true").unwrap();
        assert_eq!(
            options,
            ImportOptions { strict_labels: true, fold_one_var_constant: true },
        );

        let options: ExportOptions = toml::from_str("constant_row = \"when_needed\"").unwrap();
        assert_eq!(
            options,
            ExportOptions { source_comment: true, constant_row: ConstantRow::WhenNeeded },
        );

        assert!(toml::from_str::<ExportOptions>("constant_row = \"never\"").is_err());
    }

    #[test]
    fn serialize() {
        let text = toml::to_string(&ExportOptions::default()).unwrap();
        assert_eq!(toml::from_str::<ExportOptions>(&text).unwrap(), ExportOptions::default());
    }
}
