//! # LP files
//!
//! Reading and writing of `.lp` files, the text format in which modeling tools like Pyomo export
//! linear programs: an objective, a list of labeled constraints, a bounds section and optionally
//! the integer and binary variables.
//!
//! Reading happens in three stages. The text is first split into tokens (`lex`), the tokens are
//! then organized into an `LP` (`parse`), which refers to variables by index but otherwise stays
//! close to the file. Finally, the `LP` is converted into a `GeneralForm` (`convert`), which is
//! where conventions like constant folding and range merging are applied.
use std::fmt;

use crate::data::linear_program::elements::{ConstraintRelation, Objective};

pub mod convert;
pub mod name;
pub mod number;
pub mod parse;
pub mod token;
pub mod write;

mod lex;

pub use parse::parse;

/// Terms of a linear expression: (variable index, coefficient) tuples.
///
/// Sorted by variable index, each variable at most once. Coefficients might be zero, e.g. in the
/// `+0 ONE_VAR_CONSTANT` objective that is written for programs without a cost function.
pub type Terms<F> = Vec<(usize, F)>;

/// Represents the contents of an LP file.
///
/// Variables are referred to by their index in `variables`, which is the order of first
/// appearance in the file.
#[derive(Debug, PartialEq)]
pub struct LP<F> {
    /// Name of the model, if the file mentions one in its first comment.
    pub(crate) name: Option<String>,
    /// Direction of optimization.
    pub(crate) objective: Objective,
    /// Label of the objective function.
    pub(crate) objective_name: Option<String>,
    /// Cost coefficients.
    pub(crate) objective_terms: Terms<F>,
    /// Constant terms written in the objective function, summed.
    pub(crate) objective_constant: F,
    /// All constraints in the order of the file.
    pub(crate) constraints: Vec<Constraint<F>>,
    /// Names of all variables.
    pub(crate) variables: Vec<String>,
    /// Bounds in the order of the file.
    pub(crate) bounds: Vec<(usize, BoundType<F>)>,
    /// Variables listed in the `general` section.
    pub(crate) general: Vec<usize>,
    /// Variables listed in the `binary` section.
    pub(crate) binary: Vec<usize>,
}

impl<F> LP<F> {
    /// Name of the model, if the file mentions one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Direction of optimization.
    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Label of the objective function.
    #[must_use]
    pub fn objective_name(&self) -> Option<&str> {
        self.objective_name.as_deref()
    }

    /// Coefficients of the objective function.
    #[must_use]
    pub fn objective_terms(&self) -> &Terms<F> {
        &self.objective_terms
    }

    /// All constraints, in the order of the file.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint<F>] {
        &self.constraints
    }

    /// Names of all variables, in order of first appearance.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// All bounds, in the order of the file.
    #[must_use]
    pub fn bounds(&self) -> &[(usize, BoundType<F>)] {
        &self.bounds
    }
}

/// A constraint as written in the file.
#[derive(Debug, PartialEq)]
pub struct Constraint<F> {
    /// Label, including a potential naming convention prefix like `c_e_`.
    pub label: Option<String>,
    /// Left-hand side.
    pub terms: Terms<F>,
    /// Relation between the left-hand side and right-hand side.
    pub relation: ConstraintRelation,
    /// Right-hand side.
    pub rhs: F,
    /// Line at which the constraint starts, counting from 1.
    pub line_number: usize,
}

/// Describes a bound on a variable, as found in the bounds section.
///
/// Each bound line results in one or two of these, for example `0 <= x <= 4` is read as a
/// `Lower(0)` followed by an `Upper(4)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoundType<F> {
    /// b <= x
    Lower(F),
    /// x <= b
    Upper(F),
    /// x = b
    Fixed(F),
    /// -inf < x < +inf
    Free,
    /// -inf <= x
    LowerMinusInfinity,
    /// x <= +inf
    UpperInfinity,
}

/// LP files are divided into sections, each started by a keyword.
///
/// # Note
///
/// The `End` variant denotes the end of the file.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Section {
    /// Objective function, `min` or `max`.
    Objective(Objective),
    /// `s.t.`, `subject to`
    Constraints,
    /// `bounds`
    Bounds,
    /// `general`, listing integer variables.
    General,
    /// `binary`, listing binary variables.
    Binary,
    /// `end`
    End,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Objective(Objective::Minimize) => "min",
            Section::Objective(Objective::Maximize) => "max",
            Section::Constraints => "s.t.",
            Section::Bounds => "bounds",
            Section::General => "general",
            Section::Binary => "binary",
            Section::End => "end",
        })
    }
}
