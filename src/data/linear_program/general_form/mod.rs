//! # Linear programs in "general form"
//!
//! Data structure holding a linear program as a coefficient matrix with per row a relation and
//! right-hand side, and per column a named variable with a cost and bounds.
use std::fmt;

use enum_map::EnumMap;
use num_traits::{One, Zero};

use crate::data::linear_algebra::matrix::ColumnMajor;
use crate::data::linear_program::elements::{Objective, RangedConstraintRelation, RangedConstraintRelationKind, VariableType};
use crate::io::lp::name::Identifier;

mod difference;

pub use difference::Difference;

/// A linear program in general form.
///
/// This structure is the storage independent representation that parse results are transformed
/// to, and that is written back to files.
///
/// Can be checked for consistency by the `is_consistent` method in this module. That method can be
/// viewed as documentation for the requirements on the variables in this data structure.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralForm<F> {
    /// Name of the model, if known.
    name: Option<String>,
    /// Which direction does the objective function go?
    objective: Objective,
    /// Name of the objective function, if known.
    objective_name: Option<String>,
    /// Constant in the cost function.
    fixed_cost: F,

    // Constraint related
    /// All constraint coefficients.
    ///
    /// Has size `constraint_types.len()` in the row direction, size `variables.len()` in the column
    /// direction.
    constraints: ColumnMajor<F>,
    /// Name of each row, without naming convention prefix.
    constraint_names: Vec<String>,
    /// The equation type of all rows, ordered by index.
    ///
    /// These are read "from constraint to constraint value", meaning:
    /// * When a constraint is `ConstraintType::Equal`, the equation is `<a, x> == b`
    /// * When a constraint is `ConstraintType::Range(r)`, the equation is `b - r <= <a, x> <= b`
    /// * When a constraint is `ConstraintType::Less`, the equation is `<a, x> <= b`
    /// * When a constraint is `ConstraintType::Greater`, the equation is `<a, x> >= b`
    constraint_types: Vec<RangedConstraintRelation<F>>,
    /// All right-hands sides of equations.
    b: Vec<F>,

    // Variable related
    /// Information about all variables, ordered by column index.
    variables: Vec<Variable<F>>,
}

/// Check whether the dimensions of the `GeneralForm` are consistent.
///
/// This method might be expensive, use it in debugging only. It can be viewed as a piece of
/// documentation on the requirements of a `GeneralForm` struct.
fn is_consistent<F: Zero + PartialOrd>(general_form: &GeneralForm<F>) -> bool {
    let nr_constraints = general_form.constraint_types.len();
    let nr_variables = general_form.variables.len();

    let b = general_form.b.len() == nr_constraints;
    let names = general_form.constraint_names.len() == nr_constraints;
    let rows = general_form.constraints.nr_rows() == nr_constraints;
    let columns = general_form.constraints.nr_columns() == nr_variables;
    let ranges = general_form.constraint_types.iter().all(|constraint_type| match constraint_type {
        RangedConstraintRelation::Range(range) => range >= &F::zero(),
        _ => true,
    });
    let bounds = general_form.variables.iter().all(Variable::has_feasible_value);

    [b, names, rows, columns, ranges, bounds].iter().all(|v| *v)
}

impl<F> GeneralForm<F> {
    /// Create a new linear program in general form.
    ///
    /// # Arguments
    ///
    /// * `constraints`: Matrix with a row for each constraint and a column for each variable.
    /// * `constraint_names`, `constraint_types`, `b`: One value for each constraint.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        name: Option<String>,
        objective: Objective,
        objective_name: Option<String>,
        fixed_cost: F,
        constraints: ColumnMajor<F>,
        constraint_names: Vec<String>,
        constraint_types: Vec<RangedConstraintRelation<F>>,
        b: Vec<F>,
        variables: Vec<Variable<F>>,
    ) -> Self
    where
        F: Zero + PartialOrd,
    {
        let general_form = Self {
            name,
            objective,
            objective_name,
            fixed_cost,
            constraints,
            constraint_names,
            constraint_types,
            b,
            variables,
        };

        debug_assert!(is_consistent(&general_form));

        general_form
    }

    /// Name of the model, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Direction of optimization.
    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Name of the objective function, if known.
    #[must_use]
    pub fn objective_name(&self) -> Option<&str> {
        self.objective_name.as_deref()
    }

    /// Constant in the cost function.
    #[must_use]
    pub fn fixed_cost(&self) -> &F {
        &self.fixed_cost
    }

    /// Number of constraints (rows).
    #[must_use]
    pub fn nr_constraints(&self) -> usize {
        self.constraint_types.len()
    }

    /// Number of variables (columns).
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.variables.len()
    }

    /// All constraint coefficients.
    #[must_use]
    pub fn constraints(&self) -> &ColumnMajor<F> {
        &self.constraints
    }

    /// Names of the constraints.
    #[must_use]
    pub fn constraint_names(&self) -> &[String] {
        &self.constraint_names
    }

    /// Relation of each constraint.
    #[must_use]
    pub fn constraint_types(&self) -> &[RangedConstraintRelation<F>] {
        &self.constraint_types
    }

    /// Right-hand side of each constraint.
    #[must_use]
    pub fn b(&self) -> &[F] {
        &self.b
    }

    /// All variables.
    #[must_use]
    pub fn variables(&self) -> &[Variable<F>] {
        &self.variables
    }

    /// Column index of a variable.
    #[must_use]
    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|variable| variable.name == name)
    }

    /// Row index of a constraint.
    #[must_use]
    pub fn constraint_index(&self, name: &str) -> Option<usize> {
        self.constraint_names.iter().position(|constraint| constraint == name)
    }

    /// Counts of the different kinds of constraints and variables.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        let mut constraints = EnumMap::default();
        for constraint_type in &self.constraint_types {
            constraints[constraint_type.kind()] += 1;
        }
        let mut variables = EnumMap::default();
        for variable in &self.variables {
            variables[variable.variable_type] += 1;
        }

        Statistics {
            constraints,
            variables,
            non_zeros: self.constraints.nr_non_zeros(),
        }
    }

    /// Structured names of all variables, ordered by column index.
    #[must_use]
    pub fn variable_identifiers(&self) -> Vec<Identifier<'_>> {
        self.variables.iter()
            .map(|variable| Identifier::new(&variable.name))
            .collect()
    }
}

/// Size of a linear program.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statistics {
    /// Number of constraints of each kind.
    pub constraints: EnumMap<RangedConstraintRelationKind, usize>,
    /// Number of variables of each type.
    pub variables: EnumMap<VariableType, usize>,
    /// Number of nonzero constraint coefficients.
    pub non_zeros: usize,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nr_constraints = self.constraints.values().sum::<usize>();
        let nr_variables = self.variables.values().sum::<usize>();

        write!(f, "{nr_constraints} constraints (")?;
        for (index, (kind, count)) in self.constraints.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind:?}: {count}")?;
        }
        write!(f, "), {nr_variables} variables (")?;
        for (index, (variable_type, count)) in self.variables.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{variable_type:?}: {count}")?;
        }
        write!(f, "), {} nonzeros", self.non_zeros)
    }
}

/// A variable of a linear program.
///
/// A variable is named, of continuous or integer type and may be bounded from below and from
/// above.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variable<F> {
    /// Name as written in the file.
    pub name: String,
    /// Whether the variable is integer or not.
    pub variable_type: VariableType,
    /// Coefficient in the objective function.
    pub cost: F,
    /// Describing the accepted values for this variable
    ///
    /// Lower bound should be set to 0 when a variable is nonnegative. If it is `None`, the variable
    /// is considered to be in (-oo, upper_bound).
    pub lower_bound: Option<F>,
    /// Describing the accepted values for this variable
    ///
    /// If it is `None`, the variable is considered to be in (lower_bound, oo).
    pub upper_bound: Option<F>,
}

impl<F> Variable<F> {
    /// Whether the variable allows only a single value.
    ///
    /// # Return value
    ///
    /// `Some` with the value if so, `None` otherwise.
    pub fn is_fixed(&self) -> Option<&F>
    where
        F: PartialEq,
    {
        match (&self.lower_bound, &self.upper_bound) {
            (Some(lower), Some(upper)) if lower == upper => Some(lower),
            _ => None,
        }
    }

    /// Whether a variable is unconstrained (has no bounds).
    pub fn is_free(&self) -> bool {
        self.lower_bound.is_none() && self.upper_bound.is_none()
    }

    /// Whether the variable is an integer that can only be zero or one.
    pub fn is_binary(&self) -> bool
    where
        F: Zero + One + PartialEq,
    {
        self.variable_type == VariableType::Integer
            && self.lower_bound.as_ref().is_some_and(Zero::is_zero)
            && self.upper_bound.as_ref().is_some_and(|upper| upper == &F::one())
    }

    /// Whether the variable admits a feasible value (and the upper bound is not below the lower
    /// bound).
    fn has_feasible_value(&self) -> bool
    where
        F: PartialOrd,
    {
        match (&self.lower_bound, &self.upper_bound) {
            (Some(lower), Some(upper)) => lower <= upper,
            _ => true,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_algebra::matrix::ColumnMajor;
    use crate::data::linear_program::elements::{Objective, RangedConstraintRelation, RangedConstraintRelationKind, VariableType};
    use crate::data::linear_program::general_form::{GeneralForm, Variable};

    fn variable(name: &str, variable_type: VariableType, lower_bound: Option<f64>, upper_bound: Option<f64>) -> Variable<f64> {
        Variable {
            name: name.to_string(),
            variable_type,
            cost: 1_f64,
            lower_bound,
            upper_bound,
        }
    }

    fn general_form() -> GeneralForm<f64> {
        GeneralForm::new(
            None,
            Objective::Maximize,
            None,
            0_f64,
            ColumnMajor::new(
                vec![vec![(0, 1_f64), (1, 2_f64)], vec![(1, 3_f64)], vec![(0, -1_f64)]],
                2,
                3,
            ),
            vec!["first".to_string(), "second".to_string()],
            vec![RangedConstraintRelation::Range(2_f64), RangedConstraintRelation::Less],
            vec![4_f64, 5_f64],
            vec![
                variable("flow(a_b_0)", VariableType::Continuous, Some(0_f64), None),
                variable("flow(a_b_1)", VariableType::Integer, Some(0_f64), Some(1_f64)),
                variable("status", VariableType::Integer, None, None),
            ],
        )
    }

    #[test]
    fn indices() {
        let general_form = general_form();
        assert_eq!(general_form.variable_index("status"), Some(2));
        assert_eq!(general_form.variable_index("x"), None);
        assert_eq!(general_form.constraint_index("second"), Some(1));
    }

    #[test]
    fn statistics() {
        let statistics = general_form().statistics();
        assert_eq!(statistics.constraints[RangedConstraintRelationKind::Range], 1);
        assert_eq!(statistics.constraints[RangedConstraintRelationKind::Less], 1);
        assert_eq!(statistics.constraints[RangedConstraintRelationKind::Equal], 0);
        assert_eq!(statistics.variables[VariableType::Integer], 2);
        assert_eq!(statistics.non_zeros, 4);
        assert_eq!(
            statistics.to_string(),
            "2 constraints (Equal: 0, Range: 1, Less: 1, Greater: 0), 3 variables (Continuous: 1, Integer: 2), 4 nonzeros",
        );
    }

    #[test]
    fn identifiers() {
        let general_form = general_form();
        let time_indices = general_form.variable_identifiers().iter()
            .map(|identifier| identifier.time_index())
            .collect::<Vec<_>>();
        assert_eq!(time_indices, vec![Some(0), Some(1), None]);
    }

    #[test]
    fn variable_properties() {
        let general_form = general_form();
        let variables = general_form.variables();
        assert!(!variables[0].is_binary());
        assert!(variables[1].is_binary());
        assert!(variables[2].is_free());
        assert_eq!(variables[1].is_fixed(), None);

        let fixed = variable("x", VariableType::Continuous, Some(3_f64), Some(3_f64));
        assert_eq!(fixed.is_fixed(), Some(&3_f64));
    }
}
