//! # Comparing linear programs
//!
//! Two programs are equivalent when they describe the same rows and columns, regardless of the
//! order in which those appear. Rows and variables are matched by name.
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::data::linear_program::general_form::{GeneralForm, Variable};

/// The first structural difference found between two linear programs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Difference {
    /// Minimization versus maximization.
    Objective,
    /// The constant in the objective function.
    FixedCost,
    /// Number of constraints, `(left, right)`.
    NrConstraints(usize, usize),
    /// Number of variables, `(left, right)`.
    NrVariables(usize, usize),
    /// A constraint of the left program has no counterpart in the right program.
    MissingConstraint(String),
    /// A variable of the left program has no counterpart in the right program.
    MissingVariable(String),
    /// The relation of a constraint, including the size of a range.
    ConstraintType(String),
    /// The right-hand side of a constraint.
    RightHandSide(String),
    /// A coefficient in the constraint matrix.
    Coefficient {
        /// Row of the coefficient.
        constraint: String,
        /// Column of the coefficient.
        variable: String,
    },
    /// Integer versus continuous.
    VariableType(String),
    /// The cost of a variable.
    Cost(String),
    /// The lower bound of a variable.
    LowerBound(String),
    /// The upper bound of a variable.
    UpperBound(String),
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Objective => f.write_str("objective direction differs"),
            Difference::FixedCost => f.write_str("fixed cost differs"),
            Difference::NrConstraints(left, right) => {
                write!(f, "number of constraints differs: {left} versus {right}")
            },
            Difference::NrVariables(left, right) => {
                write!(f, "number of variables differs: {left} versus {right}")
            },
            Difference::MissingConstraint(name) => write!(f, "constraint \"{name}\" is missing"),
            Difference::MissingVariable(name) => write!(f, "variable \"{name}\" is missing"),
            Difference::ConstraintType(name) => {
                write!(f, "relation of constraint \"{name}\" differs")
            },
            Difference::RightHandSide(name) => {
                write!(f, "right-hand side of constraint \"{name}\" differs")
            },
            Difference::Coefficient { constraint, variable } => write!(
                f,
                "coefficient of variable \"{variable}\" in constraint \"{constraint}\" differs",
            ),
            Difference::VariableType(name) => write!(f, "type of variable \"{name}\" differs"),
            Difference::Cost(name) => write!(f, "cost of variable \"{name}\" differs"),
            Difference::LowerBound(name) => write!(f, "lower bound of variable \"{name}\" differs"),
            Difference::UpperBound(name) => write!(f, "upper bound of variable \"{name}\" differs"),
        }
    }
}

impl<F: PartialEq> GeneralForm<F> {
    /// Find the first structural difference with another linear program.
    ///
    /// Names of the model and objective function are not compared.
    ///
    /// # Return value
    ///
    /// `None` if the programs are equivalent.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Option<Difference> {
        if self.objective != other.objective {
            return Some(Difference::Objective);
        }
        if self.fixed_cost != other.fixed_cost {
            return Some(Difference::FixedCost);
        }
        if self.nr_constraints() != other.nr_constraints() {
            return Some(Difference::NrConstraints(self.nr_constraints(), other.nr_constraints()));
        }
        if self.nr_variables() != other.nr_variables() {
            return Some(Difference::NrVariables(self.nr_variables(), other.nr_variables()));
        }

        let other_columns = other.variables.iter()
            .enumerate()
            .map(|(j, variable)| (variable.name.as_str(), j))
            .collect::<HashMap<_, _>>();
        let other_rows_by_name = other.constraint_names.iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect::<HashMap<_, _>>();

        // Column index in `other` for each column in `self`
        let mut column_map = Vec::with_capacity(self.nr_variables());
        for variable in &self.variables {
            let Some(&j) = other_columns.get(variable.name.as_str()) else {
                return Some(Difference::MissingVariable(variable.name.clone()));
            };
            if let Some(difference) = variable_difference(variable, &other.variables[j]) {
                return Some(difference);
            }
            column_map.push(j);
        }

        let rows = self.constraints.to_row_major();
        let other_rows = other.constraints.to_row_major();
        for (i, name) in self.constraint_names.iter().enumerate() {
            let Some(&other_i) = other_rows_by_name.get(name.as_str()) else {
                return Some(Difference::MissingConstraint(name.clone()));
            };
            if self.constraint_types[i] != other.constraint_types[other_i] {
                return Some(Difference::ConstraintType(name.clone()));
            }
            if self.b[i] != other.b[other_i] {
                return Some(Difference::RightHandSide(name.clone()));
            }

            let mut row = rows[i].iter()
                .map(|&(j, value)| (column_map[j], value))
                .collect::<Vec<_>>();
            row.sort_unstable_by_key(|&(j, _)| j);
            let other_row = &other_rows[other_i];

            let differing_column = row.iter().zip(other_row)
                .find(|((j, value), (other_j, other_value))| {
                    j != other_j || value != other_value
                })
                .map(|((j, _), (other_j, _))| (*j).min(*other_j))
                .or_else(|| match row.len().cmp(&other_row.len()) {
                    Ordering::Less => Some(other_row[row.len()].0),
                    Ordering::Greater => Some(row[other_row.len()].0),
                    Ordering::Equal => None,
                });
            if let Some(j) = differing_column {
                return Some(Difference::Coefficient {
                    constraint: name.clone(),
                    variable: other.variables[j].name.clone(),
                });
            }
        }

        None
    }
}

fn variable_difference<F: PartialEq>(
    left: &Variable<F>,
    right: &Variable<F>,
) -> Option<Difference> {
    let name = || left.name.clone();

    if left.variable_type != right.variable_type {
        Some(Difference::VariableType(name()))
    } else if left.cost != right.cost {
        Some(Difference::Cost(name()))
    } else if left.lower_bound != right.lower_bound {
        Some(Difference::LowerBound(name()))
    } else if left.upper_bound != right.upper_bound {
        Some(Difference::UpperBound(name()))
    } else {
        None
    }
}
