//! # Organizing data read
//!
//! Converting an `LP` into a `GeneralForm`, applying the conventions of the format: folding of the
//! `ONE_VAR_CONSTANT` variable, stripping of label prefixes and merging of ranged constraints.
//! Logical problems with the program are reported as an `Inconsistency`.
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use itertools::Itertools;
use num_traits::{One, Zero};
use tracing::{debug, warn};

use crate::data::linear_algebra::SparseTupleVec;
use crate::data::linear_algebra::matrix::ColumnMajor;
use crate::data::linear_program::elements::{
    ConstraintRelation, RangedConstraintRelation, VariableType,
};
use crate::data::linear_program::general_form::{GeneralForm, Variable};
use crate::io::error::Inconsistency;
use crate::io::lp::{BoundType, Constraint, LP, Terms};
use crate::io::lp::name::{Convention, Label};
use crate::io::lp::number::traits::Field;
use crate::io::lp::token::{ONE_VAR_CONSTANT, UNLABELED_ROW_PREFIX};
use crate::io::options::ImportOptions;

impl<F: Field> TryFrom<LP<F>> for GeneralForm<F> {
    type Error = Inconsistency;

    /// Convert an `LP` into a `GeneralForm` linear program using the default options.
    fn try_from(lp: LP<F>) -> Result<Self, Self::Error> {
        lp.into_general_form(&ImportOptions::default())
    }
}

impl<F: Field> LP<F> {
    /// Convert into a `GeneralForm` linear program.
    ///
    /// # Errors
    ///
    /// If the program can't be made sense of: a variable without feasible values, a ranged
    /// constraint of which the halves disagree, or a broken naming convention when
    /// `strict_labels` is set.
    pub fn into_general_form(
        self,
        options: &ImportOptions,
    ) -> Result<GeneralForm<F>, Inconsistency> {
        let LP {
            name,
            objective,
            objective_name,
            objective_terms,
            objective_constant,
            constraints,
            variables: variable_names,
            bounds,
            general,
            binary,
        } = self;

        let constant = if options.fold_one_var_constant {
            variable_names.iter().position(|name| name == ONE_VAR_CONSTANT)
        } else { None };

        let mut fixed_cost = objective_constant;
        let mut costs = vec![F::zero(); variable_names.len()];
        for (j, coefficient) in objective_terms {
            if Some(j) == constant {
                fixed_cost = fixed_cost + coefficient;
            } else {
                costs[j] = coefficient;
            }
        }

        let constraints = match constant {
            Some(constant) => fold_constant(constraints, constant)?,
            None => constraints.into_iter()
                .map(|mut constraint| {
                    constraint.terms.retain(|(_, coefficient)| !coefficient.is_zero());
                    constraint
                })
                .collect(),
        };
        let rows = organize_rows(constraints, options.strict_labels)?;

        let mut variables = compute_variables(variable_names, costs, bounds, &general, &binary)?;
        if let Some(constant) = constant {
            let removed = variables.remove(constant);
            if !admits_one(&removed) {
                return Err(Inconsistency::new(format!(
                    "Variable \"{ONE_VAR_CONSTANT}\" is bounded such that it can't have value 1.",
                )));
            }
        }

        // Column indices after removal of the constant
        let column_index = |j: usize| match constant {
            Some(constant) if j > constant => j - 1,
            _ => j,
        };
        let nr_rows = rows.len();
        let mut columns = vec![SparseTupleVec::new(); variables.len()];
        let mut constraint_names = Vec::with_capacity(nr_rows);
        let mut constraint_types = Vec::with_capacity(nr_rows);
        let mut b = Vec::with_capacity(nr_rows);
        for (i, row) in rows.into_iter().enumerate() {
            // Rows are visited in order, so the columns stay sorted
            for (j, coefficient) in row.terms {
                columns[column_index(j)].push((i, coefficient));
            }
            constraint_names.push(row.name);
            constraint_types.push(row.relation);
            b.push(row.rhs);
        }

        debug!(
            constraints = nr_rows,
            variables = variables.len(),
            folded_constant = constant.is_some(),
            "converted LP to general form",
        );

        let nr_columns = variables.len();
        Ok(GeneralForm::new(
            name,
            objective,
            objective_name,
            fixed_cost,
            ColumnMajor::new(columns, nr_rows, nr_columns),
            constraint_names,
            constraint_types,
            b,
            variables,
        ))
    }
}

/// Move all `ONE_VAR_CONSTANT` terms to the right-hand side, and remove the rows defining its
/// value.
///
/// A row defines the constant when `ONE_VAR_CONSTANT` is its only term and it is either labeled
/// `c_e_ONE_VAR_CONSTANT` or an equality. Other rows with only that term become rows without
/// coefficients.
///
/// # Arguments
///
/// * `constraints`: Constraints as read.
/// * `constant`: Index of the `ONE_VAR_CONSTANT` variable.
///
/// # Return value
///
/// The remaining constraints, without zero coefficients.
///
/// # Errors
///
/// If a row defining the constant doesn't fix it to 1.
fn fold_constant<F: Field>(
    constraints: Vec<Constraint<F>>,
    constant: usize,
) -> Result<Vec<Constraint<F>>, Inconsistency> {
    let mut folded = Vec::with_capacity(constraints.len());
    let mut nr_definitions = 0;

    for mut constraint in constraints {
        constraint.terms.retain(|(_, coefficient)| !coefficient.is_zero());

        let definition = match constraint.terms.as_slice() {
            [(j, coefficient)] if *j == constant && defines_constant(&constraint) => {
                Some(coefficient.clone())
            },
            _ => None,
        };
        match definition {
            Some(coefficient) => {
                let fixes_to_one = constraint.relation == ConstraintRelation::Equal
                    && coefficient == constraint.rhs;
                if !fixes_to_one {
                    return Err(Inconsistency::new(format!(
                        "Constraint at line {} should fix \"{ONE_VAR_CONSTANT}\" to 1.",
                        constraint.line_number,
                    )));
                }
                nr_definitions += 1;
            },
            None => {
                let position = constraint.terms.iter().position(|&(j, _)| j == constant);
                if let Some(position) = position {
                    let (_, coefficient) = constraint.terms.remove(position);
                    constraint.rhs = constraint.rhs - coefficient;
                }
                folded.push(constraint);
            },
        }
    }

    if nr_definitions == 0 {
        warn!(
            variable = ONE_VAR_CONSTANT,
            "no constraint fixes the constant variable, assuming value 1",
        );
    }

    Ok(folded)
}

fn defines_constant<F>(constraint: &Constraint<F>) -> bool {
    let labeled = constraint.label.as_deref()
        .map(Label::new)
        .is_some_and(|label| {
            label.convention() == Some(Convention::Equal) && label.name() == ONE_VAR_CONSTANT
        });

    labeled || constraint.relation == ConstraintRelation::Equal
}

/// A constraint with its final name and relation.
struct Row<F> {
    name: String,
    terms: Terms<F>,
    relation: RangedConstraintRelation<F>,
    rhs: F,
}

/// Give each constraint its name and merge the halves of ranged constraints.
///
/// Constraints keep their order; a merged ranged constraint takes the place of its first half.
///
/// # Errors
///
/// If two halves of a ranged constraint disagree, if names collide, or, when `strict` is set, if
/// the naming convention is not followed.
fn organize_rows<F: Field>(
    constraints: Vec<Constraint<F>>,
    strict: bool,
) -> Result<Vec<Row<F>>, Inconsistency> {
    let mut rows = Vec::with_capacity(constraints.len());
    // Halves of ranged constraints without partner so far: bare name -> (row index, convention)
    let mut unpaired: HashMap<String, (usize, Convention)> = HashMap::new();

    for (i, constraint) in constraints.into_iter().enumerate() {
        let Constraint { label, terms, relation, rhs, line_number } = constraint;
        let Some(full) = label else {
            rows.push(Row {
                name: format!("{UNLABELED_ROW_PREFIX}{}", i + 1),
                terms,
                relation: relation.into(),
                rhs,
            });
            continue;
        };

        let label = Label::new(&full);
        let convention = match label.convention() {
            Some(convention) if convention.relation() == relation => convention,
            Some(convention) => {
                if strict {
                    return Err(Inconsistency::new(format!(
                        "Constraint \"{full}\" at line {line_number} has prefix \"{}\" but \
                         relation \"{relation}\".",
                        convention.prefix(),
                    )));
                }
                warn!(
                    label = %full,
                    line_number,
                    %relation,
                    "label prefix doesn't match the relation, keeping the full label",
                );
                rows.push(Row { name: full, terms, relation: relation.into(), rhs });
                continue;
            },
            None => {
                rows.push(Row { name: full, terms, relation: relation.into(), rhs });
                continue;
            },
        };

        let bare = label.name().to_string();
        match convention {
            Convention::Equal | Convention::Upper | Convention::Lower => {
                rows.push(Row { name: bare, terms, relation: relation.into(), rhs });
            },
            Convention::RangeLower | Convention::RangeUpper => match unpaired.entry(bare) {
                Entry::Occupied(entry) if entry.get().1 != convention => {
                    let (bare, (index, _)) = entry.remove_entry();
                    let first = &mut rows[index];
                    if first.terms != terms {
                        return Err(Inconsistency::new(format!(
                            "The two halves of ranged constraint \"{bare}\" have different terms.",
                        )));
                    }
                    let (lower, upper) = match convention {
                        Convention::RangeUpper => (first.rhs.clone(), rhs),
                        _ => (rhs, first.rhs.clone()),
                    };
                    first.relation = range_relation(&bare, &lower, &upper)?;
                    first.rhs = upper;
                    first.name = bare;
                },
                Entry::Occupied(_) => return Err(Inconsistency::new(format!(
                    "Ranged constraint half \"{full}\" appears more than once.",
                ))),
                Entry::Vacant(entry) => {
                    entry.insert((rows.len(), convention));
                    rows.push(Row { name: full, terms, relation: relation.into(), rhs });
                },
            },
        }
    }

    if let Some(index) = unpaired.values().map(|&(index, _)| index).min() {
        let name = &rows[index].name;
        if strict {
            return Err(Inconsistency::new(format!(
                "Ranged constraint half \"{name}\" has no counterpart.",
            )));
        }
        for (index, _) in unpaired.values() {
            warn!(
                label = %rows[*index].name,
                "ranged constraint half has no counterpart, reading it as a single inequality",
            );
        }
    }

    if let Some(name) = rows.iter().map(|row| row.name.as_str()).duplicates().next() {
        return Err(Inconsistency::new(format!(
            "Constraint name \"{name}\" appears more than once after removing label prefixes.",
        )));
    }

    Ok(rows)
}

/// Relation of a ranged constraint `lower <= <a, x> <= upper`.
fn range_relation<F: Field>(
    name: &str,
    lower: &F,
    upper: &F,
) -> Result<RangedConstraintRelation<F>, Inconsistency> {
    if lower > upper {
        Err(Inconsistency::new(format!(
            "Ranged constraint \"{name}\" has lower value {lower} above upper value {upper}.",
        )))
    } else if lower == upper {
        Ok(RangedConstraintRelation::Equal)
    } else {
        Ok(RangedConstraintRelation::Range(upper.clone() - lower.clone()))
    }
}

/// Create the variables with their bounds and types.
///
/// # Arguments
///
/// * `names`: Names of all variables.
/// * `costs`: Cost coefficient of each variable.
/// * `bounds`: Bounds in file order; later bounds override earlier ones on the same side.
/// * `general`: Indices of integer variables.
/// * `binary`: Indices of binary variables.
///
/// # Errors
///
/// If a variable has no feasible values.
fn compute_variables<F: Field>(
    names: Vec<String>,
    costs: Vec<F>,
    bounds: Vec<(usize, BoundType<F>)>,
    general: &[usize],
    binary: &[usize],
) -> Result<Vec<Variable<F>>, Inconsistency> {
    debug_assert_eq!(names.len(), costs.len());

    let mut variables = names.into_iter().zip(costs)
        .map(|(name, cost)| Variable {
            name,
            variable_type: VariableType::Continuous,
            cost,
            lower_bound: Some(F::zero()),
            upper_bound: None,
        })
        .collect::<Vec<_>>();
    // Variables whose lower bound was set explicitly don't get the default lower bound
    let mut explicit_lower = vec![false; variables.len()];

    for (j, bound) in bounds {
        let variable = &mut variables[j];
        match bound {
            BoundType::Lower(value) => {
                variable.lower_bound = Some(value);
                explicit_lower[j] = true;
            },
            BoundType::Upper(value) => variable.upper_bound = Some(value),
            BoundType::Fixed(value) => {
                variable.lower_bound = Some(value.clone());
                variable.upper_bound = Some(value);
                explicit_lower[j] = true;
            },
            BoundType::Free => {
                variable.lower_bound = None;
                variable.upper_bound = None;
                explicit_lower[j] = true;
            },
            BoundType::LowerMinusInfinity => {
                variable.lower_bound = None;
                explicit_lower[j] = true;
            },
            BoundType::UpperInfinity => variable.upper_bound = None,
        }
    }

    for (variable, explicit) in variables.iter_mut().zip(explicit_lower) {
        let negative_upper = variable.upper_bound.as_ref()
            .is_some_and(|upper| upper < &F::zero());
        if negative_upper && !explicit {
            warn!(
                variable = %variable.name,
                "negative upper bound without lower bound, making the lower bound -inf",
            );
            variable.lower_bound = None;
        }
    }

    for &j in general {
        variables[j].variable_type = VariableType::Integer;
    }
    for &j in binary {
        let variable = &mut variables[j];
        variable.variable_type = VariableType::Integer;
        variable.lower_bound = Some(F::zero());
        variable.upper_bound = Some(F::one());
    }

    let infeasible = variables.iter()
        .find(|variable| match (&variable.lower_bound, &variable.upper_bound) {
            (Some(lower), Some(upper)) => lower > upper,
            _ => false,
        });
    if let Some(variable) = infeasible {
        return Err(Inconsistency::new(format!(
            "Variable \"{}\" has a lower bound above its upper bound.", variable.name,
        )));
    }

    Ok(variables)
}

fn admits_one<F: Field>(variable: &Variable<F>) -> bool {
    let one = F::one();
    variable.lower_bound.as_ref().is_none_or(|lower| lower <= &one)
        && variable.upper_bound.as_ref().is_none_or(|upper| upper >= &one)
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::{RangedConstraintRelation, VariableType};
    use crate::data::linear_program::general_form::GeneralForm;
    use crate::io::error::Inconsistency;
    use crate::io::lp::parse;
    use crate::io::options::ImportOptions;

    fn convert(text: &str, options: &ImportOptions) -> Result<GeneralForm<f64>, Inconsistency> {
        parse::<f64>(text).unwrap().into_general_form(options)
    }

    fn strict() -> ImportOptions {
        ImportOptions { strict_labels: true, ..ImportOptions::default() }
    }

    #[test]
    fn fold_constant() {
        let text = "min\nobj:\n+2 x\n+3 ONE_VAR_CONSTANT\n-1 ONE_VAR_CONSTANT\ns.t.\n\
                    c_l_a:\n+1 x\n+4 ONE_VAR_CONSTANT\n>= 10\n\
                    c_e_ONE_VAR_CONSTANT:\nONE_VAR_CONSTANT = 1.0\nend";
        let result = convert(text, &ImportOptions::default()).unwrap();
        assert_eq!(result.fixed_cost(), &2_f64);
        assert_eq!(result.nr_constraints(), 1);
        assert_eq!(result.nr_variables(), 1);
        assert_eq!(result.b(), &[6_f64]);
        assert_eq!(result.constraint_types(), &[RangedConstraintRelation::Greater]);

        // Without folding, the constant is an ordinary variable
        let options = ImportOptions { fold_one_var_constant: false, ..ImportOptions::default() };
        let result = convert(text, &options).unwrap();
        assert_eq!(result.fixed_cost(), &0_f64);
        assert_eq!(result.nr_constraints(), 2);
        assert_eq!(result.variables()[1].cost, 2_f64);
        assert_eq!(result.constraint_names(), &["a", "ONE_VAR_CONSTANT"]);
    }

    #[test]
    fn constant_definition() {
        let text = "min\nx\ns.t.\nc_e_ONE_VAR_CONSTANT:\nONE_VAR_CONSTANT = 2\nend";
        assert!(convert(text, &ImportOptions::default()).is_err());
        let text = "min\nx\ns.t.\nc_e_ONE_VAR_CONSTANT:\n2 ONE_VAR_CONSTANT = 2\nend";
        assert!(convert(text, &ImportOptions::default()).is_ok());

        // Labeled as the definition, but not an equality
        let text = "min\nx\ns.t.\nc_e_ONE_VAR_CONSTANT:\nONE_VAR_CONSTANT >= 1\nend";
        assert!(convert(text, &ImportOptions::default()).is_err());

        let text = "min\nx + ONE_VAR_CONSTANT\nbounds\nONE_VAR_CONSTANT <= 4\nend";
        assert!(convert(text, &ImportOptions::default()).is_ok());
        let text = "min\nx + ONE_VAR_CONSTANT\nbounds\nONE_VAR_CONSTANT >= 4\nend";
        assert!(convert(text, &ImportOptions::default()).is_err());
    }

    #[test]
    fn constant_only_inequality() {
        let text = "min\nx\ns.t.\nc_u_cap:\n+1 ONE_VAR_CONSTANT\n<= 3\n\
                    c_l_floor:\n+2 ONE_VAR_CONSTANT\n>= -1\n\
                    c_e_ONE_VAR_CONSTANT:\nONE_VAR_CONSTANT = 1.0\nend";
        let result = convert(text, &strict()).unwrap();
        assert_eq!(result.constraint_names(), &["cap", "floor"]);
        assert_eq!(result.constraint_types(), &[
            RangedConstraintRelation::Less,
            RangedConstraintRelation::Greater,
        ]);
        assert_eq!(result.b(), &[2_f64, -3_f64]);
        assert_eq!(result.constraints().nr_non_zeros(), 0);
        assert_eq!(result.nr_variables(), 1);
    }

    #[test]
    fn labels() {
        let text = "max\nx\ns.t.\nc_u_a: x <= 1\nc_u_b: x >= 2\nx + y = 3\nplain: y >= 0\nend";
        let result = convert(text, &ImportOptions::default()).unwrap();
        assert_eq!(result.constraint_names(), &["a", "c_u_b", "R3", "plain"]);
        assert!(convert(text, &strict()).is_err());

        let text = "min\nx\ns.t.\nc_e_a: x = 1\nc_l_a: x >= 0\nend";
        assert!(convert(text, &ImportOptions::default()).is_err());
    }

    #[test]
    fn ranges() {
        let text = "min\nx\ns.t.\nr_u_a: x + y <= 8\nother: y >= 1\nr_l_a: y + x >= 3\n\
                    r_l_b: x >= 2\nr_u_b: x <= 2\nend";
        let result = convert(text, &ImportOptions::default()).unwrap();
        assert_eq!(result.constraint_names(), &["a", "other", "b"]);
        assert_eq!(result.constraint_types(), &[
            RangedConstraintRelation::Range(5_f64),
            RangedConstraintRelation::Greater,
            RangedConstraintRelation::Equal,
        ]);
        assert_eq!(result.b(), &[8_f64, 1_f64, 2_f64]);

        // Lower above upper
        let text = "min\nx\ns.t.\nr_l_a: x >= 3\nr_u_a: x <= 2\nend";
        assert!(convert(text, &ImportOptions::default()).is_err());
        // Different terms
        let text = "min\nx\ns.t.\nr_l_a: x >= 1\nr_u_a: 2 x <= 2\nend";
        assert!(convert(text, &ImportOptions::default()).is_err());
        // Unpaired half
        let text = "min\nx\ns.t.\nr_l_a: x >= 1\nend";
        let result = convert(text, &ImportOptions::default()).unwrap();
        assert_eq!(result.constraint_names(), &["r_l_a"]);
        assert_eq!(result.constraint_types(), &[RangedConstraintRelation::Greater]);
        assert!(convert(text, &strict()).is_err());
    }

    #[test]
    fn bounds() {
        let text = "min\nx + y + z + w + v + b\nbounds\nx <= 4\nx <= 6\ny <= -1\nz free\nz >= -3\n\
                    -2 <= w <= -1\ngeneral\nv\nbinary\nb\nend";
        let result = convert(text, &ImportOptions::default()).unwrap();
        let bounds = result.variables().iter()
            .map(|variable| (variable.lower_bound, variable.upper_bound))
            .collect::<Vec<_>>();
        assert_eq!(bounds, vec![
            (Some(0_f64), Some(6_f64)),
            (None, Some(-1_f64)),
            (Some(-3_f64), None),
            (Some(-2_f64), Some(-1_f64)),
            (Some(0_f64), None),
            (Some(0_f64), Some(1_f64)),
        ]);
        let types = result.variables().iter()
            .map(|variable| variable.variable_type)
            .collect::<Vec<_>>();
        assert_eq!(types, vec![
            VariableType::Continuous,
            VariableType::Continuous,
            VariableType::Continuous,
            VariableType::Continuous,
            VariableType::Integer,
            VariableType::Integer,
        ]);

        let text = "min\nx\nbounds\n3 <= x <= 2\nend";
        assert!(convert(text, &ImportOptions::default()).is_err());
    }

    #[test]
    fn zero_coefficients() {
        let text = "min\n0 x + y\ns.t.\nc: 0 x + y >= 1\nend";
        let result = convert(text, &ImportOptions::default()).unwrap();
        assert_eq!(result.constraints().nr_non_zeros(), 1);
        assert_eq!(result.variables()[0].cost, 0_f64);
    }
}
