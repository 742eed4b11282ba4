//! # Writing LP files
//!
//! Writes a `GeneralForm` in the layout that Pyomo uses: one term per line, labels with a prefix
//! describing the relation, constant offsets expressed through `ONE_VAR_CONSTANT` and explicit
//! bounds for every variable.
use std::fmt::{self, Write};

use num_traits::Zero;
use tracing::trace;

use crate::data::linear_program::elements::{
    ConstraintRelation, RangedConstraintRelation, VariableType,
};
use crate::data::linear_program::general_form::GeneralForm;
use crate::io::lp::name::Convention;
use crate::io::lp::number::traits::{Field, Format};
use crate::io::lp::Section;
use crate::io::lp::token::{
    BLOCK_COMMENT_END, BLOCK_COMMENT_START, DEFAULT_OBJECTIVE_NAME, EQUALITY_PREFIX,
    LABEL_SEPARATOR, ONE_VAR_CONSTANT, ONE_VAR_CONSTANT_VALUE, SOURCE_COMMENT,
};
use crate::io::options::{ConstantRow, ExportOptions};

/// Indentation of the lines in the bounds, binary and general sections.
const INDENT: &str = "   ";

/// Write a linear program to a `String`.
///
/// # Errors
///
/// Only if formatting of a value fails.
pub fn to_string<F: Field + Format>(
    general_form: &GeneralForm<F>,
    options: &ExportOptions,
) -> Result<String, fmt::Error> {
    let mut text = String::new();
    write(general_form, options, &mut text)?;

    Ok(text)
}

/// Write a linear program.
///
/// # Arguments
///
/// * `general_form`: Program to write.
/// * `options`: Whether to write a header comment and when to write the `ONE_VAR_CONSTANT` row.
/// * `out`: Destination of the text.
///
/// # Errors
///
/// If writing to `out` fails.
pub fn write<F: Field + Format, W: Write>(
    general_form: &GeneralForm<F>,
    options: &ExportOptions,
    out: &mut W,
) -> fmt::Result {
    if options.source_comment {
        if let Some(name) = general_form.name() {
            writeln!(out, "{BLOCK_COMMENT_START} {SOURCE_COMMENT}{name} {BLOCK_COMMENT_END}")?;
            writeln!(out)?;
        }
    }

    // An unfolded program carries its own constant variable or defining row
    let constant_in_program = general_form.variable_index(ONE_VAR_CONSTANT).is_some()
        || general_form.constraint_index(ONE_VAR_CONSTANT).is_some();

    let needs_constant = write_objective(general_form, constant_in_program, out)?;

    writeln!(out, "{}", Section::Constraints)?;
    writeln!(out)?;
    let needs_constant = write_constraints(general_form, out)? || needs_constant;
    let write_constant_row = !constant_in_program && match options.constant_row {
        ConstantRow::Always => true,
        ConstantRow::WhenNeeded => needs_constant,
    };
    if write_constant_row {
        writeln!(out, "{EQUALITY_PREFIX}{ONE_VAR_CONSTANT}{LABEL_SEPARATOR} ")?;
        writeln!(out, "{ONE_VAR_CONSTANT} {} {ONE_VAR_CONSTANT_VALUE}", ConstraintRelation::Equal)?;
        writeln!(out)?;
    }

    write_bounds(general_form, out)?;
    write_integers(general_form, out)?;
    writeln!(out, "{}", Section::End)?;

    trace!(
        constraints = general_form.nr_constraints(),
        variables = general_form.nr_variables(),
        constant_row = write_constant_row,
        "wrote LP text",
    );

    Ok(())
}

/// Write the objective function.
///
/// # Arguments
///
/// * `general_form`: Program to write.
/// * `constant_in_program`: Whether `ONE_VAR_CONSTANT` is an ordinary variable or row of the
/// program. The fixed cost is then written as a plain number.
/// * `out`: Destination of the text.
///
/// # Return value
///
/// Whether `ONE_VAR_CONSTANT` was used for the fixed cost.
fn write_objective<F: Field + Format, W: Write>(
    general_form: &GeneralForm<F>,
    constant_in_program: bool,
    out: &mut W,
) -> Result<bool, fmt::Error> {
    writeln!(out, "{} ", Section::Objective(general_form.objective()))?;
    let name = general_form.objective_name().unwrap_or(DEFAULT_OBJECTIVE_NAME);
    writeln!(out, "{name}{LABEL_SEPARATOR}")?;

    let mut any_term = false;
    for variable in general_form.variables() {
        if !variable.cost.is_zero() {
            write_term(&variable.cost, &variable.name, out)?;
            any_term = true;
        }
    }
    let fixed_cost = general_form.fixed_cost();
    let write_fixed_cost = !fixed_cost.is_zero() || !any_term;
    let needs_constant = write_fixed_cost && !constant_in_program;
    if needs_constant {
        write_term(fixed_cost, ONE_VAR_CONSTANT, out)?;
    } else if write_fixed_cost {
        write_constant(fixed_cost, out)?;
    }
    writeln!(out)?;

    Ok(needs_constant)
}

/// Write all constraints, a ranged constraint as two rows.
///
/// # Return value
///
/// Whether `ONE_VAR_CONSTANT` was used, which happens for rows without coefficients.
fn write_constraints<F: Field + Format, W: Write>(
    general_form: &GeneralForm<F>,
    out: &mut W,
) -> Result<bool, fmt::Error> {
    let variables = general_form.variables();
    let rows = general_form.constraints().to_row_major();
    let mut needs_constant = false;

    for (i, row) in rows.iter().enumerate() {
        let name = &general_form.constraint_names()[i];
        let b = &general_form.b()[i];

        let mut write_row = |convention: Convention, rhs: &F, out: &mut W| -> fmt::Result {
            writeln!(out, "{}{name}{LABEL_SEPARATOR}", convention.prefix())?;
            if row.is_empty() {
                needs_constant = true;
                write_term(&F::zero(), ONE_VAR_CONSTANT, out)?;
            }
            for &(j, coefficient) in row {
                write_term(coefficient, &variables[j].name, out)?;
            }
            writeln!(out, "{} {}", convention.relation(), rhs.format())?;
            writeln!(out)
        };

        match &general_form.constraint_types()[i] {
            RangedConstraintRelation::Equal => write_row(Convention::Equal, b, out)?,
            RangedConstraintRelation::Less => write_row(Convention::Upper, b, out)?,
            RangedConstraintRelation::Greater => write_row(Convention::Lower, b, out)?,
            RangedConstraintRelation::Range(range) => {
                let lower = b.clone() - range.clone();
                write_row(Convention::RangeLower, &lower, out)?;
                write_row(Convention::RangeUpper, b, out)?;
            },
        }
    }

    Ok(needs_constant)
}

/// Write a bound line for every variable.
fn write_bounds<F: Field + Format, W: Write>(
    general_form: &GeneralForm<F>,
    out: &mut W,
) -> fmt::Result {
    writeln!(out, "{}", Section::Bounds)?;
    for variable in general_form.variables() {
        let lower = variable.lower_bound.as_ref().map_or_else(|| "-inf".to_string(), Format::format);
        let upper = variable.upper_bound.as_ref().map_or_else(|| "+inf".to_string(), Format::format);
        let less = ConstraintRelation::Less;
        writeln!(out, "{INDENT}{lower} {less} {} {less} {upper}", variable.name)?;
    }

    Ok(())
}

/// Write the `binary` and `general` sections, if there are variables to list in them.
fn write_integers<F: Field + Format, W: Write>(
    general_form: &GeneralForm<F>,
    out: &mut W,
) -> fmt::Result {
    let (binary, general): (Vec<_>, Vec<_>) = general_form.variables().iter()
        .filter(|variable| variable.variable_type == VariableType::Integer)
        .partition(|variable| variable.is_binary());

    for (section, variables) in [(Section::Binary, binary), (Section::General, general)] {
        if !variables.is_empty() {
            writeln!(out, "{section}")?;
            for variable in variables {
                writeln!(out, "{INDENT}{}", variable.name)?;
            }
        }
    }

    Ok(())
}

/// Write a term as `+c name` or `-c name`.
fn write_term<F: Format, W: Write>(coefficient: &F, name: &str, out: &mut W) -> fmt::Result {
    let sign = if coefficient.is_negative() { "" } else { "+" };
    writeln!(out, "{sign}{} {name}", coefficient.format())
}

/// Write a number without a variable, as `+c` or `-c`.
fn write_constant<F: Format, W: Write>(value: &F, out: &mut W) -> fmt::Result {
    let sign = if value.is_negative() { "" } else { "+" };
    writeln!(out, "{sign}{}", value.format())
}
