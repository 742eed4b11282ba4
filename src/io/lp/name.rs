//! # Naming conventions
//!
//! Modeling tools encode information in the names they write. Constraint labels carry a prefix
//! describing the relation of the row, and variable names describe what the variable models, like
//! `flow(gas_powerplant_gas_0)`: a flow between two nodes at time step 0.
use crate::data::linear_program::elements::ConstraintRelation;
use crate::io::lp::token::{
    EQUALITY_PREFIX, LOWER_PREFIX, RANGE_LOWER_PREFIX, RANGE_UPPER_PREFIX, UPPER_PREFIX,
};

/// Kind of constraint a label prefix announces.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Convention {
    /// `c_e_`
    Equal,
    /// `c_u_`, the expression is bounded from above.
    Upper,
    /// `c_l_`, the expression is bounded from below.
    Lower,
    /// `r_l_`, the lower half of a ranged constraint.
    RangeLower,
    /// `r_u_`, the upper half of a ranged constraint.
    RangeUpper,
}

impl Convention {
    const ALL: [Convention; 5] = [
        Convention::Equal,
        Convention::Upper,
        Convention::Lower,
        Convention::RangeLower,
        Convention::RangeUpper,
    ];

    /// Label prefix.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Convention::Equal => EQUALITY_PREFIX,
            Convention::Upper => UPPER_PREFIX,
            Convention::Lower => LOWER_PREFIX,
            Convention::RangeLower => RANGE_LOWER_PREFIX,
            Convention::RangeUpper => RANGE_UPPER_PREFIX,
        }
    }

    /// Relation a constraint with this prefix should have.
    #[must_use]
    pub fn relation(self) -> ConstraintRelation {
        match self {
            Convention::Equal => ConstraintRelation::Equal,
            Convention::Upper | Convention::RangeUpper => ConstraintRelation::Less,
            Convention::Lower | Convention::RangeLower => ConstraintRelation::Greater,
        }
    }
}

/// A constraint label, split into its prefix and the name of the constraint.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Label<'a> {
    full: &'a str,
    convention: Option<Convention>,
    name: &'a str,
}

impl<'a> Label<'a> {
    /// Split a label.
    ///
    /// A label consisting of only a prefix is not considered to follow the convention.
    #[must_use]
    pub fn new(full: &'a str) -> Self {
        Convention::ALL.iter()
            .find_map(|&convention| {
                full.strip_prefix(convention.prefix())
                    .filter(|name| !name.is_empty())
                    .map(|name| Self { full, convention: Some(convention), name })
            })
            .unwrap_or(Self { full, convention: None, name: full })
    }

    /// The label as written.
    #[must_use]
    pub fn full(&self) -> &'a str {
        self.full
    }

    /// Prefix the label starts with, if any.
    #[must_use]
    pub fn convention(&self) -> Option<Convention> {
        self.convention
    }

    /// Label without the prefix.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Relation a constraint with this label should have, if the label follows the convention.
    #[must_use]
    pub fn expected_relation(&self) -> Option<ConstraintRelation> {
        self.convention.map(Convention::relation)
    }
}

/// A structured variable name like `flow(gas_powerplant_gas_0)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Identifier<'a> {
    base: &'a str,
    index: Option<&'a str>,
}

impl<'a> Identifier<'a> {
    /// Split a variable name in the part before the parentheses and the part between them.
    ///
    /// Names without a closing parenthesis at the end have no index.
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        let split = name.strip_suffix(')')
            .and_then(|inner| inner.split_once('('))
            .filter(|(base, _)| !base.is_empty());

        match split {
            Some((base, index)) => Self { base, index: Some(index) },
            None => Self { base: name, index: None },
        }
    }

    /// Name of the variable family, like `flow`.
    #[must_use]
    pub fn base(&self) -> &'a str {
        self.base
    }

    /// Text between the parentheses.
    #[must_use]
    pub fn index(&self) -> Option<&'a str> {
        self.index
    }

    /// Components of the index.
    ///
    /// Separated by commas, or when the name was written with symbols replaced, by underscores.
    #[must_use]
    pub fn parts(&self) -> Vec<&'a str> {
        match self.index {
            Some(index) if index.contains(',') => index.split(',').map(str::trim).collect(),
            Some(index) => index.split('_').filter(|part| !part.is_empty()).collect(),
            None => Vec::with_capacity(0),
        }
    }

    /// The last component of the index, if it is an integer.
    ///
    /// In energy system models, this is typically the time step.
    #[must_use]
    pub fn time_index(&self) -> Option<usize> {
        self.parts().last().and_then(|part| part.parse().ok())
    }
}
