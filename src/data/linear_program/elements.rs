//! # Building blocks to describe linear programs.
use std::fmt;

use enum_map::Enum;

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Objective {
    Maximize,
    #[default]
    Minimize,
}

/// A `ConstraintRelation` is a type of (in)equality.
///
/// Read from the left-hand side (the linear expression) to the right-hand side (the constant).
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConstraintRelation {
    Less,
    Equal,
    Greater,
}

impl ConstraintRelation {
    /// Relation that results when the two sides of the relation are swapped.
    ///
    /// `a <= b` is the same as `b >= a`.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Less => Self::Greater,
            Self::Equal => Self::Equal,
            Self::Greater => Self::Less,
        }
    }
}

impl fmt::Display for ConstraintRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Less => "<=",
            Self::Equal => "=",
            Self::Greater => ">=",
        })
    }
}

/// A `ConstraintRelation` that can also describe a range.
///
/// A range constraint `Range(r)` with right-hand side `b` reads `b - r <= <a, x> <= b`, where
/// `r` is not negative.
#[allow(missing_docs)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RangedConstraintRelation<F> {
    Equal,
    Range(F),
    Less,
    Greater,
}

impl<F> RangedConstraintRelation<F> {
    /// The kind of relation, without the range value.
    #[must_use]
    pub fn kind(&self) -> RangedConstraintRelationKind {
        match self {
            Self::Equal => RangedConstraintRelationKind::Equal,
            Self::Range(_) => RangedConstraintRelationKind::Range,
            Self::Less => RangedConstraintRelationKind::Less,
            Self::Greater => RangedConstraintRelationKind::Greater,
        }
    }
}

impl<F> From<ConstraintRelation> for RangedConstraintRelation<F> {
    fn from(relation: ConstraintRelation) -> Self {
        match relation {
            ConstraintRelation::Less => Self::Less,
            ConstraintRelation::Equal => Self::Equal,
            ConstraintRelation::Greater => Self::Greater,
        }
    }
}

/// Field-less variant of the `RangedConstraintRelation`, used for counting.
#[allow(missing_docs)]
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RangedConstraintRelationKind {
    Equal,
    Range,
    Less,
    Greater,
}

/// A variable is either continuous or integer.
#[allow(missing_docs)]
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VariableType {
    Continuous,
    Integer,
}
