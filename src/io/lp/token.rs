//! # Tokens used in LP files
//!
//! Section keywords are matched case insensitively and only at the start of a line.

/// Starts a comment that runs until the end of the line.
pub const COMMENT_INDICATOR: char = '\\';

/// Opens a comment that may span multiple lines.
pub const BLOCK_COMMENT_START: &str = "\\*";

/// Closes a comment opened with `BLOCK_COMMENT_START`.
pub const BLOCK_COMMENT_END: &str = "*\\";

/// Inside the first comment of a file, the text after this marker is the model name.
pub const MODEL_NAME_MARKER: &str = "name=";

/// Words starting a minimization objective section.
pub const MINIMIZE: [&str; 4] = ["min", "minimize", "minimise", "minimum"];

/// Words starting a maximization objective section.
pub const MAXIMIZE: [&str; 4] = ["max", "maximize", "maximise", "maximum"];

/// Single words starting the constraint section.
pub const SUBJECT_TO: [&str; 3] = ["s.t.", "st", "st."];

/// Two word phrases starting the constraint section.
pub const SUBJECT_TO_PHRASES: [(&str, &str); 2] = [("subject", "to"), ("such", "that")];

/// Words starting the bounds section.
pub const BOUNDS: [&str; 2] = ["bounds", "bound"];

/// Words starting the section listing general integer variables.
pub const GENERAL: [&str; 3] = ["general", "generals", "gen"];

/// Words starting the section listing binary variables.
pub const BINARY: [&str; 3] = ["binary", "binaries", "bin"];

/// Closes the program; nothing but comments may follow.
pub const END: &str = "end";

/// Names for an infinite value.
pub const INFINITY: [&str; 2] = ["inf", "infinity"];

/// Bound keyword for a variable without lower and upper bound.
pub const FREE: &str = "free";

/// Characters, besides ASCII letters and digits, that may appear in a name.
///
/// A name doesn't start with a digit or a period, those start a number.
pub const NAME_SYMBOLS: &str = "_.(),[]!\"#$%&/;?@'{}|~";

/// Separates a label from the expression it names.
pub const LABEL_SEPARATOR: char = ':';

/// Variable that is fixed to one, such that its coefficients represent constant offsets.
pub const ONE_VAR_CONSTANT: &str = "ONE_VAR_CONSTANT";

/// The value `ONE_VAR_CONSTANT` is fixed to, as written in the defining constraint.
pub const ONE_VAR_CONSTANT_VALUE: &str = "1.0";

/// Label prefix of equality constraints.
pub const EQUALITY_PREFIX: &str = "c_e_";

/// Label prefix of constraints with an upper bound on the expression (`<=`).
pub const UPPER_PREFIX: &str = "c_u_";

/// Label prefix of constraints with a lower bound on the expression (`>=`).
pub const LOWER_PREFIX: &str = "c_l_";

/// Label prefix of the lower half of a ranged constraint.
pub const RANGE_LOWER_PREFIX: &str = "r_l_";

/// Label prefix of the upper half of a ranged constraint.
pub const RANGE_UPPER_PREFIX: &str = "r_u_";

/// Objective name used when writing a program without one.
pub const DEFAULT_OBJECTIVE_NAME: &str = "objective";

/// Prefix of the names given to unlabeled constraints, followed by the row number.
pub const UNLABELED_ROW_PREFIX: &str = "R";

/// Comment written at the top of a file, followed by the model name.
pub const SOURCE_COMMENT: &str = "Source Pyomo model name=";
