use std::path::PathBuf;

use crate::membership::MembershipShape;
use crate::rules::RuleId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no output weight configured for {0}")]
    InvalidRuleWeight(RuleId),

    #[error("division by zero: every rule antecedent has zero strength")]
    DivisionByZero,

    #[error("strength and output sequences differ in length ({strengths} vs {outputs})")]
    LengthMismatch { strengths: usize, outputs: usize },

    #[error("invalid membership shape {shape:?}: {reason}")]
    InvalidShape {
        shape: MembershipShape,
        reason: &'static str,
    },

    #[error("invalid universe {min}..={max} for variable `{variable}`")]
    InvalidUniverse { variable: String, min: f64, max: f64 },

    #[error("{0} is defined more than once")]
    DuplicateRule(RuleId),

    #[error("variable `{variable}` has no term `{term}`")]
    UnknownTerm { variable: String, term: String },

    #[error("premise refers to a variable that is not registered")]
    UnknownVariable,

    #[error("no input value provided for variable `{0}`")]
    MissingInput(String),

    #[error("input for `{variable}` is not a finite number: {value}")]
    NonFiniteInput { variable: String, value: f64 },

    #[error("{what} is not a finite number: {value}")]
    NonFiniteValue { what: &'static str, value: f64 },

    #[error("unknown fuzzy set `{0}`")]
    UnknownSet(String),

    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
}
