//! A small fuzzy inference engine and the washing machine controller built on
//! top of it.
//!
//! Crisp inputs are fuzzified against piecewise linear membership functions,
//! every rule's premise is reduced to a firing strength with fuzzy AND/OR, and
//! the strengths weight each rule's output level. The weighted average of those
//! levels is the defuzzified result.
//!
//! ```
//! use fuzzy_washer::{Washer, WasherConfig};
//!
//! let washer = Washer::new(&WasherConfig::default())?;
//! let result = washer.infer(0.25, 4.0)?;
//!
//! assert_eq!(result.strengths(), &[0.0, 1.0, 0.0, 0.0]);
//! assert_eq!(result.temperature()?, 42.0);
//! # Ok::<(), fuzzy_washer::Error>(())
//! ```

mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod membership;
mod ops;
mod outputs;
mod rules;
mod terms;
mod variable;
mod washer;

pub use config::{DirtConfig, FabricConfig, Universe, WasherConfig};
pub use dsl::Expr;
pub use error::{Error, Result};
pub use inference::InferenceEngine;
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use membership::MembershipShape;
pub use ops::{combine, AndOp, Connective, OrOp};
pub use outputs::{
    scale_temperature, temperature, weighted_average, InferenceResult, MIN_TEMPERATURE, OUTPUT_SCALE,
    TEMPERATURE_SPAN,
};
pub use rules::{Rule, RuleId, Rules};
pub use terms::{fuzzify, FuzzySet, Key, Term, Terms};
pub use variable::{Variable, VariableConstraints, VariableKey, Variables};
pub use washer::{Dirt, Fabric, WashTerm, Washer};
