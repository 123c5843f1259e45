use std::fmt;
use std::str::FromStr;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::terms::FuzzySet;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if u == F::one() {
                    v
                } else if v == F::one() {
                    u
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if u == F::zero() {
                    v
                } else if v == F::zero() {
                    u
                } else {
                    F::one()
                }
            },
        }
    }
}

/// How the (at most two) propositions of a flat rule antecedent are joined
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Connective {
    And,
    Or,
    /// A lone proposition passed through unchanged
    Single,
}

impl FromStr for Connective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "" | "SINGLE" => Ok(Self::Single),
            _ => Err(format!("unknown connective `{s}`, expected AND, OR or SINGLE")),
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Single => "SINGLE",
        })
    }
}

/// Fuzzifies up to two crisp values and joins them with min (AND) or max (OR).
///
/// A missing operand is treated as the identity of the connective, so AND or OR
/// over a single proposition degrade to that proposition's degree. With no
/// operands at all the result is zero.
pub fn combine(op: Connective, a: Option<(&FuzzySet, f64)>, b: Option<(&FuzzySet, f64)>) -> f64 {
    let a = a.map(|(set, value)| set.eval(value));
    let b = b.map(|(set, value)| set.eval(value));

    match (op, a, b) {
        (_, None, None) => 0.,
        (Connective::And, Some(a), Some(b)) => AndOp::Min.call(a, b),
        (Connective::Or, Some(a), Some(b)) => OrOp::Max.call(a, b),
        (Connective::Single, Some(a), _) => a,
        (_, Some(degree), None) | (_, None, Some(degree)) => degree,
    }
}

#[test]
fn test_and_ops() {
    assert_eq!(AndOp::Min.call(0.3, 0.8), 0.3);
    assert_eq!(AndOp::Prod.call(0.5, 0.5), 0.25);
    assert_eq!(AndOp::BoundedProd.call(0.25, 0.5), 0.);
    assert_eq!(AndOp::BoundedProd.call(0.75, 0.5), 0.25);
    assert_eq!(AndOp::DrasticProd.call(1., 0.4), 0.4);
    assert_eq!(AndOp::DrasticProd.call(0.4, 1.), 0.4);
    assert_eq!(AndOp::DrasticProd.call(0.9, 0.9), 0.);
}

#[test]
fn test_or_ops() {
    assert_eq!(OrOp::Max.call(0.3, 0.8), 0.8);
    assert_eq!(OrOp::ProbOr.call(0.5, 0.5), 0.75);
    assert_eq!(OrOp::BoundedSum.call(0.75, 0.5), 1.);
    assert_eq!(OrOp::BoundedSum.call(0.25, 0.5), 0.75);
    assert_eq!(OrOp::DrasticSum.call(0., 0.4), 0.4);
    assert_eq!(OrOp::DrasticSum.call(0.4, 0.), 0.4);
    assert_eq!(OrOp::DrasticSum.call(0.1, 0.1), 1.);
}

#[test]
fn test_combine() {
    use crate::membership::MembershipShape;

    let delicate = FuzzySet::new(
        "delicate",
        MembershipShape::Trapezoid {
            a: 3.,
            b: 4.,
            c: 6.,
            d: 7.,
        },
    );
    let dirty = FuzzySet::new("dirty", MembershipShape::RightTrapezoid { a: 0.5, b: 1. });

    // delicate(6.5) = 0.5, dirty(0.625) = 0.25
    let a = Some((&delicate, 6.5));
    let b = Some((&dirty, 0.625));

    assert_eq!(combine(Connective::And, a, b), 0.25);
    assert_eq!(combine(Connective::Or, a, b), 0.5);
    assert_eq!(combine(Connective::Single, a, None), 0.5);
    assert_eq!(combine(Connective::Single, None, b), 0.25);
    assert_eq!(combine(Connective::Single, a, b), 0.5);
    assert_eq!(combine(Connective::And, None, b), 0.25);
    assert_eq!(combine(Connective::Single, None, None), 0.);
    assert_eq!(combine(Connective::Or, None, None), 0.);
}

#[test]
fn test_connective_from_str() {
    assert_eq!("and".parse::<Connective>(), Ok(Connective::And));
    assert_eq!("OR".parse::<Connective>(), Ok(Connective::Or));
    assert_eq!("".parse::<Connective>(), Ok(Connective::Single));
    assert!("xor".parse::<Connective>().is_err());
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::{combine, AndOp, Connective, OrOp};
    use crate::membership::MembershipShape;
    use crate::terms::FuzzySet;

    proptest! {
        #[test]
        fn and_never_exceeds_or(u in 0f64..=1., v in 0f64..=1.) {
            for (and_op, or_op) in [
                (AndOp::Min, OrOp::Max),
                (AndOp::Prod, OrOp::ProbOr),
                (AndOp::BoundedProd, OrOp::BoundedSum),
                (AndOp::DrasticProd, OrOp::DrasticSum),
            ] {
                prop_assert!(and_op.call(u, v) <= or_op.call(u, v));
            }
        }

        #[test]
        fn combined_and_never_exceeds_or(x in -5f64..5., y in -5f64..5.) {
            let almost_clean = FuzzySet::new("almost_clean", MembershipShape::LeftTrapezoid { a: 0.25, b: 1. });
            let dirty = FuzzySet::new("dirty", MembershipShape::RightTrapezoid { a: 0.5, b: 1. });
            let a = Some((&almost_clean, x));
            let b = Some((&dirty, y));

            prop_assert!(combine(Connective::And, a, b) <= combine(Connective::Or, a, b));
        }
    }
}
