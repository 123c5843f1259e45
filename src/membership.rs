use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Piecewise linear membership function shapes.
///
/// Every shape saturates outside of its breakpoints, so any finite crisp value
/// maps to a degree in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MembershipShape {
    /// Full membership up to `a`, falling to zero at `b`
    LeftTrapezoid { a: f64, b: f64 },
    /// Rising over `a..b`, full over `b..=c`, falling over `c..d`
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    /// No membership up to `a`, rising to full at `b`
    RightTrapezoid { a: f64, b: f64 },
}

impl MembershipShape {
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Self::LeftTrapezoid { a, b } => {
                if x <= a {
                    1.
                } else if x >= b {
                    0.
                } else {
                    (b - x) / (b - a)
                }
            },
            Self::Trapezoid { a, b, c, d } => {
                if b <= x && x <= c {
                    1.
                } else if x <= a || x >= d {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            },
            Self::RightTrapezoid { a, b } => {
                if x <= a {
                    0.
                } else if x >= b {
                    1.
                } else {
                    (x - a) / (b - a)
                }
            },
        }
    }

    /// Checks that the breakpoints are finite and ordered.
    pub fn validate(&self) -> Result<()> {
        let (points, reason) = match *self {
            Self::LeftTrapezoid { a, b } | Self::RightTrapezoid { a, b } => (vec![a, b], "expected a <= b"),
            Self::Trapezoid { a, b, c, d } => (vec![a, b, c, d], "expected a <= b <= c <= d"),
        };

        if points.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidShape {
                shape: *self,
                reason: "breakpoints must be finite",
            });
        }

        if points.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidShape { shape: *self, reason });
        }

        Ok(())
    }
}

#[test]
fn test_left_trapezoid() {
    let shape = MembershipShape::LeftTrapezoid { a: 2., b: 4. };

    assert_eq!(shape.evaluate(-10.), 1.);
    assert_eq!(shape.evaluate(2.), 1.);
    assert_eq!(shape.evaluate(3.), 0.5);
    assert_eq!(shape.evaluate(3.5), 0.25);
    assert_eq!(shape.evaluate(4.), 0.);
    assert_eq!(shape.evaluate(11.), 0.);
}

#[test]
fn test_right_trapezoid() {
    let shape = MembershipShape::RightTrapezoid { a: 0.5, b: 1. };

    assert_eq!(shape.evaluate(0.), 0.);
    assert_eq!(shape.evaluate(0.5), 0.);
    assert_eq!(shape.evaluate(0.75), 0.5);
    assert_eq!(shape.evaluate(1.), 1.);
    assert_eq!(shape.evaluate(2.5), 1.);
}

#[test]
fn test_trapezoid() {
    let shape = MembershipShape::Trapezoid { a: 3., b: 4., c: 6., d: 7. };

    assert_eq!(shape.evaluate(1.), 0.);
    assert_eq!(shape.evaluate(3.), 0.);
    assert_eq!(shape.evaluate(3.5), 0.5);
    assert_eq!(shape.evaluate(4.), 1.);
    assert_eq!(shape.evaluate(5.), 1.);
    assert_eq!(shape.evaluate(6.), 1.);
    assert_eq!(shape.evaluate(6.5), 0.5);
    assert_eq!(shape.evaluate(7.), 0.);
    assert_eq!(shape.evaluate(11.), 0.);
}

#[test]
fn test_degenerate_edges() {
    // Vertical edges must not divide by zero
    let left = MembershipShape::LeftTrapezoid { a: 1., b: 1. };
    let right = MembershipShape::RightTrapezoid { a: 1., b: 1. };
    let crisp = MembershipShape::Trapezoid { a: 2., b: 2., c: 2., d: 2. };

    assert_eq!(left.evaluate(1.), 1.);
    assert_eq!(left.evaluate(1.0001), 0.);
    assert_eq!(right.evaluate(1.), 0.);
    assert_eq!(right.evaluate(1.0001), 1.);
    assert_eq!(crisp.evaluate(2.), 1.);
    assert_eq!(crisp.evaluate(1.9999), 0.);
}

#[test]
fn test_validate() {
    assert!(MembershipShape::LeftTrapezoid { a: 0.25, b: 1. }.validate().is_ok());
    assert!(MembershipShape::Trapezoid { a: 3., b: 4., c: 6., d: 7. }.validate().is_ok());
    assert!(matches!(
        MembershipShape::RightTrapezoid { a: 2., b: 1. }.validate(),
        Err(Error::InvalidShape { .. })
    ));
    assert!(matches!(
        MembershipShape::Trapezoid { a: 3., b: 6., c: 4., d: 7. }.validate(),
        Err(Error::InvalidShape { .. })
    ));
    assert!(matches!(
        MembershipShape::LeftTrapezoid { a: f64::NAN, b: 1. }.validate(),
        Err(Error::InvalidShape { .. })
    ));
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::MembershipShape;

    fn ordered_pair() -> impl Strategy<Value = (f64, f64)> {
        (-100f64..100., 0f64..50.).prop_map(|(a, width)| (a, a + width))
    }

    fn ordered_quad() -> impl Strategy<Value = (f64, f64, f64, f64)> {
        (-100f64..100., 0f64..20., 0f64..20., 0f64..20.)
            .prop_map(|(a, w1, w2, w3)| (a, a + w1, a + w1 + w2, a + w1 + w2 + w3))
    }

    proptest! {
        #[test]
        fn left_trapezoid_saturates_and_falls((a, b) in ordered_pair(), x in -200f64..200., y in -200f64..200.) {
            let shape = MembershipShape::LeftTrapezoid { a, b };
            let (lo, hi) = if x <= y { (x, y) } else { (y, x) };

            if x <= a {
                prop_assert_eq!(shape.evaluate(x), 1.);
            }
            if x >= b && a < b {
                prop_assert_eq!(shape.evaluate(x), 0.);
            }
            prop_assert!(shape.evaluate(lo) >= shape.evaluate(hi));
        }

        #[test]
        fn right_trapezoid_saturates_and_rises((a, b) in ordered_pair(), x in -200f64..200., y in -200f64..200.) {
            let shape = MembershipShape::RightTrapezoid { a, b };
            let (lo, hi) = if x <= y { (x, y) } else { (y, x) };

            if x <= a {
                prop_assert_eq!(shape.evaluate(x), 0.);
            }
            if x >= b && a < b {
                prop_assert_eq!(shape.evaluate(x), 1.);
            }
            prop_assert!(shape.evaluate(lo) <= shape.evaluate(hi));
        }

        #[test]
        fn trapezoid_is_bounded((a, b, c, d) in ordered_quad(), x in -200f64..200.) {
            let shape = MembershipShape::Trapezoid { a, b, c, d };
            let degree = shape.evaluate(x);

            prop_assert!((0. ..=1.).contains(&degree));
            if b <= x && x <= c {
                prop_assert_eq!(degree, 1.);
            }
        }
    }
}
