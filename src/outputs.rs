use crate::error::{Error, Result};

/// Lowest temperature the controller will request
pub const MIN_TEMPERATURE: f64 = 10.;
/// Width of the temperature range above `MIN_TEMPERATURE`
pub const TEMPERATURE_SPAN: f64 = 80.;
/// Upper end of the rule output level scale
pub const OUTPUT_SCALE: f64 = 100.;

/// Per-rule antecedent strengths and weighted outputs, in rule order
#[derive(Clone, Debug, PartialEq)]
pub struct InferenceResult {
    strengths: Vec<f64>,
    outputs: Vec<f64>,
}

impl InferenceResult {
    pub(crate) fn new(strengths: Vec<f64>, outputs: Vec<f64>) -> Self {
        debug_assert_eq!(strengths.len(), outputs.len());

        Self { strengths, outputs }
    }

    pub fn strengths(&self) -> &[f64] {
        &self.strengths
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.strengths, self.outputs)
    }

    pub fn weighted_average(&self) -> Result<f64> {
        weighted_average(&self.strengths, &self.outputs)
    }

    pub fn temperature(&self) -> Result<f64> {
        temperature(&self.strengths, &self.outputs)
    }
}

/// Sum of the weighted outputs divided by the sum of the strengths.
///
/// Fails with [`Error::DivisionByZero`] when no rule fired at all and with
/// [`Error::NonFiniteValue`] when a NaN or infinity would reach the result.
pub fn weighted_average(strengths: &[f64], outputs: &[f64]) -> Result<f64> {
    if strengths.len() != outputs.len() {
        return Err(Error::LengthMismatch {
            strengths: strengths.len(),
            outputs: outputs.len(),
        });
    }

    finite("strength", strengths)?;
    finite("output", outputs)?;

    let total_strength = strengths.iter().sum::<f64>();

    if total_strength == 0. {
        return Err(Error::DivisionByZero);
    }

    let average = outputs.iter().sum::<f64>() / total_strength;

    if !average.is_finite() {
        return Err(Error::NonFiniteValue {
            what: "weighted average",
            value: average,
        });
    }

    Ok(average)
}

fn finite(what: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().find(|value| !value.is_finite()) {
        Some(&value) => Err(Error::NonFiniteValue { what, value }),
        None => Ok(()),
    }
}

/// Maps a weighted average on the 0-100 output scale onto the physical
/// temperature range.
pub fn scale_temperature(average: f64) -> f64 {
    MIN_TEMPERATURE + TEMPERATURE_SPAN * average / OUTPUT_SCALE
}

pub fn temperature(strengths: &[f64], outputs: &[f64]) -> Result<f64> {
    let average = weighted_average(strengths, outputs)?;
    let temperature = scale_temperature(average);

    tracing::debug!(average, temperature, "defuzzified");

    Ok(temperature)
}

#[test]
fn test_weighted_average() {
    assert_eq!(weighted_average(&[0., 1., 0., 0.], &[0., 40., 0., 0.]).unwrap(), 40.);
    assert_eq!(weighted_average(&[1., 1., 0., 0.], &[10., 40., 0., 0.]).unwrap(), 25.);
    assert!(matches!(
        weighted_average(&[0., 0., 0., 0.], &[0., 0., 0., 0.]),
        Err(Error::DivisionByZero)
    ));
    assert!(matches!(weighted_average(&[], &[]), Err(Error::DivisionByZero)));
    assert!(matches!(
        weighted_average(&[1., 0.], &[10.]),
        Err(Error::LengthMismatch { strengths: 2, outputs: 1 })
    ));
}

#[test]
fn test_non_finite_values() {
    assert!(matches!(
        weighted_average(&[f64::NAN, 1.], &[10., 40.]),
        Err(Error::NonFiniteValue { what: "strength", .. })
    ));
    assert!(matches!(
        weighted_average(&[1.], &[f64::INFINITY]),
        Err(Error::NonFiniteValue { what: "output", .. })
    ));
    assert!(matches!(
        weighted_average(&[1., 1.], &[f64::MAX, f64::MAX]),
        Err(Error::NonFiniteValue { what: "weighted average", .. })
    ));
    // Subnormal total strength overflows the quotient
    assert!(matches!(
        weighted_average(&[1e-320], &[1e10]),
        Err(Error::NonFiniteValue { what: "weighted average", .. })
    ));
    assert!(matches!(
        temperature(&[f64::NEG_INFINITY], &[0.]),
        Err(Error::NonFiniteValue { .. })
    ));
}

#[test]
fn test_temperature() {
    assert_eq!(temperature(&[0., 1., 0., 0.], &[0., 40., 0., 0.]).unwrap(), 42.);
    assert_eq!(temperature(&[1., 0., 0., 0.], &[10., 0., 0., 0.]).unwrap(), 18.);
    assert_eq!(scale_temperature(0.), MIN_TEMPERATURE);
    assert_eq!(scale_temperature(OUTPUT_SCALE), MIN_TEMPERATURE + TEMPERATURE_SPAN);
    assert!(matches!(temperature(&[0.; 4], &[0.; 4]), Err(Error::DivisionByZero)));

    let result = InferenceResult::new(vec![1., 1., 0., 0.], vec![10., 40., 0., 0.]);

    assert_eq!(result.weighted_average().unwrap(), 25.);
    assert_eq!(result.temperature().unwrap(), 30.);
    assert_eq!(result.into_parts(), (vec![1., 1., 0., 0.], vec![10., 40., 0., 0.]));
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::scale_temperature;

    proptest! {
        #[test]
        fn temperature_is_monotonic(x in 0f64..=100., y in 0f64..=100.) {
            let (lo, hi) = if x <= y { (x, y) } else { (y, x) };

            prop_assert!(scale_temperature(lo) <= scale_temperature(hi));
        }
    }
}
