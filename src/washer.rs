//! The washing machine temperature controller.
//!
//! Two crisp inputs drive it: the dirt amount (tablespoons, nominally
//! `0.0..=2.5`) and the fabric weight (nominally `1.0..=11.0`). Four rules map
//! them onto an output level which is defuzzified into a wash temperature.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::config::WasherConfig;
use crate::error::{Error, Result};
use crate::inference::InferenceEngine;
use crate::inputs::Inputs;
use crate::outputs::InferenceResult;
use crate::rules::{RuleId, Rules};
use crate::terms::{FuzzySet, Key, Terms};
use crate::variable::{Variable, VariableKey, Variables};

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Dirt {
    AlmostClean,
    Dirty,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Fabric {
    VeryDelicate,
    Delicate,
    NotDelicate,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WashTerm {
    Dirt(Dirt),
    Fabric(Fabric),
}

impl WashTerm {
    pub const ALL: [WashTerm; 5] = [
        WashTerm::Dirt(Dirt::AlmostClean),
        WashTerm::Dirt(Dirt::Dirty),
        WashTerm::Fabric(Fabric::VeryDelicate),
        WashTerm::Fabric(Fabric::Delicate),
        WashTerm::Fabric(Fabric::NotDelicate),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dirt(Dirt::AlmostClean) => "almost_clean",
            Self::Dirt(Dirt::Dirty) => "dirty",
            Self::Fabric(Fabric::VeryDelicate) => "very_delicate",
            Self::Fabric(Fabric::Delicate) => "delicate",
            Self::Fabric(Fabric::NotDelicate) => "not_delicate",
        }
    }
}

impl From<Dirt> for WashTerm {
    fn from(d: Dirt) -> Self {
        Self::Dirt(d)
    }
}

impl From<Fabric> for WashTerm {
    fn from(f: Fabric) -> Self {
        Self::Fabric(f)
    }
}

impl FromStr for WashTerm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Accept both the snake_case names and the `*_set` spelling
        let name = s.strip_suffix("_set").unwrap_or(s);

        Self::ALL
            .into_iter()
            .find(|term| term.name() == name)
            .ok_or_else(|| Error::UnknownSet(s.to_owned()))
    }
}

impl fmt::Display for WashTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully configured controller. Immutable, so one instance can serve any
/// number of threads.
pub struct Washer {
    vars: Variables<WashTerm>,
    dirt: Variable<Dirt>,
    fabric: Variable<Fabric>,
    rules: Rules<WashTerm>,
    engine: InferenceEngine,
}

impl Washer {
    pub fn new(config: &WasherConfig) -> Result<Self> {
        let mut dirt_terms = Terms::new();
        let mut fabric_terms = Terms::new();

        dirt_terms.insert(Dirt::AlmostClean, FuzzySet::new("almost_clean", config.dirt.almost_clean));
        dirt_terms.insert(Dirt::Dirty, FuzzySet::new("dirty", config.dirt.dirty));
        fabric_terms.insert(
            Fabric::VeryDelicate,
            FuzzySet::new("very_delicate", config.fabric.very_delicate),
        );
        fabric_terms.insert(Fabric::Delicate, FuzzySet::new("delicate", config.fabric.delicate));
        fabric_terms.insert(
            Fabric::NotDelicate,
            FuzzySet::new("not_delicate", config.fabric.not_delicate),
        );

        let mut vars = Variables::<WashTerm>::new();
        let dirt = vars.add("dirt_amount", config.dirt.universe.range(), dirt_terms)?;
        let fabric = vars.add("fabric_weight", config.fabric.universe.range(), fabric_terms)?;

        let [w1, w2, w3, w4] = config.weights;
        let mut rules = Rules::<WashTerm>::with_capacity(4);

        rules.add(RuleId(1), fabric.is(Fabric::VeryDelicate), w1)?;
        rules.add(
            RuleId(2),
            fabric.is(Fabric::Delicate).or(dirt.is(Dirt::AlmostClean)),
            w2,
        )?;
        rules.add(RuleId(3), fabric.is(Fabric::Delicate).and(dirt.is(Dirt::Dirty)), w3)?;
        rules.add(RuleId(4), fabric.is(Fabric::NotDelicate).and(dirt.is(Dirt::Dirty)), w4)?;

        Ok(Self {
            vars,
            dirt,
            fabric,
            rules,
            engine: InferenceEngine::new(config.and_op, config.or_op),
        })
    }

    /// Evaluates all four rules, in order, for one pair of crisp inputs.
    pub fn infer(&self, dirt_amount: f64, fabric_weight: f64) -> Result<InferenceResult> {
        let mut inputs = Inputs::with_capacity(2);

        inputs.add(self.dirt, dirt_amount);
        inputs.add(self.fabric, fabric_weight);

        self.engine.eval(&self.vars, &self.rules, &inputs)
    }

    /// Runs the full pipeline down to a wash temperature
    pub fn temperature(&self, dirt_amount: f64, fabric_weight: f64) -> Result<f64> {
        self.infer(dirt_amount, fabric_weight)?.temperature()
    }

    pub fn fuzzy_set(&self, term: WashTerm) -> Option<&FuzzySet> {
        self.vars.get(self.variable_of(term)).ok()?.term(&term)
    }

    /// Universe of the variable `term` partitions
    pub fn universe(&self, term: WashTerm) -> Option<RangeInclusive<f64>> {
        self.vars.get(self.variable_of(term)).ok().map(|var| var.universe())
    }

    pub fn rules(&self) -> &Rules<WashTerm> {
        &self.rules
    }

    fn variable_of(&self, term: WashTerm) -> VariableKey {
        match term {
            WashTerm::Dirt(_) => self.dirt.key(),
            WashTerm::Fabric(_) => self.fabric.key(),
        }
    }
}

#[cfg(test)]
fn washer() -> Washer {
    Washer::new(&WasherConfig::default()).unwrap()
}

#[test]
fn test_mostly_clean_delicate_load() {
    let result = washer().infer(0.25, 4.0).unwrap();

    // very_delicate(4) = 0, delicate(4) = 1, almost_clean(0.25) = 1, dirty(0.25) = 0
    assert_eq!(result.strengths(), &[0., 1., 0., 0.]);
    assert_eq!(result.outputs(), &[0., 40., 0., 0.]);
    assert_eq!(result.weighted_average().unwrap(), 40.);
    assert_eq!(result.temperature().unwrap(), 42.);
}

#[test]
fn test_clean_light_load() {
    let result = washer().infer(0., 1.).unwrap();

    // Rule 2 fires alongside rule 1 through almost_clean(0) = 1
    assert_eq!(result.strengths(), &[1., 1., 0., 0.]);
    assert_eq!(result.outputs(), &[10., 40., 0., 0.]);
    assert_eq!(result.temperature().unwrap(), 30.);
}

#[test]
fn test_dirty_heavy_load() {
    let washer = washer();
    let result = washer.infer(2.5, 11.).unwrap();

    assert_eq!(result.strengths(), &[0., 0., 0., 1.]);
    assert_eq!(result.outputs(), &[0., 0., 0., 100.]);
    assert_eq!(washer.temperature(2.5, 11.).unwrap(), 90.);
}

#[test]
fn test_overlapping_sets() {
    use approx::assert_relative_eq;

    let result = washer().infer(0.75, 6.5).unwrap();
    let almost_clean = 0.25 / 0.75;

    // delicate = not_delicate = dirty = 0.5
    assert_relative_eq!(result.strengths()[1], 0.5f64.max(almost_clean));
    assert_eq!(result.strengths(), &[0., 0.5, 0.5, 0.5]);
    assert_eq!(result.outputs(), &[0., 20., 30., 50.]);
    assert_relative_eq!(result.weighted_average().unwrap(), 100. / 1.5, epsilon = 1e-12);
    assert_relative_eq!(result.temperature().unwrap(), 10. + 80. * (100. / 1.5) / 100., epsilon = 1e-12);
}

#[test]
fn test_out_of_universe_inputs_saturate() {
    let washer = washer();
    let result = washer.infer(-3., 0.).unwrap();

    assert_eq!(result.strengths(), &[1., 1., 0., 0.]);
    assert_eq!(washer.infer(40., 100.).unwrap().strengths(), &[0., 0., 0., 1.]);
    assert!(matches!(
        washer.infer(f64::INFINITY, 4.),
        Err(Error::NonFiniteInput { .. })
    ));
}

#[test]
fn test_alternate_configuration() {
    use crate::membership::MembershipShape;
    use crate::ops::{AndOp, OrOp};

    let mut config = WasherConfig::default();

    config.weights = [20, 40, 60, 80];
    config.and_op = AndOp::Prod;
    config.or_op = OrOp::ProbOr;

    let washer = Washer::new(&config).unwrap();
    let result = washer.infer(0.75, 6.5).unwrap();

    // prod(0.5, 0.5) for both conjunctions
    assert_eq!(result.strengths()[2], 0.25);
    assert_eq!(result.strengths()[3], 0.25);
    assert_eq!(result.outputs()[3], 20.);

    config.fabric.delicate = MembershipShape::Trapezoid {
        a: 6.,
        b: 4.,
        c: 6.,
        d: 7.,
    };

    assert!(matches!(Washer::new(&config), Err(Error::InvalidShape { .. })));
}

#[test]
fn test_results_have_one_entry_per_rule() {
    let washer = washer();

    for dirt in [0., 0.3, 0.6, 0.9, 1.5, 2.5] {
        for fabric in [1., 2.5, 3.5, 4., 5., 6.5, 7., 11.] {
            let result = washer.infer(dirt, fabric).unwrap();

            assert_eq!(result.strengths().len(), 4);
            assert_eq!(result.outputs().len(), 4);
            assert!(result.strengths().iter().all(|s| (0. ..=1.).contains(s)));
            assert!((10. ..=90.).contains(&result.temperature().unwrap()));
        }
    }
}

#[test]
fn test_shared_between_threads() {
    let washer = &washer();
    let expected = washer.temperature(0.75, 6.5).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || washer.temperature(0.75, 6.5).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_term_names() {
    let washer = washer();

    for term in WashTerm::ALL {
        assert_eq!(term.to_string().parse::<WashTerm>().unwrap(), term);
        assert_eq!(washer.fuzzy_set(term).map(FuzzySet::name), Some(term.name()));
    }

    assert_eq!(
        "delicate_set".parse::<WashTerm>().unwrap(),
        WashTerm::Fabric(Fabric::Delicate)
    );
    assert!(matches!("muddy".parse::<WashTerm>(), Err(Error::UnknownSet(_))));
    assert_eq!(washer.universe(Dirt::Dirty.into()), Some(0. ..=2.5));
    assert_eq!(washer.universe(Fabric::Delicate.into()), Some(1. ..=11.));
}

#[test]
fn test_rule_lookup() {
    let washer = washer();
    let rules = washer.rules();

    assert_eq!(rules.len(), 4);
    assert_eq!(rules.output_value(RuleId(4), 0.5).unwrap(), 50.);
    assert!(matches!(
        rules.output_value(RuleId(7), 0.5),
        Err(Error::InvalidRuleWeight(RuleId(7)))
    ));
}
