pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::linspace::Linspace;
use crate::membership::MembershipShape;

/// A named membership function. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzySet {
    name: String,
    shape: MembershipShape,
}

impl FuzzySet {
    pub fn new(name: impl Into<String>, shape: MembershipShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &MembershipShape {
        &self.shape
    }

    /// Degree to which `value` belongs to this set
    pub fn eval(&self, value: f64) -> f64 {
        self.shape.evaluate(value)
    }

    /// Samples the membership curve at `n` evenly spaced points of `min..=max`.
    pub fn sample(&self, min: f64, max: f64, n: usize) -> Vec<(f64, f64)> {
        Linspace::new(min, max, n).map(|x| (x, self.eval(x))).collect()
    }
}

pub fn fuzzify(set: &FuzzySet, value: f64) -> f64 {
    set.eval(value)
}

/// The fuzzy sets a single linguistic variable is partitioned into.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, FuzzySet>);

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, set: FuzzySet) {
        self.0.insert(key, set);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_fuzzify() {
    let delicate = FuzzySet::new(
        "delicate",
        MembershipShape::Trapezoid {
            a: 3.,
            b: 4.,
            c: 6.,
            d: 7.,
        },
    );

    assert_eq!(delicate.name(), "delicate");
    assert_eq!(fuzzify(&delicate, 3.5), 0.5);
    assert_eq!(fuzzify(&delicate, 5.), 1.);
    assert_eq!(fuzzify(&delicate, 9.), 0.);
}

#[test]
fn test_sample() {
    let dirty = FuzzySet::new("dirty", MembershipShape::RightTrapezoid { a: 0.5, b: 1. });

    assert_eq!(
        dirty.sample(0., 1., 5),
        vec![(0., 0.), (0.25, 0.), (0.5, 0.), (0.75, 0.5), (1., 1.)]
    );
}

#[test]
fn test_terms() {
    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Dirt {
        AlmostClean,
        Dirty,
    }

    let mut terms = Terms::new();

    assert!(terms.is_empty());

    terms.insert(
        Dirt::AlmostClean,
        FuzzySet::new("almost_clean", MembershipShape::LeftTrapezoid { a: 0.25, b: 1. }),
    );
    terms.insert(
        Dirt::Dirty,
        FuzzySet::new("dirty", MembershipShape::RightTrapezoid { a: 0.5, b: 1. }),
    );

    assert_eq!(terms.len(), 2);
    assert_eq!(terms.0.get(Dirt::Dirty).map(FuzzySet::name), Some("dirty"));
}
