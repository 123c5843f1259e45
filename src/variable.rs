use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::terms::{FuzzySet, Term, Terms};

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Typed handle to a registered variable whose terms are of type `I`
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub fn key(&self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

pub struct Variables<T>(pub(crate) SlotMap<VariableKey, VariableConstraints<T>>);

impl<T: Eq + Hash> Variables<T> {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    /// Registers a linguistic variable over `universe`, partitioned into `terms`.
    pub fn add<I: Into<T> + Term + 'static>(
        &mut self,
        name: impl Into<String>,
        universe: RangeInclusive<f64>,
        terms: Terms<I>,
    ) -> Result<Variable<I>> {
        let name = name.into();
        let (min, max) = universe.into_inner();

        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(Error::InvalidUniverse { variable: name, min, max });
        }

        let mut sets = HashMap::with_capacity(terms.len());

        for (term, set) in terms.0.iter() {
            set.shape().validate()?;
            sets.insert(term.into(), set.clone());
        }

        let key = self.0.insert(VariableConstraints {
            name,
            min_u: min,
            max_u: max,
            terms: sets,
        });

        Ok(Variable(key, PhantomData))
    }

    pub fn get(&self, key: VariableKey) -> Result<&VariableConstraints<T>> {
        self.0.get(key).ok_or(Error::UnknownVariable)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Eq + Hash> Default for Variables<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct VariableConstraints<T> {
    pub(crate) name: String,
    pub(crate) min_u: f64,
    pub(crate) max_u: f64,
    pub(crate) terms: HashMap<T, FuzzySet>,
}

impl<T: Eq + Hash> VariableConstraints<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min_u <= value && value <= self.max_u
    }

    pub fn term(&self, term: &T) -> Option<&FuzzySet> {
        self.terms.get(term)
    }

    pub fn fuzzify(&self, term: &T, value: f64) -> Result<f64>
    where
        T: Debug,
    {
        self.terms
            .get(term)
            .map(|set| set.eval(value))
            .ok_or_else(|| Error::UnknownTerm {
                variable: self.name.clone(),
                term: format!("{term:?}"),
            })
    }
}

#[test]
fn test_variables() {
    use crate::membership::MembershipShape;
    use crate::terms::Key;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Fabric {
        VeryDelicate,
        NotDelicate,
    }

    let mut terms = Terms::new();

    terms.insert(
        Fabric::VeryDelicate,
        FuzzySet::new("very_delicate", MembershipShape::LeftTrapezoid { a: 2., b: 4. }),
    );

    let mut vars = Variables::<Fabric>::new();
    let fabric = vars.add("fabric_weight", 1. ..=11., terms).unwrap();
    let constraints = vars.get(fabric.key()).unwrap();

    assert_eq!(vars.len(), 1);
    assert_eq!(constraints.name(), "fabric_weight");
    assert_eq!(constraints.universe(), 1. ..=11.);
    assert!(constraints.contains(4.));
    assert!(!constraints.contains(12.));
    assert_eq!(constraints.fuzzify(&Fabric::VeryDelicate, 3.).unwrap(), 0.5);
    assert!(matches!(
        constraints.fuzzify(&Fabric::NotDelicate, 3.),
        Err(Error::UnknownTerm { .. })
    ));
}

#[test]
fn test_invalid_variables() {
    use crate::membership::MembershipShape;
    use crate::terms::Key;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Dirt {
        Dirty,
    }

    let mut vars = Variables::<Dirt>::new();

    assert!(matches!(
        vars.add("dirt", 2.5..=0., Terms::<Dirt>::new()),
        Err(Error::InvalidUniverse { .. })
    ));

    let mut terms = Terms::new();

    terms.insert(
        Dirt::Dirty,
        FuzzySet::new("dirty", MembershipShape::RightTrapezoid { a: 1., b: 0.5 }),
    );

    assert!(matches!(
        vars.add("dirt", 0. ..=2.5, terms),
        Err(Error::InvalidShape { .. })
    ));
    assert!(vars.is_empty());
}
