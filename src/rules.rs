use std::fmt;

use crate::dsl::Expr;
use crate::error::{Error, Result};

/// Identifies a rule within a rule base
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RuleId(pub u32);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.0)
    }
}

#[derive(Debug)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Appends a rule. Rules are evaluated in insertion order.
    pub fn add(&mut self, id: RuleId, premise: Expr<T>, weight: u32) -> Result<()> {
        if self.get(id).is_some() {
            return Err(Error::DuplicateRule(id));
        }

        self.0.push(Rule { id, premise, weight });

        Ok(())
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule<T>> {
        self.0.iter().find(|rule| rule.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Output level of rule `id` scaled by the strength of its premise
    pub fn output_value(&self, id: RuleId, strength: f64) -> Result<f64> {
        self.get(id)
            .map(|rule| rule.output(strength))
            .ok_or(Error::InvalidRuleWeight(id))
    }
}

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct Rule<T> {
    pub(crate) id: RuleId,
    pub(crate) premise: Expr<T>,
    pub(crate) weight: u32,
}

impl<T> Rule<T> {
    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn output(&self, strength: f64) -> f64 {
        f64::from(self.weight) * strength
    }
}

#[test]
fn test_rules() {
    use slotmap::KeyData;

    use crate::variable::VariableKey;

    let key = VariableKey::from(KeyData::from_ffi(1));
    let mut rules = Rules::with_capacity(2);

    rules.add(RuleId(1), Expr::Is(key, 'a'), 10).unwrap();
    rules.add(RuleId(2), Expr::Is(key, 'b'), 40).unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules.get(RuleId(2)).map(Rule::weight), Some(40));
    assert_eq!(rules.output_value(RuleId(1), 0.5).unwrap(), 5.);
    assert_eq!(rules.output_value(RuleId(2), 1.).unwrap(), 40.);
    assert!(matches!(
        rules.output_value(RuleId(5), 1.),
        Err(Error::InvalidRuleWeight(RuleId(5)))
    ));
    assert!(matches!(
        rules.add(RuleId(1), Expr::Is(key, 'c'), 60),
        Err(Error::DuplicateRule(RuleId(1)))
    ));
    assert_eq!(rules.iter().map(Rule::id).collect::<Vec<_>>(), vec![RuleId(1), RuleId(2)]);
}
