use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp values for the input variables of one inference run
#[derive(Debug, Default)]
pub struct Inputs(HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Inputs(HashMap::with_capacity(capacity))
    }

    /// Sets the crisp value of `var`, replacing any earlier one
    pub fn add<I>(&mut self, var: Variable<I>, value: f64) {
        self.0.insert(var.0, value);
    }

    pub fn get(&self, key: VariableKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, f64)> + '_ {
        self.0.iter().map(|(key, value)| (*key, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[test]
fn test_inputs() {
    use crate::terms::{Key, Terms};
    use crate::variable::Variables;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Dirt {
        Dirty,
    }

    let mut vars = Variables::<Dirt>::new();
    let dirt = vars.add("dirt_amount", 0. ..=2.5, Terms::<Dirt>::new()).unwrap();
    let mut inputs = Inputs::with_capacity(1);

    assert!(inputs.is_empty());

    inputs.add(dirt, 0.5);
    inputs.add(dirt, 0.75);

    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs.get(dirt.key()), Some(0.75));
    assert_eq!(inputs.iter().collect::<Vec<_>>(), vec![(dirt.key(), 0.75)]);
}
