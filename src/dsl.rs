use crate::variable::{Variable, VariableKey};

/// A rule premise: propositions over variables joined by fuzzy AND/OR
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Box<Expr<T>>, Box<Expr<T>>),
    Or(Box<Expr<T>>, Box<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}

#[test]
fn test_premise_builders() {
    use crate::terms::{Key, Terms};
    use crate::variable::Variables;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Fabric {
        Delicate,
        NotDelicate,
    }

    let mut vars = Variables::<Fabric>::new();
    let fabric = vars.add("fabric_weight", 1. ..=11., Terms::<Fabric>::new()).unwrap();
    let premise: Expr<Fabric> = fabric
        .is(Fabric::Delicate)
        .or(fabric.is(Fabric::NotDelicate))
        .and(fabric.is(Fabric::Delicate));

    assert_eq!(
        premise,
        Expr::And(
            Box::new(Expr::Or(
                Box::new(Expr::Is(fabric.key(), Fabric::Delicate)),
                Box::new(Expr::Is(fabric.key(), Fabric::NotDelicate)),
            )),
            Box::new(Expr::Is(fabric.key(), Fabric::Delicate)),
        )
    );
}
