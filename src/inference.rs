use std::fmt::Debug;
use std::hash::Hash;

use crate::dsl::Expr;
use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::ops::{AndOp, OrOp};
use crate::outputs::InferenceResult;
use crate::rules::Rules;
use crate::variable::Variables;

/// Evaluates every rule of a rule base against crisp inputs, producing the
/// per-rule firing strengths and weighted output levels.
#[derive(Clone, Copy, Debug, Default)]
pub struct InferenceEngine {
    and_op: AndOp,
    or_op: OrOp,
}

impl InferenceEngine {
    pub fn new(and_op: AndOp, or_op: OrOp) -> Self {
        Self { and_op, or_op }
    }

    pub fn eval<T: Eq + Hash + Debug>(
        &self,
        vars: &Variables<T>,
        rules: &Rules<T>,
        inputs: &Inputs,
    ) -> Result<InferenceResult> {
        // Reject facts that would turn every membership degree into NaN
        for (key, value) in inputs.iter() {
            let var = vars.get(key)?;

            if !value.is_finite() {
                return Err(Error::NonFiniteInput {
                    variable: var.name.clone(),
                    value,
                });
            }

            if !var.contains(value) {
                tracing::warn!(
                    variable = %var.name,
                    value,
                    min = var.min_u,
                    max = var.max_u,
                    "input outside of its universe, membership saturates"
                );
            }
        }

        let mut strengths = Vec::with_capacity(rules.len());
        let mut outputs = Vec::with_capacity(rules.len());

        for rule in rules.iter() {
            let strength = self.premise_strength(&rule.premise, vars, inputs)?;
            let output = rule.output(strength);

            tracing::debug!(rule = rule.id.0, strength, output, "rule evaluated");

            strengths.push(strength);
            outputs.push(output);
        }

        Ok(InferenceResult::new(strengths, outputs))
    }

    fn premise_strength<T: Eq + Hash + Debug>(
        &self,
        expr: &Expr<T>,
        vars: &Variables<T>,
        inputs: &Inputs,
    ) -> Result<f64> {
        match expr {
            Expr::Is(var_key, term) => {
                let var = vars.get(*var_key)?;
                let value = inputs
                    .get(*var_key)
                    .ok_or_else(|| Error::MissingInput(var.name.clone()))?;

                var.fuzzify(term, value)
            },
            Expr::And(lhs, rhs) => {
                let left = self.premise_strength(lhs, vars, inputs)?;
                let right = self.premise_strength(rhs, vars, inputs)?;

                Ok(self.and_op.call(left, right))
            },
            Expr::Or(lhs, rhs) => {
                let left = self.premise_strength(lhs, vars, inputs)?;
                let right = self.premise_strength(rhs, vars, inputs)?;

                Ok(self.or_op.call(left, right))
            },
        }
    }
}

#[cfg(test)]
mod bank_loan {
    use approx::assert_relative_eq;

    use super::*;
    use crate::membership::MembershipShape;
    use crate::rules::RuleId;
    use crate::terms::{FuzzySet, Key, Terms};
    use crate::variable::Variable;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Score {
        High,
        Low,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Ratio {
        Good,
        Bad,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Credit {
        Good,
        Bad,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    enum VarTerms {
        Score(Score),
        Ratio(Ratio),
        Credit(Credit),
    }

    impl From<Score> for VarTerms {
        fn from(s: Score) -> Self {
            Self::Score(s)
        }
    }

    impl From<Ratio> for VarTerms {
        fn from(r: Ratio) -> Self {
            Self::Ratio(r)
        }
    }

    impl From<Credit> for VarTerms {
        fn from(c: Credit) -> Self {
            Self::Credit(c)
        }
    }

    struct Model {
        vars: Variables<VarTerms>,
        rules: Rules<VarTerms>,
        score: Variable<Score>,
        ratio: Variable<Ratio>,
        credit: Variable<Credit>,
    }

    fn model() -> Model {
        let mut score_terms = Terms::new();
        let mut ratio_terms = Terms::new();
        let mut credit_terms = Terms::new();

        score_terms.insert(
            Score::High,
            FuzzySet::new("high", MembershipShape::RightTrapezoid { a: 175., b: 190. }),
        );
        score_terms.insert(
            Score::Low,
            FuzzySet::new("low", MembershipShape::LeftTrapezoid { a: 155., b: 175. }),
        );
        ratio_terms.insert(
            Ratio::Good,
            FuzzySet::new("good", MembershipShape::LeftTrapezoid { a: 0.3, b: 0.42 }),
        );
        ratio_terms.insert(
            Ratio::Bad,
            FuzzySet::new("bad", MembershipShape::RightTrapezoid { a: 0.44, b: 0.7 }),
        );
        credit_terms.insert(
            Credit::Good,
            FuzzySet::new("good", MembershipShape::LeftTrapezoid { a: 2., b: 5. }),
        );
        credit_terms.insert(
            Credit::Bad,
            FuzzySet::new("bad", MembershipShape::RightTrapezoid { a: 5., b: 8. }),
        );

        let mut vars = Variables::<VarTerms>::new();
        let score = vars.add("score", 150. ..=200., score_terms).unwrap();
        let ratio = vars.add("ratio", 0.1..=1., ratio_terms).unwrap();
        let credit = vars.add("credit", 0. ..=10., credit_terms).unwrap();
        let mut rules = Rules::<VarTerms>::new();

        // Approve
        rules
            .add(
                RuleId(1),
                score
                    .is(Score::High)
                    .and(ratio.is(Ratio::Good).and(credit.is(Credit::Good))),
                100,
            )
            .unwrap();
        // Reject
        rules
            .add(
                RuleId(2),
                score
                    .is(Score::Low)
                    .and(ratio.is(Ratio::Bad))
                    .or(credit.is(Credit::Bad)),
                0,
            )
            .unwrap();

        Model {
            vars,
            rules,
            score,
            ratio,
            credit,
        }
    }

    #[test]
    fn test_bank_loan() {
        let Model {
            vars,
            rules,
            score,
            ratio,
            credit,
        } = model();
        let mut inputs = Inputs::new();

        inputs.add(score, 190.);
        inputs.add(ratio, 0.39);
        inputs.add(credit, 1.5);

        let model = InferenceEngine::new(AndOp::Min, OrOp::Max);
        let result = model.eval(&vars, &rules, &inputs).unwrap();

        // ratio good(0.39) = 0.03 / 0.12
        assert_relative_eq!(result.strengths()[0], 0.25, epsilon = 1e-12);
        assert_eq!(result.strengths()[1], 0.);
        assert_relative_eq!(result.outputs()[0], 25., epsilon = 1e-9);
        assert_relative_eq!(result.weighted_average().unwrap(), 100., epsilon = 1e-9);
    }

    #[test]
    fn test_operators_change_strength() {
        let Model {
            vars,
            rules,
            score,
            ratio,
            credit,
        } = model();
        let mut inputs = Inputs::new();

        // score high = 0.5, ratio good = 1, credit good = 0.5
        inputs.add(score, 182.5);
        inputs.add(ratio, 0.2);
        inputs.add(credit, 3.5);

        let min = InferenceEngine::default().eval(&vars, &rules, &inputs).unwrap();
        let prod = InferenceEngine::new(AndOp::Prod, OrOp::ProbOr)
            .eval(&vars, &rules, &inputs)
            .unwrap();

        assert_eq!(min.strengths()[0], 0.5);
        assert_eq!(prod.strengths()[0], 0.25);
    }

    #[test]
    fn test_all_rules_silent() {
        let Model {
            vars,
            rules,
            score,
            ratio,
            credit,
        } = model();
        let mut inputs = Inputs::new();

        // Neither high nor low score, good credit: no rule fires
        inputs.add(score, 175.);
        inputs.add(ratio, 0.5);
        inputs.add(credit, 1.);

        let result = InferenceEngine::default().eval(&vars, &rules, &inputs).unwrap();

        assert_eq!(result.strengths(), &[0., 0.]);
        assert!(matches!(result.weighted_average(), Err(Error::DivisionByZero)));
        assert!(matches!(result.temperature(), Err(Error::DivisionByZero)));
    }

    #[test]
    fn test_invalid_inputs() {
        let Model {
            vars,
            rules,
            score,
            ratio,
            credit,
        } = model();
        let engine = InferenceEngine::default();
        let mut inputs = Inputs::new();

        inputs.add(score, 190.);
        inputs.add(ratio, 0.39);

        assert!(matches!(
            engine.eval(&vars, &rules, &inputs),
            Err(Error::MissingInput(name)) if name == "credit"
        ));

        inputs.add(credit, f64::NAN);

        assert!(matches!(
            engine.eval(&vars, &rules, &inputs),
            Err(Error::NonFiniteInput { .. })
        ));
    }
}
