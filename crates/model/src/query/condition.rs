use crate::{core::value::Value, error::ModelError};
use std::{fmt, str::FromStr};

/// Comparison operator of a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
    Like,
}

impl Op {
    pub const ALL: [Op; 9] = [
        Op::Eq,
        Op::Ne,
        Op::Gt,
        Op::Gte,
        Op::Lt,
        Op::Lte,
        Op::In,
        Op::Nin,
        Op::Like,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::In => "in",
            Op::Nin => "nin",
            Op::Like => "like",
        }
    }

    pub fn is_membership(&self) -> bool {
        matches!(self, Op::In | Op::Nin)
    }
}

impl FromStr for Op {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Op::ALL
            .into_iter()
            .find(|op| op.as_str() == lowered)
            .ok_or_else(|| ModelError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a fuzzy match must occur within the field value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    Contains,
    StartsWith,
    EndsWith,
}

impl FromStr for MatchMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "contains" => Ok(MatchMode::Contains),
            "starts_with" | "prefix" => Ok(MatchMode::StartsWith),
            "ends_with" | "suffix" => Ok(MatchMode::EndsWith),
            _ => Err(ModelError::UnknownMatchMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Scalar(Value),
    Sequence(Vec<Value>),
    /// A backend pattern already produced by the pattern compiler.
    Pattern(String),
}

/// One atomic predicate on a field.
///
/// The typed constructors always pair an operator with the value shape it
/// expects. [`Condition::new`] accepts any pairing; compilers drop a pairing
/// they cannot express.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    op: Op,
    value: ConditionValue,
}

impl Condition {
    pub fn new(op: Op, value: ConditionValue) -> Self {
        Self { op, value }
    }

    pub fn eq(value: impl Into<Value>) -> Self {
        Self::scalar(Op::Eq, value)
    }

    pub fn ne(value: impl Into<Value>) -> Self {
        Self::scalar(Op::Ne, value)
    }

    pub fn gt(value: impl Into<Value>) -> Self {
        Self::scalar(Op::Gt, value)
    }

    pub fn gte(value: impl Into<Value>) -> Self {
        Self::scalar(Op::Gte, value)
    }

    pub fn lt(value: impl Into<Value>) -> Self {
        Self::scalar(Op::Lt, value)
    }

    pub fn lte(value: impl Into<Value>) -> Self {
        Self::scalar(Op::Lte, value)
    }

    pub fn in_list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::sequence(Op::In, values)
    }

    pub fn not_in<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::sequence(Op::Nin, values)
    }

    pub fn like(pattern: impl Into<String>) -> Self {
        Self {
            op: Op::Like,
            value: ConditionValue::Pattern(pattern.into()),
        }
    }

    fn scalar(op: Op, value: impl Into<Value>) -> Self {
        Self {
            op,
            value: ConditionValue::Scalar(value.into()),
        }
    }

    fn sequence<I>(op: Op, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            op,
            value: ConditionValue::Sequence(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn value(&self) -> &ConditionValue {
        &self.value
    }

    pub fn is_well_formed(&self) -> bool {
        match (&self.value, self.op) {
            (ConditionValue::Sequence(_), op) => op.is_membership(),
            (ConditionValue::Pattern(_), op) => op == Op::Like,
            (ConditionValue::Scalar(_), op) => !op.is_membership() && op != Op::Like,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_round_trips_through_str() {
        for op in Op::ALL {
            assert_eq!(op.as_str().parse::<Op>(), Ok(op));
        }
        assert_eq!("GTE".parse::<Op>(), Ok(Op::Gte));
        assert!("between".parse::<Op>().is_err());
    }

    #[test]
    fn test_match_mode_parse() {
        assert_eq!("starts_with".parse::<MatchMode>(), Ok(MatchMode::StartsWith));
        assert_eq!("suffix".parse::<MatchMode>(), Ok(MatchMode::EndsWith));
        assert_eq!(MatchMode::default(), MatchMode::Contains);
        assert!("around".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_typed_constructors_are_well_formed() {
        let conditions = [
            Condition::eq("a"),
            Condition::ne(1),
            Condition::gt(1),
            Condition::gte(1.5),
            Condition::lt(2),
            Condition::lte(2),
            Condition::in_list(["a", "b"]),
            Condition::not_in([1, 2]),
            Condition::like("%a%"),
        ];
        assert!(conditions.iter().all(Condition::is_well_formed));
    }

    #[test]
    fn test_mismatched_pairs_are_not_well_formed() {
        let scalar_in = Condition::new(Op::In, ConditionValue::Scalar(Value::Int(1)));
        let seq_eq = Condition::new(Op::Eq, ConditionValue::Sequence(vec![]));
        let pattern_gt = Condition::new(Op::Gt, ConditionValue::Pattern("x".to_string()));
        let scalar_like = Condition::new(Op::Like, ConditionValue::Scalar(Value::Null));

        assert!(!scalar_in.is_well_formed());
        assert!(!seq_eq.is_well_formed());
        assert!(!pattern_gt.is_well_formed());
        assert!(!scalar_like.is_well_formed());
    }

    #[test]
    fn test_in_list_collects_values() {
        let cond = Condition::in_list(vec![1, 2, 3]);
        assert_eq!(cond.op(), Op::In);
        assert_eq!(
            cond.value(),
            &ConditionValue::Sequence(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }
}
