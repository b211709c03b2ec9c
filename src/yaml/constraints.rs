//! Property constraint clauses.

use serde::Deserialize;
use serde_yaml::Value;

use super::scalar_string;

/// One TOSCA constraint operator with its operand.
///
/// In YAML a clause is a single-key mapping such as `{ in_range: [1, 10] }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintClause {
    Equal(Value),
    GreaterThan(Value),
    GreaterOrEqual(Value),
    LessThan(Value),
    LessOrEqual(Value),
    InRange(Vec<Value>),
    ValidValues(Vec<Value>),
    Length(Value),
    MinLength(Value),
    MaxLength(Value),
    Pattern(String),
}

impl ConstraintClause {
    /// The operator keyword.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Equal(_) => "equal",
            Self::GreaterThan(_) => "greater_than",
            Self::GreaterOrEqual(_) => "greater_or_equal",
            Self::LessThan(_) => "less_than",
            Self::LessOrEqual(_) => "less_or_equal",
            Self::InRange(_) => "in_range",
            Self::ValidValues(_) => "valid_values",
            Self::Length(_) => "length",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::Pattern(_) => "pattern",
        }
    }

    /// The scalar operand, for single-valued operators.
    pub fn value(&self) -> Option<String> {
        match self {
            Self::Equal(v)
            | Self::GreaterThan(v)
            | Self::GreaterOrEqual(v)
            | Self::LessThan(v)
            | Self::LessOrEqual(v)
            | Self::Length(v)
            | Self::MinLength(v)
            | Self::MaxLength(v) => scalar_string(v),
            Self::Pattern(p) => Some(p.clone()),
            Self::InRange(_) | Self::ValidValues(_) => None,
        }
    }

    /// The list operand, for `in_range` and `valid_values`.
    pub fn list(&self) -> Vec<String> {
        match self {
            Self::InRange(values) | Self::ValidValues(values) => {
                values.iter().filter_map(scalar_string).collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("equal: 5", "equal", Some("5"), 0)]
    #[case("in_range: [1, 10]", "in_range", None, 2)]
    #[case("valid_values: [a, b, c]", "valid_values", None, 3)]
    #[case("pattern: '^[a-z]+$'", "pattern", Some("^[a-z]+$"), 0)]
    #[case("min_length: 2", "min_length", Some("2"), 0)]
    fn test_constraint_triples(
        #[case] input: &str,
        #[case] key: &str,
        #[case] value: Option<&str>,
        #[case] list_len: usize,
    ) {
        let clause: ConstraintClause = serde_yaml::from_str(input).unwrap();
        assert_eq!(clause.key(), key);
        assert_eq!(clause.value().as_deref(), value);
        assert_eq!(clause.list().len(), list_len);
    }
}
