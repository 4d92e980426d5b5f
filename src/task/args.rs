//! Argument text grammar shared by every parameterized task family.
//!
//! Argument text is a comma-separated list of tokens. A token is either
//! `key=value` or a bare value; bare values fill the schema's slots in
//! declaration order.
//!
//! ```text
//! MatchNumber   "42"                       -> target = 42
//! SortInputs    "size=3,direction=any"     -> size = 3, direction = "any"
//! Mult          "5, halflife=2.0"          -> threshold = 5, halflife = 2.0
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::error::ArgError;

static KEYED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*)$").expect("argument token regex is valid")
});

/// Type of a schema slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Int,
    Float,
    Text,
}

/// A parsed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone)]
struct ArgSpec {
    name: &'static str,
    kind: ArgKind,
    default: Option<ArgValue>,
}

/// Ordered list of named, typed slots a family accepts.
///
/// A slot without a default is required.
#[derive(Debug, Clone, Default)]
pub struct ArgSchema {
    specs: Vec<ArgSpec>,
}

impl ArgSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an integer slot.
    pub fn int(mut self, name: &'static str, default: Option<i64>) -> Self {
        self.specs.push(ArgSpec {
            name,
            kind: ArgKind::Int,
            default: default.map(ArgValue::Int),
        });
        self
    }

    /// Add a floating-point slot.
    pub fn float(mut self, name: &'static str, default: Option<f64>) -> Self {
        self.specs.push(ArgSpec {
            name,
            kind: ArgKind::Float,
            default: default.map(ArgValue::Float),
        });
        self
    }

    /// Add a free-text slot.
    pub fn text(mut self, name: &'static str, default: Option<&str>) -> Self {
        self.specs.push(ArgSpec {
            name,
            kind: ArgKind::Text,
            default: default.map(|d| ArgValue::Text(d.to_string())),
        });
        self
    }

    /// Parse argument text against this schema.
    ///
    /// # Postconditions
    /// - On success every slot has a value (given or default)
    ///
    /// # Errors
    /// Unknown keys, duplicate slots, surplus positional values, values that
    /// do not parse as the slot's kind, and missing required slots.
    pub fn parse(&self, text: &str) -> Result<ArgValues, ArgError> {
        let mut given: Vec<Option<ArgValue>> = vec![None; self.specs.len()];
        let mut positional = 0usize;

        for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (slot, raw) = match KEYED_TOKEN.captures(token) {
                Some(caps) => {
                    let key = caps.get(1).map_or("", |m| m.as_str());
                    let raw = caps.get(2).map_or("", |m| m.as_str()).trim();
                    let slot = self
                        .specs
                        .iter()
                        .position(|s| s.name.eq_ignore_ascii_case(key))
                        .ok_or_else(|| ArgError::UnknownKey(key.to_string()))?;
                    (slot, raw)
                }
                None => {
                    if token.contains('=') {
                        return Err(ArgError::MalformedToken(token.to_string()));
                    }
                    let slot = positional;
                    positional += 1;
                    if slot >= self.specs.len() {
                        return Err(ArgError::TooManyPositional {
                            expected: self.specs.len(),
                        });
                    }
                    (slot, token)
                }
            };

            if given[slot].is_some() {
                return Err(ArgError::Duplicate(self.specs[slot].name.to_string()));
            }
            given[slot] = Some(convert(&self.specs[slot], raw)?);
        }

        let mut values = Vec::with_capacity(self.specs.len());
        for (spec, value) in self.specs.iter().zip(given) {
            let value = value
                .or_else(|| spec.default.clone())
                .ok_or_else(|| ArgError::Missing(spec.name.to_string()))?;
            values.push((spec.name, value));
        }
        Ok(ArgValues { values })
    }
}

fn convert(spec: &ArgSpec, raw: &str) -> Result<ArgValue, ArgError> {
    let not_numeric = || ArgError::NotNumeric {
        key: spec.name.to_string(),
        value: raw.to_string(),
    };
    match spec.kind {
        ArgKind::Int => raw.parse::<i64>().map(ArgValue::Int).map_err(|_| not_numeric()),
        ArgKind::Float => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(ArgValue::Float(v)),
            _ => Err(not_numeric()),
        },
        ArgKind::Text => Ok(ArgValue::Text(raw.to_string())),
    }
}

/// Values produced by [`ArgSchema::parse`], one per slot.
#[derive(Debug, Clone)]
pub struct ArgValues {
    values: Vec<(&'static str, ArgValue)>,
}

impl ArgValues {
    fn get(&self, name: &str) -> Result<&ArgValue, ArgError> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| ArgError::Missing(name.to_string()))
    }

    pub fn int(&self, name: &str) -> Result<i64, ArgError> {
        match self.get(name)? {
            ArgValue::Int(v) => Ok(*v),
            _ => Err(ArgError::Missing(name.to_string())),
        }
    }

    pub fn float(&self, name: &str) -> Result<f64, ArgError> {
        match self.get(name)? {
            ArgValue::Float(v) => Ok(*v),
            ArgValue::Int(v) => Ok(*v as f64),
            _ => Err(ArgError::Missing(name.to_string())),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str, ArgError> {
        match self.get(name)? {
            ArgValue::Text(v) => Ok(v),
            _ => Err(ArgError::Missing(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ArgSchema {
        ArgSchema::new()
            .int("threshold", Some(0))
            .float("halflife", Some(0.1))
            .text("label", None)
    }

    #[test]
    fn test_positional_then_keyed() {
        let values = schema().parse("5, label=abc, halflife=2.5").unwrap();
        assert_eq!(values.int("threshold").unwrap(), 5);
        assert_eq!(values.float("halflife").unwrap(), 2.5);
        assert_eq!(values.text("label").unwrap(), "abc");
    }

    #[test]
    fn test_defaults_fill_missing_slots() {
        let values = schema().parse("label=x").unwrap();
        assert_eq!(values.int("threshold").unwrap(), 0);
        assert!((values.float("halflife").unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_required_slot_missing() {
        assert_eq!(
            schema().parse("").unwrap_err(),
            ArgError::Missing("label".into())
        );
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let values = schema().parse("LABEL=x,Threshold=-1").unwrap();
        assert_eq!(values.int("threshold").unwrap(), -1);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            schema().parse("abc, label=x"),
            Err(ArgError::NotNumeric { .. })
        ));
        assert!(matches!(
            schema().parse("label=x, colour=red"),
            Err(ArgError::UnknownKey(_))
        ));
        assert!(matches!(
            schema().parse("1, 2.0, x, y"),
            Err(ArgError::TooManyPositional { expected: 3 })
        ));
        assert!(matches!(
            schema().parse("1, threshold=2, label=x"),
            Err(ArgError::Duplicate(_))
        ));
        assert!(matches!(
            schema().parse("label=x, halflife=nan"),
            Err(ArgError::NotNumeric { .. })
        ));
        assert!(matches!(
            schema().parse("label=x, 1=2"),
            Err(ArgError::MalformedToken(_))
        ));
    }
}
