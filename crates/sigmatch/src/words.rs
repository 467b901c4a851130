//! Word type detection and coercion.
//!
//! A parameter declares the set of value kinds it accepts. Raw tokens are
//! checked against that set (`is_type`) and, once accepted, turned into a
//! typed [`Value`] (`evaluate`).

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Kind of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced token value.
///
/// `List` is only produced for variadic parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }
}

// Integral numbers print (and serialize) without a trailing `.0`.
fn integral(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => match integral(*n) {
                Some(i) => write!(f, "{i}"),
                None => write!(f, "{n}"),
            },
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(values) => {
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::List(values) => serializer.collect_seq(values),
        }
    }
}

fn parse_number(word: &str) -> Option<f64> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_boolean(word: &str) -> Option<bool> {
    match word {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Whether `word` can be read as a value of kind `ty`.
pub fn is_type(ty: ValueType, word: &str) -> bool {
    match ty {
        ValueType::String => true,
        ValueType::Number => parse_number(word).is_some(),
        ValueType::Boolean => parse_boolean(word).is_some(),
    }
}

/// Coerce `word` into a value according to the declared `types`.
///
/// Numbers take precedence over booleans; anything else stays a string.
pub fn evaluate(types: &[ValueType], word: &str) -> Value {
    if types.contains(&ValueType::Number) {
        if let Some(n) = parse_number(word) {
            return Value::Number(n);
        }
    }
    if types.contains(&ValueType::Boolean) {
        if let Some(b) = parse_boolean(word) {
            return Value::Boolean(b);
        }
    }
    Value::String(word.to_string())
}
