use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Inputs that coerce to `true` under [`ValueType::Boolean`].
pub const TRUE_WORDS: &[&str] = &["true", "yes", "1"];

/// Inputs that coerce to `false` under [`ValueType::Boolean`].
pub const FALSE_WORDS: &[&str] = &["false", "no", "0"];

/// The type a raw input value is declared as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    #[default]
    Text,
    Number,
    Boolean,
}

impl ValueType {
    /// All selectable types, in selector order.
    pub const ALL: [ValueType; 3] = [Self::Text, Self::Number, Self::Boolean];

    /// The selector label for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "string",
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

/// Error returned when a type label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value type {0:?} (expected string, number or boolean)")]
pub struct UnknownValueType(pub String);

impl FromStr for ValueType {
    type Err = UnknownValueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "text" | "str" => Ok(Self::Text),
            "number" | "num" => Ok(Self::Number),
            "boolean" | "bool" => Ok(Self::Boolean),
            _ => Err(UnknownValueType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ScalarValue
// ---------------------------------------------------------------------------

/// A stored value. Serializes to the matching JSON primitive.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl ScalarValue {
    /// Coerce raw user input into a value of the declared type.
    ///
    /// The input is trimmed first. Numbers made only of ASCII digits become
    /// integers and must fit in `i64`; anything else must parse as a finite
    /// float.
    pub fn coerce(raw: &str, ty: ValueType) -> StoreResult<Self> {
        let raw = raw.trim();
        match ty {
            ValueType::Text => Ok(Self::Text(raw.to_string())),
            ValueType::Number => parse_number(raw),
            ValueType::Boolean => parse_boolean(raw),
        }
    }

    /// Map a decoded JSON value onto a scalar.
    ///
    /// Returns the JSON type name on rejection.
    pub fn from_json(value: &Value) -> Result<Self, &'static str> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Bool(b) => Ok(Self::Boolean(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Integer(i)),
                None => n.as_f64().map(Self::Float).ok_or("number"),
            },
            other => Err(json_type_name(other)),
        }
    }

    /// Short name of the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
        }
    }
}

/// Renders the value as JSON.
impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", Value::String(s.clone())),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{}", Value::from(*x)),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for ScalarValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

fn parse_number(raw: &str) -> StoreResult<ScalarValue> {
    let invalid = || StoreError::InvalidNumber {
        input: raw.to_string(),
    };
    // All-digit input must fit i64.
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.parse::<i64>().map(ScalarValue::Integer).map_err(|_| invalid());
    }
    match raw.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(ScalarValue::Float(x)),
        _ => Err(invalid()),
    }
}

fn parse_boolean(raw: &str) -> StoreResult<ScalarValue> {
    if TRUE_WORDS.iter().any(|w| raw.eq_ignore_ascii_case(w)) {
        Ok(ScalarValue::Boolean(true))
    } else if FALSE_WORDS.iter().any(|w| raw.eq_ignore_ascii_case(w)) {
        Ok(ScalarValue::Boolean(false))
    } else {
        Err(StoreError::InvalidBoolean {
            input: raw.to_string(),
        })
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
