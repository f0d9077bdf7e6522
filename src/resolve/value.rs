use std::fmt;

use super::error::ResolveError;

#[derive(Debug, Clone, PartialEq)]
pub enum TraceValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Char(char),
    Str(String),
    Object { class: String, id: u64 },
    Array(Vec<TraceValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Double,
    Char,
    Str,
    Object,
    Array,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "boolean",
            ValueType::Int => "integer",
            ValueType::Double => "double",
            ValueType::Char => "char",
            ValueType::Str => "string",
            ValueType::Object => "object",
            ValueType::Array => "array",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TraceValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            TraceValue::Null => ValueType::Null,
            TraceValue::Bool(_) => ValueType::Bool,
            TraceValue::Int(_) => ValueType::Int,
            TraceValue::Double(_) => ValueType::Double,
            TraceValue::Char(_) => ValueType::Char,
            TraceValue::Str(_) => ValueType::Str,
            TraceValue::Object { .. } => ValueType::Object,
            TraceValue::Array(_) => ValueType::Array,
        }
    }

    pub fn as_array(&self) -> Option<&[TraceValue]> {
        match self {
            TraceValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for TraceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceValue::Null => write!(f, "null"),
            TraceValue::Bool(value) => write!(f, "{value}"),
            TraceValue::Int(value) => write!(f, "{value}"),
            TraceValue::Double(value) if value.is_nan() => write!(f, "NaN"),
            TraceValue::Double(value) if value.is_infinite() => {
                write!(f, "{}Infinity", if *value < 0. { "-" } else { "" })
            }
            TraceValue::Double(value) => write!(f, "{value:?}"),
            TraceValue::Char(value) => write!(f, "{value:?}"),
            TraceValue::Str(value) => write!(f, "{value:?}"),
            TraceValue::Object { class, id } => write!(f, "{class}@{id}"),
            TraceValue::Array(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

pub fn expect_array<'v>(value: &'v TraceValue, what: &str) -> Result<&'v [TraceValue], ResolveError> {
    value.as_array().ok_or_else(|| {
        ResolveError::unexpected_value_type(format!(
            "{what}: expected array, but found {}",
            value.value_type()
        ))
        .raised(what)
    })
}

pub fn expect_array_len<'v>(
    value: &'v TraceValue,
    expected: usize,
    what: &str,
) -> Result<&'v [TraceValue], ResolveError> {
    let items = expect_array(value, what)?;
    if items.len() != expected {
        return Err(ResolveError::array_length(expected, items.len()).raised(what));
    }
    Ok(items)
}

pub fn expect_int(value: &TraceValue, what: &str) -> Result<i64, ResolveError> {
    match value {
        TraceValue::Int(value) => Ok(*value),
        other => Err(ResolveError::unexpected_value_type(format!(
            "{what}: expected integer, but found {}",
            other.value_type()
        ))
        .raised(what)),
    }
}

/// Times are non-negative counters.
pub fn expect_time(value: &TraceValue, what: &str) -> Result<usize, ResolveError> {
    let time = expect_int(value, what)?;
    usize::try_from(time).map_err(|_| {
        ResolveError::unexpected_value(format!("{what}: time must be non-negative, found {time}"))
            .raised(what)
    })
}
