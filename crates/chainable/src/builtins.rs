//! Library bases that come with their own class-level members.

use crate::base::Base;
use crate::error::ChainError;
use crate::value::Value;

/// Wraps its first argument as text; `""` with no arguments.
pub fn string() -> Base {
    Base::new("String", |args| {
        Ok(Value::string(args.first().map(Value::to_text).unwrap_or_default()))
    })
    .with_behavior("fromCharCode", |_, args| {
        let text = args
            .iter()
            .map(|code| {
                code.as_int()
                    .and_then(|c| u32::try_from(c).ok())
                    .and_then(char::from_u32)
                    .ok_or_else(|| ChainError::behavior(format!("invalid char code {}", code.to_text())))
            })
            .collect::<Result<String, _>>()?;
        Ok(Value::string(text))
    })
}

/// Coerces its first argument to a number; `0` with no arguments.
pub fn number() -> Base {
    Base::new("Number", |args| Ok(args.first().map(to_number).unwrap_or(Value::Int(0))))
        .with_data("MAX_SAFE_INTEGER", Value::Int(MAX_SAFE_INTEGER))
        .with_data("MIN_SAFE_INTEGER", Value::Int(-MAX_SAFE_INTEGER))
        .with_data("EPSILON", Value::Float(f64::EPSILON))
        .with_behavior("isInteger", |_, args| {
            let is_integer = match args.first() {
                Some(Value::Int(_)) => true,
                Some(Value::Float(v)) => v.is_finite() && v.fract() == 0.0,
                _ => false,
            };
            Ok(Value::Bool(is_integer))
        })
        .with_behavior("isNaN", |_, args| {
            Ok(Value::Bool(matches!(args.first(), Some(Value::Float(v)) if v.is_nan())))
        })
}

/// Truthiness of its first argument.
pub fn boolean() -> Base {
    Base::new("Boolean", |args| {
        Ok(Value::Bool(args.first().is_some_and(Value::is_truthy)))
    })
}

/// Copies an object argument, or starts empty.
pub fn object() -> Base {
    Base::new("Object", |args| match args.first() {
        Some(Value::Object(fields)) => Ok(Value::Object(fields.clone())),
        _ => Ok(Value::empty_object()),
    })
    .with_behavior("keys", |_, args| {
        let keys: Vec<Value> = args
            .first()
            .and_then(Value::as_object)
            .map(|fields| fields.keys().map(|k| Value::string(k.as_str())).collect())
            .unwrap_or_default();
        Ok(Value::from(keys))
    })
}

/// Look up a builtin base by name.
pub fn by_name(name: &str) -> Option<Base> {
    match name {
        "string" | "String" => Some(string()),
        "number" | "Number" => Some(number()),
        "boolean" | "Boolean" => Some(boolean()),
        "object" | "Object" => Some(object()),
        _ => None,
    }
}

const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

fn to_number(value: &Value) -> Value {
    match value {
        Value::Int(_) | Value::Float(_) => value.clone(),
        Value::Bool(b) => Value::Int(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Value::Int(0)
            } else if let Ok(i) = s.parse::<i64>() {
                Value::Int(i)
            } else {
                Value::Float(s.parse::<f64>().unwrap_or(f64::NAN))
            }
        }
        Value::Unit | Value::Undefined | Value::Object(_) | Value::List(_) => Value::Float(f64::NAN),
    }
}
