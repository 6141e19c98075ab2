//! Value checks and sanitizers for raw request fields.
//!
//! Request bodies may carry native JSON values or their string form (form
//! encoded uploads send everything as text), so each check accepts both.

use serde_json::{Number, Value};

use super::rules::{FieldCheck, ProductField};

/// Outcome of applying one syntactic step to a value.
pub(super) type StepResult = Result<Value, String>;

/// Whether `value` counts as falsy for optional fields.
pub(super) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_none_or(|n| n == 0.0 || n.is_nan()),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Apply a syntactic step, returning the (possibly rewritten) value.
///
/// Custom checks are not syntactic and pass the value through unchanged.
pub(super) fn apply(field: ProductField, check: FieldCheck, value: Value) -> StepResult {
    match check {
        FieldCheck::IsString => match value {
            Value::String(_) => Ok(value),
            _ => Err(format!("{field} must be a string")),
        },
        FieldCheck::Length { min, max } => check_length(field, min, max, value),
        FieldCheck::Trim => Ok(match value {
            Value::String(text) => Value::String(text.trim().to_owned()),
            other => other,
        }),
        FieldCheck::Float { min } => parse_float(&value)
            .filter(|parsed| *parsed >= min)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("{field} must be a number greater than or equal to {min}")),
        FieldCheck::Int { min } => {
            let parsed = parse_int(&value).filter(|parsed| min.is_none_or(|min| *parsed >= min));
            match (parsed, min) {
                (Some(parsed), _) => Ok(Value::from(parsed)),
                (None, Some(min)) => Err(format!(
                    "{field} must be an integer greater than or equal to {min}"
                )),
                (None, None) => Err(format!("{field} must be an integer")),
            }
        }
        FieldCheck::Boolean => parse_bool(&value)
            .map(Value::Bool)
            .ok_or_else(|| format!("{field} must be a boolean")),
        FieldCheck::Custom(_) => Ok(value),
    }
}

fn check_length(field: ProductField, min: usize, max: Option<usize>, value: Value) -> StepResult {
    let length = match &value {
        Value::String(text) => text.chars().count(),
        _ => return Err(format!("{field} must be a string")),
    };
    let within = length >= min && max.is_none_or(|max| length <= max);
    if within {
        return Ok(value);
    }
    Err(match max {
        Some(max) => format!("{field} must be between {min} and {max} characters long"),
        None => format!("{field} must be at least {min} characters long"),
    })
}

fn parse_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) if !text.is_empty() => text.parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(whole_float)),
        Value::String(text) => text.parse::<i64>().ok(),
        _ => None,
    }
}

fn whole_float(float: f64) -> Option<i64> {
    // Whole values below 2^53 convert exactly.
    (float.fract() == 0.0 && float.abs() < 9.0e15).then_some(float as i64)
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(text) => match text.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
