// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use crate::{ScfError, Value};

fn type_error(expected: &str, value: &Value, hint: &str, code: u32) -> ScfError {
    ScfError::TypeError {
        message: format!("Expected {}, got {} `{}`", expected, value.type_name(), value),
        line: 0,
        column: 0,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<Value> for String {
    type Error = ScfError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(type_error("string", &other, "Quote the value in your config", 401)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = ScfError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(type_error("bool", &other, "Use true/false or True/False", 403)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ScfError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value
            .as_float()
            .ok_or_else(|| type_error("number", &value, "Use a number value in your config", 402))
    }
}

impl TryFrom<Value> for f32 {
    type Error = ScfError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|n| n as f32)
    }
}

macro_rules! impl_try_from_integer {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = ScfError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::Integer(n) => <$ty>::try_from(n).map_err(|_| ScfError::TypeError {
                            message: format!("Integer {} is out of range for {}", n, stringify!($ty)),
                            line: 0,
                            column: 0,
                            hint: None,
                            code: Some(406),
                        }),
                        other => Err(type_error(
                            "integer",
                            &other,
                            "Use a whole number without a decimal point",
                            402,
                        )),
                    }
                }
            }
        )*
    };
}

impl_try_from_integer!(i64, i32, u64, u32, u16, u8, usize);

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = ScfError>,
{
    type Error = ScfError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) | Value::Tuple(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(type_error("list or tuple", &other, "Wrap the values in [...] or (...)", 404)),
        }
    }
}

impl<T> TryFrom<Value> for HashMap<String, T>
where
    T: TryFrom<Value, Error = ScfError>,
{
    type Error = ScfError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| {
                    let key = String::try_from(k).map_err(|_| ScfError::TypeError {
                        message: "Map has a non-string key".into(),
                        line: 0,
                        column: 0,
                        hint: Some("Only maps with string keys convert to HashMap<String, _>".into()),
                        code: Some(405),
                    })?;
                    Ok((key, T::try_from(v)?))
                })
                .collect(),
            other => Err(type_error("map", &other, "Use {\"key\": value} syntax", 405)),
        }
    }
}
