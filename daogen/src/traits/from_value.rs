//! FromValue trait for converting result columns to Rust types

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// Trait for types that can be constructed from a result column value.
pub trait FromValue: Sized {
    /// Convert a result value to this type.
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! from_integer_value {
    ($($ty:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Int(v) => $ty::try_from(v).map_err(|_| {
                            Error::conversion(stringify!($ty), format!("int({}) out of range", v))
                        }),
                        Value::UInt(v) => $ty::try_from(v).map_err(|_| {
                            Error::conversion(stringify!($ty), format!("uint({}) out of range", v))
                        }),
                        Value::Bool(v) => Ok($ty::from(v)),
                        other => Err(Error::mismatch(stringify!($ty), &other)),
                    }
                }
            }
        )*
    };
}

from_integer_value!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! from_exact_value {
    ($($ty:ty => $variant:ident: $name:literal),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(Error::mismatch($name, &other)),
                    }
                }
            }
        )*
    };
}

from_exact_value! {
    NaiveDate => Date: "date",
    NaiveDateTime => DateTime: "datetime",
    NaiveTime => Time: "time",
    serde_json::Value => Json: "json",
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::Int(v) => Ok(v != 0),
            Value::UInt(v) => Ok(v != 0),
            other => Err(Error::mismatch("bool", &other)),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            Value::UInt(v) => Ok(v as f64),
            other => Err(Error::mismatch("f64", &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl FromValue for Decimal {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(v) => Ok(v),
            Value::Int(v) => Ok(Decimal::from(v)),
            Value::UInt(v) => Ok(Decimal::from(v)),
            Value::Text(v) => v
                .parse()
                .map_err(|_| Error::conversion("decimal", format!("text({v})"))),
            other => Err(Error::mismatch("decimal", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            Value::Bytes(v) => String::from_utf8(v)
                .map_err(|e| Error::conversion("utf8 string", format!("invalid utf8: {e}"))),
            other => Err(Error::mismatch("text", &other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            Value::Text(v) => Ok(v.into_bytes()),
            other => Err(Error::mismatch("bytes", &other)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
