//! Bound values.
//!
//! [`Value`] is the scalar that ends up in the positional parameter list of a
//! rendered statement. It is inspectable (`PartialEq`, `Serialize`) so callers and
//! tests can see exactly what will be sent, and it implements [`ToSql`] so the list
//! can be handed straight to a tokio-postgres client.
//!
//! [`Operand`] is what a condition compares against: a single value or a list.

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type, WrongType};
use uuid::Uuid;

/// A scalar bound to one `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// A JSON document (json/jsonb parameter)
    Json(serde_json::Value),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Map a JSON value onto the closest scalar.
    ///
    /// Strings, booleans, numbers and null become their native variants; arrays and
    /// objects are kept as [`Value::Json`].
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Json(serde_json::Value::Number(n)), Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Json(other),
        }
    }
}

/// Encode `v` only if its Rust type accepts the parameter type.
fn checked<T: ToSql>(
    v: &T,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    if !T::accepts(ty) {
        return Err(Box::new(WrongType::new::<T>(ty.clone())));
    }
    v.to_sql(ty, out)
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => checked(v, ty, out),
            Value::Int(v) => match *ty {
                Type::INT2 => checked(&i16::try_from(*v)?, ty, out),
                Type::INT4 => checked(&i32::try_from(*v)?, ty, out),
                _ => checked(v, ty, out),
            },
            Value::Float(v) => match *ty {
                Type::FLOAT4 => {
                    let narrowed = *v as f32;
                    if v.is_finite() && !narrowed.is_finite() {
                        return Err(format!("{v} is out of range for float4").into());
                    }
                    checked(&narrowed, ty, out)
                }
                _ => checked(v, ty, out),
            },
            Value::Text(v) => checked(v, ty, out),
            Value::Json(v) => checked(v, ty, out),
            Value::Timestamp(v) => checked(v, ty, out),
            Value::Uuid(v) => checked(v, ty, out),
        }
    }

    // Type checking happens per variant in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

/// The right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    Scalar(Value),
    List(Vec<Value>),
}

impl Operand {
    /// Returns `true` for a scalar NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Scalar(Value::Null))
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Scalar(value)
    }
}

impl From<Vec<Value>> for Operand {
    fn from(values: Vec<Value>) -> Self {
        Operand::List(values)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

impl From<serde_json::Value> for Operand {
    fn from(value: serde_json::Value) -> Self {
        Operand::Scalar(Value::Json(value))
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant($conv(v))
                }
            }

            impl From<Option<$ty>> for Value {
                fn from(v: Option<$ty>) -> Self {
                    v.map_or(Value::Null, Value::from)
                }
            }

            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Scalar(Value::from(v))
                }
            }

            impl From<Option<$ty>> for Operand {
                fn from(v: Option<$ty>) -> Self {
                    Operand::Scalar(Value::from(v))
                }
            }

            impl From<Vec<$ty>> for Operand {
                fn from(v: Vec<$ty>) -> Self {
                    Operand::List(v.into_iter().map(Value::from).collect())
                }
            }

            impl From<Vec<Option<$ty>>> for Operand {
                fn from(v: Vec<Option<$ty>>) -> Self {
                    Operand::List(v.into_iter().map(Value::from).collect())
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Bool(|v| v),
    i16 => Int(i64::from),
    i32 => Int(i64::from),
    i64 => Int(|v| v),
    f32 => Float(f64::from),
    f64 => Float(|v| v),
    String => Text(|v| v),
    &str => Text(str::to_string),
    DateTime<Utc> => Timestamp(|v| v),
    Uuid => Uuid(|v| v),
}
