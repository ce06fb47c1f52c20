//! Stored option values.
//!
//! Every option stores its effective value as one [`Value`]. The set of
//! payload types is closed; [`ValueType`] maps each Rust payload type to its
//! variant so reads and stored-value constraints stay type checked.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The effective value of an option, after any transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    Double(f64),
    Str(String),
    Ints(Vec<i32>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
    Strings(Vec<String>),
}

/// Discriminant of [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Double,
    Str,
    Ints,
    Floats,
    Doubles,
    Strings,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Str(_) => ValueKind::Str,
            Self::Ints(_) => ValueKind::Ints,
            Self::Floats(_) => ValueKind::Floats,
            Self::Doubles(_) => ValueKind::Doubles,
            Self::Strings(_) => ValueKind::Strings,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Str => "string",
            Self::Ints => "int list",
            Self::Floats => "float list",
            Self::Doubles => "double list",
            Self::Strings => "string list",
        })
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Ints(v) => join(f, v),
            Self::Floats(v) => join(f, v),
            Self::Doubles(v) => join(f, v),
            Self::Strings(v) => join(f, v),
        }
    }
}

/// A Rust type that can be stored in, and read back from, a [`Value`].
pub trait ValueType: Sized + 'static {
    const KIND: ValueKind;

    fn into_value(self) -> Value;

    /// Unwrap an owned value, handing it back untouched on a kind mismatch.
    fn from_value(value: Value) -> Result<Self, Value>;

    fn peek(value: &Value) -> Option<&Self>;
}

macro_rules! value_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ValueType for $ty {
                const KIND: ValueKind = ValueKind::$variant;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }

                fn peek(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_type! {
    bool => Bool,
    i32 => Int,
    f32 => Float,
    f64 => Double,
    String => Str,
    Vec<i32> => Ints,
    Vec<f32> => Floats,
    Vec<f64> => Doubles,
    Vec<String> => Strings,
}
