//! Loosely typed parameter values.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A single parameter value as received from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// String form, with booleans rendered as `"1"` / `""`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Int(v) => Cow::Owned(v.to_string()),
            Self::Float(v) => Cow::Owned(v.to_string()),
            Self::Bool(true) => Cow::Borrowed("1"),
            Self::Bool(false) => Cow::Borrowed(""),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// A parameter: a scalar, a sequence of scalars, or an explicit null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Null,
}

impl ParamValue {
    /// The value when it is a single scalar.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// All scalars, treating a lone scalar as a one-element list.
    pub fn scalars(&self) -> &[Scalar] {
        match self {
            Self::Scalar(s) => std::slice::from_ref(s),
            Self::List(items) => items,
            Self::Null => &[],
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

macro_rules! param_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(v: $ty) -> Self {
                    Self::Scalar(v.into())
                }
            }

            impl From<Vec<$ty>> for ParamValue {
                fn from(v: Vec<$ty>) -> Self {
                    Self::List(v.into_iter().map(Into::into).collect())
                }
            }
        )*
    };
}

param_value_from!(&str, String, i64, i32, f64, bool);

impl From<Scalar> for ParamValue {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<Scalar>> for ParamValue {
    fn from(v: Vec<Scalar>) -> Self {
        Self::List(v)
    }
}
