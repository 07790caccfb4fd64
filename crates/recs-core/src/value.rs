//! # Field Values
//!
//! Defines `Value`, the dynamically typed scalar stored in every record
//! field, and `ValueKind`, its type tag.
//!
//! Collection-typed values are deliberately absent: a record field holds
//! exactly one scalar. Conversions from JSON reject arrays, objects and
//! null for the same reason.

use serde::{Deserialize, Serialize};

use crate::error::RecsError;

/// A scalar stored in a record field.
///
/// Equality is structural: `Int(1)` and `Float(1.0)` are different values,
/// even though numeric preconditions treat both as the number one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A text value. Rendered with single quotes.
    Text(String),
}

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// [`Value::Bool`].
    Bool,
    /// [`Value::Int`].
    Int,
    /// [`Value::Float`].
    Float,
    /// [`Value::Text`].
    Text,
}

impl ValueKind {
    /// Returns the snake_case identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// The type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// The integer, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a number. `Int` widens to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The text, if this is a `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as it appears in rendered output: text wrapped in single
    /// quotes, everything else as its `Display` form.
    pub fn to_literal(&self) -> String {
        match self {
            Self::Text(s) => format!("'{s}'"),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    /// Text is written bare; quoting is the renderer's job.
    ///
    /// Floats always carry a decimal point (`24000.0`, not `24000`), so an
    /// integral float stays distinguishable from an `Int` in rendered output.
    /// Magnitudes below `1e-4` or from `1e16` up use a signed, at least
    /// two-digit exponent (`1e+16`, `1.5e-05`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write_float(f, *x),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn write_float(f: &mut std::fmt::Formatter<'_>, x: f64) -> std::fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x < 0.0 { "-inf" } else { "inf" });
    }
    if x == 0.0 || (1e-4..1e16).contains(&x.abs()) {
        let plain = x.to_string();
        return if plain.contains('.') {
            f.write_str(&plain)
        } else {
            write!(f, "{plain}.0")
        };
    }
    // `{:e}` yields the shortest round-trip mantissa, e.g. "1.5e-5".
    let sci = format!("{x:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    write!(f, "{mantissa}e{sign}{digits:0>2}")
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = RecsError;

    /// Convert a JSON scalar. Integers that fit in `i64` become `Int`,
    /// every other number becomes `Float`.
    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => n.as_f64().map(Self::Float).ok_or_else(|| {
                    RecsError::UnsupportedValue(format!("number {n} is not representable"))
                }),
            },
            serde_json::Value::String(s) => Ok(Self::Text(s)),
            serde_json::Value::Null => Err(RecsError::UnsupportedValue(
                "null is not a field value".to_string(),
            )),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(
                RecsError::UnsupportedValue("collection values are not supported".to_string()),
            ),
        }
    }
}
