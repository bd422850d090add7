//! Typed values carried by fields and call arguments.
//!
//! The set of kinds is closed: every value the encoders know how to render
//! is one of the [`Value`] variants, and anything else is captured up front
//! as an [`Opaque`] so the encoder's fallback routine can still render it.

mod args;

pub use args::{FieldArg, IntoArgs};

use crate::fmt::{duration, printf};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// A complex number, rendered as `(re+imi)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let im = printf::shortest(self.im);
        let sign = if im.starts_with(['-', '+']) { "" } else { "+" };
        write!(f, "({}{sign}{im}i)", printf::shortest(self.re))
    }
}

/// A value outside the closed set of kinds, rendered once at capture time.
///
/// The text form feeds the text encoder's fallback; the JSON form, when the
/// value was serializable, feeds the JSON encoder's fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Opaque {
    text: String,
    json: Option<serde_json::Value>,
}

impl Opaque {
    /// Captures anything printable.
    pub fn display(value: &impl fmt::Display) -> Self {
        Self {
            text: value.to_string(),
            json: None,
        }
    }

    /// Captures anything with a `Debug` impl, the usual case for ad-hoc structs.
    pub fn debug(value: &impl fmt::Debug) -> Self {
        Self {
            text: format!("{value:?}"),
            json: None,
        }
    }

    /// Captures a serializable value so JSON output keeps its structure.
    pub fn serialize<T: Serialize + fmt::Debug>(value: &T) -> Self {
        Self {
            text: format!("{value:?}"),
            json: serde_json::to_value(value).ok(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn json(&self) -> Option<&serde_json::Value> {
        self.json.as_ref()
    }
}

/// A homogeneous sequence of one primitive kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Sequence {
    Int(Vec<i64>),
    Uint(Vec<u64>),
    Float(Vec<f64>),
    Complex(Vec<Complex>),
    Bool(Vec<bool>),
    Str(Vec<String>),
    Time(Vec<DateTime<Local>>),
    Duration(Vec<Duration>),
}

impl Sequence {
    /// Number of elements regardless of kind.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Uint(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Complex(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Str(v) => v.len(),
            Self::Time(v) => v.len(),
            Self::Duration(v) => v.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(Complex),
    Bool(bool),
    Str(String),
    Time(DateTime<Local>),
    Duration(Duration),
    Seq(Sequence),
    Other(Opaque),
}

impl Value {
    /// Short kind name used in printf mismatch markers such as `%!d(string=abc)`.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float64",
            Self::Complex(_) => "complex128",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Time(_) => "time",
            Self::Duration(_) => "duration",
            Self::Seq(_) => "slice",
            Self::Other(_) => "other",
        }
    }

    /// Shorthand for `Value::Other(Opaque::debug(..))`.
    pub fn debug(value: &impl fmt::Debug) -> Self {
        Self::Other(Opaque::debug(value))
    }
}

fn join<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    each: impl Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        each(f, item)?;
    }
    f.write_str("]")
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => join(f, v, |f, x| write!(f, "{x}")),
            Self::Uint(v) => join(f, v, |f, x| write!(f, "{x}")),
            Self::Float(v) => join(f, v, |f, x| f.write_str(&printf::shortest(*x))),
            Self::Complex(v) => join(f, v, |f, x| write!(f, "{x}")),
            Self::Bool(v) => join(f, v, |f, x| write!(f, "{x}")),
            Self::Str(v) => join(f, v, |f, x| f.write_str(x)),
            Self::Time(v) => join(f, v, |f, x| write_time(f, x)),
            Self::Duration(v) => join(f, v, |f, x| f.write_str(&duration::format(*x))),
        }
    }
}

fn write_time(f: &mut fmt::Formatter<'_>, t: &DateTime<Local>) -> fmt::Result {
    write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S%.f %z"))
}

/// The `%v` form: what a message shows when the value is one of its arguments.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&printf::shortest(*v)),
            Self::Complex(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Time(v) => write_time(f, v),
            Self::Duration(v) => f.write_str(&duration::format(*v)),
            Self::Seq(v) => write!(f, "{v}"),
            Self::Other(v) => f.write_str(v.text()),
        }
    }
}

macro_rules! lossless_conversions {
    ($variant:ident, $wide:ty; $($t:ty),* $(,)?) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::$variant(<$wide>::from(v))
            }
        }

        impl From<Vec<$t>> for Value {
            fn from(v: Vec<$t>) -> Self {
                Self::Seq(Sequence::$variant(v.into_iter().map(<$wide>::from).collect()))
            }
        }
    )*};
}

lossless_conversions!(Int, i64; i8, i16, i32, i64);
lossless_conversions!(Uint, u64; u8, u16, u32, u64);
lossless_conversions!(Float, f64; f32, f64);
lossless_conversions!(Bool, bool; bool);
lossless_conversions!(Complex, Complex; Complex);
lossless_conversions!(Duration, Duration; Duration);
lossless_conversions!(Time, DateTime<Local>; DateTime<Local>);

// Pointer-sized integers are at most 64 bits on every supported target.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Uint(v as u64)
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
impl From<Vec<isize>> for Value {
    fn from(v: Vec<isize>) -> Self {
        Self::Seq(Sequence::Int(v.into_iter().map(|x| x as i64).collect()))
    }
}

#[allow(clippy::cast_possible_truncation)]
impl From<Vec<usize>> for Value {
    fn from(v: Vec<usize>) -> Self {
        Self::Seq(Sequence::Uint(v.into_iter().map(|x| x as u64).collect()))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::Seq(Sequence::Str(v))
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Self::Seq(Sequence::Str(v.into_iter().map(ToString::to_string).collect()))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v.with_timezone(&Local))
    }
}

impl From<Sequence> for Value {
    fn from(v: Sequence) -> Self {
        Self::Seq(v)
    }
}

impl From<Opaque> for Value {
    fn from(v: Opaque) -> Self {
        Self::Other(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Other(Opaque {
            text: v.to_string(),
            json: Some(v),
        })
    }
}

/// One key/value pair attached to a record. Keys need not be unique;
/// insertion order is serialization order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
