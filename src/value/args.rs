//! Conversions for the two loosely-typed call shapes: positional message
//! arguments and alternating key/value field lists.

use super::{Complex, Field, Opaque, Sequence, Value};
use chrono::{DateTime, Local, Utc};
use std::time::Duration;

/// One element of a `with_fields` list: either a bare value (keys are
/// string values in key position) or a pre-built [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldArg {
    Value(Value),
    Field(Field),
}

impl From<Field> for FieldArg {
    fn from(f: Field) -> Self {
        Self::Field(f)
    }
}

macro_rules! field_arg_from {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for FieldArg {
            fn from(v: $t) -> Self {
                Self::Value(v.into())
            }
        }
    )*};
}

field_arg_from!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, &str, String,
    Complex, Duration, DateTime<Local>, DateTime<Utc>, Opaque, Sequence, Value,
    serde_json::Value,
    Vec<i8>, Vec<i16>, Vec<i32>, Vec<i64>, Vec<isize>,
    Vec<u8>, Vec<u16>, Vec<u32>, Vec<u64>, Vec<usize>,
    Vec<f32>, Vec<f64>, Vec<bool>, Vec<&str>, Vec<String>,
    Vec<Complex>, Vec<Duration>, Vec<DateTime<Local>>,
);

/// Positional message arguments.
///
/// Implemented for single values, tuples of up to six values, arrays and
/// vectors, so `logger.info("started")`, `logger.info(("user", 42))` and
/// `logger.infof("%s=%d", ("retries", 3))` all read naturally.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Value>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Value> {
        Vec::new()
    }
}

macro_rules! single_arg {
    ($($t:ty),* $(,)?) => {$(
        impl IntoArgs for $t {
            fn into_args(self) -> Vec<Value> {
                vec![self.into()]
            }
        }
    )*};
}

single_arg!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, &str, String,
    Complex, Duration, DateTime<Local>, DateTime<Utc>, Opaque, Value,
);

impl<T: Into<Value>, const N: usize> IntoArgs for [T; N] {
    fn into_args(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Value>> IntoArgs for Vec<T> {
    fn into_args(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

macro_rules! tuple_args {
    ($($name:ident),+) => {
        impl<$($name: Into<Value>),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

tuple_args!(A);
tuple_args!(A, B);
tuple_args!(A, B, C);
tuple_args!(A, B, C, D);
tuple_args!(A, B, C, D, E);
tuple_args!(A, B, C, D, E, F);

/// Builds a `Vec<FieldArg>` from mixed keys, values and fields.
///
/// ```
/// use cascadelog::{fields, Field};
///
/// let args = fields!["user", "bob", "attempts", 3, Field::new("ok", true)];
/// assert_eq!(args.len(), 5);
/// ```
#[macro_export]
macro_rules! fields {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::value::FieldArg::from($arg)),*]
    };
}
