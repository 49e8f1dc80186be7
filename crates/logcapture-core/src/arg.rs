//! Positional arguments of a log call
//!
//! Arguments are snapshotted into owned `Arg` values when an event is built, so
//! later mutation of whatever the caller passed in is never observed. A missing
//! value (`None`) becomes `Arg::Absent` rather than shortening the sequence.

use std::fmt;
use std::hash::{Hash, Hasher};

/// One owned, comparable argument value
#[derive(Debug, Clone)]
pub enum Arg {
    /// Explicit "no value" placeholder
    Absent,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
}

impl Arg {
    pub fn is_absent(&self) -> bool {
        matches!(self, Arg::Absent)
    }

    /// Capture any `Display` value as its rendered text
    pub fn display(value: impl fmt::Display) -> Self {
        Arg::Str(value.to_string())
    }

    /// Capture any `Debug` value as its rendered text
    pub fn debug(value: impl fmt::Debug) -> Self {
        Arg::Str(format!("{:?}", value))
    }
}

// Floats compare by bit pattern so that Arg can be Eq + Hash.
impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Absent, Arg::Absent) => true,
            (Arg::Bool(a), Arg::Bool(b)) => a == b,
            (Arg::Int(a), Arg::Int(b)) => a == b,
            (Arg::UInt(a), Arg::UInt(b)) => a == b,
            (Arg::Float(a), Arg::Float(b)) => a.to_bits() == b.to_bits(),
            (Arg::Char(a), Arg::Char(b)) => a == b,
            (Arg::Str(a), Arg::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Arg {}

impl Hash for Arg {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Arg::Absent => {}
            Arg::Bool(v) => v.hash(state),
            Arg::Int(v) => v.hash(state),
            Arg::UInt(v) => v.hash(state),
            Arg::Float(v) => v.to_bits().hash(state),
            Arg::Char(v) => v.hash(state),
            Arg::Str(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Absent => f.write_str("null"),
            Arg::Bool(v) => v.fmt(f),
            Arg::Int(v) => v.fmt(f),
            Arg::UInt(v) => v.fmt(f),
            Arg::Float(v) => v.fmt(f),
            Arg::Char(v) => v.fmt(f),
            Arg::Str(v) => f.write_str(v),
        }
    }
}

macro_rules! arg_from {
    ($variant:ident, $target:ty => $($t:ty),+) => {
        $(
            impl From<$t> for Arg {
                fn from(value: $t) -> Self {
                    Arg::$variant(value as $target)
                }
            }
        )+
    };
}

arg_from!(Int, i64 => i8, i16, i32, i64, isize);
arg_from!(UInt, u64 => u8, u16, u32, u64, usize);
arg_from!(Float, f64 => f32, f64);

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<&Arg> for Arg {
    fn from(value: &Arg) -> Self {
        value.clone()
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Absent, Into::into)
    }
}

/// Anything that can be turned into the ordered argument list of a log call
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Arg> {
        Vec::new()
    }
}

impl<T: Into<Arg>> IntoArgs for Vec<T> {
    fn into_args(self) -> Vec<Arg> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Arg>, const N: usize> IntoArgs for [T; N] {
    fn into_args(self) -> Vec<Arg> {
        self.into_iter().map(Into::into).collect()
    }
}

impl IntoArgs for &[Arg] {
    fn into_args(self) -> Vec<Arg> {
        self.to_vec()
    }
}

macro_rules! tuple_into_args {
    ($($name:ident),+) => {
        impl<$($name: Into<Arg>),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Arg> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

tuple_into_args!(A);
tuple_into_args!(A, B);
tuple_into_args!(A, B, C);
tuple_into_args!(A, B, C, D);
tuple_into_args!(A, B, C, D, E);
tuple_into_args!(A, B, C, D, E, F);

/// Build a `Vec<Arg>` from heterogeneous values
///
/// # Example
///
/// ```
/// use logcapture_core::{args, Arg};
///
/// let args = args![1, "two", None::<i32>];
/// assert_eq!(args, vec![Arg::Int(1), Arg::Str("two".into()), Arg::Absent]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_none_becomes_absent() {
        let arg: Arg = None::<String>.into();
        assert!(arg.is_absent());
        let arg: Arg = Some(3u8).into();
        assert_eq!(arg, Arg::UInt(3));
    }

    #[test]
    fn test_tuple_args_preserve_order() {
        let args = (1, "a", true, None::<i32>).into_args();
        assert_eq!(
            args,
            vec![
                Arg::Int(1),
                Arg::Str("a".to_string()),
                Arg::Bool(true),
                Arg::Absent
            ]
        );
    }

    #[test]
    fn test_unit_is_empty() {
        assert!(().into_args().is_empty());
    }

    #[test]
    fn test_float_equality_and_hash_use_bits() {
        let mut set = HashSet::new();
        set.insert(Arg::Float(f64::NAN));
        assert!(set.contains(&Arg::Float(f64::NAN)));
        assert_ne!(Arg::Float(0.0), Arg::Float(-0.0));
    }

    #[test]
    fn test_int_and_uint_are_distinct() {
        assert_ne!(Arg::Int(1), Arg::UInt(1));
    }

    #[test]
    fn test_display_renders_absent_as_null() {
        assert_eq!(Arg::Absent.to_string(), "null");
        assert_eq!(Arg::from("x").to_string(), "x");
        assert_eq!(Arg::debug("x").to_string(), "\"x\"");
    }

    #[test]
    fn test_args_macro() {
        assert!(args![].is_empty());
        assert_eq!(args![1u32, 'c'], vec![Arg::UInt(1), Arg::Char('c')]);
    }
}
