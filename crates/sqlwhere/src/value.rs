//! Argument values carried by conditions.
//!
//! Rendering never looks inside a [`Value`] except to inline it as a SQL
//! literal (see [`Value::to_sql_literal`]) and to expand collections in
//! [`crate::in_slice`]. Everything else passes through untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// A single positional argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Uuid(Uuid),
    /// An ordered collection; expanded by `in_slice`, opaque everywhere else.
    Array(Vec<Value>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float32(_) => "float32",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
            Value::TimestampTz(_) => "timestamptz",
            Value::Uuid(_) => "uuid",
            Value::Array(_) => "array",
        }
    }

    /// Numbers and booleans are inlined bare; everything else is quoted.
    ///
    /// `NaN` and the infinities are not bare: SQL has no unquoted spelling for them.
    pub fn is_bare_literal(&self) -> bool {
        match self {
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::UInt(_) => true,
            Value::Float32(x) => x.is_finite(),
            Value::Float(x) => x.is_finite(),
            _ => false,
        }
    }

    /// Render this value as an inline SQL literal.
    ///
    /// Text-like values are wrapped in single quotes with embedded quotes doubled.
    /// Non-finite floats become the quoted strings `'NaN'`, `'Infinity'` and
    /// `'-Infinity'`, which Postgres accepts for float columns.
    ///
    /// **Warning**: prefer placeholders for anything headed to a database; this
    /// exists for debugging output and for dialects without parameter support.
    pub fn to_sql_literal(&self) -> String {
        if self.is_bare_literal() {
            return self.to_string();
        }
        let non_finite = match *self {
            Value::Float32(x) => Some(f64::from(x)),
            Value::Float(x) => Some(x),
            _ => None,
        };
        if let Some(x) = non_finite {
            return match x {
                x if x.is_nan() => "'NaN'",
                x if x > 0.0 => "'Infinity'",
                _ => "'-Infinity'",
            }
            .to_string();
        }
        let text = self.to_string();
        let mut out = String::with_capacity(text.len() + 2);
        out.push('\'');
        for ch in text.chars() {
            if ch == '\'' {
                out.push('\'');
            }
            out.push(ch);
        }
        out.push('\'');
        out
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float32(x) => write!(f, "{x}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{d}"),
            Value::Timestamp(t) => write!(f, "{t}"),
            Value::TimestampTz(t) => f.write_str(&t.to_rfc3339()),
            Value::Uuid(u) => write!(f, "{u}"),
            Value::Array(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

macro_rules! value_from {
    ($variant:ident: $($t:ty),+ => $target:ty) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

value_from!(Int: i8, i16, i32, i64, u8, u16, u32 => i64);
value_from!(UInt: u64 => u64);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::TimestampTz(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::Array(v.iter().cloned().map(Into::into).collect())
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use sqlwhere::{Value, values};
///
/// let args = values![1, "two", None::<i32>];
/// assert_eq!(args, vec![Value::Int(1), Value::Text("two".into()), Value::Null]);
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::Value;
    use bytes::BytesMut;
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use std::error::Error;
    use tokio_postgres::types::{IsNull, Kind, ToSql, Type};
    use uuid::Uuid;

    type EncodeResult = Result<IsNull, Box<dyn Error + Sync + Send>>;

    // Integers narrow or widen to the parameter type; anything else must match exactly.
    fn encode_int(n: i64, ty: &Type, out: &mut BytesMut) -> EncodeResult {
        match *ty {
            Type::INT2 => i16::try_from(n)?.to_sql(ty, out),
            Type::INT4 => i32::try_from(n)?.to_sql(ty, out),
            Type::FLOAT4 => (n as f32).to_sql(ty, out),
            Type::FLOAT8 => (n as f64).to_sql(ty, out),
            _ => n.to_sql_checked(ty, out),
        }
    }

    fn encode_float(x: f64, ty: &Type, out: &mut BytesMut) -> EncodeResult {
        match *ty {
            Type::FLOAT4 => (x as f32).to_sql(ty, out),
            _ => x.to_sql_checked(ty, out),
        }
    }

    impl ToSql for Value {
        // Every arm checks the parameter type: array members reach here unchecked.
        fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> EncodeResult {
            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(b) => b.to_sql_checked(ty, out),
                Value::Int(n) => encode_int(*n, ty, out),
                Value::UInt(n) => encode_int(i64::try_from(*n)?, ty, out),
                Value::Float32(x) => encode_float(f64::from(*x), ty, out),
                Value::Float(x) => encode_float(*x, ty, out),
                Value::Text(s) => s.to_sql_checked(ty, out),
                Value::Date(d) => d.to_sql_checked(ty, out),
                Value::Timestamp(t) => t.to_sql_checked(ty, out),
                Value::TimestampTz(t) => t.to_sql_checked(ty, out),
                Value::Uuid(u) => u.to_sql_checked(ty, out),
                Value::Array(items) => items.to_sql_checked(ty, out),
            }
        }

        fn accepts(ty: &Type) -> bool {
            if let Kind::Array(member) = ty.kind() {
                return Self::accepts(member);
            }
            <bool as ToSql>::accepts(ty)
                || <i16 as ToSql>::accepts(ty)
                || <i32 as ToSql>::accepts(ty)
                || <i64 as ToSql>::accepts(ty)
                || <f32 as ToSql>::accepts(ty)
                || <f64 as ToSql>::accepts(ty)
                || <String as ToSql>::accepts(ty)
                || <NaiveDate as ToSql>::accepts(ty)
                || <NaiveDateTime as ToSql>::accepts(ty)
                || <DateTime<Utc> as ToSql>::accepts(ty)
                || <Uuid as ToSql>::accepts(ty)
        }

        tokio_postgres::types::to_sql_checked!();
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn null_encodes_as_sql_null() {
            let mut buf = BytesMut::new();
            let res = Value::Null.to_sql(&Type::INT4, &mut buf).unwrap();
            assert!(matches!(res, IsNull::Yes));
            assert!(buf.is_empty());
        }

        #[test]
        fn int_narrows_to_column_width() {
            let mut buf = BytesMut::new();
            Value::Int(7).to_sql(&Type::INT4, &mut buf).unwrap();
            assert_eq!(&buf[..], &7_i32.to_be_bytes());
        }

        #[test]
        fn int_overflow_is_an_error() {
            let mut buf = BytesMut::new();
            assert!(Value::Int(i64::MAX).to_sql(&Type::INT2, &mut buf).is_err());
        }

        #[test]
        fn accepts_text_and_arrays() {
            assert!(<Value as ToSql>::accepts(&Type::TEXT));
            assert!(<Value as ToSql>::accepts(&Type::INT8_ARRAY));
        }

        #[test]
        fn int_widens_to_float_columns() {
            let mut buf = BytesMut::new();
            Value::Int(10).to_sql_checked(&Type::FLOAT8, &mut buf).unwrap();
            assert_eq!(&buf[..], &10_f64.to_be_bytes());

            let mut buf = BytesMut::new();
            Value::UInt(3).to_sql_checked(&Type::FLOAT4, &mut buf).unwrap();
            assert_eq!(&buf[..], &3_f32.to_be_bytes());
        }

        #[test]
        fn float32_widens_to_float8() {
            let mut buf = BytesMut::new();
            Value::Float32(1.5).to_sql_checked(&Type::FLOAT8, &mut buf).unwrap();
            assert_eq!(&buf[..], &1.5_f64.to_be_bytes());
        }

        #[test]
        fn mismatched_types_are_rejected() {
            let mut buf = BytesMut::new();
            assert!(Value::Int(10).to_sql_checked(&Type::TEXT, &mut buf).is_err());
            assert!(Value::Text("10".into()).to_sql_checked(&Type::INT4, &mut buf).is_err());
            assert!(Value::Float32(1.5).to_sql_checked(&Type::INT4, &mut buf).is_err());
            assert!(Value::Bool(true).to_sql_checked(&Type::INT2, &mut buf).is_err());
            assert!(buf.is_empty());
        }

        #[test]
        fn array_members_narrow_per_element() {
            let mut buf = BytesMut::new();
            let v = Value::from(vec![1, 2]);
            v.to_sql_checked(&Type::INT4_ARRAY, &mut buf).unwrap();
            // 20 byte header, then a length and an INT4 per member
            assert_eq!(buf.len(), 20 + 2 * 8);
            assert_eq!(&buf[buf.len() - 4..], &2_i32.to_be_bytes());
        }

        #[test]
        fn array_members_are_type_checked() {
            let mut buf = BytesMut::new();
            let v = Value::from(vec!["a", "b"]);
            assert!(v.to_sql_checked(&Type::INT4_ARRAY, &mut buf).is_err());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_bare() {
        assert_eq!(Value::from(10).to_sql_literal(), "10");
        assert_eq!(Value::from(10_u64).to_sql_literal(), "10");
        assert_eq!(Value::from(1.5_f64).to_sql_literal(), "1.5");
        assert_eq!(Value::from(0.1_f32).to_sql_literal(), "0.1");
        assert_eq!(Value::from(true).to_sql_literal(), "true");
    }

    #[test]
    fn non_finite_floats_are_quoted() {
        assert_eq!(Value::from(f64::NAN).to_sql_literal(), "'NaN'");
        assert_eq!(Value::from(f64::INFINITY).to_sql_literal(), "'Infinity'");
        assert_eq!(Value::from(f32::NEG_INFINITY).to_sql_literal(), "'-Infinity'");
        assert!(!Value::from(f32::NAN).is_bare_literal());
        assert_eq!(
            crate::inline_placeholders("x>?", crate::values![f64::NEG_INFINITY]).0,
            "x>'-Infinity'"
        );
    }

    #[test]
    fn text_is_quoted_and_escaped() {
        assert_eq!(Value::from("Fred").to_sql_literal(), "'Fred'");
        assert_eq!(Value::from("O'Brien").to_sql_literal(), "'O''Brien'");
    }

    #[test]
    fn null_is_bare() {
        assert_eq!(Value::Null.to_sql_literal(), "NULL");
        assert_eq!(Value::from(None::<i32>).to_sql_literal(), "NULL");
    }

    #[test]
    fn option_some_unwraps() {
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn collections_become_arrays() {
        let v = Value::from(vec![1, 2, 3]);
        assert_eq!(v, Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
        assert_eq!(v.to_sql_literal(), "'{1,2,3}'");

        let s: &[&str] = &["a", "b"];
        assert_eq!(Value::from(s).to_string(), "{a,b}");
        assert_eq!(Value::from([Some(1), None]).to_string(), "{1,NULL}");
    }

    #[test]
    fn dates_and_uuids_are_quoted() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Value::from(d).to_sql_literal(), "'2024-02-29'");

        let u = Uuid::nil();
        assert_eq!(
            Value::from(u).to_sql_literal(),
            "'00000000-0000-0000-0000-000000000000'"
        );
    }

    #[test]
    fn values_macro_mixes_types() {
        let args = crate::values![1, "a", 2.5, None::<&str>];
        assert_eq!(
            args,
            vec![
                Value::Int(1),
                Value::Text("a".into()),
                Value::Float(2.5),
                Value::Null
            ]
        );
        assert!(crate::values![].is_empty());
    }
}
