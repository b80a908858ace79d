//! Host value to SQL literal encoding.
//!
//! [`ToLiteral`] turns a Rust value into the text of a PostgreSQL literal.
//! It is implemented for the integer and float primitives, `bool`, strings,
//! `Option` (`None` is `NULL`), slices and vectors (array literals), chrono
//! date/time types and `uuid::Uuid`. Implement it for your own types to
//! supply a custom representation.
//!
//! # String literals are not escaped
//!
//! String values are wrapped in single quotes verbatim. A value containing
//! `'` produces malformed (or injectable) SQL. Pass untrusted text through
//! an argument placeholder instead of a literal.

use crate::error::{QbError, QbResult};
use serde_json::Value;

/// A value with a SQL literal representation.
pub trait ToLiteral {
    /// The literal text, e.g. `42`, `'abc'`, `NULL`, `'{1, 2}'`.
    fn to_literal(&self) -> String;

    /// The text used when this value is an element of an array literal.
    ///
    /// Array literals are themselves quoted, so strings use double quotes
    /// and nested arrays drop their outer single quotes.
    fn to_array_element(&self) -> String {
        self.to_literal()
    }
}

macro_rules! impl_integer_literal {
    ($($t:ty),* $(,)?) => {
        $(
            impl ToLiteral for $t {
                fn to_literal(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_integer_literal!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_literal {
    ($($t:ty),* $(,)?) => {
        $(
            impl ToLiteral for $t {
                fn to_literal(&self) -> String {
                    if self.is_nan() {
                        "'NaN'".to_string()
                    } else if self.is_infinite() {
                        if self.is_sign_negative() {
                            "'-Infinity'".to_string()
                        } else {
                            "'Infinity'".to_string()
                        }
                    } else {
                        // Display is the shortest text that round-trips and never uses an exponent.
                        self.to_string()
                    }
                }
            }
        )*
    };
}

impl_float_literal!(f32, f64);

impl ToLiteral for bool {
    fn to_literal(&self) -> String {
        if *self { "true" } else { "false" }.to_string()
    }
}

impl ToLiteral for str {
    fn to_literal(&self) -> String {
        format!("'{self}'")
    }

    fn to_array_element(&self) -> String {
        let mut out = String::with_capacity(self.len() + 2);
        out.push('"');
        for ch in self.chars() {
            if ch == '"' || ch == '\\' {
                out.push('\\');
            }
            out.push(ch);
        }
        out.push('"');
        out
    }
}

impl ToLiteral for String {
    fn to_literal(&self) -> String {
        self.as_str().to_literal()
    }

    fn to_array_element(&self) -> String {
        self.as_str().to_array_element()
    }
}

impl<T: ToLiteral + ?Sized> ToLiteral for &T {
    fn to_literal(&self) -> String {
        (**self).to_literal()
    }

    fn to_array_element(&self) -> String {
        (**self).to_array_element()
    }
}

impl<T: ToLiteral> ToLiteral for Option<T> {
    fn to_literal(&self) -> String {
        match self {
            Some(v) => v.to_literal(),
            None => "NULL".to_string(),
        }
    }

    fn to_array_element(&self) -> String {
        match self {
            Some(v) => v.to_array_element(),
            None => "NULL".to_string(),
        }
    }
}

fn array_body<T: ToLiteral>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(ToLiteral::to_array_element).collect();
    format!("{{{}}}", items.join(", "))
}

impl<T: ToLiteral> ToLiteral for [T] {
    fn to_literal(&self) -> String {
        format!("'{}'", array_body(self))
    }

    fn to_array_element(&self) -> String {
        array_body(self)
    }
}

impl<T: ToLiteral> ToLiteral for Vec<T> {
    fn to_literal(&self) -> String {
        self.as_slice().to_literal()
    }

    fn to_array_element(&self) -> String {
        self.as_slice().to_array_element()
    }
}

impl<T: ToLiteral, const N: usize> ToLiteral for [T; N] {
    fn to_literal(&self) -> String {
        self.as_slice().to_literal()
    }

    fn to_array_element(&self) -> String {
        self.as_slice().to_array_element()
    }
}

impl ToLiteral for chrono::NaiveDate {
    fn to_literal(&self) -> String {
        format!("'{}'", self.format("%Y-%m-%d"))
    }
}

impl ToLiteral for chrono::NaiveTime {
    fn to_literal(&self) -> String {
        format!("'{}'", self.format("%H:%M:%S%.f"))
    }
}

impl ToLiteral for chrono::NaiveDateTime {
    fn to_literal(&self) -> String {
        format!("'{}'", self.format("%Y-%m-%d %H:%M:%S%.f"))
    }
}

impl<Tz: chrono::TimeZone> ToLiteral for chrono::DateTime<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn to_literal(&self) -> String {
        format!("'{}'", self.to_rfc3339())
    }
}

impl ToLiteral for uuid::Uuid {
    fn to_literal(&self) -> String {
        format!("'{}'", self.hyphenated())
    }
}

#[cfg(feature = "rust_decimal")]
impl ToLiteral for rust_decimal::Decimal {
    fn to_literal(&self) -> String {
        self.to_string()
    }
}

/// Tuple literal text: `(a, b, c)`.
pub(crate) fn tuple_literal<T: ToLiteral>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(ToLiteral::to_literal).collect();
    format!("({})", items.join(", "))
}

/// Encode a dynamically typed JSON value as a literal.
///
/// Scalars and flat arrays of scalars are supported. Objects and nested
/// arrays have no literal form and are rejected.
pub fn json_literal(value: &Value) -> QbResult<String> {
    match value {
        Value::Array(items) => {
            let mut elements = Vec::with_capacity(items.len());
            for item in items {
                if matches!(item, Value::Array(_) | Value::Object(_)) {
                    return Err(QbError::unsupported_literal(format!(
                        "nested JSON value in array: {item}"
                    )));
                }
                elements.push(json_scalar(item, true));
            }
            Ok(format!("'{{{}}}'", elements.join(", ")))
        }
        Value::Object(_) => Err(QbError::unsupported_literal(format!(
            "JSON object: {value}"
        ))),
        scalar => Ok(json_scalar(scalar, false)),
    }
}

fn json_scalar(value: &Value, in_array: bool) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_literal(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if in_array => s.to_array_element(),
        Value::String(s) => s.to_literal(),
        // Callers reject containers before reaching here.
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers() {
        assert_eq!(2i32.to_literal(), "2");
        assert_eq!((-17i64).to_literal(), "-17");
        assert_eq!(u64::MAX.to_literal(), "18446744073709551615");
    }

    #[test]
    fn floats_are_minimal() {
        assert_eq!(3.33f64.to_literal(), "3.33");
        assert_eq!(1.5f32.to_literal(), "1.5");
        assert_eq!(1e21f64.to_literal(), "1000000000000000000000");
        assert_eq!(f64::NAN.to_literal(), "'NaN'");
        assert_eq!(f64::NEG_INFINITY.to_literal(), "'-Infinity'");
    }

    #[test]
    fn bool_and_null() {
        assert_eq!(false.to_literal(), "false");
        assert_eq!(None::<i32>.to_literal(), "NULL");
        assert_eq!(Some(5).to_literal(), "5");
    }

    #[test]
    fn strings_are_not_escaped() {
        assert_eq!("22".to_literal(), "'22'");
        assert_eq!("it's".to_literal(), "'it's'");
    }

    #[test]
    fn arrays() {
        assert_eq!(vec![3, 50, 70, 80].to_literal(), "'{3, 50, 70, 80}'");
        assert_eq!(["a", "b\"c"].to_literal(), r#"'{"a", "b\"c"}'"#);
        assert_eq!(vec![vec![1, 2], vec![3, 4]].to_literal(), "'{{1, 2}, {3, 4}}'");
        assert_eq!(Vec::<i32>::new().to_literal(), "'{}'");
    }

    #[test]
    fn tuples() {
        assert_eq!(tuple_literal(&["pg_catalog", "information_schema"]), "('pg_catalog', 'information_schema')");
    }

    #[test]
    fn dates_and_uuids() {
        let d = chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(d.to_literal(), "'2024-02-29'");
        let ts = d.and_hms_opt(13, 5, 0).unwrap();
        assert_eq!(ts.to_literal(), "'2024-02-29 13:05:00'");
        let id = uuid::Uuid::nil();
        assert_eq!(id.to_literal(), "'00000000-0000-0000-0000-000000000000'");
    }

    #[test]
    fn json_values() {
        assert_eq!(json_literal(&json!(null)).unwrap(), "NULL");
        assert_eq!(json_literal(&json!(1.25)).unwrap(), "1.25");
        assert_eq!(json_literal(&json!("x")).unwrap(), "'x'");
        assert_eq!(json_literal(&json!([1, "a"])).unwrap(), r#"'{1, "a"}'"#);
    }

    #[test]
    fn json_objects_are_rejected() {
        let err = json_literal(&json!({"a": 1})).unwrap_err();
        assert!(matches!(err, QbError::UnsupportedLiteral(_)));
        assert!(json_literal(&json!([[1]])).is_err());
    }
}
