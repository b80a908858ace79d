//! SQL identifier quoting.
//!
//! Every schema, table, column and alias name is emitted as a PostgreSQL
//! quoted identifier. Names are taken verbatim (case is preserved) and an
//! embedded `"` is escaped as `""`.

/// Append `name` to `out` as a quoted identifier.
pub(crate) fn write_quoted(out: &mut String, name: &str) {
    out.reserve(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

/// Quote a single identifier.
///
/// # Example
/// ```
/// assert_eq!(pgqb::quote_ident("CamelCase"), r#""CamelCase""#);
/// ```
pub fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_quoted(&mut out, name);
    out
}
