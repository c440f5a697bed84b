//! Scalar, array, and buffer conversion helpers for the marshaler.
//!
//! Every floating-point field in the marshaled tree goes through the
//! shortest round-trip decimal rule implemented here. Widening an `f32`
//! to `f64` with a plain cast drags representation error into the output
//! (0.0125f32 becomes 0.012500000186264515); formatting the `f32` to its
//! minimal decimal string and re-parsing that string as `f64` does not.

use serde_json::{Number, Value};

/// Convert a 32-bit float to a JSON number carrying the shortest decimal
/// representation that round-trips back to the same `f32`.
///
/// Non-finite inputs map to `Null` (JSON has no NaN or infinity).
pub fn f32_number(v: f32) -> Value {
    if !v.is_finite() {
        return Value::Null;
    }
    // Rust's Display for floats is the shortest round-trip form.
    v.to_string()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

/// Convert a 64-bit float to a JSON number. Fields that are `f64` at the
/// source need no re-formatting; non-finite inputs map to `Null`.
pub fn f64_number(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

/// Wrap a fixed-size `f32` sequence, each element through [`f32_number`].
pub fn f32_seq(vals: &[f32]) -> Value {
    Value::Array(vals.iter().map(|&v| f32_number(v)).collect())
}

/// Wrap a fixed-size `f64` sequence.
pub fn f64_seq(vals: &[f64]) -> Value {
    Value::Array(vals.iter().map(|&v| f64_number(v)).collect())
}

/// Wrap a 2-D `f32` matrix: each row through [`f32_seq`].
pub fn f32_grid<const N: usize>(rows: &[[f32; N]]) -> Value {
    Value::Array(rows.iter().map(|row| f32_seq(row)).collect())
}

/// Wrap a 2-D `f64` matrix.
pub fn f64_grid<const N: usize>(rows: &[[f64; N]]) -> Value {
    Value::Array(rows.iter().map(|row| f64_seq(row)).collect())
}

/// Wrap a fixed-size integer sequence, order preserved.
pub fn int_seq<T: Copy + Into<i64>>(vals: &[T]) -> Value {
    Value::Array(vals.iter().map(|&v| Value::from(v.into())).collect())
}

/// Wrap a 2-D integer matrix: each row through [`int_seq`].
pub fn int_grid<T: Copy + Into<i64>, const N: usize>(rows: &[[T; N]]) -> Value {
    Value::Array(rows.iter().map(|row| int_seq(row)).collect())
}

/// Wrap a variable-length byte buffer.
///
/// An empty buffer (the safe rendering of a null source or a zero length)
/// produces `Null`, never a fault; otherwise the result is an ordered
/// sequence of exactly `bytes.len()` elements.
pub fn byte_seq(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        Value::Null
    } else {
        int_seq(bytes)
    }
}
