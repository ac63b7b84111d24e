//! Lenient numeric interpretation of loosely typed parameters.
//!
//! Numeric strings are decimal integers or floats with optional sign,
//! fraction and exponent, surrounded by optional whitespace. Integer
//! conversion of other strings reads the leading integer prefix, or 0.

use super::Scalar;

/// Whether a scalar is a number or a numeric string.
pub fn is_numeric(value: &Scalar) -> bool {
    match value {
        Scalar::Int(_) | Scalar::Float(_) => true,
        Scalar::Bool(_) => false,
        Scalar::Text(s) => is_numeric_str(s),
    }
}

pub fn is_numeric_str(s: &str) -> bool {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// Integer value of a scalar. Floats truncate toward zero and saturate.
pub fn int_value(value: &Scalar) -> i64 {
    match value {
        Scalar::Int(v) => *v,
        Scalar::Float(v) => float_to_int(*v),
        Scalar::Bool(b) => i64::from(*b),
        Scalar::Text(s) => int_value_str(s),
    }
}

pub fn int_value_str(s: &str) -> i64 {
    if is_numeric_str(s) {
        return s.trim().parse::<i64>().unwrap_or_else(|_| {
            s.trim().parse::<f64>().map(float_to_int).unwrap_or(0)
        });
    }

    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return 0;
    }
    match digits.parse::<i64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

fn float_to_int(v: f64) -> i64 {
    if v.is_nan() {
        0
    } else {
        // `as` saturates at the i64 bounds.
        v.trunc() as i64
    }
}
