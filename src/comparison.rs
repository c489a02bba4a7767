use serde_json::Value;

/// Type-sensitive equality: strings never equal numbers and booleans are
/// not numbers, but `1` and `1.0` are the same number. Containers compare
/// element-wise with the same rules.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(na), Value::Number(nb)) => {
            if let (Some(ia), Some(ib)) = (na.as_i64(), nb.as_i64()) {
                ia == ib
            } else if let (Some(ua), Some(ub)) = (na.as_u64(), nb.as_u64()) {
                ua == ub
            } else {
                match (na.as_f64(), nb.as_f64()) {
                    (Some(da), Some(db)) => da == db,
                    _ => na == nb,
                }
            }
        }
        (Value::Array(xa), Value::Array(xb)) => {
            xa.len() == xb.len() && xa.iter().zip(xb).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(ma), Value::Object(mb)) => {
            ma.len() == mb.len()
                && ma
                    .iter()
                    .all(|(k, va)| mb.get(k).is_some_and(|vb| values_equal(va, vb)))
        }
        _ => a == b,
    }
}

/// Membership test of `needle` in `haystack`.
///
/// `None` means the test is undefined for these types: a non-string needle
/// in a string, or any needle in a number, boolean or null.
pub fn contains(haystack: &Value, needle: &Value) -> Option<bool> {
    match haystack {
        Value::String(s) => needle.as_str().map(|n| s.contains(n)),
        Value::Array(items) => Some(items.iter().any(|item| values_equal(item, needle))),
        Value::Object(map) => Some(needle.as_str().is_some_and(|k| map.contains_key(k))),
        _ => None,
    }
}

/// Short type name used in error messages.
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
