use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use super::error::AppError;

/// Leading-integer parse of a form value: `"10"`, `" 7 seats"`, `12.9` and `12`
/// all yield an integer; anything without leading digits yields `None`.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int_str(s),
        _ => None,
    }
}

fn parse_int_str(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_become_integers() {
        assert_eq!(parse_int(&json!("10")), Some(10));
        assert_eq!(parse_int(&json!("  7 seats")), Some(7));
        assert_eq!(parse_int(&json!("-3")), Some(-3));
        assert_eq!(parse_int(&json!("+4")), Some(4));
    }

    #[test]
    fn numbers_are_truncated() {
        assert_eq!(parse_int(&json!(12)), Some(12));
        assert_eq!(parse_int(&json!(12.9)), Some(12));
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(parse_int(&json!("seats")), None);
        assert_eq!(parse_int(&json!("")), None);
        assert_eq!(parse_int(&json!("-")), None);
        assert_eq!(parse_int(&json!(null)), None);
        assert_eq!(parse_int(&json!(true)), None);
    }

    #[test]
    fn object_id_parsing() {
        assert!(parse_object_id("64b7f0c2a1b2c3d4e5f60718").is_ok());
        assert!(matches!(
            parse_object_id("nope"),
            Err(AppError::InvalidId(id)) if id == "nope"
        ));
    }
}
