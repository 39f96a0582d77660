use crate::error::CoreError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// The SQL type a source field is coerced to before it is bound to a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetType {
    #[default]
    Text,
    /// A 32-bit `INT` column (keys, quantities).
    Integer,
    /// A fixed-point `DECIMAL` column (monetary values).
    Decimal,
}

impl TargetType {
    /// Returns the name used for this type in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TargetType::Text => "text",
            TargetType::Integer => "integer",
            TargetType::Decimal => "decimal",
        }
    }

    /// Coerces a raw field into a bindable value.
    ///
    /// Numeric types never fall back to zero or NULL: empty or malformed text is an error.
    pub fn coerce(&self, raw: &str) -> Result<SqlValue, CoreError> {
        let invalid = |reason: String| CoreError::InvalidValue(self.name(), raw.to_string(), reason);
        match self {
            TargetType::Text => Ok(SqlValue::Text(raw.to_string())),
            TargetType::Integer => raw
                .trim()
                .parse::<i32>()
                .map(SqlValue::Integer)
                .map_err(|e| invalid(e.to_string())),
            TargetType::Decimal => {
                let text = raw.trim();
                if !is_plain_decimal(text) {
                    return Err(invalid("expected digits with an optional sign and decimal point".to_string()));
                }
                Decimal::from_str(text)
                    .map(SqlValue::Decimal)
                    .map_err(|e| invalid(e.to_string()))
            }
        }
    }
}

/// `[+-]?digits[.digits]`, also allowing `.5` and `5.`. `Decimal::from_str` on its own
/// accepts `_` separators, which would load `1_0.00` as `10.00`.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    !(int_part.is_empty() && frac_part.is_empty()) && all_digits(int_part) && all_digits(frac_part)
}

/// A single coerced field, ready to be bound as a statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Integer(i32),
    Decimal(Decimal),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_text_is_passed_through() {
        assert_eq!(TargetType::Text.coerce("Ana").unwrap(), SqlValue::Text("Ana".to_string()));
        assert_eq!(TargetType::default(), TargetType::Text);
    }

    #[test]
    fn test_decimal_keeps_scale() {
        assert_eq!(TargetType::Decimal.coerce("10.00").unwrap(), SqlValue::Decimal(dec!(10.00)));
        assert_eq!(TargetType::Decimal.coerce(" 2.5 ").unwrap(), SqlValue::Decimal(dec!(2.5)));
        assert_eq!(TargetType::Decimal.coerce("-3.25").unwrap(), SqlValue::Decimal(dec!(-3.25)));
    }

    #[test]
    fn test_malformed_decimal_is_rejected() {
        for raw in ["", "abc", "1,50", "10.0.0", "1_000", "1_0.00", "+", ".", "1e3", "--1"] {
            let err = TargetType::Decimal.coerce(raw).unwrap_err();
            assert!(matches!(err, CoreError::InvalidValue("decimal", ref v, _) if v == raw));
        }
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(TargetType::Integer.coerce("42").unwrap(), SqlValue::Integer(42));
        assert!(TargetType::Integer.coerce("4.2").is_err());
        assert!(TargetType::Integer.coerce("").is_err());
    }
}
