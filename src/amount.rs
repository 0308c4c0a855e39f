// 💵 Amounts - Exact decimal parsing for totals and prices
// Currency never goes through f64: "0.2" and "0.25" are not representable in
// binary floating point and the point rules compare and round exactly.

use crate::scoring::ScoringError;
use rust_decimal::Decimal;

/// True if `raw` is a plain decimal numeral: optional sign, digits, and an
/// optional fractional part. At least one digit is required.
pub fn is_decimal_numeral(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    !(whole.is_empty() && fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
}

/// Fill in the digits a bare `.5` or `5.` leaves implicit, and drop zeros
/// that carry no value so long zero padding still fits a `Decimal`
fn canonical_numeral(raw: &str) -> String {
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}

/// Parse a monetary field into an exact decimal.
///
/// `field` names the value in errors (`total`, `items[2].price`).
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, ScoringError> {
    if !is_decimal_numeral(raw) {
        return Err(ScoringError::MalformedAmount {
            field: field.to_string(),
            value: raw.to_string(),
        });
    }

    // from_str_exact refuses to round away digits that do not fit
    let amount = Decimal::from_str_exact(&canonical_numeral(raw)).map_err(|_| ScoringError::AmountOutOfRange {
        field: field.to_string(),
    })?;

    if amount < Decimal::ZERO {
        return Err(ScoringError::NegativeAmount {
            field: field.to_string(),
            value: raw.to_string(),
        });
    }

    Ok(amount)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_numeral_shapes() {
        assert!(is_decimal_numeral("35.35"));
        assert!(is_decimal_numeral("100"));
        assert!(is_decimal_numeral("100.00"));
        assert!(is_decimal_numeral(".5"));
        assert!(is_decimal_numeral("5."));
        assert!(is_decimal_numeral("+1.25"));

        assert!(!is_decimal_numeral(""));
        assert!(!is_decimal_numeral("."));
        assert!(!is_decimal_numeral("-"));
        assert!(!is_decimal_numeral("12,50"));
        assert!(!is_decimal_numeral("$1.00"));
        assert!(!is_decimal_numeral("1.2.3"));
        assert!(!is_decimal_numeral(" 1.00"));
        assert!(!is_decimal_numeral("1_000"));
        assert!(!is_decimal_numeral("1e3"));
    }

    #[test]
    fn test_parse_amount_keeps_value_exact() {
        let amount = parse_amount("total", "35.35").unwrap();
        assert_eq!(amount, Decimal::new(3535, 2));

        // Same value, different scale
        assert_eq!(
            parse_amount("total", "100").unwrap(),
            parse_amount("total", "100.00").unwrap()
        );

        assert_eq!(parse_amount("total", ".5").unwrap(), Decimal::new(5, 1));
        assert_eq!(parse_amount("total", "5.").unwrap(), Decimal::new(5, 0));
        assert_eq!(parse_amount("total", "+1.25").unwrap(), Decimal::new(125, 2));
    }

    #[test]
    fn test_parse_amount_rejects_malformed() {
        let err = parse_amount("items[0].price", "abc").unwrap_err();

        match err {
            ScoringError::MalformedAmount { field, value } => {
                assert_eq!(field, "items[0].price");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_amount_rejects_negative() {
        let err = parse_amount("total", "-1.00").unwrap_err();
        assert!(matches!(err, ScoringError::NegativeAmount { .. }));

        // Negative zero is still zero
        assert_eq!(parse_amount("total", "-0.00").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_ignores_zero_padding() {
        let padded = format!("12.{}", "0".repeat(30));
        assert_eq!(parse_amount("total", &padded).unwrap(), Decimal::new(12, 0));

        let leading = format!("{}12.50", "0".repeat(40));
        assert_eq!(parse_amount("total", &leading).unwrap(), Decimal::new(1250, 2));

        assert_eq!(canonical_numeral("-0012.3400"), "-12.34");
        assert_eq!(canonical_numeral("000"), "0");
    }

    #[test]
    fn test_parse_amount_out_of_range() {
        let huge = "9".repeat(40);
        let err = parse_amount("total", &huge).unwrap_err();
        assert!(matches!(err, ScoringError::AmountOutOfRange { .. }));
    }
}
