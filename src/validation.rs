// ✅ Receipt Validation - Gatekeeper before storage
// Only retailer, purchase date and purchase time are checked here.
// Amounts and item fields are checked when the receipt is scored.

use crate::receipt::Receipt;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Retailer name is required")]
    MissingRetailer,

    #[error("Invalid purchase date format. Expected YYYY-MM-DD")]
    InvalidPurchaseDate { value: Option<String> },

    #[error("Invalid purchase time format. Expected HH:MM")]
    InvalidPurchaseTime { value: Option<String> },
}

impl ValidationError {
    /// Wire name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingRetailer => "retailer",
            ValidationError::InvalidPurchaseDate { .. } => "purchaseDate",
            ValidationError::InvalidPurchaseTime { .. } => "purchaseTime",
        }
    }
}

// ============================================================================
// FIELD PARSERS
// ============================================================================

/// Check `raw` against a shape where `d` is an ASCII digit and any other
/// byte must match literally.
fn has_shape(raw: &str, shape: &str) -> bool {
    raw.len() == shape.len()
        && raw.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'd' => c.is_ascii_digit(),
            _ => c == s,
        })
}

/// Strict `YYYY-MM-DD`; rejects impossible dates such as 2022-02-30.
pub fn parse_purchase_date(raw: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidPurchaseDate {
        value: raw.map(str::to_string),
    };

    let raw = raw.ok_or_else(invalid)?;

    // chrono accepts unpadded fields, so pin the width first
    if !has_shape(raw, "dddd-dd-dd") {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}

/// Strict 24-hour `HH:MM`; no seconds, no AM/PM.
pub fn parse_purchase_time(raw: Option<&str>) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::InvalidPurchaseTime {
        value: raw.map(str::to_string),
    };

    let raw = raw.ok_or_else(invalid)?;

    if !has_shape(raw, "dd:dd") {
        return Err(invalid());
    }

    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| invalid())
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validate a receipt before it is accepted.
///
/// Checks run in field order and stop at the first failure.
pub fn validate(receipt: &Receipt) -> Result<(), ValidationError> {
    match receipt.retailer.as_deref() {
        None | Some("") => return Err(ValidationError::MissingRetailer),
        Some(_) => {}
    }

    parse_purchase_date(receipt.purchase_date.as_deref())?;
    parse_purchase_time(receipt.purchase_time.as_deref())?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::ReceiptItem;

    fn valid_receipt() -> Receipt {
        Receipt::new(
            "Target",
            "2022-01-01",
            "13:01",
            vec![ReceiptItem::new("Mountain Dew 12PK", "6.49")],
            "6.49",
        )
    }

    #[test]
    fn test_valid_receipt_passes() {
        assert_eq!(validate(&valid_receipt()), Ok(()));
    }

    #[test]
    fn test_missing_or_empty_retailer() {
        let mut receipt = valid_receipt();
        receipt.retailer = None;
        assert_eq!(validate(&receipt), Err(ValidationError::MissingRetailer));

        receipt.retailer = Some(String::new());
        let err = validate(&receipt).unwrap_err();
        assert_eq!(err, ValidationError::MissingRetailer);
        assert_eq!(err.field(), "retailer");
        assert_eq!(err.to_string(), "Retailer name is required");
    }

    #[test]
    fn test_whitespace_retailer_is_not_empty() {
        let mut receipt = valid_receipt();
        receipt.retailer = Some("   ".to_string());
        assert!(validate(&receipt).is_ok());
    }

    #[test]
    fn test_invalid_dates() {
        for bad in ["2022-13-01", "2022-02-30", "2022-1-01", "22-01-01", "2022/01/01", "", "yesterday"] {
            let mut receipt = valid_receipt();
            receipt.purchase_date = Some(bad.to_string());

            let err = validate(&receipt).unwrap_err();
            assert_eq!(err.field(), "purchaseDate", "date {bad:?} should fail");
        }

        let mut receipt = valid_receipt();
        receipt.purchase_date = None;
        assert_eq!(
            validate(&receipt),
            Err(ValidationError::InvalidPurchaseDate { value: None })
        );
    }

    #[test]
    fn test_leap_day() {
        assert!(parse_purchase_date(Some("2024-02-29")).is_ok());
        assert!(parse_purchase_date(Some("2023-02-29")).is_err());
    }

    #[test]
    fn test_invalid_times() {
        for bad in ["2:00 PM", "24:00", "12:60", "14:00:00", "2:00", "1400", ""] {
            let mut receipt = valid_receipt();
            receipt.purchase_time = Some(bad.to_string());

            let err = validate(&receipt).unwrap_err();
            assert_eq!(err.field(), "purchaseTime", "time {bad:?} should fail");
            assert_eq!(err.to_string(), "Invalid purchase time format. Expected HH:MM");
        }
    }

    #[test]
    fn test_time_bounds() {
        assert_eq!(
            parse_purchase_time(Some("00:00")).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_purchase_time(Some("23:59")).unwrap(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
    }

    #[test]
    fn test_retailer_checked_before_date() {
        let mut receipt = valid_receipt();
        receipt.retailer = None;
        receipt.purchase_date = Some("bad".to_string());
        assert_eq!(validate(&receipt), Err(ValidationError::MissingRetailer));
    }

    #[test]
    fn test_amounts_not_checked_at_validation() {
        let mut receipt = valid_receipt();
        receipt.total = Some("not money".to_string());
        receipt.items = None;
        assert!(validate(&receipt).is_ok());
    }
}
