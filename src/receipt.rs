// 🧾 Receipt Model - What the customer hands us
// Wire format is camelCase JSON; every field is optional so that a missing
// value is reported by the validator or scorer with the field name instead
// of failing the whole decode.

use serde::{Deserialize, Serialize};

// ============================================================================
// RECEIPT ITEM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    /// Free-text description as printed on the receipt
    pub short_description: Option<String>,

    /// Price as an exact decimal string, e.g. "12.25"
    pub price: Option<String>,
}

impl ReceiptItem {
    pub fn new(short_description: &str, price: &str) -> Self {
        ReceiptItem {
            short_description: Some(short_description.to_string()),
            price: Some(price.to_string()),
        }
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

/// A submitted purchase record.
///
/// Immutable once accepted: the store hands out clones and scoring only
/// ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: Option<String>,

    /// `YYYY-MM-DD`
    pub purchase_date: Option<String>,

    /// `HH:MM`, 24-hour clock
    pub purchase_time: Option<String>,

    pub items: Option<Vec<ReceiptItem>>,

    /// Total as an exact decimal string, e.g. "35.35"
    pub total: Option<String>,
}

impl Receipt {
    /// Create a receipt with every field present
    pub fn new(
        retailer: &str,
        purchase_date: &str,
        purchase_time: &str,
        items: Vec<ReceiptItem>,
        total: &str,
    ) -> Self {
        Receipt {
            retailer: Some(retailer.to_string()),
            purchase_date: Some(purchase_date.to_string()),
            purchase_time: Some(purchase_time.to_string()),
            items: Some(items),
            total: Some(total.to_string()),
        }
    }

    /// Parse a receipt from its JSON wire form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Retailer name, or "" when absent
    pub fn retailer_name(&self) -> &str {
        self.retailer.as_deref().unwrap_or("")
    }

    /// Number of line items (0 when the list is absent)
    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [
                {"shortDescription": "Mountain Dew 12PK", "price": "6.49"}
            ],
            "total": "6.49"
        }"#;

        let receipt = Receipt::from_json(json).unwrap();

        assert_eq!(receipt.retailer_name(), "Target");
        assert_eq!(receipt.purchase_date.as_deref(), Some("2022-01-01"));
        assert_eq!(receipt.purchase_time.as_deref(), Some("13:01"));
        assert_eq!(receipt.item_count(), 1);
        assert_eq!(receipt.items.unwrap()[0], ReceiptItem::new("Mountain Dew 12PK", "6.49"));
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let receipt = Receipt::from_json("{}").unwrap();

        assert!(receipt.retailer.is_none());
        assert!(receipt.items.is_none());
        assert!(receipt.total.is_none());
        assert_eq!(receipt.retailer_name(), "");
        assert_eq!(receipt.item_count(), 0);
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let receipt = Receipt::new(
            "Target",
            "2022-01-01",
            "13:01",
            vec![ReceiptItem::new("Pepsi", "1.25")],
            "1.25",
        );

        let value = serde_json::to_value(&receipt).unwrap();

        assert_eq!(value["purchaseDate"], "2022-01-01");
        assert_eq!(value["purchaseTime"], "13:01");
        assert_eq!(value["items"][0]["shortDescription"], "Pepsi");
    }

    #[test]
    fn test_wrong_type_is_a_decode_error() {
        let result = Receipt::from_json(r#"{"retailer": 42}"#);
        assert!(result.is_err());
    }
}
