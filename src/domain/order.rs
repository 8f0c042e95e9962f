use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents a purchase transaction against a shop.
///
/// Matches the backend wire shape: camelCase keys, `id` omitted until the
/// server has assigned one. `date_of_purchase` stays in its wire form, a
/// timezone-less `YYYY-MM-DDTHH:MM:SS` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub date_of_purchase: String,
    pub total: f64,
    pub customer_id: u64,
    pub payment_mode: String,
    pub shop_id: String,
}

impl Order {
    pub fn new(
        id: Option<u64>,
        date_of_purchase: impl Into<String>,
        total: f64,
        customer_id: u64,
        payment_mode: impl Into<String>,
        shop_id: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date_of_purchase: date_of_purchase.into(),
            total,
            customer_id,
            payment_mode: payment_mode.into(),
            shop_id: shop_id.into(),
        }
    }
}

/// The accepted payment modes. The wire keeps the mode as a plain string,
/// case preserved; this enum backs the filter dropdown and the form, and
/// matches raw values case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    Upi,
    Card,
    Cash,
    NetBanking,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Upi,
        PaymentMode::Card,
        PaymentMode::Cash,
        PaymentMode::NetBanking,
    ];

    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::Card => "Card",
            PaymentMode::Cash => "Cash",
            PaymentMode::NetBanking => "NetBanking",
        }
    }

    /// Case-insensitive match against a raw wire value.
    pub fn matches(&self, raw: &str) -> bool {
        raw.eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown payment mode: {0}")]
pub struct ParsePaymentModeError(pub String);

impl FromStr for PaymentMode {
    type Err = ParsePaymentModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMode::ALL
            .into_iter()
            .find(|mode| mode.matches(s))
            .ok_or_else(|| ParsePaymentModeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case_without_id() {
        let order = Order::new(None, "2025-06-15T10:30:00", 499.5, 42, "UPI", "SHOP-7");
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "dateOfPurchase": "2025-06-15T10:30:00",
                "total": 499.5,
                "customerId": 42,
                "paymentMode": "UPI",
                "shopId": "SHOP-7",
            })
        );
    }

    #[test]
    fn serializes_id_once_assigned() {
        let order = Order::new(Some(7), "2025-06-15T10:30:00", 10.0, 1, "Cash", "A");
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["id"], json!(7));
    }

    #[test]
    fn deserializes_wire_shape() {
        let order: Order = serde_json::from_str(
            r#"{"id":3,"dateOfPurchase":"2025-01-02T09:00:00","total":50.0,"customerId":5,"paymentMode":"Cash","shopId":"B"}"#,
        )
        .unwrap();
        assert_eq!(order.id, Some(3));
        assert_eq!(order.customer_id, 5);
        assert_eq!(order.shop_id, "B");
    }

    #[test]
    fn payment_mode_parses_case_insensitively() {
        assert_eq!("upi".parse::<PaymentMode>().unwrap(), PaymentMode::Upi);
        assert_eq!(
            "NETBANKING".parse::<PaymentMode>().unwrap(),
            PaymentMode::NetBanking
        );
        assert!("Wire".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn payment_mode_matches_raw_values() {
        assert!(PaymentMode::Card.matches("card"));
        assert!(PaymentMode::Card.matches("CARD"));
        assert!(!PaymentMode::Card.matches("cash"));
    }
}
