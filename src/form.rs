//! Order editor input.
//!
//! Field values arrive as raw strings, the way a form control holds them,
//! and are validated into an [`Order`] payload. Validation messages match
//! what the editor shows next to each field.

use std::str::FromStr;

use thiserror::Error;

use crate::domain::datetime;
use crate::domain::{Order, PaymentMode};

/// Raw editor state for one order. `date_of_purchase` is minute precision;
/// conversion to the wire format happens during validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderForm {
    pub date_of_purchase: String,
    pub total: String,
    pub customer_id: String,
    pub payment_mode: String,
    pub shop_id: String,
}

/// First validation failure, tagged with the offending field.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldError {
    #[error("{0}: This field is required")]
    Required(&'static str),
    #[error("{0}: Minimum value is {1}")]
    Min(&'static str, i64),
    #[error("{0}: Invalid value")]
    Invalid(&'static str),
}

impl OrderForm {
    /// Prefill the editor from an existing order, truncating the purchase
    /// timestamp to the minute precision the editor works in.
    pub fn from_order(order: &Order) -> Self {
        Self {
            date_of_purchase: datetime::to_input_format(&order.date_of_purchase),
            total: order.total.to_string(),
            customer_id: order.customer_id.to_string(),
            payment_mode: order.payment_mode.clone(),
            shop_id: order.shop_id.clone(),
        }
    }

    /// Validate every field and build the create/update payload. The payload
    /// never carries an id; the caller attaches one when updating.
    pub fn validate(&self) -> Result<Order, FieldError> {
        let date = self.date_of_purchase.trim();
        if date.is_empty() {
            return Err(FieldError::Required("dateOfPurchase"));
        }
        datetime::parse_input(date).map_err(|_| FieldError::Invalid("dateOfPurchase"))?;

        let total = self.total.trim();
        if total.is_empty() {
            return Err(FieldError::Required("total"));
        }
        let total: f64 = total.parse().map_err(|_| FieldError::Invalid("total"))?;
        if !total.is_finite() || total < 0.0 {
            return Err(FieldError::Min("total", 0));
        }

        let customer_id = self.customer_id.trim();
        if customer_id.is_empty() {
            return Err(FieldError::Required("customerId"));
        }
        let customer_id: u64 = customer_id
            .parse()
            .map_err(|_| FieldError::Invalid("customerId"))?;
        if customer_id < 1 {
            return Err(FieldError::Min("customerId", 1));
        }

        let payment_mode = self.payment_mode.trim();
        if payment_mode.is_empty() {
            return Err(FieldError::Required("paymentMode"));
        }
        let payment_mode =
            PaymentMode::from_str(payment_mode).map_err(|_| FieldError::Invalid("paymentMode"))?;

        let shop_id = self.shop_id.trim();
        if shop_id.is_empty() {
            return Err(FieldError::Required("shopId"));
        }

        Ok(Order::new(
            None,
            datetime::to_api_format(date),
            total,
            customer_id,
            payment_mode.as_str(),
            shop_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> OrderForm {
        OrderForm {
            date_of_purchase: "2025-06-15T10:30".to_string(),
            total: "499.99".to_string(),
            customer_id: "42".to_string(),
            payment_mode: "UPI".to_string(),
            shop_id: " SHOP-7 ".to_string(),
        }
    }

    #[test]
    fn builds_payload_with_expanded_date_and_trimmed_shop() {
        let order = filled().validate().unwrap();
        assert_eq!(order.id, None);
        assert_eq!(order.date_of_purchase, "2025-06-15T10:30:00");
        assert_eq!(order.total, 499.99);
        assert_eq!(order.customer_id, 42);
        assert_eq!(order.payment_mode, "UPI");
        assert_eq!(order.shop_id, "SHOP-7");
    }

    #[test]
    fn canonicalizes_payment_mode_spelling() {
        let mut form = filled();
        form.payment_mode = "netbanking".to_string();
        assert_eq!(form.validate().unwrap().payment_mode, "NetBanking");
    }

    #[test]
    fn requires_every_field() {
        for (clear, field) in [
            (
                Box::new(|f: &mut OrderForm| f.date_of_purchase.clear()) as Box<dyn Fn(&mut OrderForm)>,
                "dateOfPurchase",
            ),
            (Box::new(|f: &mut OrderForm| f.total.clear()), "total"),
            (Box::new(|f: &mut OrderForm| f.customer_id.clear()), "customerId"),
            (Box::new(|f: &mut OrderForm| f.payment_mode.clear()), "paymentMode"),
            (Box::new(|f: &mut OrderForm| f.shop_id = "  ".to_string()), "shopId"),
        ] {
            let mut form = filled();
            clear(&mut form);
            assert_eq!(form.validate(), Err(FieldError::Required(field)));
        }
    }

    #[test]
    fn rejects_negative_total() {
        let mut form = filled();
        form.total = "-1".to_string();
        assert_eq!(form.validate(), Err(FieldError::Min("total", 0)));
    }

    #[test]
    fn rejects_zero_customer_id() {
        let mut form = filled();
        form.customer_id = "0".to_string();
        assert_eq!(form.validate(), Err(FieldError::Min("customerId", 1)));
    }

    #[test]
    fn rejects_malformed_values() {
        let mut form = filled();
        form.date_of_purchase = "15/06/2025".to_string();
        assert_eq!(form.validate(), Err(FieldError::Invalid("dateOfPurchase")));

        let mut form = filled();
        form.total = "lots".to_string();
        assert_eq!(form.validate(), Err(FieldError::Invalid("total")));

        let mut form = filled();
        form.payment_mode = "Barter".to_string();
        assert_eq!(form.validate(), Err(FieldError::Invalid("paymentMode")));
    }

    #[test]
    fn prefill_round_trips_through_validation() {
        let order = Order::new(Some(3), "2025-06-15T10:30:00", 499.99, 42, "UPI", "SHOP-7");
        let form = OrderForm::from_order(&order);
        assert_eq!(form.date_of_purchase, "2025-06-15T10:30");

        let rebuilt = form.validate().unwrap();
        assert_eq!(rebuilt.date_of_purchase, order.date_of_purchase);
        assert_eq!(rebuilt.total, order.total);
        assert_eq!(rebuilt.customer_id, order.customer_id);
        assert_eq!(rebuilt.id, None);
    }

    #[test]
    fn validation_message_texts() {
        assert_eq!(
            FieldError::Required("total").to_string(),
            "total: This field is required"
        );
        assert_eq!(
            FieldError::Min("customerId", 1).to_string(),
            "customerId: Minimum value is 1"
        );
    }
}
