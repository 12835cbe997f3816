//! Shape validation for incoming note-creation requests.
//!
//! Every field arrives optional so a missing field is reported as a
//! classified `BadRequest` instead of a deserialization failure. Checks run
//! in a fixed order and stop at the first defect, so a request with several
//! problems always produces the same error: required fields, then the item
//! list, then each item in request order.

use serde::Deserialize;

use crate::error::CoreError;

/// Raw creation payload as received from the transport layer.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub customer_id: Option<String>,
    pub billing_address_id: Option<String>,
    pub shipping_address_id: Option<String>,
    pub items: Option<Vec<RawLineItem>>,
}

/// One unvalidated line of a creation payload.
#[derive(Debug, Deserialize)]
pub struct RawLineItem {
    pub product_id: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<f64>,
}

/// A creation request whose shape has been checked.
///
/// Reference ids still need to be resolved against the catalog; quantities
/// and prices are already known to be in range.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub customer_id: String,
    pub billing_address_id: String,
    pub shipping_address_id: String,
    pub items: Vec<ValidatedItem>,
}

/// One shape-checked line: quantity > 0, unit price >= 0.
#[derive(Debug, Clone)]
pub struct ValidatedItem {
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Check the shape of a creation request, returning the first defect found.
pub fn validate(raw: CreateNoteRequest) -> Result<ValidatedRequest, CoreError> {
    let customer_id = require_field(raw.customer_id, "customer_id")?;
    let billing_address_id = require_field(raw.billing_address_id, "billing_address_id")?;
    let shipping_address_id = require_field(raw.shipping_address_id, "shipping_address_id")?;

    let raw_items = raw.items.ok_or_else(|| {
        CoreError::BadRequest("Missing required field: items".to_string())
    })?;
    if raw_items.is_empty() {
        return Err(CoreError::BadRequest(
            "items must contain at least one line".to_string(),
        ));
    }

    let mut items = Vec::with_capacity(raw_items.len());
    for (index, item) in raw_items.into_iter().enumerate() {
        items.push(validate_item(item, index)?);
    }

    Ok(ValidatedRequest {
        customer_id,
        billing_address_id,
        shipping_address_id,
        items,
    })
}

fn require_field(value: Option<String>, name: &str) -> Result<String, CoreError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::BadRequest(format!("Missing required field: {name}")))
}

fn validate_item(item: RawLineItem, index: usize) -> Result<ValidatedItem, CoreError> {
    let product_id = item.product_id.filter(|v| !v.is_empty()).ok_or_else(|| {
        CoreError::BadRequest(format!("items[{index}]: product_id is required"))
    })?;

    let quantity = item.quantity.ok_or_else(|| {
        CoreError::BadRequest(format!("items[{index}]: quantity is required"))
    })?;
    if quantity <= 0 {
        return Err(CoreError::BadRequest(format!(
            "items[{index}]: quantity must be greater than zero"
        )));
    }

    let unit_price = item.unit_price.ok_or_else(|| {
        CoreError::BadRequest(format!("items[{index}]: unit_price is required"))
    })?;
    if unit_price < 0.0 {
        return Err(CoreError::BadRequest(format!(
            "items[{index}]: unit_price must not be negative"
        )));
    }

    Ok(ValidatedItem {
        product_id,
        quantity,
        unit_price,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    fn item(product_id: &str, quantity: i32, unit_price: f64) -> RawLineItem {
        RawLineItem {
            product_id: Some(product_id.to_string()),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }

    fn request(items: Vec<RawLineItem>) -> CreateNoteRequest {
        CreateNoteRequest {
            customer_id: Some("cust-1".to_string()),
            billing_address_id: Some("addr-b".to_string()),
            shipping_address_id: Some("addr-s".to_string()),
            items: Some(items),
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        let validated = validate(request(vec![item("prod-1", 2, 10.0), item("prod-2", 1, 5.0)]))
            .expect("request should validate");
        assert_eq!(validated.customer_id, "cust-1");
        assert_eq!(validated.items.len(), 2);
        assert_eq!(validated.items[0].quantity, 2);
        assert_eq!(validated.items[1].unit_price, 5.0);
    }

    #[test]
    fn missing_customer_reported_before_missing_items() {
        let raw = CreateNoteRequest {
            customer_id: None,
            billing_address_id: Some("addr-b".to_string()),
            shipping_address_id: Some("addr-s".to_string()),
            items: None,
        };
        let err = validate(raw).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(msg) if msg.contains("customer_id"));
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut raw = request(vec![item("prod-1", 1, 1.0)]);
        raw.billing_address_id = Some(String::new());
        let err = validate(raw).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(msg) if msg.contains("billing_address_id"));
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let err = validate(request(vec![])).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(msg) if msg.contains("at least one"));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = validate(request(vec![item("prod-1", 0, 1.0)])).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(msg) if msg.contains("quantity"));
    }

    #[test]
    fn negative_unit_price_is_rejected() {
        let err = validate(request(vec![item("prod-1", 1, -0.01)])).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(msg) if msg.contains("unit_price"));
    }

    #[test]
    fn zero_unit_price_is_allowed() {
        assert!(validate(request(vec![item("prod-1", 1, 0.0)])).is_ok());
    }

    #[test]
    fn first_offending_item_wins() {
        // Item 0 has a bad quantity, item 1 a bad price; item 0 is reported.
        let err = validate(request(vec![item("prod-1", -1, 1.0), item("prod-2", 1, -1.0)]))
            .unwrap_err();
        assert_matches!(err, CoreError::BadRequest(msg) if msg.contains("items[0]"));
    }

    #[test]
    fn item_defects_reported_in_request_order() {
        let mut bad = item("", 1, 1.0);
        bad.product_id = None;
        let err = validate(request(vec![item("prod-1", 1, 1.0), bad])).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(msg) if msg.contains("items[1]"));
    }
}
