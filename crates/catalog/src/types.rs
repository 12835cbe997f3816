//! Reference entities owned by the catalog service.
//!
//! Treated as authoritative snapshots fetched once per request; nothing is
//! cached across requests.

use serde::{Deserialize, Serialize};

/// A customer record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Customer {
    pub id: String,
    pub legal_name: String,
    pub trade_name: String,
    /// Tax identifier (RFC). First path segment of the archive key.
    pub tax_id: String,
    pub email: String,
    pub phone: String,
}

/// Whether an address may be used for billing or for shipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressKind {
    Billing,
    Shipping,
}

/// A customer address record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Address {
    pub id: String,
    /// Owning customer; requests referencing someone else's address are
    /// rejected.
    pub customer_id: String,
    pub street: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub kind: AddressKind,
}

/// A product record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub base_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_kind_uses_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&AddressKind::Billing).unwrap(),
            "\"BILLING\""
        );
        let kind: AddressKind = serde_json::from_str("\"SHIPPING\"").unwrap();
        assert_eq!(kind, AddressKind::Shipping);
    }
}
