use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry as exposed by the product service.
///
/// Products are immutable from the gateway's perspective; only the product
/// service creates or mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One line item in a cart or an order's item list.
///
/// The cart holds at most one line item per product `id`; duplicate ids are
/// merged by the gateway, never appended twice. A missing `quantity` on the
/// wire means 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// The closed set of order states.
///
/// Expressed as an enum so an unknown status string fails at the
/// deserialization boundary rather than reaching the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}

/// An order as created and owned by the order service.
///
/// Immutable after creation except for `status`; never deleted through this
/// API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_item_quantity_defaults_to_one() {
        let item: CartItem =
            serde_json::from_str(r#"{"id":1,"name":"Widget","price":9.99}"#).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn cart_item_roundtrip() {
        let item = CartItem {
            id: 7,
            name: "Gadget".to_string(),
            price: 25.0,
            quantity: 3,
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }

    #[test]
    fn product_optional_fields_are_omitted() {
        let product = Product {
            id: 1,
            name: "Laptop".to_string(),
            price: 999.99,
            category: None,
            description: None,
        };
        let json = serde_json::to_string(&product).unwrap();
        assert!(!json.contains("category"));
        assert!(!json.contains("description"));
    }

    #[test]
    fn order_uses_camel_case_wire_names() {
        let order = Order {
            id: "ORD-0001".to_string(),
            items: vec![],
            status: OrderStatus::Pending,
            total_amount: 19.98,
            created_at: Utc::now(),
            updated_at: None,
        };
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("totalAmount"));
        assert!(json.contains("createdAt"));
        assert!(!json.contains("updatedAt"));
    }

    #[test]
    fn order_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn unknown_order_status_is_rejected() {
        let result = serde_json::from_str::<OrderStatus>("\"shipped\"");
        assert!(result.is_err());
    }
}
