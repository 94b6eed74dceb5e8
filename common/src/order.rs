use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;
use crate::validation::{is_blank, require_text, ValidationError};

/// Unique order identifier, assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        OrderId(id.to_string())
    }
}

/// One product line of an order: name, quantity and unit kind ("unit", "pack", "kilo").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: Quantity,
    #[serde(rename = "tipo")]
    pub unit: String,
}

/// A line item as typed into the draft form. Any field may still be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemInput {
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: String,
}

impl LineItemInput {
    pub fn new(name: impl Into<String>, quantity: impl Into<f64>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: Some(quantity.into()),
            unit: unit.into(),
        }
    }

    /// Only an absent quantity counts as missing; zero is a valid amount.
    pub fn validate(&self) -> Result<LineItem, ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::MissingLineItemField { field: "name" });
        }
        let quantity = match self.quantity {
            Some(q) => Quantity::new(q)?,
            None => return Err(ValidationError::MissingLineItemField { field: "quantity" }),
        };
        if is_blank(&self.unit) {
            return Err(ValidationError::MissingLineItemField { field: "unit" });
        }
        Ok(LineItem {
            name: self.name.trim().to_string(),
            quantity,
            unit: self.unit.trim().to_string(),
        })
    }
}

/// Order lifecycle. `Received` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Recibido")]
    Received,
}

impl OrderStatus {
    /// Returns true if transitioning from self to `next` is valid.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!((self, next), (OrderStatus::Pending, OrderStatus::Received))
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Received
    }
}

/// An order as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(rename = "fecha")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "productos")]
    pub items: Vec<LineItem>,
    #[serde(rename = "estado", default)]
    pub status: OrderStatus,
    /// Only present once received.
    #[serde(rename = "comentarios", default, skip_serializing_if = "Option::is_none")]
    pub received_comment: Option<String>,
    /// Only present once received.
    #[serde(rename = "recibidoPor", default, skip_serializing_if = "Option::is_none")]
    pub received_by: Option<String>,
}

impl Order {
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Display label derived from the creation time.
    pub fn label(&self) -> String {
        self.created_at.format("%d/%m/%Y %H:%M:%S").to_string()
    }
}

/// Body of a create-order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(rename = "productos")]
    pub items: Vec<LineItem>,
}

impl NewOrder {
    pub fn new(items: Vec<LineItem>) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }
        Ok(Self { items })
    }
}

/// Body of a status-change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "comentarios", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "recibidoPor", default, skip_serializing_if = "Option::is_none")]
    pub received_by: Option<String>,
}

impl StatusChange {
    /// The pending → received transition. Both texts are required and sent as given.
    pub fn received(comment: &str, received_by: &str) -> Result<Self, ValidationError> {
        require_text(comment, "comment")?;
        require_text(received_by, "received by")?;
        Ok(Self {
            status: OrderStatus::Received,
            comment: Some(comment.to_string()),
            received_by: Some(received_by.to_string()),
        })
    }
}

/// An order being composed locally, not yet persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    items: Vec<LineItem>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `input` and append it. The draft is unchanged on error.
    pub fn add_line_item(&mut self, input: &LineItemInput) -> Result<&LineItem, ValidationError> {
        let item = input.validate()?;
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> LineItem {
        LineItem {
            name: name.into(),
            quantity: Quantity::from(2),
            unit: "pack".into(),
        }
    }

    #[test]
    fn test_status_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Received));
        assert!(!OrderStatus::Received.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Received.can_transition_to(OrderStatus::Received));
        assert!(OrderStatus::Received.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn empty_order_is_rejected() {
        assert_eq!(NewOrder::new(vec![]), Err(ValidationError::EmptyOrder));
        assert_eq!(NewOrder::new(vec![item("Lemons")]).unwrap().items.len(), 1);
    }

    #[test]
    fn received_requires_comment_and_receiver() {
        assert_eq!(
            StatusChange::received("  ", "Ana"),
            Err(ValidationError::BlankField { field: "comment" })
        );
        assert_eq!(
            StatusChange::received("all good", ""),
            Err(ValidationError::BlankField { field: "received by" })
        );
        let change = StatusChange::received("all good", "Ana").unwrap();
        assert_eq!(change.status, OrderStatus::Received);
        assert_eq!(change.comment.as_deref(), Some("all good"));
        assert_eq!(change.received_by.as_deref(), Some("Ana"));
    }

    #[test]
    fn draft_rejects_incomplete_line_items() {
        let mut draft = OrderDraft::new();
        let missing_name = LineItemInput {
            name: " ".into(),
            quantity: Some(1.0),
            unit: "unit".into(),
        };
        let missing_quantity = LineItemInput {
            name: "Limes".into(),
            quantity: None,
            unit: "kilo".into(),
        };
        let negative_quantity = LineItemInput {
            quantity: Some(-1.0),
            ..missing_quantity.clone()
        };
        let missing_unit = LineItemInput::new("Limes", 3, "");

        assert_eq!(
            draft.add_line_item(&missing_name),
            Err(ValidationError::MissingLineItemField { field: "name" })
        );
        assert_eq!(
            draft.add_line_item(&missing_quantity),
            Err(ValidationError::MissingLineItemField { field: "quantity" })
        );
        assert_eq!(
            draft.add_line_item(&negative_quantity),
            Err(ValidationError::InvalidQuantity)
        );
        assert_eq!(
            draft.add_line_item(&missing_unit),
            Err(ValidationError::MissingLineItemField { field: "unit" })
        );
        assert!(draft.is_empty());
    }

    #[test]
    fn draft_appends_in_order() {
        let mut draft = OrderDraft::new();
        draft.add_line_item(&LineItemInput::new("Limes", 3, "kilo")).unwrap();
        draft.add_line_item(&LineItemInput::new(" Tonic ", 2, " pack ")).unwrap();

        let names: Vec<_> = draft.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Limes", "Tonic"]);
        assert_eq!(draft.items()[1].unit, "pack");

        draft.clear();
        assert!(draft.is_empty());
    }

    #[test]
    fn draft_accepts_zero_and_fractional_quantities() {
        let mut draft = OrderDraft::new();
        let zero = draft.add_line_item(&LineItemInput::new("Limes", 0, "kilo")).unwrap();
        assert_eq!(zero.quantity, Quantity::from(0));
        let half = draft.add_line_item(&LineItemInput::new("Mint", 0.5, "kilo")).unwrap();
        assert_eq!(half.quantity.value(), 0.5);
        assert_eq!(draft.items().len(), 2);
    }

    #[test]
    fn order_decodes_backend_json() {
        let json = r#"{
            "_id": "65a1",
            "fecha": "2024-01-01T10:00:00.000Z",
            "productos": [
                {"nombre": "Limes", "cantidad": "3", "tipo": "kilo"},
                {"nombre": "Tonic", "cantidad": 12, "tipo": "unit"}
            ],
            "estado": "Recibido",
            "comentarios": "complete",
            "recibidoPor": "Ana"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::from("65a1"));
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.items[0].quantity, Quantity::from(3));
        assert_eq!(order.items[1].quantity, Quantity::from(12));
        assert_eq!(order.received_by.as_deref(), Some("Ana"));
        assert_eq!(order.label(), "01/01/2024 10:00:00");
    }

    #[test]
    fn pending_order_omits_reception_fields() {
        let json = r#"{"_id": "1", "fecha": "2024-01-01T10:00:00Z", "productos": []}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.is_pending());
        assert!(order.received_comment.is_none());

        let encoded = serde_json::to_value(&order).unwrap();
        assert_eq!(encoded["estado"], "Pendiente");
        assert!(encoded.get("comentarios").is_none());
    }

    #[test]
    fn fractional_quantities_do_not_spoil_the_list() {
        let json = r#"[
            {"_id": "a", "fecha": "2024-01-01T10:00:00Z",
             "productos": [{"nombre": "Limes", "cantidad": 3, "tipo": "kilo"}]},
            {"_id": "b", "fecha": "2024-01-01T11:00:00Z",
             "productos": [
                {"nombre": "Mint", "cantidad": "0.5", "tipo": "kilo"},
                {"nombre": "Ginger", "cantidad": 1.5, "tipo": "kilo"}
             ]}
        ]"#;
        let orders: Vec<Order> = serde_json::from_str(json).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].items[0].quantity.value(), 0.5);
        assert_eq!(orders[1].items[1].quantity.value(), 1.5);
    }

    #[test]
    fn bad_quantity_string_fails_to_decode() {
        let json = r#"{"nombre": "Limes", "cantidad": "lots", "tipo": "kilo"}"#;
        assert!(serde_json::from_str::<LineItem>(json).is_err());
    }

    #[test]
    fn status_change_uses_backend_field_names() {
        let change = StatusChange::received("ok", "Ana").unwrap();
        let encoded = serde_json::to_value(&change).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({"estado": "Recibido", "comentarios": "ok", "recibidoPor": "Ana"})
        );
    }
}
