use std::fmt;

use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;
use crate::validation::{require_text, ValidationError};

/// Quantity the quick-add form records.
pub const DEFAULT_SHORTAGE_QUANTITY: u32 = 1;
/// Unit kind the quick-add form records.
pub const DEFAULT_SHORTAGE_UNIT: &str = "unidad";

/// Unique shortage identifier, assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortageId(pub String);

impl fmt::Display for ShortageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShortageId {
    fn from(id: &str) -> Self {
        ShortageId(id.to_string())
    }
}

/// A product that ran out and needs restocking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageEntry {
    #[serde(rename = "_id")]
    pub id: ShortageId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad", default = "default_quantity")]
    pub quantity: Quantity,
    #[serde(rename = "tipo", default = "default_unit")]
    pub unit: String,
}

fn default_quantity() -> Quantity {
    Quantity::from(DEFAULT_SHORTAGE_QUANTITY)
}

fn default_unit() -> String {
    DEFAULT_SHORTAGE_UNIT.to_string()
}

/// Body of an add-shortage request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShortage {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: Quantity,
    #[serde(rename = "tipo")]
    pub unit: String,
}

impl NewShortage {
    pub fn new(
        name: &str,
        quantity: impl Into<f64>,
        unit: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        require_text(name, "name")?;
        let quantity = Quantity::new(quantity.into())?;
        Ok(Self {
            name: name.trim().to_string(),
            quantity,
            unit: unit.into(),
        })
    }

    /// One unit of `name`, as the home screen's quick-add does.
    pub fn quick(name: &str) -> Result<Self, ValidationError> {
        Self::new(name, DEFAULT_SHORTAGE_QUANTITY, DEFAULT_SHORTAGE_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            NewShortage::quick("   "),
            Err(ValidationError::BlankField { field: "name" })
        );
    }

    #[test]
    fn quick_add_defaults() {
        let entry = NewShortage::quick(" Ice ").unwrap();
        assert_eq!(entry.name, "Ice");
        assert_eq!(entry.quantity, Quantity::from(1));
        assert_eq!(entry.unit, "unidad");
    }

    #[test]
    fn fractional_amounts_are_kept() {
        let entry = NewShortage::new("Ginger", 0.25, "kilo").unwrap();
        assert_eq!(entry.quantity.value(), 0.25);
        assert_eq!(
            NewShortage::new("Ginger", -1, "kilo"),
            Err(ValidationError::InvalidQuantity)
        );

        let stored: ShortageEntry =
            serde_json::from_str(r#"{"_id": "s2", "nombre": "Mint", "cantidad": "1.5", "tipo": "kilo"}"#)
                .unwrap();
        assert_eq!(stored.quantity.value(), 1.5);
    }

    #[test]
    fn entry_without_quantity_or_unit_decodes_with_defaults() {
        let entry: ShortageEntry =
            serde_json::from_str(r#"{"_id": "s1", "nombre": "Ice"}"#).unwrap();
        assert_eq!(entry.quantity, Quantity::from(DEFAULT_SHORTAGE_QUANTITY));
        assert_eq!(entry.unit, DEFAULT_SHORTAGE_UNIT);
    }

    #[test]
    fn add_request_wire_shape() {
        let body = serde_json::to_value(NewShortage::quick("Ice").unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"nombre": "Ice", "cantidad": 1, "tipo": "unidad"})
        );
    }
}
