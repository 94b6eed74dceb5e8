use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ingredients::parse_ingredients;
use crate::validation::{require_image, require_text, ValidationError};

/// Unique premix identifier, assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PremixId(pub String);

impl fmt::Display for PremixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PremixId {
    fn from(id: &str) -> Self {
        PremixId(id.to_string())
    }
}

/// A prepared drink-mix base. `pending` means it still has to be made;
/// otherwise it is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Premix {
    #[serde(rename = "_id")]
    pub id: PremixId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "preparacion", default)]
    pub instructions: String,
    /// Data URI of the picture.
    #[serde(rename = "imagen", default)]
    pub image: String,
    #[serde(rename = "ingredientes", default)]
    pub ingredients: Vec<String>,
    #[serde(rename = "pendiente", default)]
    pub pending: bool,
}

impl Premix {
    pub fn status_label(&self) -> &'static str {
        if self.pending {
            "pending"
        } else {
            "ready"
        }
    }
}

/// Premix form input. Ingredients are still the raw comma-separated text and
/// the image is whatever the upload encoder produced, if anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PremixInput {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub ingredients: String,
    pub image: Option<String>,
    /// Defaults to ready.
    pub pending: Option<bool>,
}

impl PremixInput {
    pub fn validate(&self) -> Result<NewPremix, ValidationError> {
        require_text(&self.name, "name")?;
        require_text(&self.description, "description")?;
        require_text(&self.instructions, "instructions")?;
        require_text(&self.ingredients, "ingredients")?;
        let image = require_image(self.image.as_deref())?;
        Ok(NewPremix {
            name: self.name.clone(),
            description: self.description.clone(),
            instructions: self.instructions.clone(),
            image,
            ingredients: parse_ingredients(&self.ingredients),
            pending: self.pending.unwrap_or(false),
        })
    }
}

/// Body of a create-premix request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPremix {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "preparacion")]
    pub instructions: String,
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(rename = "ingredientes")]
    pub ingredients: Vec<String>,
    #[serde(rename = "pendiente")]
    pub pending: bool,
}

/// Body of a set-pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChange {
    #[serde(rename = "pendiente")]
    pub pending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mojito_base() -> PremixInput {
        PremixInput {
            name: "Mojito base".into(),
            description: "Muddled mint syrup".into(),
            instructions: "Muddle, strain, chill".into(),
            ingredients: "mint, rum, lime".into(),
            image: Some("data:image/png;base64,AAAA".into()),
            pending: None,
        }
    }

    #[test]
    fn valid_input_parses_ingredients_and_defaults_to_ready() {
        let premix = mojito_base().validate().unwrap();
        assert_eq!(premix.ingredients, ["mint", "rum", "lime"]);
        assert!(!premix.pending);
    }

    #[test]
    fn caller_supplied_pending_is_kept() {
        let input = PremixInput {
            pending: Some(true),
            ..mojito_base()
        };
        assert!(input.validate().unwrap().pending);
    }

    #[test]
    fn every_text_field_is_required() {
        let cases = [
            (PremixInput { name: " ".into(), ..mojito_base() }, "name"),
            (PremixInput { description: "".into(), ..mojito_base() }, "description"),
            (PremixInput { instructions: "\n".into(), ..mojito_base() }, "instructions"),
            (PremixInput { ingredients: "  ".into(), ..mojito_base() }, "ingredients"),
        ];
        for (input, field) in cases {
            assert_eq!(input.validate(), Err(ValidationError::BlankField { field }));
        }
    }

    #[test]
    fn image_is_required() {
        let input = PremixInput {
            image: None,
            ..mojito_base()
        };
        assert_eq!(input.validate(), Err(ValidationError::MissingImage));
    }

    #[test]
    fn separator_only_ingredients_pass_with_empty_set() {
        let input = PremixInput {
            ingredients: ", ,".into(),
            ..mojito_base()
        };
        assert!(input.validate().unwrap().ingredients.is_empty());
    }

    #[test]
    fn premix_decodes_backend_json() {
        let json = r#"{
            "_id": "p1",
            "nombre": "Mojito base",
            "descripcion": "d",
            "preparacion": "i",
            "imagen": "data:,",
            "ingredientes": ["mint", "rum"],
            "pendiente": true,
            "__v": 0
        }"#;
        let premix: Premix = serde_json::from_str(json).unwrap();
        assert_eq!(premix.id, PremixId::from("p1"));
        assert!(premix.pending);
        assert_eq!(premix.status_label(), "pending");
    }

    #[test]
    fn pending_change_wire_shape() {
        let body = serde_json::to_value(PendingChange { pending: true }).unwrap();
        assert_eq!(body, serde_json::json!({"pendiente": true}));
    }
}
