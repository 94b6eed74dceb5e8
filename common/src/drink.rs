use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ingredients::parse_ingredients;
use crate::validation::{require_image, require_text, ValidationError};

/// Unique drink identifier, assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrinkId(pub String);

impl fmt::Display for DrinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DrinkId {
    fn from(id: &str) -> Self {
        DrinkId(id.to_string())
    }
}

/// A drink on the bar's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    #[serde(rename = "_id")]
    pub id: DrinkId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "preparacion", default)]
    pub instructions: String,
    #[serde(rename = "imagen", default)]
    pub image: String,
    #[serde(rename = "ingredientes", default)]
    pub ingredients: Vec<String>,
}

/// Drink form input, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkInput {
    pub name: String,
    pub instructions: String,
    /// Raw comma-separated text; may parse to nothing.
    pub ingredients: String,
    pub image: Option<String>,
}

impl DrinkInput {
    pub fn validate(&self) -> Result<NewDrink, ValidationError> {
        require_text(&self.name, "name")?;
        require_text(&self.instructions, "instructions")?;
        let image = require_image(self.image.as_deref())?;
        Ok(NewDrink {
            name: self.name.clone(),
            instructions: self.instructions.clone(),
            image,
            ingredients: parse_ingredients(&self.ingredients),
        })
    }
}

/// Body of a create- or update-drink request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDrink {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "preparacion")]
    pub instructions: String,
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(rename = "ingredientes")]
    pub ingredients: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negroni() -> DrinkInput {
        DrinkInput {
            name: "Negroni".into(),
            instructions: "Stir over ice".into(),
            ingredients: "gin, vermouth, campari".into(),
            image: Some("data:image/jpeg;base64,/9j/".into()),
        }
    }

    #[test]
    fn valid_input_parses_ingredients() {
        let drink = negroni().validate().unwrap();
        assert_eq!(drink.ingredients, ["gin", "vermouth", "campari"]);
    }

    #[test]
    fn empty_ingredient_set_is_accepted() {
        let input = DrinkInput {
            ingredients: " , ".into(),
            ..negroni()
        };
        assert!(input.validate().unwrap().ingredients.is_empty());
    }

    #[test]
    fn name_instructions_and_image_are_required() {
        let no_name = DrinkInput { name: "".into(), ..negroni() };
        let no_steps = DrinkInput { instructions: " ".into(), ..negroni() };
        let no_image = DrinkInput { image: None, ..negroni() };

        assert_eq!(no_name.validate(), Err(ValidationError::BlankField { field: "name" }));
        assert_eq!(
            no_steps.validate(),
            Err(ValidationError::BlankField { field: "instructions" })
        );
        assert_eq!(no_image.validate(), Err(ValidationError::MissingImage));
    }

    #[test]
    fn drink_wire_shape() {
        let body = serde_json::to_value(negroni().validate().unwrap()).unwrap();
        assert_eq!(body["nombre"], "Negroni");
        assert_eq!(body["ingredientes"][2], "campari");
    }
}
