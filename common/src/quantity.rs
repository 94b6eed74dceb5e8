use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::ValidationError;

/// How much of something: a finite, non-negative decimal ("0.5" kilo, 12 bottles).
///
/// On the wire `cantidad` is a JSON number or the numeric string a form
/// submitted; both decode. Whole values encode as integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(into = "WireQuantity")]
pub struct Quantity(f64);

// NaN and infinities never get past `Quantity::new`.
impl Eq for Quantity {}

impl Quantity {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && value >= 0.0 {
            // Normalise -0.0.
            Ok(Quantity(value + 0.0))
        } else {
            Err(ValidationError::InvalidQuantity)
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Quantity(f64::from(value))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let value: f64 = text.trim().parse().map_err(|_| ValidationError::InvalidQuantity)?;
        Quantity::new(value)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireQuantity {
    Whole(u64),
    Decimal(f64),
    Text(String),
}

impl From<Quantity> for WireQuantity {
    fn from(quantity: Quantity) -> Self {
        let value = quantity.0;
        if value.fract() == 0.0 && value <= u64::MAX as f64 {
            WireQuantity::Whole(value as u64)
        } else {
            WireQuantity::Decimal(value)
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let quantity = match WireQuantity::deserialize(deserializer)? {
            WireQuantity::Whole(n) => Quantity::new(n as f64),
            WireQuantity::Decimal(n) => Quantity::new(n),
            WireQuantity::Text(text) => text.parse(),
        };
        quantity.map_err(|e| D::Error::custom(format!("invalid quantity: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<Quantity, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn decodes_numbers_and_numeric_strings() {
        assert_eq!(decode("3").unwrap(), Quantity::from(3));
        assert_eq!(decode("1.5").unwrap().value(), 1.5);
        assert_eq!(decode(r#""0.5""#).unwrap().value(), 0.5);
        assert_eq!(decode(r#"" 12 ""#).unwrap(), Quantity::from(12));
        assert_eq!(decode("0").unwrap(), Quantity::from(0));
    }

    #[test]
    fn rejects_negative_and_non_numeric() {
        assert!(decode("-1").is_err());
        assert!(decode(r#""-0.5""#).is_err());
        assert!(decode(r#""lots""#).is_err());
        assert!(decode(r#""NaN""#).is_err());
        assert!(decode("null").is_err());
    }

    #[test]
    fn whole_values_encode_as_integers() {
        assert_eq!(serde_json::to_string(&Quantity::from(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Quantity::new(0.5).unwrap()).unwrap(), "0.5");
    }

    #[test]
    fn display_drops_trailing_zero() {
        assert_eq!(Quantity::from(3).to_string(), "3");
        assert_eq!(Quantity::new(1.25).unwrap().to_string(), "1.25");
    }

    #[test]
    fn constructor_rules() {
        assert!(Quantity::new(0.0).is_ok());
        assert_eq!(Quantity::new(-0.0).unwrap().to_string(), "0");
        assert_eq!(Quantity::new(-2.0), Err(ValidationError::InvalidQuantity));
        assert_eq!(Quantity::new(f64::INFINITY), Err(ValidationError::InvalidQuantity));
        assert_eq!(Quantity::new(f64::NAN), Err(ValidationError::InvalidQuantity));
    }
}
