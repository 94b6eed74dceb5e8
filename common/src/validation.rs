use thiserror::Error;

/// A local precondition that failed before any request left the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An order needs at least one line item.
    #[error("add at least one line item to the order")]
    EmptyOrder,
    /// A required text field was empty or whitespace-only.
    #[error("{field} is required")]
    BlankField { field: &'static str },
    /// A line item field was left out of the draft form.
    #[error("line item {field} is required")]
    MissingLineItemField { field: &'static str },
    /// Quantities are finite and not negative.
    #[error("quantity must be a non-negative number")]
    InvalidQuantity,
    /// Premixes and drinks carry an image payload.
    #[error("an image is required")]
    MissingImage,
    /// The order is already received; received is terminal.
    #[error("order {id} was already received")]
    AlreadyReceived { id: String },
    /// The entity is not in the local cache, so its current value is unknown.
    #[error("{id} is not loaded")]
    NotLoaded { id: String },
}

/// True when `value` is empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Reject blank text for the named field.
pub fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::BlankField { field });
    }
    Ok(())
}

/// Reject a missing or blank image payload.
pub(crate) fn require_image(image: Option<&str>) -> Result<String, ValidationError> {
    match image {
        Some(data) if !is_blank(data) => Ok(data.to_string()),
        _ => Err(ValidationError::MissingImage),
    }
}
