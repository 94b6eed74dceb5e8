pub mod drink;
pub mod gateway;
pub mod ingredients;
pub mod notification;
pub mod order;
pub mod premix;
pub mod quantity;
pub mod shortage;
pub mod validation;
