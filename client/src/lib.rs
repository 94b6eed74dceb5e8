pub mod bar;
pub mod config;
pub mod confirm;
pub mod drink_store;
pub mod error;
pub mod http_gateway;
pub mod memory_gateway;
pub mod notifier;
pub mod order_store;
pub mod premix_store;
pub mod shortage_store;

pub use bar::{Bar, Dashboard, OrderLine};
pub use config::GatewayConfig;
pub use confirm::{AutoConfirm, Confirm};
pub use error::StoreError;
pub use http_gateway::HttpGateway;
pub use memory_gateway::MemoryGateway;
pub use notifier::Notifier;
