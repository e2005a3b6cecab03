pub mod config;
pub mod policy;
pub mod session;
pub mod sim;
pub mod telemetry;
pub mod view;

// Re-export the core pair for convenient access
pub use policy::{decide, Command, Movement};
pub use telemetry::{decode, Telemetry};
