//! Domain-based type organization
//!
//! - config: device configuration snapshot and scan results
//! - network: interface field validation
//! - page: wizard pages and commit progress
//! - settings: startup settings from the shell

pub mod config;
pub mod network;
pub mod page;
pub mod settings;

pub use config::*;
pub use network::*;
pub use page::*;
pub use settings::*;
