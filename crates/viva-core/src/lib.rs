pub mod config;
pub mod error;
pub mod types;

pub use config::VivaConfig;
pub use error::{Result, VivaError};
pub use types::*;
