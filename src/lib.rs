pub mod config;
pub mod error;
pub mod provider;
pub mod server;
pub mod session;

pub use error::{Error, Result};
