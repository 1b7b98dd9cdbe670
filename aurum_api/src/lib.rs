//! Client and wire types for a precious-metals spot price endpoint.

mod client;
mod errors;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
