/// Centralized error handling for pathlink
pub mod link;

pub use link::{LinkError, Result};
