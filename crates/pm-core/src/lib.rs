//! PM Core Library
//!
//! Domain models and operations for clients and the projects they own.

pub mod client;
pub mod error;
pub mod project;
pub mod validate;

pub use error::{PmError, PmResult};
