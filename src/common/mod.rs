//! Shared types, errors and traits

pub mod channels;
pub mod errors;
pub mod traits;
pub mod types;
