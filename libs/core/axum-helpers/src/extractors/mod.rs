//! Custom extractors for Axum handlers.

pub mod validated;

pub use validated::{Validated, ValidatedInput, ValidatedPath};
