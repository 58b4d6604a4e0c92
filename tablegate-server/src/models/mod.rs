//! Request-side models: table descriptors and declarative validation
//!
//! Handlers never touch raw request data; they go through `validate`
//! with a static rule list and receive sanitized values.

pub mod table;
pub mod validation;

pub use table::{TableSpec, AGENTS, COMPANY, CUSTOMER};
pub use validation::{
    escape, validate, FieldError, Location, RequestInput, Rule, Step, ValidationResult,
    REQUIRED_TEXT,
};
