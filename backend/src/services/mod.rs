//! Service layer for request-level business rules.
//!
//! Repository orchestration lives in [`crate::db::services`]; this module holds
//! the rules applied to incoming data before it reaches the repository.

pub mod validation;

pub use validation::{
    validate_dog_changes, validate_new_dog, FieldIssue, FieldKind, FieldRule, Schema,
    ValidationErrors, ValidationMode, DOG_SCHEMA,
};
