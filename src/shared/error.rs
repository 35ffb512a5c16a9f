//! Shared Error Types
//!
//! This module defines the field-level validation error map returned to
//! clients when request input is malformed.
//!
//! # Wire Format
//!
//! `ValidationErrors` serializes as a plain JSON object mapping each
//! offending field to the list of messages raised for it:
//!
//! ```json
//! {
//!   "email": ["The email field must be a valid email address."],
//!   "password": ["The password field must be at least 3 characters."]
//! }
//! ```
//!
//! Fields are kept in a `BTreeMap` so the output order is stable.
//!
//! # Usage
//!
//! ```rust
//! use authgate::shared::error::ValidationErrors;
//!
//! let mut errors = ValidationErrors::new();
//! errors.add("name", "The name field is required.");
//! assert!(!errors.is_empty());
//! ```
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field → messages map describing every rule a request violated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty error map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    ///
    /// Messages accumulate; a field may carry several.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Build a map holding a single message
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`, if any
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that failed, in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
