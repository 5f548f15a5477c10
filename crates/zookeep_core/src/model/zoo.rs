//! Zoo domain model.
//!
//! # Responsibility
//! - Define the canonical zoo record shared by repository and service layers.
//! - Provide required-field validation for write paths.
//!
//! # Invariants
//! - `id` is `None` until first persisted; storage assigns it and it never
//!   changes afterwards.
//! - Identifiers are never reused within a store's lifetime.
//! - `name` and `location` must be non-blank for a record to be persistable.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by storage on first save.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ZooId = i64;

/// Canonical zoo record.
///
/// Callers construct records without an id; the repository hands back a copy
/// carrying the assigned id after the first save. Read operations return
/// disconnected copies, the store owns the canonical row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zoo {
    /// Storage-assigned identifier; `None` until first persisted.
    pub id: Option<ZooId>,
    /// Display name, required.
    pub name: String,
    /// Free-form location text, required.
    pub location: String,
    /// Optional longer description.
    pub description: Option<String>,
}

/// Required-field violation detected before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZooValidationError {
    EmptyName,
    EmptyLocation,
}

impl Display for ZooValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "zoo name must not be blank"),
            Self::EmptyLocation => write!(f, "zoo location must not be blank"),
        }
    }
}

impl Error for ZooValidationError {}

impl Zoo {
    /// Creates an unpersisted record with no id and no description.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            location: location.into(),
            description: None,
        }
    }

    /// Attaches a description, builder style.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks required-field presence.
    ///
    /// Presence means non-blank after trimming; this is the only validation
    /// the persistence layer performs.
    pub fn validate(&self) -> Result<(), ZooValidationError> {
        if self.name.trim().is_empty() {
            return Err(ZooValidationError::EmptyName);
        }
        if self.location.trim().is_empty() {
            return Err(ZooValidationError::EmptyLocation);
        }
        Ok(())
    }

    /// Returns whether this record has been through a save.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{Zoo, ZooValidationError};

    #[test]
    fn new_record_starts_without_id() {
        let zoo = Zoo::new("Manila Zoo", "Manila, Philippines");
        assert_eq!(zoo.id, None);
        assert!(!zoo.is_persisted());
        assert_eq!(zoo.description, None);
    }

    #[test]
    fn with_description_sets_optional_field() {
        let zoo = Zoo::new("Cebu Safari", "Cebu, Philippines")
            .with_description("World famous safari park");
        assert_eq!(zoo.description.as_deref(), Some("World famous safari park"));
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        let no_name = Zoo::new("   ", "Manila, Philippines");
        assert_eq!(no_name.validate(), Err(ZooValidationError::EmptyName));

        let no_location = Zoo::new("Manila Zoo", "");
        assert_eq!(no_location.validate(), Err(ZooValidationError::EmptyLocation));

        let valid = Zoo::new("Manila Zoo", "Manila, Philippines");
        assert_eq!(valid.validate(), Ok(()));
    }

    #[test]
    fn serde_shape_uses_plain_field_names() {
        let zoo = Zoo {
            id: Some(7),
            name: "Manila Zoo".to_string(),
            location: "Manila, Philippines".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&zoo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Manila Zoo");
        assert!(json["description"].is_null());
    }
}
