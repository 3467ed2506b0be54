//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for user-supplied values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty or whitespace-only.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Another event already uses this name.
    #[error("an event named {name:?} already exists")]
    DuplicateName { name: String },

    /// A month number outside 1..=12.
    #[error("month must be between 1 and 12, got {value}")]
    InvalidMonth { value: u32 },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// An opaque event identifier.
    ///
    /// Assigned once when the event is created and never changed afterwards.
    EventId, "event ID"
);

impl EventId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// A validated event name.
///
/// Surrounding whitespace is trimmed; what remains must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventName(String);

impl EventName {
    /// Creates a name after trimming and validation.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "event name",
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventName> for String {
    fn from(name: EventName) -> Self {
        name.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A non-negative, fractional number of days.
///
/// Statistics stay fractional so averaging does not accumulate rounding error.
/// Rounding to whole days is left to whoever renders the value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Days(f64);

impl Days {
    /// Zero days.
    pub const ZERO: Self = Self(0.0);

    /// Returns the inner f64 value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Rounds to the nearest whole day.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "day counts are far below i64::MAX"
    )]
    pub fn whole(self) -> i64 {
        self.0.round() as i64
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "day counts are far below 2^52"
    )]
    pub(crate) fn from_whole(days: i64) -> Self {
        Self(days as f64)
    }

    pub(crate) const fn from_fraction(days: f64) -> Self {
        Self(days)
    }
}

impl Serialize for Days {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_rejects_empty() {
        assert!(EventId::new("").is_err());
        assert!(EventId::new("   ").is_err());
        assert!(EventId::new("valid-id").is_ok());
    }

    #[test]
    fn test_generated_event_ids_are_unique() {
        let a = EventId::generate();
        let b = EventId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_event_id_serde_roundtrip() {
        let id = EventId::new("test-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"test-123\"");
        let parsed: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_event_id_serde_rejects_empty() {
        let result: Result<EventId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_event_name_trims_whitespace() {
        let name = EventName::new("  Water plants \n").unwrap();
        assert_eq!(name.as_str(), "Water plants");
    }

    #[test]
    fn test_event_name_rejects_blank() {
        assert_eq!(
            EventName::new(" \t "),
            Err(ValidationError::Empty {
                field: "event name"
            })
        );
        assert!(EventName::new("").is_err());
    }

    #[test]
    fn test_event_name_serde_rejects_blank() {
        let result: Result<EventName, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }

    #[test]
    fn test_days_whole_rounds_to_nearest() {
        assert_eq!(Days::from_fraction(6.4).whole(), 6);
        assert_eq!(Days::from_fraction(6.5).whole(), 7);
        assert_eq!(Days::from_whole(3).whole(), 3);
        assert_eq!(Days::ZERO.whole(), 0);
    }

    #[test]
    fn test_days_serializes_as_number() {
        let json = serde_json::to_string(&Days::from_fraction(7.5)).unwrap();
        assert_eq!(json, "7.5");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::DuplicateName {
                name: "Paid rent".to_string()
            }
            .to_string(),
            "an event named \"Paid rent\" already exists"
        );
        assert_eq!(
            ValidationError::InvalidMonth { value: 13 }.to_string(),
            "month must be between 1 and 12, got 13"
        );
    }
}
