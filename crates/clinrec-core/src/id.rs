//! Typed identifiers for the entities this server stores.
//!
//! The persistence layer assigns integer keys; these newtypes keep a patient
//! key from ever being passed where a user key is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! integer_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw integer key.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw integer key.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

integer_id!(
    /// Identifier of a patient record.
    PatientId
);

integer_id!(
    /// Identifier of a user account (any role).
    UserId
);

integer_id!(
    /// Identifier of an access grant, assigned by the grant store.
    GrantId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(PatientId::new(7).to_string(), "7");
        assert_eq!(UserId::new(12).to_string(), "12");
        assert_eq!(GrantId::new(3).to_string(), "3");
    }

    #[test]
    fn test_id_value_roundtrip() {
        let id = PatientId::from(42);
        assert_eq!(id.value(), 42);
        assert_eq!(PatientId::new(42), id);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = UserId::new(12);
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
        let back: UserId = serde_json::from_str("12").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Compile-time property: a PatientId cannot be compared to a UserId.
        let patient = PatientId::new(1);
        let grant = GrantId::new(1);
        assert_eq!(patient.value(), grant.value());
    }
}
