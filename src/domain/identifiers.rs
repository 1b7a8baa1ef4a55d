//! Identifiers for simulated sessions, queries and users
//!
//! Every identifier is derived from bytes drawn out of the simulation's
//! seeded random source, so the same seed always yields the same ids.

use nutype::nutype;
use uuid::{Builder, Uuid};

/// Identifier of one simulated user visit
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRef
))]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self::new(Builder::from_random_bytes(bytes).into_uuid())
    }
}

/// Identifier grouping all events produced by one query
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRef
))]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self::new(Builder::from_random_bytes(bytes).into_uuid())
    }
}

/// Opaque alphanumeric token standing in for an end user
#[nutype(
    validate(
        not_empty,
        len_char_max = 64,
        predicate = |s| s.chars().all(|c| c.is_ascii_alphanumeric())
    ),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct UserId(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_from_same_bytes_are_equal() {
        let bytes = [7u8; 16];
        assert_eq!(
            SessionId::from_random_bytes(bytes),
            SessionId::from_random_bytes(bytes)
        );
        assert_ne!(
            CorrelationId::from_random_bytes([1u8; 16]),
            CorrelationId::from_random_bytes([2u8; 16])
        );
    }

    #[test]
    fn test_ids_are_version_four_uuids() {
        let id = SessionId::from_random_bytes([0xAB; 16]);
        assert_eq!(id.as_ref().get_version_num(), 4);
    }

    #[test]
    fn test_user_id_must_be_alphanumeric() {
        assert!(UserId::try_new("abc123".to_string()).is_ok());
        assert!(UserId::try_new("abc-123".to_string()).is_err());
        assert!(UserId::try_new(String::new()).is_err());
    }
}
