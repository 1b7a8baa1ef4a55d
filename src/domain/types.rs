//! Value types carried by interaction events
//!
//! This module provides newtypes for the event payload fields to avoid
//! primitive obsession and ensure validation at boundaries.

use nutype::nutype;

/// Text a simulated user typed into the search box
///
/// Limited to 200 characters, which comfortably covers real search queries.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 200),
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
pub struct QueryText(String);

/// Identifier of the search result document a user opened
#[nutype(
    validate(not_empty, len_char_max = 128),
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
pub struct DocumentId(String);

/// One-based position of a document in the result list
#[nutype(
    validate(greater_or_equal = 1),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct IndexRank(u32);

/// Number of results reported back for a search
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRef,
    Display
))]
pub struct ResultCount(u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text_is_trimmed_and_non_empty() {
        let query = QueryText::try_new("  pricing  ".to_string()).unwrap();
        assert_eq!(query.as_ref(), "pricing");
        assert!(QueryText::try_new("   ".to_string()).is_err());
    }

    #[test]
    fn test_query_text_length_limit() {
        assert!(QueryText::try_new("q".repeat(200)).is_ok());
        assert!(QueryText::try_new("q".repeat(201)).is_err());
    }

    #[test]
    fn test_index_rank_is_one_based() {
        assert!(IndexRank::try_new(0).is_err());
        assert_eq!(IndexRank::try_new(1).unwrap().into_inner(), 1);
    }

    #[test]
    fn test_document_id_rejects_empty() {
        assert!(DocumentId::try_new(String::new()).is_err());
    }
}
