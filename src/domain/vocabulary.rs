//! Built-in search terms used when no vocabulary is configured

use crate::domain::types::QueryText;

pub const DEFAULT_QUERIES: &[&str] = &[
    "pricing",
    "getting started",
    "reset password",
    "api reference",
    "billing",
    "storage limits",
    "release notes",
    "sso setup",
    "export data",
    "rate limits",
    "webhooks",
    "delete account",
    "invoice download",
    "mobile app",
    "two factor authentication",
    "contact support",
];

pub fn default_queries() -> Vec<QueryText> {
    DEFAULT_QUERIES
        .iter()
        .filter_map(|q| QueryText::try_new((*q).to_string()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_query_is_valid() {
        assert_eq!(default_queries().len(), DEFAULT_QUERIES.len());
    }
}
