//! Interaction event definitions
//!
//! This module defines the telemetry records the simulator emits. The
//! serialized shape matches what the search-analytics dashboards query:
//! an `event` discriminator, camelCase ids, and a `mock_timestamp`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{
    identifiers::{CorrelationId, SessionId, UserId},
    types::{DocumentId, IndexRank, QueryText, ResultCount},
};

/// One telemetry record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    #[serde(flatten)]
    pub payload: EventPayload,
    pub correlation_id: CorrelationId,
    pub session_id: SessionId,
    pub user_id: UserId,
    #[serde(rename = "mock_timestamp")]
    pub mock_timestamp: DateTime<Utc>,
}

/// Variant-specific fields of an interaction event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum EventPayload {
    OnSearch {
        query: QueryText,
    },
    OnResults {
        query: QueryText,
        result_count: ResultCount,
    },
    OnNavigate {
        index_rank: IndexRank,
        document_id: DocumentId,
    },
    OnSuccess {
        index_rank: IndexRank,
        document_id: DocumentId,
    },
}

/// Discriminator of an event without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    OnSearch,
    OnResults,
    OnNavigate,
    OnSuccess,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::OnSearch => "OnSearch",
            EventKind::OnResults => "OnResults",
            EventKind::OnNavigate => "OnNavigate",
            EventKind::OnSuccess => "OnSuccess",
        };
        f.write_str(name)
    }
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::OnSearch { .. } => EventKind::OnSearch,
            EventPayload::OnResults { .. } => EventKind::OnResults,
            EventPayload::OnNavigate { .. } => EventKind::OnNavigate,
            EventPayload::OnSuccess { .. } => EventKind::OnSuccess,
        }
    }
}

impl InteractionEvent {
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    pub fn query(&self) -> Option<&QueryText> {
        match &self.payload {
            EventPayload::OnSearch { query } | EventPayload::OnResults { query, .. } => {
                Some(query)
            }
            _ => None,
        }
    }

    /// Rank and document for navigation and success events
    pub fn target(&self) -> Option<(IndexRank, &DocumentId)> {
        match &self.payload {
            EventPayload::OnNavigate {
                index_rank,
                document_id,
            }
            | EventPayload::OnSuccess {
                index_rank,
                document_id,
            } => Some((*index_rank, document_id)),
            _ => None,
        }
    }
}
