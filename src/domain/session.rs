use chrono::{DateTime, Utc};

use crate::domain::{
    events::{EventPayload, InteractionEvent},
    identifiers::{CorrelationId, SessionId, UserId},
    types::{DocumentId, IndexRank, QueryText, ResultCount},
};

/// One simulated user visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub started_at: DateTime<Utc>,
}

/// A single search issued within a session, with the results the user opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub correlation_id: CorrelationId,
    pub text: QueryText,
    pub searched_at: DateTime<Utc>,
    pub result_count: ResultCount,
    pub navigations: Vec<Navigation>,
}

/// A click on one search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub document_id: DocumentId,
    pub rank: IndexRank,
    pub navigated_at: DateTime<Utc>,
    pub succeeded: bool,
}

impl Query {
    /// Flatten the query into its telemetry records, in causal order
    ///
    /// `OnResults` shares the search timestamp and `OnSuccess` shares the
    /// timestamp of the navigation it confirms.
    pub fn to_events(&self, session: &Session, emit_results: bool) -> Vec<InteractionEvent> {
        let record = |payload: EventPayload, at: DateTime<Utc>| InteractionEvent {
            payload,
            correlation_id: self.correlation_id,
            session_id: session.id,
            user_id: session.user_id.clone(),
            mock_timestamp: at,
        };

        let successes = self.navigations.iter().filter(|n| n.succeeded).count();
        let mut events = Vec::with_capacity(2 + self.navigations.len() + successes);

        events.push(record(
            EventPayload::OnSearch {
                query: self.text.clone(),
            },
            self.searched_at,
        ));

        if emit_results {
            events.push(record(
                EventPayload::OnResults {
                    query: self.text.clone(),
                    result_count: self.result_count,
                },
                self.searched_at,
            ));
        }

        for navigation in &self.navigations {
            events.push(record(
                EventPayload::OnNavigate {
                    index_rank: navigation.rank,
                    document_id: navigation.document_id.clone(),
                },
                navigation.navigated_at,
            ));

            if navigation.succeeded {
                events.push(record(
                    EventPayload::OnSuccess {
                        index_rank: navigation.rank,
                        document_id: navigation.document_id.clone(),
                    },
                    navigation.navigated_at,
                ));
            }
        }

        events
    }
}
