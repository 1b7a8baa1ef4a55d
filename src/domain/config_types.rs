//! Type-safe simulation parameters
//!
//! This module provides domain-specific types for the knobs that shape a
//! simulation run, ensuring validation at boundaries and preventing
//! primitive obsession.

use chrono::{Days, NaiveDate};
use nutype::nutype;

use crate::domain::types::QueryText;
use crate::domain::vocabulary;
use crate::error::{Error, Result};
use crate::simulation::clock::{longest_session, MockClock};

/// Number of consecutive days the simulated date range spans
#[nutype(
    validate(greater_or_equal = 1),
    default = 30,
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
        Display,
        Default
    )
)]
pub struct DayCount(u32);

/// Number of simulated sessions on each sampled day
#[nutype(
    validate(greater_or_equal = 1),
    default = 10,
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
        Display,
        Default
    )
)]
pub struct SessionsPerDay(u32);

/// Upper bound (inclusive) on the queries a session issues
#[nutype(
    validate(greater_or_equal = 1),
    default = 5,
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
        Display,
        Default
    )
)]
pub struct MaxQueriesPerSession(u32);

/// Upper bound (inclusive) on the result navigations per query
///
/// Also bounds the rank a navigation may land on.
#[nutype(
    validate(greater_or_equal = 1),
    default = 10,
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
        Display,
        Default
    )
)]
pub struct MaxResultsPerQuery(u32);

/// Probability (0.0 to 1.0) that a navigation is followed by a success signal
#[nutype(
    validate(finite, greater_or_equal = 0.0, less_or_equal = 1.0),
    default = 0.3,
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        PartialOrd,
        Serialize,
        Deserialize,
        Display,
        Default
    )
)]
pub struct FeedbackProbability(f64);

impl FeedbackProbability {
    /// Navigations are never followed by a success signal
    pub fn never() -> Self {
        Self::try_new(0.0).expect("Zero probability is valid")
    }

    /// Every navigation is followed by a success signal
    pub fn always() -> Self {
        Self::try_new(1.0).expect("Certain probability is valid")
    }
}

/// Immutable parameters for one generation pass
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    start_date: NaiveDate,
    day_count: DayCount,
    sessions_per_day: SessionsPerDay,
    max_queries_per_session: MaxQueriesPerSession,
    max_results_per_query: MaxResultsPerQuery,
    feedback_probability: FeedbackProbability,
    emit_results: bool,
    query_vocabulary: Vec<QueryText>,
}

impl SimulationConfig {
    /// Build a config, rejecting ranges whose sessions could run past the
    /// calendar
    ///
    /// A session on the last day of the range may issue `max_queries` queries
    /// with `max_results` navigations each; its clock must stay representable.
    pub fn new(
        start_date: NaiveDate,
        day_count: DayCount,
        sessions_per_day: SessionsPerDay,
        max_queries_per_session: MaxQueriesPerSession,
        max_results_per_query: MaxResultsPerQuery,
        feedback_probability: FeedbackProbability,
    ) -> Result<Self> {
        let last_day = u64::from(day_count.into_inner() - 1);
        let latest_event = start_date
            .checked_add_days(Days::new(last_day))
            .zip(longest_session(
                max_queries_per_session.into_inner(),
                max_results_per_query.into_inner(),
            ))
            .and_then(|(date, span)| MockClock::start_of(date).now().checked_add_signed(span));
        if latest_event.is_none() {
            return Err(Error::invalid_input(
                "simulation.start_date",
                format!("sessions over {day_count} days from {start_date} run past the calendar"),
            ));
        }

        Ok(Self {
            start_date,
            day_count,
            sessions_per_day,
            max_queries_per_session,
            max_results_per_query,
            feedback_probability,
            emit_results: false,
            query_vocabulary: vocabulary::default_queries(),
        })
    }

    /// Also emit an `OnResults` event right after every `OnSearch`
    pub fn with_emit_results(mut self, emit_results: bool) -> Self {
        self.emit_results = emit_results;
        self
    }

    /// Replace the built-in query vocabulary
    pub fn with_query_vocabulary(mut self, queries: Vec<QueryText>) -> Result<Self> {
        if queries.is_empty() {
            return Err(Error::invalid_input(
                "simulation.query_vocabulary",
                "at least one query is required",
            ));
        }
        self.query_vocabulary = queries;
        Ok(self)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn day_count(&self) -> DayCount {
        self.day_count
    }

    pub fn sessions_per_day(&self) -> SessionsPerDay {
        self.sessions_per_day
    }

    pub fn max_queries_per_session(&self) -> MaxQueriesPerSession {
        self.max_queries_per_session
    }

    pub fn max_results_per_query(&self) -> MaxResultsPerQuery {
        self.max_results_per_query
    }

    pub fn feedback_probability(&self) -> FeedbackProbability {
        self.feedback_probability
    }

    pub fn emit_results(&self) -> bool {
        self.emit_results
    }

    pub fn query_vocabulary(&self) -> &[QueryText] {
        &self.query_vocabulary
    }

    /// How many distinct days of the range get simulated: floor(0.7 * day_count)
    pub fn sampled_day_count(&self) -> usize {
        // Integer arithmetic keeps the floor exact for every day count
        self.day_count.into_inner() as usize * 7 / 10
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::default(),
            day_count: DayCount::default(),
            sessions_per_day: SessionsPerDay::default(),
            max_queries_per_session: MaxQueriesPerSession::default(),
            max_results_per_query: MaxResultsPerQuery::default(),
            feedback_probability: FeedbackProbability::default(),
            emit_results: false,
            query_vocabulary: vocabulary::default_queries(),
        }
    }
}
