//! Lazy generator of synthetic interaction events
//!
//! The simulator walks a 70% sample of the configured days in ascending
//! order. Each day hosts a fixed number of sessions, each session issues
//! `1..=M` queries, and each query opens `1..=K` results, some of which are
//! confirmed by a success signal. Events are produced one query at a time,
//! so memory stays bounded by the size of a single query regardless of the
//! date range.

use chrono::{Days, NaiveDate};
use std::collections::VecDeque;
use tracing::{debug, trace};

use crate::domain::{
    IndexRank, InteractionEvent, Navigation, Query, ResultCount, Session, SimulationConfig,
};
use crate::simulation::clock::MockClock;
use crate::simulation::rng::SimulationRng;

/// Pick the days of the configured range that get simulated
///
/// Returns `floor(0.7 * day_count)` distinct dates in ascending order.
pub fn sample_dates(config: &SimulationConfig, rng: &mut SimulationRng) -> Vec<NaiveDate> {
    let day_count = config.day_count().into_inner() as usize;
    rng.sample_indices(day_count, config.sampled_day_count())
        .into_iter()
        .filter_map(|offset| config.start_date().checked_add_days(Days::new(offset as u64)))
        .collect()
}

/// Deterministic, finite iterator of interaction events
#[derive(Debug)]
pub struct EventSimulator {
    config: SimulationConfig,
    rng: SimulationRng,
    dates: std::vec::IntoIter<NaiveDate>,
    day: Option<DayCursor>,
    session: Option<SessionCursor>,
    pending: VecDeque<InteractionEvent>,
}

#[derive(Debug)]
struct DayCursor {
    date: NaiveDate,
    sessions_remaining: u32,
}

#[derive(Debug)]
struct SessionCursor {
    session: Session,
    clock: MockClock,
    queries_remaining: u32,
}

impl EventSimulator {
    pub fn new(config: SimulationConfig, mut rng: SimulationRng) -> Self {
        let dates = sample_dates(&config, &mut rng);
        debug!(
            sampled_days = dates.len(),
            day_count = %config.day_count(),
            "Sampled simulation dates"
        );

        Self {
            config,
            rng,
            dates: dates.into_iter(),
            day: None,
            session: None,
            pending: VecDeque::new(),
        }
    }

    pub fn from_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::new(config, SimulationRng::seeded(seed))
    }

    /// Queue the events of the next query; `false` once the run is exhausted
    fn fill_next_query(&mut self) -> bool {
        loop {
            if let Some(cursor) = self.session.as_mut() {
                if cursor.queries_remaining > 0 {
                    cursor.queries_remaining -= 1;
                    let query = generate_query(&self.config, &mut self.rng, &mut cursor.clock);
                    trace!(
                        correlation_id = %query.correlation_id,
                        navigations = query.navigations.len(),
                        "Generated query"
                    );
                    self.pending
                        .extend(query.to_events(&cursor.session, self.config.emit_results()));
                    return true;
                }
                self.session = None;
            }

            if let Some(day) = self.day.as_mut() {
                if day.sessions_remaining > 0 {
                    day.sessions_remaining -= 1;
                    let date = day.date;
                    self.session = Some(self.start_session(date));
                    continue;
                }
                self.day = None;
            }

            match self.dates.next() {
                Some(date) => {
                    debug!(%date, "Simulating day");
                    self.day = Some(DayCursor {
                        date,
                        sessions_remaining: self.config.sessions_per_day().into_inner(),
                    });
                }
                None => return false,
            }
        }
    }

    fn start_session(&mut self, date: NaiveDate) -> SessionCursor {
        let clock = MockClock::start_of(date);
        let session = Session {
            id: self.rng.session_id(),
            user_id: self.rng.user_id(),
            started_at: clock.now(),
        };
        let queries_remaining = self
            .rng
            .count_up_to(self.config.max_queries_per_session().into_inner());
        trace!(session_id = %session.id, queries = queries_remaining, "Started session");

        SessionCursor {
            session,
            clock,
            queries_remaining,
        }
    }
}

fn generate_query(
    config: &SimulationConfig,
    rng: &mut SimulationRng,
    clock: &mut MockClock,
) -> Query {
    let correlation_id = rng.correlation_id();
    let text = rng
        .choose_query(config.query_vocabulary())
        .expect("Query vocabulary is never empty");
    let searched_at = clock.search();

    let max_results = config.max_results_per_query().into_inner();
    let navigation_count = rng.count_up_to(max_results);
    let navigations = (0..navigation_count)
        .map(|_| {
            let document_id = rng.document_id();
            let rank = IndexRank::try_new(rng.count_up_to(max_results))
                .expect("Ranks drawn from 1..=max are valid");
            let navigated_at = clock.navigate();
            let succeeded = rng.probability_of_feedback(config.feedback_probability());
            Navigation {
                document_id,
                rank,
                navigated_at,
                succeeded,
            }
        })
        .collect();

    Query {
        correlation_id,
        text,
        searched_at,
        result_count: ResultCount::new(max_results),
        navigations,
    }
}

impl Iterator for EventSimulator {
    type Item = InteractionEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if !self.fill_next_query() {
                return None;
            }
        }
    }
}

impl std::iter::FusedIterator for EventSimulator {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DayCount, EventKind, FeedbackProbability, MaxQueriesPerSession, MaxResultsPerQuery,
        SessionsPerDay,
    };
    use chrono::Duration;
    use std::collections::HashSet;

    fn config(days: u32, sessions: u32, queries: u32, results: u32) -> SimulationConfig {
        SimulationConfig::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            DayCount::try_new(days).unwrap(),
            SessionsPerDay::try_new(sessions).unwrap(),
            MaxQueriesPerSession::try_new(queries).unwrap(),
            MaxResultsPerQuery::try_new(results).unwrap(),
            FeedbackProbability::try_new(0.5).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_sampled_dates_are_distinct_ascending_and_in_range() {
        let config = config(30, 1, 1, 1);
        let mut rng = SimulationRng::seeded(5);
        let dates = sample_dates(&config, &mut rng);

        assert_eq!(dates.len(), 21);
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        let end = config.start_date() + Duration::days(30);
        assert!(dates.iter().all(|d| *d >= config.start_date() && *d < end));
    }

    #[test]
    fn test_single_day_range_yields_nothing() {
        let events: Vec<_> = EventSimulator::from_seed(config(1, 5, 5, 5), 9).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn test_same_seed_same_events() {
        let a: Vec<_> = EventSimulator::from_seed(config(10, 3, 4, 5), 1234).collect();
        let b: Vec<_> = EventSimulator::from_seed(config(10, 3, 4, 5), 1234).collect();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_sessions_per_sampled_day_are_exact() {
        let config = config(10, 4, 3, 3);
        let events: Vec<_> = EventSimulator::from_seed(config.clone(), 77).collect();

        let sessions: HashSet<_> = events.iter().map(|e| e.session_id).collect();
        assert_eq!(sessions.len(), config.sampled_day_count() * 4);
    }

    #[test]
    fn test_every_query_starts_with_a_search() {
        let events: Vec<_> = EventSimulator::from_seed(config(5, 2, 3, 4), 3).collect();

        let mut seen = HashSet::new();
        for event in &events {
            if seen.insert(event.correlation_id) {
                assert_eq!(event.kind(), EventKind::OnSearch);
            }
        }
    }

    #[test]
    fn test_emit_results_adds_one_results_event_per_search() {
        let config = config(5, 2, 3, 4).with_emit_results(true);
        let events: Vec<_> = EventSimulator::from_seed(config, 21).collect();

        let searches = events.iter().filter(|e| e.kind() == EventKind::OnSearch).count();
        let results = events.iter().filter(|e| e.kind() == EventKind::OnResults).count();
        assert!(searches > 0);
        assert_eq!(searches, results);
    }

    #[test]
    fn test_sessions_start_from_midnight_of_their_day() {
        let events: Vec<_> = EventSimulator::from_seed(config(4, 1, 1, 1), 8).collect();

        let first = &events[0];
        assert_eq!(first.kind(), EventKind::OnSearch);
        let midnight = first.mock_timestamp.date_naive().and_time(chrono::NaiveTime::MIN);
        assert_eq!(first.mock_timestamp.naive_utc() - midnight, Duration::seconds(10));
    }

    #[test]
    fn test_sessions_on_the_last_calendar_date_run_to_completion() {
        let config = SimulationConfig::new(
            NaiveDate::MAX.checked_sub_days(Days::new(1)).unwrap(),
            DayCount::try_new(2).unwrap(),
            SessionsPerDay::try_new(2).unwrap(),
            MaxQueriesPerSession::try_new(200).unwrap(),
            MaxResultsPerQuery::try_new(50).unwrap(),
            FeedbackProbability::try_new(0.5).unwrap(),
        )
        .unwrap();

        let events: Vec<_> = EventSimulator::from_seed(config, 11).collect();

        assert!(!events.is_empty());
        assert!(events
            .iter()
            .all(|e| e.mock_timestamp.date_naive() >= NaiveDate::MAX.pred_opt().unwrap()));
    }
}
