//! Mock clock for simulated sessions

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Seconds a search adds to the session clock
pub const SEARCH_STEP_SECS: i64 = 10;

/// Seconds a result navigation adds to the session clock
pub const NAVIGATION_STEP_SECS: i64 = 5;

/// Longest span one session can cover: `max_queries` searches, each opening
/// `max_results` results
///
/// `None` when the span does not fit in a [`Duration`].
pub fn longest_session(max_queries: u32, max_results: u32) -> Option<Duration> {
    let per_query = NAVIGATION_STEP_SECS
        .checked_mul(i64::from(max_results))?
        .checked_add(SEARCH_STEP_SECS)?;
    Duration::try_seconds(per_query.checked_mul(i64::from(max_queries))?)
}

/// Monotonic clock that only moves when an event happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockClock {
    now: DateTime<Utc>,
}

impl MockClock {
    /// Clock parked at midnight UTC of the given date
    pub fn start_of(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn search(&mut self) -> DateTime<Utc> {
        self.advance(Duration::seconds(SEARCH_STEP_SECS))
    }

    pub fn navigate(&mut self) -> DateTime<Utc> {
        self.advance(Duration::seconds(NAVIGATION_STEP_SECS))
    }

    // Callers bound the session length up front; see `longest_session`
    fn advance(&mut self, step: Duration) -> DateTime<Utc> {
        self.now += step;
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_starts_at_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let clock = MockClock::start_of(date);
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_search_and_navigation_steps() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut clock = MockClock::start_of(date);
        let start = clock.now();

        let searched = clock.search();
        let navigated = clock.navigate();

        assert_eq!(searched - start, Duration::seconds(10));
        assert_eq!(navigated - searched, Duration::seconds(5));
        assert_eq!(clock.now(), navigated);
    }

    #[test]
    fn test_longest_session_counts_every_step() {
        assert_eq!(longest_session(1, 1), Some(Duration::seconds(15)));
        assert_eq!(longest_session(5, 10), Some(Duration::seconds(300)));
        assert_eq!(longest_session(20_000, 100), Some(Duration::seconds(10_200_000)));
    }

    #[test]
    fn test_longest_session_overflow_is_none() {
        assert_eq!(longest_session(u32::MAX, u32::MAX), None);
    }
}
